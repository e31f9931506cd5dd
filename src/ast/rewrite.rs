//! Generic depth-first tree rewrite.
//!
//! The transform is applied postorder: children are replaced first, then the
//! node itself is handed to the transform. Function literal bodies and call
//! arguments are deliberately left opaque; the transform still sees the
//! function or call node as a whole.

use super::{
    ArrayLiteral, BlockStatement, Expression, ExpressionStatement, HashLiteral, IfExpression,
    IndexExpression, InfixExpression, LetStatement, PrefixExpression, Program, ReturnStatement,
    Statement,
};

pub fn modify_program<F>(program: Program, transform: &mut F) -> Program
where
    F: FnMut(Expression) -> Expression,
{
    Program {
        statements: program
            .statements
            .into_iter()
            .map(|statement| modify_statement(statement, transform))
            .collect(),
    }
}

pub fn modify_statement<F>(statement: Statement, transform: &mut F) -> Statement
where
    F: FnMut(Expression) -> Expression,
{
    match statement {
        Statement::Let(stmt) => Statement::Let(LetStatement {
            name: stmt.name,
            value: modify_expression(stmt.value, transform),
        }),
        Statement::Return(stmt) => Statement::Return(ReturnStatement {
            value: modify_expression(stmt.value, transform),
        }),
        Statement::Expression(stmt) => Statement::Expression(ExpressionStatement {
            expression: modify_expression(stmt.expression, transform),
        }),
    }
}

pub fn modify_block<F>(block: BlockStatement, transform: &mut F) -> BlockStatement
where
    F: FnMut(Expression) -> Expression,
{
    BlockStatement {
        statements: block
            .statements
            .into_iter()
            .map(|statement| modify_statement(statement, transform))
            .collect(),
    }
}

pub fn modify_expression<F>(expression: Expression, transform: &mut F) -> Expression
where
    F: FnMut(Expression) -> Expression,
{
    let expression = match expression {
        Expression::Prefix(expr) => Expression::Prefix(PrefixExpression {
            operator: expr.operator,
            right: Box::new(modify_expression(*expr.right, transform)),
        }),
        Expression::Infix(expr) => Expression::Infix(InfixExpression {
            left: Box::new(modify_expression(*expr.left, transform)),
            operator: expr.operator,
            right: Box::new(modify_expression(*expr.right, transform)),
        }),
        Expression::Index(expr) => Expression::Index(IndexExpression {
            left: Box::new(modify_expression(*expr.left, transform)),
            index: Box::new(modify_expression(*expr.index, transform)),
        }),
        Expression::If(expr) => Expression::If(IfExpression {
            condition: Box::new(modify_expression(*expr.condition, transform)),
            consequence: modify_block(expr.consequence, transform),
            alternative: expr
                .alternative
                .map(|alternative| modify_block(alternative, transform)),
        }),
        Expression::Array(expr) => Expression::Array(ArrayLiteral {
            elements: expr
                .elements
                .into_iter()
                .map(|element| modify_expression(element, transform))
                .collect(),
        }),
        Expression::Hash(expr) => Expression::Hash(HashLiteral {
            pairs: expr
                .pairs
                .into_iter()
                .map(|(key, value)| {
                    (
                        modify_expression(key, transform),
                        modify_expression(value, transform),
                    )
                })
                .collect(),
        }),
        // Leaves, plus the two opaque composites.
        expr @ (Expression::Identifier(_)
        | Expression::IntegerLiteral(_)
        | Expression::StringLiteral(_)
        | Expression::Boolean(_)
        | Expression::Function(_)
        | Expression::Call(_)) => expr,
    };
    transform(expression)
}
