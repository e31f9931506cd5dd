pub mod builtins;

use crate::ast::{
    CallExpression, Expression, HashLiteral, Identifier, IfExpression, InfixOperator,
    PrefixOperator, Program, Statement,
};
use crate::console::Console;
use crate::environment::Environment;
use crate::lexer::Lexer;
use crate::parser::{error::ParseError, Parser};
use crate::value::error::RuntimeError;
use crate::value::{Function, Hash, Object, FALSE, NULL, TRUE};
use compact_str::ToCompactString;
use std::rc::Rc;

/// Parses and evaluates one source buffer against the given environment.
///
/// A non-empty parse error list means the tree is not trustworthy, so
/// nothing is evaluated and the diagnostics are handed back for the caller
/// to surface. Otherwise exactly one object comes out: the program's value,
/// or an `Error` object for a language-level failure.
pub fn evaluate<C: Console>(
    source: &str,
    env: &Environment,
    console: &mut C,
) -> Result<Object, Vec<ParseError>> {
    let mut parser = Parser::new(Lexer::new(source));
    let program = parser.parse_program();
    if !parser.errors().is_empty() {
        return Err(parser.into_errors());
    }
    Ok(Evaluator::new(console).eval_program(&program, env))
}

type EvalResult = Result<Object, RuntimeError>;

/// Recursive tree-walking evaluator.
///
/// Runtime failures travel as `Err` and short-circuit every composite step;
/// `eval_program` converts them into the language-level `Error` object at
/// the boundary. Side effects already performed (`puts` output) are kept,
/// matching the language's order of evaluation.
pub struct Evaluator<'c, C: Console> {
    console: &'c mut C,
}

impl<'c, C: Console> Evaluator<'c, C> {
    pub fn new(console: &'c mut C) -> Self {
        Self { console }
    }

    pub fn eval_program(&mut self, program: &Program, env: &Environment) -> Object {
        match self.eval_statements(&program.statements, env) {
            Ok(Object::ReturnValue(value)) => *value,
            Ok(object) => object,
            Err(error) => Object::Error(error.to_compact_string()),
        }
    }

    /// Runs statements in order, stopping at the first `return`. The
    /// wrapper stays intact so it keeps propagating through enclosing
    /// blocks until a call or program boundary unwraps it.
    fn eval_statements(&mut self, statements: &[Statement], env: &Environment) -> EvalResult {
        let mut result = NULL;
        for statement in statements {
            result = self.eval_statement(statement, env)?;
            if matches!(result, Object::ReturnValue(_)) {
                break;
            }
        }
        Ok(result)
    }

    fn eval_statement(&mut self, statement: &Statement, env: &Environment) -> EvalResult {
        match statement {
            Statement::Let(stmt) => {
                let value = self.eval_expression(&stmt.value, env)?;
                env.set(&stmt.name.name, value);
                Ok(NULL)
            }
            Statement::Return(stmt) => {
                let value = self.eval_expression(&stmt.value, env)?;
                Ok(Object::ReturnValue(Box::new(value)))
            }
            Statement::Expression(stmt) => self.eval_expression(&stmt.expression, env),
        }
    }

    fn eval_expression(&mut self, expression: &Expression, env: &Environment) -> EvalResult {
        match expression {
            Expression::Identifier(ident) => eval_identifier(ident, env),
            Expression::IntegerLiteral(value) => Ok(Object::Integer(*value)),
            Expression::StringLiteral(value) => Ok(Object::String(value.clone())),
            Expression::Boolean(value) => Ok(native_bool(*value)),
            Expression::Prefix(expr) => {
                let right = self.eval_expression(&expr.right, env)?;
                eval_prefix(expr.operator, right)
            }
            Expression::Infix(expr) => {
                let left = self.eval_expression(&expr.left, env)?;
                let right = self.eval_expression(&expr.right, env)?;
                eval_infix(expr.operator, left, right)
            }
            Expression::If(expr) => self.eval_if_expression(expr, env),
            Expression::Function(expr) => Ok(Object::Function(Rc::new(Function {
                parameters: expr.parameters.clone(),
                body: Rc::clone(&expr.body),
                env: env.clone(),
            }))),
            Expression::Call(expr) => self.eval_call_expression(expr, env),
            Expression::Array(expr) => {
                let elements = self.eval_expressions(&expr.elements, env)?;
                Ok(Object::Array(Rc::new(elements)))
            }
            Expression::Index(expr) => {
                let left = self.eval_expression(&expr.left, env)?;
                let index = self.eval_expression(&expr.index, env)?;
                eval_index(left, index)
            }
            Expression::Hash(expr) => self.eval_hash_literal(expr, env),
        }
    }

    fn eval_if_expression(&mut self, expr: &IfExpression, env: &Environment) -> EvalResult {
        let condition = self.eval_expression(&expr.condition, env)?;
        if condition.is_truthy() {
            self.eval_statements(&expr.consequence.statements, env)
        } else if let Some(alternative) = &expr.alternative {
            self.eval_statements(&alternative.statements, env)
        } else {
            Ok(NULL)
        }
    }

    fn eval_expressions(
        &mut self,
        expressions: &[Expression],
        env: &Environment,
    ) -> Result<Vec<Object>, RuntimeError> {
        expressions
            .iter()
            .map(|expression| self.eval_expression(expression, env))
            .collect()
    }

    fn eval_call_expression(&mut self, expr: &CallExpression, env: &Environment) -> EvalResult {
        // `quote` is a literal-only primitive: it wraps its argument's AST
        // node without evaluating it, so it is intercepted before the
        // callee or arguments get anywhere near the evaluator.
        if let Expression::Identifier(Identifier { name }) = expr.function.as_ref() {
            if name == "quote" {
                if expr.arguments.len() != 1 {
                    return Err(RuntimeError::WrongArgumentCount {
                        got: expr.arguments.len(),
                        want: 1,
                    });
                }
                return Ok(Object::Quote(Box::new(expr.arguments[0].clone())));
            }
        }

        let function = self.eval_expression(&expr.function, env)?;
        let arguments = self.eval_expressions(&expr.arguments, env)?;
        self.apply_function(function, arguments)
    }

    fn apply_function(&mut self, function: Object, arguments: Vec<Object>) -> EvalResult {
        match function {
            Object::Function(function) => {
                // The call scope extends the environment captured at the
                // definition site, not the caller's. Arity is not checked;
                // an unsupplied parameter simply stays unbound.
                let scope = function.env.new_scope();
                for (parameter, argument) in function.parameters.iter().zip(arguments) {
                    scope.set(&parameter.name, argument);
                }
                let result = self.eval_statements(&function.body.statements, &scope)?;
                Ok(unwrap_return(result))
            }
            Object::Builtin(builtin) => (builtin.function)(self.console, arguments),
            other => Err(RuntimeError::NotAFunction(other.kind())),
        }
    }

    fn eval_hash_literal(&mut self, expr: &HashLiteral, env: &Environment) -> EvalResult {
        let mut hash = Hash::new();
        for (key_expression, value_expression) in &expr.pairs {
            let key = self.eval_expression(key_expression, env)?;
            let hash_key = key.hash_key()?;
            let value = self.eval_expression(value_expression, env)?;
            hash.insert(hash_key, key, value);
        }
        Ok(Object::Hash(Rc::new(hash)))
    }
}

fn native_bool(value: bool) -> Object {
    if value {
        TRUE
    } else {
        FALSE
    }
}

fn unwrap_return(object: Object) -> Object {
    match object {
        Object::ReturnValue(value) => *value,
        object => object,
    }
}

fn eval_identifier(ident: &Identifier, env: &Environment) -> EvalResult {
    if let Some(value) = env.get(&ident.name) {
        return Ok(value);
    }
    if let Some(builtin) = builtins::lookup(&ident.name) {
        return Ok(Object::Builtin(builtin));
    }
    Err(RuntimeError::IdentifierNotFound(ident.name.clone()))
}

fn eval_prefix(operator: PrefixOperator, right: Object) -> EvalResult {
    match operator {
        PrefixOperator::Bang => Ok(native_bool(!right.is_truthy())),
        PrefixOperator::Minus => match right {
            Object::Integer(value) => Ok(Object::Integer(value.wrapping_neg())),
            other => Err(RuntimeError::UnknownPrefixOperator {
                operator,
                right: other.kind(),
            }),
        },
    }
}

fn eval_infix(operator: InfixOperator, left: Object, right: Object) -> EvalResult {
    match (&left, &right) {
        (Object::Integer(lhs), Object::Integer(rhs)) => {
            eval_integer_infix(operator, *lhs, *rhs)
        }
        _ if operator == InfixOperator::Equal => Ok(native_bool(left == right)),
        _ if operator == InfixOperator::NotEqual => Ok(native_bool(left != right)),
        _ if left.kind() != right.kind() => Err(RuntimeError::TypeMismatch {
            left: left.kind(),
            operator,
            right: right.kind(),
        }),
        (Object::String(lhs), Object::String(rhs)) => {
            if operator == InfixOperator::Plus {
                let mut concatenated = lhs.clone();
                concatenated.push_str(rhs);
                Ok(Object::String(concatenated))
            } else {
                Err(RuntimeError::UnknownInfixOperator {
                    left: left.kind(),
                    operator,
                    right: right.kind(),
                })
            }
        }
        _ => Err(RuntimeError::UnknownInfixOperator {
            left: left.kind(),
            operator,
            right: right.kind(),
        }),
    }
}

fn eval_integer_infix(operator: InfixOperator, lhs: i64, rhs: i64) -> EvalResult {
    let result = match operator {
        InfixOperator::Plus => Object::Integer(lhs.wrapping_add(rhs)),
        InfixOperator::Minus => Object::Integer(lhs.wrapping_sub(rhs)),
        InfixOperator::Asterisk => Object::Integer(lhs.wrapping_mul(rhs)),
        // Truncating division: 7 / 2 is 3, -7 / 2 is -3.
        InfixOperator::Slash => {
            if rhs == 0 {
                return Err(RuntimeError::DivisionByZero);
            }
            Object::Integer(lhs.wrapping_div(rhs))
        }
        InfixOperator::LessThan => native_bool(lhs < rhs),
        InfixOperator::GreaterThan => native_bool(lhs > rhs),
        InfixOperator::Equal => native_bool(lhs == rhs),
        InfixOperator::NotEqual => native_bool(lhs != rhs),
    };
    Ok(result)
}

fn eval_index(left: Object, index: Object) -> EvalResult {
    match (&left, &index) {
        (Object::Array(elements), Object::Integer(i)) => {
            // Out-of-range indexing yields null, not an error.
            let element = usize::try_from(*i)
                .ok()
                .and_then(|i| elements.get(i).cloned());
            Ok(element.unwrap_or(NULL))
        }
        (Object::Hash(hash), key) => {
            let hash_key = key.hash_key()?;
            Ok(hash.get(&hash_key).cloned().unwrap_or(NULL))
        }
        _ => Err(RuntimeError::IndexOperatorNotSupported(left.kind())),
    }
}
