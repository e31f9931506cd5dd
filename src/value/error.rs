use super::ObjectKind;
use crate::ast::{InfixOperator, PrefixOperator};
use compact_str::CompactString;
use thiserror::Error;

/// A recoverable, language-level failure. The message texts below are part
/// of the language's observable surface; tests pin them verbatim.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RuntimeError {
    #[error("type mismatch: {left} {operator} {right}")]
    TypeMismatch {
        left: ObjectKind,
        operator: InfixOperator,
        right: ObjectKind,
    },
    #[error("unknown operator: {operator}{right}")]
    UnknownPrefixOperator {
        operator: PrefixOperator,
        right: ObjectKind,
    },
    #[error("unknown operator: {left} {operator} {right}")]
    UnknownInfixOperator {
        left: ObjectKind,
        operator: InfixOperator,
        right: ObjectKind,
    },
    #[error("identifier not found: {0}")]
    IdentifierNotFound(CompactString),
    #[error("not a function: {0}")]
    NotAFunction(ObjectKind),
    #[error("unusable as hash key: {0}")]
    UnusableAsHashKey(ObjectKind),
    #[error("index operator not supported: {0}")]
    IndexOperatorNotSupported(ObjectKind),
    #[error("division by zero")]
    DivisionByZero,
    #[error("wrong number of arguments. got={got}, want={want}")]
    WrongArgumentCount { got: usize, want: usize },
    #[error("argument to `len` not supported, got {0}")]
    UnsupportedLenArgument(ObjectKind),
    #[error("argument to `{name}` must be ARRAY, got {actual}")]
    ExpectedArrayArgument {
        name: &'static str,
        actual: ObjectKind,
    },
}
