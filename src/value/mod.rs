pub mod error;

use crate::ast::{BlockStatement, Expression, Identifier};
use crate::console::Console;
use crate::environment::Environment;
use compact_str::CompactString;
use error::RuntimeError;
use std::fmt::Display;
use std::rc::Rc;

/// Shared singletons for the three constant values. Comparisons against them
/// are by value, so reconstructing an equal object elsewhere is also fine.
pub const NULL: Object = Object::Null;
pub const TRUE: Object = Object::Boolean(true);
pub const FALSE: Object = Object::Boolean(false);

/// A runtime value. Aggregates are reference counted so that copies handed
/// out of an environment stay cheap.
#[derive(Debug, Clone)]
pub enum Object {
    Integer(i64),
    Boolean(bool),
    String(CompactString),
    Null,
    Array(Rc<Vec<Object>>),
    Hash(Rc<Hash>),
    Function(Rc<Function>),
    Builtin(&'static Builtin),
    /// Internal control-flow signal for `return`; unwrapped at call and
    /// program boundaries, never observable outside them.
    ReturnValue(Box<Object>),
    Error(CompactString),
    /// The unevaluated node produced by the `quote` primitive.
    Quote(Box<Expression>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectKind {
    Integer,
    Boolean,
    String,
    Null,
    Array,
    Hash,
    Function,
    Builtin,
    ReturnValue,
    Error,
    Quote,
}

impl Display for ObjectKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ObjectKind::Integer => write!(f, "INTEGER"),
            ObjectKind::Boolean => write!(f, "BOOLEAN"),
            ObjectKind::String => write!(f, "STRING"),
            ObjectKind::Null => write!(f, "NULL"),
            ObjectKind::Array => write!(f, "ARRAY"),
            ObjectKind::Hash => write!(f, "HASH"),
            ObjectKind::Function => write!(f, "FUNCTION"),
            ObjectKind::Builtin => write!(f, "BUILTIN"),
            ObjectKind::ReturnValue => write!(f, "RETURN_VALUE"),
            ObjectKind::Error => write!(f, "ERROR"),
            ObjectKind::Quote => write!(f, "QUOTE"),
        }
    }
}

impl Object {
    pub fn kind(&self) -> ObjectKind {
        match self {
            Object::Integer(_) => ObjectKind::Integer,
            Object::Boolean(_) => ObjectKind::Boolean,
            Object::String(_) => ObjectKind::String,
            Object::Null => ObjectKind::Null,
            Object::Array(_) => ObjectKind::Array,
            Object::Hash(_) => ObjectKind::Hash,
            Object::Function(_) => ObjectKind::Function,
            Object::Builtin(_) => ObjectKind::Builtin,
            Object::ReturnValue(_) => ObjectKind::ReturnValue,
            Object::Error(_) => ObjectKind::Error,
            Object::Quote(_) => ObjectKind::Quote,
        }
    }

    /// Only `null` and `false` are falsy; everything else, including `0`,
    /// is truthy.
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Object::Null | Object::Boolean(false))
    }

    /// Derives the content-based map key. Only integers, booleans and
    /// strings are hashable.
    pub fn hash_key(&self) -> Result<HashKey, RuntimeError> {
        match self {
            Object::Integer(value) => Ok(HashKey {
                kind: ObjectKind::Integer,
                value: *value as u64,
            }),
            Object::Boolean(value) => Ok(HashKey {
                kind: ObjectKind::Boolean,
                value: u64::from(*value),
            }),
            Object::String(value) => Ok(HashKey {
                kind: ObjectKind::String,
                value: fnv1a(value.as_bytes()),
            }),
            other => Err(RuntimeError::UnusableAsHashKey(other.kind())),
        }
    }
}

impl PartialEq for Object {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Object::Integer(lhs), Object::Integer(rhs)) => lhs == rhs,
            (Object::Boolean(lhs), Object::Boolean(rhs)) => lhs == rhs,
            (Object::String(lhs), Object::String(rhs)) => lhs == rhs,
            (Object::Null, Object::Null) => true,
            (Object::Array(lhs), Object::Array(rhs)) => lhs == rhs,
            (Object::Hash(lhs), Object::Hash(rhs)) => lhs == rhs,
            (Object::Function(lhs), Object::Function(rhs)) => Rc::ptr_eq(lhs, rhs),
            (Object::Builtin(lhs), Object::Builtin(rhs)) => std::ptr::eq(*lhs, *rhs),
            (Object::ReturnValue(lhs), Object::ReturnValue(rhs)) => lhs == rhs,
            (Object::Error(lhs), Object::Error(rhs)) => lhs == rhs,
            (Object::Quote(lhs), Object::Quote(rhs)) => lhs == rhs,
            _ => false,
        }
    }
}

/// The `Inspect` surface: how values print in the REPL and through `puts`.
impl Display for Object {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Object::Integer(value) => write!(f, "{value}"),
            Object::Boolean(value) => write!(f, "{value}"),
            Object::String(value) => write!(f, "{value}"),
            Object::Null => write!(f, "null"),
            Object::Array(elements) => {
                let elements = elements
                    .iter()
                    .map(|element| element.to_string())
                    .collect::<Vec<_>>()
                    .join(", ");
                write!(f, "[{elements}]")
            }
            Object::Hash(hash) => {
                let pairs = hash
                    .pairs()
                    .map(|pair| format!("{}: {}", pair.key, pair.value))
                    .collect::<Vec<_>>()
                    .join(", ");
                write!(f, "{{{pairs}}}")
            }
            Object::Function(function) => write!(f, "{function}"),
            Object::Builtin(_) => write!(f, "builtin function"),
            Object::ReturnValue(value) => write!(f, "{value}"),
            Object::Error(message) => write!(f, "ERROR: {message}"),
            Object::Quote(node) => write!(f, "QUOTE({node})"),
        }
    }
}

/// A closure: parameters and body from the defining AST plus the environment
/// captured by reference at the definition site.
#[derive(Clone)]
pub struct Function {
    pub parameters: Vec<Identifier>,
    pub body: Rc<BlockStatement>,
    pub env: Environment,
}

// The captured environment can reach back to this function through a
// binding, so Debug must not descend into it.
impl std::fmt::Debug for Function {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Function")
            .field("parameters", &self.parameters)
            .finish_non_exhaustive()
    }
}

impl Display for Function {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parameters = self
            .parameters
            .iter()
            .map(|parameter| parameter.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        write!(f, "fn({parameters}) {{\n{}\n}}", self.body)
    }
}

pub type BuiltinFn = fn(&mut dyn Console, Vec<Object>) -> Result<Object, RuntimeError>;

/// A natively implemented function available without definition.
#[derive(Debug, Clone, Copy)]
pub struct Builtin {
    pub name: &'static str,
    pub function: BuiltinFn,
}

/// Content-derived key for hash maps.
///
/// Two semantically equal objects always produce equal keys: strings hash
/// their bytes, not their identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HashKey {
    pub kind: ObjectKind,
    pub value: u64,
}

/// FNV-1a over the string's bytes. Deterministic across processes and
/// collision-free at the input sizes the language deals in.
fn fnv1a(bytes: &[u8]) -> u64 {
    const OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
    const PRIME: u64 = 0x0000_0100_0000_01b3;
    bytes.iter().fold(OFFSET_BASIS, |hash, byte| {
        (hash ^ u64::from(*byte)).wrapping_mul(PRIME)
    })
}

#[derive(Debug, Clone, PartialEq)]
pub struct HashPair {
    pub key: Object,
    pub value: Object,
}

/// A hash value: entries kept in insertion order.
///
/// Lookup is a linear scan over the stored keys, O(n) in the entry count.
/// The first insertion under a key wins; later inserts with an equal key are
/// dropped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Hash {
    entries: Vec<(HashKey, HashPair)>,
}

impl Hash {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, hash: HashKey, key: Object, value: Object) {
        if self.get(&hash).is_none() {
            self.entries.push((hash, HashPair { key, value }));
        }
    }

    pub fn get(&self, key: &HashKey) -> Option<&Object> {
        self.entries
            .iter()
            .find(|(stored, _)| stored == key)
            .map(|(_, pair)| &pair.value)
    }

    pub fn pairs(&self) -> impl Iterator<Item = &HashPair> {
        self.entries.iter().map(|(_, pair)| pair)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
