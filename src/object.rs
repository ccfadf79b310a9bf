//! Runtime values
//!
//! The value universe is one closed enum. `ReturnValue` and `Error` are
//! control-flow carriers: they bubble out of nested blocks and are unwrapped
//! (or surfaced) at the program boundary, and never end up stored inside an
//! array, hash, or another return value.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use crate::ast::{BlockStatement, Identifier};
use crate::env::Environment;

/// Native function callable from interpreted code.
pub type BuiltinFn = fn(Vec<Value>) -> Value;

#[derive(Debug, PartialEq, Clone)]
pub enum Value {
    Integer(i64),
    Boolean(bool),
    String(String),
    Null,
    Array(Vec<Value>),
    Hash(HashMap<HashKey, HashPair>),
    Function(Function),
    Builtin(BuiltinFn),
    ReturnValue(Box<Value>),
    Error(String),
}

impl Value {
    /// The type tag used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Integer(_) => "INTEGER",
            Value::Boolean(_) => "BOOLEAN",
            Value::String(_) => "STRING",
            Value::Null => "NULL",
            Value::Array(_) => "ARRAY",
            Value::Hash(_) => "HASH",
            Value::Function(_) => "FUNCTION",
            Value::Builtin(_) => "BUILTIN",
            Value::ReturnValue(_) => "RETURN_VALUE",
            Value::Error(_) => "ERROR",
        }
    }

    /// Hash-table key for this value; only integers, booleans, and strings
    /// are hashable.
    pub fn hash_key(&self) -> Option<HashKey> {
        match self {
            Value::Integer(n) => Some(HashKey {
                tag: self.type_name(),
                value: *n as u64,
            }),
            Value::Boolean(b) => Some(HashKey {
                tag: self.type_name(),
                value: u64::from(*b),
            }),
            Value::String(s) => Some(HashKey {
                tag: self.type_name(),
                value: fnv1a(s.as_bytes()),
            }),
            _ => None,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Value::Error(_))
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(n) => write!(f, "{}", n),
            Value::Boolean(b) => write!(f, "{}", b),
            Value::String(s) => write!(f, "{}", s),
            Value::Null => write!(f, "null"),
            Value::Array(elements) => {
                let elems: Vec<String> = elements.iter().map(|e| e.to_string()).collect();
                write!(f, "[{}]", elems.join(", "))
            }
            Value::Hash(pairs) => {
                let pairs: Vec<String> = pairs
                    .values()
                    .map(|p| format!("{}: {}", p.key, p.value))
                    .collect();
                write!(f, "{{{}}}", pairs.join(", "))
            }
            Value::Function(func) => write!(f, "{}", func),
            Value::Builtin(_) => write!(f, "builtin function"),
            Value::ReturnValue(inner) => write!(f, "{}", inner),
            Value::Error(message) => write!(f, "ERROR: {}", message),
        }
    }
}

/// A user function: parameters, body, and the environment captured when the
/// literal evaluated.
#[derive(Clone)]
pub struct Function {
    pub parameters: Vec<Identifier>,
    pub body: BlockStatement,
    pub env: Rc<RefCell<Environment>>,
}

// The captured environment can reach the function itself, so derived Debug
// and PartialEq would recurse forever; both stop at the syntax.
impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Function")
            .field("parameters", &self.parameters)
            .field("body", &self.body)
            .finish()
    }
}

impl PartialEq for Function {
    fn eq(&self, other: &Self) -> bool {
        self.parameters == other.parameters && self.body == other.body
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let params: Vec<String> = self.parameters.iter().map(|p| p.to_string()).collect();
        write!(f, "fn({}) {{\n{}\n}}", params.join(", "), self.body)
    }
}

/// A `(type tag, 64-bit value)` pair; equal keys imply equal source values.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub struct HashKey {
    pub tag: &'static str,
    pub value: u64,
}

/// The original key value alongside the stored value, kept so a hash can
/// print its entries.
#[derive(Debug, PartialEq, Clone)]
pub struct HashPair {
    pub key: Value,
    pub value: Value,
}

// 64-bit FNV-1a.
fn fnv1a(bytes: &[u8]) -> u64 {
    const OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
    const PRIME: u64 = 0x0000_0100_0000_01b3;

    let mut hash = OFFSET_BASIS;
    for &b in bytes {
        hash ^= u64::from(b);
        hash = hash.wrapping_mul(PRIME);
    }
    hash
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_hash_keys() {
        let book1 = Value::String("The Sea-Wolf".to_string());
        let book2 = Value::String("The Sea-Wolf".to_string());
        let author = Value::String("Jack London".to_string());

        assert_eq!(book1.hash_key(), book2.hash_key());
        assert_ne!(book1.hash_key(), author.hash_key());
    }

    #[test]
    fn integer_hash_keys() {
        let index1 = Value::Integer(1);
        let index2 = Value::Integer(1);
        let year = Value::Integer(1904);

        assert_eq!(index1.hash_key(), index2.hash_key());
        assert_ne!(index1.hash_key(), year.hash_key());
    }

    #[test]
    fn boolean_hash_keys() {
        assert_eq!(
            Value::Boolean(true).hash_key(),
            Value::Boolean(true).hash_key()
        );
        assert_ne!(
            Value::Boolean(true).hash_key(),
            Value::Boolean(false).hash_key()
        );
    }

    #[test]
    fn keys_of_different_types_differ() {
        // true hashes to 1, as does the integer 1; the type tag keeps them apart.
        assert_ne!(Value::Boolean(true).hash_key(), Value::Integer(1).hash_key());
    }

    #[test]
    fn only_scalars_are_hashable() {
        assert!(Value::Null.hash_key().is_none());
        assert!(Value::Array(vec![]).hash_key().is_none());
        assert!(Value::Hash(HashMap::new()).hash_key().is_none());
    }

    #[test]
    fn inspect_forms() {
        assert_eq!(Value::Integer(42).to_string(), "42");
        assert_eq!(Value::Boolean(true).to_string(), "true");
        assert_eq!(Value::String("hi".to_string()).to_string(), "hi");
        assert_eq!(Value::Null.to_string(), "null");
        assert_eq!(
            Value::Array(vec![Value::Integer(1), Value::Integer(2)]).to_string(),
            "[1, 2]"
        );
        assert_eq!(
            Value::Error("boom".to_string()).to_string(),
            "ERROR: boom"
        );
        assert_eq!(
            Value::ReturnValue(Box::new(Value::Integer(7))).to_string(),
            "7"
        );
    }
}
