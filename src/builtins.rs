//! Native functions
//!
//! Builtins live outside the environment chain: the evaluator consults this
//! table only after a name misses every frame, so a `let` can shadow any of
//! them. Each function checks its own arity and argument types.

use crate::object::Value;

/// Looks a name up in the builtin table.
pub fn lookup(name: &str) -> Option<Value> {
    let f: fn(Vec<Value>) -> Value = match name {
        "len" => len,
        "first" => first,
        "last" => last,
        "tail" => tail,
        "push" => push,
        "puts" => puts,
        _ => return None,
    };
    Some(Value::Builtin(f))
}

fn len(args: Vec<Value>) -> Value {
    if args.len() != 1 {
        return Value::Error(format!(
            "wrong number of arguments. got={}, want=1",
            args.len()
        ));
    }

    match &args[0] {
        Value::Array(elements) => Value::Integer(elements.len() as i64),
        Value::String(s) => Value::Integer(s.len() as i64),
        other => Value::Error(format!(
            "argument to 'len' not supported, got {}",
            other.type_name()
        )),
    }
}

fn first(args: Vec<Value>) -> Value {
    if args.len() != 1 {
        return Value::Error(format!(
            "wrong number of arguments. got={}, want=1",
            args.len()
        ));
    }

    match &args[0] {
        Value::Array(elements) => elements.first().cloned().unwrap_or(Value::Null),
        other => Value::Error(format!(
            "argument to 'first' must be an ARRAY, got {}",
            other.type_name()
        )),
    }
}

fn last(args: Vec<Value>) -> Value {
    if args.len() != 1 {
        return Value::Error(format!(
            "wrong number of arguments. got={}, want=1",
            args.len()
        ));
    }

    match &args[0] {
        Value::Array(elements) => elements.last().cloned().unwrap_or(Value::Null),
        other => Value::Error(format!(
            "argument to 'last' must be an ARRAY, got {}",
            other.type_name()
        )),
    }
}

/// Everything but the first element, as a new array; `null` for an empty one.
fn tail(args: Vec<Value>) -> Value {
    if args.len() != 1 {
        return Value::Error(format!(
            "wrong number of arguments. got={}, want=1",
            args.len()
        ));
    }

    match &args[0] {
        Value::Array(elements) => {
            if elements.is_empty() {
                Value::Null
            } else {
                Value::Array(elements[1..].to_vec())
            }
        }
        other => Value::Error(format!(
            "argument to 'tail' must be an ARRAY, got {}",
            other.type_name()
        )),
    }
}

/// A new array with the element appended; the input array is untouched.
fn push(mut args: Vec<Value>) -> Value {
    if args.len() != 2 {
        return Value::Error(format!(
            "wrong number of arguments. got={}, want=2",
            args.len()
        ));
    }

    let element = args.pop().expect("checked length above");
    match args.pop().expect("checked length above") {
        Value::Array(mut elements) => {
            elements.push(element);
            Value::Array(elements)
        }
        other => Value::Error(format!(
            "argument to 'push' must be an ARRAY, got {}",
            other.type_name()
        )),
    }
}

fn puts(args: Vec<Value>) -> Value {
    for arg in &args {
        println!("{}", arg);
    }
    Value::Null
}

#[cfg(test)]
mod tests {
    use super::*;

    fn call(name: &str, args: Vec<Value>) -> Value {
        match lookup(name) {
            Some(Value::Builtin(f)) => f(args),
            other => panic!("expected builtin {:?}, got {:?}", name, other),
        }
    }

    #[test]
    fn unknown_names_miss() {
        assert!(lookup("reverse").is_none());
    }

    #[test]
    fn len_counts_bytes_and_elements() {
        assert_eq!(call("len", vec![Value::String("".to_string())]), Value::Integer(0));
        assert_eq!(
            call("len", vec![Value::String("four".to_string())]),
            Value::Integer(4)
        );
        assert_eq!(call("len", vec![Value::Array(vec![])]), Value::Integer(0));
        assert_eq!(
            call("len", vec![Value::Array(vec![Value::Integer(1), Value::Integer(2)])]),
            Value::Integer(2)
        );
    }

    #[test]
    fn len_rejects_bad_arguments() {
        assert_eq!(
            call("len", vec![Value::Integer(1)]),
            Value::Error("argument to 'len' not supported, got INTEGER".to_string())
        );
        assert_eq!(
            call(
                "len",
                vec![Value::String("a".to_string()), Value::String("b".to_string())]
            ),
            Value::Error("wrong number of arguments. got=2, want=1".to_string())
        );
    }

    #[test]
    fn first_last_and_tail_on_empty_arrays() {
        assert_eq!(call("first", vec![Value::Array(vec![])]), Value::Null);
        assert_eq!(call("last", vec![Value::Array(vec![])]), Value::Null);
        assert_eq!(call("tail", vec![Value::Array(vec![])]), Value::Null);
    }

    #[test]
    fn first_and_last_pick_the_ends() {
        let arr = Value::Array(vec![Value::Integer(1), Value::Integer(2), Value::Integer(3)]);
        assert_eq!(call("first", vec![arr.clone()]), Value::Integer(1));
        assert_eq!(call("last", vec![arr]), Value::Integer(3));
    }

    #[test]
    fn tail_drops_the_head() {
        let arr = Value::Array(vec![Value::Integer(1), Value::Integer(2), Value::Integer(3)]);
        assert_eq!(
            call("tail", vec![arr]),
            Value::Array(vec![Value::Integer(2), Value::Integer(3)])
        );
    }

    #[test]
    fn push_appends_without_mutating() {
        let arr = Value::Array(vec![Value::Integer(1)]);
        let pushed = call("push", vec![arr.clone(), Value::Integer(2)]);
        assert_eq!(
            pushed,
            Value::Array(vec![Value::Integer(1), Value::Integer(2)])
        );
        assert_eq!(arr, Value::Array(vec![Value::Integer(1)]));
    }

    #[test]
    fn array_builtins_reject_non_arrays() {
        assert_eq!(
            call("first", vec![Value::Integer(1)]),
            Value::Error("argument to 'first' must be an ARRAY, got INTEGER".to_string())
        );
        assert_eq!(
            call("push", vec![Value::Integer(1), Value::Integer(2)]),
            Value::Error("argument to 'push' must be an ARRAY, got INTEGER".to_string())
        );
    }

    #[test]
    fn puts_returns_null() {
        assert_eq!(call("puts", vec![Value::Integer(1)]), Value::Null);
        assert_eq!(call("puts", vec![]), Value::Null);
    }
}
