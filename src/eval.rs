//! Tree-walking evaluator
//!
//! Evaluation is a recursive match over the AST, threading the current
//! environment. Two value variants carry control flow: `ReturnValue` unwinds
//! to the nearest function (or program) boundary, and `Error` unwinds all the
//! way out. Blocks propagate both untouched; the program and function-call
//! boundaries unwrap `ReturnValue`.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::ast::{BlockStatement, Expression, Identifier, Program, Statement};
use crate::builtins;
use crate::env::Environment;
use crate::object::{Function, HashPair, Value};

/// Evaluates a program against `env`, returning the last statement's value.
pub fn eval(program: &Program, env: &Rc<RefCell<Environment>>) -> Value {
    let mut result = Value::Null;

    for stmt in &program.statements {
        let value = eval_statement(stmt, env);
        match value {
            Value::ReturnValue(inner) => return *inner,
            Value::Error(message) => return Value::Error(message),
            other => result = other,
        }
    }

    result
}

fn eval_statement(stmt: &Statement, env: &Rc<RefCell<Environment>>) -> Value {
    match stmt {
        Statement::Expression { expression, .. } => eval_expression(expression, env),
        Statement::Let { name, value, .. } => {
            let value = eval_expression(value, env);
            if value.is_error() {
                return value;
            }
            env.borrow_mut().set(name.value.clone(), value);
            Value::Null
        }
        Statement::Return { value, .. } => {
            let value = eval_expression(value, env);
            if value.is_error() {
                return value;
            }
            Value::ReturnValue(Box::new(value))
        }
        Statement::Block(block) => eval_block(block, env),
    }
}

// Unlike eval(), a return value is passed through unmodified so that it can
// terminate every enclosing block up to the function boundary.
fn eval_block(block: &BlockStatement, env: &Rc<RefCell<Environment>>) -> Value {
    let mut result = Value::Null;

    for stmt in &block.statements {
        let value = eval_statement(stmt, env);
        if matches!(value, Value::ReturnValue(_) | Value::Error(_)) {
            return value;
        }
        result = value;
    }

    result
}

fn eval_expression(expr: &Expression, env: &Rc<RefCell<Environment>>) -> Value {
    match expr {
        Expression::IntegerLiteral { value, .. } => Value::Integer(*value),
        Expression::StringLiteral { value, .. } => Value::String(value.clone()),
        Expression::Boolean { value, .. } => Value::Boolean(*value),
        Expression::Identifier(ident) => eval_identifier(ident, env),
        Expression::Prefix {
            operator, right, ..
        } => {
            let right = eval_expression(right, env);
            if right.is_error() {
                return right;
            }
            eval_prefix_expression(operator, right)
        }
        Expression::Infix {
            left,
            operator,
            right,
            ..
        } => {
            let left = eval_expression(left, env);
            if left.is_error() {
                return left;
            }
            let right = eval_expression(right, env);
            if right.is_error() {
                return right;
            }
            eval_infix_expression(operator, left, right)
        }
        Expression::If {
            condition,
            consequence,
            alternative,
            ..
        } => {
            let condition = eval_expression(condition, env);
            if condition.is_error() {
                return condition;
            }
            if is_truthy(&condition) {
                eval_block(consequence, env)
            } else if let Some(alternative) = alternative {
                eval_block(alternative, env)
            } else {
                Value::Null
            }
        }
        Expression::FunctionLiteral {
            parameters, body, ..
        } => Value::Function(Function {
            parameters: parameters.clone(),
            body: body.clone(),
            env: env.clone(),
        }),
        Expression::Call {
            function,
            arguments,
            ..
        } => {
            let function = eval_expression(function, env);
            if function.is_error() {
                return function;
            }
            let args = match eval_expressions(arguments, env) {
                Ok(args) => args,
                Err(err) => return err,
            };
            apply_function(function, args)
        }
        Expression::ArrayLiteral { elements, .. } => match eval_expressions(elements, env) {
            Ok(elements) => Value::Array(elements),
            Err(err) => err,
        },
        Expression::Index { left, index, .. } => {
            let left = eval_expression(left, env);
            if left.is_error() {
                return left;
            }
            let index = eval_expression(index, env);
            if index.is_error() {
                return index;
            }
            eval_index_expression(left, index)
        }
        Expression::HashLiteral { pairs, .. } => eval_hash_literal(pairs, env),
    }
}

fn eval_identifier(ident: &Identifier, env: &Rc<RefCell<Environment>>) -> Value {
    if let Some(value) = env.borrow().get(&ident.value) {
        return value;
    }
    if let Some(builtin) = builtins::lookup(&ident.value) {
        return builtin;
    }
    Value::Error(format!("Identifier not found: {}", ident.value))
}

fn eval_prefix_expression(operator: &str, right: Value) -> Value {
    match operator {
        "!" => eval_not_operator(right),
        "-" => eval_minus_prefix(right),
        _ => Value::Error(format!(
            "unknown operator: {}{}",
            operator,
            right.type_name()
        )),
    }
}

fn eval_not_operator(right: Value) -> Value {
    match right {
        Value::Boolean(true) => Value::Boolean(false),
        Value::Boolean(false) => Value::Boolean(true),
        Value::Null => Value::Boolean(true),
        _ => Value::Boolean(false),
    }
}

fn eval_minus_prefix(right: Value) -> Value {
    match right {
        Value::Integer(n) => Value::Integer(n.wrapping_neg()),
        other => Value::Error(format!(
            "Illegal prefix operation, expected integer, received: -{}",
            other.type_name()
        )),
    }
}

fn eval_infix_expression(operator: &str, left: Value, right: Value) -> Value {
    match (left, right) {
        (Value::Integer(l), Value::Integer(r)) => eval_integer_infix(operator, l, r),
        (Value::String(l), Value::String(r)) => eval_string_infix(operator, l, r),
        (left, right) => {
            // Booleans and null compare directly; any other combination of
            // operator and operands is a fault.
            if operator == "==" {
                Value::Boolean(left == right)
            } else if operator == "!=" {
                Value::Boolean(left != right)
            } else if left.type_name() != right.type_name() {
                Value::Error(format!(
                    "type mismatch: {} {} {}",
                    left.type_name(),
                    operator,
                    right.type_name()
                ))
            } else {
                Value::Error(format!(
                    "Illegal infix expression, expected integer-operator-integer, received: {} {} {}",
                    left.type_name(),
                    operator,
                    right.type_name()
                ))
            }
        }
    }
}

fn eval_integer_infix(operator: &str, left: i64, right: i64) -> Value {
    match operator {
        "+" => Value::Integer(left.wrapping_add(right)),
        "-" => Value::Integer(left.wrapping_sub(right)),
        "*" => Value::Integer(left.wrapping_mul(right)),
        "/" => {
            if right == 0 {
                Value::Error("division by zero".to_string())
            } else {
                Value::Integer(left.wrapping_div(right))
            }
        }
        "<" => Value::Boolean(left < right),
        ">" => Value::Boolean(left > right),
        "==" => Value::Boolean(left == right),
        "!=" => Value::Boolean(left != right),
        _ => Value::Error(format!(
            "Illegal infix expression, expected integer-operator-integer, received: INTEGER {} INTEGER",
            operator
        )),
    }
}

fn eval_string_infix(operator: &str, left: String, right: String) -> Value {
    match operator {
        "+" => Value::String(left + &right),
        _ => Value::Error(format!("Invalid operator: STRING {} STRING", operator)),
    }
}

/// Evaluates an expression list left to right, stopping at the first error.
fn eval_expressions(
    exprs: &[Expression],
    env: &Rc<RefCell<Environment>>,
) -> Result<Vec<Value>, Value> {
    let mut results = Vec::with_capacity(exprs.len());

    for expr in exprs {
        let value = eval_expression(expr, env);
        if value.is_error() {
            return Err(value);
        }
        results.push(value);
    }

    Ok(results)
}

fn apply_function(function: Value, args: Vec<Value>) -> Value {
    match function {
        Value::Function(func) => {
            // A fresh frame per call keeps parameters out of the captured
            // environment, so recursion and repeated calls do not interfere.
            let call_env = Environment::new_enclosed(func.env.clone());
            for (param, arg) in func.parameters.iter().zip(args) {
                call_env.borrow_mut().set(param.value.clone(), arg);
            }
            let evaluated = eval_block(&func.body, &call_env);
            unwrap_return_value(evaluated)
        }
        Value::Builtin(f) => f(args),
        other => Value::Error(format!(
            "Not a function, received type: {}",
            other.type_name()
        )),
    }
}

// A return value must not leak past the function that produced it.
fn unwrap_return_value(value: Value) -> Value {
    match value {
        Value::ReturnValue(inner) => *inner,
        value => value,
    }
}

fn eval_index_expression(left: Value, index: Value) -> Value {
    match (left, index) {
        (Value::Array(elements), Value::Integer(idx)) => {
            if idx < 0 || idx as usize >= elements.len() {
                Value::Null
            } else {
                elements[idx as usize].clone()
            }
        }
        (Value::Hash(pairs), key) => match key.hash_key() {
            Some(hash_key) => pairs
                .get(&hash_key)
                .map(|pair| pair.value.clone())
                .unwrap_or(Value::Null),
            None => Value::Error(format!("Unusable as hash key: {}", key.type_name())),
        },
        (left, _) => Value::Error(format!(
            "Index operator not supported: {}",
            left.type_name()
        )),
    }
}

fn eval_hash_literal(
    pairs: &[(Expression, Expression)],
    env: &Rc<RefCell<Environment>>,
) -> Value {
    let mut hash = HashMap::new();

    for (key_expr, value_expr) in pairs {
        let key = eval_expression(key_expr, env);
        if key.is_error() {
            return key;
        }

        let hash_key = match key.hash_key() {
            Some(hash_key) => hash_key,
            None => return Value::Error(format!("Unusable as hash key: {}", key.type_name())),
        };

        let value = eval_expression(value_expr, env);
        if value.is_error() {
            return value;
        }

        hash.insert(hash_key, HashPair { key, value });
    }

    Value::Hash(hash)
}

/// Only `null` and `false` are falsy; everything else, zero included, is
/// truthy.
fn is_truthy(value: &Value) -> bool {
    !matches!(value, Value::Null | Value::Boolean(false))
}
