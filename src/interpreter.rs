//! API to control the interpreter.

use std::cell::RefCell;
use std::error::Error;
use std::fmt;
use std::rc::Rc;

use crate::env::Environment;
use crate::eval;
use crate::lexer::Lexer;
use crate::object::Value;
use crate::parser::Parser;

/// Tree-walk interpreter session.
///
/// The session owns the root environment, so bindings made by one `eval`
/// call are visible to later ones.
///
/// # Example
///
/// Invoke the interpreter a first time to define a function, then additional
/// times to call it:
///
/// ```
/// use rlatch::interpreter::Interpreter;
///
/// let mut interp = Interpreter::new();
///
/// let func_def = r#"
///     let max = fn(x, y) {
///         if (x > y) {
///             x
///         } else {
///             y
///         }
///     };
/// "#;
/// interp.eval(func_def).expect("interpreter error");
///
/// let value = interp.eval("max(10, 20)").expect("interpreter error");
/// assert_eq!(value.to_string(), "20");
/// ```
#[derive(Debug)]
pub struct Interpreter {
    env: Rc<RefCell<Environment>>,
}

/// Errors the interpreter can raise.
#[derive(Debug)]
pub enum RlatchError {
    /// Diagnostics accumulated during parsing; the program was discarded.
    Parse(Vec<String>),

    /// An error value surfaced at the program boundary.
    Eval(String),
}

impl fmt::Display for RlatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RlatchError::Parse(messages) => {
                write!(f, "parser error(s) detected:")?;
                for message in messages {
                    write!(f, "\n\t{}", message)?;
                }
                Ok(())
            }
            RlatchError::Eval(message) => write!(f, "ERROR: {}", message),
        }
    }
}

impl Error for RlatchError {}

impl Interpreter {
    pub fn new() -> Interpreter {
        Interpreter {
            env: Environment::new(),
        }
    }

    /// Parses and evaluates `source` against the session environment.
    pub fn eval(&mut self, source: &str) -> Result<Value, RlatchError> {
        let mut parser = Parser::new(Lexer::new(source));
        let program = parser.parse_program();

        if !parser.errors().is_empty() {
            return Err(RlatchError::Parse(parser.errors().to_vec()));
        }

        match eval::eval(&program, &self.env) {
            Value::Error(message) => Err(RlatchError::Eval(message)),
            value => Ok(value),
        }
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Interpreter::new()
    }
}
