//! Abstract syntax tree
//!
//! The tree is a closed pair of enums, one per syntactic role. Every node
//! remembers its anchor token so it can report the literal text it was parsed
//! from, and `Display` reproduces canonical source text, parenthesised so
//! operator binding is visible.

use std::fmt;

use crate::token::Token;

/// Root node: an ordered sequence of statements.
#[derive(Debug, PartialEq, Clone, Default)]
pub struct Program {
    pub statements: Vec<Statement>,
}

impl Program {
    pub fn token_literal(&self) -> &str {
        self.statements.first().map_or("", |s| s.token_literal())
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for stmt in &self.statements {
            write!(f, "{}", stmt)?;
        }
        Ok(())
    }
}

#[derive(Debug, PartialEq, Clone)]
pub enum Statement {
    Let {
        token: Token,
        name: Identifier,
        value: Expression,
    },
    Return {
        token: Token,
        value: Expression,
    },
    Expression {
        token: Token,
        expression: Expression,
    },
    Block(BlockStatement),
}

impl Statement {
    pub fn token_literal(&self) -> &str {
        match self {
            Statement::Let { token, .. } => &token.literal,
            Statement::Return { token, .. } => &token.literal,
            Statement::Expression { token, .. } => &token.literal,
            Statement::Block(block) => &block.token.literal,
        }
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Statement::Let { token, name, value } => {
                write!(f, "{} {} = {};", token.literal, name, value)
            }
            Statement::Return { token, value } => write!(f, "{} {};", token.literal, value),
            Statement::Expression { expression, .. } => write!(f, "{}", expression),
            Statement::Block(block) => write!(f, "{}", block),
        }
    }
}

/// The statements between `{` and `}` of an `if` arm or function body.
#[derive(Debug, PartialEq, Clone)]
pub struct BlockStatement {
    pub token: Token,
    pub statements: Vec<Statement>,
}

impl BlockStatement {
    pub fn token_literal(&self) -> &str {
        &self.token.literal
    }
}

impl fmt::Display for BlockStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for stmt in &self.statements {
            write!(f, "{}", stmt)?;
        }
        Ok(())
    }
}

/// A name, either bound by `let`/parameters or referenced in an expression.
#[derive(Debug, PartialEq, Clone)]
pub struct Identifier {
    pub token: Token,
    pub value: String,
}

impl Identifier {
    pub fn token_literal(&self) -> &str {
        &self.token.literal
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

#[derive(Debug, PartialEq, Clone)]
pub enum Expression {
    Identifier(Identifier),
    IntegerLiteral {
        token: Token,
        value: i64,
    },
    StringLiteral {
        token: Token,
        value: String,
    },
    Boolean {
        token: Token,
        value: bool,
    },
    Prefix {
        token: Token,
        operator: String,
        right: Box<Expression>,
    },
    Infix {
        token: Token,
        left: Box<Expression>,
        operator: String,
        right: Box<Expression>,
    },
    If {
        token: Token,
        condition: Box<Expression>,
        consequence: BlockStatement,
        alternative: Option<BlockStatement>,
    },
    FunctionLiteral {
        token: Token,
        parameters: Vec<Identifier>,
        body: BlockStatement,
    },
    Call {
        token: Token,
        function: Box<Expression>,
        arguments: Vec<Expression>,
    },
    ArrayLiteral {
        token: Token,
        elements: Vec<Expression>,
    },
    Index {
        token: Token,
        left: Box<Expression>,
        index: Box<Expression>,
    },
    // Pairs keep source order so evaluation is deterministic left-to-right.
    HashLiteral {
        token: Token,
        pairs: Vec<(Expression, Expression)>,
    },
}

impl Expression {
    pub fn token_literal(&self) -> &str {
        match self {
            Expression::Identifier(ident) => ident.token_literal(),
            Expression::IntegerLiteral { token, .. } => &token.literal,
            Expression::StringLiteral { token, .. } => &token.literal,
            Expression::Boolean { token, .. } => &token.literal,
            Expression::Prefix { token, .. } => &token.literal,
            Expression::Infix { token, .. } => &token.literal,
            Expression::If { token, .. } => &token.literal,
            Expression::FunctionLiteral { token, .. } => &token.literal,
            Expression::Call { token, .. } => &token.literal,
            Expression::ArrayLiteral { token, .. } => &token.literal,
            Expression::Index { token, .. } => &token.literal,
            Expression::HashLiteral { token, .. } => &token.literal,
        }
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Identifier(ident) => write!(f, "{}", ident),
            Expression::IntegerLiteral { token, .. } => write!(f, "{}", token.literal),
            Expression::StringLiteral { token, .. } => write!(f, "{}", token.literal),
            Expression::Boolean { token, .. } => write!(f, "{}", token.literal),
            Expression::Prefix {
                operator, right, ..
            } => write!(f, "({}{})", operator, right),
            Expression::Infix {
                left,
                operator,
                right,
                ..
            } => write!(f, "({} {} {})", left, operator, right),
            Expression::If {
                condition,
                consequence,
                alternative,
                ..
            } => {
                write!(f, "if{} {}", condition, consequence)?;
                if let Some(alt) = alternative {
                    write!(f, "else {}", alt)?;
                }
                Ok(())
            }
            Expression::FunctionLiteral {
                token,
                parameters,
                body,
            } => {
                let params: Vec<String> = parameters.iter().map(|p| p.to_string()).collect();
                write!(f, "{}({}) {}", token.literal, params.join(", "), body)
            }
            Expression::Call {
                function,
                arguments,
                ..
            } => {
                let args: Vec<String> = arguments.iter().map(|a| a.to_string()).collect();
                write!(f, "{}({})", function, args.join(", "))
            }
            Expression::ArrayLiteral { elements, .. } => {
                let elems: Vec<String> = elements.iter().map(|e| e.to_string()).collect();
                write!(f, "[{}]", elems.join(", "))
            }
            Expression::Index { left, index, .. } => write!(f, "({}[{}])", left, index),
            Expression::HashLiteral { pairs, .. } => {
                let pairs: Vec<String> = pairs.iter().map(|(k, v)| format!("{}:{}", k, v)).collect();
                write!(f, "{{{}}}", pairs.join(", "))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::TokenKind;

    // let myVar = anotherVar;
    #[test]
    fn program_reprints_source() {
        let program = Program {
            statements: vec![Statement::Let {
                token: Token::new(TokenKind::Let, "let"),
                name: Identifier {
                    token: Token::new(TokenKind::Ident, "myVar"),
                    value: "myVar".to_string(),
                },
                value: Expression::Identifier(Identifier {
                    token: Token::new(TokenKind::Ident, "anotherVar"),
                    value: "anotherVar".to_string(),
                }),
            }],
        };

        assert_eq!(program.to_string(), "let myVar = anotherVar;");
        assert_eq!(program.token_literal(), "let");
    }

    #[test]
    fn empty_program_reprints_empty() {
        let program = Program::default();
        assert_eq!(program.to_string(), "");
        assert_eq!(program.token_literal(), "");
    }
}
