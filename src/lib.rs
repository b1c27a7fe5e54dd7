// Lox expression-language front-end and evaluator.
//
// Pipeline: source text -> tokens (lexer) -> statement AST (parser) ->
// side effects and diagnostics (evaluator). This snapshot covers literals,
// grouping, unary and binary operators, and expression/print statements.

// Public modules
pub mod ast;
pub mod error;
pub mod evaluator;
pub mod lexer;
pub mod parser;
pub mod repl;
pub mod runner;
pub mod token;
pub mod value;

// Re-export commonly used items
pub use ast::{BinaryOp, Expr, Program, Stmt, UnaryOp};
pub use error::{ErrorKind, LoxError, Span};
pub use evaluator::Evaluator;
pub use lexer::Lexer;
pub use parser::Parser;
pub use token::{Literal, Token, TokenType};
pub use value::Value;

// Re-export main functions
pub use repl::start as start_repl;
pub use runner::{run, RunOutcome};
