use crate::error::Span;
use crate::value::Value;

#[derive(Debug, Clone)]
pub struct Program {
    pub statements: Vec<Stmt>,
}

#[derive(Debug, Clone)]
pub enum Stmt {
    /// Evaluated for its effects (i.e. potential runtime errors); the value
    /// is discarded.
    Expression { expr: Expr },
    /// Evaluated and the stringified result written to the output stream.
    Print { expr: Expr },
}

/// Expression tree. Runtime errors are attributed to the operator token, so
/// `Unary` and `Binary` carry that token's line and span; literal and
/// grouping nodes cannot fail and carry no position.
#[derive(Debug, Clone)]
pub enum Expr {
    Literal {
        value: Value,
    },
    Grouping {
        expr: Box<Expr>,
    },
    Unary {
        operator: UnaryOp,
        operand: Box<Expr>,
        line: usize,
        span: Span,
    },
    Binary {
        left: Box<Expr>,
        operator: BinaryOp,
        right: Box<Expr>,
        line: usize,
        span: Span,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Subtract,
    Multiply,
    Divide,
    Equal,
    NotEqual,
    Less,
    LessEqual,
    Greater,
    GreaterEqual,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Negate,
    Not,
}
