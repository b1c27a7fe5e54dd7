use crate::ast::{BinaryOp, Expr, Program, Stmt, UnaryOp};
use crate::error::{LoxError, Span};
use crate::value::Value;
use std::io::Write;

/// Tree-walking evaluator. Holds no cross-run state in this snapshot; the
/// output writer is injected so print behavior stays testable.
pub struct Evaluator;

impl Evaluator {
    pub fn new() -> Self {
        Self
    }

    /// Execute statements strictly in program order, stopping at the first
    /// runtime error. Side effects of completed statements are already
    /// written when an error surfaces.
    pub fn evaluate_program<W: Write>(
        &self,
        program: &Program,
        out: &mut W,
    ) -> Result<(), LoxError> {
        for statement in &program.statements {
            self.execute_statement(statement, out)?;
        }
        Ok(())
    }

    fn execute_statement<W: Write>(&self, stmt: &Stmt, out: &mut W) -> Result<(), LoxError> {
        match stmt {
            Stmt::Expression { expr } => {
                self.evaluate_expression(expr)?;
                Ok(())
            }
            Stmt::Print { expr } => {
                let value = self.evaluate_expression(expr)?;
                writeln!(out, "{}", value).unwrap();
                Ok(())
            }
        }
    }

    pub fn evaluate_expression(&self, expr: &Expr) -> Result<Value, LoxError> {
        match expr {
            Expr::Literal { value } => Ok(value.clone()),
            Expr::Grouping { expr } => self.evaluate_expression(expr),
            Expr::Unary {
                operator,
                operand,
                line,
                span,
            } => {
                let value = self.evaluate_expression(operand)?;
                evaluate_unary_op(*operator, value, *line, *span)
            }
            Expr::Binary {
                left,
                operator,
                right,
                line,
                span,
            } => {
                let left = self.evaluate_expression(left)?;
                let right = self.evaluate_expression(right)?;
                evaluate_binary_op(*operator, left, right, *line, *span)
            }
        }
    }
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new()
    }
}

fn evaluate_unary_op(
    operator: UnaryOp,
    operand: Value,
    line: usize,
    span: Span,
) -> Result<Value, LoxError> {
    match operator {
        UnaryOp::Negate => match operand {
            Value::Number(n) => Ok(Value::Number(-n)),
            _ => Err(LoxError::runtime(span, line, "Operand must be a number.")),
        },
        UnaryOp::Not => Ok(Value::Bool(!operand.is_truthy())),
    }
}

fn evaluate_binary_op(
    operator: BinaryOp,
    left: Value,
    right: Value,
    line: usize,
    span: Span,
) -> Result<Value, LoxError> {
    match operator {
        BinaryOp::Add => match (left, right) {
            (Value::Number(l), Value::Number(r)) => Ok(Value::Number(l + r)),
            (Value::String(l), Value::String(r)) => Ok(Value::String(l + &r)),
            _ => Err(LoxError::runtime(
                span,
                line,
                "Operands must be two numbers or two strings",
            )),
        },
        BinaryOp::Subtract => match (left, right) {
            (Value::Number(l), Value::Number(r)) => Ok(Value::Number(l - r)),
            _ => numbers_error(line, span),
        },
        BinaryOp::Multiply => match (left, right) {
            (Value::Number(l), Value::Number(r)) => Ok(Value::Number(l * r)),
            _ => numbers_error(line, span),
        },
        BinaryOp::Divide => match (left, right) {
            (Value::Number(l), Value::Number(r)) => Ok(Value::Number(l / r)),
            _ => numbers_error(line, span),
        },
        BinaryOp::Greater => match (left, right) {
            (Value::Number(l), Value::Number(r)) => Ok(Value::Bool(l > r)),
            _ => numbers_error(line, span),
        },
        BinaryOp::GreaterEqual => match (left, right) {
            (Value::Number(l), Value::Number(r)) => Ok(Value::Bool(l >= r)),
            _ => numbers_error(line, span),
        },
        BinaryOp::Less => match (left, right) {
            (Value::Number(l), Value::Number(r)) => Ok(Value::Bool(l < r)),
            _ => numbers_error(line, span),
        },
        BinaryOp::LessEqual => match (left, right) {
            (Value::Number(l), Value::Number(r)) => Ok(Value::Bool(l <= r)),
            _ => numbers_error(line, span),
        },
        // Equality compares by variant and content, with no coercion.
        BinaryOp::Equal => Ok(Value::Bool(left == right)),
        BinaryOp::NotEqual => Ok(Value::Bool(left != right)),
    }
}

fn numbers_error(line: usize, span: Span) -> Result<Value, LoxError> {
    Err(LoxError::runtime(span, line, "Operands must be numbers."))
}
