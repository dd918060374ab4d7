use crate::parser::ParserError;
use crate::Operation;


/// Crate-level error.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// More than the maximum number of draws was requested.
    #[error("Dice count limit exceeded [max {0}]")]
    LimitExceeded(u32),

    /// A dice count of 0.
    #[error("Zero value not allowed")]
    ZeroValue,

    /// A targeted bonus without positions or operations, or with position 0.
    #[error("Invalid modifier: {0}")]
    InvalidModifier(String),

    /// Threshold text that does not parse.
    #[error("Invalid threshold: {0}")]
    InvalidThreshold(String),

    /// A solve mode name other than random, max or min.
    #[error("Invalid solve mode: {0}")]
    InvalidSolveMode(String),

    /// An operation faulted while solving.
    #[error("Arithmetic fault - {0}")]
    Arithmetic(#[from] ArithmeticFault),

    /// Invalid notation.
    #[error("Parser error - {0}")]
    ParserError(#[from] ParserError)
}


/// A failed operator application.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ArithmeticFault {
    /// Division with a zero divisor.
    #[error("Division by zero")]
    DivisionByZero,

    /// A result that is infinite or NaN.
    #[error("{lhs} {op} {rhs} is not a finite number")]
    NonFinite {
        /// The faulting operation.
        op: Operation,
        /// Left operand.
        lhs: f64,
        /// Right operand.
        rhs: f64
    }
}
