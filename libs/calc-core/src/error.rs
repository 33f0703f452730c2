//! Error types for calc-core

use thiserror::Error;

/// Calculator errors
#[derive(Debug, Error)]
pub enum CalcError {
    /// Mathematically undefined operand combination (division by zero, ...)
    #[error("{0}")]
    Domain(String),

    #[error("Unknown operation: {0}")]
    UnknownOperation(String),

    #[error("Invalid number: {0}")]
    InvalidNumber(String),

    #[error("Persistence error: {0}")]
    Persistence(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl CalcError {
    pub fn domain(msg: impl Into<String>) -> Self {
        Self::Domain(msg.into())
    }

    pub fn unknown_operation(symbol: impl Into<String>) -> Self {
        Self::UnknownOperation(symbol.into())
    }

    pub fn invalid_number(raw: impl Into<String>) -> Self {
        Self::InvalidNumber(raw.into())
    }

    pub fn persistence(msg: impl Into<String>) -> Self {
        Self::Persistence(msg.into())
    }

    /// True for errors raised by an operation itself, as opposed to input or I/O problems
    pub fn is_domain(&self) -> bool {
        matches!(self, Self::Domain(_))
    }
}

pub type Result<T> = std::result::Result<T, CalcError>;
