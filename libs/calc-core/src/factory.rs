//! Symbol <-> operation registry

use crate::calculation::Calculation;
use crate::error::{CalcError, Result};
use crate::operation::Operation;

/// Symbol returned for operations that are not registered
pub const UNKNOWN_SYMBOL: &str = "?";

const SYMBOLS: [&str; 6] = ["+", "-", "*", "/", "^", "root"];

/// Builds calculations from operation symbols
pub struct CalculationFactory;

impl CalculationFactory {
    /// All recognised symbols
    pub fn supported() -> &'static [&'static str] {
        &SYMBOLS
    }

    pub fn is_supported(symbol: &str) -> bool {
        SYMBOLS.contains(&symbol)
    }

    /// Resolve a symbol to its operation
    pub fn operation(symbol: &str) -> Result<Operation> {
        match symbol {
            "+" => Ok(Operation::Add),
            "-" => Ok(Operation::Subtract),
            "*" => Ok(Operation::Multiply),
            "/" => Ok(Operation::Divide),
            "^" => Ok(Operation::Power),
            "root" => Ok(Operation::Root),
            other => Err(CalcError::unknown_operation(other)),
        }
    }

    pub fn from_symbol(symbol: &str, a: f64, b: f64) -> Result<Calculation> {
        Ok(Calculation::new(Self::operation(symbol)?, a, b))
    }

    /// Reverse lookup by variant; [`UNKNOWN_SYMBOL`] for unregistered operations
    pub fn symbol_for(op: &Operation) -> &'static str {
        match op {
            Operation::Add => "+",
            Operation::Subtract => "-",
            Operation::Multiply => "*",
            Operation::Divide => "/",
            Operation::Power => "^",
            Operation::Root => "root",
            Operation::Custom(_) => UNKNOWN_SYMBOL,
        }
    }
}
