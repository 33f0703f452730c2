//! Calculation value object

use crate::error::Result;
use crate::factory::CalculationFactory;
use crate::numfmt::format_number;
use crate::operation::Operation;
use std::fmt;

/// An operation bound to its two operands
///
/// Immutable after construction; [`Calculation::execute`] is deterministic.
#[derive(Debug, Clone, PartialEq)]
pub struct Calculation {
    op: Operation,
    a: f64,
    b: f64,
}

impl Calculation {
    pub fn new(op: Operation, a: f64, b: f64) -> Self {
        Self { op, a, b }
    }

    pub fn operation(&self) -> &Operation {
        &self.op
    }

    pub fn a(&self) -> f64 {
        self.a
    }

    pub fn b(&self) -> f64 {
        self.b
    }

    /// Symbol registered for this calculation's operation, `?` if none
    pub fn symbol(&self) -> &'static str {
        CalculationFactory::symbol_for(&self.op)
    }

    /// Apply the operation to the operands
    pub fn execute(&self) -> Result<f64> {
        self.op.apply(self.a, self.b)
    }
}

/// Renders `a symbol b`, e.g. `2.0 + 3.0`
impl fmt::Display for Calculation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            format_number(self.a),
            self.symbol(),
            format_number(self.b)
        )
    }
}
