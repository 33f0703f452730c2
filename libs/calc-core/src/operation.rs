//! Binary arithmetic operations
//!
//! Six built-in operations are closed over by [`Operation`]. Anything else can be
//! plugged in through [`BinaryOperation`] and wrapped in [`Operation::Custom`];
//! those are not known to the factory and render with the `?` symbol.

use crate::error::{CalcError, Result};
use std::fmt;
use std::sync::Arc;

/// Relative tolerance used when deciding whether a root degree is an integer
const INTEGER_REL_TOLERANCE: f64 = 1e-9;

/// Externally supplied binary operation
pub trait BinaryOperation: fmt::Debug + Send + Sync {
    /// Stable name, also used for equality between custom operations
    fn name(&self) -> &str;

    fn apply(&self, a: f64, b: f64) -> Result<f64>;
}

/// Arithmetic operation applied to two operands
#[derive(Debug, Clone)]
pub enum Operation {
    Add,
    Subtract,
    Multiply,
    Divide,
    Power,
    /// `a` is the degree, `b` the radicand
    Root,
    Custom(Arc<dyn BinaryOperation>),
}

impl Operation {
    /// Wrap an external implementation
    pub fn custom(op: impl BinaryOperation + 'static) -> Self {
        Self::Custom(Arc::new(op))
    }

    /// Apply the operation, failing with [`CalcError::Domain`] on undefined input
    pub fn apply(&self, a: f64, b: f64) -> Result<f64> {
        match self {
            Self::Add => Ok(a + b),
            Self::Subtract => Ok(a - b),
            Self::Multiply => Ok(a * b),
            Self::Divide => divide(a, b),
            Self::Power => power(a, b),
            Self::Root => root(a, b),
            Self::Custom(op) => op.apply(a, b),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Add => "add",
            Self::Subtract => "subtract",
            Self::Multiply => "multiply",
            Self::Divide => "divide",
            Self::Power => "power",
            Self::Root => "root",
            Self::Custom(op) => op.name(),
        }
    }
}

impl PartialEq for Operation {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Custom(lhs), Self::Custom(rhs)) => lhs.name() == rhs.name(),
            (Self::Custom(_), _) | (_, Self::Custom(_)) => false,
            _ => std::mem::discriminant(self) == std::mem::discriminant(other),
        }
    }
}

fn divide(a: f64, b: f64) -> Result<f64> {
    if b == 0.0 {
        return Err(CalcError::domain("Division by zero is not allowed"));
    }
    Ok(a / b)
}

fn power(a: f64, b: f64) -> Result<f64> {
    if a == 0.0 && b < 0.0 {
        return Err(CalcError::domain("Cannot raise 0 to a negative power"));
    }
    Ok(a.powf(b))
}

fn root(degree: f64, radicand: f64) -> Result<f64> {
    if degree == 0.0 {
        return Err(CalcError::domain("Root degree cannot be zero"));
    }

    if radicand < 0.0 {
        let nearest = degree.round();
        if !is_close(degree, nearest) {
            return Err(CalcError::domain(
                "Fractional root of a negative number is not real",
            ));
        }
        if nearest % 2.0 == 0.0 {
            return Err(CalcError::domain(
                "Even root of a negative number is not real",
            ));
        }
        // powf on a negative base yields NaN, so take the root of |b| and negate
        return Ok(-(-radicand).powf(1.0 / nearest));
    }

    Ok(radicand.powf(1.0 / degree))
}

fn is_close(a: f64, b: f64) -> bool {
    (a - b).abs() <= INTEGER_REL_TOLERANCE * a.abs().max(b.abs())
}

#[cfg(test)]
#[allow(clippy::disallowed_methods)]
mod tests {
    use super::*;

    fn approx(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_basic_arithmetic() {
        assert_eq!(Operation::Add.apply(2.0, 3.0).unwrap(), 5.0);
        assert_eq!(Operation::Subtract.apply(2.0, 3.0).unwrap(), -1.0);
        assert_eq!(Operation::Multiply.apply(2.5, 4.0).unwrap(), 10.0);
        assert_eq!(Operation::Divide.apply(9.0, 3.0).unwrap(), 3.0);
    }

    #[test]
    fn test_divide_by_zero() {
        let err = Operation::Divide.apply(1.0, 0.0).unwrap_err();
        assert!(err.is_domain());
        assert!(Operation::Divide.apply(1.0, -0.0).is_err());
    }

    #[test]
    fn test_power() {
        assert_eq!(Operation::Power.apply(2.0, 3.0).unwrap(), 8.0);
        assert_eq!(Operation::Power.apply(0.0, 0.0).unwrap(), 1.0);
        assert_eq!(Operation::Power.apply(0.0, 2.0).unwrap(), 0.0);
        assert!(Operation::Power.apply(0.0, -1.0).unwrap_err().is_domain());
    }

    #[test]
    fn test_root_positive_radicand() {
        approx(Operation::Root.apply(2.0, 9.0).unwrap(), 3.0);
        approx(Operation::Root.apply(3.0, 27.0).unwrap(), 3.0);
        approx(Operation::Root.apply(0.5, 3.0).unwrap(), 9.0);
    }

    #[test]
    fn test_root_negative_radicand() {
        approx(Operation::Root.apply(3.0, -27.0).unwrap(), -3.0);
        // Degree within tolerance of an odd integer is accepted
        approx(Operation::Root.apply(3.0 + 1e-12, -8.0).unwrap(), -2.0);

        assert!(Operation::Root.apply(2.0, -9.0).unwrap_err().is_domain());
        assert!(Operation::Root.apply(2.5, -8.0).unwrap_err().is_domain());
        assert!(Operation::Root.apply(-4.0, -16.0).unwrap_err().is_domain());
    }

    #[test]
    fn test_root_zero_degree() {
        let err = Operation::Root.apply(0.0, 9.0).unwrap_err();
        assert_eq!(err.to_string(), "Root degree cannot be zero");
    }

    #[derive(Debug)]
    struct Modulo;

    impl BinaryOperation for Modulo {
        fn name(&self) -> &str {
            "modulo"
        }

        fn apply(&self, a: f64, b: f64) -> Result<f64> {
            Ok(a % b)
        }
    }

    #[test]
    fn test_custom_operation() {
        let op = Operation::custom(Modulo);
        assert_eq!(op.apply(7.0, 4.0).unwrap(), 3.0);
        assert_eq!(op.name(), "modulo");
        assert_eq!(op, Operation::custom(Modulo));
        assert_ne!(op, Operation::Add);
    }

    #[test]
    fn test_equality_by_variant() {
        assert_eq!(Operation::Root, Operation::Root);
        assert_ne!(Operation::Add, Operation::Subtract);
    }
}
