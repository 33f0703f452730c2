//! calc-core - Arithmetic calculations with undoable history
//!
//! Provides the pieces behind the `calc` REPL.
//!
//! # Features
//!
//! - **Operations**: `+`, `-`, `*`, `/`, `^`, `root`, with domain checks
//! - **History**: ordered calculation log with observer callbacks
//! - **Undo/redo**: memento snapshots managed by a [`Caretaker`]
//! - **Persistence**: CSV save/load (`a,op,b,result`)
//!
//! # Example
//!
//! ```rust
//! use calc_core::{Caretaker, CalculationFactory, History};
//!
//! let mut history = History::new();
//! let mut caretaker = Caretaker::new();
//! caretaker.record(&history);
//!
//! let calc = CalculationFactory::from_symbol("^", 2.0, 3.0).unwrap();
//! assert_eq!(calc.execute().unwrap(), 8.0);
//!
//! history.add(calc);
//! caretaker.record(&history);
//! assert_eq!(history.to_strings(), vec!["2.0 ^ 3.0 = 8.0"]);
//!
//! assert!(caretaker.undo(&mut history));
//! assert!(history.is_empty());
//! ```
//!
//! # Operations
//!
//! | Symbol | Result | Fails when |
//! |--------|--------|------------|
//! | `+` | a + b | - |
//! | `-` | a - b | - |
//! | `*` | a * b | - |
//! | `/` | a / b | b = 0 |
//! | `^` | a ^ b | a = 0 and b < 0 |
//! | `root` | a-th root of b | a = 0, or b < 0 with an even or fractional a |

pub mod calculation;
pub mod error;
pub mod factory;
pub mod history;
pub mod memento;
pub mod numfmt;
pub mod operation;
pub mod persistence;

// Re-exports for convenience
pub use calculation::Calculation;
pub use error::{CalcError, Result};
pub use factory::{CalculationFactory, UNKNOWN_SYMBOL};
pub use history::{History, Observer, ObserverId};
pub use memento::{Caretaker, Memento};
pub use numfmt::format_number;
pub use operation::{BinaryOperation, Operation};
