//! calc-repl - Interactive front end for calc-core
//!
//! Split into a library so the session loop can be exercised from tests; the
//! `calc` binary in `main.rs` only wires up CLI flags, logging and stdio.

pub mod command;
pub mod config;
pub mod session;

pub use command::Command;
pub use config::Settings;
pub use session::{load_initial_history, Session};
