//! REPL command parsing

use calc_core::{CalcError, CalculationFactory};

/// One line of REPL input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Exit,
    Help,
    History,
    Clear,
    Undo,
    Redo,
    /// Optional explicit path; falls back to the configured CSV path
    Save(Option<String>),
    Load(Option<String>),
    /// Supported operation symbol; operands are prompted for separately
    Calculate(String),
    Empty,
    Unknown(String),
}

impl Command {
    /// Parse a raw input line
    ///
    /// The keyword is matched case-insensitively; a `save`/`load` path argument
    /// keeps its original case.
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        if line.is_empty() {
            return Self::Empty;
        }

        let (keyword, arg) = match line.split_once(char::is_whitespace) {
            Some((keyword, rest)) => (keyword, Some(rest.trim()).filter(|r| !r.is_empty())),
            None => (line, None),
        };
        let keyword = keyword.to_lowercase();

        match (keyword.as_str(), arg) {
            ("exit" | "quit" | "q", None) => Self::Exit,
            ("help", None) => Self::Help,
            ("history", None) => Self::History,
            ("clear", None) => Self::Clear,
            ("undo", None) => Self::Undo,
            ("redo", None) => Self::Redo,
            ("save", path) => Self::Save(path.map(str::to_string)),
            ("load", path) => Self::Load(path.map(str::to_string)),
            (symbol, None) if CalculationFactory::is_supported(symbol) => {
                Self::Calculate(symbol.to_string())
            },
            _ => Self::Unknown(line.to_string()),
        }
    }
}

/// Parse an operand entered at a number prompt
pub fn parse_number(raw: &str) -> calc_core::Result<f64> {
    let trimmed = raw.trim();
    trimmed
        .parse::<f64>()
        .map_err(|_| CalcError::invalid_number(format!("'{}'", trimmed)))
}
