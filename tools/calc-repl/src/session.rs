//! Interactive calculator session
//!
//! Owns the history and its caretaker for the lifetime of one REPL run. Input and
//! output are generic so the loop can be driven from tests with in-memory buffers.

use anyhow::Result;
use calc_core::{format_number, CalcError, Caretaker, CalculationFactory, History};
use colored::Colorize;
use std::io::{BufRead, Write};
use std::path::PathBuf;
use tracing::{debug, info, warn};

use crate::command::{parse_number, Command};
use crate::config::Settings;

/// Main command prompt
pub const PROMPT: &str = "calc> ";

/// Whether the loop should keep reading commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Exit,
}

/// Load the configured CSV history at start-up
///
/// A missing file starts an empty history; an unreadable one is reported and
/// also starts empty.
pub fn load_initial_history(settings: &Settings) -> History {
    let Some(path) = settings.csv_path.as_deref() else {
        return History::new();
    };

    if !path.exists() {
        info!(path = %path.display(), "no saved history yet");
        return History::new();
    }

    match History::load_csv(path) {
        Ok(history) => history,
        Err(e) => {
            warn!(
                path = %path.display(),
                error = %e,
                "failed to load saved history, starting empty"
            );
            eprintln!(
                "{} Could not load {}: {}",
                "WARNING".yellow(),
                path.display(),
                e
            );
            History::new()
        },
    }
}

/// REPL session over any line source and output sink
pub struct Session<R, W> {
    input: R,
    output: W,
    history: History,
    caretaker: Caretaker,
    settings: Settings,
}

impl<R: BufRead, W: Write> Session<R, W> {
    /// Create a session; the starting history becomes the first undo state
    pub fn new(settings: Settings, mut history: History, input: R, output: W) -> Self {
        history.register_observer(|calc, result| {
            debug!(calc = %calc, op = calc.operation().name(), result, "calculation recorded");
        });

        let mut caretaker = Caretaker::new();
        caretaker.record(&history);

        Self {
            input,
            output,
            history,
            caretaker,
            settings,
        }
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Run until `exit` or end of input
    pub fn run(&mut self) -> Result<()> {
        writeln!(
            self.output,
            "{} (type 'help' for options, 'exit' to quit)",
            "Calculator".bold()
        )?;

        loop {
            let Some(line) = self.read_line(PROMPT)? else {
                self.goodbye()?;
                break;
            };

            let command = Command::parse(&line);
            debug!(?command, "dispatch");
            if self.dispatch(command)? == Flow::Exit {
                break;
            }
        }

        self.output.flush()?;
        Ok(())
    }

    fn dispatch(&mut self, command: Command) -> Result<Flow> {
        match command {
            Command::Exit => {
                self.goodbye()?;
                return Ok(Flow::Exit);
            },
            Command::Help => self.print_help()?,
            Command::History => self.print_history()?,
            Command::Clear => {
                self.history.clear();
                self.caretaker.record(&self.history);
                writeln!(self.output, "History cleared.")?;
            },
            Command::Undo => {
                if self.caretaker.undo(&mut self.history) {
                    writeln!(self.output, "Undone.")?;
                } else {
                    writeln!(self.output, "Nothing to undo.")?;
                }
            },
            Command::Redo => {
                if self.caretaker.redo(&mut self.history) {
                    writeln!(self.output, "Redone.")?;
                } else {
                    writeln!(self.output, "Nothing to redo.")?;
                }
            },
            Command::Save(path) => self.save(path)?,
            Command::Load(path) => self.load(path)?,
            Command::Calculate(symbol) => return self.calculate(&symbol),
            Command::Empty => {},
            Command::Unknown(input) => {
                debug!(input = %input, "unknown command");
                writeln!(
                    self.output,
                    "{} Unknown command/operation. Type 'help' for options.",
                    "ERROR".red()
                )?;
            },
        }
        Ok(Flow::Continue)
    }

    fn calculate(&mut self, symbol: &str) -> Result<Flow> {
        let Some(a) = self.read_number("Enter first number: ")? else {
            self.goodbye()?;
            return Ok(Flow::Exit);
        };
        let Some(b) = self.read_number("Enter second number: ")? else {
            self.goodbye()?;
            return Ok(Flow::Exit);
        };

        let outcome = CalculationFactory::from_symbol(symbol, a, b)
            .and_then(|calc| calc.execute().map(|result| (calc, result)));

        match outcome {
            Ok((calc, result)) => {
                let line = format!("{} = {}", calc, format_number(result));
                self.history.add(calc);
                self.caretaker.record(&self.history);
                self.auto_save()?;
                writeln!(self.output, "{}", line)?;
            },
            Err(e) => {
                debug!(symbol, a, b, error = %e, "calculation rejected");
                writeln!(self.output, "{} {}", "Error:".red(), e)?;
            },
        }
        Ok(Flow::Continue)
    }

    fn auto_save(&mut self) -> Result<()> {
        let Some(path) = self.settings.auto_save_path() else {
            return Ok(());
        };

        if let Err(e) = self.history.save_csv(path) {
            warn!(path = %path.display(), error = %e, "auto-save failed");
            writeln!(
                self.output,
                "{} Auto-save to {} failed: {}",
                "WARNING".yellow(),
                path.display(),
                e
            )?;
        }
        Ok(())
    }

    fn save(&mut self, path: Option<String>) -> Result<()> {
        let path = self.resolve_path(path);
        match self.history.save_csv(&path) {
            Ok(()) => writeln!(
                self.output,
                "{} Saved {} entries to {}",
                "OK".green(),
                self.history.len(),
                path.display()
            )?,
            Err(e) => writeln!(self.output, "{} Error saving: {}", "ERROR".red(), e)?,
        }
        Ok(())
    }

    fn load(&mut self, path: Option<String>) -> Result<()> {
        let path = self.resolve_path(path);
        match self.history.replace_from_csv(&path) {
            Ok(count) => {
                self.caretaker.record(&self.history);
                writeln!(
                    self.output,
                    "{} Loaded {} entries from {}",
                    "OK".green(),
                    count,
                    path.display()
                )?;
            },
            Err(e) => writeln!(self.output, "{} Error loading: {}", "ERROR".red(), e)?,
        }
        Ok(())
    }

    fn resolve_path(&self, explicit: Option<String>) -> PathBuf {
        explicit
            .map(PathBuf::from)
            .unwrap_or_else(|| self.settings.csv_path_or_default().to_path_buf())
    }

    fn print_help(&mut self) -> Result<()> {
        let ops = CalculationFactory::supported().join(" ");
        writeln!(self.output, "Commands:")?;
        writeln!(self.output, "  +, -, *, /, ^, root  -> perform calculation")?;
        writeln!(self.output, "  help                 -> show this help")?;
        writeln!(self.output, "  history              -> list previous calculations")?;
        writeln!(self.output, "  clear                -> clear history")?;
        writeln!(self.output, "  undo/redo            -> undo or redo history state")?;
        writeln!(self.output, "  save [path]          -> save history to CSV")?;
        writeln!(self.output, "  load [path]          -> load history from CSV")?;
        writeln!(self.output, "  exit/quit/q          -> leave the program")?;
        writeln!(
            self.output,
            "Commands are case-insensitive; save/load paths are used as typed."
        )?;
        writeln!(self.output, "Supported operations: {}", ops)?;
        writeln!(
            self.output,
            "Default CSV file: {}{}",
            self.settings.csv_path_or_default().display(),
            if self.settings.auto_save_path().is_some() {
                " (auto-save on)"
            } else {
                ""
            }
        )?;
        Ok(())
    }

    fn print_history(&mut self) -> Result<()> {
        let lines = self.history.to_strings();
        if lines.is_empty() {
            writeln!(self.output, "(no history yet)")?;
        }
        for line in lines {
            writeln!(self.output, "{}", line)?;
        }
        Ok(())
    }

    fn goodbye(&mut self) -> Result<()> {
        writeln!(self.output, "Goodbye!")?;
        Ok(())
    }

    /// Prompt and read one line; `None` once input is closed
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        // Raw bytes so a non-UTF-8 line is just bad input
        let mut buf = Vec::new();
        if self.input.read_until(b'\n', &mut buf)? == 0 {
            // Keep the goodbye on its own line after an unanswered prompt
            writeln!(self.output)?;
            return Ok(None);
        }
        Ok(Some(String::from_utf8_lossy(&buf).into_owned()))
    }

    /// Prompt until a valid number is entered; `None` once input is closed
    fn read_number(&mut self, prompt: &str) -> Result<Option<f64>> {
        loop {
            let Some(line) = self.read_line(prompt)? else {
                return Ok(None);
            };
            match parse_number(&line) {
                Ok(n) => return Ok(Some(n)),
                Err(e @ CalcError::InvalidNumber(_)) => {
                    writeln!(
                        self.output,
                        "{} {}. Please enter a numeric value.",
                        "ERROR".red(),
                        e
                    )?;
                },
                Err(e) => return Err(e.into()),
            }
        }
    }
}
