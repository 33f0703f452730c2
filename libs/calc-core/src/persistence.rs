//! CSV persistence for calculation history
//!
//! Layout is a header row `a,op,b,result` followed by one row per calculation.
//! The `result` column is informational: loading rebuilds every calculation from
//! `op`, `a` and `b` through the factory and recomputes results on demand.

use crate::calculation::Calculation;
use crate::error::{CalcError, Result};
use crate::factory::CalculationFactory;
use crate::history::History;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;
use tracing::{debug, info};

/// Column names, in file order
pub const CSV_HEADER: [&str; 4] = ["a", "op", "b", "result"];

#[derive(Debug, Serialize)]
struct CsvRow<'a> {
    a: f64,
    op: &'a str,
    b: f64,
    /// Empty when the calculation fails to execute
    result: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct StoredRow {
    a: f64,
    op: String,
    b: f64,
}

/// Write history rows (with header) to any writer
pub fn write_csv<W: Write>(history: &History, writer: W) -> Result<()> {
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    // Header is written by hand so an empty history still produces one
    csv_writer.write_record(CSV_HEADER)?;
    for calc in history.all() {
        csv_writer.serialize(CsvRow {
            a: calc.a(),
            op: calc.symbol(),
            b: calc.b(),
            result: calc.execute().ok(),
        })?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Parse calculations from CSV; fails on the first bad row
pub fn read_csv<R: Read>(reader: R) -> Result<Vec<Calculation>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    for column in ["a", "op", "b"] {
        if !headers.iter().any(|h| h == column) {
            return Err(CalcError::persistence(format!(
                "missing column '{}' in CSV header",
                column
            )));
        }
    }

    let mut calculations = Vec::new();
    for (index, row) in csv_reader.deserialize::<StoredRow>().enumerate() {
        // Line 1 is the header
        let line = index + 2;
        let row = row.map_err(|e| CalcError::persistence(format!("line {}: {}", line, e)))?;
        let calc = CalculationFactory::from_symbol(&row.op, row.a, row.b)
            .map_err(|e| CalcError::persistence(format!("line {}: {}", line, e)))?;
        calculations.push(calc);
    }

    debug!(rows = calculations.len(), "parsed history CSV");
    Ok(calculations)
}

impl History {
    /// Save all entries to a CSV file, replacing it if present
    pub fn save_csv(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path)?;
        write_csv(self, BufWriter::new(file))?;
        info!(path = %path.display(), entries = self.len(), "saved history");
        Ok(())
    }

    /// Load a new history from a CSV file
    pub fn load_csv(path: impl AsRef<Path>) -> Result<History> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let calculations = read_csv(BufReader::new(file))?;
        info!(path = %path.display(), entries = calculations.len(), "loaded history");
        Ok(History::from_calculations(calculations))
    }

    /// Replace the entries of this history from a CSV file, keeping observers
    ///
    /// On failure the current entries are left untouched. Observers are not
    /// notified about reloaded rows.
    pub fn replace_from_csv(&mut self, path: impl AsRef<Path>) -> Result<usize> {
        let loaded = History::load_csv(path)?;
        let count = loaded.len();
        self.restore_memento(&loaded.create_memento());
        Ok(count)
    }
}

#[cfg(test)]
#[allow(clippy::disallowed_methods)]
mod tests {
    use super::*;
    use crate::operation::Operation;

    fn calc(symbol: &str, a: f64, b: f64) -> Calculation {
        CalculationFactory::from_symbol(symbol, a, b).unwrap()
    }

    fn to_csv_string(history: &History) -> String {
        let mut buf = Vec::new();
        write_csv(history, &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_write_layout() {
        let mut hist = History::new();
        hist.add(calc("+", 1.0, 2.0));
        hist.add(calc("root", 3.0, -27.0));

        assert_eq!(
            to_csv_string(&hist),
            "a,op,b,result\n1.0,+,2.0,3.0\n3.0,root,-27.0,-3.0\n"
        );
    }

    #[test]
    fn test_empty_history_writes_header() {
        assert_eq!(to_csv_string(&History::new()), "a,op,b,result\n");
    }

    #[test]
    fn test_failing_calculation_has_empty_result() {
        let mut hist = History::new();
        hist.add(calc("/", 4.0, 0.0));
        assert_eq!(to_csv_string(&hist), "a,op,b,result\n4.0,/,0.0,\n");
    }

    #[test]
    fn test_read_ignores_stored_result() {
        let data = "a,op,b,result\n2,*,3,999\n";
        let calcs = read_csv(data.as_bytes()).unwrap();
        assert_eq!(calcs, vec![Calculation::new(Operation::Multiply, 2.0, 3.0)]);
        assert_eq!(calcs[0].execute().unwrap(), 6.0);
    }

    #[test]
    fn test_read_without_result_column() {
        let data = "op,a,b\n-, 10 , 4\n";
        let calcs = read_csv(data.as_bytes()).unwrap();
        assert_eq!(calcs, vec![calc("-", 10.0, 4.0)]);
    }

    #[test]
    fn test_read_unknown_symbol() {
        let data = "a,op,b,result\n1,+,1,2\n1,%,1,0\n";
        let err = read_csv(data.as_bytes()).unwrap_err();
        assert!(matches!(err, CalcError::Persistence(_)));
        assert!(err.to_string().contains("line 3"));
        assert!(err.to_string().contains("Unknown operation: %"));
    }

    #[test]
    fn test_read_bad_number() {
        let data = "a,op,b,result\nabc,+,1,2\n";
        let err = read_csv(data.as_bytes()).unwrap_err();
        assert!(matches!(err, CalcError::Persistence(_)));
    }

    #[test]
    fn test_read_missing_column() {
        let data = "a,b,result\n1,2,3\n";
        let err = read_csv(data.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("missing column 'op'"));
    }
}
