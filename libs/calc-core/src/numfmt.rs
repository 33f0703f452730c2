//! Number formatting for history lines and CSV output
//!
//! Uses `ryu` for the shortest representation that round-trips, which always keeps
//! a decimal point or exponent for whole numbers (`5.0`, `1e16`).

/// Format an f64 for display
///
/// Exponents are written without sign padding: `1e16`, `1e-7`. Values down to
/// `0.00001` stay in positional form.
#[inline]
pub fn format_number(n: f64) -> String {
    let mut buffer = ryu::Buffer::new();
    buffer.format(n).to_owned()
}
