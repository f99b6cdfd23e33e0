//! Model persistence: A rows, then B rows, one row per line.
//!
//! Zero is written as a bare `0`; other values with ten decimals and the
//! trailing zeros (and a dangling `.`) removed. Reading skips blank lines and
//! splits the remaining lines in half: the first N are A, the last N are B.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use super::parse_tokens;
use crate::error::{HmmError, Result};
use crate::model::Model;

/// Render one probability the way the matrix files store it.
pub fn format_probability(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    let fixed = format!("{value:.10}");
    fixed.trim_end_matches('0').trim_end_matches('.').to_string()
}

fn format_row(row: &[f64]) -> String {
    row.iter()
        .map(|&v| format_probability(v))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Write A then B.
pub fn write_matrices<W: Write>(model: &Model, mut out: W) -> io::Result<()> {
    for row in model.transitions().iter().chain(model.emissions()) {
        writeln!(out, "{}", format_row(row))?;
    }
    out.flush()
}

/// Write A then B to `path`, replacing any existing file.
pub fn save_matrices(model: &Model, path: impl AsRef<Path>) -> Result<()> {
    let file = fs::File::create(path)?;
    write_matrices(model, io::BufWriter::new(file))?;
    Ok(())
}

/// Parse the textual layout back into a [`Model`] with identity labels.
///
/// # Errors
/// `HmmError::Parse` for non-numeric tokens or an odd number of rows;
/// `HmmError::Shape` if the halves do not form N x N and N x M matrices.
pub fn parse_matrices(text: &str) -> Result<Model> {
    let mut rows = Vec::new();
    for (i, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        rows.push(parse_tokens::<f64>(line, i + 1)?);
    }
    if rows.len() % 2 != 0 {
        return Err(HmmError::parse(
            text.lines().count(),
            format!("expected an even number of matrix rows, found {}", rows.len()),
        ));
    }
    let n = rows.len() / 2;
    let b = rows.split_off(n);
    Model::from_matrices(rows, b)
}

/// Read a matrices file written by [`save_matrices`].
pub fn load_matrices(path: impl AsRef<Path>) -> Result<Model> {
    let text = fs::read_to_string(path)?;
    parse_matrices(&text)
}
