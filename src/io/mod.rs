//! Plain-text formats around the core: training corpora, persisted
//! matrices and decode request files.
//!
//! - [`corpus`]   : labeled training sequences, two lines per sequence.
//! - [`matrices`] : A then B, one whitespace-separated row per line.
//! - [`requests`] : batches of observation sequences and result formatting.

pub mod corpus;
pub mod matrices;
pub mod requests;

use crate::error::{HmmError, Result};
use std::str::FromStr;

/// Parse every whitespace-separated token on `line` (1-based `line_no`).
pub(crate) fn parse_tokens<T>(line: &str, line_no: usize) -> Result<Vec<T>>
where
    T: FromStr,
{
    line.split_whitespace()
        .map(|tok| {
            tok.parse::<T>().map_err(|_| {
                HmmError::parse(
                    line_no,
                    format!("expected {}, found `{tok}`", std::any::type_name::<T>()),
                )
            })
        })
        .collect()
}

/// Parse a line holding exactly one value.
pub(crate) fn parse_single<T>(line: &str, line_no: usize) -> Result<T>
where
    T: FromStr,
{
    let mut values = parse_tokens::<T>(line, line_no)?;
    if values.len() != 1 {
        return Err(HmmError::parse(
            line_no,
            format!("expected a single value, found {} tokens", values.len()),
        ));
    }
    Ok(values.remove(0))
}
