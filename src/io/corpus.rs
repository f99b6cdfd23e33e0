//! Training corpus text format.
//!
//! ```text
//! 2
//! 0 1 2
//! 0 1 0
//! 0 1 1
//! 0 0 1
//! ```
//!
//! The first line is the number of sequences; each sequence is a line of
//! state labels followed by a line of observation labels. A blank pair is an
//! empty sequence.

use std::fs;
use std::path::Path;

use super::{parse_single, parse_tokens};
use crate::error::{HmmError, Result};
use crate::estimator::TrainingSequence;
use crate::labels::Label;

/// Parse a corpus from text.
///
/// # Errors
/// `HmmError::Parse` for a bad header, missing lines or non-integer labels;
/// `HmmError::LengthMismatch` for a sequence whose two lines differ in length.
pub fn parse_corpus(text: &str) -> Result<Vec<TrainingSequence>> {
    let lines: Vec<&str> = text.lines().collect();
    let header = lines
        .first()
        .ok_or_else(|| HmmError::parse(1, "missing sequence count"))?;
    let count: usize = parse_single(header, 1)?;

    let mut corpus = Vec::with_capacity(count);
    for k in 0..count {
        let states_idx = 1 + 2 * k;
        let obs_idx = states_idx + 1;
        let (Some(states_line), Some(obs_line)) = (lines.get(states_idx), lines.get(obs_idx))
        else {
            return Err(HmmError::parse(
                lines.len() + 1,
                format!("corpus declares {count} sequences but ends inside sequence {}", k + 1),
            ));
        };
        let states: Vec<Label> = parse_tokens(states_line, states_idx + 1)?;
        let observations: Vec<Label> = parse_tokens(obs_line, obs_idx + 1)?;
        corpus.push(TrainingSequence::new(states, observations)?);
    }
    Ok(corpus)
}

/// Read and parse a corpus file.
pub fn read_corpus(path: impl AsRef<Path>) -> Result<Vec<TrainingSequence>> {
    let text = fs::read_to_string(path)?;
    parse_corpus(&text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_pairs() {
        let corpus = parse_corpus("2\n0 1 2\n0 1 0\n0 1 1\n0 0 1\n").unwrap();
        assert_eq!(corpus.len(), 2);
        assert_eq!(corpus[0].states(), &[0, 1, 2]);
        assert_eq!(corpus[1].observations(), &[0, 0, 1]);
    }

    #[test]
    fn blank_pair_is_an_empty_sequence() {
        let corpus = parse_corpus("2\n\n\n4 4\n1 2").unwrap();
        assert!(corpus[0].is_empty());
        assert_eq!(corpus[1].len(), 2);
    }

    #[test]
    fn truncated_corpus_is_rejected() {
        let err = parse_corpus("2\n0 1\n1 1\n0\n").unwrap_err();
        assert!(matches!(err, HmmError::Parse { .. }));
        assert!(parse_corpus("").is_err());
    }

    #[test]
    fn mismatched_pair_is_rejected() {
        let err = parse_corpus("1\n0 1 2\n0 1\n").unwrap_err();
        assert!(matches!(
            err,
            HmmError::LengthMismatch {
                states: 3,
                observations: 2
            }
        ));
    }

    #[test]
    fn bad_token_reports_line() {
        let err = parse_corpus("1\n0 1\n0 q\n").unwrap_err();
        assert!(matches!(err, HmmError::Parse { line: 3, .. }));
    }
}
