//! Decode request files and result formatting.
//!
//! ```text
//! 1          <- dataset number
//! 2          <- number of test cases
//! 3          <- observation count of case 1
//! 0 1 1      <- observation indices of case 1
//! 1
//! 0
//! ```
//!
//! Blank lines are ignored. A file that runs out of lines early keeps the
//! cases read so far.

use std::fs;
use std::path::Path;

use super::{parse_single, parse_tokens};
use crate::engine::ViterbiDecoder;
use crate::error::{HmmError, Result};
use crate::traits::PathScore;

/// One observation sequence to decode.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecodeCase {
    /// Count given in the file; may disagree with `observations.len()`.
    pub declared_len: usize,
    /// Observable indices as written; negative or too-large values are
    /// handled by [`ReportPolicy::prepare`].
    pub observations: Vec<i64>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecodeRequests {
    /// Which trained dataset the cases belong to.
    pub dataset: u32,
    /// Number of cases the header announced.
    pub declared_cases: usize,
    pub cases: Vec<DecodeCase>,
}

impl DecodeRequests {
    /// True if the file ended before every announced case was read.
    pub fn is_truncated(&self) -> bool {
        self.cases.len() < self.declared_cases
    }
}

/// Parse a request file.
///
/// # Errors
/// `HmmError::Parse` if the two header lines are missing or not integers, or
/// a case line holds something other than integers.
pub fn parse_requests(text: &str) -> Result<DecodeRequests> {
    let lines: Vec<(usize, &str)> = text
        .lines()
        .enumerate()
        .filter(|(_, l)| !l.trim().is_empty())
        .map(|(i, l)| (i + 1, l))
        .collect();

    let (dataset_line, dataset_text) = *lines
        .first()
        .ok_or_else(|| HmmError::parse(1, "missing dataset number"))?;
    let dataset: u32 = parse_single(dataset_text, dataset_line)?;
    let (count_line, count_text) = *lines
        .get(1)
        .ok_or_else(|| HmmError::parse(dataset_line + 1, "missing test case count"))?;
    let declared_cases: usize = parse_single(count_text, count_line)?;

    let mut cases = Vec::with_capacity(declared_cases);
    let mut rest = lines[2..].chunks(2);
    for case in 0..declared_cases {
        let Some(&[(len_line, len_text), (obs_line, obs_text)]) = rest.next() else {
            #[cfg(feature = "tracing")]
            tracing::warn!(
                case = case + 1,
                declared = declared_cases,
                "request file ends before all test cases were read"
            );
            #[cfg(not(feature = "tracing"))]
            let _ = case;
            break;
        };
        let declared_len: usize = parse_single(len_text, len_line)?;
        let observations: Vec<i64> = parse_tokens(obs_text, obs_line)?;
        #[cfg(feature = "tracing")]
        if observations.len() != declared_len {
            tracing::warn!(
                case = case + 1,
                declared = declared_len,
                found = observations.len(),
                "observation count disagrees with the declared length"
            );
        }
        cases.push(DecodeCase {
            declared_len,
            observations,
        });
    }

    Ok(DecodeRequests {
        dataset,
        declared_cases,
        cases,
    })
}

/// Read and parse a request file.
pub fn read_requests(path: impl AsRef<Path>) -> Result<DecodeRequests> {
    let text = fs::read_to_string(path)?;
    parse_requests(&text)
}

/// How observations are cleaned before decoding and how paths are reported.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReportPolicy {
    /// Remove negative observations and observations `>= M` instead of
    /// decoding them as zero likelihood.
    pub drop_out_of_range: bool,
    /// Treat state 0 as a start marker and strip it from the front of a path.
    pub drop_leading_start: bool,
}

impl Default for ReportPolicy {
    fn default() -> Self {
        Self {
            drop_out_of_range: true,
            drop_leading_start: true,
        }
    }
}

impl ReportPolicy {
    /// Observations that will actually be decoded.
    ///
    /// When out-of-range symbols are kept, negative ones become `usize::MAX`
    /// so the decoder gives them zero likelihood like any symbol `>= M`.
    pub fn prepare(&self, observations: &[i64], n_observables: usize) -> Vec<usize> {
        if !self.drop_out_of_range {
            return observations
                .iter()
                .map(|&o| usize::try_from(o).unwrap_or(usize::MAX))
                .collect();
        }
        let kept: Vec<usize> = observations
            .iter()
            .filter_map(|&o| usize::try_from(o).ok())
            .filter(|&o| o < n_observables)
            .collect();
        #[cfg(feature = "tracing")]
        if kept.len() != observations.len() {
            tracing::warn!(
                dropped = observations.len() - kept.len(),
                max_allowed = n_observables.saturating_sub(1),
                "dropping out-of-range observations"
            );
        }
        kept
    }

    /// Render a decoded path as one output line.
    ///
    /// An empty path is an empty line. When the leading start state is
    /// stripped and nothing is left, the line is `0`.
    pub fn format_path(&self, path: &[usize]) -> String {
        if path.is_empty() {
            return String::new();
        }
        let shown = match path {
            [0, rest @ ..] if self.drop_leading_start => rest,
            _ => path,
        };
        if shown.is_empty() {
            return "0".to_string();
        }
        shown
            .iter()
            .map(usize::to_string)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Decode every case and format one result line per case.
pub fn answer_requests<S: PathScore>(
    decoder: &ViterbiDecoder<S>,
    requests: &DecodeRequests,
    policy: ReportPolicy,
) -> Result<Vec<String>> {
    let prepared: Vec<Vec<usize>> = requests
        .cases
        .iter()
        .map(|c| policy.prepare(&c.observations, decoder.n_observables()))
        .collect();
    let paths = decoder.decode_batch(&prepared)?;
    Ok(paths
        .iter()
        .map(|p| policy.format_path(p.states()))
        .collect())
}
