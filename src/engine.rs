//! Reusable Viterbi decoder for one trained model.
//!
//! A [`ViterbiDecoder`] validates the model shape and start distribution once,
//! lifts all probabilities into its score space `S`, and can then decode any
//! number of observation sequences. Each decode owns its own
//! [`ViterbiTable`]; the decoder itself is read-only, so batches can be
//! decoded in parallel (feature `parallel`).

use crate::error::{HmmError, Result};
use crate::model::validate_shapes;
use crate::traits::PathScore;
#[cfg(feature = "tracing")]
use crate::viterbi::PathStatus;
use crate::viterbi::{DecodedPath, ViterbiTable};
#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Viterbi decoder over score space `S`.
///
/// Typical usage:
/// ```
/// use hmm_dp::{DecoderBuilder, LogProbability, Model, StartDistribution};
///
/// let model = Model::from_matrices(
///     vec![vec![0.9, 0.1], vec![0.2, 0.8]],
///     vec![vec![0.8, 0.2], vec![0.3, 0.7]],
/// )
/// .unwrap();
/// let decoder = DecoderBuilder::new(&model)
///     .start(StartDistribution::Explicit(vec![0.6, 0.4]))
///     .build::<LogProbability>()
///     .unwrap();
/// let path = decoder.decode(&[0, 0, 1, 1]).unwrap();
/// assert_eq!(path.states(), &[0, 0, 1, 1]);
/// ```
#[derive(Clone, Debug)]
pub struct ViterbiDecoder<S> {
    n_states: usize,
    n_observables: usize,
    start: Vec<S>,
    /// A[from][to]
    transitions: Vec<Vec<S>>,
    /// B[state][symbol]
    emissions: Vec<Vec<S>>,
}

impl<S: PathScore> ViterbiDecoder<S> {
    /// Validate and lift raw probability matrices.
    ///
    /// # Errors
    /// `HmmError::Shape` if `a` is not N x N, `b` is not N x M, or
    /// `start_probs` does not have N entries.
    pub fn from_matrices(a: &[Vec<f64>], b: &[Vec<f64>], start_probs: &[f64]) -> Result<Self> {
        validate_shapes(a, b)?;
        let n = a.len();
        if start_probs.len() != n {
            return Err(HmmError::shape("start_probs", n, start_probs.len()));
        }
        Ok(Self {
            n_states: n,
            n_observables: b.first().map_or(0, Vec::len),
            start: lift_row(start_probs),
            transitions: a.iter().map(|r| lift_row(r)).collect(),
            emissions: b.iter().map(|r| lift_row(r)).collect(),
        })
    }

    /// N
    pub fn n_states(&self) -> usize {
        self.n_states
    }

    /// M; observations at or above this have zero likelihood.
    pub fn n_observables(&self) -> usize {
        self.n_observables
    }

    /// Fill the full DP table for `observations` without backtracking.
    ///
    /// # Errors
    /// `HmmError::EmptyModel` if the model has no states and `observations`
    /// is non-empty.
    pub fn decode_table(&self, observations: &[usize]) -> Result<ViterbiTable<S>> {
        if self.n_states == 0 && !observations.is_empty() {
            return Err(HmmError::EmptyModel {
                len: observations.len(),
            });
        }
        Ok(ViterbiTable::fill(
            observations,
            &self.transitions,
            &self.emissions,
            &self.start,
        ))
    }

    /// Most likely state path for `observations` (observable indices).
    ///
    /// # Errors
    /// See [`decode_table`](Self::decode_table).
    pub fn decode(&self, observations: &[usize]) -> Result<DecodedPath> {
        #[cfg(feature = "tracing")]
        let span = tracing::debug_span!("viterbi_decode", len = observations.len());
        #[cfg(feature = "tracing")]
        let _enter = span.enter();

        let path = self.decode_table(observations)?.backtrack();

        #[cfg(feature = "tracing")]
        if let PathStatus::DeadEnd { time } = path.status() {
            tracing::warn!(
                time,
                len = observations.len(),
                "every state has zero likelihood (unreachable, or underflow on a long \
                 sequence; decode with LogProbability to rule that out); \
                 path past this point is the tie-break default"
            );
        }

        Ok(path)
    }

    /// Decode many sequences against the same model.
    ///
    /// Results are in input order and identical whether or not the
    /// `parallel` feature is enabled.
    pub fn decode_batch<O>(&self, sequences: &[O]) -> Result<Vec<DecodedPath>>
    where
        O: AsRef<[usize]> + Sync,
    {
        #[cfg(feature = "tracing")]
        let span = tracing::info_span!("viterbi_batch", sequences = sequences.len());
        #[cfg(feature = "tracing")]
        let _enter = span.enter();

        decode_all(self, sequences)
    }
}

#[cfg(feature = "parallel")]
fn decode_all<S, O>(decoder: &ViterbiDecoder<S>, sequences: &[O]) -> Result<Vec<DecodedPath>>
where
    S: PathScore,
    O: AsRef<[usize]> + Sync,
{
    sequences
        .par_iter()
        .map(|obs| decoder.decode(obs.as_ref()))
        .collect()
}

#[cfg(not(feature = "parallel"))]
fn decode_all<S, O>(decoder: &ViterbiDecoder<S>, sequences: &[O]) -> Result<Vec<DecodedPath>>
where
    S: PathScore,
    O: AsRef<[usize]> + Sync,
{
    sequences
        .iter()
        .map(|obs| decoder.decode(obs.as_ref()))
        .collect()
}

fn lift_row<S: PathScore>(row: &[f64]) -> Vec<S> {
    row.iter().map(|&p| S::from_probability(p)).collect()
}
