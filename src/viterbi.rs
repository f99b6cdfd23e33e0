//! First-order Viterbi decoding over a full N x T table.
//!
//! The sweep is `Init -> Recur(1) .. Recur(T-1) -> Terminate -> Backtrack`.
//! Every maximisation scans states in index order with a running maximum
//! that starts at [`PathScore::ZERO`] and is only replaced by a candidate
//! that [beats](PathScore::beats) it. Ties therefore go to the lowest index,
//! and a column in which every candidate is zero resolves to state 0.

use crate::error::Result;
use crate::engine::ViterbiDecoder;
use crate::traits::{PathScore, Probability};

/// Whether the best path has non-zero likelihood.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PathStatus {
    /// Some path explains every observation with non-zero likelihood.
    Reachable,
    /// From `time` on, every state has zero likelihood; the path from there
    /// is the tie-break default and carries no information. In
    /// [`Probability`] space this also happens when a long sequence
    /// underflows; [`LogProbability`](crate::traits::LogProbability) does not.
    DeadEnd { time: usize },
}

/// Most likely state path, one state index per observation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecodedPath {
    states: Vec<usize>,
    status: PathStatus,
}

impl DecodedPath {
    pub(crate) fn empty() -> Self {
        Self {
            states: Vec::new(),
            status: PathStatus::Reachable,
        }
    }

    pub fn states(&self) -> &[usize] {
        &self.states
    }

    pub fn into_states(self) -> Vec<usize> {
        self.states
    }

    pub fn status(&self) -> PathStatus {
        self.status
    }

    pub fn is_reachable(&self) -> bool {
        self.status == PathStatus::Reachable
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}

impl From<DecodedPath> for Vec<usize> {
    fn from(path: DecodedPath) -> Self {
        path.states
    }
}

/// Per-decode DP table: `prob[state][t]` and `backpointer[state][t]`.
#[derive(Clone, Debug)]
pub struct ViterbiTable<S> {
    prob: Vec<Vec<S>>,
    backpointer: Vec<Vec<usize>>,
    /// First column in which every state scored zero.
    dead_from: Option<usize>,
}

impl<S: PathScore> ViterbiTable<S> {
    /// Fill the table for `observations`.
    ///
    /// Callers guarantee `a` is N x N, `b` has N rows, `start.len() == N`,
    /// and N > 0 whenever `observations` is non-empty.
    pub(crate) fn fill(observations: &[usize], a: &[Vec<S>], b: &[Vec<S>], start: &[S]) -> Self {
        let n = a.len();
        let t_len = observations.len();
        let mut prob = vec![vec![S::ZERO; t_len]; n];
        let mut backpointer = vec![vec![0usize; t_len]; n];
        let mut dead_from = None;

        if t_len == 0 {
            return Self {
                prob,
                backpointer,
                dead_from,
            };
        }

        // Init
        let o0 = observations[0];
        for s in 0..n {
            prob[s][0] = match b[s].get(o0) {
                Some(&emit) => start[s].extend(emit),
                None => S::ZERO,
            };
        }
        if (0..n).all(|s| prob[s][0].is_zero()) {
            dead_from = Some(0);
        }

        // Recur
        for t in 1..t_len {
            let ot = observations[t];
            for s in 0..n {
                let mut best = S::ZERO;
                let mut arg = 0;
                for (prev, row) in a.iter().enumerate() {
                    let cand = prob[prev][t - 1].extend(row[s]);
                    if cand.beats(best) {
                        best = cand;
                        arg = prev;
                    }
                }
                prob[s][t] = match b[s].get(ot) {
                    Some(&emit) => best.extend(emit),
                    None => S::ZERO,
                };
                backpointer[s][t] = arg;
            }
            if dead_from.is_none() && (0..n).all(|s| prob[s][t].is_zero()) {
                dead_from = Some(t);
            }
        }

        Self {
            prob,
            backpointer,
            dead_from,
        }
    }

    /// Number of states N.
    pub fn n_states(&self) -> usize {
        self.prob.len()
    }

    /// Number of time steps T.
    pub fn len(&self) -> usize {
        self.prob.first().map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Best score of a path ending in `state` at time `t`.
    pub fn score(&self, state: usize, t: usize) -> Option<S> {
        self.prob.get(state)?.get(t).copied()
    }

    /// Predecessor of `state` at time `t` on its best path (0 at `t == 0`).
    pub fn backpointer(&self, state: usize, t: usize) -> Option<usize> {
        self.backpointer.get(state)?.get(t).copied()
    }

    /// Terminate: the best final state and its score, first maximum wins.
    ///
    /// `None` for an empty table.
    pub fn best_final(&self) -> Option<(usize, S)> {
        let last = self.len().checked_sub(1)?;
        let mut best = S::ZERO;
        let mut best_state = 0;
        for (s, row) in self.prob.iter().enumerate() {
            if row[last].beats(best) {
                best = row[last];
                best_state = s;
            }
        }
        Some((best_state, best))
    }

    /// Follow backpointers from the best final state.
    pub fn backtrack(&self) -> DecodedPath {
        let Some((best_final, _)) = self.best_final() else {
            return DecodedPath::empty();
        };
        let t_len = self.len();
        let mut states = vec![0usize; t_len];
        states[t_len - 1] = best_final;
        for t in (0..t_len - 1).rev() {
            states[t] = self.backpointer[states[t + 1]][t + 1];
        }
        let status = match self.dead_from {
            Some(time) => PathStatus::DeadEnd { time },
            None => PathStatus::Reachable,
        };
        DecodedPath { states, status }
    }
}

/// Decode `observations` (observable indices, not raw labels) against raw
/// probability matrices in linear space.
///
/// Observations outside `0..M` have zero likelihood at their time step; they
/// are not an error. An empty observation sequence yields an empty path.
///
/// # Errors
/// `HmmError::Shape` if `a`, `b` and `start_probs` disagree on N or a row has
/// the wrong width; `HmmError::EmptyModel` if N is 0 and there is something
/// to decode.
///
/// ```
/// use hmm_dp::viterbi::decode;
///
/// let a = vec![vec![0.9, 0.1], vec![0.2, 0.8]];
/// let b = vec![vec![0.8, 0.2], vec![0.3, 0.7]];
/// let path = decode(&[0, 0, 1, 1], &a, &b, &[0.6, 0.4]).unwrap();
/// assert_eq!(path.states(), &[0, 0, 1, 1]);
/// ```
pub fn decode(
    observations: &[usize],
    a: &[Vec<f64>],
    b: &[Vec<f64>],
    start_probs: &[f64],
) -> Result<DecodedPath> {
    ViterbiDecoder::<Probability>::from_matrices(a, b, start_probs)?.decode(observations)
}
