//! The trained HMM: transition matrix A, emission matrix B and the label
//! indices used to build them.

use crate::error::{HmmError, Result};
use crate::labels::{Label, LabelIndex};
use crate::utils::is_zero_row;

/// Discrete HMM with dense probability matrices.
///
/// Rows of `A`/`B` belonging to states never seen as a transition source (or
/// emitter) are all zero. Such rows are dead ends; see
/// [`Model::is_transition_dead_end`].
#[derive(Clone, Debug, PartialEq)]
pub struct Model {
    /// A[from][to], N x N.
    transitions: Vec<Vec<f64>>,
    /// B[state][symbol], N x M.
    emissions: Vec<Vec<f64>>,
    states: LabelIndex,
    observables: LabelIndex,
}

impl Model {
    pub(crate) fn from_parts(
        transitions: Vec<Vec<f64>>,
        emissions: Vec<Vec<f64>>,
        states: LabelIndex,
        observables: LabelIndex,
    ) -> Self {
        debug_assert_eq!(transitions.len(), states.len());
        debug_assert_eq!(emissions.len(), states.len());
        Self {
            transitions,
            emissions,
            states,
            observables,
        }
    }

    /// Build a model from bare matrices, e.g. ones read back from disk.
    ///
    /// Labels are taken to be the indices themselves.
    ///
    /// # Errors
    /// `HmmError::Shape` if `a` is not N x N, `b` does not have N rows, or
    /// the rows of `b` differ in width.
    pub fn from_matrices(a: Vec<Vec<f64>>, b: Vec<Vec<f64>>) -> Result<Self> {
        let n = a.len();
        validate_shapes(&a, &b)?;
        let m = b.first().map_or(0, Vec::len);
        Ok(Self {
            transitions: a,
            emissions: b,
            states: LabelIndex::identity(n),
            observables: LabelIndex::identity(m),
        })
    }

    pub fn transitions(&self) -> &[Vec<f64>] {
        &self.transitions
    }

    pub fn emissions(&self) -> &[Vec<f64>] {
        &self.emissions
    }

    pub fn states(&self) -> &LabelIndex {
        &self.states
    }

    pub fn observables(&self) -> &LabelIndex {
        &self.observables
    }

    /// N
    pub fn n_states(&self) -> usize {
        self.transitions.len()
    }

    /// M
    pub fn n_observables(&self) -> usize {
        self.emissions.first().map_or(0, Vec::len)
    }

    /// True if `state` has no outgoing transition mass (row of A is all zero).
    pub fn is_transition_dead_end(&self, state: usize) -> bool {
        self.transitions.get(state).map_or(true, |r| is_zero_row(r))
    }

    /// True if `state` never emitted anything in training (row of B is all zero).
    pub fn is_emission_dead_end(&self, state: usize) -> bool {
        self.emissions.get(state).map_or(true, |r| is_zero_row(r))
    }

    /// Map raw observable labels to column indices of B.
    ///
    /// # Errors
    /// `HmmError::UnknownLabel` for a label the model was not trained on.
    pub fn encode_observations(&self, raw: &[Label]) -> Result<Vec<usize>> {
        raw.iter()
            .map(|&l| {
                self.observables
                    .index_of(l)
                    .ok_or(HmmError::UnknownLabel(l))
            })
            .collect()
    }

    /// Map a decoded state-index path back to raw state labels.
    ///
    /// # Errors
    /// `HmmError::UnknownState` for an index outside `0..N`.
    pub fn decode_states(&self, path: &[usize]) -> Result<Vec<Label>> {
        path.iter()
            .map(|&s| {
                self.states.label(s).ok_or(HmmError::UnknownState {
                    index: s,
                    len: self.states.len(),
                })
            })
            .collect()
    }
}

/// Check that `a` is N x N and `b` is N x M for a single M.
pub(crate) fn validate_shapes(a: &[Vec<f64>], b: &[Vec<f64>]) -> Result<()> {
    let n = a.len();
    for (i, row) in a.iter().enumerate() {
        if row.len() != n {
            return Err(HmmError::shape(format!("transition row {i}"), n, row.len()));
        }
    }
    if b.len() != n {
        return Err(HmmError::shape("emission matrix rows", n, b.len()));
    }
    let m = b.first().map_or(0, Vec::len);
    for (i, row) in b.iter().enumerate() {
        if row.len() != m {
            return Err(HmmError::shape(format!("emission row {i}"), m, row.len()));
        }
    }
    Ok(())
}
