//! Supervised parameter estimation from fully labeled sequences.
//!
//! Transition and emission probabilities are plain count ratios. There is no
//! smoothing: a state that never appears as a transition source (or emitter)
//! gets an all-zero row.

use std::collections::{BTreeMap, BTreeSet};

use crate::error::{HmmError, Result};
use crate::labels::{Label, LabelIndex};
use crate::model::Model;
use crate::utils::normalize_counts;

/// One fully labeled trajectory: `states[i]` emitted `observations[i]`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TrainingSequence {
    states: Vec<Label>,
    observations: Vec<Label>,
}

impl TrainingSequence {
    /// # Errors
    /// `HmmError::LengthMismatch` if the two lists differ in length.
    pub fn new(states: Vec<Label>, observations: Vec<Label>) -> Result<Self> {
        if states.len() != observations.len() {
            return Err(HmmError::LengthMismatch {
                states: states.len(),
                observations: observations.len(),
            });
        }
        Ok(Self {
            states,
            observations,
        })
    }

    pub fn states(&self) -> &[Label] {
        &self.states
    }

    pub fn observations(&self) -> &[Label] {
        &self.observations
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}

/// `counts[from][to]`, ordered so normalisation is independent of corpus order.
type CountTable = BTreeMap<Label, BTreeMap<Label, u64>>;

#[inline]
fn bump(table: &mut CountTable, row: Label, col: Label) {
    *table.entry(row).or_default().entry(col).or_insert(0) += 1;
}

/// Estimate A and B from a labeled corpus.
///
/// State and observable indices follow ascending raw-label order. Empty and
/// single-element sequences contribute no transitions; empty sequences
/// contribute nothing at all.
pub fn estimate<'a, I>(corpus: I) -> Model
where
    I: IntoIterator<Item = &'a TrainingSequence>,
{
    #[cfg(feature = "tracing")]
    let span = tracing::info_span!("estimate");
    #[cfg(feature = "tracing")]
    let _enter = span.enter();

    let mut transitions = CountTable::new();
    let mut emissions = CountTable::new();
    let mut all_states = BTreeSet::new();
    let mut all_observables = BTreeSet::new();
    let mut n_sequences = 0usize;

    for seq in corpus {
        n_sequences += 1;
        all_states.extend(seq.states.iter().copied());
        all_observables.extend(seq.observations.iter().copied());

        for pair in seq.states.windows(2) {
            bump(&mut transitions, pair[0], pair[1]);
        }
        for (&state, &obs) in seq.states.iter().zip(&seq.observations) {
            bump(&mut emissions, state, obs);
        }
    }

    let states = LabelIndex::from_labels(all_states);
    let observables = LabelIndex::from_labels(all_observables);

    let a = states
        .labels()
        .iter()
        .map(|s| normalize_counts(transitions.get(s), &states))
        .collect::<Vec<_>>();
    let b = states
        .labels()
        .iter()
        .map(|s| normalize_counts(emissions.get(s), &observables))
        .collect::<Vec<_>>();

    #[cfg(feature = "tracing")]
    tracing::debug!(
        sequences = n_sequences,
        n_states = states.len(),
        n_observables = observables.len(),
        "estimated model"
    );
    #[cfg(not(feature = "tracing"))]
    let _ = n_sequences;

    Model::from_parts(a, b, states, observables)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seq(states: &[Label], obs: &[Label]) -> TrainingSequence {
        TrainingSequence::new(states.to_vec(), obs.to_vec()).unwrap()
    }

    #[test]
    fn rejects_mismatched_lengths() {
        let err = TrainingSequence::new(vec![0, 1], vec![0]).unwrap_err();
        assert!(matches!(
            err,
            HmmError::LengthMismatch {
                states: 2,
                observations: 1
            }
        ));
    }

    #[test]
    fn two_sequence_corpus() {
        let corpus = vec![seq(&[0, 1, 2], &[0, 1, 0]), seq(&[0, 1, 1], &[0, 0, 1])];
        let model = estimate(&corpus);

        assert_eq!(model.states().labels(), &[0, 1, 2]);
        assert_eq!(model.observables().labels(), &[0, 1]);

        // 0->1 twice; 1->2 once, 1->1 once; nothing leaves 2.
        assert_eq!(model.transitions()[0], vec![0.0, 1.0, 0.0]);
        assert_eq!(model.transitions()[1], vec![0.0, 0.5, 0.5]);
        assert_eq!(model.transitions()[2], vec![0.0, 0.0, 0.0]);

        // 0 emits 0 twice; 1 emits 1,0,1; 2 emits 0.
        assert_eq!(model.emissions()[0], vec![1.0, 0.0]);
        assert!((model.emissions()[1][0] - 1.0 / 3.0).abs() < 1e-12);
        assert!((model.emissions()[1][1] - 2.0 / 3.0).abs() < 1e-12);
        assert_eq!(model.emissions()[2], vec![1.0, 0.0]);
        assert!(model.is_transition_dead_end(2));
    }

    #[test]
    fn short_sequences_contribute_no_transitions() {
        let corpus = vec![seq(&[5], &[9]), seq(&[], &[])];
        let model = estimate(&corpus);
        assert_eq!(model.n_states(), 1);
        assert_eq!(model.transitions(), &[vec![0.0]]);
        assert_eq!(model.emissions(), &[vec![1.0]]);
    }

    #[test]
    fn empty_corpus_gives_empty_model() {
        let model = estimate(&Vec::<TrainingSequence>::new());
        assert_eq!(model.n_states(), 0);
        assert_eq!(model.n_observables(), 0);
    }

    #[test]
    fn sparse_labels_are_compacted() {
        let corpus = vec![seq(&[30, 10, 30], &[-4, 7, 7])];
        let model = estimate(&corpus);
        assert_eq!(model.states().labels(), &[10, 30]);
        assert_eq!(model.observables().labels(), &[-4, 7]);
        // 30->10, 10->30
        assert_eq!(model.transitions()[0], vec![0.0, 1.0]);
        assert_eq!(model.transitions()[1], vec![1.0, 0.0]);
        // 10 emits 7; 30 emits -4 and 7
        assert_eq!(model.emissions()[0], vec![0.0, 1.0]);
        assert_eq!(model.emissions()[1], vec![0.5, 0.5]);
    }
}
