//! Raw labels and their dense index mapping.
//!
//! Raw state and observable labels are arbitrary integers. A [`LabelIndex`]
//! maps the sorted set of labels seen in a corpus onto `0..K` so the model
//! can be stored as dense matrices.

use std::collections::{BTreeMap, BTreeSet};

/// An integer identifier for a state or observable symbol as it appears in
/// raw input. Labels need not be contiguous or zero-based.
pub type Label = i64;

/// Bijection between sorted raw labels and contiguous indices `0..K`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LabelIndex {
    /// Labels in ascending order; position is the index.
    labels: Vec<Label>,
    positions: BTreeMap<Label, usize>,
}

impl LabelIndex {
    /// Build an index from any collection of labels. Duplicates are merged and
    /// indices follow ascending numeric order.
    pub fn from_labels<I>(labels: I) -> Self
    where
        I: IntoIterator<Item = Label>,
    {
        let sorted: BTreeSet<Label> = labels.into_iter().collect();
        let labels: Vec<Label> = sorted.into_iter().collect();
        let positions = labels.iter().enumerate().map(|(i, &l)| (l, i)).collect();
        Self { labels, positions }
    }

    /// Labels `0..k`, each mapped to itself.
    pub fn identity(k: usize) -> Self {
        Self::from_labels((0..k).map(|i| i as Label))
    }

    #[inline]
    pub fn index_of(&self, label: Label) -> Option<usize> {
        self.positions.get(&label).copied()
    }

    #[inline]
    pub fn label(&self, index: usize) -> Option<Label> {
        self.labels.get(index).copied()
    }

    /// All labels in index order.
    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}
