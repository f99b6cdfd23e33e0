//! Assorted utilities and helpers.

use std::collections::BTreeMap;

use crate::labels::{Label, LabelIndex};

/// Turn one row of counts into a probability row of width `index.len()`.
///
/// Each count is divided by the row total. A row with no counts stays
/// all-zero: it is a dead end, not a uniform distribution.
pub fn normalize_counts(counts: Option<&BTreeMap<Label, u64>>, index: &LabelIndex) -> Vec<f64> {
    let mut row = vec![0.0; index.len()];
    let Some(counts) = counts else {
        return row;
    };
    let total: u64 = counts.values().sum();
    if total == 0 {
        return row;
    }
    for (&label, &count) in counts {
        if let Some(col) = index.index_of(label) {
            row[col] = count as f64 / total as f64;
        }
    }
    row
}

/// Sum of a probability row.
#[inline]
pub fn row_sum(row: &[f64]) -> f64 {
    row.iter().sum()
}

/// True if every entry of `row` is exactly zero.
#[inline]
pub fn is_zero_row(row: &[f64]) -> bool {
    row.iter().all(|&p| p == 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_row_is_all_zero() {
        let idx = LabelIndex::identity(3);
        assert_eq!(normalize_counts(None, &idx), vec![0.0; 3]);
        assert!(is_zero_row(&normalize_counts(None, &idx)));
    }

    #[test]
    fn counts_become_ratios() {
        let idx = LabelIndex::from_labels([1, 4, 9]);
        let counts = BTreeMap::from([(1, 1u64), (9, 3u64)]);
        let row = normalize_counts(Some(&counts), &idx);
        assert_eq!(row, vec![0.25, 0.0, 0.75]);
        assert!((row_sum(&row) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn empty_counts_stay_zero() {
        let idx = LabelIndex::identity(2);
        let counts = BTreeMap::new();
        assert_eq!(normalize_counts(Some(&counts), &idx), vec![0.0, 0.0]);
    }
}
