//! Arithmetic seam for the Viterbi recurrence.
//!
//! The decoder only needs three things from a score type:
//! - an annihilating `ZERO` meaning "unreachable",
//! - a way to extend a path score by one probability factor,
//! - a [`beats`](PathScore::beats) test to pick the best candidate.
//!
//! [`Probability`] does this with plain products (the reference behaviour);
//! [`LogProbability`] does it with sums of logarithms, which does not
//! underflow on long sequences. Both share the decoder's tie-break rule: a
//! running maximum starts at `ZERO` and only a candidate that beats it
//! replaces it, so zero candidates never win and index 0 is the default.
//! In log space, candidates within a few ulps of each other count as tied,
//! so products that are equal in linear space (`0.3 * 0.8 == 0.6 * 0.4`)
//! still go to the lower index even though their logarithms round apart.

use std::fmt;

/// Score of a partial state path.
pub trait PathScore: Copy + PartialOrd + fmt::Debug + Send + Sync {
    /// Score of an impossible path. Must be absorbing under [`extend`](Self::extend).
    const ZERO: Self;

    /// Lift a raw probability into this score space.
    fn from_probability(p: f64) -> Self;

    /// Score of the path extended by a step of (lifted) probability `factor`.
    fn extend(self, factor: Self) -> Self;

    /// Raw probability represented by this score (may underflow to 0.0).
    fn to_probability(self) -> f64;

    /// True if `self` should replace the running maximum `best`.
    #[inline]
    fn beats(self, best: Self) -> bool {
        self > best
    }

    #[inline]
    #[allow(clippy::neg_cmp_op_on_partial_ord)]
    fn is_zero(self) -> bool {
        !(self > Self::ZERO)
    }
}

/// Path probability in linear space.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct Probability(pub f64);

impl PathScore for Probability {
    const ZERO: Self = Probability(0.0);

    #[inline]
    fn from_probability(p: f64) -> Self {
        Probability(p)
    }

    #[inline]
    fn extend(self, factor: Self) -> Self {
        Probability(self.0 * factor.0)
    }

    #[inline]
    fn to_probability(self) -> f64 {
        self.0
    }
}

impl fmt::Display for Probability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Path probability as a natural logarithm; `-inf` is unreachable.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct LogProbability(pub f64);

impl LogProbability {
    /// Relative margin, in units of `f64::EPSILON`, a log score must clear
    /// to beat another.
    pub const TIE_ULPS: f64 = 16.0;
}

impl PathScore for LogProbability {
    const ZERO: Self = LogProbability(f64::NEG_INFINITY);

    #[inline]
    fn from_probability(p: f64) -> Self {
        if p > 0.0 {
            LogProbability(p.ln())
        } else {
            Self::ZERO
        }
    }

    #[inline]
    fn extend(self, factor: Self) -> Self {
        // -inf + x stays -inf for every finite x
        LogProbability(self.0 + factor.0)
    }

    #[inline]
    fn to_probability(self) -> f64 {
        self.0.exp()
    }

    fn beats(self, best: Self) -> bool {
        if best.0 == f64::NEG_INFINITY || self.0 == f64::NEG_INFINITY {
            return self.0 > best.0;
        }
        let scale = self.0.abs().max(best.0.abs()).max(1.0);
        self.0 - best.0 > Self::TIE_ULPS * f64::EPSILON * scale
    }
}

impl fmt::Display for LogProbability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
