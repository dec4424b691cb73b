use serde::{Deserialize, Serialize};
use std::fmt;

pub type TermId = u32;

/// Counts are rescaled to this nominal total before the significance gate so
/// the gate is invariant to corpus size.
pub(crate) const MAX_FREQ: f64 = 100.0;
pub(crate) const MIN_RESCALED_FREQ: f64 = 1.0;
pub(crate) const DEFAULT_SLIDING_WINDOW_SIZE: usize = 10;
pub(crate) const DEFAULT_NUM_SERIATED_TERMS: usize = 100;
pub(crate) const DEFAULT_CANDIDATE_POOL_SIZE: usize = 100;
pub(crate) const INITIAL_ENERGY_SCALE: f64 = 0.001;
pub(crate) const PARALLEL_SCORE_THRESHOLD: usize = 500;

/// A directed pair of interned terms.
///
/// Document- and window-granularity counts are stored under the canonical
/// (ascending) orientation; bigram counts and combined association scores are
/// genuinely directional.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct TermPair {
    pub left: TermId,
    pub right: TermId,
}

impl TermPair {
    pub fn new(left: TermId, right: TermId) -> Self {
        Self { left, right }
    }

    pub fn flip(self) -> Self {
        Self {
            left: self.right,
            right: self.left,
        }
    }

    /// Orientation with the smaller id first. Term ids are assigned in sorted
    /// vocabulary order, so this matches lexicographic canonicalization.
    pub fn canonical(self) -> Self {
        if self.left <= self.right {
            self
        } else {
            self.flip()
        }
    }
}

/// The unit of context over which co-occurrence is counted.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Granularity {
    Document,
    SlidingWindow,
    Bigram,
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Granularity::Document => f.write_str("document"),
            Granularity::SlidingWindow => f.write_str("sliding-window"),
            Granularity::Bigram => f.write_str("bigram"),
        }
    }
}
