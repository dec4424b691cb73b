use crate::types::{Granularity, TermId};

pub type Result<T> = std::result::Result<T, Error>;

/// Failures surfaced by the association estimator.
///
/// Every variant indicates corrupted or mismatched upstream data, not a
/// recoverable runtime condition; callers are expected to abort the run.
/// Absent association entries and over-large output requests are not errors.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("term {term} has a {granularity} cooccurrence entry but no occurrence count")]
    MissingOccurrence {
        granularity: Granularity,
        term: TermId,
    },

    #[error(
        "{granularity} counts violate ordering for pair ({left}, {right}): \
         joint {joint} exceeds occurrence {left_count}/{right_count} or unit total {unit_count}"
    )]
    CountInvariant {
        granularity: Granularity,
        left: TermId,
        right: TermId,
        joint: u64,
        left_count: u64,
        right_count: u64,
        unit_count: u64,
    },

    #[error("no {granularity} units observed; cannot rescale counts")]
    EmptyGranularity { granularity: Granularity },

    #[error("term vocabulary exceeded TermId capacity (u32)")]
    VocabularyOverflow,
}
