use crate::corpus::TokenCorpus;
use crate::types::{TermId, TermPair};
use rustc_hash::FxHashMap;
use tracing::debug;

/// Raw co-occurrence tallies for one granularity.
///
/// `occurrence[t]` counts units containing `t`, `cooccurrence[p]` counts units
/// containing both terms of `p`, and `unit_count` is the total number of units
/// observed (documents, windows, or token positions). For the symmetric
/// granularities pairs are keyed in canonical orientation; bigram pairs are
/// directional.
#[derive(Clone, Debug, Default)]
pub(crate) struct CooccurrenceCounts {
    pub(crate) unit_count: u64,
    pub(crate) occurrence: FxHashMap<TermId, u64>,
    pub(crate) cooccurrence: FxHashMap<TermPair, u64>,
}

impl CooccurrenceCounts {
    /// Counts one unit: each distinct term once, each distinct unordered pair
    /// once. `scratch` is reused across calls to avoid reallocation in the
    /// per-window hot path.
    fn add_unit(&mut self, tokens: &[TermId], scratch: &mut Vec<TermId>) {
        self.unit_count += 1;

        scratch.clear();
        scratch.extend_from_slice(tokens);
        scratch.sort_unstable();
        scratch.dedup();

        for &term in scratch.iter() {
            *self.occurrence.entry(term).or_insert(0) += 1;
        }
        for (ix, &left) in scratch.iter().enumerate() {
            for &right in &scratch[ix + 1..] {
                *self
                    .cooccurrence
                    .entry(TermPair::new(left, right))
                    .or_insert(0) += 1;
            }
        }
    }

    pub(crate) fn from_documents(corpus: &TokenCorpus) -> Self {
        let mut counts = Self::default();
        let mut scratch = Vec::new();
        for doc in corpus.documents() {
            debug!(doc = %doc.id, tokens = doc.tokens.len(), "document unit");
            counts.add_unit(&doc.tokens, &mut scratch);
        }
        counts
    }

    /// Overlapping windows of width up to `2 * window_size`, centered at every
    /// index from `-window_size` through `len + window_size - 1` so boundary
    /// tokens participate in partial windows. Empty boundary windows still
    /// count as units; a document of length L contributes exactly L + 2W
    /// windows.
    pub(crate) fn from_windows(corpus: &TokenCorpus, window_size: usize) -> Self {
        let mut counts = Self::default();
        let mut scratch = Vec::new();
        let w = window_size as isize;
        for doc in corpus.documents() {
            let len = doc.tokens.len() as isize;
            for index in -w..len + w {
                let a = (index - w).max(0) as usize;
                let b = (index + w).min(len) as usize;
                counts.add_unit(&doc.tokens[a..b], &mut scratch);
            }
        }
        counts
    }

    /// Directional adjacent-token pairs. Occurrence counts are per-token
    /// (unigram frequency) rather than per-unit, and the unit total is the
    /// corpus token count.
    pub(crate) fn from_bigrams(corpus: &TokenCorpus) -> Self {
        let mut counts = Self::default();
        for doc in corpus.documents() {
            counts.unit_count += doc.tokens.len() as u64;
            for &token in &doc.tokens {
                *counts.occurrence.entry(token).or_insert(0) += 1;
            }
            for pair in doc.tokens.windows(2) {
                *counts
                    .cooccurrence
                    .entry(TermPair::new(pair[0], pair[1]))
                    .or_insert(0) += 1;
            }
        }
        counts
    }
}
