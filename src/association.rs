use crate::cooccurrence::CooccurrenceCounts;
use crate::corpus::TokenCorpus;
use crate::error::Result;
use crate::scoring::g2_scores;
use crate::types::{Granularity, TermId, TermPair, DEFAULT_SLIDING_WINDOW_SIZE};
use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Combined association scores, keyed by directed term pair.
///
/// A pair is present only if its combined score is strictly positive. Both
/// directions of a pair carry the document- and window-granularity
/// contributions; the bigram contribution is added only to the observed
/// direction. Built once per run, read-only thereafter.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct AssociationMap {
    scores: FxHashMap<TermPair, f64>,
}

impl AssociationMap {
    pub(crate) fn from_scores(scores: FxHashMap<TermPair, f64>) -> Self {
        Self { scores }
    }

    /// Association strength of the directed pair, 0 when unobserved. Absence
    /// is never an error.
    pub fn score(&self, left: TermId, right: TermId) -> f64 {
        self.scores
            .get(&TermPair::new(left, right))
            .copied()
            .unwrap_or(0.0)
    }

    pub fn get(&self, pair: TermPair) -> Option<f64> {
        self.scores.get(&pair).copied()
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (TermPair, f64)> + '_ {
        self.scores.iter().map(|(pair, score)| (*pair, *score))
    }
}

/// Computes pairwise term-association strength from raw token sequences.
///
/// Co-occurrence is tallied independently over three context units (whole
/// document, sliding window, adjacent bigram), each scored with the G2
/// log-likelihood statistic and merged into one combined map.
#[derive(Clone, Copy, Debug)]
pub struct AssociationEstimator {
    window_size: usize,
}

impl Default for AssociationEstimator {
    fn default() -> Self {
        Self {
            window_size: DEFAULT_SLIDING_WINDOW_SIZE,
        }
    }
}

impl AssociationEstimator {
    pub fn new(window_size: usize) -> Self {
        Self { window_size }
    }

    pub fn estimate(&self, corpus: &TokenCorpus) -> Result<AssociationMap> {
        info!(
            documents = corpus.document_count(),
            window_size = self.window_size,
            "computing term associations"
        );

        // The three granularity passes are independent; merge happens after.
        let (document, (window, bigram)) = rayon::join(
            || CooccurrenceCounts::from_documents(corpus),
            || {
                rayon::join(
                    || CooccurrenceCounts::from_windows(corpus, self.window_size),
                    || CooccurrenceCounts::from_bigrams(corpus),
                )
            },
        );

        debug!(
            documents = document.unit_count,
            windows = window.unit_count,
            tokens = bigram.unit_count,
            "co-occurrence units counted"
        );

        let document_g2 = g2_scores(Granularity::Document, &document)?;
        let window_g2 = g2_scores(Granularity::SlidingWindow, &window)?;
        let bigram_g2 = g2_scores(Granularity::Bigram, &bigram)?;

        let combined = combine(&document_g2, &window_g2, &bigram_g2);
        info!(pairs = combined.scores.len(), "combined association map built");
        Ok(combined)
    }
}

/// Merges the three per-granularity score maps into the combined map.
///
/// Every directed key derived from the symmetric maps (both orientations) and
/// every directional bigram key is queued; each directed key is processed
/// exactly once, summing the canonical-key symmetric contributions with the
/// direction-matched bigram contribution. Non-positive sums are dropped.
fn combine(
    document_g2: &FxHashMap<TermPair, f64>,
    window_g2: &FxHashMap<TermPair, f64>,
    bigram_g2: &FxHashMap<TermPair, f64>,
) -> AssociationMap {
    let mut queued =
        Vec::with_capacity(2 * (document_g2.len() + window_g2.len()) + bigram_g2.len());
    for &pair in document_g2.keys() {
        queued.push(pair);
        queued.push(pair.flip());
    }
    for &pair in window_g2.keys() {
        queued.push(pair);
        queued.push(pair.flip());
    }
    for &pair in bigram_g2.keys() {
        queued.push(pair);
    }

    let mut seen = FxHashSet::default();
    let mut scores = FxHashMap::default();
    for pair in queued {
        if !seen.insert(pair) {
            continue;
        }
        let canonical = pair.canonical();
        let mut score = 0.0;
        if let Some(value) = document_g2.get(&canonical) {
            score += value;
        }
        if let Some(value) = window_g2.get(&canonical) {
            score += value;
        }
        if let Some(value) = bigram_g2.get(&pair) {
            score += value;
        }
        if score > 0.0 {
            scores.insert(pair, score);
        }
    }

    AssociationMap { scores }
}
