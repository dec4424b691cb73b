use crate::cooccurrence::CooccurrenceCounts;
use crate::error::{Error, Result};
use crate::types::{Granularity, TermPair, MAX_FREQ, MIN_RESCALED_FREQ, PARALLEL_SCORE_THRESHOLD};
use rayon::prelude::*;
use rustc_hash::FxHashMap;

/// Verified counts for one observed pair, ready for scoring.
#[derive(Clone, Copy)]
pub(crate) struct PairStats {
    pub(crate) pair: TermPair,
    pub(crate) joint: u64,
    pub(crate) left: u64,
    pub(crate) right: u64,
}

/// One side of the binomial log-likelihood sum. A zero observed count
/// contributes nothing; the log term is skipped, not evaluated at zero. A
/// zero expectation (the pair's first term occupies every unit) also
/// contributes nothing rather than diverging.
fn ll_term(observed: f64, expected: f64) -> f64 {
    if observed > 0.0 && expected > 0.0 {
        observed * (observed / expected).ln()
    } else {
        0.0
    }
}

fn binomial_g2(b_given_a: f64, any_given_a: f64, b_given_not_a: f64, any_given_not_a: f64) -> f64 {
    let total = any_given_a + any_given_not_a;
    let e1 = any_given_a * (b_given_a + b_given_not_a) / total;
    let e2 = any_given_not_a * (b_given_a + b_given_not_a) / total;
    2.0 * (ll_term(b_given_a, e1) + ll_term(b_given_not_a, e2))
}

/// Log-likelihood-ratio association between two terms, from the 2×2
/// contingency table of joint count vs. marginal expectations under
/// independence.
pub(crate) fn g2(freq_all: u64, freq_ab: u64, freq_a: u64, freq_b: u64) -> f64 {
    binomial_g2(
        freq_ab as f64,
        freq_a as f64,
        (freq_b - freq_ab) as f64,
        (freq_all - freq_a) as f64,
    )
}

fn score_stats(unit_count: u64, stats: PairStats) -> Option<(TermPair, f64)> {
    let scale = MAX_FREQ / unit_count as f64;
    let rescaled_left = stats.left as f64 * scale;
    let rescaled_right = stats.right as f64 * scale;
    if rescaled_left > MIN_RESCALED_FREQ && rescaled_right > MIN_RESCALED_FREQ {
        Some((stats.pair, g2(unit_count, stats.joint, stats.left, stats.right)))
    } else {
        None
    }
}

/// Collects and verifies per-pair stats for every observed cooccurrence.
/// A pair term missing from the occurrence map, or counts out of order, is a
/// corrupted upstream stage and aborts the run.
fn collect_stats(granularity: Granularity, counts: &CooccurrenceCounts) -> Result<Vec<PairStats>> {
    let mut stats = Vec::with_capacity(counts.cooccurrence.len());
    for (&pair, &joint) in &counts.cooccurrence {
        let left = *counts
            .occurrence
            .get(&pair.left)
            .ok_or(Error::MissingOccurrence {
                granularity,
                term: pair.left,
            })?;
        let right = *counts
            .occurrence
            .get(&pair.right)
            .ok_or(Error::MissingOccurrence {
                granularity,
                term: pair.right,
            })?;
        if joint > left
            || joint > right
            || left > counts.unit_count
            || right > counts.unit_count
        {
            return Err(Error::CountInvariant {
                granularity,
                left: pair.left,
                right: pair.right,
                joint,
                left_count: left,
                right_count: right,
                unit_count: counts.unit_count,
            });
        }
        stats.push(PairStats {
            pair,
            joint,
            left,
            right,
        });
    }
    Ok(stats)
}

/// G2 scores for every observed pair passing the rescaled-frequency gate.
pub(crate) fn g2_scores(
    granularity: Granularity,
    counts: &CooccurrenceCounts,
) -> Result<FxHashMap<TermPair, f64>> {
    if counts.cooccurrence.is_empty() {
        return Ok(FxHashMap::default());
    }
    if counts.unit_count == 0 {
        return Err(Error::EmptyGranularity { granularity });
    }

    let stats = collect_stats(granularity, counts)?;
    let unit_count = counts.unit_count;

    let scored = if stats.len() >= PARALLEL_SCORE_THRESHOLD {
        stats
            .par_iter()
            .filter_map(|item| score_stats(unit_count, *item))
            .collect::<Vec<_>>()
    } else {
        stats
            .iter()
            .filter_map(|item| score_stats(unit_count, *item))
            .collect::<Vec<_>>()
    };

    Ok(scored.into_iter().collect())
}
