use crate::association::AssociationMap;
use crate::types::{
    TermId, DEFAULT_CANDIDATE_POOL_SIZE, DEFAULT_NUM_SERIATED_TERMS, INITIAL_ENERGY_SCALE,
};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Per-term attributes consumed from the saliency stage. Candidates are
/// expected in rank order (rank 0 = most salient); that order is the scan
/// order before any bound data exists.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CandidateTerm {
    pub term: TermId,
    pub frequency: f64,
    pub saliency: f64,
    pub rank: usize,
}

/// Final seriation output: the ordered term sequence plus the iteration order
/// in which terms were chosen (a build-order importance signal distinct from
/// final position).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seriation {
    pub ordering: Vec<TermId>,
    pub placement_order: Vec<TermId>,
}

/// Progress callback, invoked at most once per iteration. Replaces logger
/// state with an injected observer; no ordering contract beyond the call
/// happening after the iteration's placement is committed.
pub trait SeriationObserver {
    fn on_term_placed(&mut self, iteration: usize, term: TermId, position: usize);
}

/// No-op observer.
impl SeriationObserver for () {
    fn on_term_placed(&mut self, _iteration: usize, _term: TermId, _position: usize) {}
}

/// The placed sequence with its edge buffers, kept in one struct so an
/// insertion commits the term and both new gap buffers together.
///
/// `buffers[i]` is the association strength currently occupying gap `i`; there
/// are `terms.len() + 1` gaps once the first term is placed, and the trailing
/// boundary buffer stays 0.
pub(crate) struct PlacedSequence {
    pub(crate) terms: Vec<TermId>,
    pub(crate) buffers: Vec<f64>,
}

impl PlacedSequence {
    pub(crate) fn new() -> Self {
        Self {
            terms: Vec::new(),
            buffers: vec![0.0, 0.0],
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.terms.len()
    }

    pub(crate) fn gap_count(&self) -> usize {
        self.terms.len() + 1
    }

    pub(crate) fn gap_buffer(&self, gap: usize) -> f64 {
        self.buffers[gap]
    }

    /// Inserts `term` at `gap`. Boundary gaps append/prepend and gain one new
    /// edge buffer; an interior insertion splits the displaced buffer into the
    /// two edges toward the new neighbors.
    pub(crate) fn place(&mut self, term: TermId, gap: usize, associations: &AssociationMap) {
        if self.terms.is_empty() {
            // Singleton: both boundary buffers already zero.
        } else if gap >= self.terms.len() {
            let last = self.terms[self.terms.len() - 1];
            let edge = associations.score(last, term);
            let end = self.buffers.len() - 1;
            self.buffers.insert(end, edge);
        } else if gap == 0 {
            let edge = associations.score(term, self.terms[0]);
            self.buffers.insert(1, edge);
        } else {
            self.buffers[gap] = associations.score(self.terms[gap - 1], term);
            let edge = associations.score(term, self.terms[gap]);
            self.buffers.insert(gap + 1, edge);
        }

        if gap >= self.terms.len() {
            self.terms.push(term);
        } else {
            self.terms.insert(gap, term);
        }
    }
}

/// Greedy incremental seriation.
///
/// Converts the sparse association map plus the per-term importance ranking
/// into a single ordered sequence, one placement per iteration, pruning the
/// candidate scan with an upper-bound ordering over direct associations to
/// already-placed terms. Approximate by design; no optimality guarantee.
#[derive(Clone, Copy, Debug)]
pub struct SeriationOptimizer {
    num_terms: usize,
    candidate_pool_size: usize,
}

impl Default for SeriationOptimizer {
    fn default() -> Self {
        Self {
            num_terms: DEFAULT_NUM_SERIATED_TERMS,
            candidate_pool_size: DEFAULT_CANDIDATE_POOL_SIZE,
        }
    }
}

impl SeriationOptimizer {
    pub fn new(num_terms: usize) -> Self {
        Self {
            num_terms,
            ..Self::default()
        }
    }

    /// Overrides the lookahead horizon bounding the candidate pool: at any
    /// depth only candidates ranked within `placed_count + pool_size` are
    /// considered for insertion.
    pub fn with_candidate_pool_size(mut self, pool_size: usize) -> Self {
        self.candidate_pool_size = pool_size;
        self
    }

    pub fn seriate(&self, associations: &AssociationMap, candidates: &[CandidateTerm]) -> Seriation {
        self.seriate_with_observer(associations, candidates, &mut ())
    }

    /// Requesting more terms than available caps silently; ties in energy keep
    /// the first-scanned candidate and gap, so identical inputs reproduce
    /// identical output.
    pub fn seriate_with_observer(
        &self,
        associations: &AssociationMap,
        candidates: &[CandidateTerm],
        observer: &mut dyn SeriationObserver,
    ) -> Seriation {
        let attrs: FxHashMap<TermId, &CandidateTerm> =
            candidates.iter().map(|c| (c.term, c)).collect();
        let mut remaining: Vec<TermId> = candidates.iter().map(|c| c.term).collect();

        let mut sequence = PlacedSequence::new();
        let mut placement_order: Vec<TermId> = Vec::new();
        let mut pre_best: Vec<(TermId, f64)> = Vec::new();
        let mut post_best: Vec<(TermId, f64)> = Vec::new();

        let target = self.num_terms.min(remaining.len());
        for iteration in 0..target {
            let added = placement_order.last().copied();
            if iteration == 1 {
                let first = placement_order[0];
                (pre_best, post_best) = init_best_energies(first, &remaining, associations);
            }
            let best_energies =
                update_best_energies(&mut pre_best, &mut post_best, added, associations);

            let Some((term, gap)) = self.scan(
                &remaining,
                &sequence,
                &best_energies,
                &attrs,
                associations,
                iteration,
            ) else {
                warn!(iteration, "no placeable candidate; stopping early");
                break;
            };

            sequence.place(term, gap, associations);
            remaining.retain(|t| *t != term);
            placement_order.push(term);
            debug!(iteration, term, gap, "term placed");
            observer.on_term_placed(iteration, term, gap);
        }

        Seriation {
            ordering: sequence.terms,
            placement_order,
        }
    }

    /// One iteration's candidate/gap scan. Returns the winning term and gap,
    /// or `None` when the rank horizon excluded every remaining candidate.
    pub(crate) fn scan(
        &self,
        remaining: &[TermId],
        sequence: &PlacedSequence,
        best_energies: &[(TermId, f64)],
        attrs: &FxHashMap<TermId, &CandidateTerm>,
        associations: &AssociationMap,
        iteration: usize,
    ) -> Option<(TermId, usize)> {
        let scan_order: Vec<TermId> = if best_energies.is_empty() {
            remaining.to_vec()
        } else {
            best_energies.iter().map(|(term, _)| *term).collect()
        };

        let mut max_energy_change = 0.0;
        let mut winner: Option<(TermId, usize)> = None;
        // Deliberately survives across candidates: the early-termination bound
        // reads the buffer left over from the last gap evaluated, which is
        // always the final gap's.
        let mut current_buffer = 0.0;

        for (candidate_ix, &candidate) in scan_order.iter().enumerate() {
            let Some(candidate_attrs) = attrs.get(&candidate) else {
                continue;
            };
            for gap in 0..sequence.gap_count() {
                current_buffer = sequence.gap_buffer(gap);
                if candidate_attrs.rank <= sequence.len() + self.candidate_pool_size {
                    let change = energy_change(
                        candidate_attrs,
                        gap,
                        sequence,
                        current_buffer,
                        iteration,
                        associations,
                    );
                    if change > max_energy_change || winner.is_none() {
                        max_energy_change = change;
                        winner = Some((candidate, gap));
                    }
                }
            }

            if candidate_ix + 1 < scan_order.len()
                && !best_energies.is_empty()
                && max_energy_change >= 2.0 * (best_energies[candidate_ix + 1].1 + current_buffer)
            {
                debug!(
                    candidates_checked = candidate_ix + 1,
                    "early termination: remaining candidates bounded below current best"
                );
                break;
            }
        }

        winner
    }
}

/// Energy of placing `candidate` at `gap`. Iteration 0 has only the empty
/// sequence, so the energy is position-independent and seeded from frequency
/// and saliency; afterwards it is the bond gained toward both prospective
/// neighbors minus the displaced edge, doubled.
fn energy_change(
    candidate: &CandidateTerm,
    gap: usize,
    sequence: &PlacedSequence,
    current_buffer: f64,
    iteration: usize,
    associations: &AssociationMap,
) -> f64 {
    if iteration == 0 {
        return INITIAL_ENERGY_SCALE * candidate.frequency * candidate.saliency;
    }

    let mut prev_bond = 0.0;
    let mut post_bond = 0.0;
    if gap > 0 {
        prev_bond = associations.score(sequence.terms[gap - 1], candidate.term);
    }
    if gap < sequence.terms.len() {
        post_bond = associations.score(candidate.term, sequence.terms[gap]);
    }

    2.0 * (prev_bond + post_bond - current_buffer)
}

/// Per-candidate bound pair against the first placed term: the direct
/// association in each direction, 0 when absent.
fn init_best_energies(
    first_term: TermId,
    candidates: &[TermId],
    associations: &AssociationMap,
) -> (Vec<(TermId, f64)>, Vec<(TermId, f64)>) {
    let mut pre_best = Vec::with_capacity(candidates.len());
    let mut post_best = Vec::with_capacity(candidates.len());
    for &candidate in candidates {
        pre_best.push((candidate, associations.score(candidate, first_term)));
        post_best.push((candidate, associations.score(first_term, candidate)));
    }
    (pre_best, post_best)
}

/// Raises each remaining candidate's bounds against the most recently placed
/// term, drops that term from the bound lists, and returns the upper-bound
/// ranking (`pre + post`, sorted descending, stable so ties keep candidate
/// order). Empty when nothing has been placed yet.
fn update_best_energies(
    pre_best: &mut Vec<(TermId, f64)>,
    post_best: &mut Vec<(TermId, f64)>,
    added: Option<TermId>,
    associations: &AssociationMap,
) -> Vec<(TermId, f64)> {
    let Some(added) = added else {
        return Vec::new();
    };

    let mut remove_ix = None;
    for ix in 0..pre_best.len() {
        let term = pre_best[ix].0;
        if term == added {
            remove_ix = Some(ix);
        }
        let pre = associations.score(term, added);
        if pre > pre_best[ix].1 {
            pre_best[ix].1 = pre;
        }
        let post = associations.score(added, term);
        if post > post_best[ix].1 {
            post_best[ix].1 = post;
        }
    }

    if let Some(ix) = remove_ix {
        pre_best.remove(ix);
        post_best.remove(ix);
    }

    let mut best_energies = pre_best
        .iter()
        .zip(post_best.iter())
        .map(|((term, pre), (_, post))| (*term, pre + post))
        .collect::<Vec<_>>();
    best_energies.sort_by(|a, b| b.1.total_cmp(&a.1));
    best_energies
}
