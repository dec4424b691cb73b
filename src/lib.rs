//! Term association and seriation engine.
//!
//! Given a tokenized corpus analyzed by a topic model, this crate computes a
//! single linear ordering of vocabulary terms in which strongly co-occurring
//! terms sit near each other, so multi-word phrases read contiguously in a
//! term-topic visualization.
//!
//! Two stages run in strict sequence:
//!
//! 1. [`AssociationEstimator`] tallies co-occurrence over three context units
//!    (whole document, sliding window, adjacent bigram), scores each observed
//!    pair with the G2 log-likelihood statistic, and merges the three maps
//!    into one [`AssociationMap`] of directed pair → positive score.
//! 2. [`SeriationOptimizer`] greedily places one term per iteration into the
//!    growing sequence, maximizing neighbor association minus displaced-edge
//!    cost, with an upper-bound ranking pruning the candidate scan.
//!
//! ```
//! use seriate::{AssociationEstimator, CandidateTerm, SeriationOptimizer, TokenCorpus};
//!
//! # fn main() -> Result<(), seriate::Error> {
//! let doc = |id: &str, tokens: &[&str]| {
//!     let tokens = tokens.iter().map(|t| t.to_string()).collect::<Vec<_>>();
//!     (id.to_string(), tokens)
//! };
//! let corpus = TokenCorpus::from_documents(vec![
//!     doc("d1", &["cat", "dog", "cat"]),
//!     doc("d2", &["dog", "mouse"]),
//! ])?;
//!
//! let associations = AssociationEstimator::default().estimate(&corpus)?;
//!
//! let term = |s: &str| corpus.interner().lookup(s).unwrap();
//! let candidates = vec![
//!     CandidateTerm { term: term("dog"), frequency: 3.0, saliency: 1.0, rank: 0 },
//!     CandidateTerm { term: term("cat"), frequency: 2.0, saliency: 0.5, rank: 1 },
//!     CandidateTerm { term: term("mouse"), frequency: 1.0, saliency: 0.4, rank: 2 },
//! ];
//! let seriation = SeriationOptimizer::new(3).seriate(&associations, &candidates);
//!
//! assert_eq!(seriation.ordering.len(), 3);
//! assert_eq!(seriation.placement_order[0], term("dog"));
//! # Ok(())
//! # }
//! ```

mod association;
mod cooccurrence;
mod corpus;
mod error;
mod interner;
mod scoring;
mod seriation;
mod types;


pub use association::{AssociationEstimator, AssociationMap};
pub use corpus::{Document, TokenCorpus};
pub use error::{Error, Result};
pub use interner::TermInterner;
pub use seriation::{CandidateTerm, Seriation, SeriationObserver, SeriationOptimizer};
pub use types::{Granularity, TermId, TermPair};
