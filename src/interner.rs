use crate::error::{Error, Result};
use crate::types::TermId;
use rustc_hash::FxHashMap;

pub(crate) fn validate_vocabulary_size(vocab_size: usize) -> Result<()> {
    let capacity = (u32::MAX as usize).saturating_add(1);
    if vocab_size > capacity {
        return Err(Error::VocabularyOverflow);
    }
    Ok(())
}

/// Bidirectional string ⇄ `TermId` table.
///
/// Ids are dense and assigned in insertion order; [`TokenCorpus`] construction
/// interns the corpus vocabulary in sorted order first, so ascending ids over
/// corpus terms coincide with lexicographic order.
///
/// [`TokenCorpus`]: crate::corpus::TokenCorpus
#[derive(Clone, Debug, Default)]
pub struct TermInterner {
    str_to_id: FxHashMap<String, TermId>,
    id_to_str: Vec<String>,
}

impl TermInterner {
    pub fn intern(&mut self, term: &str) -> Result<TermId> {
        if let Some(id) = self.str_to_id.get(term) {
            return Ok(*id);
        }
        validate_vocabulary_size(self.id_to_str.len().saturating_add(1))?;
        let id = self.id_to_str.len() as TermId;
        self.str_to_id.insert(term.to_string(), id);
        self.id_to_str.push(term.to_string());
        Ok(id)
    }

    pub fn lookup(&self, term: &str) -> Option<TermId> {
        self.str_to_id.get(term).copied()
    }

    pub fn term(&self, id: TermId) -> &str {
        &self.id_to_str[id as usize]
    }

    pub fn terms(&self, ids: &[TermId]) -> Vec<String> {
        ids.iter().map(|id| self.term(*id).to_string()).collect()
    }

    pub fn len(&self) -> usize {
        self.id_to_str.len()
    }

    pub fn is_empty(&self) -> bool {
        self.id_to_str.is_empty()
    }
}
