use crate::error::Result;
use crate::interner::{validate_vocabulary_size, TermInterner};
use crate::types::TermId;
use rustc_hash::FxHashSet;

/// One tokenized document: an identifier and its ordered term sequence.
#[derive(Clone, Debug)]
pub struct Document {
    pub id: String,
    pub tokens: Vec<TermId>,
}

/// An interned token corpus. Token order matters within a document and is
/// irrelevant across documents. Immutable input to the estimator.
#[derive(Clone, Debug, Default)]
pub struct TokenCorpus {
    interner: TermInterner,
    documents: Vec<Document>,
}

impl TokenCorpus {
    /// Interns the corpus vocabulary in sorted order, then converts every
    /// document to term ids. Empty documents are kept; they still count as
    /// co-occurrence units.
    pub fn from_documents(documents: Vec<(String, Vec<String>)>) -> Result<Self> {
        let mut uniq = FxHashSet::default();
        for (_, tokens) in &documents {
            uniq.extend(tokens.iter().cloned());
        }
        let mut sorted = uniq.into_iter().collect::<Vec<_>>();
        sorted.sort_unstable();
        validate_vocabulary_size(sorted.len())?;

        let mut interner = TermInterner::default();
        for term in &sorted {
            interner.intern(term)?;
        }

        let documents = documents
            .into_iter()
            .map(|(id, tokens)| {
                let tokens = tokens
                    .iter()
                    .map(|token| interner.intern(token))
                    .collect::<Result<Vec<_>>>()?;
                Ok(Document { id, tokens })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            interner,
            documents,
        })
    }

    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    pub fn interner(&self) -> &TermInterner {
        &self.interner
    }

    pub fn document_count(&self) -> usize {
        self.documents.len()
    }

    pub fn token_count(&self) -> usize {
        self.documents.iter().map(|doc| doc.tokens.len()).sum()
    }
}
