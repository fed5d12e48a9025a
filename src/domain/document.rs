// ============================================================
// Layer 3 — Corpus Domain Type
// ============================================================
// A labelled corpus exactly as it comes off disk:
// two parallel sequences, one document string and one raw
// label per row. Nothing is tokenised or encoded yet.
//
// The two sequences are kept separate (rather than as a
// Vec<(String, String)>) because the vocabulary processor
// consumes all documents and the label binarizer consumes
// all labels, each in a single pass.
//
// Reference: Rust Book §5 (Structs and Methods)

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

/// Raw documents and their labels, index-aligned.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawCorpus {
    /// Document text, one entry per row of the data file
    documents: Vec<String>,

    /// Raw categorical label, one entry per row of the label file
    labels: Vec<String>,
}

impl RawCorpus {
    /// Pair up documents and labels.
    /// Fails if the two sequences differ in length, since every
    /// later stage relies on row `i` of one matching row `i` of the other.
    pub fn new(documents: Vec<String>, labels: Vec<String>) -> Result<Self> {
        if documents.len() != labels.len() {
            bail!(
                "corpus has {} documents but {} labels",
                documents.len(),
                labels.len()
            );
        }
        Ok(Self { documents, labels })
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn documents(&self) -> &[String] {
        &self.documents
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_mismatched_lengths() {
        let err = RawCorpus::new(
            vec!["a".into(), "b".into()],
            vec!["0".into()],
        )
        .unwrap_err();
        assert!(err.to_string().contains("2 documents but 1 labels"));
    }

    #[test]
    fn test_keeps_rows_aligned() {
        let corpus = RawCorpus::new(
            vec!["a b".into(), "b c".into()],
            vec!["0".into(), "1".into()],
        )
        .unwrap();
        assert_eq!(corpus.len(), 2);
        assert_eq!(corpus.documents()[1], "b c");
        assert_eq!(corpus.labels()[1], "1");
    }
}
