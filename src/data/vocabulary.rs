// ============================================================
// Layer 4 — Vocabulary Processor
// ============================================================
// Maps each document to a fixed-length sequence of token ids.
//
// Fitting:
//   1. Split every document into words with a HuggingFace
//      `Whitespace` pre-tokenizer (\w+ | [^\w\s]+).
//   2. Give each unseen word the next free id, in the order
//      words are first met while scanning the corpus.
//   3. Stop adding words once `max_vocabulary_size` ids exist.
//   4. Freeze the mapping as a WordLevel tokenizer.
//
// Id 0 is <UNK>. It doubles as the padding id, so a padded
// position and an out-of-vocabulary word look the same to
// the model.
//
// Transforming:
//   ids = tokenizer(doc), truncated or right-padded with 0
//   to exactly `max_document_length`.
//
// The split step and the encode step go through the same
// tokenizer pipeline, so fitting and transforming always
// agree on word boundaries.
//
// Reference: tokenizers crate (WordLevel model)
//            Rust Book §8 (Strings, HashMaps)

use anyhow::{bail, Result};
use std::{collections::HashSet, path::Path, str::FromStr};
use tokenizers::Tokenizer;

/// Token used for out-of-vocabulary words and padding.
pub const UNK_TOKEN: &str = "<UNK>";
pub const UNK_ID: u32 = 0;

/// Settings for fitting a [`Vocabulary`].
#[derive(Debug, Clone, Copy)]
pub struct VocabularyProcessor {
    max_document_length: usize,
    max_vocabulary_size: usize,
}

impl VocabularyProcessor {
    pub fn new(max_document_length: usize, max_vocabulary_size: usize) -> Self {
        Self { max_document_length, max_vocabulary_size }
    }

    /// Build the word → id mapping over `documents`.
    pub fn fit(&self, documents: &[String]) -> Result<Vocabulary> {
        if documents.is_empty() {
            bail!("cannot fit a vocabulary over zero documents");
        }
        if self.max_document_length == 0 {
            bail!("max_document_length must be at least 1");
        }
        if self.max_vocabulary_size == 0 {
            bail!("vocabulary_size must be at least 1 (id 0 is reserved for {UNK_TOKEN})");
        }

        // A tokenizer that knows no words yet: every token comes back
        // as <UNK>, but its offsets still locate the word in the input.
        let scanner   = build_tokenizer(&[UNK_TOKEN.to_string()])?;
        let mut words = vec![UNK_TOKEN.to_string()];
        let mut seen: HashSet<String> = words.iter().cloned().collect();

        'scan: for doc in documents {
            for word in split_words(&scanner, doc)? {
                if seen.contains(word) {
                    continue;
                }
                if words.len() == self.max_vocabulary_size {
                    tracing::debug!(
                        "Vocabulary full at {} entries, remaining words map to {}",
                        words.len(),
                        UNK_TOKEN
                    );
                    break 'scan;
                }
                seen.insert(word.to_string());
                words.push(word.to_string());
            }
        }

        let tokenizer = build_tokenizer(&words)?;
        tracing::info!("Vocabulary fitted with {} entries", words.len());

        Ok(Vocabulary {
            words,
            tokenizer,
            max_document_length: self.max_document_length,
        })
    }

    /// Fit over `documents` and transform each of them.
    pub fn fit_transform(&self, documents: &[String]) -> Result<(Vocabulary, Vec<Vec<u32>>)> {
        let vocabulary = self.fit(documents)?;
        let ids        = vocabulary.transform_all(documents)?;
        Ok((vocabulary, ids))
    }
}

/// A frozen word → id mapping.
#[derive(Debug, Clone)]
pub struct Vocabulary {
    /// Words indexed by id
    words:               Vec<String>,
    tokenizer:           Tokenizer,
    max_document_length: usize,
}

impl Vocabulary {
    /// Number of ids in use, <UNK> included.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Encode one document to exactly `max_document_length` ids.
    pub fn transform(&self, document: &str) -> Result<Vec<u32>> {
        let encoding = self
            .tokenizer
            .encode(document, false)
            .map_err(|e| anyhow::anyhow!("Tokenisation error: {e}"))?;
        let mut ids = encoding.get_ids().to_vec();
        ids.truncate(self.max_document_length);
        ids.resize(self.max_document_length, UNK_ID);
        Ok(ids)
    }

    pub fn transform_all(&self, documents: &[String]) -> Result<Vec<Vec<u32>>> {
        documents.iter().map(|d| self.transform(d)).collect()
    }

    /// Write the mapping as a HuggingFace tokenizer JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        self.tokenizer
            .save(path, true)
            .map_err(|e| anyhow::anyhow!("Cannot write vocabulary to '{}': {e}", path.display()))
    }
}

/// Words of `document` in order, as slices of the input.
fn split_words<'d>(scanner: &Tokenizer, document: &'d str) -> Result<Vec<&'d str>> {
    let encoding = scanner
        .encode(document, false)
        .map_err(|e| anyhow::anyhow!("Tokenisation error: {e}"))?;
    Ok(encoding
        .get_offsets()
        .iter()
        .filter_map(|&(start, end)| document.get(start..end))
        .collect())
}

/// Build a WordLevel tokenizer where `words[i]` has id `i`.
/// `words[0]` must be the unknown token.
fn build_tokenizer(words: &[String]) -> Result<Tokenizer> {
    let mut vocab = serde_json::Map::with_capacity(words.len());
    for (id, word) in words.iter().enumerate() {
        vocab.insert(word.clone(), serde_json::json!(id));
    }

    let tokenizer_json = serde_json::json!({
        "version": "1.0",
        "truncation": null,
        "padding": null,
        "added_tokens": [],
        "normalizer": null,
        "pre_tokenizer": { "type": "Whitespace" },
        "post_processor": null,
        "decoder": null,
        "model": {
            "type": "WordLevel",
            "vocab": vocab,
            "unk_token": UNK_TOKEN
        }
    });

    Tokenizer::from_str(&tokenizer_json.to_string())
        .map_err(|e| anyhow::anyhow!("Cannot build tokenizer: {e}"))
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    fn docs(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_ids_follow_first_seen_order() {
        let vocab = VocabularyProcessor::new(4, 100)
            .fit(&docs(&["a b", "b c", "c a", "a a"]))
            .unwrap();
        assert_eq!(vocab.len(), 4);
        assert_eq!(vocab.tokenizer.token_to_id(UNK_TOKEN), Some(0));
        assert_eq!(vocab.tokenizer.token_to_id("a"), Some(1));
        assert_eq!(vocab.tokenizer.token_to_id("b"), Some(2));
        assert_eq!(vocab.tokenizer.token_to_id("c"), Some(3));
        assert_eq!(vocab.words[3], "c");
    }

    #[test]
    fn test_pads_and_truncates() {
        let vocab = VocabularyProcessor::new(3, 100)
            .fit(&docs(&["one two three four", "one"]))
            .unwrap();
        assert_eq!(vocab.transform("one two three four").unwrap(), vec![1, 2, 3]);
        assert_eq!(vocab.transform("one").unwrap(), vec![1, 0, 0]);
        assert_eq!(vocab.transform("").unwrap(), vec![0, 0, 0]);
    }

    #[test]
    fn test_unknown_words_map_to_zero() {
        let vocab = VocabularyProcessor::new(3, 100)
            .fit(&docs(&["known words"]))
            .unwrap();
        assert_eq!(vocab.transform("known unseen words").unwrap(), vec![1, 0, 2]);
    }

    #[test]
    fn test_transform_is_deterministic() {
        let corpus = docs(&["the cat sat", "on the mat"]);
        let (vocab, ids) = VocabularyProcessor::new(5, 100).fit_transform(&corpus).unwrap();
        assert_eq!(vocab.transform(&corpus[1]).unwrap(), ids[1]);
        assert_eq!(vocab.transform(&corpus[1]).unwrap(), vocab.transform(&corpus[1]).unwrap());
    }

    #[test]
    fn test_vocabulary_size_caps_entries() {
        let vocab = VocabularyProcessor::new(4, 3)
            .fit(&docs(&["a b c d"]))
            .unwrap();
        assert_eq!(vocab.len(), 3);
        assert_eq!(vocab.transform("a b c d").unwrap(), vec![1, 2, 0, 0]);
    }

    #[test]
    fn test_punctuation_is_split_off() {
        let vocab = VocabularyProcessor::new(4, 100)
            .fit(&docs(&["hello, world"]))
            .unwrap();
        assert_eq!(vocab.tokenizer.token_to_id("hello"), Some(1));
        assert_eq!(vocab.tokenizer.token_to_id(","), Some(2));
        assert_eq!(vocab.tokenizer.token_to_id("world"), Some(3));
    }

    #[test]
    fn test_empty_corpus_is_rejected() {
        let err = VocabularyProcessor::new(4, 100).fit(&[]).unwrap_err();
        assert!(err.to_string().contains("zero documents"));
    }

    #[test]
    fn test_save_writes_tokenizer_json() {
        let dir   = tempfile::tempdir().unwrap();
        let path  = dir.path().join("vocabulary.json");
        let vocab = VocabularyProcessor::new(2, 10).fit(&docs(&["x y"])).unwrap();
        vocab.save(&path).unwrap();

        let reloaded = Tokenizer::from_file(&path).unwrap();
        assert_eq!(reloaded.token_to_id("y"), Some(2));
    }
}
