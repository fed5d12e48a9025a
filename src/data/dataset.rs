// ============================================================
// Layer 4 — Text Dataset
// ============================================================
// One TextSample per document: padded token ids, the one-hot
// target row and the class index used when scoring.
//
// TextDataset implements Burn's Dataset trait so the
// DataLoader can call .get(index) and .len() on it.
//
// Reference: Burn Book §4 (Dataset)

use anyhow::{bail, Result};
use burn::data::dataset::Dataset;
use serde::{Deserialize, Serialize};

/// One vectorised document: fixed-length token ids plus its target.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextSample {
    pub token_ids:   Vec<u32>,
    /// One-hot row from the label binarizer
    pub target:      Vec<f32>,
    pub class_index: usize,
}

impl TextSample {
    /// Zip token-id rows with one-hot targets and class indices.
    pub fn zip_all(
        token_ids: Vec<Vec<u32>>,
        targets:   Vec<Vec<f32>>,
        classes:   Vec<usize>,
    ) -> Result<Vec<TextSample>> {
        if token_ids.len() != targets.len() || targets.len() != classes.len() {
            bail!(
                "cannot pair {} feature rows with {} targets and {} class indices",
                token_ids.len(),
                targets.len(),
                classes.len()
            );
        }
        Ok(token_ids
            .into_iter()
            .zip(targets)
            .zip(classes)
            .map(|((token_ids, target), class_index)| TextSample { token_ids, target, class_index })
            .collect())
    }
}

pub struct TextDataset {
    samples: Vec<TextSample>,
}

impl TextDataset {
    pub fn new(samples: Vec<TextSample>) -> Self { Self { samples } }

    pub fn sample_count(&self) -> usize { self.samples.len() }

    /// Ground-truth class of every sample, in dataset order.
    pub fn class_indices(&self) -> Vec<usize> {
        self.samples.iter().map(|s| s.class_index).collect()
    }
}

impl Dataset<TextSample> for TextDataset {
    fn get(&self, index: usize) -> Option<TextSample> {
        self.samples.get(index).cloned()
    }

    fn len(&self) -> usize {
        self.samples.len()
    }
}
