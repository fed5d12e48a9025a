// ============================================================
// Layer 4 — Text Batcher
// ============================================================
// Implements Burn's Batcher trait to stack a Vec<TextSample>
// into tensors for one forward pass.
//
//   Input:  N samples, each with S token ids and C target cells
//   Output: token_ids [N, S] (Int)
//           targets   [N, C] (Float, one-hot)
//
// Every sample was padded to the same S by the vocabulary
// processor, so no dynamic padding is needed here.
//
// Reference: Burn Book §4 (Batcher)

use burn::{
    data::dataloader::batcher::Batcher,
    prelude::*,
    tensor::TensorData,
};

use crate::data::dataset::TextSample;

/// A batch of vectorised documents, all on one device.
#[derive(Debug, Clone)]
pub struct TextBatch<B: Backend> {
    /// Token ids — shape: [batch_size, max_document_length]
    pub token_ids: Tensor<B, 2, Int>,

    /// One-hot targets — shape: [batch_size, num_classes]
    pub targets: Tensor<B, 2>,
}

#[derive(Clone, Debug)]
pub struct TextBatcher<B: Backend> {
    pub device: B::Device,
}

impl<B: Backend> TextBatcher<B> {
    pub fn new(device: B::Device) -> Self {
        Self { device }
    }
}

impl<B: Backend> Batcher<TextSample, TextBatch<B>> for TextBatcher<B> {
    fn batch(&self, items: Vec<TextSample>) -> TextBatch<B> {
        let batch_size  = items.len();
        let seq_len     = items.first().map_or(0, |s| s.token_ids.len());
        let num_classes = items.first().map_or(0, |s| s.target.len());

        // Burn Int tensors are built from i64 here and converted to the
        // backend's int element inside from_data
        let ids_flat: Vec<i64> = items
            .iter()
            .flat_map(|s| s.token_ids.iter().map(|&id| id as i64))
            .collect();

        let targets_flat: Vec<f32> = items
            .iter()
            .flat_map(|s| s.target.iter().copied())
            .collect();

        let token_ids = Tensor::<B, 2, Int>::from_data(
            TensorData::new(ids_flat, [batch_size, seq_len]),
            &self.device,
        );

        let targets = Tensor::<B, 2>::from_data(
            TensorData::new(targets_flat, [batch_size, num_classes]),
            &self.device,
        );

        TextBatch { token_ids, targets }
    }
}
