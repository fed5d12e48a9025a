// ============================================================
// Layer 5 — Evaluator
// ============================================================
// Runs a trained classifier over the held-out partition and
// scores it. Called with the model's inner (non-autodiff)
// backend, so no gradient graph is recorded.
//
// Reference: Burn Book §5 (Inference)

use anyhow::{bail, Result};
use burn::{data::dataloader::DataLoaderBuilder, prelude::*};

use crate::data::{batcher::TextBatcher, dataset::TextDataset};
use crate::ml::model::TextClassifier;

/// Model output for one document.
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    pub class_index:   usize,
    pub probabilities: Vec<f32>,
}

impl Prediction {
    /// Probability the model gave its chosen class.
    pub fn confidence(&self) -> f32 {
        self.probabilities.get(self.class_index).copied().unwrap_or(0.0)
    }
}

/// Average confidence over `predictions`, 0.0 when there are none.
pub fn mean_confidence(predictions: &[Prediction]) -> f64 {
    if predictions.is_empty() {
        return 0.0;
    }
    predictions.iter().map(|p| p.confidence() as f64).sum::<f64>() / predictions.len() as f64
}

/// Predict every sample of `dataset`, keeping dataset order.
pub fn predict<B, M>(
    model:      &M,
    dataset:    TextDataset,
    batch_size: usize,
    device:     &B::Device,
) -> Vec<Prediction>
where
    B: Backend,
    M: TextClassifier<B>,
{
    // No shuffle: predictions must line up with the ground-truth order
    let loader = DataLoaderBuilder::new(TextBatcher::<B>::new(device.clone()))
        .batch_size(batch_size)
        .build(dataset);

    let mut predictions = Vec::new();
    for batch in loader.iter() {
        let (classes, probabilities) = model.predict(batch.token_ids);
        let [_, num_classes] = probabilities.dims();

        let classes: Vec<usize> = classes
            .into_data()
            .iter::<i64>()
            .map(|c| c as usize)
            .collect();
        let probabilities: Vec<f32> = probabilities.into_data().iter::<f32>().collect();

        predictions.extend(classes.into_iter().zip(probabilities.chunks(num_classes.max(1))).map(
            |(class_index, row)| Prediction {
                class_index,
                probabilities: row.to_vec(),
            },
        ));
    }

    tracing::debug!("Predicted {} documents", predictions.len());
    predictions
}

/// Fraction of positions where `predicted` equals `truth`.
pub fn accuracy(truth: &[usize], predicted: &[usize]) -> Result<f64> {
    if truth.len() != predicted.len() {
        bail!(
            "cannot score {} predictions against {} labels",
            predicted.len(),
            truth.len()
        );
    }
    if truth.is_empty() {
        bail!("cannot score an empty test partition");
    }
    let correct = truth.iter().zip(predicted).filter(|(t, p)| t == p).count();
    Ok(correct as f64 / truth.len() as f64)
}
