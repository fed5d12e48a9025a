// ============================================================
// Layer 5 — Training Loop
// ============================================================
// Runs a fixed number of Adam steps over shuffled mini-batches.
//
// Training is counted in optimisation STEPS, not epochs: the
// data loader is re-iterated as often as needed until
// `cfg.steps` updates have been applied. With 400 training
// samples, batch_size 128 and 100 steps that is a little over
// 30 passes over the data.
//
// Key Burn insight:
//   - Training uses an AutodiffBackend for gradients
//   - GradientsParams::from_grads maps raw gradients back onto
//     the module's parameter ids so the optimiser can apply them
//
// Reference: Burn Book §5, Kingma & Ba (2015) Adam

use anyhow::{bail, Result};
use burn::{
    data::dataloader::DataLoaderBuilder,
    module::AutodiffModule,
    optim::{AdamConfig, GradientsParams, Optimizer},
    prelude::*,
    tensor::backend::AutodiffBackend,
};

use crate::application::experiment::ExperimentConfig;
use crate::data::{batcher::TextBatcher, dataset::TextDataset};
use crate::infra::metrics::{MetricsLogger, StepMetrics};
use crate::ml::model::TextClassifier;

/// Train `model` on `dataset` and return the updated module.
pub fn fit<B, M>(
    mut model: M,
    dataset:   TextDataset,
    cfg:       &ExperimentConfig,
    device:    &B::Device,
    metrics:   Option<&MetricsLogger>,
) -> Result<M>
where
    B: AutodiffBackend,
    M: TextClassifier<B> + AutodiffModule<B>,
{
    if dataset.sample_count() == 0 {
        bail!("training partition is empty");
    }
    let log_every = cfg.log_every.max(1);

    let mut optim = AdamConfig::new().init::<B, M>();

    let loader = DataLoaderBuilder::new(TextBatcher::<B>::new(device.clone()))
        .batch_size(cfg.batch_size)
        .shuffle(cfg.seed)
        .build(dataset);

    tracing::info!(
        "Training for {} steps (batch_size={}, lr={})",
        cfg.steps,
        cfg.batch_size,
        cfg.learning_rate
    );

    let mut step           = 0usize;
    let mut window_loss    = 0.0f64;
    let mut window_batches = 0usize;

    while step < cfg.steps {
        for batch in loader.iter() {
            if step == cfg.steps {
                break;
            }

            let output = model.forward_with_loss(batch.token_ids, batch.targets);

            let loss_val: f64 = output.loss.clone().into_scalar().elem::<f64>();
            window_loss    += loss_val;
            window_batches += 1;

            // Backward pass + Adam update
            let grads = output.loss.backward();
            let grads = GradientsParams::from_grads(grads, &model);
            model = optim.step(cfg.learning_rate, model, grads);
            step += 1;

            if step % log_every == 0 || step == cfg.steps {
                let avg_loss = window_loss / window_batches as f64;
                tracing::info!("step {:>5}/{} | loss = {:.6}", step, cfg.steps, avg_loss);
                if let Some(logger) = metrics {
                    logger.log(&StepMetrics::new(step, avg_loss))?;
                }
                window_loss    = 0.0;
                window_batches = 0;
            }
        }
    }

    tracing::info!("Training complete after {} steps", step);
    Ok(model)
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::dataset::TextSample;
    use crate::ml::model::{softmax_cross_entropy, ClassifierConfig};
    use burn::backend::{Autodiff, NdArray};
    use burn::tensor::TensorData;

    type TestBackend = Autodiff<NdArray<f32>>;

    /// Token 1 always means class 0, token 2 always means class 1.
    fn separable_samples(n: usize) -> Vec<TextSample> {
        (0..n)
            .map(|i| {
                let class = i % 2;
                TextSample {
                    token_ids:   vec![class as u32 + 1, 3, 0],
                    target:      if class == 0 { vec![1.0, 0.0] } else { vec![0.0, 1.0] },
                    class_index: class,
                }
            })
            .collect()
    }

    fn small_config(steps: usize) -> ExperimentConfig {
        ExperimentConfig {
            steps,
            batch_size: 4,
            learning_rate: 0.05,
            log_every: 5,
            ..ExperimentConfig::default()
        }
    }

    fn batch_loss<M: TextClassifier<NdArray<f32>>>(model: &M) -> f32 {
        let device = Default::default();
        let ids = Tensor::<NdArray<f32>, 2, Int>::from_data(
            TensorData::new(vec![1i64, 3, 0, 2, 3, 0], [2, 3]),
            &device,
        );
        let targets = Tensor::<NdArray<f32>, 2>::from_data(
            TensorData::new(vec![1.0f32, 0.0, 0.0, 1.0], [2, 2]),
            &device,
        );
        softmax_cross_entropy(model.forward(ids), targets).into_scalar()
    }

    #[test]
    fn test_training_reduces_loss() {
        let device = Default::default();
        let model  = ClassifierConfig::new(4, 8, 2).init_bow::<TestBackend>(&device);
        let before = batch_loss(&model.valid());

        let trained = fit(
            model,
            TextDataset::new(separable_samples(16)),
            &small_config(40),
            &device,
            None,
        )
        .unwrap();
        let after = batch_loss(&trained.valid());

        assert!(after < before, "loss went from {before} to {after}");
        assert!(after < 0.1);
    }

    #[test]
    fn test_writes_metrics_rows() {
        let dir    = tempfile::tempdir().unwrap();
        let logger = MetricsLogger::new(dir.path()).unwrap();
        let device = Default::default();
        let model  = ClassifierConfig::new(4, 4, 2).init_rnn::<TestBackend>(&device);

        fit(
            model,
            TextDataset::new(separable_samples(6)),
            &small_config(12),
            &device,
            Some(&logger),
        )
        .unwrap();

        let csv = std::fs::read_to_string(logger.csv_path()).unwrap();
        let rows: Vec<&str> = csv.lines().collect();
        // header + steps 5, 10, 12
        assert_eq!(rows.len(), 4);
        assert!(rows[3].starts_with("12,"));
    }

    #[test]
    fn test_empty_training_set_is_an_error() {
        let device = Default::default();
        let model  = ClassifierConfig::new(4, 4, 2).init_bow::<TestBackend>(&device);
        let result = fit(model, TextDataset::new(Vec::new()), &small_config(5), &device, None);
        assert!(result.is_err());
    }
}
