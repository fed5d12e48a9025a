// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// Parses the flags, picks a Burn backend for --device and
// hands an ExperimentConfig to Layer 2 (application). The only
// console output of a successful run is the accuracy line.
//
// Reference: Rust Book §7 (Modules), §12 (CLI programs)

pub mod commands;

use anyhow::Result;
use burn::backend::{
    ndarray::NdArrayDevice,
    wgpu::WgpuDevice,
    Autodiff, NdArray, Wgpu,
};
use clap::Parser;
use commands::{DeviceKind, RunArgs};

use crate::application::experiment::{ExperimentReport, ExperimentUseCase};

#[derive(Parser, Debug)]
#[command(
    name = "text-classifier",
    version = "0.1.0",
    about = "Train a bag-of-words or GRU text classifier and report test accuracy."
)]
pub struct Cli {
    #[command(flatten)]
    pub args: RunArgs,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        let device   = self.args.device;
        let use_case = ExperimentUseCase::new(self.args.into());

        let report: ExperimentReport = match device {
            DeviceKind::Cpu => {
                tracing::info!("Using NdArray backend on CPU");
                use_case.execute::<Autodiff<NdArray<f32>>>(NdArrayDevice::Cpu)?
            }
            DeviceKind::Gpu => {
                tracing::info!("Using Wgpu backend");
                use_case.execute::<Autodiff<Wgpu>>(WgpuDevice::default())?
            }
        };

        println!("Accuracy: {:.6}", report.accuracy);
        Ok(())
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::experiment::ExperimentConfig;

    #[test]
    fn test_defaults_match_experiment_defaults() {
        let cli = Cli::parse_from(["text-classifier"]);
        assert_eq!(cli.args.device, DeviceKind::Gpu);

        let cfg: ExperimentConfig = cli.args.into();
        let def = ExperimentConfig::default();
        assert_eq!(cfg.data_path(), def.data_path());
        assert_eq!(cfg.label_path(), def.label_path());
        assert_eq!(cfg.steps, def.steps);
        assert_eq!(cfg.vocabulary_size, def.vocabulary_size);
        assert!(!cfg.bow_model && !cfg.test_with_fake_data);
        assert!(cfg.shuffle_seed.is_none() && cfg.model_dir.is_none());
    }

    #[test]
    fn test_underscore_and_kebab_flags() {
        let cli = Cli::parse_from([
            "text-classifier",
            "--bow_model",
            "--test-with-fake-data",
            "--test_sample_percentage",
            "0.25",
            "--batch-size",
            "16",
            "--device",
            "cpu",
        ]);
        assert_eq!(cli.args.device, DeviceKind::Cpu);

        let cfg: ExperimentConfig = cli.args.into();
        assert!(cfg.bow_model);
        assert!(cfg.test_with_fake_data);
        assert_eq!(cfg.test_sample_percentage, 0.25);
        assert_eq!(cfg.batch_size, 16);
    }
}
