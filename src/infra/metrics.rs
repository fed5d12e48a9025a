// ============================================================
// Layer 6 — Metrics Logger
// ============================================================
// Appends the training loss to a CSV file at every logging
// interval, so a run's learning curve survives the process.
//
// Output file: <model_dir>/metrics.csv
//
// Example CSV output:
//   step,loss
//   10,2.684120
//   20,1.902233
//   ...
//
// Each row's loss is the mean over the batches since the
// previous row, not the loss of the single last batch.
//
// Reference: Rust Book §12 (I/O and File Handling)

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs::{self, OpenOptions},
    io::Write,
    path::{Path, PathBuf},
};

/// One logged point of the training curve.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepMetrics {
    /// Optimisation steps completed so far (starts at 1)
    pub step: usize,

    /// Mean softmax cross-entropy since the previous row
    pub loss: f64,
}

impl StepMetrics {
    pub fn new(step: usize, loss: f64) -> Self {
        Self { step, loss }
    }
}

pub struct MetricsLogger {
    csv_path: PathBuf,
}

impl MetricsLogger {
    /// Start a fresh metrics.csv in `dir`, replacing one from an earlier run.
    pub fn new(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)?;

        let csv_path = dir.join("metrics.csv");
        let mut f = fs::File::create(&csv_path)
            .with_context(|| format!("Cannot create '{}'", csv_path.display()))?;
        writeln!(f, "step,loss")?;
        tracing::debug!("Created metrics CSV: '{}'", csv_path.display());

        Ok(Self { csv_path })
    }

    pub fn log(&self, m: &StepMetrics) -> Result<()> {
        let mut f = OpenOptions::new()
            .append(true)
            .open(&self.csv_path)?;

        writeln!(f, "{},{:.6}", m.step, m.loss)?;
        Ok(())
    }

    pub fn csv_path(&self) -> &Path {
        &self.csv_path
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_appends_rows_after_header() {
        let dir    = tempfile::tempdir().unwrap();
        let logger = MetricsLogger::new(dir.path()).unwrap();
        logger.log(&StepMetrics::new(10, 1.5)).unwrap();
        logger.log(&StepMetrics::new(20, 0.25)).unwrap();

        let csv = fs::read_to_string(logger.csv_path()).unwrap();
        assert_eq!(csv, "step,loss\n10,1.500000\n20,0.250000\n");
    }

    #[test]
    fn test_new_run_truncates_old_file() {
        let dir = tempfile::tempdir().unwrap();
        MetricsLogger::new(dir.path()).unwrap().log(&StepMetrics::new(1, 9.0)).unwrap();
        let logger = MetricsLogger::new(dir.path()).unwrap();

        let csv = fs::read_to_string(logger.csv_path()).unwrap();
        assert_eq!(csv, "step,loss\n");
    }
}
