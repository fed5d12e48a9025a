// ============================================================
// Layer 1 — CLI Arguments
// ============================================================
// Every configurable flag of a run. Flag names keep their
// underscore spelling (`--bow_model`); each also accepts the
// kebab-case spelling (`--bow-model`).
//
// clap's derive macros automatically generate:
//   - help text (--help)
//   - error messages for bad values
//   - type conversion (string → usize, f64, etc.)
//
// Reference: Rust Book §12 (Building a CLI Program)

use clap::{Args, ValueEnum};
use std::path::PathBuf;

use crate::application::experiment::ExperimentConfig;

/// Where tensors live.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeviceKind {
    /// NdArray backend on the host CPU
    Cpu,
    /// Wgpu backend on the default GPU adapter
    Gpu,
}

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Train and test on a generated corpus instead of the data files
    #[arg(long = "test_with_fake_data", alias = "test-with-fake-data")]
    pub test_with_fake_data: bool,

    /// Use the bag-of-words model (the GRU model runs otherwise)
    #[arg(long = "bow_model", alias = "bow-model")]
    pub bow_model: bool,

    /// Directory holding the data and label files
    #[arg(long = "data_dir", alias = "data-dir", default_value = "../../data/data_by_ocean/eclipse/")]
    pub data_dir: PathBuf,

    /// CSV with one document per record
    #[arg(long = "data_file", alias = "data-file", default_value = "textForLDA_final.csv")]
    pub data_file: String,

    /// CSV with one label per record
    #[arg(long = "label_file", alias = "label-file", default_value = "fixer.csv")]
    pub label_file: String,

    /// Fraction of documents held out, taken from the end of the corpus
    #[arg(long = "test_sample_percentage", alias = "test-sample-percentage", default_value_t = 0.2)]
    pub test_sample_percentage: f64,

    /// Most distinct words kept, <UNK> included
    #[arg(long = "vocabulary_size", alias = "vocabulary-size", default_value_t = 100_000)]
    pub vocabulary_size: usize,

    /// Token ids per document after truncation / padding
    #[arg(long = "max_document_length", alias = "max-document-length", default_value_t = 10_000)]
    pub max_document_length: usize,

    /// Width of each word embedding (and of the GRU state)
    #[arg(long = "embedding_size", alias = "embedding-size", default_value_t = 500)]
    pub embedding_size: usize,

    /// Optimisation steps to run
    #[arg(long, default_value_t = 100)]
    pub steps: usize,

    #[arg(long = "batch_size", alias = "batch-size", default_value_t = 128)]
    pub batch_size: usize,

    /// Adam learning rate
    #[arg(long = "learning_rate", alias = "learning-rate", default_value_t = 0.01)]
    pub learning_rate: f64,

    /// Log (and record) the mean loss every N steps
    #[arg(long = "log_every", alias = "log-every", default_value_t = 10)]
    pub log_every: usize,

    /// Seed for weight init, batch order and fake data
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Shuffle documents with this seed before splitting
    #[arg(long = "shuffle_seed", alias = "shuffle-seed")]
    pub shuffle_seed: Option<u64>,

    /// Write config, vocabulary, classes, weights and metrics here
    #[arg(long = "model_dir", alias = "model-dir")]
    pub model_dir: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = DeviceKind::Gpu)]
    pub device: DeviceKind,
}

/// The application layer never sees clap types.
impl From<RunArgs> for ExperimentConfig {
    fn from(a: RunArgs) -> Self {
        ExperimentConfig {
            test_with_fake_data:    a.test_with_fake_data,
            bow_model:              a.bow_model,
            data_dir:               a.data_dir,
            data_file:              a.data_file,
            label_file:             a.label_file,
            test_sample_percentage: a.test_sample_percentage,
            vocabulary_size:        a.vocabulary_size,
            max_document_length:    a.max_document_length,
            embedding_size:         a.embedding_size,
            steps:                  a.steps,
            batch_size:             a.batch_size,
            learning_rate:          a.learning_rate,
            log_every:              a.log_every,
            seed:                   a.seed,
            shuffle_seed:           a.shuffle_seed,
            model_dir:              a.model_dir,
        }
    }
}
