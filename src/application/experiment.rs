// ============================================================
// Layer 2 — ExperimentUseCase
// ============================================================
// Orchestrates one train-then-evaluate run in order:
//
//   Step 1: Load documents and labels   (Layer 4 - data)
//   Step 2: Fit vocabulary, vectorise   (Layer 4 - data)
//   Step 3: Fit label binarizer         (Layer 4 - data)
//   Step 4: Split train/test            (Layer 4 - data)
//   Step 5: Save run artifacts          (Layer 6 - infra)
//   Step 6: Train the chosen model      (Layer 5 - ml)
//   Step 7: Predict test set and score  (Layer 5 - ml)
//
// Reference: Rust Book §10 (Generics and Traits)
//            Burn Book §5 (Training)

use anyhow::{bail, Result};
use burn::{module::AutodiffModule, tensor::backend::AutodiffBackend};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::data::{
    dataset::{TextDataset, TextSample},
    labels::LabelBinarizer,
    loader::{CsvCorpusLoader, FakeCorpus},
    splitter::{shuffle_with_seed, split_tail},
    vocabulary::VocabularyProcessor,
};
use crate::domain::traits::CorpusSource;
use crate::infra::{artifacts::ArtifactStore, metrics::MetricsLogger};
use crate::ml::{
    evaluator,
    model::{ClassifierConfig, ModelKind, TextClassifier},
    trainer,
};

/// Documents generated by `--test_with_fake_data`.
pub const FAKE_CORPUS_SIZE: usize = 500;

// ─── Experiment Configuration ────────────────────────────────────────────────
// Every knob of a run. Serialisable so the exact settings can be
// stored next to the trained weights.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExperimentConfig {
    pub test_with_fake_data:    bool,
    pub bow_model:              bool,
    pub data_dir:               PathBuf,
    pub data_file:              String,
    pub label_file:             String,
    pub test_sample_percentage: f64,
    pub vocabulary_size:        usize,
    pub max_document_length:    usize,
    pub embedding_size:         usize,
    pub steps:                  usize,
    pub batch_size:             usize,
    pub learning_rate:          f64,
    pub log_every:              usize,
    pub seed:                   u64,
    pub shuffle_seed:           Option<u64>,
    pub model_dir:              Option<PathBuf>,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            test_with_fake_data:    false,
            bow_model:              false,
            data_dir:               PathBuf::from("../../data/data_by_ocean/eclipse/"),
            data_file:              "textForLDA_final.csv".to_string(),
            label_file:             "fixer.csv".to_string(),
            test_sample_percentage: 0.2,
            vocabulary_size:        100_000,
            max_document_length:    10_000,
            embedding_size:         500,
            steps:                  100,
            batch_size:             128,
            learning_rate:          0.01,
            log_every:              10,
            seed:                   42,
            shuffle_seed:           None,
            model_dir:              None,
        }
    }
}

impl ExperimentConfig {
    pub fn data_path(&self) -> PathBuf {
        self.data_dir.join(&self.data_file)
    }

    pub fn label_path(&self) -> PathBuf {
        self.data_dir.join(&self.label_file)
    }

    pub fn model_kind(&self) -> ModelKind {
        ModelKind::from_flag(self.bow_model)
    }

    /// Reject settings that cannot produce a run.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.test_sample_percentage) {
            bail!(
                "test_sample_percentage must be within [0, 1], got {}",
                self.test_sample_percentage
            );
        }
        for (name, value) in [
            ("vocabulary_size", self.vocabulary_size),
            ("max_document_length", self.max_document_length),
            ("embedding_size", self.embedding_size),
            ("batch_size", self.batch_size),
        ] {
            if value == 0 {
                bail!("{name} must be at least 1");
            }
        }
        if self.learning_rate <= 0.0 {
            bail!("learning_rate must be positive, got {}", self.learning_rate);
        }
        Ok(())
    }
}

/// Outcome of one run.
#[derive(Debug, Clone, Serialize)]
pub struct ExperimentReport {
    pub model_kind:      ModelKind,
    pub accuracy:        f64,
    /// Mean probability given to the predicted class on the test set
    pub mean_confidence: f64,
    pub train_size:      usize,
    pub test_size:       usize,
    pub num_classes:     usize,
    pub vocabulary_size: usize,
}

// ─── ExperimentUseCase ───────────────────────────────────────────────────────
pub struct ExperimentUseCase {
    config: ExperimentConfig,
}

impl ExperimentUseCase {
    pub fn new(config: ExperimentConfig) -> Self {
        Self { config }
    }

    /// Run the full pipeline on backend `B` and report test accuracy.
    pub fn execute<B: AutodiffBackend>(&self, device: B::Device) -> Result<ExperimentReport> {
        let cfg = &self.config;
        cfg.validate()?;

        // ── Step 1: Load raw corpus ──────────────────────────────────────────
        let source: Box<dyn CorpusSource> = if cfg.test_with_fake_data {
            tracing::info!("Generating {} fake documents (seed {})", FAKE_CORPUS_SIZE, cfg.seed);
            Box::new(FakeCorpus::new(FAKE_CORPUS_SIZE, cfg.seed))
        } else {
            tracing::info!(
                "Loading corpus from '{}' and labels from '{}'",
                cfg.data_path().display(),
                cfg.label_path().display()
            );
            Box::new(CsvCorpusLoader::new(cfg.data_path(), cfg.label_path()))
        };
        let corpus = source.load()?;
        tracing::info!("Loaded {} labelled documents", corpus.len());

        // ── Step 2: Vocabulary + token ids ───────────────────────────────────
        // Fails on an empty corpus, before any model exists
        let processor = VocabularyProcessor::new(cfg.max_document_length, cfg.vocabulary_size);
        let (vocabulary, token_ids) = processor.fit_transform(corpus.documents())?;

        // ── Step 3: Labels → class indices + one-hot rows ────────────────────
        let binarizer = LabelBinarizer::fit(corpus.labels())?;
        let classes   = binarizer.encode_all(corpus.labels())?;
        let targets: Vec<Vec<f32>> = classes.iter().map(|&c| binarizer.one_hot(c)).collect();
        tracing::info!("Found {} classes", binarizer.num_classes());

        // ── Step 4: Train/test split ─────────────────────────────────────────
        let mut samples = TextSample::zip_all(token_ids, targets, classes)?;
        if let Some(seed) = cfg.shuffle_seed {
            tracing::info!("Shuffling samples before the split (seed {seed})");
            shuffle_with_seed(&mut samples, seed);
        }
        let (train, test) = split_tail(samples, cfg.test_sample_percentage)?;
        tracing::info!("Split: {} train, {} test", train.len(), test.len());
        if train.is_empty() {
            bail!("training partition is empty; lower test_sample_percentage or add documents");
        }
        if test.is_empty() {
            bail!("test partition is empty; raise test_sample_percentage or add documents");
        }
        let (train_size, test_size) = (train.len(), test.len());

        // ── Step 5: Artifacts ────────────────────────────────────────────────
        let store = match &cfg.model_dir {
            Some(dir) => {
                let store = ArtifactStore::new(dir)?;
                store.save_config(cfg)?;
                store.save_vocabulary(&vocabulary)?;
                store.save_classes(&binarizer)?;
                Some(store)
            }
            None => None,
        };

        // ── Steps 6 + 7: Train and score ─────────────────────────────────────
        B::seed(cfg.seed);
        let model_cfg = ClassifierConfig::new(
            vocabulary.len(),
            cfg.embedding_size,
            binarizer.num_classes(),
        );
        let train = TextDataset::new(train);
        let test  = TextDataset::new(test);
        let kind  = cfg.model_kind();
        tracing::info!("Training {} model", kind.name());

        let (accuracy, mean_confidence) = match kind {
            ModelKind::BagOfWords => fit_and_score::<B, _>(
                model_cfg.init_bow::<B>(&device), train, test, cfg, &device, store.as_ref(),
            )?,
            ModelKind::Recurrent => fit_and_score::<B, _>(
                model_cfg.init_rnn::<B>(&device), train, test, cfg, &device, store.as_ref(),
            )?,
        };
        tracing::info!(
            "Test accuracy: {:.4} (mean confidence {:.4})",
            accuracy,
            mean_confidence
        );

        Ok(ExperimentReport {
            model_kind: kind,
            accuracy,
            mean_confidence,
            train_size,
            test_size,
            num_classes: binarizer.num_classes(),
            vocabulary_size: vocabulary.len(),
        })
    }
}

/// Train `model`, optionally record it, then score it on `test`.
/// Returns (accuracy, mean confidence).
fn fit_and_score<B, M>(
    model:  M,
    train:  TextDataset,
    test:   TextDataset,
    cfg:    &ExperimentConfig,
    device: &B::Device,
    store:  Option<&ArtifactStore>,
) -> Result<(f64, f64)>
where
    B: AutodiffBackend,
    M: TextClassifier<B> + AutodiffModule<B>,
    M::InnerModule: TextClassifier<B::InnerBackend>,
{
    let metrics = match store {
        Some(store) => Some(MetricsLogger::new(store.dir())?),
        None => None,
    };

    let model = trainer::fit(model, train, cfg, device, metrics.as_ref())?;
    if let Some(store) = store {
        store.save_model::<B, _>(&model)?;
    }

    let truth       = test.class_indices();
    let predictions = evaluator::predict::<B::InnerBackend, _>(
        &model.valid(),
        test,
        cfg.batch_size,
        device,
    );
    let predicted: Vec<usize> = predictions.iter().map(|p| p.class_index).collect();
    let accuracy = evaluator::accuracy(&truth, &predicted)?;
    Ok((accuracy, evaluator::mean_confidence(&predictions)))
}
