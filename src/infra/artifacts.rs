// ============================================================
// Layer 6 — Artifact Store
// ============================================================
// Writes everything needed to reproduce or reuse a run into
// the directory given by --model_dir:
//
//   model_dir/
//     experiment_config.json   ← every flag of this run
//     vocabulary.json          ← WordLevel tokenizer (word → id)
//     classes.json             ← label classes in column order
//     model.mpk.gz             ← trained weights (CompactRecorder)
//     metrics.csv              ← step,loss (see metrics.rs)
//
// Burn's CompactRecorder:
//   - Serialises model parameters to MessagePack format
//   - Compresses with gzip
//   - Stores floats at half precision
//
// Reference: Burn Book §5 (Records and Checkpointing)
//            Rust Book §9 (Error Handling)

use anyhow::{Context, Result};
use burn::{
    prelude::*,
    record::{CompactRecorder, Recorder},
};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::application::experiment::ExperimentConfig;
use crate::data::{labels::LabelBinarizer, vocabulary::Vocabulary};

pub struct ArtifactStore {
    dir: PathBuf,
}

impl ArtifactStore {
    /// Open (and create if needed) the artifact directory.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)
            .with_context(|| format!("Cannot create model directory '{}'", dir.display()))?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn save_config(&self, cfg: &ExperimentConfig) -> Result<()> {
        let path = self.dir.join("experiment_config.json");
        let json = serde_json::to_string_pretty(cfg)?;
        fs::write(&path, json)
            .with_context(|| format!("Cannot write config to '{}'", path.display()))?;
        tracing::debug!("Saved experiment config to '{}'", path.display());
        Ok(())
    }

    pub fn save_vocabulary(&self, vocabulary: &Vocabulary) -> Result<()> {
        let path = self.dir.join("vocabulary.json");
        vocabulary.save(&path)?;
        tracing::debug!("Saved {} vocabulary entries to '{}'", vocabulary.len(), path.display());
        Ok(())
    }

    pub fn save_classes(&self, binarizer: &LabelBinarizer) -> Result<()> {
        let path = self.dir.join("classes.json");
        let json = serde_json::to_string_pretty(binarizer.classes())?;
        fs::write(&path, json)
            .with_context(|| format!("Cannot write classes to '{}'", path.display()))?;
        Ok(())
    }

    /// Record the model's parameters. The recorder appends `.mpk.gz`.
    pub fn save_model<B: Backend, M: Module<B>>(&self, model: &M) -> Result<()> {
        let path = self.dir.join("model");
        CompactRecorder::new()
            .record(model.clone().into_record(), path.clone())
            .with_context(|| format!("Failed to save model to '{}'", path.display()))?;
        tracing::info!("Saved trained model under '{}'", self.dir.display());
        Ok(())
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::vocabulary::VocabularyProcessor;
    use crate::ml::model::ClassifierConfig;
    use burn::backend::NdArray;

    #[test]
    fn test_writes_every_artifact() {
        let dir   = tempfile::tempdir().unwrap();
        let store = ArtifactStore::new(dir.path().join("run")).unwrap();

        let docs   = vec!["a b".to_string(), "b c".to_string()];
        let labels = vec!["x".to_string(), "y".to_string()];
        let vocab  = VocabularyProcessor::new(3, 10).fit(&docs).unwrap();
        let lb     = LabelBinarizer::fit(&labels).unwrap();
        let model  = ClassifierConfig::new(4, 2, 2).init_bow::<NdArray<f32>>(&Default::default());

        store.save_config(&ExperimentConfig::default()).unwrap();
        store.save_vocabulary(&vocab).unwrap();
        store.save_classes(&lb).unwrap();
        store.save_model::<NdArray<f32>, _>(&model).unwrap();

        let classes: Vec<String> =
            serde_json::from_str(&fs::read_to_string(store.dir().join("classes.json")).unwrap()).unwrap();
        assert_eq!(classes, vec!["x", "y"]);

        let cfg: ExperimentConfig = serde_json::from_str(
            &fs::read_to_string(store.dir().join("experiment_config.json")).unwrap(),
        )
        .unwrap();
        assert_eq!(cfg.steps, ExperimentConfig::default().steps);

        assert!(store.dir().join("vocabulary.json").exists());
        let has_model = fs::read_dir(store.dir())
            .unwrap()
            .filter_map(|e| e.ok())
            .any(|e| e.file_name().to_string_lossy().starts_with("model"));
        assert!(has_model);
    }
}
