// ============================================================
// Layer 4 — Corpus Loaders
// ============================================================
// Two implementations of the CorpusSource trait:
//
//   CsvCorpusLoader — reads a data file and a label file with
//                     the `csv` crate. Both are headerless.
//                     Each data record is one document (fields
//                     joined with a space). Each label record
//                     contributes its first field.
//
//   FakeCorpus      — builds a deterministic synthetic corpus
//                     from a seed. Three classes, each with its
//                     own keyword pool, mixed with shared filler
//                     words so the task is learnable but not
//                     trivially separable by a single token.
//
// Reference: csv crate documentation
//            Rust Book §9 (Error Handling)

use anyhow::{bail, Context, Result};
use csv::ReaderBuilder;
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::path::{Path, PathBuf};

use crate::domain::document::RawCorpus;
use crate::domain::traits::CorpusSource;

/// Loads documents and labels from two CSV files.
pub struct CsvCorpusLoader {
    data_path:  PathBuf,
    label_path: PathBuf,
}

impl CsvCorpusLoader {
    pub fn new(data_path: impl Into<PathBuf>, label_path: impl Into<PathBuf>) -> Self {
        Self {
            data_path:  data_path.into(),
            label_path: label_path.into(),
        }
    }
}

impl CorpusSource for CsvCorpusLoader {
    fn load(&self) -> Result<RawCorpus> {
        let documents: Vec<String> = read_records(&self.data_path)?
            .into_iter()
            .map(|fields| fields.join(" "))
            .collect();
        tracing::info!(
            "Read {} documents from '{}'",
            documents.len(),
            self.data_path.display()
        );

        let mut labels = Vec::new();
        for (row, fields) in read_records(&self.label_path)?.into_iter().enumerate() {
            match fields.into_iter().next() {
                Some(label) => labels.push(label.trim().to_string()),
                None => bail!(
                    "label file '{}' has an empty record at row {}",
                    self.label_path.display(),
                    row + 1
                ),
            }
        }
        tracing::info!(
            "Read {} labels from '{}'",
            labels.len(),
            self.label_path.display()
        );

        RawCorpus::new(documents, labels)
    }
}

/// Read every record of a headerless CSV file as a list of owned fields.
/// `flexible` lets rows carry different field counts, which is common
/// when free text contains unquoted commas.
fn read_records(path: &Path) -> Result<Vec<Vec<String>>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("Cannot open '{}'", path.display()))?;

    let mut rows = Vec::new();
    for (i, record) in reader.records().enumerate() {
        let record = record
            .with_context(|| format!("Malformed record {} in '{}'", i + 1, path.display()))?;
        rows.push(record.iter().map(str::to_string).collect());
    }
    Ok(rows)
}

// ─── Fake corpus ──────────────────────────────────────────────────────────────

const FAKE_CLASSES: [(&str, [&str; 8]); 3] = [
    ("sports",   ["match", "goal", "team", "league", "coach", "score", "season", "player"]),
    ("science",  ["atom", "theory", "experiment", "cell", "energy", "physics", "lab", "molecule"]),
    ("politics", ["vote", "senate", "policy", "election", "minister", "law", "party", "campaign"]),
];

const FILLER: [&str; 10] = [
    "the", "a", "of", "and", "today", "new", "report", "about", "with", "this",
];

/// Deterministic synthetic corpus used by `--test_with_fake_data`.
pub struct FakeCorpus {
    size: usize,
    seed: u64,
}

impl FakeCorpus {
    pub fn new(size: usize, seed: u64) -> Self {
        Self { size, seed }
    }
}

impl CorpusSource for FakeCorpus {
    fn load(&self) -> Result<RawCorpus> {
        let mut rng       = StdRng::seed_from_u64(self.seed);
        let mut documents = Vec::with_capacity(self.size);
        let mut labels    = Vec::with_capacity(self.size);

        for _ in 0..self.size {
            let (label, keywords) = FAKE_CLASSES[rng.gen_range(0..FAKE_CLASSES.len())];
            let length = rng.gen_range(6..=12);
            let words: Vec<&str> = (0..length)
                .map(|_| {
                    if rng.gen_bool(0.5) {
                        keywords[rng.gen_range(0..keywords.len())]
                    } else {
                        FILLER[rng.gen_range(0..FILLER.len())]
                    }
                })
                .collect();
            documents.push(words.join(" "));
            labels.push(label.to_string());
        }

        tracing::info!("Generated {} fake documents (seed={})", self.size, self.seed);
        RawCorpus::new(documents, labels)
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_reads_documents_and_labels() {
        let dir = tempfile::tempdir().unwrap();
        let data  = dir.path().join("docs.csv");
        let label = dir.path().join("labels.csv");
        fs::write(&data, "a b\nb c\n\"c, a\"\na a\n").unwrap();
        fs::write(&label, "0\n1\n0\n1\n").unwrap();

        let corpus = CsvCorpusLoader::new(&data, &label).load().unwrap();
        assert_eq!(corpus.documents(), ["a b", "b c", "c, a", "a a"]);
        assert_eq!(corpus.labels(), ["0", "1", "0", "1"]);
    }

    #[test]
    fn test_joins_unquoted_fields() {
        let dir = tempfile::tempdir().unwrap();
        let data  = dir.path().join("docs.csv");
        let label = dir.path().join("labels.csv");
        fs::write(&data, "first,part\nsecond\n").unwrap();
        fs::write(&label, "x,ignored\ny\n").unwrap();

        let corpus = CsvCorpusLoader::new(&data, &label).load().unwrap();
        assert_eq!(corpus.documents(), ["first part", "second"]);
        assert_eq!(corpus.labels(), ["x", "y"]);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let dir    = tempfile::tempdir().unwrap();
        let loader = CsvCorpusLoader::new(dir.path().join("nope.csv"), dir.path().join("nope2.csv"));
        let err    = loader.load().unwrap_err();
        assert!(err.to_string().contains("Cannot open"));
    }

    #[test]
    fn test_count_mismatch_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let data  = dir.path().join("docs.csv");
        let label = dir.path().join("labels.csv");
        fs::write(&data, "a\nb\nc\n").unwrap();
        fs::write(&label, "0\n1\n").unwrap();

        assert!(CsvCorpusLoader::new(&data, &label).load().is_err());
    }

    #[test]
    fn test_fake_corpus_is_deterministic() {
        let a = FakeCorpus::new(50, 7).load().unwrap();
        let b = FakeCorpus::new(50, 7).load().unwrap();
        assert_eq!(a.len(), 50);
        assert_eq!(a.documents(), b.documents());
        assert_eq!(a.labels(), b.labels());
        assert!(a
            .labels()
            .iter()
            .all(|l| FAKE_CLASSES.iter().any(|(name, _)| name == l)));
    }
}
