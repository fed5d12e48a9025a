// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// The driver needs a corpus but should not care where it
// comes from. Two sources exist today:
//   - CsvCorpusLoader → a data file + a label file on disk
//   - FakeCorpus      → a seeded synthetic corpus for smoke runs
//
// The application layer only sees CorpusSource and picks the
// implementation from the --test_with_fake_data flag.
//
// Reference: Rust Book §10 (Traits: Defining Shared Behaviour)

use anyhow::Result;

use crate::domain::document::RawCorpus;

// ─── CorpusSource ─────────────────────────────────────────────────────────────
/// Any component that can produce a labelled corpus.
pub trait CorpusSource {
    /// Load every document and its label.
    fn load(&self) -> Result<RawCorpus>;
}
