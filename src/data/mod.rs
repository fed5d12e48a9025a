// ============================================================
// Layer 4 — Data Pipeline
// ============================================================
// Everything between raw CSV rows and tensor batches.
//
//   data file + label file
//       │
//       ▼
//   CsvCorpusLoader   → parallel document / label strings
//       │
//       ├──────────────────────────┐
//       ▼                          ▼
//   VocabularyProcessor        LabelBinarizer
//   (doc → [max_len] ids)      (label → one-hot row)
//       │                          │
//       └────────────┬─────────────┘
//                    ▼
//   TextSample        → (token_ids, target, class_index)
//       │
//       ▼
//   split_tail        → train = head, test = last floor(p·N)
//       │
//       ▼
//   TextDataset       → implements Burn's Dataset trait
//       │
//       ▼
//   TextBatcher       → stacks samples into tensor batches
//
// Reference: Burn Book §4 (Datasets and Dataloaders)

/// Reads the corpus from CSV files, or generates a fake one
pub mod loader;

/// Word → id mapping with fixed-length encoding
pub mod vocabulary;

/// Raw labels → one-hot indicator rows
pub mod labels;

/// Implements Burn's Dataset trait for vectorised documents
pub mod dataset;

/// Implements Burn's Batcher trait to create tensor batches
pub mod batcher;

/// Order-preserving train/test split and opt-in seeded shuffle
pub mod splitter;
