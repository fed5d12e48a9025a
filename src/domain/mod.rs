// ============================================================
// Layer 3 — Domain Layer
// ============================================================
// Plain Rust structs and traits that describe what a corpus
// IS, with no knowledge of CSV parsing, tokenisation or Burn.
//
// Rules for this layer:
//   - NO Burn framework types allowed here
//   - NO file I/O
//   - Only plain Rust structs, enums, and traits
//
// Reference: Rust Book §5 (Structs), §10 (Traits)

// Raw documents + labels as loaded from disk
pub mod document;

// Abstractions the data layer implements
pub mod traits;
