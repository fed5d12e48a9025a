// ============================================================
// Layer 2 — Application Layer
// ============================================================
// Owns the run configuration and sequences the data, ml and
// infra layers into one experiment. The CLI layer hands it an
// ExperimentConfig and a backend; it never sees clap types.
//
// Reference: Rust Book §7 (Modules)

/// ExperimentConfig and the train-then-evaluate pipeline
pub mod experiment;
