// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
// Output that outlives the process, written only when the
// user passes --model_dir:
//
//   artifacts.rs — run config, vocabulary, label classes and
//                  trained weights (Burn CompactRecorder)
//
//   metrics.rs   — step,loss CSV written by the trainer
//
// Reference: Rust Book §7 (Modules)
//            Burn Book §5 (Checkpointing)

/// Run artifacts: config, vocabulary, classes, weights
pub mod artifacts;

/// Training loss CSV logger
pub mod metrics;
