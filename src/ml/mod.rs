// ============================================================
// Layer 5 — ML / Model Layer (Burn)
// ============================================================
// All Burn model, optimiser and backend code lives here
// (the batcher in the data layer is the one exception, since
// it has to produce tensors).
//
//   model.rs      — BowClassifier and RnnClassifier behind
//                   the TextClassifier trait, plus the
//                   softmax cross-entropy loss
//
//   trainer.rs    — fixed-step Adam training loop
//
//   evaluator.rs  — batched prediction on the inner backend
//                   and the accuracy score
//
// Reference: Burn Book §3 (Building Blocks)
//            Burn Book §5 (Training)

/// Bag-of-words and GRU text classifiers
pub mod model;

/// Step-counted training loop
pub mod trainer;

/// Prediction over the test partition and accuracy
pub mod evaluator;
