// ============================================================
// Layer 5 — Text Classifier Models
// ============================================================
// Two interchangeable document encoders behind one trait:
//
//   BowClassifier  (bag of words)
//     ids [B, S] → Embedding → masked mean over S → [B, E]
//                → Linear → logits [B, C]
//     Padding / unknown ids (0) are left out of the mean, so
//     word order and document length do not matter.
//
//   RnnClassifier  (gated recurrent unit)
//     ids [B, S] → Embedding → [B, S, E] → GRU(E → E)
//                → hidden state at t = S-1 → [B, E]
//                → Linear → logits [B, C]
//
// Both are trained against one-hot targets with softmax
// cross-entropy:  loss = mean_b( -Σ_c y[b,c] · log softmax(z)[b,c] )
//
// ModelKind picks between them. TextClassifier is what the
// trainer and evaluator program against.
//
// Reference: Burn Book §3 (Building Blocks)
//            Cho et al. (2014) GRU

use burn::{
    nn::{
        gru::{Gru, GruConfig},
        Embedding, EmbeddingConfig,
        Linear, LinearConfig,
    },
    prelude::*,
    tensor::activation::{log_softmax, softmax},
};
use serde::{Deserialize, Serialize};

/// Which document encoder to train.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ModelKind {
    BagOfWords,
    Recurrent,
}

impl ModelKind {
    /// `--bow_model` selects bag-of-words; without it the GRU model runs.
    pub fn from_flag(bow_model: bool) -> Self {
        if bow_model { Self::BagOfWords } else { Self::Recurrent }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::BagOfWords => "bag-of-words",
            Self::Recurrent  => "gru",
        }
    }
}

// NOTE: #[derive(Config)] already generates Clone and Serialize/Deserialize
#[derive(Config, Debug)]
pub struct ClassifierConfig {
    /// Rows of the embedding table; every token id must be below this
    pub vocab_size:     usize,
    /// Embedding width, also the GRU hidden width
    pub embedding_size: usize,
    pub num_classes:    usize,
}

impl ClassifierConfig {
    pub fn init_bow<B: Backend>(&self, device: &B::Device) -> BowClassifier<B> {
        BowClassifier {
            embedding: EmbeddingConfig::new(self.vocab_size, self.embedding_size).init(device),
            output:    LinearConfig::new(self.embedding_size, self.num_classes).init(device),
        }
    }

    pub fn init_rnn<B: Backend>(&self, device: &B::Device) -> RnnClassifier<B> {
        RnnClassifier {
            embedding: EmbeddingConfig::new(self.vocab_size, self.embedding_size).init(device),
            gru:       GruConfig::new(self.embedding_size, self.embedding_size, true).init(device),
            output:    LinearConfig::new(self.embedding_size, self.num_classes).init(device),
        }
    }
}

/// Predictions and loss for one batch.
pub struct ClassifierOutput<B: Backend> {
    /// Arg-max class per document — shape: [batch]
    pub classes:       Tensor<B, 1, Int>,
    /// Softmax over classes — shape: [batch, num_classes]
    pub probabilities: Tensor<B, 2>,
    /// Mean softmax cross-entropy — shape: [1]
    pub loss:          Tensor<B, 1>,
}

/// A module that scores token-id sequences against a fixed class set.
pub trait TextClassifier<B: Backend>: Module<B> {
    /// token_ids: [batch, seq_len] → logits: [batch, num_classes]
    fn forward(&self, token_ids: Tensor<B, 2, Int>) -> Tensor<B, 2>;

    /// Class indices and probabilities, no loss.
    fn predict(&self, token_ids: Tensor<B, 2, Int>) -> (Tensor<B, 1, Int>, Tensor<B, 2>) {
        let logits = self.forward(token_ids);
        let classes = logits.clone().argmax(1).flatten::<1>(0, 1);
        (classes, softmax(logits, 1))
    }

    /// Forward pass plus loss against one-hot `targets` ([batch, num_classes]).
    fn forward_with_loss(
        &self,
        token_ids: Tensor<B, 2, Int>,
        targets:   Tensor<B, 2>,
    ) -> ClassifierOutput<B> {
        let logits  = self.forward(token_ids);
        let classes = logits.clone().argmax(1).flatten::<1>(0, 1);
        let loss    = softmax_cross_entropy(logits.clone(), targets);
        ClassifierOutput {
            classes,
            probabilities: softmax(logits, 1),
            loss,
        }
    }
}

/// Mean over the batch of -Σ y · log softmax(logits).
pub fn softmax_cross_entropy<B: Backend>(logits: Tensor<B, 2>, targets: Tensor<B, 2>) -> Tensor<B, 1> {
    (log_softmax(logits, 1) * targets)
        .sum_dim(1)
        .mean()
        .neg()
}

// ─── Bag of words ─────────────────────────────────────────────────────────────

#[derive(Module, Debug)]
pub struct BowClassifier<B: Backend> {
    pub embedding: Embedding<B>,
    pub output:    Linear<B>,
}

impl<B: Backend> TextClassifier<B> for BowClassifier<B> {
    fn forward(&self, token_ids: Tensor<B, 2, Int>) -> Tensor<B, 2> {
        // 1.0 for real tokens, 0.0 for id 0 — shape: [batch, seq_len]
        let mask = token_ids.clone().equal_elem(0).bool_not().float();

        let embedded = self.embedding.forward(token_ids);
        let [batch_size, _, embedding_size] = embedded.dims();

        let summed = (embedded * mask.clone().unsqueeze_dim::<3>(2))
            .sum_dim(1)
            .reshape([batch_size, embedding_size]);

        // All-padding documents encode to the zero vector instead of NaN
        let counts   = mask.sum_dim(1).clamp_min(1.0);
        let encoding = summed / counts;

        self.output.forward(encoding)
    }
}

// ─── Recurrent ────────────────────────────────────────────────────────────────

#[derive(Module, Debug)]
pub struct RnnClassifier<B: Backend> {
    pub embedding: Embedding<B>,
    pub gru:       Gru<B>,
    pub output:    Linear<B>,
}

impl<B: Backend> TextClassifier<B> for RnnClassifier<B> {
    fn forward(&self, token_ids: Tensor<B, 2, Int>) -> Tensor<B, 2> {
        let embedded = self.embedding.forward(token_ids);
        let [batch_size, seq_len, _] = embedded.dims();

        // Hidden state after every timestep — shape: [batch, seq_len, hidden]
        let states = self.gru.forward(embedded, None);
        let [_, _, hidden] = states.dims();

        let encoding = states
            .slice([0..batch_size, seq_len - 1..seq_len, 0..hidden])
            .reshape([batch_size, hidden]);

        self.output.forward(encoding)
    }
}
