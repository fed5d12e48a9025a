// ============================================================
// Layer 4 — Label Binarizer
// ============================================================
// Turns raw categorical labels into one-hot indicator vectors.
//
//   fit(["b", "a", "b", "c"])  → classes = ["a", "b", "c"]
//   transform("b")             → [0.0, 1.0, 0.0]
//   inverse_transform([..])    → label at the arg-max column
//
// Classes are sorted so the column order does not depend on
// the order rows appear in the label file. When every label
// is numeric ("2", "10", "-1.5") the sort is numeric, so "10"
// comes after "2" rather than before it.
//
// There is always one column per class, even with exactly two
// classes, because the models end in a softmax over
// `num_classes` outputs.
//
// Reference: Rust Book §8 (Hash Maps)

use anyhow::{bail, Result};
use serde::Serialize;
use std::collections::{BTreeSet, HashMap};

#[derive(Debug, Clone, Serialize)]
pub struct LabelBinarizer {
    classes: Vec<String>,
    #[serde(skip)]
    index:   HashMap<String, usize>,
}

impl LabelBinarizer {
    /// Learn the class set from every label in the corpus.
    pub fn fit(labels: &[String]) -> Result<Self> {
        if labels.is_empty() {
            bail!("cannot fit a label binarizer over zero labels");
        }

        let mut classes: Vec<String> = labels
            .iter()
            .cloned()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let numeric: Option<Vec<f64>> = classes.iter().map(|c| c.parse::<f64>().ok()).collect();
        if let Some(values) = numeric {
            let mut paired: Vec<(f64, String)> = values.into_iter().zip(classes).collect();
            paired.sort_by(|a, b| a.0.total_cmp(&b.0));
            classes = paired.into_iter().map(|(_, c)| c).collect();
        }

        let index = classes
            .iter()
            .enumerate()
            .map(|(i, c)| (c.clone(), i))
            .collect();

        tracing::info!("Label binarizer fitted with {} classes", classes.len());
        Ok(Self { classes, index })
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn num_classes(&self) -> usize {
        self.classes.len()
    }

    pub fn class_index(&self, label: &str) -> Option<usize> {
        self.index.get(label).copied()
    }

    /// One-hot row for a class index.
    pub fn one_hot(&self, class_index: usize) -> Vec<f32> {
        let mut row = vec![0.0; self.classes.len()];
        if let Some(slot) = row.get_mut(class_index) {
            *slot = 1.0;
        }
        row
    }

    pub fn transform(&self, label: &str) -> Result<Vec<f32>> {
        match self.class_index(label) {
            Some(i) => Ok(self.one_hot(i)),
            None    => bail!("label '{label}' was not seen while fitting"),
        }
    }

    /// Class index of every label, in order.
    pub fn encode_all(&self, labels: &[String]) -> Result<Vec<usize>> {
        labels
            .iter()
            .map(|l| match self.class_index(l) {
                Some(i) => Ok(i),
                None    => bail!("label '{l}' was not seen while fitting"),
            })
            .collect()
    }

    /// Recover the label of an indicator row (arg-max column).
    pub fn inverse_transform(&self, indicator: &[f32]) -> Option<&str> {
        if indicator.len() != self.classes.len() {
            return None;
        }
        let (best, _) = indicator
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.total_cmp(b.1))?;
        self.classes.get(best).map(String::as_str)
    }
}
