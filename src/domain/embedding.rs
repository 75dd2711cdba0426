use serde::{Deserialize, Serialize};

/// Dense vector returned by the embedding model for one piece of text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Embedding {
    pub values: Vec<f32>,
}

impl Embedding {
    pub fn new(values: Vec<f32>) -> Self {
        Self { values }
    }

    pub fn dimensions(&self) -> usize {
        self.values.len()
    }

    /// Returns 0.0 for mismatched dimensions or zero-magnitude vectors.
    pub fn cosine_similarity(&self, other: &Self) -> f32 {
        if self.dimensions() != other.dimensions() {
            return 0.0;
        }

        let (dot, norm_a, norm_b) = self.values.iter().zip(&other.values).fold(
            (0.0_f32, 0.0_f32, 0.0_f32),
            |(dot, norm_a, norm_b), (a, b)| (dot + a * b, norm_a + a * a, norm_b + b * b),
        );

        let denominator = norm_a.sqrt() * norm_b.sqrt();
        if denominator == 0.0 {
            return 0.0;
        }

        dot / denominator
    }
}
