//! Embedding Value Object
//!
//! A fixed-dimension vector placing an image or a text query in the
//! shared similarity space. Every embedding handed to the engine must be
//! unit L2 norm so that inner product equals cosine similarity; adapters
//! normalize before returning, the engine does not re-normalize.

use crate::constants::NORM_TOLERANCE;
use serde::{Deserialize, Serialize};

/// Value Object: Semantic Embedding
///
/// ## Invariants
///
/// - `vector.len() == dimensions`
/// - `l2_norm(&vector) == 1.0` within [`NORM_TOLERANCE`]
///
/// ## Example
///
/// ```rust
/// use pictura_domain::value_objects::Embedding;
///
/// let embedding = Embedding::new(vec![0.6, 0.8], "clip-vit-base-patch32");
/// assert!(embedding.is_unit_norm());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Embedding {
    /// The embedding vector values
    pub vector: Vec<f32>,
    /// Name of the model that generated this embedding
    pub model: String,
    /// Dimensionality of the embedding vector
    pub dimensions: usize,
}

impl Embedding {
    /// Create an embedding from a raw vector, recording its dimensionality.
    pub fn new<S: Into<String>>(vector: Vec<f32>, model: S) -> Self {
        let dimensions = vector.len();
        Self {
            vector,
            model: model.into(),
            dimensions,
        }
    }

    /// Whether the vector satisfies the unit-norm invariant.
    pub fn is_unit_norm(&self) -> bool {
        (l2_norm(&self.vector) - 1.0).abs() <= NORM_TOLERANCE
    }
}

/// Compute the L2 norm of a vector.
pub fn l2_norm(v: &[f32]) -> f32 {
    v.iter().map(|x| x * x).sum::<f32>().sqrt()
}

/// Divide a vector by its L2 norm.
///
/// A zero vector is returned unchanged; callers that must reject zero
/// input (the adapters) check for it before normalizing.
pub fn l2_normalize(v: &[f32]) -> Vec<f32> {
    let norm = l2_norm(v);
    if norm == 0.0 {
        return v.to_vec();
    }
    v.iter().map(|x| x / norm).collect()
}

/// Inner product of two equal-length vectors.
pub fn inner_product(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}
