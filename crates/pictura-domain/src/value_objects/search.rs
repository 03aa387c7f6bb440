//! Search Result Value Object

use serde::{Deserialize, Serialize};

/// Value Object: Ranked Search Hit
///
/// One entry of a top-k result list. Lists are ordered by descending
/// score; ties are broken by the ascending original row position of the
/// corpus item, so repeated queries over the same index are
/// deterministic.
///
/// ## Example
///
/// ```rust
/// use pictura_domain::value_objects::SearchHit;
///
/// let hit = SearchHit {
///     name: "1000268201_693b08cb0e.jpg".to_string(),
///     score: 0.92,
/// };
/// assert!(hit.score > 0.9);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchHit {
    /// Corpus item identifier (image filename)
    pub name: String,
    /// Inner-product similarity (equals cosine similarity for unit-norm
    /// vectors; higher is better)
    pub score: f32,
}

impl SearchHit {
    /// Create a new search hit
    pub fn new<S: Into<String>>(name: S, score: f32) -> Self {
        Self {
            name: name.into(),
            score,
        }
    }
}
