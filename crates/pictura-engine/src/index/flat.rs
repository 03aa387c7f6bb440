//! Flat exact inner-product index
//!
//! Linear scan over a dense row-major matrix. For the corpus sizes this
//! system targets, exact search is fast enough and always returns the
//! true top-k; approximate structures are deliberately out of scope.

use pictura_domain::error::{Error, Result};
use pictura_domain::value_objects::Embedding;
use pictura_domain::value_objects::embedding::inner_product;
use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// Flat vector index over `[n, d]` unit-norm rows.
///
/// Append-only while the ingestion pipeline owns it, read-only once the
/// search engine holds it. Because all rows are unit norm, inner product
/// equals cosine similarity.
///
/// # Performance
///
/// - `add`: O(d) per row
/// - `search`: O(n * d + n log k)
#[derive(Debug, Clone, PartialEq)]
pub struct FlatIndex {
    dims: usize,
    /// Row-major storage, `len() * dims` values
    data: Vec<f32>,
}

impl FlatIndex {
    /// Create an empty index for vectors of `dims` dimensions.
    pub fn new(dims: usize) -> Self {
        Self {
            dims,
            data: Vec::new(),
        }
    }

    /// Reconstruct an index from raw row-major data.
    ///
    /// Used by the artifact store after decoding; fails if the data is
    /// not a whole number of rows.
    pub fn from_raw(dims: usize, data: Vec<f32>) -> Result<Self> {
        if dims == 0 {
            return Err(Error::invalid_argument("index dimensions must be positive"));
        }
        if data.len() % dims != 0 {
            return Err(Error::artifact_corrupt(format!(
                "matrix has {} values, not a multiple of {} dimensions",
                data.len(),
                dims
            )));
        }
        Ok(Self { dims, data })
    }

    /// Number of stored rows.
    pub fn len(&self) -> usize {
        self.data.len() / self.dims.max(1)
    }

    /// Whether the index holds no rows.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Dimensionality this index was created with.
    pub fn dims(&self) -> usize {
        self.dims
    }

    /// Raw row-major values, for serialization.
    pub fn raw_data(&self) -> &[f32] {
        &self.data
    }

    /// Row `i` as a slice. Panics if out of bounds; callers index by
    /// positions the index itself returned.
    pub fn row(&self, i: usize) -> &[f32] {
        &self.data[i * self.dims..(i + 1) * self.dims]
    }

    /// Append rows to the index.
    ///
    /// Every vector must match the index dimensionality and contain only
    /// finite values; the whole call fails before anything is appended
    /// otherwise.
    pub fn add(&mut self, vectors: &[Embedding]) -> Result<()> {
        for embedding in vectors {
            self.validate_vector(&embedding.vector)?;
        }
        for embedding in vectors {
            self.data.extend_from_slice(&embedding.vector);
        }
        Ok(())
    }

    /// Exact top-k search by inner product.
    ///
    /// Returns `(row_position, score)` pairs ordered by descending score,
    /// ties broken by ascending row position. `k` larger than the row
    /// count returns all rows; an empty index or `k == 0` returns an
    /// empty list, never an error.
    pub fn search(&self, query: &[f32], k: usize) -> Result<Vec<(usize, f32)>> {
        if query.len() != self.dims {
            return Err(Error::dimension_mismatch(self.dims, query.len()));
        }
        if k == 0 || self.is_empty() {
            return Ok(Vec::new());
        }

        // Min-heap of the best k so far: the top is the current worst,
        // evicted when a better row arrives. O(n log k) instead of
        // sorting all n rows.
        let mut heap: BinaryHeap<ScoredRow> = BinaryHeap::with_capacity(k + 1);

        for row in 0..self.len() {
            let score = inner_product(query, self.row(row));
            let candidate = ScoredRow { score, row };

            if heap.len() < k {
                heap.push(candidate);
            } else if let Some(worst) = heap.peek() {
                if candidate < *worst {
                    heap.pop();
                    heap.push(candidate);
                }
            }
        }

        let mut results: Vec<ScoredRow> = heap.into_vec();
        results.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.row.cmp(&b.row))
        });

        Ok(results.into_iter().map(|s| (s.row, s.score)).collect())
    }

    fn validate_vector(&self, vector: &[f32]) -> Result<()> {
        if vector.len() != self.dims {
            return Err(Error::dimension_mismatch(self.dims, vector.len()));
        }
        for (i, &v) in vector.iter().enumerate() {
            if !v.is_finite() {
                return Err(Error::invalid_argument(format!(
                    "non-finite value {} at component {}",
                    v, i
                )));
            }
        }
        Ok(())
    }
}

/// Scored row for heap-based top-k selection.
///
/// Ordered so that `a > b` means a is WORSE than b (lower score, or equal
/// score at a higher row); `BinaryHeap` then acts as a min-heap whose top
/// is the weakest of the current best k.
#[derive(PartialEq)]
struct ScoredRow {
    score: f32,
    row: usize,
}

impl Eq for ScoredRow {}

impl Ord for ScoredRow {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .score
            .partial_cmp(&self.score)
            .unwrap_or(Ordering::Equal)
            .then_with(|| self.row.cmp(&other.row))
    }
}

impl PartialOrd for ScoredRow {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
