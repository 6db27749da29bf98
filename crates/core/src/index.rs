//! Vector collaborator boundary.
//!
//! The cascade needs exactly two operations from the outside: embed a user
//! profile, and find the nearest catalog vectors. Both are traits so the
//! production services (SBERT embeddings, a FAISS index) stay external; the
//! in-process implementations here serve batch tooling and tests.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use crate::domain::profile::UserProfile;
use crate::errors::CollaboratorError;

/// Nearest-neighbour search over catalog vectors, aligned by row position
/// with the catalog the index was built from.
pub trait VectorIndex: Send + Sync {
    /// Returns up to `k` `(similarity, row)` pairs in descending similarity.
    fn search(&self, query: &[f32], k: usize) -> Result<Vec<(f32, usize)>, CollaboratorError>;
}

/// Produces an L2-normalized query vector in the product-index space.
pub trait UserEmbedder: Send + Sync {
    fn embed(&self, profile: &UserProfile) -> Result<Vec<f32>, CollaboratorError>;
}

/// Exact inner-product index over L2-normalized vectors. With normalized
/// inputs the inner product equals cosine similarity.
#[derive(Clone, Debug, Default)]
pub struct FlatIpIndex {
    dimension: usize,
    vectors: Vec<Vec<f32>>,
}

impl FlatIpIndex {
    /// Normalizes and stores the given vectors. Row order must match the
    /// catalog snapshot the embeddings came from.
    pub fn build(embeddings: Vec<Vec<f32>>) -> Self {
        let dimension = embeddings.first().map(Vec::len).unwrap_or(0);
        let vectors = embeddings.into_iter().map(l2_normalize).collect();
        Self { dimension, vectors }
    }

    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }
}

impl FlatIpIndex {
    /// Index a catalog snapshot with the given vectorizer; rows stay aligned
    /// with catalog row positions.
    pub fn for_catalog(catalog: &crate::catalog::Catalog, vectorizer: &TextVectorizer) -> Self {
        Self::build(
            catalog
                .products()
                .iter()
                .map(|product| {
                    vectorizer.vectorize(&format!("{} {}", product.name, product.category_text))
                })
                .collect(),
        )
    }
}

impl VectorIndex for FlatIpIndex {
    fn search(&self, query: &[f32], k: usize) -> Result<Vec<(f32, usize)>, CollaboratorError> {
        if self.vectors.is_empty() || k == 0 {
            return Ok(Vec::new());
        }
        if query.len() != self.dimension {
            return Err(CollaboratorError::DimensionMismatch {
                expected: self.dimension,
                actual: query.len(),
            });
        }

        let mut scored: Vec<(f32, usize)> = self
            .vectors
            .iter()
            .enumerate()
            .map(|(row, vector)| (inner_product(query, vector), row))
            .collect();
        scored.sort_by(|a, b| {
            b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal).then(a.1.cmp(&b.1))
        });
        scored.truncate(k);
        Ok(scored)
    }
}

fn inner_product(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}

fn l2_normalize(mut vector: Vec<f32>) -> Vec<f32> {
    let norm = vector.iter().map(|v| v * v).sum::<f32>().sqrt();
    if norm > 0.0 {
        for value in &mut vector {
            *value /= norm;
        }
    }
    vector
}

/// Deterministic bag-of-tokens text vectorizer: tokens hash into a fixed
/// number of buckets and the counts are L2-normalized. A stand-in for the
/// sentence-embedding collaborator with the same contract.
#[derive(Clone, Copy, Debug)]
pub struct TextVectorizer {
    dimension: usize,
}

impl TextVectorizer {
    pub fn new(dimension: usize) -> Self {
        Self { dimension: dimension.max(1) }
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    pub fn vectorize(&self, text: &str) -> Vec<f32> {
        let mut vector = vec![0.0f32; self.dimension];
        for token in text.split_whitespace() {
            let mut hasher = DefaultHasher::new();
            token.to_lowercase().hash(&mut hasher);
            let bucket = (hasher.finish() % self.dimension as u64) as usize;
            vector[bucket] += 1.0;
        }
        l2_normalize(vector)
    }
}

impl Default for TextVectorizer {
    fn default() -> Self {
        Self::new(64)
    }
}

/// Embeds a user profile from its textual interest signals: search keywords,
/// clicked/favorite categories, and the declared base interest.
#[derive(Clone, Copy, Debug, Default)]
pub struct ProfileEmbedder {
    vectorizer: TextVectorizer,
}

impl ProfileEmbedder {
    pub fn new(vectorizer: TextVectorizer) -> Self {
        Self { vectorizer }
    }
}

impl UserEmbedder for ProfileEmbedder {
    fn embed(&self, profile: &UserProfile) -> Result<Vec<f32>, CollaboratorError> {
        let mut parts: Vec<&str> = Vec::new();
        if let Some(category) = profile.base_interest_category.as_deref() {
            parts.push(category);
        }
        parts.extend(profile.search_keywords.iter().map(String::as_str));
        parts.extend(profile.clicked_categories.iter().map(String::as_str));
        parts.extend(profile.favorite_categories.iter().map(String::as_str));

        Ok(self.vectorizer.vectorize(&parts.join(" ")))
    }
}
