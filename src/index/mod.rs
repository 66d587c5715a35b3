//! In-memory vector index for similarity retrieval.
//!
//! Holds the (embedding, chunk) pairs for exactly one document. The index
//! is built once in bulk and is read-only afterwards, which matches the
//! one-document-per-session usage and needs no locking. Similarity is
//! cosine; ties are broken by ascending chunk id so search results are
//! deterministic.

use crate::chunking::Chunk;
use crate::error::{LeseError, Result};

/// A search result with score.
#[derive(Debug, Clone)]
pub struct SearchHit {
    /// The matched chunk.
    pub chunk: Chunk,
    /// Cosine similarity to the query (higher is better).
    pub score: f32,
}

struct IndexEntry {
    chunk: Chunk,
    embedding: Vec<f32>,
}

/// In-memory nearest-neighbor index over one document's chunks.
pub struct VectorIndex {
    entries: Vec<IndexEntry>,
    dimensions: usize,
    built: bool,
}

impl VectorIndex {
    /// Create a new, empty index. It must be built before searching.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            dimensions: 0,
            built: false,
        }
    }

    /// One-time bulk load of chunks and their embeddings.
    ///
    /// Fails if the index is already built, if the lengths differ, or if
    /// the embeddings do not all share one dimension. The embedding
    /// dimension is taken from the first vector and enforced from there on.
    pub fn build(&mut self, chunks: Vec<Chunk>, embeddings: Vec<Vec<f32>>) -> Result<()> {
        if self.built {
            return Err(LeseError::Index("Index is already built".to_string()));
        }
        if chunks.len() != embeddings.len() {
            return Err(LeseError::Index(format!(
                "{} chunks but {} embeddings",
                chunks.len(),
                embeddings.len()
            )));
        }

        let dimensions = embeddings.first().map(|e| e.len()).unwrap_or(0);
        for (i, embedding) in embeddings.iter().enumerate() {
            if embedding.len() != dimensions {
                return Err(LeseError::Index(format!(
                    "Dimension mismatch: embedding {} has {} dimensions, expected {}",
                    i,
                    embedding.len(),
                    dimensions
                )));
            }
        }

        self.entries = chunks
            .into_iter()
            .zip(embeddings)
            .map(|(chunk, embedding)| IndexEntry { chunk, embedding })
            .collect();
        self.dimensions = dimensions;
        self.built = true;

        Ok(())
    }

    /// Search for the `k` chunks most similar to the query embedding.
    ///
    /// Results are ordered by descending cosine similarity, ties by
    /// ascending chunk id. Returns fewer than `k` hits only when the
    /// index holds fewer than `k` chunks. Fails if called before `build`
    /// or if the query dimension does not match the indexed embeddings.
    pub fn search(&self, query: &[f32], k: usize) -> Result<Vec<SearchHit>> {
        if !self.built {
            return Err(LeseError::Index("Search called before build".to_string()));
        }
        if !self.entries.is_empty() && query.len() != self.dimensions {
            return Err(LeseError::Index(format!(
                "Dimension mismatch: query has {} dimensions, index has {}",
                query.len(),
                self.dimensions
            )));
        }

        let mut hits: Vec<SearchHit> = self
            .entries
            .iter()
            .map(|entry| SearchHit {
                chunk: entry.chunk.clone(),
                score: cosine_similarity(query, &entry.embedding),
            })
            .collect();

        hits.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.chunk.id.cmp(&b.chunk.id))
        });
        hits.truncate(k);

        Ok(hits)
    }

    /// Whether the index has been built.
    pub fn is_built(&self) -> bool {
        self.built
    }

    /// Number of indexed chunks.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the index holds no chunks.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Embedding dimension, 0 before build or for an empty index.
    pub fn dimensions(&self) -> usize {
        self.dimensions
    }
}

impl Default for VectorIndex {
    fn default() -> Self {
        Self::new()
    }
}

/// Compute cosine similarity between two vectors.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot / (norm_a * norm_b)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunks(texts: &[&str]) -> Vec<Chunk> {
        texts
            .iter()
            .enumerate()
            .map(|(i, t)| Chunk::new(i, t.to_string()))
            .collect()
    }

    fn built_index(embeddings: Vec<Vec<f32>>) -> VectorIndex {
        let texts: Vec<String> = (0..embeddings.len()).map(|i| format!("chunk {}", i)).collect();
        let refs: Vec<&str> = texts.iter().map(|s| s.as_str()).collect();
        let mut index = VectorIndex::new();
        index.build(chunks(&refs), embeddings).unwrap();
        index
    }

    #[test]
    fn test_cosine_similarity() {
        let a = vec![1.0, 0.0, 0.0];
        assert!((cosine_similarity(&a, &[1.0, 0.0, 0.0]) - 1.0).abs() < 0.001);
        assert!(cosine_similarity(&a, &[0.0, 1.0, 0.0]).abs() < 0.001);
        assert!((cosine_similarity(&a, &[-1.0, 0.0, 0.0]) + 1.0).abs() < 0.001);
    }

    #[test]
    fn test_search_before_build_fails() {
        let index = VectorIndex::new();
        assert!(index.search(&[1.0, 0.0], 1).is_err());
    }

    #[test]
    fn test_build_length_mismatch_fails() {
        let mut index = VectorIndex::new();
        let result = index.build(chunks(&["a", "b"]), vec![vec![1.0, 0.0]]);
        assert!(result.is_err());
        assert!(!index.is_built());
    }

    #[test]
    fn test_rebuild_fails() {
        let mut index = built_index(vec![vec![1.0, 0.0]]);
        let result = index.build(chunks(&["again"]), vec![vec![0.0, 1.0]]);
        assert!(result.is_err());
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn test_mixed_dimensions_fail() {
        let mut index = VectorIndex::new();
        let result = index.build(chunks(&["a", "b"]), vec![vec![1.0, 0.0], vec![1.0]]);
        assert!(result.is_err());
    }

    #[test]
    fn test_query_dimension_mismatch_fails() {
        let index = built_index(vec![vec![1.0, 0.0, 0.0]]);
        assert!(index.search(&[1.0, 0.0], 1).is_err());
    }

    #[test]
    fn test_round_trip_top_hit() {
        let index = built_index(vec![
            vec![1.0, 0.0, 0.0],
            vec![0.0, 1.0, 0.0],
            vec![0.0, 0.0, 1.0],
        ]);

        let hits = index.search(&[0.0, 1.0, 0.0], 3).unwrap();
        assert_eq!(hits.len(), 3);
        assert_eq!(hits[0].chunk.id, 1);
        // Sorted by non-increasing score.
        for pair in hits.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
    }

    #[test]
    fn test_k_larger_than_index() {
        let index = built_index(vec![vec![1.0, 0.0], vec![0.0, 1.0]]);
        let hits = index.search(&[1.0, 0.0], 4).unwrap();
        assert_eq!(hits.len(), 2);
    }

    #[test]
    fn test_ties_break_by_ascending_chunk_id() {
        // Identical embeddings, so all scores tie.
        let index = built_index(vec![vec![1.0, 0.0]; 3]);
        let hits = index.search(&[1.0, 0.0], 3).unwrap();
        let ids: Vec<usize> = hits.iter().map(|h| h.chunk.id).collect();
        assert_eq!(ids, vec![0, 1, 2]);
    }

    #[test]
    fn test_empty_index_searches_empty() {
        let mut index = VectorIndex::new();
        index.build(Vec::new(), Vec::new()).unwrap();
        let hits = index.search(&[1.0, 0.0], 4).unwrap();
        assert!(hits.is_empty());
    }
}
