//! Linear-scan cosine ranking
//!
//! Scores every candidate against the query, keeps those at or above the
//! threshold, orders them by score (descending, input order on ties) and
//! caps the result length.

use crate::vector::cosine_similarity;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const DEFAULT_THRESHOLD: f32 = 0.7;
pub const DEFAULT_MAX_RESULTS: usize = 10;

/// Caller-supplied ranking parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Minimum score to qualify, inclusive
    pub threshold: f32,
    /// Hard cap on returned entries, applied after sorting
    pub max_results: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            max_results: DEFAULT_MAX_RESULTS,
        }
    }
}

impl SearchConfig {
    pub fn new(threshold: f32, max_results: usize) -> Self {
        Self {
            threshold,
            max_results,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.threshold.is_nan() {
            return Err(Error::InvalidConfig("threshold must be a number".to_string()));
        }
        Ok(())
    }
}

/// Cosine similarity between two embeddings of equal length
#[inline]
pub fn similarity(a: &impl AsRef<[f32]>, b: &impl AsRef<[f32]>) -> Result<f32> {
    cosine_similarity(a.as_ref(), b.as_ref())
}

/// Rank `candidates` against `query`.
///
/// Returns borrowed candidates paired with their score. Any candidate whose
/// length differs from the query fails the whole search with
/// [`Error::InvalidDimension`].
pub fn search<'a, Q, C>(
    query: &Q,
    candidates: &'a [C],
    threshold: f32,
    max_results: usize,
) -> Result<Vec<(&'a C, f32)>>
where
    Q: AsRef<[f32]> + ?Sized,
    C: AsRef<[f32]>,
{
    let query = query.as_ref();

    let mut results = Vec::new();
    for candidate in candidates {
        let score = cosine_similarity(query, candidate.as_ref())?;
        if score >= threshold {
            results.push((candidate, score));
        }
    }

    // sort_by is stable: equal scores keep input order
    results.sort_by(|a, b| b.1.total_cmp(&a.1));
    results.truncate(max_results);

    debug!(
        candidates = candidates.len(),
        returned = results.len(),
        threshold,
        "similarity search"
    );
    Ok(results)
}

/// [`search`] bound to a [`SearchConfig`]
#[derive(Debug, Clone, Copy, Default)]
pub struct SimilarityRanker {
    config: SearchConfig,
}

impl SimilarityRanker {
    pub fn new(config: SearchConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn rank<'a, Q, C>(&self, query: &Q, candidates: &'a [C]) -> Result<Vec<(&'a C, f32)>>
    where
        Q: AsRef<[f32]> + ?Sized,
        C: AsRef<[f32]>,
    {
        search(query, candidates, self.config.threshold, self.config.max_results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Vector, VectorRecord};

    fn record(id: &str, values: Vec<f32>) -> VectorRecord {
        VectorRecord::new(id, "test", id, Vector::new(values), "stub")
    }

    #[test]
    fn test_threshold_and_order() {
        let query = Vector::new(vec![1.0, 0.0, 0.0]);
        let candidates = vec![
            record("A", vec![0.9, 0.1, 0.0]),
            record("B", vec![0.0, 1.0, 0.0]),
            record("C", vec![1.0, 0.0, 0.0]),
        ];

        let results = search(&query, &candidates, 0.7, 5).unwrap();
        let ids: Vec<&str> = results.iter().map(|(r, _)| r.identifier.as_str()).collect();
        assert_eq!(ids, vec!["C", "A"]);
        assert_eq!(results[0].1, 1.0);
        assert!((results[1].1 - 0.9939).abs() < 1e-3);
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let query = [1.0f32, 0.0];
        let candidates = vec![vec![1.0f32, 0.0], vec![0.0, 1.0]];

        let results = search(&query[..], &candidates, 1.0, 10).unwrap();
        assert_eq!(results.len(), 1);

        let results = search(&query[..], &candidates, 0.0, 10).unwrap();
        assert_eq!(results.len(), 2);
    }

    #[test]
    fn test_ties_keep_input_order() {
        let query = [1.0f32, 0.0];
        let candidates = vec![
            record("first", vec![2.0, 0.0]),
            record("low", vec![1.0, 1.0]),
            record("second", vec![5.0, 0.0]),
            record("third", vec![0.5, 0.0]),
        ];

        let results = search(&query[..], &candidates, 0.0, 10).unwrap();
        let ids: Vec<&str> = results.iter().map(|(r, _)| r.identifier.as_str()).collect();
        assert_eq!(ids, vec!["first", "second", "third", "low"]);
    }

    #[test]
    fn test_cap_keeps_highest_scores() {
        let query = [1.0f32, 0.0];
        let candidates = vec![
            record("a", vec![1.0, 1.0]),
            record("b", vec![1.0, 0.1]),
            record("c", vec![1.0, 0.0]),
        ];

        let results = search(&query[..], &candidates, -1.0, 2).unwrap();
        let ids: Vec<&str> = results.iter().map(|(r, _)| r.identifier.as_str()).collect();
        assert_eq!(ids, vec!["c", "b"]);

        assert!(search(&query[..], &candidates, -1.0, 0).unwrap().is_empty());
    }

    #[test]
    fn test_zero_vector_candidate_subject_to_threshold() {
        let query = [1.0f32, 0.0];
        let candidates = vec![vec![0.0f32, 0.0]];

        assert!(search(&query[..], &candidates, 0.1, 10).unwrap().is_empty());
        let results = search(&query[..], &candidates, 0.0, 10).unwrap();
        assert_eq!(results[0].1, 0.0);
    }

    #[test]
    fn test_dimension_mismatch_is_an_error() {
        let query = [1.0f32, 0.0, 0.0];
        let candidates = vec![vec![1.0f32, 0.0, 0.0], vec![1.0, 0.0]];

        let err = search(&query[..], &candidates, 0.0, 10).unwrap_err();
        assert_eq!(err, Error::InvalidDimension { expected: 3, actual: 2 });
    }

    #[test]
    fn test_empty_candidates() {
        let candidates: Vec<Vector> = Vec::new();
        assert!(search(&[1.0f32][..], &candidates, 0.0, 10).unwrap().is_empty());
    }

    #[test]
    fn test_ranker_uses_config() {
        let ranker = SimilarityRanker::new(SearchConfig::new(0.5, 1)).unwrap();
        let candidates = vec![vec![1.0f32, 0.0], vec![1.0, 0.2]];

        let results = ranker.rank(&[1.0f32, 0.0][..], &candidates).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].1, 1.0);
    }

    #[test]
    fn test_nan_threshold_rejected() {
        assert!(SimilarityRanker::new(SearchConfig::new(f32::NAN, 3)).is_err());
    }
}
