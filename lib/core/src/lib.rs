//! # cardvec Core
//!
//! Core data structures and ranking for cardvec.
//!
//! - [`Vector`] - Dense embedding with cosine similarity
//! - [`VectorRecord`] - One embedded document field with its metadata
//! - [`search`] / [`SimilarityRanker`] - Threshold + top-K cosine ranking
//!
//! ## Example
//!
//! ```rust
//! use cardvec_core::{search, Vector, VectorRecord};
//!
//! let candidates = vec![
//!     VectorRecord::new("agent-a", "name", "alpha", Vector::new(vec![0.9, 0.1, 0.0]), "stub"),
//!     VectorRecord::new("agent-b", "name", "beta", Vector::new(vec![0.0, 1.0, 0.0]), "stub"),
//! ];
//! let query = Vector::new(vec![1.0, 0.0, 0.0]);
//!
//! let results = search(&query, &candidates, 0.7, 5).unwrap();
//! assert_eq!(results.len(), 1);
//! assert_eq!(results[0].0.identifier, "agent-a");
//! ```

pub mod error;
pub mod record;
pub mod search;
pub mod vector;

pub use error::{Error, Result};
pub use record::{VectorMetadata, VectorRecord, QUERY_FIELD_PATH};
pub use search::{
    search, similarity, SearchConfig, SimilarityRanker, DEFAULT_MAX_RESULTS, DEFAULT_THRESHOLD,
};
pub use vector::{cosine_similarity, Vector};
