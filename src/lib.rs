//! # cardvec
//!
//! Field-level embeddings and similarity search for agent cards.
//!
//! An agent card (a JSON profile with a name, description, skills and
//! extensions) is split into addressable fields such as `skills[0].tags`,
//! each field is embedded on its own, and queries are ranked against those
//! vectors by cosine similarity with a score threshold and a result cap.
//!
//! cardvec keeps no state: records are returned to the caller, who stores
//! them wherever it likes and hands them back for ranking.
//!
//! ## Quick Start
//!
//! ```rust
//! use cardvec::prelude::*;
//! use serde_json::json;
//!
//! let mut config = Config::default();
//! config.search = SearchConfig::new(0.0, 5);
//! let pipeline = Pipeline::from_config(&config).unwrap();
//!
//! let card = json!({
//!     "url": "https://agents.example/ada",
//!     "name": "Ada",
//!     "skills": [{"name": "Math", "tags": ["logic", "rigor"]}]
//! });
//! let records = pipeline.generate_document_vectors(&card).unwrap();
//!
//! let results = pipeline.search_text("logic rigor", &records).unwrap();
//! assert_eq!(results[0].0.field_path, "skills[0].tags");
//! ```
//!
//! ## Crate Structure
//!
//! - `cardvec-core` - Vectors, records, cosine similarity, ranking
//! - `cardvec-embed` - Flattening, field walking, encoders, generation
//!
//! ## Features
//!
//! - `fastembed`: ONNX sentence encoders (`all-MiniLM-L6-v2`, `bge-small-en-v1.5`, ...)

pub mod config;
pub mod error;
pub mod pipeline;

pub use config::Config;
pub use error::{Error, Result};
pub use pipeline::Pipeline;

// Re-export core types
pub use cardvec_core::{
    search, similarity, SearchConfig, SimilarityRanker, Vector, VectorMetadata, VectorRecord,
    QUERY_FIELD_PATH,
};

// Re-export embedding types
pub use cardvec_embed::{
    flatten, EmbedError, EmbeddingEngine, EncodeWorker, EncoderHandle, EngineConfig, FieldPath,
    FieldPathWalker, FieldText, GeneratorConfig, HashEncoder, TextEncoder, VectorGenerator,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        search, similarity, Config, EmbeddingEngine, Error, FieldPathWalker, GeneratorConfig,
        Pipeline, Result, SearchConfig, TextEncoder, Vector, VectorGenerator, VectorRecord,
    };
}
