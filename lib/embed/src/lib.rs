//! # cardvec Embed
//!
//! Field-level embedding of agent cards.
//!
//! An agent card is walked into `(field_path, text)` pairs, each pair is
//! encoded by an [`EmbeddingEngine`], and the results come back as
//! [`VectorRecord`](cardvec_core::VectorRecord)s ready to be stored and
//! ranked with [`cardvec_core::search`].
//!
//! ## Example
//!
//! ```rust
//! use cardvec_embed::{EmbeddingEngine, VectorGenerator};
//! use serde_json::json;
//! use std::sync::Arc;
//!
//! let engine = Arc::new(EmbeddingEngine::from_model("hash-64").unwrap());
//! let generator = VectorGenerator::new(engine);
//!
//! let card = json!({
//!     "url": "https://agents.example/ada",
//!     "name": "Ada",
//!     "skills": [{"name": "Math", "tags": ["logic", "rigor"]}]
//! });
//! let records = generator.generate_document_vectors(&card).unwrap();
//! let paths: Vec<&str> = records.iter().map(|r| r.field_path.as_str()).collect();
//! assert_eq!(paths, ["name", "skills[0].name", "skills[0].tags", "skills[0]"]);
//! ```
//!
//! ## Pipeline
//!
//! ```text
//! ┌─────────────┐     ┌──────────────┐     ┌─────────────────┐
//! │ Agent card  │────>│   Walker     │────>│ EmbeddingEngine │
//! │   (JSON)    │     │ (path, text) │     │  (TextEncoder)  │
//! └─────────────┘     └──────────────┘     └────────┬────────┘
//!                                                   │
//!                                          ┌────────┴────────┐
//!                                          │  VectorRecords  │
//!                                          └─────────────────┘
//! ```

pub mod encoder;
pub mod engine;
pub mod error;
pub mod flatten;
pub mod generator;
#[cfg(feature = "fastembed")]
pub mod onnx;
pub mod path;
pub mod walker;
pub mod worker;

pub use encoder::{hash_text_to_vector, HashEncoder, TextEncoder, DEFAULT_HASH_DIM};
pub use engine::{EmbeddingEngine, EngineConfig, DEFAULT_MODEL};
pub use error::{EmbedError, Result};
pub use flatten::flatten;
pub use generator::{GeneratorConfig, VectorGenerator, DEFAULT_ID_FIELD};
#[cfg(feature = "fastembed")]
pub use onnx::FastEmbedEncoder;
pub use path::{CardField, ExtensionField, FieldPath, SkillField};
pub use walker::{document_identifier, FieldPathWalker, FieldText};
pub use worker::{EncodeWorker, EncoderHandle};
