//! Text encoders
//!
//! [`TextEncoder`] is the seam between the engine and whatever turns text
//! into vectors. [`HashEncoder`] is the built-in, dependency-free encoder:
//! character trigrams and words are hashed into a fixed number of buckets
//! and the result is L2-normalized. It carries no semantics beyond lexical
//! overlap, but it is deterministic across processes and platforms.

use crate::{EmbedError, Result};

/// Prefix of model identifiers served by [`HashEncoder`], e.g. `hash-384`
pub const HASH_MODEL_PREFIX: &str = "hash-";

/// Dimension of the default hashing model
pub const DEFAULT_HASH_DIM: usize = 384;

/// Fixed-dimension text-to-vector encoder
pub trait TextEncoder: Send + Sync {
    /// Identifier the encoder was constructed from
    fn model_id(&self) -> &str;

    /// Length of every vector this encoder returns
    fn dimension(&self) -> usize;

    fn encode(&self, text: &str) -> Result<Vec<f32>>;

    /// Encode several texts at once. Encoders backed by a model should
    /// override this with a single inference call.
    fn encode_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        texts.iter().map(|text| self.encode(text)).collect()
    }
}

/// Feature-hashing encoder
#[derive(Debug, Clone)]
pub struct HashEncoder {
    model_id: String,
    dim: usize,
}

impl HashEncoder {
    pub fn new(dim: usize) -> Result<Self> {
        if dim == 0 {
            return Err(EmbedError::ModelInit(
                "hash encoder dimension must be positive".to_string(),
            ));
        }
        Ok(Self {
            model_id: format!("{}{}", HASH_MODEL_PREFIX, dim),
            dim,
        })
    }

    /// Build from an identifier such as `hash-384`.
    ///
    /// Returns `Ok(None)` when the identifier is not a hashing model at all.
    pub fn from_model_id(model_id: &str) -> Result<Option<Self>> {
        let Some(dim) = model_id.strip_prefix(HASH_MODEL_PREFIX) else {
            return Ok(None);
        };
        let dim: usize = dim
            .parse()
            .map_err(|_| EmbedError::ModelNotFound(model_id.to_string()))?;
        Self::new(dim).map(Some)
    }
}

impl Default for HashEncoder {
    fn default() -> Self {
        Self {
            model_id: format!("{}{}", HASH_MODEL_PREFIX, DEFAULT_HASH_DIM),
            dim: DEFAULT_HASH_DIM,
        }
    }
}

impl TextEncoder for HashEncoder {
    fn model_id(&self) -> &str {
        &self.model_id
    }

    fn dimension(&self) -> usize {
        self.dim
    }

    fn encode(&self, text: &str) -> Result<Vec<f32>> {
        Ok(hash_text_to_vector(text, self.dim))
    }
}

/// Hash a string into a normalized `dim`-length vector.
///
/// A zero `dim` yields an empty vector.
pub fn hash_text_to_vector(text: &str, dim: usize) -> Vec<f32> {
    if dim == 0 {
        return Vec::new();
    }
    let mut vector = vec![0.0f32; dim];
    let normalized = text.to_lowercase();

    let padded: Vec<char> = format!("  {}  ", normalized).chars().collect();
    let mut trigram = String::with_capacity(12);
    for window in padded.windows(3) {
        trigram.clear();
        trigram.extend(window);
        vector[bucket(&trigram, dim)] += 1.0;
    }

    // Words contribute more than trigrams
    for word in normalized.split_whitespace() {
        vector[bucket(word, dim)] += 2.0;
    }

    let magnitude: f32 = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
    if magnitude > 0.0 {
        for v in &mut vector {
            *v /= magnitude;
        }
    }

    vector
}

#[inline]
fn bucket(feature: &str, dim: usize) -> usize {
    (fnv1a(feature.as_bytes()) % dim as u64) as usize
}

// FNV-1a: stable across Rust releases, unlike DefaultHasher
#[inline]
fn fnv1a(bytes: &[u8]) -> u64 {
    const OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
    const PRIME: u64 = 0x0000_0100_0000_01b3;
    bytes
        .iter()
        .fold(OFFSET, |hash, &b| (hash ^ u64::from(b)).wrapping_mul(PRIME))
}
