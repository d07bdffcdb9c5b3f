use crate::encoder::{HashEncoder, TextEncoder};
use crate::{EmbedError, Result};
use cardvec_core::Vector;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Model used when none is configured
pub const DEFAULT_MODEL: &str = "hash-384";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Encoder identifier, e.g. `hash-384` or `all-MiniLM-L6-v2`
    pub model: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
        }
    }
}

/// Owns a loaded encoder and enforces its contract: non-empty input and
/// output of exactly [`dimension`](Self::dimension) values.
pub struct EmbeddingEngine {
    encoder: Box<dyn TextEncoder>,
    model_id: String,
    dimension: usize,
}

impl std::fmt::Debug for EmbeddingEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmbeddingEngine")
            .field("model_id", &self.model_id)
            .field("dimension", &self.dimension)
            .finish()
    }
}

impl EmbeddingEngine {
    /// Wrap an already constructed encoder
    pub fn new(encoder: Box<dyn TextEncoder>) -> Result<Self> {
        let dimension = encoder.dimension();
        if dimension == 0 {
            return Err(EmbedError::ModelInit(format!(
                "encoder '{}' reports zero dimensions",
                encoder.model_id()
            )));
        }
        Ok(Self {
            model_id: encoder.model_id().to_string(),
            encoder,
            dimension,
        })
    }

    /// Resolve and load a model by identifier.
    ///
    /// Loading happens here, once; an unknown or unloadable model fails
    /// construction instead of the first encode.
    pub fn from_model(model_id: &str) -> Result<Self> {
        let engine = Self::new(load_encoder(model_id)?)?;
        info!(
            model = %engine.model_id,
            dimension = engine.dimension,
            "embedding engine ready"
        );
        Ok(engine)
    }

    pub fn from_config(config: &EngineConfig) -> Result<Self> {
        Self::from_model(&config.model)
    }

    pub fn model_id(&self) -> &str {
        &self.model_id
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    pub fn encode(&self, text: &str) -> Result<Vector> {
        if text.is_empty() {
            return Err(EmbedError::EmptyText);
        }
        let values = self.encoder.encode(text)?;
        self.check_dimension(&values)?;
        Ok(Vector::new(values))
    }

    /// Encode several texts with a single encoder call
    pub fn encode_batch(&self, texts: &[&str]) -> Result<Vec<Vector>> {
        if texts.iter().any(|text| text.is_empty()) {
            return Err(EmbedError::EmptyText);
        }
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let batch = self.encoder.encode_batch(texts)?;
        if batch.len() != texts.len() {
            return Err(EmbedError::BatchSize {
                expected: texts.len(),
                actual: batch.len(),
            });
        }
        debug!(model = %self.model_id, texts = texts.len(), "encoded batch");

        batch
            .into_iter()
            .map(|values| {
                self.check_dimension(&values)?;
                Ok(Vector::new(values))
            })
            .collect()
    }

    fn check_dimension(&self, values: &[f32]) -> Result<()> {
        if values.len() != self.dimension {
            return Err(EmbedError::InvalidDimension {
                expected: self.dimension,
                actual: values.len(),
            });
        }
        Ok(())
    }
}

fn load_encoder(model_id: &str) -> Result<Box<dyn TextEncoder>> {
    if let Some(encoder) = HashEncoder::from_model_id(model_id)? {
        return Ok(Box::new(encoder));
    }

    #[cfg(feature = "fastembed")]
    if let Some(encoder) = crate::onnx::FastEmbedEncoder::try_new(model_id)? {
        return Ok(Box::new(encoder));
    }

    Err(EmbedError::ModelNotFound(model_id.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Returns vectors of the wrong length
    struct BrokenEncoder;

    impl TextEncoder for BrokenEncoder {
        fn model_id(&self) -> &str {
            "broken"
        }

        fn dimension(&self) -> usize {
            4
        }

        fn encode(&self, _text: &str) -> Result<Vec<f32>> {
            Ok(vec![1.0, 2.0])
        }
    }

    struct FailingEncoder;

    impl TextEncoder for FailingEncoder {
        fn model_id(&self) -> &str {
            "failing"
        }

        fn dimension(&self) -> usize {
            2
        }

        fn encode(&self, _text: &str) -> Result<Vec<f32>> {
            Err(EmbedError::Encoding("out of memory".to_string()))
        }
    }

    #[test]
    fn test_from_model() {
        let engine = EmbeddingEngine::from_model("hash-16").unwrap();
        assert_eq!(engine.model_id(), "hash-16");
        assert_eq!(engine.dimension(), 16);
        assert_eq!(engine.encode("hello").unwrap().dim(), 16);
    }

    #[test]
    fn test_default_config() {
        let engine = EmbeddingEngine::from_config(&EngineConfig::default()).unwrap();
        assert_eq!(engine.model_id(), DEFAULT_MODEL);
        assert_eq!(engine.dimension(), 384);
    }

    #[test]
    fn test_unknown_model_fails_at_construction() {
        let err = EmbeddingEngine::from_model("definitely-not-a-model").unwrap_err();
        assert!(matches!(err, EmbedError::ModelNotFound(id) if id == "definitely-not-a-model"));
    }

    #[test]
    fn test_empty_text_rejected() {
        let engine = EmbeddingEngine::new(Box::new(HashEncoder::new(8).unwrap())).unwrap();
        assert!(matches!(engine.encode(""), Err(EmbedError::EmptyText)));
        assert!(matches!(
            engine.encode_batch(&["ok", ""]),
            Err(EmbedError::EmptyText)
        ));
    }

    #[test]
    fn test_deterministic() {
        let engine = EmbeddingEngine::from_model("hash-32").unwrap();
        assert_eq!(
            engine.encode("same text").unwrap(),
            engine.encode("same text").unwrap()
        );
    }

    #[test]
    fn test_wrong_output_length_signaled() {
        let engine = EmbeddingEngine::new(Box::new(BrokenEncoder)).unwrap();
        assert!(matches!(
            engine.encode("text"),
            Err(EmbedError::InvalidDimension { expected: 4, actual: 2 })
        ));
        assert!(matches!(
            engine.encode_batch(&["a", "b"]),
            Err(EmbedError::InvalidDimension { expected: 4, actual: 2 })
        ));
    }

    #[test]
    fn test_encoding_failure_propagates() {
        let engine = EmbeddingEngine::new(Box::new(FailingEncoder)).unwrap();
        assert!(matches!(engine.encode("text"), Err(EmbedError::Encoding(_))));
    }

    #[test]
    fn test_empty_batch() {
        let engine = EmbeddingEngine::from_model("hash-8").unwrap();
        assert!(engine.encode_batch(&[]).unwrap().is_empty());
    }
}
