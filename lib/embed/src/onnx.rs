//! ONNX sentence encoders via `fastembed`

use crate::encoder::TextEncoder;
use crate::{EmbedError, Result};
use ::fastembed::{EmbeddingModel, InitOptions, TextEmbedding};
use parking_lot::Mutex;
use tracing::info;

/// Map a model identifier to a supported fastembed model.
///
/// Both the short name and the `sentence-transformers/` / `BAAI/` qualified
/// names are accepted.
pub fn resolve_model(model_id: &str) -> Option<EmbeddingModel> {
    let short = model_id.rsplit('/').next().unwrap_or(model_id);
    let model = match short.to_ascii_lowercase().as_str() {
        "all-minilm-l6-v2" => EmbeddingModel::AllMiniLML6V2,
        "all-minilm-l12-v2" => EmbeddingModel::AllMiniLML12V2,
        "bge-small-en-v1.5" => EmbeddingModel::BGESmallENV15,
        "bge-base-en-v1.5" => EmbeddingModel::BGEBaseENV15,
        "bge-large-en-v1.5" => EmbeddingModel::BGELargeENV15,
        "nomic-embed-text-v1.5" => EmbeddingModel::NomicEmbedTextV15,
        _ => return None,
    };
    Some(model)
}

/// Encoder backed by a locally cached ONNX model
pub struct FastEmbedEncoder {
    model_id: String,
    // embed() needs &mut self
    model: Mutex<TextEmbedding>,
    dimension: usize,
}

impl std::fmt::Debug for FastEmbedEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FastEmbedEncoder")
            .field("model_id", &self.model_id)
            .field("dimension", &self.dimension)
            .field("model", &"<TextEmbedding>")
            .finish()
    }
}

impl FastEmbedEncoder {
    /// Load the model, downloading it on first use.
    ///
    /// Returns `Ok(None)` when the identifier is not a known fastembed model.
    pub fn try_new(model_id: &str) -> Result<Option<Self>> {
        let Some(model) = resolve_model(model_id) else {
            return Ok(None);
        };

        info!(model = model_id, "loading embedding model");
        let mut text_model = TextEmbedding::try_new(
            InitOptions::new(model).with_show_download_progress(false),
        )
        .map_err(|e| EmbedError::ModelInit(e.to_string()))?;

        // Probe the output size once; it is fixed for the model's lifetime
        let probe = text_model
            .embed(vec!["dimension probe"], None)
            .map_err(|e| EmbedError::ModelInit(e.to_string()))?;
        let dimension = probe
            .into_iter()
            .next()
            .map(|v| v.len())
            .ok_or_else(|| EmbedError::ModelInit("model returned no embedding".to_string()))?;

        Ok(Some(Self {
            model_id: model_id.to_string(),
            model: Mutex::new(text_model),
            dimension,
        }))
    }
}

impl TextEncoder for FastEmbedEncoder {
    fn model_id(&self) -> &str {
        &self.model_id
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    fn encode(&self, text: &str) -> Result<Vec<f32>> {
        self.encode_batch(&[text])?
            .into_iter()
            .next()
            .ok_or_else(|| EmbedError::Encoding("model returned no embedding".to_string()))
    }

    fn encode_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        self.model
            .lock()
            .embed(texts.to_vec(), None)
            .map_err(|e| EmbedError::Encoding(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_model() {
        assert!(resolve_model("all-MiniLM-L6-v2").is_some());
        assert!(resolve_model("sentence-transformers/all-MiniLM-L6-v2").is_some());
        assert!(resolve_model("BAAI/bge-small-en-v1.5").is_some());
        assert!(resolve_model("not-a-model").is_none());
    }
}
