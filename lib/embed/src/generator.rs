use crate::engine::EmbeddingEngine;
use crate::walker::{document_identifier, FieldPathWalker, FieldText};
use crate::Result;
use cardvec_core::{VectorRecord, QUERY_FIELD_PATH};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

/// Identity field of an agent card
pub const DEFAULT_ID_FIELD: &str = "url";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Top-level field whose value identifies the document
    pub id_field: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            id_field: DEFAULT_ID_FIELD.to_string(),
        }
    }
}

/// Turns agent cards and queries into [`VectorRecord`]s
#[derive(Debug, Clone)]
pub struct VectorGenerator {
    engine: Arc<EmbeddingEngine>,
    config: GeneratorConfig,
}

impl VectorGenerator {
    pub fn new(engine: Arc<EmbeddingEngine>) -> Self {
        Self::with_config(engine, GeneratorConfig::default())
    }

    pub fn with_config(engine: Arc<EmbeddingEngine>, config: GeneratorConfig) -> Self {
        Self { engine, config }
    }

    pub fn engine(&self) -> &EmbeddingEngine {
        &self.engine
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Embed every extractable field of `document`, in walk order.
    ///
    /// All texts go to the encoder in one batch. A document without any
    /// embeddable field yields an empty list.
    pub fn generate_document_vectors(&self, document: &Value) -> Result<Vec<VectorRecord>> {
        let identifier = document_identifier(document, &self.config.id_field);
        let fields: Vec<FieldText> = FieldPathWalker::new(document).collect();
        debug!(identifier = %identifier, fields = fields.len(), "extracted document fields");

        if fields.is_empty() {
            return Ok(Vec::new());
        }

        let texts: Vec<&str> = fields.iter().map(|field| field.text.as_str()).collect();
        let vectors = self.engine.encode_batch(&texts)?;

        Ok(fields
            .into_iter()
            .zip(vectors)
            .map(|(field, values)| {
                VectorRecord::new(
                    identifier.as_str(),
                    field.path.to_string(),
                    field.text,
                    values,
                    self.engine.model_id(),
                )
            })
            .collect())
    }

    /// Embed a raw query string. The text is used as-is, not flattened.
    pub fn generate_query_vector(&self, text: &str) -> Result<VectorRecord> {
        self.assemble("", QUERY_FIELD_PATH, text)
    }

    /// Encode `text` and wrap it in a record for `identifier`/`field_path`
    pub fn assemble(&self, identifier: &str, field_path: &str, text: &str) -> Result<VectorRecord> {
        let values = self.engine.encode(text)?;
        Ok(VectorRecord::new(
            identifier,
            field_path,
            text,
            values,
            self.engine.model_id(),
        ))
    }
}
