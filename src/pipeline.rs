use crate::config::Config;
use crate::Result;
use cardvec_core::{similarity, SearchConfig, SimilarityRanker, VectorRecord};
use cardvec_embed::{EmbeddingEngine, GeneratorConfig, VectorGenerator};
use serde_json::Value;
use std::sync::Arc;

/// The four operations offered to a storage or transport layer: embed a
/// document, embed a query, compare two vectors, rank candidates.
#[derive(Debug, Clone)]
pub struct Pipeline {
    generator: VectorGenerator,
    ranker: SimilarityRanker,
}

impl Pipeline {
    pub fn new(
        engine: Arc<EmbeddingEngine>,
        generator: GeneratorConfig,
        search: SearchConfig,
    ) -> Result<Self> {
        Ok(Self {
            generator: VectorGenerator::with_config(engine, generator),
            ranker: SimilarityRanker::new(search)?,
        })
    }

    /// Load the configured model and build the pipeline around it
    pub fn from_config(config: &Config) -> Result<Self> {
        let engine = Arc::new(EmbeddingEngine::from_config(&config.engine)?);
        Self::new(engine, config.generator.clone(), config.search)
    }

    pub fn engine(&self) -> &EmbeddingEngine {
        self.generator.engine()
    }

    pub fn search_config(&self) -> &SearchConfig {
        self.ranker.config()
    }

    pub fn generate_document_vectors(&self, document: &Value) -> Result<Vec<VectorRecord>> {
        Ok(self.generator.generate_document_vectors(document)?)
    }

    pub fn generate_query_vector(&self, text: &str) -> Result<VectorRecord> {
        Ok(self.generator.generate_query_vector(text)?)
    }

    pub fn similarity(&self, a: &VectorRecord, b: &VectorRecord) -> Result<f32> {
        Ok(similarity(a, b)?)
    }

    pub fn search<'a>(
        &self,
        query: &VectorRecord,
        candidates: &'a [VectorRecord],
    ) -> Result<Vec<(&'a VectorRecord, f32)>> {
        Ok(self.ranker.rank(query, candidates)?)
    }

    /// Embed `text` and rank `candidates` against it
    pub fn search_text<'a>(
        &self,
        text: &str,
        candidates: &'a [VectorRecord],
    ) -> Result<Vec<(&'a VectorRecord, f32)>> {
        let query = self.generate_query_vector(text)?;
        self.search(&query, candidates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use cardvec_embed::EmbedError;
    use serde_json::json;

    fn pipeline() -> Pipeline {
        let mut config = Config::default();
        config.engine.model = "hash-128".to_string();
        config.search = SearchConfig::new(0.0, 3);
        Pipeline::from_config(&config).unwrap()
    }

    #[test]
    fn test_search_text_ranks_matching_field_first() {
        let pipeline = pipeline();
        let card = json!({
            "url": "https://agents.example/planner",
            "name": "Strategic planner",
            "description": "Builds long-term roadmaps",
            "skills": [{"name": "Budget forecasting", "tags": ["finance"]}]
        });
        let records = pipeline.generate_document_vectors(&card).unwrap();
        assert_eq!(records.len(), 5);

        let results = pipeline.search_text("Budget forecasting", &records).unwrap();
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].0.field_path, "skills[0].name");
        assert_eq!(results[0].1, 1.0);
    }

    #[test]
    fn test_similarity_between_records() {
        let pipeline = pipeline();
        let a = pipeline.generate_query_vector("alpha beta").unwrap();
        let b = pipeline.generate_query_vector("gamma").unwrap();

        assert_eq!(pipeline.similarity(&a, &a).unwrap(), 1.0);
        assert_eq!(
            pipeline.similarity(&a, &b).unwrap(),
            pipeline.similarity(&b, &a).unwrap()
        );
    }

    #[test]
    fn test_unknown_model() {
        let mut config = Config::default();
        config.engine.model = "no-such-model".to_string();
        assert!(matches!(
            Pipeline::from_config(&config),
            Err(Error::Embed(EmbedError::ModelNotFound(_)))
        ));
    }
}
