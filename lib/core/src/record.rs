use crate::vector::Vector;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Field path used for query vectors, which have no owning document
pub const QUERY_FIELD_PATH: &str = "query";

/// Fixed-shape metadata stamped on every record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VectorMetadata {
    /// Encoder identifier the values were produced with
    pub model: String,
    /// Length of `values`
    pub dimensions: usize,
    /// Character length of `field_content`
    pub content_length: usize,
}

/// One embedded field of a document: the unit of storage and search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VectorRecord {
    /// Identity of the owning document, empty for query vectors
    pub identifier: String,
    pub field_path: String,
    /// The flattened text that was embedded
    pub field_content: String,
    pub values: Vector,
    pub created_at: DateTime<Utc>,
    pub metadata: VectorMetadata,
}

impl VectorRecord {
    /// Assemble a record, stamping `created_at` with the current time and
    /// deriving `dimensions`/`content_length` from the values and content.
    #[must_use]
    pub fn new(
        identifier: impl Into<String>,
        field_path: impl Into<String>,
        field_content: impl Into<String>,
        values: Vector,
        model: impl Into<String>,
    ) -> Self {
        let field_content = field_content.into();
        let metadata = VectorMetadata {
            model: model.into(),
            dimensions: values.dim(),
            content_length: field_content.chars().count(),
        };
        Self {
            identifier: identifier.into(),
            field_path: field_path.into(),
            field_content,
            values,
            created_at: Utc::now(),
            metadata,
        }
    }

    #[inline]
    pub fn dim(&self) -> usize {
        self.values.dim()
    }

    #[inline]
    pub fn is_query(&self) -> bool {
        self.identifier.is_empty() && self.field_path == QUERY_FIELD_PATH
    }

    #[inline]
    #[must_use]
    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }
}

impl AsRef<[f32]> for VectorRecord {
    fn as_ref(&self) -> &[f32] {
        self.values.as_slice()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metadata_derived_from_content() {
        let record = VectorRecord::new(
            "https://agents.example/ada",
            "name",
            "Adá",
            Vector::new(vec![1.0, 2.0, 3.0]),
            "stub",
        );
        assert_eq!(record.metadata.model, "stub");
        assert_eq!(record.metadata.dimensions, 3);
        // characters, not bytes
        assert_eq!(record.metadata.content_length, 3);
        assert!(!record.is_query());
    }

    #[test]
    fn test_serialized_shape() {
        let record = VectorRecord::new("", QUERY_FIELD_PATH, "find me", Vector::new(vec![0.5]), "m");
        assert!(record.is_query());

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["field_path"], "query");
        assert_eq!(json["values"], serde_json::json!([0.5]));
        assert_eq!(json["metadata"]["content_length"], 7);

        let back: VectorRecord = serde_json::from_value(json).unwrap();
        assert_eq!(back, record);
    }
}
