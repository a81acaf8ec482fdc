use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading inputs or running an analysis.
///
/// Per-record problems (an unparseable timestamp, a blank headline) are
/// recovered where they happen. The variants that reach a batch loop are
/// caught at the entity boundary, except when the shared news feed itself
/// cannot be loaded.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("Required column '{field}' not found (available: {available:?})")]
    Schema {
        field: String,
        available: Vec<String>,
    },

    #[error("Input file not found: {}", path.display())]
    MissingFile { path: PathBuf },

    #[error("Insufficient data for {entity}: {reason}")]
    InsufficientData { entity: String, reason: String },

    #[error("Unrecognized timestamp: '{raw}'")]
    TimestampParse { raw: String },

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Indicator setup failed: {0}")]
    Indicator(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl AnalysisError {
    pub fn schema(field: &str, available: &[String]) -> Self {
        Self::Schema {
            field: field.to_string(),
            available: available.to_vec(),
        }
    }

    pub fn insufficient(entity: &str, reason: impl Into<String>) -> Self {
        Self::InsufficientData {
            entity: entity.to_string(),
            reason: reason.into(),
        }
    }

    /// True for failures that only invalidate a single entity's result.
    pub fn is_entity_scoped(&self) -> bool {
        matches!(
            self,
            Self::Schema { .. } | Self::MissingFile { .. } | Self::InsufficientData { .. }
        )
    }
}
