use thiserror::Error;

pub type Result<T> = std::result::Result<T, ConfigStoreError>;

#[derive(Debug, Error)]
pub enum ConfigStoreError {
    /// The payload source could not produce any bytes.
    #[error("configuration payload unavailable from {source_name}: {error}")]
    PayloadUnavailable {
        source_name: String,
        #[source]
        error: std::io::Error,
    },

    /// Bytes were obtained but are not a configuration document.
    #[error("failed to decode configuration document: {0}")]
    Decode(#[from] serde_json::Error),

    /// No entity matches the requested path. Definitive, never retried.
    #[error("Configuration not found: {path}")]
    NotFound { path: String },
}

impl ConfigStoreError {
    /// `true` for the per-request outcome, `false` for startup failures.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ConfigStoreError::NotFound { .. })
    }
}
