//! Where the configuration bytes come from.

use std::future::Future;
use std::path::PathBuf;

use tracing::{debug, instrument};

use crate::errors::{ConfigStoreError, Result};

/// Produces the raw configuration document.
///
/// A local file is the only production source today; a key-value or document
/// database would implement this same trait.
pub trait PayloadSource {
    fn fetch(&self) -> impl Future<Output = Result<Vec<u8>>> + Send;

    /// Human-readable origin for logs and errors.
    fn describe(&self) -> String;
}

/// Reads the document from a file on local disk.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl PayloadSource for FileSource {
    #[instrument(skip(self), fields(path = %self.path.display()))]
    async fn fetch(&self) -> Result<Vec<u8>> {
        let bytes = tokio::fs::read(&self.path)
            .await
            .map_err(|error| ConfigStoreError::PayloadUnavailable {
                source_name: self.describe(),
                error,
            })?;
        debug!(bytes = bytes.len(), "payload read");
        Ok(bytes)
    }

    fn describe(&self) -> String {
        format!("file:{}", self.path.display())
    }
}

/// Serves a payload already held in memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    bytes: Vec<u8>,
}

impl MemorySource {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: bytes.into(),
        }
    }
}

impl PayloadSource for MemorySource {
    async fn fetch(&self) -> Result<Vec<u8>> {
        Ok(self.bytes.clone())
    }

    fn describe(&self) -> String {
        format!("memory:{} bytes", self.bytes.len())
    }
}
