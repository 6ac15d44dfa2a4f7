use tracing::{info, instrument, warn};

use crate::decode;
use crate::errors::Result;
use crate::model::Document;
use crate::resolver::{self, ConfigPath, Resolution};
use crate::source::PayloadSource;

/// Immutable, process-resident configuration document.
///
/// Built once before serving and shared read-only afterwards (typically behind
/// an `Arc`). There is no way to modify or reload it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigStore {
    document: Document,
}

impl ConfigStore {
    /// Decode `payload` as a JSON configuration document.
    ///
    /// Objects must be JSON objects at every level; `null` stands for an empty
    /// value anywhere, including the whole payload.
    pub fn load(payload: &[u8]) -> Result<Self> {
        let document = decode::document_from_slice(payload)?;
        Ok(Self { document })
    }

    /// Wrap an already-built document.
    pub fn from_document(document: Document) -> Self {
        Self { document }
    }

    /// Fetch the payload from `source` and decode it.
    ///
    /// Logs a summary of the loaded tree and a warning for every path that is
    /// unreachable because an earlier sibling has the same name.
    #[instrument(skip_all, fields(source = %source.describe()))]
    pub async fn from_source<S: PayloadSource>(source: &S) -> Result<Self> {
        let payload = source.fetch().await?;
        let store = Self::load(&payload)?;

        let summary = store.document.summary();
        info!(
            repositories = summary.repositories,
            apps = summary.apps,
            environments = summary.environments,
            "configuration loaded"
        );
        for path in store.document.shadowed_paths() {
            warn!(%path, "duplicate name; entry is unreachable by lookup");
        }

        Ok(store)
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn resolve(&self, path: &ConfigPath<'_>) -> Result<Resolution<'_>> {
        resolver::resolve(&self.document, path)
    }
}
