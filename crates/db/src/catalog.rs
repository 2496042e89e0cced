use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::debug;

use staybot_core::domain::accommodation::AccommodationRecord;
use staybot_core::ports::{CatalogError, CatalogSource};

/// Accommodation catalog backed by a JSON array on disk.
///
/// The file is read on every fetch, so edits made by the owner take effect
/// on the next request without a restart.
#[derive(Clone, Debug)]
pub struct FileCatalog {
    path: PathBuf,
}

impl FileCatalog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl CatalogSource for FileCatalog {
    async fn fetch_catalog(&self) -> Result<Vec<AccommodationRecord>, CatalogError> {
        let raw = tokio::fs::read_to_string(&self.path).await.map_err(|error| {
            CatalogError::Unavailable(format!("{}: {error}", self.path.display()))
        })?;

        let records = serde_json::from_str::<Vec<AccommodationRecord>>(&raw)
            .map_err(|error| CatalogError::Decode(format!("{}: {error}", self.path.display())))?;

        debug!(
            event_name = "db.catalog.loaded",
            path = %self.path.display(),
            records = records.len(),
            "accommodation catalog loaded"
        );
        Ok(records)
    }
}
