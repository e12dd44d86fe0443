//! Storage URI parsing and backend selection.

use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use url::Url;

use catalog_common::{CatalogError, CatalogResult};

use crate::{AttributeStore, MemoryAttributeStore, ObjectAttributeStore, StoreConfig};

/// A parsed storage location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreUri {
    Memory,
    File { root: PathBuf },
    S3 { bucket: String, prefix: String },
}

impl StoreUri {
    /// Parse a storage URI.
    ///
    /// Accepts `memory://`, `file:///path`, `s3://bucket/prefix` (also `s3a`
    /// and `s3n`) and bare filesystem paths.
    pub fn parse(uri: &str) -> CatalogResult<Self> {
        let invalid = |message: String| CatalogError::InvalidUri {
            uri: uri.to_string(),
            message,
        };

        if uri.trim().is_empty() {
            return Err(invalid("URI is empty".to_string()));
        }
        if !uri.contains("://") {
            return Ok(StoreUri::File {
                root: PathBuf::from(uri),
            });
        }

        let url = Url::parse(uri).map_err(|e| invalid(e.to_string()))?;
        match url.scheme() {
            "memory" | "mem" => Ok(StoreUri::Memory),
            "file" => {
                let root = url
                    .to_file_path()
                    .map_err(|_| invalid("not an absolute local path".to_string()))?;
                Ok(StoreUri::File { root })
            }
            "s3" | "s3a" | "s3n" => {
                let bucket = url
                    .host_str()
                    .filter(|h| !h.is_empty())
                    .ok_or_else(|| invalid("missing bucket".to_string()))?;
                Ok(StoreUri::S3 {
                    bucket: bucket.to_string(),
                    prefix: url.path().trim_matches('/').to_string(),
                })
            }
            other => Err(CatalogError::UnsupportedScheme(other.to_string())),
        }
    }

    /// Build the backend for this location.
    pub fn open(&self, config: &StoreConfig) -> CatalogResult<Arc<dyn AttributeStore>> {
        let store: Arc<dyn AttributeStore> = match self {
            StoreUri::Memory => Arc::new(MemoryAttributeStore::new()),
            StoreUri::File { root } => Arc::new(ObjectAttributeStore::local(root)?),
            StoreUri::S3 { bucket, prefix } => {
                Arc::new(ObjectAttributeStore::s3(bucket, prefix, &config.s3)?)
            }
        };
        Ok(store)
    }
}

/// Open the attribute store a URI points at.
pub fn open_store(uri: &str, config: &StoreConfig) -> CatalogResult<Arc<dyn AttributeStore>> {
    let parsed = StoreUri::parse(uri)?;
    let store = parsed.open(config)?;
    info!(uri = %uri, backend = store.backend(), "Opened attribute store");
    Ok(store)
}
