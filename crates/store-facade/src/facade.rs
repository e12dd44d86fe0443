//! The attribute store facade.

use serde_json::Value;
use std::future::Future;
use std::sync::Arc;
use tokio::runtime::{Builder, Runtime};
use tracing::{debug, instrument};

use attribute_store::{open_store, AttributeStore, StoreConfig};
use catalog_common::{CatalogError, CatalogResult, LayerId};

use crate::metadata::resolve_layer_metadata;

/// Synchronous JSON-text surface over one attribute store.
///
/// Holds no records of its own: every call goes straight to the store, so the
/// store stays the only source of truth.
pub struct StoreFacade {
    uri: String,
    store: Arc<dyn AttributeStore>,
    runtime: Runtime,
}

impl StoreFacade {
    /// Open the store at `uri`, with S3 settings taken from the environment.
    pub fn open(uri: &str) -> CatalogResult<Self> {
        Self::open_with_config(uri, &StoreConfig::from_env())
    }

    pub fn open_with_config(uri: &str, config: &StoreConfig) -> CatalogResult<Self> {
        let store = open_store(uri, config)?;
        Self::with_store(uri, store)
    }

    /// Wrap an already opened store.
    pub fn with_store(uri: impl Into<String>, store: Arc<dyn AttributeStore>) -> CatalogResult<Self> {
        let runtime = Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| CatalogError::InternalError(format!("Failed to start runtime: {}", e)))?;

        Ok(Self {
            uri: uri.into(),
            store,
            runtime,
        })
    }

    pub fn uri(&self) -> &str {
        &self.uri
    }

    fn block_on<F: Future>(&self, fut: F) -> F::Output {
        self.runtime.block_on(fut)
    }

    /// Metadata document of a layer at a zoom level, as compact JSON.
    #[instrument(skip(self))]
    pub fn read_metadata(&self, name: &str, zoom: u32) -> CatalogResult<String> {
        let id = LayerId::new(name, zoom);
        let metadata = self.block_on(resolve_layer_metadata(self.store.as_ref(), &id))?;
        Ok(serde_json::to_string(&metadata)?)
    }

    /// Value of one attribute as compact JSON, or `None` if the layer lacks it.
    #[instrument(skip(self))]
    pub fn read(&self, name: &str, zoom: u32, attribute: &str) -> CatalogResult<Option<String>> {
        let id = LayerId::new(name, zoom);
        match self.block_on(self.store.read(&id, attribute)) {
            Ok(value) => Ok(Some(serde_json::to_string(&value)?)),
            Err(e) if e.is_attribute_not_found() => {
                debug!("Attribute absent");
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    /// Write one attribute from JSON text. `None` leaves the store untouched.
    #[instrument(skip(self, value))]
    pub fn write(
        &self,
        name: &str,
        zoom: u32,
        attribute: &str,
        value: Option<&str>,
    ) -> CatalogResult<()> {
        let Some(text) = value else {
            return Ok(());
        };
        let value: Value = serde_json::from_str(text)?;
        let id = LayerId::new(name, zoom);
        self.block_on(self.store.write(&id, attribute, &value))
    }

    /// Remove one attribute of a layer.
    #[instrument(skip(self))]
    pub fn delete(&self, name: &str, zoom: u32, attribute: &str) -> CatalogResult<()> {
        let id = LayerId::new(name, zoom);
        self.block_on(self.store.delete(&id, attribute))
    }

    /// Remove every attribute of a layer.
    #[instrument(skip(self))]
    pub fn delete_layer(&self, name: &str, zoom: u32) -> CatalogResult<()> {
        let id = LayerId::new(name, zoom);
        self.block_on(self.store.delete_layer(&id))
    }

    pub fn contains(&self, name: &str, zoom: u32) -> CatalogResult<bool> {
        let id = LayerId::new(name, zoom);
        self.block_on(self.store.layer_exists(&id))
    }

    /// All registered layer ids as a JSON array of `{"name", "zoom"}` objects.
    pub fn layer_ids(&self) -> CatalogResult<String> {
        let mut ids = self.block_on(self.store.layer_ids())?;
        ids.sort();
        Ok(serde_json::to_string(&ids)?)
    }

    /// Attribute names of a layer as a JSON array.
    pub fn available_attributes(&self, name: &str, zoom: u32) -> CatalogResult<String> {
        let id = LayerId::new(name, zoom);
        let names = self.block_on(self.store.available_attributes(&id))?;
        Ok(serde_json::to_string(&names)?)
    }

    /// Zoom levels registered for a layer name as a JSON array.
    pub fn available_zoom_levels(&self, name: &str) -> CatalogResult<String> {
        let zooms = self.block_on(self.store.available_zoom_levels(name))?;
        Ok(serde_json::to_string(&zooms)?)
    }
}

impl std::fmt::Debug for StoreFacade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreFacade")
            .field("uri", &self.uri)
            .field("backend", &self.store.backend())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_none_is_noop() {
        let facade = StoreFacade::open_with_config("memory://", &StoreConfig::default()).unwrap();
        facade.write("elevation", 5, "bounds", None).unwrap();
        assert!(!facade.contains("elevation", 5).unwrap());
        assert_eq!(facade.read("elevation", 5, "bounds").unwrap(), None);
    }

    #[test]
    fn test_malformed_json_never_reaches_store() {
        let facade = StoreFacade::open_with_config("memory://", &StoreConfig::default()).unwrap();
        let err = facade
            .write("elevation", 5, "bounds", Some("{\"xmin\":"))
            .unwrap_err();
        assert!(matches!(err, CatalogError::InvalidJson(_)));
        assert!(!facade.contains("elevation", 5).unwrap());
    }

    #[test]
    fn test_debug_shows_backend() {
        let facade = StoreFacade::open_with_config("memory://", &StoreConfig::default()).unwrap();
        let text = format!("{:?}", facade);
        assert!(text.contains("memory"));
        assert_eq!(facade.uri(), "memory://");
    }
}
