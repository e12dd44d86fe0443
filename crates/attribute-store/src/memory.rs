//! In-memory attribute store.
//!
//! Backs `memory://` URIs. Contents live only as long as the store value.

use async_trait::async_trait;
use serde_json::Value;
use std::collections::BTreeMap;
use tokio::sync::RwLock;
use tracing::debug;

use catalog_common::{CatalogError, CatalogResult, LayerId};

use crate::store::{validate_key, AttributeStore};

/// Attribute store holding every record in a map.
#[derive(Default)]
pub struct MemoryAttributeStore {
    layers: RwLock<BTreeMap<LayerId, BTreeMap<String, Value>>>,
}

impl MemoryAttributeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of stored attributes across all layers.
    pub async fn len(&self) -> usize {
        self.layers.read().await.values().map(BTreeMap::len).sum()
    }

    pub async fn is_empty(&self) -> bool {
        self.layers.read().await.is_empty()
    }
}

#[async_trait]
impl AttributeStore for MemoryAttributeStore {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn read(&self, id: &LayerId, name: &str) -> CatalogResult<Value> {
        let layers = self.layers.read().await;
        layers
            .get(id)
            .and_then(|attrs| attrs.get(name))
            .cloned()
            .ok_or_else(|| CatalogError::AttributeNotFound {
                layer: id.clone(),
                attribute: name.to_string(),
            })
    }

    async fn write(&self, id: &LayerId, name: &str, value: &Value) -> CatalogResult<()> {
        validate_key(id, name)?;
        debug!(layer = %id, attribute = name, "Writing attribute");

        let mut layers = self.layers.write().await;
        layers
            .entry(id.clone())
            .or_default()
            .insert(name.to_string(), value.clone());
        Ok(())
    }

    async fn delete(&self, id: &LayerId, name: &str) -> CatalogResult<()> {
        let mut layers = self.layers.write().await;
        let attrs = layers
            .get_mut(id)
            .ok_or_else(|| CatalogError::LayerNotFound(id.clone()))?;

        attrs.remove(name);
        if attrs.is_empty() {
            layers.remove(id);
        }
        Ok(())
    }

    async fn delete_layer(&self, id: &LayerId) -> CatalogResult<()> {
        let mut layers = self.layers.write().await;
        match layers.remove(id) {
            Some(attrs) => {
                debug!(layer = %id, count = attrs.len(), "Deleted layer attributes");
                Ok(())
            }
            None => Err(CatalogError::LayerNotFound(id.clone())),
        }
    }

    async fn layer_exists(&self, id: &LayerId) -> CatalogResult<bool> {
        Ok(self.layers.read().await.contains_key(id))
    }

    async fn layer_ids(&self) -> CatalogResult<Vec<LayerId>> {
        Ok(self.layers.read().await.keys().cloned().collect())
    }

    async fn available_attributes(&self, id: &LayerId) -> CatalogResult<Vec<String>> {
        let layers = self.layers.read().await;
        Ok(layers
            .get(id)
            .map(|attrs| attrs.keys().cloned().collect())
            .unwrap_or_default())
    }
}
