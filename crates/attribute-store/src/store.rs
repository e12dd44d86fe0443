//! The attribute store capability shared by every backend.

use async_trait::async_trait;
use serde_json::Value;

use catalog_common::{
    CatalogError, CatalogResult, LayerHeader, LayerId, HEADER_FIELD, METADATA_FIELD,
};

/// Separator used in stored attribute keys; may not appear in names.
pub const NAME_SEPARATOR: &str = "__";

/// Key/value store of JSON attributes, partitioned by layer.
///
/// Backends map their own "missing object" signal to
/// [`CatalogError::AttributeNotFound`] on `read`, and report a layer with no
/// attributes left as [`CatalogError::LayerNotFound`] on deletes.
#[async_trait]
pub trait AttributeStore: Send + Sync {
    /// Short backend name used in logs ("memory", "file", "s3").
    fn backend(&self) -> &'static str;

    /// Read one attribute value.
    async fn read(&self, id: &LayerId, name: &str) -> CatalogResult<Value>;

    /// Write one attribute value, replacing any previous value.
    async fn write(&self, id: &LayerId, name: &str, value: &Value) -> CatalogResult<()>;

    /// Remove one attribute. Removing an attribute the layer lacks is a no-op.
    async fn delete(&self, id: &LayerId, name: &str) -> CatalogResult<()>;

    /// Remove every attribute of a layer.
    async fn delete_layer(&self, id: &LayerId) -> CatalogResult<()>;

    /// True if at least one attribute is stored for the layer.
    async fn layer_exists(&self, id: &LayerId) -> CatalogResult<bool>;

    /// Every layer with at least one attribute.
    async fn layer_ids(&self) -> CatalogResult<Vec<LayerId>>;

    /// Names of the attributes stored for a layer, sorted.
    async fn available_attributes(&self, id: &LayerId) -> CatalogResult<Vec<String>>;

    /// Read and decode the layer header.
    async fn read_header(&self, id: &LayerId) -> CatalogResult<LayerHeader> {
        let value = self.read_layer_field(id, HEADER_FIELD).await?;
        serde_json::from_value(value).map_err(|e| {
            CatalogError::InvalidJson(format!("Malformed header for layer {}: {}", id, e))
        })
    }

    /// Read the raw metadata document of a layer.
    async fn read_metadata(&self, id: &LayerId) -> CatalogResult<Value> {
        self.read_layer_field(id, METADATA_FIELD).await
    }

    /// Zoom levels registered under a layer name, sorted ascending.
    async fn available_zoom_levels(&self, name: &str) -> CatalogResult<Vec<u32>> {
        let mut zooms: Vec<u32> = self
            .layer_ids()
            .await?
            .into_iter()
            .filter(|id| id.name == name)
            .map(|id| id.zoom)
            .collect();
        zooms.sort_unstable();
        zooms.dedup();
        Ok(zooms)
    }

    /// Read a field that every registered layer carries; absence means the layer is missing.
    async fn read_layer_field(&self, id: &LayerId, field: &str) -> CatalogResult<Value> {
        match self.read(id, field).await {
            Err(CatalogError::AttributeNotFound { .. }) => {
                Err(CatalogError::LayerNotFound(id.clone()))
            }
            other => other,
        }
    }
}

/// Reject names that would collide with the stored key layout.
pub fn validate_name(kind: &str, name: &str) -> CatalogResult<()> {
    let invalid = |message: String| CatalogError::InvalidName {
        name: name.to_string(),
        message,
    };

    if name.is_empty() {
        return Err(invalid(format!("{} name is empty", kind)));
    }
    if name.contains(NAME_SEPARATOR) {
        return Err(invalid(format!(
            "{} name may not contain '{}'",
            kind, NAME_SEPARATOR
        )));
    }
    // An edge underscore would run into the separator of the stored key
    if name.starts_with('_') || name.ends_with('_') {
        return Err(invalid(format!(
            "{} name may not begin or end with '_'",
            kind
        )));
    }
    if name.contains('/') || name.contains('\\') {
        return Err(invalid(format!("{} name may not contain path separators", kind)));
    }
    Ok(())
}

/// Validate both halves of an attribute key.
pub(crate) fn validate_key(id: &LayerId, name: &str) -> CatalogResult<()> {
    validate_name("layer", &id.name)?;
    validate_name("attribute", name)
}
