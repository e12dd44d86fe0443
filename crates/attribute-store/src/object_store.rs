//! Attribute store over object storage (local filesystem or S3 compatible).

use async_trait::async_trait;
use bytes::Bytes;
use futures::TryStreamExt;
use object_store::{
    aws::AmazonS3Builder, local::LocalFileSystem, path::Path, ObjectStore,
};
use percent_encoding::percent_decode_str;
use serde_json::Value;
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::{debug, instrument, warn};

use catalog_common::{CatalogError, CatalogResult, LayerId, HEADER_FIELD, METADATA_FIELD};

use crate::config::S3Config;
use crate::store::{validate_key, AttributeStore, NAME_SEPARATOR};

/// Naming convention for attribute objects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyLayout {
    /// `attributes/{layer}___{zoom}___{attribute}.json`
    File,
    /// `_attributes/{attribute}__{layer}__{zoom}.json`
    S3,
}

impl KeyLayout {
    fn directory(&self) -> &'static str {
        match self {
            KeyLayout::File => "attributes",
            KeyLayout::S3 => "_attributes",
        }
    }

    /// Separator between the parts of an object file name.
    pub fn separator(&self) -> &'static str {
        match self {
            KeyLayout::File => "___",
            KeyLayout::S3 => NAME_SEPARATOR,
        }
    }

    /// Object file name for an attribute, before path encoding.
    pub fn file_name(&self, id: &LayerId, name: &str) -> String {
        let sep = self.separator();
        match self {
            KeyLayout::File => format!("{}{sep}{}{sep}{}.json", id.name, id.zoom, name),
            KeyLayout::S3 => format!("{}{sep}{}{sep}{}.json", name, id.name, id.zoom),
        }
    }

    /// Recover `(layer, attribute)` from an object file name as listed.
    ///
    /// Listed names are percent-encoded path parts, so they are decoded first.
    pub fn parse_file_name(&self, file_name: &str) -> Option<(LayerId, String)> {
        let decoded = percent_decode_str(file_name).decode_utf8().ok()?;
        let stem = decoded.strip_suffix(".json")?;
        let parts: Vec<&str> = stem.split(self.separator()).collect();
        if parts.len() != 3 {
            return None;
        }

        let (layer, zoom, attribute) = match self {
            KeyLayout::File => (parts[0], parts[1], parts[2]),
            KeyLayout::S3 => (parts[1], parts[2], parts[0]),
        };
        let zoom = zoom.parse().ok()?;
        Some((LayerId::new(layer, zoom), attribute.to_string()))
    }
}

/// Attribute store writing one JSON object per attribute.
///
/// Each object holds `[layerId, value]`. Reads and writes touch a single object.
/// Listing operations (`layer_ids`, `available_attributes`, `delete_layer`) list
/// the whole attribute directory, as does `layer_exists` for layers carrying
/// neither a header nor a metadata record.
pub struct ObjectAttributeStore {
    store: Arc<dyn ObjectStore>,
    prefix: String,
    layout: KeyLayout,
    backend: &'static str,
}

impl ObjectAttributeStore {
    /// Wrap an existing object store.
    pub fn new(
        store: Arc<dyn ObjectStore>,
        prefix: impl Into<String>,
        layout: KeyLayout,
    ) -> Self {
        let backend = match layout {
            KeyLayout::File => "file",
            KeyLayout::S3 => "s3",
        };
        Self {
            store,
            prefix: prefix.into().trim_matches('/').to_string(),
            layout,
            backend,
        }
    }

    /// Store rooted at a local directory, created if missing.
    pub fn local(root: &std::path::Path) -> CatalogResult<Self> {
        std::fs::create_dir_all(root)?;
        let store = LocalFileSystem::new_with_prefix(root).map_err(|e| {
            CatalogError::StorageError(format!(
                "Failed to open catalog at {}: {}",
                root.display(),
                e
            ))
        })?;
        Ok(Self::new(Arc::new(store), "", KeyLayout::File))
    }

    /// Store under `prefix` in an S3 bucket.
    pub fn s3(bucket: &str, prefix: &str, config: &S3Config) -> CatalogResult<Self> {
        let mut builder = AmazonS3Builder::from_env()
            .with_bucket_name(bucket)
            .with_region(&config.region);

        if let Some(endpoint) = &config.endpoint {
            builder = builder.with_endpoint(endpoint);
        }
        if let (Some(key), Some(secret)) = (&config.access_key_id, &config.secret_access_key) {
            builder = builder
                .with_access_key_id(key)
                .with_secret_access_key(secret);
        }
        if config.allow_http {
            builder = builder.with_allow_http(true);
        }

        let store = builder
            .build()
            .map_err(|e| CatalogError::StorageError(format!("Failed to create S3 client: {}", e)))?;

        Ok(Self::new(Arc::new(store), prefix, KeyLayout::S3))
    }

    pub fn layout(&self) -> KeyLayout {
        self.layout
    }

    fn directory(&self) -> Path {
        if self.prefix.is_empty() {
            Path::from(self.layout.directory())
        } else {
            Path::from(format!("{}/{}", self.prefix, self.layout.directory()))
        }
    }

    fn attribute_path(&self, id: &LayerId, name: &str) -> Path {
        self.directory().child(self.layout.file_name(id, name))
    }

    /// Every attribute object under the attribute directory.
    async fn list_attributes(&self) -> CatalogResult<Vec<(LayerId, String, Path)>> {
        let dir = self.directory();
        let mut entries = Vec::new();

        let mut stream = self.store.list(Some(&dir));
        while let Some(meta) = stream
            .try_next()
            .await
            .map_err(|e| CatalogError::StorageError(format!("List failed: {}", e)))?
        {
            let Some(file_name) = meta.location.filename() else {
                continue;
            };
            match self.layout.parse_file_name(file_name) {
                Some((id, attribute)) => entries.push((id, attribute, meta.location.clone())),
                None => warn!(path = %meta.location, "Skipping unrecognized attribute object"),
            }
        }

        Ok(entries)
    }

    async fn layer_objects(&self, id: &LayerId) -> CatalogResult<Vec<(String, Path)>> {
        Ok(self
            .list_attributes()
            .await?
            .into_iter()
            .filter(|(layer, _, _)| layer == id)
            .map(|(_, attribute, path)| (attribute, path))
            .collect())
    }

    async fn object_exists(&self, path: &Path) -> CatalogResult<bool> {
        match self.store.head(path).await {
            Ok(_) => Ok(true),
            Err(object_store::Error::NotFound { .. }) => Ok(false),
            Err(e) => Err(CatalogError::StorageError(format!(
                "Failed to check {}: {}",
                path, e
            ))),
        }
    }

    async fn delete_object(&self, path: &Path) -> CatalogResult<()> {
        match self.store.delete(path).await {
            Ok(()) | Err(object_store::Error::NotFound { .. }) => Ok(()),
            Err(e) => Err(CatalogError::StorageError(format!(
                "Failed to delete {}: {}",
                path, e
            ))),
        }
    }
}

#[async_trait]
impl AttributeStore for ObjectAttributeStore {
    fn backend(&self) -> &'static str {
        self.backend
    }

    #[instrument(skip(self), fields(backend = self.backend))]
    async fn read(&self, id: &LayerId, name: &str) -> CatalogResult<Value> {
        let path = self.attribute_path(id, name);

        let result = match self.store.get(&path).await {
            Ok(result) => result,
            Err(object_store::Error::NotFound { .. }) => {
                return Err(CatalogError::AttributeNotFound {
                    layer: id.clone(),
                    attribute: name.to_string(),
                })
            }
            Err(e) => {
                return Err(CatalogError::StorageError(format!(
                    "Failed to read {}: {}",
                    path, e
                )))
            }
        };

        let bytes = result
            .bytes()
            .await
            .map_err(|e| CatalogError::StorageError(format!("Failed to read bytes: {}", e)))?;
        debug!(size = bytes.len(), "Read attribute");

        let (_, value): (LayerId, Value) = serde_json::from_slice(&bytes).map_err(|e| {
            CatalogError::InvalidJson(format!("Malformed attribute object {}: {}", path, e))
        })?;
        Ok(value)
    }

    #[instrument(skip(self, value), fields(backend = self.backend))]
    async fn write(&self, id: &LayerId, name: &str, value: &Value) -> CatalogResult<()> {
        validate_key(id, name)?;
        let path = self.attribute_path(id, name);
        let data = Bytes::from(serde_json::to_vec(&(id, value))?);
        debug!(size = data.len(), path = %path, "Writing attribute");

        self.store
            .put(&path, data.into())
            .await
            .map_err(|e| CatalogError::StorageError(format!("Failed to write {}: {}", path, e)))?;

        Ok(())
    }

    #[instrument(skip(self), fields(backend = self.backend))]
    async fn delete(&self, id: &LayerId, name: &str) -> CatalogResult<()> {
        if !self.layer_exists(id).await? {
            return Err(CatalogError::LayerNotFound(id.clone()));
        }
        self.delete_object(&self.attribute_path(id, name)).await
    }

    #[instrument(skip(self), fields(backend = self.backend))]
    async fn delete_layer(&self, id: &LayerId) -> CatalogResult<()> {
        let objects = self.layer_objects(id).await?;
        if objects.is_empty() {
            return Err(CatalogError::LayerNotFound(id.clone()));
        }

        for (_, path) in &objects {
            self.delete_object(path).await?;
        }
        debug!(count = objects.len(), "Deleted layer attributes");
        Ok(())
    }

    async fn layer_exists(&self, id: &LayerId) -> CatalogResult<bool> {
        // Registered layers carry a header or metadata record
        for field in [HEADER_FIELD, METADATA_FIELD] {
            if self.object_exists(&self.attribute_path(id, field)).await? {
                return Ok(true);
            }
        }
        Ok(!self.layer_objects(id).await?.is_empty())
    }

    async fn layer_ids(&self) -> CatalogResult<Vec<LayerId>> {
        let ids: BTreeSet<LayerId> = self
            .list_attributes()
            .await?
            .into_iter()
            .map(|(id, _, _)| id)
            .collect();
        Ok(ids.into_iter().collect())
    }

    async fn available_attributes(&self, id: &LayerId) -> CatalogResult<Vec<String>> {
        let mut names: Vec<String> = self
            .layer_objects(id)
            .await?
            .into_iter()
            .map(|(attribute, _)| attribute)
            .collect();
        names.sort();
        Ok(names)
    }
}
