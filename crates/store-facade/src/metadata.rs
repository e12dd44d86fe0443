//! Layer metadata resolution.
//!
//! Per-zoom layers store their metadata document at each zoom. COG layers
//! store one document at zoom 0 and the view for a zoom is derived from it.

use serde_json::Value;
use tracing::debug;

use attribute_store::AttributeStore;
use catalog_common::{
    CatalogError, CatalogResult, CogLayerStorageMetadata, KeySchema, LayerHeader, LayerId,
    LayerType, LayoutKey, SpaceTimeKey, SpatialKey,
};

/// Resolve the metadata document of `id` as JSON.
pub async fn resolve_layer_metadata(
    store: &dyn AttributeStore,
    id: &LayerId,
) -> CatalogResult<Value> {
    let header = match find_header(store, id).await? {
        Some(header) => header,
        // Layers registered without a header are plain per-zoom layers
        None => return store.read_metadata(id).await,
    };

    match header.layer_type()? {
        LayerType::Avro => store.read_metadata(id).await,
        LayerType::Cog => {
            debug!(layer = %id, key_class = %header.key_class, "Resolving COG metadata");
            match header.key_schema()? {
                KeySchema::Spatial => resolve_cog::<SpatialKey>(store, id).await,
                KeySchema::SpaceTime => resolve_cog::<SpaceTimeKey>(store, id).await,
            }
        }
    }
}

/// Header for `id`, falling back to the zoom-0 header of a COG layer.
async fn find_header(
    store: &dyn AttributeStore,
    id: &LayerId,
) -> CatalogResult<Option<LayerHeader>> {
    match store.read_header(id).await {
        Ok(header) => return Ok(Some(header)),
        Err(CatalogError::LayerNotFound(_)) => {}
        Err(e) => return Err(e),
    }

    if id.zoom == 0 {
        return Ok(None);
    }

    match store.read_header(&id.base()).await {
        Ok(header) => Ok((header.layer_type()? == LayerType::Cog).then_some(header)),
        Err(CatalogError::LayerNotFound(_)) => Ok(None),
        Err(e) => Err(e),
    }
}

async fn resolve_cog<K: LayoutKey>(
    store: &dyn AttributeStore,
    id: &LayerId,
) -> CatalogResult<Value> {
    let stored = store.read_metadata(&id.base()).await?;
    let stored: CogLayerStorageMetadata<K> = serde_json::from_value(stored).map_err(|e| {
        CatalogError::InvalidJson(format!("Malformed COG metadata for layer {}: {}", id.name, e))
    })?;

    let view = stored.metadata.tile_layer_metadata(id)?;
    Ok(serde_json::to_value(view)?)
}
