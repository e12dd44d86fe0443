//! Layer metadata documents and COG zoom resolution.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{
    CatalogError, CatalogResult, Extent, KeyBounds, LayerId, LayoutDefinition, LayoutKey,
    ZoomedLayoutScheme,
};

/// Metadata describing one zoom level of a tiled layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(bound(deserialize = "K: DeserializeOwned", serialize = "K: Serialize"))]
pub struct TileLayerMetadata<K> {
    pub cell_type: String,
    pub layout_definition: LayoutDefinition,
    pub extent: Extent,
    pub crs: String,
    pub bounds: KeyBounds<K>,
    /// Set on views resolved from a COG layer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zoom: Option<u32>,
}

/// Inclusive range of zoom levels served by one set of COG files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoomRange {
    pub min_zoom: u32,
    pub max_zoom: u32,
}

impl ZoomRange {
    pub fn new(min_zoom: u32, max_zoom: u32) -> Self {
        Self { min_zoom, max_zoom }
    }

    pub fn contains(&self, zoom: u32) -> bool {
        self.min_zoom <= zoom && zoom <= self.max_zoom
    }
}

/// Metadata for every zoom level of a COG layer, stored once at zoom 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(bound(deserialize = "K: DeserializeOwned", serialize = "K: Serialize"))]
pub struct CogLayerMetadata<K> {
    pub cell_type: String,
    pub zoom_range_infos: Vec<(ZoomRange, KeyBounds<K>)>,
    pub layout_scheme: ZoomedLayoutScheme,
    pub extent: Extent,
    pub crs: String,
}

impl<K: LayoutKey> CogLayerMetadata<K> {
    pub fn zoom_range_info_for(&self, zoom: u32) -> Option<&(ZoomRange, KeyBounds<K>)> {
        self.zoom_range_infos
            .iter()
            .find(|(range, _)| range.contains(zoom))
    }

    pub fn max_zoom(&self) -> Option<u32> {
        self.zoom_range_infos.iter().map(|(r, _)| r.max_zoom).max()
    }

    /// Resolve the view of this layer at `id.zoom`.
    ///
    /// The spatial bounds are recomputed from the layer extent at the requested
    /// zoom; any temporal bounds of the matching zoom range are kept.
    pub fn tile_layer_metadata(&self, id: &LayerId) -> CatalogResult<TileLayerMetadata<K>> {
        let (_, stored_bounds) =
            self.zoom_range_info_for(id.zoom)
                .ok_or_else(|| CatalogError::ZoomOutOfRange {
                    name: id.name.clone(),
                    zoom: id.zoom,
                })?;

        let layout = self.layout_scheme.level_for_zoom(id.zoom)?;
        let bounds = match layout.extent_to_bounds(&self.extent) {
            Some((min, max)) => stored_bounds.with_spatial_bounds(min, max),
            None => *stored_bounds,
        };

        Ok(TileLayerMetadata {
            cell_type: self.cell_type.clone(),
            layout_definition: layout,
            extent: self.extent,
            crs: self.crs.clone(),
            bounds,
            zoom: Some(id.zoom),
        })
    }
}

/// The zoom-0 `metadata` record of a COG layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(bound(deserialize = "K: DeserializeOwned", serialize = "K: Serialize"))]
pub struct CogLayerStorageMetadata<K> {
    pub metadata: CogLayerMetadata<K>,
    /// Key indexes per zoom range; opaque to the catalog.
    #[serde(default)]
    pub key_indexes: Map<String, Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{SpatialKey, TileLayout};

    fn spatial_cog() -> CogLayerMetadata<SpatialKey> {
        CogLayerMetadata {
            cell_type: "float32".to_string(),
            zoom_range_infos: vec![
                (
                    ZoomRange::new(0, 3),
                    KeyBounds::new(SpatialKey::new(0, 0), SpatialKey::new(0, 0)),
                ),
                (
                    ZoomRange::new(4, 8),
                    KeyBounds::new(SpatialKey::new(0, 0), SpatialKey::new(15, 15)),
                ),
            ],
            layout_scheme: ZoomedLayoutScheme::new("EPSG:4326", 256),
            extent: Extent::new(0.0, 0.0, 90.0, 45.0),
            crs: "EPSG:4326".to_string(),
        }
    }

    #[test]
    fn test_zoom_range_lookup() {
        let cog = spatial_cog();
        assert_eq!(cog.zoom_range_info_for(2).unwrap().0, ZoomRange::new(0, 3));
        assert_eq!(cog.zoom_range_info_for(8).unwrap().0, ZoomRange::new(4, 8));
        assert!(cog.zoom_range_info_for(9).is_none());
        assert_eq!(cog.max_zoom(), Some(8));
    }

    #[test]
    fn test_resolve_view_at_zoom() {
        let cog = spatial_cog();
        let view = cog.tile_layer_metadata(&LayerId::new("dem", 2)).unwrap();

        assert_eq!(view.zoom, Some(2));
        assert_eq!(
            view.layout_definition.tile_layout,
            TileLayout {
                layout_cols: 4,
                layout_rows: 4,
                tile_cols: 256,
                tile_rows: 256
            }
        );
        assert_eq!(view.bounds.min_key, SpatialKey::new(2, 1));
        assert_eq!(view.bounds.max_key, SpatialKey::new(2, 1));
    }

    #[test]
    fn test_resolve_outside_ranges() {
        let err = spatial_cog()
            .tile_layer_metadata(&LayerId::new("dem", 12))
            .unwrap_err();
        assert!(matches!(
            err,
            CatalogError::ZoomOutOfRange { zoom: 12, .. }
        ));
    }

    #[test]
    fn test_resolve_past_deepest_layout_zoom() {
        let mut cog = spatial_cog();
        cog.zoom_range_infos.push((
            ZoomRange::new(9, 40),
            KeyBounds::new(SpatialKey::new(0, 0), SpatialKey::new(0, 0)),
        ));

        let view = cog.tile_layer_metadata(&LayerId::new("dem", 31)).unwrap();
        assert_eq!(view.layout_definition.tile_layout.layout_cols, 1u32 << 31);

        let err = cog
            .tile_layer_metadata(&LayerId::new("dem", 35))
            .unwrap_err();
        assert!(matches!(err, CatalogError::UnsupportedZoom { zoom: 35, .. }));
    }
}
