//! Tile layouts and the power-of-two zoomed layout scheme.

use serde::{Deserialize, Serialize};

use crate::{CatalogError, CatalogResult, CrsCode, Extent, SpatialKey};

/// Deepest zoom whose `2^z` tile count fits the layout grid.
pub const MAX_ZOOM: u32 = 31;

/// Grid of tiles and the pixel size of each tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TileLayout {
    pub layout_cols: u32,
    pub layout_rows: u32,
    pub tile_cols: u32,
    pub tile_rows: u32,
}

/// A tile layout anchored to an extent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutDefinition {
    pub extent: Extent,
    pub tile_layout: TileLayout,
}

impl LayoutDefinition {
    pub fn new(extent: Extent, tile_layout: TileLayout) -> Self {
        Self {
            extent,
            tile_layout,
        }
    }

    /// Map units covered by one tile along x.
    pub fn tile_width(&self) -> f64 {
        self.extent.width() / self.tile_layout.layout_cols as f64
    }

    /// Map units covered by one tile along y.
    pub fn tile_height(&self) -> f64 {
        self.extent.height() / self.tile_layout.layout_rows as f64
    }

    /// Inclusive key range covering `extent`, clamped to the layout grid.
    /// Rows grow southward from `extent.ymax`.
    ///
    /// Returns `None` when the extent falls entirely outside the layout.
    pub fn extent_to_bounds(&self, extent: &Extent) -> Option<(SpatialKey, SpatialKey)> {
        let clipped = self.extent.intersection(extent)?;

        let tw = self.tile_width();
        let th = self.tile_height();
        let max_col = self.tile_layout.layout_cols as i64 - 1;
        let max_row = self.tile_layout.layout_rows as i64 - 1;

        let col_min = ((clipped.xmin - self.extent.xmin) / tw).floor() as i64;
        let row_min = ((self.extent.ymax - clipped.ymax) / th).floor() as i64;
        // An edge lying exactly on a tile boundary does not spill into the next tile.
        let col_max = ((clipped.xmax - self.extent.xmin) / tw).ceil() as i64 - 1;
        let row_max = ((self.extent.ymax - clipped.ymin) / th).ceil() as i64 - 1;

        let min = SpatialKey::new(col_min.clamp(0, max_col), row_min.clamp(0, max_row));
        let max = SpatialKey::new(
            col_max.clamp(min.col, max_col),
            row_max.clamp(min.row, max_row),
        );
        Some((min, max))
    }
}

/// Layout scheme where zoom `z` splits the CRS world extent into `2^z x 2^z` tiles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoomedLayoutScheme {
    pub crs: String,
    pub tile_size: u32,
    #[serde(default = "default_resolution_threshold")]
    pub resolution_threshold: f64,
}

fn default_resolution_threshold() -> f64 {
    0.1
}

impl ZoomedLayoutScheme {
    pub fn new(crs: impl Into<String>, tile_size: u32) -> Self {
        Self {
            crs: crs.into(),
            tile_size,
            resolution_threshold: default_resolution_threshold(),
        }
    }

    pub fn level_for_zoom(&self, zoom: u32) -> CatalogResult<LayoutDefinition> {
        let crs = CrsCode::parse(&self.crs)?;
        let tiles = 1u32
            .checked_shl(zoom)
            .ok_or(CatalogError::UnsupportedZoom { zoom, max: MAX_ZOOM })?;

        Ok(LayoutDefinition::new(
            crs.world_extent(),
            TileLayout {
                layout_cols: tiles,
                layout_rows: tiles,
                tile_cols: self.tile_size,
                tile_rows: self.tile_size,
            },
        ))
    }
}
