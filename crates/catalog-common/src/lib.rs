//! Common types shared across the raster catalog crates.

pub mod crs;
pub mod error;
pub mod extent;
pub mod key;
pub mod layer;
pub mod layout;
pub mod metadata;

pub use crs::CrsCode;
pub use error::{CatalogError, CatalogResult};
pub use extent::Extent;
pub use key::{KeyBounds, LayoutKey, SpaceTimeKey, SpatialKey};
pub use layer::{KeySchema, LayerHeader, LayerId, LayerType};
pub use layout::{LayoutDefinition, TileLayout, ZoomedLayoutScheme, MAX_ZOOM};
pub use metadata::{
    CogLayerMetadata, CogLayerStorageMetadata, TileLayerMetadata, ZoomRange,
};

/// Attribute name under which a layer's header is stored.
pub const HEADER_FIELD: &str = "header";

/// Attribute name under which a layer's metadata document is stored.
pub const METADATA_FIELD: &str = "metadata";
