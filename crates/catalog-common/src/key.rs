//! Tile keys and key bounds.

use chrono::{DateTime, TimeZone, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// A tile position within a layout grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SpatialKey {
    pub col: i64,
    pub row: i64,
}

impl SpatialKey {
    pub fn new(col: i64, row: i64) -> Self {
        Self { col, row }
    }
}

/// A tile position plus an instant, stored as epoch milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SpaceTimeKey {
    pub col: i64,
    pub row: i64,
    pub instant: i64,
}

impl SpaceTimeKey {
    pub fn new(col: i64, row: i64, time: DateTime<Utc>) -> Self {
        Self {
            col,
            row,
            instant: time.timestamp_millis(),
        }
    }

    pub fn time(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_millis_opt(self.instant).single()
    }
}

/// Keys that carry a spatial component which a layout can replace.
pub trait LayoutKey: Copy + Serialize + DeserializeOwned + Send + Sync + 'static {
    fn spatial(&self) -> SpatialKey;

    /// Same key with its spatial component replaced, other dimensions kept.
    fn with_spatial(&self, spatial: SpatialKey) -> Self;
}

impl LayoutKey for SpatialKey {
    fn spatial(&self) -> SpatialKey {
        *self
    }

    fn with_spatial(&self, spatial: SpatialKey) -> Self {
        spatial
    }
}

impl LayoutKey for SpaceTimeKey {
    fn spatial(&self) -> SpatialKey {
        SpatialKey::new(self.col, self.row)
    }

    fn with_spatial(&self, spatial: SpatialKey) -> Self {
        Self {
            col: spatial.col,
            row: spatial.row,
            instant: self.instant,
        }
    }
}

/// Inclusive minimum and maximum keys of a layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(bound(deserialize = "K: DeserializeOwned", serialize = "K: Serialize"))]
pub struct KeyBounds<K> {
    pub min_key: K,
    pub max_key: K,
}

impl<K: LayoutKey> KeyBounds<K> {
    pub fn new(min_key: K, max_key: K) -> Self {
        Self { min_key, max_key }
    }

    /// Replace the spatial extent of the bounds, keeping non-spatial dimensions.
    pub fn with_spatial_bounds(&self, min: SpatialKey, max: SpatialKey) -> Self {
        Self {
            min_key: self.min_key.with_spatial(min),
            max_key: self.max_key.with_spatial(max),
        }
    }
}
