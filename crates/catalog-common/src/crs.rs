//! Coordinate reference systems understood by the zoomed layout scheme.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{CatalogError, CatalogResult, Extent};

const WEB_MERCATOR_MAX: f64 = 20037508.342789244;

/// CRS codes with a well-known world extent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CrsCode {
    /// WGS84 Geographic (lon/lat in degrees)
    Epsg4326,
    /// Web Mercator (meters)
    Epsg3857,
}

impl CrsCode {
    /// Parse a CRS as stored in layer metadata.
    ///
    /// Accepts formats like:
    /// - "EPSG:4326", "epsg:3857", "EPSG:900913"
    /// - proj4 strings such as "+proj=longlat +datum=WGS84 +no_defs"
    pub fn parse(s: &str) -> CatalogResult<Self> {
        let normalized = s.trim().to_uppercase();

        match normalized.as_str() {
            "EPSG:4326" | "CRS:84" => return Ok(CrsCode::Epsg4326),
            "EPSG:3857" | "EPSG:900913" => return Ok(CrsCode::Epsg3857),
            _ => {}
        }

        if normalized.contains("+PROJ=LONGLAT") {
            Ok(CrsCode::Epsg4326)
        } else if normalized.contains("+PROJ=MERC") && normalized.contains("+A=6378137") {
            Ok(CrsCode::Epsg3857)
        } else {
            Err(CatalogError::UnsupportedCrs(s.to_string()))
        }
    }

    /// Extent covered by zoom level 0 of a zoomed layout.
    pub fn world_extent(&self) -> Extent {
        match self {
            CrsCode::Epsg4326 => Extent::new(-180.0, -90.0, 180.0, 90.0),
            CrsCode::Epsg3857 => Extent::new(
                -WEB_MERCATOR_MAX,
                -WEB_MERCATOR_MAX,
                WEB_MERCATOR_MAX,
                WEB_MERCATOR_MAX,
            ),
        }
    }
}

impl fmt::Display for CrsCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let code = match self {
            CrsCode::Epsg4326 => "EPSG:4326",
            CrsCode::Epsg3857 => "EPSG:3857",
        };
        write!(f, "{}", code)
    }
}
