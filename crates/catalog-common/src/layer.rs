//! Layer identifiers and the stored layer header.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{CatalogError, CatalogResult};

/// Identifies one zoom level of a named raster layer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LayerId {
    pub name: String,
    pub zoom: u32,
}

impl LayerId {
    pub fn new(name: impl Into<String>, zoom: u32) -> Self {
        Self {
            name: name.into(),
            zoom,
        }
    }

    /// The same layer at zoom 0, where COG layers keep their header and metadata.
    pub fn base(&self) -> LayerId {
        LayerId::new(self.name.clone(), 0)
    }
}

impl fmt::Display for LayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.name, self.zoom)
    }
}

/// Storage layout of a layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LayerType {
    /// One metadata document per zoom level.
    #[serde(rename = "AvroLayer")]
    Avro,
    /// One zoom-0 document describing every zoom level.
    #[serde(rename = "COGLayer")]
    Cog,
}

impl LayerType {
    pub fn from_tag(tag: &str) -> CatalogResult<Self> {
        match tag {
            "AvroLayer" => Ok(LayerType::Avro),
            "COGLayer" => Ok(LayerType::Cog),
            other => Err(CatalogError::UnsupportedLayerType(other.to_string())),
        }
    }
}

/// Coordinate model of a layer's tiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeySchema {
    Spatial,
    SpaceTime,
}

impl KeySchema {
    /// Parse a key class tag such as `geotrellis.spark.SpatialKey`.
    ///
    /// Both the fully qualified and the bare class names are accepted.
    pub fn from_key_class(key_class: &str) -> CatalogResult<Self> {
        let short = key_class.rsplit('.').next().unwrap_or(key_class);
        match short {
            "SpatialKey" => Ok(KeySchema::Spatial),
            "SpaceTimeKey" => Ok(KeySchema::SpaceTime),
            _ => Err(CatalogError::UnsupportedKeySchema(key_class.to_string())),
        }
    }
}

/// Header record written alongside every layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayerHeader {
    /// Backend format tag, e.g. "file" or "s3"
    pub format: String,
    pub key_class: String,
    pub value_class: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Absent on layers written before COG support; those are Avro layers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layer_type: Option<String>,
}

impl LayerHeader {
    pub fn layer_type(&self) -> CatalogResult<LayerType> {
        match &self.layer_type {
            Some(tag) => LayerType::from_tag(tag),
            None => Ok(LayerType::Avro),
        }
    }

    pub fn key_schema(&self) -> CatalogResult<KeySchema> {
        KeySchema::from_key_class(&self.key_class)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layer_id_json_shape() {
        let id = LayerId::new("elevation", 5);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, r#"{"name":"elevation","zoom":5}"#);
        assert_eq!(id.to_string(), "elevation:5");
        assert_eq!(id.base(), LayerId::new("elevation", 0));
    }

    #[test]
    fn test_key_schema_tags() {
        assert_eq!(
            KeySchema::from_key_class("geotrellis.spark.SpatialKey").unwrap(),
            KeySchema::Spatial
        );
        assert_eq!(
            KeySchema::from_key_class("SpaceTimeKey").unwrap(),
            KeySchema::SpaceTime
        );
        assert!(matches!(
            KeySchema::from_key_class("geotrellis.spark.GridKey"),
            Err(CatalogError::UnsupportedKeySchema(_))
        ));
    }

    #[test]
    fn test_header_defaults_to_avro() {
        let header: LayerHeader = serde_json::from_str(
            r#"{"format":"file","keyClass":"geotrellis.spark.SpatialKey","valueClass":"geotrellis.raster.Tile"}"#,
        )
        .unwrap();
        assert_eq!(header.layer_type().unwrap(), LayerType::Avro);

        let cog = LayerHeader {
            layer_type: Some("COGLayer".to_string()),
            ..header.clone()
        };
        assert_eq!(cog.layer_type().unwrap(), LayerType::Cog);

        let odd = LayerHeader {
            layer_type: Some("ZarrLayer".to_string()),
            ..header
        };
        assert!(matches!(
            odd.layer_type(),
            Err(CatalogError::UnsupportedLayerType(_))
        ));
    }
}
