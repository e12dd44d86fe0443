//! Error types for the raster catalog.

use thiserror::Error;

use crate::LayerId;

/// Result type alias using CatalogError.
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Primary error type for catalog operations.
#[derive(Debug, Error)]
pub enum CatalogError {
    // === Lookup Errors ===
    #[error("Layer not found: {0}")]
    LayerNotFound(LayerId),

    #[error("Attribute '{attribute}' not found for layer {layer}")]
    AttributeNotFound { layer: LayerId, attribute: String },

    #[error("Zoom level {zoom} is outside the stored zoom ranges of layer '{name}'")]
    ZoomOutOfRange { name: String, zoom: u32 },

    #[error("Zoom level {zoom} exceeds the deepest layout zoom {max}")]
    UnsupportedZoom { zoom: u32, max: u32 },

    // === Schema Errors ===
    #[error("Unsupported key schema: {0}")]
    UnsupportedKeySchema(String),

    #[error("Unsupported layer type: {0}")]
    UnsupportedLayerType(String),

    #[error("Unsupported CRS: {0}")]
    UnsupportedCrs(String),

    // === Input Errors ===
    #[error("Invalid JSON: {0}")]
    InvalidJson(String),

    #[error("Invalid name '{name}': {message}")]
    InvalidName { name: String, message: String },

    #[error("Invalid storage URI '{uri}': {message}")]
    InvalidUri { uri: String, message: String },

    #[error("Unsupported storage scheme: {0}")]
    UnsupportedScheme(String),

    // === Infrastructure Errors ===
    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl CatalogError {
    /// True for the "attribute is absent" signal, which callers may treat as a value.
    pub fn is_attribute_not_found(&self) -> bool {
        matches!(self, CatalogError::AttributeNotFound { .. })
    }
}

impl From<std::io::Error> for CatalogError {
    fn from(err: std::io::Error) -> Self {
        CatalogError::StorageError(err.to_string())
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(err: serde_json::Error) -> Self {
        CatalogError::InvalidJson(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_classification() {
        let layer = LayerId::new("elevation", 5);
        let attr = CatalogError::AttributeNotFound {
            layer: layer.clone(),
            attribute: "bounds".to_string(),
        };
        assert!(attr.is_attribute_not_found());

        let missing = CatalogError::LayerNotFound(layer);
        assert!(!missing.is_attribute_not_found());

        assert!(!CatalogError::StorageError("boom".into()).is_attribute_not_found());
    }

    #[test]
    fn test_error_messages() {
        let err = CatalogError::AttributeNotFound {
            layer: LayerId::new("elevation", 5),
            attribute: "bounds".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Attribute 'bounds' not found for layer elevation:5"
        );
    }
}
