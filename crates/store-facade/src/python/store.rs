//! Python wrapper for StoreFacade.

#![allow(non_snake_case)]

use pyo3::exceptions::{PyIOError, PyKeyError, PyRuntimeError, PyValueError};
use pyo3::prelude::*;

use catalog_common::CatalogError;

use crate::StoreFacade;

fn to_py_err(err: CatalogError) -> PyErr {
    let message = err.to_string();
    match err {
        CatalogError::LayerNotFound(_) | CatalogError::AttributeNotFound { .. } => {
            PyKeyError::new_err(message)
        }
        CatalogError::InvalidJson(_)
        | CatalogError::InvalidName { .. }
        | CatalogError::InvalidUri { .. }
        | CatalogError::UnsupportedScheme(_)
        | CatalogError::UnsupportedKeySchema(_)
        | CatalogError::UnsupportedLayerType(_)
        | CatalogError::UnsupportedCrs(_)
        | CatalogError::ZoomOutOfRange { .. }
        | CatalogError::UnsupportedZoom { .. } => PyValueError::new_err(message),
        CatalogError::StorageError(_) | CatalogError::ConfigError(_) => {
            PyIOError::new_err(message)
        }
        CatalogError::InternalError(_) => PyRuntimeError::new_err(message),
    }
}

/// Attribute store of a raster catalog, opened from a storage URI.
#[pyclass(name = "AttributeStore")]
pub struct PyAttributeStore {
    inner: StoreFacade,
}

#[pymethods]
impl PyAttributeStore {
    #[new]
    fn new(uri: &str) -> PyResult<Self> {
        let inner = StoreFacade::open(uri).map_err(to_py_err)?;
        Ok(Self { inner })
    }

    /// Layer metadata at a zoom level, as a JSON string.
    fn readMetadata(&self, py: Python<'_>, name: &str, zoom: u32) -> PyResult<String> {
        py.detach(|| self.inner.read_metadata(name, zoom))
            .map_err(to_py_err)
    }

    /// Attribute value as a JSON string, or None if the layer lacks it.
    fn read(
        &self,
        py: Python<'_>,
        layerName: &str,
        zoom: u32,
        attributeName: &str,
    ) -> PyResult<Option<String>> {
        py.detach(|| self.inner.read(layerName, zoom, attributeName))
            .map_err(to_py_err)
    }

    /// Write an attribute from a JSON string; None is ignored.
    #[pyo3(signature = (layerName, zoom, attributeName, value))]
    fn write(
        &self,
        py: Python<'_>,
        layerName: &str,
        zoom: u32,
        attributeName: &str,
        value: Option<&str>,
    ) -> PyResult<()> {
        py.detach(|| self.inner.write(layerName, zoom, attributeName, value))
            .map_err(to_py_err)
    }

    /// Delete one attribute, or the whole layer when no attribute is given.
    #[pyo3(signature = (layerName, zoom, attributeName=None))]
    fn delete(
        &self,
        py: Python<'_>,
        layerName: &str,
        zoom: u32,
        attributeName: Option<&str>,
    ) -> PyResult<()> {
        py.detach(|| match attributeName {
            Some(attribute) => self.inner.delete(layerName, zoom, attribute),
            None => self.inner.delete_layer(layerName, zoom),
        })
        .map_err(to_py_err)
    }

    fn contains(&self, py: Python<'_>, layerName: &str, zoom: u32) -> PyResult<bool> {
        py.detach(|| self.inner.contains(layerName, zoom))
            .map_err(to_py_err)
    }

    fn layerIds(&self, py: Python<'_>) -> PyResult<String> {
        py.detach(|| self.inner.layer_ids()).map_err(to_py_err)
    }

    fn availableAttributes(&self, py: Python<'_>, layerName: &str, zoom: u32) -> PyResult<String> {
        py.detach(|| self.inner.available_attributes(layerName, zoom))
            .map_err(to_py_err)
    }

    fn availableZoomLevels(&self, py: Python<'_>, layerName: &str) -> PyResult<String> {
        py.detach(|| self.inner.available_zoom_levels(layerName))
            .map_err(to_py_err)
    }

    fn __repr__(&self) -> String {
        format!("<AttributeStore '{}'>", self.inner.uri())
    }
}
