//! Python bindings for the attribute store facade.
//!
//! Exposes the facade with the camelCase method names existing Python
//! callers use.

use pyo3::prelude::*;

mod store;

pub use store::PyAttributeStore;

/// Raster catalog Python module.
#[pymodule]
fn raster_catalog(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<store::PyAttributeStore>()?;
    Ok(())
}
