//! JSON-text facade over the raster catalog attribute store.
//!
//! Every call forwards to one [`AttributeStore`](attribute_store::AttributeStore)
//! chosen by URI when the facade is opened, and crosses the boundary as JSON
//! text. The only local error handling is turning a missing attribute on
//! [`StoreFacade::read`] into `None`.

pub mod facade;
pub mod metadata;

// Python bindings (optional, enabled with "python" feature)
#[cfg(feature = "python")]
pub mod python;

pub use facade::StoreFacade;
pub use metadata::resolve_layer_metadata;
