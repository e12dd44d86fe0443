//! Attribute store backends for the raster catalog.
//!
//! Provides a single capability interface over:
//! - An in-memory map (tests, scratch catalogs)
//! - The local filesystem
//! - S3-compatible object storage
//!
//! The backend is chosen from the scheme of a storage URI by [`open_store`].

pub mod config;
pub mod memory;
pub mod object_store;
pub mod store;
pub mod uri;

pub use self::object_store::{KeyLayout, ObjectAttributeStore};
pub use config::{S3Config, StoreConfig};
pub use memory::MemoryAttributeStore;
pub use store::{validate_name, AttributeStore};
pub use uri::{open_store, StoreUri};
