//! Shared test utilities for the raster catalog workspace.
//!
//! This crate provides common testing infrastructure including:
//! - Stored header and metadata documents for spatial, space-time and COG layers
//! - Generators for layer ids and attribute values
//! - Temporary catalog directories
//! - Skip macros for tests that need external services
//!
//! # Usage
//!
//! ```toml
//! [dev-dependencies]
//! test-utils = { path = "../test-utils" }
//! ```

pub mod fixtures;
pub mod generators;

pub use fixtures::*;
pub use generators::*;

use tempfile::TempDir;

#[doc(hidden)]
pub use serde_json;

/// Create an empty directory to root a filesystem catalog in.
///
/// The directory is removed when the returned guard is dropped.
pub fn temp_catalog_dir() -> TempDir {
    tempfile::Builder::new()
        .prefix("raster-catalog-")
        .tempdir()
        .expect("failed to create temporary catalog directory")
}

/// Macro to skip a test if an environment variable is not set.
///
/// Used by tests that talk to real object storage.
///
/// # Usage
///
/// ```ignore
/// use test_utils::require_env;
///
/// #[test]
/// fn test_against_minio() {
///     let uri = require_env!("TEST_S3_URI");
///     // Test code using uri...
/// }
/// ```
#[macro_export]
macro_rules! require_env {
    ($name:expr) => {{
        match std::env::var($name) {
            Ok(value) if !value.is_empty() => value,
            _ => {
                eprintln!("SKIPPED: environment variable '{}' not set.", $name);
                return;
            }
        }
    }};
}

/// Assert that a JSON text parses to the expected value.
///
/// # Usage
///
/// ```ignore
/// use test_utils::assert_json_text_eq;
///
/// assert_json_text_eq!(r#"{"a": 1}"#, serde_json::json!({"a": 1}));
/// ```
#[macro_export]
macro_rules! assert_json_text_eq {
    ($text:expr, $expected:expr) => {{
        let text: &str = &$text;
        let parsed: $crate::serde_json::Value = match $crate::serde_json::from_str(text) {
            Ok(v) => v,
            Err(e) => panic!("not valid JSON ({}): {}", e, text),
        };
        assert_eq!(parsed, $expected);
    }};
}
