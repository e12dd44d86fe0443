//! Store configuration.
//!
//! Loaded from environment variables, or from a YAML file supporting
//! `${VAR}` and `${VAR:-default}` substitution.

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::Path;

use catalog_common::{CatalogError, CatalogResult};

/// Environment variable holding the default storage URI.
pub const URI_ENV: &str = "ATTRIBUTE_STORE_URI";

/// Settings for S3-compatible object storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct S3Config {
    /// Custom endpoint URL (MinIO, Ceph); AWS when unset
    #[serde(default)]
    pub endpoint: Option<String>,
    #[serde(default = "default_region")]
    pub region: String,
    /// Access key ID; falls back to the AWS credential chain when unset
    #[serde(default)]
    pub access_key_id: Option<String>,
    #[serde(default)]
    pub secret_access_key: Option<String>,
    /// Allow HTTP (for local MinIO)
    #[serde(default)]
    pub allow_http: bool,
}

fn default_region() -> String {
    "us-east-1".to_string()
}

impl Default for S3Config {
    fn default() -> Self {
        Self {
            endpoint: None,
            region: default_region(),
            access_key_id: None,
            secret_access_key: None,
            allow_http: false,
        }
    }
}

/// Top-level store configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Storage URI used when the caller does not pass one
    #[serde(default)]
    pub uri: Option<String>,
    #[serde(default)]
    pub s3: S3Config,
}

impl StoreConfig {
    /// Load configuration from environment variables, reading `.env` if present.
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();

        let s3 = S3Config {
            endpoint: env::var("S3_ENDPOINT").ok().filter(|v| !v.is_empty()),
            region: env::var("S3_REGION").unwrap_or_else(|_| default_region()),
            access_key_id: env::var("S3_ACCESS_KEY").ok(),
            secret_access_key: env::var("S3_SECRET_KEY").ok(),
            allow_http: env::var("S3_ALLOW_HTTP")
                .map(|v| v == "true")
                .unwrap_or(false),
        };

        Self {
            uri: env::var(URI_ENV).ok().filter(|v| !v.is_empty()),
            s3,
        }
    }

    /// Load configuration from a YAML file with environment variable substitution.
    pub fn from_yaml<P: AsRef<Path>>(path: P) -> CatalogResult<Self> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            CatalogError::ConfigError(format!(
                "Failed to read config from {:?}: {}",
                path.as_ref(),
                e
            ))
        })?;
        Self::from_yaml_str(&content)
    }

    pub fn from_yaml_str(content: &str) -> CatalogResult<Self> {
        let expanded = expand_env_vars(content)?;
        serde_yaml::from_str(&expanded)
            .map_err(|e| CatalogError::ConfigError(format!("Failed to parse config YAML: {}", e)))
    }

    /// The URI to open: an explicit one wins over the configured default.
    pub fn resolve_uri(&self, explicit: Option<&str>) -> CatalogResult<String> {
        explicit
            .map(str::to_string)
            .or_else(|| self.uri.clone())
            .ok_or_else(|| {
                CatalogError::ConfigError(format!(
                    "No storage URI given and {} is not set",
                    URI_ENV
                ))
            })
    }
}

// ============================================================================
// Environment Variable Expansion
// ============================================================================

/// Expand `${VAR}` and `${VAR:-default}` references.
fn expand_env_vars(content: &str) -> CatalogResult<String> {
    let mut result = String::new();
    let mut chars = content.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '$' && chars.peek() == Some(&'{') {
            chars.next(); // consume '{'

            let mut var_expr = String::new();
            loop {
                match chars.next() {
                    Some('}') => break,
                    Some(c) => var_expr.push(c),
                    None => {
                        return Err(CatalogError::ConfigError(format!(
                            "Unclosed variable substitution: ${{{}",
                            var_expr
                        )))
                    }
                }
            }

            result.push_str(&resolve_var_expr(&var_expr)?);
        } else {
            result.push(ch);
        }
    }

    Ok(result)
}

fn resolve_var_expr(expr: &str) -> CatalogResult<String> {
    if let Some((var_name, default)) = expr.split_once(":-") {
        match env::var(var_name.trim()) {
            Ok(val) if !val.is_empty() => Ok(val),
            _ => Ok(default.to_string()),
        }
    } else {
        env::var(expr.trim()).map_err(|_| {
            CatalogError::ConfigError(format!("Environment variable {} not set", expr))
        })
    }
}
