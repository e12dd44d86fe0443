//! Command-line arguments.

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "attribute-cli")]
#[command(about = "Inspect and edit raster catalog layer attributes")]
pub struct Args {
    /// Storage URI (memory://, file:///path, s3://bucket/prefix)
    #[arg(short, long, env = "ATTRIBUTE_STORE_URI")]
    pub uri: Option<String>,

    /// YAML configuration file (S3 settings, default URI)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level
    #[arg(long, default_value = "warn")]
    pub log_level: String,

    /// Emit logs as JSON
    #[arg(long)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Print the metadata document of a layer
    Metadata { name: String, zoom: u32 },

    /// Print an attribute value; exits with status 3 if absent
    Read {
        name: String,
        zoom: u32,
        attribute: String,
    },

    /// Write an attribute from JSON text
    Write {
        name: String,
        zoom: u32,
        attribute: String,
        /// JSON value; omit to leave the store unchanged
        value: Option<String>,
    },

    /// Delete one attribute, or the whole layer without --attribute
    Delete {
        name: String,
        zoom: u32,
        #[arg(short, long)]
        attribute: Option<String>,
    },

    /// Print whether a layer is registered
    Contains { name: String, zoom: u32 },

    /// List registered layers
    Layers,

    /// List the attributes of a layer
    Attributes { name: String, zoom: u32 },

    /// List the zoom levels of a layer name
    Zooms { name: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_write_with_value() {
        let args = Args::try_parse_from([
            "attribute-cli",
            "--uri",
            "memory://",
            "write",
            "elevation",
            "5",
            "bounds",
            "{\"xmin\":0}",
        ])
        .unwrap();

        assert_eq!(args.uri.as_deref(), Some("memory://"));
        assert_eq!(
            args.command,
            Command::Write {
                name: "elevation".to_string(),
                zoom: 5,
                attribute: "bounds".to_string(),
                value: Some("{\"xmin\":0}".to_string()),
            }
        );
    }

    #[test]
    fn test_parse_delete_layer() {
        let args =
            Args::try_parse_from(["attribute-cli", "delete", "elevation", "5"]).unwrap();
        assert_eq!(
            args.command,
            Command::Delete {
                name: "elevation".to_string(),
                zoom: 5,
                attribute: None,
            }
        );
        assert_eq!(args.log_level, "warn");
    }

    #[test]
    fn test_rejects_negative_zoom() {
        assert!(Args::try_parse_from(["attribute-cli", "contains", "dem", "-1"]).is_err());
    }
}
