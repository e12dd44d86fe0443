//! Raster catalog attribute command-line tool.
//!
//! Runs one facade operation against a catalog store and prints the JSON
//! result on stdout. Logs go to stderr.

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use std::io::{self, Read, Write};
use std::process::ExitCode;
use tracing::{debug, info, Level};
use tracing_subscriber::FmtSubscriber;

use attribute_store::StoreConfig;
use cli::{Args, Command};
use store_facade::StoreFacade;

/// Exit status of `read` when the attribute is absent.
const ABSENT_EXIT_CODE: u8 = 3;

fn main() -> Result<ExitCode> {
    let args = Args::parse();

    init_tracing(&args.log_level, args.json_logs)?;

    let config = match &args.config {
        Some(path) => StoreConfig::from_yaml(path)
            .with_context(|| format!("Failed to load config {}", path))?,
        None => StoreConfig::from_env(),
    };
    let uri = config.resolve_uri(args.uri.as_deref())?;
    info!(uri = %uri, "Opening attribute store");

    let facade = StoreFacade::open_with_config(&uri, &config)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let status = run(&facade, args.command, &mut out)?;
    Ok(ExitCode::from(status))
}

fn init_tracing(log_level: &str, json: bool) -> Result<()> {
    let level = match log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::WARN,
    };

    let builder = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .with_writer(io::stderr);

    if json {
        tracing::subscriber::set_global_default(builder.json().finish())?;
    } else {
        tracing::subscriber::set_global_default(builder.finish())?;
    }
    Ok(())
}

/// Execute one command, writing its output to `out`. Returns the exit status.
fn run<W: Write>(facade: &StoreFacade, command: Command, out: &mut W) -> Result<u8> {
    debug!(command = ?command, "Running command");

    match command {
        Command::Metadata { name, zoom } => {
            writeln!(out, "{}", facade.read_metadata(&name, zoom)?)?;
        }
        Command::Read {
            name,
            zoom,
            attribute,
        } => match facade.read(&name, zoom, &attribute)? {
            Some(text) => writeln!(out, "{}", text)?,
            None => {
                info!(layer = %name, zoom, attribute = %attribute, "Attribute absent");
                return Ok(ABSENT_EXIT_CODE);
            }
        },
        Command::Write {
            name,
            zoom,
            attribute,
            value,
        } => {
            let value = match value.as_deref() {
                Some("-") => Some(read_stdin()?),
                _ => value,
            };
            facade.write(&name, zoom, &attribute, value.as_deref())?;
        }
        Command::Delete {
            name,
            zoom,
            attribute,
        } => match attribute {
            Some(attribute) => facade.delete(&name, zoom, &attribute)?,
            None => facade.delete_layer(&name, zoom)?,
        },
        Command::Contains { name, zoom } => {
            writeln!(out, "{}", facade.contains(&name, zoom)?)?;
        }
        Command::Layers => {
            writeln!(out, "{}", facade.layer_ids()?)?;
        }
        Command::Attributes { name, zoom } => {
            writeln!(out, "{}", facade.available_attributes(&name, zoom)?)?;
        }
        Command::Zooms { name } => {
            writeln!(out, "{}", facade.available_zoom_levels(&name)?)?;
        }
    }

    Ok(0)
}

fn read_stdin() -> Result<String> {
    let mut text = String::new();
    io::stdin()
        .read_to_string(&mut text)
        .context("Failed to read value from stdin")?;
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn memory_facade() -> StoreFacade {
        StoreFacade::open_with_config("memory://", &StoreConfig::default()).unwrap()
    }

    fn run_to_string(facade: &StoreFacade, command: Command) -> (String, u8) {
        let mut out = Vec::new();
        let code = run(facade, command, &mut out).unwrap();
        (String::from_utf8(out).unwrap(), code)
    }

    #[test]
    fn test_write_then_read() {
        let facade = memory_facade();
        let (text, _) = run_to_string(
            &facade,
            Command::Write {
                name: "elevation".to_string(),
                zoom: 5,
                attribute: "bounds".to_string(),
                value: Some("{\"xmin\": 0}".to_string()),
            },
        );
        assert!(text.is_empty());

        let (text, code) = run_to_string(
            &facade,
            Command::Read {
                name: "elevation".to_string(),
                zoom: 5,
                attribute: "bounds".to_string(),
            },
        );
        assert_eq!(text, "{\"xmin\":0}\n");
        assert_eq!(code, 0);
    }

    #[test]
    fn test_read_absent_sets_exit_code() {
        let facade = memory_facade();
        let (text, code) = run_to_string(
            &facade,
            Command::Read {
                name: "elevation".to_string(),
                zoom: 5,
                attribute: "bounds".to_string(),
            },
        );
        assert!(text.is_empty());
        assert_eq!(code, ABSENT_EXIT_CODE);
    }

    #[test]
    fn test_delete_without_attribute_removes_layer() {
        let facade = memory_facade();
        facade.write("dem", 3, "a", Some("1")).unwrap();
        facade.write("dem", 3, "b", Some("2")).unwrap();

        run_to_string(
            &facade,
            Command::Delete {
                name: "dem".to_string(),
                zoom: 3,
                attribute: None,
            },
        );

        let (text, _) = run_to_string(
            &facade,
            Command::Contains {
                name: "dem".to_string(),
                zoom: 3,
            },
        );
        assert_eq!(text, "false\n");
    }

    #[test]
    fn test_layers_and_zooms() {
        let facade = memory_facade();
        facade.write("dem", 3, "a", Some("1")).unwrap();
        facade.write("dem", 1, "a", Some("1")).unwrap();

        let (text, _) = run_to_string(&facade, Command::Layers);
        assert_eq!(
            text,
            "[{\"name\":\"dem\",\"zoom\":1},{\"name\":\"dem\",\"zoom\":3}]\n"
        );

        let (text, _) = run_to_string(
            &facade,
            Command::Zooms {
                name: "dem".to_string(),
            },
        );
        assert_eq!(text, "[1,3]\n");
    }

    #[test]
    fn test_metadata_of_missing_layer_fails() {
        let facade = memory_facade();
        let mut out = Vec::new();
        let result = run(
            &facade,
            Command::Metadata {
                name: "missing".to_string(),
                zoom: 0,
            },
            &mut out,
        );
        assert!(result.is_err());
    }
}
