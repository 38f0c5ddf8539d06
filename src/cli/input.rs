use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tokio::io::{self, AsyncRead, AsyncReadExt};
use tracing::{debug, warn};

use crate::activity::{
    load::{load_activity, InputFormat, LoadedActivity},
    table::DecodeMode,
};

/// Options shared by every command that reads activity.
#[derive(Debug, Clone, clap::Args)]
pub struct InputArgs {
    #[arg(help = "File with the weekly log or JSON. Reads stdin when missing or \"-\"")]
    pub file: Option<PathBuf>,
    #[arg(long, default_value_t = InputFormat::Auto, help = "Format of the input")]
    pub input: InputFormat,
    #[arg(
        long,
        default_value_t = DecodeMode::First,
        help = "How activity strings are decoded. \"first\" reads only the leading day (format 1), \"sequential\" keeps reading days that follow in order (format 2)"
    )]
    pub decode: DecodeMode,
    #[arg(long, help = "Print skipped lines and values to stderr")]
    pub diagnostics: bool,
}

const INVALID_FORMAT: &str = "Invalid JSON format. Please correct and try again.";

/// Reads the whole input. `None` and `-` mean stdin.
pub async fn read_input(file: Option<&Path>) -> Result<String> {
    match file {
        Some(path) if path != Path::new("-") => {
            debug!("Reading {path:?}");
            tokio::fs::read_to_string(path)
                .await
                .with_context(|| format!("Failed to read {}", path.display()))
        }
        _ => {
            debug!("Reading stdin");
            read_all(io::stdin()).await.context("Failed to read stdin")
        }
    }
}

async fn read_all(mut reader: impl AsyncRead + Unpin) -> Result<String, io::Error> {
    let mut buffer = String::new();
    reader.read_to_string(&mut buffer).await?;
    Ok(buffer)
}

/// Reads and decodes the input described by `args`.
pub async fn load_input(args: &InputArgs) -> Result<LoadedActivity> {
    let text = read_input(args.file.as_deref()).await?;
    let loaded = load_activity(&text, args.input, args.decode).context(INVALID_FORMAT)?;
    for diagnostic in &loaded.diagnostics {
        warn!("{diagnostic}");
        if args.diagnostics {
            eprintln!("{diagnostic}");
        }
    }
    Ok(loaded)
}
