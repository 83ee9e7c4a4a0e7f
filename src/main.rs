//! fs-kit - Entry Point
//!
//! Processes the uploads described by a TOML manifest and prints where each
//! accepted file was placed.

use clap::Parser;
use log::info;
use std::path::PathBuf;

use fs_kit::config::KitConfig;
use fs_kit::error::handlers::{error_to_exit_code, handle_error};
use fs_kit::error::{KitError, UploadError};
use fs_kit::upload::{UploadManifest, UploadProcessor};
use fs_kit::utils::logging::setup_logging;

/// Move staged uploads into their configured destinations
#[derive(Debug, Parser)]
#[command(name = "fs-kit", version)]
struct Cli {
    /// TOML manifest with an `[uploads]` table
    manifest: PathBuf,

    /// Upload fields to process (all fields, sorted, when omitted)
    fields: Vec<String>,
}

fn main() {
    let cli = Cli::parse();

    // Initialize the logger (env_logger picks up RUST_LOG environment variable)
    setup_logging();

    if let Err(e) = run(cli) {
        handle_error(&e);
        std::process::exit(error_to_exit_code(&e));
    }
}

fn run(cli: Cli) -> Result<(), KitError> {
    let config = KitConfig::load()?;
    let manifest = UploadManifest::from_file(&cli.manifest)?;
    let fields = if cli.fields.is_empty() {
        manifest.field_names()
    } else {
        cli.fields
    };

    info!(
        "Processing {} field(s) from {}",
        fields.len(),
        cli.manifest.display()
    );

    let mut processor = UploadProcessor::new(config.upload);
    for field in &fields {
        for accepted in processor.process(&manifest.uploads, field)? {
            println!("{}\t{}", field, accepted.new_location.display());
        }

        if let Some(message) = processor.error() {
            return Err(UploadError::Fatal(message.to_string()).into());
        }
    }

    Ok(())
}
