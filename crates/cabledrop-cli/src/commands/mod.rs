//! Command implementations

mod config;
mod generate;
mod inspect;

use crate::cli::{Cli, Commands};
use crate::errors;
use crate::output::OutputWriter;
use anyhow::Result;
use cabledrop_core::formats::validation::check_file;
use cabledrop_core::formats::FormatRegistry;
use cabledrop_core::models::SiteDataset;
use cabledrop_core::CabledropError;
use std::path::Path;

/// Execute a CLI command
pub fn execute(cli: Cli) -> Result<()> {
    let output = OutputWriter::new(cli.json);
    let config_path = cli.config.as_deref();

    match cli.command {
        Commands::Generate(args) => generate::execute(args, &output, config_path, cli.dry_run),
        Commands::Inspect(args) => inspect::execute(args, &output, config_path),
        Commands::Config => config::execute(&output, config_path),
    }
}

/// Read a site through the registry, turning reader failures into CLI errors
fn read_site(
    registry: &FormatRegistry,
    path: &Path,
    output: &OutputWriter,
) -> Result<SiteDataset> {
    if !path.exists() {
        return Err(errors::input_not_found(path).into());
    }

    let reader = registry.detect_reader(path)?;
    let extension = reader.supported_extensions().first().copied().unwrap_or_default();
    let checks = check_file(path, extension);
    for warning in &checks.warnings {
        output.warning(warning);
    }
    if !checks.is_valid() {
        return Err(errors::input_unreadable(path, &checks.errors.join("; ")).into());
    }

    tracing::debug!("Reading {} as {}", path.display(), reader.format_name());

    reader.read(path).map_err(|e| -> anyhow::Error {
        match e {
            CabledropError::FormatValidation { reason, .. } => {
                errors::input_unreadable(path, &reason).into()
            }
            CabledropError::FormatError { message, .. } => {
                errors::input_unreadable(path, &message).into()
            }
            other => other.into(),
        }
    })
}
