use cabledrop_core::config::{parse_hex_color, parse_line_width, parse_max_distance};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// cabledrop - connect every HP to its nearest FAT inside a BOUNDARY
#[derive(Parser, Debug)]
#[command(name = "cabledrop")]
#[command(about = "Generate cable drops between FAT and HP placemarks", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Output results in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Show planned actions without writing any file
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// Config file to use instead of ./cabledrop.toml
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate cable drops and write them with the input placemarks
    Generate(GenerateArgs),

    /// Show what a KML file contains and which points no region covers
    Inspect(InspectArgs),

    /// Show the effective configuration and where each value comes from
    Config,
}

/// Output file format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Kml,
    Geojson,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Kml => "kml",
            OutputFormat::Geojson => "geojson",
        }
    }
}

#[derive(Parser, Debug)]
pub struct GenerateArgs {
    /// KML file with BOUNDARY, HP and FAT folders
    pub input: PathBuf,

    /// Output path (defaults to <input>_with_drops.kml next to the input)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Maximum FAT to HP distance in meters
    #[arg(long, value_name = "METERS", value_parser = parse_max_distance)]
    pub max_distance: Option<f64>,

    /// Drop path style (straight or curved)
    #[arg(long)]
    pub style: Option<String>,

    /// Output format (defaults to the output file extension, then KML)
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Drop line color as #rrggbb
    #[arg(long, value_name = "COLOR", value_parser = parse_hex_color)]
    pub line_color: Option<String>,

    /// Drop line width
    #[arg(long, value_name = "WIDTH", value_parser = parse_line_width)]
    pub line_width: Option<f64>,
}

#[derive(Parser, Debug)]
pub struct InspectArgs {
    /// KML file to inspect
    pub input: PathBuf,
}
