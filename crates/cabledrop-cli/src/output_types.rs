use cabledrop_core::config::ConfigSource;
use cabledrop_core::models::{DropStats, DropStyle};
use serde::Serialize;

/// Output for generate command
#[derive(Debug, Serialize)]
pub struct GenerateOutput {
    pub input: String,
    pub output: String,
    pub format: String,
    pub style: DropStyle,
    pub max_distance: f64,
    pub stats: DropStats,
    pub drops: Vec<DropInfo>,
}

#[derive(Debug, Serialize)]
pub struct DropInfo {
    pub name: String,
    pub source: String,
    pub target: String,
    pub region: String,
}

/// Output for inspect command
#[derive(Debug, Serialize)]
pub struct InspectOutput {
    pub input: String,
    pub regions: Vec<RegionInfo>,
    pub access_point_count: usize,
    pub distribution_point_count: usize,
    pub unassigned: Vec<UnassignedPoint>,
    pub errors: Vec<Diagnostic>,
    pub warnings: Vec<Diagnostic>,
}

#[derive(Debug, Serialize)]
pub struct RegionInfo {
    pub name: String,
    pub vertices: usize,
    pub inner_rings: usize,
    pub access_points: usize,
    pub distribution_points: usize,
}

#[derive(Debug, Serialize)]
pub struct UnassignedPoint {
    pub name: String,
    pub kind: String,
}

#[derive(Debug, Serialize)]
pub struct Diagnostic {
    pub location: String,
    pub reason: String,
}

/// Output for config command
#[derive(Debug, Serialize)]
pub struct ConfigOutput {
    pub config_file: Option<String>,
    pub values: Vec<ConfigEntry>,
}

#[derive(Debug, Serialize)]
pub struct ConfigEntry {
    pub key: String,
    pub value: String,
    pub source: ConfigSource,
}
