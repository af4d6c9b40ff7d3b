//! Inspect command implementation

use crate::cli::InspectArgs;
use crate::config_loader;
use crate::output::OutputWriter;
use crate::output_types::{Diagnostic, InspectOutput, RegionInfo, UnassignedPoint};
use anyhow::Result;
use cabledrop_core::formats::FormatRegistry;
use cabledrop_core::models::{CableDrop, NamedPoint, SiteDataset};
use cabledrop_core::CabledropError;
use cabledrop_geo::spatial::ContainmentTest;
use cabledrop_geo::validation::{unassigned_points, validate_dataset, ValidationError};
use cabledrop_geo::DropEngine;
use serde::Serialize;
use std::path::Path;
use tabled::Tabled;

pub fn execute(args: InspectArgs, output: &OutputWriter, config_path: Option<&Path>) -> Result<()> {
    let config = config_loader::load_config(config_path)?;
    let engine = DropEngine::from_config(&config);

    let dataset = super::read_site(&FormatRegistry::from_config(&config), &args.input, output)?;
    let drops = match engine.generate_for(&dataset) {
        Ok(run) => run.drops,
        Err(CabledropError::NoDropsProduced) => Vec::new(),
        Err(e) => return Err(e.into()),
    };

    let regions = region_infos(&dataset);
    let validation = validate_dataset(&dataset);
    let unassigned: Vec<UnassignedPoint> = unassigned_points(&dataset)
        .into_iter()
        .map(|p| UnassignedPoint { name: p.name.clone(), kind: p.category.as_str().to_string() })
        .collect();

    if output.is_json() {
        output.result(InspectOutput {
            input: args.input.display().to_string(),
            regions,
            access_point_count: dataset.access_points.len(),
            distribution_point_count: dataset.distribution_points.len(),
            unassigned,
            errors: diagnostics(&validation.errors),
            warnings: diagnostics(&validation.warnings),
        })?;
        return Ok(());
    }

    output.section(format!("Site: {}", dataset.name));
    output.kv("BOUNDARY regions", dataset.regions.len());
    output.kv("HP placemarks", dataset.access_points.len());
    output.kv("FAT placemarks", dataset.distribution_points.len());

    output.section(format!("Regions (drops at {} m, {})", engine.max_distance(), engine.style()));
    output.table(region_rows(&regions, &drops));

    if !unassigned.is_empty() {
        output.section("Outside Every Region");
        output.table(unassigned.iter().map(PointRow::from).collect::<Vec<_>>());
    }

    for issue in &validation.warnings {
        output.warning(format!("{}: {}", issue.location, issue.reason));
    }
    for issue in &validation.errors {
        output.error(format!("{}: {}", issue.location, issue.reason));
    }

    if validation.is_valid && unassigned.is_empty() {
        output.success("Every placemark lies inside a region");
    }

    Ok(())
}

fn region_infos(dataset: &SiteDataset) -> Vec<RegionInfo> {
    dataset
        .regions
        .iter()
        .map(|region| {
            let ring = ContainmentTest::new(&region.outer);
            let inside = |points: &[NamedPoint]| {
                points.iter().filter(|p| ring.contains(&p.position)).count()
            };

            RegionInfo {
                name: region.name.clone(),
                vertices: region.outer.distinct_vertex_count(),
                inner_rings: region.inner.len(),
                access_points: inside(&dataset.access_points),
                distribution_points: inside(&dataset.distribution_points),
            }
        })
        .collect()
}

fn diagnostics(issues: &[ValidationError]) -> Vec<Diagnostic> {
    issues
        .iter()
        .map(|i| Diagnostic { location: i.location.clone(), reason: i.reason.clone() })
        .collect()
}

#[derive(Tabled, Serialize)]
struct RegionRow {
    #[tabled(rename = "Region")]
    name: String,
    #[tabled(rename = "Vertices")]
    vertices: usize,
    #[tabled(rename = "Holes")]
    inner_rings: usize,
    #[tabled(rename = "HP")]
    access_points: usize,
    #[tabled(rename = "FAT")]
    distribution_points: usize,
    #[tabled(rename = "Drops")]
    drops: usize,
}

fn region_rows(regions: &[RegionInfo], drops: &[CableDrop]) -> Vec<RegionRow> {
    regions
        .iter()
        .map(|r| RegionRow {
            name: r.name.clone(),
            vertices: r.vertices,
            inner_rings: r.inner_rings,
            access_points: r.access_points,
            distribution_points: r.distribution_points,
            drops: drops.iter().filter(|d| d.region == r.name).count(),
        })
        .collect()
}

#[derive(Tabled, Serialize)]
struct PointRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Kind")]
    kind: String,
}

impl From<&UnassignedPoint> for PointRow {
    fn from(point: &UnassignedPoint) -> Self {
        Self { name: point.name.clone(), kind: point.kind.clone() }
    }
}
