//! Generate command implementation

use crate::cli::{GenerateArgs, OutputFormat};
use crate::config_loader;
use crate::dry_run::{display_planned_actions, ActionType, PlannedAction};
use crate::errors;
use crate::output::OutputWriter;
use crate::output_types::{DropInfo, GenerateOutput};
use anyhow::{Context, Result};
use cabledrop_core::config::{parse_drop_style, CliConfigOverrides};
use cabledrop_core::formats::FormatRegistry;
use cabledrop_core::models::SiteDataset;
use cabledrop_core::CabledropError;
use cabledrop_geo::{DropEngine, DropRun};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tabled::Tabled;

pub fn execute(
    args: GenerateArgs,
    output: &OutputWriter,
    config_path: Option<&Path>,
    dry_run: bool,
) -> Result<()> {
    let style = match args.style.as_deref() {
        Some(s) => Some(parse_drop_style(s).map_err(|_| errors::invalid_style(s))?),
        None => None,
    };

    let config = config_loader::load_config_with_overrides(
        config_path,
        CliConfigOverrides {
            max_distance: args.max_distance,
            drop_style: style,
            drop_line_color: args.line_color.clone(),
            drop_line_width: args.line_width,
        },
    )?;

    let engine = DropEngine::from_config(&config);
    if engine.max_distance() <= 0.0 {
        output.warning(format!(
            "Maximum distance is {} m; no HP can be matched to a FAT",
            engine.max_distance()
        ));
    }

    let registry = FormatRegistry::from_config(&config);
    let output_path = resolve_output_path(&args);
    let writer = match args.format {
        Some(format) => registry.writer_for_extension(format.extension())?,
        None => registry.detect_writer(&output_path)?,
    };

    let dataset = super::read_site(&registry, &args.input, output)?;
    let run = engine.generate_for(&dataset).map_err(|e| -> anyhow::Error {
        match e {
            CabledropError::NoDropsProduced => {
                errors::no_drops_produced(engine.max_distance()).into()
            }
            other => other.into(),
        }
    })?;

    if dry_run {
        let actions = vec![
            PlannedAction::new(ActionType::ReadFile, format!("Read {}", args.input.display()))
                .with_detail(format!("Regions: {}", run.stats.region_count))
                .with_detail(format!("HP placemarks: {}", run.stats.access_point_count))
                .with_detail(format!("FAT placemarks: {}", run.stats.distribution_point_count)),
            PlannedAction::new(
                ActionType::GenerateDrops,
                format!("Generate {} {} drops", run.stats.drop_count, engine.style()),
            )
            .with_detail(format!("Max distance: {} m", engine.max_distance()))
            .with_detail(format!("HP without a drop: {}", run.stats.unmatched_access_points)),
            PlannedAction::new(ActionType::WriteFile, format!("Write {}", output_path.display()))
                .with_detail(format!("Format: {}", writer.format_name())),
        ];

        display_planned_actions(output, &actions);
        return Ok(());
    }

    let format_name = writer.format_name().to_string();
    let summary = RunSummary::new(&dataset, &run);
    let dataset = dataset.with_drops(run.drops);

    writer
        .write(&dataset, &output_path)
        .with_context(|| format!("Failed to write {}", output_path.display()))?;

    if output.is_json() {
        output.result(GenerateOutput {
            input: args.input.display().to_string(),
            output: output_path.display().to_string(),
            format: format_name,
            style: engine.style(),
            max_distance: engine.max_distance(),
            stats: run.stats,
            drops: dataset
                .drops
                .iter()
                .map(|d| DropInfo {
                    name: d.name.clone(),
                    source: d.source.clone(),
                    target: d.target.clone(),
                    region: d.region.clone(),
                })
                .collect(),
        })?;
    } else {
        output.success(format!(
            "Generated {} cable drops in {} ms",
            run.stats.drop_count, run.stats.processing_time_ms
        ));
        output.kv("Input", args.input.display());
        output.kv("Output", output_path.display());
        output.kv("Format", &format_name);
        output.kv("Style", engine.style());
        output.kv("Max distance", format!("{} m", engine.max_distance()));

        output.section("Drops per Region");
        output.table(summary.rows);

        if run.stats.unmatched_access_points > 0 {
            output.warning(format!(
                "{} of {} HP placemarks got no drop",
                run.stats.unmatched_access_points, run.stats.access_point_count
            ));
        }
    }

    Ok(())
}

/// `<input stem>_with_drops.<ext>` next to the input unless `--output` is given
fn resolve_output_path(args: &GenerateArgs) -> PathBuf {
    if let Some(path) = &args.output {
        return path.clone();
    }

    let stem = args.input.file_stem().and_then(|s| s.to_str()).unwrap_or("output");
    let extension = args.format.unwrap_or(OutputFormat::Kml).extension();
    args.input.with_file_name(format!("{}_with_drops.{}", stem, extension))
}

#[derive(Tabled, Serialize)]
struct RegionRow {
    #[tabled(rename = "Region")]
    region: String,
    #[tabled(rename = "Drops")]
    drops: usize,
}

struct RunSummary {
    rows: Vec<RegionRow>,
}

impl RunSummary {
    fn new(dataset: &SiteDataset, run: &DropRun) -> Self {
        let rows = dataset
            .regions
            .iter()
            .map(|region| RegionRow {
                region: region.name.clone(),
                drops: run.drops.iter().filter(|d| d.region == region.name).count(),
            })
            .collect();
        Self { rows }
    }
}
