//! Drop generation over every region of a site

use std::time::Instant;

use cabledrop_core::config::LayeredConfig;
use cabledrop_core::models::{CableDrop, DropStats, DropStyle, NamedPoint, Region, SiteDataset};
use cabledrop_core::{CabledropError, Result};

use crate::matcher::match_region;
use crate::path::synthesize;
use crate::spatial::ContainmentTest;

/// Drops plus a summary of the run that produced them
#[derive(Debug, Clone, PartialEq)]
pub struct DropRun {
    pub drops: Vec<CableDrop>,
    pub stats: DropStats,
}

/// Generates cable drops with a fixed distance ceiling and path style.
///
/// The engine holds no state between calls.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DropEngine {
    max_distance: f64,
    style: DropStyle,
}

impl DropEngine {
    pub fn new(max_distance: f64, style: DropStyle) -> Self {
        Self { max_distance, style }
    }

    /// Engine using the resolved max distance and drop style
    pub fn from_config(config: &LayeredConfig) -> Self {
        Self::new(config.max_distance.value, config.drop_style.value)
    }

    pub fn max_distance(&self) -> f64 {
        self.max_distance
    }

    pub fn style(&self) -> DropStyle {
        self.style
    }

    /// Generate drops for every region in order.
    ///
    /// Within a region drops follow the order of `access`. Access points that
    /// fall inside several regions get one drop per region. Fails with
    /// [`CabledropError::NoDropsProduced`] when nothing matched.
    pub fn generate(
        &self,
        regions: &[Region],
        distribution: &[NamedPoint],
        access: &[NamedPoint],
    ) -> Result<Vec<CableDrop>> {
        let (drops, _) = self.run(regions, distribution, access);

        if drops.is_empty() {
            return Err(CabledropError::NoDropsProduced);
        }
        Ok(drops)
    }

    /// Generate drops for a parsed site and report what happened
    pub fn generate_for(&self, dataset: &SiteDataset) -> Result<DropRun> {
        let start = Instant::now();
        let (drops, matched) =
            self.run(&dataset.regions, &dataset.distribution_points, &dataset.access_points);

        let stats = DropStats {
            region_count: dataset.regions.len(),
            access_point_count: dataset.access_points.len(),
            distribution_point_count: dataset.distribution_points.len(),
            drop_count: drops.len(),
            unmatched_access_points: matched.iter().filter(|m| !**m).count(),
            processing_time_ms: u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX),
        };

        tracing::info!(
            regions = stats.region_count,
            drops = stats.drop_count,
            unmatched = stats.unmatched_access_points,
            elapsed_ms = stats.processing_time_ms,
            "Generated cable drops for '{}'",
            dataset.name
        );

        if drops.is_empty() {
            return Err(CabledropError::NoDropsProduced);
        }
        Ok(DropRun { drops, stats })
    }

    /// Drops in region order, plus which access points got at least one drop
    fn run(
        &self,
        regions: &[Region],
        distribution: &[NamedPoint],
        access: &[NamedPoint],
    ) -> (Vec<CableDrop>, Vec<bool>) {
        let mut drops = Vec::new();
        let mut matched = vec![false; access.len()];

        for region in regions {
            if region.outer.distinct_vertex_count() < 3 {
                tracing::warn!(
                    "Region '{}' has fewer than 3 vertices and contains nothing",
                    region.name
                );
            }

            let pairs = match_region(region, distribution, access, self.max_distance);

            if tracing::enabled!(tracing::Level::DEBUG) {
                let ring = ContainmentTest::new(&region.outer);
                let inside = |points: &[NamedPoint]| {
                    points.iter().filter(|p| ring.contains(&p.position)).count()
                };
                tracing::debug!(
                    region = %region.name,
                    access_points = inside(access),
                    distribution_points = inside(distribution),
                    drops = pairs.len(),
                    max_distance = self.max_distance,
                    "Matched access points in region"
                );
            }

            for pair in pairs {
                matched[pair.source_index] = true;
                drops.push(CableDrop {
                    name: drop_name(&pair.source.name, &pair.target.name),
                    source: pair.source.name.clone(),
                    target: pair.target.name.clone(),
                    region: region.name.clone(),
                    style: self.style,
                    path: synthesize(&pair.target.position, &pair.source.position, self.style),
                });
            }
        }

        (drops, matched)
    }
}

/// `dropfg_<access>_to_<distribution>` with spaces replaced by underscores.
///
/// Only the space character is replaced; other whitespace is kept as is.
pub fn drop_name(access: &str, distribution: &str) -> String {
    format!("dropfg_{}_to_{}", access.replace(' ', "_"), distribution.replace(' ', "_"))
}
