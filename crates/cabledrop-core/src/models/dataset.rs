use serde::{Deserialize, Serialize};

use super::asset::{AssetCategory, NamedPoint};
use super::drop::CableDrop;
use super::region::Region;

/// Everything read from one input file, plus the drops generated for it
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SiteDataset {
    /// Dataset name (usually the input file stem)
    pub name: String,

    /// BOUNDARY polygons in file order
    pub regions: Vec<Region>,

    /// FAT placemarks in file order
    pub distribution_points: Vec<NamedPoint>,

    /// HP placemarks in file order
    pub access_points: Vec<NamedPoint>,

    /// Generated drops; empty until generation has run
    #[serde(default)]
    pub drops: Vec<CableDrop>,
}

impl SiteDataset {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), ..Default::default() }
    }

    /// Add a point to the list matching its category
    pub fn push_point(&mut self, point: NamedPoint) {
        match point.category {
            AssetCategory::Distribution => self.distribution_points.push(point),
            AssetCategory::Access => self.access_points.push(point),
        }
    }

    /// Return a copy carrying the given drops
    pub fn with_drops(mut self, drops: Vec<CableDrop>) -> Self {
        self.drops = drops;
        self
    }
}

/// Summary of one generation run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DropStats {
    pub region_count: usize,
    pub access_point_count: usize,
    pub distribution_point_count: usize,
    pub drop_count: usize,

    /// Access points that did not receive a drop in any region
    pub unmatched_access_points: usize,

    pub processing_time_ms: u64,
}
