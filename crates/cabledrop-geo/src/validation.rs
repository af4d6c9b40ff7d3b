use cabledrop_core::models::{AssetCategory, NamedPoint, Region, Ring, SiteDataset};

use crate::spatial::ContainmentTest;

/// Validation result with details
#[derive(Debug, Clone)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<ValidationError>,
    /// Problems the containment test tolerates
    pub warnings: Vec<ValidationError>,
}

/// Validation error with location details
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    pub location: String,
    pub reason: String,
}

impl ValidationResult {
    /// Create a valid result
    pub fn valid() -> Self {
        Self { is_valid: true, errors: Vec::new(), warnings: Vec::new() }
    }

    /// Add an error to the result
    pub fn add_error(&mut self, location: String, reason: String) {
        self.is_valid = false;
        self.errors.push(ValidationError { location, reason });
    }

    pub fn add_warning(&mut self, location: String, reason: String) {
        self.warnings.push(ValidationError { location, reason });
    }

    /// Fold another result into this one
    pub fn merge(&mut self, other: ValidationResult) {
        self.is_valid &= other.is_valid;
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
    }
}

fn validate_ring(location: &str, ring: &Ring) -> ValidationResult {
    let mut result = ValidationResult::valid();

    // Fewer than 3 vertices can never contain a point
    let distinct = ring.distinct_vertex_count();
    if distinct < 3 {
        result.add_error(
            location.to_string(),
            format!("Ring must have at least 3 distinct vertices, found {}", distinct),
        );
    }

    for (i, position) in ring.positions.iter().enumerate() {
        if !position.is_finite() {
            let reason = "Coordinates must be finite".to_string();
            result.add_error(format!("{}[{}]", location, i), reason);
        }
    }

    if distinct >= 3 && !ring.is_closed() {
        result.add_warning(
            location.to_string(),
            "Ring is not closed (first point != last point); it is closed implicitly".to_string(),
        );
    }

    result
}

/// Validate the rings of a boundary region
pub fn validate_region(region: &Region) -> ValidationResult {
    let location = format!("BOUNDARY '{}'", region.name);
    let mut result = validate_ring(&format!("{} outer ring", location), &region.outer);

    for (i, inner) in region.inner.iter().enumerate() {
        result.merge(validate_ring(&format!("{} inner ring[{}]", location, i), inner));
    }

    result
}

/// Validate a point placemark
pub fn validate_point(point: &NamedPoint) -> ValidationResult {
    let mut result = ValidationResult::valid();

    if !point.position.longitude.is_finite() || !point.position.latitude.is_finite() {
        result.add_error(
            format!("{} '{}'", folder_label(point), point.name),
            format!(
                "Coordinates must be finite, found ({}, {})",
                point.position.longitude, point.position.latitude
            ),
        );
    }

    result
}

/// Validate every region and point of a site
pub fn validate_dataset(dataset: &SiteDataset) -> ValidationResult {
    let mut result = ValidationResult::valid();

    for region in &dataset.regions {
        result.merge(validate_region(region));
    }
    for point in dataset.access_points.iter().chain(&dataset.distribution_points) {
        result.merge(validate_point(point));
    }

    result
}

/// Points that no region contains; these can never get a drop
pub fn unassigned_points(dataset: &SiteDataset) -> Vec<&NamedPoint> {
    let rings: Vec<ContainmentTest> =
        dataset.regions.iter().map(|r| ContainmentTest::new(&r.outer)).collect();

    dataset
        .access_points
        .iter()
        .chain(&dataset.distribution_points)
        .filter(|p| !rings.iter().any(|ring| ring.contains(&p.position)))
        .collect()
}

fn folder_label(point: &NamedPoint) -> &'static str {
    match point.category {
        AssetCategory::Access => "HP",
        AssetCategory::Distribution => "FAT",
    }
}
