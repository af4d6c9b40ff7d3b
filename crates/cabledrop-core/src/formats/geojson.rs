//! GeoJSON writer
//!
//! Writes regions, access points, distribution points and drops as one
//! FeatureCollection. Every feature carries `name` and `kind` properties;
//! drops also carry `source`, `target`, `region` and `style`.

use ::geojson::{Feature, FeatureCollection, Geometry, JsonObject, JsonValue, Value};

use crate::error::{CabledropError, Result};
use crate::formats::FormatWriter;
use crate::models::{CableDrop, GeoPoint, NamedPoint, Region, Ring, SiteDataset};

/// GeoJSON format writer
#[derive(Debug, Clone, Copy, Default)]
pub struct GeoJsonWriter;

impl GeoJsonWriter {
    /// Build the feature collection without serializing it
    pub fn to_feature_collection(&self, dataset: &SiteDataset) -> FeatureCollection {
        let mut features = Vec::with_capacity(
            dataset.regions.len()
                + dataset.access_points.len()
                + dataset.distribution_points.len()
                + dataset.drops.len(),
        );

        features.extend(dataset.regions.iter().map(region_feature));
        features.extend(dataset.access_points.iter().map(point_feature));
        features.extend(dataset.distribution_points.iter().map(point_feature));
        features.extend(dataset.drops.iter().map(drop_feature));

        FeatureCollection { features, bbox: None, foreign_members: None }
    }
}

impl FormatWriter for GeoJsonWriter {
    fn write_string(&self, dataset: &SiteDataset) -> Result<String> {
        let collection = self.to_feature_collection(dataset);
        serde_json::to_string_pretty(&collection)
            .map_err(|e| CabledropError::Serialization(e.to_string()))
    }

    fn supported_extensions(&self) -> &[&str] {
        &["geojson", "json"]
    }

    fn format_name(&self) -> &str {
        "GeoJSON"
    }
}

fn position(point: &GeoPoint) -> Vec<f64> {
    vec![point.longitude, point.latitude, point.altitude]
}

fn ring_positions(ring: &Ring) -> Vec<Vec<f64>> {
    ring.positions.iter().map(position).collect()
}

fn feature(value: Value, properties: JsonObject) -> Feature {
    Feature {
        geometry: Some(Geometry::new(value)),
        properties: Some(properties),
        id: None,
        bbox: None,
        foreign_members: None,
    }
}

fn base_properties(name: &str, kind: &str) -> JsonObject {
    let mut properties = JsonObject::new();
    properties.insert("name".to_string(), JsonValue::from(name));
    properties.insert("kind".to_string(), JsonValue::from(kind));
    properties
}

fn region_feature(region: &Region) -> Feature {
    let rings = std::iter::once(&region.outer)
        .chain(region.inner.iter())
        .map(ring_positions)
        .collect();

    feature(Value::Polygon(rings), base_properties(&region.name, "boundary"))
}

fn point_feature(point: &NamedPoint) -> Feature {
    feature(
        Value::Point(position(&point.position)),
        base_properties(&point.name, point.category.as_str()),
    )
}

fn drop_feature(drop: &CableDrop) -> Feature {
    let mut properties = base_properties(&drop.name, "drop");
    properties.insert("source".to_string(), JsonValue::from(drop.source.as_str()));
    properties.insert("target".to_string(), JsonValue::from(drop.target.as_str()));
    properties.insert("region".to_string(), JsonValue::from(drop.region.as_str()));
    properties.insert("style".to_string(), JsonValue::from(drop.style.as_str()));

    feature(Value::LineString(drop.path.iter().map(position).collect()), properties)
}
