//! Integration tests for reading and writing site files through the registry

use cabledrop_core::formats::{FolderNames, FormatRegistry, StyleSheet};
use cabledrop_core::models::{CableDrop, DropStyle, GeoPoint};
use cabledrop_core::CabledropError;
use std::fs;
use tempfile::TempDir;

const SITE_KML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<kml xmlns="http://www.opengis.net/kml/2.2">
  <Document>
    <name>Village</name>
    <Folder>
      <name>BOUNDARY</name>
      <Placemark>
        <name>Cluster North</name>
        <Polygon>
          <outerBoundaryIs>
            <LinearRing>
              <coordinates>110.0,-7.0,0 110.01,-7.0,0 110.01,-6.99,0 110.0,-6.99,0 110.0,-7.0,0</coordinates>
            </LinearRing>
          </outerBoundaryIs>
        </Polygon>
      </Placemark>
      <Placemark>
        <name>Cluster South</name>
        <MultiGeometry>
          <Polygon>
            <outerBoundaryIs>
              <LinearRing>
                <coordinates>110.0,-7.02,0 110.01,-7.02,0 110.01,-7.01,0 110.0,-7.02,0</coordinates>
              </LinearRing>
            </outerBoundaryIs>
          </Polygon>
        </MultiGeometry>
      </Placemark>
    </Folder>
    <Folder>
      <name>HP</name>
      <Placemark><name>  HP 1  </name><Point><coordinates>110.005,-6.995,0</coordinates></Point></Placemark>
      <Placemark><name>HP 2</name><Point><coordinates>110.006,-6.996,0</coordinates></Point></Placemark>
    </Folder>
    <Folder>
      <name>FAT</name>
      <Placemark><name>FAT 1</name><Point><coordinates>110.0052,-6.9952,0</coordinates></Point></Placemark>
    </Folder>
  </Document>
</kml>"#;

fn write_site(dir: &TempDir) -> std::path::PathBuf {
    let path = dir.path().join("village.kml");
    fs::write(&path, SITE_KML).unwrap();
    path
}

#[test]
fn test_read_through_registry() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_site(&temp_dir);

    let registry = FormatRegistry::default();
    let reader = registry.detect_reader(&path).unwrap();
    let dataset = reader.read(&path).unwrap();

    assert_eq!(dataset.name, "village");
    assert_eq!(dataset.regions.len(), 2);
    assert_eq!(dataset.regions[1].name, "Cluster South");
    assert_eq!(dataset.access_points[0].name, "HP 1");
    assert_eq!(dataset.distribution_points.len(), 1);
}

#[test]
fn test_write_kml_and_geojson() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_site(&temp_dir);

    let registry = FormatRegistry::with_defaults(StyleSheet::default(), FolderNames::default());
    let dataset = registry.detect_reader(&path).unwrap().read(&path).unwrap();

    let drop = CableDrop {
        name: "dropfg_HP_1_to_FAT_1".to_string(),
        source: "HP 1".to_string(),
        target: "FAT 1".to_string(),
        region: "Cluster North".to_string(),
        style: DropStyle::Straight,
        path: vec![GeoPoint::new(110.0052, -6.9952), GeoPoint::new(110.005, -6.995)],
    };
    let dataset = dataset.with_drops(vec![drop]);

    let kml_path = temp_dir.path().join("village_with_drops.kml");
    registry.detect_writer(&kml_path).unwrap().write(&dataset, &kml_path).unwrap();
    let kml = fs::read_to_string(&kml_path).unwrap();
    assert!(kml.contains("<name>dropfg_HP_1_to_FAT_1</name>"));

    // The written file is a valid input again
    let reread = registry.detect_reader(&kml_path).unwrap().read(&kml_path).unwrap();
    assert_eq!(reread.regions, dataset.regions);
    assert_eq!(reread.access_points, dataset.access_points);

    let geojson_path = temp_dir.path().join("village_with_drops.geojson");
    registry.detect_writer(&geojson_path).unwrap().write(&dataset, &geojson_path).unwrap();
    let parsed: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&geojson_path).unwrap()).unwrap();
    assert_eq!(parsed["features"].as_array().unwrap().len(), 2 + 2 + 1 + 1);
}

#[test]
fn test_validate_reports_invalid_xml() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("broken.kml");
    fs::write(&path, "<kml><Document></kml>").unwrap();

    let registry = FormatRegistry::default();
    let reader = registry.detect_reader(&path).unwrap();

    assert!(!reader.validate(&path).unwrap().is_valid());
    assert!(matches!(reader.read(&path), Err(CabledropError::FormatValidation { .. })));
}

#[test]
fn test_missing_file_is_format_error() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("missing.kml");

    let registry = FormatRegistry::default();
    let result = registry.detect_reader(&path).unwrap().read(&path);
    assert!(matches!(result, Err(CabledropError::FormatError { .. })));
}
