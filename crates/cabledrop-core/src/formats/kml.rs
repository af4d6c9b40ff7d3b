//! KML (Keyhole Markup Language) reader
//!
//! Reads the three folders the generator works with: `BOUNDARY` polygons,
//! `HP` (access point) placemarks and `FAT` (distribution point) placemarks.
//! Everything else in the document is ignored.
//!
//! A placemark belongs to the innermost enclosing folder whose name is one of
//! the recognized folder names, so sub-folders inside `HP` are still read as
//! access points.

use quick_xml::events::Event;
use quick_xml::Reader;
use std::fs;
use std::path::Path;

use crate::error::{CabledropError, Result};
use crate::formats::validation::{check_file, check_xml};
use crate::formats::{FormatReader, FormatValidation};
use crate::models::{AssetCategory, GeoPoint, NamedPoint, Region, Ring, SiteDataset};

const FORMAT: &str = "KML";

/// Folder names that carry each kind of entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderNames {
    pub boundary: String,
    pub access: String,
    pub distribution: String,
    /// Folder the writer puts generated drops in
    pub drops: String,
}

impl Default for FolderNames {
    fn default() -> Self {
        Self {
            boundary: "BOUNDARY".to_string(),
            access: "HP".to_string(),
            distribution: "FAT".to_string(),
            drops: "CABLE DROP".to_string(),
        }
    }
}

impl FolderNames {
    fn classify(&self, name: &str) -> Option<FolderKind> {
        if name == self.boundary {
            Some(FolderKind::Boundary)
        } else if name == self.access {
            Some(FolderKind::Asset(AssetCategory::Access))
        } else if name == self.distribution {
            Some(FolderKind::Asset(AssetCategory::Distribution))
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FolderKind {
    Boundary,
    Asset(AssetCategory),
}

/// KML format reader
#[derive(Debug, Clone, Default)]
pub struct KmlReader {
    folders: FolderNames,
}

impl KmlReader {
    pub fn new(folders: FolderNames) -> Self {
        Self { folders }
    }

    /// Reject datasets that are missing one of the three inputs
    fn ensure_complete(&self, dataset: &SiteDataset) -> Result<()> {
        let missing = if dataset.regions.is_empty() {
            Some(format!("no {} polygons found", self.folders.boundary))
        } else if dataset.access_points.is_empty() {
            Some(format!("no {} placemarks found", self.folders.access))
        } else if dataset.distribution_points.is_empty() {
            Some(format!("no {} placemarks found", self.folders.distribution))
        } else {
            None
        };

        match missing {
            Some(reason) => {
                Err(CabledropError::FormatValidation { format: FORMAT.to_string(), reason })
            }
            None => Ok(()),
        }
    }
}

impl FormatReader for KmlReader {
    fn read_str(&self, name: &str, content: &str) -> Result<SiteDataset> {
        let dataset = KmlScanner::new(&self.folders, name).scan(content)?;

        tracing::debug!(
            regions = dataset.regions.len(),
            access_points = dataset.access_points.len(),
            distribution_points = dataset.distribution_points.len(),
            "Parsed KML dataset '{}'",
            name
        );

        self.ensure_complete(&dataset)?;
        Ok(dataset)
    }

    fn supported_extensions(&self) -> &[&str] {
        &["kml"]
    }

    fn format_name(&self) -> &str {
        FORMAT
    }

    fn validate(&self, path: &Path) -> Result<FormatValidation> {
        let mut validation = check_file(path, "kml");
        if !validation.is_valid() {
            return Ok(validation);
        }

        let content = fs::read_to_string(path)?;
        validation.merge(check_xml(&content));
        if !validation.is_valid() {
            return Ok(validation);
        }

        let name = path.file_stem().and_then(|s| s.to_str()).unwrap_or("unnamed");
        let scanned = KmlScanner::new(&self.folders, name)
            .scan(&content)
            .and_then(|dataset| self.ensure_complete(&dataset));
        if let Err(e) = scanned {
            validation.errors.push(e.to_string());
        }

        Ok(validation)
    }
}

/// Polygon being assembled from its rings
#[derive(Debug, Default)]
struct PolygonBuilder {
    outer: Option<Vec<GeoPoint>>,
    inner: Vec<Vec<GeoPoint>>,
}

/// Placemark being assembled while its children stream past
#[derive(Debug, Default)]
struct PlacemarkBuilder {
    name: Option<String>,
    point: Option<GeoPoint>,
    polygons: Vec<PolygonBuilder>,
}

struct FolderFrame {
    kind: Option<FolderKind>,
}

/// Single-pass event scanner over a KML document
struct KmlScanner<'a> {
    folders: &'a FolderNames,
    dataset: SiteDataset,
    elements: Vec<String>,
    folder_stack: Vec<FolderFrame>,
    placemark: Option<PlacemarkBuilder>,
    text: String,
}

impl<'a> KmlScanner<'a> {
    fn new(folders: &'a FolderNames, name: &str) -> Self {
        Self {
            folders,
            dataset: SiteDataset::new(name),
            elements: Vec::new(),
            folder_stack: Vec::new(),
            placemark: None,
            text: String::new(),
        }
    }

    fn scan(mut self, content: &str) -> Result<SiteDataset> {
        let mut reader = Reader::from_str(content);

        loop {
            let event = reader.read_event().map_err(|e| CabledropError::FormatValidation {
                format: FORMAT.to_string(),
                reason: format!(
                    "Failed to parse KML at position {}: {}",
                    reader.buffer_position(),
                    e
                ),
            })?;

            match event {
                Event::Start(e) => {
                    let name = String::from_utf8_lossy(e.local_name().as_ref()).into_owned();
                    self.start_element(name);
                }
                Event::End(e) => {
                    let name = String::from_utf8_lossy(e.local_name().as_ref()).into_owned();
                    self.end_element(&name);
                }
                Event::Text(e) => {
                    let text = e.unescape().map_err(|e| CabledropError::FormatValidation {
                        format: FORMAT.to_string(),
                        reason: format!("Invalid text content: {}", e),
                    })?;
                    self.text.push_str(&text);
                }
                Event::CData(e) => {
                    self.text.push_str(&String::from_utf8_lossy(&e.into_inner()));
                }
                Event::Eof => break,
                _ => {}
            }
        }

        Ok(self.dataset)
    }

    fn start_element(&mut self, name: String) {
        match name.as_str() {
            "Folder" => self.folder_stack.push(FolderFrame { kind: None }),
            "Placemark" => self.placemark = Some(PlacemarkBuilder::default()),
            "Polygon" => {
                if let Some(placemark) = self.placemark.as_mut() {
                    placemark.polygons.push(PolygonBuilder::default());
                }
            }
            _ => {}
        }

        self.text.clear();
        self.elements.push(name);
    }

    fn end_element(&mut self, name: &str) {
        let text = std::mem::take(&mut self.text);
        self.elements.pop();

        match name {
            "name" => self.handle_name(text.trim()),
            "coordinates" => self.handle_coordinates(&text),
            "Placemark" => self.finish_placemark(),
            "Folder" => {
                self.folder_stack.pop();
            }
            _ => {}
        }
    }

    fn parent(&self) -> Option<&str> {
        self.elements.last().map(String::as_str)
    }

    fn inside(&self, element: &str) -> bool {
        self.elements.iter().any(|e| e == element)
    }

    fn handle_name(&mut self, text: &str) {
        match self.parent() {
            Some("Folder") => {
                let kind = self.folders.classify(text);
                if let Some(frame) = self.folder_stack.last_mut() {
                    frame.kind = kind;
                }
            }
            Some("Placemark") => {
                if let Some(placemark) = self.placemark.as_mut() {
                    placemark.name = Some(text.to_string());
                }
            }
            _ => {}
        }
    }

    fn handle_coordinates(&mut self, text: &str) {
        let in_point = self.inside("Point");
        let in_outer = self.inside("outerBoundaryIs");
        let in_inner = self.inside("innerBoundaryIs");

        let Some(placemark) = self.placemark.as_mut() else {
            return;
        };

        if in_point {
            // Only the first Point of a placemark counts
            if placemark.point.is_none() {
                placemark.point = parse_coordinates(text).into_iter().next();
            }
        } else if let Some(polygon) = placemark.polygons.last_mut() {
            if in_outer && polygon.outer.is_none() {
                polygon.outer = Some(parse_coordinates(text));
            } else if in_inner {
                polygon.inner.push(parse_coordinates(text));
            }
        }
    }

    /// Innermost enclosing folder with a recognized name
    fn current_kind(&self) -> Option<FolderKind> {
        self.folder_stack.iter().rev().find_map(|frame| frame.kind)
    }

    fn finish_placemark(&mut self) {
        let Some(placemark) = self.placemark.take() else {
            return;
        };
        let name = placemark.name.unwrap_or_default();

        match self.current_kind() {
            Some(FolderKind::Boundary) => {
                for polygon in placemark.polygons {
                    let Some(outer) = polygon.outer else {
                        tracing::debug!("Skipping polygon without outer ring in '{}'", name);
                        continue;
                    };
                    let mut region = Region::new(name.clone(), Ring::new(outer));
                    region.inner = polygon.inner.into_iter().map(Ring::new).collect();
                    self.dataset.regions.push(region);
                }
            }
            Some(FolderKind::Asset(category)) => match placemark.point {
                Some(position) => {
                    self.dataset.push_point(NamedPoint::new(name, position, category));
                }
                None => {
                    tracing::debug!("Skipping {} placemark '{}' without a Point", category, name)
                }
            },
            None => {}
        }
    }
}

/// Parse a KML coordinate string: whitespace separated `lon,lat[,alt]` tuples.
///
/// Tuples with fewer than two components are dropped, a missing altitude is 0
/// and components that are not numbers become NaN.
pub fn parse_coordinates(text: &str) -> Vec<GeoPoint> {
    text.split_whitespace().filter_map(parse_coordinate_tuple).collect()
}

fn parse_coordinate_tuple(tuple: &str) -> Option<GeoPoint> {
    let parts: Vec<&str> = tuple.split(',').collect();
    if parts.len() < 2 {
        return None;
    }

    let component = |s: &str| s.trim().parse::<f64>().unwrap_or(f64::NAN);
    let altitude = parts.get(2).copied().map(component).unwrap_or(0.0);

    Some(GeoPoint::new(component(parts[0]), component(parts[1])).with_altitude(altitude))
}
