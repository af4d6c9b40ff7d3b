//! KML writer
//!
//! Produces a single document holding the shared styles followed by the
//! `BOUNDARY`, `HP`, `FAT` and `CABLE DROP` folders. The first three folders
//! mirror the input so the output can be fed back into the reader.

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::fmt::Display;

use crate::error::{CabledropError, Result};
use crate::formats::kml::FolderNames;
use crate::formats::style::{hex_to_kml_color, IconStyle, LineStyle, StyleSheet};
use crate::formats::FormatWriter;
use crate::models::{CableDrop, DropStyle, GeoPoint, NamedPoint, Region, Ring, SiteDataset};

const KML_NAMESPACE: &str = "http://www.opengis.net/kml/2.2";
const GX_NAMESPACE: &str = "http://www.google.com/kml/ext/2.2";
const ATOM_NAMESPACE: &str = "http://www.w3.org/2005/Atom";

pub const DOCUMENT_NAME: &str = "KML Cable Drop Generator Output";

const BOUNDARY_STYLE_ID: &str = "boundaryStyle";
const ACCESS_STYLE_ID: &str = "hpStyle";
const DISTRIBUTION_STYLE_ID: &str = "fatStyle";

fn drop_style_id(style: DropStyle) -> &'static str {
    match style {
        DropStyle::Straight => "cableDropStraightStyle",
        DropStyle::Curved => "cableDropCurvedStyle",
    }
}

fn xml_error(e: impl Display) -> CabledropError {
    CabledropError::FormatError { format: "KML".to_string(), message: e.to_string() }
}

/// KML format writer
#[derive(Debug, Clone, Default)]
pub struct KmlWriter {
    styles: StyleSheet,
    folders: FolderNames,
}

impl KmlWriter {
    pub fn new(styles: StyleSheet) -> Self {
        Self { styles, folders: FolderNames::default() }
    }

    pub fn with_folders(mut self, folders: FolderNames) -> Self {
        self.folders = folders;
        self
    }
}

impl FormatWriter for KmlWriter {
    fn write_string(&self, dataset: &SiteDataset) -> Result<String> {
        let mut doc = KmlDocument::new();

        doc.declaration()?;
        doc.open_with(
            "kml",
            &[("xmlns", KML_NAMESPACE), ("xmlns:gx", GX_NAMESPACE), ("xmlns:atom", ATOM_NAMESPACE)],
        )?;
        doc.open("Document")?;
        doc.text_element("name", DOCUMENT_NAME)?;

        doc.line_style(BOUNDARY_STYLE_ID, &self.styles.boundary)?;
        doc.icon_style(ACCESS_STYLE_ID, &self.styles.access_point)?;
        doc.icon_style(DISTRIBUTION_STYLE_ID, &self.styles.distribution_point)?;
        for style in [DropStyle::Straight, DropStyle::Curved] {
            doc.line_style(drop_style_id(style), self.styles.drop_line(style))?;
        }

        doc.open("Folder")?;
        doc.text_element("name", &self.folders.boundary)?;
        for region in &dataset.regions {
            doc.region(region)?;
        }
        doc.close("Folder")?;

        doc.open("Folder")?;
        doc.text_element("name", &self.folders.access)?;
        for point in &dataset.access_points {
            doc.point(point, ACCESS_STYLE_ID)?;
        }
        doc.close("Folder")?;

        doc.open("Folder")?;
        doc.text_element("name", &self.folders.distribution)?;
        for point in &dataset.distribution_points {
            doc.point(point, DISTRIBUTION_STYLE_ID)?;
        }
        doc.close("Folder")?;

        doc.open("Folder")?;
        doc.text_element("name", &self.folders.drops)?;
        for drop in &dataset.drops {
            doc.drop_line(drop)?;
        }
        doc.close("Folder")?;

        doc.close("Document")?;
        doc.close("kml")?;

        tracing::debug!(drops = dataset.drops.len(), "Serialized KML document");
        doc.finish()
    }

    fn supported_extensions(&self) -> &[&str] {
        &["kml"]
    }

    fn format_name(&self) -> &str {
        "KML"
    }
}

/// Format positions as KML `lon,lat,alt` tuples separated by spaces
pub fn format_coordinates(positions: &[GeoPoint]) -> String {
    positions
        .iter()
        .map(|p| format!("{},{},{}", p.longitude, p.latitude, p.altitude))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Thin layer over the quick-xml writer for the handful of shapes KML needs
struct KmlDocument {
    writer: Writer<Vec<u8>>,
}

impl KmlDocument {
    fn new() -> Self {
        Self { writer: Writer::new_with_indent(Vec::new(), b' ', 2) }
    }

    fn finish(self) -> Result<String> {
        let mut content = String::from_utf8(self.writer.into_inner()).map_err(xml_error)?;
        content.push('\n');
        Ok(content)
    }

    fn event(&mut self, event: Event<'_>) -> Result<()> {
        self.writer.write_event(event).map_err(xml_error)
    }

    fn declaration(&mut self) -> Result<()> {
        self.event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
    }

    fn open(&mut self, tag: &str) -> Result<()> {
        self.event(Event::Start(BytesStart::new(tag)))
    }

    fn open_with(&mut self, tag: &str, attributes: &[(&str, &str)]) -> Result<()> {
        let start = BytesStart::new(tag).with_attributes(attributes.iter().copied());
        self.event(Event::Start(start))
    }

    fn close(&mut self, tag: &str) -> Result<()> {
        self.event(Event::End(BytesEnd::new(tag)))
    }

    fn text_element(&mut self, tag: &str, text: &str) -> Result<()> {
        self.open(tag)?;
        self.event(Event::Text(BytesText::new(text)))?;
        self.close(tag)
    }

    fn line_style(&mut self, id: &str, style: &LineStyle) -> Result<()> {
        self.open_with("Style", &[("id", id)])?;

        self.open("LineStyle")?;
        self.text_element("color", &hex_to_kml_color(&style.color))?;
        self.text_element("width", &style.width.to_string())?;
        self.close("LineStyle")?;

        if let Some(fill) = &style.fill {
            self.open("PolyStyle")?;
            self.text_element("color", fill)?;
            self.close("PolyStyle")?;
        }

        self.close("Style")
    }

    fn icon_style(&mut self, id: &str, style: &IconStyle) -> Result<()> {
        self.open_with("Style", &[("id", id)])?;
        self.open("IconStyle")?;
        self.text_element("scale", &style.scale.to_string())?;
        self.open("Icon")?;
        self.text_element("href", &style.href)?;
        self.close("Icon")?;
        self.close("IconStyle")?;
        self.close("Style")
    }

    fn ring(&mut self, boundary: &str, ring: &Ring) -> Result<()> {
        self.open(boundary)?;
        self.open("LinearRing")?;
        self.text_element("coordinates", &format_coordinates(&ring.positions))?;
        self.close("LinearRing")?;
        self.close(boundary)
    }

    fn region(&mut self, region: &Region) -> Result<()> {
        self.open("Placemark")?;
        self.text_element("name", &region.name)?;
        self.text_element("styleUrl", &format!("#{}", BOUNDARY_STYLE_ID))?;
        self.open("Polygon")?;
        self.ring("outerBoundaryIs", &region.outer)?;
        for inner in &region.inner {
            self.ring("innerBoundaryIs", inner)?;
        }
        self.close("Polygon")?;
        self.close("Placemark")
    }

    fn point(&mut self, point: &NamedPoint, style_id: &str) -> Result<()> {
        self.open("Placemark")?;
        self.text_element("name", &point.name)?;
        self.text_element("styleUrl", &format!("#{}", style_id))?;
        self.open("Point")?;
        self.text_element("coordinates", &format_coordinates(&[point.position]))?;
        self.close("Point")?;
        self.close("Placemark")
    }

    fn drop_line(&mut self, drop: &CableDrop) -> Result<()> {
        self.open("Placemark")?;
        self.text_element("name", &drop.name)?;
        self.text_element("styleUrl", &format!("#{}", drop_style_id(drop.style)))?;

        self.open("ExtendedData")?;
        for (key, value) in [
            ("source", drop.source.as_str()),
            ("target", drop.target.as_str()),
            ("region", drop.region.as_str()),
            ("style", drop.style.as_str()),
        ] {
            self.open_with("Data", &[("name", key)])?;
            self.text_element("value", value)?;
            self.close("Data")?;
        }
        self.close("ExtendedData")?;

        self.open("LineString")?;
        self.text_element("tessellate", "1")?;
        self.text_element("altitudeMode", "relativeToGround")?;
        self.text_element("coordinates", &format_coordinates(&drop.path))?;
        self.close("LineString")?;
        self.close("Placemark")
    }
}
