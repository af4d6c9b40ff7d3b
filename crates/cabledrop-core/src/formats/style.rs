//! Presentation metadata used by the writers.
//!
//! Nothing in here affects matching or geometry.

use serde::{Deserialize, Serialize};

use crate::config::LayeredConfig;
use crate::models::DropStyle;

/// Line (and optional fill) styling
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineStyle {
    /// `#rrggbb`
    pub color: String,
    pub width: f64,
    /// Fill color already in KML `aabbggrr` form
    pub fill: Option<String>,
}

/// Placemark icon styling
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IconStyle {
    pub href: String,
    pub scale: f64,
}

/// Styles for every kind of placemark in the output document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleSheet {
    pub boundary: LineStyle,
    pub access_point: IconStyle,
    pub distribution_point: IconStyle,
    pub straight_drop: LineStyle,
    pub curved_drop: LineStyle,
}

impl Default for StyleSheet {
    fn default() -> Self {
        Self {
            boundary: LineStyle {
                color: "#0000ff".to_string(),
                width: 3.0,
                fill: Some("330000ff".to_string()),
            },
            access_point: IconStyle {
                href: "http://maps.google.com/mapfiles/kml/shapes/placemark_circle.png"
                    .to_string(),
                scale: 1.2,
            },
            distribution_point: IconStyle {
                href: "http://maps.google.com/mapfiles/kml/shapes/square.png".to_string(),
                scale: 1.4,
            },
            straight_drop: LineStyle { color: "#ff00ff".to_string(), width: 1.0, fill: None },
            curved_drop: LineStyle { color: "#ff00ff".to_string(), width: 1.0, fill: None },
        }
    }
}

impl StyleSheet {
    /// Default styles with the drop line color and width taken from configuration
    pub fn from_config(config: &LayeredConfig) -> Self {
        let mut styles = Self::default();
        for drop_style in [&mut styles.straight_drop, &mut styles.curved_drop] {
            drop_style.color = config.drop_line_color.value.clone();
            drop_style.width = config.drop_line_width.value;
        }
        styles
    }

    pub fn drop_line(&self, style: DropStyle) -> &LineStyle {
        match style {
            DropStyle::Straight => &self.straight_drop,
            DropStyle::Curved => &self.curved_drop,
        }
    }
}

/// Convert `#rrggbb` to KML's opaque `ffbbggrr`.
///
/// Input that is too short is passed through the same way the components
/// are sliced, so malformed colors never panic.
pub fn hex_to_kml_color(hex: &str) -> String {
    let hex = hex.trim().trim_start_matches('#');
    let component = |start: usize| hex.get(start..start + 2).unwrap_or("00");
    format!("ff{}{}{}", component(4), component(2), component(0)).to_lowercase()
}
