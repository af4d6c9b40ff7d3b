//! Coordinate types shared by the readers, the matching engine and the writers.
//!
//! Positions are stored the way KML stores them: longitude, latitude, altitude.
//! Containment works on latitude/longitude pairs instead, so the only way to get
//! from one to the other is the explicit [`GeoPoint::to_lat_lon`] conversion.

use serde::{Deserialize, Serialize};

/// A WGS84 position in degrees with an altitude in meters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub longitude: f64,
    pub latitude: f64,
    #[serde(default)]
    pub altitude: f64,
}

impl GeoPoint {
    /// Create a point at ground level
    pub fn new(longitude: f64, latitude: f64) -> Self {
        Self { longitude, latitude, altitude: 0.0 }
    }

    pub fn with_altitude(mut self, altitude: f64) -> Self {
        self.altitude = altitude;
        self
    }

    pub fn to_lat_lon(&self) -> LatLon {
        LatLon { latitude: self.latitude, longitude: self.longitude }
    }

    /// Whether every component is a finite number
    pub fn is_finite(&self) -> bool {
        self.longitude.is_finite() && self.latitude.is_finite() && self.altitude.is_finite()
    }
}

/// Latitude/longitude pair consumed by the containment test
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLon {
    pub latitude: f64,
    pub longitude: f64,
}

impl LatLon {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }
}

/// An ordered polygon boundary.
///
/// Vertices keep their altitude so the ring can be written back unchanged.
/// The ring does not have to repeat its first vertex at the end.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Ring {
    pub positions: Vec<GeoPoint>,
}

impl Ring {
    pub fn new(positions: Vec<GeoPoint>) -> Self {
        Self { positions }
    }

    /// Vertices in latitude/longitude order
    pub fn to_lat_lon(&self) -> Vec<LatLon> {
        self.positions.iter().map(GeoPoint::to_lat_lon).collect()
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// First vertex equals the last one
    pub fn is_closed(&self) -> bool {
        match (self.positions.first(), self.positions.last()) {
            (Some(first), Some(last)) if self.positions.len() > 1 => {
                first.longitude == last.longitude && first.latitude == last.latitude
            }
            _ => false,
        }
    }

    /// Number of vertices ignoring a repeated closing vertex
    pub fn distinct_vertex_count(&self) -> usize {
        if self.is_closed() {
            self.positions.len() - 1
        } else {
            self.positions.len()
        }
    }
}

impl From<Vec<GeoPoint>> for Ring {
    fn from(positions: Vec<GeoPoint>) -> Self {
        Self::new(positions)
    }
}
