use cabledrop_core::models::{GeoPoint, LatLon, Ring};
use geo::algorithm::bounding_rect::BoundingRect;
use geo::{LineString, Rect};

/// Sphere radius used by [`distance`]
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Great-circle distance in meters between two points using the haversine formula.
///
/// Altitude is ignored. NaN coordinates propagate to a NaN distance.
pub fn distance(a: &GeoPoint, b: &GeoPoint) -> f64 {
    let phi1 = a.latitude.to_radians();
    let phi2 = b.latitude.to_radians();
    let delta_phi = (b.latitude - a.latitude).to_radians();
    let delta_lambda = (b.longitude - a.longitude).to_radians();

    let h = (delta_phi / 2.0).sin().powi(2)
        + phi1.cos() * phi2.cos() * (delta_lambda / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_M * c
}

/// Even-odd ray casting over latitude/longitude pairs.
///
/// The ring is treated as implicitly closed and may or may not repeat its
/// first vertex. Rings with fewer than 3 vertices contain nothing. Points
/// exactly on an edge get whatever the crossing rule yields.
pub fn contains(point: LatLon, ring: &[LatLon]) -> bool {
    if ring.len() < 3 {
        return false;
    }

    let (lat, lon) = (point.latitude, point.longitude);
    let mut inside = false;
    let mut j = ring.len() - 1;

    for i in 0..ring.len() {
        let (lat_i, lon_i) = (ring[i].latitude, ring[i].longitude);
        let (lat_j, lon_j) = (ring[j].latitude, ring[j].longitude);

        if (lon_i > lon) != (lon_j > lon)
            && lat < (lat_j - lat_i) * (lon - lon_i) / (lon_j - lon_i) + lat_i
        {
            inside = !inside;
        }
        j = i;
    }

    inside
}

/// Axis-aligned bounds of a ring, x = longitude and y = latitude
pub fn bounding_box(ring: &Ring) -> Option<Rect> {
    let line: LineString = ring.positions.iter().map(|p| (p.longitude, p.latitude)).collect();
    line.bounding_rect()
}

/// A ring prepared for repeated containment tests
#[derive(Debug, Clone)]
pub struct ContainmentTest {
    vertices: Vec<LatLon>,
    lon_span: Option<(f64, f64)>,
}

impl ContainmentTest {
    pub fn new(ring: &Ring) -> Self {
        let lon_span = bounding_box(ring).map(|rect| (rect.min().x, rect.max().x));
        Self { vertices: ring.to_lat_lon(), lon_span }
    }

    /// Same answer as [`contains`], skipping points west or east of the ring.
    ///
    /// Only the longitude span is checked: outside it no edge can satisfy the
    /// crossing rule, so the shortcut never changes a result.
    pub fn contains(&self, point: &GeoPoint) -> bool {
        if let Some((min_lon, max_lon)) = self.lon_span {
            if point.longitude < min_lon || point.longitude > max_lon {
                return false;
            }
        }
        contains(point.to_lat_lon(), &self.vertices)
    }
}
