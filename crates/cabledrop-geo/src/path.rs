use cabledrop_core::models::{DropStyle, GeoPoint};
use cabledrop_core::Result;

/// Offset of the curved midpoint, as a fraction of the degree-space span
pub const CURVE_OFFSET_FACTOR: f64 = 0.2;

/// Build the path of a drop from the distribution point to the access point.
///
/// Straight paths are the two endpoints. Curved paths add a midpoint pushed
/// sideways from the segment, computed in raw degree space.
pub fn synthesize(distribution: &GeoPoint, access: &GeoPoint, style: DropStyle) -> Vec<GeoPoint> {
    match style {
        DropStyle::Straight => vec![*distribution, *access],
        DropStyle::Curved => vec![*distribution, curve_midpoint(distribution, access), *access],
    }
}

/// Like [`synthesize`], with the style given by name
pub fn synthesize_named(
    distribution: &GeoPoint,
    access: &GeoPoint,
    style: &str,
) -> Result<Vec<GeoPoint>> {
    let style: DropStyle = style.parse()?;
    Ok(synthesize(distribution, access, style))
}

/// Midpoint of `start`..`end` rotated a quarter turn off the segment and
/// scaled by [`CURVE_OFFSET_FACTOR`]. Altitude is the higher of the two ends.
pub fn curve_midpoint(start: &GeoPoint, end: &GeoPoint) -> GeoPoint {
    let longitude = (start.longitude + end.longitude) / 2.0
        - (end.latitude - start.latitude) * CURVE_OFFSET_FACTOR;
    let latitude = (start.latitude + end.latitude) / 2.0
        + (end.longitude - start.longitude) * CURVE_OFFSET_FACTOR;

    GeoPoint::new(longitude, latitude).with_altitude(start.altitude.max(end.altitude))
}

#[cfg(test)]
mod tests {
    use super::*;
    use cabledrop_core::CabledropError;

    #[test]
    fn test_straight_path() {
        let fat = GeoPoint::new(106.8, -6.2).with_altitude(3.0);
        let hp = GeoPoint::new(106.801, -6.201);

        assert_eq!(synthesize(&fat, &hp, DropStyle::Straight), vec![fat, hp]);
    }

    #[test]
    fn test_curved_path_midpoint() {
        let fat = GeoPoint::new(0.0, 0.0);
        let hp = GeoPoint::new(10.0, 0.0).with_altitude(7.0);

        let path = synthesize(&fat, &hp, DropStyle::Curved);

        assert_eq!(path.len(), 3);
        assert_eq!(path[0], fat);
        assert_eq!(path[2], hp);
        assert_eq!(path[1], GeoPoint::new(5.0, 2.0).with_altitude(7.0));
    }

    #[test]
    fn test_curve_bends_left_of_travel() {
        // Heading north, the midpoint moves west
        let mid = curve_midpoint(&GeoPoint::new(0.0, 0.0), &GeoPoint::new(0.0, 10.0));
        assert_eq!(mid.longitude, -2.0);
        assert_eq!(mid.latitude, 5.0);
    }

    #[test]
    fn test_coincident_endpoints() {
        let p = GeoPoint::new(1.0, 1.0);
        assert_eq!(synthesize(&p, &p, DropStyle::Curved), vec![p, p, p]);
    }

    #[test]
    fn test_synthesize_named() {
        let a = GeoPoint::new(0.0, 0.0);
        let b = GeoPoint::new(1.0, 1.0);

        assert_eq!(synthesize_named(&a, &b, "curved").unwrap().len(), 3);
        assert_eq!(synthesize_named(&a, &b, "straight").unwrap().len(), 2);
        assert!(matches!(
            synthesize_named(&a, &b, "STRAIGHT"),
            Err(CabledropError::InvalidStyle { .. })
        ));

        match synthesize_named(&a, &b, "zigzag") {
            Err(CabledropError::InvalidStyle { style }) => assert_eq!(style, "zigzag"),
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
