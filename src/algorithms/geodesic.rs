//! Great-circle distance on a spherical Earth

use crate::core::{GeoPoint, EARTH_RADIUS_M};

/// Haversine surface distance between two geographic points (m).
///
/// Spherical-Earth model, radius 6 371 000 m. No range validation:
/// out-of-range or NaN coordinates propagate through the math.
pub fn haversine_distance(a: &GeoPoint, b: &GeoPoint) -> f64 {
    let lat1 = a.latitude.to_radians();
    let lat2 = b.latitude.to_radians();
    let lat_diff = (b.latitude - a.latitude).to_radians();
    let lon_diff = (b.longitude - a.longitude).to_radians();

    let h = (lat_diff / 2.0).sin().powi(2)
        + (lon_diff / 2.0).sin().powi(2) * lat1.cos() * lat2.cos();
    2.0 * EARTH_RADIUS_M * h.sqrt().asin()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn zero_for_identical_points() {
        let p = GeoPoint::new(4.4777, 51.0224);
        assert_eq!(haversine_distance(&p, &p), 0.0);
    }

    #[test]
    fn symmetric() {
        let a = GeoPoint::new(4.4777, 51.0224);
        let b = GeoPoint::new(4.4790, 51.0230);
        assert_eq!(haversine_distance(&a, &b), haversine_distance(&b, &a));
    }

    #[test]
    fn one_degree_of_latitude() {
        let a = GeoPoint::new(0.0, 0.0);
        let b = GeoPoint::new(0.0, 1.0);
        // R * 1° in radians = 6371000 * pi / 180
        assert_relative_eq!(
            haversine_distance(&a, &b),
            111_194.926,
            max_relative = 1e-6
        );
    }

    #[test]
    fn short_baseline_matches_flat_approximation() {
        // 1e-4 degrees of latitude is ~11.12 m; the sphere and the tangent
        // plane agree to well under a millimeter at this scale
        let a = GeoPoint::new(4.4777, 51.0224);
        let b = GeoPoint::new(4.4777, 51.0225);
        assert_relative_eq!(haversine_distance(&a, &b), 11.119, max_relative = 1e-3);
    }

    #[test]
    fn nan_input_propagates() {
        let a = GeoPoint::new(f64::NAN, 0.0);
        let b = GeoPoint::new(0.0, 0.0);
        assert!(haversine_distance(&a, &b).is_nan());
    }
}
