//! Great-circle distance and radius filtering.

use super::{GeoPoint, PointOfInterest};

/// Mean Earth radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine distance between two points in kilometers.
pub fn haversine_km(a: GeoPoint, b: GeoPoint) -> f64 {
    let lat1 = a.latitude.to_radians();
    let lat2 = b.latitude.to_radians();
    let d_lat = (b.latitude - a.latitude).to_radians();
    let d_lon = (b.longitude - a.longitude).to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
    // Rounding can push h a hair above 1 for antipodal points.
    let h = h.clamp(0.0, 1.0);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    EARTH_RADIUS_KM * c
}

/// Keeps the points within `radius_km` of `origin`, annotating each with its
/// distance. Source order is preserved.
pub fn filter_by_radius(
    origin: GeoPoint,
    points: &[PointOfInterest],
    radius_km: f64,
) -> Vec<PointOfInterest> {
    points
        .iter()
        .filter_map(|point| {
            let distance = haversine_km(origin, point.location);
            (distance <= radius_km).then(|| PointOfInterest {
                distance_km: Some(distance),
                ..point.clone()
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn poi(id: &str, lat: f64, lon: f64) -> PointOfInterest {
        PointOfInterest::new(id, id, GeoPoint::new_unchecked(lat, lon), 4.0)
    }

    const LONDON: GeoPoint = GeoPoint::new_unchecked(51.5074, -0.1278);

    #[test]
    fn test_haversine_symmetric_and_zero() {
        let pairs = [
            (LONDON, GeoPoint::new_unchecked(40.4168, -3.7038)),
            (
                GeoPoint::new_unchecked(-33.86, 151.21),
                GeoPoint::new_unchecked(64.13, -21.9),
            ),
            (
                GeoPoint::new_unchecked(0.0, 179.9),
                GeoPoint::new_unchecked(0.0, -179.9),
            ),
        ];
        for (a, b) in pairs {
            assert!((haversine_km(a, b) - haversine_km(b, a)).abs() < 1e-9);
            assert_eq!(haversine_km(a, a), 0.0);
        }
    }

    #[test]
    fn test_london_hyde_park() {
        let club = GeoPoint::new_unchecked(51.5085, -0.1515);
        let d = haversine_km(LONDON, club);
        assert!((d - 1.65).abs() < 0.05, "Expected ~1.65 km, got {d}");
    }

    #[test]
    fn test_radius_includes_and_excludes() {
        let points = vec![poi("hyde", 51.5085, -0.1515)];

        let within = filter_by_radius(LONDON, &points, 10.0);
        assert_eq!(within.len(), 1);
        assert!(within[0].distance_km.is_some());

        assert!(filter_by_radius(LONDON, &points, 1.0).is_empty());
    }

    #[test]
    fn test_zero_radius_keeps_only_exact_origin() {
        let points = vec![
            poi("here", LONDON.latitude, LONDON.longitude),
            poi("near", 51.5075, -0.1278),
        ];
        let result = filter_by_radius(LONDON, &points, 0.0);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, "here");
        assert_eq!(result[0].distance_km, Some(0.0));
    }

    #[test]
    fn test_filter_is_stable_and_monotonic() {
        let points = vec![
            poi("far", 51.4816, 0.0052),
            poi("mid", 51.5290, -0.1255),
            poi("near", 51.5045, -0.1097),
        ];

        let mut previous: Vec<String> = Vec::new();
        for radius in [0.5, 1.5, 3.0, 5.0, 10.0, 20.0] {
            let ids: Vec<String> = filter_by_radius(LONDON, &points, radius)
                .into_iter()
                .map(|p| p.id)
                .collect();
            for id in &previous {
                assert!(ids.contains(id), "{id} dropped at radius {radius}");
            }
            previous = ids;
        }
        assert_eq!(previous, vec!["far", "mid", "near"]);
    }

    #[test]
    fn test_negative_radius_is_empty() {
        let points = vec![poi("here", LONDON.latitude, LONDON.longitude)];
        assert!(filter_by_radius(LONDON, &points, -1.0).is_empty());
        assert!(filter_by_radius(LONDON, &points, f64::NAN).is_empty());
    }
}
