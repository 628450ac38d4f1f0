//! Geographic point types.

use geo_types::Coord;
use serde::{Deserialize, Serialize};

/// A latitude/longitude pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    /// Creates a point, rejecting coordinates outside the valid ranges.
    pub fn new(latitude: f64, longitude: f64) -> Option<Self> {
        let valid = latitude.is_finite()
            && longitude.is_finite()
            && (-90.0..=90.0).contains(&latitude)
            && (-180.0..=180.0).contains(&longitude);
        valid.then_some(Self {
            latitude,
            longitude,
        })
    }

    /// Creates a point without range checks. Meant for known-good constants.
    pub const fn new_unchecked(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Converts to a `[longitude, latitude]` geometry coordinate.
    pub fn to_coord(self) -> Coord<f64> {
        Coord {
            x: self.longitude,
            y: self.latitude,
        }
    }

    /// Converts from a `[longitude, latitude]` geometry coordinate.
    pub fn from_coord(coord: Coord<f64>) -> Self {
        Self {
            latitude: coord.y,
            longitude: coord.x,
        }
    }
}

/// A named location with a rating, optionally annotated with its distance
/// from the current search origin.
#[derive(Debug, Clone, PartialEq)]
pub struct PointOfInterest {
    pub id: String,
    pub name: String,
    pub location: GeoPoint,
    pub rating: f64,
    /// Great-circle distance from the last search origin, in kilometers.
    pub distance_km: Option<f64>,
}

impl PointOfInterest {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        location: GeoPoint,
        rating: f64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            location,
            rating,
            distance_km: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_out_of_range() {
        assert!(GeoPoint::new(91.0, 0.0).is_none());
        assert!(GeoPoint::new(0.0, -180.5).is_none());
        assert!(GeoPoint::new(f64::NAN, 0.0).is_none());
        assert!(GeoPoint::new(-90.0, 180.0).is_some());
    }

    #[test]
    fn test_coord_axis_order() {
        let p = GeoPoint::new_unchecked(51.5, -0.12);
        let c = p.to_coord();
        assert_eq!(c.x, -0.12);
        assert_eq!(c.y, 51.5);
        assert_eq!(GeoPoint::from_coord(c), p);
    }
}
