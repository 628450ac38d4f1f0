//! Club map region and region-to-screen projection.
//!
//! The club map is fed a region (center plus latitude/longitude spans) and a
//! list of markers. `RegionProjection` draws that region onto the canvas with
//! an equirectangular projection, which is adequate for city-sized regions.

use super::GeoPoint;
use eframe::egui::{Pos2, Rect, Vec2};
use geo_types::Coord;

/// Default latitude span of the club map.
pub const DEFAULT_LATITUDE_DELTA: f64 = 0.0922;
/// Default longitude span of the club map.
pub const DEFAULT_LONGITUDE_DELTA: f64 = 0.0421;

/// Visible area of the club map.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapRegion {
    pub center: GeoPoint,
    pub latitude_delta: f64,
    pub longitude_delta: f64,
}

impl MapRegion {
    /// Region centered on `center` with the default spans.
    pub fn around(center: GeoPoint) -> Self {
        Self {
            center,
            latitude_delta: DEFAULT_LATITUDE_DELTA,
            longitude_delta: DEFAULT_LONGITUDE_DELTA,
        }
    }

    /// Smallest region containing every coordinate, grown by
    /// `padding_fraction` of its span on each side.
    ///
    /// Returns `None` for an empty set.
    pub fn fitting(points: &[GeoPoint], padding_fraction: f64) -> Option<Self> {
        let first = points.first()?;
        let (mut min_lat, mut max_lat) = (first.latitude, first.latitude);
        let (mut min_lon, mut max_lon) = (first.longitude, first.longitude);
        for p in &points[1..] {
            min_lat = min_lat.min(p.latitude);
            max_lat = max_lat.max(p.latitude);
            min_lon = min_lon.min(p.longitude);
            max_lon = max_lon.max(p.longitude);
        }

        // A single point (or a collinear set) would otherwise give a zero span.
        const MIN_SPAN: f64 = 0.005;
        let lat_span = (max_lat - min_lat).max(MIN_SPAN);
        let lon_span = (max_lon - min_lon).max(MIN_SPAN);

        Some(Self {
            center: GeoPoint::new_unchecked((min_lat + max_lat) / 2.0, (min_lon + max_lon) / 2.0),
            latitude_delta: lat_span * (1.0 + 2.0 * padding_fraction),
            longitude_delta: lon_span * (1.0 + 2.0 * padding_fraction),
        })
    }
}

/// Data handed to the map for one marker.
#[derive(Debug, Clone, PartialEq)]
pub struct ClubMarker {
    pub coordinate: GeoPoint,
    pub title: String,
    pub description: String,
}

/// Projection from a `MapRegion` onto a screen rectangle.
#[derive(Debug, Clone)]
pub struct RegionProjection {
    /// Region shown at zoom 1 with no pan
    pub region: MapRegion,
    /// Current zoom level
    pub zoom: f32,
    /// Pan offset in screen pixels
    pub pan_offset: Vec2,
    /// Screen rectangle for the canvas
    pub screen_rect: Rect,
}

impl RegionProjection {
    pub fn new(region: MapRegion, screen_rect: Rect) -> Self {
        Self {
            region,
            zoom: 1.0,
            pan_offset: Vec2::ZERO,
            screen_rect,
        }
    }

    /// Updates the projection with current view state.
    pub fn update(&mut self, zoom: f32, pan_offset: Vec2, screen_rect: Rect) {
        self.zoom = zoom;
        self.pan_offset = pan_offset;
        self.screen_rect = screen_rect;
    }

    /// Half-extent of the visible area in corrected degrees.
    fn effective_range(&self) -> f64 {
        let lat_correction = self.region.center.latitude.to_radians().cos();
        let half_lat = self.region.latitude_delta / 2.0;
        let half_lon = self.region.longitude_delta * lat_correction / 2.0;
        half_lat.max(half_lon) / self.zoom as f64
    }

    /// Converts geographic coordinates (lon, lat) to screen position.
    pub fn geo_to_screen(&self, coord: Coord<f64>) -> Pos2 {
        let range = self.effective_range();
        let center = self.region.center;

        let lat_correction = center.latitude.to_radians().cos();
        let rel_lon = (coord.x - center.longitude) * lat_correction;
        let rel_lat = coord.y - center.latitude;

        let norm_x = rel_lon / range;
        // Screen y grows downward
        let norm_y = -rel_lat / range;

        let origin = self.screen_rect.center() + self.pan_offset;
        let half_size = self.screen_rect.size().min_elem() / 2.0;

        Pos2::new(
            origin.x + (norm_x as f32) * half_size,
            origin.y + (norm_y as f32) * half_size,
        )
    }

    /// Converts screen position to geographic coordinates (lon, lat).
    pub fn screen_to_geo(&self, pos: Pos2) -> Coord<f64> {
        let range = self.effective_range();
        let center = self.region.center;

        let origin = self.screen_rect.center() + self.pan_offset;
        let half_size = self.screen_rect.size().min_elem() / 2.0;

        let norm_x = (pos.x - origin.x) / half_size;
        let norm_y = (pos.y - origin.y) / half_size;

        let lat_correction = center.latitude.to_radians().cos();
        Coord {
            x: center.longitude + (norm_x as f64) * range / lat_correction,
            y: center.latitude - (norm_y as f64) * range,
        }
    }

    pub fn point_to_screen(&self, point: GeoPoint) -> Pos2 {
        self.geo_to_screen(point.to_coord())
    }

    /// Checks if a screen position falls inside the canvas (with margin).
    pub fn is_on_screen(&self, pos: Pos2, margin: f32) -> bool {
        self.screen_rect.expand(margin).contains(pos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn london() -> GeoPoint {
        GeoPoint::new_unchecked(51.5074, -0.1278)
    }

    fn contains(region: &MapRegion, point: GeoPoint) -> bool {
        (point.latitude - region.center.latitude).abs() <= region.latitude_delta / 2.0
            && (point.longitude - region.center.longitude).abs() <= region.longitude_delta / 2.0
    }

    #[test]
    fn test_fitting_empty_is_none() {
        assert!(MapRegion::fitting(&[], 0.1).is_none());
    }

    #[test]
    fn test_fitting_contains_all_points() {
        let points = [
            london(),
            GeoPoint::new_unchecked(51.5290, -0.1255),
            GeoPoint::new_unchecked(51.4816, 0.0052),
        ];
        let region = MapRegion::fitting(&points, 0.1).unwrap();
        for p in points {
            assert!(contains(&region, p));
        }
        assert!(region.latitude_delta > 51.5290 - 51.4816);
    }

    #[test]
    fn test_fitting_single_point_has_span() {
        let region = MapRegion::fitting(&[london()], 0.0).unwrap();
        assert_eq!(region.center, london());
        assert!(region.latitude_delta > 0.0);
        assert!(region.longitude_delta > 0.0);
    }

    #[test]
    fn test_region_center_projects_to_rect_center() {
        let rect = Rect::from_min_size(Pos2::ZERO, Vec2::new(800.0, 600.0));
        let projection = RegionProjection::new(MapRegion::around(london()), rect);
        let pos = projection.point_to_screen(london());
        assert!((pos.x - 400.0).abs() < 1e-3);
        assert!((pos.y - 300.0).abs() < 1e-3);
    }

    #[test]
    fn test_screen_geo_round_trip() {
        let rect = Rect::from_min_size(Pos2::ZERO, Vec2::new(640.0, 480.0));
        let mut projection = RegionProjection::new(MapRegion::around(london()), rect);
        projection.update(2.0, Vec2::new(30.0, -12.0), rect);

        let coord = Coord {
            x: -0.1097,
            y: 51.5045,
        };
        let back = projection.screen_to_geo(projection.geo_to_screen(coord));
        assert!((back.x - coord.x).abs() < 1e-5);
        assert!((back.y - coord.y).abs() < 1e-5);
    }

    #[test]
    fn test_north_is_up() {
        let rect = Rect::from_min_size(Pos2::ZERO, Vec2::new(800.0, 600.0));
        let projection = RegionProjection::new(MapRegion::around(london()), rect);
        let north = projection.point_to_screen(GeoPoint::new_unchecked(51.52, -0.1278));
        assert!(north.y < 300.0);
    }
}
