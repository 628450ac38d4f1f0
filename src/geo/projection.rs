//! City outline projection.
//!
//! Converts geographic coordinates into screen positions for the stylized
//! city view. The geographic delta is turned into a local planar offset with a
//! flat meters-per-degree factor, then the camera pan, zoom and rotation are
//! applied in that planar space before centering on the viewport.

use super::GeoPoint;
use eframe::egui::{Pos2, Vec2};
use geo_types::Coord;
use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Meters per degree used for both axes of the local planar offset.
///
/// No cos(latitude) correction is applied to longitude, so horizontal
/// distances are stretched away from the equator.
pub const METERS_PER_DEGREE: f64 = 111_320.0;

/// Range the UI keeps the camera zoom in.
pub const MIN_ZOOM: f64 = 0.1;
pub const MAX_ZOOM: f64 = 3.0;

/// Virtual camera over the flat city view.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraPose {
    /// Pan offset in planar meters
    pub pan_x: f64,
    pub pan_y: f64,
    /// Scale factor, must be positive
    pub zoom: f64,
    /// Clockwise rotation on screen, in degrees
    pub rotation_degrees: f64,
}

impl Default for CameraPose {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl CameraPose {
    /// No pan, unit zoom, no rotation.
    pub const IDENTITY: CameraPose = CameraPose {
        pan_x: 0.0,
        pan_y: 0.0,
        zoom: 1.0,
        rotation_degrees: 0.0,
    };

    pub fn with_zoom(zoom: f64) -> Self {
        Self {
            zoom,
            ..Self::IDENTITY
        }
    }

    fn pan(&self) -> DVec2 {
        DVec2::new(self.pan_x, self.pan_y)
    }
}

/// Planar offset of `point` from `center`, in meters.
pub fn planar_offset(point: GeoPoint, center: GeoPoint) -> DVec2 {
    DVec2::new(
        (point.longitude - center.longitude) * METERS_PER_DEGREE,
        (point.latitude - center.latitude) * METERS_PER_DEGREE,
    )
}

/// Projects a geographic point to a screen position.
///
/// Zoom is expected to be already clamped by the caller.
pub fn project(point: GeoPoint, center: GeoPoint, camera: &CameraPose, viewport: Vec2) -> Pos2 {
    let world = planar_offset(point, center);
    let translated = (world - camera.pan()) * camera.zoom;
    let rotated = DVec2::from_angle(camera.rotation_degrees.to_radians()).rotate(translated);
    let half = DVec2::new(viewport.x as f64, viewport.y as f64) / 2.0;
    let screen = half + rotated;
    Pos2::new(screen.x as f32, screen.y as f32)
}

/// Projects a `[longitude, latitude]` geometry coordinate.
pub fn project_coord(
    coord: Coord<f64>,
    center: GeoPoint,
    camera: &CameraPose,
    viewport: Vec2,
) -> Pos2 {
    project(GeoPoint::from_coord(coord), center, camera, viewport)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CENTER: GeoPoint = GeoPoint::new_unchecked(51.5115, -0.1200);

    fn viewport() -> Vec2 {
        Vec2::new(800.0, 600.0)
    }

    fn close(a: Pos2, b: Pos2, tolerance: f32) -> bool {
        (a.x - b.x).abs() < tolerance && (a.y - b.y).abs() < tolerance
    }

    #[test]
    fn test_center_maps_to_viewport_center() {
        let pos = project(CENTER, CENTER, &CameraPose::IDENTITY, viewport());
        assert_eq!(pos, Pos2::new(400.0, 300.0));
    }

    #[test]
    fn test_longitude_offset_example() {
        let point = GeoPoint::new_unchecked(51.5115, -0.1194);
        let pos = project(point, CENTER, &CameraPose::IDENTITY, viewport());
        assert!((pos.x - 466.8).abs() < 0.1, "x = {}", pos.x);
        assert!((pos.y - 300.0).abs() < 1e-3, "y = {}", pos.y);
    }

    #[test]
    fn test_projection_is_deterministic() {
        let camera = CameraPose {
            pan_x: 12.5,
            pan_y: -40.0,
            zoom: 1.7,
            rotation_degrees: 33.0,
        };
        let point = GeoPoint::new_unchecked(51.5131, -0.1172);
        let a = project(point, CENTER, &camera, viewport());
        let b = project(point, CENTER, &camera, viewport());
        assert_eq!(a, b);
    }

    #[test]
    fn test_full_turn_matches_no_rotation() {
        let point = GeoPoint::new_unchecked(51.5121, -0.1189);
        let base = CameraPose {
            pan_x: 5.0,
            pan_y: 3.0,
            zoom: 0.8,
            rotation_degrees: 0.0,
        };
        let turned = CameraPose {
            rotation_degrees: 360.0,
            ..base
        };
        let a = project(point, CENTER, &base, viewport());
        let b = project(point, CENTER, &turned, viewport());
        assert!(close(a, b, 1e-3), "{a:?} vs {b:?}");
    }

    #[test]
    fn test_quarter_turn_rotates_x_into_y() {
        let point = GeoPoint::new_unchecked(51.5115, -0.1194);
        let camera = CameraPose {
            rotation_degrees: 90.0,
            ..CameraPose::IDENTITY
        };
        let pos = project(point, CENTER, &camera, viewport());
        assert!((pos.x - 400.0).abs() < 1e-3);
        assert!((pos.y - 366.8).abs() < 0.1);
    }

    #[test]
    fn test_pan_is_subtracted_before_zoom() {
        let camera = CameraPose {
            pan_x: 10.0,
            pan_y: 0.0,
            zoom: 2.0,
            rotation_degrees: 0.0,
        };
        let pos = project(CENTER, CENTER, &camera, viewport());
        assert!((pos.x - 380.0).abs() < 1e-3);
        assert!((pos.y - 300.0).abs() < 1e-3);
    }

    #[test]
    fn test_latitude_grows_downward() {
        let north = GeoPoint::new_unchecked(51.5125, -0.1200);
        let pos = project(north, CENTER, &CameraPose::IDENTITY, viewport());
        assert!(pos.y > 300.0);
    }
}
