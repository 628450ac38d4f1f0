//! City camera gestures.
//!
//! Pointer and touch input is turned into discrete `GestureEvent`s and folded
//! into the next `CameraPose` by a pure reducer, so a recorded list of events
//! always replays to the same pose.

use crate::geo::projection::{MAX_ZOOM, MIN_ZOOM};
use crate::geo::CameraPose;

/// Planar meters panned per pixel dragged.
const PAN_PER_PIXEL: f64 = 2.0;
/// Degrees rotated per horizontal pixel dragged.
const ROTATION_PER_PIXEL: f64 = 0.1;
/// Zoom change per pixel of two-finger movement.
const ZOOM_PER_PIXEL: f64 = 0.01;

/// A discrete camera input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureEvent {
    /// One-finger drag: pans against the drag and rotates with horizontal motion.
    Drag { dx: f64, dy: f64 },
    /// Two-finger vertical motion: zooms in as the fingers move down.
    Pinch { dy: f64 },
    /// Return to the home pose.
    Reset,
}

/// Next pose after `event`. Zoom always stays inside `[MIN_ZOOM, MAX_ZOOM]`.
pub fn reduce(pose: CameraPose, event: GestureEvent, home: CameraPose) -> CameraPose {
    match event {
        GestureEvent::Drag { dx, dy } => CameraPose {
            pan_x: pose.pan_x - dx * PAN_PER_PIXEL,
            pan_y: pose.pan_y - dy * PAN_PER_PIXEL,
            rotation_degrees: pose.rotation_degrees + dx * ROTATION_PER_PIXEL,
            ..pose
        },
        GestureEvent::Pinch { dy } => CameraPose {
            zoom: (pose.zoom + dy * ZOOM_PER_PIXEL).clamp(MIN_ZOOM, MAX_ZOOM),
            ..pose
        },
        GestureEvent::Reset => home,
    }
}

/// Camera pose plus the pose it resets to.
#[derive(Debug, Clone, PartialEq)]
pub struct CameraState {
    pub pose: CameraPose,
    pub home: CameraPose,
}

impl CameraState {
    pub fn new(home: CameraPose) -> Self {
        Self { pose: home, home }
    }

    pub fn apply(&mut self, event: GestureEvent) {
        self.pose = reduce(self.pose, event, self.home);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn home() -> CameraPose {
        CameraPose::with_zoom(0.8)
    }

    #[test]
    fn test_drag_pans_and_rotates() {
        let pose = reduce(home(), GestureEvent::Drag { dx: 10.0, dy: -5.0 }, home());
        assert_eq!(pose.pan_x, -20.0);
        assert_eq!(pose.pan_y, 10.0);
        assert!((pose.rotation_degrees - 1.0).abs() < 1e-12);
        assert_eq!(pose.zoom, 0.8);
    }

    #[test]
    fn test_pinch_clamps_zoom() {
        let zoomed_in = reduce(home(), GestureEvent::Pinch { dy: 10_000.0 }, home());
        assert_eq!(zoomed_in.zoom, MAX_ZOOM);

        let zoomed_out = reduce(home(), GestureEvent::Pinch { dy: -10_000.0 }, home());
        assert_eq!(zoomed_out.zoom, MIN_ZOOM);

        let nudged = reduce(home(), GestureEvent::Pinch { dy: 20.0 }, home());
        assert!((nudged.zoom - 1.0).abs() < 1e-12);
        assert_eq!(nudged.pan_x, 0.0);
    }

    #[test]
    fn test_reset_returns_home() {
        let mut camera = CameraState::new(home());
        camera.apply(GestureEvent::Drag { dx: 3.0, dy: 4.0 });
        camera.apply(GestureEvent::Pinch { dy: 50.0 });
        assert_ne!(camera.pose, home());

        camera.apply(GestureEvent::Reset);
        assert_eq!(camera.pose, home());
    }

    #[test]
    fn test_replay_is_deterministic() {
        let events = [
            GestureEvent::Drag { dx: 12.0, dy: 1.0 },
            GestureEvent::Pinch { dy: -15.0 },
            GestureEvent::Drag { dx: -4.0, dy: 9.0 },
        ];
        let replay = || {
            events
                .iter()
                .fold(home(), |pose, event| reduce(pose, *event, home()))
        };
        let a = replay();
        let b = replay();
        assert_eq!(a, b);

        let mut live = CameraState::new(home());
        for event in events {
            live.apply(event);
        }
        assert_eq!(live.pose, a);
    }
}
