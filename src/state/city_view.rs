//! City outline view state.
//!
//! Tracks the geometry load lifecycle: `Idle -> Loading -> Ready | Failed`.
//! A failed load swaps in synthetic fallback buildings so the view always has
//! something to draw.

use super::camera::CameraState;
use crate::config::AppConfig;
use crate::error::PadelError;
use crate::geo::city::fallback_geometry;
use crate::geo::{BoundingBox, CameraPose, CityGeometry, GeoPoint};
use rand::Rng;

/// Phase of the geometry load.
#[derive(Default, Clone, Copy, PartialEq, Eq, Debug)]
pub enum LoadPhase {
    /// Nothing requested yet.
    #[default]
    Idle,
    /// Query in flight.
    Loading,
    /// Real geometry loaded.
    Ready,
    /// Query failed, fallback geometry shown.
    Failed,
}

impl LoadPhase {
    pub fn label(&self) -> &'static str {
        match self {
            LoadPhase::Idle => "Idle",
            LoadPhase::Loading => "Loading city outline...",
            LoadPhase::Ready => "Ready",
            LoadPhase::Failed => "Demo outline",
        }
    }
}

/// State of the city outline screen.
pub struct CityViewState {
    /// Current load phase
    pub phase: LoadPhase,

    /// Geographic center of the view
    pub center: GeoPoint,

    /// Place name shown in the info panel
    pub label: String,

    /// Geometry currently drawn
    pub geometry: CityGeometry,

    /// Error from the last failed load
    pub error: Option<PadelError>,

    /// Camera over the outline
    pub camera: CameraState,
}

impl CityViewState {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            phase: LoadPhase::Idle,
            center: config.city_center,
            label: config.city_label.clone(),
            geometry: CityGeometry::default(),
            error: None,
            camera: CameraState::new(CameraPose::with_zoom(config.initial_city_zoom)),
        }
    }

    /// Area covered by the geometry query.
    pub fn query_bbox(&self) -> BoundingBox {
        BoundingBox::city_block(self.center)
    }

    /// Enters `Loading`. Returns false if a load is already in flight.
    pub fn begin_loading(&mut self) -> bool {
        if self.phase == LoadPhase::Loading {
            return false;
        }
        self.phase = LoadPhase::Loading;
        self.error = None;
        true
    }

    /// Completes the in-flight load.
    ///
    /// On failure the geometry is replaced with the fallback ring drawn from
    /// `rng`. Results arriving outside `Loading` are ignored and false is
    /// returned.
    pub fn finish<R: Rng + ?Sized>(
        &mut self,
        result: Result<CityGeometry, PadelError>,
        rng: &mut R,
    ) -> bool {
        if self.phase != LoadPhase::Loading {
            log::warn!("Ignoring geometry result in phase {:?}", self.phase);
            return false;
        }

        match result {
            Ok(geometry) => {
                log::info!(
                    "City geometry ready: {} buildings, {} roads, {} trees",
                    geometry.buildings.len(),
                    geometry.roads.len(),
                    geometry.trees.len()
                );
                self.geometry = geometry;
                self.phase = LoadPhase::Ready;
            }
            Err(e) => {
                log::warn!("City geometry failed, using fallback: {}", e);
                self.geometry = fallback_geometry(self.center, rng);
                self.error = Some(e);
                self.phase = LoadPhase::Failed;
            }
        }
        true
    }

    /// Notice shown over the view, if any.
    pub fn notice(&self) -> Option<&'static str> {
        self.error.as_ref().map(PadelError::user_notice)
    }

    /// Whether the canvas should draw geometry.
    pub fn is_renderable(&self) -> bool {
        matches!(self.phase, LoadPhase::Ready | LoadPhase::Failed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::city::{Tree, FALLBACK_BUILDING_COUNT};
    use geo_types::Coord;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn state() -> CityViewState {
        CityViewState::new(&AppConfig::default())
    }

    #[test]
    fn test_starts_idle() {
        let city = state();
        assert_eq!(city.phase, LoadPhase::Idle);
        assert!(!city.is_renderable());
        assert_eq!(city.camera.pose.zoom, 0.8);
    }

    #[test]
    fn test_success_path() {
        let mut city = state();
        assert!(city.begin_loading());
        assert!(!city.begin_loading());

        let geometry = CityGeometry {
            trees: vec![Tree {
                id: "1".to_string(),
                position: Coord { x: -0.12, y: 51.51 },
            }],
            ..Default::default()
        };
        let mut rng = StdRng::seed_from_u64(0);
        assert!(city.finish(Ok(geometry.clone()), &mut rng));
        assert_eq!(city.phase, LoadPhase::Ready);
        assert_eq!(city.geometry, geometry);
        assert!(city.notice().is_none());
    }

    #[test]
    fn test_failure_substitutes_fallback() {
        let mut city = state();
        city.begin_loading();
        let mut rng = StdRng::seed_from_u64(3);
        city.finish(
            Err(PadelError::DataFetchFailed("HTTP 504".to_string())),
            &mut rng,
        );

        assert_eq!(city.phase, LoadPhase::Failed);
        assert!(city.is_renderable());
        assert_eq!(city.geometry.buildings.len(), FALLBACK_BUILDING_COUNT);
        assert_eq!(
            city.notice(),
            Some("Failed to load real data. Showing demo city outline.")
        );
    }

    #[test]
    fn test_result_outside_loading_ignored() {
        let mut city = state();
        let mut rng = StdRng::seed_from_u64(0);
        assert!(!city.finish(Ok(CityGeometry::default()), &mut rng));
        assert_eq!(city.phase, LoadPhase::Idle);

        city.begin_loading();
        city.finish(Ok(CityGeometry::default()), &mut rng);
        assert!(!city.finish(
            Err(PadelError::DataFetchFailed("late".to_string())),
            &mut rng
        ));
        assert_eq!(city.phase, LoadPhase::Ready);
    }

    #[test]
    fn test_reload_clears_error() {
        let mut city = state();
        let mut rng = StdRng::seed_from_u64(0);
        city.begin_loading();
        city.finish(Err(PadelError::DataFetchFailed("x".to_string())), &mut rng);
        assert!(city.begin_loading());
        assert!(city.error.is_none());
    }
}
