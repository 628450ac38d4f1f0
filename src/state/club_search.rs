//! Club search state: reference location, search radius and the clubs
//! visible on the map.

use crate::config::AppConfig;
use crate::geo::{filter_clubs_by_radius, GeoPoint, MapRegion, PadelClub};
use crate::location::LocationResult;
use eframe::egui::Vec2;

/// Padding added around fitted clubs, as a fraction of their span.
const FIT_PADDING: f64 = 0.15;

/// Where the reference location came from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LocationStatus {
    /// Waiting for the device location.
    Pending,
    /// Device location in use.
    Located { accuracy_m: Option<f64> },
    /// Device location unavailable, fallback in use.
    Fallback,
}

/// State of the club map screen.
pub struct ClubSearchState {
    /// Full club catalog
    pub catalog: Vec<PadelClub>,

    /// Current search radius in kilometers
    pub radius_km: f64,

    /// Radius choices offered to the user
    pub radius_options: Vec<f64>,

    /// Reference location for distances
    pub origin: GeoPoint,

    /// Where `origin` came from
    pub status: LocationStatus,

    /// Clubs within the radius, with distances
    pub visible_clubs: Vec<PadelClub>,

    /// Region the map shows
    pub region: MapRegion,

    /// Non-blocking notice shown over the map
    pub notice: Option<String>,

    /// Map zoom (1.0 = whole region)
    pub zoom: f32,

    /// Map pan offset in pixels
    pub pan_offset: Vec2,

    /// Id of the club highlighted in the list
    pub selected_club: Option<String>,

    fallback_location: GeoPoint,
}

impl ClubSearchState {
    pub fn new(config: &AppConfig, catalog: Vec<PadelClub>) -> Self {
        let origin = config.fallback_location;
        let mut state = Self {
            catalog,
            radius_km: config.default_radius_km,
            radius_options: config.radius_options_km.clone(),
            origin,
            status: LocationStatus::Pending,
            visible_clubs: Vec::new(),
            region: MapRegion::around(origin),
            notice: None,
            zoom: 1.0,
            pan_offset: Vec2::ZERO,
            selected_club: None,
            fallback_location: config.fallback_location,
        };
        state.refresh();
        state
    }

    /// Takes the device location result, falling back to the configured
    /// location when it is unavailable, and fits the map to the clubs.
    pub fn apply_location(&mut self, result: LocationResult) {
        match result {
            Ok(location) => {
                log::info!(
                    "Device location {:.4},{:.4} (accuracy {:?} m)",
                    location.point.latitude,
                    location.point.longitude,
                    location.accuracy_m
                );
                self.origin = location.point;
                self.status = LocationStatus::Located {
                    accuracy_m: location.accuracy_m,
                };
                self.notice = None;
            }
            Err(e) => {
                log::warn!("Location unavailable, using fallback: {}", e);
                self.origin = self.fallback_location;
                self.status = LocationStatus::Fallback;
                self.notice = Some(e.user_notice().to_string());
            }
        }
        self.region = MapRegion::around(self.origin);
        self.refresh();
        self.fit_to_clubs();
    }

    /// Changes the search radius and re-fits the map to the clubs now in
    /// range. Non-positive or non-finite radii are ignored.
    pub fn set_radius(&mut self, radius_km: f64) {
        if !radius_km.is_finite() || radius_km <= 0.0 {
            log::warn!("Ignoring invalid radius {}", radius_km);
            return;
        }
        self.radius_km = radius_km;
        self.refresh();
        self.fit_to_clubs();
    }

    /// Recomputes the visible clubs from the origin and radius.
    pub fn refresh(&mut self) {
        self.visible_clubs = filter_clubs_by_radius(self.origin, &self.catalog, self.radius_km);
        if let Some(id) = &self.selected_club {
            if !self.visible_clubs.iter().any(|c| c.id() == id) {
                self.selected_club = None;
            }
        }
        log::debug!(
            "{} clubs within {} km of {:.4},{:.4}",
            self.visible_clubs.len(),
            self.radius_km,
            self.origin.latitude,
            self.origin.longitude
        );
    }

    /// Fits the map region to the visible clubs and the origin, and resets
    /// zoom and pan.
    pub fn fit_to_clubs(&mut self) {
        let points: Vec<GeoPoint> = self
            .visible_clubs
            .iter()
            .map(PadelClub::location)
            .chain(std::iter::once(self.origin))
            .collect();
        if let Some(region) = MapRegion::fitting(&points, FIT_PADDING) {
            self.region = region;
        }
        self.zoom = 1.0;
        self.pan_offset = Vec2::ZERO;
    }

    /// Text for the club counter.
    pub fn count_label(&self) -> String {
        match self.visible_clubs.len() {
            1 => "1 club found".to_string(),
            n => format!("{} clubs found", n),
        }
    }

    pub fn is_located(&self) -> bool {
        matches!(self.status, LocationStatus::Located { .. })
    }

    /// Clears the location notice.
    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }
}
