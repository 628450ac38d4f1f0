//! Application state management.
//!
//! This module contains all state structures used throughout the application.
//! Each tab owns its own sub-state; the root `AppState` is passed by `&mut`
//! to the UI and update code.

pub mod camera;
mod city_view;
mod club_search;
mod profile;

pub use camera::{CameraState, GestureEvent};
pub use city_view::{CityViewState, LoadPhase};
pub use club_search::{ClubSearchState, LocationStatus};
pub use profile::{MatchPerformance, MatchResult, UserProfile};

use crate::config::AppConfig;
use crate::geo::london_catalog;

/// Top-level screen.
#[derive(Default, Clone, Copy, PartialEq, Eq, Debug)]
pub enum Tab {
    #[default]
    Clubs,
    City,
    Profile,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Tab::Clubs, Tab::City, Tab::Profile];

    pub fn label(&self) -> &'static str {
        match self {
            Tab::Clubs => "Clubs",
            Tab::City => "City",
            Tab::Profile => "Profile",
        }
    }
}

/// Root application state containing all sub-states.
pub struct AppState {
    /// Screen currently shown
    pub active_tab: Tab,

    /// Club map search
    pub clubs: ClubSearchState,

    /// City outline view
    pub city: CityViewState,

    /// Player profile
    pub profile: UserProfile,

    /// Application status message displayed in top bar
    pub status_message: String,
}

impl AppState {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            active_tab: Tab::default(),
            clubs: ClubSearchState::new(config, london_catalog()),
            city: CityViewState::new(config),
            profile: UserProfile::demo(),
            status_message: "Locating...".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_defaults() {
        let state = AppState::new(&AppConfig::default());
        assert_eq!(state.active_tab, Tab::Clubs);
        assert_eq!(state.city.phase, LoadPhase::Idle);
        assert_eq!(state.clubs.status, LocationStatus::Pending);
        assert_eq!(state.profile.name, "Alex Thompson");
    }

    #[test]
    fn test_tab_labels() {
        let labels: Vec<&str> = Tab::ALL.iter().map(Tab::label).collect();
        assert_eq!(labels, ["Clubs", "City", "Profile"]);
    }
}
