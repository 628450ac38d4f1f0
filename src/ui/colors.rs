//! Centralized color constants for the UI.
//!
//! This module provides consistent colors across all UI panels.

use eframe::egui::Color32;

/// General UI colors for labels and values.
pub mod ui {
    use super::Color32;

    /// Muted gray for stat labels.
    pub const LABEL: Color32 = Color32::from_rgb(120, 120, 130);
    /// Slightly brighter for stat values.
    pub const VALUE: Color32 = Color32::from_rgb(200, 200, 210);
    /// Emphasized color for active states.
    pub const ACTIVE: Color32 = Color32::from_rgb(0, 122, 255);
    /// Success/positive indicator.
    pub const SUCCESS: Color32 = Color32::from_rgb(52, 199, 89);
    /// Failure/negative indicator.
    pub const FAILURE: Color32 = Color32::from_rgb(255, 59, 48);
    /// Non-blocking notice banner.
    pub const NOTICE: Color32 = Color32::from_rgb(255, 149, 0);
}

/// Colors for the club map.
pub mod club_map {
    use super::Color32;

    /// Map background.
    pub const BACKGROUND: Color32 = Color32::from_rgb(232, 236, 230);
    /// Faint grid over the background.
    pub const GRID: Color32 = Color32::from_rgb(214, 219, 212);
    /// Club marker fill.
    pub const MARKER: Color32 = Color32::from_rgb(0, 122, 255);
    /// Selected club marker fill.
    pub const MARKER_SELECTED: Color32 = Color32::from_rgb(255, 149, 0);
    /// Marker border.
    pub const MARKER_STROKE: Color32 = Color32::WHITE;
    /// Rating badge text.
    pub const BADGE_TEXT: Color32 = Color32::WHITE;
    /// User location dot.
    pub const USER: Color32 = Color32::from_rgb(52, 199, 89);

    /// Search radius circle - requires alpha, use function.
    pub fn radius_fill() -> Color32 {
        Color32::from_rgba_unmultiplied(0, 122, 255, 20)
    }
}

/// Colors for the city outline canvas.
pub mod city {
    use super::Color32;

    /// Canvas background.
    pub const BACKGROUND: Color32 = Color32::from_rgb(26, 26, 46);
    /// Overlay text.
    pub const INFO_TEXT: Color32 = Color32::from_rgb(200, 200, 220);

    /// Info panel backdrop - requires alpha, use function.
    pub fn info_background() -> Color32 {
        Color32::from_rgba_unmultiplied(0, 0, 0, 180)
    }
}

/// Colors for profile cards.
pub mod profile {
    use super::Color32;

    /// Card background.
    pub const CARD: Color32 = Color32::from_rgb(40, 40, 52);
    /// Achievement banner.
    pub const ACHIEVEMENT: Color32 = Color32::from_rgb(255, 215, 0);
}
