//! UI modules for the Padel Map application.
//!
//! The UI is split into distinct panels:
//! - Top bar: Title, tab selector, and status
//! - Clubs tab: side panel with radius controls and club list, club map canvas
//! - City tab: pseudo-3D city outline canvas
//! - Profile tab: player stats and recent matches

mod city_canvas;
mod club_map;
mod clubs_panel;
pub mod colors;
mod profile_panel;
mod top_bar;

pub use city_canvas::render_city_canvas;
pub use club_map::render_club_map;
pub use clubs_panel::render_clubs_panel;
pub use profile_panel::render_profile_panel;
pub use top_bar::render_top_bar;
