//! Geographic computations and map drawing.
//!
//! This module holds the distance filter used to find nearby clubs, the
//! camera projection used by the city outline, city geometry loading and the
//! club map region.

pub mod city;
mod clubs;
pub mod distance;
mod point;
pub mod projection;
mod region;
pub mod renderer;

pub use city::{BoundingBox, CityGeometry, ElementLimits};
pub use clubs::{filter_clubs_by_radius, london_catalog, PadelClub};
pub use distance::filter_by_radius;
pub use point::{GeoPoint, PointOfInterest};
pub use projection::CameraPose;
pub use region::{ClubMarker, MapRegion, RegionProjection};
