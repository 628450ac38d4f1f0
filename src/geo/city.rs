//! City outline geometry: buildings, roads and trees.
//!
//! Geometry comes from an Overpass API query around the city center. When the
//! query fails, a small ring of synthetic buildings stands in so the view
//! always has something to draw.

use super::projection::METERS_PER_DEGREE;
use super::GeoPoint;
use crate::error::PadelError;
use geo_types::Coord;
use rand::Rng;
use serde::Deserialize;
use std::collections::HashMap;

/// Highway values that are not drawn as roads.
const EXCLUDED_HIGHWAYS: &str =
    "footway|cycleway|path|steps|service|track|pedestrian|bridleway|construction";

/// Number of buildings in the synthetic fallback ring.
pub const FALLBACK_BUILDING_COUNT: usize = 15;
/// Index of the fallback building that carries a name.
const FALLBACK_NAMED_INDEX: usize = 7;
/// Side length of a fallback building footprint in meters.
const FALLBACK_FOOTPRINT_M: f64 = 8.0;

/// A building footprint with an estimated height.
#[derive(Debug, Clone, PartialEq)]
pub struct Building {
    pub id: String,
    /// Closed ring of `[longitude, latitude]` vertices, in source order
    pub footprint: Vec<Coord<f64>>,
    /// Height in meters, used for shading only
    pub height_m: f64,
    pub name: Option<String>,
}

/// A road centerline.
#[derive(Debug, Clone, PartialEq)]
pub struct Road {
    pub id: String,
    pub centerline: Vec<Coord<f64>>,
    pub name: Option<String>,
}

/// A single tree.
#[derive(Debug, Clone, PartialEq)]
pub struct Tree {
    pub id: String,
    pub position: Coord<f64>,
}

/// Everything drawn by the city view. Replaced wholesale on reload.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CityGeometry {
    pub buildings: Vec<Building>,
    pub roads: Vec<Road>,
    pub trees: Vec<Tree>,
}

impl CityGeometry {
    pub fn is_empty(&self) -> bool {
        self.buildings.is_empty() && self.roads.is_empty() && self.trees.is_empty()
    }
}

/// Maximum number of elements kept per kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElementLimits {
    pub buildings: usize,
    pub roads: usize,
    pub trees: usize,
}

impl Default for ElementLimits {
    fn default() -> Self {
        Self {
            buildings: 50,
            roads: 25,
            trees: 20,
        }
    }
}

/// Latitude/longitude rectangle used to scope the geometry query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub south: f64,
    pub west: f64,
    pub north: f64,
    pub east: f64,
}

impl BoundingBox {
    /// Box extending `lat_half` and `lon_half` degrees around `center`.
    pub fn around(center: GeoPoint, lat_half: f64, lon_half: f64) -> Self {
        Self {
            south: center.latitude - lat_half,
            west: center.longitude - lon_half,
            north: center.latitude + lat_half,
            east: center.longitude + lon_half,
        }
    }

    /// Default query area around the city center.
    pub fn city_block(center: GeoPoint) -> Self {
        Self::around(center, 0.005, 0.006)
    }

    /// Overpass `south,west,north,east` filter string.
    pub fn to_overpass(&self) -> String {
        format!("{},{},{},{}", self.south, self.west, self.north, self.east)
    }
}

/// Builds the Overpass QL query for buildings, drivable roads and trees.
pub fn overpass_query(bbox: &BoundingBox) -> String {
    let bbox = bbox.to_overpass();
    format!(
        r#"
[out:json][timeout:30];
(
  way["building"]({bbox});
  way["highway"]["highway"!~"{EXCLUDED_HIGHWAYS}"]({bbox});
  node["natural"="tree"]({bbox});
);
out geom;
"#
    )
}

#[derive(Debug, Deserialize)]
struct OverpassResponse {
    elements: Vec<OverpassElement>,
}

#[derive(Debug, Deserialize)]
struct OverpassElement {
    #[serde(rename = "type")]
    kind: String,
    id: Option<u64>,
    #[serde(default)]
    tags: HashMap<String, String>,
    #[serde(default)]
    geometry: Vec<LatLon>,
    lat: Option<f64>,
    lon: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct LatLon {
    lat: f64,
    lon: f64,
}

impl OverpassElement {
    fn coords(&self) -> Vec<Coord<f64>> {
        self.geometry
            .iter()
            .map(|p| Coord { x: p.lon, y: p.lat })
            .collect()
    }

    fn id_or(&self, prefix: &str, idx: usize) -> String {
        self.id
            .map(|id| id.to_string())
            .unwrap_or_else(|| format!("{}-{}", prefix, idx))
    }

    fn name(&self) -> Option<String> {
        self.tags.get("name").cloned()
    }

    fn has_tag(&self, key: &str) -> bool {
        self.tags.get(key).is_some_and(|v| !v.is_empty())
    }
}

/// Estimated height: 4 m per level plus up to 8 m of jitter on a 5 m base.
///
/// Buildings without a numeric `building:levels` tag get 1 to 12 levels.
fn estimate_height<R: Rng + ?Sized>(levels_tag: Option<&str>, rng: &mut R) -> f64 {
    let levels = levels_tag
        .and_then(|s| s.trim().parse::<f64>().ok())
        .filter(|l| l.is_finite())
        .unwrap_or_else(|| rng.random_range(1..=12) as f64);
    levels * 4.0 + rng.random::<f64>() * 8.0 + 5.0
}

/// Parses an Overpass JSON response into city geometry.
pub fn parse_overpass_response<R: Rng + ?Sized>(
    body: &str,
    limits: ElementLimits,
    rng: &mut R,
) -> Result<CityGeometry, PadelError> {
    let response: OverpassResponse = serde_json::from_str(body)?;
    let elements = response.elements;

    let buildings: Vec<Building> = elements
        .iter()
        .filter(|el| el.kind == "way" && el.has_tag("building") && el.geometry.len() > 2)
        .enumerate()
        .take(limits.buildings)
        .map(|(idx, el)| Building {
            id: el.id_or("building", idx),
            footprint: el.coords(),
            height_m: estimate_height(el.tags.get("building:levels").map(String::as_str), rng),
            name: el.name(),
        })
        .collect();

    let roads: Vec<Road> = elements
        .iter()
        .filter(|el| el.kind == "way" && el.has_tag("highway") && el.geometry.len() > 1)
        .enumerate()
        .take(limits.roads)
        .map(|(idx, el)| Road {
            id: el.id_or("road", idx),
            centerline: el.coords(),
            name: el.name(),
        })
        .collect();

    let trees: Vec<Tree> = elements
        .iter()
        .filter(|el| {
            el.kind == "node" && el.tags.get("natural").map(String::as_str) == Some("tree")
        })
        .filter_map(|el| Some((el, Coord { x: el.lon?, y: el.lat? })))
        .enumerate()
        .take(limits.trees)
        .map(|(idx, (el, position))| Tree {
            id: el.id_or("tree", idx),
            position,
        })
        .collect();

    log::debug!(
        "Parsed {} elements into {} buildings, {} roads, {} trees",
        elements.len(),
        buildings.len(),
        roads.len(),
        trees.len()
    );

    Ok(CityGeometry {
        buildings,
        roads,
        trees,
    })
}

/// Synthetic ring of square buildings around `center`.
///
/// Used when the geometry query fails. The same RNG state always yields the
/// same ring.
pub fn fallback_geometry<R: Rng + ?Sized>(center: GeoPoint, rng: &mut R) -> CityGeometry {
    let to_coord = |x: f64, y: f64| Coord {
        x: center.longitude + x / METERS_PER_DEGREE,
        y: center.latitude + y / METERS_PER_DEGREE,
    };

    let buildings = (0..FALLBACK_BUILDING_COUNT)
        .map(|i| {
            let angle = (i as f64 / FALLBACK_BUILDING_COUNT as f64) * std::f64::consts::TAU;
            let radius = 30.0 + rng.random::<f64>() * 60.0;
            let x = angle.cos() * radius;
            let y = angle.sin() * radius;
            let side = FALLBACK_FOOTPRINT_M;

            Building {
                id: format!("demo-{}", i),
                footprint: vec![
                    to_coord(x, y),
                    to_coord(x + side, y),
                    to_coord(x + side, y + side),
                    to_coord(x, y + side),
                ],
                height_m: rng.random::<f64>() * 80.0 + 10.0,
                name: (i == FALLBACK_NAMED_INDEX).then(|| "Demo Center".to_string()),
            }
        })
        .collect();

    CityGeometry {
        buildings,
        roads: Vec::new(),
        trees: Vec::new(),
    }
}
