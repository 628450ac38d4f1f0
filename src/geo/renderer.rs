//! City outline rendering.
//!
//! Projection into screen-space shapes is kept separate from painting so the
//! shapes can be checked without a painter. Height is shown through color
//! only; nothing is extruded.

use super::city::{Building, CityGeometry, Road, Tree};
use super::projection::{project_coord, CameraPose};
use super::GeoPoint;
use eframe::egui::{Color32, Mesh, Painter, Pos2, Rect, Shape, Stroke, Vec2};

/// Buildings taller than this get a dashed outline.
const DASHED_OUTLINE_MIN_HEIGHT_M: f64 = 30.0;
/// Tree markers never shrink below this radius in pixels.
pub const MIN_TREE_RADIUS: f32 = 2.0;
/// Tree marker radius at zoom 1.
const TREE_BASE_RADIUS: f32 = 6.0;

const ROAD_COLOR: Color32 = Color32::from_rgba_premultiplied(72, 72, 72, 178);
const TREE_FILL: Color32 = Color32::from_rgba_premultiplied(27, 111, 27, 204);
const TREE_STROKE: Color32 = Color32::from_rgb(20, 82, 20);

/// Height-derived colors for one building.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BuildingStyle {
    pub hue: f64,
    pub lightness: f64,
    pub fill: Color32,
    pub stroke: Color32,
    pub dashed_outline: bool,
}

/// Shading for a building of the given height.
pub fn building_style(height_m: f64) -> BuildingStyle {
    let hue = 200.0 + height_m * 2.0;
    let lightness = (40.0 + height_m * 0.5).clamp(30.0, 70.0);
    BuildingStyle {
        hue,
        lightness,
        fill: hsl_color(hue, 60.0, lightness, 0.8),
        stroke: hsl_color(hue, 80.0, (lightness + 20.0).min(90.0), 1.0),
        dashed_outline: height_m > DASHED_OUTLINE_MIN_HEIGHT_M,
    }
}

/// Converts CSS-style HSL (degrees, percent, percent) to a color.
pub fn hsl_color(hue: f64, saturation: f64, lightness: f64, alpha: f32) -> Color32 {
    let h = hue.rem_euclid(360.0) / 360.0;
    let s = (saturation / 100.0).clamp(0.0, 1.0);
    let l = (lightness / 100.0).clamp(0.0, 1.0);

    let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let p = 2.0 * l - q;
    let channel = |t: f64| {
        let t = t.rem_euclid(1.0);
        let v = if t < 1.0 / 6.0 {
            p + (q - p) * 6.0 * t
        } else if t < 0.5 {
            q
        } else if t < 2.0 / 3.0 {
            p + (q - p) * (2.0 / 3.0 - t) * 6.0
        } else {
            p
        };
        (v * 255.0).round() as u8
    };

    Color32::from_rgba_unmultiplied(
        channel(h + 1.0 / 3.0),
        channel(h),
        channel(h - 1.0 / 3.0),
        (alpha.clamp(0.0, 1.0) * 255.0).round() as u8,
    )
}

/// Tree marker radius for the given zoom.
pub fn tree_radius(zoom: f64) -> f32 {
    (TREE_BASE_RADIUS * zoom as f32).max(MIN_TREE_RADIUS)
}

/// A building footprint in screen space.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectedBuilding {
    /// Vertices in footprint order; the ring is closed when drawn
    pub outline: Vec<Pos2>,
    pub style: BuildingStyle,
}

/// A tree marker in screen space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectedTree {
    pub center: Pos2,
    pub radius: f32,
}

pub fn project_building(
    building: &Building,
    center: GeoPoint,
    camera: &CameraPose,
    viewport: Vec2,
) -> ProjectedBuilding {
    ProjectedBuilding {
        outline: building
            .footprint
            .iter()
            .map(|c| project_coord(*c, center, camera, viewport))
            .collect(),
        style: building_style(building.height_m),
    }
}

pub fn project_road(
    road: &Road,
    center: GeoPoint,
    camera: &CameraPose,
    viewport: Vec2,
) -> Vec<Pos2> {
    road.centerline
        .iter()
        .map(|c| project_coord(*c, center, camera, viewport))
        .collect()
}

pub fn project_tree(
    tree: &Tree,
    center: GeoPoint,
    camera: &CameraPose,
    viewport: Vec2,
) -> ProjectedTree {
    ProjectedTree {
        center: project_coord(tree.position, center, camera, viewport),
        radius: tree_radius(camera.zoom),
    }
}

/// Splits a footprint ring into fill triangles. Works for concave rings;
/// returns nothing when the ring cannot be triangulated.
pub fn fill_triangles(outline: &[Pos2]) -> Vec<[u32; 3]> {
    if outline.len() < 3 {
        return Vec::new();
    }
    let flat: Vec<f64> = outline
        .iter()
        .flat_map(|p| [p.x as f64, p.y as f64])
        .collect();

    match earcutr::earcut(&flat, &[], 2) {
        Ok(indices) => indices
            .chunks_exact(3)
            .map(|t| [t[0] as u32, t[1] as u32, t[2] as u32])
            .collect(),
        Err(_) => {
            log::debug!("Footprint with {} vertices could not be triangulated", outline.len());
            Vec::new()
        }
    }
}

/// Paints the whole city into `rect`: roads first, then buildings, then trees.
pub fn render_city(
    painter: &Painter,
    city: &CityGeometry,
    center: GeoPoint,
    camera: &CameraPose,
    rect: Rect,
) {
    let viewport = rect.size();
    let offset = rect.min.to_vec2();

    for road in &city.roads {
        let points: Vec<Pos2> = project_road(road, center, camera, viewport)
            .into_iter()
            .map(|p| p + offset)
            .collect();
        if points.len() >= 2 {
            painter.add(Shape::line(points, Stroke::new(3.0, ROAD_COLOR)));
        }
    }

    for building in &city.buildings {
        let mut projected = project_building(building, center, camera, viewport);
        for p in &mut projected.outline {
            *p += offset;
        }
        render_building(painter, &projected);
    }

    for tree in &city.trees {
        let projected = project_tree(tree, center, camera, viewport);
        let pos = projected.center + offset;
        painter.circle_filled(pos, projected.radius, TREE_FILL);
        painter.circle_stroke(pos, projected.radius, Stroke::new(1.0, TREE_STROKE));
    }
}

fn render_building(painter: &Painter, building: &ProjectedBuilding) {
    if building.outline.len() < 3 {
        return;
    }

    let style = building.style;
    let mut mesh = Mesh::default();
    for &pos in &building.outline {
        mesh.colored_vertex(pos, style.fill);
    }
    for [a, b, c] in fill_triangles(&building.outline) {
        mesh.add_triangle(a, b, c);
    }
    if !mesh.indices.is_empty() {
        painter.add(Shape::mesh(mesh));
    }
    painter.add(Shape::closed_line(
        building.outline.clone(),
        Stroke::new(2.0, style.stroke),
    ));

    let outline_color = Color32::from_rgba_unmultiplied(255, 255, 255, 230);
    let mut ring = building.outline.clone();
    ring.push(building.outline[0]);

    if style.dashed_outline {
        painter.extend(Shape::dashed_line(
            &ring,
            Stroke::new(1.0, outline_color),
            5.0,
            3.0,
        ));
    } else {
        painter.add(Shape::line(ring, Stroke::new(1.0, outline_color)));
    }
}
