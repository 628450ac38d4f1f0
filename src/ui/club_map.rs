//! Club map canvas: club markers, user location and the search radius.

use super::colors;
use crate::geo::{GeoPoint, PadelClub, RegionProjection};
use crate::state::ClubSearchState;
use eframe::egui::{
    self, Align2, Color32, FontId, Painter, Pos2, Rect, RichText, Sense, Stroke, Vec2,
};

/// Marker radius in pixels.
const MARKER_RADIUS: f32 = 11.0;
/// Kilometers per degree of latitude.
const KM_PER_DEGREE: f64 = 111.32;

pub fn render_club_map(ctx: &egui::Context, clubs: &mut ClubSearchState) {
    egui::CentralPanel::default().show(ctx, |ui| {
        if let Some(notice) = clubs.notice.clone() {
            ui.horizontal(|ui| {
                ui.label(RichText::new(notice).color(colors::ui::NOTICE));
                if ui.small_button("Dismiss").clicked() {
                    clubs.dismiss_notice();
                }
            });
        }

        let available_size = ui.available_size();
        let (response, painter) = ui.allocate_painter(available_size, Sense::click_and_drag());
        let rect = response.rect;

        painter.rect_filled(rect, 0.0, colors::club_map::BACKGROUND);
        draw_grid(&painter, rect);

        let mut projection = RegionProjection::new(clubs.region, rect);
        projection.update(clubs.zoom, clubs.pan_offset, rect);

        draw_radius_circle(&painter, &projection, clubs.origin, clubs.radius_km);

        let hover_pos = response.hover_pos();
        let mut hovered: Option<&PadelClub> = None;

        for club in &clubs.visible_clubs {
            let pos = projection.point_to_screen(club.location());
            if !projection.is_on_screen(pos, MARKER_RADIUS) {
                continue;
            }
            let selected = clubs.selected_club.as_deref() == Some(club.id());
            draw_marker(&painter, pos, club.rating(), selected);

            if hover_pos.is_some_and(|p| p.distance(pos) <= MARKER_RADIUS) {
                hovered = Some(club);
            }
        }

        let user_pos = projection.point_to_screen(clubs.origin);
        let user_color = if clubs.is_located() {
            colors::club_map::USER
        } else {
            colors::ui::LABEL
        };
        painter.circle_filled(user_pos, 6.0, user_color);
        painter.circle_stroke(user_pos, 6.0, Stroke::new(2.0, Color32::WHITE));

        if let Some(pointer) = hover_pos {
            let coord = projection.screen_to_geo(pointer);
            painter.text(
                rect.left_bottom() + Vec2::new(8.0, -8.0),
                Align2::LEFT_BOTTOM,
                format!("{:.4}, {:.4}", coord.y, coord.x),
                FontId::monospace(11.0),
                colors::ui::LABEL,
            );
        }

        let hovered_id = hovered.map(|club| club.id().to_string());
        if let (Some(club), Some(pointer)) = (hovered, hover_pos) {
            draw_club_callout(&painter, rect, pointer, club);
        }

        handle_map_interaction(&response, &rect, clubs, hovered_id);
    });
}

fn draw_grid(painter: &Painter, rect: Rect) {
    const SPACING: f32 = 48.0;
    let stroke = Stroke::new(1.0, colors::club_map::GRID);

    let mut x = rect.left() + SPACING;
    while x < rect.right() {
        painter.line_segment([Pos2::new(x, rect.top()), Pos2::new(x, rect.bottom())], stroke);
        x += SPACING;
    }
    let mut y = rect.top() + SPACING;
    while y < rect.bottom() {
        painter.line_segment([Pos2::new(rect.left(), y), Pos2::new(rect.right(), y)], stroke);
        y += SPACING;
    }
}

fn draw_radius_circle(
    painter: &Painter,
    projection: &RegionProjection,
    origin: GeoPoint,
    radius_km: f64,
) {
    let center = projection.point_to_screen(origin);
    let north = GeoPoint::new_unchecked(
        (origin.latitude + radius_km / KM_PER_DEGREE).min(90.0),
        origin.longitude,
    );
    let radius_px = center.distance(projection.point_to_screen(north));

    painter.circle_filled(center, radius_px, colors::club_map::radius_fill());
    painter.circle_stroke(
        center,
        radius_px,
        Stroke::new(1.0, colors::club_map::MARKER.gamma_multiply(0.5)),
    );
}

fn draw_marker(painter: &Painter, pos: Pos2, rating: f64, selected: bool) {
    let fill = if selected {
        colors::club_map::MARKER_SELECTED
    } else {
        colors::club_map::MARKER
    };
    painter.circle_filled(pos, MARKER_RADIUS, fill);
    painter.circle_stroke(
        pos,
        MARKER_RADIUS,
        Stroke::new(2.0, colors::club_map::MARKER_STROKE),
    );

    // Rating badge
    painter.text(
        pos,
        Align2::CENTER_CENTER,
        format!("{:.1}", rating),
        FontId::proportional(9.0),
        colors::club_map::BADGE_TEXT,
    );
}

/// Hover callout with the club's name, description, rating and distance.
fn draw_club_callout(painter: &Painter, rect: Rect, pointer: Pos2, club: &PadelClub) {
    let marker = club.marker();
    let mut text = format!(
        "{}\n{}\n\u{2605} {:.1}",
        marker.title,
        marker.description,
        club.rating()
    );
    if let Some(distance) = club.distance_km() {
        text.push_str(&format!("  \u{2022}  {:.1} km away", distance));
    }

    let galley = painter.layout_no_wrap(text, FontId::proportional(12.0), Color32::WHITE);
    let padding = Vec2::splat(6.0);
    let size = galley.size() + padding * 2.0;

    // Keep the callout inside the canvas
    let mut min = pointer + Vec2::new(14.0, 14.0);
    min.x = min.x.min(rect.right() - size.x).max(rect.left());
    min.y = min.y.min(rect.bottom() - size.y).max(rect.top());
    let callout = Rect::from_min_size(min, size);

    painter.rect_filled(callout, 4.0, Color32::from_rgba_unmultiplied(20, 20, 30, 230));
    painter.galley(callout.min + padding, galley, Color32::WHITE);
}

/// Zoom multiplier for one frame of input. Ctrl+wheel is already reported
/// as `pinch`, so the wheel only counts when there is no pinch.
fn wheel_zoom_factor(scroll_y: f32, pinch: f32) -> f32 {
    if pinch != 1.0 {
        pinch
    } else {
        1.0 + scroll_y * 0.001
    }
}

fn handle_map_interaction(
    response: &egui::Response,
    rect: &Rect,
    clubs: &mut ClubSearchState,
    hovered_id: Option<String>,
) {
    // Handle dragging for panning
    if response.dragged() {
        clubs.pan_offset += response.drag_delta();
    }

    if response.hovered() {
        let (scroll_delta, pinch) = response
            .ctx
            .input(|i| (i.raw_scroll_delta, i.zoom_delta()));
        let zoom_factor = wheel_zoom_factor(scroll_delta.y, pinch);
        if zoom_factor != 1.0 {
            let old_zoom = clubs.zoom;
            let new_zoom = (old_zoom * zoom_factor).clamp(0.25, 20.0);

            // Keep the point under the cursor stationary
            if let Some(cursor_pos) = response.hover_pos() {
                let cursor_rel = cursor_pos - rect.center();
                let ratio = new_zoom / old_zoom;
                clubs.pan_offset = cursor_rel * (1.0 - ratio) + clubs.pan_offset * ratio;
            }

            clubs.zoom = new_zoom;
        }
    }

    if response.double_clicked() {
        clubs.fit_to_clubs();
    } else if response.clicked() {
        clubs.selected_club = hovered_id;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wheel_zoom_factor() {
        assert!((wheel_zoom_factor(100.0, 1.0) - 1.1).abs() < 1e-6);
        assert_eq!(wheel_zoom_factor(0.0, 1.0), 1.0);
    }

    #[test]
    fn test_ctrl_scroll_zoom_applied_once() {
        assert!((wheel_zoom_factor(100.0, 1.1) - 1.1).abs() < 1e-6);
        assert!((wheel_zoom_factor(-100.0, 0.9) - 0.9).abs() < 1e-6);
    }
}
