//! City outline canvas: pseudo-3D buildings, roads and trees under a
//! gesture-driven camera.

use super::colors;
use crate::geo::renderer::render_city;
use crate::state::{CityViewState, GestureEvent, LoadPhase};
use eframe::egui::{self, Rect, RichText, Sense, Vec2};

/// Pinch-equivalent pixels per pixel of mouse wheel scroll.
const SCROLL_TO_PINCH: f64 = 0.2;
/// Pinch-equivalent pixels per unit of touch zoom factor.
const ZOOM_TO_PINCH: f64 = 100.0;

/// Renders the city view. Returns true when the user asked for a reload.
pub fn render_city_canvas(ctx: &egui::Context, city: &mut CityViewState) -> bool {
    let mut reload = false;

    egui::CentralPanel::default().show(ctx, |ui| {
        let available_size = ui.available_size();
        let (response, painter) = ui.allocate_painter(available_size, Sense::click_and_drag());
        let rect = response.rect;

        painter.rect_filled(rect, 0.0, colors::city::BACKGROUND);

        if city.is_renderable() {
            if city.geometry.is_empty() {
                painter.text(
                    rect.center(),
                    egui::Align2::CENTER_CENTER,
                    "No map data in this area",
                    egui::FontId::proportional(14.0),
                    colors::city::INFO_TEXT,
                );
            } else {
                render_city(&painter, &city.geometry, city.center, &city.camera.pose, rect);
            }
        }

        if city.phase == LoadPhase::Loading {
            draw_loading(ui, rect);
        }

        if let Some(notice) = city.notice() {
            reload |= draw_error_banner(ui, rect, notice);
        }

        draw_info_panel(ui, &rect, city);

        for event in gesture_events(&response) {
            city.camera.apply(event);
        }
    });

    reload
}

/// Turns this frame's pointer input into camera gestures.
fn gesture_events(response: &egui::Response) -> Vec<GestureEvent> {
    let mut events = Vec::new();

    if response.double_clicked() {
        events.push(GestureEvent::Reset);
        return events;
    }

    if response.dragged() {
        let delta = response.drag_delta();
        if delta != Vec2::ZERO {
            events.push(GestureEvent::Drag {
                dx: delta.x as f64,
                dy: delta.y as f64,
            });
        }
    }

    if response.hovered() {
        let (scroll, zoom) = response
            .ctx
            .input(|i| (i.raw_scroll_delta, i.zoom_delta()));
        let dy = pinch_distance(scroll.y, zoom);
        if dy != 0.0 {
            events.push(GestureEvent::Pinch { dy });
        }
    }

    events
}

/// Pinch-equivalent distance for one frame of wheel and zoom input.
///
/// egui also reports Ctrl+wheel as a zoom, so the wheel term only counts
/// when no zoom is reported.
fn pinch_distance(scroll_y: f32, zoom_delta: f32) -> f64 {
    if zoom_delta != 1.0 {
        (zoom_delta as f64 - 1.0) * ZOOM_TO_PINCH
    } else {
        scroll_y as f64 * SCROLL_TO_PINCH
    }
}

fn draw_loading(ui: &mut egui::Ui, rect: Rect) {
    let area = Rect::from_center_size(rect.center(), Vec2::new(220.0, 60.0));
    ui.scope_builder(egui::UiBuilder::new().max_rect(area), |ui| {
        ui.vertical_centered(|ui| {
            ui.spinner();
            ui.label(
                RichText::new(LoadPhase::Loading.label())
                    .color(colors::city::INFO_TEXT),
            );
        });
    });
}

/// Error banner along the top edge. Returns true if "Retry" was clicked.
fn draw_error_banner(ui: &mut egui::Ui, rect: Rect, notice: &str) -> bool {
    let banner = Rect::from_min_size(
        rect.left_top() + Vec2::new(10.0, 10.0),
        Vec2::new(rect.width() - 20.0, 28.0),
    );
    ui.painter()
        .rect_filled(banner, 6.0, colors::ui::FAILURE.gamma_multiply(0.85));

    let mut retry = false;
    ui.scope_builder(
        egui::UiBuilder::new().max_rect(banner.shrink2(Vec2::new(8.0, 4.0))),
        |ui| {
            ui.horizontal_centered(|ui| {
                ui.label(RichText::new(notice).color(egui::Color32::WHITE));
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    retry = ui.small_button("Retry").clicked();
                });
            });
        },
    );
    retry
}

fn draw_info_panel(ui: &mut egui::Ui, rect: &Rect, city: &CityViewState) {
    let size = Vec2::new(210.0, 104.0);
    let panel = Rect::from_min_size(rect.left_bottom() + Vec2::new(10.0, -size.y - 10.0), size);
    ui.painter()
        .rect_filled(panel, 8.0, colors::city::info_background());

    let pose = city.camera.pose;
    let lines = [
        city.label.clone(),
        format!("Buildings: {}", city.geometry.buildings.len()),
        format!("Roads: {}  Trees: {}", city.geometry.roads.len(), city.geometry.trees.len()),
        format!(
            "Zoom: {:.2}x  Rotation: {:.0}\u{00b0}",
            pose.zoom,
            pose.rotation_degrees.rem_euclid(360.0)
        ),
        format!("Status: {}", city.phase.label()),
    ];

    ui.scope_builder(egui::UiBuilder::new().max_rect(panel.shrink(8.0)), |ui| {
        ui.vertical(|ui| {
            for (i, line) in lines.into_iter().enumerate() {
                let text = RichText::new(line)
                    .monospace()
                    .size(11.0)
                    .color(colors::city::INFO_TEXT);
                ui.label(if i == 0 { text.strong() } else { text });
            }
        });
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wheel_scroll_maps_to_pinch() {
        assert!((pinch_distance(50.0, 1.0) - 10.0).abs() < 1e-9);
        assert_eq!(pinch_distance(0.0, 1.0), 0.0);
    }

    #[test]
    fn test_ctrl_scroll_counts_once() {
        // Ctrl+wheel arrives as both a scroll delta and a zoom factor.
        let dy = pinch_distance(50.0, 1.1);
        assert!((dy - 10.0).abs() < 1e-4);
    }

    #[test]
    fn test_touch_pinch_out_zooms_out() {
        assert!(pinch_distance(0.0, 0.9) < 0.0);
    }
}
