//! Top bar UI: app title, tab selection, and status.

use super::colors;
use crate::state::{AppState, Tab};
use eframe::egui::{self, Color32, RichText};

pub fn render_top_bar(ctx: &egui::Context, state: &mut AppState) {
    egui::TopBottomPanel::top("top_bar")
        .exact_height(36.0)
        .show(ctx, |ui| {
            ui.horizontal_centered(|ui| {
                ui.label(
                    RichText::new("Padel Map")
                        .strong()
                        .size(16.0)
                        .color(Color32::WHITE),
                );

                ui.separator();

                for tab in Tab::ALL {
                    let selected = state.active_tab == tab;
                    let text = RichText::new(tab.label()).size(13.0);
                    let text = if selected {
                        text.color(colors::ui::ACTIVE).strong()
                    } else {
                        text
                    };
                    if ui.selectable_label(selected, text).clicked() {
                        state.active_tab = tab;
                    }
                }

                ui.separator();

                // Status text
                ui.label(
                    RichText::new(&state.status_message)
                        .size(13.0)
                        .color(Color32::GRAY),
                );
            });
        });
}
