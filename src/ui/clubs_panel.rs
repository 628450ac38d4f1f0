//! Clubs side panel: search radius, club count and the club list.

use super::colors;
use crate::state::{ClubSearchState, LocationStatus};
use eframe::egui::{self, RichText, ScrollArea};

pub fn render_clubs_panel(ctx: &egui::Context, clubs: &mut ClubSearchState) {
    egui::SidePanel::left("clubs_panel")
        .resizable(true)
        .default_width(260.0)
        .min_width(200.0)
        .max_width(400.0)
        .show(ctx, |ui| {
            ui.heading("Nearby Clubs");
            ui.separator();

            render_location_section(ui, clubs);
            ui.add_space(8.0);

            render_radius_section(ui, clubs);
            ui.add_space(8.0);

            ui.horizontal(|ui| {
                ui.label(
                    RichText::new(clubs.count_label())
                        .strong()
                        .color(colors::ui::VALUE),
                );
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("Fit All Clubs").clicked() {
                        clubs.fit_to_clubs();
                    }
                });
            });

            ui.separator();
            render_club_list(ui, clubs);
        });
}

fn render_location_section(ui: &mut egui::Ui, clubs: &ClubSearchState) {
    match clubs.status {
        LocationStatus::Pending => {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label("Finding your location...");
            });
        }
        LocationStatus::Located { accuracy_m } => {
            ui.label(RichText::new("\u{2713} Using your location").color(colors::ui::SUCCESS));
            if let Some(accuracy) = accuracy_m {
                ui.label(
                    RichText::new(format!("Accuracy \u{00b1}{:.0} m", accuracy))
                        .small()
                        .color(colors::ui::LABEL),
                );
            }
        }
        LocationStatus::Fallback => {
            ui.label(RichText::new("Showing Central London").color(colors::ui::NOTICE));
        }
    }
}

fn render_radius_section(ui: &mut egui::Ui, clubs: &mut ClubSearchState) {
    ui.label(RichText::new("Search radius").small().color(colors::ui::LABEL));

    let mut chosen = None;
    ui.horizontal_wrapped(|ui| {
        for &radius in &clubs.radius_options {
            let selected = (clubs.radius_km - radius).abs() < f64::EPSILON;
            if ui
                .selectable_label(selected, format!("{} km", radius))
                .clicked()
            {
                chosen = Some(radius);
            }
        }
    });

    if let Some(radius) = chosen {
        clubs.set_radius(radius);
    }
}

fn render_club_list(ui: &mut egui::Ui, clubs: &mut ClubSearchState) {
    let mut clicked = None;

    ScrollArea::vertical().show(ui, |ui| {
        for club in &clubs.visible_clubs {
            let selected = clubs.selected_club.as_deref() == Some(club.id());
            ui.group(|ui| {
                ui.set_width(ui.available_width());
                let title = RichText::new(club.name()).strong();
                if ui.selectable_label(selected, title).clicked() {
                    clicked = Some(club.id().to_string());
                }
                ui.label(RichText::new(&club.description).small());
                ui.horizontal(|ui| {
                    ui.label(
                        RichText::new(format!("\u{2605} {:.1}", club.rating()))
                            .color(colors::profile::ACHIEVEMENT),
                    );
                    if let Some(distance) = club.distance_km() {
                        ui.label(
                            RichText::new(format!("{:.1} km", distance))
                                .color(colors::ui::LABEL),
                        );
                    }
                });
            });
        }
    });

    if let Some(id) = clicked {
        clubs.selected_club = if clubs.selected_club.as_deref() == Some(id.as_str()) {
            None
        } else {
            Some(id)
        };
    }
}
