//! Profile tab: player summary, stats and recent matches.

use super::colors;
use crate::state::{MatchPerformance, MatchResult, UserProfile};
use eframe::egui::{self, Color32, Frame, RichText, ScrollArea};

pub fn render_profile_panel(ctx: &egui::Context, profile: &UserProfile) {
    egui::CentralPanel::default().show(ctx, |ui| {
        ScrollArea::vertical().show(ui, |ui| {
            ui.heading(&profile.name);
            ui.label(
                RichText::new(format!("\u{1f4cd} {}", profile.location))
                    .color(colors::ui::VALUE),
            );
            ui.label(
                RichText::new(format!("Member since {}", profile.member_since))
                    .small()
                    .color(colors::ui::LABEL),
            );
            ui.add_space(10.0);

            render_stats(ui, profile);
            ui.add_space(10.0);

            render_achievement(ui, profile);
            ui.add_space(10.0);

            ui.label(RichText::new("Recent Matches").strong().size(15.0));
            ui.separator();
            for performance in &profile.recent_matches {
                render_match_card(ui, performance);
                ui.add_space(6.0);
            }
        });
    });
}

fn render_stats(ui: &mut egui::Ui, profile: &UserProfile) {
    let win_rate = profile
        .win_rate_percent()
        .map_or_else(|| "-".to_string(), |rate| format!("{}%", rate));

    ui.columns(3, |columns| {
        stat_card(
            &mut columns[0],
            &format!("{:.1}", profile.rating),
            "Player Rating",
            &profile.rating_stars(),
        );
        stat_card(&mut columns[1], &win_rate, "Win Rate", "Recent matches");
        stat_card(
            &mut columns[2],
            &profile.matches_this_month.to_string(),
            "Matches Played",
            "This month",
        );
    });
}

fn stat_card(ui: &mut egui::Ui, value: &str, label: &str, subtext: &str) {
    Frame::group(ui.style())
        .fill(colors::profile::CARD)
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.vertical_centered(|ui| {
                ui.label(RichText::new(value).strong().size(20.0).color(colors::ui::ACTIVE));
                ui.label(RichText::new(label).small().color(colors::ui::VALUE));
                ui.label(RichText::new(subtext).small().color(colors::ui::LABEL));
            });
        });
}

fn render_achievement(ui: &mut egui::Ui, profile: &UserProfile) {
    Frame::group(ui.style())
        .fill(colors::profile::ACHIEVEMENT.gamma_multiply(0.25))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.horizontal(|ui| {
                ui.label(RichText::new("\u{1f3c6}").size(22.0));
                ui.vertical(|ui| {
                    ui.label(
                        RichText::new(&profile.achievement.title)
                            .strong()
                            .color(colors::profile::ACHIEVEMENT),
                    );
                    ui.label(RichText::new(&profile.achievement.description).small());
                });
            });
        });
}

fn render_match_card(ui: &mut egui::Ui, performance: &MatchPerformance) {
    let accent = match performance.result {
        MatchResult::Win => colors::ui::SUCCESS,
        MatchResult::Loss => colors::ui::FAILURE,
    };

    Frame::group(ui.style())
        .fill(colors::profile::CARD)
        .stroke(egui::Stroke::new(1.0, accent))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.horizontal(|ui| {
                ui.label(
                    RichText::new(performance.formatted_date())
                        .monospace()
                        .color(colors::ui::LABEL),
                );
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(
                        RichText::new(performance.result.label())
                            .strong()
                            .color(Color32::WHITE)
                            .background_color(accent),
                    );
                });
            });
            ui.label(RichText::new(format!("vs {}", performance.opponent)).strong());
            ui.label(RichText::new(&performance.score).size(15.0).color(colors::ui::VALUE));
            ui.horizontal(|ui| {
                ui.label(RichText::new(format!("\u{1f4cd} {}", performance.venue)).small());
                ui.label(
                    RichText::new(format!("\u{23f1} {}", performance.formatted_duration()))
                        .small(),
                );
            });
        });
}
