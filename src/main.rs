#![warn(clippy::all)]

//! Padel Map - find padel clubs near you.
//!
//! This application shows the padel clubs within a chosen radius of the
//! device location, a stylized pseudo-3D outline of the surrounding city
//! blocks, and a player profile with recent matches.

mod config;
mod error;
mod geo;
mod location;
mod overpass;
mod state;
mod ui;

use config::AppConfig;
use eframe::egui;
use location::LocationChannel;
use overpass::{GeometryChannel, GeometryRequest};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use state::{AppState, LoadPhase, LocationStatus, Tab};

// Native entry point
#[cfg(not(target_arch = "wasm32"))]
fn main() -> eframe::Result<()> {
    env_logger::init();

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Padel Map")
            .with_inner_size([1100.0, 720.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Padel Map",
        native_options,
        Box::new(|cc| Ok(Box::new(PadelMapApp::new(cc)))),
    )
}

// WASM entry point - main is not called on wasm32
#[cfg(target_arch = "wasm32")]
fn main() {}

/// Entry point for the WASM application.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub async fn start() {
    use eframe::wasm_bindgen::JsCast as _;

    // Redirect `log` messages to `console.log`:
    eframe::WebLogger::init(log::LevelFilter::Debug).ok();

    let web_options = eframe::WebOptions::default();

    wasm_bindgen_futures::spawn_local(async {
        let document = web_sys::window()
            .expect("No window")
            .document()
            .expect("No document");

        let canvas = document
            .get_element_by_id("app_canvas")
            .expect("Failed to find app_canvas")
            .dyn_into::<web_sys::HtmlCanvasElement>()
            .expect("app_canvas was not a HtmlCanvasElement");

        let start_result = eframe::WebRunner::new()
            .start(
                canvas,
                web_options,
                Box::new(|cc| Ok(Box::new(PadelMapApp::new(cc)))),
            )
            .await;

        // Remove the loading text once the app has loaded:
        if let Some(loading_text) = document.get_element_by_id("loading_text") {
            match start_result {
                Ok(_) => {
                    loading_text.remove();
                }
                Err(e) => {
                    loading_text.set_inner_html(
                        "<p>The app has crashed. See the developer console for details.</p>",
                    );
                    panic!("Failed to start eframe: {e:?}");
                }
            }
        }
    });
}

/// Main application state and logic.
pub struct PadelMapApp {
    /// Application state containing all sub-states
    state: AppState,

    /// Session configuration
    config: AppConfig,

    /// Channel for the device location request
    location_channel: LocationChannel,

    /// Channel for the city geometry download
    geometry_channel: GeometryChannel,

    /// Source of randomness for fallback geometry and height estimates
    rng: StdRng,

    /// Whether the startup requests have been issued
    started: bool,
}

impl PadelMapApp {
    /// Creates a new PadelMapApp instance.
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        let config = AppConfig::load();
        let seed = config.fallback_seed.unwrap_or_else(clock_seed);
        log::info!("Starting Padel Map (seed {})", seed);

        Self {
            state: AppState::new(&config),
            config,
            location_channel: LocationChannel::new(),
            geometry_channel: GeometryChannel::new(),
            rng: StdRng::seed_from_u64(seed),
            started: false,
        }
    }

    /// Kicks off the city geometry download.
    fn start_city_load(&mut self, ctx: &egui::Context) {
        if !self.state.city.begin_loading() {
            return;
        }
        let request = GeometryRequest {
            endpoint: self.config.overpass_endpoint.clone(),
            bbox: self.state.city.query_bbox(),
            limits: self.config.element_limits,
        };
        log::info!("Requesting city geometry for {}", request.bbox.to_overpass());
        self.geometry_channel.fetch(
            ctx.clone(),
            request,
            StdRng::seed_from_u64(self.rng.random()),
        );
    }

    /// Drains completed collaborator requests into the state.
    fn poll_channels(&mut self) {
        if let Some(result) = self.location_channel.try_recv() {
            self.state.clubs.apply_location(result);
            self.refresh_status();
        }

        if let Some(result) = self.geometry_channel.try_recv() {
            self.state.city.finish(result, &mut self.rng);
            self.refresh_status();
        }
    }

    fn refresh_status(&mut self) {
        let location = match self.state.clubs.status {
            LocationStatus::Pending => "Locating...",
            LocationStatus::Located { .. } => "Using device location",
            LocationStatus::Fallback => "Using Central London",
        };
        let city = match self.state.city.phase {
            LoadPhase::Idle | LoadPhase::Ready => None,
            LoadPhase::Loading => Some("loading city outline"),
            LoadPhase::Failed => Some("demo city outline"),
        };
        self.state.status_message = match city {
            Some(city) => format!("{} | {}", location, city),
            None => location.to_string(),
        };
    }
}

/// Seed derived from the wall clock.
fn clock_seed() -> u64 {
    web_time::SystemTime::now()
        .duration_since(web_time::UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or_default()
}

impl eframe::App for PadelMapApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if !self.started {
            self.started = true;
            self.location_channel.request(ctx.clone());
            self.start_city_load(ctx);
            self.refresh_status();
        }

        self.poll_channels();

        ui::render_top_bar(ctx, &mut self.state);

        match self.state.active_tab {
            Tab::Clubs => {
                ui::render_clubs_panel(ctx, &mut self.state.clubs);
                ui::render_club_map(ctx, &mut self.state.clubs);
            }
            Tab::City => {
                if ui::render_city_canvas(ctx, &mut self.state.city) {
                    self.start_city_load(ctx);
                    self.refresh_status();
                }
            }
            Tab::Profile => ui::render_profile_panel(ctx, &self.state.profile),
        }

        // Keep the spinners animating while requests are outstanding
        if self.location_channel.is_pending() || self.geometry_channel.is_pending() {
            ctx.request_repaint_after(std::time::Duration::from_millis(100));
        }
    }
}
