//! Application configuration.
//!
//! Defaults describe the London demo. On the web, the page URL query string
//! can override the fallback location, search radius and fallback seed, e.g.
//! `?lat=40.4168&lon=-3.7038&radius=5`.

use crate::geo::{ElementLimits, GeoPoint};
use serde::{Deserialize, Serialize};

/// Overpass API endpoint used for city geometry.
pub const DEFAULT_OVERPASS_ENDPOINT: &str = "https://overpass-api.de/api/interpreter";

/// Static configuration for one app session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Location used when the device location is unavailable
    pub fallback_location: GeoPoint,
    /// Initial search radius in kilometers
    pub default_radius_km: f64,
    /// Radius choices offered in the club panel
    pub radius_options_km: Vec<f64>,
    /// Center of the city outline view (Strand, London)
    pub city_center: GeoPoint,
    /// Label shown under the city outline
    pub city_label: String,
    /// Geometry query endpoint
    pub overpass_endpoint: String,
    /// Camera zoom when the city view opens
    pub initial_city_zoom: f64,
    /// Seed for fallback geometry; `None` seeds from the clock
    pub fallback_seed: Option<u64>,
    #[serde(skip)]
    pub element_limits: ElementLimits,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            fallback_location: GeoPoint::new_unchecked(51.5074, -0.1278),
            default_radius_km: 10.0,
            radius_options_km: vec![5.0, 10.0, 15.0, 20.0],
            city_center: GeoPoint::new_unchecked(51.5115, -0.1200),
            city_label: "Strand, London".to_string(),
            overpass_endpoint: DEFAULT_OVERPASS_ENDPOINT.to_string(),
            initial_city_zoom: 0.8,
            fallback_seed: None,
            element_limits: ElementLimits::default(),
        }
    }
}

/// Overrides parsed from a URL query string.
#[derive(Debug, Default, PartialEq)]
pub struct UrlParams {
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub radius: Option<f64>,
    pub seed: Option<u64>,
}

impl UrlParams {
    /// Parses `key=value` pairs, ignoring unknown keys and bad values.
    pub fn parse(query: &str) -> Self {
        let mut params = UrlParams::default();
        let query = query.trim_start_matches('?');

        for pair in query.split('&').filter(|p| !p.is_empty()) {
            let mut kv = pair.splitn(2, '=');
            let key = kv.next().unwrap_or("");
            let value = kv.next().unwrap_or("");
            match key {
                "lat" => params.lat = value.parse().ok(),
                "lon" => params.lon = value.parse().ok(),
                "radius" => params.radius = value.parse().ok(),
                "seed" => params.seed = value.parse().ok(),
                _ => {}
            }
        }

        params
    }
}

impl AppConfig {
    /// Applies URL overrides. Invalid coordinates and non-positive radii are
    /// ignored.
    pub fn with_overrides(mut self, params: &UrlParams) -> Self {
        if let (Some(lat), Some(lon)) = (params.lat, params.lon) {
            match GeoPoint::new(lat, lon) {
                Some(point) => self.fallback_location = point,
                None => log::warn!("Ignoring out-of-range location override {lat},{lon}"),
            }
        }
        if let Some(radius) = params.radius.filter(|r| r.is_finite() && *r > 0.0) {
            self.default_radius_km = radius;
            if !self.radius_options_km.contains(&radius) {
                self.radius_options_km.push(radius);
                self.radius_options_km.sort_by(f64::total_cmp);
            }
        }
        if params.seed.is_some() {
            self.fallback_seed = params.seed;
        }
        self
    }

    /// Loads the configuration for this session.
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let search = web_sys::window()
            .and_then(|w| w.location().search().ok())
            .unwrap_or_default();
        let config = Self::default().with_overrides(&UrlParams::parse(&search));
        log::info!("Loaded config: {:?}", config);
        config
    }

    /// Loads the configuration for this session.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_query() {
        let params = UrlParams::parse("?lat=40.4168&lon=-3.7038&radius=5&foo=bar&seed=12");
        assert_eq!(params.lat, Some(40.4168));
        assert_eq!(params.lon, Some(-3.7038));
        assert_eq!(params.radius, Some(5.0));
        assert_eq!(params.seed, Some(12));
    }

    #[test]
    fn test_parse_empty_and_garbage() {
        assert_eq!(UrlParams::parse(""), UrlParams::default());
        assert_eq!(UrlParams::parse("?lat=abc&&lon"), UrlParams::default());
    }

    #[test]
    fn test_overrides_apply() {
        let params = UrlParams::parse("lat=40.4168&lon=-3.7038&radius=12.5");
        let config = AppConfig::default().with_overrides(&params);
        assert_eq!(config.fallback_location, GeoPoint::new_unchecked(40.4168, -3.7038));
        assert_eq!(config.default_radius_km, 12.5);
        assert_eq!(config.radius_options_km, vec![5.0, 10.0, 12.5, 15.0, 20.0]);
    }

    #[test]
    fn test_invalid_overrides_ignored() {
        let params = UrlParams::parse("lat=123&lon=0&radius=-3");
        let config = AppConfig::default().with_overrides(&params);
        assert_eq!(config, AppConfig::default());
    }
}
