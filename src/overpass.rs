//! City geometry download from the Overpass API.
//!
//! Uses channel-based communication to bridge the async download with
//! egui's synchronous update loop. Native builds block on a worker thread;
//! WASM builds use the browser fetch API.

use crate::error::PadelError;
use crate::geo::city::{overpass_query, parse_overpass_response};
use crate::geo::{BoundingBox, CityGeometry, ElementLimits};
use eframe::egui;
use rand::rngs::StdRng;
use std::sync::mpsc::{channel, Receiver, Sender};

pub type GeometryResult = Result<CityGeometry, PadelError>;

/// Parameters of one geometry download.
#[derive(Debug, Clone)]
pub struct GeometryRequest {
    pub endpoint: String,
    pub bbox: BoundingBox,
    pub limits: ElementLimits,
}

/// Channel-based one-shot geometry download.
pub struct GeometryChannel {
    sender: Sender<GeometryResult>,
    receiver: Receiver<GeometryResult>,
    pending: bool,
}

impl Default for GeometryChannel {
    fn default() -> Self {
        Self::new()
    }
}

impl GeometryChannel {
    pub fn new() -> Self {
        let (sender, receiver) = channel();
        Self {
            sender,
            receiver,
            pending: false,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Spawns the download.
    ///
    /// The pipeline:
    /// 1. POST the Overpass query as `data=<query>`
    /// 2. Check the HTTP status
    /// 3. Parse the JSON body into city geometry, estimating heights with `rng`
    /// 4. Send through channel
    ///
    /// Ignored while another download is outstanding.
    pub fn fetch(&mut self, ctx: egui::Context, request: GeometryRequest, mut rng: StdRng) {
        if self.pending {
            log::debug!("Geometry download already pending");
            return;
        }
        self.pending = true;
        let sender = self.sender.clone();

        #[cfg(not(target_arch = "wasm32"))]
        {
            std::thread::spawn(move || {
                let started = web_time::Instant::now();
                let query = overpass_query(&request.bbox);
                let result = post_query_blocking(&request.endpoint, &query)
                    .and_then(|body| parse_overpass_response(&body, request.limits, &mut rng));
                log_outcome(&result, started);
                let _ = sender.send(result);
                ctx.request_repaint();
            });
        }

        #[cfg(target_arch = "wasm32")]
        {
            wasm_bindgen_futures::spawn_local(async move {
                let started = web_time::Instant::now();
                let query = overpass_query(&request.bbox);
                let result = post_query(&request.endpoint, &query)
                    .await
                    .and_then(|body| parse_overpass_response(&body, request.limits, &mut rng));
                log_outcome(&result, started);
                let _ = sender.send(result);
                ctx.request_repaint();
            });
        }
    }

    /// Non-blocking check for a completed download.
    pub fn try_recv(&mut self) -> Option<GeometryResult> {
        let result = self.receiver.try_recv().ok()?;
        self.pending = false;
        Some(result)
    }
}

fn log_outcome(result: &GeometryResult, started: web_time::Instant) {
    let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;
    match result {
        Ok(city) => log::info!(
            "Geometry download finished in {:.0} ms ({} buildings)",
            elapsed_ms,
            city.buildings.len()
        ),
        Err(e) => log::warn!("Geometry download failed after {:.0} ms: {}", elapsed_ms, e),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn post_query_blocking(endpoint: &str, query: &str) -> Result<String, PadelError> {
    let client = reqwest::blocking::Client::builder()
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| PadelError::DataFetchFailed(format!("client setup failed: {}", e)))?;

    let response = client
        .post(endpoint)
        .form(&[("data", query)])
        .send()
        .map_err(|e| PadelError::DataFetchFailed(format!("request failed: {}", e)))?;

    let status = response.status();
    if !status.is_success() {
        return Err(PadelError::DataFetchFailed(format!(
            "HTTP error! status: {}",
            status.as_u16()
        )));
    }

    response
        .text()
        .map_err(|e| PadelError::DataFetchFailed(format!("failed to read body: {}", e)))
}

#[cfg(target_arch = "wasm32")]
async fn post_query(endpoint: &str, query: &str) -> Result<String, PadelError> {
    use wasm_bindgen::{JsCast, JsValue};
    use wasm_bindgen_futures::JsFuture;
    use web_sys::{Request, RequestInit, Response};

    let js_err = |context: &'static str| {
        move |e: JsValue| PadelError::DataFetchFailed(format!("{}: {:?}", context, e))
    };

    let body = format!("data={}", String::from(js_sys::encode_uri_component(query)));
    let init = RequestInit::new();
    init.set_method("POST");
    init.set_body(&JsValue::from_str(&body));

    let request = Request::new_with_str_and_init(endpoint, &init).map_err(js_err("bad request"))?;
    request
        .headers()
        .set("Content-Type", "application/x-www-form-urlencoded")
        .map_err(js_err("bad header"))?;

    let window = web_sys::window()
        .ok_or_else(|| PadelError::DataFetchFailed("no window".to_string()))?;
    let value = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(js_err("request failed"))?;
    let response: Response = value.dyn_into().map_err(js_err("not a response"))?;

    if !response.ok() {
        return Err(PadelError::DataFetchFailed(format!(
            "HTTP error! status: {}",
            response.status()
        )));
    }

    let text = JsFuture::from(response.text().map_err(js_err("failed to read body"))?)
        .await
        .map_err(js_err("failed to read body"))?;
    text.as_string()
        .ok_or_else(|| PadelError::DataFetchFailed("response body is not text".to_string()))
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_unreachable_endpoint_fails() {
        let mut channel = GeometryChannel::new();
        let request = GeometryRequest {
            // Port 9 on localhost refuses connections.
            endpoint: "http://127.0.0.1:9/api/interpreter".to_string(),
            bbox: BoundingBox {
                south: 51.5,
                west: -0.13,
                north: 51.52,
                east: -0.11,
            },
            limits: ElementLimits::default(),
        };
        channel.fetch(egui::Context::default(), request, StdRng::seed_from_u64(0));
        assert!(channel.is_pending());

        let result = loop {
            if let Some(result) = channel.try_recv() {
                break result;
            }
            std::thread::sleep(std::time::Duration::from_millis(10));
        };
        assert!(matches!(result, Err(PadelError::DataFetchFailed(_))));
        assert!(!channel.is_pending());
    }
}
