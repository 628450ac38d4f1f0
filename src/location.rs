//! Device location requests.
//!
//! Uses channel-based communication to bridge the async browser geolocation
//! API with egui's synchronous update loop. Native builds have no location
//! service and always report `PermissionDenied`.

use crate::error::PadelError;
use crate::geo::GeoPoint;
use eframe::egui;
use std::sync::mpsc::{channel, Receiver, Sender};

/// A position reported by the device.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeviceLocation {
    pub point: GeoPoint,
    /// Accuracy radius in meters, when reported
    pub accuracy_m: Option<f64>,
}

pub type LocationResult = Result<DeviceLocation, PadelError>;

/// Channel-based one-shot location request.
pub struct LocationChannel {
    sender: Sender<LocationResult>,
    receiver: Receiver<LocationResult>,
    pending: bool,
}

impl Default for LocationChannel {
    fn default() -> Self {
        Self::new()
    }
}

impl LocationChannel {
    pub fn new() -> Self {
        let (sender, receiver) = channel();
        Self {
            sender,
            receiver,
            pending: false,
        }
    }

    /// Whether a request is outstanding.
    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Asks the device for its location.
    ///
    /// Ignored while another request is outstanding. The result is sent
    /// through the channel and a repaint is requested.
    pub fn request(&mut self, ctx: egui::Context) {
        if self.pending {
            log::debug!("Location request already pending");
            return;
        }
        self.pending = true;
        let sender = self.sender.clone();

        #[cfg(target_arch = "wasm32")]
        {
            wasm_bindgen_futures::spawn_local(async move {
                let result = request_device_location().await;
                let _ = sender.send(result);
                ctx.request_repaint();
            });
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            log::info!("No location service on this platform");
            let _ = sender.send(Err(PadelError::PermissionDenied));
            ctx.request_repaint();
        }
    }

    /// Non-blocking check for a completed request.
    pub fn try_recv(&mut self) -> Option<LocationResult> {
        let result = self.receiver.try_recv().ok()?;
        self.pending = false;
        Some(result)
    }
}

/// Reads `coords.latitude`, `coords.longitude` and `coords.accuracy` from a
/// browser position object.
#[cfg(target_arch = "wasm32")]
fn position_from_js(position: &wasm_bindgen::JsValue) -> LocationResult {
    use js_sys::Reflect;
    use wasm_bindgen::JsValue;

    let coords = Reflect::get(position, &JsValue::from_str("coords"))
        .map_err(|_| PadelError::PermissionDenied)?;
    let field = |name: &str| {
        Reflect::get(&coords, &JsValue::from_str(name))
            .ok()
            .and_then(|v| v.as_f64())
    };

    let point = field("latitude")
        .zip(field("longitude"))
        .and_then(|(lat, lon)| GeoPoint::new(lat, lon))
        .ok_or(PadelError::PermissionDenied)?;

    Ok(DeviceLocation {
        point,
        accuracy_m: field("accuracy"),
    })
}

/// Requests a single high-accuracy fix from `navigator.geolocation`.
///
/// Denial and any other geolocation failure both surface as
/// `PermissionDenied`.
#[cfg(target_arch = "wasm32")]
async fn request_device_location() -> LocationResult {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::closure::Closure;
    use wasm_bindgen::{JsCast, JsValue};

    let geolocation = web_sys::window()
        .and_then(|w| w.navigator().geolocation().ok())
        .ok_or(PadelError::PermissionDenied)?;

    let (tx, rx) = futures_channel::oneshot::channel::<LocationResult>();
    let tx = Rc::new(RefCell::new(Some(tx)));

    let on_success = {
        let tx = Rc::clone(&tx);
        Closure::once(move |position: JsValue| {
            if let Some(tx) = tx.borrow_mut().take() {
                let _ = tx.send(position_from_js(&position));
            }
        })
    };

    let on_error = {
        let tx = Rc::clone(&tx);
        Closure::once(move |error: JsValue| {
            let code = js_sys::Reflect::get(&error, &JsValue::from_str("code"))
                .ok()
                .and_then(|v| v.as_f64());
            log::warn!("Geolocation failed (code {:?})", code);
            if let Some(tx) = tx.borrow_mut().take() {
                let _ = tx.send(Err(PadelError::PermissionDenied));
            }
        })
    };

    let options = web_sys::PositionOptions::new();
    options.set_enable_high_accuracy(true);

    geolocation
        .get_current_position_with_error_callback_and_options(
            on_success.as_ref().unchecked_ref(),
            Some(on_error.as_ref().unchecked_ref()),
            &options,
        )
        .map_err(|_| PadelError::PermissionDenied)?;

    // The closures must outlive the callback, so they are dropped only after
    // the result arrives.
    let result = rx.await.unwrap_or(Err(PadelError::PermissionDenied));
    drop(on_success);
    drop(on_error);
    result
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;

    #[test]
    fn test_native_reports_permission_denied() {
        let mut channel = LocationChannel::new();
        assert!(channel.try_recv().is_none());

        channel.request(egui::Context::default());
        assert!(channel.is_pending());

        assert_eq!(channel.try_recv(), Some(Err(PadelError::PermissionDenied)));
        assert!(!channel.is_pending());
    }

    #[test]
    fn test_duplicate_request_ignored() {
        let mut channel = LocationChannel::new();
        let ctx = egui::Context::default();
        channel.request(ctx.clone());
        channel.request(ctx);

        assert!(channel.try_recv().is_some());
        assert!(channel.try_recv().is_none());
    }
}
