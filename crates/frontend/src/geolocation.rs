//! One-shot wrapper over the browser geolocation API.
//!
//! The callback-style `getCurrentPosition` is bridged into a future through
//! a JS promise so component code can just `.await` it. Requested once on
//! mount; there is no watch and no retry.

use outdoorgears_shared::models::GeoPoint;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;

/// Why no device fix was obtained. `Display` is the user-facing copy shown
/// in the map notice banner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocationError {
    Unsupported,
    Unavailable,
}

impl std::fmt::Display for LocationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LocationError::Unsupported => {
                write!(f, "Geolocation is not supported by your browser")
            }
            LocationError::Unavailable => write!(f, "Unable to retrieve your location"),
        }
    }
}

/// Request the device position once, with high accuracy, the given timeout
/// and no cached fixes. Denied, unsupported and timed-out all collapse into
/// the two-variant error; callers fall back to the default center either
/// way.
pub async fn current_position(timeout_ms: u32) -> Result<GeoPoint, LocationError> {
    let window = web_sys::window().ok_or(LocationError::Unsupported)?;
    let geolocation = window
        .navigator()
        .geolocation()
        .map_err(|_| LocationError::Unsupported)?;

    let options = web_sys::PositionOptions::new();
    options.set_enable_high_accuracy(true);
    options.set_timeout(timeout_ms);
    options.set_maximum_age(0);

    let promise = js_sys::Promise::new(&mut |resolve, reject| {
        let reject_now = reject.clone();
        let on_success = Closure::once(move |position: JsValue| {
            let _ = resolve.call1(&JsValue::NULL, &position);
        });
        let on_error = Closure::once(move |err: JsValue| {
            let _ = reject.call1(&JsValue::NULL, &err);
        });

        if let Err(err) = geolocation.get_current_position_with_error_callback_and_options(
            on_success.as_ref().unchecked_ref(),
            Some(on_error.as_ref().unchecked_ref()),
            &options,
        ) {
            let _ = reject_now.call1(&JsValue::NULL, &err);
        }

        // One-shot callbacks: hand ownership to the JS side.
        on_success.forget();
        on_error.forget();
    });

    match JsFuture::from(promise).await {
        Ok(position) => {
            let position: web_sys::Position = position.unchecked_into();
            let coords = position.coords();
            Ok(GeoPoint::new(coords.latitude(), coords.longitude()))
        }
        Err(_) => Err(LocationError::Unavailable),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_match_banner_copy() {
        assert_eq!(
            LocationError::Unsupported.to_string(),
            "Geolocation is not supported by your browser"
        );
        assert_eq!(
            LocationError::Unavailable.to_string(),
            "Unable to retrieve your location"
        );
    }
}
