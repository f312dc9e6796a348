//! Browser facade over [`EngineCore`], enabled by the `wasm` feature.
//!
//! The host page forwards DOM events with their raw client coordinates and
//! receives the resulting actions as a JSON array string, which keeps the
//! boundary free of any extra serialization crates.
//!
//! Every timed method takes `time_ms` from the host: `event.timeStamp` for
//! DOM events and the `requestAnimationFrame` argument for frames. Both read
//! `performance.now()`, the same clock [`PlanViewport::dispatch`] expects in
//! its events' `time_ms`, so direct calls and dispatched events may be mixed.

use wasm_bindgen::prelude::*;

use crate::camera::Point;
use crate::config::CanvasConfig;
use crate::engine::{Action, EngineCore};
use crate::input::{Button, HostEvent, Modifiers, WheelDelta};
use crate::scale::ContainerRect;

#[cfg(test)]
#[path = "wasm_test.rs"]
mod wasm_test;

/// One pin canvas bound to a host container.
#[wasm_bindgen]
pub struct PlanViewport {
    core: EngineCore,
}

#[wasm_bindgen]
impl PlanViewport {
    /// Create a viewport. `config_json` overrides the standard configuration.
    ///
    /// # Errors
    ///
    /// Returns the config error message when `config_json` is invalid.
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: Option<String>) -> Result<PlanViewport, JsValue> {
        let config = match config_json {
            Some(raw) => CanvasConfig::from_json(&raw).map_err(to_js)?,
            None => CanvasConfig::standard(),
        };
        let core = EngineCore::with_config(config).map_err(to_js)?;
        Ok(Self { core })
    }

    /// Replace the pin mirror with a JSON array snapshot.
    ///
    /// # Errors
    ///
    /// Returns the decode error message when `pins_json` is malformed.
    pub fn load_pins(&mut self, pins_json: &str) -> Result<u32, JsValue> {
        let count = self.core.load_pins_json(pins_json).map_err(to_js)?;
        Ok(u32::try_from(count).unwrap_or(u32::MAX))
    }

    /// Resize observer callback with the container's bounding client rect.
    ///
    /// # Errors
    ///
    /// Returns an error if the resulting actions cannot be encoded.
    pub fn resize(&mut self, left: f64, top: f64, width: f64, height: f64, time_ms: f64) -> Result<String, JsValue> {
        encode(&self.core.on_resize(ContainerRect::new(left, top, width, height), time_ms))
    }

    /// `requestAnimationFrame` callback.
    ///
    /// # Errors
    ///
    /// Returns an error if the resulting actions cannot be encoded.
    pub fn frame(&mut self, time_ms: f64) -> Result<String, JsValue> {
        encode(&self.core.on_frame(time_ms))
    }

    /// # Errors
    ///
    /// Returns an error if the resulting actions cannot be encoded.
    pub fn pointer_down(&mut self, client_x: f64, client_y: f64, button: i16, time_ms: f64) -> Result<String, JsValue> {
        encode(&self.core.on_pointer_down(Point::new(client_x, client_y), Button::from_dom(button), time_ms))
    }

    /// # Errors
    ///
    /// Returns an error if the resulting actions cannot be encoded.
    pub fn pointer_move(&mut self, client_x: f64, client_y: f64, time_ms: f64) -> Result<String, JsValue> {
        encode(&self.core.on_pointer_move(Point::new(client_x, client_y), time_ms))
    }

    /// # Errors
    ///
    /// Returns an error if the resulting actions cannot be encoded.
    pub fn pointer_up(&mut self, client_x: f64, client_y: f64, button: i16, time_ms: f64) -> Result<String, JsValue> {
        encode(&self.core.on_pointer_up(Point::new(client_x, client_y), Button::from_dom(button), time_ms))
    }

    /// # Errors
    ///
    /// Returns an error if the resulting actions cannot be encoded.
    pub fn click(&mut self, client_x: f64, client_y: f64, time_ms: f64) -> Result<String, JsValue> {
        encode(&self.core.on_click(Point::new(client_x, client_y), time_ms))
    }

    /// An empty array means the wheel event was not consumed.
    ///
    /// # Errors
    ///
    /// Returns an error if the resulting actions cannot be encoded.
    #[allow(clippy::too_many_arguments)]
    pub fn wheel(
        &mut self,
        client_x: f64,
        client_y: f64,
        delta_x: f64,
        delta_y: f64,
        ctrl: bool,
        meta: bool,
        time_ms: f64,
    ) -> Result<String, JsValue> {
        encode(&self.core.on_wheel(
            Point::new(client_x, client_y),
            WheelDelta { dx: delta_x, dy: delta_y },
            Modifiers { ctrl, meta },
            time_ms,
        ))
    }

    /// Dispatch a JSON-encoded [`HostEvent`].
    ///
    /// # Errors
    ///
    /// Returns an error if the event cannot be decoded or the actions encoded.
    pub fn dispatch(&mut self, event_json: &str) -> Result<String, JsValue> {
        let event = HostEvent::from_json(event_json).map_err(to_js)?;
        encode(&self.core.dispatch(event))
    }

    /// # Errors
    ///
    /// Returns an error if the resulting actions cannot be encoded.
    pub fn zoom_in(&mut self) -> Result<String, JsValue> {
        encode(&self.core.zoom_in())
    }

    /// # Errors
    ///
    /// Returns an error if the resulting actions cannot be encoded.
    pub fn zoom_out(&mut self) -> Result<String, JsValue> {
        encode(&self.core.zoom_out())
    }

    /// # Errors
    ///
    /// Returns an error if the resulting actions cannot be encoded.
    pub fn reset(&mut self) -> Result<String, JsValue> {
        encode(&self.core.reset_view())
    }

    /// Current group transform as an SVG `transform` attribute.
    #[must_use]
    pub fn svg_transform(&self) -> String {
        self.core.transform().to_svg_attr()
    }

    #[must_use]
    pub fn zoom(&self) -> f64 {
        self.core.camera().zoom
    }

    /// Ids of pins inside the padded visible region, as a JSON array.
    ///
    /// # Errors
    ///
    /// Returns an error if the id list cannot be encoded.
    pub fn visible_pin_ids(&self) -> Result<String, JsValue> {
        let ids: Vec<_> = self.core.visible_pins().into_iter().map(|p| p.id).collect();
        serde_json::to_string(&ids).map_err(to_js)
    }
}

fn encode(actions: &[Action]) -> Result<String, JsValue> {
    serde_json::to_string(actions).map_err(to_js)
}

fn to_js(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}
