use serde::Serialize;
use tracing::{debug, trace, warn};

use crate::camera::{Camera, Point, Rect, Transform};
use crate::config::CanvasConfig;
use crate::cull;
use crate::error::{ConfigError, EventError};
use crate::hit;
use crate::input::{Button, Gesture, HostEvent, InputState, Modifiers, WheelDelta, ZoomDirection};
use crate::pins::{Pin, PinId, PinStatus, PinStore};
use crate::resize::ResizeDebouncer;
use crate::scale::{self, ContainerRect, ScaleCache};
use crate::viewport;

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// CSS cursor shown while the canvas can be grabbed.
const CURSOR_GRAB: &str = "grab";
/// CSS cursor shown while a pan is in progress.
const CURSOR_GRABBING: &str = "grabbing";

/// Actions returned from event handlers for the host to process.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Action {
    /// Pan or zoom changed; re-apply the group transform.
    ViewChanged { transform: Transform },
    /// A plain click on empty plan: create a pin at `at` (canvas units).
    CreatePin {
        at: Point,
        /// Sequence number the new pin should take.
        seq: u32,
        /// Existing pins within the configured nearby radius of `at`.
        nearby: Vec<PinId>,
    },
    /// A click landed on an existing marker.
    PinSelected { id: PinId },
    SetCursor { cursor: String },
    /// The container geometry changed; redraw.
    RenderNeeded,
}

/// Viewport engine for one canvas surface.
///
/// Owns the pan/zoom camera, the container scale cache, the drag gesture and
/// a mirror of the pins on the plan. Each handler derives the next state from
/// the current one plus a single event and returns what the host should do.
/// Handlers never fail: until the container has been measured they simply
/// return no actions.
#[derive(Debug, Clone)]
pub struct EngineCore {
    config: CanvasConfig,
    camera: Camera,
    scale: Option<ScaleCache>,
    gesture: Gesture,
    pins: PinStore,
    resize: ResizeDebouncer,
}

impl Default for EngineCore {
    fn default() -> Self {
        Self::from_valid(CanvasConfig::standard())
    }
}

impl EngineCore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an engine with a custom configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if `config` fails validation.
    pub fn with_config(config: CanvasConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::from_valid(config))
    }

    fn from_valid(config: CanvasConfig) -> Self {
        let resize = ResizeDebouncer::new(config.resize_debounce_ms);
        Self {
            config,
            camera: Camera::default(),
            scale: None,
            gesture: Gesture::new(),
            pins: PinStore::new(),
            resize,
        }
    }

    // --- Pin mirror ---

    /// Hydrate pins from a backend snapshot.
    pub fn load_pins(&mut self, pins: Vec<Pin>) {
        self.pins.load_snapshot(pins);
    }

    /// Hydrate pins from a JSON array snapshot. Returns the number loaded.
    ///
    /// # Errors
    ///
    /// Returns [`EventError::Parse`] if `raw` is not an array of pins; the
    /// mirror is left untouched in that case.
    pub fn load_pins_json(&mut self, raw: &str) -> Result<usize, EventError> {
        let count = self.pins.load_snapshot_json(raw)?;
        debug!(count, "pin snapshot loaded");
        Ok(count)
    }

    /// Apply a backend broadcast: pin created.
    pub fn apply_pin_create(&mut self, pin: Pin) {
        self.pins.insert(pin);
    }

    /// Apply a backend broadcast: pin moved.
    pub fn apply_pin_move(&mut self, id: &PinId, at: Point) -> bool {
        self.pins.move_to(id, at)
    }

    /// Apply a backend broadcast: pin status changed.
    pub fn apply_pin_status(&mut self, id: &PinId, status: PinStatus) -> bool {
        self.pins.set_status(id, status)
    }

    /// Apply a backend broadcast: pin deleted.
    pub fn apply_pin_delete(&mut self, id: &PinId) {
        self.pins.remove(id);
    }

    // --- Container geometry ---

    /// Container bounding box changed.
    ///
    /// The first measurement and pure moves (same size, new origin) apply
    /// immediately; size changes are debounced and land on a later
    /// [`on_frame`](Self::on_frame).
    pub fn on_resize(&mut self, rect: ContainerRect, time_ms: f64) -> Vec<Action> {
        let mut actions = self.advance(time_ms);
        if !rect.is_measured() {
            warn!(width = rect.width, height = rect.height, "ignoring unmeasured container");
            return actions;
        }
        match self.scale {
            Some(cache) if !rect.same_size(&cache.container()) => {
                self.resize.observe(rect, time_ms);
            }
            _ => {
                self.resize.cancel();
                actions.extend(self.apply_container(rect));
            }
        }
        actions
    }

    /// Animation frame tick: applies a debounced resize once it is due.
    ///
    /// Every timestamped handler does the same, so a host that never sends
    /// frames still converts through a fresh fit.
    pub fn on_frame(&mut self, time_ms: f64) -> Vec<Action> {
        self.advance(time_ms)
    }

    /// Apply a pending resize now instead of waiting for its frame.
    ///
    /// Clicks and wheel zooms call this before converting coordinates, so a
    /// pin is never placed through a stale fit.
    pub fn flush_resize(&mut self) -> Vec<Action> {
        match self.resize.flush() {
            Some(rect) => self.apply_container(rect),
            None => Vec::new(),
        }
    }

    fn apply_container(&mut self, rect: ContainerRect) -> Vec<Action> {
        let Some(cache) = scale::compute_scale(rect, self.config.canvas_size()) else {
            return Vec::new();
        };
        debug!(
            scale_factor = cache.scale_factor,
            offset_x = cache.offset_x,
            offset_y = cache.offset_y,
            "scale cache rebuilt"
        );
        self.scale = Some(cache);
        vec![Action::RenderNeeded]
    }

    // --- Pointer input ---

    /// Primary-button press starts a pan gesture.
    pub fn on_pointer_down(&mut self, client: Point, button: Button, time_ms: f64) -> Vec<Action> {
        let mut actions = self.advance(time_ms);
        if button != Button::Primary {
            return actions;
        }
        self.gesture.press(client);
        trace!(x = client.x, y = client.y, "drag started");
        actions.push(Action::SetCursor { cursor: CURSOR_GRABBING.to_owned() });
        actions
    }

    /// Pointer moved; pans while the primary button is held.
    pub fn on_pointer_move(&mut self, client: Point, time_ms: f64) -> Vec<Action> {
        let mut actions = self.advance(time_ms);
        let was_moved = self.gesture.has_moved();
        let Some((dx, dy)) = self.gesture.drag_to(client, self.config.drag_threshold_px) else {
            return actions;
        };
        if !was_moved && self.gesture.has_moved() {
            debug!("drag threshold exceeded; trailing click will be suppressed");
        }
        let Some(cache) = self.scale else {
            return actions;
        };
        if dx.abs() < f64::EPSILON && dy.abs() < f64::EPSILON {
            return actions;
        }
        self.camera = viewport::pan(dx, dy, &cache, &self.camera);
        actions.push(self.view_changed());
        actions
    }

    /// Primary-button release ends the pan. The drag flags linger for the
    /// configured delay so the click that follows can be classified.
    pub fn on_pointer_up(&mut self, client: Point, button: Button, time_ms: f64) -> Vec<Action> {
        if button != Button::Primary {
            return self.advance(time_ms);
        }
        let mut actions = self.on_pointer_move(client, time_ms);
        if self.gesture.release(time_ms, self.config.has_moved_reset_delay_ms) {
            trace!(moved = self.gesture.has_moved(), "drag released");
            actions.push(Action::SetCursor { cursor: CURSOR_GRAB.to_owned() });
        }
        actions
    }

    /// Click: select the marker under the pointer, or request a new pin.
    ///
    /// Clicks that end a drag are swallowed.
    pub fn on_click(&mut self, client: Point, time_ms: f64) -> Vec<Action> {
        let mut actions = self.advance(time_ms);
        if self.gesture.has_moved() {
            debug!("click suppressed after drag");
            return actions;
        }
        actions.extend(self.flush_resize());
        let Some(cache) = self.scale else {
            debug!("click before container was measured");
            return actions;
        };
        if let Some(hit) = hit::hit_test(client, &self.pins, &cache, &self.camera, self.config.pin_hit_radius_px) {
            actions.push(Action::PinSelected { id: hit.pin_id });
            return actions;
        }
        let at = viewport::screen_to_canvas(client, &cache, &self.camera, self.config.canvas_size());
        let nearby: Vec<PinId> = self
            .pins
            .find_nearby(at, self.config.nearby_radius)
            .into_iter()
            .map(|p| p.id)
            .collect();
        let seq = self.pins.next_seq();
        debug!(x = at.x, y = at.y, seq, nearby = nearby.len(), "pin placement requested");
        actions.push(Action::CreatePin { at, seq, nearby });
        actions
    }

    /// Wheel: zoom one tick about the cursor. Drag state is untouched.
    ///
    /// An empty result means the event was not consumed.
    pub fn on_wheel(&mut self, client: Point, delta: WheelDelta, modifiers: Modifiers, time_ms: f64) -> Vec<Action> {
        let mut actions = self.advance(time_ms);
        if self.config.wheel_requires_modifier && !modifiers.zoom_modifier() {
            return actions;
        }
        let Some(direction) = ZoomDirection::from_wheel(delta) else {
            return actions;
        };
        actions.extend(self.flush_resize());
        let Some(cache) = self.scale else {
            return actions;
        };
        self.camera = viewport::zoom_at(
            client,
            direction,
            self.config.wheel_zoom_factor,
            self.config.zoom_limits(),
            &cache,
            &self.camera,
        );
        actions.push(self.view_changed());
        actions
    }

    // --- Toolbar ---

    /// Zoom-in button: one step about the container centre.
    pub fn zoom_in(&mut self) -> Vec<Action> {
        self.zoom_button(ZoomDirection::In)
    }

    /// Zoom-out button: one step about the container centre.
    pub fn zoom_out(&mut self) -> Vec<Action> {
        self.zoom_button(ZoomDirection::Out)
    }

    fn zoom_button(&mut self, direction: ZoomDirection) -> Vec<Action> {
        let mut actions = self.flush_resize();
        let Some(cache) = self.scale else {
            return actions;
        };
        self.camera = viewport::zoom_at(
            cache.container().center(),
            direction,
            self.config.button_zoom_factor,
            self.config.zoom_limits(),
            &cache,
            &self.camera,
        );
        actions.push(self.view_changed());
        actions
    }

    /// Back to zoom 1 with no pan.
    pub fn reset_view(&mut self) -> Vec<Action> {
        self.camera = viewport::reset();
        vec![self.view_changed()]
    }

    /// Route a decoded host event to its handler.
    pub fn dispatch(&mut self, event: HostEvent) -> Vec<Action> {
        match event {
            HostEvent::Resize { left, top, width, height, time_ms } => {
                self.on_resize(ContainerRect::new(left, top, width, height), time_ms)
            }
            HostEvent::Frame { time_ms } => self.on_frame(time_ms),
            HostEvent::PointerDown { x, y, button, time_ms } => self.on_pointer_down(Point::new(x, y), button, time_ms),
            HostEvent::PointerMove { x, y, time_ms } => self.on_pointer_move(Point::new(x, y), time_ms),
            HostEvent::PointerUp { x, y, button, time_ms } => self.on_pointer_up(Point::new(x, y), button, time_ms),
            HostEvent::Click { x, y, time_ms } => self.on_click(Point::new(x, y), time_ms),
            HostEvent::Wheel { x, y, delta_x, delta_y, ctrl, meta, time_ms } => self.on_wheel(
                Point::new(x, y),
                WheelDelta { dx: delta_x, dy: delta_y },
                Modifiers { ctrl, meta },
                time_ms,
            ),
            HostEvent::ZoomIn => self.zoom_in(),
            HostEvent::ZoomOut => self.zoom_out(),
            HostEvent::Reset => self.reset_view(),
        }
    }

    /// Bring time-driven state up to `time_ms`: clear lapsed drag flags and
    /// apply a resize whose debounce has run out.
    fn advance(&mut self, time_ms: f64) -> Vec<Action> {
        if self.gesture.expire(time_ms) {
            trace!("drag flags cleared");
        }
        match self.resize.poll(time_ms) {
            Some(rect) => self.apply_container(rect),
            None => Vec::new(),
        }
    }

    fn view_changed(&self) -> Action {
        Action::ViewChanged { transform: self.camera.transform() }
    }

    // --- Queries ---

    #[must_use]
    pub fn config(&self) -> &CanvasConfig {
        &self.config
    }

    #[must_use]
    pub fn camera(&self) -> Camera {
        self.camera
    }

    #[must_use]
    pub fn transform(&self) -> Transform {
        self.camera.transform()
    }

    /// The current scale cache, `None` until the container has been measured.
    #[must_use]
    pub fn scale(&self) -> Option<ScaleCache> {
        self.scale
    }

    #[must_use]
    pub fn input_state(&self) -> InputState {
        self.gesture.state()
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.gesture.is_dragging()
    }

    #[must_use]
    pub fn has_moved(&self) -> bool {
        self.gesture.has_moved()
    }

    #[must_use]
    pub fn pins(&self) -> &PinStore {
        &self.pins
    }

    /// Client point → canvas point, clamped to the plan.
    #[must_use]
    pub fn screen_to_canvas(&self, client: Point) -> Option<Point> {
        self.scale
            .map(|cache| viewport::screen_to_canvas(client, &cache, &self.camera, self.config.canvas_size()))
    }

    /// Canvas point → client point.
    #[must_use]
    pub fn canvas_to_screen(&self, canvas_pt: Point) -> Option<Point> {
        self.scale
            .map(|cache| viewport::canvas_to_screen(canvas_pt, &cache, &self.camera))
    }

    /// Canvas-space region currently visible in the container.
    #[must_use]
    pub fn visible_rect(&self) -> Option<Rect> {
        self.scale.map(|cache| viewport::visible_rect(&cache, &self.camera))
    }

    /// Pins worth drawing, in draw order.
    #[must_use]
    pub fn visible_pins(&self) -> Vec<&Pin> {
        let Some(rect) = self.visible_rect() else {
            return Vec::new();
        };
        cull::cull_iter(self.pins.sorted_pins(), rect, self.config.culling_padding).collect()
    }
}
