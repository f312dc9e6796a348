//! Input model: buttons, modifiers, host events, and the drag gesture state machine.
//!
//! `HostEvent` is the serialized form of the DOM events a host forwards to the
//! engine. `Gesture` tracks one pointer between press and release and decides
//! whether the trailing click was really a click or the end of a pan.
//!
//! ```text
//! Idle ──down──▶ Dragging ──up──▶ Settling ──deadline──▶ Idle
//!                  │  ▲                │
//!                  └──┘ move           └──down──▶ Dragging
//! ```

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use serde::{Deserialize, Serialize};

use crate::camera::Point;
use crate::error::EventError;
use crate::scale::ContainerRect;

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Button {
    /// Left mouse button (or single-finger touch).
    #[default]
    Primary,
    /// Middle mouse button (scroll wheel click).
    Middle,
    /// Right mouse button (or two-finger tap).
    Secondary,
}

impl Button {
    /// Map a DOM `MouseEvent.button` code.
    #[must_use]
    pub fn from_dom(code: i16) -> Self {
        match code {
            1 => Self::Middle,
            2 => Self::Secondary,
            _ => Self::Primary,
        }
    }
}

/// Keyboard modifier keys held during a wheel event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    /// Ctrl key is held (also set by trackpad pinch gestures).
    pub ctrl: bool,
    /// Meta / Command key is held.
    pub meta: bool,
}

impl Modifiers {
    /// Whether either zoom modifier is held.
    #[must_use]
    pub fn zoom_modifier(self) -> bool {
        self.ctrl || self.meta
    }
}

/// Wheel / trackpad scroll delta.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WheelDelta {
    /// Horizontal scroll amount in pixels.
    pub dx: f64,
    /// Vertical scroll amount in pixels (positive = down).
    pub dy: f64,
}

/// Which way a zoom step goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoomDirection {
    In,
    Out,
}

impl ZoomDirection {
    /// Scrolling up zooms in. A purely horizontal scroll has no direction.
    #[must_use]
    pub fn from_wheel(delta: WheelDelta) -> Option<Self> {
        if delta.dy < 0.0 {
            Some(Self::In)
        } else if delta.dy > 0.0 {
            Some(Self::Out)
        } else {
            None
        }
    }
}

/// State of the single tracked pointer.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum InputState {
    /// No gesture in progress; waiting for the next pointer-down.
    #[default]
    Idle,
    /// The primary button is held and pointer moves pan the canvas.
    Dragging {
        /// Client position of the pointer-down.
        drag_start: Point,
        /// Client position of the previous pointer event, used to compute pan deltas.
        last_client: Point,
    },
    /// Released, but the click that follows pointer-up has not been seen yet.
    Settling {
        /// Timestamp at which the gesture flags clear.
        release_deadline_ms: f64,
    },
}

/// Drag tracking plus the "did this press move?" flag.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Gesture {
    state: InputState,
    has_moved: bool,
}

impl Gesture {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn state(&self) -> InputState {
        self.state
    }

    /// True from pointer-down until the post-release deadline passes.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        !matches!(self.state, InputState::Idle)
    }

    #[must_use]
    pub fn has_moved(&self) -> bool {
        self.has_moved
    }

    /// Client position of the current press, while the button is held.
    #[must_use]
    pub fn drag_start(&self) -> Option<Point> {
        match self.state {
            InputState::Dragging { drag_start, .. } => Some(drag_start),
            _ => None,
        }
    }

    /// Start a fresh gesture at `at`, discarding any settling one.
    pub fn press(&mut self, at: Point) {
        self.state = InputState::Dragging { drag_start: at, last_client: at };
        self.has_moved = false;
    }

    /// Track a move to `at`. Returns the client delta since the previous event
    /// while the button is held, `None` otherwise.
    ///
    /// `has_moved` latches once the displacement from the press point exceeds
    /// `threshold_px` on either axis.
    pub fn drag_to(&mut self, at: Point, threshold_px: f64) -> Option<(f64, f64)> {
        let InputState::Dragging { drag_start, last_client } = self.state else {
            return None;
        };
        if (at.x - drag_start.x).abs() > threshold_px || (at.y - drag_start.y).abs() > threshold_px {
            self.has_moved = true;
        }
        self.state = InputState::Dragging { drag_start, last_client: at };
        Some((at.x - last_client.x, at.y - last_client.y))
    }

    /// Release the button at `now_ms`. The flags survive for `delay_ms` so the
    /// click the host delivers after pointer-up still sees them.
    ///
    /// Returns `false` when no press was being tracked.
    pub fn release(&mut self, now_ms: f64, delay_ms: f64) -> bool {
        if !matches!(self.state, InputState::Dragging { .. }) {
            return false;
        }
        self.state = InputState::Settling { release_deadline_ms: now_ms + delay_ms };
        true
    }

    /// Clear the flags if the post-release deadline has passed. Returns
    /// whether anything changed.
    pub fn expire(&mut self, now_ms: f64) -> bool {
        match self.state {
            InputState::Settling { release_deadline_ms } if now_ms >= release_deadline_ms => {
                self.state = InputState::Idle;
                self.has_moved = false;
                true
            }
            _ => false,
        }
    }
}

/// A DOM event forwarded by the host, in serialized form.
///
/// Coordinates are client pixels. `time_ms` is the event's monotonic
/// timestamp (`Event.timeStamp`). Every event fed to one engine, dispatched
/// or passed to a handler directly, must read the same clock.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HostEvent {
    /// The container's bounding box changed.
    Resize { left: f64, top: f64, width: f64, height: f64, time_ms: f64 },
    /// Animation frame tick.
    Frame { time_ms: f64 },
    PointerDown {
        x: f64,
        y: f64,
        #[serde(default)]
        button: Button,
        time_ms: f64,
    },
    PointerMove { x: f64, y: f64, time_ms: f64 },
    PointerUp {
        x: f64,
        y: f64,
        #[serde(default)]
        button: Button,
        time_ms: f64,
    },
    Click { x: f64, y: f64, time_ms: f64 },
    Wheel {
        x: f64,
        y: f64,
        #[serde(default)]
        delta_x: f64,
        delta_y: f64,
        #[serde(default)]
        ctrl: bool,
        #[serde(default)]
        meta: bool,
        time_ms: f64,
    },
    /// Zoom-in button.
    ZoomIn,
    /// Zoom-out button.
    ZoomOut,
    /// Reset-view button.
    Reset,
}

impl HostEvent {
    /// Decode one event from its JSON form.
    ///
    /// # Errors
    ///
    /// Returns [`EventError::Parse`] when `raw` is not a valid event object.
    pub fn from_json(raw: &str) -> Result<Self, EventError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// The container rect carried by a `Resize` event.
    #[must_use]
    pub fn container(&self) -> Option<ContainerRect> {
        match *self {
            Self::Resize { left, top, width, height, .. } => Some(ContainerRect::new(left, top, width, height)),
            _ => None,
        }
    }
}
