//! Shared numeric constants for the canvas engine.
//!
//! These are the defaults behind [`crate::config::CanvasConfig`]; hosts that
//! need different values override them through configuration rather than
//! reaching for these directly.

// ── Logical canvas ──────────────────────────────────────────────

/// Width of the logical plan canvas, in canvas units.
pub const CANVAS_WIDTH: f64 = 800.0;

/// Height of the logical plan canvas, in canvas units.
pub const CANVAS_HEIGHT: f64 = 600.0;

// ── Zoom ────────────────────────────────────────────────────────

/// Lower zoom bound for the standard canvas.
pub const MIN_SCALE: f64 = 0.1;

/// Upper zoom bound for the standard canvas.
pub const MAX_SCALE: f64 = 5.0;

/// Lower zoom bound for the high-density canvas preset.
pub const PERFORMANCE_MIN_SCALE: f64 = 0.3;

/// Upper zoom bound for the high-density canvas preset.
pub const PERFORMANCE_MAX_SCALE: f64 = 8.0;

/// Zoom multiplier applied per wheel tick.
pub const WHEEL_ZOOM_FACTOR: f64 = 1.1;

/// Zoom multiplier applied per zoom-button press.
pub const BUTTON_ZOOM_FACTOR: f64 = 1.2;

// ── Gestures ────────────────────────────────────────────────────

/// Pointer travel, in screen pixels on either axis, that turns a press into a drag.
pub const DRAG_THRESHOLD_PX: f64 = 3.0;

/// How long the "moved" flag survives pointer-up, so the trailing click can see it.
pub const HAS_MOVED_RESET_DELAY_MS: f64 = 10.0;

/// Trailing debounce applied to container resize notifications (one frame).
pub const RESIZE_DEBOUNCE_MS: f64 = 16.0;

// ── Pins ────────────────────────────────────────────────────────

/// Margin added around the visible region before culling pins.
pub const CULLING_PADDING: f64 = 100.0;

/// Screen-space radius of a pin marker for click hit-testing.
pub const PIN_HIT_RADIUS_PX: f64 = 12.0;

/// Canvas-space radius used to report neighbouring pins on creation.
pub const NEARBY_RADIUS: f64 = 25.0;
