//! Engine configuration: presets, JSON loading and validation.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::{Deserialize, Serialize};

use crate::camera::ZoomLimits;
use crate::consts;
use crate::error::ConfigError;
use crate::scale::CanvasSize;

/// Tunables for one canvas instance.
///
/// Every field has a default, so a JSON config only needs the keys it
/// overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    /// Logical canvas width in canvas units.
    pub canvas_width: f64,
    /// Logical canvas height in canvas units.
    pub canvas_height: f64,
    pub min_scale: f64,
    pub max_scale: f64,
    pub wheel_zoom_factor: f64,
    pub button_zoom_factor: f64,
    /// Pointer travel on either axis, in client pixels, before a press counts as a drag.
    pub drag_threshold_px: f64,
    pub has_moved_reset_delay_ms: f64,
    pub resize_debounce_ms: f64,
    /// Margin around the visible region kept when culling, in canvas units.
    pub culling_padding: f64,
    pub pin_hit_radius_px: f64,
    /// Radius, in canvas units, within which existing pins are reported on creation.
    pub nearby_radius: f64,
    /// Only zoom on wheel events carrying ctrl/meta; plain wheel scrolls the page.
    pub wheel_requires_modifier: bool,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self::standard()
    }
}

impl CanvasConfig {
    /// The standard plan canvas: zoom 0.1–5.
    #[must_use]
    pub fn standard() -> Self {
        Self {
            canvas_width: consts::CANVAS_WIDTH,
            canvas_height: consts::CANVAS_HEIGHT,
            min_scale: consts::MIN_SCALE,
            max_scale: consts::MAX_SCALE,
            wheel_zoom_factor: consts::WHEEL_ZOOM_FACTOR,
            button_zoom_factor: consts::BUTTON_ZOOM_FACTOR,
            drag_threshold_px: consts::DRAG_THRESHOLD_PX,
            has_moved_reset_delay_ms: consts::HAS_MOVED_RESET_DELAY_MS,
            resize_debounce_ms: consts::RESIZE_DEBOUNCE_MS,
            culling_padding: consts::CULLING_PADDING,
            pin_hit_radius_px: consts::PIN_HIT_RADIUS_PX,
            nearby_radius: consts::NEARBY_RADIUS,
            wheel_requires_modifier: false,
        }
    }

    /// The high-density canvas used for plans with many pins: zoom 0.3–8.
    #[must_use]
    pub fn performance() -> Self {
        Self {
            min_scale: consts::PERFORMANCE_MIN_SCALE,
            max_scale: consts::PERFORMANCE_MAX_SCALE,
            ..Self::standard()
        }
    }

    /// Parse and validate a JSON config. Missing keys take standard defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON and
    /// [`ConfigError::Invalid`] when a value fails validation.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that every value is usable by the engine.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("canvas_width", self.canvas_width)?;
        positive("canvas_height", self.canvas_height)?;
        positive("min_scale", self.min_scale)?;
        positive("max_scale", self.max_scale)?;
        if self.min_scale > self.max_scale {
            return Err(invalid(
                "min_scale",
                format!("{} exceeds max_scale {}", self.min_scale, self.max_scale),
            ));
        }
        above_one("wheel_zoom_factor", self.wheel_zoom_factor)?;
        above_one("button_zoom_factor", self.button_zoom_factor)?;
        non_negative("drag_threshold_px", self.drag_threshold_px)?;
        non_negative("has_moved_reset_delay_ms", self.has_moved_reset_delay_ms)?;
        non_negative("resize_debounce_ms", self.resize_debounce_ms)?;
        non_negative("culling_padding", self.culling_padding)?;
        non_negative("pin_hit_radius_px", self.pin_hit_radius_px)?;
        non_negative("nearby_radius", self.nearby_radius)?;
        Ok(())
    }

    #[must_use]
    pub fn canvas_size(&self) -> CanvasSize {
        CanvasSize::new(self.canvas_width, self.canvas_height)
    }

    #[must_use]
    pub fn zoom_limits(&self) -> ZoomLimits {
        ZoomLimits::new(self.min_scale, self.max_scale)
    }
}

fn invalid(field: &'static str, reason: String) -> ConfigError {
    ConfigError::Invalid { field, reason }
}

fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(invalid(field, format!("must be a positive number, got {value}")))
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(invalid(field, format!("must be zero or more, got {value}")))
    }
}

fn above_one(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 1.0 {
        Ok(())
    } else {
        Err(invalid(field, format!("must be greater than 1, got {value}")))
    }
}
