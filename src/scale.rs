//! Container measurement and the aspect-fit scale cache.
//!
//! The logical canvas has a fixed size and is drawn into the container with
//! "contain" semantics (`preserveAspectRatio="xMidYMid meet"`): the whole
//! canvas stays visible, undistorted, and the spare axis is centred. The
//! resulting [`ScaleCache`] is derived purely from the container's bounding
//! box and must be rebuilt whenever that box changes.

#[cfg(test)]
#[path = "scale_test.rs"]
mod scale_test;

use serde::{Deserialize, Serialize};

use crate::camera::Point;

/// The container's bounding box in client (screen) pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ContainerRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl ContainerRect {
    #[must_use]
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self { left, top, width, height }
    }

    /// Whether layout has produced a usable, non-degenerate box.
    #[must_use]
    pub fn is_measured(&self) -> bool {
        self.left.is_finite()
            && self.top.is_finite()
            && self.width.is_finite()
            && self.height.is_finite()
            && self.width > 0.0
            && self.height > 0.0
    }

    /// Same width and height, possibly a different origin.
    #[allow(clippy::float_cmp)]
    #[must_use]
    pub fn same_size(&self, other: &ContainerRect) -> bool {
        self.width == other.width && self.height == other.height
    }

    /// Client-space centre of the box.
    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.left + self.width * 0.5, self.top + self.height * 0.5)
    }
}

/// Fixed logical size of the plan canvas, in canvas units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CanvasSize {
    pub width: f64,
    pub height: f64,
}

impl CanvasSize {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Clamp a canvas point into `[0, width] × [0, height]`.
    #[must_use]
    pub fn clamp(&self, p: Point) -> Point {
        Point::new(p.x.clamp(0.0, self.width), p.y.clamp(0.0, self.height))
    }
}

/// Container-to-canvas fit, cached between resizes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScaleCache {
    /// Container pixels per canvas unit.
    pub scale_factor: f64,
    /// Horizontal letterbox offset in container pixels.
    pub offset_x: f64,
    /// Vertical letterbox offset in container pixels.
    pub offset_y: f64,
    pub container_width: f64,
    pub container_height: f64,
    /// Container top-left in client pixels.
    pub origin: Point,
}

impl ScaleCache {
    /// Client pixels → pre-pan/zoom SVG space.
    #[must_use]
    pub fn client_to_svg(&self, client: Point) -> Point {
        Point {
            x: (client.x - self.origin.x - self.offset_x) / self.scale_factor,
            y: (client.y - self.origin.y - self.offset_y) / self.scale_factor,
        }
    }

    /// Pre-pan/zoom SVG space → client pixels.
    #[must_use]
    pub fn svg_to_client(&self, svg: Point) -> Point {
        Point {
            x: svg.x * self.scale_factor + self.offset_x + self.origin.x,
            y: svg.y * self.scale_factor + self.offset_y + self.origin.y,
        }
    }

    /// The container box this cache was computed from.
    #[must_use]
    pub fn container(&self) -> ContainerRect {
        ContainerRect::new(self.origin.x, self.origin.y, self.container_width, self.container_height)
    }
}

/// Fit `canvas` inside `container`, preserving aspect ratio.
///
/// A container that is narrower (relative to its height) than the canvas
/// fits to width and centres vertically; otherwise it fits to height and
/// centres horizontally. Returns `None` while the container has no usable
/// size, so callers skip coordinate math until layout is available.
#[must_use]
pub fn compute_scale(container: ContainerRect, canvas: CanvasSize) -> Option<ScaleCache> {
    if !container.is_measured() || canvas.width <= 0.0 || canvas.height <= 0.0 {
        return None;
    }

    let container_aspect = container.width / container.height;
    let canvas_aspect = canvas.width / canvas.height;

    let (scale_factor, offset_x, offset_y) = if container_aspect < canvas_aspect {
        let sf = container.width / canvas.width;
        (sf, 0.0, (container.height - canvas.height * sf) / 2.0)
    } else {
        let sf = container.height / canvas.height;
        (sf, (container.width - canvas.width * sf) / 2.0, 0.0)
    };

    Some(ScaleCache {
        scale_factor,
        offset_x,
        offset_y,
        container_width: container.width,
        container_height: container.height,
        origin: Point::new(container.left, container.top),
    })
}
