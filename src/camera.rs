#[cfg(test)]
#[path = "camera_test.rs"]
mod camera_test;

use serde::{Deserialize, Serialize};

/// A point in screen, SVG or canvas space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    #[must_use]
    pub fn distance(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Axis-aligned rectangle given by its min and max corners.
///
/// Containment is inclusive on every edge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Rect {
    /// Build a rect from two opposite corners in any order.
    #[must_use]
    pub fn from_corners(a: Point, b: Point) -> Self {
        Self {
            min_x: a.x.min(b.x),
            min_y: a.y.min(b.y),
            max_x: a.x.max(b.x),
            max_y: a.y.max(b.y),
        }
    }

    #[must_use]
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    #[must_use]
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// Grow the rect by `padding` on all four sides.
    #[must_use]
    pub fn expand(&self, padding: f64) -> Self {
        Self {
            min_x: self.min_x - padding,
            min_y: self.min_y - padding,
            max_x: self.max_x + padding,
            max_y: self.max_y + padding,
        }
    }

    #[must_use]
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.min_x && p.x <= self.max_x && p.y >= self.min_y && p.y <= self.max_y
    }
}

/// Inclusive zoom range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoomLimits {
    pub min: f64,
    pub max: f64,
}

impl ZoomLimits {
    #[must_use]
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    #[must_use]
    pub fn clamp(&self, zoom: f64) -> f64 {
        zoom.clamp(self.min, self.max)
    }
}

/// Pan/zoom half of the viewport state.
///
/// `pan_x` / `pan_y` live in pre-zoom SVG space (canvas units scaled by the
/// container fit, before zoom). The rendered group transform is
/// `translate(pan_x, pan_y) scale(zoom)`, so a canvas point `c` lands at
/// SVG point `c * zoom + pan`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub pan_x: f64,
    pub pan_y: f64,
    pub zoom: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self { pan_x: 0.0, pan_y: 0.0, zoom: 1.0 }
    }
}

impl Camera {
    /// Convert an SVG-space point to logical canvas coordinates.
    #[must_use]
    pub fn svg_to_canvas(&self, svg: Point) -> Point {
        Point {
            x: (svg.x - self.pan_x) / self.zoom,
            y: (svg.y - self.pan_y) / self.zoom,
        }
    }

    /// Convert a logical canvas point to SVG space.
    #[must_use]
    pub fn canvas_to_svg(&self, canvas: Point) -> Point {
        Point {
            x: canvas.x * self.zoom + self.pan_x,
            y: canvas.y * self.zoom + self.pan_y,
        }
    }

    /// Translate by an SVG-space delta.
    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.pan_x += dx;
        self.pan_y += dy;
    }

    /// Change zoom to `new_zoom` while keeping `anchor_svg` fixed on screen.
    pub fn zoom_about(&mut self, anchor_svg: Point, new_zoom: f64) {
        let zoom_delta = new_zoom / self.zoom;
        self.pan_x = anchor_svg.x - (anchor_svg.x - self.pan_x) * zoom_delta;
        self.pan_y = anchor_svg.y - (anchor_svg.y - self.pan_y) * zoom_delta;
        self.zoom = new_zoom;
    }

    /// Back to zoom 1, no pan.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// The transform descriptor handed to the renderer.
    #[must_use]
    pub fn transform(&self) -> Transform {
        Transform { pan_x: self.pan_x, pan_y: self.pan_y, zoom: self.zoom }
    }
}

/// Group transform for the rendering layer: translate first, then scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub pan_x: f64,
    pub pan_y: f64,
    pub zoom: f64,
}

impl Transform {
    /// SVG `transform` attribute value.
    #[must_use]
    pub fn to_svg_attr(&self) -> String {
        format!("translate({}, {}) scale({})", self.pan_x, self.pan_y, self.zoom)
    }

    /// Affine matrix `[a, b, c, d, e, f]` as taken by `CanvasRenderingContext2D::setTransform`.
    #[must_use]
    pub fn to_matrix(&self) -> [f64; 6] {
        [self.zoom, 0.0, 0.0, self.zoom, self.pan_x, self.pan_y]
    }
}
