//! Screen ↔ canvas mapping, pan and zoom-to-cursor.
//!
//! A client point goes through three spaces on its way to the plan:
//!
//! 1. client pixels, as delivered by pointer events;
//! 2. SVG space: container-relative, letterbox removed, divided by the fit
//!    scale ([`ScaleCache::client_to_svg`]);
//! 3. canvas space: pan removed, divided by zoom ([`Camera::svg_to_canvas`]).
//!
//! Every function here is pure: it takes the current state by reference and
//! returns the derived value or the next camera.

#[cfg(test)]
#[path = "viewport_test.rs"]
mod viewport_test;

use crate::camera::{Camera, Point, Rect, ZoomLimits};
use crate::input::ZoomDirection;
use crate::scale::{CanvasSize, ScaleCache};

/// Resolve a client point to canvas coordinates, clamped to the plan bounds.
#[must_use]
pub fn screen_to_canvas(client: Point, cache: &ScaleCache, camera: &Camera, canvas: CanvasSize) -> Point {
    canvas.clamp(screen_to_canvas_unclamped(client, cache, camera))
}

/// Resolve a client point to canvas coordinates without the bounds clamp.
#[must_use]
pub fn screen_to_canvas_unclamped(client: Point, cache: &ScaleCache, camera: &Camera) -> Point {
    camera.svg_to_canvas(cache.client_to_svg(client))
}

/// Project a canvas point back to client pixels.
#[must_use]
pub fn canvas_to_screen(canvas_pt: Point, cache: &ScaleCache, camera: &Camera) -> Point {
    cache.svg_to_client(camera.canvas_to_svg(canvas_pt))
}

/// Apply a pointer delta in client pixels to the pan offset.
///
/// Pan lives in pre-zoom SVG space, so the delta is divided by the fit scale
/// only, not by zoom.
#[must_use]
pub fn pan(delta_client_x: f64, delta_client_y: f64, cache: &ScaleCache, camera: &Camera) -> Camera {
    let mut next = *camera;
    next.pan_by(delta_client_x / cache.scale_factor, delta_client_y / cache.scale_factor);
    next
}

/// Zoom one step in `direction` about the client point under the cursor.
///
/// The canvas point under `client` stays under `client` afterwards, unless
/// the zoom was already pinned at a limit in which case nothing moves.
#[must_use]
pub fn zoom_at(
    client: Point,
    direction: ZoomDirection,
    factor: f64,
    limits: ZoomLimits,
    cache: &ScaleCache,
    camera: &Camera,
) -> Camera {
    let multiplier = match direction {
        ZoomDirection::In => factor,
        ZoomDirection::Out => 1.0 / factor,
    };
    zoom_by(client, multiplier, limits, cache, camera)
}

/// Multiply zoom by `multiplier` about a client anchor, clamping to `limits`.
#[must_use]
pub fn zoom_by(client: Point, multiplier: f64, limits: ZoomLimits, cache: &ScaleCache, camera: &Camera) -> Camera {
    let new_zoom = limits.clamp(camera.zoom * multiplier);
    if (new_zoom - camera.zoom).abs() < f64::EPSILON {
        return *camera;
    }
    let anchor_svg = cache.client_to_svg(client);
    let mut next = *camera;
    next.zoom_about(anchor_svg, new_zoom);
    next
}

/// The region of canvas space currently visible in the container.
///
/// This is the whole container box (letterbox bands included) mapped into
/// canvas space, so it may extend beyond the plan bounds when zoomed out.
#[must_use]
pub fn visible_rect(cache: &ScaleCache, camera: &Camera) -> Rect {
    let top_left = screen_to_canvas_unclamped(cache.origin, cache, camera);
    let bottom_right = screen_to_canvas_unclamped(
        Point::new(cache.origin.x + cache.container_width, cache.origin.y + cache.container_height),
        cache,
        camera,
    );
    Rect::from_corners(top_left, bottom_right)
}

/// Default viewport state: zoom 1, no pan.
#[must_use]
pub fn reset() -> Camera {
    Camera::default()
}
