#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::camera::{Camera, Point};
use crate::pins::{Pin, PinId, PinStore};
use crate::scale::ScaleCache;
use crate::viewport;

/// Result of a marker hit test.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    pub pin_id: PinId,
    /// Screen-space distance from the click to the marker anchor.
    pub distance_px: f64,
}

/// Find the topmost pin marker under `client`.
///
/// Markers keep a constant on-screen size regardless of zoom, so the test is
/// done in client pixels: each pin is projected to the screen and compared
/// against `radius_px`. When markers overlap, the one drawn last wins.
#[must_use]
pub fn hit_test(client: Point, pins: &PinStore, cache: &ScaleCache, camera: &Camera, radius_px: f64) -> Option<Hit> {
    hit_test_pins(client, pins.sorted_pins(), cache, camera, radius_px)
}

/// Same as [`hit_test`] over an explicit draw-ordered slice of pins.
#[must_use]
pub fn hit_test_pins<'a>(
    client: Point,
    pins: impl IntoIterator<Item = &'a Pin>,
    cache: &ScaleCache,
    camera: &Camera,
    radius_px: f64,
) -> Option<Hit> {
    let mut best = None;
    for pin in pins {
        let screen = viewport::canvas_to_screen(Point::new(pin.x, pin.y), cache, camera);
        let distance_px = screen.distance(client);
        if distance_px <= radius_px {
            best = Some(Hit { pin_id: pin.id, distance_px });
        }
    }
    best
}
