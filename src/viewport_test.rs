#![allow(clippy::float_cmp)]

use super::*;
use crate::scale::{ContainerRect, compute_scale};

const EPSILON: f64 = 1e-9;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

fn point_approx_eq(a: Point, b: Point) -> bool {
    approx_eq(a.x, b.x) && approx_eq(a.y, b.y)
}

fn plan() -> CanvasSize {
    CanvasSize::new(800.0, 600.0)
}

fn limits() -> ZoomLimits {
    ZoomLimits::new(0.1, 5.0)
}

fn cache_for(left: f64, top: f64, width: f64, height: f64) -> ScaleCache {
    match compute_scale(ContainerRect::new(left, top, width, height), plan()) {
        Some(cache) => cache,
        None => panic!("container should be measurable"),
    }
}

// =============================================================
// screen_to_canvas
// =============================================================

#[test]
fn screen_to_canvas_centre_of_wide_container_is_plan_centre() {
    let cache = cache_for(0.0, 0.0, 1000.0, 500.0);
    let p = screen_to_canvas(Point::new(500.0, 250.0), &cache, &Camera::default(), plan());
    assert!(point_approx_eq(p, Point::new(400.0, 300.0)));
}

#[test]
fn screen_to_canvas_subtracts_container_origin() {
    let cache = cache_for(200.0, 100.0, 800.0, 600.0);
    let p = screen_to_canvas(Point::new(250.0, 130.0), &cache, &Camera::default(), plan());
    assert!(point_approx_eq(p, Point::new(50.0, 30.0)));
}

#[test]
fn screen_to_canvas_applies_pan_then_zoom() {
    let cache = cache_for(0.0, 0.0, 800.0, 600.0);
    let cam = Camera { pan_x: 100.0, pan_y: 50.0, zoom: 2.0 };
    let p = screen_to_canvas(Point::new(300.0, 250.0), &cache, &cam, plan());
    assert!(point_approx_eq(p, Point::new(100.0, 100.0)));
}

#[test]
fn screen_to_canvas_clamps_letterbox_clicks() {
    let cache = cache_for(0.0, 0.0, 1000.0, 500.0);
    // x = 10 is inside the left pillarbox band.
    let p = screen_to_canvas(Point::new(10.0, 250.0), &cache, &Camera::default(), plan());
    assert_eq!(p.x, 0.0);
    assert!(approx_eq(p.y, 300.0));

    let p = screen_to_canvas(Point::new(990.0, 499.0), &cache, &Camera::default(), plan());
    assert_eq!(p.x, 800.0);
}

#[test]
fn screen_to_canvas_clamp_inactive_inside_bounds() {
    let cache = cache_for(0.0, 0.0, 1000.0, 500.0);
    let cam = Camera { pan_x: -40.0, pan_y: 25.0, zoom: 1.7 };
    for client in [Point::new(300.0, 120.0), Point::new(500.0, 250.0), Point::new(640.0, 400.0)] {
        let raw = screen_to_canvas_unclamped(client, &cache, &cam);
        assert!(raw.x >= 0.0 && raw.x <= 800.0 && raw.y >= 0.0 && raw.y <= 600.0);
        assert_eq!(screen_to_canvas(client, &cache, &cam, plan()), raw);
    }
}

// =============================================================
// canvas_to_screen round trip
// =============================================================

#[test]
fn canvas_to_screen_inverts_screen_to_canvas() {
    let cameras = [
        Camera::default(),
        Camera { pan_x: 35.0, pan_y: -20.0, zoom: 0.4 },
        Camera { pan_x: -250.0, pan_y: 90.0, zoom: 3.3 },
    ];
    let caches = [cache_for(0.0, 0.0, 1000.0, 500.0), cache_for(15.0, 80.0, 375.0, 812.0)];
    for cache in &caches {
        for cam in &cameras {
            for fx in [0.05, 0.3, 0.5, 0.77, 0.95] {
                for fy in [0.1, 0.5, 0.9] {
                    let client = Point::new(
                        cache.origin.x + cache.container_width * fx,
                        cache.origin.y + cache.container_height * fy,
                    );
                    let canvas = screen_to_canvas_unclamped(client, cache, cam);
                    let back = canvas_to_screen(canvas, cache, cam);
                    assert!(point_approx_eq(back, client), "{client:?} -> {canvas:?} -> {back:?}");
                }
            }
        }
    }
}

// =============================================================
// pan
// =============================================================

#[test]
fn pan_divides_by_scale_factor_only() {
    let cache = cache_for(0.0, 0.0, 400.0, 300.0); // scale 0.5
    let cam = Camera { pan_x: 0.0, pan_y: 0.0, zoom: 4.0 };
    let next = pan(10.0, -6.0, &cache, &cam);
    assert!(approx_eq(next.pan_x, 20.0));
    assert!(approx_eq(next.pan_y, -12.0));
    assert_eq!(next.zoom, 4.0);
}

#[test]
fn pan_moves_content_with_pointer() {
    let cache = cache_for(0.0, 0.0, 1000.0, 500.0);
    let cam = Camera { pan_x: 0.0, pan_y: 0.0, zoom: 2.0 };
    let grabbed = screen_to_canvas_unclamped(Point::new(400.0, 200.0), &cache, &cam);
    let next = pan(30.0, 15.0, &cache, &cam);
    let under_new = screen_to_canvas_unclamped(Point::new(430.0, 215.0), &cache, &next);
    assert!(point_approx_eq(grabbed, under_new));
}

// =============================================================
// zoom_at
// =============================================================

#[test]
fn zoom_at_keeps_cursor_point_fixed() {
    let cache = cache_for(30.0, 60.0, 1000.0, 500.0);
    let mut cam = Camera { pan_x: 12.0, pan_y: -7.0, zoom: 1.0 };
    let cursor = Point::new(612.0, 377.0);
    for direction in [ZoomDirection::In, ZoomDirection::In, ZoomDirection::Out, ZoomDirection::In] {
        let before = screen_to_canvas_unclamped(cursor, &cache, &cam);
        cam = zoom_at(cursor, direction, 1.1, limits(), &cache, &cam);
        let after = screen_to_canvas_unclamped(cursor, &cache, &cam);
        assert!(point_approx_eq(before, after), "{before:?} drifted to {after:?}");
    }
}

#[test]
fn zoom_at_in_and_out_use_reciprocal_factor() {
    let cache = cache_for(0.0, 0.0, 800.0, 600.0);
    let cam = Camera::default();
    let zoomed_in = zoom_at(Point::new(0.0, 0.0), ZoomDirection::In, 1.2, limits(), &cache, &cam);
    assert!(approx_eq(zoomed_in.zoom, 1.2));
    let zoomed_out = zoom_at(Point::new(0.0, 0.0), ZoomDirection::Out, 1.2, limits(), &cache, &cam);
    assert!(approx_eq(zoomed_out.zoom, 1.0 / 1.2));
}

#[test]
fn zoom_never_leaves_limits() {
    let cache = cache_for(0.0, 0.0, 1000.0, 500.0);
    let mut cam = Camera::default();
    let cursor = Point::new(700.0, 100.0);
    for _ in 0..60 {
        cam = zoom_at(cursor, ZoomDirection::In, 1.1, limits(), &cache, &cam);
        assert!(cam.zoom >= 0.1 && cam.zoom <= 5.0);
    }
    assert_eq!(cam.zoom, 5.0);
    for _ in 0..120 {
        cam = zoom_at(cursor, ZoomDirection::Out, 1.1, limits(), &cache, &cam);
        assert!(cam.zoom >= 0.1 && cam.zoom <= 5.0);
    }
    assert_eq!(cam.zoom, 0.1);
}

#[test]
fn zoom_at_limit_does_not_move_pan() {
    let cache = cache_for(0.0, 0.0, 1000.0, 500.0);
    let cam = Camera { pan_x: 40.0, pan_y: 10.0, zoom: 5.0 };
    let next = zoom_at(Point::new(100.0, 100.0), ZoomDirection::In, 1.1, limits(), &cache, &cam);
    assert_eq!(next, cam);
}

#[test]
fn zoom_by_clamps_out_of_range_multiplier() {
    let cache = cache_for(0.0, 0.0, 800.0, 600.0);
    let next = zoom_by(Point::new(400.0, 300.0), 1000.0, limits(), &cache, &Camera::default());
    assert_eq!(next.zoom, 5.0);
}

// =============================================================
// visible_rect / reset
// =============================================================

#[test]
fn visible_rect_at_identity_includes_letterbox_bands() {
    let cache = cache_for(0.0, 0.0, 1000.0, 500.0);
    let r = visible_rect(&cache, &Camera::default());
    assert!(approx_eq(r.min_x, -200.0));
    assert!(approx_eq(r.max_x, 1000.0));
    assert!(approx_eq(r.min_y, 0.0));
    assert!(approx_eq(r.max_y, 600.0));
}

#[test]
fn visible_rect_shrinks_when_zoomed_in() {
    let cache = cache_for(0.0, 0.0, 800.0, 600.0);
    let cam = Camera { pan_x: -400.0, pan_y: -300.0, zoom: 2.0 };
    let r = visible_rect(&cache, &cam);
    assert!(approx_eq(r.min_x, 200.0));
    assert!(approx_eq(r.min_y, 150.0));
    assert!(approx_eq(r.width(), 400.0));
    assert!(approx_eq(r.height(), 300.0));
}

#[test]
fn reset_is_identity() {
    assert_eq!(reset(), Camera { pan_x: 0.0, pan_y: 0.0, zoom: 1.0 });
}
