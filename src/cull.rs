//! Viewport culling for large pin sets.
//!
//! A linear scan is enough at plan scale (hundreds of markers). The filter
//! keeps input order and never drops an item inside the padded viewport;
//! the padding covers markers whose anchor is just off-screen but whose
//! glyph still overlaps the edge.

#[cfg(test)]
#[path = "cull_test.rs"]
mod cull_test;

use crate::camera::{Point, Rect};

/// Anything with a canvas-space anchor point.
pub trait Positioned {
    fn position(&self) -> Point;
}

impl Positioned for Point {
    fn position(&self) -> Point {
        *self
    }
}

/// Lazily yield the items whose anchor lies inside `viewport` grown by `padding`.
pub fn cull_iter<'a, T: Positioned>(
    items: impl IntoIterator<Item = &'a T>,
    viewport: Rect,
    padding: f64,
) -> impl Iterator<Item = &'a T>
where
    T: 'a,
{
    let bounds = viewport.expand(padding.max(0.0));
    items.into_iter().filter(move |item| bounds.contains(item.position()))
}

/// Collect the visible subset of `items`, preserving their relative order.
#[must_use]
pub fn cull<T: Positioned>(items: &[T], viewport: Rect, padding: f64) -> Vec<&T> {
    cull_iter(items, viewport, padding).collect()
}
