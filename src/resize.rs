#[cfg(test)]
#[path = "resize_test.rs"]
mod resize_test;

use crate::scale::ContainerRect;

/// Trailing debounce for container resize notifications.
///
/// Resize observers can fire many times per frame while a panel is being
/// dragged. Only the newest rect is kept, and it is released once
/// `delay_ms` has passed since the most recent notification.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResizeDebouncer {
    delay_ms: f64,
    pending: Option<Pending>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Pending {
    rect: ContainerRect,
    due_ms: f64,
}

impl ResizeDebouncer {
    #[must_use]
    pub fn new(delay_ms: f64) -> Self {
        Self { delay_ms, pending: None }
    }

    /// Record a new measurement, replacing any not yet released.
    pub fn observe(&mut self, rect: ContainerRect, now_ms: f64) {
        self.pending = Some(Pending { rect, due_ms: now_ms + self.delay_ms });
    }

    /// Release the pending rect if it is due at `now_ms`.
    pub fn poll(&mut self, now_ms: f64) -> Option<ContainerRect> {
        match self.pending {
            Some(p) if now_ms >= p.due_ms => {
                self.pending = None;
                Some(p.rect)
            }
            _ => None,
        }
    }

    /// Release the pending rect regardless of timing.
    pub fn flush(&mut self) -> Option<ContainerRect> {
        self.pending.take().map(|p| p.rect)
    }

    /// Drop the pending rect without releasing it.
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}
