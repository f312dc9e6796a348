//! Pin model and the in-memory store the engine hit-tests and culls against.
//!
//! Pins are owned by the backend; the host mirrors them here from snapshots
//! and broadcasts so the canvas can decide whether a click landed on an
//! existing marker and which markers are worth drawing. Positions are in
//! logical canvas units.

#[cfg(test)]
#[path = "pins_test.rs"]
mod pins_test;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::camera::Point;
use crate::cull::Positioned;
use crate::error::EventError;

/// Unique identifier for a pin.
pub type PinId = Uuid;

/// Inspection lifecycle of a pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PinStatus {
    /// Defect reported, not yet addressed.
    #[default]
    Open,
    /// Repair done, waiting for the inspector.
    ReadyForInspection,
    /// Inspected and accepted.
    Closed,
}

/// A defect marker on the plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pin {
    pub id: PinId,
    /// Horizontal position in canvas units.
    pub x: f64,
    /// Vertical position in canvas units.
    pub y: f64,
    /// Per-roof sequence number shown on the marker; also the draw order.
    pub seq: u32,
    #[serde(default)]
    pub status: PinStatus,
}

impl Pin {
    /// A new open pin with a fresh id.
    #[must_use]
    pub fn new(x: f64, y: f64, seq: u32) -> Self {
        Self { id: Uuid::new_v4(), x, y, seq, status: PinStatus::Open }
    }
}

impl Positioned for Pin {
    fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// In-memory pin store keyed by id.
#[derive(Debug, Clone, Default)]
pub struct PinStore {
    pins: HashMap<PinId, Pin>,
}

impl PinStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a pin.
    pub fn insert(&mut self, pin: Pin) {
        self.pins.insert(pin.id, pin);
    }

    /// Remove a pin by id, returning it if it was present.
    pub fn remove(&mut self, id: &PinId) -> Option<Pin> {
        self.pins.remove(id)
    }

    #[must_use]
    pub fn get(&self, id: &PinId) -> Option<&Pin> {
        self.pins.get(id)
    }

    /// Move an existing pin. Returns false if the pin doesn't exist.
    pub fn move_to(&mut self, id: &PinId, at: Point) -> bool {
        let Some(pin) = self.pins.get_mut(id) else {
            return false;
        };
        pin.x = at.x;
        pin.y = at.y;
        true
    }

    /// Change a pin's status. Returns false if the pin doesn't exist.
    pub fn set_status(&mut self, id: &PinId, status: PinStatus) -> bool {
        let Some(pin) = self.pins.get_mut(id) else {
            return false;
        };
        pin.status = status;
        true
    }

    /// Replace all pins with a full snapshot.
    pub fn load_snapshot(&mut self, pins: Vec<Pin>) {
        self.pins.clear();
        for pin in pins {
            self.pins.insert(pin.id, pin);
        }
    }

    /// Replace all pins with a JSON array snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`EventError::Parse`] if `raw` is not an array of pins; the
    /// store is left untouched in that case.
    pub fn load_snapshot_json(&mut self, raw: &str) -> Result<usize, EventError> {
        let pins: Vec<Pin> = serde_json::from_str(raw)?;
        let count = pins.len();
        self.load_snapshot(pins);
        Ok(count)
    }

    /// All pins sorted by `(seq, id)`, bottom marker first.
    #[must_use]
    pub fn sorted_pins(&self) -> Vec<&Pin> {
        let mut pins: Vec<&Pin> = self.pins.values().collect();
        pins.sort_by(|a, b| a.seq.cmp(&b.seq).then_with(|| a.id.cmp(&b.id)));
        pins
    }

    /// Pins within `radius` canvas units of `at`, in draw order.
    #[must_use]
    pub fn find_nearby(&self, at: Point, radius: f64) -> Vec<&Pin> {
        self.sorted_pins()
            .into_iter()
            .filter(|pin| pin.position().distance(at) <= radius)
            .collect()
    }

    /// The sequence number a newly created pin should take.
    #[must_use]
    pub fn next_seq(&self) -> u32 {
        self.pins.values().map(|p| p.seq).max().map_or(1, |m| m.saturating_add(1))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pins.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pins.is_empty()
    }
}
