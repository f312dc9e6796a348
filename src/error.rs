//! Error types for the fallible edges of the engine.
//!
//! Geometry itself never fails: an unmeasured container is reported as
//! `None`. Only configuration and decoding of host-supplied JSON can go wrong.

/// Error returned when building or validating a [`crate::config::CanvasConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The configuration JSON could not be parsed.
    #[error("config parse failed: {0}")]
    Parse(#[from] serde_json::Error),

    /// A field holds a value the engine cannot work with.
    #[error("invalid config field `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Error returned when decoding host events or pin snapshots.
#[derive(Debug, thiserror::Error)]
pub enum EventError {
    /// The payload is not valid JSON for the expected shape.
    #[error("event decode failed: {0}")]
    Parse(#[from] serde_json::Error),
}
