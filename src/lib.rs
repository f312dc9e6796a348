//! Viewport transform engine for the roof-plan pin canvas.
//!
//! Inspectors place pins on a fixed-size logical canvas (the roof plan image,
//! 800×600 by default) that is letterboxed into whatever container the host
//! gives it, then panned and zoomed. This crate owns that geometry: it maps
//! pointer positions to canvas coordinates and back, keeps the point under the
//! cursor fixed while zooming, tells a click apart from a drag, and culls pin
//! markers that are outside the visible region. Everything else (persistence,
//! photos, chat, export) lives with the host, which receives [`engine::Action`]s
//! and feeds DOM events back in.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | [`engine::EngineCore`]: event handlers that emit [`engine::Action`]s |
//! | [`camera`] | Points, rects, the pan/zoom camera and its transform descriptor |
//! | [`scale`] | Container measurement and the aspect-fit scale cache |
//! | [`viewport`] | Screen ↔ canvas conversion, pan, zoom-to-cursor, visible region |
//! | [`cull`] | Padded viewport filter for large pin sets |
//! | [`input`] | Buttons, modifiers, host events and the gesture state machine |
//! | [`resize`] | Trailing debounce for container resize notifications |
//! | [`pins`] | In-memory mirror of the pins placed on the plan |
//! | [`hit`] | Hit-testing pin markers in screen space |
//! | [`config`] | Engine configuration, presets and validation |
//! | [`error`] | Configuration and event decoding errors |
//! | [`consts`] | Default values for every configuration constant |

pub mod camera;
pub mod config;
pub mod consts;
pub mod cull;
pub mod engine;
pub mod error;
pub mod hit;
pub mod input;
pub mod pins;
pub mod resize;
pub mod scale;
pub mod viewport;
#[cfg(feature = "wasm")]
pub mod wasm;
