//! Core library for the Starfield warp screensaver.
//!
//! A fixed pool of stars streams out of a vanishing point towards the viewer.
//! The host owns the window and timer and calls [`StarfieldEngine::update`]
//! followed by [`StarfieldEngine::render`] once per frame; everything between
//! those calls (recycling, projection, depth styling) lives here.

pub mod config;
pub mod engine;
pub mod error;
pub mod projection;
pub mod record;
pub mod render;
pub mod star;
pub mod timeline;

pub use config::{SettingField, StarfieldConfig};
pub use engine::StarfieldEngine;
pub use error::{Result, StarfieldError};
pub use projection::{Viewport, NEAR_PLANE};
pub use record::{Recorder, RecordingSettings};
pub use render::{
    Color, DrawCommand, DrawingSurface, Point, Rect, RecordingSurface, StarStyle, SvgSurface,
};
pub use star::Star;
pub use timeline::FrameClock;
