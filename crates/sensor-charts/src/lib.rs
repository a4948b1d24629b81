//! Chart rendering for sensor readings.
//!
//! Provides the colour themes, the six chart drawings and the renderer that
//! writes them as SVG files built on [`plotters`].

pub mod components;
pub mod renderer;
pub mod themes;

pub use renderer::{ChartKind, ChartRenderer, RenderReport};
pub use sensor_core as core;
