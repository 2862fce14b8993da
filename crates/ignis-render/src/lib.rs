#![forbid(unsafe_code)]

//! Headless renderers for the Ignis dashboard.
//!
//! Every renderer follows the same contract: clear the target [`DrawSurface`], then draw. The
//! bundled [`SvgSurface`] retains what was drawn so it can be inspected or serialized to SVG.

pub mod charts;
pub mod error;
pub mod geo;
pub mod geom;
pub mod network;
pub mod style;
pub mod surface;
mod svg;

pub use error::{Error, Result};
pub use geo::{MapOptions, RegionPolygonSet, render_map};
pub use network::{NetworkOptions, NetworkView, render_network};
pub use surface::{
    DrawSurface, Element, PointerEvent, PointerKind, Shape, Style, SvgSurface, Text, TextAnchor,
};
