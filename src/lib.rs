pub mod color;
pub mod error;
pub mod evcxr;
pub mod geometry;
pub mod host;
pub mod layout;
pub mod mir;
pub mod pattern;
pub mod print;
pub mod renderer;
pub mod visualizer;
#[cfg(feature = "web")]
pub mod web;
