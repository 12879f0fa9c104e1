//! Interactive viewing for dualview meshes
//!
//! This crate turns a loaded mesh into frames of draw primitives:
//! - Per-viewport transform state with drag and wheel input
//! - An orthographic render pipeline emitting axis and triangle primitives
//! - A single viewer slot and a two-slot coordinator with fixed vantage points

pub mod camera;
pub mod renderer;
pub mod viewer;
pub mod dual_viewer;

pub use camera::*;
pub use renderer::*;
pub use viewer::*;
pub use dual_viewer::*;
