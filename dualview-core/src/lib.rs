//! Core data structures for dualview
//!
//! This crate provides the fundamental types shared by the mesh loader and
//! the viewer crates: points and vectors, the polygonal mesh, bounding-box
//! normalization parameters, degree-based transforms, and the error type.

pub mod point;
pub mod mesh;
pub mod bounds;
pub mod transform;
pub mod error;

pub use point::*;
pub use mesh::*;
pub use bounds::*;
pub use transform::*;
pub use error::*;

/// Re-export commonly used types from nalgebra
pub use nalgebra::{Matrix4, Point3, Vector3};
