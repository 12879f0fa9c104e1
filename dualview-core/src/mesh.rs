//! Mesh data structures and functionality

use crate::point::*;
use serde::{Deserialize, Serialize};

/// One vertex reference inside a polygonal face.
///
/// Both indices are zero-based positions into the owning mesh's vertex and
/// normal lists. `normal` is `None` when the source face reference carried
/// no normal component. Indices are not validated against the mesh on
/// construction; resolution happens at render time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaceVertex {
    pub vertex: u32,
    pub normal: Option<u32>,
}

impl FaceVertex {
    pub fn new(vertex: u32, normal: Option<u32>) -> Self {
        Self { vertex, normal }
    }
}

/// A polygonal face: an ordered list of vertex references
pub type Face = Vec<FaceVertex>;

/// An indexed polygonal mesh with optional per-vertex normals
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Mesh {
    pub vertices: Vec<Point3f>,
    pub normals: Vec<Vector3f>,
    pub faces: Vec<Face>,
}

impl Mesh {
    /// Create a new empty mesh
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
            normals: Vec::new(),
            faces: Vec::new(),
        }
    }

    /// Get the number of vertices
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Get the number of normals
    pub fn normal_count(&self) -> usize {
        self.normals.len()
    }

    /// Get the number of faces
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Check whether the mesh has no vertices
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Resolve a face vertex to its position, if the index is in range
    pub fn position(&self, face_vertex: &FaceVertex) -> Option<Point3f> {
        self.vertices.get(face_vertex.vertex as usize).copied()
    }

    /// Resolve a face vertex to its normal, if one is referenced and in range
    pub fn normal(&self, face_vertex: &FaceVertex) -> Option<Vector3f> {
        let index = face_vertex.normal?;
        self.normals.get(index as usize).copied()
    }

    /// Clear the mesh
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.normals.clear();
        self.faces.clear();
    }
}
