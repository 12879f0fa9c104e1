//! Mesh file loading
//!
//! This crate reads the line-oriented OBJ subset the viewer consumes:
//! `v`, `vn` and `f` records with 1-based indices. Comment lines and
//! unrecognized record types are skipped, so partially supported files
//! still load.

pub mod obj;

pub use obj::ObjReader;

use dualview_core::{Error, Mesh, Result};

/// Trait for reading meshes from files
pub trait MeshReader {
    fn read_mesh<P: AsRef<std::path::Path>>(path: P) -> Result<Mesh>;
}

/// Auto-detect format and read mesh
pub fn read_mesh<P: AsRef<std::path::Path>>(path: P) -> Result<Mesh> {
    let path = path.as_ref();
    match path.extension().and_then(|s| s.to_str()) {
        Some("obj") => obj::ObjReader::read_mesh(path),
        _ => Err(Error::UnsupportedFormat(format!(
            "unsupported mesh format: {:?}",
            path.extension()
        ))),
    }
}
