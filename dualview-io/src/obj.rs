//! OBJ format support

use crate::MeshReader;
use dualview_core::{Error, Face, FaceVertex, Mesh, Point3f, Result, Vector3f};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::{debug, info};

/// Reader for the OBJ subset used by the viewer.
///
/// Supports `v` and `vn` records (3 floats each, extra components
/// ignored) and `f` records with `v`, `v//vn` and `v/vt/vn` reference
/// grammars. Texture indices are checked for well-formedness but not
/// stored. Everything else is skipped.
pub struct ObjReader;

impl MeshReader for ObjReader {
    fn read_mesh<P: AsRef<Path>>(path: P) -> Result<Mesh> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        debug!(path = %path.display(), "reading OBJ mesh");

        let file = File::open(path)?;
        let reader = BufReader::new(file);

        let mut mesh = Mesh::new();
        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            parse_line(&line, index + 1, &mut mesh)?;
        }

        info!(
            vertices = mesh.vertex_count(),
            normals = mesh.normal_count(),
            faces = mesh.face_count(),
            "loaded OBJ mesh"
        );
        Ok(mesh)
    }
}

fn parse_line(line: &str, line_number: usize, mesh: &mut Mesh) -> Result<()> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(());
    }

    let mut tokens = line.split_whitespace();
    match tokens.next() {
        Some("v") => {
            let [x, y, z] = parse_triple(tokens, line_number)?;
            mesh.vertices.push(Point3f::new(x, y, z));
        }
        Some("vn") => {
            let [x, y, z] = parse_triple(tokens, line_number)?;
            mesh.normals.push(Vector3f::new(x, y, z));
        }
        Some("f") => {
            mesh.faces.push(parse_face(tokens, line_number)?);
        }
        _ => {}
    }
    Ok(())
}

/// Take exactly three floats from the remaining tokens. Trailing tokens
/// (such as a `w` component) are ignored.
fn parse_triple<'a>(
    mut tokens: impl Iterator<Item = &'a str>,
    line_number: usize,
) -> Result<[f32; 3]> {
    let mut out = [0.0f32; 3];
    for slot in &mut out {
        let token = tokens.next().ok_or_else(|| Error::Parse {
            line: line_number,
            message: "expected 3 coordinates".to_string(),
        })?;
        *slot = token.parse().map_err(|_| Error::Parse {
            line: line_number,
            message: format!("invalid coordinate '{token}'"),
        })?;
    }
    Ok(out)
}

fn parse_face<'a>(tokens: impl Iterator<Item = &'a str>, line_number: usize) -> Result<Face> {
    let mut face = Face::new();
    for reference in tokens {
        face.push(parse_face_vertex(reference, line_number)?);
    }
    Ok(face)
}

/// Resolve one face-vertex reference to a zero-based index pair.
///
/// `a` carries no normal, `a/b` pairs a vertex with a normal, and
/// `a/b/c` is vertex/texture/normal with the texture slot discarded.
/// An empty normal slot (`a//` or `a//c` with `c` missing) yields
/// an absent normal.
fn parse_face_vertex(reference: &str, line_number: usize) -> Result<FaceVertex> {
    let parts: Vec<&str> = reference.split('/').collect();
    let vertex = parse_index(parts[0], line_number)?;
    let normal = match parts.len() {
        1 => None,
        2 => Some(parse_index(parts[1], line_number)?),
        _ => {
            if !parts[1].is_empty() {
                parse_index(parts[1], line_number)?;
            }
            if parts[2].is_empty() {
                None
            } else {
                Some(parse_index(parts[2], line_number)?)
            }
        }
    };
    Ok(FaceVertex::new(vertex, normal))
}

/// Parse a 1-based index and convert it to zero-based. Zero and negative
/// indices are rejected; indices past the end of the vertex or normal
/// lists are left for the renderer to skip.
fn parse_index(token: &str, line_number: usize) -> Result<u32> {
    let value: u32 = token.parse().map_err(|_| Error::Parse {
        line: line_number,
        message: format!("invalid index '{token}'"),
    })?;
    value.checked_sub(1).ok_or_else(|| Error::Parse {
        line: line_number,
        message: format!("index '{token}' is not 1-based"),
    })
}
