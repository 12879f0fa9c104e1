//! Frame construction: mesh plus view state in, draw primitives out

use crate::camera::{OrthoBounds, ViewState};
use dualview_core::{BoundsInfo, Face, Mesh, Point3f, Rgb, Rgba, Transform3D, Vector3f};

/// Gizmo axis colors: X blue, Y green, Z red
pub const AXIS_X_COLOR: Rgb = [0.0, 0.0, 1.0];
pub const AXIS_Y_COLOR: Rgb = [0.0, 1.0, 0.0];
pub const AXIS_Z_COLOR: Rgb = [1.0, 0.0, 0.0];

/// Fixed rendering parameters for a viewer slot
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Gizmo axis length in world units
    pub axis_length: f32,
    /// Advisory line width for the display surface
    pub line_width: f32,
    /// Flat model color
    pub model_color: Rgba,
    /// Clear color
    pub background_color: Rgba,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            axis_length: 1.0,
            line_width: 1.5,
            model_color: [0.7, 0.7, 0.9, 1.0],
            background_color: [0.2, 0.2, 0.2, 1.0],
        }
    }
}

/// One draw command, with positions already in view space
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Line {
        start: Point3f,
        end: Point3f,
        color: Rgb,
    },
    Triangle {
        positions: [Point3f; 3],
        /// Per-vertex normals; `None` leaves the surface's flat default
        normals: [Option<Vector3f>; 3],
    },
}

/// Counters for geometry silently skipped while building a frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Triangles dropped because a vertex index was out of range
    pub triangles_dropped: usize,
    /// Normal references dropped while their triangle survived
    pub normals_dropped: usize,
    /// Faces with fewer than three references
    pub degenerate_faces: usize,
}

impl FrameStats {
    /// True when nothing was skipped
    pub fn is_clean(&self) -> bool {
        *self == Self::default()
    }
}

/// The ordered primitive list for one redraw, plus everything a display
/// surface needs to present it
#[derive(Debug, Clone)]
pub struct Frame {
    /// Gizmo lines first, then model triangles, in draw order
    pub primitives: Vec<Primitive>,
    pub projection: OrthoBounds,
    pub clear_color: Rgba,
    pub model_color: Rgba,
    pub line_width: f32,
    pub stats: FrameStats,
}

/// Builds frames from a mesh, its bounds, and a view state.
///
/// The view transform is `zoom * Rz * Rx * Ry`; the model additionally
/// gets `scale(2 / extent) * translate(-center)` applied first, so its
/// dominant axis spans 2 world units centered at the origin. Normals
/// rotate with the view but ignore zoom and model normalization.
#[derive(Debug, Clone, Default)]
pub struct RenderPipeline {
    config: RenderConfig,
}

impl RenderPipeline {
    pub fn new(config: RenderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Build one frame. Stateless with respect to the pipeline, so
    /// repeated calls with unchanged inputs produce identical frames.
    pub fn build_frame(&self, mesh: &Mesh, bounds: &BoundsInfo, state: &ViewState) -> Frame {
        let rotation = Transform3D::from_rotation(&state.rotation);
        let view = Transform3D::uniform_scaling(state.zoom) * rotation;
        let model = view
            * Transform3D::uniform_scaling(bounds.normalization_scale())
            * Transform3D::translation(-bounds.center.coords);

        let mut primitives = Vec::with_capacity(3 + mesh.face_count());
        self.push_axes(&mut primitives, &view);

        let mut stats = FrameStats::default();
        for face in &mesh.faces {
            push_face(&mut primitives, mesh, face, &model, &rotation, &mut stats);
        }

        Frame {
            primitives,
            projection: state.ortho(),
            clear_color: self.config.background_color,
            model_color: self.config.model_color,
            line_width: self.config.line_width,
            stats,
        }
    }

    /// Unit axis lines from the origin, transformed by the view only.
    /// The gizmo shares zoom and rotation with the model but is not
    /// re-centered or re-scaled with it.
    fn push_axes(&self, primitives: &mut Vec<Primitive>, view: &Transform3D) {
        let origin = view.transform_point(&Point3f::origin());
        let length = self.config.axis_length;
        let axes = [
            (Point3f::new(length, 0.0, 0.0), AXIS_X_COLOR),
            (Point3f::new(0.0, length, 0.0), AXIS_Y_COLOR),
            (Point3f::new(0.0, 0.0, length), AXIS_Z_COLOR),
        ];
        for (tip, color) in axes {
            primitives.push(Primitive::Line {
                start: origin,
                end: view.transform_point(&tip),
                color,
            });
        }
    }
}

/// Fan-triangulate one face and append the surviving triangles.
///
/// A face with n references yields n - 2 triangles anchored at the first
/// reference. A triangle whose vertex index cannot be resolved is
/// dropped; an unresolvable normal index only loses that vertex's
/// normal. Both are counted in `stats`.
fn push_face(
    primitives: &mut Vec<Primitive>,
    mesh: &Mesh,
    face: &Face,
    model: &Transform3D,
    rotation: &Transform3D,
    stats: &mut FrameStats,
) {
    if face.len() < 3 {
        stats.degenerate_faces += 1;
        return;
    }

    for i in 2..face.len() {
        let corners = [&face[0], &face[i - 1], &face[i]];
        let mut positions = [Point3f::origin(); 3];
        let mut normals = [None; 3];
        let mut resolved = true;

        for (slot, corner) in corners.iter().enumerate() {
            let Some(position) = mesh.position(corner) else {
                resolved = false;
                break;
            };
            positions[slot] = model.transform_point(&position);
            normals[slot] = match (corner.normal, mesh.normal(corner)) {
                (Some(_), Some(normal)) => Some(rotation.transform_vector(&normal)),
                (Some(_), None) => {
                    stats.normals_dropped += 1;
                    None
                }
                (None, _) => None,
            };
        }

        if resolved {
            primitives.push(Primitive::Triangle { positions, normals });
        } else {
            stats.triangles_dropped += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::Vantage;
    use approx::assert_relative_eq;
    use dualview_core::FaceVertex;

    fn triangle_mesh() -> Mesh {
        Mesh {
            vertices: vec![
                Point3f::new(0.0, 0.0, 0.0),
                Point3f::new(1.0, 0.0, 0.0),
                Point3f::new(0.0, 1.0, 0.0),
            ],
            normals: vec![Vector3f::new(0.0, 0.0, 1.0)],
            faces: vec![vec![
                FaceVertex::new(0, Some(0)),
                FaceVertex::new(1, Some(0)),
                FaceVertex::new(2, Some(0)),
            ]],
        }
    }

    fn frame_for(mesh: &Mesh, state: &ViewState) -> Frame {
        let bounds = BoundsInfo::compute(mesh);
        RenderPipeline::default().build_frame(mesh, &bounds, state)
    }

    fn triangles(frame: &Frame) -> Vec<&Primitive> {
        frame
            .primitives
            .iter()
            .filter(|p| matches!(p, Primitive::Triangle { .. }))
            .collect()
    }

    #[test]
    fn test_frame_starts_with_axis_gizmo() {
        let state = ViewState::new(Vantage::PlusZThirty);
        let frame = frame_for(&Mesh::new(), &state);

        assert_eq!(frame.primitives.len(), 3);
        let colors: Vec<Rgb> = frame
            .primitives
            .iter()
            .map(|p| match p {
                Primitive::Line { color, .. } => *color,
                other => panic!("expected line, got {other:?}"),
            })
            .collect();
        assert_eq!(colors, vec![AXIS_X_COLOR, AXIS_Y_COLOR, AXIS_Z_COLOR]);

        // Default zoom 2.0 scales the unit axes.
        match &frame.primitives[0] {
            Primitive::Line { start, end, .. } => {
                assert_relative_eq!(start.x, 0.0);
                assert_relative_eq!(end.x, 2.0, epsilon = 1e-6);
                assert_relative_eq!(end.y, 0.0, epsilon = 1e-6);
            }
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_gizmo_rotates_with_view() {
        let mut state = ViewState::new(Vantage::PlusZThirty);
        state.rotation.z = 90.0;
        let frame = frame_for(&Mesh::new(), &state);

        // The X axis line now points along +Y.
        match &frame.primitives[0] {
            Primitive::Line { end, .. } => {
                assert_relative_eq!(end.x, 0.0, epsilon = 1e-5);
                assert_relative_eq!(end.y, 2.0, epsilon = 1e-5);
            }
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_fan_triangulation_shares_anchor() {
        let mesh = Mesh {
            vertices: vec![
                Point3f::new(0.0, 0.0, 0.0),
                Point3f::new(2.0, 0.0, 0.0),
                Point3f::new(3.0, 1.0, 0.0),
                Point3f::new(2.0, 2.0, 0.0),
                Point3f::new(0.0, 2.0, 0.0),
            ],
            normals: vec![],
            faces: vec![(0..5).map(|v| FaceVertex::new(v, None)).collect()],
        };
        let state = ViewState::new(Vantage::PlusZThirty);
        let frame = frame_for(&mesh, &state);

        let tris = triangles(&frame);
        assert_eq!(tris.len(), 3);

        let anchor = match tris[0] {
            Primitive::Triangle { positions, .. } => positions[0],
            _ => unreachable!(),
        };
        for tri in &tris {
            match tri {
                Primitive::Triangle { positions, .. } => {
                    assert_relative_eq!(positions[0].x, anchor.x, epsilon = 1e-6);
                    assert_relative_eq!(positions[0].y, anchor.y, epsilon = 1e-6);
                    assert_relative_eq!(positions[0].z, anchor.z, epsilon = 1e-6);
                }
                _ => unreachable!(),
            }
        }
    }

    #[test]
    fn test_model_is_normalized_and_centered() {
        let mesh = Mesh {
            vertices: vec![
                Point3f::new(0.0, 0.0, 0.0),
                Point3f::new(4.0, 0.0, 0.0),
                Point3f::new(0.0, 2.0, 0.0),
            ],
            normals: vec![],
            faces: vec![vec![
                FaceVertex::new(0, None),
                FaceVertex::new(1, None),
                FaceVertex::new(2, None),
            ]],
        };
        let mut state = ViewState::new(Vantage::PlusZThirty);
        state.zoom = 1.0;
        let frame = frame_for(&mesh, &state);

        // Extent 4 gives scale 0.5 around center (2, 1, 0): the x span
        // maps to [-1, 1].
        match triangles(&frame)[0] {
            Primitive::Triangle { positions, .. } => {
                assert_relative_eq!(positions[0].x, -1.0, epsilon = 1e-6);
                assert_relative_eq!(positions[1].x, 1.0, epsilon = 1e-6);
                assert_relative_eq!(positions[0].y, -0.5, epsilon = 1e-6);
            }
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_zero_extent_mesh_renders_finite() {
        let mesh = Mesh {
            vertices: vec![Point3f::new(5.0, 5.0, 5.0)],
            normals: vec![],
            faces: vec![vec![
                FaceVertex::new(0, None),
                FaceVertex::new(0, None),
                FaceVertex::new(0, None),
            ]],
        };
        let state = ViewState::new(Vantage::PlusZThirty);
        let frame = frame_for(&mesh, &state);

        assert_eq!(triangles(&frame).len(), 1);
        for primitive in &frame.primitives {
            if let Primitive::Triangle { positions, .. } = primitive {
                for p in positions {
                    assert!(p.x.is_finite() && p.y.is_finite() && p.z.is_finite());
                    // Scale falls back to 1, so the centered vertex sits
                    // at the origin.
                    assert_relative_eq!(p.x, 0.0, epsilon = 1e-6);
                }
            }
        }
    }

    #[test]
    fn test_out_of_range_vertex_drops_triangle() {
        let mut mesh = triangle_mesh();
        mesh.faces.push(vec![
            FaceVertex::new(0, None),
            FaceVertex::new(1, None),
            FaceVertex::new(9, None),
        ]);
        let state = ViewState::new(Vantage::PlusZThirty);
        let frame = frame_for(&mesh, &state);

        assert_eq!(triangles(&frame).len(), 1);
        assert_eq!(frame.stats.triangles_dropped, 1);
        assert_eq!(frame.stats.degenerate_faces, 0);
    }

    #[test]
    fn test_out_of_range_normal_keeps_triangle() {
        let mut mesh = triangle_mesh();
        mesh.faces[0][1] = FaceVertex::new(1, Some(9));
        let state = ViewState::new(Vantage::PlusZThirty);
        let frame = frame_for(&mesh, &state);

        let tris = triangles(&frame);
        assert_eq!(tris.len(), 1);
        match tris[0] {
            Primitive::Triangle { normals, .. } => {
                assert!(normals[0].is_some());
                assert!(normals[1].is_none());
                assert!(normals[2].is_some());
            }
            _ => unreachable!(),
        }
        assert_eq!(frame.stats.normals_dropped, 1);
        assert_eq!(frame.stats.triangles_dropped, 0);
    }

    #[test]
    fn test_degenerate_face_is_counted() {
        let mut mesh = triangle_mesh();
        mesh.faces
            .push(vec![FaceVertex::new(0, None), FaceVertex::new(1, None)]);
        let state = ViewState::new(Vantage::PlusZThirty);
        let frame = frame_for(&mesh, &state);

        assert_eq!(triangles(&frame).len(), 1);
        assert_eq!(frame.stats.degenerate_faces, 1);
        assert!(!frame.stats.is_clean());
    }

    #[test]
    fn test_normals_rotate_but_ignore_zoom() {
        let mesh = triangle_mesh();
        let mut state = ViewState::new(Vantage::PlusZThirty);
        state.rotation.x = 90.0;
        state.zoom = 5.0;
        let frame = frame_for(&mesh, &state);

        match triangles(&frame)[0] {
            Primitive::Triangle { normals, .. } => {
                let n = normals[0].unwrap();
                assert_relative_eq!(n.norm(), 1.0, epsilon = 1e-5);
                assert_relative_eq!(n.y, -1.0, epsilon = 1e-5);
            }
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_frames_are_reproducible() {
        let mesh = triangle_mesh();
        let bounds = BoundsInfo::compute(&mesh);
        let mut state = ViewState::new(Vantage::MinusZThirty);
        state.wheel(3.0);
        let pipeline = RenderPipeline::default();

        let first = pipeline.build_frame(&mesh, &bounds, &state);
        let second = pipeline.build_frame(&mesh, &bounds, &state);
        assert_eq!(first.primitives, second.primitives);
        assert_eq!(first.stats, second.stats);
    }

    #[test]
    fn test_frame_carries_config_colors() {
        let state = ViewState::new(Vantage::PlusZThirty);
        let frame = frame_for(&Mesh::new(), &state);
        assert_eq!(frame.clear_color, [0.2, 0.2, 0.2, 1.0]);
        assert_eq!(frame.model_color, [0.7, 0.7, 0.9, 1.0]);
        assert_relative_eq!(frame.line_width, 1.5);
    }
}
