//! A single interactive viewer slot

use crate::camera::{Vantage, ViewState};
use crate::renderer::{Frame, RenderConfig, RenderPipeline};
use dualview_core::{BoundsInfo, Mesh};
use dualview_io::read_mesh;
use std::path::Path;
use std::sync::Arc;
use tracing::warn;

/// Outcome classification for a load request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStatus {
    /// A mesh with geometry was loaded
    Loaded,
    /// The file parsed but contained no vertices; the empty mesh is kept
    EmptyMesh,
    /// The load failed and prior state is untouched
    Failed,
}

/// Result of a load request, with a message suitable for a log panel
#[derive(Debug, Clone)]
pub struct LoadReport {
    pub status: LoadStatus,
    pub message: String,
}

impl LoadReport {
    /// Whether the viewer's mesh was replaced
    pub fn success(&self) -> bool {
        self.status != LoadStatus::Failed
    }

    pub(crate) fn for_mesh(mesh: &Mesh) -> Self {
        if mesh.is_empty() {
            Self {
                status: LoadStatus::EmptyMesh,
                message: "Loaded OBJ model with no vertices".to_string(),
            }
        } else {
            Self {
                status: LoadStatus::Loaded,
                message: format!(
                    "Loaded OBJ model with {} vertices and {} faces",
                    mesh.vertex_count(),
                    mesh.face_count()
                ),
            }
        }
    }
}

/// One viewer slot: an immutable mesh handle, its bounds, the mutable
/// view state, and the pipeline that turns them into frames.
///
/// A failed load leaves the current mesh in place; a successful load of
/// an empty file commits the empty mesh (only the axis gizmo renders).
#[derive(Debug)]
pub struct Viewer {
    vantage: Vantage,
    mesh: Arc<Mesh>,
    bounds: BoundsInfo,
    state: ViewState,
    pipeline: RenderPipeline,
    needs_redraw: bool,
}

impl Viewer {
    /// Create an empty viewer at a vantage point
    pub fn new(vantage: Vantage) -> Self {
        Self::with_config(vantage, RenderConfig::default())
    }

    /// Create an empty viewer with explicit rendering parameters
    pub fn with_config(vantage: Vantage, config: RenderConfig) -> Self {
        Self {
            vantage,
            mesh: Arc::new(Mesh::new()),
            bounds: BoundsInfo::default(),
            state: ViewState::new(vantage),
            pipeline: RenderPipeline::new(config),
            needs_redraw: true,
        }
    }

    /// Load a mesh file into this slot
    pub fn load<P: AsRef<Path>>(&mut self, path: P) -> LoadReport {
        match read_mesh(path.as_ref()) {
            Ok(mesh) => {
                let bounds = BoundsInfo::compute(&mesh);
                let report = LoadReport::for_mesh(&mesh);
                self.set_mesh(Arc::new(mesh), bounds);
                report
            }
            Err(err) => {
                warn!(error = %err, "mesh load failed");
                LoadReport {
                    status: LoadStatus::Failed,
                    message: err.to_string(),
                }
            }
        }
    }

    /// Replace the mesh and its precomputed bounds
    pub fn set_mesh(&mut self, mesh: Arc<Mesh>, bounds: BoundsInfo) {
        self.mesh = mesh;
        self.bounds = bounds;
        self.needs_redraw = true;
    }

    pub fn vantage(&self) -> Vantage {
        self.vantage
    }

    pub fn mesh(&self) -> &Arc<Mesh> {
        &self.mesh
    }

    pub fn bounds(&self) -> BoundsInfo {
        self.bounds
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    /// Whether state changed since the last [`render`](Viewer::render)
    pub fn needs_redraw(&self) -> bool {
        self.needs_redraw
    }

    pub fn pointer_pressed(&mut self, x: f32, y: f32) {
        self.state.pointer_pressed(x, y);
    }

    pub fn pointer_moved(&mut self, x: f32, y: f32, primary_held: bool) {
        if self.state.pointer_moved(x, y, primary_held) {
            self.needs_redraw = true;
        }
    }

    pub fn wheel(&mut self, notches: f32) {
        if self.state.wheel(notches) {
            self.needs_redraw = true;
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.state.resize(width, height);
        self.needs_redraw = true;
    }

    /// Build a frame for the current state and clear the redraw flag
    pub fn render(&mut self) -> Frame {
        self.needs_redraw = false;
        self.pipeline.build_frame(&self.mesh, &self.bounds, &self.state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_obj(name: &str, content: &str) -> String {
        fs::write(name, content).unwrap();
        name.to_string()
    }

    #[test]
    fn test_load_reports_counts() {
        let path = write_obj(
            "test_viewer_counts.obj",
            "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n",
        );
        let mut viewer = Viewer::new(Vantage::PlusZThirty);

        let report = viewer.load(&path);
        assert_eq!(report.status, LoadStatus::Loaded);
        assert!(report.success());
        assert_eq!(report.message, "Loaded OBJ model with 3 vertices and 1 faces");

        let _ = fs::remove_file(path);
    }

    #[test]
    fn test_failed_load_keeps_previous_mesh() {
        let good = write_obj("test_viewer_good.obj", "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n");
        let bad = write_obj("test_viewer_bad.obj", "v 0 0 0\nf 1/a/2 1 1\n");
        let mut viewer = Viewer::new(Vantage::PlusZThirty);

        assert!(viewer.load(&good).success());
        let kept = Arc::clone(viewer.mesh());

        let report = viewer.load(&bad);
        assert_eq!(report.status, LoadStatus::Failed);
        assert!(!report.success());
        assert!(Arc::ptr_eq(viewer.mesh(), &kept));
        assert_eq!(viewer.mesh().vertex_count(), 3);

        let _ = fs::remove_file(good);
        let _ = fs::remove_file(bad);
    }

    #[test]
    fn test_empty_mesh_is_soft_warning() {
        let path = write_obj("test_viewer_empty.obj", "# nothing but comments\n");
        let mut viewer = Viewer::new(Vantage::PlusZThirty);

        let report = viewer.load(&path);
        assert_eq!(report.status, LoadStatus::EmptyMesh);
        assert!(report.success());
        assert!(viewer.mesh().is_empty());

        let _ = fs::remove_file(path);
    }

    #[test]
    fn test_missing_file_reports_cause() {
        let mut viewer = Viewer::new(Vantage::PlusZThirty);
        let report = viewer.load("test_viewer_missing.obj");
        assert_eq!(report.status, LoadStatus::Failed);
        assert!(report.message.contains("file not found"));
        assert!(report.message.contains("test_viewer_missing.obj"));
    }

    #[test]
    fn test_redraw_flag_lifecycle() {
        let mut viewer = Viewer::new(Vantage::PlusZThirty);
        assert!(viewer.needs_redraw());

        viewer.render();
        assert!(!viewer.needs_redraw());

        // A move without the button held tracks position but needs no
        // redraw.
        viewer.pointer_moved(5.0, 5.0, false);
        assert!(!viewer.needs_redraw());

        viewer.wheel(1.0);
        assert!(viewer.needs_redraw());
        viewer.render();

        viewer.pointer_moved(9.0, 5.0, true);
        assert!(viewer.needs_redraw());
        viewer.render();

        viewer.resize(640, 480);
        assert!(viewer.needs_redraw());
    }

    #[test]
    fn test_render_reflects_viewport() {
        let mut viewer = Viewer::new(Vantage::PlusZThirty);
        viewer.resize(600, 300);
        let frame = viewer.render();
        assert_eq!(frame.projection.right, 6.0);
        assert_eq!(frame.projection.top, 3.0);
    }
}
