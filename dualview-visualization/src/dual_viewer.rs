//! Two synchronized viewer slots over one shared mesh

use crate::camera::Vantage;
use crate::renderer::Frame;
use crate::viewer::{LoadReport, LoadStatus, Viewer};
use dualview_core::BoundsInfo;
use dualview_io::read_mesh;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// Identifies one of the coordinator's two viewer slots
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotId {
    Top,
    Bottom,
}

/// Owns two viewers that show the same mesh from different vantage
/// points.
///
/// The top slot starts 30 degrees off the +Z axis, the bottom slot 30
/// degrees off the -Z axis. Both slots hold the same `Arc<Mesh>` after a
/// load, but rotate, zoom and resize independently.
#[derive(Debug)]
pub struct DualViewer {
    top: Viewer,
    bottom: Viewer,
}

impl DualViewer {
    /// Create both slots at their fixed vantage points
    pub fn new() -> Self {
        Self {
            top: Viewer::new(Vantage::PlusZThirty),
            bottom: Viewer::new(Vantage::MinusZThirty),
        }
    }

    /// Load a mesh file into both slots.
    ///
    /// Parsing and bounds computation finish before either slot is
    /// touched; on failure both slots keep their current mesh.
    pub fn load<P: AsRef<Path>>(&mut self, path: P) -> LoadReport {
        let path = path.as_ref();
        match read_mesh(path) {
            Ok(mesh) => {
                let bounds = BoundsInfo::compute(&mesh);
                let per_slot = LoadReport::for_mesh(&mesh);
                let mesh = Arc::new(mesh);
                self.top.set_mesh(Arc::clone(&mesh), bounds);
                self.bottom.set_mesh(mesh, bounds);
                info!(path = %path.display(), "mesh committed to both views");

                match per_slot.status {
                    LoadStatus::Loaded => LoadReport {
                        status: LoadStatus::Loaded,
                        message: "Model loaded successfully in both views".to_string(),
                    },
                    _ => per_slot,
                }
            }
            Err(err) => LoadReport {
                status: LoadStatus::Failed,
                message: format!("Error loading model: {err}"),
            },
        }
    }

    pub fn viewer(&self, slot: SlotId) -> &Viewer {
        match slot {
            SlotId::Top => &self.top,
            SlotId::Bottom => &self.bottom,
        }
    }

    fn viewer_mut(&mut self, slot: SlotId) -> &mut Viewer {
        match slot {
            SlotId::Top => &mut self.top,
            SlotId::Bottom => &mut self.bottom,
        }
    }

    /// Display label for a slot's pane
    pub fn label(&self, slot: SlotId) -> &'static str {
        self.viewer(slot).vantage().label()
    }

    pub fn pointer_pressed(&mut self, slot: SlotId, x: f32, y: f32) {
        self.viewer_mut(slot).pointer_pressed(x, y);
    }

    pub fn pointer_moved(&mut self, slot: SlotId, x: f32, y: f32, primary_held: bool) {
        self.viewer_mut(slot).pointer_moved(x, y, primary_held);
    }

    pub fn wheel(&mut self, slot: SlotId, notches: f32) {
        self.viewer_mut(slot).wheel(notches);
    }

    pub fn resize(&mut self, slot: SlotId, width: u32, height: u32) {
        self.viewer_mut(slot).resize(width, height);
    }

    /// Whether either slot has pending changes
    pub fn needs_redraw(&self) -> bool {
        self.top.needs_redraw() || self.bottom.needs_redraw()
    }

    pub fn render(&mut self, slot: SlotId) -> Frame {
        self.viewer_mut(slot).render()
    }
}

impl Default for DualViewer {
    fn default() -> Self {
        Self::new()
    }
}
