//! Per-viewport view state and input handling

use dualview_core::RotationDegrees;
use nalgebra::Matrix4;

/// Degrees of rotation added per pixel of pointer drag
pub const ROTATE_DEGREES_PER_PIXEL: f32 = 0.5;

/// Zoom multiplier applied per wheel notch
pub const ZOOM_STEP: f32 = 1.1;

/// Inclusive zoom clamp range
pub const ZOOM_MIN: f32 = 0.1;
pub const ZOOM_MAX: f32 = 10.0;

/// Zoom factor a fresh viewport starts at
pub const DEFAULT_ZOOM: f32 = 2.0;

/// Viewport dimensions before the first resize
pub const DEFAULT_VIEWPORT: (u32, u32) = (300, 300);

/// World-space half-extent shown along the narrower screen dimension
pub const ORTHO_HALF_EXTENT: f32 = 3.0;

/// Fixed clip planes of the orthographic volume
pub const NEAR_PLANE: f32 = -100.0;
pub const FAR_PLANE: f32 = 100.0;

/// Orthographic clip bounds in world units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrthoBounds {
    pub left: f32,
    pub right: f32,
    pub bottom: f32,
    pub top: f32,
    pub near: f32,
    pub far: f32,
}

impl OrthoBounds {
    /// Bounds showing [`ORTHO_HALF_EXTENT`] world units along the narrower
    /// screen dimension, with the other dimension widened to preserve
    /// aspect. One world unit stays one world unit regardless of window
    /// shape.
    pub fn for_viewport(width: u32, height: u32) -> Self {
        let w = width.max(1) as f32;
        let h = height.max(1) as f32;
        let aspect = w / h;
        let size = ORTHO_HALF_EXTENT;
        let (left, right, bottom, top) = if width <= height {
            (-size, size, -size / aspect, size / aspect)
        } else {
            (-size * aspect, size * aspect, -size, size)
        };
        Self {
            left,
            right,
            bottom,
            top,
            near: NEAR_PLANE,
            far: FAR_PLANE,
        }
    }

    /// Orthographic projection matrix over these bounds, for surfaces
    /// that consume matrices rather than raw bounds
    pub fn projection_matrix(&self) -> Matrix4<f32> {
        Matrix4::new_orthographic(
            self.left,
            self.right,
            self.bottom,
            self.top,
            self.near,
            self.far,
        )
    }
}

impl Default for OrthoBounds {
    fn default() -> Self {
        Self::for_viewport(DEFAULT_VIEWPORT.0, DEFAULT_VIEWPORT.1)
    }
}

/// Named fixed vantage points for viewer slots
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Vantage {
    /// 30 degrees off the +Z axis
    PlusZThirty,
    /// 30 degrees off the -Z axis
    MinusZThirty,
}

impl Vantage {
    /// Initial rotation angles for this vantage
    pub fn rotation(&self) -> RotationDegrees {
        match self {
            Vantage::PlusZThirty => RotationDegrees::new(0.0, 0.0, 0.0),
            Vantage::MinusZThirty => RotationDegrees::new(-60.0, 90.0, 90.0),
        }
    }

    /// Display label for the pane showing this vantage
    pub fn label(&self) -> &'static str {
        match self {
            Vantage::PlusZThirty => "View 1: +30° from +Z axis",
            Vantage::MinusZThirty => "View 2: +30° from -Z axis",
        }
    }
}

/// Per-viewport transform state driven by pointer and wheel input.
///
/// Rotation angles accumulate without normalization; zoom is clamped to
/// `[ZOOM_MIN, ZOOM_MAX]` after every change. The pointer position is
/// tracked across moves whether or not a button is held, so a drag that
/// starts anywhere never jumps.
#[derive(Debug, Clone)]
pub struct ViewState {
    pub rotation: RotationDegrees,
    pub zoom: f32,
    last_pointer: Option<(f32, f32)>,
    viewport: (u32, u32),
    ortho: OrthoBounds,
}

impl ViewState {
    /// Create view state at a vantage point's initial orientation
    pub fn new(vantage: Vantage) -> Self {
        Self {
            rotation: vantage.rotation(),
            zoom: DEFAULT_ZOOM,
            last_pointer: None,
            viewport: DEFAULT_VIEWPORT,
            ortho: OrthoBounds::default(),
        }
    }

    /// Last viewport size passed to [`resize`](ViewState::resize)
    pub fn viewport(&self) -> (u32, u32) {
        self.viewport
    }

    /// Orthographic bounds derived from the current viewport
    pub fn ortho(&self) -> OrthoBounds {
        self.ortho
    }

    /// Record the pointer position at the start of a drag
    pub fn pointer_pressed(&mut self, x: f32, y: f32) {
        self.last_pointer = Some((x, y));
    }

    /// Track pointer movement, rotating while the primary button is held.
    ///
    /// Horizontal motion yaws, vertical motion pitches, both at
    /// [`ROTATE_DEGREES_PER_PIXEL`]. Returns true when the rotation
    /// changed.
    pub fn pointer_moved(&mut self, x: f32, y: f32, primary_held: bool) -> bool {
        let rotated = match (self.last_pointer, primary_held) {
            (Some((last_x, last_y)), true) => {
                self.rotation.y += (x - last_x) * ROTATE_DEGREES_PER_PIXEL;
                self.rotation.x += (y - last_y) * ROTATE_DEGREES_PER_PIXEL;
                true
            }
            _ => false,
        };
        self.last_pointer = Some((x, y));
        rotated
    }

    /// Apply wheel notches; positive zooms in, one notch scales by
    /// [`ZOOM_STEP`]. Returns true when the zoom changed.
    pub fn wheel(&mut self, notches: f32) -> bool {
        if notches == 0.0 || !notches.is_finite() {
            return false;
        }
        if notches > 0.0 {
            self.zoom *= ZOOM_STEP.powf(notches);
        } else {
            self.zoom /= ZOOM_STEP.powf(-notches);
        }
        self.zoom = self.zoom.clamp(ZOOM_MIN, ZOOM_MAX);
        true
    }

    /// Recompute the orthographic bounds for a new viewport size
    pub fn resize(&mut self, width: u32, height: u32) {
        self.viewport = (width, height);
        self.ortho = OrthoBounds::for_viewport(width, height);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_fresh_state_defaults() {
        let state = ViewState::new(Vantage::PlusZThirty);
        assert_eq!(state.rotation, RotationDegrees::default());
        assert_relative_eq!(state.zoom, 2.0);
        assert_eq!(state.viewport(), (300, 300));
        assert_relative_eq!(state.ortho().left, -3.0);
        assert_relative_eq!(state.ortho().top, 3.0);
    }

    #[test]
    fn test_vantage_rotations() {
        let second = Vantage::MinusZThirty.rotation();
        assert_relative_eq!(second.x, -60.0);
        assert_relative_eq!(second.y, 90.0);
        assert_relative_eq!(second.z, 90.0);
        assert_eq!(Vantage::PlusZThirty.label(), "View 1: +30° from +Z axis");
    }

    #[test]
    fn test_wheel_steps_zoom() {
        let mut state = ViewState::new(Vantage::PlusZThirty);
        assert!(state.wheel(1.0));
        assert_relative_eq!(state.zoom, 2.2, epsilon = 1e-5);
        assert!(state.wheel(-1.0));
        assert_relative_eq!(state.zoom, 2.0, epsilon = 1e-5);
    }

    #[test]
    fn test_zoom_clamps_at_ceiling() {
        let mut state = ViewState::new(Vantage::PlusZThirty);
        for _ in 0..30 {
            state.wheel(1.0);
        }
        // 2.0 * 1.1^30 would be ~34.9; the clamp wins long before that.
        assert_relative_eq!(state.zoom, ZOOM_MAX);
    }

    #[test]
    fn test_zoom_clamps_at_floor() {
        let mut state = ViewState::new(Vantage::PlusZThirty);
        for _ in 0..50 {
            state.wheel(-1.0);
        }
        assert_relative_eq!(state.zoom, ZOOM_MIN);
    }

    #[test]
    fn test_zero_wheel_is_noop() {
        let mut state = ViewState::new(Vantage::PlusZThirty);
        assert!(!state.wheel(0.0));
        assert_relative_eq!(state.zoom, DEFAULT_ZOOM);
    }

    #[test]
    fn test_drag_accumulates_rotation() {
        let mut state = ViewState::new(Vantage::PlusZThirty);
        state.pointer_pressed(10.0, 10.0);
        assert!(state.pointer_moved(14.0, 16.0, true));
        assert_relative_eq!(state.rotation.y, 2.0);
        assert_relative_eq!(state.rotation.x, 3.0);

        // A second move continues from the recorded position.
        assert!(state.pointer_moved(14.0, 10.0, true));
        assert_relative_eq!(state.rotation.x, 0.0);
    }

    #[test]
    fn test_move_without_press_only_records() {
        let mut state = ViewState::new(Vantage::PlusZThirty);
        assert!(!state.pointer_moved(50.0, 50.0, false));
        assert_eq!(state.rotation, RotationDegrees::default());

        // The button goes down elsewhere without a press event; the drag
        // still measures from the last recorded position.
        assert!(state.pointer_moved(60.0, 50.0, true));
        assert_relative_eq!(state.rotation.y, 5.0);
    }

    #[test]
    fn test_first_move_with_button_held_does_not_rotate() {
        let mut state = ViewState::new(Vantage::PlusZThirty);
        assert!(!state.pointer_moved(50.0, 50.0, true));
        assert_eq!(state.rotation, RotationDegrees::default());
    }

    #[test]
    fn test_resize_preserves_narrow_dimension() {
        let mut state = ViewState::new(Vantage::PlusZThirty);

        state.resize(300, 600);
        let tall = state.ortho();
        assert_relative_eq!(tall.right, 3.0);
        assert_relative_eq!(tall.top, 6.0);

        state.resize(600, 300);
        let wide = state.ortho();
        assert_relative_eq!(wide.right, 6.0);
        assert_relative_eq!(wide.top, 3.0);
        assert_relative_eq!(wide.near, -100.0);
        assert_relative_eq!(wide.far, 100.0);
    }

    #[test]
    fn test_degenerate_viewport_is_square() {
        let mut state = ViewState::new(Vantage::PlusZThirty);
        state.resize(0, 0);
        assert_relative_eq!(state.ortho().right, 3.0);
        assert_relative_eq!(state.ortho().top, 3.0);
    }
}
