//! Axis-aligned bounds and model normalization parameters

use crate::mesh::Mesh;
use crate::point::Point3f;
use serde::{Deserialize, Serialize};

/// Normalization parameters derived from a mesh's bounding box.
///
/// `center` is the midpoint of the axis-aligned bounding box and `extent`
/// is the largest per-axis span. Together they place any model in a
/// predictable spot: translate by `-center`, scale by
/// [`normalization_scale`](BoundsInfo::normalization_scale).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundsInfo {
    /// Midpoint of the axis-aligned bounding box
    pub center: Point3f,
    /// Largest per-axis span of the bounding box
    pub extent: f32,
}

impl BoundsInfo {
    /// Compute bounds from a mesh's vertex set in one pass.
    ///
    /// An empty vertex set yields the degenerate default: center at the
    /// origin, zero extent.
    pub fn compute(mesh: &Mesh) -> Self {
        let mut vertices = mesh.vertices.iter();
        let Some(first) = vertices.next() else {
            return Self::default();
        };

        let mut min = *first;
        let mut max = *first;
        for v in vertices {
            min.x = min.x.min(v.x);
            min.y = min.y.min(v.y);
            min.z = min.z.min(v.z);
            max.x = max.x.max(v.x);
            max.y = max.y.max(v.y);
            max.z = max.z.max(v.z);
        }

        let spans = max - min;
        Self {
            center: Point3f::new(
                (min.x + max.x) / 2.0,
                (min.y + max.y) / 2.0,
                (min.z + max.z) / 2.0,
            ),
            extent: spans.x.max(spans.y).max(spans.z),
        }
    }

    /// Uniform scale that makes the dominant axis span 2 world units.
    ///
    /// Falls back to 1.0 when the extent is zero or not finite, so a
    /// degenerate mesh never divides by zero.
    pub fn normalization_scale(&self) -> f32 {
        if self.extent > 0.0 && self.extent.is_finite() {
            2.0 / self.extent
        } else {
            1.0
        }
    }
}

impl Default for BoundsInfo {
    fn default() -> Self {
        Self {
            center: Point3f::origin(),
            extent: 0.0,
        }
    }
}
