//! 3D transformation utilities

use nalgebra::{Matrix4, Point3, Rotation3, Vector3};
use serde::{Deserialize, Serialize};

/// Accumulated rotation angles in degrees about the fixed coordinate axes.
///
/// Angles are unbounded; wrap-around is implicit in the trigonometry, so
/// 370 degrees and 10 degrees produce the same matrix.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RotationDegrees {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl RotationDegrees {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

/// A 3D transformation that can be applied to points and vectors
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform3D {
    pub matrix: Matrix4<f32>,
}

impl Transform3D {
    /// Create an identity transformation
    pub fn identity() -> Self {
        Self {
            matrix: Matrix4::identity(),
        }
    }

    /// Create a translation transformation
    pub fn translation(translation: Vector3<f32>) -> Self {
        Self {
            matrix: Matrix4::new_translation(&translation),
        }
    }

    /// Create a uniform scaling transformation
    pub fn uniform_scaling(scale: f32) -> Self {
        Self {
            matrix: Matrix4::new_scaling(scale),
        }
    }

    /// Create a rotation about the X axis, in degrees
    pub fn rotation_x_deg(degrees: f32) -> Self {
        Self {
            matrix: Rotation3::from_axis_angle(&Vector3::x_axis(), degrees.to_radians())
                .to_homogeneous(),
        }
    }

    /// Create a rotation about the Y axis, in degrees
    pub fn rotation_y_deg(degrees: f32) -> Self {
        Self {
            matrix: Rotation3::from_axis_angle(&Vector3::y_axis(), degrees.to_radians())
                .to_homogeneous(),
        }
    }

    /// Create a rotation about the Z axis, in degrees
    pub fn rotation_z_deg(degrees: f32) -> Self {
        Self {
            matrix: Rotation3::from_axis_angle(&Vector3::z_axis(), degrees.to_radians())
                .to_homogeneous(),
        }
    }

    /// Combined rotation from accumulated angles.
    ///
    /// Applies Y first, then X, then Z (`Rz * Rx * Ry`), the viewer's
    /// orientation convention.
    pub fn from_rotation(rotation: &RotationDegrees) -> Self {
        Self::rotation_z_deg(rotation.z)
            .compose(Self::rotation_x_deg(rotation.x))
            .compose(Self::rotation_y_deg(rotation.y))
    }

    /// Apply the transformation to a point
    pub fn transform_point(&self, point: &Point3<f32>) -> Point3<f32> {
        let homogeneous = self.matrix * point.to_homogeneous();
        Point3::from_homogeneous(homogeneous).unwrap_or(*point)
    }

    /// Apply the transformation to a vector
    pub fn transform_vector(&self, vector: &Vector3<f32>) -> Vector3<f32> {
        self.matrix.fixed_view::<3, 3>(0, 0) * vector
    }

    /// Compose this transformation with another
    pub fn compose(self, other: Self) -> Self {
        Self {
            matrix: self.matrix * other.matrix,
        }
    }
}

impl Default for Transform3D {
    fn default() -> Self {
        Self::identity()
    }
}

impl std::ops::Mul for Transform3D {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        self.compose(rhs)
    }
}

impl From<Matrix4<f32>> for Transform3D {
    fn from(matrix: Matrix4<f32>) -> Self {
        Self { matrix }
    }
}
