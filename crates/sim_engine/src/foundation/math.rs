//! Math utilities and types
//!
//! Provides the fundamental math types for the simulation core, plus the
//! translate-rotate-scale helpers used by scene-graph propagation.

pub use nalgebra::{
    Matrix3, Matrix4,
    Rotation3,
    Unit,
    Vector2, Vector3, Vector4,
};

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4D vector type
pub type Vec4 = Vector4<f32>;

/// 3x3 matrix type
pub type Mat3 = Matrix3<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// 3D point type
pub type Point3 = nalgebra::Point3<f32>;

/// Compose a local transform matrix from translation, Euler rotation, and scale.
///
/// Rotation angles are in radians and the axes are applied in Y, X, Z order,
/// so the full composition is `T * Ry * Rx * Rz * S`.
pub fn trs_matrix(position: Vec3, rotation: Vec3, scale: Vec3) -> Mat4 {
    Mat4::new_translation(&position)
        * Rotation3::from_axis_angle(&Vector3::y_axis(), rotation.y).to_homogeneous()
        * Rotation3::from_axis_angle(&Vector3::x_axis(), rotation.x).to_homogeneous()
        * Rotation3::from_axis_angle(&Vector3::z_axis(), rotation.z).to_homogeneous()
        * Mat4::new_nonuniform_scaling(&scale)
}

/// Extract the translation column of a transform matrix.
pub fn translation_of(matrix: &Mat4) -> Vec3 {
    Vec3::new(matrix.m14, matrix.m24, matrix.m34)
}

/// Convert degrees to radians
pub fn deg_to_rad(degrees: f32) -> f32 {
    degrees * std::f32::consts::PI / 180.0
}
