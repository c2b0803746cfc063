//! Transform component
//!
//! Pure data component holding an entity's local transform and its cached
//! world matrix. The world matrix is written by scene-graph propagation once
//! per frame and is never edited by hand.

use crate::ecs::Component;
use crate::foundation::math::{self, Mat4, Vec3};

/// Spatial state for a scene entity.
#[derive(Debug, Clone, PartialEq)]
pub struct TransformComponent {
    /// Local translation.
    pub position: Vec3,

    /// Local rotation as Euler angles in radians, applied in Y, X, Z order.
    pub rotation: Vec3,

    /// Local scale factors.
    pub scale: Vec3,

    /// Cached world matrix, recomputed by propagation every frame.
    pub world: Mat4,
}

impl Component for TransformComponent {}

impl Default for TransformComponent {
    fn default() -> Self {
        Self {
            position: Vec3::zeros(),
            rotation: Vec3::zeros(),
            scale: Vec3::new(1.0, 1.0, 1.0),
            world: Mat4::identity(),
        }
    }
}

impl TransformComponent {
    /// Create an identity transform.
    pub fn identity() -> Self {
        Self::default()
    }

    /// Create a transform with only a position.
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Builder: set the Euler rotation (radians, applied Y, X, Z).
    pub fn with_rotation(mut self, rotation: Vec3) -> Self {
        self.rotation = rotation;
        self
    }

    /// Builder: set the scale.
    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    /// Local TRS matrix composed as `T * Ry * Rx * Rz * S`.
    pub fn local_matrix(&self) -> Mat4 {
        math::trs_matrix(self.position, self.rotation, self.scale)
    }

    /// World-space position from the cached world matrix.
    pub fn world_position(&self) -> Vec3 {
        math::translation_of(&self.world)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const EPSILON: f32 = 1e-5;

    #[test]
    fn test_default_is_identity() {
        let transform = TransformComponent::identity();

        assert_eq!(transform.position, Vec3::zeros());
        assert_eq!(transform.rotation, Vec3::zeros());
        assert_eq!(transform.scale, Vec3::new(1.0, 1.0, 1.0));
        assert_relative_eq!(transform.local_matrix(), Mat4::identity(), epsilon = EPSILON);
    }

    #[test]
    fn test_local_matrix_translates() {
        let transform = TransformComponent::from_position(Vec3::new(1.0, 2.0, 3.0));
        let matrix = transform.local_matrix();

        assert_relative_eq!(
            math::translation_of(&matrix),
            Vec3::new(1.0, 2.0, 3.0),
            epsilon = EPSILON
        );
    }

    #[test]
    fn test_world_position_reads_cached_matrix() {
        let mut transform = TransformComponent::identity();
        transform.world = Mat4::new_translation(&Vec3::new(4.0, 5.0, 6.0));

        assert_relative_eq!(
            transform.world_position(),
            Vec3::new(4.0, 5.0, 6.0),
            epsilon = EPSILON
        );
    }
}
