//! Drawable component

use crate::assets::{MeshHandle, ProgramHandle};
use crate::ecs::Component;
use crate::foundation::math::Vec4;

/// Mesh, shader program, and tint submitted to the render backend.
///
/// The handles are non-owning references into the asset cache; a dangling
/// handle makes the entity absent from rendering rather than an error.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisualComponent {
    /// RGBA tint.
    pub color: Vec4,

    /// Mesh resource, owned by the asset cache.
    pub mesh: MeshHandle,

    /// Shader program resource, owned by the asset cache.
    pub program: ProgramHandle,
}

impl Component for VisualComponent {}

impl VisualComponent {
    /// Create a visual from a tint and resource handles.
    pub fn new(color: Vec4, mesh: MeshHandle, program: ProgramHandle) -> Self {
        Self {
            color,
            mesh,
            program,
        }
    }
}
