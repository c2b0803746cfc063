//! Narrow interfaces to the excluded collaborators
//!
//! Rendering, spatial audio playback, input sampling, and resource
//! materialization live behind these traits. The core supplies world
//! matrices, positions, and velocities; it never touches graphics-API or
//! audio-device state directly.

pub mod headless;

use crate::assets::{ClipData, MeshData, ProgramData};
use crate::foundation::math::{Mat4, Vec3, Vec4};

/// Spatial playback parameters derived from a world transform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpatialParams {
    /// World-space emitter position.
    pub position: Vec3,

    /// World-space emitter velocity.
    pub velocity: Vec3,

    /// Linear gain.
    pub gain: f32,
}

/// Draws submitted geometry.
pub trait RenderBackend {
    /// Draw one mesh with the given program, tint, and world matrix.
    fn draw(&mut self, mesh: &MeshData, program: &ProgramData, color: Vec4, world: &Mat4);
}

/// Updates spatial playback state for audio sources.
pub trait AudioBackend {
    /// Update one source's spatial parameters.
    fn update_source(&mut self, clip: &ClipData, params: &SpatialParams);
}

/// Samples the input device once per frame.
pub trait InputSampler {
    /// Normalized movement direction for this frame (zero when idle).
    fn sample(&mut self) -> Vec3;
}
