//! Spatial audio source component

use crate::assets::ClipHandle;
use crate::ecs::Component;
use crate::foundation::math::Vec3;

/// Audio clip emitting from an entity's world position.
///
/// The frame driver derives the emitter's position from the cached world
/// matrix and its velocity from the position delta between frames.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AudioSourceComponent {
    /// Clip resource, owned by the asset cache.
    pub clip: ClipHandle,

    /// Linear gain.
    pub gain: f32,

    /// World position at the previous submission, for velocity derivation.
    pub(crate) last_position: Option<Vec3>,
}

impl Component for AudioSourceComponent {}

impl AudioSourceComponent {
    /// Create a source at unit gain.
    pub fn new(clip: ClipHandle) -> Self {
        Self {
            clip,
            gain: 1.0,
            last_position: None,
        }
    }

    /// Builder: set the gain.
    pub fn with_gain(mut self, gain: f32) -> Self {
        self.gain = gain;
        self
    }
}
