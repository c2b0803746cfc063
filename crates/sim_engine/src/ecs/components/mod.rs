//! Built-in component types

pub mod audio_source;
pub mod transform;
pub mod visual;

pub use audio_source::AudioSourceComponent;
pub use transform::TransformComponent;
pub use visual::VisualComponent;
