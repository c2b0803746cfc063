//! # Sim Engine
//!
//! The run-time decision-and-placement core of a small real-time simulation:
//! an entity-component store, a hierarchical scene graph, a behavior-tree
//! engine, and the frame driver that orchestrates them.
//!
//! ## Architecture
//!
//! - **ECS**: entities are generational identifiers; components live in
//!   independently typed stores with multi-kind intersection queries.
//! - **Scene graph**: nodes own their children and derive cached world
//!   matrices from parent-child local transforms, root to leaf, every frame.
//! - **Behavior trees**: per-entity decision logic built from `Sequence`/
//!   `Fallback` composites and condition/action leaves, ticked once per
//!   frame with short-circuiting semantics.
//! - **Frame driver**: per frame, strictly in order — sample input, tick
//!   trees, propagate transforms, submit draws and audio to the backend
//!   collaborators.
//!
//! Rendering, audio devices, input hardware, and resource decoding stay
//! behind the narrow traits in [`backend`]; the core never touches them
//! directly.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use sim_engine::backend::headless::{FixedInput, NullAudio, RecordingRenderer};
//! use sim_engine::scene::SceneNode;
//! use sim_engine::prelude::*;
//!
//! fn main() -> Result<(), EngineError> {
//!     let mut engine = Engine::new(
//!         EngineConfig::default(),
//!         RecordingRenderer::new(),
//!         NullAudio,
//!         FixedInput::idle(),
//!     );
//!
//!     let cube = engine.world_mut().create();
//!     engine.world_mut().attach(cube, TransformComponent::default())?;
//!     engine.scene_root_mut().push_child(SceneNode::from_entity(cube));
//!
//!     engine.run_frame(1.0 / 60.0)?;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names)]

pub mod assets;
pub mod backend;
pub mod behavior;
pub mod core;
pub mod ecs;
pub mod foundation;
pub mod scene;

mod engine;

pub use engine::{Engine, EngineError};

/// Common imports for engine users.
pub mod prelude {
    pub use crate::assets::{
        AssetCache, AssetError, ClipHandle, MeshHandle, ProgramHandle, ResourceLoader,
    };
    pub use crate::backend::{AudioBackend, InputSampler, RenderBackend};
    pub use crate::behavior::{
        BehaviorNode, BehaviorTreeComponent, Fallback, Sequence, Status, TickContext,
    };
    pub use crate::core::config::{Config, EngineConfig};
    pub use crate::ecs::components::{AudioSourceComponent, TransformComponent, VisualComponent};
    pub use crate::ecs::{Component, Entity, World, WorldError};
    pub use crate::foundation::math::{Mat4, Vec3, Vec4};
    pub use crate::{Engine, EngineError};
}
