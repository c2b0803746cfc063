//! Frame driver
//!
//! Owns the world, the scene root, the asset cache, and the backend
//! collaborators, and advances the simulation one frame at a time in a
//! strict order: input sampling, behavior-tree ticking, transform
//! propagation, draw/audio submission.

use thiserror::Error;

use crate::assets::{AssetCache, AssetError};
use crate::backend::{AudioBackend, InputSampler, RenderBackend, SpatialParams};
use crate::behavior::{BehaviorError, BehaviorTreeComponent, TickContext};
use crate::core::config::EngineConfig;
use crate::ecs::components::{AudioSourceComponent, TransformComponent, VisualComponent};
use crate::ecs::{World, WorldError};
use crate::foundation::math::{Mat4, Vec3};
use crate::foundation::time::Timer;
use crate::scene::SceneNode;

/// Engine-level errors.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Store failure; indicates a lifetime bug in scene or tree assembly.
    #[error("world error: {0}")]
    World(#[from] WorldError),

    /// Behavior-tree build or tick failure.
    #[error("behavior error: {0}")]
    Behavior(#[from] BehaviorError),

    /// Resource loading failure, surfaced at init time.
    #[error("asset error: {0}")]
    Asset(#[from] AssetError),
}

/// Simulation session: all mutable state plus the backend collaborators.
///
/// Generic over its collaborators so applications keep typed access to their
/// backends (a recording renderer in tests, a real one in production).
pub struct Engine<R, A, I> {
    world: World,
    scene_root: SceneNode,
    assets: AssetCache,
    renderer: R,
    audio: A,
    input: I,
    timer: Timer,
    config: EngineConfig,
}

impl<R: RenderBackend, A: AudioBackend, I: InputSampler> Engine<R, A, I> {
    /// Assemble a session around the given collaborators.
    pub fn new(config: EngineConfig, renderer: R, audio: A, input: I) -> Self {
        log::info!("initializing simulation session");
        Self {
            world: World::new(),
            scene_root: SceneNode::new().with_name("root"),
            assets: AssetCache::new(),
            renderer,
            audio,
            input,
            timer: Timer::new(),
            config,
        }
    }

    /// The entity-component store.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Mutable access to the entity-component store.
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// The scene-graph root.
    pub fn scene_root(&self) -> &SceneNode {
        &self.scene_root
    }

    /// Mutable access to the scene-graph root.
    pub fn scene_root_mut(&mut self) -> &mut SceneNode {
        &mut self.scene_root
    }

    /// The asset cache.
    pub fn assets(&self) -> &AssetCache {
        &self.assets
    }

    /// Mutable access to the asset cache.
    pub fn assets_mut(&mut self) -> &mut AssetCache {
        &mut self.assets
    }

    /// The active configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The render backend.
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Mutable access to the render backend.
    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    /// The audio backend.
    pub fn audio(&self) -> &A {
        &self.audio
    }

    /// The frame timer.
    pub fn timer(&self) -> &Timer {
        &self.timer
    }

    /// Advance one frame using the internal timer.
    ///
    /// The measured delta is clamped to `max_delta_time`, or replaced
    /// entirely by `fixed_delta_time` when configured.
    ///
    /// # Errors
    /// See [`Engine::run_frame`].
    pub fn step(&mut self) -> Result<(), EngineError> {
        let measured = self.timer.tick();
        let delta = self
            .config
            .fixed_delta_time
            .unwrap_or_else(|| measured.min(self.config.max_delta_time));
        self.run_frame(delta)
    }

    /// Advance one frame with an explicit delta, in strict order: sample
    /// input, tick behavior trees, propagate the scene graph, submit draws
    /// and audio.
    ///
    /// # Errors
    /// Fails fast on store errors raised by behavior leaves; the world is
    /// left structurally intact and the next frame recomputes from fresh
    /// state. Dangling resource handles are not errors — the affected entity
    /// is simply skipped at submission.
    pub fn run_frame(&mut self, delta: f32) -> Result<(), EngineError> {
        let input = self.input.sample();

        self.tick_behaviors(delta, input)?;
        self.scene_root.propagate(&mut self.world, &Mat4::identity());
        self.submit_draws();
        self.submit_audio(delta);

        Ok(())
    }

    /// Tick every entity owning a behavior tree.
    ///
    /// The tree store is taken out of the world for the duration, so trees
    /// can freely mutate the rest of the store they live in; it is restored
    /// before any error propagates.
    fn tick_behaviors(&mut self, delta: f32, input: Vec3) -> Result<(), EngineError> {
        let Some(mut trees) = self.world.take_store::<BehaviorTreeComponent>() else {
            return Ok(());
        };

        let mut outcome = Ok(());
        for (&entity, tree) in &mut trees.components {
            let mut ctx = TickContext {
                world: &mut self.world,
                entity,
                delta,
                input,
            };
            match tree.tick(&mut ctx) {
                Ok(status) => log::trace!("entity {} tree -> {status:?}", entity.index()),
                Err(error) => {
                    outcome = Err(error);
                    break;
                }
            }
        }

        self.world.put_store(trees);
        outcome.map_err(EngineError::from)
    }

    fn submit_draws(&mut self) {
        let Self {
            world,
            assets,
            renderer,
            ..
        } = self;
        world.each2::<TransformComponent, VisualComponent, _>(|entity, transform, visual| {
            match (assets.mesh(visual.mesh), assets.program(visual.program)) {
                (Some(mesh), Some(program)) => {
                    renderer.draw(mesh, program, visual.color, &transform.world);
                }
                _ => log::debug!(
                    "entity {} has dangling visual resources, skipping draw",
                    entity.index()
                ),
            }
        });
    }

    fn submit_audio(&mut self, delta: f32) {
        let Self {
            world,
            assets,
            audio,
            ..
        } = self;
        world.each2::<TransformComponent, AudioSourceComponent, _>(|entity, transform, source| {
            let Some(clip) = assets.clip(source.clip) else {
                log::debug!(
                    "entity {} has a dangling audio clip, skipping update",
                    entity.index()
                );
                return;
            };
            let position = transform.world_position();
            let velocity = match source.last_position {
                Some(previous) if delta > 0.0 => (position - previous) / delta,
                _ => Vec3::zeros(),
            };
            source.last_position = Some(position);
            audio.update_source(
                clip,
                &SpatialParams {
                    position,
                    velocity,
                    gain: source.gain,
                },
            );
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::headless::{
        FailingLoader, FixedInput, RecordingAudio, RecordingRenderer, StubLoader,
    };
    use crate::behavior::{Fallback, IsNear, MoveTowards, Sequence, CheckInput, MoveFromInput};
    use crate::ecs::Entity;
    use crate::foundation::math::Vec4;
    use approx::assert_relative_eq;

    const EPSILON: f32 = 1e-5;

    type TestEngine = Engine<RecordingRenderer, RecordingAudio, FixedInput>;

    fn test_engine(input: FixedInput) -> TestEngine {
        Engine::new(
            EngineConfig::default(),
            RecordingRenderer::new(),
            RecordingAudio::new(),
            input,
        )
    }

    fn spawn_visible(engine: &mut TestEngine, position: Vec3) -> Entity {
        let mut loader = StubLoader::default();
        let mesh = engine
            .assets_mut()
            .load_mesh(&mut loader, "meshes/cube.obj")
            .unwrap();
        let program = engine
            .assets_mut()
            .load_program(&mut loader, "shaders/vert.glsl", "shaders/frag.glsl")
            .unwrap();

        let entity = engine.world_mut().create();
        engine
            .world_mut()
            .attach(entity, TransformComponent::from_position(position))
            .unwrap();
        engine
            .world_mut()
            .attach(
                entity,
                VisualComponent::new(Vec4::new(1.0, 1.0, 1.0, 1.0), mesh, program),
            )
            .unwrap();
        engine
            .scene_root_mut()
            .push_child(SceneNode::from_entity(entity));
        entity
    }

    #[test]
    fn test_frame_submits_transformed_visuals() {
        let mut engine = test_engine(FixedInput::idle());
        spawn_visible(&mut engine, Vec3::new(1.0, 2.0, 3.0));

        engine.run_frame(1.0 / 60.0).unwrap();

        let submissions = &engine.renderer().submissions;
        assert_eq!(submissions.len(), 1);
        assert_relative_eq!(
            crate::foundation::math::translation_of(&submissions[0].world),
            Vec3::new(1.0, 2.0, 3.0),
            epsilon = EPSILON
        );
    }

    #[test]
    fn test_behavior_runs_before_propagation_and_submission() {
        let mut engine = test_engine(FixedInput::idle());
        let agent = spawn_visible(&mut engine, Vec3::zeros());
        let target = spawn_visible(&mut engine, Vec3::new(0.0, 0.0, 5.0));

        let tree = Fallback::new(vec![
            Box::new(IsNear::new(target, 1.5)),
            Box::new(MoveTowards::new(target, 1.5)),
        ])
        .unwrap();
        engine
            .world_mut()
            .attach(agent, BehaviorTreeComponent::new(tree))
            .unwrap();

        engine.run_frame(1.0).unwrap();

        // The same frame's submission already reflects the tree's movement.
        let agent_draw = engine
            .renderer()
            .submissions
            .iter()
            .find(|draw| {
                crate::foundation::math::translation_of(&draw.world).z > 0.1
                    && crate::foundation::math::translation_of(&draw.world).z < 4.9
            })
            .expect("agent submission");
        assert_relative_eq!(
            crate::foundation::math::translation_of(&agent_draw.world),
            Vec3::new(0.0, 0.0, 1.5),
            epsilon = EPSILON
        );
    }

    #[test]
    fn test_input_reaches_trees() {
        let mut engine = test_engine(FixedInput::new(Vec3::new(1.0, 0.0, 0.0)));
        let agent = spawn_visible(&mut engine, Vec3::zeros());

        let tree = Sequence::new(vec![
            Box::new(CheckInput),
            Box::new(MoveFromInput::new(2.0)),
        ])
        .unwrap();
        engine
            .world_mut()
            .attach(agent, BehaviorTreeComponent::new(tree))
            .unwrap();

        engine.run_frame(0.5).unwrap();

        assert_relative_eq!(
            engine
                .world()
                .get::<TransformComponent>(agent)
                .unwrap()
                .position,
            Vec3::new(1.0, 0.0, 0.0),
            epsilon = EPSILON
        );
    }

    #[test]
    fn test_tick_error_propagates_but_world_survives() {
        let mut engine = test_engine(FixedInput::idle());
        let agent = spawn_visible(&mut engine, Vec3::zeros());
        let ghost = engine.world_mut().create();
        engine.world_mut().destroy(ghost).unwrap();

        let tree = Fallback::new(vec![
            Box::new(IsNear::new(ghost, 1.0)),
            Box::new(MoveTowards::new(ghost, 1.0)),
        ])
        .unwrap();
        engine
            .world_mut()
            .attach(agent, BehaviorTreeComponent::new(tree))
            .unwrap();

        assert!(matches!(
            engine.run_frame(1.0),
            Err(EngineError::Behavior(BehaviorError::World(
                WorldError::InvalidEntity { .. }
            )))
        ));

        // The tree store was restored; the next frame fails the same way
        // instead of silently skipping the entity.
        assert!(engine.world().has::<BehaviorTreeComponent>(agent));
        assert!(engine.run_frame(1.0).is_err());
    }

    #[test]
    fn test_dangling_visual_is_skipped_not_fatal() {
        let mut engine = test_engine(FixedInput::idle());
        spawn_visible(&mut engine, Vec3::zeros());

        // Asset that failed to load: the entity keeps default (dangling)
        // handles and is rendered as absent.
        let mut loader = FailingLoader;
        assert!(matches!(
            engine.assets_mut().load_mesh(&mut loader, "meshes/broken.obj"),
            Err(AssetError::LoadFailed { .. })
        ));

        let broken = engine.world_mut().create();
        engine
            .world_mut()
            .attach(broken, TransformComponent::default())
            .unwrap();
        engine
            .world_mut()
            .attach(
                broken,
                VisualComponent::new(
                    Vec4::new(1.0, 0.0, 0.0, 1.0),
                    crate::assets::MeshHandle::default(),
                    crate::assets::ProgramHandle::default(),
                ),
            )
            .unwrap();
        engine
            .scene_root_mut()
            .push_child(SceneNode::from_entity(broken));

        engine.run_frame(1.0 / 60.0).unwrap();

        // Only the healthy entity was drawn.
        assert_eq!(engine.renderer().submissions.len(), 1);
    }

    #[test]
    fn test_audio_velocity_derived_from_position_delta() {
        let mut engine = test_engine(FixedInput::idle());

        let mut loader = StubLoader::default();
        let clip = engine
            .assets_mut()
            .load_clip(&mut loader, "sounds/engine.ogg")
            .unwrap();

        let emitter = engine.world_mut().create();
        engine
            .world_mut()
            .attach(emitter, TransformComponent::from_position(Vec3::zeros()))
            .unwrap();
        engine
            .world_mut()
            .attach(emitter, AudioSourceComponent::new(clip))
            .unwrap();
        engine
            .scene_root_mut()
            .push_child(SceneNode::from_entity(emitter));

        // First frame: no previous position, velocity reports zero.
        engine.run_frame(0.5).unwrap();
        assert_relative_eq!(engine.audio().updates[0].1.velocity, Vec3::zeros(), epsilon = EPSILON);

        // Move the emitter and step again: velocity = delta position / delta.
        engine
            .world_mut()
            .get_mut::<TransformComponent>(emitter)
            .unwrap()
            .position = Vec3::new(1.0, 0.0, 0.0);
        engine.run_frame(0.5).unwrap();

        let (_, params) = engine.audio().updates[1];
        assert_relative_eq!(params.position, Vec3::new(1.0, 0.0, 0.0), epsilon = EPSILON);
        assert_relative_eq!(params.velocity, Vec3::new(2.0, 0.0, 0.0), epsilon = EPSILON);
    }

    #[test]
    fn test_step_uses_fixed_delta_when_configured() {
        let config = EngineConfig {
            fixed_delta_time: Some(1.0),
            ..EngineConfig::default()
        };
        let mut engine = Engine::new(
            config,
            RecordingRenderer::new(),
            RecordingAudio::new(),
            FixedInput::idle(),
        );
        let agent = spawn_visible(&mut engine, Vec3::zeros());
        let target = spawn_visible(&mut engine, Vec3::new(0.0, 0.0, 100.0));

        let tree = Fallback::new(vec![
            Box::new(IsNear::new(target, 1.0)),
            Box::new(MoveTowards::new(target, 2.0)),
        ])
        .unwrap();
        engine
            .world_mut()
            .attach(agent, BehaviorTreeComponent::new(tree))
            .unwrap();

        engine.step().unwrap();

        // With a fixed 1-second delta the agent moved exactly speed * 1.
        assert_relative_eq!(
            engine
                .world()
                .get::<TransformComponent>(agent)
                .unwrap()
                .position,
            Vec3::new(0.0, 0.0, 2.0),
            epsilon = EPSILON
        );
    }
}
