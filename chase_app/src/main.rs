//! Headless chase demo
//!
//! Three cubes and three behavior trees: a red cube driven by sampled input,
//! a green cube chasing it until close enough, and a blue cube that backs
//! away whenever the red cube gets near. Runs windowless against the
//! recording backends with a scripted, deterministic input device.

use sim_engine::backend::headless::{NullAudio, RecordingRenderer, StubLoader};
use sim_engine::backend::{AudioBackend, InputSampler, RenderBackend};
use sim_engine::behavior::{CheckInput, Fallback, IsNear, MoveFromInput, MoveTowards, Sequence};
use sim_engine::prelude::*;
use sim_engine::scene::SceneNode;

const STEP: f32 = 1.0 / 60.0;
const FRAMES: u32 = 600;

/// Deterministic input script: push east for two seconds, then north for
/// two, then go idle and let the other agents settle.
struct ScriptedInput {
    elapsed: f32,
}

impl InputSampler for ScriptedInput {
    fn sample(&mut self) -> Vec3 {
        let t = self.elapsed;
        self.elapsed += STEP;
        if t < 2.0 {
            Vec3::new(1.0, 0.0, 0.0)
        } else if t < 4.0 {
            Vec3::new(0.0, 1.0, 0.0)
        } else {
            Vec3::zeros()
        }
    }
}

fn spawn_cube<R: RenderBackend, A: AudioBackend, I: InputSampler>(
    engine: &mut Engine<R, A, I>,
    color: Vec4,
    mesh: MeshHandle,
    program: ProgramHandle,
) -> Result<Entity, EngineError> {
    let entity = engine.world_mut().create();
    engine
        .world_mut()
        .attach(entity, TransformComponent::default())?;
    engine
        .world_mut()
        .attach(entity, VisualComponent::new(color, mesh, program))?;
    engine
        .scene_root_mut()
        .push_child(SceneNode::from_entity(entity));
    Ok(entity)
}

fn main() -> Result<(), EngineError> {
    sim_engine::foundation::logging::init();

    let config = EngineConfig {
        fixed_delta_time: Some(STEP),
        ..EngineConfig::default()
    };
    let mut engine = Engine::new(
        config,
        RecordingRenderer::new(),
        NullAudio,
        ScriptedInput { elapsed: 0.0 },
    );

    let mut loader = StubLoader::default();
    let mesh = engine.assets_mut().load_mesh(&mut loader, "meshes/cube.obj")?;
    let program = engine
        .assets_mut()
        .load_program(&mut loader, "shaders/vert.glsl", "shaders/frag.glsl")?;

    // Red: player-style agent, moves while the input script pushes.
    let red = spawn_cube(&mut engine, Vec4::new(1.0, 0.0, 0.0, 1.0), mesh, program)?;
    engine.world_mut().get_mut::<TransformComponent>(red)?.position = Vec3::new(-1.0, 0.0, 0.0);
    let tree = Sequence::new(vec![
        Box::new(CheckInput),
        Box::new(MoveFromInput::new(2.0)),
    ])?;
    engine
        .world_mut()
        .attach(red, BehaviorTreeComponent::new(tree))?;

    // Green: chases red until within 1.5 units.
    let green = spawn_cube(&mut engine, Vec4::new(0.0, 1.0, 0.0, 1.0), mesh, program)?;
    let tree = Fallback::new(vec![
        Box::new(IsNear::new(red, 1.5)),
        Box::new(MoveTowards::new(red, 1.5)),
    ])?;
    engine
        .world_mut()
        .attach(green, BehaviorTreeComponent::new(tree))?;

    // Blue: backs away from red whenever it comes within 1.25 units.
    let blue = spawn_cube(&mut engine, Vec4::new(0.0, 0.0, 1.0, 1.0), mesh, program)?;
    engine.world_mut().get_mut::<TransformComponent>(blue)?.position = Vec3::new(1.0, 0.0, 0.0);
    let tree = Sequence::new(vec![
        Box::new(IsNear::new(red, 1.25)),
        Box::new(MoveTowards::new(red, -2.5)),
    ])?;
    engine
        .world_mut()
        .attach(blue, BehaviorTreeComponent::new(tree))?;

    for frame in 0..FRAMES {
        engine.step()?;

        if frame % 60 == 0 {
            let red_pos = engine.world().get::<TransformComponent>(red)?.position;
            let green_pos = engine.world().get::<TransformComponent>(green)?.position;
            let blue_pos = engine.world().get::<TransformComponent>(blue)?.position;
            log::info!(
                "t={:>4.1}s red=({:.2}, {:.2}) green=({:.2}, {:.2}) blue=({:.2}, {:.2})",
                frame as f32 * STEP,
                red_pos.x,
                red_pos.y,
                green_pos.x,
                green_pos.y,
                blue_pos.x,
                blue_pos.y
            );
        }
    }

    log::info!(
        "finished {FRAMES} frames, {} draw submissions recorded",
        engine.renderer().submissions.len()
    );
    Ok(())
}
