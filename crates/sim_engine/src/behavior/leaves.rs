//! Condition and action leaves
//!
//! Conditions read world state and never return Running; actions mutate the
//! ticking entity's Transform. Leaves that require a component fail loudly
//! when it is absent.

use super::{BehaviorError, BehaviorNode, Status, TickContext};
use crate::ecs::components::TransformComponent;
use crate::ecs::Entity;
use crate::foundation::math::Vec3;

/// Minimum norm treated as a real direction when normalizing.
const DIRECTION_EPSILON: f32 = 1e-6;

/// Action: displace the ticking entity by `velocity * delta`.
pub struct Move {
    /// Velocity in units per second.
    pub velocity: Vec3,
}

impl Move {
    /// Create a move with a fixed velocity.
    pub fn new(velocity: Vec3) -> Self {
        Self { velocity }
    }
}

impl BehaviorNode for Move {
    fn tick(&mut self, ctx: &mut TickContext<'_>) -> Result<Status, BehaviorError> {
        let transform = ctx.world.get_mut::<TransformComponent>(ctx.entity)?;
        transform.position += self.velocity * ctx.delta;
        Ok(Status::Success)
    }
}

/// Condition: is any input direction present this frame?
pub struct CheckInput;

impl BehaviorNode for CheckInput {
    fn tick(&mut self, ctx: &mut TickContext<'_>) -> Result<Status, BehaviorError> {
        Ok(if ctx.input.norm() > DIRECTION_EPSILON {
            Status::Success
        } else {
            Status::Failure
        })
    }
}

/// Action: move along the sampled input direction at a configured speed.
///
/// Delegates to an inner [`Move`] after computing the frame's velocity; zero
/// input yields zero velocity rather than an undefined direction.
pub struct MoveFromInput {
    speed: f32,
    inner: Move,
}

impl MoveFromInput {
    /// Create with a movement speed in units per second.
    pub fn new(speed: f32) -> Self {
        Self {
            speed,
            inner: Move::new(Vec3::zeros()),
        }
    }
}

impl BehaviorNode for MoveFromInput {
    fn tick(&mut self, ctx: &mut TickContext<'_>) -> Result<Status, BehaviorError> {
        self.inner.velocity = ctx
            .input
            .try_normalize(DIRECTION_EPSILON)
            .map_or_else(Vec3::zeros, |direction| direction * self.speed);
        self.inner.tick(ctx)
    }
}

/// Condition: is the ticking entity strictly within `distance` of `target`?
///
/// Reads both entities' Transforms; never Running, no side effects.
pub struct IsNear {
    target: Entity,
    distance: f32,
}

impl IsNear {
    /// Create against a target entity and a distance threshold.
    pub fn new(target: Entity, distance: f32) -> Self {
        Self { target, distance }
    }
}

impl BehaviorNode for IsNear {
    fn tick(&mut self, ctx: &mut TickContext<'_>) -> Result<Status, BehaviorError> {
        let own = ctx.world.get::<TransformComponent>(ctx.entity)?.position;
        let target = ctx.world.get::<TransformComponent>(self.target)?.position;
        Ok(if (own - target).norm() < self.distance {
            Status::Success
        } else {
            Status::Failure
        })
    }
}

/// Action: steer toward `target` at a configured speed.
///
/// A negative speed steers directly away. Coincident positions yield zero
/// velocity.
pub struct MoveTowards {
    target: Entity,
    speed: f32,
    inner: Move,
}

impl MoveTowards {
    /// Create against a target entity and a speed in units per second.
    pub fn new(target: Entity, speed: f32) -> Self {
        Self {
            target,
            speed,
            inner: Move::new(Vec3::zeros()),
        }
    }
}

impl BehaviorNode for MoveTowards {
    fn tick(&mut self, ctx: &mut TickContext<'_>) -> Result<Status, BehaviorError> {
        let own = ctx.world.get::<TransformComponent>(ctx.entity)?.position;
        let target = ctx.world.get::<TransformComponent>(self.target)?.position;
        self.inner.velocity = (target - own)
            .try_normalize(DIRECTION_EPSILON)
            .map_or_else(Vec3::zeros, |direction| direction * self.speed);
        self.inner.tick(ctx)
    }
}
