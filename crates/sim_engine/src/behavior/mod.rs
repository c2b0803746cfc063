//! Behavior-tree engine
//!
//! Composable per-entity decision logic. A tree is a hierarchy of nodes
//! exposing a uniform `tick` returning [`Status`]; composites derive their
//! status from their children with short-circuiting, leaves read or mutate
//! world state. Trees run to a terminal status every frame — `Running` is a
//! logical status, never a suspension.

pub mod composites;
pub mod leaves;

pub use composites::{Fallback, Sequence};
pub use leaves::{CheckInput, IsNear, Move, MoveFromInput, MoveTowards};

use thiserror::Error;

use crate::ecs::{Component, Entity, World, WorldError};
use crate::foundation::math::Vec3;

/// Result of ticking a behavior node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// The node's goal holds or its action completed.
    Success,
    /// The node's condition does not hold or its action cannot proceed.
    Failure,
    /// The node's action is still in progress this frame.
    Running,
}

/// Errors from building or ticking behavior trees.
#[derive(Debug, Error)]
pub enum BehaviorError {
    /// Composite nodes must be built with at least one child.
    #[error("composite node requires at least one child")]
    EmptyComposite,

    /// A leaf referenced a dead entity or a missing component.
    #[error(transparent)]
    World(#[from] WorldError),
}

/// Per-tick context threaded through a tree.
///
/// Replaces process-wide scene state with an explicit session view: the
/// store, the ticking entity, the frame delta, and the input direction
/// sampled once at the top of the frame.
pub struct TickContext<'a> {
    /// Component store holding the ticking entity's state. While a tree
    /// runs, the tree components themselves are withheld from the store.
    pub world: &'a mut World,

    /// Entity owning the ticking tree.
    pub entity: Entity,

    /// Seconds elapsed since the previous frame.
    pub delta: f32,

    /// Input direction sampled for this frame (zero when idle).
    pub input: Vec3,
}

/// A node in a behavior tree.
pub trait BehaviorNode: Send + Sync {
    /// Evaluate this node for one frame.
    ///
    /// # Errors
    /// Leaves fail loudly when a component they require is absent; silent
    /// no-ops would mask authoring errors.
    fn tick(&mut self, ctx: &mut TickContext<'_>) -> Result<Status, BehaviorError>;
}

/// Component holding exactly one behavior tree root per entity.
///
/// Each entity's tree is exclusively its own; structurally identical trees
/// on different entities are still distinct node instances.
pub struct BehaviorTreeComponent {
    root: Box<dyn BehaviorNode>,
}

impl Component for BehaviorTreeComponent {}

impl BehaviorTreeComponent {
    /// Wrap a root node.
    pub fn new(root: impl BehaviorNode + 'static) -> Self {
        Self {
            root: Box::new(root),
        }
    }

    /// Tick the root node.
    ///
    /// # Errors
    /// Propagates the first leaf error.
    pub fn tick(&mut self, ctx: &mut TickContext<'_>) -> Result<Status, BehaviorError> {
        self.root.tick(ctx)
    }
}
