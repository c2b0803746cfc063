//! Scene-graph nodes and world-transform propagation

use crate::ecs::components::TransformComponent;
use crate::ecs::{Entity, World};
use crate::foundation::math::Mat4;

/// Node in the scene hierarchy.
///
/// Each node owns its ordered children, so the tree is acyclic and
/// single-parent by construction. A node may bind an entity; nodes binding
/// none (or binding an entity without a Transform) are pure grouping nodes
/// and pass the parent matrix through unchanged.
#[derive(Debug, Default)]
pub struct SceneNode {
    entity: Option<Entity>,
    name: String,
    children: Vec<SceneNode>,
}

impl SceneNode {
    /// Create an unbound grouping node.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a node bound to an entity.
    pub fn from_entity(entity: Entity) -> Self {
        Self {
            entity: Some(entity),
            ..Default::default()
        }
    }

    /// Builder: set a debug name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// The bound entity, if any.
    pub fn entity(&self) -> Option<Entity> {
        self.entity
    }

    /// The node's debug name (possibly empty).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Append a child; children keep their insertion order.
    pub fn push_child(&mut self, child: SceneNode) {
        self.children.push(child);
    }

    /// The node's children, in traversal order.
    pub fn children(&self) -> &[SceneNode] {
        &self.children
    }

    /// Mutable access to the children.
    pub fn children_mut(&mut self) -> &mut Vec<SceneNode> {
        &mut self.children
    }

    /// Recompute cached world matrices for this subtree.
    ///
    /// Depth-first, children in stored order. A node whose entity carries a
    /// Transform composes `parent * local` and caches it as the Transform's
    /// world matrix; that matrix (or the unchanged parent matrix for grouping
    /// nodes) is what the children see. Idempotent for a fixed set of local
    /// transforms.
    pub fn propagate(&self, world: &mut World, parent: &Mat4) {
        let mut matrix = *parent;
        if let Some(entity) = self.entity {
            if let Some(transform) = world.try_get_mut::<TransformComponent>(entity) {
                matrix = parent * transform.local_matrix();
                transform.world = matrix;
            }
        }
        for child in &self.children {
            child.propagate(world, &matrix);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Vec3;
    use approx::assert_relative_eq;
    use std::f32::consts::FRAC_PI_2;

    const EPSILON: f32 = 1e-5;

    fn spawn_at(world: &mut World, position: Vec3) -> Entity {
        let entity = world.create();
        world
            .attach(entity, TransformComponent::from_position(position))
            .unwrap();
        entity
    }

    fn world_position(world: &World, entity: Entity) -> Vec3 {
        world
            .get::<TransformComponent>(entity)
            .unwrap()
            .world_position()
    }

    #[test]
    fn test_two_level_chain_composes_translations() {
        let mut world = World::new();
        let a = spawn_at(&mut world, Vec3::new(0.0, 0.0, 3.0));
        let b = spawn_at(&mut world, Vec3::new(3.0, 0.0, 0.0));

        let mut node_a = SceneNode::from_entity(a);
        node_a.push_child(SceneNode::from_entity(b));
        let mut root = SceneNode::new();
        root.push_child(node_a);

        root.propagate(&mut world, &Mat4::identity());

        assert_relative_eq!(world_position(&world, a), Vec3::new(0.0, 0.0, 3.0), epsilon = EPSILON);
        assert_relative_eq!(world_position(&world, b), Vec3::new(3.0, 0.0, 3.0), epsilon = EPSILON);
    }

    #[test]
    fn test_parent_move_shifts_children_by_same_delta() {
        let mut world = World::new();
        let a = spawn_at(&mut world, Vec3::new(0.0, 0.0, 3.0));
        let b = spawn_at(&mut world, Vec3::new(3.0, 0.0, 0.0));

        let mut node_a = SceneNode::from_entity(a);
        node_a.push_child(SceneNode::from_entity(b));
        let mut root = SceneNode::new();
        root.push_child(node_a);

        root.propagate(&mut world, &Mat4::identity());
        let before = world_position(&world, b);

        world.get_mut::<TransformComponent>(a).unwrap().position += Vec3::new(1.0, 2.0, 0.0);
        root.propagate(&mut world, &Mat4::identity());

        assert_relative_eq!(
            world_position(&world, b) - before,
            Vec3::new(1.0, 2.0, 0.0),
            epsilon = EPSILON
        );
    }

    #[test]
    fn test_propagate_is_idempotent() {
        let mut world = World::new();
        let a = spawn_at(&mut world, Vec3::new(1.0, 2.0, 3.0));
        let b = spawn_at(&mut world, Vec3::new(0.5, 0.0, 0.0));

        let mut node_a = SceneNode::from_entity(a).with_name("parent");
        node_a.push_child(SceneNode::from_entity(b));
        let mut root = SceneNode::new();
        root.push_child(node_a);

        root.propagate(&mut world, &Mat4::identity());
        let first = world.get::<TransformComponent>(b).unwrap().world;
        root.propagate(&mut world, &Mat4::identity());
        let second = world.get::<TransformComponent>(b).unwrap().world;

        assert_relative_eq!(first, second, epsilon = EPSILON);
    }

    #[test]
    fn test_grouping_node_passes_matrix_through() {
        let mut world = World::new();
        let a = spawn_at(&mut world, Vec3::new(0.0, 1.0, 0.0));
        let b = spawn_at(&mut world, Vec3::new(2.0, 0.0, 0.0));

        // a -> (unbound group) -> b: the group must not disturb the chain.
        let mut group = SceneNode::new().with_name("group");
        group.push_child(SceneNode::from_entity(b));
        let mut node_a = SceneNode::from_entity(a);
        node_a.push_child(group);
        let mut root = SceneNode::new();
        root.push_child(node_a);

        root.propagate(&mut world, &Mat4::identity());

        assert_relative_eq!(world_position(&world, b), Vec3::new(2.0, 1.0, 0.0), epsilon = EPSILON);
    }

    #[test]
    fn test_entity_without_transform_is_grouping() {
        let mut world = World::new();
        let bare = world.create();
        let b = spawn_at(&mut world, Vec3::new(1.0, 0.0, 0.0));

        let mut node = SceneNode::from_entity(bare);
        node.push_child(SceneNode::from_entity(b));
        let mut root = SceneNode::new();
        root.push_child(node);

        root.propagate(&mut world, &Mat4::identity());

        assert_relative_eq!(world_position(&world, b), Vec3::new(1.0, 0.0, 0.0), epsilon = EPSILON);
    }

    #[test]
    fn test_parent_rotation_carries_into_child_position() {
        let mut world = World::new();
        let parent = world.create();
        world
            .attach(
                parent,
                TransformComponent::identity().with_rotation(Vec3::new(0.0, FRAC_PI_2, 0.0)),
            )
            .unwrap();
        let child = spawn_at(&mut world, Vec3::new(0.0, 0.0, 1.0));

        let mut node = SceneNode::from_entity(parent);
        node.push_child(SceneNode::from_entity(child));
        let mut root = SceneNode::new();
        root.push_child(node);

        root.propagate(&mut world, &Mat4::identity());

        // The parent's 90-degree yaw rotates the child's +Z offset onto +X.
        assert_relative_eq!(
            world_position(&world, child),
            Vec3::new(1.0, 0.0, 0.0),
            epsilon = EPSILON
        );
    }
}
