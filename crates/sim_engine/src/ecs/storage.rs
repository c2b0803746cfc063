//! Type-erased per-kind component storage
//!
//! The world owns one boxed store per registered component kind, erased
//! behind [`ComponentStore`] so heterogeneous kinds can live in a single
//! registry. Each concrete store is an independently typed map keyed by
//! entity, not a single polymorphic container.

use std::any::Any;
use std::collections::HashMap;

use super::{Component, Entity};

/// Object-safe view of a single component kind's storage.
pub(crate) trait ComponentStore: Any {
    /// Drop the entity's component of this kind, if present.
    fn remove(&mut self, entity: Entity) -> bool;

    /// Upcast for typed read access.
    fn as_any(&self) -> &dyn Any;

    /// Upcast for typed write access.
    fn as_any_mut(&mut self) -> &mut dyn Any;

    /// Upcast by value, for taking a store out of the registry.
    fn into_any(self: Box<Self>) -> Box<dyn Any>;
}

/// Dense map storage for one component kind.
#[derive(Debug)]
pub(crate) struct DenseStore<T: Component> {
    pub(crate) components: HashMap<Entity, T>,
}

impl<T: Component> DenseStore<T> {
    pub(crate) fn new() -> Self {
        Self {
            components: HashMap::new(),
        }
    }
}

impl<T: Component> ComponentStore for DenseStore<T> {
    fn remove(&mut self, entity: Entity) -> bool {
        self.components.remove(&entity).is_some()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }
}
