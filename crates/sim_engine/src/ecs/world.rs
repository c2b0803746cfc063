//! ECS world: entity lifetimes, component attachment, and queries

use std::any::{type_name, TypeId};
use std::collections::hash_map::Entry;
use std::collections::HashMap;

use thiserror::Error;

use super::entity::EntityAllocator;
use super::storage::{ComponentStore, DenseStore};
use super::{Component, Entity};

/// Errors surfaced by store operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorldError {
    /// The entity was destroyed, or was never created by this world.
    #[error("invalid entity {index}v{generation}")]
    InvalidEntity {
        /// Slot index of the offending handle.
        index: u32,
        /// Generation of the offending handle.
        generation: u32,
    },

    /// The entity is alive but does not carry the requested component kind.
    #[error("entity {index} has no {kind} component")]
    MissingComponent {
        /// Slot index of the entity.
        index: u32,
        /// Type name of the absent component kind.
        kind: &'static str,
    },
}

impl WorldError {
    fn invalid(entity: Entity) -> Self {
        Self::InvalidEntity {
            index: entity.index(),
            generation: entity.generation(),
        }
    }

    fn missing<T>(entity: Entity) -> Self {
        Self::MissingComponent {
            index: entity.index(),
            kind: type_name::<T>(),
        }
    }
}

/// ECS world containing all entities and their components.
///
/// Component data lives in independently typed dense stores, one per kind,
/// registered on first attachment. Entity identities are generational, so a
/// handle held past `destroy` is rejected rather than aliasing a recycled
/// slot.
#[derive(Default)]
pub struct World {
    allocator: EntityAllocator,
    stores: HashMap<TypeId, Box<dyn ComponentStore>>,
}

impl World {
    /// Create an empty world.
    pub fn new() -> Self {
        Self {
            allocator: EntityAllocator::new(),
            stores: HashMap::new(),
        }
    }

    /// Create a new entity with no components. O(1) amortized, never fails.
    pub fn create(&mut self) -> Entity {
        self.allocator.allocate()
    }

    /// Destroy an entity along with every component attached to it.
    ///
    /// # Errors
    /// `InvalidEntity` if the entity is already destroyed or never existed.
    pub fn destroy(&mut self, entity: Entity) -> Result<(), WorldError> {
        if !self.allocator.deallocate(entity) {
            return Err(WorldError::invalid(entity));
        }
        for store in self.stores.values_mut() {
            store.remove(entity);
        }
        Ok(())
    }

    /// Whether the handle names a live entity.
    pub fn contains(&self, entity: Entity) -> bool {
        self.allocator.is_alive(entity)
    }

    /// Number of live entities.
    pub fn len(&self) -> usize {
        self.allocator.live_count()
    }

    /// Whether the world holds no live entities.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Attach a component to an entity, overwriting any existing value of the
    /// same kind.
    ///
    /// # Errors
    /// `InvalidEntity` if the entity is dead.
    pub fn attach<T: Component>(&mut self, entity: Entity, component: T) -> Result<(), WorldError> {
        if !self.allocator.is_alive(entity) {
            return Err(WorldError::invalid(entity));
        }
        let store = self
            .stores
            .entry(TypeId::of::<T>())
            .or_insert_with(|| Box::new(DenseStore::<T>::new()));
        if let Some(store) = store.as_any_mut().downcast_mut::<DenseStore<T>>() {
            store.components.insert(entity, component);
        }
        Ok(())
    }

    /// Detach and return a component. Detachment is not destruction: the
    /// entity stays alive.
    ///
    /// # Errors
    /// `InvalidEntity` if the entity is dead, `MissingComponent` if the kind
    /// is absent.
    pub fn detach<T: Component>(&mut self, entity: Entity) -> Result<T, WorldError> {
        if !self.allocator.is_alive(entity) {
            return Err(WorldError::invalid(entity));
        }
        self.store_mut::<T>()
            .and_then(|store| store.components.remove(&entity))
            .ok_or_else(|| WorldError::missing::<T>(entity))
    }

    /// Borrow a component immutably.
    ///
    /// # Errors
    /// `InvalidEntity` if the entity is dead, `MissingComponent` if the kind
    /// is absent.
    pub fn get<T: Component>(&self, entity: Entity) -> Result<&T, WorldError> {
        if !self.allocator.is_alive(entity) {
            return Err(WorldError::invalid(entity));
        }
        self.store::<T>()
            .and_then(|store| store.components.get(&entity))
            .ok_or_else(|| WorldError::missing::<T>(entity))
    }

    /// Borrow a component mutably.
    ///
    /// # Errors
    /// `InvalidEntity` if the entity is dead, `MissingComponent` if the kind
    /// is absent.
    pub fn get_mut<T: Component>(&mut self, entity: Entity) -> Result<&mut T, WorldError> {
        if !self.allocator.is_alive(entity) {
            return Err(WorldError::invalid(entity));
        }
        self.store_mut::<T>()
            .and_then(|store| store.components.get_mut(&entity))
            .ok_or_else(|| WorldError::missing::<T>(entity))
    }

    /// Borrow a component immutably, or `None` when the entity is dead or the
    /// kind is absent. Never fails.
    pub fn try_get<T: Component>(&self, entity: Entity) -> Option<&T> {
        if !self.allocator.is_alive(entity) {
            return None;
        }
        self.store::<T>()?.components.get(&entity)
    }

    /// Borrow a component mutably, or `None`. Never fails.
    pub fn try_get_mut<T: Component>(&mut self, entity: Entity) -> Option<&mut T> {
        if !self.allocator.is_alive(entity) {
            return None;
        }
        self.store_mut::<T>()?.components.get_mut(&entity)
    }

    /// Whether a live entity carries the component kind.
    pub fn has<T: Component>(&self, entity: Entity) -> bool {
        self.try_get::<T>(entity).is_some()
    }

    /// Collect every entity currently carrying the component kind.
    pub fn entities_with<T: Component>(&self) -> Vec<Entity> {
        self.store::<T>()
            .map(|store| store.components.keys().copied().collect())
            .unwrap_or_default()
    }

    /// Visit every entity carrying `T`, in an order stable within this call.
    ///
    /// The callback receives component references only, so attachment or
    /// removal of the visited kind cannot happen mid-pass; structural changes
    /// land between calls and are observed by the next one.
    pub fn each<T, F>(&mut self, mut f: F)
    where
        T: Component,
        F: FnMut(Entity, &mut T),
    {
        if let Some(store) = self.store_mut::<T>() {
            for (&entity, component) in &mut store.components {
                f(entity, component);
            }
        }
    }

    /// Visit every entity carrying both `A` and `B`.
    ///
    /// `A` and `B` must be distinct kinds; iteration order follows `A`'s
    /// store and is stable within this call.
    pub fn each2<A, B, F>(&mut self, mut f: F)
    where
        A: Component,
        B: Component,
        F: FnMut(Entity, &mut A, &mut B),
    {
        let Some(mut lead) = self.take_store::<A>() else {
            return;
        };
        for (&entity, a) in &mut lead.components {
            if let Some(b) = self.try_get_mut::<B>(entity) {
                f(entity, a, b);
            }
        }
        self.put_store(lead);
    }

    /// Visit every entity carrying `A`, `B`, and `C` (all distinct kinds).
    pub fn each3<A, B, C, F>(&mut self, mut f: F)
    where
        A: Component,
        B: Component,
        C: Component,
        F: FnMut(Entity, &mut A, &mut B, &mut C),
    {
        let Some(mut lead) = self.take_store::<A>() else {
            return;
        };
        let Some(mut second) = self.take_store::<B>() else {
            self.put_store(lead);
            return;
        };
        for (&entity, a) in &mut lead.components {
            if let Some(b) = second.components.get_mut(&entity) {
                if let Some(c) = self.try_get_mut::<C>(entity) {
                    f(entity, a, b, c);
                }
            }
        }
        self.put_store(second);
        self.put_store(lead);
    }

    /// Remove a kind's entire store from the registry.
    ///
    /// While taken, the world reports the kind as absent on every entity.
    /// Pair with [`World::put_store`]; used by multi-kind queries and by the
    /// frame driver so behavior trees can mutate the world they live in.
    pub(crate) fn take_store<T: Component>(&mut self) -> Option<DenseStore<T>> {
        let boxed = self.stores.remove(&TypeId::of::<T>())?;
        boxed
            .into_any()
            .downcast::<DenseStore<T>>()
            .ok()
            .map(|store| *store)
    }

    /// Return a previously taken store to the registry.
    ///
    /// Components whose entity died while the store was out are dropped, and
    /// values attached in the interim win over the taken copies.
    pub(crate) fn put_store<T: Component>(&mut self, mut store: DenseStore<T>) {
        store
            .components
            .retain(|entity, _| self.allocator.is_alive(*entity));
        match self.stores.entry(TypeId::of::<T>()) {
            Entry::Occupied(mut occupied) => {
                if let Some(existing) = occupied.get_mut().as_any_mut().downcast_mut::<DenseStore<T>>() {
                    for (entity, component) in store.components {
                        existing.components.entry(entity).or_insert(component);
                    }
                }
            }
            Entry::Vacant(vacant) => {
                vacant.insert(Box::new(store));
            }
        }
    }

    fn store<T: Component>(&self) -> Option<&DenseStore<T>> {
        self.stores
            .get(&TypeId::of::<T>())
            .and_then(|store| store.as_any().downcast_ref())
    }

    fn store_mut<T: Component>(&mut self) -> Option<&mut DenseStore<T>> {
        self.stores
            .get_mut(&TypeId::of::<T>())
            .and_then(|store| store.as_any_mut().downcast_mut())
    }
}
