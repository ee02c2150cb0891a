//! The entity registry and its per-frame passes

use std::collections::BTreeMap;

use log::debug;

use super::component::short_type_name;
use super::{Component, EcsError, EcsResult, Entity, EntityId};
use crate::assets::ResourceCache;
use crate::foundation::random::IdGenerator;
use crate::render::{Camera3D, RenderBackend};
use crate::scene::{SpatialTree, TransformsMut};

/// Owns every entity, their spatial nodes, the resource cache and the active
/// camera slot.
///
/// Entities are visited in id order. Only entities whose creation hook has
/// already run take part in the update and render passes.
pub struct World {
    entities: BTreeMap<EntityId, Entity>,
    spatials: SpatialTree,
    create_queue: Vec<EntityId>,
    destroy_queue: Vec<EntityId>,
    ids: IdGenerator,
    resources: ResourceCache,
    active_camera: Option<Camera3D>,
    delta_time: f32,
    fixed_delta_time: f32,
    quit_requested: bool,
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

impl World {
    /// Create an empty world with an entropy-seeded id generator
    #[must_use]
    pub fn new() -> Self {
        Self::with_ids(IdGenerator::new())
    }

    /// Create an empty world whose id sequence is reproducible
    #[must_use]
    pub fn with_id_seed(seed: u64) -> Self {
        Self::with_ids(IdGenerator::from_seed(seed))
    }

    fn with_ids(ids: IdGenerator) -> Self {
        Self {
            entities: BTreeMap::new(),
            spatials: SpatialTree::new(),
            create_queue: Vec::new(),
            destroy_queue: Vec::new(),
            ids,
            resources: ResourceCache::default(),
            active_camera: None,
            delta_time: 0.0,
            fixed_delta_time: 0.0,
            quit_requested: false,
        }
    }

    /// Replace the resource cache
    #[must_use]
    pub fn with_resources(mut self, resources: ResourceCache) -> Self {
        self.resources = resources;
        self
    }

    // ---- registry --------------------------------------------------------

    /// Register a component as a new root entity.
    ///
    /// The entity is named after the component type and gets a fresh spatial
    /// node. Its `on_create` hook runs during the next creation pass; until
    /// then it is skipped by every other pass.
    pub fn create<T: Component>(&mut self, component: T) -> EntityId {
        let id = EntityId::new(self.ids.next_id());
        let type_name = short_type_name::<T>();
        let spatial = self.spatials.create();

        debug!("Created {type_name} {id}");
        self.entities
            .insert(id.clone(), Entity::new(id.clone(), type_name, spatial, Box::new(component)));
        self.create_queue.push(id.clone());
        id
    }

    /// Register a component and attach it under `parent`
    pub fn create_child<T: Component>(&mut self, parent: &EntityId, component: T) -> EcsResult<EntityId> {
        self.entity(parent)?;
        let id = self.create(component);
        self.add_child(parent, &id)?;
        Ok(id)
    }

    /// Queue an entity for the next destruction pass.
    ///
    /// It stays registered, and keeps receiving hooks, until that pass runs.
    /// Queuing an entity twice is a no-op.
    pub fn destroy(&mut self, id: &EntityId) -> EcsResult<()> {
        let entity = self.entity_mut(id)?;
        if !entity.pending_destroy {
            entity.pending_destroy = true;
            self.destroy_queue.push(id.clone());
        }
        Ok(())
    }

    /// Look up an entity; fails if the id is not registered
    pub fn entity(&self, id: &EntityId) -> EcsResult<&Entity> {
        self.entities.get(id).ok_or_else(|| EcsError::EntityNotFound(id.clone()))
    }

    fn entity_mut(&mut self, id: &EntityId) -> EcsResult<&mut Entity> {
        self.entities.get_mut(id).ok_or_else(|| EcsError::EntityNotFound(id.clone()))
    }

    /// Whether an entity is registered under `id`
    #[must_use]
    pub fn contains(&self, id: &EntityId) -> bool {
        self.entities.contains_key(id)
    }

    /// Number of registered entities, including ones not yet created
    #[must_use]
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// All registered entities in registry order
    pub fn entities(&self) -> impl Iterator<Item = &Entity> {
        self.entities.values()
    }

    /// Direct child `child` of `parent`, or `None` if it is not one
    pub fn child(&self, parent: &EntityId, child: &EntityId) -> EcsResult<Option<&Entity>> {
        let parent = self.entity(parent)?;
        if parent.children.contains(child) {
            Ok(self.entities.get(child))
        } else {
            Ok(None)
        }
    }

    /// Borrow an entity's behaviour as its concrete type
    pub fn component<T: Component>(&self, id: &EntityId) -> EcsResult<&T> {
        self.entity(id)?
            .behaviour
            .as_deref()
            .and_then(|behaviour| behaviour.as_any().downcast_ref::<T>())
            .ok_or_else(|| EcsError::WrongType { id: id.clone(), expected: short_type_name::<T>() })
    }

    /// Mutably borrow an entity's behaviour as its concrete type
    pub fn component_mut<T: Component>(&mut self, id: &EntityId) -> EcsResult<&mut T> {
        self.entity_mut(id)?
            .behaviour
            .as_deref_mut()
            .and_then(|behaviour| behaviour.as_any_mut().downcast_mut::<T>())
            .ok_or_else(|| EcsError::WrongType { id: id.clone(), expected: short_type_name::<T>() })
    }

    /// Rename an entity
    pub fn set_name(&mut self, id: &EntityId, name: impl Into<String>) -> EcsResult<()> {
        self.entity_mut(id)?.name = name.into();
        Ok(())
    }

    // ---- hierarchy -------------------------------------------------------

    /// Attach `id` under `parent`, or make it a root with `None`.
    ///
    /// The spatial nodes are re-parented the same way; a move that would
    /// create a cycle is refused before anything changes.
    pub fn set_parent(&mut self, id: &EntityId, parent: Option<&EntityId>) -> EcsResult<()> {
        let spatial = self.entity(id)?.spatial;
        let parent_spatial = match parent {
            Some(parent) => Some(self.entity(parent)?.spatial),
            None => None,
        };
        self.spatials.set_parent(spatial, parent_spatial)?;

        let current = self.entity(id)?.parent.clone();
        if current.as_ref() == parent {
            return Ok(());
        }

        if let Some(old) = current.and_then(|old| self.entities.get_mut(&old)) {
            old.children.retain(|child| child != id);
        }
        if let Some(parent) = parent {
            let siblings = &mut self.entity_mut(parent)?.children;
            if !siblings.contains(id) {
                siblings.push(id.clone());
            }
        }
        self.entity_mut(id)?.parent = parent.cloned();
        Ok(())
    }

    /// Attach `child` under `parent`; a no-op if it is already there
    pub fn add_child(&mut self, parent: &EntityId, child: &EntityId) -> EcsResult<()> {
        self.set_parent(child, Some(parent))
    }

    /// Detach `child` from `parent`; a no-op if it is not a child of `parent`
    pub fn remove_child(&mut self, parent: &EntityId, child: &EntityId) -> EcsResult<()> {
        self.entity(parent)?;
        if self.entity(child)?.parent.as_ref() == Some(parent) {
            self.set_parent(child, None)?;
        }
        Ok(())
    }

    // ---- shared state ----------------------------------------------------

    /// Transform nodes of every entity
    #[must_use]
    pub fn spatials(&self) -> &SpatialTree {
        &self.spatials
    }

    /// Move, turn and scale transform nodes.
    ///
    /// Links between nodes follow the entity hierarchy, so re-parenting
    /// goes through [`World::set_parent`] instead.
    pub fn spatials_mut(&mut self) -> TransformsMut<'_> {
        TransformsMut::new(&mut self.spatials)
    }

    /// Loaded media keyed by path
    #[must_use]
    pub fn resources(&self) -> &ResourceCache {
        &self.resources
    }

    /// Mutable access to the resource cache
    pub fn resources_mut(&mut self) -> &mut ResourceCache {
        &mut self.resources
    }

    /// Camera used by the 3D render pass, if any
    #[must_use]
    pub fn active_camera(&self) -> Option<&Camera3D> {
        self.active_camera.as_ref()
    }

    /// Set or clear the camera used by the 3D render pass
    pub fn set_active_camera(&mut self, camera: Option<Camera3D>) {
        self.active_camera = camera;
    }

    /// Seconds elapsed during the previous frame
    #[must_use]
    pub fn delta_time(&self) -> f32 {
        self.delta_time
    }

    /// Length of one fixed update step in seconds
    #[must_use]
    pub fn fixed_delta_time(&self) -> f32 {
        self.fixed_delta_time
    }

    /// Ask the main loop to stop after the current frame
    pub fn request_quit(&mut self) {
        self.quit_requested = true;
    }

    /// Whether [`World::request_quit`] was called
    #[must_use]
    pub fn is_quit_requested(&self) -> bool {
        self.quit_requested
    }

    pub(crate) fn set_delta_time(&mut self, delta_time: f32) {
        self.delta_time = delta_time;
    }

    pub(crate) fn set_fixed_delta_time(&mut self, fixed_delta_time: f32) {
        self.fixed_delta_time = fixed_delta_time;
    }

    // ---- passes ----------------------------------------------------------

    /// Run `on_create` for everything created since the last creation pass.
    ///
    /// Entities created by these hooks wait for the next pass. If a hook
    /// fails, the entities behind it stay queued for the next pass.
    pub fn run_create_pass(&mut self) -> EcsResult<()> {
        let mut pending = std::mem::take(&mut self.create_queue).into_iter();
        while let Some(id) = pending.next() {
            if !self.contains(&id) {
                continue;
            }
            let hook = self.dispatch(&id, |behaviour, world, id| behaviour.on_create(world, id));
            if let Some(entity) = self.entities.get_mut(&id) {
                entity.created = true;
            }
            if let Err(error) = hook {
                self.create_queue.splice(0..0, pending);
                return Err(error);
            }
        }
        Ok(())
    }

    /// Run `on_destroy` for every queued entity, then unregister it.
    ///
    /// Removal detaches the entity from its parent and turns its children
    /// into roots. Entities whose creation hook never ran are removed
    /// without a destruction hook. The failing entity is still removed when
    /// its hook errors; the ones behind it stay queued for the next pass.
    pub fn run_destroy_pass(&mut self) -> EcsResult<()> {
        let mut pending = std::mem::take(&mut self.destroy_queue).into_iter();
        while let Some(id) = pending.next() {
            let Some(created) = self.entities.get(&id).map(|entity| entity.created) else {
                continue;
            };
            let hook = if created {
                self.dispatch(&id, |behaviour, world, id| behaviour.on_destroy(world, id))
            } else {
                Ok(())
            };
            if let Err(error) = self.remove(&id).and(hook) {
                self.destroy_queue.splice(0..0, pending);
                return Err(error);
            }
        }
        Ok(())
    }

    /// Run `update` on every created entity
    pub fn run_update_pass(&mut self) -> EcsResult<()> {
        for id in self.created_ids() {
            self.dispatch(&id, |behaviour, world, id| behaviour.update(world, id))?;
        }
        Ok(())
    }

    /// Run `fixed_update` on every created entity
    pub fn run_fixed_update_pass(&mut self) -> EcsResult<()> {
        for id in self.created_ids() {
            self.dispatch(&id, |behaviour, world, id| behaviour.fixed_update(world, id))?;
        }
        Ok(())
    }

    /// Run `render_3d` on every created entity
    pub fn render_3d_pass(&self, backend: &mut dyn RenderBackend) -> EcsResult<()> {
        for (id, behaviour) in self.created_behaviours() {
            behaviour.render_3d(self, id, backend)?;
        }
        Ok(())
    }

    /// Run `render_2d` on every created entity
    pub fn render_2d_pass(&self, backend: &mut dyn RenderBackend) -> EcsResult<()> {
        for (id, behaviour) in self.created_behaviours() {
            behaviour.render_2d(self, id, backend)?;
        }
        Ok(())
    }

    /// Run `render_gui` on every created entity
    pub fn render_gui_pass(&self, backend: &mut dyn RenderBackend) -> EcsResult<()> {
        for (id, behaviour) in self.created_behaviours() {
            behaviour.render_gui(self, id, backend)?;
        }
        Ok(())
    }

    /// Destroy every entity, running destruction hooks, until the registry is empty
    pub fn destroy_all(&mut self) -> EcsResult<()> {
        while !self.entities.is_empty() {
            self.destroy_queue = self.entities.keys().cloned().collect();
            for entity in self.entities.values_mut() {
                entity.pending_destroy = true;
            }
            self.run_destroy_pass()?;
        }
        self.create_queue.clear();
        Ok(())
    }

    fn created_ids(&self) -> Vec<EntityId> {
        self.entities
            .values()
            .filter(|entity| entity.created)
            .map(|entity| entity.id.clone())
            .collect()
    }

    fn created_behaviours(&self) -> impl Iterator<Item = (&EntityId, &dyn Component)> {
        self.entities
            .iter()
            .filter(|(_, entity)| entity.created)
            .filter_map(|(id, entity)| entity.behaviour.as_deref().map(|behaviour| (id, behaviour)))
    }

    /// Run a mutable hook with the entity's behaviour checked out of the
    /// registry so the hook can borrow the world.
    fn dispatch<F>(&mut self, id: &EntityId, hook: F) -> EcsResult<()>
    where
        F: FnOnce(&mut dyn Component, &mut Self, &EntityId) -> EcsResult<()>,
    {
        let Some(mut behaviour) = self.entities.get_mut(id).and_then(|entity| entity.behaviour.take()) else {
            return Ok(());
        };
        let result = hook(&mut *behaviour, self, id);
        if let Some(entity) = self.entities.get_mut(id) {
            entity.behaviour = Some(behaviour);
        }
        result
    }

    fn remove(&mut self, id: &EntityId) -> EcsResult<()> {
        let Some(entity) = self.entities.remove(id) else {
            return Ok(());
        };

        if let Some(parent) = entity.parent.as_ref().and_then(|parent| self.entities.get_mut(parent)) {
            parent.children.retain(|child| child != id);
        }
        for child in &entity.children {
            if let Some(child) = self.entities.get_mut(child) {
                child.parent = None;
            }
        }
        self.create_queue.retain(|queued| queued != id);
        debug!("Destroyed {} {}", entity.name, id);

        self.spatials.destroy(entity.spatial)?;
        Ok(())
    }
}

impl std::fmt::Debug for World {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("World")
            .field("entities", &self.entities.len())
            .field("spatials", &self.spatials.len())
            .field("create_queue", &self.create_queue)
            .field("destroy_queue", &self.destroy_queue)
            .field("active_camera", &self.active_camera)
            .finish_non_exhaustive()
    }
}
