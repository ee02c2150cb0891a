//! Spatial nodes and the arena that owns them

use std::cell::Cell;

use slotmap::{new_key_type, SlotMap};

use super::{SceneError, SceneResult};
use crate::foundation::math::{Matrix4x4, Quat, Vec3};

new_key_type! {
    /// Handle to a node in a [`SpatialTree`]
    pub struct SpatialKey;
}

/// A node's local transform plus its cached matrices.
///
/// The cache lives in `Cell`s so reads through `&SpatialTree` can rebuild it;
/// a node is therefore not `Sync`.
#[derive(Debug, Clone)]
pub struct Spatial {
    position: Vec3,
    rotation: Quat,
    scale: Vec3,
    parent: Option<SpatialKey>,
    children: Vec<SpatialKey>,
    local_matrix: Cell<Matrix4x4>,
    world_matrix: Cell<Matrix4x4>,
    dirty: Cell<bool>,
}

impl Default for Spatial {
    fn default() -> Self {
        Self::new(Vec3::ZERO, Quat::IDENTITY, Vec3::ONE)
    }
}

impl Spatial {
    /// Create a detached node; its matrices are built on first read
    #[must_use]
    pub fn new(position: Vec3, rotation: Quat, scale: Vec3) -> Self {
        Self {
            position,
            rotation,
            scale,
            parent: None,
            children: Vec::new(),
            local_matrix: Cell::new(Matrix4x4::IDENTITY),
            world_matrix: Cell::new(Matrix4x4::IDENTITY),
            dirty: Cell::new(true),
        }
    }

    /// Local position
    #[must_use]
    pub const fn local_position(&self) -> Vec3 {
        self.position
    }

    /// Local rotation
    #[must_use]
    pub const fn local_rotation(&self) -> Quat {
        self.rotation
    }

    /// Local scale
    #[must_use]
    pub const fn local_scale(&self) -> Vec3 {
        self.scale
    }

    /// Parent handle, if any
    #[must_use]
    pub const fn parent(&self) -> Option<SpatialKey> {
        self.parent
    }

    /// Children in attachment order
    #[must_use]
    pub fn children(&self) -> &[SpatialKey] {
        &self.children
    }

    /// Whether the cached matrices are stale
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.dirty.get()
    }
}

/// Arena owning every [`Spatial`] node and the links between them.
#[derive(Debug, Default)]
pub struct SpatialTree {
    nodes: SlotMap<SpatialKey, Spatial>,
}

impl SpatialTree {
    /// Create an empty tree
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live nodes
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the tree has no nodes
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Whether `key` refers to a live node
    #[must_use]
    pub fn contains(&self, key: SpatialKey) -> bool {
        self.nodes.contains_key(key)
    }

    /// Create a root node with the identity transform
    pub fn create(&mut self) -> SpatialKey {
        self.nodes.insert(Spatial::default())
    }

    /// Create a root node with the given local transform
    pub fn create_with(&mut self, position: Vec3, rotation: Quat, scale: Vec3) -> SpatialKey {
        self.nodes.insert(Spatial::new(position, rotation, scale))
    }

    /// Remove a node.
    ///
    /// The node is detached from its parent and its children become roots;
    /// no link to the removed handle survives.
    pub fn destroy(&mut self, key: SpatialKey) -> SceneResult<Spatial> {
        let mut node = self.nodes.remove(key).ok_or(SceneError::NodeNotFound(key))?;

        if let Some(parent) = node.parent.take().and_then(|p| self.nodes.get_mut(p)) {
            parent.children.retain(|&c| c != key);
        }

        for child in std::mem::take(&mut node.children) {
            if let Some(child_node) = self.nodes.get_mut(child) {
                child_node.parent = None;
            }
            self.mark_dirty(child);
        }

        Ok(node)
    }

    /// Borrow a node
    pub fn get(&self, key: SpatialKey) -> SceneResult<&Spatial> {
        self.nodes.get(key).ok_or(SceneError::NodeNotFound(key))
    }

    fn get_mut(&mut self, key: SpatialKey) -> SceneResult<&mut Spatial> {
        self.nodes.get_mut(key).ok_or(SceneError::NodeNotFound(key))
    }

    /// Iterate over all nodes in arena order
    pub fn iter(&self) -> impl Iterator<Item = (SpatialKey, &Spatial)> {
        self.nodes.iter()
    }

    /// Overwrite the local position
    pub fn set_position(&mut self, key: SpatialKey, position: Vec3) -> SceneResult<()> {
        self.get_mut(key)?.position = position;
        self.mark_dirty(key);
        Ok(())
    }

    /// Overwrite the local rotation (not normalized)
    pub fn set_rotation(&mut self, key: SpatialKey, rotation: Quat) -> SceneResult<()> {
        self.get_mut(key)?.rotation = rotation;
        self.mark_dirty(key);
        Ok(())
    }

    /// Overwrite the local scale
    pub fn set_scale(&mut self, key: SpatialKey, scale: Vec3) -> SceneResult<()> {
        self.get_mut(key)?.scale = scale;
        self.mark_dirty(key);
        Ok(())
    }

    /// Add `offset` to the local position
    pub fn translate(&mut self, key: SpatialKey, offset: Vec3) -> SceneResult<()> {
        self.get_mut(key)?.position += offset;
        self.mark_dirty(key);
        Ok(())
    }

    /// Compose `offset` onto the local rotation (`rotation = rotation * offset`)
    pub fn rotate(&mut self, key: SpatialKey, offset: Quat) -> SceneResult<()> {
        self.get_mut(key)?.rotation *= offset;
        self.mark_dirty(key);
        Ok(())
    }

    /// Multiply the local scale component-wise
    pub fn scale_by(&mut self, key: SpatialKey, amount: Vec3) -> SceneResult<()> {
        self.get_mut(key)?.scale *= amount;
        self.mark_dirty(key);
        Ok(())
    }

    /// Attach `key` under `parent`, or make it a root with `None`.
    ///
    /// Re-attaching to the current parent changes nothing. The local
    /// transform is kept, so the world transform follows the new parent.
    pub fn set_parent(&mut self, key: SpatialKey, parent: Option<SpatialKey>) -> SceneResult<()> {
        let current = self.get(key)?.parent;
        if current == parent {
            return Ok(());
        }

        if let Some(new_parent) = parent {
            self.get(new_parent)?;
            if self.is_ancestor_or_self(key, new_parent) {
                return Err(SceneError::HierarchyCycle { child: key, parent: new_parent });
            }
        }

        if let Some(old) = current.and_then(|p| self.nodes.get_mut(p)) {
            old.children.retain(|&c| c != key);
        }

        self.get_mut(key)?.parent = parent;

        if let Some(new_parent) = parent {
            let children = &mut self.get_mut(new_parent)?.children;
            if !children.contains(&key) {
                children.push(key);
            }
        }

        self.mark_dirty(key);
        Ok(())
    }

    /// Attach `child` under `parent`; a no-op if it is already there
    pub fn add_child(&mut self, parent: SpatialKey, child: SpatialKey) -> SceneResult<()> {
        self.set_parent(child, Some(parent))
    }

    /// Detach `child` from `parent`; a no-op if it is not a child of `parent`
    pub fn remove_child(&mut self, parent: SpatialKey, child: SpatialKey) -> SceneResult<()> {
        self.get(parent)?;
        if self.get(child)?.parent == Some(parent) {
            self.set_parent(child, None)?;
        }
        Ok(())
    }

    /// Parent of `key`
    pub fn parent(&self, key: SpatialKey) -> SceneResult<Option<SpatialKey>> {
        Ok(self.get(key)?.parent)
    }

    /// Children of `key` in attachment order
    pub fn children(&self, key: SpatialKey) -> SceneResult<&[SpatialKey]> {
        Ok(&self.get(key)?.children)
    }

    /// Child at `index`, or `None` when out of range
    pub fn child(&self, key: SpatialKey, index: usize) -> SceneResult<Option<SpatialKey>> {
        Ok(self.get(key)?.children.get(index).copied())
    }

    /// Number of direct children
    pub fn child_count(&self, key: SpatialKey) -> SceneResult<usize> {
        Ok(self.get(key)?.children.len())
    }

    /// Whether `ancestor` is `key` or one of its ancestors
    #[must_use]
    pub fn is_ancestor_or_self(&self, ancestor: SpatialKey, key: SpatialKey) -> bool {
        let mut cursor = Some(key);
        while let Some(current) = cursor {
            if current == ancestor {
                return true;
            }
            cursor = self.nodes.get(current).and_then(|n| n.parent);
        }
        false
    }

    /// Whether the cached matrices of `key` are stale
    pub fn is_dirty(&self, key: SpatialKey) -> SceneResult<bool> {
        Ok(self.get(key)?.is_dirty())
    }

    /// Local position
    pub fn local_position(&self, key: SpatialKey) -> SceneResult<Vec3> {
        Ok(self.get(key)?.position)
    }

    /// Local rotation
    pub fn local_rotation(&self, key: SpatialKey) -> SceneResult<Quat> {
        Ok(self.get(key)?.rotation)
    }

    /// Local scale
    pub fn local_scale(&self, key: SpatialKey) -> SceneResult<Vec3> {
        Ok(self.get(key)?.scale)
    }

    /// Local `T * R * S` matrix
    pub fn local_matrix(&self, key: SpatialKey) -> SceneResult<Matrix4x4> {
        let node = self.get(key)?;
        self.update_matrices(node);
        Ok(node.local_matrix.get())
    }

    /// World matrix: the parent's world matrix times the local matrix
    pub fn matrix(&self, key: SpatialKey) -> SceneResult<Matrix4x4> {
        let node = self.get(key)?;
        self.update_matrices(node);
        Ok(node.world_matrix.get())
    }

    /// World-space position
    pub fn position(&self, key: SpatialKey) -> SceneResult<Vec3> {
        Ok(self.matrix(key)?.position())
    }

    /// World-space rotation, decomposed from the world matrix
    pub fn rotation(&self, key: SpatialKey) -> SceneResult<Quat> {
        Ok(self.matrix(key)?.rotation())
    }

    /// World-space scale, decomposed from the world matrix
    pub fn scale(&self, key: SpatialKey) -> SceneResult<Vec3> {
        Ok(self.matrix(key)?.scale())
    }

    /// World-space +Z
    pub fn forward(&self, key: SpatialKey) -> SceneResult<Vec3> {
        Ok(self.rotation(key)? * Vec3::FORWARD)
    }

    /// World-space -Z
    pub fn back(&self, key: SpatialKey) -> SceneResult<Vec3> {
        Ok(self.rotation(key)? * Vec3::BACK)
    }

    /// World-space +X
    pub fn right(&self, key: SpatialKey) -> SceneResult<Vec3> {
        Ok(self.rotation(key)? * Vec3::RIGHT)
    }

    /// World-space -X
    pub fn left(&self, key: SpatialKey) -> SceneResult<Vec3> {
        Ok(self.rotation(key)? * Vec3::LEFT)
    }

    /// World-space +Y
    pub fn up(&self, key: SpatialKey) -> SceneResult<Vec3> {
        Ok(self.rotation(key)? * Vec3::UP)
    }

    /// World-space -Y
    pub fn down(&self, key: SpatialKey) -> SceneResult<Vec3> {
        Ok(self.rotation(key)? * Vec3::DOWN)
    }

    // Stops at nodes that are already dirty: their subtree is dirty too.
    fn mark_dirty(&self, key: SpatialKey) {
        let Some(node) = self.nodes.get(key) else {
            return;
        };
        if node.dirty.replace(true) {
            return;
        }
        for &child in &node.children {
            self.mark_dirty(child);
        }
    }

    fn update_matrices(&self, node: &Spatial) {
        if !node.dirty.get() {
            return;
        }

        let local = Matrix4x4::from_prs(node.position, node.rotation, node.scale);
        let world = match node.parent.and_then(|p| self.nodes.get(p)) {
            Some(parent) => {
                self.update_matrices(parent);
                parent.world_matrix.get() * local
            }
            None => local,
        };

        node.local_matrix.set(local);
        node.world_matrix.set(world);
        node.dirty.set(false);
    }
}

/// Mutable view of a [`SpatialTree`] that can move nodes but not relink or
/// remove them. Reads go through to the tree.
///
/// ```compile_fail
/// use mistral_engine::ecs::World;
/// use mistral_engine::scene::SpatialKey;
///
/// fn relink(world: &mut World, child: SpatialKey, parent: SpatialKey) {
///     let _ = world.spatials_mut().set_parent(child, Some(parent));
/// }
/// ```
#[derive(Debug)]
pub struct TransformsMut<'a> {
    tree: &'a mut SpatialTree,
}

impl<'a> TransformsMut<'a> {
    pub(crate) fn new(tree: &'a mut SpatialTree) -> Self {
        Self { tree }
    }

    /// See [`SpatialTree::set_position`]
    pub fn set_position(&mut self, key: SpatialKey, position: Vec3) -> SceneResult<()> {
        self.tree.set_position(key, position)
    }

    /// See [`SpatialTree::set_rotation`]
    pub fn set_rotation(&mut self, key: SpatialKey, rotation: Quat) -> SceneResult<()> {
        self.tree.set_rotation(key, rotation)
    }

    /// See [`SpatialTree::set_scale`]
    pub fn set_scale(&mut self, key: SpatialKey, scale: Vec3) -> SceneResult<()> {
        self.tree.set_scale(key, scale)
    }

    /// See [`SpatialTree::translate`]
    pub fn translate(&mut self, key: SpatialKey, offset: Vec3) -> SceneResult<()> {
        self.tree.translate(key, offset)
    }

    /// See [`SpatialTree::rotate`]
    pub fn rotate(&mut self, key: SpatialKey, offset: Quat) -> SceneResult<()> {
        self.tree.rotate(key, offset)
    }

    /// See [`SpatialTree::scale_by`]
    pub fn scale_by(&mut self, key: SpatialKey, amount: Vec3) -> SceneResult<()> {
        self.tree.scale_by(key, amount)
    }
}

impl std::ops::Deref for TransformsMut<'_> {
    type Target = SpatialTree;

    fn deref(&self) -> &SpatialTree {
        self.tree
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::constants::HALF_PI;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    const EPSILON: f32 = 1e-5;

    fn chain(tree: &mut SpatialTree, depth: usize) -> Vec<SpatialKey> {
        let mut keys = vec![tree.create()];
        for i in 1..depth {
            let key = tree.create_with(Vec3::new(1.0, 0.0, 0.0), Quat::IDENTITY, Vec3::ONE);
            tree.set_parent(key, Some(keys[i - 1])).unwrap();
            keys.push(key);
        }
        keys
    }

    #[test]
    fn test_new_node_is_dirty_identity() {
        let mut tree = SpatialTree::new();
        let key = tree.create();
        assert!(tree.is_dirty(key).unwrap());
        assert_eq!(tree.matrix(key).unwrap(), Matrix4x4::IDENTITY);
        assert!(!tree.is_dirty(key).unwrap());
    }

    #[test]
    fn test_world_is_parent_world_times_local() {
        let mut tree = SpatialTree::new();
        let parent = tree.create_with(
            Vec3::new(2.0, 1.0, -3.0),
            Quat::from_axis_angle(Vec3::UP, 0.6),
            Vec3::splat(2.0),
        );
        let child = tree.create_with(
            Vec3::new(0.5, 0.0, 1.0),
            Quat::from_axis_angle(Vec3::RIGHT, -0.3),
            Vec3::new(1.0, 0.5, 1.0),
        );
        tree.set_parent(child, Some(parent)).unwrap();

        let expected = tree.matrix(parent).unwrap() * tree.local_matrix(child).unwrap();
        assert_relative_eq!(tree.matrix(child).unwrap(), expected, epsilon = EPSILON);

        tree.translate(parent, Vec3::new(0.0, 4.0, 0.0)).unwrap();
        let expected = tree.matrix(parent).unwrap() * tree.local_matrix(child).unwrap();
        assert_relative_eq!(tree.matrix(child).unwrap(), expected, epsilon = EPSILON);
    }

    #[test]
    fn test_child_position_follows_rotated_parent() {
        let mut tree = SpatialTree::new();
        let parent = tree.create_with(Vec3::ZERO, Quat::from_axis_angle(Vec3::UP, HALF_PI), Vec3::ONE);
        let child = tree.create_with(Vec3::RIGHT, Quat::IDENTITY, Vec3::ONE);
        tree.add_child(parent, child).unwrap();
        assert_abs_diff_eq!(tree.position(child).unwrap(), Vec3::BACK, epsilon = EPSILON);
    }

    #[test]
    fn test_mutating_root_dirties_every_descendant() {
        let mut tree = SpatialTree::new();
        let keys = chain(&mut tree, 4);
        let leaf = keys[3];
        assert_relative_eq!(tree.position(leaf).unwrap(), Vec3::new(3.0, 0.0, 0.0));
        assert!(keys.iter().all(|&k| !tree.is_dirty(k).unwrap()));

        tree.set_position(keys[0], Vec3::new(0.0, 10.0, 0.0)).unwrap();
        assert!(keys.iter().all(|&k| tree.is_dirty(k).unwrap()));
        assert_relative_eq!(tree.position(leaf).unwrap(), Vec3::new(3.0, 10.0, 0.0));
    }

    #[test]
    fn test_read_resolves_only_the_parent_chain() {
        let mut tree = SpatialTree::new();
        let root = tree.create();
        let a = tree.create();
        let b = tree.create();
        tree.add_child(root, a).unwrap();
        tree.add_child(root, b).unwrap();

        tree.matrix(a).unwrap();
        assert!(!tree.is_dirty(root).unwrap());
        assert!(!tree.is_dirty(a).unwrap());
        assert!(tree.is_dirty(b).unwrap());
    }

    #[test]
    fn test_repeated_mutation_short_circuits_but_stays_correct() {
        let mut tree = SpatialTree::new();
        let keys = chain(&mut tree, 3);
        tree.matrix(keys[2]).unwrap();

        tree.translate(keys[0], Vec3::UP).unwrap();
        tree.translate(keys[0], Vec3::UP).unwrap();
        tree.matrix(keys[0]).unwrap();
        tree.translate(keys[0], Vec3::UP).unwrap();

        assert!(tree.is_dirty(keys[2]).unwrap());
        assert_relative_eq!(tree.position(keys[2]).unwrap(), Vec3::new(2.0, 3.0, 0.0));
    }

    #[test]
    fn test_set_same_parent_is_noop() {
        let mut tree = SpatialTree::new();
        let parent = tree.create();
        let child = tree.create();
        tree.set_parent(child, Some(parent)).unwrap();
        tree.matrix(child).unwrap();

        tree.set_parent(child, Some(parent)).unwrap();
        tree.add_child(parent, child).unwrap();
        assert!(!tree.is_dirty(child).unwrap());
        assert_eq!(tree.children(parent).unwrap(), &[child]);
    }

    #[test]
    fn test_reparent_detaches_from_old_parent() {
        let mut tree = SpatialTree::new();
        let a = tree.create_with(Vec3::new(5.0, 0.0, 0.0), Quat::IDENTITY, Vec3::ONE);
        let b = tree.create_with(Vec3::new(0.0, 5.0, 0.0), Quat::IDENTITY, Vec3::ONE);
        let child = tree.create_with(Vec3::ONE, Quat::IDENTITY, Vec3::ONE);

        tree.add_child(a, child).unwrap();
        assert_relative_eq!(tree.position(child).unwrap(), Vec3::new(6.0, 1.0, 1.0));

        tree.add_child(b, child).unwrap();
        assert_eq!(tree.child_count(a).unwrap(), 0);
        assert_eq!(tree.children(b).unwrap(), &[child]);
        assert_eq!(tree.parent(child).unwrap(), Some(b));
        assert_eq!(tree.local_position(child).unwrap(), Vec3::ONE);
        assert_relative_eq!(tree.position(child).unwrap(), Vec3::new(1.0, 6.0, 1.0));
    }

    #[test]
    fn test_remove_child_is_idempotent() {
        let mut tree = SpatialTree::new();
        let a = tree.create_with(Vec3::new(5.0, 0.0, 0.0), Quat::IDENTITY, Vec3::ONE);
        let b = tree.create();
        let child = tree.create();
        tree.add_child(a, child).unwrap();
        assert_relative_eq!(tree.position(child).unwrap(), Vec3::new(5.0, 0.0, 0.0));

        tree.remove_child(b, child).unwrap();
        assert_eq!(tree.parent(child).unwrap(), Some(a));

        tree.remove_child(a, child).unwrap();
        tree.remove_child(a, child).unwrap();
        assert_eq!(tree.parent(child).unwrap(), None);
        assert_eq!(tree.child_count(a).unwrap(), 0);
        assert_eq!(tree.position(child).unwrap(), Vec3::ZERO);
    }

    #[test]
    fn test_cycles_are_rejected() {
        let mut tree = SpatialTree::new();
        let keys = chain(&mut tree, 3);
        assert_eq!(
            tree.set_parent(keys[0], Some(keys[2])),
            Err(SceneError::HierarchyCycle { child: keys[0], parent: keys[2] })
        );
        assert!(matches!(
            tree.set_parent(keys[1], Some(keys[1])),
            Err(SceneError::HierarchyCycle { .. })
        ));
        assert_eq!(tree.parent(keys[0]).unwrap(), None);
    }

    #[test]
    fn test_child_by_index() {
        let mut tree = SpatialTree::new();
        let root = tree.create();
        let a = tree.create();
        let b = tree.create();
        tree.add_child(root, a).unwrap();
        tree.add_child(root, b).unwrap();
        assert_eq!(tree.child(root, 0).unwrap(), Some(a));
        assert_eq!(tree.child(root, 1).unwrap(), Some(b));
        assert_eq!(tree.child(root, 2).unwrap(), None);
        assert_eq!(tree.child_count(root).unwrap(), 2);
    }

    #[test]
    fn test_destroy_leaves_no_dangling_links() {
        let mut tree = SpatialTree::new();
        let keys = chain(&mut tree, 3);
        tree.matrix(keys[2]).unwrap();

        tree.destroy(keys[1]).unwrap();
        assert!(!tree.contains(keys[1]));
        assert_eq!(tree.child_count(keys[0]).unwrap(), 0);
        assert_eq!(tree.parent(keys[2]).unwrap(), None);
        assert!(tree.is_dirty(keys[2]).unwrap());
        assert_relative_eq!(tree.position(keys[2]).unwrap(), Vec3::new(1.0, 0.0, 0.0));

        assert_eq!(tree.destroy(keys[1]).unwrap_err(), SceneError::NodeNotFound(keys[1]));
        assert!(tree.set_position(keys[1], Vec3::ONE).is_err());
    }

    #[test]
    fn test_prs_round_trip_through_node() {
        let mut tree = SpatialTree::new();
        let position = Vec3::new(-1.0, 2.5, 8.0);
        let scale = Vec3::new(1.5, 0.25, 2.0);
        for rotation in [
            Quat::from_axis_angle(Vec3::new(0.2, 1.0, 0.0), 0.4),
            Quat::from_axis_angle(Vec3::RIGHT, 2.9),
            Quat::from_euler(Vec3::new(1.0, 0.2, -2.0)),
        ] {
            let key = tree.create_with(position, rotation, scale);
            assert_relative_eq!(tree.position(key).unwrap(), position, epsilon = EPSILON);
            assert_relative_eq!(tree.scale(key).unwrap(), scale, epsilon = EPSILON);
            assert!(tree.rotation(key).unwrap().dot(rotation).abs() > 1.0 - 1e-4);
        }
    }

    #[test]
    fn test_relative_modifiers() {
        let mut tree = SpatialTree::new();
        let key = tree.create_with(Vec3::ONE, Quat::IDENTITY, Vec3::splat(2.0));
        tree.translate(key, Vec3::new(1.0, 0.0, -1.0)).unwrap();
        tree.scale_by(key, Vec3::new(0.5, 2.0, 1.0)).unwrap();
        tree.rotate(key, Quat::from_axis_angle(Vec3::UP, 0.25)).unwrap();
        tree.rotate(key, Quat::from_axis_angle(Vec3::UP, 0.5)).unwrap();

        assert_eq!(tree.local_position(key).unwrap(), Vec3::new(2.0, 1.0, 0.0));
        assert_eq!(tree.local_scale(key).unwrap(), Vec3::new(1.0, 4.0, 2.0));
        assert_relative_eq!(
            tree.local_rotation(key).unwrap(),
            Quat::from_axis_angle(Vec3::UP, 0.75),
            epsilon = EPSILON
        );
    }

    #[test]
    fn test_direction_vectors_use_world_rotation() {
        let mut tree = SpatialTree::new();
        let parent = tree.create_with(Vec3::ZERO, Quat::from_axis_angle(Vec3::UP, HALF_PI), Vec3::ONE);
        let child = tree.create();
        tree.add_child(parent, child).unwrap();

        assert_abs_diff_eq!(tree.forward(child).unwrap(), Vec3::RIGHT, epsilon = EPSILON);
        assert_abs_diff_eq!(tree.back(child).unwrap(), Vec3::LEFT, epsilon = EPSILON);
        assert_abs_diff_eq!(tree.right(child).unwrap(), Vec3::BACK, epsilon = EPSILON);
        assert_abs_diff_eq!(tree.left(child).unwrap(), Vec3::FORWARD, epsilon = EPSILON);
        assert_abs_diff_eq!(tree.up(child).unwrap(), Vec3::UP, epsilon = EPSILON);
        assert_abs_diff_eq!(tree.down(child).unwrap(), Vec3::DOWN, epsilon = EPSILON);
    }
}
