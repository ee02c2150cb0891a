//! Entity identifiers and registry records

use std::borrow::Borrow;
use std::fmt;

use super::Component;
use crate::scene::SpatialKey;

/// Registry key of an entity, a hyphenated UUID-v4 string
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntityId(String);

impl EntityId {
    /// Wrap an existing id string
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The id as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for EntityId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for EntityId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// One registered entity: its behaviour, its name, its place in the
/// hierarchy and the spatial node it owns.
pub struct Entity {
    pub(crate) id: EntityId,
    pub(crate) name: String,
    pub(crate) type_name: &'static str,
    pub(crate) parent: Option<EntityId>,
    pub(crate) children: Vec<EntityId>,
    pub(crate) spatial: SpatialKey,
    // Checked out while one of the entity's own lifecycle hooks runs
    pub(crate) behaviour: Option<Box<dyn Component>>,
    pub(crate) created: bool,
    pub(crate) pending_destroy: bool,
}

impl Entity {
    pub(crate) fn new(
        id: EntityId,
        type_name: &'static str,
        spatial: SpatialKey,
        behaviour: Box<dyn Component>,
    ) -> Self {
        Self {
            id,
            name: type_name.to_owned(),
            type_name,
            parent: None,
            children: Vec::new(),
            spatial,
            behaviour: Some(behaviour),
            created: false,
            pending_destroy: false,
        }
    }

    /// Registry key
    #[must_use]
    pub fn id(&self) -> &EntityId {
        &self.id
    }

    /// Display name; defaults to the component's type name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Short name of the component type, e.g. `Planet`
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Parent entity, if attached
    #[must_use]
    pub fn parent(&self) -> Option<&EntityId> {
        self.parent.as_ref()
    }

    /// Child ids in attachment order
    #[must_use]
    pub fn children(&self) -> &[EntityId] {
        &self.children
    }

    /// Number of children
    #[must_use]
    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    /// Whether any child is attached
    #[must_use]
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Handle of the entity's node in the world's spatial tree
    #[must_use]
    pub fn spatial(&self) -> SpatialKey {
        self.spatial
    }

    /// Whether the creation pass has run `on_create` for this entity
    #[must_use]
    pub fn is_created(&self) -> bool {
        self.created
    }

    /// Whether the entity is queued for the next destruction pass
    #[must_use]
    pub fn is_pending_destroy(&self) -> bool {
        self.pending_destroy
    }
}

impl fmt::Debug for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entity")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("type_name", &self.type_name)
            .field("parent", &self.parent)
            .field("children", &self.children)
            .field("spatial", &self.spatial)
            .field("created", &self.created)
            .field("pending_destroy", &self.pending_destroy)
            .finish_non_exhaustive()
    }
}
