//! Entity registry and lifecycle dispatch
//!
//! Entities are heap-allocated [`Component`] behaviours owned by the
//! [`World`], keyed by a generated [`EntityId`]. Each one owns a node in the
//! world's spatial tree, and the entity hierarchy is mirrored onto it.
//!
//! Creation and destruction are deferred: [`World::create`] and
//! [`World::destroy`] only queue the id, and the per-frame passes run in this
//! order:
//!
//! ```text
//! create -> destroy -> update -> fixed update -> render 3D -> render 2D -> render GUI
//! ```

pub mod component;
pub mod entity;
pub mod world;

#[cfg(test)]
mod tests;

pub use component::{AsAny, Component};
pub use entity::{Entity, EntityId};
pub use world::World;

use crate::assets::ResourceError;
use crate::scene::SceneError;

/// Registry errors
#[derive(thiserror::Error, Debug)]
pub enum EcsError {
    /// No entity is registered under the id
    #[error("Component not found: {0}")]
    EntityNotFound(EntityId),

    /// The entity exists but its behaviour is not the requested type, or it
    /// is currently running one of its own hooks
    #[error("Component {id} is not a {expected}")]
    WrongType {
        /// Entity looked up
        id: EntityId,
        /// Requested type name
        expected: &'static str,
    },

    /// Transform hierarchy error
    #[error("Scene error: {0}")]
    Scene(#[from] SceneError),

    /// Resource error raised inside a hook
    #[error("Resource error: {0}")]
    Resource(#[from] ResourceError),

    /// Custom error raised by a component hook
    #[error("Component error: {0}")]
    Custom(String),
}

/// Result type for registry operations and component hooks
pub type EcsResult<T> = Result<T, EcsError>;
