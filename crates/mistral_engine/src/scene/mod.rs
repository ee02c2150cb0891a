//! Transform hierarchy
//!
//! Every positioned object owns a [`Spatial`] node living in a
//! [`SpatialTree`] arena. Nodes refer to their parent and children through
//! generational [`SpatialKey`] handles, so a destroyed node can never be
//! reached through a stale link.
//!
//! ## Matrix caching
//!
//! Mutations only flip a dirty flag (and the flags of every descendant);
//! matrices are rebuilt on the next read, parent chain first:
//!
//! ```text
//! local = T * R * S
//! world = parent.world * local   (or local for a root)
//! ```

mod debug_draw;
mod spatial;

pub use debug_draw::draw_spatial;
pub use spatial::{Spatial, SpatialKey, SpatialTree, TransformsMut};

/// Scene hierarchy errors
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SceneError {
    /// The handle does not refer to a live node
    #[error("Spatial node not found: {0:?}")]
    NodeNotFound(SpatialKey),

    /// Re-parenting would make a node its own ancestor
    #[error("Cannot parent {child:?} under {parent:?}: it would create a cycle")]
    HierarchyCycle {
        /// Node being re-parented
        child: SpatialKey,
        /// Requested parent
        parent: SpatialKey,
    },
}

/// Result type for scene operations
pub type SceneResult<T> = Result<T, SceneError>;
