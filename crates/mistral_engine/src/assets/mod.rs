//! Media loading and caching
//!
//! A [`ResourceCache`] maps file paths to loaded [`Resource`]s. The kind of a
//! resource is decided by its file extension; the bytes are produced by an
//! [`AssetLoader`], which a renderer can replace with one that creates native
//! handles.

pub mod image_loader;
pub mod loader;
pub mod paths;
pub mod resource_cache;

pub use image_loader::ImageData;
pub use loader::{AssetLoader, FileAssetLoader};
pub use resource_cache::{Resource, ResourceCache, ResourceType};

use std::path::PathBuf;
use thiserror::Error;

/// Resource loading errors
#[derive(Error, Debug)]
pub enum ResourceError {
    /// Nothing exists at the path
    #[error("Resource not found: {}", .0.display())]
    NotFound(PathBuf),

    /// The extension maps to no known resource kind
    #[error("Unsupported resource type: {}", .0.display())]
    UnsupportedExtension(PathBuf),

    /// The file exists but could not be decoded
    #[error("Failed to decode {}: {message}", path.display())]
    Decode {
        /// File being decoded
        path: PathBuf,
        /// Decoder message
        message: String,
    },

    /// Filesystem error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
