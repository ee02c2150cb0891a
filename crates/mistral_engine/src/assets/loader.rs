//! Turning files into resources

use std::path::Path;
use std::time::Instant;

use log::debug;

use super::{ImageData, Resource, ResourceError, ResourceType};

/// Produces and releases the data behind a [`Resource`].
///
/// A renderer that owns GPU textures or audio buffers implements this to
/// create its native handles; [`FileAssetLoader`] is the portable default.
pub trait AssetLoader {
    /// Load `path` as a resource of kind `kind`
    fn load(&mut self, path: &Path, kind: ResourceType) -> Result<Resource, ResourceError>;

    /// Release whatever `load` allocated for `resource`
    fn unload(&mut self, _path: &Path, _resource: Resource) {}
}

/// Decodes textures with the `image` crate and keeps every other kind as raw
/// file bytes.
#[derive(Debug, Default, Clone, Copy)]
pub struct FileAssetLoader;

impl AssetLoader for FileAssetLoader {
    fn load(&mut self, path: &Path, kind: ResourceType) -> Result<Resource, ResourceError> {
        let started = Instant::now();

        let resource = match kind {
            ResourceType::Texture => Resource::Texture(ImageData::from_file(path)?),
            ResourceType::Sound => Resource::Sound(std::fs::read(path)?),
            ResourceType::Model => Resource::Model(std::fs::read(path)?),
            ResourceType::Font => Resource::Font(std::fs::read(path)?),
            ResourceType::None => return Err(ResourceError::UnsupportedExtension(path.to_path_buf())),
        };

        debug!("Read {} in {:.2} ms", path.display(), started.elapsed().as_secs_f64() * 1000.0);
        Ok(resource)
    }
}
