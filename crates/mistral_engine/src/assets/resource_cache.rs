//! Path-keyed cache of loaded media

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use log::{info, warn};

use super::{AssetLoader, FileAssetLoader, ImageData, ResourceError};

const TEXTURE_EXTENSIONS: &[&str] = &[
    "png", "bmp", "tga", "jpg", "gif", "qoi", "psd", "dds", "hdr", "ktx", "astc", "pkm", "pvr",
];
const SOUND_EXTENSIONS: &[&str] = &["wav", "ogg", "mp3", "flac", "xm", "mod", "qoa"];
const MODEL_EXTENSIONS: &[&str] = &["obj", "iqm", "gltf", "vox", "m3d", "glb"];
const FONT_EXTENSIONS: &[&str] = &["ttf", "otf"];

/// Kind of media, decided by file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ResourceType {
    /// Unknown kind; also the kind of the placeholder
    #[default]
    None,
    /// Image
    Texture,
    /// Audio clip
    Sound,
    /// Mesh or scene
    Model,
    /// Typeface
    Font,
}

impl ResourceType {
    /// Kind of the file at `path`; the extension is matched case-insensitively
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        let Some(extension) = path.as_ref().extension().and_then(|e| e.to_str()) else {
            return Self::None;
        };
        let extension = extension.to_ascii_lowercase();
        let is = |table: &[&str]| table.iter().any(|candidate| *candidate == extension);

        if is(TEXTURE_EXTENSIONS) {
            Self::Texture
        } else if is(SOUND_EXTENSIONS) {
            Self::Sound
        } else if is(MODEL_EXTENSIONS) {
            Self::Model
        } else if is(FONT_EXTENSIONS) {
            Self::Font
        } else {
            Self::None
        }
    }
}

/// Loaded media
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resource {
    /// Placeholder substituted for anything that failed to load
    None,
    /// Decoded image
    Texture(ImageData),
    /// Encoded audio
    Sound(Vec<u8>),
    /// Encoded mesh
    Model(Vec<u8>),
    /// Encoded font
    Font(Vec<u8>),
}

impl Resource {
    /// Kind of this resource
    #[must_use]
    pub const fn resource_type(&self) -> ResourceType {
        match self {
            Self::None => ResourceType::None,
            Self::Texture(_) => ResourceType::Texture,
            Self::Sound(_) => ResourceType::Sound,
            Self::Model(_) => ResourceType::Model,
            Self::Font(_) => ResourceType::Font,
        }
    }

    /// Whether this is the placeholder
    #[must_use]
    pub const fn is_placeholder(&self) -> bool {
        matches!(self, Self::None)
    }
}

/// Magenta, so a missing texture is obvious on screen
const MISSING_TEXTURE_COLOR: [u8; 4] = [255, 0, 255, 255];

/// Media keyed by the path it was loaded from.
///
/// [`ResourceCache::get`] and the typed getters never fail: anything that
/// cannot be loaded is reported through the log and replaced by a
/// placeholder.
pub struct ResourceCache {
    resources: HashMap<PathBuf, Resource>,
    loader: Box<dyn AssetLoader>,
    placeholder: Resource,
    missing_texture: ImageData,
}

impl Default for ResourceCache {
    fn default() -> Self {
        Self::new(Box::new(FileAssetLoader))
    }
}

impl ResourceCache {
    /// Create an empty cache loading through `loader`
    #[must_use]
    pub fn new(loader: Box<dyn AssetLoader>) -> Self {
        Self {
            resources: HashMap::new(),
            loader,
            placeholder: Resource::None,
            missing_texture: ImageData::solid_color(1, 1, MISSING_TEXTURE_COLOR),
        }
    }

    /// Load `path` unless it is already cached
    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<(), ResourceError> {
        let path = path.as_ref();
        if self.resources.contains_key(path) {
            return Ok(());
        }
        if !path.exists() {
            return Err(ResourceError::NotFound(path.to_path_buf()));
        }

        let kind = ResourceType::from_path(path);
        if kind == ResourceType::None {
            return Err(ResourceError::UnsupportedExtension(path.to_path_buf()));
        }

        let resource = self.loader.load(path, kind)?;
        info!("Loaded {:?} {}", kind, path.display());
        self.resources.insert(path.to_path_buf(), resource);
        Ok(())
    }

    /// Drop `path` from the cache and release it; `false` if it was not cached
    pub fn unload(&mut self, path: impl AsRef<Path>) -> bool {
        let path = path.as_ref();
        match self.resources.remove(path) {
            Some(resource) => {
                self.loader.unload(path, resource);
                info!("Unloaded {}", path.display());
                true
            }
            None => false,
        }
    }

    /// Resource at `path`, loading it on a miss.
    ///
    /// Returns the placeholder when loading fails.
    pub fn get(&mut self, path: impl AsRef<Path>) -> &Resource {
        let path = path.as_ref();
        if let Err(err) = self.load(path) {
            warn!("Could not get the resource {}: {err}", path.display());
            return &self.placeholder;
        }
        self.resources.get(path).unwrap_or(&self.placeholder)
    }

    /// Texture at `path`, or a 1x1 magenta image
    pub fn texture(&mut self, path: impl AsRef<Path>) -> &ImageData {
        let path = path.as_ref();
        self.load_logged(path);
        match self.resources.get(path) {
            Some(Resource::Texture(image)) => image,
            other => {
                Self::report_kind_mismatch(path, ResourceType::Texture, other);
                &self.missing_texture
            }
        }
    }

    /// Encoded sound at `path`, or no bytes
    pub fn sound(&mut self, path: impl AsRef<Path>) -> &[u8] {
        self.raw(path.as_ref(), ResourceType::Sound)
    }

    /// Encoded model at `path`, or no bytes
    pub fn model(&mut self, path: impl AsRef<Path>) -> &[u8] {
        self.raw(path.as_ref(), ResourceType::Model)
    }

    /// Encoded font at `path`, or no bytes
    pub fn font(&mut self, path: impl AsRef<Path>) -> &[u8] {
        self.raw(path.as_ref(), ResourceType::Font)
    }

    /// Cached resource at `path` without loading
    #[must_use]
    pub fn peek(&self, path: impl AsRef<Path>) -> Option<&Resource> {
        self.resources.get(path.as_ref())
    }

    /// Whether `path` is cached
    #[must_use]
    pub fn contains(&self, path: impl AsRef<Path>) -> bool {
        self.resources.contains_key(path.as_ref())
    }

    /// Number of cached resources
    #[must_use]
    pub fn len(&self) -> usize {
        self.resources.len()
    }

    /// Whether nothing is cached
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    /// Unload everything
    pub fn clear(&mut self) {
        for (path, resource) in self.resources.drain() {
            self.loader.unload(&path, resource);
        }
    }

    fn raw(&mut self, path: &Path, kind: ResourceType) -> &[u8] {
        self.load_logged(path);
        match (kind, self.resources.get(path)) {
            (ResourceType::Sound, Some(Resource::Sound(bytes)))
            | (ResourceType::Model, Some(Resource::Model(bytes)))
            | (ResourceType::Font, Some(Resource::Font(bytes))) => bytes.as_slice(),
            (_, other) => {
                Self::report_kind_mismatch(path, kind, other);
                &[]
            }
        }
    }

    fn load_logged(&mut self, path: &Path) {
        if let Err(err) = self.load(path) {
            warn!("Could not get the resource {}: {err}", path.display());
        }
    }

    fn report_kind_mismatch(path: &Path, expected: ResourceType, found: Option<&Resource>) {
        if let Some(resource) = found {
            warn!(
                "{} is a {:?}, not a {:?}",
                path.display(),
                resource.resource_type(),
                expected
            );
        }
    }
}

impl std::fmt::Debug for ResourceCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResourceCache")
            .field("resources", &self.resources.keys().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Loader that counts calls instead of touching the file contents
    #[derive(Default)]
    struct CountingLoader {
        loads: Rc<RefCell<Vec<PathBuf>>>,
        unloads: Rc<RefCell<Vec<PathBuf>>>,
    }

    impl AssetLoader for CountingLoader {
        fn load(&mut self, path: &Path, _kind: ResourceType) -> Result<Resource, ResourceError> {
            self.loads.borrow_mut().push(path.to_path_buf());
            Ok(Resource::Font(vec![1, 2, 3]))
        }

        fn unload(&mut self, path: &Path, _resource: Resource) {
            self.unloads.borrow_mut().push(path.to_path_buf());
        }
    }

    fn write_png(path: &Path) {
        image::RgbaImage::from_pixel(3, 2, image::Rgba([0, 128, 255, 255])).save(path).unwrap();
    }

    #[test]
    fn test_type_from_extension() {
        assert_eq!(ResourceType::from_path("a/b/ship.png"), ResourceType::Texture);
        assert_eq!(ResourceType::from_path("ship.PNG"), ResourceType::Texture);
        assert_eq!(ResourceType::from_path("boom.ogg"), ResourceType::Sound);
        assert_eq!(ResourceType::from_path("rock.glb"), ResourceType::Model);
        assert_eq!(ResourceType::from_path("mono.otf"), ResourceType::Font);
        assert_eq!(ResourceType::from_path("notes.txt"), ResourceType::None);
        assert_eq!(ResourceType::from_path("Makefile"), ResourceType::None);
    }

    #[test]
    fn test_load_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mono.ttf");
        std::fs::write(&path, b"font").unwrap();

        let loader = CountingLoader::default();
        let loads = Rc::clone(&loader.loads);
        let mut cache = ResourceCache::new(Box::new(loader));

        cache.load(&path).unwrap();
        cache.load(&path).unwrap();
        assert_eq!(cache.font(&path), [1, 2, 3]);

        assert_eq!(loads.borrow().len(), 1);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_unload_releases_through_loader() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mono.ttf");
        std::fs::write(&path, b"font").unwrap();

        let loader = CountingLoader::default();
        let unloads = Rc::clone(&loader.unloads);
        let mut cache = ResourceCache::new(Box::new(loader));
        cache.load(&path).unwrap();

        assert!(cache.unload(&path));
        assert!(!cache.unload(&path));
        assert!(!cache.contains(&path));
        assert_eq!(*unloads.borrow(), [path]);
    }

    #[test]
    fn test_load_failures_are_reported() {
        let dir = tempfile::tempdir().unwrap();
        let mut cache = ResourceCache::default();

        let missing = dir.path().join("missing.png");
        assert!(matches!(cache.load(&missing), Err(ResourceError::NotFound(p)) if p == missing));

        let notes = dir.path().join("notes.txt");
        std::fs::write(&notes, "hello").unwrap();
        assert!(matches!(cache.load(&notes), Err(ResourceError::UnsupportedExtension(_))));

        let broken = dir.path().join("broken.png");
        std::fs::write(&broken, "not an image").unwrap();
        assert!(matches!(cache.load(&broken), Err(ResourceError::Decode { .. })));

        assert!(cache.is_empty());
    }

    #[test]
    fn test_get_substitutes_placeholder() {
        let dir = tempfile::tempdir().unwrap();
        let mut cache = ResourceCache::default();

        let resource = cache.get(dir.path().join("missing.ogg"));
        assert!(resource.is_placeholder());
        assert_eq!(resource.resource_type(), ResourceType::None);

        let texture = cache.texture(dir.path().join("missing.png"));
        assert_eq!((texture.width, texture.height), (1, 1));
        assert_eq!(texture.pixel(0, 0), Some(MISSING_TEXTURE_COLOR));

        assert!(cache.sound(dir.path().join("missing.wav")).is_empty());
        assert!(cache.is_empty());
    }

    #[test]
    fn test_texture_is_decoded_and_cached() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sky.png");
        write_png(&path);
        let mut cache = ResourceCache::default();

        let texture = cache.texture(&path).clone();
        assert_eq!((texture.width, texture.height), (3, 2));
        assert_eq!(texture.pixel(2, 1), Some([0, 128, 255, 255]));
        assert_eq!(cache.peek(&path).map(Resource::resource_type), Some(ResourceType::Texture));

        // Wrong-kind access falls back without evicting the texture
        assert!(cache.model(&path).is_empty());
        assert!(cache.contains(&path));

        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn test_non_png_textures_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut cache = ResourceCache::default();

        for name in ["sky.bmp", "SKY.JPG", "sky.qoi"] {
            let path = dir.path().join(name);
            image::RgbImage::from_pixel(2, 2, image::Rgb([40, 80, 120])).save(&path).unwrap();

            cache.load(&path).unwrap();
            let Some(Resource::Texture(texture)) = cache.peek(&path) else {
                panic!("{name} did not load as a texture");
            };
            assert_eq!((texture.width, texture.height), (2, 2));
        }
        assert_eq!(cache.len(), 3);
    }
}
