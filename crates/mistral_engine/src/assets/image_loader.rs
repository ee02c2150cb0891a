//! Texture decoding
//!
//! Decodes PNG, BMP, JPEG, TGA, GIF, QOI, HDR and DDS files into tightly
//! packed RGBA8 pixels. Other texture containers (PSD, KTX, ASTC, PKM, PVR)
//! are rejected with [`ResourceError::UnsupportedExtension`].

use std::path::Path;

use image::ImageFormat;

use super::ResourceError;

/// Decoded image, RGBA8, rows top to bottom
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageData {
    /// Raw RGBA pixel data
    pub data: Vec<u8>,
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
}

impl ImageData {
    /// Decode an image file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ResourceError> {
        let path = path.as_ref();
        log::debug!("Decoding image {}", path.display());

        let readable = ImageFormat::from_path(path).is_ok_and(|format| format.reading_enabled());
        if !readable {
            return Err(ResourceError::UnsupportedExtension(path.to_path_buf()));
        }

        let rgba = image::open(path)
            .map_err(|e| ResourceError::Decode { path: path.to_path_buf(), message: e.to_string() })?
            .to_rgba8();
        let (width, height) = rgba.dimensions();

        Ok(Self { data: rgba.into_raw(), width, height })
    }

    /// Decode an image held in memory
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ResourceError> {
        let rgba = image::load_from_memory(bytes)
            .map_err(|e| ResourceError::Decode { path: "<memory>".into(), message: e.to_string() })?
            .to_rgba8();
        let (width, height) = rgba.dimensions();

        Ok(Self { data: rgba.into_raw(), width, height })
    }

    /// An image filled with one color
    #[must_use]
    pub fn solid_color(width: u32, height: u32, color: [u8; 4]) -> Self {
        let pixel_count = width as usize * height as usize;
        Self {
            data: color.repeat(pixel_count),
            width,
            height,
        }
    }

    /// Color of the pixel at (`x`, `y`)
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let start = (y as usize * self.width as usize + x as usize) * 4;
        self.data.get(start..start + 4)?.try_into().ok()
    }

    /// Size of the pixel data in bytes
    #[must_use]
    pub fn size_bytes(&self) -> usize {
        self.data.len()
    }
}
