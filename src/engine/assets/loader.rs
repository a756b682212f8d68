// Asset loading functionality

use super::AssetError;
use image::RgbaImage;
use std::path::{Path, PathBuf};

/// A decoded sprite sheet: a horizontal strip of equal-width frames
#[derive(Debug, Clone)]
pub struct SpriteSheet {
    image: RgbaImage,
}

impl SpriteSheet {
    pub fn new(image: RgbaImage) -> Self {
        Self { image }
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Width of one frame when the sheet holds `frame_count` frames
    pub fn frame_width(&self, frame_count: usize) -> f32 {
        self.width() as f32 / frame_count.max(1) as f32
    }
}

/// Asset loader responsible for finding and decoding asset files
#[derive(Debug, Clone)]
pub struct AssetLoader {
    base_path: PathBuf,
}

impl AssetLoader {
    /// Create a new asset loader with the given base path
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    /// Get the full path for an asset
    pub fn resolve_path(&self, name: &str) -> PathBuf {
        self.base_path.join(name)
    }

    /// Read and decode a sprite sheet
    pub fn load_sheet(&self, name: &str) -> Result<SpriteSheet, AssetError> {
        let path = self.resolve_path(name);

        if !path.exists() {
            return Err(AssetError::NotFound(path.to_string_lossy().to_string()));
        }

        let bytes = std::fs::read(&path)?;
        Self::decode_sheet(&bytes)
    }

    /// Decode sprite sheet bytes (PNG or JPEG)
    pub fn decode_sheet(bytes: &[u8]) -> Result<SpriteSheet, AssetError> {
        let image = image::load_from_memory(bytes)?;
        Ok(SpriteSheet::new(image.to_rgba8()))
    }

    /// Get the base path
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }
}
