// Asset management system
//
// Sprite sheets are loaded in the background. Until a sheet arrives (or if it
// never does) drawing it is a no-op, so the game keeps running either way.

mod handle;
mod loader;
mod manager;

pub use handle::SheetHandle;
pub use manager::{AssetManager, LoadStatus};

// Sheets are only built by hand in tests
#[allow(unused_imports)]
pub use loader::SpriteSheet;

/// Asset loading errors
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("Asset not found: {0}")]
    NotFound(String),

    #[error("Failed to decode image: {0}")]
    Decode(#[from] image::ImageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_asset_error_display() {
        let err = AssetError::NotFound("Idle.png".to_string());
        assert_eq!(err.to_string(), "Asset not found: Idle.png");
    }
}
