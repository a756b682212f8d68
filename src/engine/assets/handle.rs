// Type-safe asset handle system

use std::marker::PhantomData;

/// Unique identifier for an asset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AssetId(pub(crate) u64);

impl AssetId {
    /// Create a new asset ID from a string path
    pub fn from_path(path: &str) -> Self {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut hasher = DefaultHasher::new();
        path.hash(&mut hasher);
        Self(hasher.finish())
    }
}

/// Type-safe handle to an asset
///
/// Handles are handed out before the asset finishes loading; resolving one may
/// still yield nothing.
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct AssetHandle<T> {
    pub(crate) id: AssetId,
    _phantom: PhantomData<T>,
}

// Manual impls: the marker type does not need to be Copy itself
impl<T> Clone for AssetHandle<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for AssetHandle<T> {}

impl<T> AssetHandle<T> {
    pub(crate) fn new(id: AssetId) -> Self {
        Self {
            id,
            _phantom: PhantomData,
        }
    }

    /// Get the underlying asset ID
    pub fn id(&self) -> AssetId {
        self.id
    }
}

/// Marker for sprite sheet assets
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct SpriteSheetAsset;

pub type SheetHandle = AssetHandle<SpriteSheetAsset>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_asset_id_from_path() {
        let id1 = AssetId::from_path("hero/sprites/Idle.png");
        let id2 = AssetId::from_path("hero/sprites/Idle.png");
        let id3 = AssetId::from_path("hero/sprites/Run.png");

        assert_eq!(id1, id2, "Same paths should produce same IDs");
        assert_ne!(id1, id3, "Different paths should produce different IDs");
    }

    #[test]
    fn test_handle_is_copy() {
        let handle: SheetHandle = AssetHandle::new(AssetId::from_path("a.png"));
        let copy = handle;
        assert_eq!(handle.id(), copy.id());
    }
}
