//! Shared asset handles and the engine-side asset payloads

use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

/// Kind of asset a name refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetKind {
    /// Geometry
    Mesh,
    /// Image data
    Texture,
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetKind::Mesh => write!(f, "mesh"),
            AssetKind::Texture => write!(f, "texture"),
        }
    }
}

/// Mesh data as produced by the asset decoding pipeline
///
/// The runtime never interprets `data`; it is passed through to the renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mesh {
    /// Asset key the mesh was loaded under
    pub name: String,
    /// Encoded geometry
    pub data: Vec<u8>,
}

/// Texture data as produced by the asset decoding pipeline
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Texture {
    /// Asset key the texture was loaded under
    pub name: String,
    /// Encoded image
    pub data: Vec<u8>,
}

/// Shared, immutable reference to a loaded asset
///
/// Equality is identity: two handles are equal only when they point at the
/// same cached allocation.
pub struct AssetHandle<T> {
    inner: Arc<T>,
}

impl<T> AssetHandle<T> {
    pub(crate) fn new(asset: T) -> Self {
        Self {
            inner: Arc::new(asset),
        }
    }

    /// Whether both handles refer to the same cached asset
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// Number of live handles to this asset (cache entry included)
    pub fn share_count(&self) -> usize {
        Arc::strong_count(&self.inner)
    }
}

impl<T> Clone for AssetHandle<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> Deref for AssetHandle<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.inner
    }
}

impl<T> PartialEq for AssetHandle<T> {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl<T> Eq for AssetHandle<T> {}

impl<T: fmt::Debug> fmt::Debug for AssetHandle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("AssetHandle").field(&*self.inner).finish()
    }
}

/// Handle to a cached mesh
pub type MeshHandle = AssetHandle<Mesh>;

/// Handle to a cached texture
pub type TextureHandle = AssetHandle<Texture>;
