//! Asset management system
//!
//! Scripts and entity configurations name assets by string key; the
//! [`ResourceCache`] turns a key into a shared handle, loading through an
//! [`AssetLoader`] the first time.

pub mod handle;
pub mod loader;
pub mod resource_cache;

pub use handle::{AssetHandle, AssetKind, Mesh, MeshHandle, Texture, TextureHandle};
pub use loader::{AssetLoader, FileSystemLoader, LoadError, MemoryLoader};
pub use resource_cache::{ResourceCache, ResourceError};
