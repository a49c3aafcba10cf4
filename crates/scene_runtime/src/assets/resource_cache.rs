//! Resource cache - lazy, idempotent load-and-cache of named assets
//!
//! The first request for a key goes through the [`AssetLoader`]; every later
//! request for that key returns a clone of the same handle. Failed loads are
//! not remembered, so a later request retries.
//!
//! The cache is shared by reference with every script during a tick, which is
//! why lookups take `&self` and the maps sit behind a lock.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use thiserror::Error;

use super::handle::{AssetHandle, AssetKind, MeshHandle, TextureHandle};
use super::loader::{AssetLoader, LoadError};

/// Resource cache errors
#[derive(Debug, Error)]
pub enum ResourceError {
    /// The key could not be loaded
    #[error("{kind} '{name}' not found")]
    NotFound {
        /// Requested asset kind
        kind: AssetKind,
        /// Requested key
        name: String,
    },

    /// The asset exists but reading it failed
    #[error("failed to read {kind} '{name}': {source}")]
    Io {
        /// Requested asset kind
        kind: AssetKind,
        /// Requested key
        name: String,
        /// Underlying IO failure
        #[source]
        source: std::io::Error,
    },
}

impl ResourceError {
    fn from_load(kind: AssetKind, name: &str, error: LoadError) -> Self {
        match error {
            LoadError::NotFound => ResourceError::NotFound {
                kind,
                name: name.to_string(),
            },
            LoadError::Io(source) => ResourceError::Io {
                kind,
                name: name.to_string(),
                source,
            },
        }
    }

    /// Key of the asset that failed
    pub fn name(&self) -> &str {
        match self {
            ResourceError::NotFound { name, .. } | ResourceError::Io { name, .. } => name,
        }
    }
}

/// Name-keyed cache of loaded meshes and textures
pub struct ResourceCache {
    loader: Box<dyn AssetLoader>,
    meshes: RwLock<HashMap<String, MeshHandle>>,
    textures: RwLock<HashMap<String, TextureHandle>>,
}

impl ResourceCache {
    /// Create an empty cache on top of `loader`
    pub fn new(loader: impl AssetLoader + 'static) -> Self {
        Self {
            loader: Box::new(loader),
            meshes: RwLock::new(HashMap::new()),
            textures: RwLock::new(HashMap::new()),
        }
    }

    /// Get the mesh stored under `name`, loading it on first use
    pub fn mesh(&self, name: &str) -> Result<MeshHandle, ResourceError> {
        Self::load_or_get(&self.meshes, AssetKind::Mesh, name, || {
            self.loader.load_mesh(name)
        })
    }

    /// Get the texture stored under `name`, loading it on first use
    pub fn texture(&self, name: &str) -> Result<TextureHandle, ResourceError> {
        Self::load_or_get(&self.textures, AssetKind::Texture, name, || {
            self.loader.load_texture(name)
        })
    }

    /// Load a set of meshes and textures up front, stopping at the first failure
    pub fn preload(&self, meshes: &[&str], textures: &[&str]) -> Result<(), ResourceError> {
        for name in meshes {
            self.mesh(name)?;
        }
        for name in textures {
            self.texture(name)?;
        }
        Ok(())
    }

    /// Whether a mesh is cached under `name`
    pub fn contains_mesh(&self, name: &str) -> bool {
        self.meshes
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(name)
    }

    /// Whether a texture is cached under `name`
    pub fn contains_texture(&self, name: &str) -> bool {
        self.textures
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(name)
    }

    /// Number of cached assets of both kinds
    pub fn len(&self) -> usize {
        let meshes = self.meshes.read().unwrap_or_else(PoisonError::into_inner).len();
        let textures = self.textures.read().unwrap_or_else(PoisonError::into_inner).len();
        meshes + textures
    }

    /// Whether nothing has been cached yet
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn load_or_get<T>(
        cache: &RwLock<HashMap<String, AssetHandle<T>>>,
        kind: AssetKind,
        name: &str,
        load: impl FnOnce() -> Result<T, LoadError>,
    ) -> Result<AssetHandle<T>, ResourceError> {
        if let Some(handle) = cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
        {
            return Ok(handle.clone());
        }

        let asset = load().map_err(|e| {
            let error = ResourceError::from_load(kind, name, e);
            log::debug!("Load failed: {}", error);
            error
        })?;

        let mut cache = cache.write().unwrap_or_else(PoisonError::into_inner);
        let handle = cache
            .entry(name.to_string())
            .or_insert_with(|| {
                log::debug!("Cached {} '{}'", kind, name);
                AssetHandle::new(asset)
            })
            .clone();
        Ok(handle)
    }
}

impl std::fmt::Debug for ResourceCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResourceCache")
            .field("cached", &self.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::{Mesh, MemoryLoader, Texture};
    use std::cell::Cell;
    use std::rc::Rc;

    /// Loader that counts calls and can be told to start succeeding
    struct CountingLoader {
        calls: Rc<Cell<usize>>,
        available: Rc<Cell<bool>>,
    }

    impl AssetLoader for CountingLoader {
        fn load_mesh(&self, name: &str) -> Result<Mesh, LoadError> {
            self.calls.set(self.calls.get() + 1);
            if self.available.get() {
                Ok(Mesh { name: name.to_string(), data: Vec::new() })
            } else {
                Err(LoadError::NotFound)
            }
        }

        fn load_texture(&self, name: &str) -> Result<Texture, LoadError> {
            self.calls.set(self.calls.get() + 1);
            Ok(Texture { name: name.to_string(), data: Vec::new() })
        }
    }

    fn sample_cache() -> ResourceCache {
        ResourceCache::new(
            MemoryLoader::new()
                .with_mesh("cow1", vec![1])
                .with_mesh("other", vec![2])
                .with_texture("tex1.png", vec![3])
                .with_texture("other.png", vec![4]),
        )
    }

    #[test]
    fn test_same_key_returns_identical_handle() {
        let cache = sample_cache();
        let first = cache.mesh("cow1").unwrap();
        let second = cache.mesh("cow1").unwrap();
        let other = cache.mesh("other").unwrap();

        assert!(first.ptr_eq(&second));
        assert_ne!(first, other);
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_textures_stay_distinct() {
        let cache = sample_cache();
        let tex1 = cache.texture("tex1.png").unwrap();
        let tex1_again = cache.texture("tex1.png").unwrap();
        let other = cache.texture("other.png").unwrap();

        assert_eq!(tex1, tex1_again);
        assert_ne!(tex1, other);
        assert_eq!(tex1.data, vec![3]);
        assert_eq!(other.data, vec![4]);
        assert_eq!(cache.texture("tex1.png").unwrap(), tex1);
    }

    #[test]
    fn test_loader_called_once_per_key() {
        let calls = Rc::new(Cell::new(0));
        let cache = ResourceCache::new(CountingLoader {
            calls: calls.clone(),
            available: Rc::new(Cell::new(true)),
        });

        for _ in 0..5 {
            cache.mesh("cow1").unwrap();
        }
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_failed_load_is_not_cached() {
        let calls = Rc::new(Cell::new(0));
        let available = Rc::new(Cell::new(false));
        let cache = ResourceCache::new(CountingLoader {
            calls: calls.clone(),
            available: available.clone(),
        });

        let err = cache.mesh("monkey").unwrap_err();
        assert!(matches!(err, ResourceError::NotFound { kind: AssetKind::Mesh, .. }));
        assert_eq!(err.name(), "monkey");
        assert!(!cache.contains_mesh("monkey"));

        available.set(true);
        assert!(cache.mesh("monkey").is_ok());
        assert_eq!(calls.get(), 2);
        assert!(cache.contains_mesh("monkey"));
    }

    #[test]
    fn test_mesh_and_texture_namespaces_are_separate() {
        let cache = ResourceCache::new(MemoryLoader::new().with_texture("cow1", vec![9]));
        assert!(cache.mesh("cow1").is_err());
        assert!(cache.texture("cow1").is_ok());
    }
}
