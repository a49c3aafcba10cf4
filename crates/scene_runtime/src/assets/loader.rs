//! Asset loader contract and the loaders shipped with the runtime
//!
//! The cache calls a loader exactly once per successfully loaded key; the
//! loader itself does no caching.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::handle::{AssetKind, Mesh, Texture};
use crate::core::AssetConfig;

/// Failure reported by an [`AssetLoader`]
#[derive(Debug, Error)]
pub enum LoadError {
    /// No asset exists under the name
    #[error("asset not found")]
    NotFound,

    /// The asset exists but could not be read
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Synchronous asset loading, from the runtime's point of view
pub trait AssetLoader {
    /// Load the mesh stored under `name`
    fn load_mesh(&self, name: &str) -> Result<Mesh, LoadError>;

    /// Load the texture stored under `name`
    fn load_texture(&self, name: &str) -> Result<Texture, LoadError>;
}

/// Loader resolving names against directories on disk
///
/// A name is tried verbatim in each search path first, then with each default
/// extension of its kind appended (`"cow1"` → `"cow1.obj"`).
#[derive(Debug, Clone)]
pub struct FileSystemLoader {
    config: AssetConfig,
}

impl FileSystemLoader {
    /// Create a loader for the given asset configuration
    pub fn new(config: AssetConfig) -> Self {
        log::info!("Asset search paths: {:?}", config.search_paths);
        Self { config }
    }

    /// Find the file backing `name`, if any
    pub fn resolve(&self, kind: AssetKind, name: &str) -> Option<PathBuf> {
        let extensions = match kind {
            AssetKind::Mesh => &self.config.mesh_extensions,
            AssetKind::Texture => &self.config.texture_extensions,
        };

        let mut candidates = vec![name.to_string()];
        if Path::new(name).extension().is_none() {
            candidates.extend(extensions.iter().map(|ext| format!("{}.{}", name, ext)));
        }

        for search_path in &self.config.search_paths {
            for candidate in &candidates {
                let path = Path::new(search_path).join(candidate);
                if path.is_file() {
                    return Some(path);
                }
            }
        }
        None
    }

    fn read(&self, kind: AssetKind, name: &str) -> Result<Vec<u8>, LoadError> {
        let path = self.resolve(kind, name).ok_or(LoadError::NotFound)?;
        log::debug!("Reading {} '{}' from {}", kind, name, path.display());
        Ok(std::fs::read(path)?)
    }
}

impl AssetLoader for FileSystemLoader {
    fn load_mesh(&self, name: &str) -> Result<Mesh, LoadError> {
        Ok(Mesh {
            name: name.to_string(),
            data: self.read(AssetKind::Mesh, name)?,
        })
    }

    fn load_texture(&self, name: &str) -> Result<Texture, LoadError> {
        Ok(Texture {
            name: name.to_string(),
            data: self.read(AssetKind::Texture, name)?,
        })
    }
}

/// Loader serving assets registered in memory
#[derive(Debug, Clone, Default)]
pub struct MemoryLoader {
    meshes: HashMap<String, Vec<u8>>,
    textures: HashMap<String, Vec<u8>>,
}

impl MemoryLoader {
    /// Create an empty loader
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a mesh
    pub fn with_mesh(mut self, name: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        self.meshes.insert(name.into(), data.into());
        self
    }

    /// Register a texture
    pub fn with_texture(mut self, name: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        self.textures.insert(name.into(), data.into());
        self
    }
}

impl AssetLoader for MemoryLoader {
    fn load_mesh(&self, name: &str) -> Result<Mesh, LoadError> {
        let data = self.meshes.get(name).ok_or(LoadError::NotFound)?;
        Ok(Mesh {
            name: name.to_string(),
            data: data.clone(),
        })
    }

    fn load_texture(&self, name: &str) -> Result<Texture, LoadError> {
        let data = self.textures.get(name).ok_or(LoadError::NotFound)?;
        Ok(Texture {
            name: name.to_string(),
            data: data.clone(),
        })
    }
}
