//! Declarative description of an entity to create

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::foundation::math::{Quat, Transform, Vec3};
use crate::script::Script;

/// Everything needed to create an entity in one request
///
/// Deserializable from TOML/RON; unknown fields are ignored and missing ones
/// take their defaults. Scripts can only be attached from code.
#[derive(Serialize, Deserialize)]
#[serde(default)]
pub struct EntityConfig {
    /// Display name, not required to be unique
    pub name: String,
    /// Local position
    pub position: Vec3,
    /// Local rotation
    pub rotation: Quat,
    /// Local scale
    pub scale: Vec3,
    /// Mesh key resolved through the resource cache
    pub mesh: Option<String>,
    /// Texture key resolved through the resource cache; ignored without a mesh
    pub texture: Option<String>,
    /// Script attached when the entity is committed
    #[serde(skip)]
    pub script: Option<Box<dyn Script>>,
}

impl EntityConfig {
    /// Empty config with the given name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Builder pattern: set position
    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    /// Builder pattern: set rotation
    pub fn with_rotation(mut self, rotation: Quat) -> Self {
        self.rotation = rotation;
        self
    }

    /// Builder pattern: set scale
    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    /// Builder pattern: set uniform scale
    pub fn with_uniform_scale(self, scale: f32) -> Self {
        self.with_scale(Vec3::new(scale, scale, scale))
    }

    /// Builder pattern: set mesh key
    pub fn with_mesh(mut self, mesh: impl Into<String>) -> Self {
        self.mesh = Some(mesh.into());
        self
    }

    /// Builder pattern: set texture key
    pub fn with_texture(mut self, texture: impl Into<String>) -> Self {
        self.texture = Some(texture.into());
        self
    }

    /// Builder pattern: attach a script
    pub fn with_script(mut self, script: impl Script) -> Self {
        self.script = Some(Box::new(script));
        self
    }

    /// Local transform described by this config
    pub fn transform(&self) -> Transform {
        Transform::new(self.position, self.rotation, self.scale)
    }
}

impl Default for EntityConfig {
    fn default() -> Self {
        Self {
            name: String::new(),
            position: Vec3::zeros(),
            rotation: Quat::identity(),
            scale: Vec3::new(1.0, 1.0, 1.0),
            mesh: None,
            texture: None,
            script: None,
        }
    }
}

impl fmt::Debug for EntityConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntityConfig")
            .field("name", &self.name)
            .field("position", &self.position)
            .field("rotation", &self.rotation)
            .field("scale", &self.scale)
            .field("mesh", &self.mesh)
            .field("texture", &self.texture)
            .field("script", &self.script.as_ref().map(|script| script.name()))
            .finish()
    }
}
