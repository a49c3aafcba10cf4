//! Renderable component for entities that can be rendered
//!
//! Attaches cached mesh/texture handles to an entity. The handles are shared
//! with the resource cache and every other entity using the same asset; the
//! component itself belongs to exactly one entity and goes away with it.

use crate::assets::{MeshHandle, TextureHandle};

/// Component for entities that can be rendered
#[derive(Debug, Clone, PartialEq)]
pub struct RenderableComponent {
    /// Geometry to draw
    pub mesh: MeshHandle,

    /// Optional texture
    pub texture: Option<TextureHandle>,

    /// Whether this object is visible
    pub visible: bool,
}

impl RenderableComponent {
    /// Create a visible, untextured renderable
    pub fn new(mesh: MeshHandle) -> Self {
        Self {
            mesh,
            texture: None,
            visible: true,
        }
    }

    /// Builder pattern: set the texture
    pub fn with_texture(mut self, texture: Option<TextureHandle>) -> Self {
        self.texture = texture;
        self
    }

    /// Set visibility
    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    /// Check if this component should be rendered
    pub fn should_render(&self) -> bool {
        self.visible
    }
}
