//! Deferred scene mutations issued against a read-only scene

use super::entity::EntityId;
use super::entity_config::EntityConfig;
use super::error::SceneError;
use super::queue::{Mutation, MutationQueue};
use super::renderable::RenderableComponent;
use super::scene_graph::SceneGraph;
use crate::assets::ResourceCache;
use crate::foundation::math::Transform;
use crate::script::Script;

/// Write access to the scene while it is only borrowed for reading
///
/// Every request is validated immediately against the committed scene, then
/// recorded in a [`MutationQueue`]. Parents and request targets must be
/// committed; only destruction also accepts an entity whose creation is still
/// queued. Nothing
/// changes until the queue is committed. Asset keys are resolved through the
/// [`ResourceCache`] at request time, so a missing asset fails the request
/// instead of the commit.
pub struct Commands<'a> {
    scene: &'a SceneGraph,
    resources: &'a ResourceCache,
    queue: &'a mut MutationQueue,
}

impl<'a> Commands<'a> {
    /// Record mutations for `scene` into `queue`
    pub fn new(
        scene: &'a SceneGraph,
        resources: &'a ResourceCache,
        queue: &'a mut MutationQueue,
    ) -> Self {
        Self {
            scene,
            resources,
            queue,
        }
    }

    /// Request a new root entity
    pub fn create_entity(&mut self, config: EntityConfig) -> Result<EntityId, SceneError> {
        self.spawn(config, None)
    }

    /// Request a new entity under `parent`
    pub fn create_child(
        &mut self,
        parent: EntityId,
        config: EntityConfig,
    ) -> Result<EntityId, SceneError> {
        self.spawn(config, Some(parent))
    }

    /// Request a new entity. Everything `config` names (renderable, script)
    /// is attached in the same commit that creates it.
    pub fn spawn(
        &mut self,
        config: EntityConfig,
        parent: Option<EntityId>,
    ) -> Result<EntityId, SceneError> {
        if let Some(parent) = parent {
            if !self.scene.contains(parent) {
                return Err(SceneError::InvalidParent(parent));
            }
        }

        let renderable = match config.mesh.as_deref() {
            Some(mesh) => Some(self.load_renderable(mesh, config.texture.as_deref())?),
            None => {
                if let Some(texture) = &config.texture {
                    log::warn!(
                        "Entity '{}' names texture '{}' without a mesh, ignoring it",
                        config.name,
                        texture
                    );
                }
                None
            }
        };

        let transform = config.transform();
        let EntityConfig { name, script, .. } = config;
        let id = self.scene.reserve_id();
        self.queue.push(Mutation::Create {
            id,
            name,
            transform,
            parent,
        });
        if let Some(renderable) = renderable {
            self.queue.push(Mutation::AttachRenderable { id, renderable });
        }
        if let Some(script) = script {
            self.queue.push(Mutation::AttachScript { id, script });
        }
        Ok(id)
    }

    /// Request destruction of an entity and its subtree
    ///
    /// Unknown ids and repeated requests are no-ops.
    pub fn destroy_entity(&mut self, id: EntityId) {
        if !self.scene.is_known(id) || self.scene.destroy_queued(id) {
            log::trace!("Ignoring destroy request for {}", id);
            return;
        }
        self.scene.note_destroy(id);
        self.queue.push(Mutation::Destroy { id });
    }

    /// Request a script attachment
    pub fn attach_script(&mut self, id: EntityId, script: impl Script) -> Result<(), SceneError> {
        self.attach_boxed_script(id, Box::new(script))
    }

    /// Request attachment of an already boxed script
    pub fn attach_boxed_script(
        &mut self,
        id: EntityId,
        script: Box<dyn Script>,
    ) -> Result<(), SceneError> {
        self.require(id)?;
        if self.scene.script_taken(id, Some(&*self.queue)) {
            return Err(SceneError::ScriptAlreadyAttached(id));
        }
        self.queue.push(Mutation::AttachScript { id, script });
        Ok(())
    }

    /// Request a renderable attachment, replacing any existing one
    pub fn attach_renderable(
        &mut self,
        id: EntityId,
        renderable: RenderableComponent,
    ) -> Result<(), SceneError> {
        self.require(id)?;
        self.queue.push(Mutation::AttachRenderable { id, renderable });
        Ok(())
    }

    /// Resolve `mesh` (and `texture`) and request them as the entity's
    /// renderable
    pub fn attach_mesh(
        &mut self,
        id: EntityId,
        mesh: &str,
        texture: Option<&str>,
    ) -> Result<(), SceneError> {
        self.require(id)?;
        let renderable = self.load_renderable(mesh, texture)?;
        self.queue.push(Mutation::AttachRenderable { id, renderable });
        Ok(())
    }

    /// Request a new local transform
    pub fn set_local_transform(
        &mut self,
        id: EntityId,
        transform: Transform,
    ) -> Result<(), SceneError> {
        self.require(id)?;
        self.queue.push(Mutation::SetLocalTransform { id, transform });
        Ok(())
    }

    /// Request re-parenting; cycles are detected when the request is applied
    pub fn set_parent(&mut self, id: EntityId, parent: Option<EntityId>) -> Result<(), SceneError> {
        self.require(id)?;
        if let Some(parent) = parent {
            if parent == id {
                return Err(SceneError::HierarchyCycle { entity: id, parent });
            }
            if !self.scene.contains(parent) {
                return Err(SceneError::InvalidParent(parent));
            }
        }
        self.queue.push(Mutation::SetParent { id, parent });
        Ok(())
    }

    /// Request a rename
    pub fn set_name(&mut self, id: EntityId, name: impl Into<String>) -> Result<(), SceneError> {
        self.require(id)?;
        self.queue.push(Mutation::Rename {
            id,
            name: name.into(),
        });
        Ok(())
    }

    /// Number of mutations recorded so far
    pub fn queued(&self) -> usize {
        self.queue.len()
    }

    fn require(&self, id: EntityId) -> Result<(), SceneError> {
        if self.scene.contains(id) {
            Ok(())
        } else {
            Err(SceneError::InvalidEntity(id))
        }
    }

    fn load_renderable(
        &self,
        mesh: &str,
        texture: Option<&str>,
    ) -> Result<RenderableComponent, SceneError> {
        let mesh = self.resources.mesh(mesh)?;
        let texture = texture.map(|name| self.resources.texture(name)).transpose()?;
        Ok(RenderableComponent::new(mesh).with_texture(texture))
    }
}
