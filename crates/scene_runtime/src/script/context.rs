//! Everything a script may touch during its update

use crate::assets::{MeshHandle, ResourceCache, ResourceError, TextureHandle};
use crate::camera::CameraController;
use crate::foundation::math::Transform;
use crate::foundation::time::FrameTime;
use crate::input::InputState;
use crate::scene::{Commands, EntityId, MutationQueue, SceneError, SceneGraph};

/// Per-update view of the runtime
///
/// Reads see the scene as committed at the start of the tick. Structural
/// writes go through [`ScriptContext::commands`] and are deferred to the
/// commit barrier; camera writes apply immediately.
pub struct ScriptContext<'a> {
    entity: EntityId,
    scene: &'a SceneGraph,
    resources: &'a ResourceCache,
    input: &'a InputState,
    time: FrameTime,
    camera: &'a mut CameraController,
    queue: &'a mut MutationQueue,
}

impl<'a> ScriptContext<'a> {
    pub(crate) fn new(
        entity: EntityId,
        scene: &'a SceneGraph,
        resources: &'a ResourceCache,
        input: &'a InputState,
        time: FrameTime,
        camera: &'a mut CameraController,
        queue: &'a mut MutationQueue,
    ) -> Self {
        Self {
            entity,
            scene,
            resources,
            input,
            time,
            camera,
            queue,
        }
    }

    /// Entity that owns the running script
    pub fn entity(&self) -> EntityId {
        self.entity
    }

    /// Committed scene
    pub fn scene(&self) -> &'a SceneGraph {
        self.scene
    }

    /// Shared asset cache
    pub fn resources(&self) -> &'a ResourceCache {
        self.resources
    }

    /// Input for this tick
    pub fn input(&self) -> &'a InputState {
        self.input
    }

    /// Timing for this tick
    pub fn time(&self) -> FrameTime {
        self.time
    }

    /// Seconds since the first tick
    pub fn elapsed(&self) -> f32 {
        self.time.elapsed
    }

    /// Seconds since the previous tick
    pub fn delta(&self) -> f32 {
        self.time.delta
    }

    /// The shared camera
    pub fn camera(&mut self) -> &mut CameraController {
        self.camera
    }

    /// Deferred scene mutations
    pub fn commands(&mut self) -> Commands<'_> {
        Commands::new(self.scene, self.resources, self.queue)
    }

    /// Name of the owning entity
    pub fn owner_name(&self) -> Result<&'a str, SceneError> {
        self.scene.name(self.entity)
    }

    /// Local transform of the owning entity
    pub fn owner_transform(&self) -> Result<Transform, SceneError> {
        self.scene.local_transform(self.entity)
    }

    /// Request a new local transform for the owning entity
    pub fn set_owner_transform(&mut self, transform: Transform) -> Result<(), SceneError> {
        let entity = self.entity;
        self.commands().set_local_transform(entity, transform)
    }

    /// Request destruction of the owning entity
    pub fn destroy_owner(&mut self) {
        let entity = self.entity;
        self.commands().destroy_entity(entity);
    }

    /// Resolve a mesh through the cache
    pub fn mesh(&self, name: &str) -> Result<MeshHandle, ResourceError> {
        self.resources.mesh(name)
    }

    /// Resolve a texture through the cache
    pub fn texture(&self, name: &str) -> Result<TextureHandle, ResourceError> {
        self.resources.texture(name)
    }
}
