//! Read-only view of the committed scene handed to the renderer

use crate::camera::CameraState;
use crate::foundation::math::{Mat4, Transform};
use crate::foundation::time::FrameTime;
use crate::scene::{EntityId, RenderableComponent, SceneError, SceneGraph};

/// One committed entity as seen by the renderer
#[derive(Debug, Clone)]
pub struct SnapshotEntity {
    /// Entity id
    pub id: EntityId,
    /// Entity name
    pub name: String,
    /// Parent, if any
    pub parent: Option<EntityId>,
    /// World transform
    pub transform: Transform,
    /// World matrix
    pub matrix: Mat4,
    /// Renderable component, if any
    pub renderable: Option<RenderableComponent>,
}

impl SnapshotEntity {
    fn capture(scene: &SceneGraph, id: EntityId) -> Result<Self, SceneError> {
        Ok(Self {
            id,
            name: scene.name(id)?.to_string(),
            parent: scene.parent(id)?,
            transform: scene.global_transform(id)?,
            matrix: scene.global_matrix(id)?,
            renderable: scene.renderable(id)?.cloned(),
        })
    }
}

/// Committed scene state at the end of a tick
#[derive(Debug, Clone)]
pub struct SceneSnapshot {
    /// Timing of the tick that produced the snapshot
    pub time: FrameTime,
    /// Camera pose after the tick's last write
    pub camera: CameraState,
    /// Committed entities in creation order
    pub entities: Vec<SnapshotEntity>,
}

impl SceneSnapshot {
    /// Capture the committed state of `scene`
    pub fn capture(scene: &SceneGraph, camera: CameraState, time: FrameTime) -> Self {
        let entities = scene
            .entities()
            .filter_map(|id| SnapshotEntity::capture(scene, id).ok())
            .collect();
        Self {
            time,
            camera,
            entities,
        }
    }

    /// Frame index of the tick that produced the snapshot
    pub fn frame(&self) -> u64 {
        self.time.frame
    }

    /// Entities with a visible renderable, in creation order
    pub fn renderables(&self) -> impl Iterator<Item = (&SnapshotEntity, &RenderableComponent)> {
        self.entities.iter().filter_map(|entity| {
            entity
                .renderable
                .as_ref()
                .filter(|renderable| renderable.should_render())
                .map(|renderable| (entity, renderable))
        })
    }

    /// Look up an entity by id
    pub fn get(&self, id: EntityId) -> Option<&SnapshotEntity> {
        self.entities.iter().find(|entity| entity.id == id)
    }

    /// Number of committed entities
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Whether the scene was empty
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}
