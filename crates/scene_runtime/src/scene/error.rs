//! Scene graph errors

use thiserror::Error;

use super::entity::EntityId;
use crate::assets::ResourceError;

/// Errors surfaced by scene graph operations
///
/// Lookups by name and destroy requests never produce these; an empty result
/// or a no-op is the normal outcome for absent entities.
#[derive(Debug, Error)]
pub enum SceneError {
    /// The id does not refer to a live entity
    #[error("entity {0} does not exist")]
    InvalidEntity(EntityId),

    /// The requested parent does not exist
    #[error("parent entity {0} does not exist")]
    InvalidParent(EntityId),

    /// The entity already owns a script
    #[error("entity {0} already has a script attached")]
    ScriptAlreadyAttached(EntityId),

    /// Re-parenting would make an entity its own ancestor
    #[error("cannot parent entity {entity} under {parent}: {parent} is in its subtree")]
    HierarchyCycle {
        /// Entity being moved
        entity: EntityId,
        /// Requested parent
        parent: EntityId,
    },

    /// An asset named by the request could not be loaded
    #[error(transparent)]
    Resource(#[from] ResourceError),
}
