//! Structural mutations waiting for the commit barrier

use std::fmt;

use super::entity::EntityId;
use super::renderable::RenderableComponent;
use crate::foundation::math::Transform;
use crate::script::Script;

/// A single deferred scene mutation
pub(crate) enum Mutation {
    Create {
        id: EntityId,
        name: String,
        transform: Transform,
        parent: Option<EntityId>,
    },
    AttachRenderable {
        id: EntityId,
        renderable: RenderableComponent,
    },
    AttachScript {
        id: EntityId,
        script: Box<dyn Script>,
    },
    SetLocalTransform {
        id: EntityId,
        transform: Transform,
    },
    SetParent {
        id: EntityId,
        parent: Option<EntityId>,
    },
    Rename {
        id: EntityId,
        name: String,
    },
    Destroy {
        id: EntityId,
    },
}

impl Mutation {
    /// Entity the mutation applies to
    pub(crate) fn target(&self) -> EntityId {
        match self {
            Mutation::Create { id, .. }
            | Mutation::AttachRenderable { id, .. }
            | Mutation::AttachScript { id, .. }
            | Mutation::SetLocalTransform { id, .. }
            | Mutation::SetParent { id, .. }
            | Mutation::Rename { id, .. }
            | Mutation::Destroy { id } => *id,
        }
    }
}

impl fmt::Debug for Mutation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mutation::Create {
                id,
                name,
                transform,
                parent,
            } => f
                .debug_struct("Create")
                .field("id", id)
                .field("name", name)
                .field("transform", transform)
                .field("parent", parent)
                .finish(),
            Mutation::AttachRenderable { id, renderable } => f
                .debug_struct("AttachRenderable")
                .field("id", id)
                .field("renderable", renderable)
                .finish(),
            Mutation::AttachScript { id, script } => f
                .debug_struct("AttachScript")
                .field("id", id)
                .field("script", &script.name())
                .finish(),
            Mutation::SetLocalTransform { id, transform } => f
                .debug_struct("SetLocalTransform")
                .field("id", id)
                .field("transform", transform)
                .finish(),
            Mutation::SetParent { id, parent } => f
                .debug_struct("SetParent")
                .field("id", id)
                .field("parent", parent)
                .finish(),
            Mutation::Rename { id, name } => f
                .debug_struct("Rename")
                .field("id", id)
                .field("name", name)
                .finish(),
            Mutation::Destroy { id } => f.debug_struct("Destroy").field("id", id).finish(),
        }
    }
}

/// Ordered list of deferred scene mutations
///
/// Filled through [`Commands`](super::Commands) during a tick and applied by
/// [`SceneGraph::commit`](super::SceneGraph::commit) at the barrier.
#[derive(Debug, Default)]
pub struct MutationQueue {
    mutations: Vec<Mutation>,
}

impl MutationQueue {
    /// Create an empty queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of queued mutations
    pub fn len(&self) -> usize {
        self.mutations.len()
    }

    /// Whether nothing is queued
    pub fn is_empty(&self) -> bool {
        self.mutations.is_empty()
    }

    /// Move every mutation of `other` to the end of this queue
    pub fn append(&mut self, other: &mut MutationQueue) {
        self.mutations.append(&mut other.mutations);
    }

    pub(crate) fn push(&mut self, mutation: Mutation) {
        log::trace!("Queued {:?}", mutation);
        self.mutations.push(mutation);
    }

    pub(crate) fn into_mutations(self) -> Vec<Mutation> {
        self.mutations
    }

    /// Drop everything queued after the first `len` mutations and return it
    pub(crate) fn truncate(&mut self, len: usize) -> Vec<Mutation> {
        self.mutations.split_off(len.min(self.mutations.len()))
    }

    /// Whether this queue attaches a script to `id`
    pub(crate) fn attaches_script(&self, id: EntityId) -> bool {
        self.mutations
            .iter()
            .any(|m| matches!(m, Mutation::AttachScript { .. }) && m.target() == id)
    }
}
