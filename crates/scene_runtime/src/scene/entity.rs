//! Entity identity, lifecycle state and per-entity storage

use std::fmt;

use super::renderable::RenderableComponent;
use crate::foundation::math::Transform;
use crate::script::Script;

/// Entity identifier
///
/// Ids are allocated from a monotonic counter and never reused, so an id that
/// outlives its entity can only ever resolve to "gone". Ordering follows
/// creation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(u64);

impl EntityId {
    pub(crate) fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw id
    pub fn id(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Lifecycle of an entity
///
/// `Pending → Committed → PendingDestroy → Destroyed`. Only `Committed` and
/// `PendingDestroy` entities are visible to queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityState {
    /// Creation is queued; invisible until the next commit
    Pending,
    /// Live and visible
    Committed,
    /// Destruction is queued; still visible until the next commit
    PendingDestroy,
    /// Removed for good
    Destroyed,
}

/// Script storage on an entity
///
/// `Running` marks a script temporarily moved out for its update so the slot
/// still counts as occupied.
pub(crate) enum ScriptSlot {
    Empty,
    Attached(Box<dyn Script>),
    Running,
}

impl ScriptSlot {
    pub(crate) fn is_occupied(&self) -> bool {
        !matches!(self, ScriptSlot::Empty)
    }
}

/// Committed entity data
pub(crate) struct EntityNode {
    pub(crate) name: String,
    pub(crate) local: Transform,
    pub(crate) parent: Option<EntityId>,
    pub(crate) children: Vec<EntityId>,
    pub(crate) renderable: Option<RenderableComponent>,
    pub(crate) script: ScriptSlot,
}

impl EntityNode {
    pub(crate) fn new(name: String, local: Transform, parent: Option<EntityId>) -> Self {
        Self {
            name,
            local,
            parent,
            children: Vec::new(),
            renderable: None,
            script: ScriptSlot::Empty,
        }
    }
}

impl fmt::Debug for EntityNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntityNode")
            .field("name", &self.name)
            .field("local", &self.local)
            .field("parent", &self.parent)
            .field("children", &self.children)
            .field("renderable", &self.renderable.is_some())
            .field("script", &self.script.is_occupied())
            .finish()
    }
}
