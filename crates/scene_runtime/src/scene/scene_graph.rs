//! Scene graph: entity storage, hierarchy and the commit barrier
//!
//! Entities live in a map keyed by id, so iteration follows creation order.
//! Structural changes go through a [`MutationQueue`] and only become visible
//! when [`SceneGraph::commit`] runs; until then queries see exactly the
//! state left by the previous commit.

use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::atomic::{AtomicU64, Ordering};

use super::entity::{EntityId, EntityNode, EntityState, ScriptSlot};
use super::error::SceneError;
use super::queue::{Mutation, MutationQueue};
use super::renderable::RenderableComponent;
use crate::foundation::math::{Mat4, Transform};
use crate::script::Script;

/// Outcome of a commit
#[derive(Debug, Default)]
pub struct CommitReport {
    /// Entities that became visible, in creation order
    pub created: Vec<EntityId>,
    /// Attachments and property updates applied
    pub updated: usize,
    /// Entities removed, including cascaded descendants
    pub destroyed: Vec<EntityId>,
    /// Mutations that could not be applied
    pub failures: Vec<SceneError>,
}

impl CommitReport {
    /// Whether the commit changed nothing and reported nothing
    pub fn is_empty(&self) -> bool {
        self.created.is_empty()
            && self.updated == 0
            && self.destroyed.is_empty()
            && self.failures.is_empty()
    }
}

/// Ids with an outstanding create or destroy request, wherever the request
/// is queued
#[derive(Debug, Default)]
struct Requests {
    created: BTreeSet<EntityId>,
    destroyed: BTreeSet<EntityId>,
}

/// Hierarchical collection of entities
pub struct SceneGraph {
    nodes: BTreeMap<EntityId, EntityNode>,
    next_id: AtomicU64,
    pending: MutationQueue,
    requested: RefCell<Requests>,
}

impl SceneGraph {
    /// Create an empty scene
    pub fn new() -> Self {
        Self {
            nodes: BTreeMap::new(),
            next_id: AtomicU64::new(1),
            pending: MutationQueue::new(),
            requested: RefCell::new(Requests::default()),
        }
    }

    /// Allocate a fresh id for a queued creation; ids are never handed out
    /// twice. The id reports [`EntityState::Pending`] until it is committed.
    pub(crate) fn reserve_id(&self) -> EntityId {
        let id = EntityId::new(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.requested.borrow_mut().created.insert(id);
        id
    }

    /// Record a queued destruction of `id`
    pub(crate) fn note_destroy(&self, id: EntityId) {
        self.requested.borrow_mut().destroyed.insert(id);
    }

    /// Forget the requests carried by mutations that were discarded before
    /// reaching a commit
    pub(crate) fn withdraw(&self, mutations: &[Mutation]) {
        let mut requested = self.requested.borrow_mut();
        for mutation in mutations {
            match mutation {
                Mutation::Create { id, .. } => {
                    requested.created.remove(id);
                }
                Mutation::Destroy { id } => {
                    requested.destroyed.remove(id);
                }
                _ => {}
            }
        }
    }

    // ---------------------------------------------------------------------
    // Structural requests (deferred until commit)
    // ---------------------------------------------------------------------

    /// Queue creation of an entity. The id is valid immediately but the
    /// entity is invisible to queries until the next commit.
    ///
    /// `parent` must already be committed.
    pub fn create_entity(
        &mut self,
        name: impl Into<String>,
        transform: Transform,
        parent: Option<EntityId>,
    ) -> Result<EntityId, SceneError> {
        if let Some(parent) = parent {
            if !self.contains(parent) {
                return Err(SceneError::InvalidParent(parent));
            }
        }

        let id = self.reserve_id();
        self.pending.push(Mutation::Create {
            id,
            name: name.into(),
            transform,
            parent,
        });
        Ok(id)
    }

    /// Queue destruction of an entity and its whole subtree
    ///
    /// Unknown ids and repeated requests are no-ops.
    pub fn destroy_entity(&mut self, id: EntityId) {
        if !self.is_known(id) {
            log::trace!("Ignoring destroy of unknown entity {}", id);
            return;
        }
        if self.destroy_queued(id) {
            return;
        }
        self.note_destroy(id);
        self.pending.push(Mutation::Destroy { id });
    }

    /// Append externally collected mutations; they apply at the next commit
    pub fn enqueue(&mut self, mut queue: MutationQueue) {
        self.pending.append(&mut queue);
    }

    /// Number of mutations waiting for the next commit
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Apply every queued mutation
    ///
    /// Creations are applied first, then attachments and property updates,
    /// then destructions, each group in the order it was issued. A mutation
    /// that fails is reported and skipped; the rest still apply.
    pub fn commit(&mut self) -> CommitReport {
        let mut report = CommitReport::default();
        let mutations = std::mem::take(&mut self.pending).into_mutations();
        if mutations.is_empty() {
            return report;
        }

        let mut creates = Vec::new();
        let mut updates = Vec::new();
        let mut destroys = Vec::new();
        for mutation in mutations {
            match mutation {
                Mutation::Create { .. } => creates.push(mutation),
                Mutation::Destroy { id } => destroys.push(id),
                _ => updates.push(mutation),
            }
        }

        self.withdraw(&creates);
        for mutation in creates {
            if let Mutation::Create {
                id,
                name,
                transform,
                parent,
            } = mutation
            {
                match self.insert_node(id, name, transform, parent) {
                    Ok(()) => report.created.push(id),
                    Err(e) => report.failures.push(e),
                }
            }
        }

        for mutation in updates {
            match self.apply_update(mutation) {
                Ok(()) => report.updated += 1,
                Err(e) => report.failures.push(e),
            }
        }

        let requested = self.requested.get_mut();
        for id in &destroys {
            requested.destroyed.remove(id);
        }
        for id in destroys {
            // Already gone through an earlier cascade in this batch
            if self.nodes.contains_key(&id) {
                report.destroyed.extend(self.remove_subtree(id));
            }
        }

        log::debug!(
            "Scene commit: {} created, {} updated, {} destroyed, {} failed",
            report.created.len(),
            report.updated,
            report.destroyed.len(),
            report.failures.len()
        );
        for failure in &report.failures {
            log::warn!("Scene mutation rejected: {}", failure);
        }

        report
    }

    // ---------------------------------------------------------------------
    // Attachments and property updates
    // ---------------------------------------------------------------------

    /// Attach a script to a committed entity
    pub fn attach_script(&mut self, id: EntityId, script: impl Script) -> Result<(), SceneError> {
        self.attach_boxed_script(id, Box::new(script))
    }

    /// Attach an already boxed script
    pub fn attach_boxed_script(
        &mut self,
        id: EntityId,
        script: Box<dyn Script>,
    ) -> Result<(), SceneError> {
        self.node(id)?;
        if self.script_taken(id, None) {
            return Err(SceneError::ScriptAlreadyAttached(id));
        }
        self.apply_update(Mutation::AttachScript { id, script })
    }

    /// Attach or replace the renderable component of a committed entity
    pub fn attach_renderable(
        &mut self,
        id: EntityId,
        renderable: RenderableComponent,
    ) -> Result<(), SceneError> {
        self.node_mut(id)?.renderable = Some(renderable);
        Ok(())
    }

    /// Remove and return the renderable component of a committed entity
    pub fn detach_renderable(
        &mut self,
        id: EntityId,
    ) -> Result<Option<RenderableComponent>, SceneError> {
        Ok(self.node_mut(id)?.renderable.take())
    }

    /// Replace the local transform of a committed entity
    pub fn set_local_transform(
        &mut self,
        id: EntityId,
        transform: Transform,
    ) -> Result<(), SceneError> {
        self.node_mut(id)?.local = transform;
        Ok(())
    }

    /// Rename a committed entity
    pub fn set_name(&mut self, id: EntityId, name: impl Into<String>) -> Result<(), SceneError> {
        self.node_mut(id)?.name = name.into();
        Ok(())
    }

    /// Move a committed entity under a new parent, or make it a root with
    /// `None`. The local transform is kept as is.
    pub fn set_parent(
        &mut self,
        id: EntityId,
        parent: Option<EntityId>,
    ) -> Result<(), SceneError> {
        self.reparent(id, parent)
    }

    // ---------------------------------------------------------------------
    // Queries (committed state only)
    // ---------------------------------------------------------------------

    /// Whether `id` is committed and visible
    pub fn contains(&self, id: EntityId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Lifecycle state of `id`, `None` if the id was never allocated
    ///
    /// Requests count from the moment they are queued, whether through this
    /// graph or through [`Commands`](super::Commands).
    pub fn entity_state(&self, id: EntityId) -> Option<EntityState> {
        let requested = self.requested.borrow();
        if self.nodes.contains_key(&id) {
            if requested.destroyed.contains(&id) {
                Some(EntityState::PendingDestroy)
            } else {
                Some(EntityState::Committed)
            }
        } else if requested.created.contains(&id) {
            Some(EntityState::Pending)
        } else if id.id() > 0 && id.id() < self.next_id.load(Ordering::Relaxed) {
            Some(EntityState::Destroyed)
        } else {
            None
        }
    }

    /// Number of committed entities
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the scene holds no committed entities
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Committed entity ids in creation order
    pub fn entities(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.nodes.keys().copied()
    }

    /// Committed entities without a parent, in creation order
    pub fn roots(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.nodes
            .iter()
            .filter(|(_, node)| node.parent.is_none())
            .map(|(id, _)| *id)
    }

    /// All committed entities named `name`, in creation order
    pub fn find_by_name(&self, name: &str) -> Vec<EntityId> {
        self.nodes
            .iter()
            .filter(|(_, node)| node.name == name)
            .map(|(id, _)| *id)
            .collect()
    }

    /// Name of an entity
    pub fn name(&self, id: EntityId) -> Result<&str, SceneError> {
        Ok(&self.node(id)?.name)
    }

    /// Transform relative to the parent
    pub fn local_transform(&self, id: EntityId) -> Result<Transform, SceneError> {
        Ok(self.node(id)?.local)
    }

    /// World transform: the parent's global transform combined with the
    /// local one, recursively up to the root
    pub fn global_transform(&self, id: EntityId) -> Result<Transform, SceneError> {
        let chain = self.ancestry(id)?;
        Ok(chain
            .iter()
            .rev()
            .fold(Transform::identity(), |global, local| global.combine(local)))
    }

    /// World matrix: the parent's world matrix times the local matrix
    pub fn global_matrix(&self, id: EntityId) -> Result<Mat4, SceneError> {
        let chain = self.ancestry(id)?;
        Ok(chain
            .iter()
            .rev()
            .fold(Mat4::identity(), |global, local| global * local.to_matrix()))
    }

    /// Parent of an entity
    pub fn parent(&self, id: EntityId) -> Result<Option<EntityId>, SceneError> {
        Ok(self.node(id)?.parent)
    }

    /// Direct children of an entity, in attach order
    pub fn children(&self, id: EntityId) -> Result<&[EntityId], SceneError> {
        Ok(&self.node(id)?.children)
    }

    /// Renderable component of an entity, if any
    pub fn renderable(&self, id: EntityId) -> Result<Option<&RenderableComponent>, SceneError> {
        Ok(self.node(id)?.renderable.as_ref())
    }

    /// Whether the entity owns a script
    pub fn has_script(&self, id: EntityId) -> Result<bool, SceneError> {
        Ok(self.node(id)?.script.is_occupied())
    }

    /// Name of the script attached to an entity
    pub fn script_name(&self, id: EntityId) -> Result<Option<&str>, SceneError> {
        match &self.node(id)?.script {
            ScriptSlot::Attached(script) => Ok(Some(script.name())),
            ScriptSlot::Empty | ScriptSlot::Running => Ok(None),
        }
    }

    // ---------------------------------------------------------------------
    // Crate internals
    // ---------------------------------------------------------------------

    /// Committed, or its creation is queued
    pub(crate) fn is_known(&self, id: EntityId) -> bool {
        self.nodes.contains_key(&id) || self.requested.borrow().created.contains(&id)
    }

    /// A script is attached, running or queued for `id`
    pub(crate) fn script_taken(&self, id: EntityId, staged: Option<&MutationQueue>) -> bool {
        self.nodes
            .get(&id)
            .map_or(false, |node| node.script.is_occupied())
            || self.pending.attaches_script(id)
            || staged.map_or(false, |queue| queue.attaches_script(id))
    }

    /// Destruction of `id` is already queued
    pub(crate) fn destroy_queued(&self, id: EntityId) -> bool {
        self.requested.borrow().destroyed.contains(&id)
    }

    /// Committed entities with an attached script, in creation order
    pub(crate) fn scripted_entities(&self) -> Vec<EntityId> {
        self.nodes
            .iter()
            .filter(|(_, node)| matches!(node.script, ScriptSlot::Attached(_)))
            .map(|(id, _)| *id)
            .collect()
    }

    /// Move a script out for its update, leaving the slot marked as running
    pub(crate) fn take_script(&mut self, id: EntityId) -> Option<Box<dyn Script>> {
        let node = self.nodes.get_mut(&id)?;
        match std::mem::replace(&mut node.script, ScriptSlot::Running) {
            ScriptSlot::Attached(script) => Some(script),
            other => {
                node.script = other;
                None
            }
        }
    }

    /// Put a script back after its update
    pub(crate) fn restore_script(&mut self, id: EntityId, script: Box<dyn Script>) {
        match self.nodes.get_mut(&id) {
            Some(node) if matches!(node.script, ScriptSlot::Running) => {
                node.script = ScriptSlot::Attached(script);
            }
            _ => log::debug!("Dropping script '{}' of vanished entity {}", script.name(), id),
        }
    }

    fn node(&self, id: EntityId) -> Result<&EntityNode, SceneError> {
        self.nodes.get(&id).ok_or(SceneError::InvalidEntity(id))
    }

    fn node_mut(&mut self, id: EntityId) -> Result<&mut EntityNode, SceneError> {
        self.nodes.get_mut(&id).ok_or(SceneError::InvalidEntity(id))
    }

    /// Local transforms from `id` up to its root
    fn ancestry(&self, id: EntityId) -> Result<Vec<Transform>, SceneError> {
        let mut chain = Vec::new();
        let mut current = Some(id);
        while let Some(entity) = current {
            let node = self.node(entity)?;
            chain.push(node.local);
            current = node.parent;
        }
        Ok(chain)
    }

    fn insert_node(
        &mut self,
        id: EntityId,
        name: String,
        transform: Transform,
        parent: Option<EntityId>,
    ) -> Result<(), SceneError> {
        if let Some(parent) = parent {
            let parent_node = self
                .nodes
                .get_mut(&parent)
                .ok_or(SceneError::InvalidParent(parent))?;
            parent_node.children.push(id);
        }
        log::trace!("Created entity {} '{}'", id, name);
        self.nodes.insert(id, EntityNode::new(name, transform, parent));
        Ok(())
    }

    fn apply_update(&mut self, mutation: Mutation) -> Result<(), SceneError> {
        match mutation {
            Mutation::AttachRenderable { id, renderable } => {
                self.node_mut(id)?.renderable = Some(renderable);
            }
            Mutation::AttachScript { id, mut script } => {
                let node = self.node_mut(id)?;
                if node.script.is_occupied() {
                    return Err(SceneError::ScriptAlreadyAttached(id));
                }
                script.on_attach(id);
                log::debug!("Attached script '{}' to entity {}", script.name(), id);
                node.script = ScriptSlot::Attached(script);
            }
            Mutation::SetLocalTransform { id, transform } => {
                self.set_local_transform(id, transform)?;
            }
            Mutation::SetParent { id, parent } => self.reparent(id, parent)?,
            Mutation::Rename { id, name } => self.set_name(id, name)?,
            Mutation::Create { .. } | Mutation::Destroy { .. } => {
                unreachable!("creates and destroys are applied in their own phases")
            }
        }
        Ok(())
    }

    fn reparent(&mut self, id: EntityId, parent: Option<EntityId>) -> Result<(), SceneError> {
        let old_parent = self.node(id)?.parent;
        if let Some(new_parent) = parent {
            self.node(new_parent)
                .map_err(|_| SceneError::InvalidParent(new_parent))?;

            // Walking up from the new parent must not reach `id`
            let mut current = Some(new_parent);
            while let Some(ancestor) = current {
                if ancestor == id {
                    return Err(SceneError::HierarchyCycle {
                        entity: id,
                        parent: new_parent,
                    });
                }
                current = self.nodes.get(&ancestor).and_then(|node| node.parent);
            }
        }

        if old_parent == parent {
            return Ok(());
        }
        if let Some(old) = old_parent.and_then(|old| self.nodes.get_mut(&old)) {
            old.children.retain(|child| *child != id);
        }
        if let Some(new_parent) = parent.and_then(|new| self.nodes.get_mut(&new)) {
            new_parent.children.push(id);
        }
        self.node_mut(id)?.parent = parent;
        Ok(())
    }

    /// Remove `id` and all of its descendants, returning the removed ids
    fn remove_subtree(&mut self, id: EntityId) -> Vec<EntityId> {
        let Some(node) = self.nodes.get(&id) else {
            return Vec::new();
        };
        if let Some(parent) = node.parent.and_then(|parent| self.nodes.get_mut(&parent)) {
            parent.children.retain(|child| *child != id);
        }

        let mut removed = Vec::new();
        let mut stack = vec![id];
        while let Some(entity) = stack.pop() {
            if let Some(node) = self.nodes.remove(&entity) {
                stack.extend(node.children.iter().rev().copied());
                log::trace!("Destroyed entity {} '{}'", entity, node.name);
                removed.push(entity);
            }
        }
        removed
    }
}

impl Default for SceneGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for SceneGraph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SceneGraph")
            .field("nodes", &self.nodes)
            .field("pending", &self.pending)
            .field("requested", &self.requested)
            .finish()
    }
}
