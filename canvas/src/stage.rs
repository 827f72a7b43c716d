//! The renderer's ordered set of top-level entities.
//!
//! Entities are appended in insertion order and never reordered; paint order
//! is computed on demand with a stable sort, so ties keep insertion order.
//! Key bindings receive `&mut Stage` to move, show or fade entities.

#[cfg(test)]
#[path = "stage_test.rs"]
mod stage_test;

use std::fmt;

use uuid::Uuid;

use crate::entity::{Entity, Node};
use crate::error::HookResult;
use crate::geometry::Size;
use crate::keys::{KeyEvent, KeyState};
use crate::movement::{self, Direction, MoveOutcome};

/// Stable handle for a top-level entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntityId(Uuid);

impl EntityId {
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for EntityId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug)]
pub struct Stage {
    entries: Vec<(EntityId, Entity)>,
    viewport: Size,
    scene_request: Option<String>,
}

impl Stage {
    #[must_use]
    pub fn new(viewport: Size) -> Self {
        Self { entries: Vec::new(), viewport, scene_request: None }
    }

    /// Size of the bound surface.
    #[must_use]
    pub fn viewport(&self) -> Size {
        self.viewport
    }

    /// Append an already-initialized entity.
    pub fn push(&mut self, entity: Entity) -> EntityId {
        let id = EntityId::new();
        self.entries.push((id, entity));
        id
    }

    #[must_use]
    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entries.iter().find(|(eid, _)| *eid == id).map(|(_, e)| e)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entries.iter_mut().find(|(eid, _)| *eid == id).map(|(_, e)| e)
    }

    /// Node of the entity `id`.
    #[must_use]
    pub fn node(&self, id: EntityId) -> Option<&Node> {
        self.get(id).map(|e| &e.node)
    }

    pub fn node_mut(&mut self, id: EntityId) -> Option<&mut Node> {
        self.get_mut(id).map(|e| &mut e.node)
    }

    /// First top-level entity with the given name.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<EntityId> {
        self.entries.iter().find(|(_, e)| e.node.name.as_deref() == Some(name)).map(|(id, _)| *id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Ids in insertion order.
    pub fn ids(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.entries.iter().map(|(id, _)| *id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (EntityId, &Entity)> {
        self.entries.iter().map(|(id, e)| (*id, e))
    }

    /// Indices in paint order: ascending `order`, insertion order on ties.
    #[must_use]
    pub fn paint_order(&self) -> Vec<usize> {
        let mut idx: Vec<usize> = (0..self.entries.len()).collect();
        idx.sort_by_key(|&i| self.entries[i].1.node.order);
        idx
    }

    pub(crate) fn at_mut(&mut self, index: usize) -> Option<&mut Entity> {
        self.entries.get_mut(index).map(|(_, e)| e)
    }

    /// Move `id` by `amount` in `direction`, honoring solidity and viewport bounds.
    pub fn resolve_move(&mut self, id: EntityId, direction: Direction, amount: f64) -> MoveOutcome {
        movement::resolve_move(self, id, direction, amount)
    }

    /// Fade every entity and descendant in.
    pub fn fade_in_all(&mut self) {
        for (_, entity) in &mut self.entries {
            entity.for_each_node(&mut Node::fade_in);
        }
    }

    /// Fade every entity and descendant out.
    pub fn fade_out_all(&mut self) {
        for (_, entity) in &mut self.entries {
            entity.for_each_node(&mut Node::fade_out);
        }
    }

    /// Ask the owning game to switch to `scene` after the current frame.
    pub fn request_scene(&mut self, scene: impl Into<String>) {
        self.scene_request = Some(scene.into());
    }

    pub fn take_scene_request(&mut self) -> Option<String> {
        self.scene_request.take()
    }

    /// Deliver a key event to every visible entity's `on_key` hook, in paint order.
    ///
    /// # Errors
    ///
    /// Propagates the first hook failure.
    pub fn dispatch_key(&mut self, state: KeyState, event: &KeyEvent) -> HookResult {
        for i in self.paint_order() {
            if let Some(entity) = self.at_mut(i) {
                entity.key(state, event)?;
            }
        }
        Ok(())
    }
}
