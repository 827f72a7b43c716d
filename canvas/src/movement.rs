//! Collision-checked movement of top-level entities.
//!
//! A move either commits in full or leaves the entity untouched. Other
//! entities are only read.

#[cfg(test)]
#[path = "movement_test.rs"]
mod movement_test;

use std::str::FromStr;

use crate::collision::colliding;
use crate::error::EngineError;
use crate::geometry::Point;
use crate::stage::{EntityId, Stage};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Unit offset for this direction in surface space (y grows downwards).
    #[must_use]
    pub fn delta(self, amount: f64) -> Point {
        match self {
            Self::Up => Point::new(0.0, -amount),
            Self::Down => Point::new(0.0, amount),
            Self::Left => Point::new(-amount, 0.0),
            Self::Right => Point::new(amount, 0.0),
        }
    }
}

impl FromStr for Direction {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "up" => Ok(Self::Up),
            "down" => Ok(Self::Down),
            "left" => Ok(Self::Left),
            "right" => Ok(Self::Right),
            _ => Err(EngineError::InvalidPosition(format!("unknown direction \"{s}\""))),
        }
    }
}

/// What stopped a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockedBy {
    /// Another solid entity occupies the projected region.
    Entity(EntityId),
    /// The projected region would cross the surface edge.
    Viewport,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    Moved,
    Blocked(BlockedBy),
    /// No entity with that id.
    Missing,
}

impl MoveOutcome {
    #[must_use]
    pub fn moved(self) -> bool {
        matches!(self, Self::Moved)
    }
}

/// Offset `id` by `amount` in `direction`.
///
/// Non-solid entities always move. A solid entity is blocked by any other
/// visible solid top-level entity its projected region overlaps, and by the
/// surface edges when it is bound to the viewport.
pub fn resolve_move(stage: &mut Stage, id: EntityId, direction: Direction, amount: f64) -> MoveOutcome {
    let Some(mover) = stage.node(id) else {
        return MoveOutcome::Missing;
    };
    let candidate = mover.local().offset(direction.delta(amount));

    if mover.solid {
        let projected = mover.region_at(candidate);
        let blocker = stage
            .iter()
            .filter(|(other, e)| *other != id && e.node.solid && !e.node.hidden)
            .find(|(_, e)| colliding(&projected, &e.node))
            .map(|(other, _)| other);
        if let Some(other) = blocker {
            tracing::trace!(mover = %id, blocker = %other, ?direction, "move blocked by entity");
            return MoveOutcome::Blocked(BlockedBy::Entity(other));
        }
        if mover.bound_to_viewport && !projected.within(stage.viewport()) {
            tracing::trace!(mover = %id, ?direction, "move blocked by viewport");
            return MoveOutcome::Blocked(BlockedBy::Viewport);
        }
    }

    match stage.node_mut(id) {
        Some(node) => {
            node.move_to(candidate.x, candidate.y);
            MoveOutcome::Moved
        }
        None => MoveOutcome::Missing,
    }
}
