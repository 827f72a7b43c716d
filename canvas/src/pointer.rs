//! Pointer input and the per-entity pointer-interaction state machine.
//!
//! The host feeds raw pointer events into [`InputState`]. Once per frame the
//! renderer takes an [`InputSnapshot`]: the pointer position plus momentary
//! down/up edges. Every painted entity is then checked against the snapshot
//! by [`pointer_check`]:
//!
//! ```text
//!  Idle ──overlap──▶ Hovering ──down edge──▶ Pressed
//!   ▲                  │  ▲                     │
//!   └──overlap ends────┘  └──────up edge────────┘
//! ```

#[cfg(test)]
#[path = "pointer_test.rs"]
mod pointer_test;

use crate::collision::overlaps;
use crate::consts::{POINTER_SIZE, POINTER_UP_HOLD_MS};
use crate::entity::{Behavior, Node};
use crate::error::HookResult;
use crate::geometry::{BoxRegion, Point, Region};
use crate::render::FrameContext;

/// Raw pointer state accumulated between frames.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    pointer: Point,
    down: bool,
    pending_down: bool,
    pending_up: bool,
    up_since: Option<f64>,
}

impl InputState {
    /// Start with the pointer at `at` (the renderer centers it on the surface).
    #[must_use]
    pub fn at(at: Point) -> Self {
        Self { pointer: at, ..Self::default() }
    }

    pub fn pointer_moved(&mut self, x: f64, y: f64) {
        self.pointer = Point::new(x, y);
    }

    pub fn pointer_down(&mut self) {
        self.down = true;
        self.pending_down = true;
        self.pending_up = false;
        self.up_since = None;
    }

    pub fn pointer_up(&mut self) {
        self.down = false;
        self.pending_up = true;
    }

    #[must_use]
    pub fn pointer(&self) -> Point {
        self.pointer
    }

    /// Consume pending edges into this frame's snapshot.
    ///
    /// The down edge is visible to exactly one snapshot. The up edge is
    /// stamped at the first snapshot after release and stays visible for
    /// `POINTER_UP_HOLD_MS`.
    pub fn snapshot(&mut self, now_ms: f64) -> InputSnapshot {
        let down_edge = std::mem::take(&mut self.pending_down);
        if std::mem::take(&mut self.pending_up) {
            self.up_since = Some(now_ms);
        }
        let up_edge = self.up_since.is_some_and(|since| now_ms - since < POINTER_UP_HOLD_MS);
        if !up_edge {
            self.up_since = None;
        }
        InputSnapshot { pointer: self.pointer, down: self.down, down_edge, up_edge }
    }
}

/// Pointer state as seen by one frame.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct InputSnapshot {
    pub pointer: Point,
    /// Button currently held.
    pub down: bool,
    /// Button went down since the previous frame.
    pub down_edge: bool,
    /// Button was released recently.
    pub up_edge: bool,
}

impl InputSnapshot {
    /// The pointer hotspot: a `POINTER_SIZE` square anchored at its top-left on the pointer.
    #[must_use]
    pub fn region(&self) -> Region {
        Region::Box(BoxRegion::new(self.pointer.x, self.pointer.y, POINTER_SIZE, POINTER_SIZE))
    }
}

/// Re-evaluate one entity's pointer state against the frame's snapshot.
///
/// `painted` is the entity's region at its absolute placement this frame.
///
/// # Errors
///
/// Propagates hook failures.
pub fn pointer_check(node: &mut Node, behavior: &mut dyn Behavior, cx: &mut FrameContext<'_>, painted: &Region) -> HookResult {
    let input = cx.input;
    if overlaps(&input.region(), painted) {
        if !node.pointer.hovering {
            node.pointer.hovering = true;
            behavior.on_hover_start(node, cx)?;
        }
        cx.set_cursor(&node.cursor);
        behavior.on_hovering(node, cx)?;

        if input.down_edge && !node.pointer.pressed {
            node.pointer.pressed = true;
            behavior.on_click(node, cx)?;
        } else if input.up_edge && node.pointer.pressed {
            node.pointer.pressed = false;
            behavior.on_click_end(node, cx)?;
        }
        return Ok(());
    }

    if node.pointer.hovering {
        node.pointer.hovering = false;
        behavior.on_hover_end(node, cx)?;
    }
    if input.down_edge {
        behavior.on_click_outside(node, cx)?;
    }
    if input.up_edge && node.pointer.pressed {
        node.pointer.pressed = false;
        behavior.on_click_end(node, cx)?;
    }
    Ok(())
}
