//! The frame loop.
//!
//! A [`Renderer`] owns the stage, the bound surface and the host frame
//! scheduler. The host calls [`Renderer::frame`] once per scheduled callback;
//! each call paints the whole scene and requests the next callback. Nothing
//! recurses across frames: the loop is the host invoking `frame` again.
//!
//! Per entity, in paint order:
//!
//! 1. hidden entities are skipped with their subtree;
//! 2. `follow_mouse` recenters the entity on the pointer;
//! 3. due animation and flash steps run against the frame clock;
//! 4. `tick`, `pre_effects`, then `render` and `post_effects` unless invisible;
//! 5. the pointer check runs even for invisible entities;
//! 6. children paint with this entity's placement as their parent.
//!
//! Hook errors are not caught. `frame` returns the error and schedules
//! nothing, so a failing scene stops at the frame that failed.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use crate::consts::{DEFAULT_SURFACE_HEIGHT, DEFAULT_SURFACE_WIDTH};
use crate::effects;
use crate::entity::{Behavior, Entity, Node, Placement};
use crate::error::{EngineError, HookResult};
use crate::geometry::{Point, Size};
use crate::keys::{KeyEvent, KeyState, Keyboard};
use crate::movement::{Direction, MoveOutcome};
use crate::pointer::{self, InputSnapshot, InputState};
use crate::stage::{EntityId, Stage};
use crate::surface::{FrameHandle, FrameScheduler, Surface};

const DEFAULT_CURSOR: &str = "default";

/// Per-frame state handed to entity hooks.
pub struct FrameContext<'a> {
    pub surface: &'a mut dyn Surface,
    pub input: InputSnapshot,
    /// Size of the bound surface.
    pub viewport: Size,
    /// Host timestamp of this frame, in milliseconds.
    pub now_ms: f64,
    /// Draw the debug overlay for every entity.
    pub debug: bool,
    cursor: Option<String>,
    scene_request: Option<String>,
}

impl<'a> FrameContext<'a> {
    #[must_use]
    pub fn new(surface: &'a mut dyn Surface, input: InputSnapshot, viewport: Size, now_ms: f64) -> Self {
        Self { surface, input, viewport, now_ms, debug: false, cursor: None, scene_request: None }
    }

    /// Cursor to show after this frame; the last call wins.
    pub fn set_cursor(&mut self, cursor: &str) {
        self.cursor = Some(cursor.to_owned());
    }

    #[must_use]
    pub fn cursor(&self) -> Option<&str> {
        self.cursor.as_deref()
    }

    /// Ask the owning game to switch scenes once this frame completes.
    pub fn request_scene(&mut self, scene: impl Into<String>) {
        self.scene_request = Some(scene.into());
    }

    #[must_use]
    pub fn scene_request(&self) -> Option<&str> {
        self.scene_request.as_deref()
    }
}

/// What a call to [`Renderer::frame`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// The scene was painted and the next frame requested.
    Scheduled(FrameHandle),
    /// The renderer is stopped; nothing was painted or requested.
    Stopped,
}

pub struct Renderer<S: Surface, F: FrameScheduler> {
    stage: Stage,
    surface: S,
    scheduler: F,
    input: InputState,
    keyboard: Keyboard,
    running: bool,
    pending: Option<FrameHandle>,
    frames: u64,
    cursor: String,
    debug: bool,
}

impl<S: Surface, F: FrameScheduler> std::fmt::Debug for Renderer<S, F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Renderer")
            .field("entities", &self.stage.len())
            .field("running", &self.running)
            .field("pending", &self.pending)
            .field("frames", &self.frames)
            .finish_non_exhaustive()
    }
}

impl<S: Surface, F: FrameScheduler> Renderer<S, F> {
    /// Bind a renderer to `surface`.
    ///
    /// A surface reporting no usable size is treated as 640×480.
    pub fn new(surface: S, scheduler: F) -> Self {
        let mut viewport = surface.size();
        if !viewport.is_resolved() {
            tracing::warn!(
                width = viewport.width,
                height = viewport.height,
                "surface dimensions unresolved; falling back to defaults"
            );
            viewport = Size::new(DEFAULT_SURFACE_WIDTH, DEFAULT_SURFACE_HEIGHT);
        }
        let center = Point::new(viewport.width / 2.0, viewport.height / 2.0);
        Self {
            stage: Stage::new(viewport),
            surface,
            scheduler,
            input: InputState::at(center),
            keyboard: Keyboard::default(),
            running: false,
            pending: None,
            frames: 0,
            cursor: DEFAULT_CURSOR.to_owned(),
            debug: false,
        }
    }

    /// Draw the debug overlay for every entity.
    pub fn set_debug(&mut self, debug: bool) {
        self.debug = debug;
    }

    // --- Lifecycle ---

    /// Request the first frame.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the scheduler refuses the request.
    pub fn start(&mut self) -> Result<FrameHandle, EngineError> {
        self.running = true;
        let handle = self.scheduler.request_frame()?;
        self.pending = Some(handle);
        tracing::info!(entities = self.stage.len(), "renderer started");
        Ok(handle)
    }

    /// Stop for good and withdraw the pending frame request.
    pub fn stop(&mut self) {
        if !self.running && self.pending.is_none() {
            return;
        }
        self.running = false;
        if let Some(handle) = self.pending.take() {
            self.scheduler.cancel_frame(handle);
        }
        tracing::info!(frames = self.frames, "renderer stopped");
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Frames painted so far.
    #[must_use]
    pub fn frames(&self) -> u64 {
        self.frames
    }

    #[must_use]
    pub fn pending(&self) -> Option<FrameHandle> {
        self.pending
    }

    /// Stop and hand back the surface and scheduler.
    pub fn release(mut self) -> (S, F) {
        self.stop();
        (self.surface, self.scheduler)
    }

    // --- Accessors ---

    #[must_use]
    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    pub fn stage_mut(&mut self) -> &mut Stage {
        &mut self.stage
    }

    #[must_use]
    pub fn viewport(&self) -> Size {
        self.stage.viewport()
    }

    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    #[must_use]
    pub fn scheduler(&self) -> &F {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut F {
        &mut self.scheduler
    }

    /// Raw pointer input; the host feeds pointer events here.
    pub fn input_mut(&mut self) -> &mut InputState {
        &mut self.input
    }

    pub fn keyboard_mut(&mut self) -> &mut Keyboard {
        &mut self.keyboard
    }

    // --- Scene contents ---

    /// Initialize each entity (content sizing, then `init`, recursively) and add it.
    ///
    /// # Errors
    ///
    /// Propagates the first `init` failure; entities before it stay appended.
    pub fn append(&mut self, entities: impl IntoIterator<Item = Entity>) -> Result<Vec<EntityId>, EngineError> {
        entities.into_iter().map(|entity| self.add(entity)).collect()
    }

    /// Initialize and add a single entity.
    ///
    /// # Errors
    ///
    /// Propagates `init` failures.
    pub fn add(&mut self, mut entity: Entity) -> Result<EntityId, EngineError> {
        entity.init(&mut self.surface)?;
        let id = self.stage.push(entity);
        tracing::debug!(%id, "entity appended");
        Ok(id)
    }

    pub fn move_entity(&mut self, id: EntityId, direction: Direction, amount: f64) -> MoveOutcome {
        self.stage.resolve_move(id, direction, amount)
    }

    /// Fade every entity and descendant in.
    pub fn fade_in(&mut self) {
        self.stage.fade_in_all();
    }

    /// Fade every entity and descendant out.
    pub fn fade_out(&mut self) {
        self.stage.fade_out_all();
    }

    /// Deliver a key event: matching bindings first, then entity `on_key` hooks.
    ///
    /// # Errors
    ///
    /// Propagates binding and hook failures.
    pub fn on_key(&mut self, state: KeyState, event: &KeyEvent) -> HookResult {
        self.keyboard.dispatch(state, event, &mut self.stage)?;
        self.stage.dispatch_key(state, event)
    }

    /// Scene switch requested by a hook or binding since the last call.
    pub fn take_scene_request(&mut self) -> Option<String> {
        self.stage.take_scene_request()
    }

    // --- Frame ---

    /// Paint one frame at host time `now_ms` and request the next.
    ///
    /// # Errors
    ///
    /// Returns the first hook or surface failure; no further frame is requested.
    pub fn frame(&mut self, now_ms: f64) -> Result<FrameOutcome, EngineError> {
        if !self.running {
            if let Some(handle) = self.pending.take() {
                self.scheduler.cancel_frame(handle);
            }
            return Ok(FrameOutcome::Stopped);
        }
        self.pending = None;

        let input = self.input.snapshot(now_ms);
        let viewport = self.stage.viewport();
        self.surface.clear_rect(0.0, 0.0, viewport.width, viewport.height);

        let mut cx = FrameContext::new(&mut self.surface, input, viewport, now_ms);
        cx.debug = self.debug;
        for index in self.stage.paint_order() {
            let Some(entity) = self.stage.at_mut(index) else { continue };
            if let Err(e) = paint_entity(entity, &mut cx, Placement::default()) {
                tracing::error!(error = %e, frame = self.frames, "frame failed");
                return Err(e);
            }
        }

        let cursor = cx.cursor.take().unwrap_or_else(|| DEFAULT_CURSOR.to_owned());
        let scene_request = cx.scene_request.take();
        if cursor != self.cursor {
            self.surface.set_cursor(&cursor);
            self.cursor = cursor;
        }
        if let Some(scene) = scene_request {
            self.stage.request_scene(scene);
        }

        self.frames += 1;
        tracing::trace!(frame = self.frames, now_ms, "frame painted");
        let handle = self.scheduler.request_frame()?;
        self.pending = Some(handle);
        Ok(FrameOutcome::Scheduled(handle))
    }
}

/// Paint one entity and its subtree relative to `parent`.
fn paint_entity(entity: &mut Entity, cx: &mut FrameContext<'_>, parent: Placement) -> HookResult {
    let (node, behavior) = entity.parts();
    if node.hidden {
        return Ok(());
    }
    if node.follow_mouse {
        center_on_pointer(node, cx.input.pointer, parent.origin);
    }
    node.advance_animations(cx.now_ms);

    cx.surface.save();
    let painted = paint_node(node, behavior, cx, parent);
    cx.surface.restore();
    let at = painted?;

    for index in node.children.paint_order() {
        if let Some(child) = node.children.at_mut(index) {
            paint_entity(child, cx, at)?;
        }
    }
    Ok(())
}

fn paint_node(node: &mut Node, behavior: &mut dyn Behavior, cx: &mut FrameContext<'_>, parent: Placement) -> Result<Placement, EngineError> {
    behavior.tick(node, cx)?;
    let at = effects::pre_effects(node, cx.surface, parent)?;
    if !node.invisible {
        behavior.render(node, cx, at)?;
        effects::post_effects(node, cx.surface, at)?;
    }
    let region = node.region_at(at.origin);
    pointer::pointer_check(node, behavior, cx, &region)?;
    if node.debug || cx.debug {
        effects::debug_overlay(node, cx.surface, at, cx.viewport)?;
    }
    Ok(at)
}

/// Store the offset that puts the entity's painted center on `pointer`.
fn center_on_pointer(node: &mut Node, pointer: Point, parent: Point) {
    let size = node.size();
    let anchor = node.anchor_offset();
    node.x = pointer.x - (size.width / 2.0 - anchor.x) - parent.x;
    node.y = pointer.y - (size.height / 2.0 - anchor.y) - parent.y;
}
