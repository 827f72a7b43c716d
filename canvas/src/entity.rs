//! Drawable entities: the scene-graph node state, its owned children and the
//! overridable lifecycle hooks.
//!
//! An [`Entity`] pairs a [`Node`] (all data: geometry, style, flags, pointer
//! state, children, animation slots) with a boxed [`Behavior`] (the hooks).
//! Keeping them apart lets a hook take `&mut self` and `&mut Node` at once.
//!
//! Children are owned by their parent and addressed by key. Their stored
//! `(x, y)` is an offset from the parent; the absolute position is only ever
//! computed into a transient [`Placement`] while painting.

#[cfg(test)]
#[path = "entity_test.rs"]
mod entity_test;

use std::fmt;
use std::time::Duration;

use rand::Rng;

use crate::animation::{self, AnimationSlot};
use crate::collision::Hittable;
use crate::consts::{DEBUG_COLORS, DEFAULT_MARGIN, SCALE_STEP};
use crate::content::{self, Content, ImageRef, TextBlock};
use crate::error::HookResult;
use crate::geometry::{BoxRegion, CircleRegion, Point, Region, Size};
use crate::keys::{KeyEvent, KeyState};
use crate::render::FrameContext;
use crate::style::{Anchor, Style};
use crate::surface::{ImageId, Surface};

/// Closed set of collision shapes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    /// Anchored at the top-left corner.
    Rectangle { width: f64, height: f64 },
    /// Anchored at the center.
    Circle { radius: f64 },
}

/// Absolute transform an entity is painted with this frame.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Placement {
    /// Absolute anchor point (top-left for rectangles, center for circles).
    pub origin: Point,
    /// Accumulated rotation in degrees.
    pub angle: f64,
}

/// Per-entity pointer interaction state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PointerState {
    pub hovering: bool,
    pub pressed: bool,
}

// =============================================================
// Behavior
// =============================================================

/// Overridable lifecycle hooks. Every hook defaults to a no-op except
/// `render`, which draws the node's built-in [`Content`].
///
/// A hook that returns `Err` aborts the frame; the renderer does not catch it.
pub trait Behavior {
    /// Runs once when the entity is appended to a renderer, after content sizing.
    fn init(&mut self, _node: &mut Node, _surface: &mut dyn Surface) -> HookResult {
        Ok(())
    }

    /// Runs first every frame.
    fn tick(&mut self, _node: &mut Node, _cx: &mut FrameContext<'_>) -> HookResult {
        Ok(())
    }

    /// Draw the entity at `at`. Skipped while the entity is invisible.
    fn render(&mut self, node: &mut Node, cx: &mut FrameContext<'_>, at: Placement) -> HookResult {
        content::draw(node, cx.surface, at)
    }

    fn on_hover_start(&mut self, _node: &mut Node, _cx: &mut FrameContext<'_>) -> HookResult {
        Ok(())
    }

    fn on_hovering(&mut self, _node: &mut Node, _cx: &mut FrameContext<'_>) -> HookResult {
        Ok(())
    }

    fn on_hover_end(&mut self, _node: &mut Node, _cx: &mut FrameContext<'_>) -> HookResult {
        Ok(())
    }

    fn on_click(&mut self, _node: &mut Node, _cx: &mut FrameContext<'_>) -> HookResult {
        Ok(())
    }

    fn on_click_end(&mut self, _node: &mut Node, _cx: &mut FrameContext<'_>) -> HookResult {
        Ok(())
    }

    fn on_click_outside(&mut self, _node: &mut Node, _cx: &mut FrameContext<'_>) -> HookResult {
        Ok(())
    }

    /// Keyboard events, delivered to every visible entity.
    fn on_key(&mut self, _node: &mut Node, _state: KeyState, _event: &KeyEvent) -> HookResult {
        Ok(())
    }
}

/// Behavior with every hook left at its default.
#[derive(Debug, Clone, Copy, Default)]
pub struct Plain;

impl Behavior for Plain {}

/// Fills the whole surface at init time.
#[derive(Debug, Clone, Copy, Default)]
pub struct Background;

impl Behavior for Background {
    fn init(&mut self, node: &mut Node, surface: &mut dyn Surface) -> HookResult {
        let size = surface.size();
        node.x = 0.0;
        node.y = 0.0;
        node.shape = Shape::Rectangle { width: size.width, height: size.height };
        Ok(())
    }
}

// =============================================================
// Node
// =============================================================

/// All state of a drawable entity.
pub struct Node {
    pub name: Option<String>,
    pub shape: Shape,
    /// Stored position: absolute for top-level entities, an offset from the parent for children.
    pub x: f64,
    pub y: f64,
    /// Rotation in degrees.
    pub angle: f64,
    /// Uniform scale factor; `0` and `1` both mean unscaled.
    pub scale: f64,
    /// Paint order among siblings, ascending.
    pub order: i32,
    pub style: Style,
    pub content: Content,
    /// Skip this entity and its subtree entirely.
    pub hidden: bool,
    /// Keep layout, collision and pointer checks but paint nothing.
    pub invisible: bool,
    pub solid: bool,
    pub bound_to_viewport: bool,
    pub follow_mouse: bool,
    pub debug: bool,
    /// Symbolic position resolved against the surface every frame.
    pub position: Option<Anchor>,
    pub margin: f64,
    /// Host cursor shown while the pointer hovers this entity.
    pub cursor: String,
    pub pointer: PointerState,
    pub children: Children,
    animation: Option<AnimationSlot<Node>>,
    flash: Option<AnimationSlot<Node>>,
    debug_color: &'static str,
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("name", &self.name)
            .field("shape", &self.shape)
            .field("x", &self.x)
            .field("y", &self.y)
            .field("order", &self.order)
            .field("hidden", &self.hidden)
            .field("invisible", &self.invisible)
            .field("pointer", &self.pointer)
            .field("children", &self.children)
            .finish_non_exhaustive()
    }
}

impl Node {
    #[must_use]
    pub fn new(shape: Shape) -> Self {
        let pick = rand::rng().random_range(0..DEBUG_COLORS.len());
        Self {
            name: None,
            shape,
            x: 0.0,
            y: 0.0,
            angle: 0.0,
            scale: 0.0,
            order: 0,
            style: Style::default(),
            content: Content::Shape,
            hidden: false,
            invisible: false,
            solid: false,
            bound_to_viewport: false,
            follow_mouse: false,
            debug: false,
            position: None,
            margin: DEFAULT_MARGIN,
            cursor: "default".into(),
            pointer: PointerState::default(),
            children: Children::default(),
            animation: None,
            flash: None,
            debug_color: DEBUG_COLORS[pick],
        }
    }

    // --- Geometry ---

    /// Stored position as a point.
    #[must_use]
    pub fn local(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Width and height of the shape's bounding box.
    #[must_use]
    pub fn size(&self) -> Size {
        match self.shape {
            Shape::Rectangle { width, height } => Size::new(width, height),
            Shape::Circle { radius } => Size::new(radius * 2.0, radius * 2.0),
        }
    }

    /// Region the entity occupies when anchored at `origin`.
    #[must_use]
    pub fn region_at(&self, origin: Point) -> Region {
        match self.shape {
            Shape::Rectangle { width, height } => Region::Box(BoxRegion::new(origin.x, origin.y, width, height)),
            Shape::Circle { radius } => Region::Circle(CircleRegion::new(origin.x, origin.y, radius)),
        }
    }

    /// Region at the stored position; absolute for top-level entities.
    #[must_use]
    pub fn region(&self) -> Region {
        self.region_at(self.local())
    }

    /// Offset from the bounding box's top-left corner to the shape's anchor.
    #[must_use]
    pub fn anchor_offset(&self) -> Point {
        match self.shape {
            Shape::Rectangle { .. } => Point::default(),
            Shape::Circle { radius } => Point::new(radius, radius),
        }
    }

    pub fn move_to(&mut self, x: f64, y: f64) {
        self.x = x;
        self.y = y;
    }

    /// Center the entity on the surface.
    pub fn center(&mut self, viewport: Size) {
        let size = self.size();
        let anchor = self.anchor_offset();
        self.x = (viewport.width - size.width) / 2.0 + anchor.x;
        self.y = (viewport.height - size.height) / 2.0 + anchor.y;
    }

    /// Set the rotation in degrees, replacing the previous angle.
    pub fn rotate(&mut self, angle: f64) {
        self.angle = angle;
    }

    /// Grow by `step` in both dimensions (circles grow in diameter).
    pub fn scale_up(&mut self, step: f64) {
        self.resize_by(step);
    }

    pub fn scale_down(&mut self, step: f64) {
        self.resize_by(-step);
    }

    /// Grow by the default step.
    pub fn grow(&mut self) {
        self.resize_by(SCALE_STEP);
    }

    fn resize_by(&mut self, delta: f64) {
        self.shape = match self.shape {
            Shape::Rectangle { width, height } => Shape::Rectangle { width: width + delta, height: height + delta },
            Shape::Circle { radius } => Shape::Circle { radius: radius + delta / 2.0 },
        };
    }

    /// Set the symbolic position from a keyword pair such as `"bottom center"`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidPosition` if the keywords are not recognised.
    pub fn set_position(&mut self, keywords: &str) -> HookResult {
        self.position = Some(keywords.parse()?);
        Ok(())
    }

    // --- Visibility ---

    pub fn show(&mut self) {
        self.hidden = false;
    }

    pub fn hide(&mut self) {
        self.hidden = true;
    }

    pub fn toggle(&mut self) {
        self.hidden = !self.hidden;
    }

    /// Toggle `invisible` every `interval_ms`; `times == 0` flashes until stopped.
    pub fn flash(&mut self, interval_ms: u64, times: u32) {
        self.invisible = false;
        self.flash = Some(AnimationSlot::new(animation::flash(Duration::from_millis(interval_ms), times)));
    }

    pub fn stop_flashing(&mut self) {
        if let Some(slot) = self.flash.as_mut() {
            slot.animation.stop();
        }
        self.flash = None;
    }

    #[must_use]
    pub fn is_flashing(&self) -> bool {
        self.flash.is_some()
    }

    // --- Animation ---

    /// Fade opacity up to 100, replacing any running animation.
    pub fn fade_in(&mut self) {
        self.animation = Some(AnimationSlot::new(animation::fade_in(self.style.opacity)));
    }

    /// Fade opacity down to 0, replacing any running animation.
    pub fn fade_out(&mut self) {
        self.animation = Some(AnimationSlot::new(animation::fade_out(self.style.opacity)));
    }

    /// Reveal this node's text one character at a time.
    pub fn type_out(&mut self, interval: Duration) {
        let count = match &mut self.content {
            Content::Text(block) => {
                block.revealed = Some(0);
                block.char_count()
            }
            _ => return,
        };
        self.animation = Some(AnimationSlot::new(animation::typewriter(count, interval)));
    }

    /// Install an arbitrary animation, replacing any running one.
    pub fn animate(&mut self, animation: animation::Animation<Node>) {
        self.animation = Some(AnimationSlot::new(animation));
    }

    pub fn stop_animation(&mut self) {
        if let Some(slot) = self.animation.as_mut() {
            slot.animation.stop();
        }
        self.animation = None;
    }

    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    /// Step due animation and flash slots against the frame clock.
    pub(crate) fn advance_animations(&mut self, now_ms: f64) {
        if let Some(mut slot) = self.animation.take() {
            let alive = slot.advance(now_ms, self);
            // A step may have installed a replacement; keep it.
            if alive && self.animation.is_none() {
                self.animation = Some(slot);
            }
        }
        if let Some(mut slot) = self.flash.take() {
            let alive = slot.advance(now_ms, self);
            if alive && self.flash.is_none() {
                self.flash = Some(slot);
            }
        }
    }

    #[must_use]
    pub fn debug_color(&self) -> &'static str {
        self.debug_color
    }

    // --- Children ---

    #[must_use]
    pub fn child(&self, key: &str) -> Option<&Entity> {
        self.children.get(key)
    }

    pub fn child_mut(&mut self, key: &str) -> Option<&mut Entity> {
        self.children.get_mut(key)
    }

    /// Text of the node's content, if it is a text block.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        match &self.content {
            Content::Text(block) => Some(&block.text),
            _ => None,
        }
    }

    /// Replace the node's text, keeping its other text settings.
    pub fn set_text(&mut self, text: impl Into<String>) {
        match &mut self.content {
            Content::Text(block) => {
                block.text = text.into();
                block.revealed = None;
            }
            other => *other = Content::Text(TextBlock::new(text)),
        }
    }
}

impl Hittable for Node {
    fn region(&self) -> Region {
        Node::region(self)
    }
}

// =============================================================
// Entity
// =============================================================

/// A node plus its hooks.
pub struct Entity {
    pub node: Node,
    behavior: Box<dyn Behavior>,
}

impl fmt::Debug for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entity").field("node", &self.node).finish_non_exhaustive()
    }
}

impl Entity {
    #[must_use]
    pub fn new(shape: Shape) -> Self {
        Self { node: Node::new(shape), behavior: Box::new(Plain) }
    }

    #[must_use]
    pub fn rect(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self::new(Shape::Rectangle { width, height }).with_position(x, y)
    }

    #[must_use]
    pub fn rounded_rect(x: f64, y: f64, width: f64, height: f64, radius: f64) -> Self {
        let mut entity = Self::rect(x, y, width, height);
        entity.node.style.corner_radius = radius;
        entity
    }

    /// A circle centered on `(x, y)`.
    #[must_use]
    pub fn circle(x: f64, y: f64, radius: f64) -> Self {
        Self::new(Shape::Circle { radius }).with_position(x, y)
    }

    /// A box that erases whatever is under it.
    #[must_use]
    pub fn clear_box(x: f64, y: f64, width: f64, height: f64) -> Self {
        let mut entity = Self::rect(x, y, width, height);
        entity.node.content = Content::Clear;
        entity
    }

    /// A text entity sized from its measured text at init.
    #[must_use]
    pub fn text(text: impl Into<String>, x: f64, y: f64) -> Self {
        let mut entity = Self::rect(x, y, 0.0, 0.0);
        entity.node.content = Content::Text(TextBlock::new(text));
        entity.node.order = 1;
        entity
    }

    /// A host image; `width`/`height` of zero fall back to the natural size.
    #[must_use]
    pub fn image(image: ImageId, natural: Size, x: f64, y: f64, width: f64, height: f64) -> Self {
        let mut entity = Self::rect(x, y, width, height);
        entity.node.content = Content::Image(ImageRef { image, natural });
        entity.node.order = 1;
        entity
    }

    /// A solid fill covering the whole surface, painted first.
    #[must_use]
    pub fn background(fill: impl Into<String>) -> Self {
        Self::rect(0.0, 0.0, 0.0, 0.0)
            .with_fill(fill)
            .with_order(i32::MIN)
            .with_behavior(Background)
    }

    // --- Builders ---

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.node.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_position(mut self, x: f64, y: f64) -> Self {
        self.node.move_to(x, y);
        self
    }

    #[must_use]
    pub fn with_order(mut self, order: i32) -> Self {
        self.node.order = order;
        self
    }

    #[must_use]
    pub fn with_fill(mut self, fill: impl Into<String>) -> Self {
        self.node.style.fill = Some(fill.into());
        self
    }

    #[must_use]
    pub fn with_stroke(mut self, color: impl Into<String>, width: f64) -> Self {
        self.node.style.stroke = color.into();
        self.node.style.stroke_width = width;
        self
    }

    #[must_use]
    pub fn with_opacity(mut self, opacity: u8) -> Self {
        self.node.style.set_opacity(opacity);
        self
    }

    #[must_use]
    pub fn with_cursor(mut self, cursor: impl Into<String>) -> Self {
        self.node.cursor = cursor.into();
        self
    }

    #[must_use]
    pub fn with_anchor(mut self, anchor: Anchor) -> Self {
        self.node.position = Some(anchor);
        self
    }

    #[must_use]
    pub fn with_child(mut self, key: impl Into<String>, child: Entity) -> Self {
        self.node.children.insert(key, child);
        self
    }

    #[must_use]
    pub fn with_behavior(mut self, behavior: impl Behavior + 'static) -> Self {
        self.behavior = Box::new(behavior);
        self
    }

    #[must_use]
    pub fn solid(mut self) -> Self {
        self.node.solid = true;
        self
    }

    #[must_use]
    pub fn bound_to_viewport(mut self) -> Self {
        self.node.bound_to_viewport = true;
        self
    }

    #[must_use]
    pub fn following_mouse(mut self) -> Self {
        self.node.follow_mouse = true;
        self
    }

    #[must_use]
    pub fn debugged(mut self) -> Self {
        self.node.debug = true;
        self
    }

    // --- Hook plumbing ---

    /// Split into node and hooks for a single call site.
    pub(crate) fn parts(&mut self) -> (&mut Node, &mut dyn Behavior) {
        (&mut self.node, self.behavior.as_mut())
    }

    /// Content sizing then `init`, recursively through children.
    pub(crate) fn init(&mut self, surface: &mut dyn Surface) -> HookResult {
        content::init(&mut self.node, surface)?;
        self.behavior.init(&mut self.node, surface)?;
        for child in self.node.children.iter_mut() {
            child.init(surface)?;
        }
        Ok(())
    }

    /// Deliver a key event to this entity and its visible descendants.
    pub(crate) fn key(&mut self, state: KeyState, event: &KeyEvent) -> HookResult {
        if self.node.hidden {
            return Ok(());
        }
        self.behavior.on_key(&mut self.node, state, event)?;
        for child in self.node.children.iter_mut() {
            child.key(state, event)?;
        }
        Ok(())
    }

    /// Apply `f` to this node and every descendant.
    pub(crate) fn for_each_node(&mut self, f: &mut dyn FnMut(&mut Node)) {
        f(&mut self.node);
        for child in self.node.children.iter_mut() {
            child.for_each_node(f);
        }
    }
}

// =============================================================
// Children
// =============================================================

/// Key → child mapping, kept in insertion order.
#[derive(Debug, Default)]
pub struct Children {
    entries: Vec<(String, Entity)>,
}

impl Children {
    /// Insert a child, replacing (in place) any child with the same key.
    pub fn insert(&mut self, key: impl Into<String>, child: Entity) -> Option<Entity> {
        let key = key.into();
        if let Some(slot) = self.entries.iter_mut().find(|(k, _)| *k == key) {
            return Some(std::mem::replace(&mut slot.1, child));
        }
        self.entries.push((key, child));
        None
    }

    pub fn remove(&mut self, key: &str) -> Option<Entity> {
        let idx = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(idx).1)
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Entity> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, e)| e)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Entity> {
        self.entries.iter_mut().find(|(k, _)| k == key).map(|(_, e)| e)
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entries.iter().map(|(_, e)| e)
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Entity> {
        self.entries.iter_mut().map(|(_, e)| e)
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
}
