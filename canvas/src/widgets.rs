//! Composite UI widgets built from ordinary entities.
//!
//! A widget is a behavior plus the child entities it owns; nothing here
//! draws by hand. Labels are text children positioned by offset.

#[cfg(test)]
#[path = "widgets_test.rs"]
mod widgets_test;

use crate::consts::{COLOR_BLACK, COLOR_ORANGE, COLOR_WHITE};
use crate::content::Content;
use crate::entity::{Behavior, Entity, Node, Shape};
use crate::error::HookResult;
use crate::render::FrameContext;
use crate::style::Shadow;
use crate::surface::Surface;

/// Padding around a button label, split evenly on both sides.
const BUTTON_PADDING: f64 = 30.0;
const CORNER_RADIUS: f64 = 5.0;
const CHECKBOX_SIZE: f64 = 40.0;
const CHECK_MARK: &str = "\u{2715}";

/// Callback run when a button is clicked.
pub type ClickHandler = Box<dyn FnMut(&mut FrameContext<'_>) -> HookResult>;

/// Callback run after a checkbox changes, with the new state.
pub type ChangeHandler = Box<dyn FnMut(bool, &mut FrameContext<'_>) -> HookResult>;

// =============================================================
// Button
// =============================================================

/// A rounded, shadowed button sized to its label.
pub struct Button {
    on_click: ClickHandler,
}

impl Button {
    /// Key of the label child.
    pub const LABEL: &'static str = "label";

    #[must_use]
    pub fn entity(label: &str, x: f64, y: f64, on_click: impl FnMut(&mut FrameContext<'_>) -> HookResult + 'static) -> Entity {
        let text = Entity::text(label, BUTTON_PADDING / 2.0, BUTTON_PADDING / 2.0)
            .with_fill(COLOR_BLACK)
            .with_cursor("pointer");
        let mut button = Entity::rounded_rect(x, y, 0.0, 0.0, CORNER_RADIUS)
            .with_fill(COLOR_ORANGE)
            .with_cursor("pointer")
            .with_child(Self::LABEL, text)
            .with_behavior(Self { on_click: Box::new(on_click) });
        button.node.style.shadow = Some(Shadow::soft());
        button
    }
}

impl Behavior for Button {
    /// Size the button to its label plus padding.
    fn init(&mut self, node: &mut Node, surface: &mut dyn Surface) -> HookResult {
        let Some(label) = node.child(Self::LABEL) else {
            return Ok(());
        };
        let Content::Text(block) = &label.node.content else {
            return Ok(());
        };
        surface.set_font(&block.font_string());
        let width = (surface.measure_text(&block.text)?.width + BUTTON_PADDING).ceil();
        let height = (block.size + BUTTON_PADDING).ceil();
        node.shape = Shape::Rectangle { width, height };
        Ok(())
    }

    fn on_click(&mut self, _node: &mut Node, cx: &mut FrameContext<'_>) -> HookResult {
        (self.on_click)(cx)
    }
}

// =============================================================
// Checkbox
// =============================================================

/// A square toggle showing a cross when checked.
pub struct Checkbox {
    checked: bool,
    on_change: Option<ChangeHandler>,
}

impl Checkbox {
    /// Key of the mark child.
    pub const MARK: &'static str = "mark";

    #[must_use]
    pub fn entity(checked: bool, x: f64, y: f64) -> Entity {
        Self::build(checked, x, y, None)
    }

    #[must_use]
    pub fn with_on_change(checked: bool, x: f64, y: f64, on_change: impl FnMut(bool, &mut FrameContext<'_>) -> HookResult + 'static) -> Entity {
        Self::build(checked, x, y, Some(Box::new(on_change)))
    }

    fn build(checked: bool, x: f64, y: f64, on_change: Option<ChangeHandler>) -> Entity {
        let mut mark = Entity::text("", 11.0, 9.0).with_fill(COLOR_BLACK).with_cursor("pointer");
        if let Content::Text(block) = &mut mark.node.content {
            block.size = 25.0;
        }
        let mut checkbox = Entity::rounded_rect(x, y, CHECKBOX_SIZE, CHECKBOX_SIZE, CORNER_RADIUS)
            .with_cursor("pointer")
            .with_child(Self::MARK, mark);
        checkbox.node.style.shadow = Some(Shadow::soft());
        Self::apply(&mut checkbox.node, checked);
        checkbox.with_behavior(Self { checked, on_change })
    }

    /// Whether a checkbox node is currently checked.
    #[must_use]
    pub fn is_checked(node: &Node) -> bool {
        node.child(Self::MARK).and_then(|mark| mark.node.text()) == Some(CHECK_MARK)
    }

    fn apply(node: &mut Node, checked: bool) {
        if let Some(mark) = node.child_mut(Self::MARK) {
            mark.node.set_text(if checked { CHECK_MARK } else { "" });
        }
        node.style.fill = Some(if checked { COLOR_ORANGE } else { COLOR_WHITE }.to_owned());
    }
}

impl Behavior for Checkbox {
    fn on_click(&mut self, node: &mut Node, cx: &mut FrameContext<'_>) -> HookResult {
        self.checked = !self.checked;
        Self::apply(node, self.checked);
        if let Some(on_change) = self.on_change.as_mut() {
            on_change(self.checked, cx)?;
        }
        Ok(())
    }
}
