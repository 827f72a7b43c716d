//! Scripted dialogue: JSON scripts and the box that plays them.
//!
//! A script is a JSON array. Each element is either a plain string or an
//! object with `text` and optional `name` and `image` (a host image id):
//!
//! ```json
//! ["Hello.", {"name": "Ada", "text": "Press space.", "image": 3}]
//! ```
//!
//! The box advances on the space bar, reveals each line with a typewriter
//! effect and hides itself after the last line.

#[cfg(test)]
#[path = "dialogue_test.rs"]
mod dialogue_test;

use std::time::Duration;

use serde::Deserialize;

use crate::consts::{COLOR_BLACK, COLOR_WHITE, TYPEWRITER_INTERVAL_MS};
use crate::content::{self, Content};
use crate::entity::{Behavior, Entity, Node, Shape};
use crate::error::{EngineError, HookResult};
use crate::geometry::Size;
use crate::keys::{KeyEvent, KeyState};
use crate::render::FrameContext;
use crate::style::Shadow;
use crate::surface::{ImageId, Surface};

const PORTRAIT_SIZE: f64 = 100.0;
const MORE_FLASH_MS: u64 = 500;

/// One line of a script.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum DialogueLine {
    Plain(String),
    Spoken {
        #[serde(default)]
        name: Option<String>,
        text: String,
        #[serde(default)]
        image: Option<u32>,
    },
}

impl DialogueLine {
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::Plain(text) | Self::Spoken { text, .. } => text,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Plain(_) => "",
            Self::Spoken { name, .. } => name.as_deref().unwrap_or(""),
        }
    }

    #[must_use]
    pub fn image(&self) -> Option<ImageId> {
        match self {
            Self::Plain(_) => None,
            Self::Spoken { image, .. } => image.map(ImageId),
        }
    }
}

/// An ordered list of dialogue lines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DialogueScript {
    lines: Vec<DialogueLine>,
}

impl DialogueScript {
    #[must_use]
    pub fn new(lines: Vec<DialogueLine>) -> Self {
        Self { lines }
    }

    /// Parse a script.
    ///
    /// # Errors
    ///
    /// Returns `InvalidDialogue` if the input is not JSON, not an array, or
    /// holds an element that is neither a string nor a line object.
    pub fn from_json(json: &str) -> Result<Self, EngineError> {
        let value: serde_json::Value =
            serde_json::from_str(json).map_err(|e| EngineError::InvalidDialogue(e.to_string()))?;
        if !value.is_array() {
            tracing::warn!(input = %value, "unable to load dialogue");
            return Err(EngineError::InvalidDialogue("dialogue must be an array".into()));
        }
        let lines = serde_json::from_value(value).map_err(|e| EngineError::InvalidDialogue(e.to_string()))?;
        Ok(Self { lines })
    }

    #[must_use]
    pub fn lines(&self) -> &[DialogueLine] {
        &self.lines
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Dialogue box behavior. Children: `name`, `line`, `more` and, when the
/// current line has one, `portrait`.
pub struct DialogueBox {
    script: DialogueScript,
    index: usize,
    typewriter: bool,
    /// Text changed since the children were last measured.
    relayout: bool,
}

impl DialogueBox {
    pub const NAME: &'static str = "name";
    pub const LINE: &'static str = "line";
    pub const MORE: &'static str = "more";
    pub const PORTRAIT: &'static str = "portrait";

    #[must_use]
    pub fn entity(script: DialogueScript, x: f64, y: f64, width: f64, height: f64) -> Entity {
        Self::build(script, x, y, width, height, true)
    }

    /// Like [`DialogueBox::entity`], but lines appear at once.
    #[must_use]
    pub fn instant(script: DialogueScript, x: f64, y: f64, width: f64, height: f64) -> Entity {
        Self::build(script, x, y, width, height, false)
    }

    fn build(script: DialogueScript, x: f64, y: f64, width: f64, height: f64, typewriter: bool) -> Entity {
        let mut name = Entity::text("", 10.0, 10.0).with_fill(COLOR_WHITE);
        if let Content::Text(block) = &mut name.node.content {
            block.size = 20.0;
            block.styles = vec!["bold".into()];
        }
        name.node.style.shadow = Some(Shadow::soft());

        let mut line = Entity::text("", 10.0, 40.0).with_fill(COLOR_WHITE);
        if let Content::Text(block) = &mut line.node.content {
            block.size = 16.0;
            block.max_width = Some(width - 20.0);
        }
        line.node.style.shadow = Some(Shadow::soft());

        let more = Entity::rect(width - 20.0, height - 20.0, 10.0, 10.0).with_fill(COLOR_WHITE);

        let mut dialogue = Entity::rounded_rect(x, y, width, height, 5.0)
            .with_fill(COLOR_BLACK)
            .with_stroke(COLOR_WHITE, 2.0)
            .with_order(10)
            .with_child(Self::NAME, name)
            .with_child(Self::LINE, line)
            .with_child(Self::MORE, more)
            .with_behavior(Self { script, index: 0, typewriter, relayout: false });
        dialogue.node.style.shadow = Some(Shadow::soft());
        dialogue
    }

    fn load_line(&mut self, node: &mut Node) {
        let Some(line) = self.script.lines.get(self.index) else {
            return;
        };
        if let Some(name) = node.child_mut(Self::NAME) {
            name.node.set_text(line.name());
        }
        if let Some(text) = node.child_mut(Self::LINE) {
            text.node.set_text(line.text());
            if self.typewriter {
                text.node.type_out(Duration::from_millis(TYPEWRITER_INTERVAL_MS));
            }
        }

        node.children.remove(Self::PORTRAIT);
        if let Some(image) = line.image() {
            let width = node.size().width;
            let portrait_size = Size::new(PORTRAIT_SIZE, PORTRAIT_SIZE);
            let portrait = Entity::image(image, portrait_size, width - PORTRAIT_SIZE - 10.0, 0.0, PORTRAIT_SIZE, PORTRAIT_SIZE);
            node.children.insert(Self::PORTRAIT, portrait);
        }

        self.relayout = true;

        let last = self.index + 1 >= self.script.len();
        if let Some(more) = node.child_mut(Self::MORE) {
            if last {
                more.node.hide();
            } else {
                more.node.show();
            }
        }
    }

    fn advance(&mut self, node: &mut Node) {
        if self.index + 1 >= self.script.len() {
            node.hide();
            return;
        }
        self.index += 1;
        self.load_line(node);
    }

    /// Size the name and line children to their current text.
    fn measure(node: &mut Node, surface: &mut dyn Surface) -> HookResult {
        for key in [Self::NAME, Self::LINE] {
            let Some(child) = node.child_mut(key) else {
                continue;
            };
            if let Content::Text(block) = &child.node.content {
                let size = content::measure_block(block, surface)?;
                child.node.shape = Shape::Rectangle { width: size.width, height: size.height };
            }
        }
        Ok(())
    }

    /// Index of the line being shown.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }
}

impl Behavior for DialogueBox {
    fn init(&mut self, node: &mut Node, surface: &mut dyn Surface) -> HookResult {
        if let Some(more) = node.child_mut(Self::MORE) {
            more.node.flash(MORE_FLASH_MS, 0);
        }
        self.load_line(node);
        self.relayout = false;
        Self::measure(node, surface)
    }

    fn tick(&mut self, node: &mut Node, cx: &mut FrameContext<'_>) -> HookResult {
        if std::mem::take(&mut self.relayout) {
            Self::measure(node, cx.surface)?;
        }
        Ok(())
    }

    fn on_key(&mut self, node: &mut Node, state: KeyState, event: &KeyEvent) -> HookResult {
        if state == KeyState::Down && event.pressed() == [" "] {
            self.advance(node);
        }
        Ok(())
    }
}
