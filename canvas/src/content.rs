//! Built-in drawable content: the shape path, clear boxes, text and host images.
//!
//! `draw` is what [`crate::entity::Behavior::render`] does unless a behavior
//! overrides it. Shapes only add to the current path here; the fill and
//! stroke happen afterwards in post-effects.

#[cfg(test)]
#[path = "content_test.rs"]
mod content_test;

use std::f64::consts::TAU;

use crate::consts::{TEXT_LINE_HEIGHT, TEXT_PADDING};
use crate::entity::{Node, Placement, Shape};
use crate::error::{EngineError, HookResult};
use crate::geometry::Size;
use crate::surface::{ImageId, Paint, Surface};

/// What an entity draws when rendered.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Content {
    /// Nothing; the entity only groups children or reacts to input.
    Nothing,
    /// The entity's own shape, filled and stroked by post-effects.
    #[default]
    Shape,
    /// Erase the entity's box.
    Clear,
    Text(TextBlock),
    Image(ImageRef),
}

/// A block of text, wrapped to the surface width.
#[derive(Debug, Clone, PartialEq)]
pub struct TextBlock {
    pub text: String,
    pub font: String,
    /// Font size in pixels.
    pub size: f64,
    /// Extra font keywords such as `"bold"`.
    pub styles: Vec<String>,
    pub max_width: Option<f64>,
    pub align: String,
    pub baseline: String,
    /// Number of characters shown, for typewriter reveals; `None` shows everything.
    pub revealed: Option<usize>,
}

impl TextBlock {
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            font: "Helvetica, sans-serif".into(),
            size: 18.0,
            styles: Vec::new(),
            max_width: None,
            align: "left".into(),
            baseline: "top".into(),
            revealed: None,
        }
    }

    /// CSS font shorthand, e.g. `"bold 20px Helvetica, sans-serif"`.
    #[must_use]
    pub fn font_string(&self) -> String {
        let size = format!("{}px", self.size);
        let mut parts: Vec<&str> = self.styles.iter().map(String::as_str).collect();
        parts.push(&size);
        parts.push(&self.font);
        parts.join(" ")
    }

    /// The portion of the text currently revealed.
    #[must_use]
    pub fn visible_text(&self) -> &str {
        match self.revealed {
            None => &self.text,
            Some(n) => match self.text.char_indices().nth(n) {
                Some((idx, _)) => &self.text[..idx],
                None => &self.text,
            },
        }
    }

    #[must_use]
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }
}

/// A host-decoded image and its natural size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImageRef {
    pub image: ImageId,
    pub natural: Size,
}

/// One-time sizing against the bound surface, run before the behavior's `init`.
///
/// Text without an explicit size is measured; images without one take their
/// natural size.
pub(crate) fn init(node: &mut Node, surface: &mut dyn Surface) -> HookResult {
    let size = node.size();
    match &node.content {
        Content::Text(block) if size.width <= 0.0 || size.height <= 0.0 => {
            let measured = measure_block(block, surface)?;
            node.shape = Shape::Rectangle { width: measured.width, height: measured.height };
        }
        Content::Image(image) if size.width <= 0.0 || size.height <= 0.0 => {
            let width = if size.width > 0.0 { size.width } else { image.natural.width };
            let height = if size.height > 0.0 { size.height } else { image.natural.height };
            tracing::warn!(
                name = node.name.as_deref().unwrap_or("<unnamed>"),
                width,
                height,
                "image entity has no explicit size; using the image's natural size"
            );
            node.shape = Shape::Rectangle { width, height };
        }
        _ => {}
    }
    Ok(())
}

/// Size a text block would occupy on one line: measured width plus padding, font-size height.
///
/// # Errors
///
/// Returns `Err` if the surface cannot measure text.
pub fn measure_block(block: &TextBlock, surface: &mut dyn Surface) -> Result<Size, EngineError> {
    surface.set_font(&block.font_string());
    let metrics = surface.measure_text(&block.text)?;
    Ok(Size::new((metrics.width + TEXT_PADDING).ceil(), block.size.ceil()))
}

/// Default `render`: draw the node's content at `at`.
///
/// # Errors
///
/// Propagates surface failures.
pub fn draw(node: &Node, surface: &mut dyn Surface, at: Placement) -> HookResult {
    let size = node.size();
    match &node.content {
        Content::Nothing => Ok(()),
        Content::Shape => match node.shape {
            Shape::Rectangle { width, height } => {
                if node.style.corner_radius > 0.0 {
                    surface.round_rect(at.origin.x, at.origin.y, width, height, node.style.corner_radius)
                } else {
                    surface.rect(at.origin.x, at.origin.y, width, height);
                    Ok(())
                }
            }
            Shape::Circle { radius } => surface.arc(at.origin.x, at.origin.y, radius, 0.0, TAU),
        },
        Content::Clear => {
            surface.clear_rect(at.origin.x, at.origin.y, size.width, size.height);
            Ok(())
        }
        Content::Text(block) => draw_text(node, block, surface, at),
        Content::Image(image) => surface.draw_image(image.image, at.origin.x, at.origin.y, size.width, size.height),
    }
}

fn draw_text(node: &Node, block: &TextBlock, surface: &mut dyn Surface, at: Placement) -> HookResult {
    surface.set_font(&block.font_string());
    surface.set_text_align(&block.align);
    surface.set_text_baseline(&block.baseline);
    if let Some(shadow) = &node.style.shadow {
        surface.set_shadow(&shadow.color, shadow.blur, shadow.offset_x, shadow.offset_y);
    }

    let wrap_width = block.max_width.unwrap_or_else(|| surface.size().width);
    let lines = wrap_text_lines(surface, block.visible_text(), wrap_width)?;

    let mut y = at.origin.y;
    for line in &lines {
        if let Some(fill) = &node.style.fill {
            surface.set_fill(&Paint::Solid(fill.clone()))?;
            surface.fill_text(line, at.origin.x, y, block.max_width)?;
        } else {
            surface.set_stroke_style(&node.style.stroke);
            surface.stroke_text(line, at.origin.x, y, block.max_width)?;
        }
        y += TEXT_LINE_HEIGHT;
    }
    Ok(())
}

/// Greedy word wrap; words wider than `max_w` are broken by character.
///
/// # Errors
///
/// Propagates measurement failures.
pub fn wrap_text_lines(surface: &mut dyn Surface, text: &str, max_w: f64) -> Result<Vec<String>, EngineError> {
    let mut out = Vec::new();
    for raw_line in text.lines() {
        let words: Vec<&str> = raw_line.split_whitespace().collect();
        if words.is_empty() {
            out.push(String::new());
            continue;
        }

        let mut current = String::new();
        for word in words {
            let candidate = if current.is_empty() { word.to_owned() } else { format!("{current} {word}") };
            if surface.measure_text(&candidate)?.width <= max_w {
                current = candidate;
                continue;
            }
            if !current.is_empty() {
                out.push(std::mem::take(&mut current));
            }
            if surface.measure_text(word)?.width <= max_w {
                current = word.to_owned();
            } else {
                let mut chunks = break_long_word(surface, word, max_w)?;
                if let Some(last) = chunks.pop() {
                    out.extend(chunks);
                    current = last;
                }
            }
        }
        if !current.is_empty() {
            out.push(current);
        }
    }
    if out.is_empty() {
        out.push(String::new());
    }
    Ok(out)
}

fn break_long_word(surface: &mut dyn Surface, word: &str, max_w: f64) -> Result<Vec<String>, EngineError> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for ch in word.chars() {
        let mut candidate = current.clone();
        candidate.push(ch);
        if !current.is_empty() && surface.measure_text(&candidate)?.width > max_w {
            lines.push(current);
            current = ch.to_string();
        } else {
            current = candidate;
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    Ok(lines)
}
