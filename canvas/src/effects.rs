//! Effects applied around an entity's `render` hook.
//!
//! `pre_effects` resolves where the entity is painted this frame and sets up
//! the surface state (transform, alpha, fresh path). `post_effects` applies
//! shadow, fill and stroke to whatever path `render` built. Both run inside
//! the save/restore pair the renderer wraps each entity in.

#[cfg(test)]
#[path = "effects_test.rs"]
mod effects_test;

use crate::consts::{COLOR_WHITE, DEBUG_PANEL_HEIGHT, DEBUG_PANEL_WIDTH};
use crate::content::Content;
use crate::entity::{Node, Placement};
use crate::error::{EngineError, HookResult};
use crate::geometry::{Point, Size};
use crate::surface::{Paint, Surface};

/// Resolve the entity's placement for this frame and prepare the surface.
///
/// A symbolic position is resolved in surface space and written back into the
/// stored coordinates as an offset from `parent`. Rotation and scale pivot on
/// the painted center.
///
/// # Errors
///
/// Propagates surface transform failures.
pub fn pre_effects(node: &mut Node, surface: &mut dyn Surface, parent: Placement) -> Result<Placement, EngineError> {
    if let Some(anchor) = node.position {
        let top_left = anchor.resolve(node.size(), surface.size(), node.margin);
        let absolute = top_left.offset(node.anchor_offset());
        node.x = absolute.x - parent.origin.x;
        node.y = absolute.y - parent.origin.y;
    }

    let at = Placement { origin: parent.origin.offset(node.local()), angle: parent.angle + node.angle };

    let scaled = node.scale != 0.0 && (node.scale - 1.0).abs() > f64::EPSILON;
    if at.angle != 0.0 || scaled {
        let bounds = node.region_at(at.origin).bounds();
        let pivot = Point::new(bounds.x + bounds.width / 2.0, bounds.y + bounds.height / 2.0);
        surface.translate(pivot.x, pivot.y)?;
        if at.angle != 0.0 {
            surface.rotate(at.angle.to_radians())?;
        }
        if scaled {
            surface.scale(node.scale, node.scale)?;
        }
        surface.translate(-pivot.x, -pivot.y)?;
    }

    surface.set_global_alpha(node.style.alpha());
    surface.begin_path();
    Ok(at)
}

/// Shadow, then fill for shape content, then stroke.
///
/// # Errors
///
/// Propagates surface failures.
pub fn post_effects(node: &Node, surface: &mut dyn Surface, at: Placement) -> HookResult {
    let style = &node.style;
    if let Some(shadow) = &style.shadow {
        surface.set_shadow(&shadow.color, shadow.blur, shadow.offset_x, shadow.offset_y);
    }

    if matches!(node.content, Content::Shape)
        && let Some(paint) = style.fill_paint(node.region_at(at.origin).bounds())
    {
        surface.set_fill(&paint)?;
        surface.fill();
    }

    if style.stroke_width > 0.0 {
        surface.set_line_width(style.stroke_width);
        surface.set_stroke_style(&style.stroke);
        surface.stroke();
    }
    Ok(())
}

/// Outline the entity's region and show its state in a side panel.
///
/// # Errors
///
/// Propagates surface failures.
pub fn debug_overlay(node: &Node, surface: &mut dyn Surface, at: Placement, viewport: Size) -> HookResult {
    let bounds = node.region_at(at.origin).bounds();
    let panel = debug_panel_origin(bounds.right() + 10.0, bounds.y, viewport);

    surface.save();
    surface.set_global_alpha(0.5);
    surface.set_fill(&Paint::Solid(node.debug_color().to_owned()))?;
    surface.fill_rect(panel.x, panel.y, DEBUG_PANEL_WIDTH, DEBUG_PANEL_HEIGHT);
    surface.set_global_alpha(1.0);

    surface.set_fill(&Paint::Solid(COLOR_WHITE.to_owned()))?;
    surface.set_font("16px Courier, monospace");
    surface.set_text_align("left");
    surface.set_text_baseline("top");
    let lines = [
        format!("invisible: {}", node.invisible),
        format!("hovering: {}", node.pointer.hovering),
        format!("x: {}", at.origin.x),
        format!("y: {}", at.origin.y),
        format!("width: {}", bounds.width),
        format!("height: {}", bounds.height),
    ];
    let mut y = panel.y + 10.0;
    for line in &lines {
        surface.fill_text(line, panel.x + 10.0, y, None)?;
        y += 20.0;
    }

    surface.set_line_width(1.0);
    surface.set_stroke_style(node.debug_color());
    surface.stroke_rect(bounds.x, bounds.y, bounds.width, bounds.height);
    surface.restore();
    Ok(())
}

/// Keep the debug panel on screen.
fn debug_panel_origin(x: f64, y: f64, viewport: Size) -> Point {
    let x = if x + DEBUG_PANEL_WIDTH > viewport.width { viewport.width - DEBUG_PANEL_WIDTH } else { x };
    let y = if y + DEBUG_PANEL_HEIGHT > viewport.height { viewport.height - DEBUG_PANEL_HEIGHT } else { y };
    Point::new(x.max(0.0), y.max(0.0))
}
