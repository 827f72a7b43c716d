use super::*;
use crate::entity::Entity;
use crate::geometry::Point;
use crate::surface::{DrawOp, RecordingSurface};

fn at(x: f64, y: f64) -> Placement {
    Placement { origin: Point::new(x, y), angle: 0.0 }
}

// =============================================================
// TextBlock
// =============================================================

#[test]
fn font_string_joins_styles_size_and_family() {
    let mut block = TextBlock::new("hi");
    block.styles = vec!["bold".into()];
    block.size = 20.0;
    assert_eq!(block.font_string(), "bold 20px Helvetica, sans-serif");
}

#[test]
fn font_string_without_styles() {
    assert_eq!(TextBlock::new("hi").font_string(), "18px Helvetica, sans-serif");
}

#[test]
fn visible_text_respects_reveal_count() {
    let mut block = TextBlock::new("héllo");
    assert_eq!(block.visible_text(), "héllo");
    block.revealed = Some(0);
    assert_eq!(block.visible_text(), "");
    block.revealed = Some(2);
    assert_eq!(block.visible_text(), "hé");
    block.revealed = Some(99);
    assert_eq!(block.visible_text(), "héllo");
}

// =============================================================
// init
// =============================================================

#[test]
fn init_measures_unsized_text() {
    let mut surface = RecordingSurface::new(640.0, 480.0).with_char_width(10.0);
    let mut entity = Entity::text("abcd", 0.0, 0.0);
    init(&mut entity.node, &mut surface).unwrap();
    assert_eq!(entity.node.size(), Size::new(90.0, 18.0));
}

#[test]
fn init_keeps_explicit_text_size() {
    let mut surface = RecordingSurface::new(640.0, 480.0);
    let mut entity = Entity::text("abcd", 0.0, 0.0);
    entity.node.shape = Shape::Rectangle { width: 200.0, height: 30.0 };
    init(&mut entity.node, &mut surface).unwrap();
    assert_eq!(entity.node.size(), Size::new(200.0, 30.0));
}

#[test]
fn init_gives_unsized_image_its_natural_size() {
    let mut surface = RecordingSurface::new(640.0, 480.0);
    let mut entity = Entity::image(ImageId(1), Size::new(64.0, 32.0), 0.0, 0.0, 0.0, 0.0);
    init(&mut entity.node, &mut surface).unwrap();
    assert_eq!(entity.node.size(), Size::new(64.0, 32.0));
}

// =============================================================
// draw
// =============================================================

#[test]
fn draw_rectangle_adds_rect_path() {
    let mut surface = RecordingSurface::new(640.0, 480.0);
    let entity = Entity::rect(0.0, 0.0, 30.0, 20.0);
    draw(&entity.node, &mut surface, at(5.0, 6.0)).unwrap();
    assert_eq!(surface.ops(), &[DrawOp::Rect { x: 5.0, y: 6.0, width: 30.0, height: 20.0 }]);
}

#[test]
fn draw_rounded_rectangle_uses_corner_radius() {
    let mut surface = RecordingSurface::new(640.0, 480.0);
    let entity = Entity::rounded_rect(0.0, 0.0, 30.0, 20.0, 5.0);
    draw(&entity.node, &mut surface, at(0.0, 0.0)).unwrap();
    assert_eq!(
        surface.ops(),
        &[DrawOp::RoundRect { x: 0.0, y: 0.0, width: 30.0, height: 20.0, radius: 5.0 }]
    );
}

#[test]
fn draw_circle_is_centered_on_placement() {
    let mut surface = RecordingSurface::new(640.0, 480.0);
    let entity = Entity::circle(0.0, 0.0, 7.0);
    draw(&entity.node, &mut surface, at(50.0, 60.0)).unwrap();
    assert_eq!(surface.ops(), &[DrawOp::Arc { cx: 50.0, cy: 60.0, radius: 7.0 }]);
}

#[test]
fn draw_clear_box_clears_its_area() {
    let mut surface = RecordingSurface::new(640.0, 480.0);
    let entity = Entity::clear_box(0.0, 0.0, 10.0, 10.0);
    draw(&entity.node, &mut surface, at(1.0, 2.0)).unwrap();
    assert_eq!(surface.ops(), &[DrawOp::ClearRect { x: 1.0, y: 2.0, width: 10.0, height: 10.0 }]);
}

#[test]
fn draw_image_blits_at_placement() {
    let mut surface = RecordingSurface::new(640.0, 480.0);
    let entity = Entity::image(ImageId(7), Size::new(1.0, 1.0), 0.0, 0.0, 40.0, 30.0);
    draw(&entity.node, &mut surface, at(3.0, 4.0)).unwrap();
    assert_eq!(
        surface.ops(),
        &[DrawOp::DrawImage { image: ImageId(7), x: 3.0, y: 4.0, width: 40.0, height: 30.0 }]
    );
}

#[test]
fn draw_text_fills_each_wrapped_line() {
    let mut surface = RecordingSurface::new(640.0, 480.0).with_char_width(10.0);
    let mut entity = Entity::text("aaa bbb ccc", 0.0, 0.0);
    if let Content::Text(block) = &mut entity.node.content {
        block.max_width = Some(70.0);
    }
    draw(&entity.node, &mut surface, at(10.0, 100.0)).unwrap();
    assert_eq!(surface.texts(), vec!["aaa bbb", "ccc"]);
    let ys: Vec<f64> = surface
        .ops()
        .iter()
        .filter_map(|op| match op {
            DrawOp::FillText { y, .. } => Some(*y),
            _ => None,
        })
        .collect();
    assert_eq!(ys, vec![100.0, 120.0]);
}

#[test]
fn draw_text_without_fill_strokes() {
    let mut surface = RecordingSurface::new(640.0, 480.0);
    let mut entity = Entity::text("hi", 0.0, 0.0);
    entity.node.style.fill = None;
    draw(&entity.node, &mut surface, at(0.0, 0.0)).unwrap();
    assert!(surface.ops().iter().any(|op| matches!(op, DrawOp::StrokeText { text, .. } if text == "hi")));
}

#[test]
fn draw_nothing_draws_nothing() {
    let mut surface = RecordingSurface::new(640.0, 480.0);
    let mut entity = Entity::rect(0.0, 0.0, 10.0, 10.0);
    entity.node.content = Content::Nothing;
    draw(&entity.node, &mut surface, at(0.0, 0.0)).unwrap();
    assert!(surface.ops().is_empty());
}

// =============================================================
// wrap_text_lines
// =============================================================

#[test]
fn wrap_keeps_short_text_on_one_line() {
    let mut surface = RecordingSurface::new(640.0, 480.0);
    assert_eq!(wrap_text_lines(&mut surface, "hello world", 1000.0).unwrap(), vec!["hello world"]);
}

#[test]
fn wrap_preserves_explicit_newlines_and_blank_lines() {
    let mut surface = RecordingSurface::new(640.0, 480.0);
    assert_eq!(wrap_text_lines(&mut surface, "a\n\nb", 1000.0).unwrap(), vec!["a", "", "b"]);
}

#[test]
fn wrap_breaks_long_words_by_character() {
    let mut surface = RecordingSurface::new(640.0, 480.0).with_char_width(10.0);
    assert_eq!(wrap_text_lines(&mut surface, "abcdefg", 30.0).unwrap(), vec!["abc", "def", "g"]);
}

#[test]
fn wrap_of_empty_text_is_one_empty_line() {
    let mut surface = RecordingSurface::new(640.0, 480.0);
    assert_eq!(wrap_text_lines(&mut surface, "", 100.0).unwrap(), vec![String::new()]);
}
