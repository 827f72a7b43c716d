use super::*;

// =============================================================
// Style
// =============================================================

#[test]
fn default_style_is_opaque_black_fill() {
    let style = Style::default();
    assert_eq!(style.opacity, 100);
    assert_eq!(style.fill.as_deref(), Some(COLOR_BLACK));
    assert_eq!(style.stroke_width, 0.0);
}

#[test]
fn set_opacity_saturates_at_max() {
    let mut style = Style::default();
    style.set_opacity(250);
    assert_eq!(style.opacity, 100);
    style.set_opacity(40);
    assert_eq!(style.opacity, 40);
}

#[test]
fn alpha_is_opacity_over_hundred() {
    let mut style = Style::default();
    style.set_opacity(50);
    assert!((style.alpha() - 0.5).abs() < f64::EPSILON);
}

#[test]
fn gradient_takes_precedence_over_fill() {
    let mut style = Style::default();
    style.gradient = Some(Gradient::linear(vec!["red".into(), "blue".into()], 0.0));
    let paint = style.fill_paint(BoxRegion::new(0.0, 0.0, 100.0, 50.0));
    assert!(matches!(paint, Some(Paint::Linear { .. })));
}

#[test]
fn no_fill_and_no_gradient_yields_no_paint() {
    let style = Style { fill: None, ..Style::default() };
    assert_eq!(style.fill_paint(BoxRegion::new(0.0, 0.0, 1.0, 1.0)), None);
}

// =============================================================
// Gradient
// =============================================================

#[test]
fn linear_gradient_spans_bounds_horizontally() {
    let gradient = Gradient::linear(vec!["red".into(), "green".into(), "blue".into()], 0.0);
    let Paint::Linear { x0, y0, x1, y1, stops } = gradient.resolve(BoxRegion::new(10.0, 20.0, 100.0, 40.0)) else {
        panic!("expected linear paint");
    };
    assert!((x0 - 10.0).abs() < 1e-9);
    assert!((x1 - 110.0).abs() < 1e-9);
    assert!((y0 - 40.0).abs() < 1e-9);
    assert!((y1 - 40.0).abs() < 1e-9);
    let offsets: Vec<f64> = stops.iter().map(|s| s.offset).collect();
    assert_eq!(offsets, vec![0.0, 0.5, 1.0]);
}

#[test]
fn single_color_gradient_has_one_stop_at_zero() {
    let gradient = Gradient::linear(vec!["red".into()], 90.0);
    let Paint::Linear { stops, .. } = gradient.resolve(BoxRegion::new(0.0, 0.0, 10.0, 10.0)) else {
        panic!("expected linear paint");
    };
    assert_eq!(stops, vec![ColorStop { offset: 0.0, color: "red".into() }]);
}

#[test]
fn radial_gradient_is_relative_to_top_left() {
    let gradient = Gradient {
        kind: GradientKind::Radial { x0: 5.0, y0: 5.0, r0: 0.0, x1: 5.0, y1: 5.0, r1: 10.0 },
        colors: vec!["white".into(), "black".into()],
    };
    let Paint::Radial { x0, y1, r1, .. } = gradient.resolve(BoxRegion::new(100.0, 200.0, 10.0, 10.0)) else {
        panic!("expected radial paint");
    };
    assert_eq!(x0, 105.0);
    assert_eq!(y1, 205.0);
    assert_eq!(r1, 10.0);
}

// =============================================================
// Anchor
// =============================================================

#[test]
fn anchor_parses_vertical_then_horizontal() {
    let anchor: Anchor = "bottom center".parse().unwrap();
    assert_eq!(anchor, Anchor { vertical: Vertical::Bottom, horizontal: Horizontal::Center });
    let anchor: Anchor = "  Top   RIGHT ".parse().unwrap();
    assert_eq!(anchor, Anchor { vertical: Vertical::Top, horizontal: Horizontal::Right });
}

#[test]
fn anchor_rejects_malformed_keywords() {
    for input in ["", "bottom", "center bottom", "bottom center left", "up left"] {
        let err = input.parse::<Anchor>().unwrap_err();
        assert!(matches!(err, EngineError::InvalidPosition(_)), "{input:?}");
    }
}

#[test]
fn anchor_resolves_against_viewport_and_margin() {
    let size = Size::new(100.0, 40.0);
    let viewport = Size::new(640.0, 480.0);
    let at = |s: &str| s.parse::<Anchor>().unwrap().resolve(size, viewport, 20.0);
    assert_eq!(at("top left"), Point::new(20.0, 20.0));
    assert_eq!(at("middle center"), Point::new(270.0, 220.0));
    assert_eq!(at("bottom right"), Point::new(520.0, 420.0));
    assert_eq!(at("bottom center"), Point::new(270.0, 420.0));
}
