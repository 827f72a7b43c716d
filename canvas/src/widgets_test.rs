use std::cell::RefCell;
use std::rc::Rc;

use super::*;
use crate::render::Renderer;
use crate::surface::{ManualScheduler, RecordingSurface};

type TestRenderer = Renderer<RecordingSurface, ManualScheduler>;

fn renderer() -> TestRenderer {
    let mut renderer = Renderer::new(RecordingSurface::new(640.0, 480.0).with_char_width(8.0), ManualScheduler::new());
    renderer.start().unwrap();
    renderer
}

/// Press and release the pointer at `(x, y)` across three frames starting at `t`.
fn click_at(renderer: &mut TestRenderer, x: f64, y: f64, t: f64) {
    renderer.input_mut().pointer_moved(x, y);
    renderer.input_mut().pointer_down();
    renderer.frame(t).unwrap();
    renderer.input_mut().pointer_up();
    renderer.frame(t + 16.0).unwrap();
    renderer.frame(t + 200.0).unwrap();
}

// =============================================================
// Button
// =============================================================

#[test]
fn button_is_sized_to_its_label() {
    let mut renderer = renderer();
    let id = renderer.add(Button::entity("Play", 10.0, 10.0, |_| Ok(()))).unwrap();
    let node = renderer.stage().node(id).unwrap();
    assert_eq!(node.size(), crate::geometry::Size::new(62.0, 48.0));
    assert_eq!(node.child(Button::LABEL).and_then(|e| e.node.text()), Some("Play"));
    assert_eq!(node.cursor, "pointer");
}

#[test]
fn button_click_runs_handler() {
    let mut renderer = renderer();
    renderer
        .add(Button::entity("Play", 10.0, 10.0, |cx| {
            cx.request_scene("play");
            Ok(())
        }))
        .unwrap();

    renderer.input_mut().pointer_moved(20.0, 20.0);
    renderer.input_mut().pointer_down();
    renderer.frame(0.0).unwrap();

    assert_eq!(renderer.take_scene_request().as_deref(), Some("play"));
}

#[test]
fn click_outside_button_does_nothing() {
    let clicks = Rc::new(RefCell::new(0));
    let counter = clicks.clone();
    let mut renderer = renderer();
    renderer
        .add(Button::entity("Play", 10.0, 10.0, move |_| {
            *counter.borrow_mut() += 1;
            Ok(())
        }))
        .unwrap();
    click_at(&mut renderer, 400.0, 400.0, 0.0);
    assert_eq!(*clicks.borrow(), 0);
}

// =============================================================
// Checkbox
// =============================================================

#[test]
fn checkbox_starts_in_given_state() {
    let on = Checkbox::entity(true, 0.0, 0.0);
    assert!(Checkbox::is_checked(&on.node));
    assert_eq!(on.node.style.fill.as_deref(), Some(COLOR_ORANGE));

    let off = Checkbox::entity(false, 0.0, 0.0);
    assert!(!Checkbox::is_checked(&off.node));
    assert_eq!(off.node.style.fill.as_deref(), Some(COLOR_WHITE));
}

#[test]
fn checkbox_toggles_on_each_click() {
    let changes = Rc::new(RefCell::new(Vec::new()));
    let log = changes.clone();
    let mut renderer = renderer();
    let id = renderer
        .add(Checkbox::with_on_change(false, 100.0, 100.0, move |checked, _| {
            log.borrow_mut().push(checked);
            Ok(())
        }))
        .unwrap();

    click_at(&mut renderer, 110.0, 110.0, 0.0);
    assert!(Checkbox::is_checked(renderer.stage().node(id).unwrap()));

    click_at(&mut renderer, 110.0, 110.0, 1000.0);
    assert!(!Checkbox::is_checked(renderer.stage().node(id).unwrap()));

    assert_eq!(*changes.borrow(), vec![true, false]);
}

#[test]
fn holding_the_button_does_not_retoggle() {
    let mut renderer = renderer();
    let id = renderer.add(Checkbox::entity(false, 100.0, 100.0)).unwrap();
    renderer.input_mut().pointer_moved(110.0, 110.0);
    renderer.input_mut().pointer_down();
    for t in 0..5 {
        renderer.frame(f64::from(t) * 16.0).unwrap();
    }
    assert!(Checkbox::is_checked(renderer.stage().node(id).unwrap()));
}
