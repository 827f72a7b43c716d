use std::cell::Cell;
use std::rc::Rc;

use super::*;
use crate::geometry::Size;

fn ctrl() -> Modifiers {
    Modifiers { ctrl: true, ..Modifiers::default() }
}

// =============================================================
// KeyState / KeyEvent
// =============================================================

#[test]
fn key_state_from_dom_names() {
    assert_eq!("keydown".parse::<KeyState>().unwrap(), KeyState::Down);
    assert_eq!("keyup".parse::<KeyState>().unwrap(), KeyState::Up);
    assert_eq!("keypress".parse::<KeyState>().unwrap(), KeyState::Press);
    assert!(matches!("keyhold".parse::<KeyState>(), Err(EngineError::InvalidKeyBinding(_))));
}

#[test]
fn pressed_is_lowercased_and_sorted() {
    let event = KeyEvent::new("S", Modifiers { shift: true, ctrl: true, ..Modifiers::default() });
    assert_eq!(event.pressed(), vec!["ctrl", "s", "shift"]);
}

#[test]
fn pressed_without_modifiers_is_just_the_key() {
    assert_eq!(KeyEvent::plain(" ").pressed(), vec![" "]);
}

// =============================================================
// KeyCombo
// =============================================================

#[test]
fn combo_matches_exactly() {
    let combo = KeyCombo::parse(&["ctrl", "s"]).unwrap();
    assert!(combo.matches(&KeyEvent::new("s", ctrl())));
    assert!(!combo.matches(&KeyEvent::plain("s")));
    let extra = Modifiers { shift: true, ..ctrl() };
    assert!(!combo.matches(&KeyEvent::new("s", extra)), "extra modifier breaks the match");
}

#[test]
fn combo_order_does_not_matter() {
    assert_eq!(KeyCombo::parse(&["s", "ctrl"]).unwrap(), KeyCombo::parse(&["ctrl", "s"]).unwrap());
}

#[test]
fn aliases_map_to_dom_keys() {
    assert!(KeyCombo::parse(&["up"]).unwrap().matches(&KeyEvent::plain("ArrowUp")));
    assert!(KeyCombo::parse(&["Right"]).unwrap().matches(&KeyEvent::plain("ArrowRight")));
    assert!(KeyCombo::parse(&["space"]).unwrap().matches(&KeyEvent::plain(" ")));
}

#[test]
fn combo_displays_joined() {
    assert_eq!(KeyCombo::parse(&["shift", "a"]).unwrap().to_string(), "a+shift");
}

#[test]
fn empty_combo_is_rejected() {
    assert!(matches!(KeyCombo::parse(&[]), Err(EngineError::InvalidKeyBinding(_))));
    assert!(matches!(KeyCombo::parse(&["ctrl", ""]), Err(EngineError::InvalidKeyBinding(_))));
}

// =============================================================
// Keyboard
// =============================================================

#[test]
fn dispatch_fires_matching_state_only() {
    let hits = Rc::new(Cell::new(0));
    let mut keyboard = Keyboard::default();
    let h = hits.clone();
    keyboard
        .down(&["a"], move |_| {
            h.set(h.get() + 1);
            Ok(())
        })
        .unwrap();
    let mut stage = Stage::new(Size::new(10.0, 10.0));

    assert_eq!(keyboard.dispatch(KeyState::Up, &KeyEvent::plain("a"), &mut stage).unwrap(), 0);
    assert_eq!(keyboard.dispatch(KeyState::Down, &KeyEvent::plain("b"), &mut stage).unwrap(), 0);
    assert_eq!(keyboard.dispatch(KeyState::Down, &KeyEvent::plain("A"), &mut stage).unwrap(), 1);
    assert_eq!(hits.get(), 1);
}

#[test]
fn handlers_can_drive_the_stage() {
    let mut keyboard = Keyboard::default();
    keyboard
        .pressed(&["n"], |stage| {
            stage.request_scene("next");
            Ok(())
        })
        .unwrap();
    let mut stage = Stage::new(Size::new(10.0, 10.0));
    keyboard.dispatch(KeyState::Press, &KeyEvent::plain("n"), &mut stage).unwrap();
    assert_eq!(stage.take_scene_request().as_deref(), Some("next"));
}

#[test]
fn handler_error_propagates() {
    let mut keyboard = Keyboard::default();
    keyboard.up(&["x"], |_| Err(EngineError::Hook("boom".into()))).unwrap();
    let mut stage = Stage::new(Size::new(10.0, 10.0));
    let err = keyboard.dispatch(KeyState::Up, &KeyEvent::plain("x"), &mut stage).unwrap_err();
    assert!(matches!(err, EngineError::Hook(_)));
}

#[test]
fn invalid_binding_is_not_registered() {
    let mut keyboard = Keyboard::default();
    assert!(keyboard.on(&[], KeyState::Down, |_| Ok(())).is_err());
    assert!(keyboard.is_empty());
    keyboard.down(&["a"], |_| Ok(())).unwrap();
    assert_eq!(keyboard.len(), 1);
    keyboard.clear();
    assert!(keyboard.is_empty());
}
