use std::cell::Cell;
use std::rc::Rc;

use super::*;
use crate::entity::Entity;
use crate::surface::{ManualScheduler, RecordingSurface};
use crate::widgets::Button;

type TestRenderer = Renderer<RecordingSurface, ManualScheduler>;
type TestGame = Game<RecordingSurface, ManualScheduler>;

fn game() -> TestGame {
    Game::new(GameConfig::default(), RecordingSurface::new(640.0, 480.0), ManualScheduler::new()).unwrap()
}

fn empty(key: &str) -> Scene<RecordingSurface, ManualScheduler> {
    Scene::new(key, |_: &mut TestRenderer| Ok(()))
}

#[test]
fn invalid_config_is_rejected() {
    let config = GameConfig { width: 0.0, ..GameConfig::default() };
    let err = Game::new(config, RecordingSurface::new(640.0, 480.0), ManualScheduler::new()).unwrap_err();
    assert!(matches!(err, EngineError::Configuration(_)));
}

#[test]
fn start_without_scenes_fails() {
    let mut game = game();
    assert!(matches!(game.start(), Err(EngineError::Configuration(_))));
}

#[test]
fn start_loads_first_scene() {
    let mut game = game();
    game.add_scene(empty("title"));
    game.add_scene(empty("play"));
    game.start().unwrap();
    assert_eq!(game.current_scene(), Some("title"));
    assert!(game.renderer().unwrap().is_running());
    assert!(game.renderer().unwrap().pending().is_some());
}

#[test]
fn unknown_scene_leaves_current_running() {
    let mut game = game();
    game.add_scene(empty("title"));
    game.start().unwrap();
    let err = game.load_scene("nope").unwrap_err();
    assert!(matches!(err, EngineError::UnknownScene(ref key) if key == "nope"));
    assert_eq!(game.current_scene(), Some("title"));
    assert!(game.renderer().unwrap().is_running());
}

#[test]
fn switching_cancels_old_frame_and_rebuilds() {
    let mut game = game();
    game.add_scene(Scene::new("title", |r: &mut TestRenderer| r.add(Entity::rect(0.0, 0.0, 1.0, 1.0)).map(|_| ())));
    game.add_scene(empty("play"));
    game.start().unwrap();
    game.frame(0.0).unwrap();
    let old = game.renderer().unwrap().pending().unwrap();

    game.load_scene("play").unwrap();

    let renderer = game.renderer().unwrap();
    assert_eq!(game.current_scene(), Some("play"));
    assert!(renderer.scheduler().cancelled().contains(&old));
    assert!(renderer.stage().is_empty());
    assert_eq!(renderer.frames(), 0);
}

#[test]
fn setup_failure_leaves_game_idle_and_reusable() {
    let mut game = game();
    game.add_scene(empty("title"));
    game.add_scene(Scene::new("broken", |_: &mut TestRenderer| Err(EngineError::Hook("setup".into()))));
    game.start().unwrap();

    assert!(matches!(game.load_scene("broken"), Err(EngineError::Hook(_))));
    assert_eq!(game.current_scene(), None);
    assert_eq!(game.frame(0.0).unwrap(), FrameOutcome::Stopped);

    game.load_scene("title").unwrap();
    assert_eq!(game.current_scene(), Some("title"));
}

#[test]
fn later_scene_with_same_key_replaces_earlier() {
    let loads = Rc::new(Cell::new(0));
    let counter = loads.clone();
    let mut game = game();
    game.add_scene(Scene::new("title", |_: &mut TestRenderer| Err(EngineError::Hook("old".into()))));
    game.add_scene(Scene::new("title", move |_: &mut TestRenderer| {
        counter.set(counter.get() + 1);
        Ok(())
    }));
    game.start().unwrap();
    assert_eq!(loads.get(), 1);
}

#[test]
fn button_can_switch_scene_mid_frame() {
    let mut game = game();
    game.add_scene(Scene::new("title", |r: &mut TestRenderer| {
        r.add(Button::entity("Start", 10.0, 10.0, |cx| {
            cx.request_scene("play");
            Ok(())
        }))?;
        r.input_mut().pointer_moved(20.0, 20.0);
        r.input_mut().pointer_down();
        Ok(())
    }));
    game.add_scene(empty("play"));
    game.start().unwrap();

    let outcome = game.frame(0.0).unwrap();

    assert_eq!(game.current_scene(), Some("play"));
    let pending = game.renderer().unwrap().pending().unwrap();
    assert_eq!(outcome, FrameOutcome::Scheduled(pending));
}

#[test]
fn key_events_reach_current_scene() {
    let mut game = game();
    game.add_scene(Scene::new("title", |r: &mut TestRenderer| {
        r.keyboard_mut().down(&["n"], |stage| {
            stage.request_scene("play");
            Ok(())
        })
    }));
    game.add_scene(empty("play"));
    game.start().unwrap();

    game.on_key(KeyState::Down, &KeyEvent::plain("n")).unwrap();
    game.frame(0.0).unwrap();
    assert_eq!(game.current_scene(), Some("play"));
}

#[test]
fn stop_keeps_surface_for_a_later_load() {
    let mut game = game();
    game.add_scene(empty("title"));
    game.start().unwrap();
    game.stop();
    assert_eq!(game.current_scene(), None);
    assert_eq!(game.frame(0.0).unwrap(), FrameOutcome::Stopped);
    game.stop();
    game.load_scene("title").unwrap();
    assert_eq!(game.current_scene(), Some("title"));
}
