//! Demo game for the headless host: a title screen with a start button and a
//! small play field with walls, a movable player and a dialogue box.

use canvas::consts::{COLOR_BLACK, COLOR_ORANGE, COLOR_WHITE};
use canvas::content::Content;
use canvas::dialogue::{DialogueBox, DialogueScript};
use canvas::entity::Entity;
use canvas::error::HookResult;
use canvas::geometry::Size;
use canvas::keys::{KeyEvent, KeyState, Modifiers};
use canvas::movement::Direction;
use canvas::render::Renderer;
use canvas::scene::Scene;
use canvas::style::Gradient;
use canvas::surface::{ManualScheduler, RecordingSurface};
use canvas::widgets::{Button, Checkbox};

use crate::host::{HeadlessGame, Input};

pub const TITLE: &str = "title";
pub const PLAY: &str = "play";
pub const PLAYER: &str = "player";
pub const DIALOGUE: &str = "dialogue";

/// Distance the player moves per arrow key press.
const STEP: f64 = 10.0;

const INTRO: &str = r#"[
    "Use the arrow keys to move.",
    {"name": "Guide", "text": "Walls are solid. Press space to continue."},
    {"name": "Guide", "text": "Escape returns to the title screen."}
]"#;

type HeadlessRenderer = Renderer<RecordingSurface, ManualScheduler>;

pub fn register(game: &mut HeadlessGame) {
    game.add_scene(Scene::new(TITLE, title));
    game.add_scene(Scene::new(PLAY, play));
}

fn title(r: &mut HeadlessRenderer) -> HookResult {
    let viewport = r.viewport();

    let mut background = Entity::background(COLOR_BLACK);
    background.node.style.gradient = Some(Gradient::linear(vec!["#102040".into(), "#000010".into()], 90.0));

    let mut heading = Entity::text("Polaris", 0.0, 0.0).with_fill(COLOR_WHITE).with_opacity(0);
    if let Content::Text(block) = &mut heading.node.content {
        block.size = 40.0;
        block.styles = vec!["bold".into()];
    }
    heading.node.set_position("top center")?;

    let (x, y) = start_button_origin(viewport);
    let start = Button::entity("Play", x, y, |cx| {
        cx.request_scene(PLAY);
        Ok(())
    });
    let sound = Checkbox::with_on_change(true, 20.0, viewport.height - 60.0, |checked, _| {
        tracing::info!(checked, "sound toggled");
        Ok(())
    });

    r.append([background, heading, start, sound])?;
    r.fade_in();
    Ok(())
}

fn start_button_origin(viewport: Size) -> (f64, f64) {
    (viewport.width / 2.0 - 40.0, viewport.height / 2.0)
}

fn play(r: &mut HeadlessRenderer) -> HookResult {
    let viewport = r.viewport();

    let walls = [
        Entity::rect(100.0, 100.0, 20.0, 200.0),
        Entity::rect(400.0, 80.0, 160.0, 20.0),
        Entity::rounded_rect(420.0, 260.0, 60.0, 60.0, 8.0),
    ]
    .map(|wall| wall.with_fill("grey").with_stroke(COLOR_WHITE, 1.0).solid());

    let player = Entity::circle(viewport.width / 2.0, viewport.height / 2.0, 15.0)
        .with_name(PLAYER)
        .with_fill(COLOR_ORANGE)
        .solid()
        .bound_to_viewport();
    let pointer = Entity::circle(0.0, 0.0, 4.0).with_fill(COLOR_WHITE).following_mouse().with_order(100);

    let script = DialogueScript::from_json(INTRO)?;
    let dialogue = DialogueBox::entity(script, 20.0, viewport.height - 150.0, viewport.width - 40.0, 130.0).with_name(DIALOGUE);

    r.append([Entity::background(COLOR_BLACK)])?;
    r.append(walls)?;
    r.append([player, pointer, dialogue])?;

    let keyboard = r.keyboard_mut();
    for (key, direction) in [("up", Direction::Up), ("down", Direction::Down), ("left", Direction::Left), ("right", Direction::Right)] {
        keyboard.down(&[key], move |stage| {
            if let Some(player) = stage.find(PLAYER) {
                let outcome = stage.resolve_move(player, direction, STEP);
                tracing::debug!(?direction, ?outcome, "player move");
            }
            Ok(())
        })?;
    }
    keyboard.down(&["escape"], |stage| {
        stage.request_scene(TITLE);
        Ok(())
    })?;
    keyboard.down(&["shift", "f"], |stage| {
        stage.fade_out_all();
        Ok(())
    })?;
    Ok(())
}

/// Scripted session: press the start button, walk left into a wall, read the
/// dialogue and return to the title screen.
#[must_use]
pub fn input_script(viewport: Size) -> Vec<(u64, Input)> {
    let (x, y) = start_button_origin(viewport);
    let key = |name: &str| Input::Key(KeyState::Down, KeyEvent::plain(name));

    let mut script = vec![
        (2, Input::PointerMove(x + 10.0, y + 10.0)),
        (3, Input::PointerDown),
        (5, Input::PointerUp),
    ];
    script.extend((10..13).map(|frame| (frame, key("ArrowRight"))));
    script.extend((20..45).map(|frame| (frame, key("ArrowLeft"))));
    script.extend([(50, key(" ")), (55, key(" ")), (60, key(" "))]);
    let shift = Modifiers { shift: true, ..Modifiers::default() };
    script.push((70, Input::Key(KeyState::Down, KeyEvent::new("F", shift))));
    script.push((100, key("Escape")));
    script
}
