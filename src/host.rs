//! Headless host: drives a [`Game`] from a tokio timer instead of a browser.
//!
//! The surface records draw calls and the scheduler is polled by hand; each
//! pending frame request is honored after one frame interval of tokio time.
//! Pointer and key input come from a frame-indexed script.

use std::time::Duration;

use canvas::animation::Delay;
use canvas::error::EngineError;
use canvas::keys::{KeyEvent, KeyState};
use canvas::pointer::InputState;
use canvas::render::FrameOutcome;
use canvas::scene::Game;
use canvas::surface::{ManualScheduler, RecordingSurface};

use crate::config::RunConfig;

pub type HeadlessGame = Game<RecordingSurface, ManualScheduler>;

#[derive(Debug, thiserror::Error)]
pub enum HostError {
    #[error(transparent)]
    Engine(#[from] EngineError),
    #[error("invalid configuration: {0}")]
    Config(String),
    #[error("runtime: {0}")]
    Runtime(#[from] std::io::Error),
}

/// [`Delay`] backed by the tokio timer.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioDelay;

impl Delay for TokioDelay {
    async fn after(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// One scripted host event.
#[derive(Debug, Clone, PartialEq)]
pub enum Input {
    PointerMove(f64, f64),
    PointerDown,
    PointerUp,
    Key(KeyState, KeyEvent),
}

/// What a run did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub frames: u64,
    /// Scene running when the loop ended, if any.
    pub scene: Option<String>,
    pub draw_ops: usize,
}

/// Run `game` for up to `config.frames` frames, feeding `script` events
/// (`(frame index, event)`, in any order) before the frame they belong to.
///
/// The loop ends early once the game stops requesting frames.
///
/// # Errors
///
/// Returns the first frame, scene or input failure.
pub async fn run(config: &RunConfig, game: &mut HeadlessGame, script: &[(u64, Input)]) -> Result<RunSummary, HostError> {
    let delay = TokioDelay;
    let interval = config.frame_interval();
    let started = tokio::time::Instant::now();
    let mut frames = 0;
    let mut draw_ops = 0;

    while frames < config.frames {
        let Some(renderer) = game.renderer_mut() else { break };
        if renderer.scheduler_mut().take_pending().is_none() {
            tracing::info!(frames, "no frame requested; stopping");
            break;
        }
        delay.after(interval).await;

        for (_, input) in script.iter().filter(|(at, _)| *at == frames) {
            feed(game, input)?;
        }

        let now_ms = started.elapsed().as_secs_f64() * 1000.0;
        let outcome = game.frame(now_ms)?;
        if let Some(renderer) = game.renderer_mut() {
            draw_ops += renderer.surface().ops().len();
            renderer.surface_mut().clear_ops();
        }
        frames += 1;
        if outcome == FrameOutcome::Stopped {
            break;
        }
    }

    let summary = RunSummary { frames, scene: game.current_scene().map(str::to_owned), draw_ops };
    tracing::info!(frames = summary.frames, scene = ?summary.scene, draw_ops = summary.draw_ops, "run finished");
    Ok(summary)
}

fn feed(game: &mut HeadlessGame, input: &Input) -> Result<(), HostError> {
    tracing::debug!(?input, "scripted input");
    match input {
        Input::Key(state, event) => game.on_key(*state, event)?,
        Input::PointerMove(x, y) => with_pointer(game, |pointer| pointer.pointer_moved(*x, *y)),
        Input::PointerDown => with_pointer(game, InputState::pointer_down),
        Input::PointerUp => with_pointer(game, InputState::pointer_up),
    }
    Ok(())
}

fn with_pointer(game: &mut HeadlessGame, f: impl FnOnce(&mut InputState)) {
    if let Some(renderer) = game.renderer_mut() {
        f(renderer.input_mut());
    }
}

#[cfg(test)]
#[path = "host_test.rs"]
mod tests;
