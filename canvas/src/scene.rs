//! Scenes and the game that switches between them.
//!
//! A [`Scene`] is a keyed setup callback. Loading it builds a fresh
//! [`Renderer`] on the game's surface, runs the callback to populate it and
//! starts the frame loop. Switching scenes stops the running renderer, takes
//! the surface and scheduler back from it and hands them to the next one; a
//! stopped renderer is never reused.

#[cfg(test)]
#[path = "scene_test.rs"]
mod scene_test;

use std::fmt;

use crate::config::GameConfig;
use crate::error::{EngineError, HookResult};
use crate::keys::{KeyEvent, KeyState};
use crate::render::{FrameOutcome, Renderer};
use crate::surface::{FrameScheduler, Surface};

/// Populates a freshly built renderer.
pub type SceneSetup<S, F> = Box<dyn FnMut(&mut Renderer<S, F>) -> HookResult>;

pub struct Scene<S: Surface, F: FrameScheduler> {
    key: String,
    setup: SceneSetup<S, F>,
}

impl<S: Surface, F: FrameScheduler> fmt::Debug for Scene<S, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scene").field("key", &self.key).finish_non_exhaustive()
    }
}

impl<S: Surface, F: FrameScheduler> Scene<S, F> {
    pub fn new(key: impl Into<String>, setup: impl FnMut(&mut Renderer<S, F>) -> HookResult + 'static) -> Self {
        Self { key: key.into(), setup: Box::new(setup) }
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }
}

/// Where the surface and scheduler currently live.
enum Host<S: Surface, F: FrameScheduler> {
    Idle(S, F),
    Running { scene: String, renderer: Renderer<S, F> },
}

pub struct Game<S: Surface, F: FrameScheduler> {
    config: GameConfig,
    scenes: Vec<Scene<S, F>>,
    host: Option<Host<S, F>>,
}

impl<S: Surface, F: FrameScheduler> fmt::Debug for Game<S, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Game")
            .field("config", &self.config)
            .field("scenes", &self.scenes)
            .field("current", &self.current_scene())
            .finish()
    }
}

impl<S: Surface, F: FrameScheduler> Game<S, F> {
    /// # Errors
    ///
    /// Returns `Configuration` if `config` is invalid.
    pub fn new(config: GameConfig, surface: S, scheduler: F) -> Result<Self, EngineError> {
        config.validate()?;
        Ok(Self { config, scenes: Vec::new(), host: Some(Host::Idle(surface, scheduler)) })
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Register a scene; a later scene with the same key replaces the earlier one.
    pub fn add_scene(&mut self, scene: Scene<S, F>) {
        if let Some(existing) = self.scenes.iter_mut().find(|s| s.key == scene.key) {
            *existing = scene;
        } else {
            self.scenes.push(scene);
        }
    }

    /// Load the first registered scene.
    ///
    /// # Errors
    ///
    /// Returns `Configuration` if no scene is registered, or whatever loading it returns.
    pub fn start(&mut self) -> Result<(), EngineError> {
        let Some(first) = self.scenes.first().map(|s| s.key.clone()) else {
            return Err(EngineError::Configuration("no scenes registered".into()));
        };
        self.load_scene(&first)
    }

    /// Stop the running scene (if any) and start `key` on the same surface.
    ///
    /// An unknown key leaves the running scene untouched. If the new scene's
    /// setup fails the surface is kept idle and the error returned.
    ///
    /// # Errors
    ///
    /// Returns `UnknownScene` for an unregistered key, or the setup/start failure.
    pub fn load_scene(&mut self, key: &str) -> Result<(), EngineError> {
        let index = self
            .scenes
            .iter()
            .position(|s| s.key == key)
            .ok_or_else(|| EngineError::UnknownScene(key.to_owned()))?;

        let (surface, scheduler) = match self.host.take() {
            Some(Host::Idle(surface, scheduler)) => (surface, scheduler),
            Some(Host::Running { scene, renderer }) => {
                tracing::info!(%scene, "scene stopped");
                renderer.release()
            }
            None => return Err(EngineError::Configuration("game has no surface".into())),
        };

        let mut renderer = Renderer::new(surface, scheduler);
        renderer.set_debug(self.config.debug);
        let loaded = (self.scenes[index].setup)(&mut renderer).and_then(|()| renderer.start().map(|_| ()));
        match loaded {
            Ok(()) => {
                tracing::info!(scene = key, entities = renderer.stage().len(), "scene loaded");
                self.host = Some(Host::Running { scene: key.to_owned(), renderer });
                Ok(())
            }
            Err(e) => {
                tracing::error!(error = %e, scene = key, "scene setup failed");
                let (surface, scheduler) = renderer.release();
                self.host = Some(Host::Idle(surface, scheduler));
                Err(e)
            }
        }
    }

    /// Run one frame of the current scene, then honor any scene switch it requested.
    ///
    /// # Errors
    ///
    /// Propagates frame failures and scene-switch failures.
    pub fn frame(&mut self, now_ms: f64) -> Result<FrameOutcome, EngineError> {
        let Some(renderer) = self.renderer_mut() else {
            return Ok(FrameOutcome::Stopped);
        };
        let outcome = renderer.frame(now_ms)?;
        let Some(next) = renderer.take_scene_request() else {
            return Ok(outcome);
        };
        self.load_scene(&next)?;
        Ok(self.renderer().and_then(Renderer::pending).map_or(FrameOutcome::Stopped, FrameOutcome::Scheduled))
    }

    /// Deliver a key event to the current scene.
    ///
    /// # Errors
    ///
    /// Propagates binding and hook failures.
    pub fn on_key(&mut self, state: KeyState, event: &KeyEvent) -> HookResult {
        match self.renderer_mut() {
            Some(renderer) => renderer.on_key(state, event),
            None => Ok(()),
        }
    }

    /// Stop the current scene and keep the surface idle.
    pub fn stop(&mut self) {
        self.host = match self.host.take() {
            Some(Host::Running { scene, renderer }) => {
                tracing::info!(%scene, "scene stopped");
                let (surface, scheduler) = renderer.release();
                Some(Host::Idle(surface, scheduler))
            }
            other => other,
        };
    }

    #[must_use]
    pub fn current_scene(&self) -> Option<&str> {
        match &self.host {
            Some(Host::Running { scene, .. }) => Some(scene),
            _ => None,
        }
    }

    #[must_use]
    pub fn renderer(&self) -> Option<&Renderer<S, F>> {
        match &self.host {
            Some(Host::Running { renderer, .. }) => Some(renderer),
            _ => None,
        }
    }

    pub fn renderer_mut(&mut self) -> Option<&mut Renderer<S, F>> {
        match &mut self.host {
            Some(Host::Running { renderer, .. }) => Some(renderer),
            _ => None,
        }
    }
}
