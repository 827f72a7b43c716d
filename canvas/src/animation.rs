//! Time-stepped animations.
//!
//! An [`Animation`] is a list of mutation steps applied to an explicit target
//! at a fixed interval, repeated a bounded or unbounded number of times, with
//! an end callback. Stepping is iterative: [`Animation::step`] does one unit
//! of work and reports how long to wait before the next call. Two drivers
//! exist:
//!
//! - [`AnimationSlot`] steps against the renderer's frame clock (entity fades,
//!   flashes and typewriter reveals);
//! - [`Animation::run`] awaits a host [`Delay`] between steps.

#[cfg(test)]
#[path = "animation_test.rs"]
mod animation_test;

use std::fmt;
use std::future::Future;
use std::time::Duration;

use crate::consts::{FADE_INTERVAL_MS, FADE_STEP, OPACITY_MAX};
use crate::content::Content;
use crate::entity::Node;

/// One mutation step.
pub type StepFn<T> = Box<dyn FnMut(&mut T)>;

/// Completion callback, run at most once.
pub type EndFn<T> = Box<dyn FnOnce(&mut T)>;

/// How many times the step sequence runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Repeat {
    /// Run the sequence `n` times; `0` and `1` both mean once.
    Times(u32),
    /// Run until stopped.
    Forever,
}

/// Lifecycle of an animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationState {
    Running,
    Finished,
    Stopped,
}

/// Result of one call to [`Animation::step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// A step ran; call again after this long.
    Wait(Duration),
    /// The sequence is exhausted and the end callback has run.
    Finished,
    /// The animation was stopped; no callback ran.
    Stopped,
}

/// Host delay primitive: resolves after `duration`.
pub trait Delay {
    fn after(&self, duration: Duration) -> impl Future<Output = ()>;
}

pub struct Animation<T> {
    steps: Vec<StepFn<T>>,
    interval: Duration,
    remaining: Repeat,
    cursor: usize,
    iteration: u32,
    stop: bool,
    on_end: Option<EndFn<T>>,
    state: AnimationState,
}

impl<T> fmt::Debug for Animation<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Animation")
            .field("steps", &self.steps.len())
            .field("interval", &self.interval)
            .field("remaining", &self.remaining)
            .field("cursor", &self.cursor)
            .field("iteration", &self.iteration)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl<T> Animation<T> {
    #[must_use]
    pub fn new(steps: Vec<StepFn<T>>, interval: Duration, repeat: Repeat) -> Self {
        Self {
            steps,
            interval,
            remaining: repeat,
            cursor: 0,
            iteration: 0,
            stop: false,
            on_end: None,
            state: AnimationState::Running,
        }
    }

    /// Set the end callback.
    #[must_use]
    pub fn on_end(mut self, f: impl FnOnce(&mut T) + 'static) -> Self {
        self.on_end = Some(Box::new(f));
        self
    }

    #[must_use]
    pub fn state(&self) -> AnimationState {
        self.state
    }

    /// Completed passes over the step sequence.
    #[must_use]
    pub fn iteration(&self) -> u32 {
        self.iteration
    }

    #[must_use]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Request a stop; observed at the top of the next step.
    pub fn stop(&mut self) {
        self.stop = true;
    }

    /// Advance by one step.
    ///
    /// Calling again after `Finished` or `Stopped` does nothing.
    pub fn step(&mut self, target: &mut T) -> Step {
        if self.stop {
            self.state = AnimationState::Stopped;
            return Step::Stopped;
        }
        match self.state {
            AnimationState::Running => {}
            AnimationState::Finished => return Step::Finished,
            AnimationState::Stopped => return Step::Stopped,
        }
        if self.steps.is_empty() {
            return self.finish(target);
        }

        if self.cursor >= self.steps.len() {
            self.cursor = 0;
            self.iteration += 1;
            match self.remaining {
                Repeat::Forever => {}
                Repeat::Times(n) if n > 1 => self.remaining = Repeat::Times(n - 1),
                Repeat::Times(_) => return self.finish(target),
            }
        }

        (self.steps[self.cursor])(target);
        self.cursor += 1;
        Step::Wait(self.interval)
    }

    fn finish(&mut self, target: &mut T) -> Step {
        self.state = AnimationState::Finished;
        if let Some(on_end) = self.on_end.take() {
            on_end(target);
        }
        Step::Finished
    }

    /// Drive the animation to completion, awaiting `delay` between steps.
    pub async fn run<D: Delay>(&mut self, target: &mut T, delay: &D) -> AnimationState {
        loop {
            match self.step(target) {
                Step::Wait(duration) => delay.after(duration).await,
                Step::Finished | Step::Stopped => return self.state,
            }
        }
    }
}

// =============================================================
// Frame-clock driver
// =============================================================

/// An animation bound to a target and the frame time its next step is due.
#[derive(Debug)]
pub struct AnimationSlot<T> {
    pub animation: Animation<T>,
    due_at: Option<f64>,
}

impl<T> AnimationSlot<T> {
    #[must_use]
    pub fn new(animation: Animation<T>) -> Self {
        Self { animation, due_at: None }
    }

    /// Step once if due at `now_ms`. Returns whether the animation is still running.
    ///
    /// The first step runs on the first frame after installation.
    pub fn advance(&mut self, now_ms: f64, target: &mut T) -> bool {
        if self.due_at.is_some_and(|due| now_ms < due) {
            return true;
        }
        match self.animation.step(target) {
            Step::Wait(interval) => {
                self.due_at = Some(now_ms + interval.as_secs_f64() * 1000.0);
                true
            }
            Step::Finished | Step::Stopped => false,
        }
    }
}

// =============================================================
// Builders
// =============================================================

/// Raise opacity from `from` to 100 in `FADE_STEP` increments.
#[must_use]
pub fn fade_in(from: u8) -> Animation<Node> {
    let distance = OPACITY_MAX.saturating_sub(from);
    fade(distance, |node: &mut Node| {
        node.style.set_opacity(node.style.opacity.saturating_add(FADE_STEP));
    })
    .on_end(|node| node.style.set_opacity(OPACITY_MAX))
}

/// Lower opacity from `from` to 0 in `FADE_STEP` decrements.
#[must_use]
pub fn fade_out(from: u8) -> Animation<Node> {
    fade(from.min(OPACITY_MAX), |node: &mut Node| {
        node.style.set_opacity(node.style.opacity.saturating_sub(FADE_STEP));
    })
    .on_end(|node| node.style.set_opacity(0))
}

fn fade(distance: u8, step: impl FnMut(&mut Node) + 'static) -> Animation<Node> {
    let interval = Duration::from_millis(FADE_INTERVAL_MS);
    if distance == 0 {
        return Animation::new(Vec::new(), interval, Repeat::Times(0));
    }
    let repeats = u32::from(distance.div_ceil(FADE_STEP));
    Animation::new(vec![Box::new(step)], interval, Repeat::Times(repeats))
}

/// Toggle `invisible` every `interval`; `times == 0` toggles until stopped.
#[must_use]
pub fn flash(interval: Duration, times: u32) -> Animation<Node> {
    let repeat = if times == 0 { Repeat::Forever } else { Repeat::Times(times) };
    Animation::new(vec![Box::new(|node: &mut Node| node.invisible = !node.invisible)], interval, repeat)
}

/// Reveal one more character of the node's text block per step.
#[must_use]
pub fn typewriter(chars: usize, interval: Duration) -> Animation<Node> {
    let reveal = |node: &mut Node| {
        if let Content::Text(block) = &mut node.content {
            block.revealed = Some(block.revealed.map_or(1, |n| n + 1));
        }
    };
    let repeats = u32::try_from(chars).unwrap_or(u32::MAX);
    let steps: Vec<StepFn<Node>> = if chars == 0 { Vec::new() } else { vec![Box::new(reveal)] };
    Animation::new(steps, interval, Repeat::Times(repeats)).on_end(|node| {
        if let Content::Text(block) = &mut node.content {
            block.revealed = None;
        }
    })
}
