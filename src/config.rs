//! Host configuration parsed from environment variables.

use std::time::Duration;

use canvas::config::GameConfig;

use crate::host::HostError;

pub const DEFAULT_FRAME_RATE: u32 = 60;
pub const DEFAULT_FRAMES: u64 = 600;

#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    pub game: GameConfig,
    /// Frames requested per second of host time.
    pub frame_rate: u32,
    /// Frames to run before exiting.
    pub frames: u64,
}

impl RunConfig {
    /// Build typed run config from environment variables.
    ///
    /// Optional:
    /// - `POLARIS_WIDTH` / `POLARIS_HEIGHT`: surface size, default 640×480
    /// - `POLARIS_PIXEL_RATIO`: default 1
    /// - `POLARIS_FRAME_RATE`: default 60
    /// - `POLARIS_FRAMES`: default 600
    /// - `POLARIS_DEBUG`: `1`/`true` draws the debug overlay
    pub fn from_env() -> Result<Self, HostError> {
        let defaults = GameConfig::default();
        let game = GameConfig {
            width: env_parse("POLARIS_WIDTH", defaults.width),
            height: env_parse("POLARIS_HEIGHT", defaults.height),
            pixel_ratio: env_parse("POLARIS_PIXEL_RATIO", defaults.pixel_ratio),
            debug: env_parse_flag("POLARIS_DEBUG"),
        };
        game.validate()?;

        let frame_rate = env_parse("POLARIS_FRAME_RATE", DEFAULT_FRAME_RATE);
        if frame_rate == 0 {
            return Err(HostError::Config("POLARIS_FRAME_RATE must be at least 1".into()));
        }
        Ok(Self { game, frame_rate, frames: env_parse("POLARIS_FRAMES", DEFAULT_FRAMES) })
    }

    /// Host time between frame callbacks.
    #[must_use]
    pub fn frame_interval(&self) -> Duration {
        Duration::from_secs(1) / self.frame_rate
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        Self { game: GameConfig::default(), frame_rate: DEFAULT_FRAME_RATE, frames: DEFAULT_FRAMES }
    }
}

fn env_parse<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr + Copy,
{
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<T>().ok())
        .unwrap_or(default)
}

fn env_parse_flag(key: &str) -> bool {
    std::env::var(key).is_ok_and(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
