use std::sync::{Mutex, MutexGuard};

use super::*;

static ENV_LOCK: Mutex<()> = Mutex::new(());

fn env_lock() -> MutexGuard<'static, ()> {
    ENV_LOCK.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
}

/// # Safety
/// Callers hold `env_lock()`.
unsafe fn clear_polaris_env() {
    unsafe {
        for key in
            ["POLARIS_WIDTH", "POLARIS_HEIGHT", "POLARIS_PIXEL_RATIO", "POLARIS_FRAME_RATE", "POLARIS_FRAMES", "POLARIS_DEBUG"]
        {
            std::env::remove_var(key);
        }
    }
}

#[test]
fn from_env_defaults() {
    let _guard = env_lock();
    unsafe { clear_polaris_env() };

    let cfg = RunConfig::from_env().unwrap();
    assert_eq!(cfg, RunConfig::default());
    assert_eq!(cfg.frame_interval(), Duration::from_secs(1) / 60);
}

#[test]
fn from_env_parses_overrides() {
    let _guard = env_lock();
    unsafe {
        clear_polaris_env();
        std::env::set_var("POLARIS_WIDTH", "800");
        std::env::set_var("POLARIS_HEIGHT", "600");
        std::env::set_var("POLARIS_PIXEL_RATIO", "2");
        std::env::set_var("POLARIS_FRAME_RATE", "30");
        std::env::set_var("POLARIS_FRAMES", "12");
        std::env::set_var("POLARIS_DEBUG", "true");
    }

    let cfg = RunConfig::from_env().unwrap();
    assert_eq!(cfg.game.size(), canvas::geometry::Size::new(800.0, 600.0));
    assert!((cfg.game.pixel_ratio - 2.0).abs() < f64::EPSILON);
    assert!(cfg.game.debug);
    assert_eq!(cfg.frame_rate, 30);
    assert_eq!(cfg.frames, 12);

    unsafe { clear_polaris_env() };
}

#[test]
fn from_env_ignores_unparseable_values() {
    let _guard = env_lock();
    unsafe {
        clear_polaris_env();
        std::env::set_var("POLARIS_FRAMES", "lots");
        std::env::set_var("POLARIS_DEBUG", "maybe");
    }

    let cfg = RunConfig::from_env().unwrap();
    assert_eq!(cfg.frames, DEFAULT_FRAMES);
    assert!(!cfg.game.debug);

    unsafe { clear_polaris_env() };
}

#[test]
fn from_env_rejects_invalid_values() {
    let _guard = env_lock();
    unsafe {
        clear_polaris_env();
        std::env::set_var("POLARIS_WIDTH", "-1");
    }
    assert!(matches!(RunConfig::from_env(), Err(HostError::Engine(_))));

    unsafe {
        clear_polaris_env();
        std::env::set_var("POLARIS_FRAME_RATE", "0");
    }
    assert!(matches!(RunConfig::from_env(), Err(HostError::Config(_))));

    unsafe { clear_polaris_env() };
}
