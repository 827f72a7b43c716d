//! Error taxonomy for the engine.
//!
//! Construction-time problems (`Configuration`, `UnknownScene`) and malformed
//! input rejected at load time (`InvalidDialogue`, `InvalidKeyBinding`,
//! `InvalidPosition`) are returned to the caller. `Surface` and `Hook` abort
//! the frame they occur in and propagate to the host unchanged; the renderer
//! never swallows them.

/// Errors raised by the engine.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// The binding target or game configuration is unusable.
    #[error("configuration error: {0}")]
    Configuration(String),
    /// A scene key was requested that was never registered.
    #[error("unknown scene: {0}")]
    UnknownScene(String),
    /// Dialogue input failed the type check.
    #[error("invalid dialogue: {0}")]
    InvalidDialogue(String),
    /// A key binding could not be built.
    #[error("invalid key binding: {0}")]
    InvalidKeyBinding(String),
    /// A symbolic position keyword could not be parsed.
    #[error("invalid position `{0}`")]
    InvalidPosition(String),
    /// The host drawing surface or frame scheduler reported a failure.
    #[error("surface error: {0}")]
    Surface(String),
    /// A user hook failed.
    #[error("hook failed: {0}")]
    Hook(String),
}

/// Result type returned by entity hooks.
pub type HookResult = Result<(), EngineError>;
