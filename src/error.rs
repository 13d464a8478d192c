//! Crate error type
//!
//! The simulation itself has no failure states (game over is a normal
//! transition). Errors come from malformed construction, bad settings and
//! missing platform pieces.

use thiserror::Error;

/// Errors surfaced by octovolt
#[derive(Debug, Error)]
pub enum OctovoltError {
    /// Entity diameter was zero, negative or not finite
    #[error("entity dimension must be positive and finite, got {0}")]
    InvalidDimension(f32),

    /// Viewport with no area
    #[error("viewport must be positive, got {width}x{height}")]
    InvalidViewport { width: f32, height: f32 },

    /// Settings JSON could not be parsed
    #[error("invalid settings: {0}")]
    Settings(#[from] serde_json::Error),

    /// Settings file could not be read
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Browser/host piece missing (element, context, audio)
    #[error("platform error: {0}")]
    Platform(String),
}

/// Result alias used across the crate
pub type Result<T> = std::result::Result<T, OctovoltError>;
