//! Failures the render loop can run into.
//!
//! None of these are fatal to the host: the loop contains every one of them by
//! transitioning to `Stopped`. Out-of-range intensity input is not an error at
//! all and is clamped instead.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SnowfallError {
    /// The drawing surface was detached from its host.
    #[error("drawing surface is no longer available")]
    SurfaceUnavailable,
    /// The surface rejected a clear or draw call.
    #[error("drawing surface rejected a draw call: {0}")]
    Draw(String),
    /// The platform refused to schedule the next frame.
    #[error("failed to schedule animation frame: {0}")]
    Schedule(String),
}

pub type Result<T, E = SnowfallError> = std::result::Result<T, E>;
