//! Error types for the lander core
//!
//! Every operation is total over finite inputs; these variants only cover
//! callers breaking preconditions or handing in malformed configuration.

use thiserror::Error;

/// Errors raised when a caller violates an operation's preconditions.
#[derive(Debug, Error)]
pub enum LanderError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("random source produced {0}, expected a sample in [0, 1)")]
    InvalidSample(f32),
    #[error("non-finite value in {0}")]
    NonFinite(&'static str),
    #[error("failed to read settings: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse settings: {0}")]
    Config(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, LanderError>;
