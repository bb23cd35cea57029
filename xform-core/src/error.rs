//! Errors raised while loading camera configuration
use thiserror::Error;

/// The matrix and vector types never fail; only configuration does.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid clip bounds: {what} ({low} and {high} must differ)")]
    InvalidBounds {
        what: &'static str,
        low: f32,
        high: f32,
    },
    #[error("Perspective near plane must be positive, got {0}")]
    NonPositiveNear(f32),
    #[error("Degenerate view: {0}")]
    DegenerateView(&'static str),
    #[error("Field `{0}` is not a finite number")]
    NonFinite(&'static str),
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
