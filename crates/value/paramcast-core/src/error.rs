use thiserror::Error;

/// Hard failures of the core. Malformed data never lands here; it degrades
/// to defaults with a logged warning instead.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoreError {
    #[error("broadcast argument {position} is not iterable: {value}")]
    NotIterable { position: usize, value: String },
    #[error("host input json: {0}")]
    Json(String),
}
