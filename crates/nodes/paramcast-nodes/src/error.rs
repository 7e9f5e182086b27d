use paramcast_core::kind::UnknownKind;
use paramcast_core::swizzle::UnknownSwizzle;
use paramcast_core::CoreError;
use thiserror::Error;

/// Failures surfaced by node evaluation.
///
/// Only configuration mistakes (an operation, kind, selector or ease name that
/// does not exist) abort a node. Malformed data is coerced instead.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NodeError {
    #[error("unknown operation '{0}'")]
    UnknownOperation(String),
    #[error(transparent)]
    UnknownKind(#[from] UnknownKind),
    #[error(transparent)]
    UnknownSelector(#[from] UnknownSwizzle),
    #[error("unknown ease '{0}'")]
    UnknownEase(String),
    #[error(transparent)]
    Core(#[from] CoreError),
}
