//! Error types for the IR framework.
//!
//! The core is forgiving: lookups return `Option`, never `Result` (see
//! [`FrontendError`] for the one exception: contract violations on the
//! frontend traits, which are fatal to the caller by construction).

use thiserror::Error;

/// Errors surfaced by the [`crate::frontend`] family of traits.
///
/// These are "not implemented" contract violations: a default trait method was
/// invoked without the implementor overriding it. They are fatal to the caller,
/// not recoverable.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FrontendError {
    #[error("{0} is not implemented")]
    NotImplemented(&'static str),
}

/// Result type for frontend contract methods.
pub type Result<T> = std::result::Result<T, FrontendError>;
