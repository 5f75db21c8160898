//! Error types shared by every warden crate.
//!
//! Authorization queries themselves never fail on their own account: the only
//! runtime failure is the subject lookup. The remaining variants belong to
//! the outer surfaces (fixture loading, expression dispatch, templates).

use thiserror::Error;

/// The unified error type for warden.
#[derive(Debug, Error)]
pub enum WardenError {
    /// No subject is bound to the calling thread or request.
    #[error("no subject is bound to the current execution context")]
    NoSubjectBound,

    /// The host's subject lookup failed for a reason of its own.
    #[error("subject lookup failed: {reason}")]
    SubjectLookup { reason: String },

    /// An expression named a function that does not exist.
    #[error("unknown authorization function '{name}'")]
    UnknownFunction { name: String },

    /// A function that takes an argument was called without one.
    #[error("authorization function '{function}' requires an argument")]
    MissingArgument { function: String },

    /// A function received an argument it cannot use.
    #[error("invalid argument to '{function}': {reason}")]
    InvalidArgument { function: String, reason: String },

    /// A configuration value or fixture file is missing or invalid.
    #[error("configuration error: {reason}")]
    ConfigError { reason: String },

    /// A template could not be registered or rendered.
    #[error("template error: {reason}")]
    TemplateError { reason: String },
}

/// Convenience alias used throughout the warden crates.
pub type WardenResult<T> = Result<T, WardenError>;
