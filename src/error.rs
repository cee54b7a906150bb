//! Error types used by the parameter model and its transport.
//!
//! - [`ParamError`]: state-shape errors such as unknown names or wrong value
//!   kinds. The model rejects them without touching state.
//! - [`TransportError`]: the save request never produced a reply. The model
//!   turns these into a terminal status notification, it never propagates them.
//! - [`ModelError`]: the model could not be assembled.
//!
//! Every type provides `as_label` (stable snake_case, for logs) and
//! `as_message` (short detail text, also for logs).

use thiserror::Error;

/// # Errors raised by parameter mutation and construction.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParamError {
    /// The name is not part of the model's fixed parameter set.
    #[error("unknown parameter {name:?}")]
    UnknownParameter {
        /// Requested parameter name.
        name: String,
    },

    /// `adjust` was applied to a parameter that does not hold a number.
    #[error("parameter {name:?} is not numeric")]
    NotNumeric {
        /// Parameter name.
        name: String,
    },

    /// A value of the wrong kind was assigned.
    #[error("parameter {name:?} expects a {expected}, got a {found}")]
    TypeMismatch {
        /// Parameter name.
        name: String,
        /// Kind stored in the model.
        expected: &'static str,
        /// Kind supplied by the caller.
        found: &'static str,
    },

    /// Initial parameter data could not be interpreted.
    #[error("invalid initial parameters: {reason}")]
    InvalidInitial {
        /// What was wrong with the input.
        reason: String,
    },
}

impl ParamError {
    /// Returns a short stable label (snake_case) for use in logs.
    ///
    /// # Example
    /// ```
    /// use paramsync::ParamError;
    ///
    /// let err = ParamError::UnknownParameter { name: "x".into() };
    /// assert_eq!(err.as_label(), "param_unknown");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            ParamError::UnknownParameter { .. } => "param_unknown",
            ParamError::NotNumeric { .. } => "param_not_numeric",
            ParamError::TypeMismatch { .. } => "param_type_mismatch",
            ParamError::InvalidInitial { .. } => "param_invalid_initial",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            ParamError::UnknownParameter { name } => format!("unknown: {name}"),
            ParamError::NotNumeric { name } => format!("not numeric: {name}"),
            ParamError::TypeMismatch {
                name,
                expected,
                found,
            } => format!("type mismatch: {name} ({expected} != {found})"),
            ParamError::InvalidInitial { reason } => format!("invalid initial: {reason}"),
        }
    }
}

/// # Errors raised when a save request yields no HTTP reply.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum TransportError {
    /// The update endpoint could not be resolved against the base URL.
    #[error("invalid update url {url:?}: {reason}")]
    InvalidUrl {
        /// The offending URL text.
        url: String,
        /// Parser message.
        reason: String,
    },

    /// The HTTP client could not be constructed.
    #[error("http client setup failed: {0}")]
    Build(#[source] reqwest::Error),

    /// Network-level failure: connection, protocol, or body read.
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Failure reported by a non-HTTP transport.
    #[error("transport unavailable: {reason}")]
    Unavailable {
        /// What went wrong.
        reason: String,
    },
}

impl TransportError {
    /// Returns a short stable label (snake_case) for use in logs.
    pub fn as_label(&self) -> &'static str {
        match self {
            TransportError::InvalidUrl { .. } => "transport_invalid_url",
            TransportError::Build(_) => "transport_build",
            TransportError::Request(_) => "transport_request",
            TransportError::Unavailable { .. } => "transport_unavailable",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            TransportError::InvalidUrl { url, reason } => format!("bad url {url}: {reason}"),
            TransportError::Build(e) => format!("client: {e}"),
            TransportError::Request(e) => format!("network error: {e}"),
            TransportError::Unavailable { reason } => format!("unavailable: {reason}"),
        }
    }
}

/// # Errors raised while assembling a [`Model`](crate::Model).
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum ModelError {
    /// The default HTTP transport could not be created.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The initial parameters were rejected.
    #[error(transparent)]
    Params(#[from] ParamError),
}

impl ModelError {
    /// Returns a short stable label (snake_case) for use in logs.
    pub fn as_label(&self) -> &'static str {
        match self {
            ModelError::Transport(e) => e.as_label(),
            ModelError::Params(e) => e.as_label(),
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            ModelError::Transport(e) => e.as_message(),
            ModelError::Params(e) => e.as_message(),
        }
    }
}
