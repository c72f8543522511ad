//! Error types used throughout the client
//!
//! Low-level failures are classified as [`ErrorKind::Transport`],
//! [`ErrorKind::Protocol`] or [`ErrorKind::Remote`]. The facade wraps them in
//! [`ResponsysError::Operation`] so callers learn which business operation
//! failed while the original cause stays reachable through
//! [`std::error::Error::source`].

use std::fmt;

use thiserror::Error;

/// Business operations exposed by the facade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Insert or update a contact in the contacts list.
    MergeContact,
    /// Trigger a custom event for a contact.
    TriggerCustomEvent,
}

impl Operation {
    /// Message surfaced to callers when the operation fails.
    pub fn failure_message(self) -> &'static str {
        match self {
            Self::MergeContact => "Unable to add member details to contacts list",
            Self::TriggerCustomEvent => "Unable to trigger custom event",
        }
    }

    /// Stable label for logs.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::MergeContact => "merge_contact",
            Self::TriggerCustomEvent => "trigger_custom_event",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classification of a failure, independent of wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Network or timeout failure before any response was received.
    Transport,
    /// A response arrived but was not valid JSON.
    Protocol,
    /// The API answered with an explicit `errorCode`.
    Remote,
    /// No authentication token could be obtained.
    Initialization,
    /// Caller-supplied input was rejected before sending anything.
    InvalidInput,
    /// Missing or malformed configuration.
    Config,
}

/// Main error type for the Responsys client
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ResponsysError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("{0}")]
    Protocol(String),

    /// Displays the upstream `detail` text verbatim.
    #[error("{detail}")]
    Remote { code: String, detail: String },

    #[error("{message}")]
    Initialization {
        message: String,
        #[source]
        source: Option<Box<ResponsysError>>,
    },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{}", .operation.failure_message())]
    Operation {
        operation: Operation,
        #[source]
        source: Box<ResponsysError>,
    },
}

impl ResponsysError {
    /// Wrap `self` as the cause of a failed business operation.
    pub fn within(self, operation: Operation) -> Self {
        Self::Operation { operation, source: Box::new(self) }
    }

    /// Fatal initialization error with an optional underlying cause.
    pub fn initialization(message: impl Into<String>, source: Option<Self>) -> Self {
        Self::Initialization { message: message.into(), source: source.map(Box::new) }
    }

    /// Innermost error, skipping operation and initialization wrappers.
    pub fn root_cause(&self) -> &Self {
        match self {
            Self::Operation { source, .. } => source.root_cause(),
            Self::Initialization { source: Some(source), .. } => source.root_cause(),
            other => other,
        }
    }

    /// Classification of the root cause.
    ///
    /// An `Initialization` error without a cause (e.g. the auth response had
    /// no token) is classified as `Initialization`.
    pub fn kind(&self) -> ErrorKind {
        match self.root_cause() {
            Self::Transport(_) => ErrorKind::Transport,
            Self::Protocol(_) => ErrorKind::Protocol,
            Self::Remote { .. } => ErrorKind::Remote,
            Self::Initialization { .. } => ErrorKind::Initialization,
            Self::InvalidInput(_) => ErrorKind::InvalidInput,
            Self::Config(_) => ErrorKind::Config,
            Self::Operation { source, .. } => source.kind(),
        }
    }

    /// Operation this error was scoped to, if any.
    pub fn operation(&self) -> Option<Operation> {
        match self {
            Self::Operation { operation, .. } => Some(*operation),
            _ => None,
        }
    }

    /// Upstream `detail` text for remote failures anywhere in the chain.
    pub fn remote_detail(&self) -> Option<&str> {
        match self.root_cause() {
            Self::Remote { detail, .. } => Some(detail),
            _ => None,
        }
    }
}

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ResponsysError>;
