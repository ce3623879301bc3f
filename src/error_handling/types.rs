//! Error type definitions.
//!
//! This module defines all error types used throughout the client.

use log::SetLoggerError;
use serde::{Serialize, Serializer};
use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error loading or parsing a zone/server table.
    #[error("Server table error: {0}")]
    ServerTableError(String),
}

/// Failure of a single WHOIS query or lookup.
///
/// There is no retry at any layer: each of these is the terminal result of the
/// attempt that produced it.
#[derive(Error, Debug)]
pub enum WhoisError {
    /// The server name did not resolve, or the server refused the connection.
    #[error("Unknown WHOIS server {server}: {reason}")]
    ServerNotFound {
        /// Server that could not be reached
        server: String,
        /// Resolver or connect failure description
        reason: String,
    },

    /// No complete response within the query timeout.
    #[error("WHOIS query to {server} timed out after {timeout:?}")]
    QueryTimeout {
        /// Server that did not answer in time
        server: String,
        /// Timeout that elapsed
        timeout: std::time::Duration,
    },

    /// The server signalled throttling in its response.
    #[error("Rate limited by {server}")]
    RateLimited {
        /// Server that throttled the query
        server: String,
    },

    /// The domain name failed normalization.
    #[error("Invalid domain: {0}")]
    InvalidDomain(String),

    /// Any other I/O failure while talking to a server.
    #[error("WHOIS query to {server} failed: {source}")]
    Io {
        /// Server being queried
        server: String,
        /// Underlying socket error
        #[source]
        source: std::io::Error,
    },

    /// The lookup task ended without producing a result (e.g. it panicked).
    #[error("Lookup task failed: {0}")]
    TaskFailed(String),
}

impl WhoisError {
    /// Flat classification used for statistics and error outcomes.
    pub fn error_type(&self) -> ErrorType {
        match self {
            WhoisError::ServerNotFound { .. } => ErrorType::ServerNotFound,
            WhoisError::QueryTimeout { .. } => ErrorType::QueryTimeout,
            WhoisError::RateLimited { .. } => ErrorType::RateLimited,
            WhoisError::InvalidDomain(_) => ErrorType::InvalidDomain,
            WhoisError::Io { .. } => ErrorType::Transport,
            WhoisError::TaskFailed(_) => ErrorType::TaskFailed,
        }
    }
}

/// Categories of lookup failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum ErrorType {
    ServerNotFound,
    QueryTimeout,
    RateLimited,
    InvalidDomain,
    Transport,
    TaskFailed,
}

impl std::fmt::Display for ErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ErrorType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl ErrorType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorType::ServerNotFound => "server_not_found",
            ErrorType::QueryTimeout => "query_timeout",
            ErrorType::RateLimited => "rate_limited",
            ErrorType::InvalidDomain => "invalid_domain",
            ErrorType::Transport => "transport_error",
            ErrorType::TaskFailed => "task_failed",
        }
    }
}
