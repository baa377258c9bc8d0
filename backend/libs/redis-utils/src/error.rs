//! Error types for address validation and connectivity probes

use std::time::Duration;
use thiserror::Error;

/// Reasons a candidate server address is rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddressError {
    /// Empty or whitespace-only input
    #[error("server_url can not be empty")]
    Empty,

    /// Input does not look like `host:port`
    #[error("address must be of form host:port")]
    Format,

    /// Syntactically valid but the port does not fit a TCP port
    #[error("port must be between 1 and 65535")]
    PortOutOfRange,
}

/// Errors raised while probing a Redis server
#[derive(Debug, Error)]
pub enum ProbeError {
    /// The address never reached the network
    #[error(transparent)]
    InvalidAddress(#[from] AddressError),

    /// Nothing is listening at the address
    #[error("connection refused by {address}: {message}")]
    ConnectionRefused { address: String, message: String },

    /// Connect or PING did not finish in time
    #[error("no reply from {address} within {timeout:?}")]
    Timeout { address: String, timeout: Duration },

    /// Any other client or I/O failure
    #[error("failed to probe {address}: {message}")]
    Unexpected { address: String, message: String },
}

/// Flat classification of [`ProbeError`] for callers that only branch on the kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeErrorKind {
    InvalidAddress,
    ConnectionRefused,
    Timeout,
    Unexpected,
}

impl ProbeErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProbeErrorKind::InvalidAddress => "invalid_address",
            ProbeErrorKind::ConnectionRefused => "connection_refused",
            ProbeErrorKind::Timeout => "timeout",
            ProbeErrorKind::Unexpected => "unexpected",
        }
    }
}

impl ProbeError {
    pub fn kind(&self) -> ProbeErrorKind {
        match self {
            ProbeError::InvalidAddress(_) => ProbeErrorKind::InvalidAddress,
            ProbeError::ConnectionRefused { .. } => ProbeErrorKind::ConnectionRefused,
            ProbeError::Timeout { .. } => ProbeErrorKind::Timeout,
            ProbeError::Unexpected { .. } => ProbeErrorKind::Unexpected,
        }
    }

    /// Classify a client error raised while talking to `address`
    pub(crate) fn from_redis(address: &str, timeout: Duration, err: redis::RedisError) -> Self {
        if err.is_connection_refusal() {
            ProbeError::ConnectionRefused {
                address: address.to_string(),
                message: err.to_string(),
            }
        } else if err.is_timeout() {
            ProbeError::Timeout {
                address: address.to_string(),
                timeout,
            }
        } else {
            ProbeError::Unexpected {
                address: address.to_string(),
                message: err.to_string(),
            }
        }
    }
}
