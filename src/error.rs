//! Error types for the Scale API client.
//!
//! Every fallible operation in this crate returns [`Result`], whose error
//! side classifies the failure into one of three kinds:
//!
//! - [`Error::Validation`]: the request was rejected locally, before any
//!   network traffic (unknown field for the task type, unknown type tag,
//!   illegal listing filter).
//! - [`Error::Service`]: the remote call failed — either at the transport
//!   level or with a non-200 status. Carries the server's `error` message
//!   and the HTTP status when available.
//! - [`Error::MalformedResponse`]: the server answered 200 but the body was
//!   not the JSON object it promised.

use thiserror::Error;

/// Result type alias using the crate's [`Error`] type.
pub type Result<T> = std::result::Result<T, Error>;

/// Classified outcome of a failed client operation.
#[derive(Debug, Error)]
pub enum Error {
    /// Local validation failure; the request never reached the network.
    #[error("invalid request: {message}")]
    Validation {
        /// What was rejected and why.
        message: String,
    },

    /// Remote call failure: transport error or non-200 status.
    #[error("service error{}: {message}", fmt_status(.status))]
    Service {
        /// Server-provided `error` message, or a transport description.
        message: String,
        /// HTTP status code, when a response was received at all.
        status: Option<u16>,
    },

    /// 200 response whose body could not be decoded as JSON.
    #[error("malformed response: {message}")]
    MalformedResponse {
        /// Decode failure description.
        message: String,
    },
}

fn fmt_status(status: &Option<u16>) -> String {
    match status {
        Some(code) => format!(" ({code})"),
        None => String::new(),
    }
}

impl Error {
    /// Create a local validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a service error with an optional HTTP status code.
    pub fn service(message: impl Into<String>, status: Option<u16>) -> Self {
        Self::Service {
            message: message.into(),
            status,
        }
    }

    /// Create a malformed-response error.
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedResponse {
            message: message.into(),
        }
    }

    /// HTTP status code attached to this error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Service { status, .. } => *status,
            _ => None,
        }
    }

    /// Whether this error was raised locally, before any network call.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }

    /// Whether this error came from the remote service or transport.
    ///
    /// Malformed success bodies count as service failures too: the server
    /// broke its contract, the client did nothing wrong.
    pub fn is_service(&self) -> bool {
        matches!(self, Self::Service { .. } | Self::MalformedResponse { .. })
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Self::Service {
            message: err.to_string(),
            status: err.status().map(|s| s.as_u16()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_status_when_present() {
        let err = Error::service("no such task", Some(404));
        assert_eq!(err.to_string(), "service error (404): no such task");
        assert_eq!(err.status(), Some(404));
    }

    #[test]
    fn display_omits_status_when_absent() {
        let err = Error::service("connection reset", None);
        assert_eq!(err.to_string(), "service error: connection reset");
        assert_eq!(err.status(), None);
    }

    #[test]
    fn classification_predicates() {
        assert!(Error::validation("bad key").is_validation());
        assert!(!Error::validation("bad key").is_service());
        assert!(Error::service("boom", None).is_service());
        assert!(Error::malformed("not json").is_service());
        assert_eq!(Error::validation("bad key").status(), None);
    }
}
