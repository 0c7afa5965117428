//! Operation result types
//!
//! Every network-backed operation returns an [`OperationResult`]: the HTTP
//! status (when a response was received) and either the operation's value or
//! an [`OperationError`] tagged with an [`ErrorKind`].

use crate::error::Error;
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// Failure categories shared by all operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// 404 on a single page request
    NotFound,
    /// Any other 4xx
    Client,
    /// 5xx
    Server,
    /// The host could not be reached or did not answer in time
    Connectivity,
    /// Any other transport failure or unexpected status
    Request,
    /// No security token could be obtained
    Authentication,
    /// The response body did not have the expected shape
    Decode,
}

impl ErrorKind {
    /// Stable lowercase name
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::NotFound => "not_found",
            ErrorKind::Client => "client",
            ErrorKind::Server => "server",
            ErrorKind::Connectivity => "connectivity",
            ErrorKind::Request => "request",
            ErrorKind::Authentication => "authentication",
            ErrorKind::Decode => "decode",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A failed operation: what kind of failure, and a message fit for end users
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[error("{message}")]
pub struct OperationError {
    pub kind: ErrorKind,
    pub message: String,
}

impl OperationError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn decode(detail: impl fmt::Display) -> Self {
        Self::new(
            ErrorKind::Decode,
            format!("{} {detail}", super::normalize::DECODE_PREFIX),
        )
    }
}

/// Uniform outcome of a network-backed operation
#[derive(Debug, Clone, PartialEq)]
pub struct OperationResult<T> {
    /// HTTP status of the response that decided the outcome, if any
    pub status_code: Option<u16>,
    pub outcome: Result<T, OperationError>,
}

impl<T> OperationResult<T> {
    /// Successful outcome
    pub fn success(status: u16, value: T) -> Self {
        Self {
            status_code: Some(status),
            outcome: Ok(value),
        }
    }

    /// Failed outcome
    pub fn failure(status_code: Option<u16>, error: OperationError) -> Self {
        Self {
            status_code,
            outcome: Err(error),
        }
    }

    pub fn is_error(&self) -> bool {
        self.outcome.is_err()
    }

    pub fn value(&self) -> Option<&T> {
        self.outcome.as_ref().ok()
    }

    pub fn error(&self) -> Option<&OperationError> {
        self.outcome.as_ref().err()
    }

    pub fn error_kind(&self) -> Option<ErrorKind> {
        self.error().map(|e| e.kind)
    }

    /// Error message, if the operation failed
    pub fn message(&self) -> Option<&str> {
        self.error().map(|e| e.message.as_str())
    }

    /// Transform the success value, keeping the status
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> OperationResult<U> {
        OperationResult {
            status_code: self.status_code,
            outcome: self.outcome.map(f),
        }
    }

    /// Chain a fallible step on the success value, keeping the status
    pub fn and_then<U>(
        self,
        f: impl FnOnce(T) -> Result<U, OperationError>,
    ) -> OperationResult<U> {
        OperationResult {
            status_code: self.status_code,
            outcome: self.outcome.and_then(f),
        }
    }

    /// Re-wrap a failure under another value type
    ///
    /// Returns `Err(value)` when the result was a success.
    pub fn into_failure<U>(self) -> Result<OperationResult<U>, T> {
        match self.outcome {
            Ok(value) => Err(value),
            Err(error) => Ok(OperationResult::failure(self.status_code, error)),
        }
    }

    /// Convert into the crate's `Result` for callers that prefer `?`
    pub fn into_result(self) -> crate::error::Result<T> {
        let status_code = self.status_code;
        self.outcome.map_err(|e| Error::Operation {
            kind: e.kind,
            status_code,
            message: e.message,
        })
    }
}

/// Serializes to the `{ code, response, error }` envelope
impl<T: Serialize> Serialize for OperationResult<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("OperationResult", 3)?;
        state.serialize_field("code", &self.status_code)?;
        match &self.outcome {
            Ok(value) => {
                state.serialize_field("response", value)?;
                state.serialize_field("error", &false)?;
            }
            Err(error) => {
                state.serialize_field("response", &error.message)?;
                state.serialize_field("error", &true)?;
            }
        }
        state.end()
    }
}
