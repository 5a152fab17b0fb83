//! Shared error type across fbmetrics crates.

use thiserror::Error;

/// Stable error codes (used in logs).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Invalid input / malformed config.
    BadRequest,
    /// Unsupported config version.
    UnsupportedVersion,
    /// Instrument could not be registered.
    Registration,
    /// Exposition encoding failed.
    Encode,
    /// Internal error.
    Internal,
}

impl ErrorCode {
    /// String representation.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::BadRequest => "BAD_REQUEST",
            ErrorCode::UnsupportedVersion => "UNSUPPORTED_VERSION",
            ErrorCode::Registration => "REGISTRATION",
            ErrorCode::Encode => "ENCODE",
            ErrorCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, FbMetricsError>;

/// Unified error type used by core and server.
#[derive(Debug, Error)]
pub enum FbMetricsError {
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("unsupported config version")]
    UnsupportedVersion,
    #[error("metric registration failed: {0}")]
    Registration(String),
    #[error("metric encoding failed: {0}")]
    Encode(String),
    #[error("internal: {0}")]
    Internal(String),
}

impl FbMetricsError {
    /// Map the error to its stable code.
    pub fn error_code(&self) -> ErrorCode {
        match self {
            FbMetricsError::BadRequest(_) => ErrorCode::BadRequest,
            FbMetricsError::UnsupportedVersion => ErrorCode::UnsupportedVersion,
            FbMetricsError::Registration(_) => ErrorCode::Registration,
            FbMetricsError::Encode(_) => ErrorCode::Encode,
            FbMetricsError::Internal(_) => ErrorCode::Internal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_stable() {
        assert_eq!(
            FbMetricsError::UnsupportedVersion.error_code().as_str(),
            "UNSUPPORTED_VERSION"
        );
        assert_eq!(
            FbMetricsError::Registration("dup".into()).error_code().as_str(),
            "REGISTRATION"
        );
    }

    #[test]
    fn display_includes_detail() {
        let err = FbMetricsError::Registration(
            "duplicate metrics collector registration attempted".into(),
        );
        assert_eq!(
            err.to_string(),
            "metric registration failed: duplicate metrics collector registration attempted"
        );
    }
}
