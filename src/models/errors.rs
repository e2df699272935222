//! Centralized Error Handling Module
//!
//! Every failure carries a unique error code so that log lines and the
//! rendered error view can be correlated.
//!
//! Error codes follow pattern: CATEGORY_SPECIFIC_ERROR
//! - VALIDATION_xxx: local input errors, never sent over the network
//! - REQUEST_xxx: the analysis service answered with a non-2xx status
//! - TRANSPORT_xxx / RESPONSE_xxx: network failure or unparsable body
//! - CONFIG_xxx: configuration errors

use std::fmt;

/// Generic message shown for transport and parse failures
pub const GENERIC_FAILURE_MESSAGE: &str = "Analysis failed";

/// Application-wide error type
#[derive(Debug)]
pub struct AppError {
    /// Unique error code for logging/monitoring
    pub code: ErrorCode,
    /// Human-readable message (shown to the user as-is)
    pub message: String,
    /// Optional underlying error
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new AppError
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            source: None,
        }
    }

    /// Create AppError with source error
    pub fn with_source(
        code: ErrorCode,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            code,
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Get error code as string (for logging)
    pub fn code_str(&self) -> &'static str {
        self.code.as_str()
    }

    /// Message to surface in the error view
    pub fn user_message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code.as_str(), self.message)
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Error taxonomy buckets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Request,
    Transport,
    Config,
}

/// Unique error codes for monitoring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    // ============================================
    // Validation Errors
    // ============================================
    /// Address input was empty
    ValidationEmptyAddress,
    /// Address input is not 0x + 40 hex chars
    ValidationMalformedAddress,

    // ============================================
    // Request Errors (non-2xx from analysis service)
    // ============================================
    /// Service rejected the request
    RequestRejected,
    /// Service rate limited the request (HTTP 429)
    RequestRateLimited,

    // ============================================
    // Transport Errors
    // ============================================
    /// Connection failed / network error
    TransportFailed,
    /// Request timed out
    TransportTimeout,
    /// Response body could not be parsed
    ResponseInvalid,

    // ============================================
    // Configuration Errors
    // ============================================
    /// Invalid configuration value
    ConfigInvalidValue,
    /// Chain id not in the supported set
    ConfigUnsupportedChain,
}

impl ErrorCode {
    /// Get string representation of error code
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ValidationEmptyAddress => "VALIDATION_EMPTY_ADDRESS",
            Self::ValidationMalformedAddress => "VALIDATION_MALFORMED_ADDRESS",

            Self::RequestRejected => "REQUEST_REJECTED",
            Self::RequestRateLimited => "REQUEST_RATE_LIMITED",

            Self::TransportFailed => "TRANSPORT_FAILED",
            Self::TransportTimeout => "TRANSPORT_TIMEOUT",
            Self::ResponseInvalid => "RESPONSE_INVALID",

            Self::ConfigInvalidValue => "CONFIG_INVALID_VALUE",
            Self::ConfigUnsupportedChain => "CONFIG_UNSUPPORTED_CHAIN",
        }
    }

    /// Taxonomy bucket of this code
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ValidationEmptyAddress | Self::ValidationMalformedAddress => {
                ErrorCategory::Validation
            }
            Self::RequestRejected | Self::RequestRateLimited => ErrorCategory::Request,
            Self::ConfigInvalidValue | Self::ConfigUnsupportedChain => ErrorCategory::Config,
            Self::TransportFailed | Self::TransportTimeout | Self::ResponseInvalid => {
                ErrorCategory::Transport
            }
        }
    }
}

// ============================================
// Convenience constructors
// ============================================

impl AppError {
    /// Non-2xx answer from the analysis service
    pub fn request_rejected(status: u16, msg: impl Into<String>) -> Self {
        let code = if status == 429 {
            ErrorCode::RequestRateLimited
        } else {
            ErrorCode::RequestRejected
        };
        Self::new(code, msg)
    }

    /// Unsupported chain
    pub fn unsupported_chain(chain: &str) -> Self {
        Self::new(
            ErrorCode::ConfigUnsupportedChain,
            format!("Unsupported chain: {}", chain),
        )
    }

    /// Invalid configuration value
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigInvalidValue, msg)
    }
}

/// Local address validation failure. Surfaced inline next to the input;
/// never changes the lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    EmptyAddress,
    MalformedAddress,
}

impl ValidationError {
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::EmptyAddress => ErrorCode::ValidationEmptyAddress,
            Self::MalformedAddress => ErrorCode::ValidationMalformedAddress,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Self::EmptyAddress => "Enter a token contract address",
            Self::MalformedAddress => {
                "Invalid address: must be 0x followed by 40 hex characters"
            }
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl std::error::Error for ValidationError {}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        Self::new(err.code(), err.message())
    }
}

// ============================================
// Result type alias
// ============================================

/// Application Result type
pub type AppResult<T> = Result<T, AppError>;

// ============================================
// Conversion from common error types
// ============================================

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::with_source(ErrorCode::TransportTimeout, GENERIC_FAILURE_MESSAGE, err)
        } else if err.is_decode() {
            Self::with_source(ErrorCode::ResponseInvalid, GENERIC_FAILURE_MESSAGE, err)
        } else {
            Self::with_source(ErrorCode::TransportFailed, GENERIC_FAILURE_MESSAGE, err)
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::with_source(ErrorCode::ResponseInvalid, GENERIC_FAILURE_MESSAGE, err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let err = AppError::request_rejected(400, "bad token");
        assert_eq!(err.code, ErrorCode::RequestRejected);
        assert_eq!(err.code_str(), "REQUEST_REJECTED");
        assert_eq!(err.user_message(), "bad token");
        assert_eq!(err.to_string(), "[REQUEST_REJECTED] bad token");
    }

    #[test]
    fn test_rate_limit_code() {
        let err = AppError::request_rejected(429, "rate limited");
        assert_eq!(err.code, ErrorCode::RequestRateLimited);
        assert_eq!(err.code.category(), ErrorCategory::Request);
    }

    #[test]
    fn test_categories() {
        assert_eq!(
            ErrorCode::ValidationMalformedAddress.category(),
            ErrorCategory::Validation
        );
        assert_eq!(ErrorCode::ResponseInvalid.category(), ErrorCategory::Transport);
        assert_eq!(ErrorCode::TransportTimeout.category(), ErrorCategory::Transport);
        assert_eq!(ErrorCode::ConfigUnsupportedChain.category(), ErrorCategory::Config);
    }

    #[test]
    fn test_code_strings_unique() {
        let codes = [
            ErrorCode::ValidationEmptyAddress,
            ErrorCode::ValidationMalformedAddress,
            ErrorCode::RequestRejected,
            ErrorCode::RequestRateLimited,
            ErrorCode::TransportFailed,
            ErrorCode::TransportTimeout,
            ErrorCode::ResponseInvalid,
            ErrorCode::ConfigInvalidValue,
            ErrorCode::ConfigUnsupportedChain,
        ];
        let mut seen: Vec<&str> = codes.iter().map(|c| c.as_str()).collect();
        seen.sort_unstable();
        seen.dedup();
        assert_eq!(seen.len(), codes.len());
    }

    #[test]
    fn test_validation_error_conversion() {
        let err: AppError = ValidationError::EmptyAddress.into();
        assert_eq!(err.code, ErrorCode::ValidationEmptyAddress);
        assert_eq!(err.user_message(), "Enter a token contract address");
    }

    #[test]
    fn test_json_error_conversion() {
        let parse_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: AppError = parse_err.into();
        assert_eq!(err.code, ErrorCode::ResponseInvalid);
        assert_eq!(err.user_message(), GENERIC_FAILURE_MESSAGE);
        assert!(std::error::Error::source(&err).is_some());
    }
}
