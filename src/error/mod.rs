//! Error types for climiq.
//!
//! Uses `thiserror` for structured error types that map to exit codes.
//!
//! Transport-level failures (DNS, timeouts, rate limits, non-2xx
//! statuses) are *not* errors: the client classifies them into a
//! [`CallOutcome`](crate::core::models::CallOutcome) and always returns
//! a well-formed result object. The variants here cover what remains:
//! configuration faults, mock-generation failures, and I/O around the
//! config file.

use thiserror::Error;

// =============================================================================
// Error Categories
// =============================================================================

/// High-level error categories for classification and routing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Configuration issues (parse errors, invalid values, bad provider names).
    Configuration,
    /// Network issues outside the classified request path (client construction).
    Network,
    /// Mock data generation issues.
    Mock,
    /// Internal errors (bugs, unexpected state, unclassified).
    Internal,
}

impl ErrorCategory {
    /// Returns a human-readable description of the category.
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::Configuration => "Configuration error",
            Self::Network => "Network error",
            Self::Mock => "Mock data error",
            Self::Internal => "Internal error",
        }
    }
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.description())
    }
}

// =============================================================================
// Exit Codes
// =============================================================================

/// Exit codes for the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    /// Success
    Success = 0,
    /// Unexpected failure
    GeneralError = 1,
    /// Config file parse/validation errors, unknown provider or mode
    ConfigError = 2,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code as i32
    }
}

/// Main error type for climiq operations.
#[derive(Error, Debug)]
pub enum ClimiqError {
    /// Generic configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// Error parsing the configuration file.
    #[error("config parse error at {path}: {message}")]
    ConfigParse { path: String, message: String },

    /// Invalid provider name.
    #[error("invalid provider: {0}")]
    InvalidProvider(String),

    /// Invalid fetch mode name.
    #[error("invalid fetch mode: {0} (expected live, mock, or hybrid)")]
    InvalidMode(String),

    /// HTTP client construction failed.
    #[error("failed to build HTTP client: {0}")]
    ClientBuild(String),

    /// Mock data generation failed for an endpoint.
    #[error("mock data generation failed for {endpoint}: {reason}")]
    MockData { endpoint: String, reason: String },

    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Catch-all for other errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ClimiqError {
    /// Map error to CLI exit code.
    #[must_use]
    pub const fn exit_code(&self) -> ExitCode {
        match self {
            Self::Config(_)
            | Self::ConfigParse { .. }
            | Self::InvalidProvider(_)
            | Self::InvalidMode(_) => ExitCode::ConfigError,

            Self::ClientBuild(_)
            | Self::MockData { .. }
            | Self::Io(_)
            | Self::Json(_)
            | Self::Other(_) => ExitCode::GeneralError,
        }
    }

    /// Returns the error category for classification and routing.
    #[must_use]
    pub const fn category(&self) -> ErrorCategory {
        match self {
            Self::Config(_)
            | Self::ConfigParse { .. }
            | Self::InvalidProvider(_)
            | Self::InvalidMode(_) => ErrorCategory::Configuration,

            Self::ClientBuild(_) => ErrorCategory::Network,

            Self::MockData { .. } => ErrorCategory::Mock,

            Self::Io(_) | Self::Json(_) | Self::Other(_) => ErrorCategory::Internal,
        }
    }
}

/// Result type alias for climiq operations.
pub type Result<T> = std::result::Result<T, ClimiqError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configuration_errors_map_to_config_exit_code() {
        assert_eq!(
            ClimiqError::Config("bad".to_string()).exit_code(),
            ExitCode::ConfigError
        );
        assert_eq!(
            ClimiqError::InvalidProvider("nope".to_string()).exit_code(),
            ExitCode::ConfigError
        );
        assert_eq!(
            ClimiqError::InvalidMode("sometimes".to_string()).exit_code(),
            ExitCode::ConfigError
        );
    }

    #[test]
    fn other_errors_map_to_general_exit_code() {
        assert_eq!(
            ClimiqError::MockData {
                endpoint: "sectors".to_string(),
                reason: "bad params".to_string(),
            }
            .exit_code(),
            ExitCode::GeneralError
        );
        assert_eq!(
            ClimiqError::ClientBuild("tls".to_string()).exit_code(),
            ExitCode::GeneralError
        );
    }

    #[test]
    fn categories_are_assigned() {
        assert_eq!(
            ClimiqError::ConfigParse {
                path: "config.toml".to_string(),
                message: "syntax".to_string(),
            }
            .category(),
            ErrorCategory::Configuration
        );
        assert_eq!(
            ClimiqError::MockData {
                endpoint: "weather".to_string(),
                reason: "missing location".to_string(),
            }
            .category(),
            ErrorCategory::Mock
        );
        assert_eq!(
            ClimiqError::Other(anyhow::anyhow!("boom")).category(),
            ErrorCategory::Internal
        );
    }

    #[test]
    fn error_messages_include_context() {
        let err = ClimiqError::MockData {
            endpoint: "country_emissions".to_string(),
            reason: "since > to".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("country_emissions"));
        assert!(msg.contains("since > to"));
    }

    #[test]
    fn exit_code_conversion() {
        assert_eq!(i32::from(ExitCode::Success), 0);
        assert_eq!(i32::from(ExitCode::GeneralError), 1);
        assert_eq!(i32::from(ExitCode::ConfigError), 2);
    }
}
