//! Unified error handling.
//!
//! A `thiserror`-based model with:
//!   * Typed variants for the pipeline's failure domains
//!   * A categorization layer (`ErrorCategory`) for reporting and exit codes
//!   * Helper constructors
//!   * `From` conversions for common lower-level errors
//!
//! Usage:
//!   use emailfinder::errors::{Result, EmailFinderError};
//!
//!   fn do_something() -> Result<()> {
//!       Err(EmailFinderError::missing_field("organization"))
//!   }
//!
//! Categories are coarse on purpose:
//!   - Input: request / configuration validation issues
//!   - Network: oracle transport or DNS problems
//!   - Parse: payload decoding issues
//!   - Internal: logic bugs or unexpected states
//!
//! Per-candidate oracle timeouts and decode failures are NOT errors; they are
//! folded into `unknown` outcomes by the oracle implementations.

use thiserror::Error;

/// High-level classification for structured reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Network,
    Parse,
    Internal,
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ErrorCategory::Input => "input",
            ErrorCategory::Network => "network",
            ErrorCategory::Parse => "parse",
            ErrorCategory::Internal => "internal",
        };
        f.write_str(s)
    }
}

/// Primary application error type.
#[derive(Error, Debug)]
pub enum EmailFinderError {
    // ------------------------ Input / Validation ----------------------------
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    #[error("Invalid company mapping '{input}': expected NAME=DOMAIN")]
    InvalidCompanyMapping { input: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    // ---------------------------- Parsing -----------------------------------
    #[error("Could not decode {transport} oracle payload for {email}: {reason}")]
    OraclePayload {
        transport: String,
        email: String,
        reason: String,
    },

    // ----------------------------- Network ----------------------------------
    #[error("{transport} oracle could not verify {email}: {source}")]
    OracleTransport {
        transport: String,
        email: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Verification oracle unavailable: all {attempted} call(s) failed ({reason})")]
    OracleUnavailable { attempted: usize, reason: String },

    #[error("DNS query timed out after {millis}ms: {query}")]
    DnsTimeout { query: String, millis: u64 },

    #[error("DNS {record_type} lookup failed for {domain}: {reason}")]
    DnsResolution {
        domain: String,
        record_type: String,
        reason: String,
    },

    // ---------------------------- Internal ----------------------------------
    #[error("Internal error: {message}")]
    Internal {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl EmailFinderError {
    /// Categorize the error for structured output / exit codes.
    pub fn category(&self) -> ErrorCategory {
        use EmailFinderError::*;
        match self {
            MissingField { .. } | InvalidCompanyMapping { .. } | Configuration { .. } => {
                ErrorCategory::Input
            }

            OraclePayload { .. } => ErrorCategory::Parse,

            OracleTransport { .. }
            | OracleUnavailable { .. }
            | DnsTimeout { .. }
            | DnsResolution { .. } => ErrorCategory::Network,

            Internal { .. } => ErrorCategory::Internal,
        }
    }

    /// Whether this error should be reported as a rejected request.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            EmailFinderError::MissingField { .. } | EmailFinderError::InvalidCompanyMapping { .. }
        )
    }

    // ---------------------------- Constructors -----------------------------

    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.into(),
        }
    }

    pub fn invalid_company_mapping(input: impl Into<String>) -> Self {
        Self::InvalidCompanyMapping {
            input: input.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn oracle_payload(
        transport: impl Into<String>,
        email: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::OraclePayload {
            transport: transport.into(),
            email: email.into(),
            reason: reason.into(),
        }
    }

    pub fn oracle_transport(
        transport: impl Into<String>,
        email: impl Into<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self::OracleTransport {
            transport: transport.into(),
            email: email.into(),
            source: source.into(),
        }
    }

    pub fn oracle_unavailable(attempted: usize, reason: impl Into<String>) -> Self {
        Self::OracleUnavailable {
            attempted,
            reason: reason.into(),
        }
    }

    pub fn dns_timeout(query: impl Into<String>, millis: u64) -> Self {
        Self::DnsTimeout {
            query: query.into(),
            millis,
        }
    }

    pub fn dns_resolution(
        domain: impl Into<String>,
        record_type: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::DnsResolution {
            domain: domain.into(),
            record_type: record_type.into(),
            reason: reason.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
            source: None,
        }
    }

    pub fn internal_with(
        message: impl Into<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self::Internal {
            message: message.into(),
            source: Some(source.into()),
        }
    }
}

/// Public result alias.
pub type Result<T> = std::result::Result<T, EmailFinderError>;

impl From<tokio::task::JoinError> for EmailFinderError {
    fn from(e: tokio::task::JoinError) -> Self {
        EmailFinderError::internal_with("verification task did not complete", e)
    }
}

impl From<crate::config::ConfigError> for EmailFinderError {
    fn from(e: crate::config::ConfigError) -> Self {
        match e {
            crate::config::ConfigError::InvalidValue { ref field, value, .. }
                if field == "company" =>
            {
                EmailFinderError::InvalidCompanyMapping { input: value }
            }
            other => EmailFinderError::Configuration {
                message: other.to_string(),
            },
        }
    }
}
