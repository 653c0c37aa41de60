//! Single-address verification oracles.
//!
//! An oracle answers "is this mailbox reachable?" for one address. Two
//! interchangeable transports are provided:
//!   * [`HttpOracle`]: POST to a check-if-email-exists style HTTP API
//!   * [`CliOracle`]: run a local verifier binary with the address as its argument
//!
//! Both decode the same reply shape (a single object, or a one-element array
//! holding it) and enforce their own per-call deadline. A deadline hit or an
//! undecodable reply yields an `unknown` outcome; only a call that could not be
//! dispatched at all is an `Err`.

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

use crate::errors::{EmailFinderError, Result};

pub mod cli;
pub mod http;

pub use cli::CliOracle;
pub use http::HttpOracle;

/// Reachability verdict reported by the oracle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Reachability {
    Safe,
    Risky,
    Invalid,
    Unknown,
}

impl Reachability {
    pub fn as_str(&self) -> &'static str {
        match self {
            Reachability::Safe => "safe",
            Reachability::Risky => "risky",
            Reachability::Invalid => "invalid",
            Reachability::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Reachability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Verdict for one candidate address.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerificationOutcome {
    pub email: String,
    pub reachability: Reachability,
    pub syntax_valid: bool,
    pub deliverable: bool,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub detail: Map<String, Value>,
}

impl VerificationOutcome {
    /// Terminal "could not tell" outcome.
    pub fn unknown(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            reachability: Reachability::Unknown,
            syntax_valid: false,
            deliverable: false,
            detail: Map::new(),
        }
    }
}

/// A verification capability for single addresses.
#[async_trait]
pub trait VerificationOracle: Send + Sync {
    /// Short transport name used in logs and errors ("http", "cli").
    fn transport(&self) -> &'static str;

    /// Verify one address. Timeouts and undecodable replies come back as
    /// `Ok(unknown)`; `Err` means the call could not be made.
    async fn verify(&self, email: &str) -> Result<VerificationOutcome>;
}

#[derive(Debug, Default, Deserialize)]
struct SmtpSection {
    #[serde(default)]
    is_deliverable: bool,
}

#[derive(Debug, Default, Deserialize)]
struct SyntaxSection {
    #[serde(default)]
    is_valid_syntax: bool,
}

#[derive(Debug, Default, Deserialize)]
struct MxSection {
    #[serde(default)]
    accepts_mail: bool,
}

/// Reply body of the verification service.
#[derive(Debug, Deserialize)]
pub(crate) struct OracleReply {
    #[serde(default)]
    input: Option<String>,
    is_reachable: Reachability,
    #[serde(default)]
    smtp: SmtpSection,
    #[serde(default)]
    syntax: SyntaxSection,
    #[serde(default)]
    mx: MxSection,
}

impl OracleReply {
    /// Outcome for the address that was asked about.
    pub(crate) fn into_outcome(self, email: &str) -> VerificationOutcome {
        let mut detail = Map::new();
        detail.insert(
            "syntax_valid".into(),
            Value::Bool(self.syntax.is_valid_syntax),
        );
        detail.insert("mx_accepts".into(), Value::Bool(self.mx.accepts_mail));
        if let Some(input) = self.input
            && input != email
        {
            detail.insert("input".into(), Value::String(input));
        }

        VerificationOutcome {
            email: email.to_string(),
            reachability: self.is_reachable,
            syntax_valid: self.syntax.is_valid_syntax && self.mx.accepts_mail,
            deliverable: self.smtp.is_deliverable,
            detail,
        }
    }
}

/// Decode a reply body: object shape first, then a non-empty array of it.
pub(crate) fn decode_payload(transport: &str, email: &str, body: &[u8]) -> Result<OracleReply> {
    let object_err = match serde_json::from_slice::<OracleReply>(body) {
        Ok(reply) => return Ok(reply),
        Err(e) => e,
    };

    match serde_json::from_slice::<Vec<OracleReply>>(body) {
        Ok(replies) => replies.into_iter().next().ok_or_else(|| {
            EmailFinderError::oracle_payload(transport, email, "empty response array")
        }),
        Err(_) => Err(EmailFinderError::oracle_payload(
            transport,
            email,
            object_err.to_string(),
        )),
    }
}
