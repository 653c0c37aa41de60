//! Structured output module for JSON and YAML serialization.
//!
//! Wraps a [`FindEmailResponse`] with tool metadata, the request that produced
//! it, timing and a short summary. The response fields are flattened into the
//! root object so `found_emails`, `total_checked` and friends sit at the top
//! level of the document.

use anyhow::Result;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::facade::{FindEmailRequest, FindEmailResponse};
use crate::ranking::ConfidenceTier;
use crate::resolver::ResolutionMethod;

/// Root structure for all emailfinder output in structured formats
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub struct FinderOutput {
    /// Tool version and metadata
    pub metadata: OutputMetadata,

    /// The request that was processed
    pub input: FindEmailRequest,

    /// Ranked findings
    #[serde(flatten)]
    pub response: FindEmailResponse,

    /// Timing and tier breakdown
    pub statistics: SearchStatistics,

    /// Success status and hints
    pub result: ResultSummary,
}

/// Tool metadata and versioning information
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub struct OutputMetadata {
    /// Tool name
    pub tool_name: String,

    /// Tool version
    pub version: String,

    /// Timestamp when the search was performed
    pub generated_at: chrono::DateTime<chrono::Utc>,

    /// JSON schema version for this output format
    pub schema_version: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub struct SearchStatistics {
    /// Wall-clock time of the whole pipeline
    pub total_time_ms: u64,

    /// Results per confidence tier
    pub tiers: TierCounts,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct TierCounts {
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub struct ResultSummary {
    /// At least one address was found
    pub success: bool,

    /// First (most confident) address, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub best_match: Option<String>,

    /// Suggestions for improving a weak result
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub recommendations: Vec<String>,
}

impl FinderOutput {
    /// Assemble the document for one finished search.
    pub fn new(request: &FindEmailRequest, response: FindEmailResponse, total_time_ms: u64) -> Self {
        let mut tiers = TierCounts::default();
        for r in &response.found_emails {
            match r.confidence_tier {
                ConfidenceTier::High => tiers.high += 1,
                ConfidenceTier::Medium => tiers.medium += 1,
                ConfidenceTier::Low => tiers.low += 1,
            }
        }

        let result = ResultSummary {
            success: !response.found_emails.is_empty(),
            best_match: response.found_emails.first().map(|r| r.email.clone()),
            recommendations: recommendations_for(&response),
        };

        Self {
            metadata: OutputMetadata {
                tool_name: env!("CARGO_PKG_NAME").to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                generated_at: chrono::Utc::now(),
                schema_version: "1.0.0".to_string(),
            },
            input: request.clone(),
            response,
            statistics: SearchStatistics {
                total_time_ms,
                tiers,
            },
            result,
        }
    }

    /// Generate JSON schema for this output format
    pub fn generate_json_schema() -> Result<String> {
        let schema = schemars::schema_for!(FinderOutput);
        Ok(serde_json::to_string_pretty(&schema)?)
    }

    /// Serialize to JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Serialize to YAML
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }
}

/// Hints shown when the result is empty or rests on a guessed domain.
pub fn recommendations_for(response: &FindEmailResponse) -> Vec<String> {
    let mut out = Vec::new();
    if !response.domain_resolved {
        out.push("Organization could not be resolved; pass its domain directly".to_string());
        return out;
    }
    if response.resolution_method == ResolutionMethod::Pattern {
        out.push(format!(
            "Domain {} was guessed without DNS confirmation; add --company NAME=DOMAIN if it is wrong",
            response.domain
        ));
    }
    if response.total_checked > 0 && response.found_emails.is_empty() {
        out.push("No candidate was confirmed; the domain may reject verification probes".to_string());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oracle::Reachability;
    use crate::ranking::RankedResult;

    fn response() -> FindEmailResponse {
        FindEmailResponse {
            found_emails: vec![
                RankedResult {
                    email: "john.doe@acme.com".into(),
                    pattern_tag: "firstname.lastname".into(),
                    reachability: Reachability::Safe,
                    syntax_valid: true,
                    deliverable: true,
                    confidence_tier: ConfidenceTier::High,
                },
                RankedResult {
                    email: "jdoe@acme.com".into(),
                    pattern_tag: "flastname".into(),
                    reachability: Reachability::Safe,
                    syntax_valid: true,
                    deliverable: false,
                    confidence_tier: ConfidenceTier::Low,
                },
            ],
            total_checked: 173,
            total_found: 2,
            domain: "acme.com".into(),
            domain_resolved: true,
            resolution_method: ResolutionMethod::DnsVerified,
        }
    }

    #[test]
    fn test_json_shape() {
        let req = FindEmailRequest::new("John", "Doe", "Acme");
        let out = FinderOutput::new(&req, response(), 42);
        let value: serde_json::Value = serde_json::from_str(&out.to_json().unwrap()).unwrap();
        assert_eq!(value["total_checked"], 173);
        assert_eq!(value["resolution_method"], "dns_verified");
        assert_eq!(value["found_emails"][0]["confidence_tier"], "high");
        assert_eq!(value["found_emails"][0]["reachability"], "safe");
        assert_eq!(value["input"]["organization"], "Acme");
        assert_eq!(value["statistics"]["tiers"]["low"], 1);
        assert_eq!(value["result"]["best_match"], "john.doe@acme.com");
        assert_eq!(value["metadata"]["tool_name"], "emailfinder");
    }

    #[test]
    fn test_yaml_output() {
        let req = FindEmailRequest::new("John", "Doe", "Acme");
        let yaml = FinderOutput::new(&req, response(), 1).to_yaml().unwrap();
        assert!(yaml.contains("found_emails:"));
        assert!(yaml.contains("domain: acme.com"));
    }

    #[test]
    fn test_schema_mentions_fields() {
        let schema = FinderOutput::generate_json_schema().unwrap();
        assert!(schema.contains("found_emails"));
        assert!(schema.contains("confidence_tier"));
    }

    #[test]
    fn test_recommendations() {
        let mut r = response();
        assert!(recommendations_for(&r).is_empty());
        r.resolution_method = ResolutionMethod::Pattern;
        assert_eq!(recommendations_for(&r).len(), 1);
        r.found_emails.clear();
        assert_eq!(recommendations_for(&r).len(), 2);
        r.domain_resolved = false;
        assert_eq!(recommendations_for(&r).len(), 1);
    }
}
