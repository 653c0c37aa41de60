use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::oracle::{Reachability, VerificationOutcome};
use crate::patterns::CandidateAddress;

/// Confidence bucket of a kept result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceTier {
    High,
    Medium,
    Low,
}

impl ConfidenceTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConfidenceTier::High => "high",
            ConfidenceTier::Medium => "medium",
            ConfidenceTier::Low => "low",
        }
    }
}

impl fmt::Display for ConfidenceTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A verified address that survived filtering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct RankedResult {
    pub email: String,
    pub pattern_tag: String,
    pub reachability: Reachability,
    pub syntax_valid: bool,
    pub deliverable: bool,
    pub confidence_tier: ConfidenceTier,
}

/// Whether an outcome is worth reporting at all.
pub fn is_kept(outcome: &VerificationOutcome) -> bool {
    match outcome.reachability {
        Reachability::Safe => true,
        Reachability::Risky => outcome.deliverable,
        Reachability::Invalid | Reachability::Unknown => false,
    }
}

/// Tier for a kept outcome.
pub fn tier_for(outcome: &VerificationOutcome) -> ConfidenceTier {
    match (outcome.reachability, outcome.deliverable) {
        (Reachability::Safe, true) => ConfidenceTier::High,
        (Reachability::Risky, true) => ConfidenceTier::Medium,
        _ => ConfidenceTier::Low,
    }
}

/// Filter index-aligned outcomes and order them high, medium, low. Order
/// within a tier follows candidate order.
pub fn rank(candidates: &[CandidateAddress], outcomes: &[VerificationOutcome]) -> Vec<RankedResult> {
    let mut high = Vec::new();
    let mut medium = Vec::new();
    let mut low = Vec::new();

    for (candidate, outcome) in candidates.iter().zip(outcomes) {
        if !is_kept(outcome) {
            continue;
        }
        let tier = tier_for(outcome);
        let result = RankedResult {
            email: candidate.email.clone(),
            pattern_tag: candidate.pattern_tag.clone(),
            reachability: outcome.reachability,
            syntax_valid: outcome.syntax_valid,
            deliverable: outcome.deliverable,
            confidence_tier: tier,
        };
        match tier {
            ConfidenceTier::High => high.push(result),
            ConfidenceTier::Medium => medium.push(result),
            ConfidenceTier::Low => low.push(result),
        }
    }

    high.extend(medium);
    high.extend(low);
    high
}
