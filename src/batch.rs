//! Bounded-concurrency verification of a candidate list.
//!
//! One task per candidate, admission gated by a semaphore. Outcomes are
//! written back by candidate index so the result lines up with the input no
//! matter which call finishes first. A failed call only affects its own
//! candidate, unless every call in the batch failed to dispatch.

use std::sync::Arc;

use tokio::sync::Semaphore;
use tracing::{debug, error, trace};

use crate::errors::{EmailFinderError, Result};
use crate::oracle::{VerificationOracle, VerificationOutcome};
use crate::patterns::CandidateAddress;

pub const DEFAULT_CONCURRENCY: usize = 10;

#[derive(Debug, Clone, Copy)]
pub struct BatchVerifier {
    concurrency: usize,
}

impl Default for BatchVerifier {
    fn default() -> Self {
        Self::new(DEFAULT_CONCURRENCY)
    }
}

impl BatchVerifier {
    /// Concurrency below 1 is raised to 1.
    pub fn new(concurrency: usize) -> Self {
        Self {
            concurrency: concurrency.max(1),
        }
    }

    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    /// Verify every candidate exactly once; the result is index-aligned with
    /// `candidates`.
    pub async fn verify_all(
        &self,
        candidates: &[CandidateAddress],
        oracle: Arc<dyn VerificationOracle>,
    ) -> Result<Vec<VerificationOutcome>> {
        if candidates.is_empty() {
            return Ok(Vec::new());
        }

        debug!(
            count = candidates.len(),
            concurrency = self.concurrency,
            transport = oracle.transport(),
            "verifying candidates"
        );

        let semaphore = Arc::new(Semaphore::new(self.concurrency));
        let mut handles = Vec::with_capacity(candidates.len());

        for candidate in candidates {
            let semaphore = Arc::clone(&semaphore);
            let oracle = Arc::clone(&oracle);
            let email = candidate.email.clone();
            handles.push(tokio::spawn(async move {
                let _permit = semaphore
                    .acquire_owned()
                    .await
                    .map_err(|e| EmailFinderError::internal_with("verification semaphore closed", e))?;
                trace!(email = %email, "verification slot acquired");
                oracle.verify(&email).await
            }));
        }

        let mut outcomes = Vec::with_capacity(handles.len());
        let mut failed = 0usize;
        let mut last_failure = String::new();

        for (candidate, handle) in candidates.iter().zip(handles) {
            let result = handle.await.map_err(EmailFinderError::from).and_then(|r| r);
            match result {
                Ok(outcome) => outcomes.push(outcome),
                Err(e) => {
                    error!(email = %candidate.email, error = %e, "failed to verify email");
                    failed += 1;
                    last_failure = e.to_string();
                    outcomes.push(VerificationOutcome::unknown(&candidate.email));
                }
            }
        }

        if failed == candidates.len() {
            return Err(EmailFinderError::oracle_unavailable(failed, last_failure));
        }

        debug!(count = outcomes.len(), failed, "verification batch finished");
        Ok(outcomes)
    }
}
