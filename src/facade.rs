use std::sync::Arc;
use std::time::Instant;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::batch::BatchVerifier;
use crate::config::Config;
use crate::directory::CompanyDirectory;
use crate::errors::{EmailFinderError, Result};
use crate::oracle::{CliOracle, HttpOracle, VerificationOracle};
use crate::patterns;
use crate::ranking::{self, RankedResult};
use crate::resolver::{DomainResolver, ResolutionMethod, ResolverProbe};

pub const SERVICE_NAME: &str = "emailfinder";

/// Who to look for.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct FindEmailRequest {
    pub first_name: String,
    pub last_name: String,
    /// Organization name ("Acme Inc") or domain ("acme.com").
    pub organization: String,
}

impl FindEmailRequest {
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        organization: impl Into<String>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            organization: organization.into(),
        }
    }
}

/// Ranked findings for one request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct FindEmailResponse {
    pub found_emails: Vec<RankedResult>,
    /// Candidates sent to the verification oracle.
    pub total_checked: usize,
    pub total_found: usize,
    pub domain: String,
    pub domain_resolved: bool,
    pub resolution_method: ResolutionMethod,
}

/// Static liveness status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct HealthStatus {
    pub status: String,
    pub service: String,
}

/// Liveness probe; no side effects.
pub fn health() -> HealthStatus {
    HealthStatus {
        status: "healthy".to_string(),
        service: SERVICE_NAME.to_string(),
    }
}

/// High-level façade providing library-consumable entry points.
///
/// Wires domain resolution, candidate generation, batch verification and
/// ranking into one call. Nothing here prints; callers decide how to render
/// the returned [`FindEmailResponse`].
pub struct EmailFinder {
    resolver: DomainResolver,
    oracle: Arc<dyn VerificationOracle>,
    verifier: BatchVerifier,
    max_patterns: usize,
}

impl EmailFinder {
    pub fn new(
        resolver: DomainResolver,
        oracle: Arc<dyn VerificationOracle>,
        verifier: BatchVerifier,
        max_patterns: usize,
    ) -> Self {
        Self {
            resolver,
            oracle,
            verifier,
            max_patterns,
        }
    }

    /// Build the production pipeline: seeded directory, trust-dns probe and
    /// the configured oracle transport.
    pub fn from_config(config: &Config) -> Result<Self> {
        config.validate()?;

        let directory = Arc::new(CompanyDirectory::with_well_known());
        for (name, domain) in &config.finder.company_domains {
            directory.add_company_domain(name, domain);
        }
        let probe = Arc::new(ResolverProbe::new(config.network.dns_timeout));
        let resolver = DomainResolver::new(directory, probe);

        let oracle: Arc<dyn VerificationOracle> = match config.oracle.cli_path {
            Some(ref path) => Arc::new(CliOracle::new(path, config.oracle.cli_timeout)),
            None => Arc::new(HttpOracle::new(
                &config.oracle.api_url,
                &config.oracle.api_endpoint,
                config.oracle.http_timeout,
            )?),
        };
        debug!(transport = oracle.transport(), "verification oracle configured");

        Ok(Self::new(
            resolver,
            oracle,
            BatchVerifier::new(config.finder.concurrency),
            config.finder.max_patterns,
        ))
    }

    pub fn resolver(&self) -> &DomainResolver {
        &self.resolver
    }

    /// Register an extra organization → domain mapping.
    pub fn add_company_domain(&self, company: &str, domain: &str) {
        self.resolver.add_company_domain(company, domain);
    }

    /// Reject requests with an empty field. Whitespace-only values pass.
    pub fn validate(request: &FindEmailRequest) -> Result<()> {
        if request.first_name.is_empty() {
            return Err(EmailFinderError::missing_field("first_name"));
        }
        if request.last_name.is_empty() {
            return Err(EmailFinderError::missing_field("last_name"));
        }
        if request.organization.is_empty() {
            return Err(EmailFinderError::missing_field("organization"));
        }
        Ok(())
    }

    /// Run resolution → generation → verification → ranking for one person.
    pub async fn find_emails(&self, request: &FindEmailRequest) -> Result<FindEmailResponse> {
        Self::validate(request)?;
        let start = Instant::now();

        let resolution = self.resolver.resolve(&request.organization).await;
        if !resolution.resolved {
            info!(organization = %request.organization, "could not resolve organization domain");
            return Ok(FindEmailResponse {
                found_emails: Vec::new(),
                total_checked: 0,
                total_found: 0,
                domain: resolution.domain,
                domain_resolved: false,
                resolution_method: resolution.method,
            });
        }

        let mut candidates =
            patterns::generate(&request.first_name, &request.last_name, &resolution.domain);
        if self.max_patterns > 0 {
            candidates.truncate(self.max_patterns);
        }
        debug!(
            domain = %resolution.domain,
            method = %resolution.method,
            candidates = candidates.len(),
            "generated candidate addresses"
        );

        let outcomes = self
            .verifier
            .verify_all(&candidates, Arc::clone(&self.oracle))
            .await?;
        if outcomes.len() != candidates.len() {
            return Err(EmailFinderError::internal(format!(
                "verification returned {} outcome(s) for {} candidate(s)",
                outcomes.len(),
                candidates.len()
            )));
        }

        let found_emails = ranking::rank(&candidates, &outcomes);
        info!(
            domain = %resolution.domain,
            checked = candidates.len(),
            found = found_emails.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "email search finished"
        );

        Ok(FindEmailResponse {
            total_checked: candidates.len(),
            total_found: found_emails.len(),
            found_emails,
            domain: resolution.domain,
            domain_resolved: true,
            resolution_method: resolution.method,
        })
    }
}
