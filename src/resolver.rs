/*!
Organization → domain resolution.

Precedence chain, first hit wins:
1. the input already looks like a domain (`direct`)
2. the company directory has it (`company_map`)
3. a generated candidate domain answers DNS (`dns_verified`)
4. the first generated candidate (`pattern`)

DNS access sits behind [`DnsProbe`] so tests can run without a network. The
production probe wraps a trust-dns `TokioAsyncResolver` and checks MX, then
A/AAAA, then CNAME under a single deadline. Candidates are probed one at a
time.
*/

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tokio::time::timeout;
use tracing::{debug, info, trace};
use trust_dns_resolver::{
    TokioAsyncResolver,
    config::{ResolverConfig, ResolverOpts},
    proto::rr::RecordType,
};

use crate::directory::CompanyDirectory;
use crate::domain_utils::{candidate_domains, is_domain_like};
use crate::errors::{EmailFinderError, Result};

/// How a domain was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionMethod {
    Direct,
    CompanyMap,
    DnsVerified,
    Pattern,
    None,
}

impl ResolutionMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResolutionMethod::Direct => "direct",
            ResolutionMethod::CompanyMap => "company_map",
            ResolutionMethod::DnsVerified => "dns_verified",
            ResolutionMethod::Pattern => "pattern",
            ResolutionMethod::None => "none",
        }
    }
}

impl fmt::Display for ResolutionMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of resolving one organization string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct DomainResolution {
    pub domain: String,
    pub resolved: bool,
    pub method: ResolutionMethod,
    /// Generated candidates, set for `dns_verified` and `pattern`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub candidates: Vec<String>,
}

impl DomainResolution {
    fn unresolved() -> Self {
        Self {
            domain: String::new(),
            resolved: false,
            method: ResolutionMethod::None,
            candidates: Vec::new(),
        }
    }

    fn found(domain: impl Into<String>, method: ResolutionMethod) -> Self {
        Self {
            domain: domain.into(),
            resolved: true,
            method,
            candidates: Vec::new(),
        }
    }
}

/// DNS existence check for a domain.
#[async_trait]
pub trait DnsProbe: Send + Sync {
    /// True when the domain has MX, address or CNAME records.
    async fn has_records(&self, domain: &str) -> bool;
}

/// trust-dns backed probe using the system default upstreams.
pub struct ResolverProbe {
    resolver: TokioAsyncResolver,
    timeout: Duration,
}

impl ResolverProbe {
    pub fn new(timeout: Duration) -> Self {
        let resolver = TokioAsyncResolver::tokio(ResolverConfig::default(), ResolverOpts::default());
        Self { resolver, timeout }
    }

    /// Run the MX → host → CNAME chain under one deadline and report which
    /// record type answered.
    pub async fn check(&self, domain: &str) -> Result<&'static str> {
        let chain = async {
            match self.resolver.mx_lookup(domain).await {
                Ok(mx) if mx.iter().next().is_some() => return Ok("MX"),
                Ok(_) => trace!(domain, "empty MX answer"),
                Err(e) => trace!(domain, error = %e, "MX lookup failed"),
            }
            match self.resolver.lookup_ip(domain).await {
                Ok(ips) if ips.iter().next().is_some() => return Ok("A"),
                Ok(_) => trace!(domain, "empty address answer"),
                Err(e) => trace!(domain, error = %e, "address lookup failed"),
            }
            match self.resolver.lookup(domain, RecordType::CNAME).await {
                Ok(_) => Ok("CNAME"),
                Err(e) => Err(EmailFinderError::dns_resolution(
                    domain,
                    "MX/A/CNAME",
                    e.to_string(),
                )),
            }
        };

        match timeout(self.timeout, chain).await {
            Ok(res) => res,
            Err(_) => Err(EmailFinderError::dns_timeout(
                domain,
                self.timeout.as_millis() as u64,
            )),
        }
    }
}

#[async_trait]
impl DnsProbe for ResolverProbe {
    async fn has_records(&self, domain: &str) -> bool {
        match self.check(domain).await {
            Ok(record_type) => {
                trace!(domain, record_type, "DNS records found");
                true
            }
            Err(e) => {
                trace!(domain, error = %e, "no usable DNS records");
                false
            }
        }
    }
}

/// Resolves organization strings against the directory and DNS.
pub struct DomainResolver {
    directory: Arc<CompanyDirectory>,
    probe: Arc<dyn DnsProbe>,
}

impl DomainResolver {
    pub fn new(directory: Arc<CompanyDirectory>, probe: Arc<dyn DnsProbe>) -> Self {
        Self { directory, probe }
    }

    pub fn directory(&self) -> &Arc<CompanyDirectory> {
        &self.directory
    }

    pub fn add_company_domain(&self, company: &str, domain: &str) {
        self.directory.add_company_domain(company, domain);
    }

    /// Resolve an organization string to a domain.
    pub async fn resolve(&self, organization: &str) -> DomainResolution {
        let org = organization.trim().to_lowercase();
        if org.is_empty() {
            return DomainResolution::unresolved();
        }

        if is_domain_like(&org) {
            let live = self.probe.has_records(&org).await;
            debug!(domain = %org, dns_ok = live, "organization is a literal domain");
            return DomainResolution::found(org, ResolutionMethod::Direct);
        }

        if let Some(domain) = self.directory.lookup(&org) {
            info!(company = %org, domain = %domain, "domain resolved from company map");
            return DomainResolution::found(domain, ResolutionMethod::CompanyMap);
        }

        let candidates = candidate_domains(&org);
        let Some(primary) = candidates.first().cloned() else {
            debug!(company = %org, "no domain candidates for organization");
            return DomainResolution::unresolved();
        };

        for candidate in &candidates {
            if self.probe.has_records(candidate).await {
                info!(company = %org, domain = %candidate, "domain resolved via DNS");
                return DomainResolution {
                    domain: candidate.clone(),
                    resolved: true,
                    method: ResolutionMethod::DnsVerified,
                    candidates,
                };
            }
        }

        info!(
            company = %org,
            domain = %primary,
            candidates = candidates.len(),
            "domain resolved via pattern"
        );
        DomainResolution {
            domain: primary,
            resolved: true,
            method: ResolutionMethod::Pattern,
            candidates,
        }
    }
}
