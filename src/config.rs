//! Configuration management for emailfinder.
//!
//! Settings come from defaults, then `EMAILFINDER_*` environment variables,
//! then command-line flags (highest precedence). Timeouts, concurrency and the
//! verification transport are centralized here.

use std::time::Duration;

pub const DEFAULT_API_URL: &str = "http://localhost:8081";
pub const DEFAULT_API_ENDPOINT: &str = "/v0/check_email";

/// Main configuration structure.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// DNS settings
    pub network: NetworkConfig,

    /// Verification oracle settings
    pub oracle: OracleConfig,

    /// Pipeline limits
    pub finder: FinderConfig,
}

#[derive(Debug, Clone)]
pub struct NetworkConfig {
    /// Deadline for one domain's MX/A/CNAME probe
    pub dns_timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct OracleConfig {
    /// Base URL of the HTTP verification API
    pub api_url: String,

    /// Check endpoint path appended to `api_url`
    pub api_endpoint: String,

    /// Local verifier binary; when set the CLI transport is used
    pub cli_path: Option<String>,

    /// Per-call deadline for the HTTP transport
    pub http_timeout: Duration,

    /// Per-call deadline for the CLI transport
    pub cli_timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct FinderConfig {
    /// Maximum candidates verified per request (0 = unlimited)
    pub max_patterns: usize,

    /// Maximum concurrent oracle calls
    pub concurrency: usize,

    /// Extra NAME=DOMAIN directory entries
    pub company_domains: Vec<(String, String)>,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            dns_timeout: Duration::from_secs(5),
        }
    }
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            api_endpoint: DEFAULT_API_ENDPOINT.to_string(),
            cli_path: None,
            http_timeout: Duration::from_secs(30),
            cli_timeout: Duration::from_secs(10),
        }
    }
}

impl Default for FinderConfig {
    fn default() -> Self {
        Self {
            max_patterns: 200,
            concurrency: crate::batch::DEFAULT_CONCURRENCY,
            company_domains: Vec::new(),
        }
    }
}

/// Parse a `NAME=DOMAIN` mapping.
pub fn parse_company_mapping(input: &str) -> Result<(String, String), ConfigError> {
    match input.split_once('=') {
        Some((name, domain)) if !name.trim().is_empty() && !domain.trim().is_empty() => {
            Ok((name.trim().to_string(), domain.trim().to_string()))
        }
        _ => Err(ConfigError::InvalidValue {
            field: "company".to_string(),
            value: input.to_string(),
            reason: "expected NAME=DOMAIN".to_string(),
        }),
    }
}

impl Config {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(url) = std::env::var("EMAILFINDER_API_URL")
            && !url.is_empty()
        {
            config.oracle.api_url = url;
        }

        if let Ok(endpoint) = std::env::var("EMAILFINDER_API_ENDPOINT")
            && !endpoint.is_empty()
        {
            config.oracle.api_endpoint = endpoint;
        }

        if let Ok(path) = std::env::var("EMAILFINDER_CLI_PATH")
            && !path.is_empty()
        {
            config.oracle.cli_path = Some(path);
        }

        // Timeouts
        if let Ok(timeout) = std::env::var("EMAILFINDER_VERIFICATION_TIMEOUT_SECS")
            && let Ok(secs) = timeout.parse::<u64>()
        {
            config.oracle.http_timeout = Duration::from_secs(secs);
        }

        if let Ok(timeout) = std::env::var("EMAILFINDER_CLI_TIMEOUT_SECS")
            && let Ok(secs) = timeout.parse::<u64>()
        {
            config.oracle.cli_timeout = Duration::from_secs(secs);
        }

        if let Ok(timeout) = std::env::var("EMAILFINDER_DNS_TIMEOUT_SECS")
            && let Ok(secs) = timeout.parse::<u64>()
        {
            config.network.dns_timeout = Duration::from_secs(secs);
        }

        // Limits
        if let Ok(max) = std::env::var("EMAILFINDER_MAX_PATTERNS")
            && let Ok(n) = max.parse::<usize>()
        {
            config.finder.max_patterns = n;
        }

        if let Ok(concurrency) = std::env::var("EMAILFINDER_CONCURRENCY")
            && let Ok(n) = concurrency.parse::<usize>()
        {
            config.finder.concurrency = n;
        }

        config
    }

    /// Merge with CLI arguments, giving CLI precedence
    pub fn merge_with_cli(&mut self, cli: &crate::cli::Cli) -> Result<(), ConfigError> {
        if let Some(ref url) = cli.api_url {
            self.oracle.api_url = url.clone();
        }
        if let Some(ref endpoint) = cli.api_endpoint {
            self.oracle.api_endpoint = endpoint.clone();
        }
        if let Some(ref path) = cli.cli_path {
            self.oracle.cli_path = Some(path.clone());
        }
        if let Some(n) = cli.max_patterns {
            self.finder.max_patterns = n;
        }
        if let Some(n) = cli.concurrency {
            self.finder.concurrency = n;
        }
        for mapping in &cli.companies {
            self.finder.company_domains.push(parse_company_mapping(mapping)?);
        }
        Ok(())
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.network.dns_timeout.is_zero() {
            return Err(ConfigError::InvalidValue {
                field: "network.dns_timeout".to_string(),
                value: "0".to_string(),
                reason: "Timeout must be greater than 0".to_string(),
            });
        }

        if self.oracle.http_timeout.is_zero() || self.oracle.cli_timeout.is_zero() {
            return Err(ConfigError::InvalidValue {
                field: "oracle.timeout".to_string(),
                value: "0".to_string(),
                reason: "Timeout must be greater than 0".to_string(),
            });
        }

        if self.finder.concurrency == 0 {
            return Err(ConfigError::InvalidValue {
                field: "finder.concurrency".to_string(),
                value: "0".to_string(),
                reason: "Concurrency must be at least 1".to_string(),
            });
        }

        match self.oracle.cli_path.as_deref() {
            Some(path) if path.trim().is_empty() => {
                return Err(ConfigError::MissingRequired {
                    field: "oracle.cli_path".to_string(),
                });
            }
            Some(_) => {}
            None => {
                let url = &self.oracle.api_url;
                if !(url.starts_with("http://") || url.starts_with("https://")) {
                    return Err(ConfigError::InvalidValue {
                        field: "oracle.api_url".to_string(),
                        value: url.clone(),
                        reason: "URL must start with http:// or https://".to_string(),
                    });
                }
            }
        }

        Ok(())
    }

    /// Per-call deadline of the configured transport
    pub fn verification_timeout(&self) -> Duration {
        if self.oracle.cli_path.is_some() {
            self.oracle.cli_timeout
        } else {
            self.oracle.http_timeout
        }
    }
}

/// Configuration-related errors
#[derive(Debug)]
pub enum ConfigError {
    /// Invalid configuration value
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    /// Missing required configuration
    MissingRequired { field: String },
}

impl ConfigError {
    /// Whether the error comes from a malformed `--company` mapping.
    pub fn is_company_mapping(&self) -> bool {
        matches!(self, ConfigError::InvalidValue { field, .. } if field == "company")
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::InvalidValue {
                field,
                value,
                reason,
            } => {
                write!(f, "Invalid value '{}' for '{}': {}", value, field, reason)
            }
            ConfigError::MissingRequired { field } => {
                write!(f, "Missing required configuration field: {}", field)
            }
        }
    }
}

impl std::error::Error for ConfigError {}
