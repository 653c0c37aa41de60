//! EmailFinder Library
//!
//! Guesses an organization's email-address convention for a named person and
//! verifies the guesses against an external mailbox-verification service:
//!
//! - Resolve an organization name or domain to a mail domain
//! - Generate a deterministic, priority-ordered list of candidate addresses
//! - Verify candidates concurrently through an HTTP or CLI oracle
//! - Rank deliverable results into confidence tiers
//!
//! # Example
//!
//! ```rust,no_run
//! use emailfinder::config::Config;
//! use emailfinder::{EmailFinder, FindEmailRequest};
//!
//! # async fn run() -> emailfinder::Result<()> {
//! let finder = EmailFinder::from_config(&Config::from_env())?;
//! let response = finder
//!     .find_emails(&FindEmailRequest::new("Ada", "Lovelace", "Acme Inc"))
//!     .await?;
//! for found in &response.found_emails {
//!     println!("{} ({})", found.email, found.confidence_tier);
//! }
//! # Ok(())
//! # }
//! ```

pub mod app;
pub mod batch;
pub mod cli;
pub mod config;
pub mod directory;
pub mod domain_utils;
pub mod emails;
pub mod errors;
pub mod facade;
pub mod oracle;
pub mod patterns;
pub mod ranking;
pub mod resolver;
pub mod structured_output;
pub mod styled_output;

// Re-export commonly used types and functions for convenience
pub use batch::BatchVerifier;
pub use directory::CompanyDirectory;
pub use errors::{EmailFinderError, ErrorCategory, Result};
pub use facade::{EmailFinder, FindEmailRequest, FindEmailResponse, HealthStatus, health};
pub use oracle::{CliOracle, HttpOracle, Reachability, VerificationOracle, VerificationOutcome};
pub use patterns::{CandidateAddress, generate};
pub use ranking::{ConfidenceTier, RankedResult, rank};
pub use resolver::{DnsProbe, DomainResolution, DomainResolver, ResolutionMethod, ResolverProbe};
pub use styled_output::StyledFormatter;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
