use clap::Parser;

/// Output format selected on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
    Yaml,
}

/// Command-line interface definition.
/// Finds likely email addresses for a person at an organization.
///
/// Verbosity levels:
/// 0 - silent (only final output)
/// 1 - errors (default)
/// 2 - warnings + errors
/// 3-4 - info
/// 5 - trace/debug
#[derive(Parser, Debug, Clone, Default)]
#[command(
    author,
    version,
    about = "Guess and verify likely email addresses for a person at an organization"
)]
pub struct Cli {
    /// First name of the person
    #[arg(long = "first", value_name = "NAME", required_unless_present_any = ["health", "generate_schema"])]
    pub first_name: Option<String>,

    /// Last name of the person
    #[arg(long = "last", value_name = "NAME", required_unless_present_any = ["health", "generate_schema"])]
    pub last_name: Option<String>,

    /// Organization name or domain (e.g. "Acme Inc" or acme.com)
    #[arg(long = "org", value_name = "ORG", required_unless_present_any = ["health", "generate_schema"])]
    pub organization: Option<String>,

    /// Verbosity level (0-5)
    #[arg(long, default_value_t = 1)]
    pub verbose: u8,

    /// Output results as JSON
    #[arg(long, conflicts_with = "yaml")]
    pub json: bool,

    /// Output results as YAML
    #[arg(long, conflicts_with = "json")]
    pub yaml: bool,

    /// Plain text output (no styling)
    #[arg(long)]
    pub plain: bool,

    /// Disable colors in styled output
    #[arg(long = "no-color")]
    pub no_color: bool,

    /// Maximum concurrent verification calls
    #[arg(long, value_name = "N")]
    pub concurrency: Option<usize>,

    /// Maximum candidates to verify (0 = unlimited)
    #[arg(long = "max-patterns", value_name = "N")]
    pub max_patterns: Option<usize>,

    /// Base URL of the verification API
    #[arg(long = "api-url", value_name = "URL")]
    pub api_url: Option<String>,

    /// Check endpoint path of the verification API
    #[arg(long = "api-endpoint", value_name = "PATH")]
    pub api_endpoint: Option<String>,

    /// Use a local verifier binary instead of the HTTP API
    #[arg(long = "cli-path", value_name = "PATH")]
    pub cli_path: Option<String>,

    /// Extra company mapping, repeatable (e.g. --company "Initech=initech.com")
    #[arg(long = "company", value_name = "NAME=DOMAIN")]
    pub companies: Vec<String>,

    /// Print service health and exit
    #[arg(long)]
    pub health: bool,

    /// Print the JSON schema of the structured output and exit
    #[arg(long = "generate-schema")]
    pub generate_schema: bool,
}

impl Cli {
    /// Parse CLI arguments from process args.
    pub fn from_args() -> Self {
        Self::parse()
    }

    pub fn output_format(&self) -> OutputFormat {
        if self.json {
            OutputFormat::Json
        } else if self.yaml {
            OutputFormat::Yaml
        } else {
            OutputFormat::Text
        }
    }

    pub fn is_structured_output(&self) -> bool {
        matches!(self.output_format(), OutputFormat::Json | OutputFormat::Yaml)
    }

    /// Styled (anstyle) rendering unless plain text was requested.
    pub fn should_use_styling(&self) -> bool {
        !self.plain && !self.is_structured_output()
    }

    /// Convenience: are we in very verbose/debug mode?
    pub fn is_trace(&self) -> bool {
        self.verbose >= 5
    }

    /// Are info-level messages enabled?
    pub fn info_enabled(&self) -> bool {
        self.verbose >= 3
    }

    /// Are warning-level messages enabled?
    pub fn warn_enabled(&self) -> bool {
        self.verbose >= 2
    }

    /// Are error-level messages enabled?
    pub fn error_enabled(&self) -> bool {
        self.verbose >= 1
    }

    /// Default `tracing` filter directive for the verbosity level.
    pub fn log_directive(&self) -> &'static str {
        match self.verbose {
            0 => "off",
            1 => "emailfinder=error",
            2 => "emailfinder=warn",
            3 | 4 => "emailfinder=info",
            _ => "emailfinder=trace",
        }
    }
}
