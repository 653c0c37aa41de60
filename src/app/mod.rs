//! High-level application orchestration layer.
//!
//! This module provides the CLI-facing `App` façade. It turns parsed flags
//! into a configuration and a [`FindEmailRequest`], runs the library pipeline
//! once and renders the result as structured (JSON/YAML), styled or plain
//! output.
//!
//! Major steps in `App::run`:
//!   1. Schema generation / health early-exits
//!   2. Config load (env + CLI) and validation
//!   3. Request validation
//!   4. Pipeline execution through `EmailFinder`
//!   5. Rendering
//!
//! Exit codes: 0 success, 2 rejected request, 1 configuration or pipeline
//! failure.

use std::time::Instant;

use tracing::{debug, error};

use crate::cli::{Cli, OutputFormat};
use crate::config::Config;
use crate::errors::{EmailFinderError, Result};
use crate::facade::{self, EmailFinder, FindEmailRequest, FindEmailResponse};
use crate::structured_output::FinderOutput;
use crate::styled_output::{self, StyledFormatter};

pub const EXIT_OK: i32 = 0;
pub const EXIT_FAILURE: i32 = 1;
pub const EXIT_INVALID_REQUEST: i32 = 2;

/// Application façade.
pub struct App;

impl App {
    /// Execute one search.
    ///
    /// Returns the intended process exit code. Pipeline failures are returned
    /// as `Err` for the caller to report.
    pub async fn run(cli: &Cli) -> Result<i32> {
        if Self::maybe_print_schema(cli)? {
            return Ok(EXIT_OK);
        }
        if Self::maybe_print_health(cli)? {
            return Ok(EXIT_OK);
        }

        let config = match Self::load_config(cli) {
            Ok(c) => c,
            Err(e) => return Ok(Self::report_rejection(cli, &e)),
        };

        let request = Self::request_from(cli);
        if let Err(e) = EmailFinder::validate(&request) {
            return Ok(Self::report_rejection(cli, &e));
        }

        let start = Instant::now();
        let finder = EmailFinder::from_config(&config)?;
        let response = finder.find_emails(&request).await?;
        let elapsed_ms = start.elapsed().as_millis() as u64;
        debug!(elapsed_ms, "search complete");

        Self::render(cli, &request, response, elapsed_ms)?;
        Ok(EXIT_OK)
    }

    fn request_from(cli: &Cli) -> FindEmailRequest {
        FindEmailRequest::new(
            cli.first_name.clone().unwrap_or_default(),
            cli.last_name.clone().unwrap_or_default(),
            cli.organization.clone().unwrap_or_default(),
        )
    }

    /// Print a request/config rejection and pick the exit code for it.
    fn report_rejection(cli: &Cli, e: &EmailFinderError) -> i32 {
        error!(category = %e.category(), "{e}");
        if cli.error_enabled() {
            eprintln!("Error: {e}");
        }
        if e.is_validation() {
            EXIT_INVALID_REQUEST
        } else {
            EXIT_FAILURE
        }
    }
}

/// Helper: early exits
impl App {
    fn maybe_print_schema(cli: &Cli) -> Result<bool> {
        if !cli.generate_schema {
            return Ok(false);
        }
        let schema = Self::render_schema(FinderOutput::generate_json_schema())?;
        println!("{schema}");
        Ok(true)
    }

    fn render_schema(generated: anyhow::Result<String>) -> Result<String> {
        generated.map_err(|e| {
            EmailFinderError::internal(format!("failed to generate JSON schema: {e}"))
        })
    }

    fn maybe_print_health(cli: &Cli) -> Result<bool> {
        if !cli.health {
            return Ok(false);
        }
        let status = facade::health();
        let rendered = match cli.output_format() {
            OutputFormat::Yaml => serde_yaml::to_string(&status)
                .map_err(|e| EmailFinderError::internal_with("failed to render health", e))?,
            _ => serde_json::to_string(&status)
                .map_err(|e| EmailFinderError::internal_with("failed to render health", e))?,
        };
        println!("{}", rendered.trim_end());
        Ok(true)
    }
}

/// Helper: configuration
impl App {
    fn load_config(cli: &Cli) -> Result<Config> {
        let mut config = Config::from_env();
        config.merge_with_cli(cli)?;
        config.validate()?;
        Ok(config)
    }
}

/// Helper: rendering
impl App {
    fn render(
        cli: &Cli,
        request: &FindEmailRequest,
        response: FindEmailResponse,
        elapsed_ms: u64,
    ) -> Result<()> {
        match cli.output_format() {
            OutputFormat::Json | OutputFormat::Yaml => {
                let output = FinderOutput::new(request, response, elapsed_ms);
                let rendered = match cli.output_format() {
                    OutputFormat::Json => output.to_json(),
                    _ => output.to_yaml(),
                };
                match rendered {
                    Ok(s) => println!("{s}"),
                    Err(e) => eprintln!("Error formatting structured output: {e}"),
                }
            }
            OutputFormat::Text if cli.should_use_styling() => {
                let formatter = if cli.no_color {
                    StyledFormatter::without_colors()
                } else {
                    StyledFormatter::new()
                };
                formatter
                    .print_results(request, &response, elapsed_ms)
                    .map_err(|e| EmailFinderError::internal_with("failed to write output", e))?;
            }
            OutputFormat::Text => {
                print!("{}", styled_output::format_plain(&response));
                if response.found_emails.is_empty() && cli.error_enabled() {
                    eprintln!("No deliverable addresses found for {}.", request.organization);
                }
            }
        }
        Ok(())
    }
}
