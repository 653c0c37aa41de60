//! Styled output formatting for emailfinder using anstyle.
//!
//! Renders a finished search as a colored terminal report: a header naming the
//! person and resolved domain, the ranked addresses grouped by tier, and a
//! footer with statistics and hints. `format_plain` is the uncolored,
//! one-address-per-line variant for scripts.

use anstyle::{AnsiColor, Color, Style};
use std::fmt::Write;
use std::io::{self, Write as IoWrite};

use crate::facade::{FindEmailRequest, FindEmailResponse};
use crate::ranking::ConfidenceTier;
use crate::resolver::ResolutionMethod;
use crate::structured_output::recommendations_for;

const RULE: &str =
    "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━";

/// Style definitions for different UI elements
pub struct Styles {
    pub header: Style,
    pub subheader: Style,
    pub success: Style,
    pub warning: Style,
    pub info: Style,
    pub muted: Style,
    pub bold: Style,
    pub email: Style,
    pub confidence_high: Style,
    pub confidence_medium: Style,
    pub confidence_low: Style,
}

impl Default for Styles {
    fn default() -> Self {
        Self {
            header: Style::new()
                .bold()
                .fg_color(Some(Color::Ansi(AnsiColor::Blue))),
            subheader: Style::new()
                .bold()
                .fg_color(Some(Color::Ansi(AnsiColor::Cyan))),
            success: Style::new()
                .bold()
                .fg_color(Some(Color::Ansi(AnsiColor::Green))),
            warning: Style::new()
                .bold()
                .fg_color(Some(Color::Ansi(AnsiColor::Yellow))),
            info: Style::new().fg_color(Some(Color::Ansi(AnsiColor::Blue))),
            muted: Style::new().fg_color(Some(Color::Ansi(AnsiColor::BrightBlack))),
            bold: Style::new().bold(),
            email: Style::new()
                .fg_color(Some(Color::Ansi(AnsiColor::Green)))
                .underline(),
            confidence_high: Style::new()
                .bold()
                .fg_color(Some(Color::Ansi(AnsiColor::Green))),
            confidence_medium: Style::new().fg_color(Some(Color::Ansi(AnsiColor::Yellow))),
            confidence_low: Style::new().fg_color(Some(Color::Ansi(AnsiColor::Red))),
        }
    }
}

/// Styled output formatter for search results
pub struct StyledFormatter {
    styles: Styles,
    use_colors: bool,
}

impl StyledFormatter {
    /// Create a new styled formatter
    pub fn new() -> Self {
        Self {
            styles: Styles::default(),
            use_colors: Self::should_use_colors(),
        }
    }

    /// Create a formatter without colors (for non-interactive use)
    pub fn without_colors() -> Self {
        Self {
            styles: Styles::default(),
            use_colors: false,
        }
    }

    /// Determine if colors should be used based on environment
    fn should_use_colors() -> bool {
        atty::is(atty::Stream::Stdout) && std::env::var("NO_COLOR").is_err()
    }

    /// Apply style to text if colors are enabled
    fn styled(&self, text: &str, style: &Style) -> String {
        if self.use_colors {
            format!("{}{}{}", style.render(), text, style.render_reset())
        } else {
            text.to_string()
        }
    }

    fn tier_style(&self, tier: ConfidenceTier) -> &Style {
        match tier {
            ConfidenceTier::High => &self.styles.confidence_high,
            ConfidenceTier::Medium => &self.styles.confidence_medium,
            ConfidenceTier::Low => &self.styles.confidence_low,
        }
    }

    /// Format a finished search
    pub fn format_results(
        &self,
        request: &FindEmailRequest,
        response: &FindEmailResponse,
        elapsed_ms: u64,
    ) -> Result<String, std::fmt::Error> {
        let mut output = String::new();
        self.write_header(&mut output, request, response)?;
        self.write_found_emails(&mut output, response)?;
        self.write_footer(&mut output, response, elapsed_ms)?;
        Ok(output)
    }

    /// Write the main header with the person and domain
    fn write_header(
        &self,
        output: &mut String,
        request: &FindEmailRequest,
        response: &FindEmailResponse,
    ) -> Result<(), std::fmt::Error> {
        writeln!(output)?;
        writeln!(output, "{}", self.styled(RULE, &self.styles.muted))?;

        let title = format!(
            "🔎 Email addresses for {} {} at {}",
            request.first_name.trim(),
            request.last_name.trim(),
            request.organization.trim()
        );
        writeln!(output, "  {}", self.styled(&title, &self.styles.header))?;

        if response.domain_resolved {
            writeln!(
                output,
                "  {} Domain: {} {}",
                self.styled("🌐", &self.styles.info),
                self.styled(&response.domain, &self.styles.bold),
                self.styled(
                    &format!("({})", describe_method(response.resolution_method)),
                    &self.styles.muted
                )
            )?;
        } else {
            writeln!(
                output,
                "  {} {}",
                self.styled("⚠️", &self.styles.warning),
                self.styled("Domain could not be resolved", &self.styles.warning)
            )?;
        }

        writeln!(output, "{}", self.styled(RULE, &self.styles.muted))?;
        Ok(())
    }

    /// Write ranked addresses section
    fn write_found_emails(
        &self,
        output: &mut String,
        response: &FindEmailResponse,
    ) -> Result<(), std::fmt::Error> {
        writeln!(output)?;
        if response.found_emails.is_empty() {
            writeln!(
                output,
                "  {} {}",
                self.styled("⚠️", &self.styles.warning),
                self.styled("No deliverable addresses found", &self.styles.warning)
            )?;
            return Ok(());
        }

        writeln!(
            output,
            "  {}",
            self.styled("📮 Likely Addresses", &self.styles.subheader)
        )?;
        writeln!(output)?;

        let last = response.found_emails.len() - 1;
        for (i, result) in response.found_emails.iter().enumerate() {
            writeln!(
                output,
                "    {} {}",
                self.styled(&format!("{}.", i + 1), &self.styles.muted),
                self.styled(&result.email, &self.styles.email)
            )?;
            writeln!(
                output,
                "       {} Confidence: {}",
                self.styled("├─", &self.styles.muted),
                self.styled(
                    result.confidence_tier.as_str(),
                    self.tier_style(result.confidence_tier)
                )
            )?;
            writeln!(
                output,
                "       {} Reachability: {}{}",
                self.styled("├─", &self.styles.muted),
                self.styled(result.reachability.as_str(), &self.styles.info),
                if result.deliverable {
                    format!(" {}", self.styled("✓ deliverable", &self.styles.success))
                } else {
                    String::new()
                }
            )?;
            writeln!(
                output,
                "       {} Pattern: {}",
                self.styled("└─", &self.styles.muted),
                self.styled(&result.pattern_tag, &self.styles.muted)
            )?;

            if i < last {
                writeln!(output)?;
            }
        }

        Ok(())
    }

    fn write_footer(
        &self,
        output: &mut String,
        response: &FindEmailResponse,
        elapsed_ms: u64,
    ) -> Result<(), std::fmt::Error> {
        writeln!(output)?;
        writeln!(output, "{}", self.styled(RULE, &self.styles.muted))?;

        writeln!(
            output,
            "  {} Search Statistics:",
            self.styled("📊", &self.styles.info)
        )?;
        writeln!(
            output,
            "    {} Candidates checked: {}",
            self.styled("├─", &self.styles.muted),
            self.styled(&response.total_checked.to_string(), &self.styles.bold)
        )?;
        writeln!(
            output,
            "    {} Addresses found: {}",
            self.styled("├─", &self.styles.muted),
            self.styled(&response.total_found.to_string(), &self.styles.bold)
        )?;
        writeln!(
            output,
            "    {} Total time: {}ms",
            self.styled("└─", &self.styles.muted),
            self.styled(&elapsed_ms.to_string(), &self.styles.bold)
        )?;

        let hints = recommendations_for(response);
        if !hints.is_empty() {
            writeln!(output)?;
            writeln!(output, "  {}", self.styled("💡 Hints:", &self.styles.info))?;
            for hint in &hints {
                writeln!(
                    output,
                    "    {} {}",
                    self.styled("•", &self.styles.info),
                    hint
                )?;
            }
        }

        writeln!(output, "{}", self.styled(RULE, &self.styles.muted))?;
        Ok(())
    }

    /// Print results to stdout
    pub fn print_results(
        &self,
        request: &FindEmailRequest,
        response: &FindEmailResponse,
        elapsed_ms: u64,
    ) -> io::Result<()> {
        let formatted = self
            .format_results(request, response, elapsed_ms)
            .map_err(|e| io::Error::other(format!("{}", e)))?;
        print!("{}", formatted);
        io::stdout().flush()?;
        Ok(())
    }
}

impl Default for StyledFormatter {
    fn default() -> Self {
        Self::new()
    }
}

fn describe_method(method: ResolutionMethod) -> &'static str {
    match method {
        ResolutionMethod::Direct => "given directly",
        ResolutionMethod::CompanyMap => "known company",
        ResolutionMethod::DnsVerified => "confirmed via DNS",
        ResolutionMethod::Pattern => "best guess",
        ResolutionMethod::None => "unresolved",
    }
}

/// Plain output: one `email<TAB>tier` line per result.
pub fn format_plain(response: &FindEmailResponse) -> String {
    let mut out = String::new();
    for r in &response.found_emails {
        out.push_str(&r.email);
        out.push('\t');
        out.push_str(r.confidence_tier.as_str());
        out.push('\n');
    }
    out
}
