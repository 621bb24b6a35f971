//! Output formatting for diagnostics and summaries

use crate::error::CliResult;
use crate::scenario::ScenarioReport;
use console::{style, Style, Term};
use propcheck::{Diagnostic, DiagnosticKind};
use serde::{Deserialize, Serialize};

/// Output format for check results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OutputFormat {
    /// Human-readable text
    #[default]
    Text,
    /// JSON output
    Json,
}

/// Writes results to stdout and status lines to stderr
#[derive(Debug)]
pub struct Printer {
    out: Term,
    err: Term,
    /// Whether to use colors
    pub use_color: bool,
    /// Quiet mode
    pub quiet: bool,
}

impl Default for Printer {
    fn default() -> Self {
        Self::new(true, false)
    }
}

impl Printer {
    /// Create a new printer
    #[must_use]
    pub fn new(use_color: bool, quiet: bool) -> Self {
        Self {
            out: Term::stdout(),
            err: Term::stderr(),
            use_color,
            quiet,
        }
    }

    /// Print a result line to stdout, even in quiet mode
    pub fn line(&self, text: &str) {
        let _ = self.out.write_line(text);
    }

    /// Print a status message to stderr
    pub fn info(&self, message: &str) {
        if self.quiet {
            return;
        }

        let prefix = if self.use_color {
            style("ℹ").blue().bold().to_string()
        } else {
            "INFO".to_string()
        };

        let _ = self.err.write_line(&format!("{prefix} {message}"));
    }

    /// Print a section header to stdout
    pub fn header(&self, title: &str) {
        if self.quiet {
            return;
        }

        let styled = if self.use_color {
            style(title).bold().underlined().to_string()
        } else {
            format!("=== {title} ===")
        };

        let _ = self.out.write_line(&styled);
    }

    /// Print a replay report in the requested format
    pub fn report(&self, report: &ScenarioReport, format: OutputFormat) -> CliResult<()> {
        match format {
            OutputFormat::Json => self.line(&render_report_json(report)?),
            OutputFormat::Text => {
                for diagnostic in &report.diagnostics {
                    self.line(&render_diagnostic(diagnostic, self.use_color));
                }
                if !self.quiet {
                    if !report.is_clean() {
                        self.line("");
                    }
                    self.line(&render_summary(report, self.use_color));
                }
            }
        }
        Ok(())
    }
}

/// One diagnostic as a `warning[kind]: message` line
#[must_use]
pub fn render_diagnostic(diagnostic: &Diagnostic, use_color: bool) -> String {
    let label = diagnostic.kind.label();
    if use_color {
        let kind_style = match diagnostic.kind {
            DiagnosticKind::Similarity => Style::new().yellow().bold(),
            DiagnosticKind::UndeclaredProp => Style::new().magenta().bold(),
        };
        format!(
            "{}{}: {}",
            kind_style.apply_to("warning"),
            style(format!("[{label}]")).dim(),
            diagnostic
        )
    } else {
        format!("warning[{label}]: {diagnostic}")
    }
}

/// Closing summary line
#[must_use]
pub fn render_summary(report: &ScenarioReport, use_color: bool) -> String {
    let count = report.diagnostics.len();
    let status = if count == 0 {
        "OK".to_string()
    } else {
        format!("{count} warning{}", if count == 1 { "" } else { "s" })
    };
    let status = if use_color {
        if count == 0 {
            style(status).green().bold().to_string()
        } else {
            style(status).yellow().bold().to_string()
        }
    } else {
        status
    };

    format!(
        "{status}: {} render(s), {} update(s), {} component(s) instrumented",
        report.renders, report.updates, report.patched
    )
}

/// Report as pretty JSON, including the rendered message of each diagnostic
pub fn render_report_json(report: &ScenarioReport) -> CliResult<String> {
    #[derive(Serialize)]
    struct JsonDiagnostic<'a> {
        #[serde(flatten)]
        diagnostic: &'a Diagnostic,
        message: String,
    }

    #[derive(Serialize)]
    struct JsonReport<'a> {
        renders: usize,
        updates: usize,
        patched: usize,
        warnings: usize,
        diagnostics: Vec<JsonDiagnostic<'a>>,
    }

    let json = JsonReport {
        renders: report.renders,
        updates: report.updates,
        patched: report.patched,
        warnings: report.diagnostics.len(),
        diagnostics: report
            .diagnostics
            .iter()
            .map(|diagnostic| JsonDiagnostic {
                diagnostic,
                message: diagnostic.message(),
            })
            .collect(),
    };
    Ok(serde_json::to_string_pretty(&json)?)
}
