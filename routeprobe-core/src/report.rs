// Run reports: persistence and rendering

use chrono::{DateTime, Utc};
use routeprobe_scanner::{NOT_SET, RouteResult, RouteStatus, TRACKED_HEADERS};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Failed to write report {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to read report {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid report JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// One full pass over a route catalogue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
    /// Seconds since the Unix epoch, with sub-second precision
    pub timestamp: f64,
    pub base_url: String,
    pub results: Vec<RouteResult>,
}

impl RunReport {
    pub fn new(base_url: String, results: Vec<RouteResult>) -> Self {
        let now = Utc::now();
        Self {
            timestamp: now.timestamp_micros() as f64 / 1_000_000.0,
            base_url,
            results,
        }
    }

    pub fn generated_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_micros((self.timestamp * 1_000_000.0).round() as i64)
    }

    pub fn summary(&self) -> StatusSummary {
        StatusSummary::from_results(&self.results)
    }
}

/// Result counts bucketed by status class.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusSummary {
    pub success: usize,
    pub redirect: usize,
    pub client_error: usize,
    pub server_error: usize,
    pub other: usize,
    pub errors: usize,
}

impl StatusSummary {
    pub fn from_results(results: &[RouteResult]) -> Self {
        let mut summary = Self::default();
        for result in results {
            match result.status {
                RouteStatus::Code(200..=299) => summary.success += 1,
                RouteStatus::Code(300..=399) => summary.redirect += 1,
                RouteStatus::Code(400..=499) => summary.client_error += 1,
                RouteStatus::Code(500..=599) => summary.server_error += 1,
                RouteStatus::Code(_) => summary.other += 1,
                RouteStatus::Error => summary.errors += 1,
            }
        }
        summary
    }

    pub fn total(&self) -> usize {
        self.success
            + self.redirect
            + self.client_error
            + self.server_error
            + self.other
            + self.errors
    }
}

/// Write a report as pretty-printed JSON, creating parent directories.
pub fn save_report(report: &RunReport, path: &Path) -> Result<(), ReportError> {
    let write_err = |source: std::io::Error| ReportError::Write {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(write_err)?;
    }

    let file = File::create(path).map_err(write_err)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, report).map_err(|source| ReportError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    writer.write_all(b"\n").map_err(write_err)?;
    writer.flush().map_err(write_err)?;

    Ok(())
}

pub fn load_report(path: &Path) -> Result<RunReport, ReportError> {
    let file = File::open(path).map_err(|source| ReportError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_reader(BufReader::new(file)).map_err(|source| ReportError::Json {
        path: path.to_path_buf(),
        source,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Text,
    Markdown,
    Json,
}

impl ReportFormat {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "text" => Some(ReportFormat::Text),
            "markdown" | "md" => Some(ReportFormat::Markdown),
            "json" => Some(ReportFormat::Json),
            _ => None,
        }
    }
}

pub fn render_report(report: &RunReport, format: ReportFormat) -> Result<String, serde_json::Error> {
    match format {
        ReportFormat::Text => Ok(generate_text_report(report)),
        ReportFormat::Markdown => Ok(generate_markdown_report(report)),
        ReportFormat::Json => serde_json::to_string_pretty(report),
    }
}

fn format_generated_at(report: &RunReport) -> String {
    report
        .generated_at()
        .map(|t| t.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_else(|| report.timestamp.to_string())
}

fn header_or_not_set<'a>(result: &'a RouteResult, name: &str) -> &'a str {
    result.header(name).unwrap_or(NOT_SET)
}

pub fn generate_text_report(report: &RunReport) -> String {
    let divider = "═".repeat(79);
    let rule = "─".repeat(79);
    let summary = report.summary();

    let mut out = String::new();
    out.push_str(&format!("\n{}\n", divider));
    out.push_str("                          HEADERS & CACHE RESULTS\n");
    out.push_str(&format!("{}\n\n", divider));

    out.push_str(&format!("Base URL: {}\n", report.base_url));
    out.push_str(&format!("Generated: {}\n", format_generated_at(report)));
    out.push_str(&format!("Routes checked: {}\n\n", summary.total()));

    for result in &report.results {
        out.push_str(&format!(
            "[{}] {} ({}) - {}\n",
            result.status, result.route.path, result.route.route_type, result.route.description
        ));
        out.push_str(&format!("{}\n", rule));

        if let Some(ref error) = result.error {
            out.push_str(&format!("  error: {}\n\n", error));
            continue;
        }

        for name in TRACKED_HEADERS {
            out.push_str(&format!("  {:<27} {}\n", name, header_or_not_set(result, name)));
        }
        out.push_str(&format!("  {:<27} {} bytes\n\n", "size", result.size));
    }

    out.push_str(&format!("{}\n", divider));
    out.push_str(&format!(
        "2xx: {}  3xx: {}  4xx: {}  5xx: {}  errors: {}\n",
        summary.success, summary.redirect, summary.client_error, summary.server_error, summary.errors
    ));
    out.push_str(&format!("{}\n", divider));

    out
}

fn escape_cell(value: &str) -> String {
    value.replace('|', "\\|")
}

pub fn generate_markdown_report(report: &RunReport) -> String {
    let summary = report.summary();
    let mut md = String::new();

    md.push_str("# Headers & Cache Report\n\n");
    md.push_str(&format!("- **Base URL:** {}\n", report.base_url));
    md.push_str(&format!("- **Generated:** {}\n", format_generated_at(report)));
    md.push_str(&format!("- **Routes checked:** {}\n", summary.total()));
    md.push_str(&format!(
        "- **Outcome:** {} ok, {} redirect, {} client error, {} server error, {} failed\n\n",
        summary.success, summary.redirect, summary.client_error, summary.server_error, summary.errors
    ));

    md.push_str("## Routes\n\n");
    md.push_str("| Path | Type | Status | Cache-Control | Content-Type | Size |\n");
    md.push_str("|------|------|--------|---------------|--------------|------|\n");
    for result in &report.results {
        md.push_str(&format!(
            "| `{}` | {} | {} | {} | {} | {} |\n",
            result.route.path,
            result.route.route_type,
            result.status,
            escape_cell(header_or_not_set(result, "cache-control")),
            escape_cell(header_or_not_set(result, "content-type")),
            result.size
        ));
    }

    md.push_str("\n## Headers by route\n");
    for result in &report.results {
        md.push_str(&format!(
            "\n### `{}` ({})\n\n",
            result.route.path, result.route.description
        ));

        if let Some(ref error) = result.error {
            md.push_str(&format!("Request failed: {}\n", escape_cell(error)));
            continue;
        }

        md.push_str("| Header | Value |\n");
        md.push_str("|--------|-------|\n");
        for name in TRACKED_HEADERS {
            md.push_str(&format!(
                "| {} | {} |\n",
                name,
                escape_cell(header_or_not_set(result, name))
            ));
        }
    }

    md
}
