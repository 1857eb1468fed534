use crate::catalogue::default_catalogue;
use crate::report::RunReport;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use routeprobe_scanner::checker::DEFAULT_TIMEOUT;
use routeprobe_scanner::error::Result;
use routeprobe_scanner::{Checker, NOT_SET, RouteDescriptor, RouteResult};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// Pause after every request so the target server is never flooded.
pub const REQUEST_DELAY: Duration = Duration::from_millis(100);

pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";

/// Options for configuring a run
pub struct RunOptions {
    pub base_url: String,
    pub routes: Vec<RouteDescriptor>,
    pub timeout: Duration,
    pub show_progress_bars: bool,
}

impl RunOptions {
    /// Built-in catalogue, default timeout, no progress spinner.
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
            routes: default_catalogue(),
            timeout: DEFAULT_TIMEOUT,
            show_progress_bars: false,
        }
    }
}

impl Default for RunOptions {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

#[derive(Debug)]
pub enum RunOutcome {
    Completed(RunReport),
    /// The liveness probe failed; no route was checked.
    ServerUnreachable,
}

/// Callback for reporting individual route results as they come in
pub type RouteResultCallback = Arc<dyn Fn(&RouteResult) + Send + Sync>;

/// Check every route in catalogue order, one request at a time.
///
/// Fails only when the base URL cannot be used at all. Per-route transport
/// failures end up in the report as `ERROR` results.
pub async fn execute_run(
    options: RunOptions,
    result_callback: Option<RouteResultCallback>,
) -> Result<RunOutcome> {
    let RunOptions {
        base_url,
        routes,
        timeout,
        show_progress_bars,
    } = options;

    let checker = Checker::with_timeout(&base_url, timeout)?;

    if !checker.is_server_reachable().await {
        info!("Aborting run, {} is not reachable", base_url);
        return Ok(RunOutcome::ServerUnreachable);
    }

    let progress_bar = if show_progress_bars {
        let pb = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
            pb.set_style(style);
        }
        pb.enable_steady_tick(Duration::from_millis(100));
        Some(pb)
    } else {
        None
    };

    info!("Checking {} routes against {}", routes.len(), base_url);
    let total = routes.len();
    let mut results = Vec::with_capacity(total);

    for (idx, route) in routes.iter().enumerate() {
        if let Some(ref pb) = progress_bar {
            pb.set_message(format!("Checking {} ({}/{})", route.path, idx + 1, total));
        }

        let result = checker.check_route(route).await;
        debug!("{} -> {}", route.path, result.status);

        if let Some(ref callback) = result_callback {
            match progress_bar {
                Some(ref pb) => pb.suspend(|| callback(&result)),
                None => callback(&result),
            }
        }
        results.push(result);

        tokio::time::sleep(REQUEST_DELAY).await;
    }

    if let Some(ref pb) = progress_bar {
        pb.finish_and_clear();
    }

    Ok(RunOutcome::Completed(RunReport::new(base_url, results)))
}

/// Console block describing one route result.
pub fn describe_result(result: &RouteResult) -> String {
    let mut lines = format!(
        "Testing: {} ({})\n",
        result.route.path.bright_white(),
        result.route.route_type
    );

    match result.error {
        Some(ref error) => {
            lines.push_str(&format!("  {} Error: {}\n", "✗".red().bold(), error));
        }
        None => {
            let status = result.status.to_string();
            let status = match result.status.code() {
                Some(200..=299) => status.green(),
                Some(300..=399) => status.cyan(),
                Some(400..=499) => status.yellow(),
                _ => status.red(),
            };
            lines.push_str(&format!("  {} Status: {}\n", "✓".green().bold(), status));
            lines.push_str(&format!(
                "  {} Cache-Control: {}\n",
                "→".blue(),
                result.header("cache-control").unwrap_or(NOT_SET)
            ));
        }
    }

    lines
}
