use anyhow::{Context, anyhow};
use clap::ArgMatches;
use colored::Colorize;
use routeprobe_core::{
    ReportFormat, RouteResultCallback, RunOptions, RunOutcome, RunReport, default_catalogue,
    describe_result, execute_run, load_catalogue, load_report, render_report, save_report,
};
use routeprobe_scanner::{RouteDescriptor, RouteResult};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing::Level;
use url::Url;

/// Install the stderr log subscriber.
pub fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

/// Expand a leading `~` in a user-supplied path
pub fn expand_path(raw: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(raw).as_ref())
}

/// Routes from a catalogue file, or the built-in catalogue when none is given
pub fn load_routes(path: Option<&PathBuf>) -> Result<Vec<RouteDescriptor>, String> {
    match path {
        Some(path) => load_catalogue(path),
        None => Ok(default_catalogue()),
    }
}

/// Run the catalogue and persist the report. Nothing is written when the
/// server is unreachable.
pub async fn run_check(
    options: RunOptions,
    output: &Path,
    result_callback: Option<RouteResultCallback>,
) -> anyhow::Result<RunOutcome> {
    let outcome = execute_run(options, result_callback)
        .await
        .context("Could not start the run")?;

    if let RunOutcome::Completed(ref report) = outcome {
        save_report(report, output)?;
    }

    Ok(outcome)
}

fn print_divider() {
    println!("{}", "═".repeat(50).bright_blue().bold());
}

fn print_summary(report: &RunReport, output: &Path) {
    let summary = report.summary();

    print_divider();
    println!(
        "{} {} routes checked against {}",
        "✓".green().bold(),
        summary.total(),
        report.base_url.bright_white()
    );
    println!(
        "  {} 2xx  {} 3xx  {} 4xx  {} 5xx  {} errors",
        summary.success.to_string().green(),
        summary.redirect.to_string().cyan(),
        summary.client_error.to_string().yellow(),
        summary.server_error.to_string().red(),
        summary.errors.to_string().red().bold()
    );
    println!(
        "{} Results saved to {}",
        "✓".green().bold(),
        output.display().to_string().bright_white()
    );
    println!(
        "{} Render them with: routeprobe report -i {} -f markdown",
        "→".blue(),
        output.display()
    );
}

pub async fn handle_check(args: &ArgMatches, quiet: bool) -> anyhow::Result<()> {
    let url = args
        .get_one::<Url>("url")
        .ok_or_else(|| anyhow!("--url is required"))?;
    let output = args
        .get_one::<String>("output")
        .map(|raw| expand_path(raw))
        .ok_or_else(|| anyhow!("--output is required"))?;
    let timeout = *args.get_one::<u64>("timeout").unwrap_or(&10);
    let show_progress = !quiet && !args.get_flag("no-progress");

    let routes = load_routes(args.get_one::<PathBuf>("routes")).map_err(|e| anyhow!(e))?;

    let options = RunOptions {
        base_url: url.as_str().to_string(),
        routes,
        timeout: Duration::from_secs(timeout),
        show_progress_bars: show_progress,
    };

    let result_callback: Option<RouteResultCallback> = if quiet {
        None
    } else {
        let print_result: RouteResultCallback =
            Arc::new(|result: &RouteResult| println!("{}", describe_result(result)));
        Some(print_result)
    };

    match run_check(options, &output, result_callback).await? {
        RunOutcome::Completed(report) => {
            if quiet {
                println!("{}", output.display());
            } else {
                print_summary(&report, &output);
            }
        }
        RunOutcome::ServerUnreachable => {
            println!("{} Server not running at {}", "✗".red().bold(), url);
            println!("Please start the development server (e.g. `npm run dev`) and try again.");
        }
    }

    Ok(())
}

pub fn handle_report(args: &ArgMatches) -> anyhow::Result<()> {
    let input = args
        .get_one::<String>("input")
        .map(|raw| expand_path(raw))
        .ok_or_else(|| anyhow!("--input is required"))?;
    let format_name = args
        .get_one::<String>("format")
        .map(String::as_str)
        .unwrap_or("text");
    let format = ReportFormat::from_str(format_name)
        .ok_or_else(|| anyhow!("Unknown report format '{}'", format_name))?;

    let report = load_report(&input)?;
    let rendered = render_report(&report, format).context("Failed to render report")?;

    match args.get_one::<String>("output") {
        Some(raw) => {
            let path = expand_path(raw);
            fs::write(&path, rendered)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!(
                "{} Report written to {}",
                "✓".green().bold(),
                path.display().to_string().bright_white()
            );
        }
        None => print!("{}", rendered),
    }

    Ok(())
}

pub fn handle_routes(args: &ArgMatches) -> anyhow::Result<()> {
    let routes = load_routes(args.get_one::<PathBuf>("routes")).map_err(|e| anyhow!(e))?;

    for (idx, route) in routes.iter().enumerate() {
        println!(
            "{:>3}. {:<14} {}  {}",
            idx + 1,
            route.route_type.to_string().cyan(),
            route.path.bright_white(),
            route.description.bright_black()
        );
    }

    Ok(())
}
