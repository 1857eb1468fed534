pub mod catalogue;
pub mod report;
pub mod run;

use colored::Colorize;

pub use catalogue::{default_catalogue, load_catalogue};
pub use report::{
    ReportError, ReportFormat, RunReport, StatusSummary, load_report, render_report, save_report,
};
pub use run::{RouteResultCallback, RunOptions, RunOutcome, describe_result, execute_run};

pub fn print_banner() {
    println!(
        "{} {}",
        "routeprobe".bright_cyan().bold(),
        env!("CARGO_PKG_VERSION").bright_black()
    );
    println!("{}", "Headers & cache verification".bright_white());
    println!("{}", "=".repeat(50).bright_blue());
}
