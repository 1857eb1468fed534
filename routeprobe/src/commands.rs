use crate::CLAP_STYLING;
use clap::{arg, command};
use url::Url;

pub(crate) const DEFAULT_OUTPUT: &str = "headers_test_results.json";

pub(crate) fn command_argument_builder() -> clap::Command {
    clap::Command::new("routeprobe")
        .version(env!("CARGO_PKG_VERSION"))
        .bin_name("routeprobe")
        .styles(CLAP_STYLING)
        .arg(arg!(-q --"quiet" "Suppress banner and non-essential output").required(false))
        .arg(arg!(-v --"verbose" "Log request details to stderr").required(false))
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            command!("check")
                .about(
                    "Request every route in the catalogue and record its status, size and \
                cache/security headers.",
                )
                .arg(
                    arg!(-u --"url" <URL>)
                        .required(false)
                        .help("Base URL of the server to check")
                        .value_parser(clap::value_parser!(Url))
                        .default_value("http://localhost:3000"),
                )
                .arg(
                    arg!(-r --"routes" <PATH>)
                        .required(false)
                        .help("JSON file with the route catalogue (default: built-in catalogue)")
                        .value_parser(clap::value_parser!(std::path::PathBuf)),
                )
                .arg(
                    arg!(-o --"output" <PATH>)
                        .required(false)
                        .help("Where to write the JSON results")
                        .default_value(DEFAULT_OUTPUT),
                )
                .arg(
                    arg!(--"timeout" <SECONDS>)
                        .required(false)
                        .help("Request timeout in seconds")
                        .value_parser(clap::value_parser!(u64).range(1..))
                        .default_value("10"),
                )
                .arg(
                    arg!(--"no-progress")
                        .required(false)
                        .help("Disable the progress spinner")
                        .action(clap::ArgAction::SetTrue),
                ),
        )
        .subcommand(
            command!("report")
                .about("Render a saved results file as text, markdown or JSON")
                .arg(
                    arg!(-i --"input" <PATH>)
                        .required(false)
                        .help("Results file written by `check`")
                        .default_value(DEFAULT_OUTPUT),
                )
                .arg(
                    arg!(-f --"format" <FORMAT>)
                        .required(false)
                        .help("Report format: text, markdown, json")
                        .value_parser(["text", "markdown", "json"])
                        .default_value("text"),
                )
                .arg(
                    arg!(-o --"output" <PATH>)
                        .required(false)
                        .help("Save report to file (default: display to screen)"),
                ),
        )
        .subcommand(
            command!("routes")
                .about("List the routes that `check` will request")
                .arg(
                    arg!(-r --"routes" <PATH>)
                        .required(false)
                        .help("JSON file with the route catalogue (default: built-in catalogue)")
                        .value_parser(clap::value_parser!(std::path::PathBuf)),
                ),
        )
}
