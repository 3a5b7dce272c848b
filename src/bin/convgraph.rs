//! Conversion graph inspector.
//!
//! Loads a rule graph description, enumerates every conversion path between
//! two representations and prints a JSON report on stdout.
//!
//! ## Configuration
//!
//! Environment variables:
//! - `CONVGRAPH_MAX_DEPTH`: longest path explored, in rules (default: unlimited)
//! - `CONVGRAPH_MAX_PATHS`: maximum number of reported paths (default: unlimited)
//! - `RUST_LOG`: Log level filter (default: convgraph=info,segmentation_converter=warn)
//! - `LOG_FORMAT`: "json" for structured logs, "pretty" for development (default: pretty)
//!
//! Logs go to stderr.
//!
//! ## Usage
//!
//! ```bash
//! cargo run --bin convgraph -- graph.json BinaryLabelmap ClosedSurface
//! ```

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{
    fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};

use segmentation_converter::{
    ConversionGraphSolver, ConversionReport, GraphDescription, SolverLimits,
};

#[derive(Parser)]
#[command(name = "convgraph")]
#[command(version, about = "Enumerate conversion paths between two representations")]
struct Args {
    /// Path to the JSON rule graph description
    graph: PathBuf,
    /// Source representation name
    source: String,
    /// Target representation name
    target: String,
}

/// Initialize the tracing subscriber with JSON or pretty format
fn init_tracing() {
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "pretty".to_string());

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "convgraph=info,segmentation_converter=warn".into());

    if log_format == "json" {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .flatten_event(true)
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
            .init();
    }
}

fn run(graph_path: &Path, source: &str, target: &str) -> Result<(), Box<dyn std::error::Error>> {
    let document = std::fs::read_to_string(graph_path)?;
    let description = GraphDescription::from_json(&document)?;
    let registry = description.to_registry();

    info!(
        path = %graph_path.display(),
        rule_count = registry.len(),
        registry_fingerprint = %registry.fingerprint(),
        "Rule graph loaded"
    );

    let limits = SolverLimits::from_env();
    if limits.is_limited() {
        info!(max_depth = ?limits.max_depth, max_paths = ?limits.max_paths, "Search limits active");
    }

    let solver = ConversionGraphSolver::with_limits(limits);
    let report = ConversionReport::build(&solver, &registry, source, target);

    info!(
        from = source,
        to = target,
        paths = report.paths.len(),
        "Query complete"
    );

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing();

    match run(&args.graph, &args.source, &args.target) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "convgraph failed");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_command_definition() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_positional_arguments() {
        let args = Args::try_parse_from(["convgraph", "graph.json", "Labelmap", "Surface"]).unwrap();
        assert_eq!(args.graph, PathBuf::from("graph.json"));
        assert_eq!(args.source, "Labelmap");
        assert_eq!(args.target, "Surface");
    }

    #[test]
    fn test_missing_target_is_rejected() {
        let err = Args::try_parse_from(["convgraph", "graph.json", "Labelmap"])
            .err()
            .unwrap();
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
    }
}
