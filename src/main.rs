//! lcpscope - Largest Contentful Paint attribution probe.
//!
//! Loads a page in headless Chrome, waits for it to go quiet, then reports
//! which element the largest paint was, where its latency went, and which
//! requests plausibly delayed it.

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

mod cli;
mod reporters;
mod runner;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    init_logging(cli.verbose);

    let report = runner::run_audit(&cli).await?;
    reporters::write_report(&cli, &report)?;
    Ok(())
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose {
        "lcpscope=debug,lcpscope_vitals=debug,lcpscope_browser=debug"
    } else {
        "info"
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    // Logs go to stderr; stdout is reserved for the report.
    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_target(true)
                .with_writer(std::io::stderr),
        )
        .init();
}
