//! CLI definitions for lcpscope.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use url::Url;

/// lcpscope CLI.
#[derive(Parser)]
#[command(name = "lcpscope")]
#[command(about = "Largest Contentful Paint attribution probe")]
#[command(version)]
pub(crate) struct Cli {
    /// Page URL to audit
    pub url: Url,

    /// Device emulation preset
    #[arg(long, default_value = "desktop")]
    pub preset: String,

    /// Output format
    #[arg(long, value_enum, default_value = "json")]
    pub output: OutputFormat,

    /// Where to write the report; "stdout" or a file path
    #[arg(long, default_value = "stdout")]
    pub output_path: String,

    /// Where to write the highlighted full-page screenshot
    #[arg(long, default_value = "screenshot.png")]
    pub screenshot: PathBuf,

    /// Skip the highlight overlay and screenshot
    #[arg(long)]
    pub no_screenshot: bool,

    /// Run Chrome with a visible window
    #[arg(long)]
    pub headed: bool,

    /// Chrome remote debugging port
    #[arg(long, default_value_t = 9222)]
    pub debug_port: u16,

    /// Display verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    Json,
    Text,
}
