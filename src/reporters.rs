//! Report output: JSON for machines, text for terminals.

use anyhow::Context;

use lcpscope_vitals::VitalsReport;

use crate::cli::{Cli, OutputFormat};

pub(crate) fn write_report(cli: &Cli, report: &VitalsReport) -> anyhow::Result<()> {
    let rendered = match cli.output {
        OutputFormat::Json => serde_json::to_string_pretty(report)?,
        OutputFormat::Text => render_text(report),
    };

    if cli.output_path == "stdout" {
        println!("{rendered}");
    } else {
        std::fs::write(&cli.output_path, rendered)
            .with_context(|| format!("failed to write report to {}", cli.output_path))?;
    }
    Ok(())
}

fn render_text(report: &VitalsReport) -> String {
    let lcp = &report.lcp;
    let mut lines = vec![
        format!("TTFB: {:.0} ms", report.ttfb.start_time),
        format!(
            "LCP: {:.0} ms ({})",
            lcp.start_time,
            lcp.url.as_deref().filter(|u| !u.is_empty()).unwrap_or("inline element")
        ),
        String::new(),
        "LCP sub-parts:".to_string(),
        format!("  Load delay: {}", format_ms(lcp.sub_parts.load_delay)),
        format!("  Load time: {}", format_ms(lcp.sub_parts.load_time)),
        format!("  Render delay: {}", format_ms(lcp.sub_parts.render_delay)),
        String::new(),
        format!(
            "Found {} resources that potentially blocked LCP:",
            lcp.optimizations.blocking_resources.len()
        ),
    ];
    lines.extend(
        lcp.optimizations
            .blocking_resources
            .iter()
            .map(|resource| {
                format!(
                    "  - {} ({} ms potential savings)",
                    resource.url, resource.savings
                )
            }),
    );
    lines.push(String::new());
    lines.join("\n")
}

fn format_ms(value: Option<f64>) -> String {
    match value {
        Some(ms) => format!("{:.0} ms", ms),
        None => "n/a".to_string(),
    }
}

#[cfg(test)]
#[path = "reporters_tests.rs"]
mod tests;
