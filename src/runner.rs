//! Orchestration of one page audit.

use std::sync::Arc;

use anyhow::Context;
use tracing::{debug, info, warn};

use lcpscope_browser::cdp::CdpClient;
use lcpscope_browser::{
    BrowserConfig, ChromeLauncher, DevicePreset, PageInstrumentation, SessionProbe, apply_preset,
    capture_screenshot, highlight_area, install_observers, navigation_ttfb, preset,
};
use lcpscope_vitals::{
    EntryCollector, EntryKind, IdleConfig, IdleDetector, IdleOutcome, VitalsReport,
    attribute_render, classify_blocking,
};

use crate::cli::Cli;

pub(crate) async fn run_audit(cli: &Cli) -> anyhow::Result<VitalsReport> {
    let device = preset(&cli.preset)
        .with_context(|| format!("unknown device preset '{}'", cli.preset))?;

    let mut launcher = ChromeLauncher::new(BrowserConfig {
        debug_port: cli.debug_port,
        headless: !cli.headed,
    });
    let client = launcher.launch().await?;

    let result = audit_page(&client, cli, device).await;

    launcher.shutdown().await;
    result
}

async fn audit_page(
    client: &CdpClient,
    cli: &Cli,
    device: &DevicePreset,
) -> anyhow::Result<VitalsReport> {
    let session = Arc::new(client.new_page(None).await?);
    apply_preset(&session, device).await?;
    info!("Emulating '{}' device", device.name);

    let collector = Arc::new(EntryCollector::new());
    let instrumentation = PageInstrumentation::attach(&session, collector.clone())?;

    info!("Opening {}", cli.url);
    let frame_id = session.navigate(cli.url.as_str()).await?;

    info!("Attaching observers");
    install_observers(&session).await?;

    info!("Waiting for the page to go idle");
    let probe = SessionProbe::new(session.clone(), instrumentation.tracker());
    let detector = IdleDetector::new(collector.clone(), IdleConfig::default());
    if detector.wait_until_idle(&probe).await? == IdleOutcome::CpuWaitTimedOut {
        warn!("Page never reached CPU idle; attribution may be incomplete");
    }

    let candidates = collector.query(EntryKind::RenderCandidate);
    debug!("Found {} LCP entries", candidates.len());

    instrumentation.fill_request_timings(&session).await?;
    let requests = instrumentation
        .tracker()
        .main_frame_requests(&frame_id, cli.url.as_str());
    debug!("Found {} HTTP requests in the main frame", requests.len());

    let ttfb = navigation_ttfb(&session).await?;
    debug!("TTFB was at {:.0} ms", ttfb);

    let attribution = attribute_render(&candidates, &requests, ttfb)?;
    info!("LCP was at {:.0} ms", attribution.candidate.start_time);

    let blocking = candidates
        .first()
        .map(|first| classify_blocking(&requests, &attribution.candidate, first))
        .unwrap_or_default();
    debug!(
        "Found {} HTTP requests that potentially blocked LCP",
        blocking.len()
    );

    if !cli.no_screenshot {
        if let Some(rect) = attribution.candidate.rect {
            info!("Highlighting LCP element");
            highlight_area(&session, &rect).await?;
        }
        capture_screenshot(&session, &cli.screenshot).await?;
        info!("Screenshot written to {}", cli.screenshot.display());
    }

    if let Err(e) = client.close_page(session.target_id()).await {
        debug!("Failed to close page: {}", e);
    }

    Ok(VitalsReport::new(attribution, blocking, requests))
}
