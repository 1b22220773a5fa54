//! Two-phase idle detection: network quiescence, then CPU quiescence.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::entries::{EntryCollector, EntryKind};
use crate::error::VitalsError;

/// Page-context sampling surface the detector needs from the browser session.
#[async_trait]
pub trait PageProbe: Send + Sync {
    /// Wait until the page's network activity settles, failing after
    /// `timeout`. A failure here is absorbed by the detector.
    async fn wait_for_network_idle(&self, timeout: Duration) -> Result<(), VitalsError>;

    /// Current high-resolution time in ms since navigation start
    /// (`performance.now()` in the page).
    async fn now_ms(&self) -> Result<f64, VitalsError>;
}

/// Idle detection tuning.
#[derive(Debug, Clone)]
pub struct IdleConfig {
    /// How long to wait for network quiescence before giving up on it.
    pub network_idle_timeout: Duration,
    /// Interval between CPU-idle polls.
    pub poll_interval: Duration,
    /// Trailing window (ms) that must be free of long-task activity.
    pub cpu_idle_threshold_ms: f64,
    /// Upper bound on the CPU wait, so a continuously busy page still
    /// finishes with partial data.
    pub max_cpu_wait: Duration,
    /// Settle time for in-flight observer deliveries after going idle.
    pub collection_delay: Duration,
}

impl Default for IdleConfig {
    fn default() -> Self {
        Self {
            network_idle_timeout: Duration::from_secs(10),
            poll_interval: Duration::from_millis(100),
            cpu_idle_threshold_ms: 1000.0,
            max_cpu_wait: Duration::from_secs(30),
            collection_delay: Duration::from_millis(500),
        }
    }
}

/// Outcome of a completed idle wait.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdleOutcome {
    /// The page reached CPU quiescence.
    Idle,
    /// The CPU wait cap expired first; collected data may be partial.
    CpuWaitTimedOut,
}

/// Waits for the page to stop producing significant work.
///
/// Two sequential phases, each entered exactly once: a best-effort network
/// wait (a timeout only logs a warning), then a polled CPU wait. The CPU
/// phase polls rather than reacting to long-task edges because `now` must
/// be re-sampled at each check: a CPU burst occurring during the wait has
/// to extend it.
pub struct IdleDetector {
    collector: Arc<EntryCollector>,
    config: IdleConfig,
}

impl IdleDetector {
    pub fn new(collector: Arc<EntryCollector>, config: IdleConfig) -> Self {
        Self { collector, config }
    }

    /// Run both phases, then let in-flight observer deliveries settle.
    pub async fn wait_until_idle(&self, probe: &dyn PageProbe) -> Result<IdleOutcome, VitalsError> {
        if let Err(e) = probe
            .wait_for_network_idle(self.config.network_idle_timeout)
            .await
        {
            warn!("Timed out waiting for network idle, continuing anyway: {}", e);
        }

        let outcome = self.wait_for_cpu_idle(probe).await?;

        // Observer delivery lags CPU activity; give buffered entries time
        // to arrive before anyone queries the collector.
        tokio::time::sleep(self.config.collection_delay).await;
        Ok(outcome)
    }

    async fn wait_for_cpu_idle(&self, probe: &dyn PageProbe) -> Result<IdleOutcome, VitalsError> {
        let started = tokio::time::Instant::now();
        loop {
            let now = probe.now_ms().await?;
            let last_busy_end = self.last_busy_end();
            if now - self.config.cpu_idle_threshold_ms >= last_busy_end {
                debug!(
                    "CPU idle at {:.0} ms (last long task ended at {:.0} ms)",
                    now, last_busy_end
                );
                return Ok(IdleOutcome::Idle);
            }
            if started.elapsed() >= self.config.max_cpu_wait {
                warn!(
                    "CPU did not go idle within {:?}, proceeding with partial data",
                    self.config.max_cpu_wait
                );
                return Ok(IdleOutcome::CpuWaitTimedOut);
            }
            tokio::time::sleep(self.config.poll_interval).await;
        }
    }

    /// Latest long-task end time observed so far, 0 when none.
    fn last_busy_end(&self) -> f64 {
        self.collector
            .query(EntryKind::LongTask)
            .iter()
            .map(|entry| entry.start_time + entry.duration)
            .fold(0.0, f64::max)
    }
}

#[cfg(test)]
#[path = "idle_tests.rs"]
mod tests;
