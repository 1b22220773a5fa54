use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::Instant;

use super::*;
use crate::entries::PerformanceEntry;

/// Probe whose clock is the paused tokio clock, in ms since test start.
struct MockProbe {
    origin: Instant,
    network_idle_fails: bool,
}

impl MockProbe {
    fn new() -> Self {
        Self {
            origin: Instant::now(),
            network_idle_fails: false,
        }
    }

    fn with_failing_network_wait() -> Self {
        Self {
            origin: Instant::now(),
            network_idle_fails: true,
        }
    }
}

#[async_trait]
impl PageProbe for MockProbe {
    async fn wait_for_network_idle(&self, _timeout: Duration) -> Result<(), VitalsError> {
        if self.network_idle_fails {
            Err(VitalsError::Page("network activity did not settle".into()))
        } else {
            Ok(())
        }
    }

    async fn now_ms(&self) -> Result<f64, VitalsError> {
        Ok(self.origin.elapsed().as_secs_f64() * 1000.0)
    }
}

/// Probe that fails every page-context sample.
struct BrokenProbe;

#[async_trait]
impl PageProbe for BrokenProbe {
    async fn wait_for_network_idle(&self, _timeout: Duration) -> Result<(), VitalsError> {
        Ok(())
    }

    async fn now_ms(&self) -> Result<f64, VitalsError> {
        Err(VitalsError::Page("session closed".into()))
    }
}

fn test_config() -> IdleConfig {
    IdleConfig {
        network_idle_timeout: Duration::from_secs(1),
        poll_interval: Duration::from_millis(100),
        cpu_idle_threshold_ms: 1000.0,
        max_cpu_wait: Duration::from_secs(30),
        collection_delay: Duration::ZERO,
    }
}

fn long_task(start_time: f64, duration: f64) -> PerformanceEntry {
    PerformanceEntry {
        start_time,
        duration,
        ..Default::default()
    }
}

#[tokio::test(start_paused = true)]
async fn waits_until_no_long_task_ended_within_threshold() {
    let collector = Arc::new(EntryCollector::new());
    // Ends at 500 ms; idle requires now - 1000 >= 500, i.e. now >= 1500.
    collector.record(EntryKind::LongTask, long_task(0.0, 500.0));

    let detector = IdleDetector::new(collector, test_config());
    let probe = MockProbe::new();
    let started = Instant::now();
    let outcome = detector.wait_until_idle(&probe).await.unwrap();

    assert_eq!(outcome, IdleOutcome::Idle);
    assert_eq!(started.elapsed().as_millis(), 1500);
}

#[tokio::test(start_paused = true)]
async fn task_ending_just_inside_threshold_forces_another_poll() {
    let collector = Arc::new(EntryCollector::new());
    // Ends at 501 ms: the poll at 1500 ms still sees it inside the trailing
    // window (1500 - 1000 = 500 < 501), so the detector must wait at least
    // one more interval.
    collector.record(EntryKind::LongTask, long_task(0.0, 501.0));

    let detector = IdleDetector::new(collector, test_config());
    let probe = MockProbe::new();
    let started = Instant::now();
    detector.wait_until_idle(&probe).await.unwrap();

    assert_eq!(started.elapsed().as_millis(), 1600);
}

#[tokio::test(start_paused = true)]
async fn waits_out_the_trailing_window_even_with_no_long_tasks() {
    let collector = Arc::new(EntryCollector::new());
    let detector = IdleDetector::new(collector, test_config());
    let probe = MockProbe::new();
    let started = Instant::now();
    let outcome = detector.wait_until_idle(&probe).await.unwrap();

    assert_eq!(outcome, IdleOutcome::Idle);
    // last_busy_end is 0, so idle needs now >= threshold.
    assert_eq!(started.elapsed().as_millis(), 1000);
}

#[tokio::test(start_paused = true)]
async fn cpu_burst_during_the_wait_extends_it() {
    let collector = Arc::new(EntryCollector::new());
    collector.record(EntryKind::LongTask, long_task(0.0, 200.0));

    // Without the burst the detector would exit at 1200 ms. A task
    // delivered mid-wait pushes last_busy_end to 1500, so exit moves to
    // 2500 ms.
    let recorder = collector.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(1050)).await;
        recorder.record(EntryKind::LongTask, long_task(1000.0, 500.0));
    });

    let detector = IdleDetector::new(collector, test_config());
    let probe = MockProbe::new();
    let started = Instant::now();
    detector.wait_until_idle(&probe).await.unwrap();

    assert_eq!(started.elapsed().as_millis(), 2500);
}

#[tokio::test(start_paused = true)]
async fn cpu_wait_cap_produces_timed_out_outcome() {
    let collector = Arc::new(EntryCollector::new());
    // A long task ending in the far future never satisfies the idle check.
    collector.record(EntryKind::LongTask, long_task(0.0, 1e12));

    let mut config = test_config();
    config.max_cpu_wait = Duration::from_secs(1);
    let detector = IdleDetector::new(collector, config);
    let probe = MockProbe::new();
    let started = Instant::now();
    let outcome = detector.wait_until_idle(&probe).await.unwrap();

    assert_eq!(outcome, IdleOutcome::CpuWaitTimedOut);
    assert_eq!(started.elapsed().as_millis(), 1000);
}

#[tokio::test(start_paused = true)]
async fn network_wait_failure_is_absorbed() {
    let collector = Arc::new(EntryCollector::new());
    let mut config = test_config();
    config.cpu_idle_threshold_ms = 0.0;
    let detector = IdleDetector::new(collector, config);
    let probe = MockProbe::with_failing_network_wait();

    let outcome = detector.wait_until_idle(&probe).await.unwrap();
    assert_eq!(outcome, IdleOutcome::Idle);
}

#[tokio::test(start_paused = true)]
async fn collection_delay_elapses_after_idle() {
    let collector = Arc::new(EntryCollector::new());
    let mut config = test_config();
    config.cpu_idle_threshold_ms = 0.0;
    config.collection_delay = Duration::from_millis(500);
    let detector = IdleDetector::new(collector, config);
    let probe = MockProbe::new();
    let started = Instant::now();
    detector.wait_until_idle(&probe).await.unwrap();

    assert_eq!(started.elapsed().as_millis(), 500);
}

#[tokio::test(start_paused = true)]
async fn page_sampling_failure_propagates() {
    let collector = Arc::new(EntryCollector::new());
    let detector = IdleDetector::new(collector, test_config());

    let err = detector.wait_until_idle(&BrokenProbe).await.unwrap_err();
    assert!(matches!(err, VitalsError::Page(_)));
}
