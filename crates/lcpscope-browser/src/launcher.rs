//! Chrome process discovery, launch, and shutdown.

use std::path::PathBuf;
use std::process::Stdio;

use tempfile::TempDir;
use tokio::process::{Child, Command};
use tracing::{debug, info};

use crate::cdp::CdpClient;
use crate::error::BrowserError;

/// Browser launch configuration.
#[derive(Debug, Clone)]
pub struct BrowserConfig {
    /// Chrome remote debugging port.
    pub debug_port: u16,
    /// Whether to run Chrome headless.
    pub headless: bool,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            debug_port: 9222,
            headless: true,
        }
    }
}

impl BrowserConfig {
    /// The CDP endpoint URL.
    pub fn endpoint(&self) -> String {
        format!("http://localhost:{}", self.debug_port)
    }
}

/// Launches and owns a Chrome process for the duration of one audit.
pub struct ChromeLauncher {
    config: BrowserConfig,
    process: Option<Child>,
    /// Scratch profile, removed when the launcher is dropped.
    _profile: Option<TempDir>,
}

impl ChromeLauncher {
    pub fn new(config: BrowserConfig) -> Self {
        Self {
            config,
            process: None,
            _profile: None,
        }
    }

    /// Find a Chrome executable.
    pub fn find_chrome() -> Option<PathBuf> {
        #[cfg(target_os = "macos")]
        let paths = [
            "/Applications/Google Chrome.app/Contents/MacOS/Google Chrome",
            "/Applications/Chromium.app/Contents/MacOS/Chromium",
            "/Applications/Microsoft Edge.app/Contents/MacOS/Microsoft Edge",
        ];

        #[cfg(target_os = "linux")]
        let paths = [
            "/usr/bin/google-chrome",
            "/usr/bin/google-chrome-stable",
            "/usr/bin/chromium",
            "/usr/bin/chromium-browser",
            "/snap/bin/chromium",
        ];

        #[cfg(target_os = "windows")]
        let paths = [
            r"C:\Program Files\Google\Chrome\Application\chrome.exe",
            r"C:\Program Files (x86)\Google\Chrome\Application\chrome.exe",
        ];

        paths
            .iter()
            .map(PathBuf::from)
            .find(|path| path.exists())
    }

    /// Check if Chrome is already serving the debug endpoint.
    async fn is_running(&self) -> bool {
        reqwest::get(format!("{}/json/version", self.config.endpoint()))
            .await
            .is_ok()
    }

    /// Make sure Chrome is up (launching it if needed) and connect.
    pub async fn launch(&mut self) -> Result<CdpClient, BrowserError> {
        if !self.is_running().await {
            info!(
                "Chrome not running on port {}, launching...",
                self.config.debug_port
            );
            self.spawn_chrome().await?;
            self.wait_for_endpoint().await?;
        } else {
            info!("Chrome already running on port {}", self.config.debug_port);
        }

        let client = CdpClient::connect(&self.config.endpoint()).await?;
        info!("Connected to Chrome at {}", self.config.endpoint());
        Ok(client)
    }

    async fn spawn_chrome(&mut self) -> Result<(), BrowserError> {
        let chrome_path = Self::find_chrome().ok_or(BrowserError::ChromeNotFound)?;
        let profile = TempDir::with_prefix("lcpscope-profile-")?;

        debug!(
            "Launching {} with profile at {}",
            chrome_path.display(),
            profile.path().display()
        );

        let mut cmd = Command::new(&chrome_path);
        cmd.arg(format!("--remote-debugging-port={}", self.config.debug_port))
            .arg(format!("--user-data-dir={}", profile.path().display()))
            .arg("--no-first-run")
            .arg("--no-default-browser-check")
            .arg("--disable-background-networking")
            .arg("--disable-sync")
            .arg("--disable-translate")
            .arg("--metrics-recording-only")
            .stdout(Stdio::null())
            .stderr(Stdio::null());

        if self.config.headless {
            cmd.arg("--headless=new");
        }

        let child = cmd
            .spawn()
            .map_err(|e| BrowserError::LaunchFailed(e.to_string()))?;

        info!("Chrome launched with PID: {:?}", child.id());
        self.process = Some(child);
        self._profile = Some(profile);
        Ok(())
    }

    async fn wait_for_endpoint(&self) -> Result<(), BrowserError> {
        let max_attempts = 30;
        for _ in 0..max_attempts {
            tokio::time::sleep(std::time::Duration::from_millis(200)).await;
            if self.is_running().await {
                return Ok(());
            }
        }
        Err(BrowserError::LaunchFailed(
            "Chrome failed to start within timeout".to_string(),
        ))
    }

    /// Kill Chrome if this launcher started it.
    pub async fn shutdown(&mut self) {
        if let Some(mut child) = self.process.take() {
            info!("Shutting down Chrome...");
            let _ = child.kill().await;
        }
    }
}
