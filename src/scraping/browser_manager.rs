//! Browser discovery, launch and teardown for one scraping run.
//!
//! A run owns exactly one [`BrowserSession`]. Launch is retried a bounded
//! number of times, wiping the on-disk profile between attempts. The session
//! is closed explicitly at the end of a run; `Drop` is the fallback for early
//! exits.

use crate::core::config::ScoutConfig;
use crate::core::SessionError;
use crate::scraping::renderer::ChromiumRenderer;
use anyhow::{anyhow, Result};
use chromiumoxide::browser::BrowserConfig;
use chromiumoxide::handler::viewport::Viewport;
use chromiumoxide::Browser;
use futures::StreamExt;
use rand::distr::{Distribution, Uniform};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Pause between failed launch attempts.
pub const RETRY_PAUSE: Duration = Duration::from_secs(2);

const BROWSER_CANDIDATES: &[&str] = &[
    "brave-browser",
    "brave",
    "google-chrome",
    "chromium",
    "chromium-browser",
    "chrome",
];

/// Find a usable Chromium-family browser executable.
///
/// Resolution order:
/// 1. `CHROME_EXECUTABLE` env var (explicit override)
/// 2. PATH scan
/// 3. OS-specific well-known install paths
pub fn find_chrome_executable() -> Option<String> {
    if let Ok(p) = std::env::var("CHROME_EXECUTABLE") {
        if Path::new(&p).exists() {
            return Some(p);
        }
    }

    for exe in BROWSER_CANDIDATES {
        if let Ok(path) = which::which(exe) {
            return Some(path.to_string_lossy().to_string());
        }
    }

    #[cfg(target_os = "macos")]
    {
        let candidates = [
            "/Applications/Google Chrome.app/Contents/MacOS/Google Chrome",
            "/Applications/Brave Browser.app/Contents/MacOS/Brave Browser",
            "/Applications/Chromium.app/Contents/MacOS/Chromium",
        ];
        for c in candidates {
            if Path::new(c).exists() {
                return Some(c.to_string());
            }
        }
    }

    #[cfg(target_os = "linux")]
    {
        let candidates = [
            "/usr/bin/google-chrome",
            "/usr/bin/chromium",
            "/usr/bin/chromium-browser",
            "/usr/bin/brave-browser",
            "/snap/bin/chromium",
        ];
        for c in candidates {
            if Path::new(c).exists() {
                return Some(c.to_string());
            }
        }
    }

    #[cfg(target_os = "windows")]
    {
        let candidates = [
            r"C:\Program Files\Google\Chrome\Application\chrome.exe",
            r"C:\Program Files (x86)\Google\Chrome\Application\chrome.exe",
            r"C:\Program Files\BraveSoftware\Brave-Browser\Application\brave.exe",
        ];
        for c in candidates {
            if Path::new(c).exists() {
                return Some(c.to_string());
            }
        }
    }

    None
}

/// Where the scraper keeps its browser profile between runs.
pub fn default_profile_dir() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("zepto-scout")
        .join("profile")
}

#[derive(Debug, Clone)]
pub struct LaunchOptions {
    pub headless: bool,
    /// Extra attempts after the first failed launch.
    pub retries: u32,
    pub profile_dir: PathBuf,
    pub width: u32,
    pub height: u32,
}

impl Default for LaunchOptions {
    fn default() -> Self {
        Self {
            headless: false,
            retries: crate::core::config::DEFAULT_LAUNCH_RETRIES,
            profile_dir: default_profile_dir(),
            width: 1920,
            height: 1080,
        }
    }
}

impl LaunchOptions {
    pub fn from_config(config: &ScoutConfig) -> Self {
        Self {
            headless: config.resolve_headless(),
            retries: config.resolve_launch_retries(),
            ..Self::default()
        }
    }

    pub fn attempts(&self) -> u32 {
        self.retries.saturating_add(1)
    }
}

/// Build a `BrowserConfig` for a desktop-sized window.
pub fn build_browser_config(exe: &str, opts: &LaunchOptions) -> Result<BrowserConfig> {
    let mut builder = BrowserConfig::builder()
        .chrome_executable(exe)
        .user_data_dir(&opts.profile_dir)
        .viewport(Viewport {
            width: opts.width,
            height: opts.height,
            device_scale_factor: Some(1.0),
            emulating_mobile: false,
            is_landscape: true,
            has_touch: false,
        })
        .window_size(opts.width, opts.height)
        .arg("--disable-gpu")
        .arg("--no-sandbox")
        .arg("--disable-dev-shm-usage")
        .arg("--disable-extensions")
        .arg("--disable-infobars")
        .arg("--no-first-run")
        .arg("--no-default-browser-check")
        .arg("--disable-blink-features=AutomationControlled");

    if !opts.headless {
        builder = builder.with_head();
    }

    builder
        .build()
        .map_err(|e| anyhow!("Failed to build browser config: {}", e))
}

/// Remove the profile directory so the next launch starts clean.
fn clear_profile_dir(dir: &Path) {
    if !dir.exists() {
        return;
    }
    match std::fs::remove_dir_all(dir) {
        Ok(()) => info!("🧹 Cleared browser profile at {}", dir.display()),
        Err(e) => warn!("Could not clear browser profile {}: {}", dir.display(), e),
    }
}

/// One browser process with a single working tab.
pub struct BrowserSession {
    browser: Option<Browser>,
    handler_task: JoinHandle<()>,
    renderer: ChromiumRenderer,
}

impl BrowserSession {
    /// Launch with up to `opts.attempts()` tries.
    pub async fn launch(opts: &LaunchOptions) -> Result<Self, SessionError> {
        let exe = find_chrome_executable().ok_or(SessionError::BrowserNotFound)?;
        let attempts = opts.attempts();
        let mut last_error = String::new();

        for attempt in 1..=attempts {
            info!("🚀 Launching browser ({}), attempt {}/{}", exe, attempt, attempts);
            match Self::try_launch(&exe, opts).await {
                Ok(session) => {
                    info!("✅ Browser ready");
                    return Ok(session);
                }
                Err(e) => {
                    warn!("⚠️ Browser launch attempt {} failed: {:#}", attempt, e);
                    last_error = format!("{:#}", e);
                    if attempt < attempts {
                        clear_profile_dir(&opts.profile_dir);
                        tokio::time::sleep(RETRY_PAUSE).await;
                    }
                }
            }
        }

        Err(SessionError::LaunchFailed {
            attempts,
            message: last_error,
        })
    }

    async fn try_launch(exe: &str, opts: &LaunchOptions) -> Result<Self> {
        let config = build_browser_config(exe, opts)?;
        let (mut browser, mut handler) = Browser::launch(config)
            .await
            .map_err(|e| anyhow!("Failed to launch browser ({}): {}", exe, e))?;

        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    debug!("CDP handler error: {}", e);
                }
            }
        });

        let page = match browser.new_page("about:blank").await {
            Ok(page) => page,
            Err(e) => {
                // don't let a close error shadow the tab error
                if let Err(close_err) = browser.close().await {
                    warn!("Browser close error (non-fatal): {}", close_err);
                }
                handler_task.abort();
                return Err(anyhow!(SessionError::PageUnavailable(e.to_string())));
            }
        };

        Ok(Self {
            browser: Some(browser),
            handler_task,
            renderer: ChromiumRenderer::new(page),
        })
    }

    pub fn renderer(&self) -> &ChromiumRenderer {
        &self.renderer
    }

    /// Close the browser and stop the CDP handler.
    pub async fn close(mut self) {
        if let Some(mut browser) = self.browser.take() {
            if let Err(e) = browser.close().await {
                warn!("Browser close error (non-fatal): {}", e);
            }
            let _ = browser.wait().await;
            info!("🛑 Browser closed");
        }
        self.handler_task.abort();
    }
}

impl Drop for BrowserSession {
    fn drop(&mut self) {
        let Some(mut browser) = self.browser.take() else {
            return;
        };
        // Drop cannot await; hand the close to the runtime if there is one.
        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            return;
        };
        handle.spawn(async move {
            let _ = browser.close().await;
        });
    }
}

/// `base` plus a uniformly drawn extra delay in `[0, jitter]`.
pub fn jittered(base: Duration, jitter: Duration) -> Duration {
    let max_ms = u64::try_from(jitter.as_millis()).unwrap_or(u64::MAX);
    if max_ms == 0 {
        return base;
    }
    let extra = Uniform::new_inclusive(0u64, max_ms)
        .map(|dist| dist.sample(&mut rand::rng()))
        .unwrap_or(0);
    base + Duration::from_millis(extra)
}

/// Sleep for a jittered `base`. Zero durations return immediately.
pub async fn pace(base: Duration, jitter: Duration) {
    let wait = jittered(base, jitter);
    if !wait.is_zero() {
        tokio::time::sleep(wait).await;
    }
}
