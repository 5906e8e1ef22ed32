use crate::catalog::CategoryProfile;
use std::path::PathBuf;
use std::time::Duration;

// ---------------------------------------------------------------------------
// ScoutConfig: file-based config loader (zepto-scout.json) with env-var fallback
// ---------------------------------------------------------------------------

pub const CONFIG_FILE_NAME: &str = "zepto-scout.json";
pub const ENV_CONFIG_PATH: &str = "ZEPTO_SCOUT_CONFIG";
pub const ENV_OUTPUT_DIR: &str = "ZEPTO_SCOUT_OUTPUT_DIR";
pub const ENV_HEADLESS: &str = "ZEPTO_SCOUT_HEADLESS";
pub const ENV_LAUNCH_RETRIES: &str = "ZEPTO_SCOUT_LAUNCH_RETRIES";

pub const DEFAULT_HOME_URL: &str = "https://www.zepto.com";
pub const DEFAULT_OUTPUT_DIR: &str = "output";
pub const DEFAULT_LAUNCH_RETRIES: u32 = 2;

/// Column set written to CSV.
#[derive(serde::Deserialize, Default, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CsvLayout {
    /// `name,price,discount,quantity,image_url,product_url,scraped_at`
    #[default]
    Standard,
    /// Adds `original_price` and `discount_percent`.
    Extended,
}

/// Pacing knobs (mirrors the `timings` key). All values in milliseconds.
#[derive(serde::Deserialize, Default, Clone, Debug)]
pub struct TimingsConfig {
    pub page_load_ms: Option<u64>,
    pub subcategory_load_ms: Option<u64>,
    pub settle_ms: Option<u64>,
    pub price_wait_ms: Option<u64>,
    pub extract_wait_ms: Option<u64>,
    pub refresh_wait_ms: Option<u64>,
    pub scroll_pause_ms: Option<u64>,
    pub jitter_ms: Option<u64>,
    pub close_delay_ms: Option<u64>,
}

/// Infinite-scroll policy (mirrors the `scroll` key).
#[derive(serde::Deserialize, Default, Clone, Debug)]
pub struct ScrollConfig {
    /// Hard cap on scroll-to-bottom rounds. Default: 30.
    pub max_scrolls: Option<u32>,
    /// Consecutive rounds without new price anchors before stopping. Default: 5.
    pub stable_scrolls: Option<u32>,
}

/// Top-level config loaded from `zepto-scout.json`.
#[derive(serde::Deserialize, Default, Clone, Debug)]
pub struct ScoutConfig {
    pub output_dir: Option<String>,
    pub headless: Option<bool>,
    pub home_url: Option<String>,
    /// Pause for a manual delivery-location pick before scraping. Default: `true`.
    pub prompt_for_location: Option<bool>,
    pub launch_retries: Option<u32>,
    pub csv_layout: Option<CsvLayout>,
    #[serde(default)]
    pub timings: TimingsConfig,
    #[serde(default)]
    pub scroll: ScrollConfig,
    /// Extra or replacement category profiles, keyed by slug.
    #[serde(default)]
    pub categories: Vec<CategoryProfile>,
}

fn env_non_empty(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

impl ScoutConfig {
    /// Output directory: JSON field → `ZEPTO_SCOUT_OUTPUT_DIR` → `output`.
    pub fn resolve_output_dir(&self) -> PathBuf {
        if let Some(dir) = self.output_dir.as_deref().filter(|d| !d.trim().is_empty()) {
            return PathBuf::from(dir);
        }
        PathBuf::from(env_non_empty(ENV_OUTPUT_DIR).unwrap_or_else(|| DEFAULT_OUTPUT_DIR.to_string()))
    }

    /// Headless mode: JSON field → `ZEPTO_SCOUT_HEADLESS` → `false`.
    ///
    /// A visible window is the default so the operator can pick a delivery location.
    pub fn resolve_headless(&self) -> bool {
        if let Some(b) = self.headless {
            return b;
        }
        env_non_empty(ENV_HEADLESS)
            .and_then(|v| parse_flag(&v))
            .unwrap_or(false)
    }

    pub fn resolve_home_url(&self) -> String {
        self.home_url
            .as_deref()
            .filter(|u| !u.trim().is_empty())
            .unwrap_or(DEFAULT_HOME_URL)
            .to_string()
    }

    pub fn resolve_prompt_for_location(&self) -> bool {
        self.prompt_for_location.unwrap_or(true)
    }

    /// Launch retries after the first attempt: JSON field → `ZEPTO_SCOUT_LAUNCH_RETRIES` → 2.
    pub fn resolve_launch_retries(&self) -> u32 {
        if let Some(n) = self.launch_retries {
            return n;
        }
        env_non_empty(ENV_LAUNCH_RETRIES)
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(DEFAULT_LAUNCH_RETRIES)
    }

    pub fn resolve_csv_layout(&self) -> CsvLayout {
        self.csv_layout.unwrap_or_default()
    }

    pub fn resolve_timings(&self) -> Timings {
        let base = Timings::default();
        let ms = |value: Option<u64>, fallback: Duration| {
            value.map(Duration::from_millis).unwrap_or(fallback)
        };
        let t = &self.timings;
        Timings {
            page_load: ms(t.page_load_ms, base.page_load),
            subcategory_load: ms(t.subcategory_load_ms, base.subcategory_load),
            settle: ms(t.settle_ms, base.settle),
            price_wait: ms(t.price_wait_ms, base.price_wait),
            extract_wait: ms(t.extract_wait_ms, base.extract_wait),
            refresh_wait: ms(t.refresh_wait_ms, base.refresh_wait),
            scroll_pause: ms(t.scroll_pause_ms, base.scroll_pause),
            scroll_settle: base.scroll_settle,
            jitter: ms(t.jitter_ms, base.jitter),
            close_delay: ms(t.close_delay_ms, base.close_delay),
            max_scrolls: self.scroll.max_scrolls.unwrap_or(base.max_scrolls),
            stable_scrolls: self.scroll.stable_scrolls.unwrap_or(base.stable_scrolls).max(1),
        }
    }
}

/// Resolved pacing for one run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Timings {
    /// After navigating to a category's main page.
    pub page_load: Duration,
    /// After navigating to a subcategory page.
    pub subcategory_load: Duration,
    /// Before reading a page for extraction.
    pub settle: Duration,
    /// Bound on the wait for the first price anchor on a listing page.
    pub price_wait: Duration,
    /// Shorter bound used right before extraction.
    pub extract_wait: Duration,
    /// After a refresh triggered by an empty page.
    pub refresh_wait: Duration,
    pub scroll_pause: Duration,
    /// After scrolling back to the top.
    pub scroll_settle: Duration,
    /// Upper bound of random extra delay added to each pause.
    pub jitter: Duration,
    /// Keeps the browser open briefly after the run for inspection.
    pub close_delay: Duration,
    pub max_scrolls: u32,
    pub stable_scrolls: u32,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            page_load: Duration::from_millis(8_000),
            subcategory_load: Duration::from_millis(5_000),
            settle: Duration::from_millis(5_000),
            price_wait: Duration::from_millis(15_000),
            extract_wait: Duration::from_millis(10_000),
            refresh_wait: Duration::from_millis(8_000),
            scroll_pause: Duration::from_millis(3_000),
            scroll_settle: Duration::from_millis(2_000),
            jitter: Duration::from_millis(1_000),
            close_delay: Duration::from_millis(10_000),
            max_scrolls: 30,
            stable_scrolls: 5,
        }
    }
}

impl Timings {
    /// No pauses at all and a short scroll budget. Used against in-memory pages.
    pub fn immediate() -> Self {
        Self {
            page_load: Duration::ZERO,
            subcategory_load: Duration::ZERO,
            settle: Duration::ZERO,
            price_wait: Duration::ZERO,
            extract_wait: Duration::ZERO,
            refresh_wait: Duration::ZERO,
            scroll_pause: Duration::ZERO,
            scroll_settle: Duration::ZERO,
            jitter: Duration::ZERO,
            close_delay: Duration::ZERO,
            max_scrolls: 3,
            stable_scrolls: 1,
        }
    }
}

/// Load `zepto-scout.json` from standard locations.
///
/// Search order (first found wins):
/// 1. `ZEPTO_SCOUT_CONFIG` env var path
/// 2. `./zepto-scout.json`
/// 3. `../zepto-scout.json`
///
/// Missing file → `ScoutConfig::default()` (silent, env-var fallbacks apply).
/// Parse error → log a warning, return `ScoutConfig::default()`.
pub fn load_scout_config() -> ScoutConfig {
    let mut candidates = vec![
        PathBuf::from(CONFIG_FILE_NAME),
        PathBuf::from("..").join(CONFIG_FILE_NAME),
    ];
    if let Some(env_path) = env_non_empty(ENV_CONFIG_PATH) {
        candidates.insert(0, PathBuf::from(env_path));
    }

    for path in &candidates {
        let Ok(contents) = std::fs::read_to_string(path) else {
            continue;
        };
        return match parse_scout_config(&contents) {
            Ok(cfg) => {
                tracing::info!("{} loaded from {}", CONFIG_FILE_NAME, path.display());
                cfg
            }
            Err(e) => {
                tracing::warn!(
                    "{} parse error at {}: {}; using defaults",
                    CONFIG_FILE_NAME,
                    path.display(),
                    e
                );
                ScoutConfig::default()
            }
        };
    }

    ScoutConfig::default()
}

pub fn parse_scout_config(contents: &str) -> Result<ScoutConfig, serde_json::Error> {
    serde_json::from_str(contents)
}
