use std::path::PathBuf;
use thiserror::Error;

/// Steps printed when the browser cannot be brought up at all.
pub const LAUNCH_REMEDIATION: &[&str] = &[
    "Make sure Chrome, Chromium or Brave is installed and up to date.",
    "Set CHROME_EXECUTABLE to the browser binary if it lives in a non-standard location.",
    "Close any browser window still holding the scraper profile, then retry.",
    "Delete the scraper profile directory if it looks corrupted.",
];

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("no Chromium-family browser found (install Chrome, Chromium or Brave, or set CHROME_EXECUTABLE)")]
    BrowserNotFound,

    #[error("browser config error: {0}")]
    Config(String),

    #[error("browser launch failed after {attempts} attempt(s): {message}")]
    LaunchFailed { attempts: u32, message: String },

    #[error("could not open a tab: {0}")]
    PageUnavailable(String),
}

impl SessionError {
    /// Operator guidance for errors that stop the run before any page loads.
    pub fn remediation(&self) -> &'static [&'static str] {
        match self {
            SessionError::BrowserNotFound | SessionError::LaunchFailed { .. } => LAUNCH_REMEDIATION,
            _ => &[],
        }
    }
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("navigation to {url} failed: {message}")]
    Navigation { url: String, message: String },

    #[error("page reload failed: {0}")]
    Reload(String),

    #[error("script evaluation failed: {0}")]
    Script(String),

    #[error("could not read page content: {0}")]
    Snapshot(String),

    #[error("{0} shows the storefront's not-found page")]
    NotFound(String),
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("could not write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
