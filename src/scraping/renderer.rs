//! The page-rendering seam between the scraper loop and a live browser tab.
//!
//! Everything the pipeline needs from the browser is a serialized DOM
//! snapshot plus a handful of scroll primitives; every DOM query runs on the
//! parsed snapshot. Tests drive the loop with an in-memory implementation.

use crate::core::RenderError;
use crate::pipeline::discover;
use async_trait::async_trait;
use chromiumoxide::Page;
use std::time::{Duration, Instant};

/// Poll interval for DOM-condition waits.
pub const POLL_INTERVAL: Duration = Duration::from_millis(250);

const SCROLL_HEIGHT_JS: &str =
    "Math.max(document.body ? document.body.scrollHeight : 0, document.documentElement.scrollHeight)";

const PRICE_ANCHOR_COUNT_JS: &str = r#"document.evaluate(
    "count(//*[contains(text(), '₹')])",
    document, null, XPathResult.NUMBER_TYPE, null
).numberValue"#;

#[async_trait]
pub trait PageRenderer: Send + Sync {
    async fn navigate(&self, url: &str) -> Result<(), RenderError>;

    async fn reload(&self) -> Result<(), RenderError>;

    async fn current_url(&self) -> Result<String, RenderError>;

    /// Rendered DOM as HTML.
    async fn snapshot(&self) -> Result<String, RenderError>;

    async fn scroll_to_bottom(&self) -> Result<(), RenderError>;

    async fn scroll_to_top(&self) -> Result<(), RenderError>;

    async fn scroll_height(&self) -> Result<u64, RenderError>;

    /// Elements currently showing the currency glyph.
    async fn count_price_anchors(&self) -> Result<usize, RenderError> {
        let html = self.snapshot().await?;
        Ok(discover::count_price_anchors(&html))
    }

    /// Poll until a price anchor shows up. A timeout is `false`, never an error.
    async fn wait_for_price_anchor(&self, timeout: Duration) -> bool {
        let start = Instant::now();
        loop {
            if let Ok(n) = self.count_price_anchors().await {
                if n > 0 {
                    return true;
                }
            }
            let elapsed = start.elapsed();
            if elapsed >= timeout {
                return false;
            }
            tokio::time::sleep(POLL_INTERVAL.min(timeout - elapsed)).await;
        }
    }
}

/// A live Chromium tab driven over CDP.
pub struct ChromiumRenderer {
    page: Page,
}

impl ChromiumRenderer {
    pub fn new(page: Page) -> Self {
        Self { page }
    }

    async fn eval_json(&self, js: &str) -> Result<serde_json::Value, RenderError> {
        self.page
            .evaluate(js)
            .await
            .map_err(|e| RenderError::Script(e.to_string()))?
            .into_value::<serde_json::Value>()
            .map_err(|e| RenderError::Script(e.to_string()))
    }
}

#[async_trait]
impl PageRenderer for ChromiumRenderer {
    async fn navigate(&self, url: &str) -> Result<(), RenderError> {
        self.page
            .goto(url)
            .await
            .map(|_| ())
            .map_err(|e| RenderError::Navigation {
                url: url.to_string(),
                message: e.to_string(),
            })
    }

    async fn reload(&self) -> Result<(), RenderError> {
        self.page
            .reload()
            .await
            .map(|_| ())
            .map_err(|e| RenderError::Reload(e.to_string()))
    }

    async fn current_url(&self) -> Result<String, RenderError> {
        match self.page.url().await {
            Ok(Some(url)) => Ok(url),
            Ok(None) => Ok(String::new()),
            Err(e) => Err(RenderError::Script(e.to_string())),
        }
    }

    async fn snapshot(&self) -> Result<String, RenderError> {
        self.page
            .content()
            .await
            .map_err(|e| RenderError::Snapshot(e.to_string()))
    }

    async fn scroll_to_bottom(&self) -> Result<(), RenderError> {
        self.eval_json("window.scrollTo(0, document.body.scrollHeight); true")
            .await
            .map(|_| ())
    }

    async fn scroll_to_top(&self) -> Result<(), RenderError> {
        self.eval_json("window.scrollTo(0, 0); true").await.map(|_| ())
    }

    async fn scroll_height(&self) -> Result<u64, RenderError> {
        Ok(self.eval_json(SCROLL_HEIGHT_JS).await?.as_u64().unwrap_or(0))
    }

    async fn count_price_anchors(&self) -> Result<usize, RenderError> {
        let count = self
            .eval_json(PRICE_ANCHOR_COUNT_JS)
            .await?
            .as_f64()
            .unwrap_or(0.0);
        Ok(count.max(0.0) as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Shows a price only after a number of snapshots.
    struct SlowPage {
        calls: AtomicUsize,
        ready_after: usize,
    }

    #[async_trait]
    impl PageRenderer for SlowPage {
        async fn navigate(&self, _url: &str) -> Result<(), RenderError> {
            Ok(())
        }
        async fn reload(&self) -> Result<(), RenderError> {
            Ok(())
        }
        async fn current_url(&self) -> Result<String, RenderError> {
            Ok("https://www.zepto.com/".into())
        }
        async fn snapshot(&self) -> Result<String, RenderError> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst);
            if n >= self.ready_after {
                Ok("<html><body><span>₹10</span></body></html>".into())
            } else {
                Ok("<html><body>loading</body></html>".into())
            }
        }
        async fn scroll_to_bottom(&self) -> Result<(), RenderError> {
            Ok(())
        }
        async fn scroll_to_top(&self) -> Result<(), RenderError> {
            Ok(())
        }
        async fn scroll_height(&self) -> Result<u64, RenderError> {
            Ok(0)
        }
    }

    #[tokio::test(start_paused = true)]
    async fn wait_polls_until_anchor_appears() {
        let page = SlowPage {
            calls: AtomicUsize::new(0),
            ready_after: 3,
        };
        assert!(page.wait_for_price_anchor(Duration::from_secs(5)).await);
        assert_eq!(page.calls.load(Ordering::SeqCst), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn wait_times_out_without_error() {
        let page = SlowPage {
            calls: AtomicUsize::new(0),
            ready_after: usize::MAX,
        };
        assert!(!page.wait_for_price_anchor(Duration::from_secs(1)).await);
    }

    #[tokio::test]
    async fn zero_timeout_still_checks_once() {
        let page = SlowPage {
            calls: AtomicUsize::new(0),
            ready_after: 0,
        };
        assert!(page.wait_for_price_anchor(Duration::ZERO).await);
    }
}
