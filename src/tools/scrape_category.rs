//! The per-category driver: main page, then every discovered subcategory.

use crate::catalog::CategoryProfile;
use crate::core::config::Timings;
use crate::core::types::ProductRecord;
use crate::core::RenderError;
use crate::pipeline::aggregate::{CrossPageAggregator, PageAudit};
use crate::pipeline::{extract_page, PageExtraction};
use crate::scraping::browser_manager::pace;
use crate::scraping::PageRenderer;
use crate::tools::subcategories::{discover_subcategories, Subcategory};
use scraper::{Html, Selector};
use std::time::Duration;
use tracing::{debug, info, warn};

const MAIN_PAGE_LABEL: &str = "Main page";

/// Everything one category run produced.
#[derive(Debug, Clone)]
pub struct CategoryRun {
    pub slug: String,
    pub title: String,
    pub records: Vec<ProductRecord>,
    pub subcategories: Vec<Subcategory>,
    pub audit: Vec<PageAudit>,
    pub removed_in_final_pass: usize,
}

/// Markers of the storefront's error page in the page source. "egg-sit" is
/// the wording of its 404 illustration.
const NOT_FOUND_TEXT: &[&str] = &["page not found", "egg-sit"];

/// Whether the snapshot is the storefront's 404 page.
///
/// A bare "404" only counts in the URL or title; the page source is full of
/// prices and asset hashes that contain it.
pub fn is_not_found_page(html: &str, url: &str) -> bool {
    if url.to_lowercase().contains("404") {
        return true;
    }
    let lower = html.to_lowercase();
    if NOT_FOUND_TEXT.iter().any(|marker| lower.contains(marker)) {
        return true;
    }
    let Ok(selector) = Selector::parse("title") else {
        return false;
    };
    Html::parse_document(html)
        .select(&selector)
        .next()
        .map(|title| title.text().collect::<String>().to_lowercase())
        .is_some_and(|title| title.contains("404") || title.contains("not found"))
}

/// Open the category's main listing, retrying the direct URL once when the
/// storefront answers with its not-found page.
async fn open_main_page<R>(
    renderer: &R,
    profile: &CategoryProfile,
    timings: &Timings,
) -> Result<(), RenderError>
where
    R: PageRenderer + ?Sized,
{
    for attempt in 1..=2 {
        renderer.navigate(&profile.url).await?;
        pace(timings.page_load, timings.jitter).await;
        let html = renderer.snapshot().await?;
        let here = renderer.current_url().await?;
        if !is_not_found_page(&html, &here) {
            return Ok(());
        }
        warn!("⚠️ Not-found page at {} (attempt {}/2)", here, attempt);
    }
    Err(RenderError::NotFound(profile.url.clone()))
}

/// Scroll to the bottom until the grid stops growing, then back to the top.
///
/// Returns the last price-anchor count.
pub async fn scroll_for_products<R>(renderer: &R, timings: &Timings) -> usize
where
    R: PageRenderer + ?Sized,
{
    let mut last_count = renderer.count_price_anchors().await.unwrap_or(0);
    let mut last_height = renderer.scroll_height().await.unwrap_or(0);
    let mut stable = 0u32;

    for round in 1..=timings.max_scrolls {
        if let Err(e) = renderer.scroll_to_bottom().await {
            warn!("Scroll failed on round {}: {}", round, e);
            break;
        }
        pace(timings.scroll_pause, Duration::ZERO).await;

        let count = renderer.count_price_anchors().await.unwrap_or(last_count);
        let height = renderer.scroll_height().await.unwrap_or(last_height);
        if count > last_count || height > last_height {
            debug!("   scroll {}: {} price anchors (height {})", round, count, height);
            last_count = count.max(last_count);
            last_height = height.max(last_height);
            stable = 0;
        } else {
            stable += 1;
            if stable >= timings.stable_scrolls {
                debug!("   no new products after {} scroll(s), stopping", stable);
                break;
            }
        }
    }

    if let Err(e) = renderer.scroll_to_top().await {
        warn!("Scroll to top failed: {}", e);
    }
    pace(timings.scroll_settle, Duration::ZERO).await;
    last_count
}

/// Extract the page the renderer is currently showing.
///
/// No price anchors after the wait triggers one reload with an extended wait;
/// still nothing yields an empty extraction rather than an error.
pub async fn extract_current_page<R>(
    renderer: &R,
    profile: &CategoryProfile,
    timings: &Timings,
) -> Result<PageExtraction, RenderError>
where
    R: PageRenderer + ?Sized,
{
    pace(timings.settle, timings.jitter).await;

    let url = renderer.current_url().await?;
    if profile.is_off_category_url(&url) {
        warn!(
            "⚠️ Might not be on the {} page (current URL: {})",
            profile.display_title(),
            url
        );
    }

    if !renderer.wait_for_price_anchor(timings.extract_wait).await {
        warn!("⚠️ No prices on the page yet, refreshing once");
        renderer.reload().await?;
        pace(timings.refresh_wait, timings.jitter).await;
        if !renderer.wait_for_price_anchor(timings.extract_wait).await {
            warn!("⚠️ Still no prices after refresh, treating page as empty");
            return Ok(PageExtraction::default());
        }
    }

    let html = renderer.snapshot().await?;
    let url = renderer.current_url().await?;
    let page = extract_page(&html, &url, &profile.rule);
    info!(
        "   🔍 {} card(s): {} kept, {} off-category, {} unnamed",
        page.cards_found,
        page.records.len(),
        page.rejected,
        page.unnamed
    );
    for (i, record) in page.records.iter().enumerate() {
        debug!("   [{}] {} | ₹{}", i + 1, record.name, record.price);
    }
    Ok(page)
}

/// Navigate to `url`, let the grid load, scroll it out and extract it.
pub async fn scrape_listing<R>(
    renderer: &R,
    profile: &CategoryProfile,
    url: &str,
    load_wait: Duration,
    timings: &Timings,
) -> Result<PageExtraction, RenderError>
where
    R: PageRenderer + ?Sized,
{
    renderer.navigate(url).await?;
    pace(load_wait, timings.jitter).await;
    if !renderer.wait_for_price_anchor(timings.price_wait).await {
        debug!("   prices not visible yet, scrolling anyway");
    }
    scroll_for_products(renderer, timings).await;
    extract_current_page(renderer, profile, timings).await
}

/// Scrape one category end to end.
///
/// Only a failure on the main page (including a not-found page that survives
/// one retry) aborts the category; each subcategory page fails on its own and
/// contributes nothing.
pub async fn scrape_category<R>(
    renderer: &R,
    profile: &CategoryProfile,
    timings: &Timings,
) -> Result<CategoryRun, RenderError>
where
    R: PageRenderer + ?Sized,
{
    info!("📂 {} ({})", profile.display_title(), profile.url);
    let mut aggregator = CrossPageAggregator::new();

    open_main_page(renderer, profile, timings).await?;
    if !renderer.wait_for_price_anchor(timings.price_wait).await {
        warn!("⚠️ Prices did not appear within {:?} on the main page", timings.price_wait);
    }

    let html = renderer.snapshot().await?;
    let here = renderer.current_url().await?;
    let subcategories = discover_subcategories(&html, &here, &profile.subcategories);
    info!("🗂️ Found {} subcategory page(s)", subcategories.len());
    for sub in &subcategories {
        debug!("   - {} → {}", sub.name, sub.url);
    }

    scroll_for_products(renderer, timings).await;
    let main = extract_current_page(renderer, profile, timings).await?;
    aggregator.absorb(MAIN_PAGE_LABEL, main);

    let total = subcategories.len();
    for (i, sub) in subcategories.iter().enumerate() {
        info!("➡️ [{}/{}] {}", i + 1, total, sub.name);
        match scrape_listing(renderer, profile, &sub.url, timings.subcategory_load, timings).await {
            Ok(page) => {
                aggregator.absorb(sub.name.as_str(), page);
            }
            Err(e) => aggregator.record_failure(sub.name.as_str(), e.to_string()),
        }
    }

    if subcategories.is_empty() && aggregator.is_empty() {
        info!("🔁 Nothing found yet, giving the main page one more pass");
        match scrape_listing(renderer, profile, &profile.url, timings.page_load, timings).await {
            Ok(page) => {
                aggregator.absorb("Main page (retry)", page);
            }
            Err(e) => aggregator.record_failure("Main page (retry)", e.to_string()),
        }
    }

    let done = aggregator.finish();
    info!(
        "✅ {}: {} unique product(s) from {} page(s)",
        profile.display_title(),
        done.records.len(),
        done.audit.len()
    );

    Ok(CategoryRun {
        slug: profile.slug.clone(),
        title: profile.display_title().to_string(),
        records: done.records,
        subcategories,
        audit: done.audit,
        removed_in_final_pass: done.removed_in_final_pass,
    })
}
