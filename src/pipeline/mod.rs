//! Snapshot-to-records pipeline. Everything here is synchronous and works on
//! serialized HTML, so it runs the same against a live tab or a fixture.

pub mod aggregate;
pub mod classify;
pub mod discover;
pub mod dom;
pub mod fields;
pub mod product_url;

use crate::core::types::ProductRecord;
use classify::{CategoryRule, Verdict};
use scraper::Html;
use tracing::debug;
use url::Url;

/// Records extracted from one page snapshot.
#[derive(Debug, Clone, Default)]
pub struct PageExtraction {
    pub cards_found: usize,
    /// Named records that passed the category rule, in page order.
    pub records: Vec<ProductRecord>,
    pub unnamed: usize,
    pub rejected: usize,
}

/// Discover, extract and classify every card in `html`.
pub fn extract_page(html: &str, page_url: &str, rule: &CategoryRule) -> PageExtraction {
    let document = Html::parse_document(html);
    let base = Url::parse(page_url).ok();
    let cards = discover::discover_cards(&document, base.as_ref());

    let mut extraction = PageExtraction {
        cards_found: cards.len(),
        ..PageExtraction::default()
    };

    for card in &cards {
        let record = fields::extract_record(card, base.as_ref());
        if !record.is_persistable() {
            extraction.unnamed += 1;
            continue;
        }
        match rule.evaluate(&record.name, &record.product_url) {
            Verdict::Included(keyword) => {
                debug!("  + {} [{}] ({})", record.name, record.price, keyword);
                extraction.records.push(record);
            }
            Verdict::Admitted => {
                debug!("  + {} [{}] (unfiltered)", record.name, record.price);
                extraction.records.push(record);
            }
            Verdict::Excluded(keyword) => {
                debug!("  - {} (excluded by '{}')", record.name, keyword);
                extraction.rejected += 1;
            }
            Verdict::Unmatched => {
                debug!("  - {} (no category keyword)", record.name);
                extraction.rejected += 1;
            }
        }
    }

    extraction
}
