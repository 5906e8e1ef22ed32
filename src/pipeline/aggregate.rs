//! Cross-page merge for one category run.

use crate::core::types::ProductRecord;
use crate::pipeline::PageExtraction;
use std::collections::HashSet;
use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageStatus {
    /// Product cards were found, whether or not any passed the category rule.
    Scraped,
    /// Loaded but showed no product cards.
    Empty,
    Failed(String),
}

/// Per-page line of the run audit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageAudit {
    pub label: String,
    /// Product cards on the page, before classification.
    pub cards: usize,
    /// Records that passed the category rule.
    pub offered: usize,
    pub added: usize,
    pub status: PageStatus,
}

/// Accumulates classified records across pages, first occurrence wins.
#[derive(Debug, Default)]
pub struct CrossPageAggregator {
    seen: HashSet<String>,
    records: Vec<ProductRecord>,
    audit: Vec<PageAudit>,
}

/// Result of a finished aggregation.
#[derive(Debug, Clone, Default)]
pub struct Aggregation {
    pub records: Vec<ProductRecord>,
    pub audit: Vec<PageAudit>,
    /// Records dropped by the final pass.
    pub removed_in_final_pass: usize,
}

impl CrossPageAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Append unseen records from one page. Returns how many were new.
    pub fn absorb(&mut self, label: impl Into<String>, page: PageExtraction) -> usize {
        let label = label.into();
        let cards = page.cards_found;
        let offered = page.records.len();
        let mut added = 0;
        for record in page.records {
            if self.seen.insert(record.dedup_token()) {
                self.records.push(record);
                added += 1;
            }
        }
        info!(
            "   ✓ {}: {} new product(s) of {} (total: {})",
            label,
            added,
            offered,
            self.records.len()
        );
        if cards > 0 && offered == 0 {
            warn!("   ⚠️ {}: all {} card(s) were off-category", label, cards);
        }
        let status = if cards == 0 {
            PageStatus::Empty
        } else {
            PageStatus::Scraped
        };
        self.audit.push(PageAudit {
            label,
            cards,
            offered,
            added,
            status,
        });
        added
    }

    /// Note a page that could not be processed. It contributes nothing.
    pub fn record_failure(&mut self, label: impl Into<String>, reason: impl Into<String>) {
        let label = label.into();
        let reason = reason.into();
        warn!("   ✗ {}: {}", label, reason);
        self.audit.push(PageAudit {
            label,
            cards: 0,
            offered: 0,
            added: 0,
            status: PageStatus::Failed(reason),
        });
    }

    pub fn audit(&self) -> &[PageAudit] {
        &self.audit
    }

    pub fn finish(self) -> Aggregation {
        let (records, removed) = dedup_records(self.records);
        if removed > 0 {
            info!("Removed {} duplicate product(s) in final pass", removed);
        }
        Aggregation {
            records,
            audit: self.audit,
            removed_in_final_pass: removed,
        }
    }
}

/// Drop later records whose dedup token was already seen. Idempotent.
pub fn dedup_records(records: Vec<ProductRecord>) -> (Vec<ProductRecord>, usize) {
    let before = records.len();
    let mut seen = HashSet::new();
    let unique: Vec<ProductRecord> = records
        .into_iter()
        .filter(|r| seen.insert(r.dedup_token()))
        .collect();
    let removed = before - unique.len();
    (unique, removed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn record(name: &str, price: &str, url: &str) -> ProductRecord {
        let at = NaiveDate::from_ymd_opt(2025, 2, 2)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        let mut r = ProductRecord::blank(at);
        r.name = name.into();
        r.price = price.into();
        if !url.is_empty() {
            r.product_url = url.into();
        }
        r
    }

    fn records() -> Vec<ProductRecord> {
        vec![
            record("Coke", "40", "https://z.com/pn/coke/pvid/1"),
            record("Sprite", "40", "https://z.com/pn/sprite/pvid/2"),
            record("Loose Lemonade", "30", ""),
        ]
    }

    fn extracted(records: Vec<ProductRecord>) -> PageExtraction {
        PageExtraction {
            cards_found: records.len(),
            records,
            ..PageExtraction::default()
        }
    }

    fn page() -> PageExtraction {
        extracted(records())
    }

    #[test]
    fn absorbing_the_same_page_twice_adds_nothing() {
        let mut agg = CrossPageAggregator::new();
        assert_eq!(agg.absorb("main", page()), 3);
        assert_eq!(agg.absorb("main again", page()), 0);
        assert_eq!(agg.len(), 3);

        let done = agg.finish();
        assert_eq!(done.records.len(), 3);
        assert_eq!(done.removed_in_final_pass, 0);
        assert_eq!(done.audit[1].added, 0);
        assert_eq!(done.audit[1].offered, 3);
    }

    #[test]
    fn url_less_records_dedup_by_name_and_price() {
        let mut agg = CrossPageAggregator::new();
        agg.absorb("a", extracted(vec![record("Loose Lemonade", "30", "")]));
        agg.absorb(
            "b",
            extracted(vec![
                record("Loose Lemonade", "30", ""),
                record("Loose Lemonade", "35", ""),
            ]),
        );
        let names: Vec<_> = agg
            .finish()
            .records
            .into_iter()
            .map(|r| format!("{}|{}", r.name, r.price))
            .collect();
        assert_eq!(names, vec!["Loose Lemonade|30", "Loose Lemonade|35"]);
    }

    #[test]
    fn failures_and_empty_pages_are_audited() {
        let mut agg = CrossPageAggregator::new();
        agg.absorb("Soft Drinks", page());
        agg.record_failure("Juices", "navigation timed out");
        agg.absorb("Water", PageExtraction::default());

        let audit = agg.finish().audit;
        assert_eq!(audit.len(), 3);
        assert_eq!(audit[0].status, PageStatus::Scraped);
        assert_eq!(audit[1].status, PageStatus::Failed("navigation timed out".into()));
        assert_eq!(audit[2].status, PageStatus::Empty);
    }

    #[test]
    fn page_with_only_off_category_cards_is_not_empty() {
        let mut agg = CrossPageAggregator::new();
        let bread_only = PageExtraction {
            cards_found: 1,
            rejected: 1,
            ..PageExtraction::default()
        };
        assert_eq!(agg.absorb("Bakery leak", bread_only), 0);

        let audit = &agg.audit()[0];
        assert_eq!(audit.status, PageStatus::Scraped);
        assert_eq!((audit.cards, audit.offered, audit.added), (1, 0, 0));
    }

    #[test]
    fn final_pass_is_idempotent() {
        let mut doubled = records();
        doubled.extend(records());
        let (once, removed) = dedup_records(doubled);
        assert_eq!(removed, 3);
        let (twice, removed_again) = dedup_records(once.clone());
        assert_eq!(removed_again, 0);
        assert_eq!(once, twice);
    }
}
