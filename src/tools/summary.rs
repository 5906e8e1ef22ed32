//! End-of-run report: per-group product counts and the page audit.

use crate::catalog::BreakdownGroup;
use crate::core::types::ProductRecord;
use crate::pipeline::aggregate::{PageAudit, PageStatus};
use tracing::info;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BreakdownLine {
    pub label: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Breakdown {
    pub total: usize,
    pub lines: Vec<BreakdownLine>,
    /// Records not covered by the group counts.
    pub others: usize,
}

/// Count records per group by name keyword. A record may land in several
/// groups; `others` is whatever the group counts leave over.
pub fn breakdown(records: &[ProductRecord], groups: &[BreakdownGroup]) -> Breakdown {
    let names: Vec<String> = records.iter().map(|r| r.name.to_lowercase()).collect();
    let lines: Vec<BreakdownLine> = groups
        .iter()
        .map(|group| BreakdownLine {
            label: group.label.clone(),
            count: names
                .iter()
                .filter(|name| group.keywords.iter().any(|k| name.contains(k.as_str())))
                .count(),
        })
        .collect();
    let covered: usize = lines.iter().map(|l| l.count).sum();
    Breakdown {
        total: records.len(),
        others: records.len().saturating_sub(covered),
        lines,
    }
}

pub fn log_breakdown(title: &str, report: &Breakdown) {
    info!("📊 {}: {} product(s)", title, report.total);
    for line in &report.lines {
        info!("   {}: {}", line.label, line.count);
    }
    if report.others > 0 {
        info!("   Others: {}", report.others);
    }
}

pub fn log_audit(audit: &[PageAudit]) {
    for page in audit {
        match &page.status {
            PageStatus::Scraped => info!(
                "   {}: +{} of {} ({} card(s))",
                page.label, page.added, page.offered, page.cards
            ),
            PageStatus::Empty => info!("   {}: no product cards", page.label),
            PageStatus::Failed(reason) => info!("   {}: failed ({})", page.label, reason),
        }
    }
}
