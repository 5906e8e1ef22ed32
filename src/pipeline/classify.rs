//! Keyword-rule category membership.
//!
//! Storefront listings leak neighbouring aisles (a "Breakfast & Sauces" page
//! happily shows bread and butter), so every record is checked against the
//! category's rule before it is kept.
//!
//! Evaluation order matters and is fixed:
//! 1. any `valid` keyword in the combined text → member;
//! 2. the first `invalid` keyword found → not a member, unless an exception
//!    for that keyword is satisfied, in which case scanning continues;
//! 3. otherwise → not a member, unless the rule sets `accept_unmatched`.
//!
//! Matching is plain lowercase substring search over `name + " " + product_url`.
//! Several keywords carry deliberate spaces (`"egg "`, `" milk"`) to approximate
//! word boundaries, so they must not be trimmed.

use crate::core::types::ProductRecord;
use serde::{Deserialize, Serialize};

/// An `invalid` keyword that is forgiven when any of `unless_any` also appears,
/// e.g. `butter` unless `peanut butter`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordException {
    pub keyword: String,
    pub unless_any: Vec<String>,
}

impl KeywordException {
    pub fn new(keyword: &str, unless_any: &[&str]) -> Self {
        Self {
            keyword: keyword.to_string(),
            unless_any: unless_any.iter().map(|s| s.to_string()).collect(),
        }
    }

    pub(crate) fn excuses(&self, keyword: &str, combined: &str) -> bool {
        self.keyword == keyword && self.unless_any.iter().any(|phrase| combined.contains(phrase.as_str()))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRule {
    /// Lowercase substrings that confirm membership. Checked first.
    pub valid: Vec<String>,
    /// Lowercase substrings that reject membership.
    #[serde(default)]
    pub invalid: Vec<String>,
    #[serde(default)]
    pub exceptions: Vec<KeywordException>,
    /// Keep records that no keyword decided. For aisles without neighbours
    /// worth filtering out.
    #[serde(default)]
    pub accept_unmatched: bool,
}

/// Outcome of a rule evaluation, naming the keyword that decided it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict<'r> {
    Included(&'r str),
    Excluded(&'r str),
    /// No keyword decided and the rule keeps such records.
    Admitted,
    Unmatched,
}

impl Verdict<'_> {
    pub fn is_member(&self) -> bool {
        matches!(self, Verdict::Included(_) | Verdict::Admitted)
    }
}

/// Lowercased `name + " " + url`, the text every keyword is matched against.
pub fn combined_text(name: &str, product_url: &str) -> String {
    format!("{} {}", name.to_lowercase(), product_url.to_lowercase())
}

impl CategoryRule {
    pub fn new(valid: &[&str], invalid: &[&str], exceptions: Vec<KeywordException>) -> Self {
        Self {
            valid: valid.iter().map(|s| s.to_string()).collect(),
            invalid: invalid.iter().map(|s| s.to_string()).collect(),
            exceptions,
            accept_unmatched: false,
        }
    }

    /// A rule that keeps every record not rejected by an `invalid` keyword.
    pub fn accept_all(invalid: &[&str]) -> Self {
        Self {
            accept_unmatched: true,
            ..Self::new(&[], invalid, Vec::new())
        }
    }

    pub fn evaluate(&self, name: &str, product_url: &str) -> Verdict<'_> {
        let combined = combined_text(name, product_url);

        if let Some(keyword) = self.valid.iter().find(|kw| combined.contains(kw.as_str())) {
            return Verdict::Included(keyword);
        }

        for keyword in &self.invalid {
            if !combined.contains(keyword.as_str()) {
                continue;
            }
            if self.exceptions.iter().any(|ex| ex.excuses(keyword, &combined)) {
                continue;
            }
            return Verdict::Excluded(keyword);
        }

        if self.accept_unmatched {
            Verdict::Admitted
        } else {
            Verdict::Unmatched
        }
    }

    pub fn classify(&self, record: &ProductRecord) -> bool {
        self.evaluate(&record.name, &record.product_url).is_member()
    }
}
