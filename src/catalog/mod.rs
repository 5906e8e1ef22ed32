//! Category profiles: where a category lives on the storefront and how its
//! products and subcategory links are recognised.

mod builtin;

use crate::core::config::ScoutConfig;
use crate::pipeline::classify::{CategoryRule, KeywordException};
use serde::{Deserialize, Serialize};
use tracing::info;

/// How subcategory links are picked out of a category's main page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubcategoryHints {
    /// A link is considered when its text or URL contains one of these.
    #[serde(default)]
    pub keywords: Vec<String>,
    /// ...and rejected when its text or URL contains one of these.
    #[serde(default)]
    pub excluded: Vec<String>,
    #[serde(default)]
    pub exceptions: Vec<KeywordException>,
    /// Listing URLs (`/cn/`) qualify on a path token even when the link text doesn't.
    #[serde(default)]
    pub path_tokens: Vec<String>,
}

/// A labelled keyword group for the end-of-run breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakdownGroup {
    pub label: String,
    pub keywords: Vec<String>,
}

impl BreakdownGroup {
    pub fn new(label: &str, keywords: &[&str]) -> Self {
        Self {
            label: label.to_string(),
            keywords: to_strings(keywords),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryProfile {
    /// CLI name, e.g. `cold-drinks-juices`.
    pub slug: String,
    #[serde(default)]
    pub title: String,
    /// Main listing page.
    pub url: String,
    pub rule: CategoryRule,
    /// Lowercase URL fragments expected on this category's pages.
    #[serde(default)]
    pub page_markers: Vec<String>,
    #[serde(default)]
    pub subcategories: SubcategoryHints,
    #[serde(default)]
    pub breakdown: Vec<BreakdownGroup>,
}

impl CategoryProfile {
    pub fn display_title(&self) -> &str {
        if self.title.trim().is_empty() {
            &self.slug
        } else {
            &self.title
        }
    }

    /// File stem shared by the CSV and JSON exports.
    pub fn output_stem(&self) -> String {
        format!("zepto_{}", self.slug.replace('-', "_"))
    }

    /// True when `url` carries none of this category's page markers.
    pub fn is_off_category_url(&self, url: &str) -> bool {
        if self.page_markers.is_empty() {
            return false;
        }
        let lower = url.to_lowercase();
        !self.page_markers.iter().any(|m| lower.contains(m.as_str()))
    }
}

pub(crate) fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Ordered set of category profiles, unique by slug.
#[derive(Debug, Clone)]
pub struct Catalog {
    profiles: Vec<CategoryProfile>,
}

impl Catalog {
    /// The storefront categories this tool knows out of the box.
    pub fn builtin() -> Self {
        Self {
            profiles: builtin::profiles(),
        }
    }

    /// Built-ins merged with `categories` from the config file. A configured
    /// profile replaces the built-in with the same slug.
    pub fn from_config(config: &ScoutConfig) -> Self {
        let mut catalog = Self::builtin();
        for profile in &config.categories {
            catalog.upsert(profile.clone());
        }
        catalog
    }

    pub fn upsert(&mut self, profile: CategoryProfile) {
        match self.profiles.iter_mut().find(|p| p.slug == profile.slug) {
            Some(existing) => {
                info!("category '{}' overridden by config", profile.slug);
                *existing = profile;
            }
            None => {
                info!("category '{}' added from config", profile.slug);
                self.profiles.push(profile);
            }
        }
    }

    pub fn get(&self, slug: &str) -> Option<&CategoryProfile> {
        self.profiles.iter().find(|p| p.slug == slug)
    }

    pub fn profiles(&self) -> &[CategoryProfile] {
        &self.profiles
    }

    pub fn slugs(&self) -> Vec<&str> {
        self.profiles.iter().map(|p| p.slug.as_str()).collect()
    }
}
