//! Subcategory links on a category's main page.

use crate::catalog::SubcategoryHints;
use crate::pipeline::{dom, product_url};
use scraper::{Html, Selector};
use std::collections::HashSet;
use url::Url;

const LISTING_MARKER: &str = "/cn/";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subcategory {
    pub name: String,
    pub url: String,
}

/// Normalize URL for deduplication (drop fragment and trailing slash).
fn normalize_url(url: &Url) -> String {
    let mut parsed = url.clone();
    parsed.set_fragment(None);
    let mut result = parsed.to_string();
    if result.ends_with('/') && result.len() > 1 {
        result.pop();
    }
    result.to_lowercase()
}

fn bare_host(host: &str) -> &str {
    host.strip_prefix("www.").unwrap_or(host)
}

/// Same storefront, with or without `www.`.
fn same_storefront(link: &Url, page: &Url) -> bool {
    match (link.host_str(), page.host_str()) {
        (Some(a), Some(b)) => bare_host(a) == bare_host(b),
        _ => false,
    }
}

/// The listing's own path segment (the one before `cid`), else the last segment.
fn name_from_url(url: &Url) -> Option<String> {
    let segments: Vec<&str> = url
        .path_segments()
        .map(|s| s.filter(|seg| !seg.is_empty()).collect())
        .unwrap_or_default();
    let named = segments
        .iter()
        .position(|seg| *seg == "cid")
        .and_then(|i| i.checked_sub(1))
        .and_then(|i| segments.get(i))
        .or_else(|| segments.last())?;
    product_url::title_from_slug(named)
}

fn is_excluded(hints: &SubcategoryHints, combined: &str) -> bool {
    hints.excluded.iter().any(|keyword| {
        combined.contains(keyword.as_str())
            && !hints.exceptions.iter().any(|ex| ex.excuses(keyword, combined))
    })
}

/// Links on `html` that lead to subcategory listings, in page order.
///
/// A link qualifies when it stays on the storefront, mentions a subcategory
/// keyword, carries no excluded keyword, and either its text names a keyword
/// or it is a listing URL with a category path token. Product pages and the
/// page itself never qualify.
pub fn discover_subcategories(html: &str, page_url: &str, hints: &SubcategoryHints) -> Vec<Subcategory> {
    let Ok(page) = Url::parse(page_url) else {
        return Vec::new();
    };
    let Ok(selector) = Selector::parse("a[href]") else {
        return Vec::new();
    };
    let document = Html::parse_document(html);
    let page_key = normalize_url(&page);

    let mut seen = HashSet::new();
    let mut found = Vec::new();

    for link in document.select(&selector) {
        let Some(raw) = dom::attr(link, "href") else {
            continue;
        };
        let Ok(url) = Url::parse(&dom::resolve_url(Some(&page), raw)) else {
            continue;
        };
        if !matches!(url.scheme(), "http" | "https") || !same_storefront(&url, &page) {
            continue;
        }

        let lower_url = url.as_str().to_lowercase();
        if lower_url.contains(product_url::SLUG_MARKER) {
            continue;
        }
        let key = normalize_url(&url);
        if key == page_key {
            continue;
        }

        let text = dom::inline_text(link);
        let lower_text = text.to_lowercase();
        let in_text = hints.keywords.iter().any(|k| lower_text.contains(k.as_str()));
        let in_url = hints.keywords.iter().any(|k| lower_url.contains(k.as_str()));
        if !in_text && !in_url {
            continue;
        }

        let combined = format!("{} {}", lower_text, lower_url);
        if is_excluded(hints, &combined) {
            continue;
        }

        let listing_match = lower_url.contains(LISTING_MARKER)
            && hints.path_tokens.iter().any(|t| lower_url.contains(t.as_str()));
        if !in_text && !listing_match {
            continue;
        }

        if !seen.insert(key) {
            continue;
        }

        let name = if text.is_empty() {
            name_from_url(&url).unwrap_or_else(|| url.to_string())
        } else {
            text
        };
        found.push(Subcategory {
            name,
            url: url.to_string(),
        });
    }

    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;

    const PAGE: &str = "https://www.zepto.com/cn/cold-drinks-juices/cold-drinks-juices/cid/947a/scid/7dce";

    fn drinks_hints() -> SubcategoryHints {
        Catalog::builtin()
            .get("cold-drinks-juices")
            .unwrap()
            .subcategories
            .clone()
    }

    #[test]
    fn finds_listing_links_in_page_order() {
        let html = r#"<html><body><nav>
            <a href="/cn/cold-drinks-juices/soft-drinks/cid/947a/scid/aa01">Soft Drinks</a>
            <a href="/cn/cold-drinks-juices/fruit-juices/cid/947a/scid/aa02"><span>Fruit</span> <span>Juices</span></a>
            <a href="https://zepto.com/cn/cold-drinks-juices/energy-drinks/cid/947a/scid/aa03"><img src="x.png"></a>
            <a href="/cn/cold-drinks-juices/soft-drinks/cid/947a/scid/aa01#top">Soft Drinks again</a>
        </nav></body></html>"#;

        let subs = discover_subcategories(html, PAGE, &drinks_hints());
        let names: Vec<&str> = subs.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Soft Drinks", "Fruit Juices", "Energy Drinks"]);
        assert_eq!(
            subs[0].url,
            "https://www.zepto.com/cn/cold-drinks-juices/soft-drinks/cid/947a/scid/aa01"
        );
    }

    #[test]
    fn skips_products_self_foreign_and_excluded_links() {
        let html = format!(
            r#"<html><body>
            <a href="{PAGE}">Cold Drinks &amp; Juices</a>
            <a href="/pn/coca-cola-soft-drink/pvid/1">Coca Cola Soft Drink</a>
            <a href="https://example.com/cn/soft-drinks">Soft Drinks elsewhere</a>
            <a href="/cn/biscuits/cid/1/scid/2">Biscuits &amp; Soda Crackers</a>
            <a href="/cn/ice-cream/cid/3/scid/4">Ice Cream Drinks</a>
            <a href="mailto:help@zepto.com">Water help</a>
            </body></html>"#
        );
        assert!(discover_subcategories(&html, PAGE, &drinks_hints()).is_empty());
    }

    #[test]
    fn url_keyword_needs_a_listing_path_token() {
        let html = r#"<html><body>
            <a href="/offers/water-deals">See all</a>
            <a href="/cn/cold-drinks-juices/water/cid/947a/scid/aa09">See all</a>
        </body></html>"#;
        let subs = discover_subcategories(html, PAGE, &drinks_hints());
        assert_eq!(subs.len(), 1);
        assert!(subs[0].url.contains("/water/"));
    }

    #[test]
    fn peanut_butter_links_survive_the_butter_exclusion() {
        let mut hints = SubcategoryHints {
            keywords: vec!["peanut butter".into(), "spread".into()],
            excluded: vec!["butter".into()],
            ..SubcategoryHints::default()
        };
        hints
            .exceptions
            .push(crate::pipeline::classify::KeywordException::new("butter", &["peanut butter"]));
        let html = r#"<html><body>
            <a href="/cn/breakfast/peanut-butter/cid/1/scid/2">Peanut Butter</a>
            <a href="/cn/dairy/butter/cid/3/scid/4">Butter &amp; Spreads</a>
        </body></html>"#;
        let subs = discover_subcategories(html, "https://www.zepto.com/cn/breakfast/cid/1", &hints);
        assert_eq!(subs.len(), 1);
        assert_eq!(subs[0].name, "Peanut Butter");
    }

    #[test]
    fn url_names_prefer_the_listing_segment() {
        let url = Url::parse("https://www.zepto.com/cn/drinks/soft-drinks/cid/1/scid/2").unwrap();
        assert_eq!(name_from_url(&url).as_deref(), Some("Soft Drinks"));
        let url = Url::parse("https://www.zepto.com/cn/drinks/soft-drinks").unwrap();
        assert_eq!(name_from_url(&url).as_deref(), Some("Soft Drinks"));
    }
}
