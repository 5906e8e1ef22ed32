//! Field extraction for a single product card.

use crate::core::types::{is_ui_control_label, scrape_stamp, ProductRecord, NOT_AVAILABLE};
use crate::pipeline::discover::ProductCard;
use crate::pipeline::{dom, product_url};
use chrono::NaiveDateTime;
use regex::Regex;
use scraper::Selector;
use std::sync::OnceLock;
use tracing::debug;
use url::Url;

macro_rules! pattern {
    ($name:ident, $re:expr) => {
        fn $name() -> Option<&'static Regex> {
            static RE: OnceLock<Option<Regex>> = OnceLock::new();
            RE.get_or_init(|| Regex::new($re).ok()).as_ref()
        }
    };
}

pattern!(price_re, r"₹\s*(\d+)");
pattern!(discount_re, r"(?i)₹\s*(\d+)\s*OFF");
pattern!(quantity_re, r"(?i)(\d+\s*(?:pack|g|kg|pc|pcs|ml|l|Approx\.))");
pattern!(percent_re, r"(\d+)%");
pattern!(list_price_re, r"₹?\s*(\d+[.,]?\d*)");
pattern!(leading_price_re, r"^₹\s*\d+");
pattern!(leading_price_off_re, r"(?i)^₹\s*\d+\s*OFF");
pattern!(leading_quantity_re, r"(?i)^\d+\s*(pack|g|kg|ml|l|pc|pcs|Approx)");
pattern!(weight_range_re, r"(?i)^\d+[\s-]+\d+\s*(g|kg)");

fn capture(re: Option<&Regex>, text: &str) -> Option<String> {
    re?.captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

fn matches(re: Option<&Regex>, text: &str) -> bool {
    re.is_some_and(|re| re.is_match(text))
}

/// Digits of the first price on the card.
pub fn first_price(text: &str) -> Option<String> {
    capture(price_re(), text)
}

/// Discount amount, currency-prefixed.
pub fn discount_amount(text: &str) -> Option<String> {
    capture(discount_re(), text).map(|d| format!("₹{d}"))
}

pub fn quantity(text: &str) -> Option<String> {
    capture(quantity_re(), text)
}

pub fn discount_percent(text: &str) -> Option<String> {
    capture(percent_re(), text).map(|p| format!("{p}%"))
}

fn starts_with_price(text: &str) -> bool {
    matches(leading_price_re(), text)
}

// ── Naming ───────────────────────────────────────────────────────────────────

type NameStrategy = for<'a, 'b> fn(&'b ProductCard<'a>) -> Option<String>;

/// Tried in order; the first that yields a name wins.
const NAME_STRATEGIES: &[(&str, NameStrategy)] = &[
    ("url slug", name_from_slug),
    ("heading/class", name_from_selectors),
    ("text line", name_from_lines),
];

const NAME_SELECTORS: &[&str] = &[
    "h1",
    "h2",
    "h3",
    "h4",
    "span[class*='name']",
    "span[class*='title']",
    "div[class*='name']",
    "div[class*='title']",
    "p[class*='name']",
    "div[class*='product']",
];

fn name_from_slug(card: &ProductCard<'_>) -> Option<String> {
    let path = product_url::parse(card.link.as_deref()?)?;
    product_url::title_from_slug(&path.slug)
}

/// First visible line of the first matching element. Taking the whole text
/// would drag offer tags and prices from wrapper elements into the name.
fn name_from_selectors(card: &ProductCard<'_>) -> Option<String> {
    for css in NAME_SELECTORS {
        let Ok(selector) = Selector::parse(css) else {
            continue;
        };
        let Some(element) = card.element.select(&selector).next() else {
            continue;
        };
        let Some(text) = dom::visible_lines(element).into_iter().next() else {
            continue;
        };
        if text.chars().count() > 3 && !is_ui_control_label(&text) && !starts_with_price(&text) {
            return Some(text);
        }
    }
    None
}

/// Lines that are prices, pack sizes, delivery times or controls.
fn is_noise_line(line: &str) -> bool {
    let lower = line.to_lowercase();
    is_ui_control_label(line)
        || starts_with_price(line)
        || matches(leading_price_off_re(), line)
        || lower.contains("min")
        || matches(leading_quantity_re(), line)
        || lower.contains("price list")
        || matches(weight_range_re(), line)
}

fn name_from_lines(card: &ProductCard<'_>) -> Option<String> {
    card.lines
        .iter()
        .map(|line| line.trim())
        .filter(|line| !is_noise_line(line))
        .find(|line| line.chars().count() > 3 && !line.chars().all(|c| c.is_ascii_digit()))
        .map(str::to_string)
}

/// The card's name and the strategy that produced it.
pub fn extract_name(card: &ProductCard<'_>) -> Option<(String, &'static str)> {
    NAME_STRATEGIES
        .iter()
        .find_map(|(label, strategy)| strategy(card).map(|name| (name, *label)))
}

// ── Media & list price ───────────────────────────────────────────────────────

pub fn image_url(card: &ProductCard<'_>, base: Option<&Url>) -> Option<String> {
    let Ok(selector) = Selector::parse("img") else {
        return None;
    };
    let img = card.element.select(&selector).next()?;
    dom::attr(img, "src")
        .or_else(|| dom::attr(img, "data-src"))
        .map(|src| dom::resolve_url(base, src))
}

const LIST_PRICE_SELECTORS: &[&str] = &[
    "[class*='original']",
    "[class*='strike']",
    "s",
    "del",
    "[style*='line-through']",
];

/// Struck-through list price, digits only.
pub fn original_price(card: &ProductCard<'_>) -> Option<String> {
    LIST_PRICE_SELECTORS.iter().find_map(|css| {
        let selector = Selector::parse(css).ok()?;
        let element = card.element.select(&selector).next()?;
        capture(list_price_re(), &dom::inline_text(element)).map(|p| p.replace(',', ""))
    })
}

// ── Record assembly ──────────────────────────────────────────────────────────

fn or_na(value: Option<String>) -> String {
    value.unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

/// Build the record for `card`, stamped with the current local time to the second.
pub fn extract_record(card: &ProductCard<'_>, base: Option<&Url>) -> ProductRecord {
    extract_record_at(card, base, scrape_stamp())
}

pub fn extract_record_at(
    card: &ProductCard<'_>,
    base: Option<&Url>,
    scraped_at: NaiveDateTime,
) -> ProductRecord {
    let text = card.text();
    let mut record = ProductRecord::blank(scraped_at);

    if let Some((name, strategy)) = extract_name(card) {
        debug!("named via {}: {}", strategy, name);
        record.name = name;
    }
    record.price = or_na(first_price(&text));
    record.discount = or_na(discount_amount(&text));
    record.quantity = or_na(quantity(&text));
    record.image_url = or_na(image_url(card, base));
    record.product_url = or_na(card.link.clone());
    record.original_price = or_na(original_price(card));
    record.discount_percent = or_na(discount_percent(&text));
    record
}
