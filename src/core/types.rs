use chrono::{Local, NaiveDateTime, SubsecRound};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Placeholder stored in any text field the card did not yield.
pub const NOT_AVAILABLE: &str = "N/A";

/// Name recorded when no naming strategy produced a usable string.
pub const UNKNOWN_NAME: &str = "Unknown";

/// Timestamp layout used in both export formats.
pub const SCRAPED_AT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Current local time at the precision [`SCRAPED_AT_FORMAT`] can carry, so a
/// stamped record survives a trip through the exports unchanged.
pub fn scrape_stamp() -> NaiveDateTime {
    Local::now().naive_local().trunc_subsecs(0)
}

/// Labels of clickable card controls. Text equal to one of these (case-insensitive)
/// is never a product name.
pub const UI_CONTROL_LABELS: &[&str] = &["ADD", "NOTIFY", "EXPLORE", "EXPLORE NOW", "BUY NOW"];

/// True when `text` is exactly one of the storefront's button labels.
pub fn is_ui_control_label(text: &str) -> bool {
    let upper = text.trim().to_uppercase();
    UI_CONTROL_LABELS.iter().any(|label| *label == upper)
}

/// One product as extracted from a single card.
///
/// Every text field is either extracted content or [`NOT_AVAILABLE`]; `name` falls
/// back to [`UNKNOWN_NAME`]. `scraped_at` is stamped once, at extraction time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub name: String,
    /// Digits only, no currency glyph.
    pub price: String,
    /// Currency-prefixed discount amount, e.g. `₹20`.
    pub discount: String,
    pub quantity: String,
    pub image_url: String,
    pub product_url: String,
    #[serde(with = "scraped_at_serde")]
    pub scraped_at: NaiveDateTime,
    /// Struck-through list price, digits only.
    #[serde(default = "not_available")]
    pub original_price: String,
    /// Percentage badge, e.g. `12%`.
    #[serde(default = "not_available")]
    pub discount_percent: String,
}

fn not_available() -> String {
    NOT_AVAILABLE.to_string()
}

impl ProductRecord {
    /// A record with every field unset, stamped at `scraped_at`.
    pub fn blank(scraped_at: NaiveDateTime) -> Self {
        Self {
            name: UNKNOWN_NAME.to_string(),
            price: not_available(),
            discount: not_available(),
            quantity: not_available(),
            image_url: not_available(),
            product_url: not_available(),
            scraped_at,
            original_price: not_available(),
            discount_percent: not_available(),
        }
    }

    pub fn has_product_url(&self) -> bool {
        self.product_url != NOT_AVAILABLE && !self.product_url.is_empty()
    }

    /// Whether the record carries a name worth persisting.
    pub fn is_persistable(&self) -> bool {
        let name = self.name.trim();
        name != UNKNOWN_NAME && !is_ui_control_label(name) && name.chars().count() > 2
    }

    /// Token used to collapse the same product seen on several pages.
    ///
    /// The product URL when there is one, `name|price` otherwise.
    pub fn dedup_token(&self) -> String {
        if self.has_product_url() {
            self.product_url.clone()
        } else {
            format!("{}|{}", self.name, self.price)
        }
    }

    pub fn scraped_at_display(&self) -> String {
        self.scraped_at.format(SCRAPED_AT_FORMAT).to_string()
    }
}

/// Key used to suppress duplicate cards within one page snapshot.
///
/// Variants are listed in precedence order: a variant id from the product URL
/// beats a slug, which beats the card's first line, which beats its raw text.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum IdentityKey {
    /// Segment after `/pvid/` in the product URL.
    Variant(String),
    /// Slug after `/pn/` plus the first price on the card, if any.
    SlugPrice { slug: String, price: Option<String> },
    /// First visible line plus the first price.
    HeadlinePrice { headline: String, price: String },
    /// First 50 characters of the visible text.
    TextPrefix(String),
}

impl fmt::Display for IdentityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IdentityKey::Variant(id) => write!(f, "{id}"),
            IdentityKey::SlugPrice { slug, price } => {
                write!(f, "{}|{}", slug, price.as_deref().unwrap_or("no_price"))
            }
            IdentityKey::HeadlinePrice { headline, price } => write!(f, "{headline}|{price}"),
            IdentityKey::TextPrefix(text) => write!(f, "{text}"),
        }
    }
}

mod scraped_at_serde {
    use super::SCRAPED_AT_FORMAT;
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.format(SCRAPED_AT_FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&raw, SCRAPED_AT_FORMAT).map_err(serde::de::Error::custom)
    }
}
