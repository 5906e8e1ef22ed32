//! Product-card discovery.
//!
//! The storefront's grid has no stable class names, but every card prints a
//! price. Cards are found by walking up from each element whose own text
//! holds the currency glyph.

use crate::core::types::IdentityKey;
use crate::pipeline::{dom, fields, product_url};
use scraper::{ElementRef, Html, Node, Selector};
use std::collections::HashSet;
use tracing::debug;
use url::Url;

pub const CURRENCY_GLYPH: char = '₹';

/// Lowercase substrings marking promotional tiles rather than products.
pub const BANNER_MARKERS: &[&str] = &["explore", "banner", "up to"];

/// How many ancestors are considered when no hyperlink wraps the price.
const MAX_BLOCK_ASCENT: usize = 5;
/// Card text used for banner checks and keys.
const KEY_TEXT_CHARS: usize = 100;
/// Shorter text cannot describe a product.
const MIN_CARD_TEXT_CHARS: usize = 11;
const TEXT_PREFIX_KEY_CHARS: usize = 50;

/// A container judged to be one product card.
#[derive(Debug, Clone)]
pub struct ProductCard<'a> {
    pub element: ElementRef<'a>,
    /// Visible lines of the container.
    pub lines: Vec<String>,
    /// Absolute product link, if the card has one.
    pub link: Option<String>,
    pub key: IdentityKey,
}

impl ProductCard<'_> {
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }
}

/// Elements whose own text holds the currency glyph, in document order.
pub fn price_anchors(document: &Html) -> Vec<ElementRef<'_>> {
    let mut seen = HashSet::new();
    let mut anchors = Vec::new();
    for node in document.root_element().descendants() {
        let Node::Text(text) = node.value() else {
            continue;
        };
        if !text.contains(CURRENCY_GLYPH) {
            continue;
        }
        let Some(parent) = node.parent().and_then(ElementRef::wrap) else {
            continue;
        };
        if dom::is_invisible_tag(parent.value().name()) {
            continue;
        }
        if seen.insert(parent.id()) {
            anchors.push(parent);
        }
    }
    anchors
}

/// Number of price anchors in a serialized page.
pub fn count_price_anchors(html: &str) -> usize {
    price_anchors(&Html::parse_document(html)).len()
}

/// Nearest hyperlink ancestor, else the nearest block ancestor within a few
/// levels, else the anchor itself.
pub fn enclosing_container(anchor: ElementRef<'_>) -> ElementRef<'_> {
    if let Some(link) = anchor
        .ancestors()
        .filter_map(ElementRef::wrap)
        .find(|el| el.value().name() == "a")
    {
        return link;
    }
    anchor
        .ancestors()
        .filter_map(ElementRef::wrap)
        .take(MAX_BLOCK_ASCENT)
        .find(|el| dom::is_block_tag(el.value().name()))
        .unwrap_or(anchor)
}

/// The container's own `href`, else its first descendant link.
pub fn card_link(container: ElementRef<'_>, base: Option<&Url>) -> Option<String> {
    let own = if container.value().name() == "a" {
        dom::attr(container, "href")
    } else {
        None
    };
    let href = own.or_else(|| {
        let Ok(selector) = Selector::parse("a[href]") else {
            return None;
        };
        container.select(&selector).find_map(|a| dom::attr(a, "href"))
    })?;
    Some(dom::resolve_url(base, href))
}

/// Identity key for a card, by precedence: variant id, slug plus price,
/// first line plus price, text prefix.
pub fn identity_key(link: Option<&str>, text: &str) -> IdentityKey {
    let price = fields::first_price(text);
    if let Some(path) = link.and_then(product_url::parse) {
        return match path.variant {
            Some(id) => IdentityKey::Variant(id),
            None => IdentityKey::SlugPrice {
                slug: path.slug,
                price,
            },
        };
    }
    match price {
        Some(price) => IdentityKey::HeadlinePrice {
            headline: text.lines().next().unwrap_or_default().to_string(),
            price,
        },
        None => IdentityKey::TextPrefix(text.chars().take(TEXT_PREFIX_KEY_CHARS).collect()),
    }
}

fn looks_like_banner(head: &str) -> bool {
    let lower = head.to_lowercase();
    BANNER_MARKERS.iter().any(|marker| lower.contains(marker))
}

/// Every distinct product card in the snapshot, first occurrence wins.
pub fn discover_cards<'a>(document: &'a Html, base: Option<&Url>) -> Vec<ProductCard<'a>> {
    let mut keys = HashSet::new();
    let mut cards = Vec::new();

    for anchor in price_anchors(document) {
        let container = enclosing_container(anchor);
        let lines = dom::visible_lines(container);
        let head: String = lines.join("\n").chars().take(KEY_TEXT_CHARS).collect();

        if head.chars().count() < MIN_CARD_TEXT_CHARS || looks_like_banner(&head) {
            continue;
        }

        let link = card_link(container, base);
        let key = identity_key(link.as_deref(), &head);
        if !keys.insert(key.clone()) {
            continue;
        }
        debug!("card {} -> {}", cards.len(), key);
        cards.push(ProductCard {
            element: container,
            lines,
            link,
            key,
        });
    }

    cards
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://www.zepto.com/cn/cold-drinks-juices/cid/1/scid/2").unwrap()
    }

    #[test]
    fn anchors_are_elements_owning_the_glyph() {
        let doc = Html::parse_document(
            r#"<html><body>
                <div><span>₹120</span><span>₹140</span></div>
                <p>Total ₹<b>0</b></p>
                <script>var price = "₹5";</script>
            </body></html>"#,
        );
        let names: Vec<_> = price_anchors(&doc)
            .into_iter()
            .map(|el| el.value().name().to_string())
            .collect();
        assert_eq!(names, vec!["span", "span", "p"]);
    }

    #[test]
    fn hyperlink_ancestor_wins_over_nearer_block() {
        let doc = Html::parse_document(
            r#"<a id="card" href="/pn/x/pvid/1"><div><div><span id="p">₹10</span></div></div></a>"#,
        );
        let anchor = price_anchors(&doc)[0];
        let container = enclosing_container(anchor);
        assert_eq!(container.value().attr("id"), Some("card"));
    }

    #[test]
    fn block_ancestor_used_without_link() {
        let doc = Html::parse_document(
            r#"<section><div id="card"><span><b>₹10</b></span></div></section>"#,
        );
        let container = enclosing_container(price_anchors(&doc)[0]);
        assert_eq!(container.value().attr("id"), Some("card"));
    }

    #[test]
    fn link_comes_from_descendant_when_container_is_not_a_link() {
        let doc = Html::parse_document(
            r#"<div id="card"><img src="a.png"><a href="/pn/kissan-jam/pvid/9">Kissan Jam</a><span>₹90</span></div>"#,
        );
        let container = enclosing_container(price_anchors(&doc)[0]);
        let base = base();
        assert_eq!(
            card_link(container, Some(&base)).as_deref(),
            Some("https://www.zepto.com/pn/kissan-jam/pvid/9")
        );
    }

    #[test]
    fn identity_precedence() {
        assert_eq!(
            identity_key(Some("https://z.com/pn/coke/pvid/v1"), "Coke\n₹40"),
            IdentityKey::Variant("v1".into())
        );
        assert_eq!(
            identity_key(Some("https://z.com/pn/coke"), "Coke\n₹40"),
            IdentityKey::SlugPrice {
                slug: "coke".into(),
                price: Some("40".into())
            }
        );
        assert_eq!(
            identity_key(Some("https://z.com/cn/drinks"), "Coke 750 ml\n₹40"),
            IdentityKey::HeadlinePrice {
                headline: "Coke 750 ml".into(),
                price: "40".into()
            }
        );
        assert_eq!(
            identity_key(None, "Coke without a price tag at all"),
            IdentityKey::TextPrefix("Coke without a price tag at all".into())
        );
    }

    #[test]
    fn banners_and_short_cards_are_skipped() {
        let doc = Html::parse_document(
            r#"<html><body>
                <div><div>Explore Drinks</div><span>Up to ₹50 off</span></div>
                <div><span>₹5</span></div>
                <div><div>Sprite Lime 750 ml</div><span>₹40</span></div>
            </body></html>"#,
        );
        let cards = discover_cards(&doc, None);
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].lines[0], "Sprite Lime 750 ml");
    }

    #[test]
    fn identical_text_with_distinct_variants_are_both_kept() {
        let doc = Html::parse_document(
            r#"<html><body>
                <a href="/pn/amul-lassi/pvid/aaa"><div>Amul Lassi</div><div>₹25</div></a>
                <a href="/pn/amul-lassi/pvid/bbb"><div>Amul Lassi</div><div>₹25</div></a>
                <a href="/pn/amul-lassi/pvid/aaa"><div>Amul Lassi</div><div>₹25</div></a>
            </body></html>"#,
        );
        let base = base();
        let cards = discover_cards(&doc, Some(&base));
        let keys: Vec<_> = cards.iter().map(|c| c.key.to_string()).collect();
        assert_eq!(keys, vec!["aaa", "bbb"]);
    }

    #[test]
    fn two_anchors_in_one_card_yield_one_card() {
        let doc = Html::parse_document(
            r#"<a href="/pn/pepsi/pvid/p1"><div>Pepsi Black</div><div>₹40</div><s>₹45</s></a>"#,
        );
        assert_eq!(discover_cards(&doc, None).len(), 1);
    }

    #[test]
    fn counting_parses_raw_html() {
        assert_eq!(count_price_anchors("<div><span>₹1</span><span>₹2</span></div>"), 2);
        assert_eq!(count_price_anchors("<div>nothing here</div>"), 0);
    }
}
