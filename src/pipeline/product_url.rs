//! Storefront product-link anatomy: `/pn/<slug>/pvid/<variant-id>`.

pub const SLUG_MARKER: &str = "/pn/";
pub const VARIANT_MARKER: &str = "/pvid/";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductPath {
    pub slug: String,
    pub variant: Option<String>,
}

fn leading_segment(rest: &str) -> &str {
    rest.split(['/', '?', '#']).next().unwrap_or_default()
}

/// Split a product link into its slug and variant id.
///
/// `None` when the link has no `/pn/` segment. The variant is only read from
/// product links.
pub fn parse(href: &str) -> Option<ProductPath> {
    let (_, after_slug_marker) = href.split_once(SLUG_MARKER)?;
    let slug = leading_segment(after_slug_marker).to_string();
    let variant = href
        .split_once(VARIANT_MARKER)
        .map(|(_, rest)| leading_segment(rest))
        .filter(|id| !id.is_empty())
        .map(str::to_string);
    Some(ProductPath { slug, variant })
}

/// Human-readable name from a hyphenated slug: each token title-cased, joined by spaces.
pub fn title_from_slug(slug: &str) -> Option<String> {
    let words: Vec<String> = slug
        .split('-')
        .filter(|token| !token.is_empty())
        .map(capitalize)
        .collect();
    if words.is_empty() {
        None
    } else {
        Some(words.join(" "))
    }
}

fn capitalize(token: &str) -> String {
    let mut chars = token.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}
