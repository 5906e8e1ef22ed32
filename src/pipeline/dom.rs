//! Rendered-text helpers over `scraper` snapshots.
//!
//! Browsers expose `innerText`: block boundaries become line breaks, inline runs
//! collapse whitespace, and script-like content is invisible. Card extraction is
//! line-oriented, so the snapshot needs the same view.

use scraper::{ElementRef, Node};
use url::Url;

const BLOCK_TAGS: &[&str] = &[
    "address", "article", "aside", "blockquote", "button", "dd", "details", "dialog", "div", "dl",
    "dt", "fieldset", "figcaption", "figure", "footer", "form", "h1", "h2", "h3", "h4", "h5", "h6",
    "header", "hr", "li", "main", "nav", "ol", "p", "pre", "section", "summary", "table", "tbody",
    "td", "tfoot", "th", "thead", "tr", "ul",
];

const INVISIBLE_TAGS: &[&str] = &["script", "style", "noscript", "template", "svg", "head"];

pub fn is_block_tag(name: &str) -> bool {
    BLOCK_TAGS.contains(&name)
}

pub fn is_invisible_tag(name: &str) -> bool {
    INVISIBLE_TAGS.contains(&name)
}

/// Visible lines of `element`: trimmed, whitespace-collapsed, blanks dropped.
pub fn visible_lines(element: ElementRef<'_>) -> Vec<String> {
    let mut raw = String::new();
    collect_text(element, &mut raw);
    raw.lines()
        .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|line| !line.is_empty())
        .collect()
}

/// Visible text flattened onto a single line.
pub fn inline_text(element: ElementRef<'_>) -> String {
    visible_lines(element).join(" ")
}

fn collect_text(element: ElementRef<'_>, out: &mut String) {
    for child in element.children() {
        match child.value() {
            Node::Text(text) => {
                // source newlines inside inline runs are plain whitespace
                for (i, chunk) in text.split(['\n', '\r']).enumerate() {
                    if i > 0 {
                        out.push(' ');
                    }
                    out.push_str(chunk);
                }
            }
            Node::Element(el) => {
                let name = el.name();
                if is_invisible_tag(name) {
                    continue;
                }
                if name == "br" {
                    out.push('\n');
                    continue;
                }
                let Some(child_ref) = ElementRef::wrap(child) else {
                    continue;
                };
                let block = is_block_tag(name);
                if block {
                    out.push('\n');
                }
                collect_text(child_ref, out);
                if block {
                    out.push('\n');
                }
            }
            _ => {}
        }
    }
}

/// Resolve `raw` against the page URL. Unparseable input is returned trimmed.
pub fn resolve_url(base: Option<&Url>, raw: &str) -> String {
    let raw = raw.trim();
    if let Ok(absolute) = Url::parse(raw) {
        return absolute.to_string();
    }
    match base.and_then(|b| b.join(raw).ok()) {
        Some(joined) => joined.to_string(),
        None => raw.to_string(),
    }
}

/// Non-empty attribute value.
pub fn attr<'a>(element: ElementRef<'a>, name: &str) -> Option<&'a str> {
    element
        .value()
        .attr(name)
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::{Html, Selector};

    fn first<'a>(doc: &'a Html, css: &str) -> ElementRef<'a> {
        doc.select(&Selector::parse(css).unwrap()).next().unwrap()
    }

    #[test]
    fn block_children_become_lines() {
        let doc = Html::parse_fragment(
            r#"<div id="card">
                <div>Amul   Kool
                     Cafe</div>
                <span>₹</span><span>40</span>
                <p>200 ml</p>
                <button>ADD</button>
            </div>"#,
        );
        let lines = visible_lines(first(&doc, "#card"));
        assert_eq!(lines, vec!["Amul Kool Cafe", "₹40", "200 ml", "ADD"]);
    }

    #[test]
    fn scripts_and_styles_are_invisible() {
        let doc = Html::parse_fragment(
            r#"<div id="card"><style>.x{}</style>Real Juice<script>var p = "₹1";</script><br>1 l</div>"#,
        );
        assert_eq!(visible_lines(first(&doc, "#card")), vec!["Real Juice", "1 l"]);
    }

    #[test]
    fn relative_urls_resolve_against_page() {
        let base = Url::parse("https://www.zepto.com/cn/tea/cid/1").unwrap();
        assert_eq!(
            resolve_url(Some(&base), "/pn/green-tea/pvid/7"),
            "https://www.zepto.com/pn/green-tea/pvid/7"
        );
        assert_eq!(
            resolve_url(None, "https://cdn.zepto.com/a.png"),
            "https://cdn.zepto.com/a.png"
        );
        assert_eq!(resolve_url(None, "/pn/x"), "/pn/x");
    }
}
