//! Category runs against an in-memory storefront.
//!
//! `FakeStore` serves fixed HTML per URL, so the whole driver loop runs
//! without a browser: discovery, scrolling, refresh-on-empty, cross-page
//! merge and export.
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use zepto_scout::config::{CsvLayout, Timings};
use zepto_scout::pipeline::aggregate::PageStatus;
use zepto_scout::tools::export;
use zepto_scout::tools::scrape_category::{extract_current_page, scroll_for_products};
use zepto_scout::tools::scrape_category;
use zepto_scout::{Catalog, CategoryProfile, PageRenderer, ProductRecord, RenderError};

fn init_logger() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}

const NOT_FOUND_PAGE: &str = "about:not-found";

#[derive(Default)]
struct StoreState {
    current: String,
    /// Key into `pages` for what the tab is showing; differs from `current`
    /// while a not-found page is served.
    serving: String,
    stage: usize,
    visits: Vec<String>,
    reloads: usize,
    scrolls: usize,
}

/// Each URL maps to successive grid states; scrolling reveals the next one.
#[derive(Default)]
struct FakeStore {
    pages: HashMap<String, Vec<String>>,
    /// URLs that answer with the not-found page on their first visit only.
    broken_once: HashSet<String>,
    state: Mutex<StoreState>,
}

fn not_found_html() -> String {
    "<html><head><title>Zepto</title></head><body><h1>Page not found</h1><p>This page went on an egg-sit</p></body></html>".to_string()
}

impl FakeStore {
    fn page(mut self, url: &str, html: String) -> Self {
        self.pages.insert(url.to_string(), vec![html]);
        self
    }

    fn flaky_page(mut self, url: &str, html: String) -> Self {
        self.pages.insert(NOT_FOUND_PAGE.to_string(), vec![not_found_html()]);
        self.broken_once.insert(url.to_string());
        self.page(url, html)
    }

    fn growing_page(mut self, url: &str, stages: Vec<String>) -> Self {
        self.pages.insert(url.to_string(), stages);
        self
    }

    fn visits(&self) -> Vec<String> {
        self.state.lock().unwrap().visits.clone()
    }

    fn reloads(&self) -> usize {
        self.state.lock().unwrap().reloads
    }

    fn scrolls(&self) -> usize {
        self.state.lock().unwrap().scrolls
    }
}

#[async_trait]
impl PageRenderer for FakeStore {
    async fn navigate(&self, url: &str) -> Result<(), RenderError> {
        let mut state = self.state.lock().unwrap();
        state.visits.push(url.to_string());
        if !self.pages.contains_key(url) {
            return Err(RenderError::Navigation {
                url: url.to_string(),
                message: "net::ERR_TIMED_OUT".into(),
            });
        }
        let first_visit = state.visits.iter().filter(|v| v.as_str() == url).count() == 1;
        state.serving = if first_visit && self.broken_once.contains(url) {
            NOT_FOUND_PAGE.to_string()
        } else {
            url.to_string()
        };
        state.current = url.to_string();
        state.stage = 0;
        Ok(())
    }

    async fn reload(&self) -> Result<(), RenderError> {
        let mut state = self.state.lock().unwrap();
        state.reloads += 1;
        state.stage = 0;
        Ok(())
    }

    async fn current_url(&self) -> Result<String, RenderError> {
        Ok(self.state.lock().unwrap().current.clone())
    }

    async fn snapshot(&self) -> Result<String, RenderError> {
        let state = self.state.lock().unwrap();
        let stages = self
            .pages
            .get(&state.serving)
            .ok_or_else(|| RenderError::Snapshot("no page loaded".into()))?;
        Ok(stages[state.stage.min(stages.len() - 1)].clone())
    }

    async fn scroll_to_bottom(&self) -> Result<(), RenderError> {
        let mut state = self.state.lock().unwrap();
        state.scrolls += 1;
        let last = self.pages.get(&state.serving).map_or(0, |s| s.len() - 1);
        state.stage = (state.stage + 1).min(last);
        Ok(())
    }

    async fn scroll_to_top(&self) -> Result<(), RenderError> {
        Ok(())
    }

    async fn scroll_height(&self) -> Result<u64, RenderError> {
        Ok(self.snapshot().await?.len() as u64)
    }
}

fn card(slug: &str, variant: &str, price: u32) -> String {
    let name = slug
        .split('-')
        .map(|w| {
            let mut c = w.chars();
            c.next()
                .map(|f| f.to_uppercase().chain(c).collect::<String>())
                .unwrap_or_default()
        })
        .collect::<Vec<_>>()
        .join(" ");
    format!(
        r#"<a href="/pn/{slug}/pvid/{variant}"><img src="https://cdn.zepto.com/{variant}.jpg"><div>{name}</div><div>₹{price}</div><div>ADD</div></a>"#
    )
}

fn html(body: &[String]) -> String {
    format!("<html><body>{}</body></html>", body.concat())
}

const SUB_SOFT: &str = "https://www.zepto.com/cn/cold-drinks-juices/soft-drinks/cid/947a/scid/s1";
const SUB_JUICE: &str = "https://www.zepto.com/cn/cold-drinks-juices/fruit-juices/cid/947a/scid/s2";
const SUB_ENERGY: &str = "https://www.zepto.com/cn/cold-drinks-juices/energy-drinks/cid/947a/scid/s3";

fn builtin(slug: &str) -> CategoryProfile {
    Catalog::builtin().get(slug).unwrap().clone()
}

fn drinks() -> CategoryProfile {
    builtin("cold-drinks-juices")
}

fn drinks_store() -> FakeStore {
    let profile = drinks();
    let nav = vec![
        r#"<nav><a href="/cn/cold-drinks-juices/soft-drinks/cid/947a/scid/s1">Soft Drinks</a>"#.to_string(),
        r#"<a href="/cn/cold-drinks-juices/fruit-juices/cid/947a/scid/s2">Fruit Juices</a>"#.to_string(),
        r#"<a href="/cn/cold-drinks-juices/energy-drinks/cid/947a/scid/s3">Energy Drinks</a></nav>"#.to_string(),
    ];
    let mut main = nav;
    main.push(card("coca-cola-can", "c1", 40));
    main.push(card("britannia-brown-bread", "b1", 50));

    FakeStore::default()
        .page(&profile.url, html(&main))
        .page(
            SUB_SOFT,
            html(&[card("coca-cola-can", "c1", 40), card("sprite-lime-soft-drink", "sp1", 40)]),
        )
        .page(
            SUB_JUICE,
            html(&[card("tropicana-orange-juice", "t1", 120), card("coca-cola-can", "c1", 40)]),
        )
}

#[tokio::test]
async fn category_run_merges_pages_and_isolates_failures() {
    init_logger();
    let store = drinks_store();
    let profile = drinks();

    let run = scrape_category(&store, &profile, &Timings::immediate()).await.unwrap();

    let names: Vec<&str> = run.records.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(
        names,
        vec!["Coca Cola Can", "Sprite Lime Soft Drink", "Tropicana Orange Juice"]
    );
    assert_eq!(run.subcategories.len(), 3);
    assert_eq!(run.removed_in_final_pass, 0);

    let audit: Vec<(&str, usize, usize)> = run
        .audit
        .iter()
        .map(|a| (a.label.as_str(), a.offered, a.added))
        .collect();
    assert_eq!(
        audit,
        vec![
            ("Main page", 1, 1),
            ("Soft Drinks", 2, 1),
            ("Fruit Juices", 2, 1),
            ("Energy Drinks", 0, 0),
        ]
    );
    assert!(matches!(run.audit[3].status, PageStatus::Failed(_)));

    // the failing subcategory was attempted once and nothing after it was skipped
    let visits = store.visits();
    assert_eq!(visits.iter().filter(|v| v.as_str() == SUB_ENERGY).count(), 1);
    assert_eq!(visits.len(), 4);
}

#[tokio::test]
async fn records_carry_absolute_links_and_prices() {
    let store = drinks_store();
    let run = scrape_category(&store, &drinks(), &Timings::immediate()).await.unwrap();

    let juice = run
        .records
        .iter()
        .find(|r| r.name == "Tropicana Orange Juice")
        .unwrap();
    assert_eq!(juice.price, "120");
    assert_eq!(juice.product_url, "https://www.zepto.com/pn/tropicana-orange-juice/pvid/t1");
    assert_eq!(juice.image_url, "https://cdn.zepto.com/t1.jpg");
    assert_eq!(juice.discount, "N/A");
}

#[tokio::test]
async fn empty_page_is_refreshed_once_then_reported_empty() {
    let url = "https://www.zepto.com/cn/cold-drinks-juices/empty/cid/1/scid/2";
    let store = FakeStore::default().page(url, html(&["<p>Something went wrong</p>".to_string()]));
    store.navigate(url).await.unwrap();

    let page = extract_current_page(&store, &drinks(), &Timings::immediate())
        .await
        .unwrap();
    assert!(page.records.is_empty());
    assert_eq!(page.cards_found, 0);
    assert_eq!(store.reloads(), 1);
}

#[tokio::test]
async fn bare_main_page_gets_a_second_pass() {
    let profile = builtin("fruits-vegetables");
    let store = FakeStore::default().page(&profile.url, html(&["<p>Loading…</p>".to_string()]));

    let run = scrape_category(&store, &profile, &Timings::immediate()).await.unwrap();

    assert!(run.records.is_empty());
    let labels: Vec<&str> = run.audit.iter().map(|a| a.label.as_str()).collect();
    assert_eq!(labels, vec!["Main page", "Main page (retry)"]);
    assert!(run.audit.iter().all(|a| a.status == PageStatus::Empty));
    assert_eq!(store.visits(), vec![profile.url.clone(), profile.url.clone()]);
    assert_eq!(store.reloads(), 2);
}

#[tokio::test]
async fn produce_run_keeps_every_named_card_without_subcategories() {
    init_logger();
    let profile = builtin("fruits-vegetables");
    let store = FakeStore::default().page(
        &profile.url,
        html(&[
            r#"<a href="/cn/fruits-vegetables/fresh-vegetables/cid/1/scid/2">Fresh Vegetables</a>"#.to_string(),
            card("onion-1-kg", "o1", 35),
            card("robusta-banana", "ba1", 49),
            card("hydroponic-lettuce", "l1", 89),
        ]),
    );

    let run = scrape_category(&store, &profile, &Timings::immediate()).await.unwrap();

    let names: Vec<&str> = run.records.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["Onion 1 Kg", "Robusta Banana", "Hydroponic Lettuce"]);
    assert!(run.subcategories.is_empty());
    assert_eq!(store.visits(), vec![profile.url.clone()]);
}

#[tokio::test]
async fn not_found_main_page_is_retried_once() {
    let profile = builtin("fruits-vegetables");
    let store = FakeStore::default().flaky_page(&profile.url, html(&[card("onion-1-kg", "o1", 35)]));

    let run = scrape_category(&store, &profile, &Timings::immediate()).await.unwrap();

    assert_eq!(run.records.len(), 1);
    assert_eq!(store.visits(), vec![profile.url.clone(), profile.url.clone()]);
}

#[tokio::test]
async fn persistent_not_found_page_aborts_the_category() {
    let profile = builtin("fruits-vegetables");
    let store = FakeStore::default().page(&profile.url, not_found_html());

    let err = scrape_category(&store, &profile, &Timings::immediate())
        .await
        .unwrap_err();

    assert!(matches!(err, RenderError::NotFound(ref url) if *url == profile.url));
    assert_eq!(store.visits().len(), 2);
}

#[tokio::test]
async fn page_of_off_category_cards_is_audited_as_scraped() {
    let profile = drinks();
    let store = FakeStore::default()
        .page(
            &profile.url,
            html(&[
                r#"<a href="/cn/cold-drinks-juices/soft-drinks/cid/947a/scid/s1">Soft Drinks</a>"#.to_string(),
                card("coca-cola-can", "c1", 40),
            ]),
        )
        .page(SUB_SOFT, html(&[card("britannia-brown-bread", "b1", 50)]));

    let run = scrape_category(&store, &profile, &Timings::immediate()).await.unwrap();

    let soft = &run.audit[1];
    assert_eq!(soft.label, "Soft Drinks");
    assert_eq!(soft.status, PageStatus::Scraped);
    assert_eq!((soft.cards, soft.offered, soft.added), (1, 0, 0));
}

#[tokio::test]
async fn main_page_navigation_failure_aborts_the_category() {
    let store = FakeStore::default();
    let err = scrape_category(&store, &drinks(), &Timings::immediate())
        .await
        .unwrap_err();
    assert!(matches!(err, RenderError::Navigation { .. }));
}

#[tokio::test]
async fn scrolling_stops_once_the_grid_stops_growing() {
    let url = "https://www.zepto.com/cn/cold-drinks-juices/all/cid/1/scid/1";
    let first = vec![card("coca-cola-can", "c1", 40)];
    let mut second = first.clone();
    second.push(card("sprite-lime-soft-drink", "sp1", 40));
    let store = FakeStore::default().growing_page(url, vec![html(&first), html(&second)]);
    store.navigate(url).await.unwrap();

    let timings = Timings {
        max_scrolls: 10,
        stable_scrolls: 2,
        ..Timings::immediate()
    };
    let anchors = scroll_for_products(&store, &timings).await;
    assert_eq!(anchors, 2);
    // one growing scroll, then two that changed nothing
    assert_eq!(store.scrolls(), 3);
}

#[tokio::test]
async fn finished_run_exports_csv_and_json() {
    let store = drinks_store();
    let profile = drinks();
    let run = scrape_category(&store, &profile, &Timings::immediate()).await.unwrap();

    let dir = tempfile::tempdir().unwrap();
    let saved = export::save(dir.path(), &profile.output_stem(), &run.records, CsvLayout::Standard)
        .unwrap()
        .unwrap();
    assert!(saved.csv.ends_with("zepto_cold_drinks_juices.csv"));

    let csv_text = std::fs::read_to_string(&saved.csv).unwrap();
    assert_eq!(csv_text.lines().count(), 1 + run.records.len());

    let json: Vec<ProductRecord> =
        serde_json::from_str(&std::fs::read_to_string(&saved.json).unwrap()).unwrap();
    assert_eq!(json, run.records);
}
