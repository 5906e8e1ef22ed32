pub mod catalog;
pub mod core;
pub mod pipeline;
pub mod scraping;
pub mod tools;

// --- Primary core exports ---
pub use core::config;
pub use core::types;
pub use core::types::*;
pub use core::{ExportError, RenderError, SessionError};

pub use catalog::{Catalog, CategoryProfile};
pub use pipeline::classify::{CategoryRule, KeywordException, Verdict};
pub use scraping::renderer::PageRenderer;
