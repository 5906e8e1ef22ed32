pub mod export;
pub mod scrape_category;
pub mod subcategories;
pub mod summary;

pub use scrape_category::{scrape_category, CategoryRun};
pub use subcategories::{discover_subcategories, Subcategory};
