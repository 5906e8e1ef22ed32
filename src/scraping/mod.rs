pub mod browser_manager;
pub mod renderer;

pub use browser_manager::{BrowserSession, LaunchOptions};
pub use renderer::{ChromiumRenderer, PageRenderer};
