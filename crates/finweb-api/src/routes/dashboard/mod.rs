//! Dashboard routes - The single dashboard page
//!
//! Structure:
//! - page.rs: Full page and partial rendering, refresh, notice dismissal

pub mod page;

pub use page::{htmx_dismiss_notice, htmx_refresh, page_dashboard, render_dashboard, render_page};
