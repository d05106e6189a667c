//! Report routes - menu, report pages and the JSON listing
//!
//! Structure:
//! - api.rs: JSON API endpoints
//! - page.rs: Full page rendering

pub mod api;
pub mod page;

pub use api::api_reports;
pub use page::{report_menu, show_report, show_report_without_slash};
