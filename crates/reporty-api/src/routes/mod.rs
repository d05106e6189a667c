//! Route modules for the HTTP server
//!
//! - reports: report menu, report pages and the report listing API
//! - login: sign in and sign out
//!
//! Each module follows a consistent structure:
//! - mod.rs: Module declaration and exports
//! - api.rs: JSON API endpoints
//! - page.rs: HTMX page rendering

pub mod login;
pub mod reports;
