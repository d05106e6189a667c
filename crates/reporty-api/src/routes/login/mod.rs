//! Login routes - sign in form, form submission and sign out

pub mod page;

pub use page::{login_form, login_submit, logout};
