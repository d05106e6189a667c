//! Report registry, report implementations and tabulation
//!
//! A request resolves a report type through [`ReportRegistry`], builds the
//! report with its [`Filters`], runs it against the [`Database`] and turns the
//! rows into a [`Tabulation`] for rendering.

pub mod db;
pub mod error;
pub mod models;
pub mod registry;
pub mod report;
pub mod reports;
pub mod types;

pub use db::Database;
pub use error::{CoreError, CoreResult, DefaultErrorLogger, ErrorCode, ErrorContext, ErrorLogger, ErrorSeverity};
pub use models::{Filters, ResultRow, Tabulation};
pub use registry::{RegistryEntry, ReportOutput, ReportRegistry};
pub use report::{tabulate, Report, ReportConstructor};
pub use reports::EmailReport;
pub use types::{CellValue, ReportKind};
