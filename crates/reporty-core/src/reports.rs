//! Built-in report implementations

use async_trait::async_trait;
use log::info;

use crate::db::Database;
use crate::error::CoreResult;
use crate::models::{Filters, ResultRow};
use crate::report::Report;
use crate::types::ReportKind;

/// The email is always bound, never spliced into the SQL text
const EMAIL_REPORT_SQL: &str = "
    SELECT
        au.first_name,
        au.last_name,
        au.email AS username
    FROM auth_user au
    LEFT OUTER JOIN auth_user_groups aug ON au.id = aug.user_id
    WHERE au.email = ?
    ORDER BY au.date_joined";

/// Users whose email exactly matches `filters["email"]`, oldest account first.
///
/// The join against `auth_user_groups` yields one row per group membership.
#[derive(Debug, Clone)]
pub struct EmailReport {
    filters: Filters,
}

impl EmailReport {
    pub fn new(filters: Filters) -> Self {
        Self { filters }
    }

    pub fn construct(filters: Filters) -> Box<dyn Report> {
        Box::new(Self::new(filters))
    }
}

#[async_trait]
impl Report for EmailReport {
    fn kind(&self) -> ReportKind {
        ReportKind::Email
    }

    fn filters(&self) -> &Filters {
        &self.filters
    }

    async fn run_report(&self, db: &Database) -> CoreResult<Vec<ResultRow>> {
        let email = self.filters.require("email")?;
        let rows = db.fetch_rows(EMAIL_REPORT_SQL, &[email]).await?;
        info!("Email report returned {} rows", rows.len());
        Ok(rows)
    }
}
