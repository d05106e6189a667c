//! Immutable report type → constructor mapping, built once at startup

use log::debug;
use std::collections::BTreeMap;

use crate::db::Database;
use crate::error::{CoreError, CoreResult};
use crate::models::{Filters, Tabulation};
use crate::report::{tabulate, Report, ReportConstructor};
use crate::reports::EmailReport;
use crate::types::ReportKind;

/// A registered report
#[derive(Clone, Copy)]
pub struct RegistryEntry {
    pub kind: ReportKind,
    pub construct: ReportConstructor,
}

impl std::fmt::Debug for RegistryEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegistryEntry").field("kind", &self.kind).finish()
    }
}

/// Result of running a report end to end
#[derive(Debug, Clone)]
pub struct ReportOutput {
    pub kind: ReportKind,
    pub tabulation: Tabulation,
}

#[derive(Debug, Clone)]
pub struct ReportRegistry {
    entries: BTreeMap<&'static str, RegistryEntry>,
}

impl ReportRegistry {
    /// Registry holding every built-in report kind
    pub fn builtin() -> Self {
        let entries = ReportKind::ALL
            .into_iter()
            .map(|kind| {
                let construct: ReportConstructor = match kind {
                    ReportKind::Email => EmailReport::construct,
                };
                (kind.key(), RegistryEntry { kind, construct })
            })
            .collect();

        Self { entries }
    }

    pub fn get(&self, key: &str) -> Option<RegistryEntry> {
        self.entries.get(key).copied()
    }

    pub fn resolve(&self, key: &str) -> CoreResult<RegistryEntry> {
        self.get(key).ok_or_else(|| CoreError::UnknownReport {
            report_type: key.to_string(),
        })
    }

    /// Registered reports ordered by key
    pub fn entries(&self) -> impl Iterator<Item = &RegistryEntry> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Resolve, build, run and tabulate the report registered under `key`
    pub async fn execute(&self, key: &str, filters: Filters, db: &Database) -> CoreResult<ReportOutput> {
        let entry = self.resolve(key)?;
        debug!("Running {} report with {:?}", entry.kind, filters);

        let report = (entry.construct)(filters);
        let rows = report.run_report(db).await?;

        Ok(ReportOutput {
            kind: report.kind(),
            tabulation: tabulate(&rows),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::testing::{insert_user, memory_db};

    #[test]
    fn test_lookup_email() {
        let registry = ReportRegistry::builtin();
        let entry = registry.get("email").unwrap();
        assert_eq!(entry.kind, ReportKind::Email);

        let report = (entry.construct)(Filters::new().with("email", "x@example.com"));
        assert_eq!(report.kind(), ReportKind::Email);
        assert_eq!(report.filters().get("email"), Some("x@example.com"));
    }

    #[test]
    fn test_lookup_unknown() {
        let registry = ReportRegistry::builtin();
        assert!(registry.get("sales").is_none());
        assert!(registry.get("").is_none());

        let err = registry.resolve("sales").unwrap_err();
        assert!(matches!(err, CoreError::UnknownReport { report_type } if report_type == "sales"));
    }

    #[test]
    fn test_entries_cover_all_kinds() {
        let registry = ReportRegistry::builtin();
        assert_eq!(registry.len(), ReportKind::ALL.len());
        let kinds: Vec<_> = registry.entries().map(|e| e.kind).collect();
        assert_eq!(kinds, vec![ReportKind::Email]);
    }

    #[tokio::test]
    async fn test_execute_runs_and_tabulates() {
        let db = memory_db().await;
        insert_user(&db, "ada", "Ada", "Lovelace", "ada@example.com", "2019-02-10").await;

        let registry = ReportRegistry::builtin();
        let output = registry
            .execute("email", Filters::new().with("email", "ada@example.com"), &db)
            .await
            .unwrap();

        assert_eq!(output.kind, ReportKind::Email);
        assert_eq!(output.tabulation.headers, vec!["first_name", "last_name", "username"]);
        assert_eq!(output.tabulation.row_count(), 1);
    }

    #[tokio::test]
    async fn test_execute_unknown_key() {
        let db = memory_db().await;
        let registry = ReportRegistry::builtin();
        let err = registry.execute("nope", Filters::new(), &db).await.unwrap_err();
        assert_eq!(err.code(), crate::error::ErrorCode::UnknownReport);
    }
}
