//! The report capability and the tabulation every report shares

use async_trait::async_trait;

use crate::db::Database;
use crate::error::CoreResult;
use crate::models::{Filters, ResultRow, Tabulation};
use crate::types::ReportKind;

/// A runnable report built from a filter set
#[async_trait]
pub trait Report: Send + Sync {
    fn kind(&self) -> ReportKind;

    fn filters(&self) -> &Filters;

    /// Execute the report query. Reports without a query produce no rows.
    async fn run_report(&self, _db: &Database) -> CoreResult<Vec<ResultRow>> {
        Ok(Vec::new())
    }
}

/// Builds a report from its filters
pub type ReportConstructor = fn(Filters) -> Box<dyn Report>;

/// Reshape rows into headers and records.
///
/// Headers come from the first row; every row is assumed to share its columns.
pub fn tabulate(rows: &[ResultRow]) -> Tabulation {
    let headers = rows
        .first()
        .map(|row| row.column_names().map(str::to_string).collect())
        .unwrap_or_default();

    let records = rows
        .iter()
        .map(|row| row.values().cloned().collect())
        .collect();

    Tabulation { headers, records }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::testing::memory_db;
    use crate::types::CellValue;

    struct NoQueryReport {
        filters: Filters,
    }

    #[async_trait]
    impl Report for NoQueryReport {
        fn kind(&self) -> ReportKind {
            ReportKind::Email
        }

        fn filters(&self) -> &Filters {
            &self.filters
        }
    }

    #[test]
    fn test_tabulate_empty() {
        let tabulation = tabulate(&[]);
        assert!(tabulation.headers.is_empty());
        assert!(tabulation.records.is_empty());
    }

    #[test]
    fn test_tabulate_rows() {
        let rows = vec![
            ResultRow::new().with("a", 1).with("b", 2),
            ResultRow::new().with("a", 3).with("b", 4),
        ];
        let tabulation = tabulate(&rows);

        assert_eq!(tabulation.headers, vec!["a", "b"]);
        assert_eq!(
            tabulation.records,
            vec![
                vec![CellValue::Integer(1), CellValue::Integer(2)],
                vec![CellValue::Integer(3), CellValue::Integer(4)],
            ]
        );
        assert_eq!(tabulation.row_count(), 2);
    }

    #[test]
    fn test_tabulate_takes_headers_from_first_row_only() {
        let rows = vec![
            ResultRow::new().with("a", 1),
            ResultRow::new().with("z", "other").with("y", 9),
        ];
        let tabulation = tabulate(&rows);

        assert_eq!(tabulation.headers, vec!["a"]);
        assert_eq!(tabulation.records[1].len(), 2);
    }

    #[tokio::test]
    async fn test_default_run_report_is_empty() {
        let db = memory_db().await;
        let report = NoQueryReport { filters: Filters::new() };
        assert!(report.filters().is_empty());
        assert!(report.run_report(&db).await.unwrap().is_empty());
    }
}
