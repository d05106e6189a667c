//! Data structures passed between the database, reports and views

use serde::Serialize;
use sqlx::sqlite::SqliteRow;
use sqlx::{Column, Row, TypeInfo, ValueRef};
use std::collections::BTreeMap;

use crate::error::{CoreError, CoreResult};
use crate::types::CellValue;

/// One result row, columns kept in query order
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ResultRow {
    columns: Vec<(String, CellValue)>,
}

impl ResultRow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a column, builder style
    pub fn with(mut self, name: &str, value: impl Into<CellValue>) -> Self {
        self.columns.push((name.to_string(), value.into()));
        self
    }

    pub fn get(&self, name: &str) -> Option<&CellValue> {
        self.columns
            .iter()
            .find(|(column, _)| column == name)
            .map(|(_, value)| value)
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|(name, _)| name.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = &CellValue> {
        self.columns.iter().map(|(_, value)| value)
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Convert a SQLite row, decoding each cell from its runtime storage class
    pub fn from_sqlite_row(row: &SqliteRow) -> Result<Self, sqlx::Error> {
        let mut columns = Vec::with_capacity(row.len());

        for column in row.columns() {
            let index = column.ordinal();
            let raw = row.try_get_raw(index)?;

            let value = if raw.is_null() {
                CellValue::Null
            } else {
                match raw.type_info().name() {
                    "INTEGER" | "BOOLEAN" => CellValue::Integer(row.try_get(index)?),
                    "REAL" => CellValue::Real(row.try_get(index)?),
                    "BLOB" => {
                        let bytes: Vec<u8> = row.try_get(index)?;
                        CellValue::Text(String::from_utf8_lossy(&bytes).into_owned())
                    }
                    _ => CellValue::Text(row.try_get(index)?),
                }
            };

            columns.push((column.name().to_string(), value));
        }

        Ok(Self { columns })
    }
}

/// Named constraints applied to a report query
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Filters(BTreeMap<String, String>);

impl Filters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: &str, value: &str) -> Self {
        self.0.insert(name.to_string(), value.to_string());
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    /// Like `get`, but a missing filter is an error
    pub fn require(&self, name: &str) -> CoreResult<&str> {
        self.get(name).ok_or_else(|| CoreError::MissingFilter {
            name: name.to_string(),
        })
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl From<BTreeMap<String, String>> for Filters {
    fn from(map: BTreeMap<String, String>) -> Self {
        Self(map)
    }
}

/// Display-ready report data: one header per column, one record per row
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Tabulation {
    pub headers: Vec<String>,
    pub records: Vec<Vec<CellValue>>,
}

impl Tabulation {
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn row_count(&self) -> usize {
        self.records.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_row_keeps_column_order() {
        let row = ResultRow::new().with("b", 2).with("a", 1);
        assert_eq!(row.column_names().collect::<Vec<_>>(), vec!["b", "a"]);
        assert_eq!(row.get("a"), Some(&CellValue::Integer(1)));
        assert_eq!(row.get("c"), None);
        assert_eq!(row.len(), 2);
    }

    #[test]
    fn test_filters_require() {
        let filters = Filters::new().with("email", "x@example.com");
        assert_eq!(filters.require("email").unwrap(), "x@example.com");

        let err = filters.require("group").unwrap_err();
        assert!(matches!(err, CoreError::MissingFilter { name } if name == "group"));
    }

    #[test]
    fn test_filters_from_config_map() {
        let mut map = BTreeMap::new();
        map.insert("email".to_string(), "a@b.c".to_string());
        let filters = Filters::from(map);
        assert_eq!(filters.iter().collect::<Vec<_>>(), vec![("email", "a@b.c")]);
    }
}
