//! Basic types shared by every report

use serde::Serialize;

/// Kinds of report the service knows how to build
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportKind {
    /// Users matching an email address, ordered by join date
    Email,
}

impl ReportKind {
    /// Every built-in kind
    pub const ALL: [ReportKind; 1] = [ReportKind::Email];

    /// URL key of the report
    pub fn key(&self) -> &'static str {
        match self {
            ReportKind::Email => "email",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            ReportKind::Email => "Email report",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ReportKind::Email => "Users registered with the configured email address, oldest first.",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.key() == key)
    }
}

impl std::fmt::Display for ReportKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// A single database value as shown in a report cell
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CellValue {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
}

impl std::fmt::Display for CellValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CellValue::Null => Ok(()),
            CellValue::Integer(v) => write!(f, "{}", v),
            CellValue::Real(v) => write!(f, "{}", v),
            CellValue::Text(v) => f.write_str(v),
        }
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        CellValue::Integer(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Real(value)
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_kind_keys() {
        assert_eq!(ReportKind::from_key("email"), Some(ReportKind::Email));
        assert_eq!(ReportKind::from_key("Email"), None);
        assert_eq!(ReportKind::from_key("sales"), None);
        assert_eq!(ReportKind::Email.to_string(), "email");
    }

    #[test]
    fn test_cell_value_display() {
        assert_eq!(CellValue::Null.to_string(), "");
        assert_eq!(CellValue::from(42).to_string(), "42");
        assert_eq!(CellValue::from(1.5).to_string(), "1.5");
        assert_eq!(CellValue::from("Ada").to_string(), "Ada");
    }

    #[test]
    fn test_cell_value_serializes_untagged() {
        let json = serde_json::to_string(&vec![
            CellValue::Null,
            CellValue::from(7),
            CellValue::from("x"),
        ])
        .unwrap();
        assert_eq!(json, r#"[null,7,"x"]"#);
    }
}
