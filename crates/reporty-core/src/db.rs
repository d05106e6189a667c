//! SQLite connection pool and the user tables the reports read from

use log::{debug, info};
use reporty_config::DatabaseConfig;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;

use crate::error::CoreResult;
use crate::models::ResultRow;

const SCHEMA: [&str; 2] = [
    "CREATE TABLE IF NOT EXISTS auth_user (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        password TEXT NOT NULL DEFAULT '',
        last_login TEXT,
        is_superuser INTEGER NOT NULL DEFAULT 0,
        username TEXT NOT NULL UNIQUE,
        first_name TEXT NOT NULL DEFAULT '',
        last_name TEXT NOT NULL DEFAULT '',
        email TEXT NOT NULL DEFAULT '',
        is_staff INTEGER NOT NULL DEFAULT 0,
        is_active INTEGER NOT NULL DEFAULT 1,
        date_joined TEXT NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS auth_user_groups (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        user_id INTEGER NOT NULL REFERENCES auth_user (id),
        group_id INTEGER NOT NULL,
        UNIQUE (user_id, group_id)
    )",
];

/// An async database pool wrapper.
#[derive(Clone, Debug)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Open a pool for the configured url, creating the file if needed
    pub async fn connect(config: &DatabaseConfig) -> CoreResult<Self> {
        let options = SqliteConnectOptions::from_str(&config.url)?.create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .connect_with(options)
            .await?;
        info!("Connected to database: {}", config.url);

        let db = Self { pool };
        if config.create_schema {
            db.ensure_schema().await?;
        }
        Ok(db)
    }

    pub fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Create `auth_user` and `auth_user_groups` when they do not exist yet
    pub async fn ensure_schema(&self) -> CoreResult<()> {
        for statement in SCHEMA {
            sqlx::query(statement).execute(&self.pool).await?;
        }
        debug!("User tables are in place");
        Ok(())
    }

    /// Run a read query with positional `?` parameters bound in order
    pub async fn fetch_rows(&self, sql: &str, params: &[&str]) -> CoreResult<Vec<ResultRow>> {
        debug!("Fetching rows with SQL: {}", sql);

        let mut query = sqlx::query(sql);
        for param in params {
            query = query.bind(param.to_string());
        }

        let rows = query.fetch_all(&self.pool).await?;
        let rows = rows
            .iter()
            .map(ResultRow::from_sqlite_row)
            .collect::<Result<Vec<_>, _>>()?;

        debug!("Fetched {} rows", rows.len());
        Ok(rows)
    }
}


#[cfg(test)]
mod tests {
    use super::testing::*;
    use crate::types::CellValue;

    #[tokio::test]
    async fn test_ensure_schema_is_idempotent() {
        let db = memory_db().await;
        db.ensure_schema().await.unwrap();
        let rows = db.fetch_rows("SELECT COUNT(*) AS n FROM auth_user", &[]).await.unwrap();
        assert_eq!(rows[0].get("n"), Some(&CellValue::Integer(0)));
    }

    #[tokio::test]
    async fn test_fetch_rows_decodes_storage_classes() {
        let db = memory_db().await;
        let rows = db
            .fetch_rows("SELECT 1 AS i, 2.5 AS r, 'txt' AS t, NULL AS n, ? AS p", &["bound"])
            .await
            .unwrap();

        let row = &rows[0];
        assert_eq!(row.column_names().collect::<Vec<_>>(), vec!["i", "r", "t", "n", "p"]);
        assert_eq!(row.get("i"), Some(&CellValue::Integer(1)));
        assert_eq!(row.get("r"), Some(&CellValue::Real(2.5)));
        assert_eq!(row.get("t"), Some(&CellValue::Text("txt".to_string())));
        assert_eq!(row.get("n"), Some(&CellValue::Null));
        assert_eq!(row.get("p"), Some(&CellValue::Text("bound".to_string())));
    }

    #[tokio::test]
    async fn test_bad_sql_is_a_database_error() {
        let db = memory_db().await;
        let err = db.fetch_rows("SELECT * FROM missing_table", &[]).await.unwrap_err();
        assert_eq!(err.code(), crate::error::ErrorCode::DatabaseError);
    }
}
