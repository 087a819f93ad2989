//! SQLx-based connector for PostgreSQL, MySQL, and SQLite.
//!
//! The checkers are synchronous, so each connection owns a small tokio
//! runtime and blocks on the async driver.

use datacheck_core::{CheckError, Connection, Connector, Row};
use sqlx::any::AnyRow;
use sqlx::AnyConnection;
use sqlx::Connection as _;
use sqlx::Row as _;
use tokio::runtime::Runtime;
use tracing::debug;

/// Opens a single sqlx connection per check.
#[derive(Debug, Clone, Copy, Default)]
pub struct SqlxConnector;

impl Connector for SqlxConnector {
    type Connection = SqlxConnection;

    fn connect(&self, descriptor: &str) -> Result<SqlxConnection, CheckError> {
        sqlx::any::install_default_drivers();

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| CheckError::Connection(format!("failed to start runtime: {e}")))?;

        let connection = runtime
            .block_on(AnyConnection::connect(descriptor))
            .map_err(|e| CheckError::Connection(e.to_string()))?;

        debug!(backend = connection.backend_name(), "connected");

        Ok(SqlxConnection {
            runtime,
            connection: Some(connection),
        })
    }
}

/// An open sqlx connection and the runtime driving it.
pub struct SqlxConnection {
    runtime: Runtime,
    connection: Option<AnyConnection>,
}

impl Connection for SqlxConnection {
    fn query(&mut self, sql: &str, params: &[&str]) -> Result<Vec<Row>, CheckError> {
        let connection = self
            .connection
            .as_mut()
            .ok_or_else(|| CheckError::Query("connection is closed".to_string()))?;

        let mut query = sqlx::query(sql);
        for param in params {
            query = query.bind(param.to_string());
        }

        let rows = self
            .runtime
            .block_on(query.fetch_all(connection))
            .map_err(|e| CheckError::Query(e.to_string()))?;

        Ok(rows.iter().map(row_to_text).collect())
    }

    fn close(&mut self) -> Result<(), CheckError> {
        match self.connection.take() {
            Some(connection) => self
                .runtime
                .block_on(connection.close())
                .map_err(|e| CheckError::Connection(e.to_string())),
            None => Ok(()),
        }
    }
}

/// Render every column as text, handling the value kinds the catalogs return.
fn row_to_text(row: &AnyRow) -> Row {
    (0..row.columns().len())
        .map(|index| {
            // Try text first, then the numeric and boolean kinds
            if let Ok(value) = row.try_get::<Option<String>, _>(index) {
                return value;
            }
            if let Ok(value) = row.try_get::<Option<i64>, _>(index) {
                return value.map(|v| v.to_string());
            }
            if let Ok(value) = row.try_get::<Option<i32>, _>(index) {
                return value.map(|v| v.to_string());
            }
            if let Ok(value) = row.try_get::<Option<bool>, _>(index) {
                return value.map(|v| v.to_string());
            }
            None
        })
        .collect()
}
