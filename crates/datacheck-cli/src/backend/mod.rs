//! Concrete collaborators for the core checkers.
//!
//! [`DatabaseConnector`] picks a driver from the connection string: sqlx for
//! PostgreSQL, MySQL, and SQLite URLs, tiberius for SQL Server connection
//! strings (behind the `mssql` feature). [`ReqwestHttpClient`] serves the
//! remote checkers.

mod http_client;
#[cfg(feature = "mssql")]
mod mssql_connector;
mod sqlx_connector;

use datacheck_core::{CheckError, Connection, Connector, Row};

pub use http_client::ReqwestHttpClient;
#[cfg(feature = "mssql")]
pub use mssql_connector::{MssqlConnection, MssqlConnector};
pub use sqlx_connector::{SqlxConnection, SqlxConnector};

/// Database type inferred from a connection string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatabaseType {
    Postgres,
    Mysql,
    Sqlite,
    Mssql,
}

impl DatabaseType {
    /// Infer database type from a connection URL or SQL Server connection string.
    pub fn from_url(url: &str) -> Option<Self> {
        let url = url.trim();
        if url.starts_with("postgres://") || url.starts_with("postgresql://") {
            Some(Self::Postgres)
        } else if url.starts_with("mysql://") || url.starts_with("mariadb://") {
            Some(Self::Mysql)
        } else if url.starts_with("sqlite://") || url.starts_with("sqlite:") {
            Some(Self::Sqlite)
        } else if url.starts_with("jdbc:sqlserver://") || is_ado_string(url) {
            Some(Self::Mssql)
        } else {
            None
        }
    }
}

/// ADO.NET style `key=value;...` strings naming a server.
fn is_ado_string(s: &str) -> bool {
    s.split(';').any(|pair| {
        pair.split_once('=').is_some_and(|(key, _)| {
            matches!(
                key.trim().to_ascii_lowercase().as_str(),
                "server" | "data source" | "address" | "addr"
            )
        })
    })
}

/// Connector dispatching on the connection string's database type.
#[derive(Debug, Clone, Copy, Default)]
pub struct DatabaseConnector;

impl Connector for DatabaseConnector {
    type Connection = DatabaseConnection;

    fn connect(&self, descriptor: &str) -> Result<DatabaseConnection, CheckError> {
        match DatabaseType::from_url(descriptor) {
            Some(DatabaseType::Mssql) => connect_mssql(descriptor),
            Some(_) => SqlxConnector.connect(descriptor).map(DatabaseConnection::Sqlx),
            None => Err(CheckError::Connection(
                "unsupported connection string: expected a postgres://, mysql://, sqlite: URL \
                 or a SQL Server connection string"
                    .to_string(),
            )),
        }
    }
}

#[cfg(feature = "mssql")]
fn connect_mssql(descriptor: &str) -> Result<DatabaseConnection, CheckError> {
    MssqlConnector
        .connect(descriptor)
        .map(DatabaseConnection::Mssql)
}

#[cfg(not(feature = "mssql"))]
fn connect_mssql(_descriptor: &str) -> Result<DatabaseConnection, CheckError> {
    Err(CheckError::Connection(
        "SQL Server support is not enabled (rebuild with the `mssql` feature)".to_string(),
    ))
}

/// An open connection from [`DatabaseConnector`].
pub enum DatabaseConnection {
    Sqlx(SqlxConnection),
    #[cfg(feature = "mssql")]
    Mssql(MssqlConnection),
}

impl Connection for DatabaseConnection {
    fn query(&mut self, sql: &str, params: &[&str]) -> Result<Vec<Row>, CheckError> {
        match self {
            Self::Sqlx(connection) => connection.query(sql, params),
            #[cfg(feature = "mssql")]
            Self::Mssql(connection) => connection.query(sql, params),
        }
    }

    fn close(&mut self) -> Result<(), CheckError> {
        match self {
            Self::Sqlx(connection) => connection.close(),
            #[cfg(feature = "mssql")]
            Self::Mssql(connection) => connection.close(),
        }
    }
}
