//! Runs one checker per identifier and collects the outcomes.

use datacheck_core::{
    ArcGisOnlineChecker, CheckError, Checker, Connector, Existence, HttpClient, MetaTableChecker,
    MetaTableLayout, MsSqlTableChecker, MySql, MySqlTableChecker, OpenDataChecker,
    PgSqlTableChecker, Postgres, SqlServer, TableChecker,
};
use serde::Serialize;
use std::ops::DerefMut;
use tracing::{info, warn};

use crate::backend::DatabaseType;
use crate::cli::BackendArg;

/// Outcome of checking one identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckStatus {
    Exists,
    Missing,
    Incomplete,
    Error,
}

/// One line of the report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckReport {
    pub backend: &'static str,
    pub identifier: String,
    pub status: CheckStatus,
    /// Diagnostic for incomplete records, error message for failures.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl CheckReport {
    fn from_result(
        backend: BackendArg,
        identifier: &str,
        result: Result<Existence, CheckError>,
    ) -> Self {
        let (status, detail) = match result {
            Ok(Existence::Exists) => (CheckStatus::Exists, None),
            Ok(Existence::Missing) => (CheckStatus::Missing, None),
            Ok(Existence::Incomplete(diagnostic)) => {
                (CheckStatus::Incomplete, Some(diagnostic.to_string()))
            }
            Err(err) => (CheckStatus::Error, Some(err.to_string())),
        };

        Self {
            backend: backend.as_str(),
            identifier: identifier.to_string(),
            status,
            detail,
        }
    }

    pub fn is_exists(&self) -> bool {
        self.status == CheckStatus::Exists
    }
}

/// Everything a check needs besides the identifier.
pub struct CheckContext<'a, C, H> {
    pub backend: BackendArg,
    pub connection: Option<&'a str>,
    pub connector: C,
    pub http: Option<H>,
    pub meta_layout: &'a MetaTableLayout,
}

impl<C, H> CheckContext<'_, C, H>
where
    C: Connector + Clone,
    H: HttpClient + Clone,
{
    /// Check every identifier in order. Failures are reported per identifier
    /// and never stop the run.
    pub fn run_all(&self, identifiers: &[String]) -> Vec<CheckReport> {
        identifiers
            .iter()
            .map(|identifier| self.run(identifier))
            .collect()
    }

    pub fn run(&self, identifier: &str) -> CheckReport {
        let result = self.check(identifier);

        let backend = self.backend.as_str();
        match &result {
            Ok(existence) => info!(backend, identifier, %existence, "checked"),
            Err(err) => warn!(backend, identifier, error = %err, "check failed"),
        }

        CheckReport::from_result(self.backend, identifier, result)
    }

    fn check(&self, identifier: &str) -> Result<Existence, CheckError> {
        let connection = self.connection;
        let connector = self.connector.clone();

        match self.backend {
            BackendArg::Postgres => {
                check_table(PgSqlTableChecker::new(identifier, connection, connector)?)
            }
            BackendArg::Mssql => {
                check_table(MsSqlTableChecker::new(identifier, connection, connector)?)
            }
            BackendArg::Mysql => {
                check_table(MySqlTableChecker::new(identifier, connection, connector)?)
            }
            BackendArg::Meta => self.check_meta(identifier),
            BackendArg::Agol => ArcGisOnlineChecker::new(identifier, self.http_client()?)
                .exists()
                .map(Into::into),
            BackendArg::OpenData => OpenDataChecker::new(identifier, self.http_client()?)
                .exists()
                .map(Into::into),
        }
    }

    /// The metadata table's placeholder syntax follows the connection's engine.
    fn check_meta(&self, identifier: &str) -> Result<Existence, CheckError> {
        let connection = self.connection;
        let connector = self.connector.clone();
        let layout = self.meta_layout.clone();

        match connection.and_then(DatabaseType::from_url) {
            Some(DatabaseType::Postgres) => check_table(
                MetaTableChecker::<C, Postgres>::new(identifier, connection, connector)?
                    .with_layout(layout),
            ),
            Some(DatabaseType::Mysql | DatabaseType::Sqlite) => check_table(
                MetaTableChecker::<C, MySql>::new(identifier, connection, connector)?
                    .with_layout(layout),
            ),
            Some(DatabaseType::Mssql) | None => check_table(
                MetaTableChecker::<C, SqlServer>::new(identifier, connection, connector)?
                    .with_layout(layout),
            ),
        }
    }

    fn http_client(&self) -> Result<H, CheckError> {
        self.http
            .clone()
            .ok_or_else(|| CheckError::Http("no HTTP client configured".to_string()))
    }
}

/// Run a database-backed check and release its connection.
fn check_table<C, K>(mut checker: K) -> Result<Existence, CheckError>
where
    C: Connector,
    K: Checker + DerefMut<Target = TableChecker<C>>,
{
    let outcome = checker.exists().map(Into::into);

    if let Err(err) = checker.close() {
        warn!(table = %checker.name(), error = %err, "failed to close connection");
    }

    outcome
}
