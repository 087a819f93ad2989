//! The base table checker: a parsed name plus a lazily opened connection.

#[cfg(feature = "tracing")]
use tracing::debug;

use crate::connector::{Connection, Connector, Row};
use crate::error::CheckError;
use crate::name::QualifiedName;

/// State shared by every database-backed checker.
///
/// Construction only parses the identifier. The connection string is checked
/// when [`TableChecker::connect`] runs, so a checker can be built before its
/// configuration is complete.
///
/// The checker owns its connection once opened. It is not closed on drop or
/// on error paths; call [`TableChecker::close`] when done.
pub struct TableChecker<C: Connector> {
    name: QualifiedName,
    connection_string: Option<String>,
    connector: C,
    connection: Option<C::Connection>,
}

impl<C: Connector> TableChecker<C> {
    /// # Errors
    /// Returns [`CheckError::MalformedIdentifier`] if `identifier` is not a
    /// two- or three-part dotted name.
    pub fn new(
        identifier: &str,
        connection_string: Option<&str>,
        connector: C,
    ) -> Result<Self, CheckError> {
        Ok(Self {
            name: QualifiedName::parse(identifier)?,
            connection_string: connection_string.map(str::to_string),
            connector,
            connection: None,
        })
    }

    pub fn name(&self) -> &QualifiedName {
        &self.name
    }

    pub fn schema(&self) -> &str {
        self.name.schema()
    }

    pub fn table(&self) -> &str {
        self.name.table()
    }

    pub fn connection_string(&self) -> Option<&str> {
        self.connection_string.as_deref()
    }

    /// Open the connection, or return the one already held.
    ///
    /// # Errors
    /// Returns [`CheckError::MissingConnectionString`] when the connection
    /// string is absent or blank, and propagates connector failures as-is.
    pub fn connect(&mut self) -> Result<&mut C::Connection, CheckError> {
        let connection = match self.connection.take() {
            Some(connection) => connection,
            None => {
                let descriptor = self
                    .connection_string
                    .as_deref()
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .ok_or(CheckError::MissingConnectionString)?;

                #[cfg(feature = "tracing")]
                debug!(table = %self.name, "opening connection");

                self.connector.connect(descriptor)?
            }
        };

        Ok(self.connection.insert(connection))
    }

    pub fn is_connected(&self) -> bool {
        self.connection.is_some()
    }

    /// Install an already open connection; [`TableChecker::connect`] will reuse it.
    pub fn set_connection(&mut self, connection: C::Connection) {
        self.connection = Some(connection);
    }

    pub fn connection_mut(&mut self) -> Option<&mut C::Connection> {
        self.connection.as_mut()
    }

    /// Hand the open connection back to the caller without closing it.
    pub fn take_connection(&mut self) -> Option<C::Connection> {
        self.connection.take()
    }

    /// Close and drop the held connection, if any.
    pub fn close(&mut self) -> Result<(), CheckError> {
        match self.connection.take() {
            Some(mut connection) => connection.close(),
            None => Ok(()),
        }
    }

    /// Run `sql` bound to `(schema, table)` on the (lazily opened) connection.
    pub(crate) fn query_name(&mut self, sql: &str) -> Result<Vec<Row>, CheckError> {
        let schema = self.name.schema().to_string();
        let table = self.name.table().to_string();

        #[cfg(feature = "tracing")]
        debug!(%schema, %table, sql, "running query");

        self.connect()?.query(sql, &[schema.as_str(), table.as_str()])
    }
}
