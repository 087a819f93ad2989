//! Existence checks against a relational engine's own catalog.

use std::marker::PhantomData;
use std::ops::{Deref, DerefMut};

#[cfg(feature = "tracing")]
use tracing::debug;

use crate::checker::{Checker, FetchState};
use crate::connector::{Connector, Row};
use crate::engine::{Engine, MySql, Postgres, SqlServer};
use crate::error::CheckError;
use crate::table::TableChecker;

/// Checks `information_schema` for a `(schema, table)` pair.
///
/// The engine parameter only selects the probe query; the connector decides
/// how the connection is made. The dataset exists iff the probe returns at
/// least one row.
pub struct RelationalTableChecker<C: Connector, E: Engine> {
    base: TableChecker<C>,
    data: FetchState<Vec<Row>>,
    engine: PhantomData<E>,
}

pub type PgSqlTableChecker<C> = RelationalTableChecker<C, Postgres>;
pub type MsSqlTableChecker<C> = RelationalTableChecker<C, SqlServer>;
pub type MySqlTableChecker<C> = RelationalTableChecker<C, MySql>;

impl<C: Connector, E: Engine> RelationalTableChecker<C, E> {
    pub fn new(
        identifier: &str,
        connection_string: Option<&str>,
        connector: C,
    ) -> Result<Self, CheckError> {
        Ok(Self {
            base: TableChecker::new(identifier, connection_string, connector)?,
            data: FetchState::Pending,
            engine: PhantomData,
        })
    }

    /// Use `rows` as the probe result instead of querying.
    pub fn with_data(mut self, rows: Vec<Row>) -> Self {
        self.set_data(rows);
        self
    }

    pub fn set_data(&mut self, rows: Vec<Row>) {
        self.data = FetchState::Ready(rows);
    }

    pub fn data(&self) -> &FetchState<Vec<Row>> {
        &self.data
    }
}

impl<C: Connector, E: Engine> Checker for RelationalTableChecker<C, E> {
    type Outcome = bool;

    fn get_data(&mut self) -> Result<(), CheckError> {
        let rows = self.base.query_name(&E::catalog_probe())?;

        #[cfg(feature = "tracing")]
        debug!(
            engine = E::NAME,
            table = %self.base.name(),
            rows = rows.len(),
            "catalog probe finished"
        );

        self.data = FetchState::Ready(rows);
        Ok(())
    }

    fn exists(&mut self) -> Result<bool, CheckError> {
        if self.data.is_pending() {
            self.get_data()?;
        }

        Ok(self.data.as_ready().is_some_and(|rows| !rows.is_empty()))
    }
}

impl<C: Connector, E: Engine> Deref for RelationalTableChecker<C, E> {
    type Target = TableChecker<C>;

    fn deref(&self) -> &Self::Target {
        &self.base
    }
}

impl<C: Connector, E: Engine> DerefMut for RelationalTableChecker<C, E> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.base
    }
}
