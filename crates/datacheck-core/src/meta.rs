//! Existence checks against the governance metadata table.
//!
//! The metadata table maps each published table to its ArcGIS Online item.
//! A dataset counts as present only when both the item id and the item name
//! are recorded. Half-filled rows are reported as [`Existence::Incomplete`].

use serde::{Deserialize, Serialize};
use std::marker::PhantomData;
use std::ops::{Deref, DerefMut};

#[cfg(feature = "tracing")]
use tracing::debug;

use crate::checker::{Checker, Diagnostic, Existence, FetchState};
use crate::connector::{Connector, Row};
use crate::engine::{Engine, SqlServer};
use crate::error::CheckError;
use crate::table::TableChecker;

/// The two attributes read from a metadata row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MetadataRow {
    pub item_id: Option<String>,
    pub item_name: Option<String>,
}

impl MetadataRow {
    pub fn new(item_id: Option<&str>, item_name: Option<&str>) -> Self {
        Self {
            item_id: item_id.map(str::to_string),
            item_name: item_name.map(str::to_string),
        }
    }

    /// Read `(item_id, item_name)` from the first two columns of `row`.
    /// Blank strings count as missing.
    pub fn from_row(row: &Row) -> Self {
        let column = |index| {
            row.get(index)
                .filter(|value| !value.trim().is_empty())
                .map(str::to_string)
        };

        Self {
            item_id: column(0),
            item_name: column(1),
        }
    }
}

/// Location and column names of the metadata table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MetaTableLayout {
    pub table: String,
    pub schema_column: String,
    pub table_column: String,
    pub item_id_column: String,
    pub item_name_column: String,
}

impl Default for MetaTableLayout {
    fn default() -> Self {
        Self {
            table: "meta.agol_items".to_string(),
            schema_column: "table_schema".to_string(),
            table_column: "table_name".to_string(),
            item_id_column: "agol_item_id".to_string(),
            item_name_column: "agol_published_name".to_string(),
        }
    }
}

impl MetaTableLayout {
    /// Lookup query selecting `(item_id, item_name)` for a bound `(schema, table)`.
    pub fn query<E: Engine>(&self) -> String {
        format!(
            "SELECT {}, {} FROM {} WHERE {} = {} AND {} = {}",
            self.item_id_column,
            self.item_name_column,
            self.table,
            self.schema_column,
            E::placeholder(1),
            self.table_column,
            E::placeholder(2)
        )
    }
}

/// Interpret a (possibly absent) metadata row.
///
/// | row                    | result                  |
/// |------------------------|-------------------------|
/// | none                   | `Missing`               |
/// | id and name            | `Exists`                |
/// | name only              | `Incomplete(MissingItemId)`   |
/// | id only                | `Incomplete(MissingItemName)` |
/// | neither                | `Missing`               |
pub fn interpret(row: Option<&MetadataRow>) -> Existence {
    let Some(row) = row else {
        return Existence::Missing;
    };

    match (&row.item_id, &row.item_name) {
        (Some(_), Some(_)) => Existence::Exists,
        (None, Some(_)) => Existence::Incomplete(Diagnostic::MissingItemId),
        (Some(_), None) => Existence::Incomplete(Diagnostic::MissingItemName),
        (None, None) => Existence::Missing,
    }
}

/// Looks a table up in the metadata table.
///
/// Identifiers are usually three-part (`category.schema.table`); the leading
/// category segment is ignored. The engine selects placeholder syntax and
/// defaults to SQL Server, where the metadata table is normally hosted.
pub struct MetaTableChecker<C: Connector, E: Engine = SqlServer> {
    base: TableChecker<C>,
    layout: MetaTableLayout,
    data: FetchState<Option<MetadataRow>>,
    engine: PhantomData<E>,
}

impl<C: Connector, E: Engine> MetaTableChecker<C, E> {
    pub fn new(
        identifier: &str,
        connection_string: Option<&str>,
        connector: C,
    ) -> Result<Self, CheckError> {
        Ok(Self {
            base: TableChecker::new(identifier, connection_string, connector)?,
            layout: MetaTableLayout::default(),
            data: FetchState::Pending,
            engine: PhantomData,
        })
    }

    pub fn with_layout(mut self, layout: MetaTableLayout) -> Self {
        self.layout = layout;
        self
    }

    pub fn layout(&self) -> &MetaTableLayout {
        &self.layout
    }

    /// Use `row` as the lookup result instead of querying.
    pub fn with_data(mut self, row: Option<MetadataRow>) -> Self {
        self.set_data(row);
        self
    }

    pub fn set_data(&mut self, row: Option<MetadataRow>) {
        self.data = FetchState::Ready(row);
    }

    pub fn data(&self) -> &FetchState<Option<MetadataRow>> {
        &self.data
    }

    /// The fetched row, if a fetch happened and found one.
    pub fn row(&self) -> Option<&MetadataRow> {
        self.data.as_ready().and_then(Option::as_ref)
    }
}

impl<C: Connector, E: Engine> Checker for MetaTableChecker<C, E> {
    type Outcome = Existence;

    fn get_data(&mut self) -> Result<(), CheckError> {
        let sql = self.layout.query::<E>();
        let rows = self.base.query_name(&sql)?;
        let row = rows.first().map(MetadataRow::from_row);

        #[cfg(feature = "tracing")]
        debug!(table = %self.base.name(), found = row.is_some(), "metadata lookup finished");

        self.data = FetchState::Ready(row);
        Ok(())
    }

    fn exists(&mut self) -> Result<Existence, CheckError> {
        if self.data.is_pending() {
            self.get_data()?;
        }

        Ok(interpret(self.row()))
    }
}

impl<C: Connector, E: Engine> Deref for MetaTableChecker<C, E> {
    type Target = TableChecker<C>;

    fn deref(&self) -> &Self::Target {
        &self.base
    }
}

impl<C: Connector, E: Engine> DerefMut for MetaTableChecker<C, E> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.base
    }
}
