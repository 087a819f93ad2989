//! Database connector abstraction.
//!
//! The core never talks to a database driver directly. A [`Connector`] turns a
//! connection string into a [`Connection`], and a connection runs a query and
//! returns plain [`Row`]s. Driver-backed implementations live in the CLI
//! crate; tests substitute in-memory fakes.

use crate::error::CheckError;

/// Opens connections from a connection string.
pub trait Connector {
    type Connection: Connection;

    /// Open a connection.
    ///
    /// Callers guarantee `descriptor` is non-empty.
    fn connect(&self, descriptor: &str) -> Result<Self::Connection, CheckError>;
}

/// An open, query-capable connection.
pub trait Connection {
    /// Execute `sql` with positional string parameters and fetch every row.
    ///
    /// Placeholder syntax inside `sql` is engine specific (see [`crate::Engine`]).
    fn query(&mut self, sql: &str, params: &[&str]) -> Result<Vec<Row>, CheckError>;

    /// Release the connection. Closing twice is a no-op.
    fn close(&mut self) -> Result<(), CheckError>;
}

/// A fetched result row, with every column rendered as text.
///
/// `None` marks a SQL `NULL`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    values: Vec<Option<String>>,
}

impl Row {
    pub fn new(values: Vec<Option<String>>) -> Self {
        Self { values }
    }

    /// Value of the column at `index`, or `None` for `NULL` and out-of-range columns.
    pub fn get(&self, index: usize) -> Option<&str> {
        self.values.get(index).and_then(|value| value.as_deref())
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl FromIterator<Option<String>> for Row {
    fn from_iter<I: IntoIterator<Item = Option<String>>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> FromIterator<Option<&'a str>> for Row {
    fn from_iter<I: IntoIterator<Item = Option<&'a str>>>(iter: I) -> Self {
        Self::new(iter.into_iter().map(|v| v.map(str::to_string)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_get() {
        let row: Row = [Some("guid"), None].into_iter().collect();
        assert_eq!(row.len(), 2);
        assert_eq!(row.get(0), Some("guid"));
        assert_eq!(row.get(1), None);
        assert_eq!(row.get(7), None);
    }
}
