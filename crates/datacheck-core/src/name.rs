//! Parsing of dotted dataset identifiers.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::error::CheckError;

/// A `schema.table` identifier, optionally prefixed with a database segment.
///
/// Identifiers are accepted in two forms:
/// - `schema.table`
/// - `database.schema.table`
///
/// The leading segment of the three-part form is kept for display and
/// diagnostics only. Every backend query addresses the dataset by its
/// `(schema, table)` pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct QualifiedName {
    database: Option<String>,
    schema: String,
    table: String,
}

impl QualifiedName {
    /// Parse a dotted identifier.
    ///
    /// # Errors
    /// Returns [`CheckError::MalformedIdentifier`] when the identifier does not
    /// have exactly two or three segments, or when any segment is empty.
    ///
    /// Whitespace around each segment is trimmed, so `" a . b "` parses as
    /// schema `a`, table `b`.
    ///
    /// # Examples
    /// - `location.city` → schema `location`, table `city`
    /// - `dbo.location.city` → schema `location`, table `city`
    /// - `city` → error
    pub fn parse(identifier: &str) -> Result<Self, CheckError> {
        let parts: Vec<&str> = identifier.split('.').collect();

        if parts.iter().any(|part| part.trim().is_empty()) && parts.len() > 1 {
            return Err(CheckError::malformed(identifier, "empty segment"));
        }

        match parts.as_slice() {
            [schema, table] => Ok(Self {
                database: None,
                schema: schema.trim().to_string(),
                table: table.trim().to_string(),
            }),
            [database, schema, table] => Ok(Self {
                database: Some(database.trim().to_string()),
                schema: schema.trim().to_string(),
                table: table.trim().to_string(),
            }),
            _ => Err(CheckError::malformed(
                identifier,
                format!(
                    "expected `schema.table` or `database.schema.table`, found {} segment(s)",
                    parts.len()
                ),
            )),
        }
    }

    /// The discarded leading segment of a three-part identifier.
    pub fn database(&self) -> Option<&str> {
        self.database.as_deref()
    }

    pub fn schema(&self) -> &str {
        &self.schema
    }

    pub fn table(&self) -> &str {
        &self.table
    }
}

impl FromStr for QualifiedName {
    type Err = CheckError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.schema, self.table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_two_parts() {
        let name = QualifiedName::parse("location.city").unwrap();
        assert_eq!(name.schema(), "location");
        assert_eq!(name.table(), "city");
        assert_eq!(name.database(), None);
    }

    #[test]
    fn test_three_parts_discards_database() {
        let name = QualifiedName::parse("dbo.location.city").unwrap();
        assert_eq!(name.schema(), "location");
        assert_eq!(name.table(), "city");
        assert_eq!(name.database(), Some("dbo"));
        assert_eq!(name.to_string(), "location.city");
    }

    #[rstest]
    #[case("city")]
    #[case("some.very.long.table.name")]
    #[case("a.b.c.d")]
    #[case("")]
    #[case("schema.")]
    #[case(".table")]
    #[case("db..table")]
    fn test_rejects_malformed(#[case] identifier: &str) {
        let err = QualifiedName::parse(identifier).unwrap_err();
        assert!(
            matches!(err, CheckError::MalformedIdentifier { .. }),
            "unexpected error for {identifier:?}: {err}"
        );
    }

    #[test]
    fn test_segments_are_trimmed() {
        let name = QualifiedName::parse(" sgid . boundaries .counties ").unwrap();
        assert_eq!(name.database(), Some("sgid"));
        assert_eq!(name.schema(), "boundaries");
        assert_eq!(name.table(), "counties");

        assert!(QualifiedName::parse("boundaries.  ").is_err());
    }

    #[test]
    fn test_from_str() {
        let name: QualifiedName = "sgid.boundaries.municipalities".parse().unwrap();
        assert_eq!(name.schema(), "boundaries");
        assert_eq!(name.table(), "municipalities");
    }

    #[test]
    fn test_segment_count_in_message() {
        let err = QualifiedName::parse("city").unwrap_err();
        assert!(err.to_string().contains("found 1 segment(s)"));
    }
}
