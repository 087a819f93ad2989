//! The checker contract shared by every backend.

use serde::{Serialize, Serializer};
use std::fmt;

use crate::error::CheckError;

/// Determines whether one dataset exists in one backend.
///
/// Once data is present (fetched or injected), [`Checker::exists`] works
/// purely on it and never reconnects or refetches.
pub trait Checker {
    /// What [`Checker::exists`] reports. `bool` for every backend except the
    /// metadata table, which reports an [`Existence`].
    type Outcome: Into<Existence> + Clone + fmt::Debug;

    /// Fetch the raw backend data, replacing anything fetched before.
    fn get_data(&mut self) -> Result<(), CheckError>;

    /// Report whether the dataset exists, fetching first if nothing has been
    /// fetched yet.
    fn exists(&mut self) -> Result<Self::Outcome, CheckError>;
}

/// Lazily fetched checker data.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FetchState<T> {
    /// Nothing fetched yet.
    #[default]
    Pending,
    /// Data fetched from the backend or injected by the caller.
    Ready(T),
}

impl<T> FetchState<T> {
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    pub fn as_ready(&self) -> Option<&T> {
        match self {
            Self::Pending => None,
            Self::Ready(data) => Some(data),
        }
    }
}

/// Result of an existence check.
///
/// Has no conversion to `bool`. An [`Existence::Incomplete`] result is neither
/// present nor absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Existence {
    /// The dataset exists and its record is complete.
    Exists,
    /// The dataset does not exist, or its record is empty.
    Missing,
    /// A record exists but lacks a required attribute.
    Incomplete(Diagnostic),
}

impl Existence {
    /// `true` only for [`Existence::Exists`].
    pub fn is_exists(&self) -> bool {
        matches!(self, Self::Exists)
    }

    pub fn diagnostic(&self) -> Option<Diagnostic> {
        match self {
            Self::Incomplete(diagnostic) => Some(*diagnostic),
            _ => None,
        }
    }
}

impl From<bool> for Existence {
    fn from(exists: bool) -> Self {
        if exists {
            Self::Exists
        } else {
            Self::Missing
        }
    }
}

impl fmt::Display for Existence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exists => f.write_str("exists"),
            Self::Missing => f.write_str("missing"),
            Self::Incomplete(diagnostic) => diagnostic.fmt(f),
        }
    }
}

impl Serialize for Existence {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Data-quality problem found in a metadata record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Diagnostic {
    MissingItemId,
    MissingItemName,
}

impl Diagnostic {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MissingItemId => "missing item id",
            Self::MissingItemName => "missing item name",
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
