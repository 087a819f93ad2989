pub mod checker;
pub mod connector;
pub mod engine;
pub mod error;
pub mod http;
pub mod meta;
pub mod name;
pub mod relational;
pub mod remote;
pub mod table;

// Re-export main types
pub use checker::{Checker, Diagnostic, Existence, FetchState};
pub use connector::{Connection, Connector, Row};
pub use engine::{Engine, MySql, Postgres, SqlServer};
pub use error::CheckError;
pub use http::{HttpClient, HttpResponse};
pub use meta::{MetaTableChecker, MetaTableLayout, MetadataRow};
pub use name::QualifiedName;
pub use relational::{
    MsSqlTableChecker, MySqlTableChecker, PgSqlTableChecker, RelationalTableChecker,
};
pub use remote::{
    ArcGisOnline, ArcGisOnlineChecker, OpenData, OpenDataChecker, RemoteResource, UrlChecker,
};
pub use table::TableChecker;
