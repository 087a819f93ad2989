//! Relational engine flavors.
//!
//! An [`Engine`] only decides query text: bind placeholder syntax and the
//! catalog probe used to test whether a table exists. Connection mechanics
//! belong to the [`crate::Connector`].

/// Query dialect of a relational backend.
pub trait Engine {
    /// Display name used in logs and reports.
    const NAME: &'static str;

    /// Bind placeholder for the 1-based parameter `index`.
    fn placeholder(index: usize) -> String;

    /// Query returning one row per table matching `(schema, table)`,
    /// bound as parameters 1 and 2.
    fn catalog_probe() -> String {
        format!(
            "SELECT 1 FROM information_schema.tables WHERE table_schema = {} AND table_name = {}",
            Self::placeholder(1),
            Self::placeholder(2)
        )
    }
}

/// PostgreSQL (`$1`, `$2`, ...).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Postgres;

impl Engine for Postgres {
    const NAME: &'static str = "postgres";

    fn placeholder(index: usize) -> String {
        format!("${index}")
    }
}

/// Microsoft SQL Server (`@P1`, `@P2`, ...).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SqlServer;

impl Engine for SqlServer {
    const NAME: &'static str = "mssql";

    fn placeholder(index: usize) -> String {
        format!("@P{index}")
    }

    fn catalog_probe() -> String {
        "SELECT 1 FROM INFORMATION_SCHEMA.TABLES WHERE TABLE_SCHEMA = @P1 AND TABLE_NAME = @P2"
            .to_string()
    }
}

/// MySQL and other `?`-placeholder engines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MySql;

impl Engine for MySql {
    const NAME: &'static str = "mysql";

    fn placeholder(_index: usize) -> String {
        "?".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_postgres_probe() {
        assert_eq!(
            Postgres::catalog_probe(),
            "SELECT 1 FROM information_schema.tables WHERE table_schema = $1 AND table_name = $2"
        );
    }

    #[test]
    fn test_sql_server_probe() {
        let probe = SqlServer::catalog_probe();
        assert!(probe.contains("INFORMATION_SCHEMA.TABLES"));
        assert!(probe.contains("@P1") && probe.contains("@P2"));
    }

    #[test]
    fn test_mysql_placeholders() {
        assert_eq!(MySql::placeholder(1), "?");
        assert_eq!(MySql::placeholder(2), "?");
        assert!(MySql::catalog_probe().ends_with("table_name = ?"));
    }
}
