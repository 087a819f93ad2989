//! Tiberius-based connector for SQL Server.
//!
//! Accepts ADO.NET (`server=tcp:host,1433;database=...`) and JDBC
//! (`jdbc:sqlserver://host:1433;databaseName=...`) connection strings.

use datacheck_core::{CheckError, Connection, Connector, Row};
use tiberius::{Client, Config, ToSql};
use tokio::net::TcpStream;
use tokio::runtime::Runtime;
use tokio_util::compat::{Compat, TokioAsyncWriteCompatExt};
use tracing::debug;

#[derive(Debug, Clone, Copy, Default)]
pub struct MssqlConnector;

impl Connector for MssqlConnector {
    type Connection = MssqlConnection;

    fn connect(&self, descriptor: &str) -> Result<MssqlConnection, CheckError> {
        let config = parse_config(descriptor)?;

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| CheckError::Connection(format!("failed to start runtime: {e}")))?;

        let client = runtime.block_on(async {
            let tcp = TcpStream::connect(config.get_addr())
                .await
                .map_err(|e| CheckError::Connection(e.to_string()))?;
            tcp.set_nodelay(true)
                .map_err(|e| CheckError::Connection(e.to_string()))?;

            Client::connect(config, tcp.compat_write())
                .await
                .map_err(|e| CheckError::Connection(e.to_string()))
        })?;

        debug!("connected to SQL Server");

        Ok(MssqlConnection {
            runtime,
            client: Some(client),
        })
    }
}

fn parse_config(descriptor: &str) -> Result<Config, CheckError> {
    let parsed = if descriptor.starts_with("jdbc:") {
        Config::from_jdbc_string(descriptor)
    } else {
        Config::from_ado_string(descriptor)
    };

    parsed.map_err(|e| CheckError::Connection(e.to_string()))
}

pub struct MssqlConnection {
    runtime: Runtime,
    client: Option<Client<Compat<TcpStream>>>,
}

impl Connection for MssqlConnection {
    fn query(&mut self, sql: &str, params: &[&str]) -> Result<Vec<Row>, CheckError> {
        let client = self
            .client
            .as_mut()
            .ok_or_else(|| CheckError::Query("connection is closed".to_string()))?;

        let params: Vec<&dyn ToSql> = params.iter().map(|p| p as &dyn ToSql).collect();

        let rows = self.runtime.block_on(async {
            client
                .query(sql, &params)
                .await?
                .into_first_result()
                .await
        });

        let rows = rows.map_err(|e| CheckError::Query(e.to_string()))?;
        Ok(rows.iter().map(row_to_text).collect())
    }

    fn close(&mut self) -> Result<(), CheckError> {
        match self.client.take() {
            Some(client) => self
                .runtime
                .block_on(client.close())
                .map_err(|e| CheckError::Connection(e.to_string())),
            None => Ok(()),
        }
    }
}

fn row_to_text(row: &tiberius::Row) -> Row {
    (0..row.len())
        .map(|index| {
            if let Ok(value) = row.try_get::<&str, _>(index) {
                return value.map(str::to_string);
            }
            if let Ok(value) = row.try_get::<i32, _>(index) {
                return value.map(|v| v.to_string());
            }
            if let Ok(value) = row.try_get::<i64, _>(index) {
                return value.map(|v| v.to_string());
            }
            None
        })
        .collect()
}
