//! In-memory stand-ins for the database and HTTP collaborators.
//!
//! Each fake records what the checkers asked of it so tests can assert that
//! injected data suppresses connecting and fetching.

#![allow(dead_code)]

use datacheck_core::{CheckError, Connection, Connector, HttpClient, HttpResponse, Row};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

#[derive(Debug, Default)]
struct DatabaseState {
    tables: Vec<(String, String)>,
    metadata: HashMap<(String, String), (Option<String>, Option<String>)>,
    refuse_connections: Option<String>,
    connects: Vec<String>,
    queries: Vec<(String, Vec<String>)>,
    closes: usize,
}

/// A database holding catalog entries and metadata rows.
#[derive(Debug, Clone, Default)]
pub struct FakeDatabase {
    state: Rc<RefCell<DatabaseState>>,
}

impl FakeDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_table(self, schema: &str, table: &str) -> Self {
        self.state
            .borrow_mut()
            .tables
            .push((schema.to_string(), table.to_string()));
        self
    }

    pub fn with_metadata(
        self,
        schema: &str,
        table: &str,
        item_id: Option<&str>,
        item_name: Option<&str>,
    ) -> Self {
        self.state.borrow_mut().metadata.insert(
            (schema.to_string(), table.to_string()),
            (item_id.map(str::to_string), item_name.map(str::to_string)),
        );
        self
    }

    /// Make every connection attempt fail with `message`.
    pub fn refusing(self, message: &str) -> Self {
        self.state.borrow_mut().refuse_connections = Some(message.to_string());
        self
    }

    /// Connection strings passed to `connect`, in order.
    pub fn connects(&self) -> Vec<String> {
        self.state.borrow().connects.clone()
    }

    pub fn queries(&self) -> Vec<(String, Vec<String>)> {
        self.state.borrow().queries.clone()
    }

    pub fn closes(&self) -> usize {
        self.state.borrow().closes
    }
}

impl Connector for FakeDatabase {
    type Connection = FakeConnection;

    fn connect(&self, descriptor: &str) -> Result<FakeConnection, CheckError> {
        let mut state = self.state.borrow_mut();
        state.connects.push(descriptor.to_string());

        if let Some(message) = &state.refuse_connections {
            return Err(CheckError::Connection(message.clone()));
        }

        Ok(FakeConnection {
            database: self.clone(),
            open: true,
        })
    }
}

#[derive(Debug)]
pub struct FakeConnection {
    database: FakeDatabase,
    open: bool,
}

impl FakeConnection {
    pub fn is_open(&self) -> bool {
        self.open
    }
}

impl Connection for FakeConnection {
    fn query(&mut self, sql: &str, params: &[&str]) -> Result<Vec<Row>, CheckError> {
        if !self.open {
            return Err(CheckError::Query("connection is closed".to_string()));
        }

        let mut state = self.database.state.borrow_mut();
        state.queries.push((
            sql.to_string(),
            params.iter().map(|p| p.to_string()).collect(),
        ));

        let [schema, table] = params else {
            return Err(CheckError::Query(format!(
                "expected 2 parameters, got {}",
                params.len()
            )));
        };
        let key = (schema.to_string(), table.to_string());

        if sql.to_lowercase().contains("information_schema.tables") {
            let rows = state
                .tables
                .iter()
                .filter(|entry| **entry == key)
                .map(|_| Row::new(vec![Some("1".to_string())]))
                .collect();
            return Ok(rows);
        }

        Ok(state
            .metadata
            .get(&key)
            .map(|(id, name)| vec![Row::new(vec![id.clone(), name.clone()])])
            .unwrap_or_default())
    }

    fn close(&mut self) -> Result<(), CheckError> {
        if self.open {
            self.open = false;
            self.database.state.borrow_mut().closes += 1;
        }
        Ok(())
    }
}

/// A web server answering from a fixed URL → response table; unknown URLs are 404s.
#[derive(Debug, Clone, Default)]
pub struct FakeHttp {
    responses: Rc<RefCell<HashMap<String, HttpResponse>>>,
    requests: Rc<RefCell<Vec<String>>>,
}

impl FakeHttp {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_response(self, url: &str, status: u16, body: &str) -> Self {
        self.responses
            .borrow_mut()
            .insert(url.to_string(), HttpResponse::new(status, body));
        self
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.borrow().clone()
    }
}

impl HttpClient for FakeHttp {
    fn get(&self, url: &str) -> Result<HttpResponse, CheckError> {
        self.requests.borrow_mut().push(url.to_string());

        Ok(self
            .responses
            .borrow()
            .get(url)
            .cloned()
            .unwrap_or_else(|| HttpResponse::new(404, "Not Found")))
    }
}

/// A client that fails every request, for checking that injected data is used.
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineHttp;

impl HttpClient for OfflineHttp {
    fn get(&self, url: &str) -> Result<HttpResponse, CheckError> {
        Err(CheckError::Http(format!("offline: {url}")))
    }
}
