#![allow(dead_code)]

use std::collections::HashMap;

use deltaload::{Connection, Dialect, DriverError, TableIdentifier};

/// Everything a [`MockConnection`] was asked to do, in order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Exists(String),
    Ddl(String),
    Begin,
    Insert(String),
    Commit,
    Rollback,
}

/// In-memory stand-in for a warehouse connection.
///
/// Tracks row counts per table, keeps inserts made inside a transaction
/// pending until commit, and can be told to fail a given insert.
#[derive(Debug)]
pub struct MockConnection {
    pub dialect: Dialect,
    pub events: Vec<Event>,
    /// Committed row counts keyed by `catalog.schema.table`
    pub tables: HashMap<String, usize>,
    pending: Vec<(String, usize)>,
    in_tx: bool,
    inserts: usize,
    fail_insert: Option<(usize, DriverError)>,
    fail_commit: bool,
}

impl Default for MockConnection {
    fn default() -> Self {
        Self::new(Dialect::Databricks)
    }
}

impl MockConnection {
    pub fn new(dialect: Dialect) -> Self {
        Self {
            dialect,
            events: Vec::new(),
            tables: HashMap::new(),
            pending: Vec::new(),
            in_tx: false,
            inserts: 0,
            fail_insert: None,
            fail_commit: false,
        }
    }

    /// Pretend `name` already holds `rows` rows.
    pub fn with_table(mut self, name: &str, rows: usize) -> Self {
        self.tables.insert(name.to_string(), rows);
        self
    }

    /// Fail the `nth` insert statement (1-based) with `error`.
    pub fn fail_on_insert(mut self, nth: usize, error: DriverError) -> Self {
        self.fail_insert = Some((nth, error));
        self
    }

    pub fn fail_on_commit(mut self) -> Self {
        self.fail_commit = true;
        self
    }

    pub fn rows(&self, name: &str) -> Option<usize> {
        self.tables.get(name).copied()
    }

    pub fn inserts(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|e| match e {
                Event::Insert(sql) => Some(sql.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn ddl(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|e| match e {
                Event::Ddl(sql) => Some(sql.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn tx_events(&self) -> Vec<&Event> {
        self.events
            .iter()
            .filter(|e| matches!(e, Event::Begin | Event::Commit | Event::Rollback))
            .collect()
    }
}

impl Connection for MockConnection {
    fn dialect(&self) -> Dialect {
        self.dialect
    }

    fn driver_name(&self) -> &str {
        "mock"
    }

    fn table_exists(&mut self, ident: &TableIdentifier) -> Result<bool, DriverError> {
        let name = ident.to_string();
        self.events.push(Event::Exists(name.clone()));
        Ok(self.tables.contains_key(&name))
    }

    fn execute(&mut self, sql: &str) -> Result<u64, DriverError> {
        if let Some(rest) = sql.strip_prefix("INSERT INTO ") {
            self.events.push(Event::Insert(sql.to_string()));
            self.inserts += 1;
            if let Some((nth, err)) = &self.fail_insert
                && *nth == self.inserts
            {
                return Err(err.clone());
            }
            let rows = sql.matches("), (").count() + 1;
            let table = plain_name(rest);
            if self.in_tx {
                self.pending.push((table, rows));
            } else {
                *self.tables.entry(table).or_default() += rows;
            }
            return Ok(rows as u64);
        }

        self.events.push(Event::Ddl(sql.to_string()));
        if let Some(rest) = sql.strip_prefix("DROP TABLE IF EXISTS ") {
            self.tables.remove(&plain_name(rest));
        } else if let Some(rest) = sql
            .strip_prefix("CREATE TABLE IF NOT EXISTS ")
            .or_else(|| sql.strip_prefix("CREATE TABLE "))
        {
            self.tables.entry(plain_name(rest)).or_default();
        }
        Ok(0)
    }

    fn begin(&mut self) -> Result<(), DriverError> {
        self.events.push(Event::Begin);
        self.in_tx = true;
        Ok(())
    }

    fn commit(&mut self) -> Result<(), DriverError> {
        if self.fail_commit {
            return Err(DriverError::transaction("commit refused"));
        }
        self.events.push(Event::Commit);
        self.in_tx = false;
        for (table, rows) in self.pending.drain(..) {
            *self.tables.entry(table).or_default() += rows;
        }
        Ok(())
    }

    fn rollback(&mut self) -> Result<(), DriverError> {
        self.events.push(Event::Rollback);
        self.in_tx = false;
        self.pending.clear();
        Ok(())
    }
}

/// `` `c`.`s`.`t` (...`` -> `c.s.t`
fn plain_name(sql: &str) -> String {
    let qualified = sql.split_whitespace().next().unwrap_or_default();
    qualified.chars().filter(|c| !matches!(c, '`' | '"')).collect()
}
