//! Statement execution against a borrowed connection.
//!
//! [`Store`] looks statements up by name in a [`QuerySource`], binds named
//! parameters, and hands result rows to [`materialize`]. It is the single
//! place where SQL text meets the connection; the entity managers only pick
//! names and parameters.
//!
//! # Example
//!
//! ```no_run
//! use rusqlite::Connection;
//! use storefront_core::{Category, ParamValue};
//! use storefront_db::QuerySource;
//! use storefront_sqlite::{Store, prepare_connection};
//!
//! let conn = Connection::open("storefront.db").unwrap();
//! prepare_connection(&conn).unwrap();
//! let queries = QuerySource::bundled();
//! let store = Store::new(&conn, &queries);
//!
//! let all: Vec<Category> = store.fetch("read/category.sql", &[]).unwrap();
//! let one: Vec<Category> = store
//!     .fetch("read/category_by_id.sql", &[("id", ParamValue::Integer(1))])
//!     .unwrap();
//! println!("{} categories, first: {:?}", all.len(), one.first());
//! ```

use rusqlite::Connection;
use storefront_core::{ParamValue, Record, materialize};
use storefront_db::QuerySource;
use tracing::debug;

use crate::convert::{BoundParams, SqliteRows};
use crate::error::Result;

/// Named-statement executor over a connection and a query source.
///
/// `Store` is `Copy`; managers keep their own copy.
#[derive(Clone, Copy)]
pub struct Store<'a> {
    conn: &'a Connection,
    queries: &'a QuerySource,
}

impl<'a> Store<'a> {
    /// Creates a store. `conn` should already have gone through
    /// [`prepare_connection`](crate::prepare_connection).
    pub fn new(conn: &'a Connection, queries: &'a QuerySource) -> Self {
        Self { conn, queries }
    }

    /// Runs the query `name` and materializes every row into `R`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Query`](crate::StoreError::Query) for an unknown
    /// name, [`StoreError::Database`](crate::StoreError::Database) if the
    /// statement fails to prepare or bind, and
    /// [`StoreError::Materialize`](crate::StoreError::Materialize) if the
    /// rows do not fit `R`. No partial results are returned.
    pub fn fetch<R: Record>(&self, name: &str, params: &[(&str, ParamValue)]) -> Result<Vec<R>> {
        let sql = self.queries.get(name)?;
        let bound = BoundParams::new(params);
        debug!(query = name, params = bound.len(), "fetch");

        let mut stmt = self.conn.prepare(sql)?;
        let columns = stmt.column_count();
        let rows = stmt.query(bound.as_named().as_slice())?;
        let mut source = SqliteRows::new(rows, columns);
        let records = materialize(&mut source)?;
        Ok(records)
    }

    /// Runs the statement `name` and returns the number of rows changed.
    pub fn execute(&self, name: &str, params: &[(&str, ParamValue)]) -> Result<usize> {
        let sql = self.queries.get(name)?;
        let bound = BoundParams::new(params);
        debug!(query = name, params = bound.len(), "execute");

        let mut stmt = self.conn.prepare(sql)?;
        let changed = stmt.execute(bound.as_named().as_slice())?;
        Ok(changed)
    }

    /// Runs the multi-statement script `name` inside one transaction.
    ///
    /// Either every statement in the script takes effect or none does.
    pub fn run_script(&self, name: &str) -> Result<()> {
        let sql = self.queries.get(name)?;
        debug!(script = name, "run script");

        let tx = self.conn.unchecked_transaction()?;
        tx.execute_batch(sql)?;
        tx.commit()?;
        Ok(())
    }

    /// Row id of the most recent successful insert on this connection.
    pub fn last_insert_id(&self) -> i64 {
        self.conn.last_insert_rowid()
    }
}
