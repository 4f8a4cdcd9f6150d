//! Opening the storefront database, creating it when needed.
//!
//! [`Bootstrap::connect`] runs the startup sequence:
//!
//! 1. Open the database file without creating it and check that every table
//!    exists ([`open_existing`]).
//! 2. If that fails, open an admin connection that may create the file, run
//!    the init script in a transaction, and close it.
//! 3. Open the database again with [`open_existing`]. Failing here is fatal.
//! 4. For a freshly created database, ask the caller whether to load the
//!    seed script.
//!
//! # Example
//!
//! ```no_run
//! use storefront_db::QuerySource;
//! use storefront_sqlite::Bootstrap;
//!
//! let queries = QuerySource::bundled();
//! let ready = Bootstrap::new("storefront.db", &queries)
//!     .connect(|| true)
//!     .unwrap();
//! println!("created: {}, seeded: {}", ready.created, ready.seeded);
//! ```

use std::path::{Path, PathBuf};

use rusqlite::{Connection, OpenFlags};
use storefront_db::{INIT_SCRIPT, QuerySource, SEED_SCRIPT};
use tracing::{info, warn};

use crate::error::{Result, StoreError};
use crate::query::Store;
use crate::schema::{TABLES, count_rows, prepare_connection, tables_exist};

/// A usable connection plus what bootstrap had to do to get it.
#[derive(Debug)]
pub struct Bootstrapped {
    pub conn: Connection,
    /// The init script ran because the database was missing or incomplete.
    pub created: bool,
    /// The seed script ran.
    pub seeded: bool,
}

/// Opens an existing storefront database.
///
/// The file is never created. The returned connection has been through
/// [`prepare_connection`].
///
/// # Errors
///
/// Returns [`StoreError::Database`] if the file cannot be opened and
/// [`StoreError::Bootstrap`] if any storefront table is missing.
pub fn open_existing(path: impl AsRef<Path>) -> Result<Connection> {
    let path = path.as_ref();
    let flags = OpenFlags::SQLITE_OPEN_READ_WRITE
        | OpenFlags::SQLITE_OPEN_URI
        | OpenFlags::SQLITE_OPEN_NO_MUTEX;
    let conn = Connection::open_with_flags(path, flags)?;
    if !tables_exist(&conn)? {
        return Err(StoreError::Bootstrap(format!(
            "{} has no storefront schema",
            path.display()
        )));
    }
    prepare_connection(&conn)?;
    Ok(conn)
}

/// Startup sequence for one database file.
pub struct Bootstrap<'a> {
    path: PathBuf,
    queries: &'a QuerySource,
    init_script: String,
    seed_script: String,
}

impl<'a> Bootstrap<'a> {
    /// Creates a bootstrap for `path` using the default script names.
    pub fn new(path: impl Into<PathBuf>, queries: &'a QuerySource) -> Self {
        Self {
            path: path.into(),
            queries,
            init_script: INIT_SCRIPT.to_string(),
            seed_script: SEED_SCRIPT.to_string(),
        }
    }

    /// Overrides the init script name.
    pub fn init_script(mut self, name: impl Into<String>) -> Self {
        self.init_script = name.into();
        self
    }

    /// Overrides the seed script name.
    pub fn seed_script(mut self, name: impl Into<String>) -> Self {
        self.seed_script = name.into();
        self
    }

    /// Runs the startup sequence.
    ///
    /// `confirm_seed` is only called when the init script had to run; an
    /// existing database is never reseeded here.
    ///
    /// # Errors
    ///
    /// Returns an error if the init script fails, if the database still
    /// cannot be opened afterwards, or if a confirmed seed fails.
    pub fn connect<F>(&self, confirm_seed: F) -> Result<Bootstrapped>
    where
        F: FnOnce() -> bool,
    {
        info!(path = %self.path.display(), "connecting");
        match open_existing(&self.path) {
            Ok(conn) => {
                info!(path = %self.path.display(), "connected");
                return Ok(Bootstrapped {
                    conn,
                    created: false,
                    seeded: false,
                });
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "database unavailable, running init script");
            }
        }

        self.initialize()?;

        let conn = open_existing(&self.path).map_err(|e| {
            StoreError::Bootstrap(format!(
                "{} ran but {} is still unavailable: {e}",
                self.init_script,
                self.path.display()
            ))
        })?;
        info!(path = %self.path.display(), "database created");

        let seeded = if confirm_seed() {
            run_seed(&conn, self.queries, &self.seed_script)?;
            true
        } else {
            false
        };

        Ok(Bootstrapped {
            conn,
            created: true,
            seeded,
        })
    }

    fn initialize(&self) -> Result<()> {
        let admin = Connection::open(&self.path)?;
        prepare_connection(&admin)?;
        run_init(&admin, self.queries, &self.init_script)?;
        admin.close().map_err(|(_, e)| StoreError::Database(e))?;
        Ok(())
    }
}

/// Drops and recreates every table on a live connection.
pub fn run_init(conn: &Connection, queries: &QuerySource, script: &str) -> Result<()> {
    info!(script, "running init script");
    Store::new(conn, queries).run_script(script)
}

/// Loads the sample data on a live connection.
pub fn run_seed(conn: &Connection, queries: &QuerySource, script: &str) -> Result<()> {
    info!(script, "running seed script");
    Store::new(conn, queries).run_script(script)
}

/// Snapshot of the database contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseStatus {
    /// Whether every storefront table exists.
    pub tables_exist: bool,
    /// Row count per table, in [`TABLES`] order. Empty when tables are missing.
    pub row_counts: Vec<(&'static str, usize)>,
}

impl DatabaseStatus {
    /// Sum of all row counts.
    pub fn total_rows(&self) -> usize {
        self.row_counts.iter().map(|(_, n)| n).sum()
    }
}

/// Reports whether the schema exists and how many rows each table holds.
pub fn status(conn: &Connection) -> Result<DatabaseStatus> {
    if !tables_exist(conn)? {
        return Ok(DatabaseStatus {
            tables_exist: false,
            row_counts: Vec::new(),
        });
    }

    let mut row_counts = Vec::with_capacity(TABLES.len());
    for table in TABLES {
        row_counts.push((*table, count_rows(conn, table)?));
    }

    Ok(DatabaseStatus {
        tables_exist: true,
        row_counts,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_existing_never_creates() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.db");
        assert!(matches!(
            open_existing(&path),
            Err(StoreError::Database(_))
        ));
        assert!(!path.exists());
    }

    #[test]
    fn test_open_existing_rejects_empty_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.db");
        Connection::open(&path)
            .unwrap()
            .execute_batch("CREATE TABLE notes (body TEXT);")
            .unwrap();
        assert!(matches!(
            open_existing(&path),
            Err(StoreError::Bootstrap(_))
        ));
    }

    #[test]
    fn test_connect_creates_then_reuses() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shop.db");
        let queries = QuerySource::bundled();

        let first = Bootstrap::new(&path, &queries).connect(|| false).unwrap();
        assert!(first.created);
        assert!(!first.seeded);
        drop(first);

        let mut asked = false;
        let second = Bootstrap::new(&path, &queries)
            .connect(|| {
                asked = true;
                true
            })
            .unwrap();
        assert!(!second.created);
        assert!(!second.seeded);
        assert!(!asked);
    }

    #[test]
    fn test_status_on_empty_connection() {
        let conn = Connection::open_in_memory().unwrap();
        let report = status(&conn).unwrap();
        assert!(!report.tables_exist);
        assert_eq!(report.total_rows(), 0);
    }

    #[test]
    fn test_missing_init_script_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let queries = QuerySource::from_pairs([("other.sql", "SELECT 1;")]);
        let result = Bootstrap::new(dir.path().join("shop.db"), &queries).connect(|| false);
        assert!(matches!(result, Err(StoreError::Query(_))));
    }
}
