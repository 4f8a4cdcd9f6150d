//! Connection setup and schema inspection.
//!
//! Every connection the console uses goes through [`prepare_connection`],
//! which turns on foreign-key enforcement and registers the
//! `hash_password(password, salt)` SQL function the customer statements
//! call.
//!
//! # Tables
//!
//! The init script creates ten tables, listed in [`TABLES`] parent first.

use rusqlite::Connection;
use rusqlite::functions::FunctionFlags;
use sha2::{Digest, Sha256};

use crate::error::Result;

/// Storefront tables, parents before children.
pub const TABLES: &[&str] = &[
    "customers",
    "categories",
    "products",
    "skus",
    "carts",
    "cart_items",
    "reviews",
    "addresses",
    "orders",
    "returns",
];

/// Returns SHA-256 over `salt` followed by the UTF-8 bytes of `password`.
///
/// # Examples
///
/// ```
/// use storefront_sqlite::hash_password;
///
/// let a = hash_password("secret", b"salt-1");
/// assert_eq!(a.len(), 32);
/// assert_ne!(a, hash_password("secret", b"salt-2"));
/// ```
pub fn hash_password(password: &str, salt: &[u8]) -> Vec<u8> {
    let mut hasher = Sha256::new();
    hasher.update(salt);
    hasher.update(password.as_bytes());
    hasher.finalize().to_vec()
}

/// Enables foreign keys and registers `hash_password` on `conn`.
///
/// # Errors
///
/// Returns [`StoreError::Database`](crate::StoreError::Database) if the
/// pragma or the function registration fails.
pub fn prepare_connection(conn: &Connection) -> Result<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.create_scalar_function(
        "hash_password",
        2,
        FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
        |ctx| {
            let password: String = ctx.get(0)?;
            let salt: Vec<u8> = ctx.get(1)?;
            Ok(hash_password(&password, &salt))
        },
    )?;
    Ok(())
}

/// Returns `true` if every storefront table exists.
pub(crate) fn tables_exist(conn: &Connection) -> Result<bool> {
    let mut stmt =
        conn.prepare("SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1")?;
    for table in TABLES {
        let count: i64 = stmt.query_row([table], |row| row.get(0))?;
        if count == 0 {
            return Ok(false);
        }
    }
    Ok(true)
}

/// Counts rows in one of the [`TABLES`].
pub(crate) fn count_rows(conn: &Connection, table: &str) -> Result<usize> {
    let mut stmt = conn.prepare(&format!("SELECT COUNT(*) FROM {table}"))?;
    let count: i64 = stmt.query_row([], |row| row.get(0))?;
    Ok(count as usize)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_password_depends_on_salt_and_password() {
        let base = hash_password("pw", b"salt");
        assert_eq!(base, hash_password("pw", b"salt"));
        assert_ne!(base, hash_password("pw2", b"salt"));
        assert_ne!(base, hash_password("pw", b"salt2"));
    }

    #[test]
    fn test_sql_function_matches_rust_hash() {
        let conn = Connection::open_in_memory().unwrap();
        prepare_connection(&conn).unwrap();
        let hashed: Vec<u8> = conn
            .query_row("SELECT hash_password('pw', X'0102')", [], |row| row.get(0))
            .unwrap();
        assert_eq!(hashed, hash_password("pw", &[1, 2]));
    }

    #[test]
    fn test_foreign_keys_enabled() {
        let conn = Connection::open_in_memory().unwrap();
        prepare_connection(&conn).unwrap();
        let enabled: i64 = conn
            .query_row("PRAGMA foreign_keys", [], |row| row.get(0))
            .unwrap();
        assert_eq!(enabled, 1);
    }

    #[test]
    fn test_tables_exist_requires_every_table() {
        let conn = Connection::open_in_memory().unwrap();
        assert!(!tables_exist(&conn).unwrap());
        conn.execute_batch("CREATE TABLE customers (customer_id INTEGER);")
            .unwrap();
        assert!(!tables_exist(&conn).unwrap());
        assert_eq!(count_rows(&conn, "customers").unwrap(), 0);
    }
}
