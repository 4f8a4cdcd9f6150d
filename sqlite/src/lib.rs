//! SQLite backend for the storefront console.
//!
//! Connects the storage-agnostic pieces of `storefront-core` to a rusqlite
//! connection and the SQL files served by `storefront-db`.
//!
//! # Architecture
//!
//! - **`convert`**: [`SqliteRows`], the row source the materializer reads,
//!   and parameter binding
//! - **`query`**: [`Store`], which runs named statements
//! - **`manager`**: [`EntityManager`] with List/Get/Create/Update/Delete for
//!   any entity
//! - **`schema`**: connection setup, including the `hash_password` SQL
//!   function
//! - **`bootstrap`**: open-or-create startup and the init/seed scripts
//!
//! # Quick start
//!
//! ```no_run
//! use storefront_db::QuerySource;
//! use storefront_sqlite::{Bootstrap, CustomerManager, Store};
//!
//! let queries = QuerySource::bundled();
//! let ready = Bootstrap::new("storefront.db", &queries)
//!     .connect(|| true)
//!     .unwrap();
//!
//! let customers = CustomerManager::new(Store::new(&ready.conn, &queries));
//! for customer in customers.list().unwrap() {
//!     println!("{customer}");
//! }
//! ```

mod bootstrap;
mod convert;
mod error;
mod manager;
mod query;
mod schema;

pub use bootstrap::{
    Bootstrap, Bootstrapped, DatabaseStatus, open_existing, run_init, run_seed, status,
};
pub use convert::{SqliteRows, to_sql_value};
pub use error::{Result, StoreError};
pub use manager::{
    AddressManager, CartItemManager, CartManager, CategoryManager, CustomerManager,
    EntityManager, OrderManager, ProductManager, ReturnManager, ReviewManager, SkuManager,
};
pub use query::Store;
pub use schema::{TABLES, hash_password, prepare_connection};
