//! SQL query sources and application configuration for the storefront
//! console.
//!
//! Every statement the console runs lives in a `.sql` file addressed by a
//! relative name such as `read/customer.sql` or `update/customer_password.sql`.
//! This crate resolves those names to SQL text, either from a directory on
//! disk or from the copies compiled into the binary.
//!
//! # Quick start
//!
//! ```no_run
//! use storefront_db::{AppConfig, Operation, QuerySource};
//!
//! let config = AppConfig::load("storefront.yml").unwrap_or_default();
//!
//! let mut builder = QuerySource::builder();
//! if let Some(dir) = &config.queries_dir {
//!     builder = builder.from_dir(dir);
//! }
//! let queries = builder.with_bundled().build().unwrap();
//!
//! let sql = queries.get(&Operation::List.query_name("customer")).unwrap();
//! println!("{sql}");
//! ```
//!
//! # Feature flags
//!
//! - **`bundled-queries`** (default): embeds the crate's `queries/` tree so
//!   [`QuerySource::bundled`] works without any files on disk.

mod config;
mod error;
mod loader;

#[cfg(feature = "bundled-queries")]
mod bundled;

pub use config::AppConfig;
pub use error::{QueryError, Result};
pub use loader::{Operation, QueryOrigin, QuerySource, QuerySourceBuilder};

/// Query name of the schema creation script.
pub const INIT_SCRIPT: &str = "init.sql";
/// Query name of the sample-data script.
pub const SEED_SCRIPT: &str = "init_data.sql";
/// Query name of the customer password change statement.
pub const CUSTOMER_PASSWORD: &str = "update/customer_password.sql";
