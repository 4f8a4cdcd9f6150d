//! Query source loading with builder pattern and fallback chains.
//!
//! Provides [`QuerySource`], which resolves logical operation names such as
//! `read/customer.sql` to SQL text, and [`QuerySourceBuilder`] for trying
//! several sources in order.
//!
//! # Loading patterns
//!
//! ```no_run
//! use storefront_db::QuerySource;
//!
//! // Load every *.sql file under a directory
//! let queries = QuerySource::from_dir("queries/").unwrap();
//! let sql = queries.get("read/customer.sql").unwrap();
//!
//! // Prefer a directory on disk, fall back to the SQL compiled into the binary
//! let queries = QuerySource::builder()
//!     .from_dir("queries/")
//!     .with_bundled()
//!     .build()
//!     .unwrap();
//! ```

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::error::{QueryError, Result};

/// Describes where a [`QuerySource`] was loaded from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryOrigin {
    /// Loaded from a directory tree of `*.sql` files.
    Directory(PathBuf),
    /// Loaded from the SQL embedded at build time.
    Bundled,
    /// Built from explicit `(name, sql)` pairs.
    Inline,
    /// Loaded via a fallback chain of multiple sources.
    Multiple(Vec<QueryOrigin>),
}

/// A logical CRUD operation on one entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    List,
    Get,
    Create,
    Update,
    Delete,
}

impl Operation {
    /// Returns the query name for this operation on the entity `key`.
    ///
    /// # Examples
    ///
    /// ```
    /// use storefront_db::Operation;
    ///
    /// assert_eq!(Operation::List.query_name("sku"), "read/sku.sql");
    /// assert_eq!(Operation::Get.query_name("sku"), "read/sku_by_id.sql");
    /// assert_eq!(Operation::Delete.query_name("sku"), "delete/sku.sql");
    /// ```
    pub fn query_name(self, key: &str) -> String {
        match self {
            Operation::List => format!("read/{key}.sql"),
            Operation::Get => format!("read/{key}_by_id.sql"),
            Operation::Create => format!("create/{key}.sql"),
            Operation::Update => format!("update/{key}.sql"),
            Operation::Delete => format!("delete/{key}.sql"),
        }
    }
}

/// In-memory map of query names to SQL text.
///
/// Names are paths relative to the query root with `/` separators, e.g.
/// `update/customer_password.sql`.
#[derive(Debug, Clone)]
pub struct QuerySource {
    queries: HashMap<String, String>,
    origin: QueryOrigin,
}

impl QuerySource {
    /// Returns a new [`QuerySourceBuilder`] for configuring a fallback chain.
    pub fn builder() -> QuerySourceBuilder {
        QuerySourceBuilder::new()
    }

    /// Loads every `*.sql` file under `path`, recursively.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::IoError`] if the directory or a file cannot be
    /// read, and [`QueryError::NoSourcesAvailable`] if it holds no SQL files.
    pub fn from_dir(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut queries = HashMap::new();
        collect_sql_files(path, path, &mut queries)?;
        if queries.is_empty() {
            return Err(QueryError::NoSourcesAvailable);
        }

        Ok(Self {
            queries,
            origin: QueryOrigin::Directory(path.to_path_buf()),
        })
    }

    /// Loads the queries embedded at build time.
    ///
    /// Only available when the `bundled-queries` feature is enabled.
    #[cfg(feature = "bundled-queries")]
    pub fn bundled() -> Self {
        let queries = crate::bundled::QUERIES
            .iter()
            .map(|(name, sql)| (name.to_string(), sql.to_string()))
            .collect();
        Self {
            queries,
            origin: QueryOrigin::Bundled,
        }
    }

    /// Builds a source from explicit `(name, sql)` pairs.
    pub fn from_pairs<I, N, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (N, S)>,
        N: Into<String>,
        S: Into<String>,
    {
        let queries = pairs
            .into_iter()
            .map(|(name, sql)| (normalize_name(&name.into()), sql.into()))
            .collect();
        Self {
            queries,
            origin: QueryOrigin::Inline,
        }
    }

    /// Looks up the SQL text for `name`.
    ///
    /// Backslashes and a leading `./` are normalized away, so
    /// `.\read\sku.sql` and `read/sku.sql` resolve to the same query.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::UnknownQuery`] if no such query is loaded.
    pub fn get(&self, name: &str) -> Result<&str> {
        let key = normalize_name(name);
        self.queries
            .get(&key)
            .map(String::as_str)
            .ok_or(QueryError::UnknownQuery(key))
    }

    /// Returns `true` if a query named `name` is loaded.
    pub fn contains(&self, name: &str) -> bool {
        self.queries.contains_key(&normalize_name(name))
    }

    /// Returns the number of loaded queries.
    pub fn len(&self) -> usize {
        self.queries.len()
    }

    /// Returns `true` if no queries are loaded.
    pub fn is_empty(&self) -> bool {
        self.queries.is_empty()
    }

    /// Returns an iterator over query names.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.queries.keys().map(|s| s.as_str())
    }

    /// Returns where the queries were loaded from.
    pub fn origin(&self) -> &QueryOrigin {
        &self.origin
    }
}

fn normalize_name(name: &str) -> String {
    let name = name.replace('\\', "/");
    name.trim_start_matches("./").to_string()
}

fn collect_sql_files(
    root: &Path,
    dir: &Path,
    queries: &mut HashMap<String, String>,
) -> Result<()> {
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let file_path = entry.path();
        if file_path.is_dir() {
            collect_sql_files(root, &file_path, queries)?;
        } else if file_path.extension().and_then(|e| e.to_str()) == Some("sql") {
            let relative = file_path.strip_prefix(root).unwrap_or(&file_path);
            let name = relative
                .components()
                .map(|c| c.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/");
            queries.insert(name, std::fs::read_to_string(&file_path)?);
        }
    }
    Ok(())
}

/// Builder for constructing a [`QuerySource`] with a fallback chain.
///
/// Sources are tried in the order they are added. The first successful load
/// wins; if all fail, [`QueryError::NoSourcesAvailable`] is returned.
///
/// # Example
///
/// ```no_run
/// use storefront_db::QuerySource;
///
/// let queries = QuerySource::builder()
///     .from_dir("/etc/storefront/queries/")
///     .with_bundled()
///     .build()
///     .unwrap();
/// ```
pub struct QuerySourceBuilder {
    sources: Vec<QueryOrigin>,
}

impl QuerySourceBuilder {
    /// Creates a new builder with no sources.
    pub fn new() -> Self {
        Self {
            sources: Vec::new(),
        }
    }

    /// Adds the embedded bundled queries as a source.
    ///
    /// Only effective when the `bundled-queries` feature is enabled; otherwise
    /// this source is skipped during [`build`](Self::build).
    pub fn with_bundled(mut self) -> Self {
        self.sources.push(QueryOrigin::Bundled);
        self
    }

    /// Adds a directory of `*.sql` files as a source.
    pub fn from_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.sources.push(QueryOrigin::Directory(path.into()));
        self
    }

    /// Attempts to load queries from configured sources in order.
    ///
    /// Returns the first successfully loaded source. If all sources fail,
    /// returns [`QueryError::NoSourcesAvailable`].
    pub fn build(self) -> Result<QuerySource> {
        if self.sources.is_empty() {
            return Err(QueryError::NoSourcesAvailable);
        }

        for source in &self.sources {
            let result = match source {
                QueryOrigin::Directory(path) => QuerySource::from_dir(path),
                QueryOrigin::Bundled => {
                    #[cfg(feature = "bundled-queries")]
                    {
                        Ok(QuerySource::bundled())
                    }
                    #[cfg(not(feature = "bundled-queries"))]
                    {
                        Err(QueryError::NoSourcesAvailable)
                    }
                }
                QueryOrigin::Inline | QueryOrigin::Multiple(_) => continue,
            };

            if let Ok(mut queries) = result {
                queries.origin = QueryOrigin::Multiple(vec![source.clone()]);
                return Ok(queries);
            }
        }

        Err(QueryError::NoSourcesAvailable)
    }
}

impl Default for QuerySourceBuilder {
    fn default() -> Self {
        Self::new()
    }
}
