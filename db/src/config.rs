//! Application configuration for the storefront console.
//!
//! Every key is optional; missing keys take their defaults.
//!
//! # Example YAML
//!
//! ```yaml
//! database: storefront.db
//! queries_dir: queries
//! init_script: init.sql
//! seed_script: init_data.sql
//! color: true
//! ```

use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Top-level console configuration.
///
/// # Examples
///
/// ```
/// use storefront_db::AppConfig;
///
/// let config: AppConfig = serde_yaml::from_str("database: shop.db").unwrap();
/// assert_eq!(config.database.to_str(), Some("shop.db"));
/// assert_eq!(config.init_script, "init.sql");
/// assert!(config.color);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// SQLite database file.
    pub database: PathBuf,
    /// Directory of `*.sql` files that takes precedence over the bundled SQL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub queries_dir: Option<PathBuf>,
    /// Query name of the schema (re)creation script.
    pub init_script: String,
    /// Query name of the sample-data script.
    pub seed_script: String,
    /// Whether the interactive menu uses ANSI colors.
    pub color: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database: PathBuf::from("storefront.db"),
            queries_dir: None,
            init_script: "init.sql".to_string(),
            seed_script: "init_data.sql".to_string(),
            color: true,
        }
    }
}

impl AppConfig {
    /// Loads configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`IoError`](crate::QueryError::IoError) if the file cannot
    /// be read, or [`YamlError`](crate::QueryError::YamlError) if parsing
    /// fails.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        let reader = BufReader::new(file);
        let config = serde_yaml::from_reader(reader)?;
        Ok(config)
    }

    /// Saves the configuration as YAML.
    ///
    /// # Errors
    ///
    /// Returns [`IoError`](crate::QueryError::IoError) if the file cannot
    /// be written, or [`YamlError`](crate::QueryError::YamlError) if
    /// serialization fails.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = BufWriter::new(file);
        serde_yaml::to_writer(writer, self)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_complete() {
        let yaml = r#"
database: /var/lib/shop.db
queries_dir: /etc/storefront/queries
init_script: schema.sql
seed_script: demo.sql
color: false
"#;
        let config: AppConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.database, PathBuf::from("/var/lib/shop.db"));
        assert_eq!(
            config.queries_dir,
            Some(PathBuf::from("/etc/storefront/queries"))
        );
        assert_eq!(config.init_script, "schema.sql");
        assert_eq!(config.seed_script, "demo.sql");
        assert!(!config.color);
    }

    #[test]
    fn test_deserialize_empty_uses_defaults() {
        let config: AppConfig = serde_yaml::from_str("{}").unwrap();
        assert_eq!(config, AppConfig::default());
        assert!(config.queries_dir.is_none());
    }

    #[test]
    fn test_unknown_keys_are_tolerated() {
        let config: AppConfig = serde_yaml::from_str("color: false\nextra: 1\n").unwrap();
        assert!(!config.color);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storefront.yml");
        std::fs::write(&path, "database: shop.db\nqueries_dir: sql\ncolor: false\n").unwrap();

        let loaded = AppConfig::load(&path).unwrap();
        assert_eq!(loaded.database, PathBuf::from("shop.db"));
        assert_eq!(loaded.queries_dir, Some(PathBuf::from("sql")));
        assert!(!loaded.color);
        assert_eq!(loaded.seed_script, "init_data.sql");
    }

    #[test]
    fn test_load_save_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storefront.yml");

        let original = AppConfig {
            database: PathBuf::from("shop.db"),
            color: false,
            ..Default::default()
        };
        original.save(&path).unwrap();
        assert_eq!(AppConfig::load(&path).unwrap(), original);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(AppConfig::load(dir.path().join("absent.yml")).is_err());
    }
}
