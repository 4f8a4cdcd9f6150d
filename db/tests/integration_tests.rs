use std::path::Path;

use storefront_db::{
    AppConfig, CUSTOMER_PASSWORD, INIT_SCRIPT, Operation, QueryError, QueryOrigin, QuerySource,
    SEED_SCRIPT,
};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn write_query(root: &Path, name: &str, sql: &str) {
    let path = root.join(name);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, sql).unwrap();
}

// ---------------------------------------------------------------------------
// Directory loading
// ---------------------------------------------------------------------------

#[test]
fn test_directory_loading_nested() {
    let dir = tempfile::tempdir().unwrap();
    write_query(dir.path(), INIT_SCRIPT, "CREATE TABLE categories (name TEXT);");
    write_query(dir.path(), "read/category.sql", "SELECT name FROM categories;");
    write_query(
        dir.path(),
        "read/category_by_id.sql",
        "SELECT name FROM categories WHERE rowid = :id;",
    );
    write_query(dir.path(), "delete/category.sql", "DELETE FROM categories;");

    let queries = QuerySource::from_dir(dir.path()).unwrap();
    assert_eq!(queries.len(), 4);
    assert!(!queries.is_empty());
    assert_eq!(
        queries.origin(),
        &QueryOrigin::Directory(dir.path().to_path_buf())
    );

    let mut names: Vec<&str> = queries.names().collect();
    names.sort_unstable();
    assert_eq!(
        names,
        vec![
            "delete/category.sql",
            "init.sql",
            "read/category.sql",
            "read/category_by_id.sql"
        ]
    );

    let sql = queries
        .get(&Operation::Get.query_name("category"))
        .unwrap();
    assert!(sql.contains(":id"));
}

#[test]
fn test_missing_directory() {
    let result = QuerySource::from_dir("/nonexistent/storefront/queries");
    assert!(matches!(result, Err(QueryError::IoError(_))));
}

// ---------------------------------------------------------------------------
// Fallback chain
// ---------------------------------------------------------------------------

#[test]
fn test_directory_overrides_bundled() {
    let dir = tempfile::tempdir().unwrap();
    write_query(dir.path(), "read/sku.sql", "SELECT 42;");

    let queries = QuerySource::builder()
        .from_dir(dir.path())
        .with_bundled()
        .build()
        .unwrap();
    assert_eq!(queries.get("read/sku.sql").unwrap(), "SELECT 42;");
    assert_eq!(
        queries.origin(),
        &QueryOrigin::Multiple(vec![QueryOrigin::Directory(dir.path().to_path_buf())])
    );
}

#[test]
fn test_empty_directory_falls_back_to_bundled() {
    let dir = tempfile::tempdir().unwrap();

    let result = QuerySource::builder()
        .from_dir(dir.path())
        .with_bundled()
        .build();

    if cfg!(feature = "bundled-queries") {
        let queries = result.unwrap();
        assert!(queries.contains(INIT_SCRIPT));
        assert!(queries.contains(SEED_SCRIPT));
        assert!(queries.contains(CUSTOMER_PASSWORD));
    } else {
        assert!(matches!(result, Err(QueryError::NoSourcesAvailable)));
    }
}

#[cfg(feature = "bundled-queries")]
#[test]
fn test_bundled_statements_use_named_id() {
    let queries = QuerySource::bundled();
    for key in ["customer", "order", "return", "cart_item"] {
        for op in [Operation::Get, Operation::Update, Operation::Delete] {
            let sql = queries.get(&op.query_name(key)).unwrap();
            assert!(sql.contains(":id"), "{} lacks :id", op.query_name(key));
        }
        let list = queries.get(&Operation::List.query_name(key)).unwrap();
        assert!(!list.contains(":id"));
    }
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

#[test]
fn test_config_file_drives_query_source() {
    let dir = tempfile::tempdir().unwrap();
    let sql_dir = dir.path().join("sql");
    write_query(&sql_dir, "init.sql", "SELECT 1;");

    let config_path = dir.path().join("storefront.yml");
    std::fs::write(
        &config_path,
        format!("queries_dir: {}\ncolor: false\n", sql_dir.display()),
    )
    .unwrap();

    let config = AppConfig::load(&config_path).unwrap();
    assert!(!config.color);
    assert_eq!(config.database, Path::new("storefront.db"));

    let queries = QuerySource::from_dir(config.queries_dir.unwrap()).unwrap();
    assert_eq!(queries.get(&config.init_script).unwrap(), "SELECT 1;");
}

#[test]
fn test_config_invalid_yaml() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.yml");
    std::fs::write(&path, "color: [not a bool").unwrap();
    assert!(matches!(
        AppConfig::load(&path),
        Err(QueryError::YamlError(_))
    ));
}
