//! Conversion between SQLite values and storefront records.
//!
//! [`SqliteRows`] adapts a [`rusqlite::Rows`] cursor to the
//! [`RowSource`] contract so [`storefront_core::materialize`] can fill any
//! record type from a query result. The other direction, binding
//! [`ParamValue`]s to `:name` placeholders, lives here too.
//!
//! # Column conversion
//!
//! Each column is converted with [`FromSql`] according to its slot:
//!
//! | Slot | SQLite storage |
//! |------|----------------|
//! | `Integer`, `OptionalInteger` | `INTEGER` (NULL for the optional form) |
//! | `Real` | `REAL` or `INTEGER` |
//! | `Bool` | `INTEGER`, non-zero is `true` |
//! | `Text`, `OptionalText` | `TEXT` |
//! | `Blob` | `BLOB` |
//! | `Date` | `TEXT` in `YYYY-MM-DD` form |

use chrono::NaiveDate;
use rusqlite::Rows;
use rusqlite::types::{FromSql, FromSqlResult, ToSql, Value, ValueRef};
use storefront_core::{IterationError, ParamValue, RowSource, ScanError, Slot};

/// A [`RowSource`] over a live SQLite cursor.
///
/// Each [`advance`](RowSource::advance) copies the current row's values out
/// of the cursor, so [`scan_into`](RowSource::scan_into) can check the
/// column count before writing any field. A fault while stepping the cursor
/// ends iteration and is reported once from
/// [`final_error`](RowSource::final_error).
pub struct SqliteRows<'stmt> {
    rows: Rows<'stmt>,
    columns: usize,
    current: Vec<Value>,
    error: Option<rusqlite::Error>,
}

impl<'stmt> SqliteRows<'stmt> {
    /// Wraps `rows`, whose statement produces `columns` result columns.
    pub fn new(rows: Rows<'stmt>, columns: usize) -> Self {
        Self {
            rows,
            columns,
            current: Vec::new(),
            error: None,
        }
    }
}

impl RowSource for SqliteRows<'_> {
    fn advance(&mut self) -> bool {
        if self.error.is_some() {
            return false;
        }
        match self.rows.next() {
            Ok(Some(row)) => {
                let mut values = Vec::with_capacity(self.columns);
                for index in 0..self.columns {
                    match row.get_ref(index) {
                        Ok(value) => values.push(Value::from(value)),
                        Err(e) => {
                            self.error = Some(e);
                            return false;
                        }
                    }
                }
                self.current = values;
                true
            }
            Ok(None) => false,
            Err(e) => {
                self.error = Some(e);
                false
            }
        }
    }

    fn scan_into(&mut self, slots: &mut [Slot<'_>]) -> Result<(), ScanError> {
        if slots.len() != self.current.len() {
            return Err(ScanError::ColumnCount {
                expected: slots.len(),
                actual: self.current.len(),
            });
        }
        for (index, (slot, value)) in slots.iter_mut().zip(&self.current).enumerate() {
            let field_type = slot.type_name();
            write_slot(slot, value).map_err(|e| ScanError::Column {
                index,
                field_type,
                source: Box::new(e),
            })?;
        }
        Ok(())
    }

    fn final_error(&mut self) -> Option<IterationError> {
        self.error.take().map(IterationError::new)
    }
}

fn write_slot(slot: &mut Slot<'_>, value: &Value) -> FromSqlResult<()> {
    let value = ValueRef::from(value);
    match slot {
        Slot::Integer(field) => **field = i64::column_result(value)?,
        Slot::OptionalInteger(field) => **field = Option::<i64>::column_result(value)?,
        Slot::Real(field) => **field = f64::column_result(value)?,
        Slot::Bool(field) => **field = bool::column_result(value)?,
        Slot::Text(field) => **field = String::column_result(value)?,
        Slot::OptionalText(field) => **field = Option::<String>::column_result(value)?,
        Slot::Blob(field) => **field = Vec::<u8>::column_result(value)?,
        Slot::Date(field) => **field = NaiveDate::column_result(value)?,
    }
    Ok(())
}

/// Converts a parameter to an owned SQLite value.
///
/// Booleans are stored as `0`/`1` and dates as `YYYY-MM-DD` text.
pub fn to_sql_value(value: &ParamValue) -> Value {
    match value {
        ParamValue::Null => Value::Null,
        ParamValue::Integer(v) => Value::Integer(*v),
        ParamValue::Real(v) => Value::Real(*v),
        ParamValue::Bool(v) => Value::Integer(i64::from(*v)),
        ParamValue::Text(v) => Value::Text(v.clone()),
        ParamValue::Date(v) => Value::Text(v.format("%Y-%m-%d").to_string()),
    }
}

/// Named parameters in the `:name` form rusqlite binds by.
pub(crate) struct BoundParams {
    entries: Vec<(String, Value)>,
}

impl BoundParams {
    pub(crate) fn new(params: &[(&str, ParamValue)]) -> Self {
        let entries = params
            .iter()
            .map(|(name, value)| (format!(":{name}"), to_sql_value(value)))
            .collect();
        Self { entries }
    }

    /// Borrowed view accepted by `Statement::query` and `Statement::execute`.
    pub(crate) fn as_named(&self) -> Vec<(&str, &dyn ToSql)> {
        self.entries
            .iter()
            .map(|(name, value)| (name.as_str(), value as &dyn ToSql))
            .collect()
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::Connection;
    use storefront_core::{MaterializeError, materialize};

    #[derive(Debug, Default, PartialEq)]
    struct Line {
        id: i64,
        label: Option<String>,
        price: f64,
        active: bool,
    }

    storefront_core::record!(Line {
        id,
        label,
        price,
        active
    });

    #[derive(Debug, Default, PartialEq)]
    struct Dated {
        id: i64,
        on: NaiveDate,
    }

    storefront_core::record!(Dated { id, on });

    fn sample_conn() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            "CREATE TABLE lines (id INTEGER, label TEXT, price REAL, active INTEGER);
             INSERT INTO lines VALUES (1, 'a', 1.5, 1), (2, NULL, 2, 0), (3, 'c', 0.25, 1);",
        )
        .unwrap();
        conn
    }

    fn fetch<R: storefront_core::Record>(
        conn: &Connection,
        sql: &str,
    ) -> Result<Vec<R>, MaterializeError> {
        let mut stmt = conn.prepare(sql).unwrap();
        let columns = stmt.column_count();
        let rows = stmt.query([]).unwrap();
        materialize(&mut SqliteRows::new(rows, columns))
    }

    #[test]
    fn test_rows_fill_records_in_order() {
        let conn = sample_conn();
        let lines: Vec<Line> =
            fetch(&conn, "SELECT id, label, price, active FROM lines ORDER BY id").unwrap();
        assert_eq!(lines.len(), 3);
        assert_eq!(
            lines[1],
            Line {
                id: 2,
                label: None,
                price: 2.0,
                active: false
            }
        );
        assert_eq!(lines[2].label.as_deref(), Some("c"));
    }

    #[test]
    fn test_column_count_mismatch_is_eager() {
        let conn = sample_conn();
        let err = fetch::<Line>(&conn, "SELECT id, label FROM lines").unwrap_err();
        match err {
            MaterializeError::Scan {
                row,
                source: ScanError::ColumnCount { expected, actual },
                ..
            } => {
                assert_eq!(row, 0);
                assert_eq!(expected, 4);
                assert_eq!(actual, 2);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_incompatible_column_names_index() {
        let conn = sample_conn();
        let err = fetch::<Line>(
            &conn,
            "SELECT label, label, price, active FROM lines ORDER BY id",
        )
        .unwrap_err();
        match err {
            MaterializeError::Scan {
                source: ScanError::Column { index, field_type, .. },
                ..
            } => {
                assert_eq!(index, 0);
                assert_eq!(field_type, "integer");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_step_fault_surfaces_as_iteration_error() {
        let conn = sample_conn();
        // abs() of the smallest integer overflows when the second row is stepped.
        let err = fetch::<Line>(
            &conn,
            "SELECT CASE WHEN id = 2 THEN abs(-9223372036854775808) ELSE id END,
                    label, price, active
             FROM lines ORDER BY id",
        )
        .unwrap_err();
        assert!(matches!(err, MaterializeError::Iteration(_)));
    }

    #[test]
    fn test_dates_read_from_text() {
        let conn = Connection::open_in_memory().unwrap();
        let dated: Vec<Dated> = fetch(&conn, "SELECT 7, '2024-03-02'").unwrap();
        assert_eq!(
            dated,
            vec![Dated {
                id: 7,
                on: NaiveDate::from_ymd_opt(2024, 3, 2).unwrap()
            }]
        );
    }

    #[test]
    fn test_to_sql_value() {
        assert_eq!(to_sql_value(&ParamValue::Bool(true)), Value::Integer(1));
        assert_eq!(to_sql_value(&ParamValue::Null), Value::Null);
        let date = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        assert_eq!(
            to_sql_value(&ParamValue::Date(date)),
            Value::Text("2024-01-05".into())
        );
    }

    #[test]
    fn test_bound_params_are_prefixed() {
        let conn = sample_conn();
        let params = BoundParams::new(&[("id", ParamValue::Integer(3))]);
        assert_eq!(params.len(), 1);
        let mut stmt = conn
            .prepare("SELECT label FROM lines WHERE id = :id")
            .unwrap();
        let label: String = stmt
            .query_row(params.as_named().as_slice(), |row| row.get(0))
            .unwrap();
        assert_eq!(label, "c");
    }
}
