//! Generic row materialization.
//!
//! [`materialize`] turns any [`RowSource`] into a `Vec` of typed records,
//! writing column `i` of each row into field `i` of a fresh record. The same
//! function serves every record shape; the per-shape knowledge lives in the
//! shape's [`Record`] impl.
//!
//! Conversion is all-or-nothing. The first failing row, or a fault reported
//! by the source after the last row, discards everything materialized so far
//! and only the error is returned.
//!
//! # Examples
//!
//! ```
//! use storefront_core::{IterationError, RowSource, ScanError, Slot, materialize, record};
//!
//! #[derive(Debug, Default, PartialEq)]
//! struct Point {
//!     x: i64,
//!     y: i64,
//! }
//! record!(Point { x, y });
//!
//! struct Pairs {
//!     rows: Vec<(i64, i64)>,
//!     next: usize,
//! }
//!
//! impl RowSource for Pairs {
//!     fn advance(&mut self) -> bool {
//!         self.next += 1;
//!         self.next <= self.rows.len()
//!     }
//!
//!     fn scan_into(&mut self, slots: &mut [Slot<'_>]) -> Result<(), ScanError> {
//!         let (x, y) = self.rows[self.next - 1];
//!         if let [Slot::Integer(a), Slot::Integer(b)] = slots {
//!             **a = x;
//!             **b = y;
//!         }
//!         Ok(())
//!     }
//!
//!     fn final_error(&mut self) -> Option<IterationError> {
//!         None
//!     }
//! }
//!
//! let mut source = Pairs { rows: vec![(1, 2), (3, 4)], next: 0 };
//! let points: Vec<Point> = materialize(&mut source).unwrap();
//! assert_eq!(points, vec![Point { x: 1, y: 2 }, Point { x: 3, y: 4 }]);
//! ```

use thiserror::Error;

use crate::record::{FieldAccess, Record, ShapeKind, Slot};

/// Boxed error carried by scan and iteration failures.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// A cursor over the rows of a query result.
///
/// The source stays owned by the caller; [`materialize`] only drives it and
/// never closes it.
pub trait RowSource {
    /// Moves to the next row. Returns `false` when there are no more rows or
    /// the source failed; failures are reported by [`final_error`](Self::final_error).
    fn advance(&mut self) -> bool;

    /// Writes the current row's columns into `slots`, column `i` into slot `i`.
    fn scan_into(&mut self, slots: &mut [Slot<'_>]) -> Result<(), ScanError>;

    /// Returns the fault that ended iteration early, if any.
    fn final_error(&mut self) -> Option<IterationError>;
}

impl<S: RowSource + ?Sized> RowSource for &mut S {
    fn advance(&mut self) -> bool {
        (**self).advance()
    }

    fn scan_into(&mut self, slots: &mut [Slot<'_>]) -> Result<(), ScanError> {
        (**self).scan_into(slots)
    }

    fn final_error(&mut self) -> Option<IterationError> {
        (**self).final_error()
    }
}

/// A row could not be written into the record's fields.
#[derive(Debug, Error)]
pub enum ScanError {
    /// The row has a different number of columns than the record has fields.
    #[error("row has {actual} columns but the record declares {expected} fields")]
    ColumnCount { expected: usize, actual: usize },

    /// A column value does not fit its field.
    #[error("column {index} cannot be written into a {field_type} field: {source}")]
    Column {
        index: usize,
        field_type: &'static str,
        #[source]
        source: BoxError,
    },
}

/// The row source failed while producing rows.
#[derive(Debug, Error)]
#[error("row iteration failed: {0}")]
pub struct IterationError(#[source] pub BoxError);

impl IterationError {
    pub fn new(err: impl Into<BoxError>) -> Self {
        Self(err.into())
    }
}

/// Errors returned by [`materialize`].
#[derive(Debug, Error)]
pub enum MaterializeError {
    /// The target type is not a plain field aggregate.
    #[error("{record} is not a record shape")]
    Shape { record: &'static str },

    /// The target type declares a field the materializer may not write.
    #[error("field {field} of {record} is not writable")]
    FieldAccess {
        record: &'static str,
        field: &'static str,
    },

    /// A row could not be scanned into the record.
    #[error("failed to scan row {row} into {record}: {source}")]
    Scan {
        record: &'static str,
        row: usize,
        #[source]
        source: ScanError,
    },

    /// The source reported a fault after iteration.
    #[error(transparent)]
    Iteration(#[from] IterationError),
}

/// Materializes every remaining row of `source` into a record of type `R`.
///
/// The shape is checked before the source is touched: non-aggregate shapes
/// fail with [`MaterializeError::Shape`] and shapes with read-only fields
/// with [`MaterializeError::FieldAccess`], without calling
/// [`RowSource::advance`].
pub fn materialize<R, S>(source: &mut S) -> Result<Vec<R>, MaterializeError>
where
    R: Record,
    S: RowSource + ?Sized,
{
    let shape = R::SHAPE;
    if shape.kind != ShapeKind::Aggregate {
        return Err(MaterializeError::Shape { record: shape.name });
    }
    if let Some(field) = shape
        .fields
        .iter()
        .find(|f| f.access != FieldAccess::Writable)
    {
        return Err(MaterializeError::FieldAccess {
            record: shape.name,
            field: field.name,
        });
    }

    let mut records = Vec::new();
    while source.advance() {
        let mut record = R::default();
        {
            let mut slots = record.slots();
            debug_assert_eq!(slots.len(), shape.fields.len());
            source
                .scan_into(&mut slots)
                .map_err(|source| MaterializeError::Scan {
                    record: shape.name,
                    row: records.len(),
                    source,
                })?;
        }
        records.push(record);
    }

    if let Some(err) = source.final_error() {
        return Err(err.into());
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{FieldSpec, Shape};

    #[derive(Debug, Clone, PartialEq)]
    enum Cell {
        Int(i64),
        Text(&'static str),
        Null,
    }

    /// In-memory source that counts how often it is advanced.
    struct VecSource {
        rows: Vec<Vec<Cell>>,
        cursor: usize,
        advanced: usize,
        fault: Option<&'static str>,
    }

    impl VecSource {
        fn new(rows: Vec<Vec<Cell>>) -> Self {
            Self {
                rows,
                cursor: 0,
                advanced: 0,
                fault: None,
            }
        }

        fn failing_after(mut self, fault: &'static str) -> Self {
            self.fault = Some(fault);
            self
        }
    }

    impl RowSource for VecSource {
        fn advance(&mut self) -> bool {
            self.advanced += 1;
            if self.cursor < self.rows.len() {
                self.cursor += 1;
                true
            } else {
                false
            }
        }

        fn scan_into(&mut self, slots: &mut [Slot<'_>]) -> Result<(), ScanError> {
            let row = &self.rows[self.cursor - 1];
            if row.len() != slots.len() {
                return Err(ScanError::ColumnCount {
                    expected: slots.len(),
                    actual: row.len(),
                });
            }
            for (index, (slot, cell)) in slots.iter_mut().zip(row).enumerate() {
                let field_type = slot.type_name();
                match (slot, cell) {
                    (Slot::Integer(v), Cell::Int(i)) => **v = *i,
                    (Slot::Text(v), Cell::Text(s)) => **v = s.to_string(),
                    (Slot::OptionalText(v), Cell::Text(s)) => **v = Some(s.to_string()),
                    (Slot::OptionalText(v), Cell::Null) => **v = None,
                    _ => {
                        return Err(ScanError::Column {
                            index,
                            field_type,
                            source: format!("incompatible value {cell:?}").into(),
                        });
                    }
                }
            }
            Ok(())
        }

        fn final_error(&mut self) -> Option<IterationError> {
            self.fault.map(IterationError::new)
        }
    }

    #[derive(Debug, Default, Clone, PartialEq)]
    struct Item {
        id: i64,
        name: String,
        note: Option<String>,
    }

    crate::record!(Item { id, name, note });

    #[derive(Debug, Default)]
    struct Locked {
        id: i64,
        secret: String,
    }

    impl Record for Locked {
        const SHAPE: Shape = Shape::aggregate(
            "Locked",
            &[FieldSpec::writable("id"), FieldSpec::read_only("secret")],
        );

        fn slots(&mut self) -> Vec<Slot<'_>> {
            vec![Slot::Integer(&mut self.id), Slot::Text(&mut self.secret)]
        }
    }

    fn item_row(id: i64, name: &'static str, note: Option<&'static str>) -> Vec<Cell> {
        vec![
            Cell::Int(id),
            Cell::Text(name),
            note.map(Cell::Text).unwrap_or(Cell::Null),
        ]
    }

    #[test]
    fn test_materializes_rows_in_order() {
        let mut source = VecSource::new(vec![
            item_row(1, "first", None),
            item_row(2, "second", Some("n")),
            item_row(3, "third", None),
        ]);
        let items: Vec<Item> = materialize(&mut source).unwrap();
        assert_eq!(items.len(), 3);
        assert_eq!(items[0].id, 1);
        assert_eq!(items[0].name, "first");
        assert_eq!(items[1].note.as_deref(), Some("n"));
        assert_eq!(items[2].name, "third");
    }

    #[test]
    fn test_empty_result_yields_empty_vec() {
        let items: Vec<Item> = materialize(&mut VecSource::new(Vec::new())).unwrap();
        assert!(items.is_empty());
    }

    #[test]
    fn test_scalar_shape_is_rejected_before_advancing() {
        let mut source = VecSource::new(vec![vec![Cell::Int(1)]]);
        let err = materialize::<i64, _>(&mut source).unwrap_err();
        assert!(matches!(err, MaterializeError::Shape { record: "i64" }));
        assert_eq!(source.advanced, 0);
    }

    #[test]
    fn test_read_only_field_is_rejected_before_advancing() {
        let mut source = VecSource::new(vec![vec![Cell::Int(1), Cell::Text("x")]]);
        let err = materialize::<Locked, _>(&mut source).unwrap_err();
        match err {
            MaterializeError::FieldAccess { record, field } => {
                assert_eq!(record, "Locked");
                assert_eq!(field, "secret");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(source.advanced, 0);
    }

    #[test]
    fn test_scan_failure_discards_earlier_rows() {
        let mut source = VecSource::new(vec![
            item_row(1, "a", None),
            item_row(2, "b", None),
            vec![Cell::Int(3), Cell::Text("c")],
            item_row(4, "d", None),
            item_row(5, "e", None),
        ]);
        let err = materialize::<Item, _>(&mut source).unwrap_err();
        match err {
            MaterializeError::Scan { row, source, .. } => {
                assert_eq!(row, 2);
                assert!(matches!(
                    source,
                    ScanError::ColumnCount {
                        expected: 3,
                        actual: 2
                    }
                ));
            }
            other => panic!("unexpected error: {other}"),
        }
        // Rows after the failure are never requested.
        assert_eq!(source.advanced, 3);
    }

    #[test]
    fn test_incompatible_column_reports_index() {
        let mut source = VecSource::new(vec![vec![Cell::Text("1"), Cell::Text("a"), Cell::Null]]);
        let err = materialize::<Item, _>(&mut source).unwrap_err();
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
    fn test_final_error_discards_all_rows() {
        let mut source = VecSource::new(vec![item_row(1, "a", None), item_row(2, "b", None)])
            .failing_after("connection reset");
        let err = materialize::<Item, _>(&mut source).unwrap_err();
        assert!(matches!(err, MaterializeError::Iteration(_)));
        assert!(err.to_string().contains("connection reset"));
    }

    #[test]
    fn test_source_stays_with_caller() {
        let mut source = VecSource::new(vec![item_row(1, "a", None)]);
        let items: Vec<Item> = materialize(&mut source).unwrap();
        assert_eq!(items.len(), 1);
        // Drained but still owned and usable here.
        assert!(!source.advance());
        assert_eq!(source.advanced, 3);
        assert!(source.final_error().is_none());
    }

    #[test]
    fn test_identical_sources_yield_equal_records() {
        let rows = || vec![item_row(1, "a", Some("x")), item_row(2, "b", None)];
        let first: Vec<Item> = materialize(&mut VecSource::new(rows())).unwrap();
        let second: Vec<Item> = materialize(&mut VecSource::new(rows())).unwrap();
        assert_eq!(first, second);
    }
}
