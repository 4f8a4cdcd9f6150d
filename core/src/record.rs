//! Record shapes and writable field slots.
//!
//! A record shape is a plain struct whose declared fields line up, in order,
//! with the columns of a query result. Shapes describe themselves at compile
//! time through the [`Record`] trait: a static [`Shape`] descriptor listing
//! the fields, plus [`Record::slots`] handing out one mutable [`Slot`] per
//! field in the same order.
//!
//! Most shapes never implement [`Record`] by hand; the [`record!`] macro
//! generates the impl from the struct name and its field list.
//!
//! # Examples
//!
//! ```
//! use storefront_core::{Record, ShapeKind, record};
//!
//! #[derive(Debug, Default)]
//! struct Tag {
//!     id: i64,
//!     label: String,
//!     note: Option<String>,
//! }
//!
//! record!(Tag { id, label, note });
//!
//! assert_eq!(Tag::SHAPE.kind, ShapeKind::Aggregate);
//! assert_eq!(Tag::SHAPE.field_names(), vec!["id", "label", "note"]);
//!
//! let mut tag = Tag::default();
//! assert_eq!(tag.slots().len(), 3);
//! ```

use chrono::NaiveDate;

/// Whether a shape is a field aggregate or something else.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeKind {
    /// A plain struct of fields; the only kind rows can be materialized into.
    Aggregate,
    /// A single value such as an integer or a string.
    Scalar,
}

/// Whether the materializer may write a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldAccess {
    Writable,
    ReadOnly,
}

/// One declared field of a record shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// Field name as declared on the struct.
    pub name: &'static str,
    /// Whether the field accepts column values.
    pub access: FieldAccess,
}

impl FieldSpec {
    /// A field the materializer may write.
    pub const fn writable(name: &'static str) -> Self {
        Self {
            name,
            access: FieldAccess::Writable,
        }
    }

    /// A field that must not be written from a result row.
    pub const fn read_only(name: &'static str) -> Self {
        Self {
            name,
            access: FieldAccess::ReadOnly,
        }
    }
}

/// Static description of a record shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shape {
    /// Type name, used in error messages.
    pub name: &'static str,
    pub kind: ShapeKind,
    /// Declared fields in column order. Empty for scalars.
    pub fields: &'static [FieldSpec],
}

impl Shape {
    /// Describes a plain struct with the given fields.
    pub const fn aggregate(name: &'static str, fields: &'static [FieldSpec]) -> Self {
        Self {
            name,
            kind: ShapeKind::Aggregate,
            fields,
        }
    }

    /// Describes a single-value type.
    pub const fn scalar(name: &'static str) -> Self {
        Self {
            name,
            kind: ShapeKind::Scalar,
            fields: &[],
        }
    }

    /// Returns the declared field names in order.
    pub fn field_names(&self) -> Vec<&'static str> {
        self.fields.iter().map(|f| f.name).collect()
    }
}

/// A mutable reference to one record field, tagged with its storage type.
///
/// Row sources match on the variant to decide how to convert a column value.
#[derive(Debug)]
pub enum Slot<'a> {
    Integer(&'a mut i64),
    OptionalInteger(&'a mut Option<i64>),
    Real(&'a mut f64),
    Bool(&'a mut bool),
    Text(&'a mut String),
    OptionalText(&'a mut Option<String>),
    Blob(&'a mut Vec<u8>),
    Date(&'a mut NaiveDate),
}

impl Slot<'_> {
    /// Short name of the field type, used in diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Slot::Integer(_) => "integer",
            Slot::OptionalInteger(_) => "optional integer",
            Slot::Real(_) => "real",
            Slot::Bool(_) => "bool",
            Slot::Text(_) => "text",
            Slot::OptionalText(_) => "optional text",
            Slot::Blob(_) => "blob",
            Slot::Date(_) => "date",
        }
    }
}

/// Field types that can hand out a [`Slot`].
pub trait FieldValue {
    fn slot(&mut self) -> Slot<'_>;
}

macro_rules! impl_field_value {
    ($($ty:ty => $variant:ident),+ $(,)?) => {
        $(
            impl FieldValue for $ty {
                fn slot(&mut self) -> Slot<'_> {
                    Slot::$variant(self)
                }
            }
        )+
    };
}

impl_field_value! {
    i64 => Integer,
    Option<i64> => OptionalInteger,
    f64 => Real,
    bool => Bool,
    String => Text,
    Option<String> => OptionalText,
    Vec<u8> => Blob,
    NaiveDate => Date,
}

/// A type rows can be materialized into.
///
/// `Default` supplies the zero-valued instance built for each row.
/// [`slots`](Self::slots) must return exactly one slot per entry of
/// `SHAPE.fields`, in the same order.
pub trait Record: Default {
    const SHAPE: Shape;

    fn slots(&mut self) -> Vec<Slot<'_>>;
}

macro_rules! impl_scalar_record {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl Record for $ty {
                const SHAPE: Shape = Shape::scalar(stringify!($ty));

                fn slots(&mut self) -> Vec<Slot<'_>> {
                    vec![FieldValue::slot(self)]
                }
            }
        )+
    };
}

// Scalars describe themselves so that asking for them is rejected with a
// shape error rather than silently reading the first column.
impl_scalar_record!(i64, f64, bool, String);

/// Implements [`Record`] for a plain struct.
///
/// List every field in declared order; that order is the column order of
/// every query routed into the struct. Each field type must implement
/// [`FieldValue`].
#[macro_export]
macro_rules! record {
    ($ty:ident { $($field:ident),+ $(,)? }) => {
        impl $crate::Record for $ty {
            const SHAPE: $crate::Shape = $crate::Shape::aggregate(
                stringify!($ty),
                &[$($crate::FieldSpec::writable(stringify!($field))),+],
            );

            fn slots(&mut self) -> ::std::vec::Vec<$crate::Slot<'_>> {
                vec![$($crate::FieldValue::slot(&mut self.$field)),+]
            }
        }
    };
}
