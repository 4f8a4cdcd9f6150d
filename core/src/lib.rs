//! Record shapes, row materialization and entity types for the storefront
//! console.
//!
//! This crate is storage-agnostic. It defines:
//!
//! - [`Record`]: a struct whose declared fields map, in order, to the
//!   columns of a query result, usually implemented with [`record!`].
//! - [`RowSource`] and [`materialize`]: the generic routine that turns a
//!   tabular result into a `Vec` of records, all-or-nothing.
//! - [`Entity`]: the ten storefront records (customers, categories,
//!   products, SKUs, carts, cart items, reviews, addresses, orders, returns)
//!   and the [`Draft`] inputs their create/update statements take.
//! - [`ValidationError`] and the normalization helpers drafts share.
//!
//! Backends implement [`RowSource`] over their native cursor and bind
//! [`ParamValue`]s to named parameters; see `storefront-sqlite`.
//!
//! # Example
//!
//! ```
//! use storefront_core::*;
//!
//! let draft = CategoryDraft { name: "  Books ".into() };
//! let params = draft.to_params().unwrap();
//! assert_eq!(params, vec![("name", ParamValue::Text("Books".into()))]);
//!
//! assert_eq!(Category::KEY, "category");
//! assert_eq!(Category::SHAPE.field_names(), vec!["id", "name"]);
//! ```

mod draft;
mod entity;
mod materialize;
mod record;
mod validate;

pub use draft::{
    AddressDraft, AddressKind, CartDraft, CartItemDraft, CategoryDraft, CustomerUpdate, Draft,
    NamedParams, NewCustomer, OrderDraft, ParamValue, PasswordChange, ProductDraft, ReturnDraft,
    ReviewDraft, SkuDraft,
};
pub use entity::{
    Address, Cart, CartItem, Category, Customer, Entity, Order, Product, Return, Review, Sku,
};
pub use materialize::{
    BoxError, IterationError, MaterializeError, RowSource, ScanError, materialize,
};
pub use record::{FieldAccess, FieldSpec, FieldValue, Record, Shape, ShapeKind, Slot};
pub use validate::{
    ValidationError, optional_id, optional_text, require_amount, require_non_empty,
    require_non_negative, require_positive, require_range,
};
