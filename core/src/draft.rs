//! Create and update inputs with their named query parameters.
//!
//! A draft holds raw user input for one write operation. [`Draft::to_params`]
//! validates and normalizes it, then produces the `(name, value)` pairs bound
//! to the statement's `:name` placeholders.

use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::validate::{
    ValidationError, optional_id, optional_text, require_amount, require_non_empty,
    require_non_negative, require_positive, require_range,
};

/// A value bound to a named statement parameter.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    Null,
    Integer(i64),
    Real(f64),
    Bool(bool),
    Text(String),
    Date(NaiveDate),
}

impl From<i64> for ParamValue {
    fn from(v: i64) -> Self {
        ParamValue::Integer(v)
    }
}

impl From<f64> for ParamValue {
    fn from(v: f64) -> Self {
        ParamValue::Real(v)
    }
}

impl From<bool> for ParamValue {
    fn from(v: bool) -> Self {
        ParamValue::Bool(v)
    }
}

impl From<String> for ParamValue {
    fn from(v: String) -> Self {
        ParamValue::Text(v)
    }
}

impl From<&str> for ParamValue {
    fn from(v: &str) -> Self {
        ParamValue::Text(v.to_string())
    }
}

impl From<NaiveDate> for ParamValue {
    fn from(v: NaiveDate) -> Self {
        ParamValue::Date(v)
    }
}

impl<T: Into<ParamValue>> From<Option<T>> for ParamValue {
    fn from(v: Option<T>) -> Self {
        v.map_or(ParamValue::Null, Into::into)
    }
}

/// Named parameters, without the leading `:`.
pub type NamedParams = Vec<(&'static str, ParamValue)>;

/// Validated input for a write statement.
pub trait Draft {
    /// Validates the draft and returns its statement parameters.
    fn to_params(&self) -> Result<NamedParams, ValidationError>;
}

/// New customer. The password is hashed inside the insert statement.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCustomer {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub password: String,
}

impl Draft for NewCustomer {
    fn to_params(&self) -> Result<NamedParams, ValidationError> {
        Ok(vec![
            ("name", require_non_empty("name", &self.name)?.into()),
            ("phone", require_non_empty("phone", &self.phone)?.into()),
            ("email", optional_text(&self.email).into()),
            ("password", require_non_empty("password", &self.password)?.into()),
        ])
    }
}

/// Customer contact details; the password is changed separately.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerUpdate {
    pub name: String,
    pub phone: String,
    pub email: String,
}

impl Draft for CustomerUpdate {
    fn to_params(&self) -> Result<NamedParams, ValidationError> {
        Ok(vec![
            ("name", require_non_empty("name", &self.name)?.into()),
            ("phone", require_non_empty("phone", &self.phone)?.into()),
            ("email", optional_text(&self.email).into()),
        ])
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PasswordChange {
    pub password: String,
}

impl Draft for PasswordChange {
    fn to_params(&self) -> Result<NamedParams, ValidationError> {
        Ok(vec![(
            "password",
            require_non_empty("password", &self.password)?.into(),
        )])
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryDraft {
    pub name: String,
}

impl Draft for CategoryDraft {
    fn to_params(&self) -> Result<NamedParams, ValidationError> {
        Ok(vec![("name", require_non_empty("name", &self.name)?.into())])
    }
}

/// Product input. A `category_id` of zero or below leaves it uncategorized.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductDraft {
    pub description: String,
    pub category_id: i64,
}

impl Draft for ProductDraft {
    fn to_params(&self) -> Result<NamedParams, ValidationError> {
        Ok(vec![
            (
                "description",
                require_non_empty("description", &self.description)?.into(),
            ),
            ("category_id", optional_id(self.category_id).into()),
        ])
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SkuDraft {
    pub product_id: i64,
    pub price: f64,
    pub stock: i64,
}

impl Draft for SkuDraft {
    fn to_params(&self) -> Result<NamedParams, ValidationError> {
        Ok(vec![
            (
                "product_id",
                require_positive("product id", self.product_id)?.into(),
            ),
            ("price", require_amount("price", self.price)?.into()),
            ("stock", require_non_negative("stock", self.stock)?.into()),
        ])
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartDraft {
    pub customer_id: i64,
}

impl Draft for CartDraft {
    fn to_params(&self) -> Result<NamedParams, ValidationError> {
        Ok(vec![(
            "customer_id",
            require_positive("customer id", self.customer_id)?.into(),
        )])
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItemDraft {
    pub cart_id: i64,
    pub sku_id: i64,
    pub quantity: i64,
}

impl Draft for CartItemDraft {
    fn to_params(&self) -> Result<NamedParams, ValidationError> {
        Ok(vec![
            ("cart_id", require_positive("cart id", self.cart_id)?.into()),
            ("sku_id", require_positive("sku id", self.sku_id)?.into()),
            ("quantity", require_positive("quantity", self.quantity)?.into()),
        ])
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewDraft {
    pub customer_id: i64,
    pub product_id: i64,
    pub rating: i64,
    pub comment: String,
}

impl Draft for ReviewDraft {
    fn to_params(&self) -> Result<NamedParams, ValidationError> {
        Ok(vec![
            (
                "customer_id",
                require_positive("customer id", self.customer_id)?.into(),
            ),
            (
                "product_id",
                require_positive("product id", self.product_id)?.into(),
            ),
            ("rating", require_range("rating", self.rating, 1, 5)?.into()),
            ("comment", optional_text(&self.comment).into()),
        ])
    }
}

/// Purpose of a customer address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AddressKind {
    Shipping,
    Billing,
}

impl AddressKind {
    /// Stored column value.
    pub fn as_str(self) -> &'static str {
        match self {
            AddressKind::Shipping => "Shipping",
            AddressKind::Billing => "Billing",
        }
    }
}

impl FromStr for AddressKind {
    type Err = ValidationError;

    /// Accepts the English names and the Spanish ones older data used,
    /// ignoring case and surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match require_non_empty("address kind", s)?.to_lowercase().as_str() {
            "shipping" | "envio" | "envío" => Ok(AddressKind::Shipping),
            "billing" | "facturacion" | "facturación" => Ok(AddressKind::Billing),
            _ => Err(ValidationError::InvalidChoice {
                field: "address kind",
                value: s.trim().to_string(),
                expected: "Shipping, Billing",
            }),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressDraft {
    pub customer_id: i64,
    pub kind: String,
    pub detail: String,
}

impl Draft for AddressDraft {
    fn to_params(&self) -> Result<NamedParams, ValidationError> {
        let kind: AddressKind = self.kind.parse()?;
        Ok(vec![
            (
                "customer_id",
                require_positive("customer id", self.customer_id)?.into(),
            ),
            ("kind", kind.as_str().into()),
            ("detail", optional_text(&self.detail).into()),
        ])
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderDraft {
    pub customer_id: i64,
    pub delivered: bool,
}

impl Draft for OrderDraft {
    fn to_params(&self) -> Result<NamedParams, ValidationError> {
        Ok(vec![
            (
                "customer_id",
                require_positive("customer id", self.customer_id)?.into(),
            ),
            ("delivered", self.delivered.into()),
        ])
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReturnDraft {
    pub order_id: i64,
    pub date: NaiveDate,
    pub status: String,
    pub description: String,
    pub resolution: String,
}

impl Draft for ReturnDraft {
    fn to_params(&self) -> Result<NamedParams, ValidationError> {
        Ok(vec![
            ("order_id", require_positive("order id", self.order_id)?.into()),
            ("date", self.date.into()),
            ("status", optional_text(&self.status).into()),
            ("description", optional_text(&self.description).into()),
            ("resolution", optional_text(&self.resolution).into()),
        ])
    }
}
