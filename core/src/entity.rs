//! Storefront entities.
//!
//! Each entity is a plain record whose field order matches the column order
//! of its `read/<key>.sql` and `read/<key>_by_id.sql` queries. The
//! [`Entity`] trait ties a record to its query-file stem and to the draft
//! types its create and update statements take.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::draft::{
    AddressDraft, CartDraft, CartItemDraft, CategoryDraft, CustomerUpdate, Draft, NewCustomer,
    OrderDraft, ProductDraft, ReturnDraft, ReviewDraft, SkuDraft,
};
use crate::record;
use crate::record::Record;

/// A record with a home table and a set of CRUD queries.
pub trait Entity: Record + fmt::Display {
    /// Query-file stem, e.g. `customer` for `read/customer.sql`.
    const KEY: &'static str;
    /// Human-readable name used in messages.
    const LABEL: &'static str;

    type Create: Draft;
    type Update: Draft;

    /// Primary key.
    fn id(&self) -> i64;
}

fn or_null(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("null")
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub id: i64,
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    #[serde(skip)]
    pub password_hash: Vec<u8>,
    #[serde(skip)]
    pub password_salt: Vec<u8>,
}

record!(Customer {
    id,
    name,
    phone,
    email,
    password_hash,
    password_salt
});

impl fmt::Display for Customer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[ Customer #{} | {} | phone: {} | email: {} ]",
            self.id,
            self.name,
            self.phone,
            or_null(&self.email)
        )
    }
}

impl Entity for Customer {
    const KEY: &'static str = "customer";
    const LABEL: &'static str = "customer";
    type Create = NewCustomer;
    type Update = CustomerUpdate;

    fn id(&self) -> i64 {
        self.id
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
}

record!(Category { id, name });

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[ Category #{} | {} ]", self.id, self.name)
    }
}

impl Entity for Category {
    const KEY: &'static str = "category";
    const LABEL: &'static str = "category";
    type Create = CategoryDraft;
    type Update = CategoryDraft;

    fn id(&self) -> i64 {
        self.id
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub description: String,
    pub category_id: Option<i64>,
}

record!(Product {
    id,
    description,
    category_id
});

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.category_id {
            Some(category) => write!(
                f,
                "[ Product #{} | {} | category #{} ]",
                self.id, self.description, category
            ),
            None => write!(
                f,
                "[ Product #{} | {} | uncategorized ]",
                self.id, self.description
            ),
        }
    }
}

impl Entity for Product {
    const KEY: &'static str = "product";
    const LABEL: &'static str = "product";
    type Create = ProductDraft;
    type Update = ProductDraft;

    fn id(&self) -> i64 {
        self.id
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Sku {
    pub id: i64,
    pub product_id: i64,
    pub price: f64,
    pub stock: i64,
}

record!(Sku {
    id,
    product_id,
    price,
    stock
});

impl fmt::Display for Sku {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[ SKU #{} | product #{} | {:.2} | stock {} ]",
            self.id, self.product_id, self.price, self.stock
        )
    }
}

impl Entity for Sku {
    const KEY: &'static str = "sku";
    const LABEL: &'static str = "SKU";
    type Create = SkuDraft;
    type Update = SkuDraft;

    fn id(&self) -> i64 {
        self.id
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    pub id: i64,
    pub customer_id: i64,
}

record!(Cart { id, customer_id });

impl fmt::Display for Cart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[ Cart #{} | customer #{} ]", self.id, self.customer_id)
    }
}

impl Entity for Cart {
    const KEY: &'static str = "cart";
    const LABEL: &'static str = "cart";
    type Create = CartDraft;
    type Update = CartDraft;

    fn id(&self) -> i64 {
        self.id
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    pub id: i64,
    pub cart_id: i64,
    pub sku_id: i64,
    pub quantity: i64,
}

record!(CartItem {
    id,
    cart_id,
    sku_id,
    quantity
});

impl fmt::Display for CartItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[ Cart item #{} | cart #{} | SKU #{} | x{} ]",
            self.id, self.cart_id, self.sku_id, self.quantity
        )
    }
}

impl Entity for CartItem {
    const KEY: &'static str = "cart_item";
    const LABEL: &'static str = "cart item";
    type Create = CartItemDraft;
    type Update = CartItemDraft;

    fn id(&self) -> i64 {
        self.id
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    pub id: i64,
    pub customer_id: i64,
    pub product_id: i64,
    pub rating: i64,
    pub comment: Option<String>,
}

record!(Review {
    id,
    customer_id,
    product_id,
    rating,
    comment
});

impl fmt::Display for Review {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[ Review #{} | customer #{} | product #{} | {}/5 | {} ]",
            self.id,
            self.customer_id,
            self.product_id,
            self.rating,
            or_null(&self.comment)
        )
    }
}

impl Entity for Review {
    const KEY: &'static str = "review";
    const LABEL: &'static str = "review";
    type Create = ReviewDraft;
    type Update = ReviewDraft;

    fn id(&self) -> i64 {
        self.id
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub id: i64,
    pub customer_id: i64,
    pub kind: String,
    pub detail: Option<String>,
}

record!(Address {
    id,
    customer_id,
    kind,
    detail
});

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[ Address #{} | customer #{} | {} | {} ]",
            self.id,
            self.customer_id,
            self.kind,
            or_null(&self.detail)
        )
    }
}

impl Entity for Address {
    const KEY: &'static str = "address";
    const LABEL: &'static str = "address";
    type Create = AddressDraft;
    type Update = AddressDraft;

    fn id(&self) -> i64 {
        self.id
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: i64,
    pub customer_id: i64,
    pub delivered: bool,
}

record!(Order {
    id,
    customer_id,
    delivered
});

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = if self.delivered {
            "delivered"
        } else {
            "not delivered"
        };
        write!(
            f,
            "[ Order #{} | customer #{} | {} ]",
            self.id, self.customer_id, state
        )
    }
}

impl Entity for Order {
    const KEY: &'static str = "order";
    const LABEL: &'static str = "order";
    type Create = OrderDraft;
    type Update = OrderDraft;

    fn id(&self) -> i64 {
        self.id
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Return {
    pub id: i64,
    pub order_id: i64,
    pub date: NaiveDate,
    pub status: Option<String>,
    pub description: Option<String>,
    pub resolution: Option<String>,
}

record!(Return {
    id,
    order_id,
    date,
    status,
    description,
    resolution
});

impl fmt::Display for Return {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[ Return #{} | order #{} | {} | status: {} | {} | resolution: {} ]",
            self.id,
            self.order_id,
            self.date.format("%Y-%m-%d"),
            or_null(&self.status),
            or_null(&self.description),
            or_null(&self.resolution)
        )
    }
}

impl Entity for Return {
    const KEY: &'static str = "return";
    const LABEL: &'static str = "return";
    type Create = ReturnDraft;
    type Update = ReturnDraft;

    fn id(&self) -> i64 {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_customer_shape_matches_column_order() {
        assert_eq!(
            Customer::SHAPE.field_names(),
            vec![
                "id",
                "name",
                "phone",
                "email",
                "password_hash",
                "password_salt"
            ]
        );
    }

    #[test]
    fn test_keys_are_unique() {
        let mut keys = vec![
            Customer::KEY,
            Category::KEY,
            Product::KEY,
            Sku::KEY,
            Cart::KEY,
            CartItem::KEY,
            Review::KEY,
            Address::KEY,
            Order::KEY,
            Return::KEY,
        ];
        keys.sort_unstable();
        keys.dedup();
        assert_eq!(keys.len(), 10);
    }

    #[test]
    fn test_display_renders_nulls() {
        let customer = Customer {
            id: 1,
            name: "Ana".into(),
            phone: "55551234".into(),
            ..Default::default()
        };
        assert_eq!(
            customer.to_string(),
            "[ Customer #1 | Ana | phone: 55551234 | email: null ]"
        );

        let product = Product {
            id: 2,
            description: "Mug".into(),
            category_id: None,
        };
        assert!(product.to_string().contains("uncategorized"));
    }

    #[test]
    fn test_customer_json_omits_password_material() {
        let customer = Customer {
            id: 1,
            name: "Ana".into(),
            phone: "55551234".into(),
            email: None,
            password_hash: vec![1, 2, 3],
            password_salt: vec![4, 5, 6],
        };
        let json = serde_json::to_value(&customer).unwrap();
        assert!(json.get("password_hash").is_none());
        assert_eq!(json["name"], "Ana");
    }

    #[test]
    fn test_return_display_formats_date() {
        let ret = Return {
            id: 3,
            order_id: 9,
            date: NaiveDate::from_ymd_opt(2024, 2, 29).unwrap(),
            ..Default::default()
        };
        assert!(ret.to_string().contains("2024-02-29"));
    }
}
