//! SQL compiled into the binary from the crate's `queries/` directory.

macro_rules! bundled {
    ($($name:literal),+ $(,)?) => {
        &[$(($name, include_str!(concat!("../queries/", $name)))),+]
    };
}

/// Every bundled query as `(name, sql)`.
pub(crate) const QUERIES: &[(&str, &str)] = bundled![
    "init.sql",
    "init_data.sql",
    "read/customer.sql",
    "read/customer_by_id.sql",
    "read/category.sql",
    "read/category_by_id.sql",
    "read/product.sql",
    "read/product_by_id.sql",
    "read/sku.sql",
    "read/sku_by_id.sql",
    "read/cart.sql",
    "read/cart_by_id.sql",
    "read/cart_item.sql",
    "read/cart_item_by_id.sql",
    "read/review.sql",
    "read/review_by_id.sql",
    "read/address.sql",
    "read/address_by_id.sql",
    "read/order.sql",
    "read/order_by_id.sql",
    "read/return.sql",
    "read/return_by_id.sql",
    "create/customer.sql",
    "create/category.sql",
    "create/product.sql",
    "create/sku.sql",
    "create/cart.sql",
    "create/cart_item.sql",
    "create/review.sql",
    "create/address.sql",
    "create/order.sql",
    "create/return.sql",
    "update/customer.sql",
    "update/customer_password.sql",
    "update/category.sql",
    "update/product.sql",
    "update/sku.sql",
    "update/cart.sql",
    "update/cart_item.sql",
    "update/review.sql",
    "update/address.sql",
    "update/order.sql",
    "update/return.sql",
    "delete/customer.sql",
    "delete/category.sql",
    "delete/product.sql",
    "delete/sku.sql",
    "delete/cart.sql",
    "delete/cart_item.sql",
    "delete/review.sql",
    "delete/address.sql",
    "delete/order.sql",
    "delete/return.sql",
];
