//! Per-entity input forms for the create and update menu options.

use std::io::{self, BufRead, Write};

use storefront_core::{
    Address, AddressDraft, Cart, CartDraft, CartItem, CartItemDraft, Category, CategoryDraft,
    Customer, CustomerUpdate, Entity, NewCustomer, Order, OrderDraft, Product, ProductDraft,
    Return, ReturnDraft, Review, ReviewDraft, Sku, SkuDraft,
};

use crate::prompt::Prompt;

/// An entity the menu can build drafts for.
pub trait Form: Entity {
    /// Submenu heading.
    const TITLE: &'static str;
    /// Whether the submenu offers a password change.
    const HAS_PASSWORD: bool = false;

    fn read_create<R: BufRead, W: Write>(p: &mut Prompt<R, W>) -> io::Result<Self::Create>;
    fn read_update<R: BufRead, W: Write>(p: &mut Prompt<R, W>) -> io::Result<Self::Update>;
}

impl Form for Customer {
    const TITLE: &'static str = "Customers";
    const HAS_PASSWORD: bool = true;

    fn read_create<R: BufRead, W: Write>(p: &mut Prompt<R, W>) -> io::Result<NewCustomer> {
        Ok(NewCustomer {
            name: p.line("Name: ")?,
            phone: p.line("Phone (8 digits): ")?,
            email: p.line("Email (optional): ")?,
            password: p.line("Password: ")?,
        })
    }

    fn read_update<R: BufRead, W: Write>(p: &mut Prompt<R, W>) -> io::Result<CustomerUpdate> {
        Ok(CustomerUpdate {
            name: p.line("Name: ")?,
            phone: p.line("Phone: ")?,
            email: p.line("Email (optional): ")?,
        })
    }
}

impl Form for Category {
    const TITLE: &'static str = "Categories";

    fn read_create<R: BufRead, W: Write>(p: &mut Prompt<R, W>) -> io::Result<CategoryDraft> {
        Ok(CategoryDraft {
            name: p.line("Name: ")?,
        })
    }

    fn read_update<R: BufRead, W: Write>(p: &mut Prompt<R, W>) -> io::Result<CategoryDraft> {
        Self::read_create(p)
    }
}

impl Form for Product {
    const TITLE: &'static str = "Products";

    fn read_create<R: BufRead, W: Write>(p: &mut Prompt<R, W>) -> io::Result<ProductDraft> {
        Ok(ProductDraft {
            description: p.line("Description: ")?,
            category_id: p.optional_int("Category ID (0 for none): ")?,
        })
    }

    fn read_update<R: BufRead, W: Write>(p: &mut Prompt<R, W>) -> io::Result<ProductDraft> {
        Self::read_create(p)
    }
}

impl Form for Sku {
    const TITLE: &'static str = "SKUs";

    fn read_create<R: BufRead, W: Write>(p: &mut Prompt<R, W>) -> io::Result<SkuDraft> {
        Ok(SkuDraft {
            product_id: p.int("Product ID: ")?,
            price: p.float("Price: ")?,
            stock: p.int("Stock: ")?,
        })
    }

    fn read_update<R: BufRead, W: Write>(p: &mut Prompt<R, W>) -> io::Result<SkuDraft> {
        Self::read_create(p)
    }
}

impl Form for Cart {
    const TITLE: &'static str = "Carts";

    fn read_create<R: BufRead, W: Write>(p: &mut Prompt<R, W>) -> io::Result<CartDraft> {
        Ok(CartDraft {
            customer_id: p.int("Customer ID: ")?,
        })
    }

    fn read_update<R: BufRead, W: Write>(p: &mut Prompt<R, W>) -> io::Result<CartDraft> {
        Self::read_create(p)
    }
}

impl Form for CartItem {
    const TITLE: &'static str = "Cart items";

    fn read_create<R: BufRead, W: Write>(p: &mut Prompt<R, W>) -> io::Result<CartItemDraft> {
        Ok(CartItemDraft {
            cart_id: p.int("Cart ID: ")?,
            sku_id: p.int("SKU ID: ")?,
            quantity: p.int("Quantity: ")?,
        })
    }

    fn read_update<R: BufRead, W: Write>(p: &mut Prompt<R, W>) -> io::Result<CartItemDraft> {
        Self::read_create(p)
    }
}

impl Form for Review {
    const TITLE: &'static str = "Reviews";

    fn read_create<R: BufRead, W: Write>(p: &mut Prompt<R, W>) -> io::Result<ReviewDraft> {
        Ok(ReviewDraft {
            customer_id: p.int("Customer ID: ")?,
            product_id: p.int("Product ID: ")?,
            rating: p.int("Rating (1-5): ")?,
            comment: p.line("Comment (optional): ")?,
        })
    }

    fn read_update<R: BufRead, W: Write>(p: &mut Prompt<R, W>) -> io::Result<ReviewDraft> {
        Self::read_create(p)
    }
}

impl Form for Address {
    const TITLE: &'static str = "Addresses";

    fn read_create<R: BufRead, W: Write>(p: &mut Prompt<R, W>) -> io::Result<AddressDraft> {
        Ok(AddressDraft {
            customer_id: p.int("Customer ID: ")?,
            kind: p.line("Type (shipping/billing): ")?,
            detail: p.line("Detail (optional): ")?,
        })
    }

    fn read_update<R: BufRead, W: Write>(p: &mut Prompt<R, W>) -> io::Result<AddressDraft> {
        Self::read_create(p)
    }
}

impl Form for Order {
    const TITLE: &'static str = "Orders";

    fn read_create<R: BufRead, W: Write>(p: &mut Prompt<R, W>) -> io::Result<OrderDraft> {
        Ok(OrderDraft {
            customer_id: p.int("Customer ID: ")?,
            delivered: p.confirm("Delivered? (y/N): ")?,
        })
    }

    fn read_update<R: BufRead, W: Write>(p: &mut Prompt<R, W>) -> io::Result<OrderDraft> {
        Self::read_create(p)
    }
}

impl Form for Return {
    const TITLE: &'static str = "Returns";

    fn read_create<R: BufRead, W: Write>(p: &mut Prompt<R, W>) -> io::Result<ReturnDraft> {
        Ok(ReturnDraft {
            order_id: p.int("Order ID: ")?,
            date: p.date("Date (YYYY-MM-DD): ")?,
            status: p.line("Status (optional): ")?,
            description: p.line("Description (optional): ")?,
            resolution: p.line("Resolution (optional): ")?,
        })
    }

    fn read_update<R: BufRead, W: Write>(p: &mut Prompt<R, W>) -> io::Result<ReturnDraft> {
        Self::read_create(p)
    }
}
