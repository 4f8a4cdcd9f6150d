//! Generic CRUD over one entity type.
//!
//! [`EntityManager`] maps each operation to a statement name with
//! [`Operation::query_name`] and the entity's [`Entity::KEY`], validates the
//! draft, and lets [`Store`] do the rest. All ten managers are the same type
//! with a different `E`.
//!
//! # Example
//!
//! ```no_run
//! use rusqlite::Connection;
//! use storefront_core::CategoryDraft;
//! use storefront_db::QuerySource;
//! use storefront_sqlite::{CategoryManager, Store, prepare_connection};
//!
//! let conn = Connection::open("storefront.db").unwrap();
//! prepare_connection(&conn).unwrap();
//! let queries = QuerySource::bundled();
//! let categories = CategoryManager::new(Store::new(&conn, &queries));
//!
//! let id = categories
//!     .create(&CategoryDraft { name: "Garden".into() })
//!     .unwrap();
//! println!("{}", categories.get(id).unwrap());
//! ```

use std::marker::PhantomData;

use storefront_core::{
    Address, Cart, CartItem, Category, Customer, Draft, Entity, Order, ParamValue,
    PasswordChange, Product, Return, Review, Sku, require_positive,
};
use storefront_db::{CUSTOMER_PASSWORD, Operation};
use tracing::debug;

use crate::error::{Result, StoreError};
use crate::query::Store;
use crate::schema::hash_password;

/// List, Get, Create, Update and Delete for entity `E`.
pub struct EntityManager<'a, E> {
    store: Store<'a>,
    _entity: PhantomData<E>,
}

impl<'a, E: Entity> EntityManager<'a, E> {
    pub fn new(store: Store<'a>) -> Self {
        Self {
            store,
            _entity: PhantomData,
        }
    }

    /// Returns every record, in the order the list query yields them.
    pub fn list(&self) -> Result<Vec<E>> {
        self.store.fetch(&Operation::List.query_name(E::KEY), &[])
    }

    /// Returns the record with primary key `id`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Validation`] if `id` is not positive and
    /// [`StoreError::NotFound`] if no row matches.
    pub fn get(&self, id: i64) -> Result<E> {
        require_positive("id", id)?;
        let records: Vec<E> = self
            .store
            .fetch(&Operation::Get.query_name(E::KEY), &[("id", id.into())])?;
        records
            .into_iter()
            .find(|record| record.id() == id)
            .ok_or(StoreError::NotFound {
                entity: E::LABEL,
                id,
            })
    }

    /// Inserts a new record and returns its id.
    pub fn create(&self, draft: &E::Create) -> Result<i64> {
        let params = draft.to_params()?;
        self.store
            .execute(&Operation::Create.query_name(E::KEY), &params)?;
        let id = self.store.last_insert_id();
        debug!(entity = E::KEY, id, "created");
        Ok(id)
    }

    /// Overwrites the record `id` with `draft`.
    ///
    /// The number of affected rows is returned but not checked; updating a
    /// missing id is not an error.
    pub fn update(&self, id: i64, draft: &E::Update) -> Result<usize> {
        require_positive("id", id)?;
        let mut params = draft.to_params()?;
        params.push(("id", ParamValue::Integer(id)));
        self.store
            .execute(&Operation::Update.query_name(E::KEY), &params)
    }

    /// Deletes the record `id`. Dependent rows follow the schema's
    /// `ON DELETE` rules.
    pub fn delete(&self, id: i64) -> Result<usize> {
        require_positive("id", id)?;
        self.store
            .execute(&Operation::Delete.query_name(E::KEY), &[("id", id.into())])
    }
}

impl EntityManager<'_, Customer> {
    /// Replaces the customer's password with a freshly salted hash.
    pub fn update_password(&self, id: i64, password: &str) -> Result<usize> {
        require_positive("id", id)?;
        let change = PasswordChange {
            password: password.to_string(),
        };
        let mut params = change.to_params()?;
        params.push(("id", ParamValue::Integer(id)));
        self.store.execute(CUSTOMER_PASSWORD, &params)
    }

    /// Returns `true` if `password` matches the stored hash for customer `id`.
    pub fn verify_password(&self, id: i64, password: &str) -> Result<bool> {
        let customer = self.get(id)?;
        Ok(hash_password(password, &customer.password_salt) == customer.password_hash)
    }
}

pub type CustomerManager<'a> = EntityManager<'a, Customer>;
pub type CategoryManager<'a> = EntityManager<'a, Category>;
pub type ProductManager<'a> = EntityManager<'a, Product>;
pub type SkuManager<'a> = EntityManager<'a, Sku>;
pub type CartManager<'a> = EntityManager<'a, Cart>;
pub type CartItemManager<'a> = EntityManager<'a, CartItem>;
pub type ReviewManager<'a> = EntityManager<'a, Review>;
pub type AddressManager<'a> = EntityManager<'a, Address>;
pub type OrderManager<'a> = EntityManager<'a, Order>;
pub type ReturnManager<'a> = EntityManager<'a, Return>;
