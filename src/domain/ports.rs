use bigdecimal::BigDecimal;
use uuid::Uuid;

use super::errors::DomainError;
use super::order::{ListResult, NewOrder, NewOrderItem, Order, OrderDetails, OrderItem, Product};

pub trait Catalog {
    fn get_product(&mut self, product_id: Uuid) -> Result<Option<Product>, DomainError>;

    /// Decrements stock by `quantity` only if at least that much is on hand.
    /// Returns `false` when no row was updated.
    fn deduct_stock(&mut self, product_id: Uuid, quantity: &BigDecimal) -> Result<bool, DomainError>;
}

pub trait LoyaltyRates {
    fn individual_rate(&mut self, customer_id: Uuid) -> Result<Option<BigDecimal>, DomainError>;
    fn default_rate(&mut self) -> Result<BigDecimal, DomainError>;
}

pub trait OrderWriter {
    fn insert_order(&mut self, header: &NewOrder) -> Result<Uuid, DomainError>;
    fn insert_order_item(&mut self, item: &NewOrderItem) -> Result<OrderItem, DomainError>;
}

/// Call-scoped handle onto one open transaction.
pub trait CheckoutTx: Catalog + LoyaltyRates + OrderWriter {}

impl<T: Catalog + LoyaltyRates + OrderWriter + ?Sized> CheckoutTx for T {}

pub trait CheckoutStore: Send + Sync + 'static {
    /// Runs `f` inside a transaction. Commits when `f` returns `Ok`, rolls
    /// everything back otherwise.
    fn in_transaction<T, F>(&self, f: F) -> Result<T, DomainError>
    where
        F: FnOnce(&mut dyn CheckoutTx) -> Result<T, DomainError>;

    fn find_order(&self, order_id: Uuid) -> Result<Option<OrderDetails>, DomainError>;
    fn list_orders(
        &self,
        customer_id: Option<Uuid>,
        page: i64,
        limit: i64,
    ) -> Result<ListResult, DomainError>;

    fn save_invoice(&self, order_id: Uuid, document: &[u8]) -> Result<(), DomainError>;
    fn find_invoice(&self, order_id: Uuid) -> Result<Option<Vec<u8>>, DomainError>;
}

pub trait InvoiceRenderer: Send + Sync + 'static {
    fn render(&self, order: &Order, items: &[OrderItem]) -> Result<Vec<u8>, DomainError>;
}
