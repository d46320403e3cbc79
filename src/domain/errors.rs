use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Order not found")]
    NotFound,
    #[error("Invalid cart: {0}")]
    InvalidCart(String),
    #[error("Insufficient stock for product {0}")]
    InsufficientStock(Uuid),
    #[error("Product {0} not found")]
    ProductNotFound(Uuid),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Persistence failure: {0}")]
    Persistence(String),
    #[error("Invoice generation failed: {0}")]
    InvoiceGeneration(String),
}
