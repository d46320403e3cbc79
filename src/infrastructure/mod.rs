pub mod invoice;
pub mod models;
pub mod order_repo;
