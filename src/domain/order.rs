use std::fmt;
use std::str::FromStr;

use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::errors::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitType {
    Kg,
    Pcs,
}

impl UnitType {
    pub fn as_str(self) -> &'static str {
        match self {
            UnitType::Kg => "KG",
            UnitType::Pcs => "PCS",
        }
    }
}

impl fmt::Display for UnitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UnitType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "KG" => Ok(UnitType::Kg),
            "PCS" => Ok(UnitType::Pcs),
            other => Err(DomainError::InvalidInput(format!("unknown unit type '{}'", other))),
        }
    }
}

/// Lifecycle of an order. Checkout only ever produces `Placed`; `Cart` lives
/// on the client and the remaining states belong to fulfilment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderStatus {
    Cart,
    Placed,
    Assigned,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Cart => "CART",
            OrderStatus::Placed => "PLACED",
            OrderStatus::Assigned => "ASSIGNED",
            OrderStatus::Delivered => "DELIVERED",
            OrderStatus::Cancelled => "CANCELLED",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CART" => Ok(OrderStatus::Cart),
            "PLACED" => Ok(OrderStatus::Placed),
            "ASSIGNED" => Ok(OrderStatus::Assigned),
            "DELIVERED" => Ok(OrderStatus::Delivered),
            "CANCELLED" => Ok(OrderStatus::Cancelled),
            other => Err(DomainError::InvalidInput(format!("unknown order status '{}'", other))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CartLine {
    pub product_id: Uuid,
    pub quantity: BigDecimal,
}

#[derive(Debug, Clone)]
pub struct Product {
    pub id: Uuid,
    pub price: BigDecimal,
    pub stock: BigDecimal,
    pub unit_type: UnitType,
}

/// Order header as written by checkout; the store assigns the id.
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub customer_id: Uuid,
    pub status: OrderStatus,
    pub ordered_at: DateTime<Utc>,
    pub requested_delivery_at: DateTime<Utc>,
    pub vat_rate: BigDecimal,
    pub subtotal: BigDecimal,
    pub discount_total: BigDecimal,
    pub vat_total: BigDecimal,
    pub total: BigDecimal,
    pub coupon_id: Option<Uuid>,
    pub loyalty_rate: BigDecimal,
    pub note: String,
}

impl NewOrder {
    pub fn into_order(self, id: Uuid) -> Order {
        Order {
            id,
            customer_id: self.customer_id,
            carrier_id: None,
            status: self.status,
            ordered_at: self.ordered_at,
            requested_delivery_at: self.requested_delivery_at,
            delivered_at: None,
            cancelled_at: None,
            vat_rate: self.vat_rate,
            subtotal: self.subtotal,
            discount_total: self.discount_total,
            vat_total: self.vat_total,
            total: self.total,
            coupon_id: self.coupon_id,
            loyalty_rate: self.loyalty_rate,
            note: self.note,
        }
    }
}

#[derive(Debug, Clone)]
pub struct NewOrderItem {
    pub order_id: Uuid,
    pub line_no: i32,
    pub product_id: Uuid,
    pub unit_type: UnitType,
    pub quantity: BigDecimal,
    pub unit_price: BigDecimal,
    pub line_total: BigDecimal,
}

#[derive(Debug, Clone)]
pub struct Order {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub carrier_id: Option<Uuid>,
    pub status: OrderStatus,
    pub ordered_at: DateTime<Utc>,
    pub requested_delivery_at: DateTime<Utc>,
    pub delivered_at: Option<DateTime<Utc>>,
    pub cancelled_at: Option<DateTime<Utc>>,
    pub vat_rate: BigDecimal,
    pub subtotal: BigDecimal,
    pub discount_total: BigDecimal,
    pub vat_total: BigDecimal,
    pub total: BigDecimal,
    pub coupon_id: Option<Uuid>,
    pub loyalty_rate: BigDecimal,
    pub note: String,
}

#[derive(Debug, Clone)]
pub struct OrderItem {
    pub id: Uuid,
    pub order_id: Uuid,
    pub line_no: i32,
    pub product_id: Uuid,
    pub unit_type: UnitType,
    pub quantity: BigDecimal,
    pub unit_price: BigDecimal,
    pub line_total: BigDecimal,
}

#[derive(Debug, Clone)]
pub struct OrderDetails {
    pub order: Order,
    pub items: Vec<OrderItem>,
}

/// Outcome of a committed checkout. `invoice_error` carries the non-fatal
/// invoice failure, if any; the order is persisted either way.
#[derive(Debug)]
pub struct PlacedOrder {
    pub details: OrderDetails,
    pub invoice_error: Option<DomainError>,
}

#[derive(Debug, Clone)]
pub struct ListResult {
    pub items: Vec<Order>,
    pub total: i64,
}
