use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::errors::DomainError;
use crate::domain::order::{NewOrder, NewOrderItem, Order, OrderItem, Product};
use crate::schema::{invoices, order_items, orders, products};

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = products)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ProductRow {
    pub id: Uuid,
    pub price: BigDecimal,
    pub stock: BigDecimal,
    pub unit_type: String,
}

impl TryFrom<ProductRow> for Product {
    type Error = DomainError;

    fn try_from(row: ProductRow) -> Result<Self, Self::Error> {
        Ok(Product {
            id: row.id,
            price: row.price,
            stock: row.stock,
            unit_type: row.unit_type.parse()?,
        })
    }
}

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = orders)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct OrderRow {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub carrier_id: Option<Uuid>,
    pub status: String,
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

impl TryFrom<OrderRow> for Order {
    type Error = DomainError;

    fn try_from(row: OrderRow) -> Result<Self, Self::Error> {
        Ok(Order {
            id: row.id,
            customer_id: row.customer_id,
            carrier_id: row.carrier_id,
            status: row.status.parse()?,
            ordered_at: row.ordered_at,
            requested_delivery_at: row.requested_delivery_at,
            delivered_at: row.delivered_at,
            cancelled_at: row.cancelled_at,
            vat_rate: row.vat_rate,
            subtotal: row.subtotal,
            discount_total: row.discount_total,
            vat_total: row.vat_total,
            total: row.total,
            coupon_id: row.coupon_id,
            loyalty_rate: row.loyalty_rate,
            note: row.note,
        })
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = orders)]
pub struct NewOrderRow {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub status: String,
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

impl NewOrderRow {
    pub fn from_header(id: Uuid, header: &NewOrder) -> Self {
        Self {
            id,
            customer_id: header.customer_id,
            status: header.status.as_str().to_string(),
            ordered_at: header.ordered_at,
            requested_delivery_at: header.requested_delivery_at,
            vat_rate: header.vat_rate.clone(),
            subtotal: header.subtotal.clone(),
            discount_total: header.discount_total.clone(),
            vat_total: header.vat_total.clone(),
            total: header.total.clone(),
            coupon_id: header.coupon_id,
            loyalty_rate: header.loyalty_rate.clone(),
            note: header.note.clone(),
        }
    }
}

#[derive(Debug, Clone, Queryable, Selectable, Identifiable, Associations)]
#[diesel(table_name = order_items)]
#[diesel(belongs_to(OrderRow, foreign_key = order_id))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct OrderItemRow {
    pub id: Uuid,
    pub order_id: Uuid,
    pub line_no: i32,
    pub product_id: Uuid,
    pub unit_type: String,
    pub quantity: BigDecimal,
    pub unit_price: BigDecimal,
    pub line_total: BigDecimal,
}

impl TryFrom<OrderItemRow> for OrderItem {
    type Error = DomainError;

    fn try_from(row: OrderItemRow) -> Result<Self, Self::Error> {
        Ok(OrderItem {
            id: row.id,
            order_id: row.order_id,
            line_no: row.line_no,
            product_id: row.product_id,
            unit_type: row.unit_type.parse()?,
            quantity: row.quantity,
            unit_price: row.unit_price,
            line_total: row.line_total,
        })
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = order_items)]
pub struct NewOrderItemRow {
    pub id: Uuid,
    pub order_id: Uuid,
    pub line_no: i32,
    pub product_id: Uuid,
    pub unit_type: String,
    pub quantity: BigDecimal,
    pub unit_price: BigDecimal,
    pub line_total: BigDecimal,
}

impl NewOrderItemRow {
    pub fn from_item(id: Uuid, item: &NewOrderItem) -> Self {
        Self {
            id,
            order_id: item.order_id,
            line_no: item.line_no,
            product_id: item.product_id,
            unit_type: item.unit_type.as_str().to_string(),
            quantity: item.quantity.clone(),
            unit_price: item.unit_price.clone(),
            line_total: item.line_total.clone(),
        }
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = invoices)]
pub struct NewInvoiceRow<'a> {
    pub order_id: Uuid,
    pub document: &'a [u8],
    pub created_at: DateTime<Utc>,
}
