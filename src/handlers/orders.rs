use actix_web::{web, HttpResponse};
use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::order::{CartLine, Order, OrderDetails, OrderItem};
use crate::errors::AppError;
use crate::AppOrderService;

// ── Request / response DTOs ──────────────────────────────────────────────────

#[derive(Debug, Deserialize, ToSchema)]
pub struct CartLineRequest {
    pub product_id: Uuid,
    /// Decimal quantity as a string, e.g. "0.750" for KG or "3" for PCS
    pub quantity: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct PlaceOrderRequest {
    pub customer_id: Uuid,
    pub lines: Vec<CartLineRequest>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderItemResponse {
    pub id: Uuid,
    pub line_no: i32,
    pub product_id: Uuid,
    pub unit_type: String,
    pub quantity: String,
    pub unit_price: String,
    pub line_total: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderResponse {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub carrier_id: Option<Uuid>,
    pub status: String,
    pub ordered_at: String,
    pub requested_delivery_at: String,
    pub delivered_at: Option<String>,
    pub cancelled_at: Option<String>,
    pub vat_rate: String,
    pub subtotal: String,
    pub discount_total: String,
    pub vat_total: String,
    pub total: String,
    pub coupon_id: Option<Uuid>,
    pub loyalty_rate: String,
    pub note: String,
    pub items: Vec<OrderItemResponse>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PlaceOrderResponse {
    #[serde(flatten)]
    pub order: OrderResponse,
    /// Non-fatal problems, e.g. the invoice could not be generated
    pub warnings: Vec<String>,
}

impl From<OrderItem> for OrderItemResponse {
    fn from(item: OrderItem) -> Self {
        Self {
            id: item.id,
            line_no: item.line_no,
            product_id: item.product_id,
            unit_type: item.unit_type.to_string(),
            quantity: item.quantity.to_string(),
            unit_price: item.unit_price.to_string(),
            line_total: item.line_total.to_string(),
        }
    }
}

impl From<Order> for OrderResponse {
    fn from(o: Order) -> Self {
        Self {
            id: o.id,
            customer_id: o.customer_id,
            carrier_id: o.carrier_id,
            status: o.status.to_string(),
            ordered_at: o.ordered_at.to_rfc3339(),
            requested_delivery_at: o.requested_delivery_at.to_rfc3339(),
            delivered_at: o.delivered_at.map(|t| t.to_rfc3339()),
            cancelled_at: o.cancelled_at.map(|t| t.to_rfc3339()),
            vat_rate: o.vat_rate.to_string(),
            subtotal: o.subtotal.to_string(),
            discount_total: o.discount_total.to_string(),
            vat_total: o.vat_total.to_string(),
            total: o.total.to_string(),
            coupon_id: o.coupon_id,
            loyalty_rate: o.loyalty_rate.to_string(),
            note: o.note,
            items: vec![],
        }
    }
}

impl From<OrderDetails> for OrderResponse {
    fn from(details: OrderDetails) -> Self {
        Self {
            items: details.items.into_iter().map(Into::into).collect(),
            ..details.order.into()
        }
    }
}

fn parse_cart(lines: &[CartLineRequest]) -> Result<Vec<CartLine>, AppError> {
    lines
        .iter()
        .map(|l| {
            let quantity = BigDecimal::from_str(&l.quantity).map_err(|e| {
                AppError::BadRequest(format!("Invalid quantity '{}': {}", l.quantity, e))
            })?;
            Ok(CartLine {
                product_id: l.product_id,
                quantity,
            })
        })
        .collect()
}

// ── Pagination ───────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize, ToSchema)]
pub struct ListOrdersParams {
    /// Only orders of this customer when set.
    pub customer_id: Option<Uuid>,
    /// Page number (1-based). Defaults to 1.
    #[serde(default = "default_page")]
    pub page: i64,
    /// Number of items per page. Defaults to 20, maximum 100.
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_page() -> i64 {
    1
}

fn default_limit() -> i64 {
    20
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ListOrdersResponse {
    pub items: Vec<OrderResponse>,
    pub total: i64,
    pub page: i64,
    pub limit: i64,
}

// ── Handlers ─────────────────────────────────────────────────────────────────

/// POST /orders
///
/// Checks out a cart. Stock deduction and the order/item inserts commit
/// together; a failed invoice shows up in `warnings` but the order stands.
#[utoipa::path(
    post,
    path = "/orders",
    request_body = PlaceOrderRequest,
    responses(
        (status = 201, description = "Order placed", body = PlaceOrderResponse),
        (status = 400, description = "Empty cart or invalid quantity"),
        (status = 404, description = "Unknown product"),
        (status = 409, description = "Insufficient stock"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "orders"
)]
pub async fn place_order(
    service: web::Data<AppOrderService>,
    body: web::Json<PlaceOrderRequest>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    let lines = parse_cart(&body.lines)?;
    let customer_id = body.customer_id;

    let placed = web::block(move || service.place_order(customer_id, &lines)).await??;

    let warnings = placed.invoice_error.iter().map(|e| e.to_string()).collect();
    Ok(HttpResponse::Created().json(PlaceOrderResponse {
        order: placed.details.into(),
        warnings,
    }))
}

/// GET /orders/{id}
///
/// Returns the order together with its items.
#[utoipa::path(
    get,
    path = "/orders/{id}",
    params(
        ("id" = Uuid, Path, description = "Order UUID"),
    ),
    responses(
        (status = 200, description = "Order found", body = OrderResponse),
        (status = 404, description = "Order not found"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "orders"
)]
pub async fn get_order(
    service: web::Data<AppOrderService>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let order_id = path.into_inner();

    let details = web::block(move || service.get_order(order_id)).await??;

    match details {
        Some(details) => Ok(HttpResponse::Ok().json(OrderResponse::from(details))),
        None => Err(AppError::NotFound("Order not found".to_string())),
    }
}

/// GET /orders
///
/// Returns a paginated list of orders (without their items), newest first.
#[utoipa::path(
    get,
    path = "/orders",
    params(
        ("customer_id" = Option<Uuid>, Query, description = "Filter by customer"),
        ("page" = Option<i64>, Query, description = "Page number (1-based, default 1)"),
        ("limit" = Option<i64>, Query, description = "Items per page (default 20, max 100)"),
    ),
    responses(
        (status = 200, description = "Paginated list of orders", body = ListOrdersResponse),
        (status = 400, description = "Page out of range"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "orders"
)]
pub async fn list_orders(
    service: web::Data<AppOrderService>,
    query: web::Query<ListOrdersParams>,
) -> Result<HttpResponse, AppError> {
    let params = query.into_inner();
    let page = params.page.max(1);
    let limit = params.limit.clamp(1, 100);
    let customer_id = params.customer_id;

    let result = web::block(move || service.list_orders(customer_id, page, limit)).await??;

    Ok(HttpResponse::Ok().json(ListOrdersResponse {
        items: result.items.into_iter().map(Into::into).collect(),
        total: result.total,
        page,
        limit,
    }))
}

/// GET /orders/{id}/invoice
#[utoipa::path(
    get,
    path = "/orders/{id}/invoice",
    params(
        ("id" = Uuid, Path, description = "Order UUID"),
    ),
    responses(
        (status = 200, description = "Invoice document", body = String, content_type = "text/plain"),
        (status = 404, description = "No invoice for this order"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "orders"
)]
pub async fn get_invoice(
    service: web::Data<AppOrderService>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let order_id = path.into_inner();

    let document = web::block(move || service.get_invoice(order_id)).await??;

    match document {
        Some(bytes) => Ok(HttpResponse::Ok()
            .content_type("text/plain; charset=utf-8")
            .body(bytes)),
        None => Err(AppError::NotFound("Invoice not found".to_string())),
    }
}

/// POST /orders/{id}/invoice
///
/// Renders and stores the invoice again, e.g. after a failed first attempt.
#[utoipa::path(
    post,
    path = "/orders/{id}/invoice",
    params(
        ("id" = Uuid, Path, description = "Order UUID"),
    ),
    responses(
        (status = 204, description = "Invoice re-issued"),
        (status = 404, description = "Order not found"),
        (status = 500, description = "Invoice generation failed"),
    ),
    tag = "orders"
)]
pub async fn reissue_invoice(
    service: web::Data<AppOrderService>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let order_id = path.into_inner();

    web::block(move || service.reissue_invoice(order_id)).await??;

    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_cart_accepts_fractional_quantities() {
        let product_id = Uuid::new_v4();
        let lines = parse_cart(&[CartLineRequest {
            product_id,
            quantity: "0.750".to_string(),
        }])
        .unwrap();

        assert_eq!(lines[0].product_id, product_id);
        assert_eq!(lines[0].quantity, BigDecimal::from_str("0.75").unwrap());
    }

    #[test]
    fn parse_cart_rejects_garbage_quantity() {
        let err = parse_cart(&[CartLineRequest {
            product_id: Uuid::new_v4(),
            quantity: "three".to_string(),
        }])
        .unwrap_err();

        assert!(matches!(err, AppError::BadRequest(msg) if msg.contains("three")));
    }
}
