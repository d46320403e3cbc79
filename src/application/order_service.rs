use bigdecimal::BigDecimal;
use chrono::{Duration, Utc};
use uuid::Uuid;

use crate::domain::errors::DomainError;
use crate::domain::order::{
    CartLine, ListResult, NewOrder, NewOrderItem, OrderDetails, OrderStatus, PlacedOrder, UnitType,
};
use crate::domain::ports::{CheckoutStore, CheckoutTx, InvoiceRenderer};
use crate::domain::pricing;

/// Days between placing an order and its default requested delivery.
const DEFAULT_DELIVERY_LEAD_DAYS: i64 = 1;

/// Quantities are stored as `NUMERIC(12, 3)`.
const QUANTITY_SCALE: i64 = 3;
const QUANTITY_INTEGER_DIGITS: i64 = 9;

pub struct OrderService<S, R> {
    store: S,
    renderer: R,
}

impl<S: CheckoutStore, R: InvoiceRenderer> OrderService<S, R> {
    pub fn new(store: S, renderer: R) -> Self {
        Self { store, renderer }
    }

    /// Converts a cart into a placed order.
    ///
    /// Stock deduction, pricing and the order/item inserts share one
    /// transaction. The invoice is produced after commit; its failure is
    /// returned in `PlacedOrder::invoice_error` and never undoes the order.
    pub fn place_order(
        &self,
        customer_id: Uuid,
        lines: &[CartLine],
    ) -> Result<PlacedOrder, DomainError> {
        validate_cart(lines)?;

        let details = self
            .store
            .in_transaction(|tx| checkout(tx, customer_id, lines))
            .inspect_err(|e| log::warn!("Checkout for customer {} rejected: {}", customer_id, e))?;

        log::info!(
            "Placed order {} for customer {} ({} items, total {})",
            details.order.id,
            customer_id,
            details.items.len(),
            details.order.total
        );

        let invoice_error = match self.issue_invoice(&details) {
            Ok(()) => None,
            Err(e) => {
                log::warn!("Order {} placed without invoice: {}", details.order.id, e);
                Some(e)
            }
        };

        Ok(PlacedOrder {
            details,
            invoice_error,
        })
    }

    pub fn get_order(&self, order_id: Uuid) -> Result<Option<OrderDetails>, DomainError> {
        self.store.find_order(order_id)
    }

    pub fn list_orders(
        &self,
        customer_id: Option<Uuid>,
        page: i64,
        limit: i64,
    ) -> Result<ListResult, DomainError> {
        self.store.list_orders(customer_id, page, limit)
    }

    pub fn get_invoice(&self, order_id: Uuid) -> Result<Option<Vec<u8>>, DomainError> {
        self.store.find_invoice(order_id)
    }

    /// Renders and stores the invoice again for an existing order.
    pub fn reissue_invoice(&self, order_id: Uuid) -> Result<(), DomainError> {
        let details = self.store.find_order(order_id)?.ok_or(DomainError::NotFound)?;
        self.issue_invoice(&details)
    }

    fn issue_invoice(&self, details: &OrderDetails) -> Result<(), DomainError> {
        let document = self
            .renderer
            .render(&details.order, &details.items)
            .map_err(into_invoice_error)?;
        self.store
            .save_invoice(details.order.id, &document)
            .map_err(into_invoice_error)
    }
}

fn into_invoice_error(e: DomainError) -> DomainError {
    match e {
        DomainError::InvoiceGeneration(_) => e,
        other => DomainError::InvoiceGeneration(other.to_string()),
    }
}

fn validate_cart(lines: &[CartLine]) -> Result<(), DomainError> {
    if lines.is_empty() {
        return Err(DomainError::InvalidCart("cart is empty".to_string()));
    }
    let zero = BigDecimal::from(0);
    if let Some(line) = lines.iter().find(|l| l.quantity <= zero) {
        return Err(DomainError::InvalidCart(format!(
            "quantity {} for product {} must be positive",
            line.quantity, line.product_id
        )));
    }
    if let Some(line) = lines.iter().find(|l| !fits_quantity_column(&l.quantity)) {
        return Err(DomainError::InvalidCart(format!(
            "quantity {} for product {} needs at most {} decimals and {} integer digits",
            line.quantity, line.product_id, QUANTITY_SCALE, QUANTITY_INTEGER_DIGITS
        )));
    }
    Ok(())
}

// A finer quantity would be rounded by the column after `stock >= q` passed.
fn fits_quantity_column(quantity: &BigDecimal) -> bool {
    let (_, scale) = quantity.normalized().as_bigint_and_exponent();
    scale <= QUANTITY_SCALE && *quantity < BigDecimal::new(1i64.into(), -QUANTITY_INTEGER_DIGITS)
}

struct PricedLine {
    line: CartLine,
    unit_type: UnitType,
    unit_price: BigDecimal,
    line_total: BigDecimal,
}

fn checkout(
    tx: &mut dyn CheckoutTx,
    customer_id: Uuid,
    lines: &[CartLine],
) -> Result<OrderDetails, DomainError> {
    // 1. Reserve stock. The conditional decrement locks the product row, so
    //    the price read right after it belongs to the same snapshot.
    let mut priced = Vec::with_capacity(lines.len());
    for line in lines {
        if !tx.deduct_stock(line.product_id, &line.quantity)? {
            return Err(match tx.get_product(line.product_id)? {
                Some(_) => DomainError::InsufficientStock(line.product_id),
                None => DomainError::ProductNotFound(line.product_id),
            });
        }
        log::debug!("Deducted {} of product {}", line.quantity, line.product_id);

        let product = tx
            .get_product(line.product_id)?
            .ok_or(DomainError::ProductNotFound(line.product_id))?;
        priced.push(PricedLine {
            line_total: pricing::line_total(&line.quantity, &product.price),
            unit_type: product.unit_type,
            unit_price: product.price,
            line: line.clone(),
        });
    }

    // 2. Price the cart.
    let discount_rate = match tx.individual_rate(customer_id)? {
        Some(rate) => rate,
        None => tx.default_rate()?,
    };
    let totals = pricing::compute_totals(priced.iter().map(|p| &p.line_total), &discount_rate)?;

    // 3. Order header.
    let now = Utc::now();
    let header = NewOrder {
        customer_id,
        status: OrderStatus::Placed,
        ordered_at: now,
        requested_delivery_at: now + Duration::days(DEFAULT_DELIVERY_LEAD_DAYS),
        vat_rate: totals.vat_rate,
        subtotal: totals.subtotal,
        discount_total: totals.discount_total,
        vat_total: totals.vat_total,
        total: totals.total,
        coupon_id: None,
        loyalty_rate: totals.discount_rate,
        note: String::new(),
    };
    let order_id = tx.insert_order(&header)?;

    // 4. Line items.
    let mut items = Vec::with_capacity(priced.len());
    for (p, line_no) in priced.into_iter().zip(1..) {
        items.push(tx.insert_order_item(&NewOrderItem {
            order_id,
            line_no,
            product_id: p.line.product_id,
            unit_type: p.unit_type,
            quantity: p.line.quantity,
            unit_price: p.unit_price,
            line_total: p.line_total,
        })?);
    }

    Ok(OrderDetails {
        order: header.into_order(order_id),
        items,
    })
}
