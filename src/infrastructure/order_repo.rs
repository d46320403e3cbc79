use bigdecimal::BigDecimal;
use chrono::Utc;
use diesel::pg::{Pg, PgConnection};
use diesel::prelude::*;
use uuid::Uuid;

use crate::db::DbPool;
use crate::domain::errors::DomainError;
use crate::domain::order::{ListResult, NewOrder, NewOrderItem, Order, OrderDetails, OrderItem, Product};
use crate::domain::ports::{Catalog, CheckoutStore, CheckoutTx, LoyaltyRates, OrderWriter};
use crate::schema::{invoices, loyalty_rates, loyalty_settings, order_items, orders, products};

use super::models::{
    NewInvoiceRow, NewOrderItemRow, NewOrderRow, OrderItemRow, OrderRow, ProductRow,
};

/// Primary key of the single `loyalty_settings` row.
const LOYALTY_SETTINGS_ID: i32 = 1;

// ── Error conversions (infrastructure concern only) ──────────────────────────

impl From<diesel::result::Error> for DomainError {
    fn from(e: diesel::result::Error) -> Self {
        DomainError::Persistence(e.to_string())
    }
}

impl From<r2d2::Error> for DomainError {
    fn from(e: r2d2::Error) -> Self {
        DomainError::Persistence(e.to_string())
    }
}

// ── Transaction handle ───────────────────────────────────────────────────────

/// Port implementation bound to one open Postgres transaction.
pub struct PgCheckoutTx<'c> {
    conn: &'c mut PgConnection,
}

impl Catalog for PgCheckoutTx<'_> {
    fn get_product(&mut self, product_id: Uuid) -> Result<Option<Product>, DomainError> {
        products::table
            .find(product_id)
            .select(ProductRow::as_select())
            .first(self.conn)
            .optional()?
            .map(Product::try_from)
            .transpose()
    }

    fn deduct_stock(&mut self, product_id: Uuid, quantity: &BigDecimal) -> Result<bool, DomainError> {
        // Compare-and-decrement in one statement; a concurrent checkout
        // blocks on the row lock and re-evaluates `stock >= quantity`.
        let updated = diesel::update(
            products::table
                .filter(products::id.eq(product_id))
                .filter(products::stock.ge(quantity.clone())),
        )
        .set((
            products::stock.eq(products::stock - quantity.clone()),
            products::updated_at.eq(Utc::now()),
        ))
        .execute(self.conn)?;
        Ok(updated == 1)
    }
}

impl LoyaltyRates for PgCheckoutTx<'_> {
    fn individual_rate(&mut self, customer_id: Uuid) -> Result<Option<BigDecimal>, DomainError> {
        Ok(loyalty_rates::table
            .find(customer_id)
            .select(loyalty_rates::rate)
            .first::<BigDecimal>(self.conn)
            .optional()?)
    }

    fn default_rate(&mut self) -> Result<BigDecimal, DomainError> {
        let rate = loyalty_settings::table
            .find(LOYALTY_SETTINGS_ID)
            .select(loyalty_settings::default_rate)
            .first::<BigDecimal>(self.conn)
            .optional()?;
        Ok(rate.unwrap_or_else(|| BigDecimal::from(0)))
    }
}

impl OrderWriter for PgCheckoutTx<'_> {
    fn insert_order(&mut self, header: &NewOrder) -> Result<Uuid, DomainError> {
        let order_id = Uuid::new_v4();
        diesel::insert_into(orders::table)
            .values(&NewOrderRow::from_header(order_id, header))
            .execute(self.conn)?;
        Ok(order_id)
    }

    fn insert_order_item(&mut self, item: &NewOrderItem) -> Result<OrderItem, DomainError> {
        let row = diesel::insert_into(order_items::table)
            .values(&NewOrderItemRow::from_item(Uuid::new_v4(), item))
            .returning(OrderItemRow::as_returning())
            .get_result(self.conn)?;
        OrderItem::try_from(row)
    }
}

// ── Store ────────────────────────────────────────────────────────────────────

pub struct DieselCheckoutStore {
    pool: DbPool,
}

impl DieselCheckoutStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn orders_for(customer_id: Option<Uuid>) -> orders::BoxedQuery<'static, Pg> {
    let query = orders::table.into_boxed();
    match customer_id {
        Some(id) => query.filter(orders::customer_id.eq(id)),
        None => query,
    }
}

impl CheckoutStore for DieselCheckoutStore {
    fn in_transaction<T, F>(&self, f: F) -> Result<T, DomainError>
    where
        F: FnOnce(&mut dyn CheckoutTx) -> Result<T, DomainError>,
    {
        let mut pooled = self.pool.get()?;
        let conn: &mut PgConnection = &mut pooled;

        conn.transaction::<_, DomainError, _>(|conn| {
            let mut tx = PgCheckoutTx { conn };
            f(&mut tx)
        })
    }

    fn find_order(&self, order_id: Uuid) -> Result<Option<OrderDetails>, DomainError> {
        let mut conn = self.pool.get()?;

        let order = orders::table
            .find(order_id)
            .select(OrderRow::as_select())
            .first(&mut conn)
            .optional()?;

        let Some(order) = order else {
            return Ok(None);
        };

        let items = OrderItemRow::belonging_to(&order)
            .select(OrderItemRow::as_select())
            .order(order_items::line_no.asc())
            .load(&mut conn)?
            .into_iter()
            .map(OrderItem::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Some(OrderDetails {
            order: Order::try_from(order)?,
            items,
        }))
    }

    fn list_orders(
        &self,
        customer_id: Option<Uuid>,
        page: i64,
        limit: i64,
    ) -> Result<ListResult, DomainError> {
        let offset = page_offset(page, limit)?;
        let mut conn = self.pool.get()?;

        conn.transaction::<_, DomainError, _>(|conn| {
            let total: i64 = orders_for(customer_id).count().get_result(conn)?;

            let rows = orders_for(customer_id)
                .select(OrderRow::as_select())
                .order(orders::ordered_at.desc())
                .limit(limit)
                .offset(offset)
                .load(conn)?;

            Ok(ListResult {
                items: rows
                    .into_iter()
                    .map(Order::try_from)
                    .collect::<Result<Vec<_>, _>>()?,
                total,
            })
        })
    }

    fn save_invoice(&self, order_id: Uuid, document: &[u8]) -> Result<(), DomainError> {
        let mut conn = self.pool.get()?;
        let created_at = Utc::now();

        diesel::insert_into(invoices::table)
            .values(&NewInvoiceRow {
                order_id,
                document,
                created_at,
            })
            .on_conflict(invoices::order_id)
            .do_update()
            .set((
                invoices::document.eq(document),
                invoices::created_at.eq(created_at),
            ))
            .execute(&mut conn)?;
        Ok(())
    }

    fn find_invoice(&self, order_id: Uuid) -> Result<Option<Vec<u8>>, DomainError> {
        let mut conn = self.pool.get()?;

        Ok(invoices::table
            .find(order_id)
            .select(invoices::document)
            .first::<Vec<u8>>(&mut conn)
            .optional()?)
    }
}

fn page_offset(page: i64, limit: i64) -> Result<i64, DomainError> {
    (page.max(1) - 1)
        .checked_mul(limit.max(0))
        .ok_or_else(|| DomainError::InvalidInput(format!("page {} is out of range", page)))
}
