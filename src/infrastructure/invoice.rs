use std::fmt::Write;

use bigdecimal::BigDecimal;

use crate::domain::errors::DomainError;
use crate::domain::order::{Order, OrderItem};
use crate::domain::ports::InvoiceRenderer;
use crate::domain::pricing::round_money;

/// Renders invoices as fixed-width plain text.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextInvoiceRenderer;

fn percent(rate: &BigDecimal) -> BigDecimal {
    round_money(&(rate * BigDecimal::from(100)))
}

impl TextInvoiceRenderer {
    fn write_invoice(
        &self,
        out: &mut String,
        order: &Order,
        items: &[OrderItem],
    ) -> std::fmt::Result {
        writeln!(out, "INVOICE")?;
        writeln!(out, "Order:     {}", order.id)?;
        writeln!(out, "Customer:  {}", order.customer_id)?;
        writeln!(out, "Placed:    {}", order.ordered_at.format("%Y-%m-%d %H:%M UTC"))?;
        writeln!(
            out,
            "Delivery:  {}",
            order.requested_delivery_at.format("%Y-%m-%d %H:%M UTC")
        )?;
        writeln!(out, "Status:    {}", order.status)?;
        writeln!(out)?;
        writeln!(
            out,
            "{:>3}  {:<36}  {:>10} {:<3}  {:>10}  {:>10}",
            "#", "Product", "Qty", "", "Unit", "Amount"
        )?;
        for item in items {
            writeln!(
                out,
                "{:>3}  {:<36}  {:>10} {:<3}  {:>10}  {:>10}",
                item.line_no,
                item.product_id,
                item.quantity,
                item.unit_type,
                item.unit_price,
                item.line_total
            )?;
        }
        writeln!(out)?;
        writeln!(out, "{:<28}{:>12}", "Subtotal", order.subtotal)?;
        writeln!(
            out,
            "{:<28}{:>12}",
            format!("Loyalty discount ({}%)", percent(&order.loyalty_rate)),
            format!("-{}", order.discount_total)
        )?;
        writeln!(
            out,
            "{:<28}{:>12}",
            format!("VAT ({}%)", percent(&order.vat_rate)),
            order.vat_total
        )?;
        writeln!(out, "{:<28}{:>12}", "Total", order.total)?;
        Ok(())
    }
}

impl InvoiceRenderer for TextInvoiceRenderer {
    fn render(&self, order: &Order, items: &[OrderItem]) -> Result<Vec<u8>, DomainError> {
        let mut out = String::new();
        self.write_invoice(&mut out, order, items)
            .map_err(|e| DomainError::InvoiceGeneration(e.to_string()))?;
        Ok(out.into_bytes())
    }
}
