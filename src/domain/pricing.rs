//! Checkout arithmetic.
//!
//! Every monetary amount is rounded half-up to two decimals: each line total,
//! the discount and the VAT. The grand total is the exact sum of rounded
//! parts, so `total == subtotal - discount_total + vat_total` holds without a
//! further rounding step.

use bigdecimal::{BigDecimal, RoundingMode};

use super::errors::DomainError;

pub const MONEY_SCALE: i64 = 2;

/// VAT applied to the post-discount subtotal (18%).
pub fn vat_rate() -> BigDecimal {
    BigDecimal::new(18i64.into(), 2)
}

pub fn round_money(value: &BigDecimal) -> BigDecimal {
    value.with_scale_round(MONEY_SCALE, RoundingMode::HalfUp)
}

pub fn line_total(quantity: &BigDecimal, unit_price: &BigDecimal) -> BigDecimal {
    round_money(&(quantity * unit_price))
}

#[derive(Debug, Clone, PartialEq)]
pub struct Totals {
    pub subtotal: BigDecimal,
    pub discount_rate: BigDecimal,
    pub discount_total: BigDecimal,
    pub vat_rate: BigDecimal,
    pub vat_total: BigDecimal,
    pub total: BigDecimal,
}

/// Fails with `InvalidInput` when `rate` is outside `[0, 1]`.
pub fn check_discount_rate(rate: &BigDecimal) -> Result<(), DomainError> {
    if *rate < BigDecimal::from(0) || *rate > BigDecimal::from(1) {
        return Err(DomainError::InvalidInput(format!(
            "loyalty rate {} outside [0, 1]",
            rate
        )));
    }
    Ok(())
}

pub fn compute_totals<'a, I>(line_totals: I, discount_rate: &BigDecimal) -> Result<Totals, DomainError>
where
    I: IntoIterator<Item = &'a BigDecimal>,
{
    check_discount_rate(discount_rate)?;

    let subtotal: BigDecimal = line_totals.into_iter().sum();
    let subtotal = round_money(&subtotal);
    let discount_total = round_money(&(&subtotal * discount_rate));
    let discounted = &subtotal - &discount_total;
    let vat_rate = vat_rate();
    let vat_total = round_money(&(&discounted * &vat_rate));
    let total = &discounted + &vat_total;

    Ok(Totals {
        subtotal,
        discount_rate: discount_rate.clone(),
        discount_total,
        vat_rate,
        vat_total,
        total,
    })
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    fn dec(s: &str) -> BigDecimal {
        BigDecimal::from_str(s).expect("valid decimal")
    }

    #[test]
    fn two_line_cart_with_default_discount() {
        let lines = [
            line_total(&dec("3"), &dec("2.00")),
            line_total(&dec("1"), &dec("5.00")),
        ];

        let totals = compute_totals(&lines, &dec("0.05")).unwrap();

        assert_eq!(totals.subtotal, dec("11.00"));
        assert_eq!(totals.discount_total, dec("0.55"));
        assert_eq!(totals.vat_total, dec("1.88"));
        assert_eq!(totals.total, dec("12.33"));
        assert_eq!(totals.vat_rate, dec("0.18"));
    }

    #[test]
    fn individual_rate_changes_discount_and_vat() {
        let lines = [dec("11.00")];

        let totals = compute_totals(&lines, &dec("0.10")).unwrap();

        assert_eq!(totals.discount_total, dec("1.10"));
        // 9.90 * 0.18 = 1.782
        assert_eq!(totals.vat_total, dec("1.78"));
        assert_eq!(totals.total, dec("11.68"));
    }

    #[test]
    fn rounding_is_half_up() {
        assert_eq!(round_money(&dec("0.125")), dec("0.13"));
        assert_eq!(round_money(&dec("0.135")), dec("0.14"));
        assert_eq!(round_money(&dec("0.124")), dec("0.12"));
    }

    #[test]
    fn fractional_weight_line_is_rounded() {
        // 0.333 kg at 2.99 = 0.99567
        assert_eq!(line_total(&dec("0.333"), &dec("2.99")), dec("1.00"));
    }

    #[test]
    fn subtotal_equals_sum_of_line_totals() {
        let lines = [
            line_total(&dec("0.333"), &dec("2.99")),
            line_total(&dec("1.75"), &dec("4.49")),
            line_total(&dec("2"), &dec("0.99")),
        ];
        let expected: BigDecimal = lines.iter().sum();

        let totals = compute_totals(&lines, &dec("0")).unwrap();

        assert_eq!(totals.subtotal, expected);
    }

    #[test]
    fn totals_satisfy_vat_and_total_invariants() {
        let lines = [dec("7.77"), dec("13.13"), dec("0.01")];

        let totals = compute_totals(&lines, &dec("0.07")).unwrap();

        let discounted = &totals.subtotal - &totals.discount_total;
        assert_eq!(totals.vat_total, round_money(&(&discounted * vat_rate())));
        assert_eq!(
            totals.total,
            round_money(&(&discounted + &totals.vat_total))
        );
    }

    #[test]
    fn zero_rate_means_no_discount() {
        let totals = compute_totals(&[dec("10.00")], &dec("0")).unwrap();

        assert_eq!(totals.discount_total, dec("0"));
        assert_eq!(totals.total, dec("11.80"));
    }

    #[test]
    fn rate_above_one_is_rejected() {
        let result = compute_totals(&[dec("10.00")], &dec("1.5"));
        assert!(matches!(result, Err(DomainError::InvalidInput(_))));
    }

    #[test]
    fn negative_rate_is_rejected() {
        assert!(check_discount_rate(&dec("-0.01")).is_err());
        assert!(check_discount_rate(&dec("1")).is_ok());
    }
}
