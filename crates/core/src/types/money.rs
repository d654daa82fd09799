//! Decimal money arithmetic for cart and order totals.
//!
//! Prices are stored as `NUMERIC(10,2)` and carried as [`Decimal`] so totals
//! never pick up binary floating point error.

use rust_decimal::Decimal;

use super::Quantity;

/// Cost of one cart line: `unit_price × quantity`.
///
/// Returns `None` if the product does not fit in a [`Decimal`].
#[must_use]
pub fn line_total(unit_price: Decimal, quantity: Quantity) -> Option<Decimal> {
    unit_price.checked_mul(Decimal::from(quantity.get()))
}

/// Sum of `unit_price × quantity` over every line.
///
/// An empty iterator totals to zero. Returns `None` on overflow.
///
/// ```
/// use eco_friendly_core::{Quantity, order_total};
/// use rust_decimal::Decimal;
///
/// let lines = [
///     (Decimal::new(500, 2), Quantity::new(2).unwrap()),
///     (Decimal::new(1000, 2), Quantity::new(1).unwrap()),
/// ];
/// assert_eq!(order_total(lines), Some(Decimal::new(2000, 2)));
/// ```
#[must_use]
pub fn order_total<I>(lines: I) -> Option<Decimal>
where
    I: IntoIterator<Item = (Decimal, Quantity)>,
{
    lines
        .into_iter()
        .try_fold(Decimal::ZERO, |acc, (price, qty)| {
            acc.checked_add(line_total(price, qty)?)
        })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn qty(n: i64) -> Quantity {
        Quantity::new(n).unwrap()
    }

    #[test]
    fn test_empty_total_is_zero() {
        assert_eq!(order_total(std::iter::empty()), Some(Decimal::ZERO));
    }

    #[test]
    fn test_total_keeps_cents() {
        let total = order_total([
            (Decimal::new(199, 2), qty(3)),
            (Decimal::new(1, 2), qty(1)),
        ])
        .unwrap();
        assert_eq!(total, Decimal::new(598, 2));
        assert_eq!(total.to_string(), "5.98");
    }

    #[test]
    fn test_total_renders_two_places() {
        let total = order_total([
            (Decimal::new(500, 2), qty(2)),
            (Decimal::new(1000, 2), qty(1)),
        ])
        .unwrap();
        assert_eq!(total.to_string(), "20.00");
    }

    #[test]
    fn test_overflow_is_reported() {
        assert_eq!(line_total(Decimal::MAX, qty(2)), None);
        assert_eq!(
            order_total([(Decimal::MAX, qty(1)), (Decimal::MAX, qty(1))]),
            None
        );
    }
}
