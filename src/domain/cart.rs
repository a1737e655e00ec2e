use serde::{Deserialize, Serialize};

use super::product::Product;

/// Smallest quantity a cart line may carry.
pub const MIN_QUANTITY: u32 = 1;
/// Largest quantity a cart line may carry. Stock is deliberately not
/// consulted here; the cap applies even when fewer units are available.
pub const MAX_QUANTITY: u32 = 10;

/// Tax applied to the cart subtotal at display time.
pub const TAX_RATE: f64 = 0.18;

/// Clamps a requested quantity into `[MIN_QUANTITY, MAX_QUANTITY]` so an
/// out-of-range value is never submitted to the backend.
pub fn clamp_quantity(requested: u32) -> u32 {
    requested.clamp(MIN_QUANTITY, MAX_QUANTITY)
}

/// One quantity+size selection of a product held prior to order placement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    pub id: u64,
    pub product: Product,
    /// Unit price snapshotted at add-to-cart time.
    #[serde(rename = "price")]
    pub unit_price: f64,
    pub quantity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
}

impl CartLine {
    pub fn line_total(&self) -> f64 {
        self.unit_price * f64::from(self.quantity)
    }
}

/// Totals derived from the in-memory line set; never stored.
///
/// `tax` and `total` are each rounded independently from the raw subtotal,
/// exactly as the backend-of-record UI computes them. The two can disagree
/// with `subtotal + tax` by up to one currency unit; see
/// [`CartTotals::rounding_divergence`]. Changing this to a single
/// authoritative rounding is a contract change and is deliberately not done
/// here.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CartTotals {
    pub subtotal: f64,
    pub tax: f64,
    pub total: f64,
}

impl CartTotals {
    pub fn from_lines(lines: &[CartLine]) -> Self {
        let subtotal: f64 = lines.iter().map(CartLine::line_total).sum();
        Self {
            subtotal,
            tax: (subtotal * TAX_RATE).round(),
            total: (subtotal * (1.0 + TAX_RATE)).round(),
        }
    }

    /// How far `subtotal + tax` sits from the displayed `total`.
    /// Zero when the two independent roundings happen to agree.
    pub fn rounding_divergence(&self) -> f64 {
        self.total - (self.subtotal + self.tax)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::product::Product;

    fn line(id: u64, unit_price: f64, quantity: u32) -> CartLine {
        CartLine {
            id,
            product: Product {
                id,
                name: format!("product {id}"),
                price: unit_price,
                description: String::new(),
                image_path: String::new(),
                sizes: None,
                stock: None,
                average_rating: None,
                review_count: None,
                vendor: None,
            },
            unit_price,
            quantity,
            size: None,
        }
    }

    #[test]
    fn clamp_bounds_quantity_to_one_through_ten() {
        assert_eq!(clamp_quantity(0), 1);
        assert_eq!(clamp_quantity(1), 1);
        assert_eq!(clamp_quantity(7), 7);
        assert_eq!(clamp_quantity(10), 10);
        assert_eq!(clamp_quantity(23), 10);
    }

    #[test]
    fn totals_follow_the_display_formulas() {
        let totals = CartTotals::from_lines(&[line(1, 500.0, 2), line(2, 120.0, 1)]);
        assert_eq!(totals.subtotal, 1120.0);
        assert_eq!(totals.tax, (1120.0_f64 * 0.18).round());
        assert_eq!(totals.total, (1120.0_f64 * 1.18).round());
        assert_eq!(totals.rounding_divergence(), 0.0);
    }

    #[test]
    fn total_is_always_the_single_rounding_of_subtotal_times_rate() {
        for price in [1.0, 3.0, 99.5, 549.5, 1234.0] {
            let totals = CartTotals::from_lines(&[line(1, price, 1)]);
            assert_eq!(totals.total, (totals.subtotal * 1.18).round());
        }
    }

    // Pins the known quirk: tax and total are rounded independently, so a
    // fractional subtotal can make `subtotal + tax` disagree with `total`.
    // If this test starts failing, the rounding contract changed.
    #[test]
    fn independent_rounding_can_diverge_on_fractional_subtotals() {
        let totals = CartTotals::from_lines(&[line(1, 99.5, 1)]);
        assert_eq!(totals.subtotal, 99.5);
        assert_eq!(totals.tax, 18.0); // round(17.91)
        assert_eq!(totals.total, 117.0); // round(117.41)
        assert_eq!(totals.rounding_divergence(), -0.5);
    }

    #[test]
    fn empty_cart_totals_are_zero() {
        let totals = CartTotals::from_lines(&[]);
        assert_eq!(totals.subtotal, 0.0);
        assert_eq!(totals.tax, 0.0);
        assert_eq!(totals.total, 0.0);
    }
}
