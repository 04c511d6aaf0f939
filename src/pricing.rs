//! Pricing

use rust_decimal::Decimal;
use rusty_money::{
    Money,
    iso::{self, Currency},
};
use thiserror::Error;

use crate::{
    artworks::{ColorVariant, SizeOption},
    cart::CartLineItem,
};

/// Errors that can occur while pricing.
#[derive(Debug, Error, PartialEq)]
pub enum PricingError {
    /// The currency code is not one the storefront sells in.
    #[error("unsupported currency code: {0}")]
    UnknownCurrency(String),
}

/// Resolve a supported ISO 4217 currency code.
///
/// # Errors
///
/// Returns [`PricingError::UnknownCurrency`] for codes outside the supported set.
pub fn parse_currency(code: &str) -> Result<&'static Currency, PricingError> {
    match code.trim().to_ascii_uppercase().as_str() {
        "INR" => Ok(iso::INR),
        "USD" => Ok(iso::USD),
        "GBP" => Ok(iso::GBP),
        "EUR" => Ok(iso::EUR),
        other => Err(PricingError::UnknownCurrency(other.to_string())),
    }
}

/// Total price of an artwork for the given size and variant selection.
///
/// Adjustments that are absent contribute nothing. The sum saturates at the bounds of
/// [`Decimal`] rather than overflowing.
pub fn calculate_price(
    base_price: Decimal,
    size: Option<&SizeOption>,
    variant: Option<&ColorVariant>,
) -> Decimal {
    let size_adjustment = size.map_or(Decimal::ZERO, |size| size.price_adjustment);
    let variant_adjustment = variant.map_or(Decimal::ZERO, |variant| variant.price_adjustment);

    base_price
        .saturating_add(size_adjustment)
        .saturating_add(variant_adjustment)
}

/// Format an amount with the currency symbol and the currency's digit grouping.
pub fn format_price(amount: Decimal, currency: &'static Currency) -> String {
    Money::from_decimal(amount, currency).to_string()
}

/// Sum of `price x quantity` over a set of cart lines, saturating at the bounds of [`Decimal`].
pub fn total_price(items: &[CartLineItem]) -> Decimal {
    items
        .iter()
        .map(CartLineItem::line_total)
        .fold(Decimal::ZERO, Decimal::saturating_add)
}

#[cfg(test)]
mod tests {
    use crate::artworks::DEFAULT_SIZE_UNIT;

    use super::*;

    fn size(adjustment: i64) -> SizeOption {
        SizeOption {
            name: "Medium".to_string(),
            width: Decimal::from(40),
            height: Decimal::from(50),
            length: Decimal::ZERO,
            unit: DEFAULT_SIZE_UNIT.to_string(),
            price_adjustment: Decimal::from(adjustment),
        }
    }

    fn variant(adjustment: Decimal) -> ColorVariant {
        ColorVariant {
            id: "v1".to_string(),
            color_name: "Indigo".to_string(),
            color_hex: "#3f00ff".to_string(),
            sku: None,
            price_adjustment: adjustment,
            quantity: None,
            images: Vec::new(),
            is_default: false,
        }
    }

    #[test]
    fn base_price_only() {
        assert_eq!(
            calculate_price(Decimal::from(1500), None, None),
            Decimal::from(1500)
        );
    }

    #[test]
    fn adds_size_and_variant_adjustments() {
        let size = size(250);
        let variant = variant(Decimal::new(9999, 2));

        assert_eq!(
            calculate_price(Decimal::from(1000), Some(&size), Some(&variant)),
            Decimal::new(134_999, 2)
        );
    }

    #[test]
    fn zero_adjustments_leave_base_unchanged() {
        let size = size(0);
        let variant = variant(Decimal::ZERO);

        assert_eq!(
            calculate_price(Decimal::from(700), Some(&size), Some(&variant)),
            Decimal::from(700)
        );
    }

    #[test]
    fn adjustments_saturate_instead_of_overflowing() {
        let size = size(1);
        let variant = variant(Decimal::MIN);

        assert_eq!(
            calculate_price(Decimal::MAX, Some(&size), None),
            Decimal::MAX
        );
        assert_eq!(
            calculate_price(Decimal::ZERO, Some(&size), Some(&variant)),
            Decimal::MIN + Decimal::ONE
        );
    }

    #[test]
    fn formats_with_symbol_and_grouping() {
        assert_eq!(format_price(Decimal::new(123_450, 2), iso::USD), "$1,234.50");
        assert_eq!(format_price(Decimal::from(3), iso::GBP), "£3.00");
    }

    #[test]
    fn parse_currency_is_case_insensitive() -> Result<(), PricingError> {
        assert_eq!(parse_currency("inr")?, iso::INR);
        assert_eq!(parse_currency(" GBP ")?, iso::GBP);

        Ok(())
    }

    #[test]
    fn parse_currency_rejects_unknown_codes() {
        assert_eq!(
            parse_currency("XYZ"),
            Err(PricingError::UnknownCurrency("XYZ".to_string()))
        );
    }
}
