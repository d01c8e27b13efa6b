//! The shared exchange rate and the conversion rule.

use rust_decimal::Decimal;
use sarraf_shared::Currency;
use serde::{Deserialize, Serialize};

/// The singleton bidirectional exchange rate.
///
/// The two rates are stored independently and are not required to be
/// reciprocals of each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExchangeRate {
    /// Rate applied when converting dinar to dollar.
    pub dinar_to_dollar: Decimal,
    /// Rate applied when converting dollar to dinar.
    pub dollar_to_dinar: Decimal,
}

impl ExchangeRate {
    /// The bootstrap dinar-to-dollar rate.
    pub const DEFAULT_DINAR_TO_DOLLAR: Decimal = Decimal::from_parts(33, 0, 0, false, 2);
    /// The bootstrap dollar-to-dinar rate.
    pub const DEFAULT_DOLLAR_TO_DINAR: Decimal = Decimal::from_parts(3, 0, 0, false, 0);

    /// Creates a new rate pair.
    #[must_use]
    pub const fn new(dinar_to_dollar: Decimal, dollar_to_dinar: Decimal) -> Self {
        Self {
            dinar_to_dollar,
            dollar_to_dinar,
        }
    }

    /// Converts an amount out of `from` into the other currency.
    ///
    /// The directionality is the ledger's historical convention and is
    /// deliberately not symmetric:
    /// - from dinar: `amount / dinar_to_dollar`
    /// - from dollar: `amount * dollar_to_dinar`
    #[must_use]
    pub fn convert(&self, amount: Decimal, from: Currency) -> Decimal {
        match from {
            Currency::Dinar => amount / self.dinar_to_dollar,
            Currency::Dollar => amount * self.dollar_to_dinar,
        }
    }
}

impl Default for ExchangeRate {
    /// The rate synthesized when no record exists yet.
    fn default() -> Self {
        Self::new(
            Self::DEFAULT_DINAR_TO_DOLLAR,
            Self::DEFAULT_DOLLAR_TO_DINAR,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_default_rates() {
        let rate = ExchangeRate::default();
        assert_eq!(rate.dinar_to_dollar, dec!(0.33));
        assert_eq!(rate.dollar_to_dinar, dec!(3.0));
    }

    #[test]
    fn test_dinar_conversion_divides() {
        let rate = ExchangeRate::default();
        let converted = rate.convert(dec!(300), Currency::Dinar);
        assert_eq!(converted, dec!(300) / dec!(0.33));
    }

    #[test]
    fn test_dollar_conversion_multiplies() {
        let rate = ExchangeRate::default();
        assert_eq!(rate.convert(dec!(100), Currency::Dollar), dec!(300.0));
    }

    #[test]
    fn test_asymmetry_survives_reciprocal_rates() {
        // Even with numerically reciprocal rates the two directions are
        // different operations: divide one way, multiply the other.
        let rate = ExchangeRate::new(dec!(0.5), dec!(2));
        let from_dinar = rate.convert(dec!(100), Currency::Dinar);
        let from_dollar = rate.convert(dec!(100), Currency::Dollar);
        assert_eq!(from_dinar, dec!(200)); // 100 / 0.5
        assert_eq!(from_dollar, dec!(200)); // 100 * 2
        // Same result here, but through divide vs multiply; a non-reciprocal
        // pair exposes the difference.
        let skewed = ExchangeRate::new(dec!(0.4), dec!(2));
        assert_eq!(skewed.convert(dec!(100), Currency::Dinar), dec!(250));
        assert_eq!(skewed.convert(dec!(100), Currency::Dollar), dec!(200));
    }

    #[test]
    fn test_wire_shape() {
        let rate = ExchangeRate::default();
        let json = serde_json::to_value(rate).unwrap();
        assert!(json.get("dinarToDollar").is_some());
        assert!(json.get("dollarToDinar").is_some());
    }
}
