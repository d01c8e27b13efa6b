//! The balance engine: applying and reversing a transaction's effect.
//!
//! Pure computation over a caller-supplied [`Safes`] pair; persistence and
//! rate loading happen in the service layer. The central property is that
//! [`Effect::reverse`] is the exact algebraic inverse of [`Effect::apply`]
//! for the same inputs.

use rust_decimal::Decimal;
use sarraf_shared::Currency;

use super::error::LedgerError;
use super::rate::ExchangeRate;
use super::types::{Safes, TransactionKind};

/// A validated balance effect: the tagged-union form of a transaction's
/// type, amount, and currencies.
///
/// Constructing an `Effect` is the single validation point for the
/// kind/currency combinations, so apply and reverse are infallible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Credit one safe.
    Deposit {
        /// Amount to add.
        amount: Decimal,
        /// Safe to credit.
        currency: Currency,
    },
    /// Debit one safe.
    Withdraw {
        /// Amount to remove.
        amount: Decimal,
        /// Safe to debit.
        currency: Currency,
    },
    /// Debit one safe and credit the other at the current rate.
    Exchange {
        /// Amount to convert, denominated in `from`.
        amount: Decimal,
        /// Safe debited.
        from: Currency,
        /// Safe credited with the converted amount.
        to: Currency,
    },
}

impl Effect {
    /// Builds a validated effect from record fields.
    ///
    /// # Errors
    ///
    /// - `NonPositiveAmount` when `amount <= 0`
    /// - `MissingToCurrency` for an exchange without a target currency
    /// - `SameCurrencyExchange` when an exchange names one currency twice
    pub fn new(
        kind: TransactionKind,
        amount: Decimal,
        from_currency: Currency,
        to_currency: Option<Currency>,
    ) -> Result<Self, LedgerError> {
        if amount <= Decimal::ZERO {
            return Err(LedgerError::NonPositiveAmount);
        }
        match kind {
            TransactionKind::Deposit => Ok(Self::Deposit {
                amount,
                currency: from_currency,
            }),
            TransactionKind::Withdraw => Ok(Self::Withdraw {
                amount,
                currency: from_currency,
            }),
            TransactionKind::Exchange => {
                let to = to_currency.ok_or(LedgerError::MissingToCurrency)?;
                if to == from_currency {
                    return Err(LedgerError::SameCurrencyExchange);
                }
                Ok(Self::Exchange {
                    amount,
                    from: from_currency,
                    to,
                })
            }
        }
    }

    /// Applies this effect to the balances.
    pub fn apply(&self, safes: &mut Safes, rate: &ExchangeRate) {
        match *self {
            Self::Deposit { amount, currency } => {
                *safes.balance_mut(currency) += amount;
            }
            Self::Withdraw { amount, currency } => {
                *safes.balance_mut(currency) -= amount;
            }
            Self::Exchange { amount, from, to } => {
                *safes.balance_mut(from) -= amount;
                *safes.balance_mut(to) += rate.convert(amount, from);
            }
        }
    }

    /// Reverses this effect on the balances: the exact inverse of
    /// [`Effect::apply`] for the same effect and rate.
    pub fn reverse(&self, safes: &mut Safes, rate: &ExchangeRate) {
        match *self {
            Self::Deposit { amount, currency } => {
                *safes.balance_mut(currency) -= amount;
            }
            Self::Withdraw { amount, currency } => {
                *safes.balance_mut(currency) += amount;
            }
            Self::Exchange { amount, from, to } => {
                *safes.balance_mut(from) += amount;
                // Recomputes the identical conversion, so the credit removed
                // here equals the credit added on apply, bit for bit.
                *safes.balance_mut(to) -= rate.convert(amount, from);
            }
        }
    }

    /// Returns the overdraw this effect would cause on the given balances,
    /// as `(currency, available)`, or `None` when funds suffice.
    ///
    /// Deposits never overdraw. Enforcement of the result is the caller's
    /// policy decision.
    #[must_use]
    pub fn overdraw(&self, safes: &Safes) -> Option<(Currency, Decimal)> {
        let (amount, currency) = match *self {
            Self::Deposit { .. } => return None,
            Self::Withdraw { amount, currency } => (amount, currency),
            Self::Exchange { amount, from, .. } => (amount, from),
        };
        let available = safes.balance(currency);
        (available < amount).then_some((currency, available))
    }

    /// The amount this effect moves, in its source currency.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        match *self {
            Self::Deposit { amount, .. }
            | Self::Withdraw { amount, .. }
            | Self::Exchange { amount, .. } => amount,
        }
    }
}
