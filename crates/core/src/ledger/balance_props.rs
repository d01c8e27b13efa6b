//! Property-based tests for the balance engine.
//!
//! The central property: applying then reversing any valid effect on any
//! starting balance pair returns the exact original pair.

use proptest::prelude::*;
use rust_decimal::Decimal;
use sarraf_shared::Currency;

use super::balance::Effect;
use super::rate::ExchangeRate;
use super::types::{Safes, TransactionKind};

/// Strategy for positive amounts (0.01 to 10,000,000.00).
fn positive_amount() -> impl Strategy<Value = Decimal> {
    (1i64..1_000_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy for signed starting balances.
fn starting_balance() -> impl Strategy<Value = Decimal> {
    (-1_000_000_000i64..1_000_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy for positive rates (0.0001 to 10,000.0000).
fn positive_rate() -> impl Strategy<Value = Decimal> {
    (1i64..100_000_000i64).prop_map(|v| Decimal::new(v, 4))
}

fn currency() -> impl Strategy<Value = Currency> {
    prop_oneof![Just(Currency::Dinar), Just(Currency::Dollar)]
}

fn kind() -> impl Strategy<Value = TransactionKind> {
    prop_oneof![
        Just(TransactionKind::Deposit),
        Just(TransactionKind::Withdraw),
        Just(TransactionKind::Exchange),
    ]
}

proptest! {
    #[test]
    fn prop_apply_then_reverse_is_identity(
        kind in kind(),
        amount in positive_amount(),
        from in currency(),
        dinar in starting_balance(),
        dollar in starting_balance(),
        dinar_to_dollar in positive_rate(),
        dollar_to_dinar in positive_rate(),
    ) {
        let rate = ExchangeRate::new(dinar_to_dollar, dollar_to_dinar);
        let to = (kind == TransactionKind::Exchange).then(|| from.other());
        let effect = Effect::new(kind, amount, from, to).unwrap();

        let start = Safes::new(dinar, dollar);
        let mut safes = start;
        effect.apply(&mut safes, &rate);
        effect.reverse(&mut safes, &rate);

        prop_assert_eq!(safes, start);
    }

    #[test]
    fn prop_exchange_conserves_nothing_but_roundtrip(
        amount in positive_amount(),
        from in currency(),
        dinar in starting_balance(),
        dollar in starting_balance(),
        dinar_to_dollar in positive_rate(),
        dollar_to_dinar in positive_rate(),
    ) {
        // An exchange debits exactly `amount` from the source safe and
        // credits exactly the converted amount on the target safe.
        let rate = ExchangeRate::new(dinar_to_dollar, dollar_to_dinar);
        let effect = Effect::new(
            TransactionKind::Exchange,
            amount,
            from,
            Some(from.other()),
        ).unwrap();

        let start = Safes::new(dinar, dollar);
        let mut safes = start;
        effect.apply(&mut safes, &rate);

        prop_assert_eq!(safes.balance(from), start.balance(from) - amount);
        prop_assert_eq!(
            safes.balance(from.other()),
            start.balance(from.other()) + rate.convert(amount, from)
        );
    }

    #[test]
    fn prop_overdraw_agrees_with_apply(
        kind in kind(),
        amount in positive_amount(),
        from in currency(),
        dinar in starting_balance(),
        dollar in starting_balance(),
    ) {
        // When overdraw() clears an effect, applying it never drives the
        // checked safe negative.
        let rate = ExchangeRate::default();
        let to = (kind == TransactionKind::Exchange).then(|| from.other());
        let effect = Effect::new(kind, amount, from, to).unwrap();

        let mut safes = Safes::new(dinar, dollar);
        if effect.overdraw(&safes).is_none() && kind != TransactionKind::Deposit {
            let before = safes.balance(from);
            prop_assume!(before >= Decimal::ZERO);
            effect.apply(&mut safes, &rate);
            prop_assert!(safes.balance(from) >= Decimal::ZERO);
        }
    }
}
