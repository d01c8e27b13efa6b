//! Domain types for customers and transactions.
//!
//! Wire shapes follow the document-store records the UI already consumes:
//! camelCase field names, lowercase currency tags, and a `safes` object
//! holding exactly one balance per currency.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sarraf_shared::{Currency, CustomerId, TransactionId};
use serde::{Deserialize, Serialize};

/// The recordable transaction types.
///
/// A transfer is durably represented as a withdraw leg plus a deposit leg,
/// so no fourth variant exists in the record model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Add funds to one safe.
    Deposit,
    /// Remove funds from one safe.
    Withdraw,
    /// Move funds between the two safes at the current rate.
    Exchange,
}

impl std::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Deposit => f.write_str("deposit"),
            Self::Withdraw => f.write_str("withdraw"),
            Self::Exchange => f.write_str("exchange"),
        }
    }
}

impl std::str::FromStr for TransactionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "deposit" => Ok(Self::Deposit),
            "withdraw" => Ok(Self::Withdraw),
            "exchange" => Ok(Self::Exchange),
            other => Err(other.to_string()),
        }
    }
}

/// One currency safe: a tagged balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Safe {
    /// Currency tag; always matches the key this safe sits under.
    pub currency: Currency,
    /// Signed balance. May go negative on the unchecked paths.
    pub balance: Decimal,
}

/// A customer's two safes, one per supported currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "SafesWire")]
pub struct Safes {
    /// The dinar safe.
    pub dinar: Safe,
    /// The dollar safe.
    pub dollar: Safe,
}

/// Deserialization helper that forces the currency tags, so an imported
/// document can never carry a mismatched tag.
#[derive(Deserialize)]
struct SafesWire {
    dinar: SafeBalanceWire,
    dollar: SafeBalanceWire,
}

#[derive(Deserialize)]
struct SafeBalanceWire {
    #[serde(default)]
    balance: Decimal,
}

impl From<SafesWire> for Safes {
    fn from(wire: SafesWire) -> Self {
        Self::new(wire.dinar.balance, wire.dollar.balance)
    }
}

impl Safes {
    /// Creates a safe pair with the given opening balances.
    #[must_use]
    pub const fn new(dinar: Decimal, dollar: Decimal) -> Self {
        Self {
            dinar: Safe {
                currency: Currency::Dinar,
                balance: dinar,
            },
            dollar: Safe {
                currency: Currency::Dollar,
                balance: dollar,
            },
        }
    }

    /// Creates an empty safe pair.
    #[must_use]
    pub const fn zero() -> Self {
        Self::new(Decimal::ZERO, Decimal::ZERO)
    }

    /// Returns the balance held in the given currency.
    #[must_use]
    pub const fn balance(&self, currency: Currency) -> Decimal {
        match currency {
            Currency::Dinar => self.dinar.balance,
            Currency::Dollar => self.dollar.balance,
        }
    }

    /// Returns a mutable reference to the balance in the given currency.
    pub fn balance_mut(&mut self, currency: Currency) -> &mut Decimal {
        match currency {
            Currency::Dinar => &mut self.dinar.balance,
            Currency::Dollar => &mut self.dollar.balance,
        }
    }
}

/// A customer holding two currency safes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    /// Unique identifier.
    pub id: CustomerId,
    /// Display name.
    pub name: String,
    /// Contact email.
    #[serde(default)]
    pub email: Option<String>,
    /// Contact phone.
    #[serde(default)]
    pub phone: Option<String>,
    /// Postal address.
    #[serde(default)]
    pub address: Option<String>,
    /// Avatar image reference.
    #[serde(default)]
    pub avatar: Option<String>,
    /// The two currency safes.
    pub safes: Safes,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Customer {
    /// Creates a new customer record from registration input.
    #[must_use]
    pub fn new(input: NewCustomer) -> Self {
        let now = Utc::now();
        Self {
            id: CustomerId::new(),
            name: input.name,
            email: input.email,
            phone: input.phone,
            address: input.address,
            avatar: input.avatar,
            safes: Safes::new(input.dinar_balance, input.dollar_balance),
            created_at: now,
            updated_at: now,
        }
    }
}

/// Input for registering a customer.
#[derive(Debug, Clone, Default)]
pub struct NewCustomer {
    /// Display name.
    pub name: String,
    /// Contact email.
    pub email: Option<String>,
    /// Contact phone.
    pub phone: Option<String>,
    /// Postal address.
    pub address: Option<String>,
    /// Avatar image reference.
    pub avatar: Option<String>,
    /// Opening dinar balance.
    pub dinar_balance: Decimal,
    /// Opening dollar balance.
    pub dollar_balance: Decimal,
}

/// Profile fields editable on an existing customer. Balances are never
/// edited through this path.
#[derive(Debug, Clone, Default)]
pub struct CustomerPatch {
    /// Display name.
    pub name: Option<String>,
    /// Contact email.
    pub email: Option<String>,
    /// Contact phone.
    pub phone: Option<String>,
    /// Postal address.
    pub address: Option<String>,
    /// Avatar image reference.
    pub avatar: Option<String>,
}

/// A durable transaction record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// Unique identifier.
    pub id: TransactionId,
    /// Owning customer.
    pub customer_id: CustomerId,
    /// Transaction type.
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    /// Amount, denominated in `from_currency`.
    pub amount: Decimal,
    /// Source currency.
    pub from_currency: Currency,
    /// Target currency; present only for exchanges.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to_currency: Option<Currency>,
    /// Optional free-text note.
    #[serde(default)]
    pub note: Option<String>,
    /// Creation timestamp.
    pub date: DateTime<Utc>,
}

/// Input for creating a transaction.
#[derive(Debug, Clone)]
pub struct NewTransaction {
    /// Owning customer.
    pub customer_id: CustomerId,
    /// Transaction type.
    pub kind: TransactionKind,
    /// Amount in `from_currency`.
    pub amount: Decimal,
    /// Source currency.
    pub from_currency: Currency,
    /// Target currency for exchanges.
    pub to_currency: Option<Currency>,
    /// Optional note.
    pub note: Option<String>,
}

/// Replacement values for editing a transaction in place.
#[derive(Debug, Clone)]
pub struct TransactionUpdate {
    /// New transaction type.
    pub kind: TransactionKind,
    /// New amount in `from_currency`.
    pub amount: Decimal,
    /// New source currency.
    pub from_currency: Currency,
    /// New target currency for exchanges.
    pub to_currency: Option<Currency>,
    /// New note.
    pub note: Option<String>,
}

/// Filter for listing transactions.
#[derive(Debug, Clone, Default)]
pub struct TransactionFilter {
    /// Restrict to one customer.
    pub customer_id: Option<CustomerId>,
    /// Restrict to one transaction type.
    pub kind: Option<TransactionKind>,
    /// Restrict to one source currency.
    pub from_currency: Option<Currency>,
    /// Include transactions dated at or after this instant.
    pub start_date: Option<DateTime<Utc>>,
    /// Include transactions dated at or before this instant.
    pub end_date: Option<DateTime<Utc>>,
    /// Case-insensitive substring match against the note.
    pub note_contains: Option<String>,
}

impl TransactionFilter {
    /// Returns true when the record passes every set criterion.
    #[must_use]
    pub fn matches(&self, tx: &Transaction) -> bool {
        if self.customer_id.is_some_and(|id| tx.customer_id != id) {
            return false;
        }
        if self.kind.is_some_and(|kind| tx.kind != kind) {
            return false;
        }
        if self.from_currency.is_some_and(|c| tx.from_currency != c) {
            return false;
        }
        if self.start_date.is_some_and(|start| tx.date < start) {
            return false;
        }
        if self.end_date.is_some_and(|end| tx.date > end) {
            return false;
        }
        if let Some(term) = &self.note_contains {
            let needle = term.to_lowercase();
            let hit = tx
                .note
                .as_ref()
                .is_some_and(|note| note.to_lowercase().contains(&needle));
            if !hit {
                return false;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn sample_transaction() -> Transaction {
        Transaction {
            id: TransactionId::new(),
            customer_id: CustomerId::new(),
            kind: TransactionKind::Deposit,
            amount: dec!(500),
            from_currency: Currency::Dinar,
            to_currency: None,
            note: Some("Rent payment".to_string()),
            date: Utc::now(),
        }
    }

    #[test]
    fn test_kind_wire_names() {
        assert_eq!(
            serde_json::to_string(&TransactionKind::Deposit).unwrap(),
            "\"deposit\""
        );
        assert_eq!(
            "withdraw".parse::<TransactionKind>().unwrap(),
            TransactionKind::Withdraw
        );
        assert_eq!("refund".parse::<TransactionKind>().unwrap_err(), "refund");
    }

    #[test]
    fn test_safes_enum_dispatch() {
        let mut safes = Safes::new(dec!(1000), dec!(50));
        assert_eq!(safes.balance(Currency::Dinar), dec!(1000));
        assert_eq!(safes.balance(Currency::Dollar), dec!(50));

        *safes.balance_mut(Currency::Dollar) += dec!(25);
        assert_eq!(safes.balance(Currency::Dollar), dec!(75));
    }

    #[test]
    fn test_safes_wire_shape() {
        let safes = Safes::new(dec!(1000), dec!(0));
        let json = serde_json::to_value(&safes).unwrap();
        assert_eq!(json["dinar"]["currency"], "dinar");
        assert_eq!(json["dollar"]["currency"], "dollar");
    }

    #[test]
    fn test_safes_deserialize_forces_tags() {
        // A tampered document with swapped tags comes back normalized.
        let json = r#"{
            "dinar": { "currency": "dollar", "balance": "10" },
            "dollar": { "balance": "20" }
        }"#;
        let safes: Safes = serde_json::from_str(json).unwrap();
        assert_eq!(safes.dinar.currency, Currency::Dinar);
        assert_eq!(safes.dinar.balance, dec!(10));
        assert_eq!(safes.dollar.currency, Currency::Dollar);
        assert_eq!(safes.dollar.balance, dec!(20));
    }

    #[test]
    fn test_transaction_wire_shape() {
        let tx = sample_transaction();
        let json = serde_json::to_value(&tx).unwrap();
        assert_eq!(json["type"], "deposit");
        assert_eq!(json["fromCurrency"], "dinar");
        assert!(json.get("toCurrency").is_none());
        assert!(json.get("customerId").is_some());
    }

    #[test]
    fn test_filter_matches_kind_and_currency() {
        let tx = sample_transaction();
        let filter = TransactionFilter {
            kind: Some(TransactionKind::Deposit),
            from_currency: Some(Currency::Dinar),
            ..TransactionFilter::default()
        };
        assert!(filter.matches(&tx));

        let filter = TransactionFilter {
            kind: Some(TransactionKind::Exchange),
            ..TransactionFilter::default()
        };
        assert!(!filter.matches(&tx));
    }

    #[test]
    fn test_filter_matches_note_case_insensitive() {
        let tx = sample_transaction();
        let filter = TransactionFilter {
            note_contains: Some("RENT".to_string()),
            ..TransactionFilter::default()
        };
        assert!(filter.matches(&tx));

        let filter = TransactionFilter {
            note_contains: Some("salary".to_string()),
            ..TransactionFilter::default()
        };
        assert!(!filter.matches(&tx));
    }

    #[test]
    fn test_filter_date_range_is_inclusive() {
        let tx = sample_transaction();
        let filter = TransactionFilter {
            start_date: Some(tx.date),
            end_date: Some(tx.date),
            ..TransactionFilter::default()
        };
        assert!(filter.matches(&tx));
    }

    #[test]
    fn test_customer_new_forces_safe_tags() {
        let customer = Customer::new(NewCustomer {
            name: "Ahmed".to_string(),
            dinar_balance: dec!(100),
            ..NewCustomer::default()
        });
        assert_eq!(customer.safes.dinar.currency, Currency::Dinar);
        assert_eq!(customer.safes.dollar.currency, Currency::Dollar);
        assert_eq!(customer.safes.balance(Currency::Dinar), dec!(100));
        assert_eq!(customer.safes.balance(Currency::Dollar), Decimal::ZERO);
    }
}
