//! The two currencies handled by the ledger.
//!
//! Internally a safe is always tagged `dinar` or `dollar`; the ISO-style
//! codes `IQD`/`USD` exist only for presentation-facing filters.

use serde::{Deserialize, Serialize};

/// A supported currency.
///
/// Exhaustive by design: every safe lookup is an enum dispatch, so an
/// unknown currency cannot reach the balance engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Currency {
    /// Iraqi dinar.
    Dinar,
    /// US dollar.
    Dollar,
}

impl Currency {
    /// Returns the other currency.
    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            Self::Dinar => Self::Dollar,
            Self::Dollar => Self::Dinar,
        }
    }

    /// Returns the presentation code (`IQD`/`USD`).
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Dinar => "IQD",
            Self::Dollar => "USD",
        }
    }

    /// Returns the internal name (`dinar`/`dollar`).
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Dinar => "dinar",
            Self::Dollar => "dollar",
        }
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for Currency {
    type Err = String;

    /// Accepts both the internal names and the presentation codes.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "dinar" | "iqd" => Ok(Self::Dinar),
            "dollar" | "usd" => Ok(Self::Dollar),
            _ => Err(format!("Unknown currency: {s}")),
        }
    }
}
