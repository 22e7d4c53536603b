use std::collections::BTreeMap;
use std::str::FromStr;

use cosmwasm_std::Uint256;
use serde::{Deserialize, Serialize, Serializer};

use crate::encoder::EncodeError;

/// Amount as emitted by a contract: a denom plus a decimal integer string
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireCoin {
    pub denom: String,
    pub amount: String,
}

impl WireCoin {
    pub fn new(amount: impl ToString, denom: &str) -> Self {
        Self {
            denom: denom.to_string(),
            amount: amount.to_string(),
        }
    }
}

/// A single ledger amount
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Coin {
    pub denom: String,
    pub amount: Uint256,
}

impl Coin {
    pub fn new(amount: u128, denom: &str) -> Self {
        Self {
            denom: denom.to_string(),
            amount: Uint256::from(amount),
        }
    }

    /// Parse a contract amount. Zero is kept as-is.
    pub fn from_wire(coin: &WireCoin) -> Result<Self, EncodeError> {
        Ok(Self {
            denom: coin.denom.clone(),
            amount: parse_amount(&coin.denom, &coin.amount)?,
        })
    }
}

/// Parse a non-negative decimal integer. Signs, decimal points, exponents,
/// whitespace and the empty string are all rejected.
pub fn parse_amount(denom: &str, amount: &str) -> Result<Uint256, EncodeError> {
    if amount.is_empty() {
        return Err(EncodeError::invalid_amount(denom, amount, "empty amount"));
    }
    if let Some(bad) = amount.chars().find(|c| !c.is_ascii_digit()) {
        return Err(EncodeError::invalid_amount(
            denom,
            amount,
            format!("unexpected character {:?}, expected a non-negative integer", bad),
        ));
    }

    Uint256::from_str(amount).map_err(|e| EncodeError::invalid_amount(denom, amount, e.to_string()))
}

/// Normalised coin set: one entry per denom, sorted by denom, no zero entries
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Coins(BTreeMap<String, Uint256>);

impl Coins {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a coin set from contract amounts. Repeated denoms are summed.
    pub fn from_wire(coins: &[WireCoin]) -> Result<Self, EncodeError> {
        let mut set = Coins::new();
        for coin in coins {
            let amount = parse_amount(&coin.denom, &coin.amount)?;
            set.add(&coin.denom, &coin.amount, amount)?;
        }
        Ok(set)
    }

    fn add(&mut self, denom: &str, raw: &str, amount: Uint256) -> Result<(), EncodeError> {
        if amount.is_zero() {
            return Ok(());
        }
        let entry = self.0.entry(denom.to_string()).or_insert_with(Uint256::zero);
        *entry = entry
            .checked_add(amount)
            .map_err(|e| EncodeError::invalid_amount(denom, raw, e.to_string()))?;
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn amount_of(&self, denom: &str) -> Uint256 {
        self.0.get(denom).copied().unwrap_or_else(Uint256::zero)
    }

    /// Coins in denom order
    pub fn to_vec(&self) -> Vec<Coin> {
        self.0
            .iter()
            .map(|(denom, amount)| Coin {
                denom: denom.clone(),
                amount: *amount,
            })
            .collect()
    }
}

impl Serialize for Coins {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_vec().serialize(serializer)
    }
}
