use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::Value;

use super::select_one;
use crate::chain::coins::WireCoin;
use crate::encoder::EncodeError;

/// Transfer from the contract's own account. There is no `from_address`:
/// the sender is always the contract the host is running.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SendMsg {
    #[serde(default)]
    pub to_address: String,
    #[serde(default)]
    pub amount: Vec<WireCoin>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BankMsg {
    Send(SendMsg),
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawBankMsg {
    #[serde(default)]
    pub send: Option<SendMsg>,
    #[serde(flatten)]
    pub unknown: BTreeMap<String, Value>,
}

impl TryFrom<RawBankMsg> for BankMsg {
    type Error = EncodeError;

    fn try_from(raw: RawBankMsg) -> Result<Self, Self::Error> {
        select_one(
            "bank",
            vec![("send", raw.send.map(BankMsg::Send))],
            raw.unknown,
            true,
        )
    }
}
