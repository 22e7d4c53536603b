use std::collections::BTreeMap;

use cosmwasm_std::Binary;
use serde::Deserialize;
use serde_json::Value;

use super::select_one;
use crate::chain::coins::WireCoin;
use crate::encoder::EncodeError;

/// Call into another contract
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ExecuteMsg {
    #[serde(default)]
    pub contract_addr: String,
    /// Opaque payload for the target contract
    pub msg: Binary,
    #[serde(default)]
    pub callback_code_hash: String,
    /// Funds to attach to the call
    #[serde(default)]
    pub send: Vec<WireCoin>,
}

/// Create a new contract from uploaded code
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct InstantiateMsg {
    pub code_id: u64,
    #[serde(default)]
    pub callback_code_hash: String,
    pub msg: Binary,
    #[serde(default)]
    pub send: Vec<WireCoin>,
    #[serde(default)]
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WasmMsg {
    Execute(ExecuteMsg),
    Instantiate(InstantiateMsg),
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawWasmMsg {
    #[serde(default)]
    pub execute: Option<ExecuteMsg>,
    #[serde(default)]
    pub instantiate: Option<InstantiateMsg>,
    #[serde(flatten)]
    pub unknown: BTreeMap<String, Value>,
}

impl TryFrom<RawWasmMsg> for WasmMsg {
    type Error = EncodeError;

    fn try_from(raw: RawWasmMsg) -> Result<Self, Self::Error> {
        select_one(
            "wasm",
            vec![
                ("execute", raw.execute.map(WasmMsg::Execute)),
                ("instantiate", raw.instantiate.map(WasmMsg::Instantiate)),
            ],
            raw.unknown,
            true,
        )
    }
}
