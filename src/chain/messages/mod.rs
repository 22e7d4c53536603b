mod bank;
mod staking;
mod wasm;

pub use bank::{BankMsg, RawBankMsg, SendMsg};
pub use staking::{
    DelegateMsg, RawStakingMsg, RedelegateMsg, StakingMsg, UndelegateMsg, WithdrawMsg,
};
pub use wasm::{ExecuteMsg, InstantiateMsg, RawWasmMsg, WasmMsg};

use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::Value;

use crate::encoder::EncodeError;

/// A side effect requested by a contract, with exactly one category populated
#[derive(Debug, Clone, PartialEq)]
pub enum ContractMsg {
    Bank(BankMsg),
    Wasm(WasmMsg),
    Staking(StakingMsg),
    /// Chain-specific extension, handled only if a custom rule is installed
    Custom(Value),
}

impl ContractMsg {
    /// Dotted name of the category and operation, e.g. `staking.withdraw`
    pub fn kind(&self) -> &'static str {
        match self {
            ContractMsg::Bank(BankMsg::Send(_)) => "bank.send",
            ContractMsg::Wasm(WasmMsg::Execute(_)) => "wasm.execute",
            ContractMsg::Wasm(WasmMsg::Instantiate(_)) => "wasm.instantiate",
            ContractMsg::Staking(StakingMsg::Delegate(_)) => "staking.delegate",
            ContractMsg::Staking(StakingMsg::Undelegate(_)) => "staking.undelegate",
            ContractMsg::Staking(StakingMsg::Redelegate(_)) => "staking.redelegate",
            ContractMsg::Staking(StakingMsg::Withdraw(_)) => "staking.withdraw",
            ContractMsg::Custom(_) => "custom",
        }
    }
}

/// Contract message as handed over by the VM host: one optional key per
/// category. Anything other than exactly one populated key is rejected when
/// converting into [`ContractMsg`].
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawContractMsg {
    #[serde(default)]
    pub bank: Option<RawBankMsg>,
    #[serde(default)]
    pub wasm: Option<RawWasmMsg>,
    #[serde(default)]
    pub staking: Option<RawStakingMsg>,
    #[serde(default)]
    pub custom: Option<Value>,
    #[serde(flatten)]
    pub unknown: BTreeMap<String, Value>,
}

impl RawContractMsg {
    pub fn from_json(bytes: &[u8]) -> Result<Self, EncodeError> {
        serde_json::from_slice(bytes).map_err(|e| EncodeError::malformed(e.to_string()))
    }
}

impl TryFrom<RawContractMsg> for ContractMsg {
    type Error = EncodeError;

    fn try_from(raw: RawContractMsg) -> Result<Self, Self::Error> {
        // Second-level checks only run once the category itself is unambiguous.
        let category = select_one(
            "message",
            vec![
                ("bank", raw.bank.map(Category::Bank)),
                ("wasm", raw.wasm.map(Category::Wasm)),
                ("staking", raw.staking.map(Category::Staking)),
                ("custom", raw.custom.map(Category::Custom)),
            ],
            raw.unknown,
            false,
        )?;

        Ok(match category {
            Category::Bank(bank) => ContractMsg::Bank(bank.try_into()?),
            Category::Wasm(wasm) => ContractMsg::Wasm(wasm.try_into()?),
            Category::Staking(staking) => ContractMsg::Staking(staking.try_into()?),
            Category::Custom(value) => ContractMsg::Custom(value),
        })
    }
}

enum Category {
    Bank(RawBankMsg),
    Wasm(RawWasmMsg),
    Staking(RawStakingMsg),
    Custom(Value),
}

/// Pick the single populated variant of a one-of object.
///
/// `unknown` holds keys that matched no known variant; null values count as
/// absent. A lone unknown key is an unsupported operation when
/// `unknown_is_unsupported` is set (second level) and malformed otherwise.
pub(crate) fn select_one<T>(
    scope: &str,
    candidates: Vec<(&'static str, Option<T>)>,
    unknown: BTreeMap<String, Value>,
    unknown_is_unsupported: bool,
) -> Result<T, EncodeError> {
    let mut populated: Vec<(&'static str, T)> = candidates
        .into_iter()
        .filter_map(|(name, value)| value.map(|v| (name, v)))
        .collect();
    let unknown: Vec<String> = unknown
        .into_iter()
        .filter(|(_, value)| !value.is_null())
        .map(|(key, _)| key)
        .collect();

    match (populated.len(), unknown.len()) {
        (1, 0) => match populated.pop() {
            Some((_, value)) => Ok(value),
            None => Err(EncodeError::malformed(format!("empty {}", scope))),
        },
        (0, 0) => Err(EncodeError::malformed(format!("empty {}: no variant populated", scope))),
        (0, 1) if unknown_is_unsupported => Err(EncodeError::UnsupportedOperation(format!(
            "{}.{}",
            scope, unknown[0]
        ))),
        (0, 1) => Err(EncodeError::malformed(format!(
            "unrecognized {} variant {:?}",
            scope, unknown[0]
        ))),
        _ => {
            let names: Vec<String> = populated
                .iter()
                .map(|(name, _)| name.to_string())
                .chain(unknown)
                .collect();
            Err(EncodeError::malformed(format!(
                "multiple {} variants populated: {}",
                scope,
                names.join(", ")
            )))
        }
    }
}
