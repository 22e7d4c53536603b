use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::Value;

use super::select_one;
use crate::chain::coins::WireCoin;
use crate::encoder::EncodeError;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DelegateMsg {
    #[serde(default)]
    pub validator: String,
    pub amount: WireCoin,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UndelegateMsg {
    #[serde(default)]
    pub validator: String,
    pub amount: WireCoin,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RedelegateMsg {
    #[serde(default)]
    pub src_validator: String,
    #[serde(default)]
    pub dst_validator: String,
    pub amount: WireCoin,
}

/// Claim rewards from one validator. Without a recipient the rewards go to
/// the delegator itself.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WithdrawMsg {
    #[serde(default)]
    pub validator: String,
    #[serde(default)]
    pub recipient: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StakingMsg {
    Delegate(DelegateMsg),
    Undelegate(UndelegateMsg),
    Redelegate(RedelegateMsg),
    Withdraw(WithdrawMsg),
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawStakingMsg {
    #[serde(default)]
    pub delegate: Option<DelegateMsg>,
    #[serde(default)]
    pub undelegate: Option<UndelegateMsg>,
    #[serde(default)]
    pub redelegate: Option<RedelegateMsg>,
    #[serde(default)]
    pub withdraw: Option<WithdrawMsg>,
    #[serde(flatten)]
    pub unknown: BTreeMap<String, Value>,
}

impl TryFrom<RawStakingMsg> for StakingMsg {
    type Error = EncodeError;

    fn try_from(raw: RawStakingMsg) -> Result<Self, Self::Error> {
        select_one(
            "staking",
            vec![
                ("delegate", raw.delegate.map(StakingMsg::Delegate)),
                ("undelegate", raw.undelegate.map(StakingMsg::Undelegate)),
                ("redelegate", raw.redelegate.map(StakingMsg::Redelegate)),
                ("withdraw", raw.withdraw.map(StakingMsg::Withdraw)),
            ],
            raw.unknown,
            true,
        )
    }
}
