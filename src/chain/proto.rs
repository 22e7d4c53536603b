/// Protobuf wire types for the ledger messages we emit
///
/// Field numbers follow the Cosmos SDK (bank, staking, distribution) and the
/// compute module protos. Compute messages carry raw address bytes; the SDK
/// messages carry bech32 strings.

pub use prost_types::Any;

pub const MSG_SEND_TYPE_URL: &str = "/cosmos.bank.v1beta1.MsgSend";
pub const MSG_EXECUTE_CONTRACT_TYPE_URL: &str = "/secret.compute.v1beta1.MsgExecuteContract";
pub const MSG_INSTANTIATE_CONTRACT_TYPE_URL: &str = "/secret.compute.v1beta1.MsgInstantiateContract";
pub const MSG_DELEGATE_TYPE_URL: &str = "/cosmos.staking.v1beta1.MsgDelegate";
pub const MSG_UNDELEGATE_TYPE_URL: &str = "/cosmos.staking.v1beta1.MsgUndelegate";
pub const MSG_BEGIN_REDELEGATE_TYPE_URL: &str = "/cosmos.staking.v1beta1.MsgBeginRedelegate";
pub const MSG_SET_WITHDRAW_ADDRESS_TYPE_URL: &str = "/cosmos.distribution.v1beta1.MsgSetWithdrawAddress";
pub const MSG_WITHDRAW_DELEGATOR_REWARD_TYPE_URL: &str =
    "/cosmos.distribution.v1beta1.MsgWithdrawDelegatorReward";

/// cosmos.base.v1beta1.Coin
#[derive(Clone, PartialEq, prost::Message)]
pub struct Coin {
    #[prost(string, tag = "1")]
    pub denom: String,
    /// Decimal integer string
    #[prost(string, tag = "2")]
    pub amount: String,
}

/// cosmos.bank.v1beta1.MsgSend
#[derive(Clone, PartialEq, prost::Message)]
pub struct MsgSend {
    #[prost(string, tag = "1")]
    pub from_address: String,
    #[prost(string, tag = "2")]
    pub to_address: String,
    #[prost(message, repeated, tag = "3")]
    pub amount: Vec<Coin>,
}

/// secret.compute.v1beta1.MsgExecuteContract
#[derive(Clone, PartialEq, prost::Message)]
pub struct MsgExecuteContract {
    #[prost(bytes = "vec", tag = "1")]
    pub sender: Vec<u8>,
    #[prost(bytes = "vec", tag = "2")]
    pub contract: Vec<u8>,
    #[prost(bytes = "vec", tag = "3")]
    pub msg: Vec<u8>,
    #[prost(string, tag = "4")]
    pub callback_code_hash: String,
    #[prost(message, repeated, tag = "5")]
    pub sent_funds: Vec<Coin>,
}

/// secret.compute.v1beta1.MsgInstantiateContract
#[derive(Clone, PartialEq, prost::Message)]
pub struct MsgInstantiateContract {
    #[prost(bytes = "vec", tag = "1")]
    pub sender: Vec<u8>,
    #[prost(string, tag = "2")]
    pub callback_code_hash: String,
    #[prost(uint64, tag = "3")]
    pub code_id: u64,
    #[prost(string, tag = "4")]
    pub label: String,
    #[prost(bytes = "vec", tag = "5")]
    pub init_msg: Vec<u8>,
    #[prost(message, repeated, tag = "6")]
    pub init_funds: Vec<Coin>,
}

/// cosmos.staking.v1beta1.MsgDelegate, also used for MsgUndelegate
#[derive(Clone, PartialEq, prost::Message)]
pub struct MsgDelegate {
    #[prost(string, tag = "1")]
    pub delegator_address: String,
    #[prost(string, tag = "2")]
    pub validator_address: String,
    #[prost(message, optional, tag = "3")]
    pub amount: Option<Coin>,
}

/// cosmos.staking.v1beta1.MsgBeginRedelegate
#[derive(Clone, PartialEq, prost::Message)]
pub struct MsgBeginRedelegate {
    #[prost(string, tag = "1")]
    pub delegator_address: String,
    #[prost(string, tag = "2")]
    pub validator_src_address: String,
    #[prost(string, tag = "3")]
    pub validator_dst_address: String,
    #[prost(message, optional, tag = "4")]
    pub amount: Option<Coin>,
}

/// cosmos.distribution.v1beta1.MsgSetWithdrawAddress
#[derive(Clone, PartialEq, prost::Message)]
pub struct MsgSetWithdrawAddress {
    #[prost(string, tag = "1")]
    pub delegator_address: String,
    #[prost(string, tag = "2")]
    pub withdraw_address: String,
}

/// cosmos.distribution.v1beta1.MsgWithdrawDelegatorReward
#[derive(Clone, PartialEq, prost::Message)]
pub struct MsgWithdrawDelegatorReward {
    #[prost(string, tag = "1")]
    pub delegator_address: String,
    #[prost(string, tag = "2")]
    pub validator_address: String,
}
