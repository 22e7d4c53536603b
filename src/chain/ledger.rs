/// Ledger-native messages produced by the encoder
///
/// Every variant carries validated, typed fields. `to_any` turns a message into
/// the protobuf `Any` the ledger's message router consumes.

use cosmwasm_std::Binary;
use prost::Message;
use serde::Serialize;

use crate::chain::address::{AccountAddress, ValidatorAddress};
use crate::chain::coins::{Coin, Coins};
use crate::chain::proto::{self, Any};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MsgSend {
    pub from_address: AccountAddress,
    pub to_address: AccountAddress,
    pub amount: Coins,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MsgExecuteContract {
    pub sender: AccountAddress,
    pub contract: AccountAddress,
    /// Opaque contract payload, never interpreted here
    pub msg: Binary,
    pub callback_code_hash: String,
    pub sent_funds: Coins,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MsgInstantiateContract {
    pub sender: AccountAddress,
    pub code_id: u64,
    pub label: String,
    pub callback_code_hash: String,
    pub init_msg: Binary,
    pub init_funds: Coins,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MsgDelegate {
    pub delegator_address: AccountAddress,
    pub validator_address: ValidatorAddress,
    pub amount: Coin,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MsgUndelegate {
    pub delegator_address: AccountAddress,
    pub validator_address: ValidatorAddress,
    pub amount: Coin,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MsgBeginRedelegate {
    pub delegator_address: AccountAddress,
    pub validator_src_address: ValidatorAddress,
    pub validator_dst_address: ValidatorAddress,
    pub amount: Coin,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MsgSetWithdrawAddress {
    pub delegator_address: AccountAddress,
    pub withdraw_address: AccountAddress,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MsgWithdrawDelegatorReward {
    pub delegator_address: AccountAddress,
    pub validator_address: ValidatorAddress,
}

/// The closed set of ledger operations a contract may trigger
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum LedgerMsg {
    Send(MsgSend),
    ExecuteContract(MsgExecuteContract),
    InstantiateContract(MsgInstantiateContract),
    Delegate(MsgDelegate),
    Undelegate(MsgUndelegate),
    BeginRedelegate(MsgBeginRedelegate),
    SetWithdrawAddress(MsgSetWithdrawAddress),
    WithdrawDelegatorReward(MsgWithdrawDelegatorReward),
}

fn proto_coin(coin: &Coin) -> proto::Coin {
    proto::Coin {
        denom: coin.denom.clone(),
        amount: coin.amount.to_string(),
    }
}

fn proto_coins(coins: &Coins) -> Vec<proto::Coin> {
    coins.to_vec().iter().map(proto_coin).collect()
}

impl LedgerMsg {
    pub fn type_url(&self) -> &'static str {
        match self {
            LedgerMsg::Send(_) => proto::MSG_SEND_TYPE_URL,
            LedgerMsg::ExecuteContract(_) => proto::MSG_EXECUTE_CONTRACT_TYPE_URL,
            LedgerMsg::InstantiateContract(_) => proto::MSG_INSTANTIATE_CONTRACT_TYPE_URL,
            LedgerMsg::Delegate(_) => proto::MSG_DELEGATE_TYPE_URL,
            LedgerMsg::Undelegate(_) => proto::MSG_UNDELEGATE_TYPE_URL,
            LedgerMsg::BeginRedelegate(_) => proto::MSG_BEGIN_REDELEGATE_TYPE_URL,
            LedgerMsg::SetWithdrawAddress(_) => proto::MSG_SET_WITHDRAW_ADDRESS_TYPE_URL,
            LedgerMsg::WithdrawDelegatorReward(_) => proto::MSG_WITHDRAW_DELEGATOR_REWARD_TYPE_URL,
        }
    }

    /// Protobuf encoding of the message body, without the `Any` wrapper
    pub fn encode_proto(&self) -> Vec<u8> {
        match self {
            LedgerMsg::Send(m) => proto::MsgSend {
                from_address: m.from_address.to_string(),
                to_address: m.to_address.to_string(),
                amount: proto_coins(&m.amount),
            }
            .encode_to_vec(),
            LedgerMsg::ExecuteContract(m) => proto::MsgExecuteContract {
                sender: m.sender.as_bytes().to_vec(),
                contract: m.contract.as_bytes().to_vec(),
                msg: m.msg.to_vec(),
                callback_code_hash: m.callback_code_hash.clone(),
                sent_funds: proto_coins(&m.sent_funds),
            }
            .encode_to_vec(),
            LedgerMsg::InstantiateContract(m) => proto::MsgInstantiateContract {
                sender: m.sender.as_bytes().to_vec(),
                callback_code_hash: m.callback_code_hash.clone(),
                code_id: m.code_id,
                label: m.label.clone(),
                init_msg: m.init_msg.to_vec(),
                init_funds: proto_coins(&m.init_funds),
            }
            .encode_to_vec(),
            LedgerMsg::Delegate(m) => proto::MsgDelegate {
                delegator_address: m.delegator_address.to_string(),
                validator_address: m.validator_address.to_string(),
                amount: Some(proto_coin(&m.amount)),
            }
            .encode_to_vec(),
            LedgerMsg::Undelegate(m) => proto::MsgDelegate {
                delegator_address: m.delegator_address.to_string(),
                validator_address: m.validator_address.to_string(),
                amount: Some(proto_coin(&m.amount)),
            }
            .encode_to_vec(),
            LedgerMsg::BeginRedelegate(m) => proto::MsgBeginRedelegate {
                delegator_address: m.delegator_address.to_string(),
                validator_src_address: m.validator_src_address.to_string(),
                validator_dst_address: m.validator_dst_address.to_string(),
                amount: Some(proto_coin(&m.amount)),
            }
            .encode_to_vec(),
            LedgerMsg::SetWithdrawAddress(m) => proto::MsgSetWithdrawAddress {
                delegator_address: m.delegator_address.to_string(),
                withdraw_address: m.withdraw_address.to_string(),
            }
            .encode_to_vec(),
            LedgerMsg::WithdrawDelegatorReward(m) => proto::MsgWithdrawDelegatorReward {
                delegator_address: m.delegator_address.to_string(),
                validator_address: m.validator_address.to_string(),
            }
            .encode_to_vec(),
        }
    }

    pub fn to_any(&self) -> Any {
        Any {
            type_url: self.type_url().to_string(),
            value: self.encode_proto(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::address::AddressCodec;
    use crate::chain::coins::WireCoin;

    fn fixtures() -> (AccountAddress, AccountAddress, ValidatorAddress) {
        let codec = AddressCodec::default();
        (
            codec.account_from_bytes("sender", vec![1u8; 20]).unwrap(),
            codec.account_from_bytes("recipient", vec![2u8; 20]).unwrap(),
            codec.validator_from_bytes("validator", vec![3u8; 20]).unwrap(),
        )
    }

    #[test]
    fn test_send_any_roundtrip() {
        let (sender, recipient, _) = fixtures();
        let msg = LedgerMsg::Send(MsgSend {
            from_address: sender.clone(),
            to_address: recipient.clone(),
            amount: Coins::from_wire(&[WireCoin::new(5, "usdt"), WireCoin::new(9, "uatom")]).unwrap(),
        });

        let any = msg.to_any();
        assert_eq!(any.type_url, "/cosmos.bank.v1beta1.MsgSend");

        let decoded = proto::MsgSend::decode(any.value.as_slice()).unwrap();
        assert_eq!(decoded.from_address, sender.to_string());
        assert_eq!(decoded.to_address, recipient.to_string());
        let denoms: Vec<_> = decoded.amount.iter().map(|c| c.denom.as_str()).collect();
        assert_eq!(denoms, vec!["uatom", "usdt"]);
        assert_eq!(decoded.amount[0].amount, "9");
    }

    #[test]
    fn test_execute_contract_carries_raw_bytes() {
        let (sender, contract, _) = fixtures();
        let msg = LedgerMsg::ExecuteContract(MsgExecuteContract {
            sender: sender.clone(),
            contract: contract.clone(),
            msg: Binary::from(br#"{"foo":123}"#.as_slice()),
            callback_code_hash: "abcd".to_string(),
            sent_funds: Coins::new(),
        });

        let decoded = proto::MsgExecuteContract::decode(msg.encode_proto().as_slice()).unwrap();
        assert_eq!(decoded.sender, sender.as_bytes());
        assert_eq!(decoded.contract, contract.as_bytes());
        assert_eq!(decoded.msg, br#"{"foo":123}"#.to_vec());
        assert_eq!(decoded.callback_code_hash, "abcd");
        assert!(decoded.sent_funds.is_empty());
    }

    #[test]
    fn test_undelegate_uses_its_own_type_url() {
        let (sender, _, validator) = fixtures();
        let delegate = LedgerMsg::Delegate(MsgDelegate {
            delegator_address: sender.clone(),
            validator_address: validator.clone(),
            amount: Coin::new(10, "stake"),
        });
        let undelegate = LedgerMsg::Undelegate(MsgUndelegate {
            delegator_address: sender,
            validator_address: validator,
            amount: Coin::new(10, "stake"),
        });

        assert_ne!(delegate.type_url(), undelegate.type_url());
        assert_eq!(delegate.encode_proto(), undelegate.encode_proto());
    }

    #[test]
    fn test_json_is_tagged_by_kind() {
        let (sender, _, validator) = fixtures();
        let msg = LedgerMsg::WithdrawDelegatorReward(MsgWithdrawDelegatorReward {
            delegator_address: sender.clone(),
            validator_address: validator.clone(),
        });

        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["type"], "withdraw_delegator_reward");
        assert_eq!(json["value"]["delegator_address"], sender.to_string());
        assert_eq!(json["value"]["validator_address"], validator.to_string());
    }
}
