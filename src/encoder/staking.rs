use crate::chain::address::{AccountAddress, AddressCodec, ValidatorAddress};
use crate::chain::coins::Coin;
use crate::chain::ledger::{
    LedgerMsg, MsgBeginRedelegate, MsgDelegate, MsgSetWithdrawAddress, MsgUndelegate,
    MsgWithdrawDelegatorReward,
};
use crate::chain::messages::StakingMsg;

use super::{require, EncodeError};

fn validator(codec: &AddressCodec, field: &'static str, value: &str) -> Result<ValidatorAddress, EncodeError> {
    codec.decode_validator(field, require(field, value)?)
}

/// Staking and reward operations, always on behalf of the sender
pub fn encode_staking_msg(
    sender: &AccountAddress,
    msg: &StakingMsg,
    codec: &AddressCodec,
) -> Result<Vec<LedgerMsg>, EncodeError> {
    match msg {
        StakingMsg::Delegate(delegate) => {
            let validator_address = validator(codec, "validator", &delegate.validator)?;
            let amount = Coin::from_wire(&delegate.amount)?;

            Ok(vec![LedgerMsg::Delegate(MsgDelegate {
                delegator_address: sender.clone(),
                validator_address,
                amount,
            })])
        }
        StakingMsg::Undelegate(undelegate) => {
            let validator_address = validator(codec, "validator", &undelegate.validator)?;
            let amount = Coin::from_wire(&undelegate.amount)?;

            Ok(vec![LedgerMsg::Undelegate(MsgUndelegate {
                delegator_address: sender.clone(),
                validator_address,
                amount,
            })])
        }
        StakingMsg::Redelegate(redelegate) => {
            let validator_src_address = validator(codec, "src_validator", &redelegate.src_validator)?;
            let validator_dst_address = validator(codec, "dst_validator", &redelegate.dst_validator)?;
            let amount = Coin::from_wire(&redelegate.amount)?;

            Ok(vec![LedgerMsg::BeginRedelegate(MsgBeginRedelegate {
                delegator_address: sender.clone(),
                validator_src_address,
                validator_dst_address,
                amount,
            })])
        }
        StakingMsg::Withdraw(withdraw) => {
            let validator_address = validator(codec, "validator", &withdraw.validator)?;
            // An empty recipient means the same as no recipient.
            let withdraw_address = match withdraw.recipient.as_deref() {
                Some(recipient) if !recipient.is_empty() => codec.decode_account("recipient", recipient)?,
                _ => sender.clone(),
            };

            // The withdraw address must be set before the reward is withdrawn,
            // even when it is just the sender again.
            Ok(vec![
                LedgerMsg::SetWithdrawAddress(MsgSetWithdrawAddress {
                    delegator_address: sender.clone(),
                    withdraw_address,
                }),
                LedgerMsg::WithdrawDelegatorReward(MsgWithdrawDelegatorReward {
                    delegator_address: sender.clone(),
                    validator_address,
                }),
            ])
        }
    }
}
