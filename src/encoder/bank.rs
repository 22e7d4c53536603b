use crate::chain::address::{AccountAddress, AddressCodec};
use crate::chain::coins::Coins;
use crate::chain::ledger::{LedgerMsg, MsgSend};
use crate::chain::messages::BankMsg;

use super::{require, EncodeError};

/// Bank transfers always debit the sender. An empty amount list is passed on;
/// the bank module decides whether an empty send is acceptable.
pub fn encode_bank_msg(
    sender: &AccountAddress,
    msg: &BankMsg,
    codec: &AddressCodec,
) -> Result<Vec<LedgerMsg>, EncodeError> {
    match msg {
        BankMsg::Send(send) => {
            let to_address = codec.decode_account("to_address", require("to_address", &send.to_address)?)?;
            let amount = Coins::from_wire(&send.amount)?;

            Ok(vec![LedgerMsg::Send(MsgSend {
                from_address: sender.clone(),
                to_address,
                amount,
            })])
        }
    }
}
