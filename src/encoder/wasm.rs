use crate::chain::address::{AccountAddress, AddressCodec};
use crate::chain::coins::Coins;
use crate::chain::ledger::{LedgerMsg, MsgExecuteContract, MsgInstantiateContract};
use crate::chain::messages::WasmMsg;

use super::{require, EncodeError};

/// Contract calls and instantiations. Payloads and callback code hashes are
/// passed through untouched.
pub fn encode_wasm_msg(
    sender: &AccountAddress,
    msg: &WasmMsg,
    codec: &AddressCodec,
) -> Result<Vec<LedgerMsg>, EncodeError> {
    match msg {
        WasmMsg::Execute(exec) => {
            let contract = codec.decode_account("contract_addr", require("contract_addr", &exec.contract_addr)?)?;
            let sent_funds = Coins::from_wire(&exec.send)?;

            Ok(vec![LedgerMsg::ExecuteContract(MsgExecuteContract {
                sender: sender.clone(),
                contract,
                msg: exec.msg.clone(),
                callback_code_hash: exec.callback_code_hash.clone(),
                sent_funds,
            })])
        }
        WasmMsg::Instantiate(inst) => {
            let init_funds = Coins::from_wire(&inst.send)?;

            Ok(vec![LedgerMsg::InstantiateContract(MsgInstantiateContract {
                sender: sender.clone(),
                code_id: inst.code_id,
                label: inst.label.clone(),
                callback_code_hash: inst.callback_code_hash.clone(),
                init_msg: inst.msg.clone(),
                init_funds,
            })])
        }
    }
}
