/// Contract-message to ledger-message encoder
///
/// The encoder is a fixed table of per-category conversion rules. It holds no
/// mutable state, so one instance can be built at start-up and shared across
/// threads by reference.

mod bank;
mod error;
mod staking;
mod wasm;


pub use bank::encode_bank_msg;
pub use error::{EncodeError, ErrorKind};
pub use staking::encode_staking_msg;
pub use wasm::encode_wasm_msg;

use std::fmt;

use serde_json::Value;
use tracing::{debug, warn};

use crate::chain::address::{AccountAddress, AddressCodec};
use crate::chain::ledger::LedgerMsg;
use crate::chain::messages::{BankMsg, ContractMsg, RawContractMsg, StakingMsg, WasmMsg};

pub type BankEncoder = fn(&AccountAddress, &BankMsg, &AddressCodec) -> Result<Vec<LedgerMsg>, EncodeError>;
pub type WasmEncoder = fn(&AccountAddress, &WasmMsg, &AddressCodec) -> Result<Vec<LedgerMsg>, EncodeError>;
pub type StakingEncoder = fn(&AccountAddress, &StakingMsg, &AddressCodec) -> Result<Vec<LedgerMsg>, EncodeError>;
pub type CustomEncoder = fn(&AccountAddress, &Value) -> Result<Vec<LedgerMsg>, EncodeError>;

/// One conversion rule per message category
#[derive(Clone, Copy)]
pub struct MessageEncoders {
    pub bank: BankEncoder,
    pub wasm: WasmEncoder,
    pub staking: StakingEncoder,
    pub custom: CustomEncoder,
}

impl fmt::Debug for MessageEncoders {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MessageEncoders").finish_non_exhaustive()
    }
}

impl Default for MessageEncoders {
    fn default() -> Self {
        Self {
            bank: encode_bank_msg,
            wasm: encode_wasm_msg,
            staking: encode_staking_msg,
            custom: no_custom_msg,
        }
    }
}

impl MessageEncoders {
    /// Replace the rule for chain-specific custom messages
    pub fn with_custom(mut self, custom: CustomEncoder) -> Self {
        self.custom = custom;
        self
    }
}

/// Default custom rule: custom messages are not supported
pub fn no_custom_msg(_sender: &AccountAddress, _msg: &Value) -> Result<Vec<LedgerMsg>, EncodeError> {
    Err(EncodeError::UnsupportedOperation("custom message".to_string()))
}

#[derive(Debug, Clone)]
pub struct Encoder {
    codec: AddressCodec,
    encoders: MessageEncoders,
}

impl Encoder {
    pub fn new(codec: AddressCodec) -> Self {
        Self::with_encoders(codec, MessageEncoders::default())
    }

    pub fn with_encoders(codec: AddressCodec, encoders: MessageEncoders) -> Self {
        Self { codec, encoders }
    }

    pub fn codec(&self) -> &AddressCodec {
        &self.codec
    }

    /// Convert one contract message into the ordered ledger messages that
    /// implement it, executed with the authority of `sender`.
    ///
    /// Either the complete sequence is returned or an error; never a prefix.
    pub fn encode(&self, sender: &AccountAddress, msg: &ContractMsg) -> Result<Vec<LedgerMsg>, EncodeError> {
        let kind = msg.kind();
        debug!(kind, sender = %sender, "Encoding contract message");

        let result = match msg {
            ContractMsg::Bank(bank) => (self.encoders.bank)(sender, bank, &self.codec),
            ContractMsg::Wasm(wasm) => (self.encoders.wasm)(sender, wasm, &self.codec),
            ContractMsg::Staking(staking) => (self.encoders.staking)(sender, staking, &self.codec),
            ContractMsg::Custom(custom) => (self.encoders.custom)(sender, custom),
        };

        match &result {
            Ok(msgs) => debug!(kind, count = msgs.len(), "Encoded contract message"),
            Err(e) => warn!(kind, error_kind = ?e.kind(), "Rejected contract message: {}", e),
        }
        result
    }

    /// Check the one-variant shape of a host-decoded message, then encode it
    pub fn encode_raw(&self, sender: &AccountAddress, msg: RawContractMsg) -> Result<Vec<LedgerMsg>, EncodeError> {
        let msg = ContractMsg::try_from(msg).map_err(|e| {
            warn!(error_kind = ?e.kind(), "Rejected contract message: {}", e);
            e
        })?;
        self.encode(sender, &msg)
    }
}

/// Fail with a malformed-message error when a required string field is empty
pub(crate) fn require<'a>(field: &'static str, value: &'a str) -> Result<&'a str, EncodeError> {
    if value.is_empty() {
        return Err(EncodeError::malformed(format!("missing required field {}", field)));
    }
    Ok(value)
}
