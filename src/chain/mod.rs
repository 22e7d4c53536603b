pub mod address;
pub mod coins;
pub mod ledger;
pub mod messages;
pub mod proto;

pub use address::{AccountAddress, AddressCodec, ValidatorAddress};
pub use coins::{Coin, Coins, WireCoin};
pub use ledger::LedgerMsg;
pub use messages::{BankMsg, ContractMsg, RawContractMsg, StakingMsg, WasmMsg};
