// Library exports for compute_msg_encoder

pub mod chain;
pub mod config;
pub mod encoder;

// Re-export main types for convenience
pub use chain::{AccountAddress, AddressCodec, ContractMsg, LedgerMsg, RawContractMsg, ValidatorAddress};
pub use encoder::{EncodeError, Encoder, ErrorKind, MessageEncoders};
