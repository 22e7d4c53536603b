/// Role-specific bech32 address decoding
///
/// Account and validator addresses share the same bech32 framing and differ only
/// in their human-readable prefix. They are decoded by two separate functions and
/// land in two separate types, so a validator field can never be satisfied by an
/// account address that happens to be well formed.

use std::fmt;

use bech32::primitives::decode::CheckedHrpstring;
use bech32::{Bech32, Hrp};
use serde::{Serialize, Serializer};
use thiserror::Error;

use crate::encoder::EncodeError;

pub const DEFAULT_ACCOUNT_PREFIX: &str = "secret";
pub const DEFAULT_VALIDATOR_PREFIX: &str = "secretvaloper";

/// Upper bound on raw address length accepted by the ledger
pub const MAX_ADDRESS_LEN: usize = 255;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    #[error("invalid bech32 prefix {prefix:?}: {reason}")]
    InvalidPrefix { prefix: String, reason: String },

    #[error("account and validator prefixes must differ (both are {0:?})")]
    SamePrefix(String),
}

/// A validated ordinary account address
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AccountAddress {
    bytes: Vec<u8>,
    bech32: String,
}

/// A validated validator operator address
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ValidatorAddress {
    bytes: Vec<u8>,
    bech32: String,
}

impl AccountAddress {
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn as_str(&self) -> &str {
        &self.bech32
    }
}

impl ValidatorAddress {
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn as_str(&self) -> &str {
        &self.bech32
    }
}

impl fmt::Display for AccountAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.bech32)
    }
}

impl fmt::Display for ValidatorAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.bech32)
    }
}

impl Serialize for AccountAddress {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.bech32)
    }
}

impl Serialize for ValidatorAddress {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.bech32)
    }
}

/// Bech32 codec for the two address roles of one chain
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressCodec {
    account_prefix: String,
    validator_prefix: String,
}

impl Default for AddressCodec {
    fn default() -> Self {
        Self {
            account_prefix: DEFAULT_ACCOUNT_PREFIX.to_string(),
            validator_prefix: DEFAULT_VALIDATOR_PREFIX.to_string(),
        }
    }
}

impl AddressCodec {
    /// Create a codec, checking that both prefixes are usable bech32 HRPs
    pub fn new(account_prefix: &str, validator_prefix: &str) -> Result<Self, CodecError> {
        let account = parse_prefix(account_prefix)?;
        let validator = parse_prefix(validator_prefix)?;
        if account == validator {
            return Err(CodecError::SamePrefix(account));
        }

        Ok(Self {
            account_prefix: account,
            validator_prefix: validator,
        })
    }

    pub fn account_prefix(&self) -> &str {
        &self.account_prefix
    }

    pub fn validator_prefix(&self) -> &str {
        &self.validator_prefix
    }

    /// Decode an ordinary account address
    pub fn decode_account(&self, field: &'static str, addr: &str) -> Result<AccountAddress, EncodeError> {
        let (bytes, bech32) = decode_with_prefix(field, addr, &self.account_prefix)?;
        Ok(AccountAddress { bytes, bech32 })
    }

    /// Decode a validator operator address. Account addresses are rejected.
    pub fn decode_validator(&self, field: &'static str, addr: &str) -> Result<ValidatorAddress, EncodeError> {
        let (bytes, bech32) = decode_with_prefix(field, addr, &self.validator_prefix)?;
        Ok(ValidatorAddress { bytes, bech32 })
    }

    pub fn account_from_bytes(&self, field: &'static str, bytes: Vec<u8>) -> Result<AccountAddress, EncodeError> {
        let bech32 = encode_with_prefix(field, &bytes, &self.account_prefix)?;
        Ok(AccountAddress { bytes, bech32 })
    }

    pub fn validator_from_bytes(&self, field: &'static str, bytes: Vec<u8>) -> Result<ValidatorAddress, EncodeError> {
        let bech32 = encode_with_prefix(field, &bytes, &self.validator_prefix)?;
        Ok(ValidatorAddress { bytes, bech32 })
    }
}

fn parse_prefix(prefix: &str) -> Result<String, CodecError> {
    let hrp = Hrp::parse(prefix).map_err(|e| CodecError::InvalidPrefix {
        prefix: prefix.to_string(),
        reason: e.to_string(),
    })?;
    Ok(hrp.to_lowercase())
}

fn check_length(field: &'static str, bytes: &[u8]) -> Result<(), EncodeError> {
    if bytes.is_empty() {
        return Err(EncodeError::invalid_address(field, "address bytes are empty"));
    }
    if bytes.len() > MAX_ADDRESS_LEN {
        return Err(EncodeError::invalid_address(
            field,
            format!("address length {} exceeds {}", bytes.len(), MAX_ADDRESS_LEN),
        ));
    }
    Ok(())
}

/// Decode `addr` and return its bytes together with the canonical lowercase text.
fn decode_with_prefix(field: &'static str, addr: &str, expected: &str) -> Result<(Vec<u8>, String), EncodeError> {
    if addr.trim().is_empty() {
        return Err(EncodeError::invalid_address(field, "empty address string"));
    }

    // Classic bech32 checksum only; bech32m strings are not ledger addresses.
    let checked = CheckedHrpstring::new::<Bech32>(addr)
        .map_err(|e| EncodeError::invalid_address(field, e.to_string()))?;

    let hrp = checked.hrp().to_lowercase();
    if hrp != expected {
        return Err(EncodeError::invalid_address(
            field,
            format!("expected prefix {:?}, got {:?}", expected, hrp),
        ));
    }

    // byte_iter drops leftover padding bits, so a string with an extra group or
    // non-zero padding still yields bytes. Only the canonical encoding of those
    // bytes is accepted.
    let bytes: Vec<u8> = checked.byte_iter().collect();
    let canonical = encode_with_prefix(field, &bytes, expected)?;
    if canonical != addr.to_lowercase() {
        return Err(EncodeError::invalid_address(
            field,
            "non-canonical bech32 data (invalid padding)",
        ));
    }
    Ok((bytes, canonical))
}

fn encode_with_prefix(field: &'static str, bytes: &[u8], prefix: &str) -> Result<String, EncodeError> {
    check_length(field, bytes)?;
    let hrp = Hrp::parse(prefix).map_err(|e| EncodeError::invalid_address(field, e.to_string()))?;
    bech32::encode::<Bech32>(hrp, bytes).map_err(|e| EncodeError::invalid_address(field, e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::ErrorKind;
    use bech32::primitives::iter::{ByteIterExt, Fe32IterExt};
    use bech32::Fe32;

    fn codec() -> AddressCodec {
        AddressCodec::default()
    }

    /// Checksum arbitrary field elements under the account prefix
    fn checksummed(fes: Vec<Fe32>) -> String {
        let hrp = Hrp::parse(DEFAULT_ACCOUNT_PREFIX).unwrap();
        fes.into_iter().with_checksum::<Bech32>(&hrp).chars().collect()
    }

    #[test]
    fn test_rejects_extra_trailing_group() {
        let mut fes: Vec<Fe32> = [7u8; 20].iter().copied().bytes_to_fes().collect();
        fes.push(Fe32::Q);
        let padded = checksummed(fes);

        // The checksum itself is valid; only the data part is non-canonical.
        assert!(CheckedHrpstring::new::<Bech32>(&padded).is_ok());

        let err = codec().decode_account("to_address", &padded).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidAddress);
    }

    #[test]
    fn test_rejects_non_zero_padding_bits() {
        // 21 bytes = 168 bits, packed into 34 groups with 2 padding bits.
        let mut fes: Vec<Fe32> = [9u8; 21].iter().copied().bytes_to_fes().collect();
        assert_eq!(fes.len(), 34);
        let last = fes.len() - 1;
        fes[last] = Fe32::try_from(fes[last].to_u8() | 1).unwrap();
        let dirty = checksummed(fes);

        assert!(CheckedHrpstring::new::<Bech32>(&dirty).is_ok());

        let err = codec().decode_account("to_address", &dirty).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidAddress);

        // The same bytes with clean padding decode fine.
        let clean = codec().account_from_bytes("sender", vec![9u8; 21]).unwrap();
        assert!(codec().decode_account("to_address", clean.as_str()).is_ok());
    }

    #[test]
    fn test_validator_rejects_non_canonical_data() {
        let hrp = Hrp::parse(DEFAULT_VALIDATOR_PREFIX).unwrap();
        let mut fes: Vec<Fe32> = [12u8; 20].iter().copied().bytes_to_fes().collect();
        fes.push(Fe32::Q);
        let padded: String = fes.into_iter().with_checksum::<Bech32>(&hrp).chars().collect();

        let err = codec().decode_validator("validator", &padded).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidAddress);
    }

    #[test]
    fn test_account_roundtrip() {
        let codec = codec();
        let addr = codec.account_from_bytes("sender", vec![7u8; 20]).unwrap();
        assert!(addr.as_str().starts_with("secret1"));

        let decoded = codec.decode_account("to_address", addr.as_str()).unwrap();
        assert_eq!(decoded, addr);
        assert_eq!(decoded.as_bytes(), &[7u8; 20]);
    }

    #[test]
    fn test_validator_rejects_account_address() {
        let codec = codec();
        let account = codec.account_from_bytes("sender", vec![12u8; 20]).unwrap();

        let err = codec.decode_validator("validator", account.as_str()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidAddress);
        assert!(err.to_string().contains("secretvaloper"));
    }

    #[test]
    fn test_account_rejects_validator_address() {
        let codec = codec();
        let validator = codec.validator_from_bytes("validator", vec![12u8; 20]).unwrap();
        assert!(validator.as_str().starts_with("secretvaloper1"));

        let err = codec.decode_account("to_address", validator.as_str()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidAddress);
    }

    #[test]
    fn test_garbage_and_empty_addresses() {
        let codec = codec();
        for input in ["", "   ", "xrnd1d02kd90n38qvr3qb9qof83fn2d2", "secret", "not an address"] {
            let err = codec.decode_account("to_address", input).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidAddress, "input {:?}", input);
        }
    }

    #[test]
    fn test_checksum_is_verified() {
        let codec = codec();
        let addr = codec.account_from_bytes("sender", vec![3u8; 20]).unwrap();

        // Flip the final checksum character to another valid charset symbol.
        let mut text = addr.as_str().to_string();
        let last = text.pop().unwrap();
        text.push(if last == 'q' { 'p' } else { 'q' });

        assert!(codec.decode_account("to_address", &text).is_err());
    }

    #[test]
    fn test_uppercase_address_is_accepted() {
        let codec = codec();
        let addr = codec.account_from_bytes("sender", vec![9u8; 20]).unwrap();
        let upper = addr.as_str().to_uppercase();

        let decoded = codec.decode_account("to_address", &upper).unwrap();
        assert_eq!(decoded, addr);
    }

    #[test]
    fn test_byte_length_limits() {
        let codec = codec();
        assert!(codec.account_from_bytes("sender", vec![]).is_err());
        assert!(codec.account_from_bytes("sender", vec![1u8; MAX_ADDRESS_LEN]).is_ok());
        assert!(codec.account_from_bytes("sender", vec![1u8; MAX_ADDRESS_LEN + 1]).is_err());
    }

    #[test]
    fn test_custom_prefixes() {
        let codec = AddressCodec::new("inj", "injvaloper").unwrap();
        let addr = codec.account_from_bytes("sender", vec![1u8; 20]).unwrap();
        assert!(addr.as_str().starts_with("inj1"));

        assert!(AddressCodec::default().decode_account("to_address", addr.as_str()).is_err());
    }

    #[test]
    fn test_invalid_codec_prefixes() {
        assert!(matches!(
            AddressCodec::new("secret", "secret"),
            Err(CodecError::SamePrefix(_))
        ));
        assert!(matches!(
            AddressCodec::new("", "secretvaloper"),
            Err(CodecError::InvalidPrefix { .. })
        ));
    }

    #[test]
    fn test_serializes_as_bech32_string() {
        let addr = codec().account_from_bytes("sender", vec![5u8; 20]).unwrap();
        let json = serde_json::to_string(&addr).unwrap();
        assert_eq!(json, format!("\"{}\"", addr));
    }
}
