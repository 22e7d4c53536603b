use thiserror::Error;

/// Coarse classification of encoding failures.
///
/// Every variant is a deterministic rejection of contract-supplied input;
/// none of them can succeed on retry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    MalformedMessage,
    InvalidAddress,
    InvalidAmount,
    UnsupportedOperation,
}

/// Errors returned while turning a contract message into ledger messages
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EncodeError {
    #[error("malformed message: {0}")]
    MalformedMessage(String),

    #[error("invalid address in {field}: {reason}")]
    InvalidAddress { field: &'static str, reason: String },

    #[error("invalid amount {amount:?} for denom {denom:?}: {reason}")]
    InvalidAmount {
        denom: String,
        amount: String,
        reason: String,
    },

    #[error("unsupported operation: {0}")]
    UnsupportedOperation(String),
}

impl EncodeError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            EncodeError::MalformedMessage(_) => ErrorKind::MalformedMessage,
            EncodeError::InvalidAddress { .. } => ErrorKind::InvalidAddress,
            EncodeError::InvalidAmount { .. } => ErrorKind::InvalidAmount,
            EncodeError::UnsupportedOperation(_) => ErrorKind::UnsupportedOperation,
        }
    }

    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        EncodeError::MalformedMessage(reason.into())
    }

    pub(crate) fn invalid_address(field: &'static str, reason: impl Into<String>) -> Self {
        EncodeError::InvalidAddress {
            field,
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid_amount(denom: &str, amount: &str, reason: impl Into<String>) -> Self {
        EncodeError::InvalidAmount {
            denom: denom.to_string(),
            amount: amount.to_string(),
            reason: reason.into(),
        }
    }
}
