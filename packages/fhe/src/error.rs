use common::Address;
use thiserror::Error;

use crate::handle::{Handle, Width};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FheError {
    #[error("Unknown ciphertext handle {0}")]
    UnknownHandle(Handle),

    #[error("Malformed handle: {0}")]
    MalformedHandle(String),

    #[error("Malformed ABI encoding: {0}")]
    MalformedEncoding(String),

    #[error("Input proof rejected for handle {0}")]
    InvalidInputProof(Handle),

    #[error("Decryption proof rejected")]
    InvalidDecryptionProof,

    #[error("Expected a {expected} ciphertext, got {actual}")]
    WidthMismatch { expected: Width, actual: Width },

    #[error("Cannot narrow a {from} ciphertext to {to}")]
    NarrowingCast { from: Width, to: Width },

    #[error("Value {value} does not fit in {width}")]
    ValueOutOfRange { value: u128, width: Width },

    #[error("{account} is not allowed to use handle {handle}")]
    AccessDenied { handle: Handle, account: Address },

    #[error("Handle {0} is not publicly decryptable")]
    NotPubliclyDecryptable(Handle),

    #[error("Encryption service unavailable: {0}")]
    Unavailable(String),
}
