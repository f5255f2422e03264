// Типы ошибок

use crate::error::CryptoError;
use thiserror::Error;

/// Message shown for every failed decryption, whatever the cause.
pub const DECRYPTION_FAILED_MESSAGE: &str = "Decryption failed or integrity check failed";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WhisperError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Invalid key material: {0}")]
    InvalidKeyMaterial(String),

    #[error("Invalid encrypted package: {0}")]
    InvalidPackage(#[from] PackageError),

    #[error("{}", DECRYPTION_FAILED_MESSAGE)]
    DecryptionFailed,

    #[error("Key length unattainable: needed {required} bits, got {obtained} after {attempts} attempts")]
    KeyLengthUnattainable {
        required: usize,
        obtained: usize,
        attempts: u32,
    },

    #[error("Cryptography error: {0}")]
    Crypto(#[from] CryptoError),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

/// Причина, по которой пакет не прошёл структурную проверку
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PackageError {
    #[error("token is not valid base64 or UTF-8")]
    UndecodableToken,

    #[error("payload is not valid JSON: {0}")]
    NotJson(String),

    #[error("payload is not a JSON object")]
    NotAnObject,

    #[error("missing required field `{0}`")]
    MissingField(&'static str),

    #[error("field `{field}` must be {expected}")]
    WrongType {
        field: &'static str,
        expected: &'static str,
    },

    #[error("unsupported package version {0}")]
    UnsupportedVersion(u64),

    #[error("unsupported algorithm `{0}`")]
    UnsupportedAlgorithm(String),

    #[error("unsupported key derivation function `{0}`")]
    UnsupportedKdf(String),

    #[error("iteration count {0} is out of range")]
    IterationsOutOfRange(u64),
}

pub type Result<T> = std::result::Result<T, WhisperError>;

impl WhisperError {
    /// `true` for failures raised before any cryptographic work started.
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            WhisperError::InvalidArgument(_)
                | WhisperError::InvalidKeyMaterial(_)
                | WhisperError::InvalidPackage(_)
        )
    }
}
