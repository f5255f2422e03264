use crate::config::{ALGORITHM_ID, KDF_ID};
use crate::crypto::provider::CryptoProvider;
use crate::error::CryptoError;
use aes_gcm::{
    aead::{Aead, Payload},
    Aes256Gcm, KeyInit, Nonce,
};
use pbkdf2::pbkdf2_hmac;
use rand::rngs::OsRng;
use rand_core::RngCore;
use sha2::Sha256;

const AES_GCM_NONCE_LENGTH: usize = 12;

/// Concrete implementation of `CryptoProvider`: AES-256-GCM + PBKDF2-HMAC-SHA256.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClassicSuiteProvider;

impl ClassicSuiteProvider {
    pub fn new() -> Self {
        Self
    }

    fn cipher(key: &[u8]) -> Result<Aes256Gcm, CryptoError> {
        Aes256Gcm::new_from_slice(key).map_err(|_| {
            CryptoError::InvalidInputError(format!(
                "AES-256-GCM key must be 32 bytes, got {}",
                key.len()
            ))
        })
    }

    fn check_nonce(nonce: &[u8]) -> Result<(), CryptoError> {
        if nonce.len() != AES_GCM_NONCE_LENGTH {
            return Err(CryptoError::InvalidInputError(format!(
                "AES-GCM nonce must be {} bytes, got {}",
                AES_GCM_NONCE_LENGTH,
                nonce.len()
            )));
        }
        Ok(())
    }
}

impl CryptoProvider for ClassicSuiteProvider {
    fn algorithm_id(&self) -> &'static str {
        ALGORITHM_ID
    }

    fn kdf_id(&self) -> &'static str {
        KDF_ID
    }

    fn derive_key(
        &self,
        password: &[u8],
        salt: &[u8],
        iterations: u32,
        out: &mut [u8],
    ) -> Result<(), CryptoError> {
        if iterations == 0 {
            return Err(CryptoError::KeyDerivationError(
                "PBKDF2 needs at least one iteration".to_string(),
            ));
        }
        if out.is_empty() {
            return Err(CryptoError::KeyDerivationError(
                "requested an empty key".to_string(),
            ));
        }

        pbkdf2_hmac::<Sha256>(password, salt, iterations, out);
        Ok(())
    }

    fn aead_encrypt(
        &self,
        key: &[u8],
        nonce: &[u8],
        plaintext: &[u8],
        associated_data: Option<&[u8]>,
    ) -> Result<Vec<u8>, CryptoError> {
        Self::check_nonce(nonce)?;
        let cipher = Self::cipher(key)?;
        let nonce_ref = Nonce::from_slice(nonce);

        let payload = Payload {
            msg: plaintext,
            aad: associated_data.unwrap_or(b""),
        };

        let ciphertext_with_tag = cipher
            .encrypt(nonce_ref, payload)
            .map_err(|e| CryptoError::AeadEncryptionError(e.to_string()))?;
        Ok(ciphertext_with_tag)
    }

    fn aead_decrypt(
        &self,
        key: &[u8],
        nonce: &[u8],
        ciphertext: &[u8],
        associated_data: Option<&[u8]>,
    ) -> Result<Vec<u8>, CryptoError> {
        Self::check_nonce(nonce)?;
        let cipher = Self::cipher(key)?;
        let nonce_ref = Nonce::from_slice(nonce);

        let payload = Payload {
            msg: ciphertext,
            aad: associated_data.unwrap_or(b""),
        };

        let plaintext = cipher
            .decrypt(nonce_ref, payload)
            .map_err(|e| CryptoError::AeadDecryptionError(e.to_string()))?;
        Ok(plaintext)
    }

    fn fill_random(&self, dest: &mut [u8]) -> Result<(), CryptoError> {
        OsRng.try_fill_bytes(dest)?;
        Ok(())
    }
}
