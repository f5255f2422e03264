//! Defines the CryptoProvider trait for crypto-agility.

use crate::error::CryptoError;

/// Trait that formalizes the cryptographic primitives the cipher needs.
///
/// A provider is an explicit object: construct it once and hand it to the
/// components that use it. Implementations hold no mutable state, so a
/// single instance can serve concurrent calls.
pub trait CryptoProvider: Send + Sync {
    /// Algorithm identifier written into packages (e.g. "AES-256-GCM").
    fn algorithm_id(&self) -> &'static str;

    /// KDF identifier written into packages (e.g. "PBKDF2-SHA256").
    fn kdf_id(&self) -> &'static str;

    /// Derives `out.len()` bytes from `password` and `salt` with the suite's
    /// password-based KDF.
    fn derive_key(
        &self,
        password: &[u8],
        salt: &[u8],
        iterations: u32,
        out: &mut [u8],
    ) -> Result<(), CryptoError>;

    /// Performs AEAD encryption.
    /// `key`: The symmetric encryption key.
    /// `nonce`: The unique nonce for this encryption.
    /// `plaintext`: The data to encrypt.
    /// `associated_data`: Optional associated data (authenticated but not encrypted).
    ///
    /// Returns ciphertext with the authentication tag appended.
    fn aead_encrypt(
        &self,
        key: &[u8],
        nonce: &[u8],
        plaintext: &[u8],
        associated_data: Option<&[u8]>,
    ) -> Result<Vec<u8>, CryptoError>;

    /// Performs AEAD decryption.
    /// `key`: The symmetric encryption key.
    /// `nonce`: The unique nonce used for encryption.
    /// `ciphertext`: The encrypted data with its tag.
    /// `associated_data`: Optional associated data.
    fn aead_decrypt(
        &self,
        key: &[u8],
        nonce: &[u8],
        ciphertext: &[u8],
        associated_data: Option<&[u8]>,
    ) -> Result<Vec<u8>, CryptoError>;

    /// Fills `dest` with cryptographically secure random bytes.
    fn fill_random(&self, dest: &mut [u8]) -> Result<(), CryptoError>;

    /// Generates a cryptographically secure random nonce of a specified length.
    fn generate_nonce(&self, len: usize) -> Result<Vec<u8>, CryptoError> {
        let mut nonce = vec![0u8; len];
        self.fill_random(&mut nonce)?;
        Ok(nonce)
    }
}
