// Деривация симметричного ключа из просеянных битов BB84
// Биты упаковываются в байты (MSB first) и прогоняются через PBKDF2-SHA256

use crate::config::Config;
use crate::crypto::provider::CryptoProvider;
use crate::utils::bits::{bits_to_bytes, validate_key_bits, Bit};
use crate::utils::error::{Result, WhisperError};
use std::fmt;
use zeroize::Zeroizing;

// Compile-time константа для размера ключа (должна совпадать с Config::default())
pub const KEY_LENGTH: usize = 32;

/// Optional overrides for [`KeyDerivation::derive_key`].
#[derive(Debug, Clone, Default)]
pub struct KdfOptions {
    /// Reuse a salt (e.g. the one from a received package). Fresh random otherwise.
    pub salt: Option<Vec<u8>>,
    /// Iteration count; the configured default otherwise.
    pub iterations: Option<u32>,
}

/// 256-bit AES key plus the parameters needed to reproduce it.
pub struct DerivedKey {
    key: Zeroizing<[u8; KEY_LENGTH]>,
    pub salt: Vec<u8>,
    pub iterations: u32,
}

impl DerivedKey {
    pub fn key(&self) -> &[u8; KEY_LENGTH] {
        &self.key
    }
}

impl fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DerivedKey")
            .field("key", &"<redacted>")
            .field("salt_len", &self.salt.len())
            .field("iterations", &self.iterations)
            .finish()
    }
}

/// Turns raw key bits into an AES-256 key.
pub struct KeyDerivation<P: CryptoProvider> {
    provider: P,
    config: Config,
}

impl<P: CryptoProvider> KeyDerivation<P> {
    pub fn new(provider: P, config: Config) -> Self {
        Self { provider, config }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Деривировать ключ из битов
    ///
    /// # Errors
    ///
    /// - `InvalidKeyMaterial` if `bits` is shorter than `min_key_length` or
    ///   holds anything but 0/1. Checked before any cryptographic work.
    /// - `InvalidArgument` for an iteration count outside `1..=max_pbkdf2_iterations`.
    /// - `Crypto` if the RNG or the KDF fails.
    pub fn derive_key(&self, bits: &[Bit], options: &KdfOptions) -> Result<DerivedKey> {
        validate_key_bits(bits, self.config.min_key_length)?;

        let iterations = options.iterations.unwrap_or(self.config.pbkdf2_iterations);
        if iterations == 0 || iterations > self.config.max_pbkdf2_iterations {
            return Err(WhisperError::InvalidArgument(format!(
                "iteration count must be in 1..={}, got {}",
                self.config.max_pbkdf2_iterations, iterations
            )));
        }

        let salt = match &options.salt {
            Some(salt) => salt.clone(),
            None => self.provider.generate_nonce(self.config.salt_length)?,
        };

        let material = Zeroizing::new(bits_to_bytes(bits));
        let mut key = Zeroizing::new([0u8; KEY_LENGTH]);
        self.provider
            .derive_key(&material, &salt, iterations, &mut *key)?;

        Ok(DerivedKey {
            key,
            salt,
            iterations,
        })
    }
}
