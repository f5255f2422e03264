//! AES-256-GCM encryption of text under a key derived from BB84 bits.
//!
//! `encrypt` derives a key with a fresh salt, draws a fresh 12-byte IV and
//! returns a self-describing [`EncryptedPackage`]. `decrypt` validates the
//! package shape first, then re-derives the key from the package's salt and
//! iteration count. Every failure after validation surfaces as the same
//! `DecryptionFailed`, so a wrong key and a tampered package look identical.

use crate::config::Config;
use crate::crypto::kdf::{KdfOptions, KeyDerivation};
use crate::crypto::provider::CryptoProvider;
use crate::protocol::package::EncryptedPackage;
use crate::protocol::validation::validate_package;
use crate::protocol::wire::{encode_token, parse_token};
use crate::utils::b64;
use crate::utils::bits::Bit;
use crate::utils::error::{Result, WhisperError};
use tracing::debug;
use zeroize::Zeroizing;

#[derive(Debug, Clone, Default)]
pub struct EncryptOptions {
    pub salt: Option<Vec<u8>>,
    pub iv: Option<Vec<u8>>,
    pub iterations: Option<u32>,
    /// Authenticated but not encrypted; the decrypting side must supply the same bytes.
    pub aad: Option<Vec<u8>>,
}

impl EncryptOptions {
    pub fn with_aad(aad: impl Into<Vec<u8>>) -> Self {
        Self {
            aad: Some(aad.into()),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct DecryptOptions {
    pub aad: Option<Vec<u8>>,
}

impl DecryptOptions {
    pub fn with_aad(aad: impl Into<Vec<u8>>) -> Self {
        Self {
            aad: Some(aad.into()),
        }
    }
}

/// A package together with its single-token text form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SealedMessage {
    pub package: EncryptedPackage,
    pub token: String,
}

pub struct AuthenticatedCipher<P: CryptoProvider> {
    kdf: KeyDerivation<P>,
}

impl<P: CryptoProvider> AuthenticatedCipher<P> {
    pub fn new(provider: P, config: Config) -> Self {
        Self {
            kdf: KeyDerivation::new(provider, config),
        }
    }

    pub fn key_derivation(&self) -> &KeyDerivation<P> {
        &self.kdf
    }

    fn config(&self) -> &Config {
        self.kdf.config()
    }

    /// Зашифровать текст квантовым ключом
    ///
    /// # Errors
    ///
    /// - `InvalidArgument` for empty plaintext or a supplied IV of the wrong length.
    /// - `InvalidKeyMaterial` / `InvalidArgument` from key derivation.
    /// - `Crypto` if the RNG or AEAD fails.
    pub fn encrypt(
        &self,
        plaintext: &str,
        bits: &[Bit],
        options: &EncryptOptions,
    ) -> Result<SealedMessage> {
        if plaintext.is_empty() {
            return Err(WhisperError::InvalidArgument("Plaintext is empty".to_string()));
        }

        let nonce_length = self.config().nonce_length;
        if let Some(iv) = &options.iv {
            if iv.len() != nonce_length {
                return Err(WhisperError::InvalidArgument(format!(
                    "IV must be {} bytes, got {}",
                    nonce_length,
                    iv.len()
                )));
            }
        }

        let derived = self.kdf.derive_key(
            bits,
            &KdfOptions {
                salt: options.salt.clone(),
                iterations: options.iterations,
            },
        )?;

        let provider = self.kdf.provider();
        let iv = match &options.iv {
            Some(iv) => iv.clone(),
            None => provider.generate_nonce(nonce_length)?,
        };

        let ciphertext = provider.aead_encrypt(
            derived.key(),
            &iv,
            plaintext.as_bytes(),
            options.aad.as_deref(),
        )?;

        let package = EncryptedPackage::new(
            self.config().package_version,
            provider.algorithm_id(),
            provider.kdf_id(),
            derived.iterations,
            &iv,
            &derived.salt,
            &ciphertext,
        );
        let token = encode_token(&package)?;

        debug!(
            plaintext_len = plaintext.len(),
            ciphertext_len = ciphertext.len(),
            iterations = derived.iterations,
            "Message encrypted"
        );

        Ok(SealedMessage { package, token })
    }

    /// Расшифровать пакет
    ///
    /// # Errors
    ///
    /// - `InvalidPackage` if the header is unsupported; nothing is derived.
    /// - `InvalidKeyMaterial` if `bits` is not usable key material.
    /// - `DecryptionFailed` for everything else, without saying why.
    pub fn decrypt(
        &self,
        package: &EncryptedPackage,
        bits: &[Bit],
        options: &DecryptOptions,
    ) -> Result<String> {
        let package = validate_package(package, self.config()).into_result()?;

        let outcome = self.open(&package, bits, options);
        match &outcome {
            Ok(plaintext) => debug!(plaintext_len = plaintext.len(), "Message decrypted"),
            Err(WhisperError::DecryptionFailed) => debug!("Decryption failed"),
            Err(_) => {}
        }
        outcome
    }

    /// Same as [`decrypt`](Self::decrypt) for a text token (base64-wrapped or raw JSON).
    pub fn decrypt_token(
        &self,
        token: &str,
        bits: &[Bit],
        options: &DecryptOptions,
    ) -> Result<String> {
        let package = parse_token(token, self.config()).into_result()?;
        self.decrypt(&package, bits, options)
    }

    fn open(&self, package: &EncryptedPackage, bits: &[Bit], options: &DecryptOptions) -> Result<String> {
        let iv = b64::decode(&package.iv).map_err(|_| WhisperError::DecryptionFailed)?;
        let salt = b64::decode(&package.salt).map_err(|_| WhisperError::DecryptionFailed)?;
        let ciphertext = b64::decode(&package.ct).map_err(|_| WhisperError::DecryptionFailed)?;

        let derived = self
            .kdf
            .derive_key(
                bits,
                &KdfOptions {
                    salt: Some(salt),
                    iterations: Some(package.iter),
                },
            )
            .map_err(|e| match e {
                WhisperError::InvalidKeyMaterial(_) => e,
                _ => WhisperError::DecryptionFailed,
            })?;

        if iv.len() != self.config().nonce_length {
            return Err(WhisperError::DecryptionFailed);
        }

        let plaintext = self
            .kdf
            .provider()
            .aead_decrypt(derived.key(), &iv, &ciphertext, options.aad.as_deref())
            .map(Zeroizing::new)
            .map_err(|_| WhisperError::DecryptionFailed)?;

        match std::str::from_utf8(&plaintext) {
            Ok(text) if !text.is_empty() => Ok(text.to_string()),
            _ => Err(WhisperError::DecryptionFailed),
        }
    }
}
