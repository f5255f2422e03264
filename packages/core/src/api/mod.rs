// Публичный API
// Высокоуровневые методы: генерация ключа, сверка ключей, шифрование сообщений

pub mod keys;

pub use keys::{compare_keys, KeyMatch};

use crate::config::Config;
use crate::crypto::cipher::{AuthenticatedCipher, DecryptOptions, EncryptOptions, SealedMessage};
use crate::crypto::provider::CryptoProvider;
use crate::crypto::suites::classic::ClassicSuiteProvider;
use crate::quantum::guarantor::{GuaranteedSession, KeyLengthGuarantor};
use crate::quantum::random::{RandomBitSource, RngBitSource};
use crate::utils::bits::{validate_key_bits, Bit};
use crate::utils::error::Result;
use rand::rngs::StdRng;
use tracing::info;

/// Главный API: one config, one provider and one randomness source, wired
/// through every component.
pub struct QuantumWhisper<P: CryptoProvider = ClassicSuiteProvider, S: RandomBitSource = RngBitSource<StdRng>> {
    config: Config,
    guarantor: KeyLengthGuarantor<S>,
    cipher: AuthenticatedCipher<P>,
}

impl QuantumWhisper {
    /// Default suite and an entropy-seeded bit source.
    pub fn new(config: Config) -> Result<Self> {
        Self::with_parts(config, ClassicSuiteProvider, RngBitSource::from_entropy())
    }
}

impl<P: CryptoProvider, S: RandomBitSource> QuantumWhisper<P, S> {
    /// # Errors
    ///
    /// `InvalidArgument` if `config` does not pass [`Config::validate`].
    pub fn with_parts(config: Config, provider: P, source: S) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            guarantor: KeyLengthGuarantor::new(source, config.clone()),
            cipher: AuthenticatedCipher::new(provider, config.clone()),
            config,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn cipher(&self) -> &AuthenticatedCipher<P> {
        &self.cipher
    }

    /// Run BB84 until the sifted key reaches `min_key_length`.
    pub fn generate_key(&mut self) -> Result<GuaranteedSession> {
        let result = self.guarantor.run()?;
        info!(
            key_length = result.key_length(),
            attempts = result.attempts,
            qubits = result.final_qubit_count,
            padded = result.padded,
            "Quantum key generated"
        );
        Ok(result)
    }

    /// Check a locally generated key against `min_key_length`.
    pub fn validate_generated_key(&self, bits: &[Bit]) -> Result<()> {
        validate_key_bits(bits, self.config.min_key_length)
    }

    /// Check a key received from the peer against `min_received_key_length`.
    pub fn validate_received_key(&self, bits: &[Bit]) -> Result<()> {
        validate_key_bits(bits, self.config.min_received_key_length)
    }

    pub fn compare_keys(&self, generated: &[Bit], received: &[Bit]) -> Result<KeyMatch> {
        compare_keys(generated, received, self.config.min_received_key_length)
    }

    /// Encrypt `text`; send `token` over any text channel.
    pub fn encrypt_message(&self, text: &str, bits: &[Bit]) -> Result<SealedMessage> {
        self.cipher.encrypt(text, bits, &EncryptOptions::default())
    }

    /// Decrypt a token produced by [`encrypt_message`](Self::encrypt_message).
    pub fn decrypt_message(&self, token: &str, bits: &[Bit]) -> Result<String> {
        self.cipher.decrypt_token(token, bits, &DecryptOptions::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::WhisperError;

    fn fast_config() -> Config {
        Config::with_iterations(1_000)
    }

    #[test]
    fn test_alice_to_bob() {
        let mut alice = QuantumWhisper::new(fast_config()).unwrap();
        let bob = QuantumWhisper::new(fast_config()).unwrap();

        let session = alice.generate_key().unwrap();
        assert!(session.key_length() >= 16);

        // Bob receives his copy of the sifted key out of band
        let bob_bits = session.session.bob_key_bits.clone();
        assert_eq!(
            bob.compare_keys(&bob_bits, session.key_bits()).unwrap(),
            KeyMatch::Matched
        );

        let sealed = alice.encrypt_message("meet at dawn", session.key_bits()).unwrap();
        assert_eq!(bob.decrypt_message(&sealed.token, &bob_bits).unwrap(), "meet at dawn");
    }

    #[test]
    fn test_thresholds_differ() {
        let api = QuantumWhisper::new(Config::default()).unwrap();
        let ten = [1u8; 10];
        assert!(api.validate_received_key(&ten).is_ok());
        assert!(api.validate_generated_key(&ten).is_err());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let result = QuantumWhisper::new(Config::with_iterations(0));
        assert!(matches!(result, Err(WhisperError::InvalidArgument(_))));
    }

    #[test]
    fn test_seeded_parts() {
        let mut api = QuantumWhisper::with_parts(
            fast_config(),
            ClassicSuiteProvider,
            RngBitSource::seeded(77),
        )
        .unwrap();
        let first = api.generate_key().unwrap();

        let mut replay = QuantumWhisper::with_parts(
            fast_config(),
            ClassicSuiteProvider,
            RngBitSource::seeded(77),
        )
        .unwrap();
        assert_eq!(replay.generate_key().unwrap(), first);
    }
}
