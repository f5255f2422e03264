//! Централизованная конфигурация для QuantumWhisper Core
//!
//! Все константы протокола и шифрования собраны здесь. Глобального
//! экземпляра нет: вызывающий код создаёт `Config` один раз и передаёт его
//! в компоненты, которым он нужен.

use crate::utils::error::{Result, WhisperError};

/// Identifier written into every package for the AEAD algorithm.
pub const ALGORITHM_ID: &str = "AES-256-GCM";

/// Identifier written into every package for the key derivation function.
pub const KDF_ID: &str = "PBKDF2-SHA256";

/// Основная структура конфигурации
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    // ============================================
    // КРИПТОГРАФИЧЕСКИЕ ПАРАМЕТРЫ
    // ============================================

    /// PBKDF2: количество итераций по умолчанию
    pub pbkdf2_iterations: u32,

    /// Upper bound on the iteration count accepted from an incoming package
    pub max_pbkdf2_iterations: u32,

    /// Длина соли для PBKDF2 (в байтах)
    pub salt_length: usize,

    /// Длина ключа для AES-256 (в байтах)
    pub key_length: usize,

    /// Длина nonce (IV) для AES-GCM (в байтах)
    pub nonce_length: usize,

    /// Размер GCM authentication tag (в байтах)
    pub gcm_tag_length: usize,

    /// Версия формата пакета
    pub package_version: u32,

    // ============================================
    // ДЛИНА КЛЮЧА
    // ============================================

    /// Minimum sifted length for freshly generated key material
    pub min_key_length: usize,

    /// Minimum length for an already-reconciled key handed over by a peer.
    ///
    /// Deliberately lower than `min_key_length`; the asymmetry is inherited
    /// from the product and kept configurable until it is reviewed.
    pub min_received_key_length: usize,

    // ============================================
    // BB84 / ЭСКАЛАЦИЯ
    // ============================================

    /// Lower bound on the first attempt's qubit count
    pub initial_qubit_floor: usize,

    /// First attempt uses `min_key_length * qubit_multiplier` qubits
    pub qubit_multiplier: usize,

    /// Qubit count growth between attempts, in percent
    pub growth_percent: usize,

    /// Number of regular attempts before the oversized fallback
    pub max_attempts: u32,

    /// Fallback attempt uses `min_key_length * fallback_multiplier` qubits
    pub fallback_multiplier: usize,

    /// Pad a short key with fresh random bits instead of failing
    pub allow_padding: bool,

    /// Largest qubit count a single simulation run accepts
    pub max_qubit_count: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            // Криптография
            pbkdf2_iterations: 100_000,
            max_pbkdf2_iterations: 10_000_000,
            salt_length: 16,
            key_length: 32,
            nonce_length: 12,
            gcm_tag_length: 16,
            package_version: 1,

            // Длина ключа
            min_key_length: 16,
            min_received_key_length: 8,

            // BB84
            initial_qubit_floor: 64,
            qubit_multiplier: 4,
            growth_percent: 50,
            max_attempts: 5,
            fallback_multiplier: 8,
            allow_padding: false,
            max_qubit_count: 1 << 20,
        }
    }
}

impl Config {
    /// Same defaults with a different PBKDF2 iteration count.
    pub fn with_iterations(iterations: u32) -> Self {
        Self {
            pbkdf2_iterations: iterations,
            ..Self::default()
        }
    }

    /// Проверить согласованность параметров
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if any value would make a component misbehave.
    pub fn validate(&self) -> Result<()> {
        if self.pbkdf2_iterations == 0 || self.pbkdf2_iterations > self.max_pbkdf2_iterations {
            return Err(WhisperError::InvalidArgument(format!(
                "pbkdf2_iterations must be in 1..={}, got {}",
                self.max_pbkdf2_iterations, self.pbkdf2_iterations
            )));
        }
        if self.key_length != 32 {
            return Err(WhisperError::InvalidArgument(format!(
                "AES-256 requires a 32-byte key, got {}",
                self.key_length
            )));
        }
        if self.nonce_length != 12 {
            return Err(WhisperError::InvalidArgument(format!(
                "AES-GCM requires a 12-byte nonce, got {}",
                self.nonce_length
            )));
        }
        if self.salt_length == 0 {
            return Err(WhisperError::InvalidArgument(
                "salt_length must be positive".to_string(),
            ));
        }
        if self.min_key_length == 0 || self.min_received_key_length == 0 {
            return Err(WhisperError::InvalidArgument(
                "minimum key lengths must be positive".to_string(),
            ));
        }
        if self.growth_percent == 0 {
            return Err(WhisperError::InvalidArgument(
                "growth_percent must be positive".to_string(),
            ));
        }
        if self.max_attempts == 0 {
            return Err(WhisperError::InvalidArgument(
                "max_attempts must be at least 1".to_string(),
            ));
        }
        if self.qubit_multiplier == 0 || self.fallback_multiplier == 0 {
            return Err(WhisperError::InvalidArgument(
                "qubit multipliers must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
