//! Криптографический модуль
//!
//! # Архитектура
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                  AuthenticatedCipher                        │
//! │  - encrypt: text + key bits -> EncryptedPackage             │
//! │  - decrypt: EncryptedPackage + key bits -> text             │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    KeyDerivation                            │
//! │  - bits -> bytes (MSB first)                                │
//! │  - PBKDF2-SHA256 -> 256-bit key                             │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │              CryptoProvider (Crypto-Agility)                │
//! │  - AEAD (AES-256-GCM)                                       │
//! │  - KDF (PBKDF2-HMAC-SHA256)                                 │
//! │  - RNG (OsRng)                                              │
//! └─────────────────────────────────────────────────────────────┘
//! ```

// ============================================================================
// Core Traits
// ============================================================================

/// CryptoProvider trait для crypto-agility
pub mod provider;

// ============================================================================
// Implementations
// ============================================================================

/// Криптографические наборы
pub mod suites;

// ============================================================================
// Key derivation + AEAD
// ============================================================================

pub mod kdf;

pub mod cipher;

// ============================================================================
// Re-exports для удобства
// ============================================================================

pub use cipher::{AuthenticatedCipher, DecryptOptions, EncryptOptions, SealedMessage};
pub use kdf::{DerivedKey, KdfOptions, KeyDerivation};
pub use provider::CryptoProvider;
pub use suites::classic::ClassicSuiteProvider;
