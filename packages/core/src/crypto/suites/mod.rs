//! Криптографические наборы (Crypto Suites)
//!
//! Этот модуль содержит реализации CryptoProvider trait.
//!
//! ## Доступные наборы
//!
//! ### Classic Suite (текущий)
//! - **AEAD**: AES-256-GCM (12-byte IV, 16-byte tag)
//! - **KDF**: PBKDF2-HMAC-SHA256
//! - **RNG**: OsRng
//!
//! ## Выбор suite
//!
//! ```rust
//! use quantumwhisper_core::crypto::suites::classic::ClassicSuiteProvider;
//! use quantumwhisper_core::crypto::provider::CryptoProvider;
//!
//! let provider = ClassicSuiteProvider::new();
//! assert_eq!(provider.algorithm_id(), "AES-256-GCM");
//! ```

pub mod classic;
