// QuantumWhisper Core
// BB84 key exchange simulation + AES-256-GCM messaging

#![warn(clippy::all)]
#![allow(clippy::too_many_arguments)]

// Модули
pub mod api;
pub mod config;
pub mod crypto;
pub mod error;
pub mod protocol;
pub mod quantum;
pub mod utils;

// Re-exports для удобства
pub use api::{KeyMatch, QuantumWhisper};
pub use config::Config;
pub use crypto::{AuthenticatedCipher, ClassicSuiteProvider, CryptoProvider, KeyDerivation};
pub use protocol::EncryptedPackage;
pub use quantum::{Bb84Session, Bb84Simulator, GuaranteedSession, KeyLengthGuarantor};
pub use utils::bits::{bits_to_bytes, Bit};
pub use utils::error::{PackageError, Result, WhisperError};
