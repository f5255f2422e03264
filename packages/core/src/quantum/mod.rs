//! Симуляция BB84
//!
//! ```text
//! RandomBitSource ─▶ Bb84Simulator ─▶ KeyLengthGuarantor ─▶ sifted key bits
//! ```

pub mod bb84;
pub mod guarantor;
pub mod random;
pub mod state;

pub use bb84::{reconcile_bases, Bb84Session, Bb84Simulator, Reconciliation, DEFAULT_MIN_KEY_LENGTH};
pub use guarantor::{GuaranteedSession, KeyLengthGuarantor};
pub use random::{RandomBitSource, RngBitSource};
pub use state::{measure_qubit, Basis, QuantumState};

use crate::config::Config;
use crate::utils::bits::Bit;
use crate::utils::error::Result;

/// Generate just the sifted key bits, at least `min_key_length` long.
pub fn simulate_quantum_key(min_key_length: usize) -> Result<Vec<Bit>> {
    let config = Config::default();
    let max_attempts = config.max_attempts;
    let mut guarantor = KeyLengthGuarantor::new(RngBitSource::from_entropy(), config);
    let result = guarantor.run_with_minimum(min_key_length, max_attempts)?;
    Ok(result.session.alice_key_bits)
}
