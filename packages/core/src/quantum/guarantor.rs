//! Retry policy that turns a probabilistic sifted length into a dependable minimum.
//!
//! Sifting discards about half of the qubits, so a fixed qubit count can
//! produce a key that is too short. The guarantor starts at
//! `max(initial_qubit_floor, min_key_length * qubit_multiplier)` qubits,
//! grows the count by `growth_percent` after every short run, and finishes
//! with one oversized run of at least `min_key_length * fallback_multiplier`
//! qubits. Should even that fall short, it either fails with
//! `KeyLengthUnattainable` or, when `allow_padding` is set, pads both sifted
//! keys with the same fresh random bits and marks the result `padded`.

use crate::config::Config;
use crate::quantum::bb84::{Bb84Session, Bb84Simulator};
use crate::quantum::random::RandomBitSource;
use crate::utils::error::{Result, WhisperError};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// A session that met the requested minimum, with escalation bookkeeping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuaranteedSession {
    #[serde(flatten)]
    pub session: Bb84Session,
    pub attempts: u32,
    pub final_qubit_count: usize,
    /// Bits past the sifted length were not produced by the protocol.
    pub padded: bool,
}

impl GuaranteedSession {
    pub fn key_length(&self) -> usize {
        self.session.key_length()
    }

    pub fn key_bits(&self) -> &[u8] {
        &self.session.alice_key_bits
    }
}

pub struct KeyLengthGuarantor<S: RandomBitSource> {
    simulator: Bb84Simulator<S>,
    config: Config,
}

impl<S: RandomBitSource> KeyLengthGuarantor<S> {
    pub fn new(source: S, config: Config) -> Self {
        Self {
            simulator: Bb84Simulator::new(source, &config),
            config,
        }
    }

    pub fn simulator_mut(&mut self) -> &mut Bb84Simulator<S> {
        &mut self.simulator
    }

    /// Run with the configured minimum and attempt budget.
    pub fn run(&mut self) -> Result<GuaranteedSession> {
        self.run_with_minimum(self.config.min_key_length, self.config.max_attempts)
    }

    /// # Errors
    ///
    /// - `InvalidArgument` for a zero minimum, zero attempts, or a minimum
    ///   the simulator's qubit cap can never reach.
    /// - `KeyLengthUnattainable` when every attempt fell short and padding
    ///   is disabled.
    pub fn run_with_minimum(
        &mut self,
        min_key_length: usize,
        max_attempts: u32,
    ) -> Result<GuaranteedSession> {
        if min_key_length == 0 {
            return Err(WhisperError::InvalidArgument(
                "minimum key length must be positive".to_string(),
            ));
        }
        if max_attempts == 0 {
            return Err(WhisperError::InvalidArgument(
                "at least one attempt is required".to_string(),
            ));
        }
        let cap = self.simulator.max_qubit_count();
        if min_key_length > cap {
            return Err(WhisperError::InvalidArgument(format!(
                "minimum key length {} exceeds the qubit cap {}",
                min_key_length, cap
            )));
        }

        let mut qubit_count = self
            .config
            .initial_qubit_floor
            .max(min_key_length.saturating_mul(self.config.qubit_multiplier))
            .min(cap);
        let mut best = 0usize;

        for attempt in 1..=max_attempts {
            let session = self
                .simulator
                .run_with_threshold(qubit_count, min_key_length)?;
            if session.key_length() >= min_key_length {
                debug!(
                    attempt,
                    qubits = qubit_count,
                    key_length = session.key_length(),
                    "Key length reached"
                );
                return Ok(GuaranteedSession {
                    session,
                    attempts: attempt,
                    final_qubit_count: qubit_count,
                    padded: false,
                });
            }

            best = best.max(session.key_length());
            let next = self.grow(qubit_count).min(cap);
            debug!(
                attempt,
                qubits = qubit_count,
                key_length = session.key_length(),
                next_qubits = next,
                "Sifted key too short, escalating"
            );
            qubit_count = next;
        }

        // Последняя попытка с заведомо избыточным числом кубитов
        let fallback_count = min_key_length
            .saturating_mul(self.config.fallback_multiplier)
            .max(qubit_count)
            .min(cap);
        let attempts = max_attempts.saturating_add(1);
        let mut session = self
            .simulator
            .run_with_threshold(fallback_count, min_key_length)?;

        if session.key_length() >= min_key_length {
            return Ok(GuaranteedSession {
                session,
                attempts,
                final_qubit_count: fallback_count,
                padded: false,
            });
        }

        best = best.max(session.key_length());
        if !self.config.allow_padding {
            warn!(
                required = min_key_length,
                obtained = best,
                attempts,
                "Key length unattainable"
            );
            return Err(WhisperError::KeyLengthUnattainable {
                required: min_key_length,
                obtained: best,
                attempts,
            });
        }

        let missing = min_key_length - session.key_length();
        warn!(
            missing,
            "Padding sifted key with random bits not derived from the protocol"
        );
        let pad = self.simulator.source_mut().random_bits(missing);
        session.alice_key_bits.extend_from_slice(&pad);
        session.bob_key_bits.extend_from_slice(&pad);
        session.keys_match = session.alice_key_bits == session.bob_key_bits;
        session.valid = true;

        Ok(GuaranteedSession {
            session,
            attempts,
            final_qubit_count: fallback_count,
            padded: true,
        })
    }

    fn grow(&self, qubit_count: usize) -> usize {
        let increase = qubit_count
            .saturating_mul(self.config.growth_percent)
            .saturating_add(99)
            / 100;
        qubit_count.saturating_add(increase.max(1))
    }
}
