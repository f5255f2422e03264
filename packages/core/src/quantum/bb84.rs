//! BB84 simulation and basis reconciliation.
//!
//! The run is split into the same stages as the real protocol so a UI can
//! show each one:
//!
//! 1. [`Bb84Simulator::prepare`]: Alice draws bits and bases.
//! 2. [`Bb84Simulator::choose_bases`]: Bob draws measurement bases.
//! 3. [`Bb84Simulator::measure`]: Bob measures every qubit.
//! 4. [`reconcile_bases`]: both sides keep only indices with agreeing bases.
//!
//! No eavesdropper is modelled, so sifted keys always agree.

use crate::config::Config;
use crate::quantum::random::RandomBitSource;
use crate::quantum::state::{measure_qubit, Basis, QuantumState};
use crate::utils::bits::Bit;
use crate::utils::error::{Result, WhisperError};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

/// Minimum sifted length for a session to count as valid, unless configured otherwise.
pub const DEFAULT_MIN_KEY_LENGTH: usize = 16;

/// Alice's side after preparation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preparation {
    pub bits: Vec<Bit>,
    pub bases: Vec<Basis>,
}

impl Preparation {
    pub fn states(&self) -> Vec<QuantumState> {
        self.bits
            .iter()
            .zip(&self.bases)
            .map(|(&bit, &basis)| QuantumState::encode(bit, basis))
            .collect()
    }
}

/// Result of sifting two bit streams by basis agreement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reconciliation {
    pub matching_indices: Vec<usize>,
    pub alice_key_bits: Vec<Bit>,
    pub bob_key_bits: Vec<Bit>,
    pub keys_match: bool,
    pub key_length: usize,
    pub valid: bool,
}

/// Keep the indices where both bases agree and compare the sifted streams.
///
/// Pure: identical inputs always give identical output.
///
/// # Errors
///
/// `InvalidArgument` if the four arrays differ in length.
pub fn reconcile_bases(
    alice_bases: &[Basis],
    bob_bases: &[Basis],
    alice_bits: &[Bit],
    bob_results: &[Bit],
    min_key_length: usize,
) -> Result<Reconciliation> {
    let n = alice_bases.len();
    if bob_bases.len() != n || alice_bits.len() != n || bob_results.len() != n {
        return Err(WhisperError::InvalidArgument(format!(
            "reconciliation inputs differ in length: {} bases / {} bases / {} bits / {} results",
            n,
            bob_bases.len(),
            alice_bits.len(),
            bob_results.len()
        )));
    }

    let matching_indices: Vec<usize> = alice_bases
        .iter()
        .zip(bob_bases)
        .enumerate()
        .filter(|(_, (a, b))| a == b)
        .map(|(i, _)| i)
        .collect();

    let alice_key_bits: Vec<Bit> = matching_indices.iter().map(|&i| alice_bits[i]).collect();
    let bob_key_bits: Vec<Bit> = matching_indices.iter().map(|&i| bob_results[i]).collect();
    let keys_match = alice_key_bits == bob_key_bits;
    let key_length = alice_key_bits.len();

    Ok(Reconciliation {
        matching_indices,
        alice_key_bits,
        bob_key_bits,
        keys_match,
        key_length,
        valid: key_length >= min_key_length,
    })
}

/// One complete simulation run.
///
/// The four per-qubit arrays all have length `qubit_count`; the sifted keys
/// have one entry per matching index, except after padding (see
/// [`crate::quantum::guarantor`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bb84Session {
    pub qubit_count: usize,
    pub alice_bits: Vec<Bit>,
    pub alice_bases: Vec<Basis>,
    pub bob_bases: Vec<Basis>,
    pub bob_results: Vec<Bit>,
    pub matching_indices: Vec<usize>,
    pub alice_key_bits: Vec<Bit>,
    pub bob_key_bits: Vec<Bit>,
    pub keys_match: bool,
    pub valid: bool,
}

impl Bb84Session {
    fn assemble(
        preparation: Preparation,
        bob_bases: Vec<Basis>,
        bob_results: Vec<Bit>,
        reconciliation: Reconciliation,
    ) -> Self {
        Self {
            qubit_count: preparation.bits.len(),
            alice_bits: preparation.bits,
            alice_bases: preparation.bases,
            bob_bases,
            bob_results,
            matching_indices: reconciliation.matching_indices,
            alice_key_bits: reconciliation.alice_key_bits,
            bob_key_bits: reconciliation.bob_key_bits,
            keys_match: reconciliation.keys_match,
            valid: reconciliation.valid,
        }
    }

    pub fn key_length(&self) -> usize {
        self.alice_key_bits.len()
    }

    /// Alice's prepared states, for display.
    pub fn quantum_states(&self) -> Vec<QuantumState> {
        self.alice_bits
            .iter()
            .zip(&self.alice_bases)
            .map(|(&bit, &basis)| QuantumState::encode(bit, basis))
            .collect()
    }
}

/// Runs BB84 against an injected randomness source.
#[derive(Debug, Clone)]
pub struct Bb84Simulator<S: RandomBitSource> {
    source: S,
    min_key_length: usize,
    max_qubit_count: usize,
}

impl<S: RandomBitSource> Bb84Simulator<S> {
    pub fn new(source: S, config: &Config) -> Self {
        Self {
            source,
            min_key_length: config.min_key_length,
            max_qubit_count: config.max_qubit_count,
        }
    }

    pub fn min_key_length(&self) -> usize {
        self.min_key_length
    }

    pub fn max_qubit_count(&self) -> usize {
        self.max_qubit_count
    }

    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    /// Alice draws `qubit_count` bits and bases.
    pub fn prepare(&mut self, qubit_count: usize) -> Preparation {
        Preparation {
            bits: self.source.random_bits(qubit_count),
            bases: self.source.random_bases(qubit_count),
        }
    }

    /// Bob draws `qubit_count` measurement bases, independent of Alice's.
    pub fn choose_bases(&mut self, qubit_count: usize) -> Vec<Basis> {
        self.source.random_bases(qubit_count)
    }

    /// Bob measures Alice's qubits; every mismatched basis costs a fresh random bit.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if `bob_bases` and the preparation differ in length.
    pub fn measure(&mut self, preparation: &Preparation, bob_bases: &[Basis]) -> Result<Vec<Bit>> {
        if preparation.bits.len() != bob_bases.len() || preparation.bases.len() != bob_bases.len() {
            return Err(WhisperError::InvalidArgument(format!(
                "cannot measure {} qubits with {} bases",
                preparation.bits.len(),
                bob_bases.len()
            )));
        }

        Ok(preparation
            .bits
            .iter()
            .zip(&preparation.bases)
            .zip(bob_bases)
            .map(|((&bit, &prepared), &measured)| {
                measure_qubit(bit, prepared, measured, &mut self.source)
            })
            .collect())
    }

    /// Full run with the configured validity threshold.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if `qubit_count` exceeds the configured maximum.
    pub fn run(&mut self, qubit_count: usize) -> Result<Bb84Session> {
        self.run_with_threshold(qubit_count, self.min_key_length)
    }

    /// Full run where `valid` means "at least `min_key_length` sifted bits".
    pub fn run_with_threshold(
        &mut self,
        qubit_count: usize,
        min_key_length: usize,
    ) -> Result<Bb84Session> {
        if qubit_count > self.max_qubit_count {
            return Err(WhisperError::InvalidArgument(format!(
                "qubit count {} exceeds the maximum of {}",
                qubit_count, self.max_qubit_count
            )));
        }

        let preparation = self.prepare(qubit_count);
        let bob_bases = self.choose_bases(qubit_count);
        let bob_results = self.measure(&preparation, &bob_bases)?;
        let reconciliation = reconcile_bases(
            &preparation.bases,
            &bob_bases,
            &preparation.bits,
            &bob_results,
            min_key_length,
        )?;

        trace!(
            qubits = qubit_count,
            matching = reconciliation.matching_indices.len(),
            "BB84 bases reconciled"
        );
        debug!(
            qubits = qubit_count,
            key_length = reconciliation.key_length,
            valid = reconciliation.valid,
            "BB84 run finished"
        );

        Ok(Bb84Session::assemble(
            preparation,
            bob_bases,
            bob_results,
            reconciliation,
        ))
    }
}
