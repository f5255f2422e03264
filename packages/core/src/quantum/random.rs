// Источник случайных битов и базисов

use crate::quantum::state::Basis;
use crate::utils::bits::Bit;
use rand::rngs::{OsRng, StdRng};
use rand::{Rng, RngCore, SeedableRng};

/// Uniform classical bits and bases.
///
/// Only [`random_bit`](Self::random_bit) is required; the other methods draw
/// independently from it. All methods are total: `n = 0` yields an empty `Vec`.
pub trait RandomBitSource {
    /// 0 or 1, each with probability 1/2.
    fn random_bit(&mut self) -> Bit;

    fn random_basis(&mut self) -> Basis {
        if self.random_bit() == 0 {
            Basis::Rectilinear
        } else {
            Basis::Diagonal
        }
    }

    fn random_bits(&mut self, n: usize) -> Vec<Bit> {
        (0..n).map(|_| self.random_bit()).collect()
    }

    fn random_bases(&mut self, n: usize) -> Vec<Basis> {
        (0..n).map(|_| self.random_basis()).collect()
    }
}

/// [`RandomBitSource`] backed by any `rand` generator.
#[derive(Debug, Clone)]
pub struct RngBitSource<R: RngCore> {
    rng: R,
}

impl<R: RngCore> RngBitSource<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RngBitSource<StdRng> {
    /// CSPRNG seeded once from the OS; cheap to call in a tight loop.
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }

    /// Reproducible stream, for tests and replays.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl RngBitSource<OsRng> {
    /// Every draw goes to the operating system.
    pub fn os() -> Self {
        Self::new(OsRng)
    }
}

impl Default for RngBitSource<StdRng> {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl<R: RngCore> RandomBitSource for RngBitSource<R> {
    fn random_bit(&mut self) -> Bit {
        Bit::from(self.rng.gen::<bool>())
    }
}

impl<S: RandomBitSource + ?Sized> RandomBitSource for &mut S {
    fn random_bit(&mut self) -> Bit {
        (**self).random_bit()
    }

    fn random_basis(&mut self) -> Basis {
        (**self).random_basis()
    }

    fn random_bits(&mut self, n: usize) -> Vec<Bit> {
        (**self).random_bits(n)
    }

    fn random_bases(&mut self, n: usize) -> Vec<Basis> {
        (**self).random_bases(n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_bits_are_bits() {
        let mut source = RngBitSource::seeded(7);
        let bits = source.random_bits(1000);
        assert_eq!(bits.len(), 1000);
        assert!(bits.iter().all(|&b| b <= 1));
    }

    #[test]
    fn test_zero_length() {
        let mut source = RngBitSource::os();
        assert!(source.random_bits(0).is_empty());
        assert!(source.random_bases(0).is_empty());
    }

    #[test]
    fn test_roughly_uniform() {
        let mut source = RngBitSource::seeded(42);
        let n = 10_000;
        let ones = source.random_bits(n).iter().filter(|&&b| b == 1).count();
        // 10 sigma is 500; anything outside means the source is broken
        assert!((4_500..=5_500).contains(&ones), "ones = {}", ones);

        let diagonal = source
            .random_bases(n)
            .iter()
            .filter(|&&b| b == Basis::Diagonal)
            .count();
        assert!((4_500..=5_500).contains(&diagonal), "diagonal = {}", diagonal);
    }

    #[test]
    fn test_seeded_is_reproducible() {
        let a = RngBitSource::seeded(99).random_bits(64);
        let b = RngBitSource::seeded(99).random_bits(64);
        assert_eq!(a, b);
    }

    #[test]
    fn test_mut_ref_forwards() {
        fn draw<S: RandomBitSource>(mut source: S) -> Vec<Bit> {
            source.random_bits(8)
        }

        let mut source = RngBitSource::seeded(1);
        let expected = RngBitSource::seeded(1).random_bits(8);
        assert_eq!(draw(&mut source), expected);
    }
}
