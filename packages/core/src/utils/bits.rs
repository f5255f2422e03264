//! Bit-array helpers shared by the simulator and the cipher.
//!
//! Key material travels between peers as a flat array of integers that are
//! each exactly 0 or 1. These helpers validate and pack such arrays.

use crate::utils::error::{Result, WhisperError};

/// A classical bit. Always 0 or 1 when produced by this crate; arrays
/// coming from outside must pass [`validate_key_bits`] first.
pub type Bit = u8;

/// Check that `bits` is usable as key material: only 0/1, at least `min_len` long.
pub fn validate_key_bits(bits: &[Bit], min_len: usize) -> Result<()> {
    if bits.len() < min_len {
        return Err(WhisperError::InvalidKeyMaterial(format!(
            "expected at least {} bits, got {}",
            min_len,
            bits.len()
        )));
    }

    if let Some(pos) = bits.iter().position(|&b| b > 1) {
        return Err(WhisperError::InvalidKeyMaterial(format!(
            "value {} at index {} is not a bit",
            bits[pos], pos
        )));
    }

    Ok(())
}

pub fn is_valid_key(bits: &[Bit], min_len: usize) -> bool {
    validate_key_bits(bits, min_len).is_ok()
}

/// Упаковать биты в байты: MSB first, последний неполный байт дополняется нулями справа
pub fn bits_to_bytes(bits: &[Bit]) -> Vec<u8> {
    bits.chunks(8)
        .map(|chunk| {
            let byte = chunk.iter().fold(0u8, |acc, &b| (acc << 1) | (b & 1));
            byte << (8 - chunk.len())
        })
        .collect()
}

/// Render bits as a "0101…" string.
pub fn bits_to_string(bits: &[Bit]) -> String {
    bits.iter().map(|&b| if b == 0 { '0' } else { '1' }).collect()
}

/// Parse a "0101…" string. Whitespace is ignored, anything else is rejected.
pub fn bits_from_str(s: &str) -> Result<Vec<Bit>> {
    s.chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| match c {
            '0' => Ok(0),
            '1' => Ok(1),
            other => Err(WhisperError::InvalidKeyMaterial(format!(
                "unexpected character {:?} in bit string",
                other
            ))),
        })
        .collect()
}

pub fn keys_equal(a: &[Bit], b: &[Bit]) -> bool {
    a == b
}
