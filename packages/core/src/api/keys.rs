// Проверка и сравнение ключей двух сторон

use crate::utils::bits::{keys_equal, validate_key_bits, Bit};
use crate::utils::error::Result;
use serde::{Deserialize, Serialize};

/// Whether the peer's key equals ours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyMatch {
    Matched,
    Mismatch,
}

impl KeyMatch {
    pub fn is_matched(self) -> bool {
        self == KeyMatch::Matched
    }
}

/// Validate a received key at `min_received_len`, then compare it with ours.
///
/// Our own key is not validated here; an absent or short local key simply
/// yields `Mismatch`.
pub fn compare_keys(generated: &[Bit], received: &[Bit], min_received_len: usize) -> Result<KeyMatch> {
    validate_key_bits(received, min_received_len)?;
    Ok(if keys_equal(generated, received) {
        KeyMatch::Matched
    } else {
        KeyMatch::Mismatch
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::WhisperError;

    #[test]
    fn test_compare_keys() {
        let ours = vec![1, 0, 1, 1, 0, 0, 1, 0];
        assert_eq!(compare_keys(&ours, &ours, 8).unwrap(), KeyMatch::Matched);

        let mut theirs = ours.clone();
        theirs[0] = 0;
        assert_eq!(compare_keys(&ours, &theirs, 8).unwrap(), KeyMatch::Mismatch);
        assert_eq!(compare_keys(&[], &theirs, 8).unwrap(), KeyMatch::Mismatch);
    }

    #[test]
    fn test_received_key_is_validated() {
        assert!(matches!(
            compare_keys(&[1; 8], &[1; 7], 8),
            Err(WhisperError::InvalidKeyMaterial(_))
        ));
        assert!(matches!(
            compare_keys(&[1; 8], &[1, 1, 1, 1, 1, 1, 1, 3], 8),
            Err(WhisperError::InvalidKeyMaterial(_))
        ));
    }

    #[test]
    fn test_serialized_names() {
        assert_eq!(serde_json::to_string(&KeyMatch::Matched).unwrap(), "\"matched\"");
        assert!(KeyMatch::Matched.is_matched());
        assert!(!KeyMatch::Mismatch.is_matched());
    }
}
