// Зашифрованный пакет, который уходит к собеседнику

use crate::utils::b64;
use serde::{Deserialize, Serialize};

/// Self-contained result of one encryption.
///
/// Given the same key bits, the peer needs nothing beyond this record to
/// decrypt. Binary fields are standard base64. Field names are the
/// interchange names: `v`, `alg`, `kdf`, `iter`, `iv`, `salt`, `ct`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncryptedPackage {
    /// Версия формата
    pub v: u32,
    /// "AES-256-GCM"
    pub alg: String,
    /// "PBKDF2-SHA256"
    pub kdf: String,
    /// Итерации PBKDF2
    pub iter: u32,
    /// IV (base64)
    pub iv: String,
    /// Соль (base64)
    pub salt: String,
    /// Шифртекст + GCM tag (base64)
    pub ct: String,
}

impl EncryptedPackage {
    pub fn new(
        version: u32,
        algorithm: &str,
        kdf: &str,
        iterations: u32,
        iv: &[u8],
        salt: &[u8],
        ciphertext: &[u8],
    ) -> Self {
        Self {
            v: version,
            alg: algorithm.to_string(),
            kdf: kdf.to_string(),
            iter: iterations,
            iv: b64::encode(iv),
            salt: b64::encode(salt),
            ct: b64::encode(ciphertext),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_names_and_order() {
        let pkg = EncryptedPackage::new(1, "AES-256-GCM", "PBKDF2-SHA256", 100_000, &[1; 12], &[2; 16], &[3; 20]);
        let json = serde_json::to_string(&pkg).unwrap();
        assert!(json.starts_with(r#"{"v":1,"alg":"AES-256-GCM","kdf":"PBKDF2-SHA256","iter":100000,"iv":""#));
        assert_eq!(b64::decode(&pkg.salt).unwrap(), vec![2; 16]);
    }
}
