// Текстовый формат пакета: base64(JSON)
// Используется для передачи через любые текстовые каналы (буфер обмена, звук, файл)

use crate::config::Config;
use crate::protocol::package::EncryptedPackage;
use crate::protocol::validation::{validate_value, PackageValidation};
use crate::utils::b64;
use crate::utils::error::{PackageError, Result, WhisperError};
use serde_json::Value;

/// Упаковать пакет в JSON строку
pub fn package_to_json(pkg: &EncryptedPackage) -> Result<String> {
    serde_json::to_string(pkg)
        .map_err(|e| WhisperError::SerializationError(format!("JSON pack error: {}", e)))
}

/// Упаковать пакет в один текстовый токен
pub fn encode_token(pkg: &EncryptedPackage) -> Result<String> {
    let json = package_to_json(pkg)?;
    Ok(b64::encode(json.as_bytes()))
}

/// Разобрать токен: base64(JSON) или сырой JSON-объект.
///
/// Pasted input often carries line breaks or stray spaces, so a base64 token
/// is stripped down to the base64 alphabet before decoding.
pub fn parse_token(input: &str, config: &Config) -> PackageValidation {
    let trimmed = input.trim();

    let json = if trimmed.starts_with('{') {
        trimmed.to_string()
    } else {
        match decode_wrapped(trimmed) {
            Ok(json) => json,
            Err(reason) => return PackageValidation::Invalid(reason),
        }
    };

    match serde_json::from_str::<Value>(&json) {
        Ok(value) => validate_value(&value, config),
        Err(e) => PackageValidation::Invalid(PackageError::NotJson(e.to_string())),
    }
}

fn decode_wrapped(input: &str) -> std::result::Result<String, PackageError> {
    let clean = b64::sanitize(input);
    if !b64::looks_like_base64(&clean) {
        return Err(PackageError::UndecodableToken);
    }
    let bytes = b64::decode(&clean).map_err(|_| PackageError::UndecodableToken)?;
    String::from_utf8(bytes).map_err(|_| PackageError::UndecodableToken)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> EncryptedPackage {
        EncryptedPackage::new(1, "AES-256-GCM", "PBKDF2-SHA256", 1_000, &[1; 12], &[2; 16], &[3; 32])
    }

    #[test]
    fn test_token_roundtrip() {
        let pkg = sample();
        let token = encode_token(&pkg).unwrap();
        assert!(b64::looks_like_base64(&token));
        assert_eq!(parse_token(&token, &Config::default()), PackageValidation::Valid(pkg));
    }

    #[test]
    fn test_raw_json_accepted() {
        let pkg = sample();
        let json = package_to_json(&pkg).unwrap();
        let parsed = parse_token(&format!("  {}\n", json), &Config::default());
        assert_eq!(parsed.into_result().unwrap(), pkg);
    }

    #[test]
    fn test_token_with_line_breaks() {
        let pkg = sample();
        let token = encode_token(&pkg).unwrap();
        let (head, tail) = token.split_at(20);
        let pasted = format!("{}\n  {}\n", head, tail);
        assert!(parse_token(&pasted, &Config::default()).is_valid());
    }

    #[test]
    fn test_garbage_rejected() {
        let config = Config::default();
        assert_eq!(
            parse_token("", &config),
            PackageValidation::Invalid(PackageError::UndecodableToken)
        );
        assert!(matches!(
            parse_token("{not json", &config),
            PackageValidation::Invalid(PackageError::NotJson(_))
        ));
        // valid base64 of "hello" which is not JSON
        assert!(matches!(
            parse_token("aGVsbG8=", &config),
            PackageValidation::Invalid(PackageError::NotJson(_))
        ));
        // valid base64 of a JSON array
        let token = b64::encode(b"[1,2]");
        assert_eq!(
            parse_token(&token, &config),
            PackageValidation::Invalid(PackageError::NotAnObject)
        );
    }
}
