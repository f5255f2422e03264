// Валидация входящих пакетов
// Проверяется только структура; криптография здесь не выполняется

use crate::config::{Config, ALGORITHM_ID, KDF_ID};
use crate::protocol::package::EncryptedPackage;
use crate::utils::error::PackageError;
use serde_json::{Map, Value};

/// Outcome of the schema check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PackageValidation {
    Valid(EncryptedPackage),
    Invalid(PackageError),
}

impl PackageValidation {
    pub fn is_valid(&self) -> bool {
        matches!(self, PackageValidation::Valid(_))
    }

    pub fn into_result(self) -> Result<EncryptedPackage, PackageError> {
        match self {
            PackageValidation::Valid(pkg) => Ok(pkg),
            PackageValidation::Invalid(reason) => Err(reason),
        }
    }
}

impl From<Result<EncryptedPackage, PackageError>> for PackageValidation {
    fn from(result: Result<EncryptedPackage, PackageError>) -> Self {
        match result {
            Ok(pkg) => PackageValidation::Valid(pkg),
            Err(reason) => PackageValidation::Invalid(reason),
        }
    }
}

/// Валидация уже разобранного JSON-объекта
pub fn validate_value(value: &Value, config: &Config) -> PackageValidation {
    check_value(value, config).into()
}

/// Валидация типизированного пакета (например, собранного вручную)
pub fn validate_package(pkg: &EncryptedPackage, config: &Config) -> PackageValidation {
    check_header(u64::from(pkg.v), &pkg.alg, &pkg.kdf, u64::from(pkg.iter), config)
        .map(|()| pkg.clone())
        .into()
}

fn check_value(value: &Value, config: &Config) -> Result<EncryptedPackage, PackageError> {
    let obj = value.as_object().ok_or(PackageError::NotAnObject)?;

    let v = require(obj, "v")?
        .as_u64()
        .ok_or(PackageError::WrongType {
            field: "v",
            expected: "an integer",
        })?;
    let alg = require_str(obj, "alg")?;
    let kdf = require_str(obj, "kdf")?;
    let iter = require(obj, "iter")?
        .as_u64()
        .ok_or(PackageError::WrongType {
            field: "iter",
            expected: "a non-negative integer",
        })?;
    let iv = require_str(obj, "iv")?;
    let salt = require_str(obj, "salt")?;
    let ct = require_str(obj, "ct")?;

    check_header(v, alg, kdf, iter, config)?;

    // check_header bounded both values by u32 limits
    Ok(EncryptedPackage {
        v: v as u32,
        alg: alg.to_string(),
        kdf: kdf.to_string(),
        iter: iter as u32,
        iv: iv.to_string(),
        salt: salt.to_string(),
        ct: ct.to_string(),
    })
}

fn check_header(
    v: u64,
    alg: &str,
    kdf: &str,
    iter: u64,
    config: &Config,
) -> Result<(), PackageError> {
    if v != u64::from(config.package_version) {
        return Err(PackageError::UnsupportedVersion(v));
    }
    if alg != ALGORITHM_ID {
        return Err(PackageError::UnsupportedAlgorithm(alg.to_string()));
    }
    if kdf != KDF_ID {
        return Err(PackageError::UnsupportedKdf(kdf.to_string()));
    }
    if iter == 0 || iter > u64::from(config.max_pbkdf2_iterations) {
        return Err(PackageError::IterationsOutOfRange(iter));
    }
    Ok(())
}

fn require<'a>(obj: &'a Map<String, Value>, field: &'static str) -> Result<&'a Value, PackageError> {
    match obj.get(field) {
        None | Some(Value::Null) => Err(PackageError::MissingField(field)),
        Some(value) => Ok(value),
    }
}

fn require_str<'a>(obj: &'a Map<String, Value>, field: &'static str) -> Result<&'a str, PackageError> {
    require(obj, field)?.as_str().ok_or(PackageError::WrongType {
        field,
        expected: "a string",
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn good() -> Value {
        json!({
            "v": 1,
            "alg": "AES-256-GCM",
            "kdf": "PBKDF2-SHA256",
            "iter": 100000,
            "iv": "AAAAAAAAAAAAAAAA",
            "salt": "AAAAAAAAAAAAAAAAAAAAAA==",
            "ct": "AAAA"
        })
    }

    fn reason(value: Value) -> PackageError {
        match validate_value(&value, &Config::default()) {
            PackageValidation::Invalid(reason) => reason,
            PackageValidation::Valid(pkg) => panic!("unexpectedly valid: {:?}", pkg),
        }
    }

    #[test]
    fn test_valid_package() {
        let result = validate_value(&good(), &Config::default());
        assert!(result.is_valid());
        let pkg = result.into_result().unwrap();
        assert_eq!(pkg.iter, 100_000);
        assert_eq!(pkg.ct, "AAAA");
    }

    #[test]
    fn test_every_field_is_required() {
        for field in ["v", "alg", "kdf", "iter", "iv", "salt", "ct"] {
            let mut value = good();
            value.as_object_mut().unwrap().remove(field);
            assert_eq!(reason(value), PackageError::MissingField(field));
        }
    }

    #[test]
    fn test_null_counts_as_missing() {
        let mut value = good();
        value["ct"] = Value::Null;
        assert_eq!(reason(value), PackageError::MissingField("ct"));
    }

    #[test]
    fn test_wrong_types() {
        let mut value = good();
        value["iv"] = json!(12);
        assert!(matches!(reason(value), PackageError::WrongType { field: "iv", .. }));

        let mut value = good();
        value["iter"] = json!("100000");
        assert!(matches!(reason(value), PackageError::WrongType { field: "iter", .. }));

        let mut value = good();
        value["v"] = json!(-1);
        assert!(matches!(reason(value), PackageError::WrongType { field: "v", .. }));

        assert_eq!(reason(json!([1, 2, 3])), PackageError::NotAnObject);
    }

    #[test]
    fn test_unsupported_identifiers() {
        let mut value = good();
        value["v"] = json!(2);
        assert_eq!(reason(value), PackageError::UnsupportedVersion(2));

        let mut value = good();
        value["alg"] = json!("AES-128-CBC");
        assert_eq!(
            reason(value),
            PackageError::UnsupportedAlgorithm("AES-128-CBC".to_string())
        );

        let mut value = good();
        value["kdf"] = json!("scrypt");
        assert_eq!(reason(value), PackageError::UnsupportedKdf("scrypt".to_string()));
    }

    #[test]
    fn test_iteration_bounds() {
        let mut value = good();
        value["iter"] = json!(0);
        assert_eq!(reason(value), PackageError::IterationsOutOfRange(0));

        let mut value = good();
        value["iter"] = json!(u64::from(u32::MAX) + 1);
        assert!(matches!(reason(value), PackageError::IterationsOutOfRange(_)));
    }

    #[test]
    fn test_validate_typed_package() {
        let pkg = validate_value(&good(), &Config::default()).into_result().unwrap();
        assert!(validate_package(&pkg, &Config::default()).is_valid());

        let mut bad = pkg.clone();
        bad.alg = "ChaCha20-Poly1305".to_string();
        assert!(!validate_package(&bad, &Config::default()).is_valid());
    }
}
