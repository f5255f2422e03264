// Формат обмена зашифрованными сообщениями

pub mod package;
pub mod validation;
pub mod wire;

pub use package::EncryptedPackage;
pub use validation::{validate_package, validate_value, PackageValidation};
pub use wire::{encode_token, parse_token};
