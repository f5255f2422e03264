// Вспомогательные модули

pub mod b64;
pub mod bits;
pub mod error;
