// Hashing Module
// SHA-256 and HMAC-SHA256

pub mod hmac;
pub mod sha256;

pub use hmac::{hmac_sha256, HmacSha256};
pub use sha256::{sha256, sha256_hex, Sha256, DIGEST_LEN};
