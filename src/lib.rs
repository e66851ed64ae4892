// crypto_lab
// From-scratch AES-CBC, RSA (PKCS#1 v1.5) and SHA-256 behind a text facade

pub mod aes;
pub mod bigint;
pub mod error;
pub mod hash;
pub mod rsa;
pub mod service;
pub mod util;

pub use error::{CryptoError, Result};
pub use service::{
    decrypt_aes, decrypt_rsa, encrypt_aes, encrypt_rsa, generate_default_rsa_key_pair,
    generate_rsa_key_pair, generate_sha256, spawn_rsa_key_pair, CryptoService, RsaKeyPairPem,
};
pub use util::{CancelToken, CoreConfig};
