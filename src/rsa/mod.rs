// RSA
// PKCS#1 v1.5 encryption, key generation and PEM key encoding

pub mod decrypt;
pub mod encoding;
pub mod encrypt;
pub mod keygen;
pub mod padding;
pub mod task;

pub use decrypt::decrypt;
pub use encrypt::encrypt;
pub use keygen::{generate_keypair, RsaKeyPair, RsaPrivateKey, RsaPublicKey, PUBLIC_EXPONENT};
pub use padding::{pad_pkcs1_v15, unpad_pkcs1_v15};
pub use task::KeyGenTask;
