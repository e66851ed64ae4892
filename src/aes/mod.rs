// AES Module
// Passphrase-based AES-CBC encryption and its base64 envelope

pub mod block;
pub mod cbc;
pub mod kdf;
pub mod padding;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use rand::{CryptoRng, RngCore};

use crate::error::{CryptoError, Result};

pub use block::{AesCipher, BLOCK_SIZE};
pub use cbc::CbcCiphertext;
pub use kdf::{derive_key, AesKey, AesKeySize, SALT_LEN};

/// Salt, IV and ciphertext of one sealed message.
///
/// The key size and PBKDF2 iteration count are not recorded; [`open`] must
/// be called with the same values given to [`seal`]. Serialized as `salt (16) || iv (16) || ciphertext` and carried as
/// standard base64 with padding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AesEnvelope {
    pub salt: [u8; SALT_LEN],
    pub iv: [u8; BLOCK_SIZE],
    pub ciphertext: Vec<u8>,
}

impl AesEnvelope {
    const HEADER_LEN: usize = SALT_LEN + BLOCK_SIZE;

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(Self::HEADER_LEN + self.ciphertext.len());
        out.extend_from_slice(&self.salt);
        out.extend_from_slice(&self.iv);
        out.extend_from_slice(&self.ciphertext);
        out
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < Self::HEADER_LEN + BLOCK_SIZE {
            return Err(CryptoError::DecryptionFailure(format!(
                "envelope of {} bytes is too short",
                bytes.len()
            )));
        }

        let (salt_bytes, rest) = bytes.split_at(SALT_LEN);
        let (iv_bytes, ciphertext) = rest.split_at(BLOCK_SIZE);
        let mut salt = [0u8; SALT_LEN];
        salt.copy_from_slice(salt_bytes);
        let mut iv = [0u8; BLOCK_SIZE];
        iv.copy_from_slice(iv_bytes);

        Ok(Self {
            salt,
            iv,
            ciphertext: ciphertext.to_vec(),
        })
    }

    pub fn to_base64(&self) -> String {
        STANDARD.encode(self.to_bytes())
    }

    pub fn from_base64(text: &str) -> Result<Self> {
        let bytes = STANDARD.decode(text.trim())?;
        Self::from_bytes(&bytes)
    }
}

/// Derive a key under a fresh salt and encrypt under a fresh IV
pub fn seal<R>(
    plaintext: &[u8],
    passphrase: &[u8],
    size: AesKeySize,
    iterations: u32,
    rng: &mut R,
) -> Result<AesEnvelope>
where
    R: RngCore + CryptoRng + ?Sized,
{
    let mut salt = [0u8; SALT_LEN];
    rng.fill_bytes(&mut salt);

    let key = derive_key(passphrase, &salt, size, iterations)?;
    let CbcCiphertext { iv, ciphertext } = cbc::encrypt(plaintext, &key, rng)?;

    Ok(AesEnvelope {
        salt,
        iv,
        ciphertext,
    })
}

/// Re-derive the key from the envelope's salt and decrypt
pub fn open(
    envelope: &AesEnvelope,
    passphrase: &[u8],
    size: AesKeySize,
    iterations: u32,
) -> Result<Vec<u8>> {
    let key = derive_key(passphrase, &envelope.salt, size, iterations)?;
    cbc::decrypt(&envelope.iv, &envelope.ciphertext, &key)
}
