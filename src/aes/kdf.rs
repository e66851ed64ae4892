// Passphrase Key Derivation
// PBKDF2-HMAC-SHA256 turning a passphrase and salt into an AES key

use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::{CryptoError, Result};
use crate::hash::{HmacSha256, DIGEST_LEN};

/// Salt length carried in every envelope
pub const SALT_LEN: usize = 16;

/// Supported AES key sizes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AesKeySize {
    Aes128,
    Aes192,
    #[default]
    Aes256,
}

impl AesKeySize {
    /// Key length in bytes
    pub fn byte_len(self) -> usize {
        match self {
            AesKeySize::Aes128 => 16,
            AesKeySize::Aes192 => 24,
            AesKeySize::Aes256 => 32,
        }
    }

    pub fn bits(self) -> u32 {
        self.byte_len() as u32 * 8
    }

    pub fn from_bits(bits: u32) -> Result<Self> {
        match bits {
            128 => Ok(AesKeySize::Aes128),
            192 => Ok(AesKeySize::Aes192),
            256 => Ok(AesKeySize::Aes256),
            _ => Err(CryptoError::InputValidation(format!(
                "AES key size must be 128, 192 or 256 bits, got {}",
                bits
            ))),
        }
    }
}

/// Raw AES key bytes, wiped when dropped
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct AesKey {
    bytes: Vec<u8>,
}

impl AesKey {
    /// Wrap existing key material. Length must be 16, 24 or 32.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        match bytes.len() {
            16 | 24 | 32 => Ok(Self { bytes: bytes.to_vec() }),
            n => Err(CryptoError::InvalidKey(format!(
                "AES key must be 16, 24 or 32 bytes, got {}",
                n
            ))),
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn size(&self) -> AesKeySize {
        match self.bytes.len() {
            16 => AesKeySize::Aes128,
            24 => AesKeySize::Aes192,
            _ => AesKeySize::Aes256,
        }
    }
}

impl std::fmt::Debug for AesKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "AesKey({} bits, redacted)", self.size().bits())
    }
}

/// Derive an AES key from a passphrase.
///
/// The same passphrase, salt, size and iteration count always give the same
/// key. A passphrase-derived key is only as strong as the passphrase: the
/// iteration count slows down guessing but cannot add entropy, so a weak
/// passphrase yields a weak key no matter how it is stretched.
pub fn derive_key(
    passphrase: &[u8],
    salt: &[u8],
    size: AesKeySize,
    iterations: u32,
) -> Result<AesKey> {
    let mut bytes = vec![0u8; size.byte_len()];
    pbkdf2_hmac_sha256(passphrase, salt, iterations, &mut bytes)?;
    Ok(AesKey { bytes })
}

/// PBKDF2 (RFC 8018) with HMAC-SHA256 as the PRF, filling `out`
pub fn pbkdf2_hmac_sha256(
    password: &[u8],
    salt: &[u8],
    iterations: u32,
    out: &mut [u8],
) -> Result<()> {
    if iterations == 0 {
        return Err(CryptoError::InputValidation(
            "PBKDF2 iteration count must be at least 1".into(),
        ));
    }

    let keyed = HmacSha256::new(password);

    for (index, chunk) in out.chunks_mut(DIGEST_LEN).enumerate() {
        let block_index = index as u32 + 1;

        let mut mac = keyed.clone();
        mac.update(salt);
        mac.update(&block_index.to_be_bytes());
        let mut u = mac.finalize();
        let mut t = u;

        for _ in 1..iterations {
            let mut mac = keyed.clone();
            mac.update(&u);
            u = mac.finalize();
            for (acc, x) in t.iter_mut().zip(u.iter()) {
                *acc ^= x;
            }
        }

        chunk.copy_from_slice(&t[..chunk.len()]);
        u.zeroize();
        t.zeroize();
    }

    Ok(())
}
