// HMAC-SHA256
// RFC 2104 message authentication, used as the PRF for key derivation

use super::sha256::{sha256, Sha256, BLOCK_LEN, DIGEST_LEN};

/// Keyed HMAC-SHA256 state.
///
/// Cloning a freshly keyed instance reuses the absorbed key pads, which is
/// how PBKDF2 avoids rehashing the key on every iteration.
#[derive(Clone)]
pub struct HmacSha256 {
    /// Hash already fed with K' ^ ipad
    inner: Sha256,
    /// Hash already fed with K' ^ opad
    outer: Sha256,
}

impl HmacSha256 {
    /// Keys longer than a block are hashed first; shorter ones are zero-padded
    pub fn new(key: &[u8]) -> Self {
        let mut k = [0u8; BLOCK_LEN];
        if key.len() > BLOCK_LEN {
            k[..DIGEST_LEN].copy_from_slice(&sha256(key));
        } else {
            k[..key.len()].copy_from_slice(key);
        }

        let mut inner = Sha256::new();
        inner.update(&k.map(|b| b ^ 0x36));
        let mut outer = Sha256::new();
        outer.update(&k.map(|b| b ^ 0x5c));

        Self { inner, outer }
    }

    pub fn update(&mut self, data: &[u8]) {
        self.inner.update(data);
    }

    /// H(K' ^ opad || H(K' ^ ipad || message))
    pub fn finalize(self) -> [u8; DIGEST_LEN] {
        let inner_hash = self.inner.finalize();
        let mut outer = self.outer;
        outer.update(&inner_hash);
        outer.finalize()
    }
}

/// One-shot HMAC-SHA256
pub fn hmac_sha256(key: &[u8], data: &[u8]) -> [u8; DIGEST_LEN] {
    let mut mac = HmacSha256::new(key);
    mac.update(data);
    mac.finalize()
}
