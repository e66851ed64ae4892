// PKCS#1 v1.5 Padding
// Encryption block formatting (block type 2) and its strict parser

use rand::{CryptoRng, RngCore};

use crate::error::{CryptoError, Result};

/// 0x00 || 0x02 || at least 8 bytes of PS || 0x00
pub const MIN_PADDING_LEN: usize = 11;

/// Minimum length of the random padding string
const MIN_PS_LEN: usize = 8;

/// Format `message` into a `k`-byte encryption block.
///
/// Format: 0x00 || 0x02 || PS || 0x00 || message, where PS is
/// `k - len - 3` random non-zero bytes.
pub fn pad_pkcs1_v15<R>(message: &[u8], k: usize, rng: &mut R) -> Result<Vec<u8>>
where
    R: RngCore + CryptoRng + ?Sized,
{
    let max = k.saturating_sub(MIN_PADDING_LEN);
    if message.len() > max {
        return Err(CryptoError::MessageTooLong {
            max,
            actual: message.len(),
        });
    }

    let ps_len = k - message.len() - 3;
    let mut em = vec![0u8; k];
    em[1] = 0x02;

    let ps = &mut em[2..2 + ps_len];
    rng.fill_bytes(ps);
    for byte in ps.iter_mut() {
        while *byte == 0 {
            *byte = rng.next_u32() as u8;
        }
    }

    // em[2 + ps_len] stays 0x00 as the separator
    em[3 + ps_len..].copy_from_slice(message);
    Ok(em)
}

/// Parse an encryption block and return the message it carries.
///
/// Requires the leading 0x00 0x02, at least eight non-zero padding bytes
/// and a 0x00 separator; anything else is `InvalidPadding`.
pub fn unpad_pkcs1_v15(em: &[u8]) -> Result<&[u8]> {
    if em.len() < MIN_PADDING_LEN || em[0] != 0x00 || em[1] != 0x02 {
        return Err(CryptoError::InvalidPadding);
    }

    let ps_len = em[2..]
        .iter()
        .position(|&b| b == 0x00)
        .ok_or(CryptoError::InvalidPadding)?;
    if ps_len < MIN_PS_LEN {
        return Err(CryptoError::InvalidPadding);
    }

    Ok(&em[2 + ps_len + 1..])
}
