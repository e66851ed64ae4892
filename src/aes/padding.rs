// PKCS#7 Padding
// Pads plaintext to a whole number of cipher blocks and strips it again

use crate::error::{CryptoError, Result};

use super::block::BLOCK_SIZE;

/// Append 1..=16 bytes, each equal to the pad length.
///
/// Input that is already block-aligned gets a full block of padding, so the
/// output is never empty.
pub fn pad(data: &[u8]) -> Vec<u8> {
    let pad_len = BLOCK_SIZE - data.len() % BLOCK_SIZE;
    let mut out = Vec::with_capacity(data.len() + pad_len);
    out.extend_from_slice(data);
    out.resize(data.len() + pad_len, pad_len as u8);
    out
}

/// Validate and strip padding, returning the unpadded prefix
pub fn unpad(data: &[u8]) -> Result<&[u8]> {
    if data.is_empty() || data.len() % BLOCK_SIZE != 0 {
        return Err(CryptoError::Padding);
    }

    let pad_len = data[data.len() - 1] as usize;
    if pad_len == 0 || pad_len > BLOCK_SIZE {
        return Err(CryptoError::Padding);
    }

    let (body, padding) = data.split_at(data.len() - pad_len);
    if padding.iter().any(|&b| b as usize != pad_len) {
        return Err(CryptoError::Padding);
    }

    Ok(body)
}
