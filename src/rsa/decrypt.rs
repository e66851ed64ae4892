// RSA Decryption Implementation
// Implements RSA decryption with Chinese Remainder Theorem (CRT) optimization

use zeroize::Zeroize;

use crate::bigint::BigUint;
use crate::error::{CryptoError, Result};

use super::keygen::RsaPrivateKey;
use super::padding::unpad_pkcs1_v15;

/// Decrypt ciphertext bytes using an RSA private key.
///
/// The ciphertext must be exactly `k` bytes and encode a value below `n`.
pub fn decrypt(ciphertext: &[u8], private_key: &RsaPrivateKey) -> Result<Vec<u8>> {
    let k = private_key.size();
    if ciphertext.len() != k {
        return Err(CryptoError::DecryptionFailure(format!(
            "expected {} ciphertext bytes, got {}",
            k,
            ciphertext.len()
        )));
    }

    let c = BigUint::from_bytes_be(ciphertext);
    if &c >= private_key.n() {
        return Err(CryptoError::DecryptionFailure(
            "ciphertext out of range for modulus".into(),
        ));
    }

    let mut m = decrypt_crt(&c, private_key)?;
    let em = m.to_bytes_be_padded(k);
    m.zeroize();
    let mut em = em.ok_or_else(|| {
        CryptoError::DecryptionFailure("recovered block wider than the modulus".into())
    })?;

    let plaintext = unpad_pkcs1_v15(&em).map(<[u8]>::to_vec);
    em.zeroize();
    plaintext
}

/// Decrypt using the Chinese Remainder Theorem.
///
/// Two exponentiations modulo the half-size primes replace one modulo `n`.
fn decrypt_crt(c: &BigUint, key: &RsaPrivateKey) -> Result<BigUint> {
    let p = key.p();

    // m1 = c^d_p mod p, m2 = c^d_q mod q
    let m1 = c.mod_pow(key.d_p(), p)?;
    let m2 = c.mod_pow(key.d_q(), key.q())?;

    // h = (m1 - m2) * q_inv mod p
    let m2_mod_p = &m2 % p;
    let diff = if m1 >= m2_mod_p {
        m1 - m2_mod_p
    } else {
        m1 + p - m2_mod_p
    };
    let h = (diff * key.q_inv()) % p;

    // m = m2 + q * h, already below n
    Ok(m2 + key.q() * &h)
}
