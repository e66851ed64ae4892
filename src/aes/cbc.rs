// CBC Mode
// Cipher block chaining over the AES block cipher with PKCS#7 padding

use rand::{CryptoRng, RngCore};

use crate::error::{CryptoError, Result};

use super::block::{AesCipher, BLOCK_SIZE};
use super::kdf::AesKey;
use super::padding;

/// IV plus ciphertext produced by one encryption
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CbcCiphertext {
    pub iv: [u8; BLOCK_SIZE],
    pub ciphertext: Vec<u8>,
}

/// Pad and encrypt under a fresh random IV
pub fn encrypt<R>(plaintext: &[u8], key: &AesKey, rng: &mut R) -> Result<CbcCiphertext>
where
    R: RngCore + CryptoRng + ?Sized,
{
    let mut iv = [0u8; BLOCK_SIZE];
    rng.fill_bytes(&mut iv);
    let ciphertext = encrypt_with_iv(plaintext, key, &iv)?;
    Ok(CbcCiphertext { iv, ciphertext })
}

/// Pad and encrypt under a caller-chosen IV.
///
/// Reusing an IV with the same key leaks equality of plaintext prefixes;
/// prefer [`encrypt`] unless the IV is known to be unique.
pub fn encrypt_with_iv(plaintext: &[u8], key: &AesKey, iv: &[u8; BLOCK_SIZE]) -> Result<Vec<u8>> {
    let cipher = AesCipher::new(key.as_bytes())?;
    let mut data = padding::pad(plaintext);
    chain_encrypt(&cipher, iv, &mut data);
    Ok(data)
}

/// Decrypt and strip padding.
///
/// Fails with `DecryptionFailure` when the ciphertext is not a non-empty
/// whole number of blocks, and with `Padding` when the recovered padding is
/// malformed (usually a wrong key or a tampered final block).
pub fn decrypt(iv: &[u8; BLOCK_SIZE], ciphertext: &[u8], key: &AesKey) -> Result<Vec<u8>> {
    if ciphertext.is_empty() || ciphertext.len() % BLOCK_SIZE != 0 {
        return Err(CryptoError::DecryptionFailure(format!(
            "ciphertext length {} is not a positive multiple of {}",
            ciphertext.len(),
            BLOCK_SIZE
        )));
    }

    let cipher = AesCipher::new(key.as_bytes())?;
    let mut data = ciphertext.to_vec();
    chain_decrypt(&cipher, iv, &mut data);
    let plain_len = padding::unpad(&data)?.len();
    data.truncate(plain_len);
    Ok(data)
}

/// Encrypt whole blocks in place. `data.len()` must be a multiple of the block size.
fn chain_encrypt(cipher: &AesCipher, iv: &[u8; BLOCK_SIZE], data: &mut [u8]) {
    let mut prev = *iv;
    for chunk in data.chunks_exact_mut(BLOCK_SIZE) {
        let mut block = [0u8; BLOCK_SIZE];
        for i in 0..BLOCK_SIZE {
            block[i] = chunk[i] ^ prev[i];
        }
        cipher.encrypt_block(&mut block);
        chunk.copy_from_slice(&block);
        prev = block;
    }
}

fn chain_decrypt(cipher: &AesCipher, iv: &[u8; BLOCK_SIZE], data: &mut [u8]) {
    let mut prev = *iv;
    for chunk in data.chunks_exact_mut(BLOCK_SIZE) {
        let mut block = [0u8; BLOCK_SIZE];
        block.copy_from_slice(chunk);
        let saved = block;
        cipher.decrypt_block(&mut block);
        for i in 0..BLOCK_SIZE {
            chunk[i] = block[i] ^ prev[i];
        }
        prev = saved;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const IV: [u8; BLOCK_SIZE] = [
        0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0a, 0x0b, 0x0c, 0x0d, 0x0e,
        0x0f,
    ];

    const SP800_38A_PLAINTEXT: &str = "6bc1bee22e409f96e93d7e117393172a\
        ae2d8a571e03ac9c9eb76fac45af8e51\
        30c81c46a35ce411e5fbc1191a0a52ef\
        f69f2445df4f9b17ad2b417be66c3710";

    fn key128() -> AesKey {
        AesKey::from_bytes(&hex::decode("2b7e151628aed2a6abf7158809cf4f3c").unwrap()).unwrap()
    }

    // NIST SP 800-38A F.2.1 (CBC-AES128.Encrypt)
    #[test]
    fn test_sp800_38a_cbc_aes128() {
        let key = key128();
        let cipher = AesCipher::new(key.as_bytes()).unwrap();
        let mut data = hex::decode(SP800_38A_PLAINTEXT).unwrap();

        chain_encrypt(&cipher, &IV, &mut data);
        assert_eq!(
            hex::encode(&data),
            "7649abac8119b246cee98e9b12e9197d\
             5086cb9b507219ee95db113a917678b2\
             73bed6b8e3c1743b7116e69e22229516\
             3ff1caa1681fac09120eca307586e1a7"
        );

        chain_decrypt(&cipher, &IV, &mut data);
        assert_eq!(hex::encode(&data), SP800_38A_PLAINTEXT);
    }

    // NIST SP 800-38A F.2.5 (CBC-AES256.Encrypt), first two blocks
    #[test]
    fn test_sp800_38a_cbc_aes256() {
        let key = hex::decode("603deb1015ca71be2b73aef0857d77811f352c073b6108d72d9810a30914dff4")
            .unwrap();
        let cipher = AesCipher::new(&key).unwrap();
        let mut data = hex::decode(&SP800_38A_PLAINTEXT[..64]).unwrap();

        chain_encrypt(&cipher, &IV, &mut data);
        assert_eq!(
            hex::encode(&data),
            "f58c4c04d6e5f1ba779eabfb5f7bfbd69cfc4e967edb808d679f777bc6702c7d"
        );
    }

    #[test]
    fn test_padded_encryption_known_answer() {
        let ct = encrypt_with_iv(b"Hello, CBC!", &key128(), &IV).unwrap();
        assert_eq!(hex::encode(&ct), "a8035166097bc1e2ceff3e28e05ff33f");
        assert_eq!(decrypt(&IV, &ct, &key128()).unwrap(), b"Hello, CBC!");
    }

    #[test]
    fn test_round_trip_various_lengths() {
        let mut rng = StdRng::seed_from_u64(7);
        let key = key128();
        for len in [0usize, 1, 15, 16, 17, 64, 1000] {
            let plaintext: Vec<u8> = (0..len).map(|i| (i * 31) as u8).collect();
            let out = encrypt(&plaintext, &key, &mut rng).unwrap();
            assert_eq!(out.ciphertext.len() % BLOCK_SIZE, 0);
            assert!(out.ciphertext.len() > plaintext.len());
            assert_eq!(decrypt(&out.iv, &out.ciphertext, &key).unwrap(), plaintext);
        }
    }

    #[test]
    fn test_fresh_iv_each_call() {
        let mut rng = StdRng::seed_from_u64(11);
        let key = key128();
        let a = encrypt(b"same message", &key, &mut rng).unwrap();
        let b = encrypt(b"same message", &key, &mut rng).unwrap();
        assert_ne!(a.iv, b.iv);
        assert_ne!(a.ciphertext, b.ciphertext);
    }

    #[test]
    fn test_bad_ciphertext_length() {
        let key = key128();
        assert!(matches!(
            decrypt(&IV, &[], &key),
            Err(CryptoError::DecryptionFailure(_))
        ));
        assert!(matches!(
            decrypt(&IV, &[0u8; 17], &key),
            Err(CryptoError::DecryptionFailure(_))
        ));
    }

    #[test]
    fn test_wrong_key_never_returns_original() {
        let mut rng = StdRng::seed_from_u64(3);
        let out = encrypt(b"attack at dawn", &key128(), &mut rng).unwrap();
        let other = AesKey::from_bytes(&[0x42; 16]).unwrap();
        match decrypt(&out.iv, &out.ciphertext, &other) {
            Ok(plain) => assert_ne!(plain, b"attack at dawn"),
            Err(e) => assert_eq!(e, CryptoError::Padding),
        }
    }

    #[test]
    fn test_tampered_iv_changes_first_block() {
        let mut rng = StdRng::seed_from_u64(5);
        let key = key128();
        let out = encrypt(b"0123456789abcdefXYZ", &key, &mut rng).unwrap();
        let mut iv = out.iv;
        iv[0] ^= 0x01;
        let plain = decrypt(&iv, &out.ciphertext, &key).unwrap();
        assert_eq!(plain[0], b'0' ^ 0x01);
        assert_eq!(&plain[1..], &b"0123456789abcdefXYZ"[1..]);
    }
}
