// RSA Encryption Implementation
// Implements RSA encryption with PKCS#1 v1.5 padding

use rand::{CryptoRng, RngCore};

use crate::bigint::BigUint;
use crate::error::{CryptoError, Result};

use super::keygen::RsaPublicKey;
use super::padding::pad_pkcs1_v15;

/// Encrypt bytes using an RSA public key.
///
/// The output is always exactly `public_key.size()` bytes.
pub fn encrypt<R>(plaintext: &[u8], public_key: &RsaPublicKey, rng: &mut R) -> Result<Vec<u8>>
where
    R: RngCore + CryptoRng + ?Sized,
{
    let k = public_key.size();
    let em = pad_pkcs1_v15(plaintext, k, rng)?;

    // c = m^e mod n
    let m = BigUint::from_bytes_be(&em);
    let c = m.mod_pow(public_key.e(), public_key.n())?;

    c.to_bytes_be_padded(k)
        .ok_or_else(|| CryptoError::Encoding("ciphertext wider than the modulus".into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rsa::keygen::{generate_keypair, RsaKeyPair};
    use crate::util::{CancelToken, CoreConfig};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn keypair(bits: u32, seed: u64) -> RsaKeyPair {
        let mut rng = StdRng::seed_from_u64(seed);
        generate_keypair(bits, &CoreConfig::default(), &mut rng, &CancelToken::new()).unwrap()
    }

    #[test]
    fn test_encrypt_bytes() {
        let keypair = keypair(512, 11);
        let mut rng = StdRng::seed_from_u64(1);
        let message = b"Hello, RSA!";

        let ciphertext = encrypt(message, &keypair.public_key, &mut rng).unwrap();
        assert_eq!(ciphertext.len(), 64); // 512 bits = 64 bytes
        assert_ne!(&ciphertext[..message.len()], message);
    }

    #[test]
    fn test_encrypt_is_randomized() {
        let keypair = keypair(512, 12);
        let mut rng = StdRng::seed_from_u64(2);

        let a = encrypt(b"again", &keypair.public_key, &mut rng).unwrap();
        let b = encrypt(b"again", &keypair.public_key, &mut rng).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_encrypt_large_data() {
        let keypair = keypair(1024, 13);
        let mut rng = StdRng::seed_from_u64(3);

        // 128 - 11 = 117 bytes is the ceiling for 1024 bits
        let ciphertext = encrypt(&[0x5au8; 117], &keypair.public_key, &mut rng).unwrap();
        assert_eq!(ciphertext.len(), 128);

        assert_eq!(
            encrypt(&[0x5au8; 118], &keypair.public_key, &mut rng).unwrap_err(),
            CryptoError::MessageTooLong { max: 117, actual: 118 }
        );
    }

    #[test]
    fn test_encrypt_empty() {
        let keypair = keypair(512, 14);
        let mut rng = StdRng::seed_from_u64(4);

        let ciphertext = encrypt(b"", &keypair.public_key, &mut rng).unwrap();
        assert_eq!(keypair.private_key.decrypt(&ciphertext).unwrap(), b"");
    }
}
