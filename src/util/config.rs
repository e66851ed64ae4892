// Core Configuration
// Tunable parameters shared by the engines and the service facade

use crate::aes::AesKeySize;
use crate::error::{CryptoError, Result};

/// Smallest and largest RSA modulus sizes accepted
pub const MIN_RSA_BITS: u32 = 512;
pub const MAX_RSA_BITS: u32 = 4096;

/// Configuration for the crypto engines
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CoreConfig {
    /// Key size for passphrase-derived AES keys
    pub aes_key_size: AesKeySize,
    /// PBKDF2 iteration count
    pub kdf_iterations: u32,
    /// Miller-Rabin rounds per prime candidate
    pub miller_rabin_rounds: usize,
    /// Candidates tried per prime before giving up; 0 derives 20 x prime bits
    pub prime_candidate_limit: usize,
    /// Full key-pair attempts before reporting failure
    pub keygen_max_attempts: usize,
    /// Largest plaintext accepted by the facade, in bytes
    pub max_message_len: usize,
    /// Modulus size used when the caller does not pick one
    pub default_rsa_bits: u32,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            aes_key_size: AesKeySize::Aes256,
            kdf_iterations: 10_000,
            miller_rabin_rounds: 40,
            prime_candidate_limit: 0,
            keygen_max_attempts: 16,
            max_message_len: 16 * 1024 * 1024,
            default_rsa_bits: 1024,
        }
    }
}

impl CoreConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_aes_key_size(mut self, size: AesKeySize) -> Self {
        self.aes_key_size = size;
        self
    }

    pub fn with_kdf_iterations(mut self, iterations: u32) -> Self {
        self.kdf_iterations = iterations;
        self
    }

    pub fn with_miller_rabin_rounds(mut self, rounds: usize) -> Self {
        self.miller_rabin_rounds = rounds;
        self
    }

    pub fn with_prime_candidate_limit(mut self, limit: usize) -> Self {
        self.prime_candidate_limit = limit;
        self
    }

    pub fn with_keygen_max_attempts(mut self, attempts: usize) -> Self {
        self.keygen_max_attempts = attempts;
        self
    }

    pub fn with_max_message_len(mut self, len: usize) -> Self {
        self.max_message_len = len;
        self
    }

    pub fn with_default_rsa_bits(mut self, bits: u32) -> Self {
        self.default_rsa_bits = bits;
        self
    }

    /// Candidate budget for one prime of `prime_bits` bits.
    ///
    /// Primes near 2^k have density about 1/(k ln 2); twenty times the bit
    /// length leaves a wide margin over the expected search length.
    pub fn candidates_per_prime(&self, prime_bits: usize) -> usize {
        if self.prime_candidate_limit > 0 {
            self.prime_candidate_limit
        } else {
            20 * prime_bits.max(8)
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.kdf_iterations == 0 {
            return Err(CryptoError::InputValidation(
                "kdf_iterations must be at least 1".into(),
            ));
        }
        if self.miller_rabin_rounds == 0 {
            return Err(CryptoError::InputValidation(
                "miller_rabin_rounds must be at least 1".into(),
            ));
        }
        if self.keygen_max_attempts == 0 {
            return Err(CryptoError::InputValidation(
                "keygen_max_attempts must be at least 1".into(),
            ));
        }
        validate_rsa_bits(self.default_rsa_bits)
    }
}

/// RSA modulus sizes must be even and within 512..=4096
pub fn validate_rsa_bits(bits: u32) -> Result<()> {
    if !(MIN_RSA_BITS..=MAX_RSA_BITS).contains(&bits) || bits % 2 != 0 {
        return Err(CryptoError::InputValidation(format!(
            "RSA key size must be an even number of bits in {}..={}, got {}",
            MIN_RSA_BITS, MAX_RSA_BITS, bits
        )));
    }
    Ok(())
}
