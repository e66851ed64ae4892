// RSA Key Generation
// Key types and bounded, cancellable key pair generation

use std::fmt;
use std::time::Instant;

use rand::{CryptoRng, RngCore};
use tracing::{debug, info, warn};
use zeroize::Zeroize;

use crate::bigint::{random_prime, BigUint, PrimeSearch, SearchStopped};
use crate::error::{CryptoError, Result};
use crate::util::config::{validate_rsa_bits, CoreConfig, MAX_RSA_BITS, MIN_RSA_BITS};
use crate::util::CancelToken;

/// Public exponent used for every generated key
pub const PUBLIC_EXPONENT: u64 = 65537;

/// RSA Public Key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RsaPublicKey {
    n: BigUint, // Modulus
    e: BigUint, // Public exponent
}

/// RSA Private Key
///
/// Secret components are wiped when the key is dropped.
#[derive(Clone, PartialEq, Eq)]
pub struct RsaPrivateKey {
    n: BigUint,
    e: BigUint,
    d: BigUint,
    p: BigUint,
    q: BigUint,
    // CRT values for faster decryption
    d_p: BigUint,   // d mod (p-1)
    d_q: BigUint,   // d mod (q-1)
    q_inv: BigUint, // q^(-1) mod p
}

/// RSA Key Pair (both public and private keys)
#[derive(Debug, Clone)]
pub struct RsaKeyPair {
    pub public_key: RsaPublicKey,
    pub private_key: RsaPrivateKey,
}

impl RsaPublicKey {
    /// Build a public key from its modulus and exponent.
    ///
    /// The modulus must be odd and 512 to 4096 bits; the exponent odd,
    /// at least 3 and smaller than the modulus.
    pub fn new(n: BigUint, e: BigUint) -> Result<Self> {
        let bits = n.bits();
        if bits < MIN_RSA_BITS as usize || bits > MAX_RSA_BITS as usize {
            return Err(CryptoError::InvalidKey(format!(
                "modulus of {} bits is outside {}..={}",
                bits, MIN_RSA_BITS, MAX_RSA_BITS
            )));
        }
        if n.is_even() {
            return Err(CryptoError::InvalidKey("modulus must be odd".into()));
        }
        if e.is_even() || e < BigUint::from_u64(3) || e >= n {
            return Err(CryptoError::InvalidKey("public exponent out of range".into()));
        }
        Ok(Self { n, e })
    }

    pub fn n(&self) -> &BigUint {
        &self.n
    }

    pub fn e(&self) -> &BigUint {
        &self.e
    }

    /// Modulus size in bits
    pub fn bits(&self) -> usize {
        self.n.bits()
    }

    /// Modulus size in bytes; every ciphertext is exactly this long
    pub fn size(&self) -> usize {
        (self.n.bits() + 7) / 8
    }

    /// Largest plaintext this key can encrypt
    pub fn max_message_len(&self) -> usize {
        self.size().saturating_sub(super::padding::MIN_PADDING_LEN)
    }

    /// Encrypt a message using this public key
    pub fn encrypt<R>(&self, plaintext: &[u8], rng: &mut R) -> Result<Vec<u8>>
    where
        R: RngCore + CryptoRng + ?Sized,
    {
        super::encrypt::encrypt(plaintext, self, rng)
    }
}

impl RsaPrivateKey {
    /// Assemble a private key from `n`, `e`, `d` and the two primes.
    ///
    /// Checks `n = p * q` and `e * d = 1 (mod lcm(p-1, q-1))`, then derives
    /// the CRT values.
    pub fn from_components(
        n: BigUint,
        e: BigUint,
        d: BigUint,
        p: BigUint,
        q: BigUint,
    ) -> Result<Self> {
        RsaPublicKey::new(n.clone(), e.clone())?;

        let one = BigUint::one();
        if p <= one || q <= one || p == q || &p * &q != n {
            return Err(CryptoError::InvalidKey("primes do not match the modulus".into()));
        }

        let p_minus_1 = &p - 1u64;
        let q_minus_1 = &q - 1u64;
        let lambda = p_minus_1.lcm(&q_minus_1);
        if !((&e * &d) % &lambda).is_one() {
            return Err(CryptoError::InvalidKey(
                "private exponent does not invert the public exponent".into(),
            ));
        }

        let d_p = &d % &p_minus_1;
        let d_q = &d % &q_minus_1;
        let q_inv = q
            .mod_inverse(&p)
            .map_err(|_| CryptoError::InvalidKey("q is not invertible mod p".into()))?;

        Ok(Self {
            n,
            e,
            d,
            p,
            q,
            d_p,
            d_q,
            q_inv,
        })
    }

    pub fn to_public_key(&self) -> RsaPublicKey {
        RsaPublicKey {
            n: self.n.clone(),
            e: self.e.clone(),
        }
    }

    pub fn n(&self) -> &BigUint {
        &self.n
    }

    pub fn e(&self) -> &BigUint {
        &self.e
    }

    pub fn d(&self) -> &BigUint {
        &self.d
    }

    pub fn p(&self) -> &BigUint {
        &self.p
    }

    pub fn q(&self) -> &BigUint {
        &self.q
    }

    pub fn d_p(&self) -> &BigUint {
        &self.d_p
    }

    pub fn d_q(&self) -> &BigUint {
        &self.d_q
    }

    pub fn q_inv(&self) -> &BigUint {
        &self.q_inv
    }

    pub fn bits(&self) -> usize {
        self.n.bits()
    }

    pub fn size(&self) -> usize {
        (self.n.bits() + 7) / 8
    }

    /// Decrypt a ciphertext using this private key
    pub fn decrypt(&self, ciphertext: &[u8]) -> Result<Vec<u8>> {
        super::decrypt::decrypt(ciphertext, self)
    }
}

impl fmt::Debug for RsaPrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RsaPrivateKey")
            .field("n", &self.n)
            .field("e", &self.e)
            .finish_non_exhaustive()
    }
}

impl Drop for RsaPrivateKey {
    fn drop(&mut self) {
        self.d.zeroize();
        self.p.zeroize();
        self.q.zeroize();
        self.d_p.zeroize();
        self.d_q.zeroize();
        self.q_inv.zeroize();
    }
}

impl RsaKeyPair {
    /// Modulus size in bits
    pub fn bits(&self) -> usize {
        self.public_key.bits()
    }
}

/// Generate an RSA key pair with a modulus of exactly `bits` bits.
///
/// `bits` must be even and within 512..=4096. Both primes have `bits / 2`
/// bits with the top two set, and `e = 65537`. The search is bounded by
/// `config`: each prime gets a fixed candidate budget and the whole
/// procedure gives up after `keygen_max_attempts` attempts. `cancel` is
/// polled between candidates.
pub fn generate_keypair<R>(
    bits: u32,
    config: &CoreConfig,
    rng: &mut R,
    cancel: &CancelToken,
) -> Result<RsaKeyPair>
where
    R: RngCore + CryptoRng + ?Sized,
{
    validate_rsa_bits(bits)?;
    config.validate()?;

    let half_bits = bits as usize / 2;
    let search = PrimeSearch::new(
        half_bits,
        config.miller_rabin_rounds,
        config.candidates_per_prime(half_bits),
    );
    let e = BigUint::from_u64(PUBLIC_EXPONENT);
    let started = Instant::now();

    // A p that passed its checks survives failed attempts; only q is redrawn
    let mut kept_p: Option<BigUint> = None;

    for attempt in 1..=config.keygen_max_attempts {
        let p = match kept_p.take() {
            Some(p) => p,
            None => match search_prime(&search, rng, cancel)? {
                Some(p) if shares_factor_with(&e, &p) => {
                    debug!(attempt, "p - 1 shares a factor with e, discarding p");
                    continue;
                }
                Some(p) => p,
                None => continue,
            },
        };

        let q = match search_prime(&search, rng, cancel)? {
            Some(q) => q,
            None => {
                kept_p = Some(p);
                continue;
            }
        };
        if q == p {
            debug!(attempt, "drew p == q, regenerating q");
            kept_p = Some(p);
            continue;
        }
        if shares_factor_with(&e, &q) {
            debug!(attempt, "gcd(e, lambda) != 1, regenerating q");
            kept_p = Some(p);
            continue;
        }

        // Keep p > q so q_inv is taken modulo the larger prime
        let (p, q) = if p > q { (p, q) } else { (q, p) };
        let n = &p * &q;
        if n.bits() != bits as usize {
            debug!(attempt, got = n.bits(), "modulus has wrong size, retrying");
            continue;
        }

        let lambda = (&p - 1u64).lcm(&(&q - 1u64));
        let d = e.mod_inverse(&lambda)?;
        let private_key = RsaPrivateKey::from_components(n, e.clone(), d, p, q)?;

        info!(
            bits,
            attempts = attempt,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "generated RSA key pair"
        );
        return Ok(RsaKeyPair {
            public_key: private_key.to_public_key(),
            private_key,
        });
    }

    warn!(
        bits,
        attempts = config.keygen_max_attempts,
        "RSA key generation gave up"
    );
    Err(CryptoError::KeyGenerationFailure {
        attempts: config.keygen_max_attempts,
    })
}

/// True when `gcd(e, prime - 1) != 1`
fn shares_factor_with(e: &BigUint, prime: &BigUint) -> bool {
    !e.gcd(&(prime - 1u64)).is_one()
}

/// Run one bounded prime search; `None` when the candidate budget ran out
fn search_prime<R>(
    search: &PrimeSearch,
    rng: &mut R,
    cancel: &CancelToken,
) -> Result<Option<BigUint>>
where
    R: RngCore + CryptoRng + ?Sized,
{
    match random_prime(search, rng, cancel) {
        Ok(prime) => Ok(Some(prime)),
        Err(SearchStopped::Cancelled) => Err(CryptoError::Cancelled),
        Err(SearchStopped::Exhausted { candidates }) => {
            warn!(
                bits = search.bits,
                candidates, "prime search exhausted its candidate budget"
            );
            Ok(None)
        }
    }
}
