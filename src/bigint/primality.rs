// Primality Testing and Random Generation
// Miller-Rabin with trial division, and random values from a caller's RNG

use std::sync::OnceLock;

use rand::{CryptoRng, RngCore};

use super::BigUint;
use crate::util::cancel::CancelToken;

/// Trial division bound
const SIEVE_LIMIT: usize = 2000;

/// Primes below SIEVE_LIMIT, computed once
fn small_primes() -> &'static [u64] {
    static PRIMES: OnceLock<Vec<u64>> = OnceLock::new();
    PRIMES.get_or_init(|| {
        let mut composite = vec![false; SIEVE_LIMIT];
        let mut primes = Vec::new();
        for i in 2..SIEVE_LIMIT {
            if composite[i] {
                continue;
            }
            primes.push(i as u64);
            for j in (i * i..SIEVE_LIMIT).step_by(i) {
                composite[j] = true;
            }
        }
        primes
    })
}

impl BigUint {
    /// Miller-Rabin primality test
    /// Returns true if self is probably prime; a composite survives `rounds`
    /// random bases with probability at most 4^-rounds
    pub fn is_probable_prime<R: RngCore + ?Sized>(&self, rounds: usize, rng: &mut R) -> bool {
        if let Some(n) = self.to_u64() {
            if n < 2 {
                return false;
            }
        }

        // Cheap rejection of most composites
        for &p in small_primes() {
            if self.to_u64() == Some(p) {
                return true;
            }
            if self.rem_u64(p) == 0 {
                return false;
            }
        }

        // No factor below the limit and smaller than its square
        let limit = SIEVE_LIMIT as u64;
        if self.to_u64().map_or(false, |n| n < limit * limit) {
            return true;
        }

        // Write n-1 as d * 2^s with d odd
        let n_minus_1 = self - 1u64;
        let s = n_minus_1.trailing_zeros();
        let d = n_minus_1.shr_bits(s);
        let two = BigUint::from_u64(2);

        'witness: for _ in 0..rounds {
            // Random base in [2, n-2]
            let a = random_range(&two, &n_minus_1, rng);

            let mut x = match a.mod_pow(&d, self) {
                Ok(x) => x,
                Err(_) => return false,
            };
            if x.is_one() || x == n_minus_1 {
                continue;
            }

            for _ in 1..s {
                x = &x.square() % self;
                if x == n_minus_1 {
                    continue 'witness;
                }
                if x.is_one() {
                    return false;
                }
            }

            // Composite
            return false;
        }

        // Probably prime
        true
    }
}

/// Uniform random integer in [0, 2^bits)
pub fn random_bits<R: RngCore + ?Sized>(bits: usize, rng: &mut R) -> BigUint {
    if bits == 0 {
        return BigUint::zero();
    }

    let mut bytes = vec![0u8; (bits + 7) / 8];
    rng.fill_bytes(&mut bytes);

    let excess = bytes.len() * 8 - bits;
    bytes[0] &= 0xff >> excess;

    BigUint::from_bytes_be(&bytes)
}

/// Uniform random integer in [0, bound) by rejection sampling.
/// `bound` must be non-zero.
pub fn random_below<R: RngCore + ?Sized>(bound: &BigUint, rng: &mut R) -> BigUint {
    assert!(!bound.is_zero(), "random_below requires a non-zero bound");

    let bits = bound.bits();
    loop {
        let candidate = random_bits(bits, rng);
        if &candidate < bound {
            return candidate;
        }
    }
}

/// Uniform random integer in [low, high). Returns `low` for an empty range.
pub fn random_range<R: RngCore + ?Sized>(low: &BigUint, high: &BigUint, rng: &mut R) -> BigUint {
    if low >= high {
        return low.clone();
    }
    low + random_below(&(high - low), rng)
}

/// Parameters for a bounded random prime search
#[derive(Clone, Debug)]
pub struct PrimeSearch {
    /// Exact bit length of the prime
    pub bits: usize,
    /// Miller-Rabin rounds per candidate
    pub rounds: usize,
    /// Candidates to try before giving up
    pub max_candidates: usize,
}

impl PrimeSearch {
    pub fn new(bits: usize, rounds: usize, max_candidates: usize) -> Self {
        Self { bits, rounds, max_candidates }
    }
}

/// Why a prime search stopped without a result
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchStopped {
    Exhausted { candidates: usize },
    Cancelled,
}

/// Generate a random prime of exactly `search.bits` bits.
///
/// The top two bits are forced on so that the product of two such primes
/// has exactly twice as many bits. Checks `cancel` before every candidate.
pub fn random_prime<R: RngCore + CryptoRng + ?Sized>(
    search: &PrimeSearch,
    rng: &mut R,
    cancel: &CancelToken,
) -> Result<BigUint, SearchStopped> {
    assert!(search.bits >= 2, "primes need at least two bits");

    for tried in 0..search.max_candidates {
        if cancel.is_cancelled() {
            tracing::debug!(tried, "prime search cancelled");
            return Err(SearchStopped::Cancelled);
        }

        let mut candidate = random_bits(search.bits, rng);
        candidate.set_bit(search.bits - 1);
        candidate.set_bit(search.bits - 2);
        candidate.set_bit(0);

        if candidate.is_probable_prime(search.rounds, rng) {
            tracing::debug!(bits = search.bits, candidates = tried + 1, "found prime");
            return Ok(candidate);
        }
    }

    Err(SearchStopped::Exhausted {
        candidates: search.max_candidates,
    })
}
