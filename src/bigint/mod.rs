// Big Integer Arithmetic
// Arbitrary-precision unsigned integers backing the RSA engine

mod arithmetic;
mod conversion;
mod division;
mod modular;
mod primality;
mod traits;

use std::cmp::Ordering;
use std::fmt;

use thiserror::Error;
use zeroize::Zeroize;

pub use primality::{
    random_bits, random_below, random_prime, random_range, PrimeSearch, SearchStopped,
};

/// Bits per limb
pub const LIMB_BITS: usize = 64;

/// Failures of arithmetic preconditions.
///
/// These indicate a caller bug rather than bad user input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ArithmeticError {
    #[error("subtraction underflow: result would be negative")]
    Underflow,

    #[error("value is not invertible for this modulus")]
    NotInvertible,

    #[error("division by zero")]
    DivisionByZero,

    #[error("invalid number: {0}")]
    ParseError(String),
}

/// Non-negative integer of arbitrary size.
///
/// Limbs are little-endian 64-bit words. The representation is canonical:
/// the most significant limb is never zero, and zero has no limbs at all.
#[derive(Clone, PartialEq, Eq, Hash, Default)]
pub struct BigUint {
    limbs: Vec<u64>,
}

impl BigUint {
    pub fn zero() -> Self {
        Self { limbs: Vec::new() }
    }

    pub fn one() -> Self {
        Self { limbs: vec![1] }
    }

    pub fn from_u64(n: u64) -> Self {
        Self::from_limbs(vec![n])
    }

    /// Build from little-endian limbs, trimming high zero limbs
    pub fn from_limbs(limbs: Vec<u64>) -> Self {
        let mut n = Self { limbs };
        n.normalize();
        n
    }

    pub(crate) fn normalize(&mut self) {
        while self.limbs.last() == Some(&0) {
            self.limbs.pop();
        }
    }

    pub fn limbs(&self) -> &[u64] {
        &self.limbs
    }

    pub fn is_zero(&self) -> bool {
        self.limbs.is_empty()
    }

    pub fn is_one(&self) -> bool {
        self.limbs.len() == 1 && self.limbs[0] == 1
    }

    pub fn is_odd(&self) -> bool {
        self.limbs.first().map_or(false, |l| l & 1 == 1)
    }

    pub fn is_even(&self) -> bool {
        !self.is_odd()
    }

    /// Number of significant bits (0 for zero)
    pub fn bits(&self) -> usize {
        match self.limbs.last() {
            None => 0,
            Some(top) => {
                (self.limbs.len() - 1) * LIMB_BITS + (LIMB_BITS - top.leading_zeros() as usize)
            }
        }
    }

    /// Test bit `i` (bit 0 is the least significant)
    pub fn bit(&self, i: usize) -> bool {
        self.limbs
            .get(i / LIMB_BITS)
            .map_or(false, |l| (l >> (i % LIMB_BITS)) & 1 == 1)
    }

    pub fn set_bit(&mut self, i: usize) {
        let idx = i / LIMB_BITS;
        if idx >= self.limbs.len() {
            self.limbs.resize(idx + 1, 0);
        }
        self.limbs[idx] |= 1 << (i % LIMB_BITS);
    }

    /// Number of trailing zero bits (0 for zero)
    pub fn trailing_zeros(&self) -> usize {
        for (i, &limb) in self.limbs.iter().enumerate() {
            if limb != 0 {
                return i * LIMB_BITS + limb.trailing_zeros() as usize;
            }
        }
        0
    }

    /// Value as u64 if it fits
    pub fn to_u64(&self) -> Option<u64> {
        match self.limbs.len() {
            0 => Some(0),
            1 => Some(self.limbs[0]),
            _ => None,
        }
    }
}

impl Ord for BigUint {
    fn cmp(&self, other: &Self) -> Ordering {
        // Canonical form means a longer limb vector is a larger value
        self.limbs
            .len()
            .cmp(&other.limbs.len())
            .then_with(|| self.limbs.iter().rev().cmp(other.limbs.iter().rev()))
    }
}

impl PartialOrd for BigUint {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Debug for BigUint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BigUint(0x{:x})", self)
    }
}

impl Zeroize for BigUint {
    fn zeroize(&mut self) {
        self.limbs.zeroize();
    }
}

impl From<u64> for BigUint {
    fn from(n: u64) -> Self {
        Self::from_u64(n)
    }
}

impl From<u32> for BigUint {
    fn from(n: u32) -> Self {
        Self::from_u64(n as u64)
    }
}

impl From<u8> for BigUint {
    fn from(n: u8) -> Self {
        Self::from_u64(n as u64)
    }
}
