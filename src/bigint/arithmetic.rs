// Big Integer Arithmetic
// Addition, subtraction, multiplication and shifts on limb vectors

use std::ops::{Add, Mul, Shl, Shr, Sub};

use super::{ArithmeticError, BigUint, LIMB_BITS};

/// Forward owned/borrowed operand combinations to the `&a op &b` impl
macro_rules! forward_binop {
    (impl $imp:ident, $method:ident) => {
        impl $imp<BigUint> for BigUint {
            type Output = BigUint;
            fn $method(self, other: BigUint) -> BigUint {
                (&self).$method(&other)
            }
        }

        impl $imp<&BigUint> for BigUint {
            type Output = BigUint;
            fn $method(self, other: &BigUint) -> BigUint {
                (&self).$method(other)
            }
        }

        impl $imp<BigUint> for &BigUint {
            type Output = BigUint;
            fn $method(self, other: BigUint) -> BigUint {
                self.$method(&other)
            }
        }

        impl $imp<u64> for &BigUint {
            type Output = BigUint;
            fn $method(self, other: u64) -> BigUint {
                self.$method(&BigUint::from_u64(other))
            }
        }

        impl $imp<u64> for BigUint {
            type Output = BigUint;
            fn $method(self, other: u64) -> BigUint {
                (&self).$method(&BigUint::from_u64(other))
            }
        }
    };
}

pub(crate) use forward_binop;

impl BigUint {
    /// `self - other`, failing instead of wrapping when other > self
    pub fn checked_sub(&self, other: &Self) -> Result<Self, ArithmeticError> {
        if self < other {
            return Err(ArithmeticError::Underflow);
        }

        let mut result = self.limbs.clone();
        let mut borrow = false;

        for (i, limb) in result.iter_mut().enumerate() {
            let b = other.limbs.get(i).copied().unwrap_or(0);
            let (d1, o1) = limb.overflowing_sub(b);
            let (d2, o2) = d1.overflowing_sub(borrow as u64);
            *limb = d2;
            borrow = o1 || o2;
        }

        debug_assert!(!borrow);
        Ok(BigUint::from_limbs(result))
    }

    pub fn square(&self) -> Self {
        self * self
    }

    /// Multiply by a single word
    pub fn mul_u64(&self, m: u64) -> Self {
        if m == 0 || self.is_zero() {
            return Self::zero();
        }

        let mut result = Vec::with_capacity(self.limbs.len() + 1);
        let mut carry = 0u128;
        for &limb in &self.limbs {
            let product = (limb as u128) * (m as u128) + carry;
            result.push(product as u64);
            carry = product >> 64;
        }
        if carry != 0 {
            result.push(carry as u64);
        }

        BigUint::from_limbs(result)
    }

    pub fn shl_bits(&self, shift: usize) -> Self {
        if self.is_zero() {
            return Self::zero();
        }

        let limb_shift = shift / LIMB_BITS;
        let bit_shift = shift % LIMB_BITS;

        let mut result = vec![0u64; limb_shift];
        result.reserve(self.limbs.len() + 1);

        if bit_shift == 0 {
            result.extend_from_slice(&self.limbs);
        } else {
            let mut carry = 0u64;
            for &limb in &self.limbs {
                result.push((limb << bit_shift) | carry);
                carry = limb >> (LIMB_BITS - bit_shift);
            }
            if carry != 0 {
                result.push(carry);
            }
        }

        BigUint::from_limbs(result)
    }

    pub fn shr_bits(&self, shift: usize) -> Self {
        let limb_shift = shift / LIMB_BITS;
        if limb_shift >= self.limbs.len() {
            return Self::zero();
        }

        let bit_shift = shift % LIMB_BITS;
        let src = &self.limbs[limb_shift..];

        let result = if bit_shift == 0 {
            src.to_vec()
        } else {
            src.iter()
                .enumerate()
                .map(|(i, &limb)| {
                    let hi = src.get(i + 1).map_or(0, |&next| next << (LIMB_BITS - bit_shift));
                    (limb >> bit_shift) | hi
                })
                .collect()
        };

        BigUint::from_limbs(result)
    }
}

impl Add<&BigUint> for &BigUint {
    type Output = BigUint;

    fn add(self, other: &BigUint) -> BigUint {
        let (long, short) = if self.limbs.len() >= other.limbs.len() {
            (&self.limbs, &other.limbs)
        } else {
            (&other.limbs, &self.limbs)
        };

        let mut result = Vec::with_capacity(long.len() + 1);
        let mut carry = false;

        for (i, &a) in long.iter().enumerate() {
            let b = short.get(i).copied().unwrap_or(0);
            let (s1, o1) = a.overflowing_add(b);
            let (s2, o2) = s1.overflowing_add(carry as u64);
            result.push(s2);
            carry = o1 || o2;
        }
        if carry {
            result.push(1);
        }

        BigUint::from_limbs(result)
    }
}

/// Panics on underflow, like subtraction on std unsigned integers.
/// Use [`BigUint::checked_sub`] when the ordering is not known.
impl Sub<&BigUint> for &BigUint {
    type Output = BigUint;

    fn sub(self, other: &BigUint) -> BigUint {
        match self.checked_sub(other) {
            Ok(diff) => diff,
            Err(_) => panic!("attempt to subtract with overflow"),
        }
    }
}

impl Mul<&BigUint> for &BigUint {
    type Output = BigUint;

    fn mul(self, other: &BigUint) -> BigUint {
        if self.is_zero() || other.is_zero() {
            return BigUint::zero();
        }

        let mut result = vec![0u64; self.limbs.len() + other.limbs.len()];

        for (i, &a) in self.limbs.iter().enumerate() {
            let mut carry = 0u128;
            for (j, &b) in other.limbs.iter().enumerate() {
                let t = (a as u128) * (b as u128) + (result[i + j] as u128) + carry;
                result[i + j] = t as u64;
                carry = t >> 64;
            }
            // Row i never reaches past index i + other.len()
            result[i + other.limbs.len()] = carry as u64;
        }

        BigUint::from_limbs(result)
    }
}

forward_binop!(impl Add, add);
forward_binop!(impl Sub, sub);
forward_binop!(impl Mul, mul);

impl Shl<usize> for &BigUint {
    type Output = BigUint;
    fn shl(self, shift: usize) -> BigUint {
        self.shl_bits(shift)
    }
}

impl Shl<usize> for BigUint {
    type Output = BigUint;
    fn shl(self, shift: usize) -> BigUint {
        self.shl_bits(shift)
    }
}

impl Shr<usize> for &BigUint {
    type Output = BigUint;
    fn shr(self, shift: usize) -> BigUint {
        self.shr_bits(shift)
    }
}

impl Shr<usize> for BigUint {
    type Output = BigUint;
    fn shr(self, shift: usize) -> BigUint {
        self.shr_bits(shift)
    }
}
