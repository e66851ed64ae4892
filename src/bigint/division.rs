// Big Integer Division
// Long division (Knuth, TAOCP vol. 2, algorithm D) and remainder

use std::ops::{Div, Rem};

use super::arithmetic::forward_binop;
use super::{ArithmeticError, BigUint, LIMB_BITS};

impl BigUint {
    /// Quotient and remainder of `self / divisor`
    pub fn div_rem(&self, divisor: &Self) -> Result<(Self, Self), ArithmeticError> {
        if divisor.is_zero() {
            return Err(ArithmeticError::DivisionByZero);
        }
        if self < divisor {
            return Ok((Self::zero(), self.clone()));
        }
        if divisor.limbs.len() == 1 {
            let (q, r) = self.div_rem_u64(divisor.limbs[0]);
            return Ok((q, Self::from_u64(r)));
        }

        Ok(self.div_rem_knuth(divisor))
    }

    /// Reduce `self` modulo `modulus`
    pub fn modulo(&self, modulus: &Self) -> Result<Self, ArithmeticError> {
        self.div_rem(modulus).map(|(_, r)| r)
    }

    /// Remainder by a single word; used for trial division
    pub fn rem_u64(&self, divisor: u64) -> u64 {
        debug_assert!(divisor != 0);
        self.limbs.iter().rev().fold(0u128, |rem, &limb| {
            ((rem << 64) | limb as u128) % divisor as u128
        }) as u64
    }

    pub(crate) fn div_rem_u64(&self, divisor: u64) -> (Self, u64) {
        debug_assert!(divisor != 0);

        let mut quotient = vec![0u64; self.limbs.len()];
        let mut rem = 0u128;

        for i in (0..self.limbs.len()).rev() {
            let cur = (rem << 64) | self.limbs[i] as u128;
            quotient[i] = (cur / divisor as u128) as u64;
            rem = cur % divisor as u128;
        }

        (BigUint::from_limbs(quotient), rem as u64)
    }

    /// Requires a divisor of at least two limbs and `self >= divisor`.
    fn div_rem_knuth(&self, divisor: &Self) -> (Self, Self) {
        const BASE: u128 = 1 << 64;

        let n = divisor.limbs.len();
        let m = self.limbs.len() - n;

        // D1: normalize so the divisor's top bit is set
        let shift = divisor.limbs[n - 1].leading_zeros() as usize;
        let v = divisor.shl_bits(shift).limbs;
        let mut u = self.shl_bits(shift).limbs;
        u.resize(m + n + 1, 0);

        let v_top = v[n - 1] as u128;
        let v_next = v[n - 2] as u128;
        let mut q = vec![0u64; m + 1];

        for j in (0..=m).rev() {
            // D3: estimate the quotient digit from the top two limbs
            let num = ((u[j + n] as u128) << 64) | u[j + n - 1] as u128;
            let mut qhat = num / v_top;
            let mut rhat = num % v_top;

            while qhat >= BASE || qhat * v_next > ((rhat << 64) | u[j + n - 2] as u128) {
                qhat -= 1;
                rhat += v_top;
                if rhat >= BASE {
                    break;
                }
            }

            // D4: u[j..=j+n] -= qhat * v
            let mut mul_carry = 0u128;
            let mut borrow = false;
            for i in 0..n {
                let p = qhat * v[i] as u128 + mul_carry;
                mul_carry = p >> 64;
                let (d1, o1) = u[i + j].overflowing_sub(p as u64);
                let (d2, o2) = d1.overflowing_sub(borrow as u64);
                u[i + j] = d2;
                borrow = o1 || o2;
            }
            let (d1, o1) = u[j + n].overflowing_sub(mul_carry as u64);
            let (d2, o2) = d1.overflowing_sub(borrow as u64);
            u[j + n] = d2;

            // D6: the estimate was one too large, add the divisor back
            if o1 || o2 {
                qhat -= 1;
                let mut carry = false;
                for i in 0..n {
                    let (s1, c1) = u[i + j].overflowing_add(v[i]);
                    let (s2, c2) = s1.overflowing_add(carry as u64);
                    u[i + j] = s2;
                    carry = c1 || c2;
                }
                u[j + n] = u[j + n].wrapping_add(carry as u64);
            }

            q[j] = qhat as u64;
        }

        // D8: unnormalize the remainder
        u.truncate(n);
        let rem = BigUint::from_limbs(u).shr_bits(shift);
        debug_assert!(shift < LIMB_BITS);

        (BigUint::from_limbs(q), rem)
    }
}

/// Panics on a zero divisor, like std integer division.
impl Div<&BigUint> for &BigUint {
    type Output = BigUint;

    fn div(self, other: &BigUint) -> BigUint {
        match self.div_rem(other) {
            Ok((q, _)) => q,
            Err(e) => panic!("{}", e),
        }
    }
}

/// Panics on a zero modulus, like std integer remainder.
impl Rem<&BigUint> for &BigUint {
    type Output = BigUint;

    fn rem(self, other: &BigUint) -> BigUint {
        match self.div_rem(other) {
            Ok((_, r)) => r,
            Err(e) => panic!("{}", e),
        }
    }
}

forward_binop!(impl Div, div);
forward_binop!(impl Rem, rem);
