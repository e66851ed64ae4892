// Modular Arithmetic
// Exponentiation, inverses, gcd and lcm

use super::{ArithmeticError, BigUint};

impl BigUint {
    /// Modular exponentiation: self^exp mod modulus
    /// Right-to-left square-and-multiply, one squaring per exponent bit
    pub fn mod_pow(&self, exp: &Self, modulus: &Self) -> Result<Self, ArithmeticError> {
        if modulus.is_zero() {
            return Err(ArithmeticError::DivisionByZero);
        }
        if modulus.is_one() {
            return Ok(Self::zero());
        }

        let mut result = Self::one();
        let mut base = self % modulus;
        let bits = exp.bits();

        for i in 0..bits {
            if exp.bit(i) {
                result = &(&result * &base) % modulus;
            }
            // The last squaring would be discarded
            if i + 1 < bits {
                base = &base.square() % modulus;
            }
        }

        Ok(result)
    }

    /// Greatest common divisor (Euclid). gcd(0, 0) is 0.
    pub fn gcd(&self, other: &Self) -> Self {
        let mut a = self.clone();
        let mut b = other.clone();
        while !b.is_zero() {
            let r = &a % &b;
            a = b;
            b = r;
        }
        a
    }

    /// Least common multiple; zero if either operand is zero
    pub fn lcm(&self, other: &Self) -> Self {
        if self.is_zero() || other.is_zero() {
            return Self::zero();
        }
        &(self / &self.gcd(other)) * other
    }

    /// Modular inverse: x with self * x ≡ 1 (mod modulus)
    ///
    /// Extended Euclidean algorithm. The Bézout coefficient is kept reduced
    /// modulo `modulus` so it never goes negative.
    pub fn mod_inverse(&self, modulus: &Self) -> Result<Self, ArithmeticError> {
        if modulus.is_zero() {
            return Err(ArithmeticError::DivisionByZero);
        }

        let mut r0 = modulus.clone();
        let mut r1 = self % modulus;
        let mut t0 = Self::zero();
        let mut t1 = Self::one();

        while !r1.is_zero() {
            let (q, r2) = r0.div_rem(&r1)?;
            // t2 = t0 - q * t1 (mod modulus)
            let qt = &(&q * &t1) % modulus;
            let t2 = &(&t0 + modulus).checked_sub(&qt)? % modulus;

            r0 = r1;
            r1 = r2;
            t0 = t1;
            t1 = t2;
        }

        if !r0.is_one() {
            return Err(ArithmeticError::NotInvertible);
        }

        Ok(&t0 % modulus)
    }
}
