// Numeric Trait Implementations
// Lets BigUint stand in wherever num-traits / num-integer bounds are used

use num_integer::Integer;
use num_traits::{CheckedDiv, CheckedSub, Num, One, Zero};

use super::{ArithmeticError, BigUint};

impl Zero for BigUint {
    fn zero() -> Self {
        BigUint::zero()
    }

    fn is_zero(&self) -> bool {
        BigUint::is_zero(self)
    }
}

impl One for BigUint {
    fn one() -> Self {
        BigUint::one()
    }

    fn is_one(&self) -> bool {
        BigUint::is_one(self)
    }
}

impl Num for BigUint {
    type FromStrRadixErr = ArithmeticError;

    fn from_str_radix(s: &str, radix: u32) -> Result<Self, ArithmeticError> {
        BigUint::parse_radix(s, radix)
    }
}

impl CheckedSub for BigUint {
    fn checked_sub(&self, v: &Self) -> Option<Self> {
        BigUint::checked_sub(self, v).ok()
    }
}

impl CheckedDiv for BigUint {
    fn checked_div(&self, v: &Self) -> Option<Self> {
        BigUint::div_rem(self, v).ok().map(|(q, _)| q)
    }
}

impl Integer for BigUint {
    // Unsigned: floor and truncating division agree
    fn div_floor(&self, other: &Self) -> Self {
        self / other
    }

    fn mod_floor(&self, other: &Self) -> Self {
        self % other
    }

    fn gcd(&self, other: &Self) -> Self {
        BigUint::gcd(self, other)
    }

    fn lcm(&self, other: &Self) -> Self {
        BigUint::lcm(self, other)
    }

    fn is_multiple_of(&self, other: &Self) -> bool {
        if other.is_zero() {
            return self.is_zero();
        }
        (self % other).is_zero()
    }

    fn is_even(&self) -> bool {
        BigUint::is_even(self)
    }

    fn is_odd(&self) -> bool {
        BigUint::is_odd(self)
    }

    fn div_rem(&self, other: &Self) -> (Self, Self) {
        match BigUint::div_rem(self, other) {
            Ok(qr) => qr,
            Err(e) => panic!("{}", e),
        }
    }
}
