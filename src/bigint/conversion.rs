// Big Integer Conversion
// Byte strings, radix strings and formatting

use std::fmt;
use std::str::FromStr;

use super::{ArithmeticError, BigUint};

impl BigUint {
    /// Create a big integer from big-endian bytes
    pub fn from_bytes_be(bytes: &[u8]) -> Self {
        let limbs = bytes
            .rchunks(8)
            .map(|chunk| chunk.iter().fold(0u64, |acc, &b| (acc << 8) | b as u64))
            .collect();
        BigUint::from_limbs(limbs)
    }

    /// Minimal big-endian encoding (empty for zero)
    pub fn to_bytes_be(&self) -> Vec<u8> {
        let mut bytes: Vec<u8> = self
            .limbs
            .iter()
            .rev()
            .flat_map(|limb| limb.to_be_bytes())
            .collect();
        let first = bytes.iter().position(|&b| b != 0).unwrap_or(bytes.len());
        bytes.drain(..first);
        bytes
    }

    /// Big-endian encoding left-padded with zeros to exactly `len` bytes.
    ///
    /// Returns `None` if the value needs more than `len` bytes.
    pub fn to_bytes_be_padded(&self, len: usize) -> Option<Vec<u8>> {
        let bytes = self.to_bytes_be();
        if bytes.len() > len {
            return None;
        }
        let mut out = vec![0u8; len - bytes.len()];
        out.extend_from_slice(&bytes);
        Some(out)
    }

    /// Parse digits in `radix` (2..=36). Underscores are ignored.
    pub fn parse_radix(s: &str, radix: u32) -> Result<Self, ArithmeticError> {
        if !(2..=36).contains(&radix) {
            return Err(ArithmeticError::ParseError(format!("unsupported radix {}", radix)));
        }

        let digits = s.trim();
        if digits.is_empty() {
            return Err(ArithmeticError::ParseError("empty string".to_string()));
        }

        let mut result = BigUint::zero();
        for c in digits.chars().filter(|&c| c != '_') {
            let d = c.to_digit(radix).ok_or_else(|| {
                ArithmeticError::ParseError(format!("invalid digit '{}' for radix {}", c, radix))
            })?;
            result = result.mul_u64(radix as u64) + d as u64;
        }

        Ok(result)
    }

    /// Parse a hex string, with or without a `0x` prefix
    pub fn from_hex(s: &str) -> Result<Self, ArithmeticError> {
        let s = s.trim();
        let s = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")).unwrap_or(s);
        Self::parse_radix(s, 16)
    }

    /// Render in `radix` (2..=36), lowercase
    pub fn to_str_radix(&self, radix: u32) -> String {
        assert!((2..=36).contains(&radix), "radix must be in 2..=36");

        if self.is_zero() {
            return "0".to_string();
        }

        // Peel off the largest power of radix that fits in a limb at a time
        let mut chunk_digits = 1u32;
        let mut chunk = radix as u64;
        while let Some(next) = chunk.checked_mul(radix as u64) {
            chunk = next;
            chunk_digits += 1;
        }

        let mut groups = Vec::new();
        let mut n = self.clone();
        while !n.is_zero() {
            let (q, r) = n.div_rem_u64(chunk);
            groups.push(r);
            n = q;
        }

        let mut out = String::new();
        for (i, &group) in groups.iter().rev().enumerate() {
            let mut digits = Vec::with_capacity(chunk_digits as usize);
            let mut g = group;
            while g > 0 {
                digits.push(std::char::from_digit((g % radix as u64) as u32, radix).unwrap_or('?'));
                g /= radix as u64;
            }
            // Inner groups keep their leading zeros
            if i > 0 {
                digits.resize(chunk_digits as usize, '0');
            }
            out.extend(digits.iter().rev());
        }
        out
    }
}

impl FromStr for BigUint {
    type Err = ArithmeticError;

    /// Decimal, or hex when prefixed with `0x`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.trim();
        if t.starts_with("0x") || t.starts_with("0X") {
            Self::from_hex(t)
        } else {
            Self::parse_radix(t, 10)
        }
    }
}

impl fmt::Display for BigUint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad_integral(true, "", &self.to_str_radix(10))
    }
}

impl fmt::LowerHex for BigUint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad_integral(true, "0x", &self.to_str_radix(16))
    }
}

impl fmt::UpperHex for BigUint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad_integral(true, "0x", &self.to_str_radix(16).to_uppercase())
    }
}
