//! Decimal text input and output.

use alloc::vec::Vec;
use core::fmt;
use core::str::FromStr;

use crate::{
    magnitude,
    BigInt,
    ParseBigIntError,
};

/// Largest power of ten that fits one 32-bit digit; short division peels
/// nine decimal digits per round.
const SHORT_POWER_OF_TEN: u32 = 1_000_000_000;

impl fmt::Display for BigInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            return f.write_str("0");
        }
        let mut scratch = self.digits().to_vec();
        let mut chunks = Vec::new();
        while !scratch.is_empty() {
            chunks.push(magnitude::div_short_assign(&mut scratch, SHORT_POWER_OF_TEN));
        }
        if self.is_negative() {
            f.write_str("-")?;
        }
        let mut chunks = chunks.iter().rev();
        if let Some(head) = chunks.next() {
            write!(f, "{head}")?;
        }
        for chunk in chunks {
            write!(f, "{chunk:09}")?;
        }
        Ok(())
    }
}

impl FromStr for BigInt {
    type Err = ParseBigIntError;

    /// Parses a signed decimal literal.
    ///
    /// Input is permissive about leading whitespace and leading zeros;
    /// anything else that is not an ASCII digit is rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim_start();
        let (negative, digits) = match text.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, text),
        };
        if digits.is_empty() {
            return Err(ParseBigIntError::Empty);
        }
        let mut magnitude_digits = Vec::new();
        for byte in digits.bytes() {
            if !byte.is_ascii_digit() {
                return Err(ParseBigIntError::InvalidDigit);
            }
            magnitude::mul_add_short(&mut magnitude_digits, 10, (byte - b'0') as u32);
        }
        Ok(BigInt::from_parts(negative, magnitude_digits))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn zero_renders_as_single_digit() {
        assert_eq!(BigInt::ZERO.to_string(), "0");
        assert_eq!("0".parse::<BigInt>().unwrap(), BigInt::ZERO);
        assert_eq!("-0".parse::<BigInt>().unwrap(), BigInt::ZERO);
        assert_eq!("-0".parse::<BigInt>().unwrap().to_string(), "0");
    }

    #[test]
    fn display_pads_inner_chunks() {
        // A value whose middle decimal chunk starts with zeros.
        let value: BigInt = "1000000000000000000019".parse().unwrap();
        assert_eq!(value.to_string(), "1000000000000000000019");
    }

    #[test]
    fn parse_round_trips_large_literals() {
        for literal in [
            "-12345678901234567890",
            "12345678901234567890123456789012345678901234567890",
            "-340282366920938463463374607431768211456",
            "18446744073709551616",
        ] {
            let value: BigInt = literal.parse().unwrap();
            assert_eq!(value.to_string(), literal);
        }
    }

    #[test]
    fn parse_accepts_leading_whitespace_and_zeros() {
        assert_eq!(
            "  42".parse::<BigInt>().unwrap(),
            BigInt::from(42u32)
        );
        assert_eq!(
            "000123".parse::<BigInt>().unwrap(),
            BigInt::from(123u32)
        );
        assert_eq!(
            " -007".parse::<BigInt>().unwrap(),
            BigInt::from(-7i32)
        );
    }

    #[test]
    fn parse_rejects_garbage() {
        assert_eq!("".parse::<BigInt>(), Err(ParseBigIntError::Empty));
        assert_eq!("-".parse::<BigInt>(), Err(ParseBigIntError::Empty));
        assert_eq!("  ".parse::<BigInt>(), Err(ParseBigIntError::Empty));
        assert_eq!("12x4".parse::<BigInt>(), Err(ParseBigIntError::InvalidDigit));
        assert_eq!("+42".parse::<BigInt>(), Err(ParseBigIntError::InvalidDigit));
        assert_eq!("4 2".parse::<BigInt>(), Err(ParseBigIntError::InvalidDigit));
        assert_eq!("--4".parse::<BigInt>(), Err(ParseBigIntError::InvalidDigit));
    }
}
