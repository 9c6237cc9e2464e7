use alloc::vec::Vec;
use core::cmp::Ordering;

use crate::{
    magnitude,
    ArithmeticError,
};

/// Sign-magnitude arbitrary-precision signed integer.
///
/// The magnitude is a little-endian sequence of 32-bit digits kept canonical:
/// no trailing zero digit, and zero is the empty sequence with a positive
/// sign. Arithmetic never overflows; the magnitude grows as needed.
///
/// ```
/// use sdv_bignum::BigInt;
///
/// let a: BigInt = "123456789012345678901234567890".parse().unwrap();
/// let b = BigInt::from(u64::MAX);
/// assert_eq!((&a * &b).to_string(), "2277375791072698140124934049010216029110176642350");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct BigInt {
    negative: bool,
    digits: Vec<u32>,
}

impl BigInt {
    /// The value zero.
    pub const ZERO: BigInt = BigInt {
        negative: false,
        digits: Vec::new(),
    };

    /// Build from a sign and a raw digit vector, restoring canonical form.
    pub(crate) fn from_parts(negative: bool, mut digits: Vec<u32>) -> Self {
        magnitude::trim(&mut digits);
        BigInt {
            negative: negative && !digits.is_empty(),
            digits,
        }
    }

    fn from_magnitude_u128(negative: bool, mut value: u128) -> Self {
        let mut digits = Vec::new();
        while value != 0 {
            digits.push(value as u32);
            value >>= 32;
        }
        BigInt {
            negative: negative && !digits.is_empty(),
            digits,
        }
    }

    /// Magnitude from base-256 big-endian bytes, with an explicit sign.
    ///
    /// This is the binary form big-integer payloads use on self-describing
    /// wires: each byte is one base-256 digit, most significant first.
    /// Leading zero bytes are accepted; an empty slice is zero regardless of
    /// the requested sign.
    pub fn from_be_bytes(negative: bool, bytes: &[u8]) -> Self {
        let mut digits = Vec::new();
        for &byte in bytes {
            magnitude::mul_add_short(&mut digits, 256, byte as u32);
        }
        BigInt {
            negative: negative && !digits.is_empty(),
            digits,
        }
    }

    /// `true` when the value is zero.
    pub fn is_zero(&self) -> bool {
        self.digits.is_empty()
    }

    /// `true` for values strictly below zero.
    pub fn is_negative(&self) -> bool {
        self.negative
    }

    /// The significant little-endian 32-bit digits of the magnitude.
    pub fn digits(&self) -> &[u32] {
        &self.digits
    }

    /// Number of significant bits in the magnitude; zero has none.
    pub fn bit_len(&self) -> u32 {
        match self.digits.last() {
            None => 0,
            Some(top) => (self.digits.len() as u32 - 1) * 32 + (32 - top.leading_zeros()),
        }
    }

    /// The absolute value.
    pub fn abs(&self) -> BigInt {
        BigInt {
            negative: false,
            digits: self.digits.clone(),
        }
    }

    /// Quotient and remainder in one pass.
    ///
    /// The quotient sign is the XOR of the operand signs; the remainder takes
    /// the dividend's sign (or is zero).
    pub fn div_rem(&self, divisor: &BigInt) -> Result<(BigInt, BigInt), ArithmeticError> {
        if divisor.digits.is_empty() {
            return Err(ArithmeticError::DivideByZero);
        }
        let (quotient, remainder) = magnitude::div_rem(&self.digits, &divisor.digits);
        Ok((
            BigInt::from_parts(self.negative != divisor.negative, quotient),
            BigInt::from_parts(self.negative, remainder),
        ))
    }

    /// Division returning `None` for a zero divisor.
    pub fn checked_div(&self, divisor: &BigInt) -> Option<BigInt> {
        self.div_rem(divisor).ok().map(|(quotient, _)| quotient)
    }

    /// Remainder returning `None` for a zero divisor.
    pub fn checked_rem(&self, divisor: &BigInt) -> Option<BigInt> {
        self.div_rem(divisor).ok().map(|(_, remainder)| remainder)
    }

    /// Raise to an integer power by binary exponentiation.
    pub fn pow(&self, mut exponent: u32) -> BigInt {
        let mut base = self.clone();
        let mut acc = BigInt::from(1u32);
        while exponent != 0 {
            if exponent & 1 == 1 {
                acc = &acc * &base;
            }
            exponent >>= 1;
            if exponent != 0 {
                base = &base * &base;
            }
        }
        acc
    }

    /// Truncated integer square root by Newton iteration.
    ///
    /// Defined for non-negative values; a negative input yields zero.
    pub fn isqrt(&self) -> BigInt {
        if self.negative || self.digits.is_empty() {
            return BigInt::ZERO;
        }
        // Seed above the root, then descend until the iteration turns.
        let mut x = BigInt::from(1u32) << ((self.bit_len() + 1) / 2);
        loop {
            let y = &(&x + &(self / &x)) >> 1;
            if y >= x {
                return x;
            }
            x = y;
        }
    }

    /// Nearest `f64`, folding digits from the most significant end.
    pub fn to_f64(&self) -> f64 {
        let mut acc = 0.0f64;
        for &digit in self.digits.iter().rev() {
            acc = acc * 4_294_967_296.0 + digit as f64;
        }
        if self.negative {
            -acc
        } else {
            acc
        }
    }

    /// The value as `u64` when it fits, `None` otherwise.
    pub fn to_u64(&self) -> Option<u64> {
        if self.negative || self.digits.len() > 2 {
            return None;
        }
        let mut value = 0u64;
        for (i, &digit) in self.digits.iter().enumerate() {
            value |= (digit as u64) << (32 * i as u32);
        }
        Some(value)
    }

    /// The value as `i64` when it fits, `None` otherwise.
    pub fn to_i64(&self) -> Option<i64> {
        if self.digits.len() > 2 {
            return None;
        }
        let mut magnitude = 0u64;
        for (i, &digit) in self.digits.iter().enumerate() {
            magnitude |= (digit as u64) << (32 * i as u32);
        }
        if self.negative {
            if magnitude > 1 << 63 {
                None
            } else {
                Some(magnitude.wrapping_neg() as i64)
            }
        } else if magnitude <= i64::MAX as u64 {
            Some(magnitude as i64)
        } else {
            None
        }
    }
}

macro_rules! impl_from_unsigned {
    ($($t:ty),* $(,)?) => {$(
        impl From<$t> for BigInt {
            fn from(value: $t) -> Self {
                Self::from_magnitude_u128(false, value as u128)
            }
        }
    )*};
}

impl_from_unsigned!(u8, u16, u32, u64, u128, usize);

macro_rules! impl_from_signed {
    ($($t:ty => $u:ty),* $(,)?) => {$(
        impl From<$t> for BigInt {
            fn from(value: $t) -> Self {
                let negative = value < 0;
                // Absolute value on the unsigned type; signed negation of the
                // minimum would overflow.
                let magnitude = if negative {
                    (0 as $u).wrapping_sub(value as $u)
                } else {
                    value as $u
                };
                Self::from_magnitude_u128(negative, magnitude as u128)
            }
        }
    )*};
}

impl_from_signed!(i8 => u8, i16 => u16, i32 => u32, i64 => u64, i128 => u128, isize => usize);

impl From<bool> for BigInt {
    fn from(value: bool) -> Self {
        Self::from_magnitude_u128(false, value as u128)
    }
}

impl From<f64> for BigInt {
    /// Truncates toward zero; NaN and infinities map to zero.
    fn from(value: f64) -> Self {
        if !value.is_finite() {
            return Self::ZERO;
        }
        const BASE: f64 = 4_294_967_296.0;
        let negative = value.is_sign_negative();
        let mut rest = trunc_f64(if negative { -value } else { value });
        let mut digits = Vec::new();
        while rest >= 1.0 {
            digits.push((rest % BASE) as u32);
            rest = trunc_f64(rest / BASE);
        }
        BigInt {
            negative: negative && !digits.is_empty(),
            digits,
        }
    }
}

/// `f64::trunc` without the `std` float intrinsics.
fn trunc_f64(value: f64) -> f64 {
    const MANTISSA_BITS: u64 = 52;
    const EXPONENT_BIAS: i64 = 1023;
    let bits = value.to_bits();
    let exponent = ((bits >> MANTISSA_BITS) & 0x7ff) as i64 - EXPONENT_BIAS;
    if exponent < 0 {
        return if value.is_sign_negative() { -0.0 } else { 0.0 };
    }
    if exponent >= MANTISSA_BITS as i64 {
        return value;
    }
    let fraction_mask = (1u64 << (MANTISSA_BITS - exponent as u64)) - 1;
    f64::from_bits(bits & !fraction_mask)
}

impl Ord for BigInt {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.negative, other.negative) {
            (false, true) => Ordering::Greater,
            (true, false) => Ordering::Less,
            (false, false) => magnitude::cmp(&self.digits, &other.digits),
            (true, true) => magnitude::cmp(&other.digits, &self.digits),
        }
    }
}

impl PartialOrd for BigInt {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for BigInt {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for BigInt {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        use serde::de::Error;
        let text = <alloc::string::String as serde::Deserialize>::deserialize(deserializer)?;
        text.parse().map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn zero_is_canonical() {
        assert!(BigInt::ZERO.is_zero());
        assert!(!BigInt::ZERO.is_negative());
        assert_eq!(BigInt::from(0u64), BigInt::ZERO);
        assert_eq!(BigInt::from(0i64), BigInt::default());
    }

    #[test]
    fn negative_zero_inputs_normalize() {
        assert!(!BigInt::from(-0.0f64).is_negative());
        assert!(!BigInt::from_be_bytes(true, &[]).is_negative());
        assert!(!BigInt::from_be_bytes(true, &[0, 0]).is_negative());
    }

    #[test]
    fn from_be_bytes_uses_base_256() {
        assert_eq!(BigInt::from_be_bytes(false, &[1, 0]), BigInt::from(256u32));
        assert_eq!(
            BigInt::from_be_bytes(false, &[0x12, 0x34, 0x56]),
            BigInt::from(0x123456u32)
        );
        assert_eq!(
            BigInt::from_be_bytes(true, &[0xff; 8]),
            BigInt::from(i128::from(u64::MAX).wrapping_neg())
        );
    }

    #[test]
    fn signed_minimum_constructs_without_overflow() {
        let min = BigInt::from(i64::MIN);
        assert_eq!(min.to_string(), "-9223372036854775808");
        assert_eq!(min.to_i64(), Some(i64::MIN));
        assert_eq!(BigInt::from(i32::MIN).to_string(), "-2147483648");
        assert_eq!(BigInt::from(i128::MIN).to_string(), "-170141183460469231731687303715884105728");
    }

    #[test]
    fn from_f64_truncates_toward_zero() {
        assert_eq!(BigInt::from(1.9f64), BigInt::from(1u32));
        assert_eq!(BigInt::from(-1.9f64), BigInt::from(-1i32));
        assert_eq!(BigInt::from(0.5f64), BigInt::ZERO);
        assert_eq!(BigInt::from(f64::NAN), BigInt::ZERO);
        assert_eq!(BigInt::from(f64::INFINITY), BigInt::ZERO);
        assert_eq!(
            BigInt::from(18446744073709551616.0f64),
            BigInt::from(1u32) << 64
        );
    }

    #[test]
    fn to_f64_round_trips_exact_values() {
        for value in [0u64, 1, 4_294_967_296, 1 << 52, u32::MAX as u64] {
            assert_eq!(BigInt::from(value).to_f64(), value as f64);
        }
        assert_eq!(BigInt::from(-4096i64).to_f64(), -4096.0);
    }

    #[test]
    fn to_u64_and_to_i64_respect_bounds() {
        assert_eq!(BigInt::from(u64::MAX).to_u64(), Some(u64::MAX));
        assert_eq!((BigInt::from(u64::MAX) + BigInt::from(1u32)).to_u64(), None);
        assert_eq!(BigInt::from(-1i32).to_u64(), None);
        assert_eq!(BigInt::from(i64::MAX).to_i64(), Some(i64::MAX));
        assert_eq!(BigInt::from(u64::MAX).to_i64(), None);
        assert_eq!(
            (BigInt::from(i64::MIN) - BigInt::from(1u32)).to_i64(),
            None
        );
    }

    #[test]
    fn ordering_dispatches_on_sign_then_magnitude() {
        let small = BigInt::from(7u32);
        let large = BigInt::from(u64::MAX);
        assert!(small < large);
        assert!(-&large < -&small);
        assert!(-&small < small);
        assert!(BigInt::ZERO < small);
        assert!(-&small < BigInt::ZERO);
    }

    #[test]
    fn pow_matches_repeated_multiplication() {
        let three = BigInt::from(3u32);
        assert_eq!(three.pow(0), BigInt::from(1u32));
        assert_eq!(three.pow(1), three);
        assert_eq!(three.pow(5), BigInt::from(243u32));
        assert_eq!(
            BigInt::from(2u32).pow(100).to_string(),
            "1267650600228229401496703205376"
        );
        assert_eq!(BigInt::from(-2i32).pow(3), BigInt::from(-8i32));
    }

    #[test]
    fn isqrt_brackets_the_root() {
        for value in [0u64, 1, 2, 3, 4, 15, 16, 17, 1 << 40, (1 << 40) + 1] {
            let root = BigInt::from(value).isqrt();
            let next = &root + &BigInt::from(1u32);
            assert!(&root * &root <= BigInt::from(value));
            assert!(&next * &next > BigInt::from(value));
        }
        assert_eq!(BigInt::from(-4i32).isqrt(), BigInt::ZERO);
    }

    #[test]
    fn bit_len_counts_significant_bits() {
        assert_eq!(BigInt::ZERO.bit_len(), 0);
        assert_eq!(BigInt::from(1u32).bit_len(), 1);
        assert_eq!(BigInt::from(u32::MAX).bit_len(), 32);
        assert_eq!((BigInt::from(1u32) << 95).bit_len(), 96);
    }

    #[test]
    fn division_by_zero_is_reported() {
        let one = BigInt::from(1u32);
        assert_eq!(
            one.div_rem(&BigInt::ZERO),
            Err(ArithmeticError::DivideByZero)
        );
        assert_eq!(one.checked_div(&BigInt::ZERO), None);
        assert_eq!(one.checked_rem(&BigInt::ZERO), None);
    }
}
