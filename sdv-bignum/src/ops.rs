//! Operator implementations. Sign dispatch lives here; the digit loops live
//! in [`magnitude`](crate::magnitude).

use alloc::vec::Vec;
use core::cmp::Ordering;
use core::ops::{
    Add,
    AddAssign,
    BitAnd,
    BitAndAssign,
    BitOr,
    BitOrAssign,
    BitXor,
    BitXorAssign,
    Div,
    DivAssign,
    Mul,
    MulAssign,
    Neg,
    Rem,
    RemAssign,
    Shl,
    ShlAssign,
    Shr,
    ShrAssign,
    Sub,
    SubAssign,
};

use crate::{
    magnitude,
    BigInt,
};

impl Add<&BigInt> for &BigInt {
    type Output = BigInt;

    fn add(self, rhs: &BigInt) -> BigInt {
        if self.is_negative() == rhs.is_negative() {
            return BigInt::from_parts(
                self.is_negative(),
                magnitude::add(self.digits(), rhs.digits()),
            );
        }
        // Opposite signs: subtract the smaller magnitude from the larger,
        // the result taking the larger operand's sign.
        match magnitude::cmp(self.digits(), rhs.digits()) {
            Ordering::Equal => BigInt::ZERO,
            Ordering::Greater => BigInt::from_parts(
                self.is_negative(),
                magnitude::sub(self.digits(), rhs.digits()),
            ),
            Ordering::Less => BigInt::from_parts(
                rhs.is_negative(),
                magnitude::sub(rhs.digits(), self.digits()),
            ),
        }
    }
}

impl Sub<&BigInt> for &BigInt {
    type Output = BigInt;

    fn sub(self, rhs: &BigInt) -> BigInt {
        if self.is_negative() != rhs.is_negative() {
            return BigInt::from_parts(
                self.is_negative(),
                magnitude::add(self.digits(), rhs.digits()),
            );
        }
        match magnitude::cmp(self.digits(), rhs.digits()) {
            Ordering::Equal => BigInt::ZERO,
            Ordering::Greater => BigInt::from_parts(
                self.is_negative(),
                magnitude::sub(self.digits(), rhs.digits()),
            ),
            Ordering::Less => BigInt::from_parts(
                !self.is_negative(),
                magnitude::sub(rhs.digits(), self.digits()),
            ),
        }
    }
}

impl Mul<&BigInt> for &BigInt {
    type Output = BigInt;

    fn mul(self, rhs: &BigInt) -> BigInt {
        BigInt::from_parts(
            self.is_negative() != rhs.is_negative(),
            magnitude::mul(self.digits(), rhs.digits()),
        )
    }
}

impl Div<&BigInt> for &BigInt {
    type Output = BigInt;

    /// Truncated division.
    ///
    /// # Panics
    ///
    /// Panics when `rhs` is zero; use [`BigInt::div_rem`] or
    /// [`BigInt::checked_div`] for a fallible form.
    fn div(self, rhs: &BigInt) -> BigInt {
        match self.div_rem(rhs) {
            Ok((quotient, _)) => quotient,
            Err(error) => panic!("{error}"),
        }
    }
}

impl Rem<&BigInt> for &BigInt {
    type Output = BigInt;

    /// Remainder with the dividend's sign.
    ///
    /// # Panics
    ///
    /// Panics when `rhs` is zero; use [`BigInt::div_rem`] or
    /// [`BigInt::checked_rem`] for a fallible form.
    fn rem(self, rhs: &BigInt) -> BigInt {
        match self.div_rem(rhs) {
            Ok((_, remainder)) => remainder,
            Err(error) => panic!("{error}"),
        }
    }
}

impl BitAnd<&BigInt> for &BigInt {
    type Output = BigInt;

    fn bitand(self, rhs: &BigInt) -> BigInt {
        let digits: Vec<u32> = self
            .digits()
            .iter()
            .zip(rhs.digits())
            .map(|(a, b)| a & b)
            .collect();
        BigInt::from_parts(self.is_negative() && rhs.is_negative(), digits)
    }
}

impl BitOr<&BigInt> for &BigInt {
    type Output = BigInt;

    fn bitor(self, rhs: &BigInt) -> BigInt {
        let len = self.digits().len().max(rhs.digits().len());
        let digits: Vec<u32> = (0..len)
            .map(|i| {
                self.digits().get(i).copied().unwrap_or(0)
                    | rhs.digits().get(i).copied().unwrap_or(0)
            })
            .collect();
        BigInt::from_parts(self.is_negative() || rhs.is_negative(), digits)
    }
}

impl BitXor<&BigInt> for &BigInt {
    type Output = BigInt;

    fn bitxor(self, rhs: &BigInt) -> BigInt {
        let len = self.digits().len().max(rhs.digits().len());
        let digits: Vec<u32> = (0..len)
            .map(|i| {
                self.digits().get(i).copied().unwrap_or(0)
                    ^ rhs.digits().get(i).copied().unwrap_or(0)
            })
            .collect();
        BigInt::from_parts(self.is_negative() != rhs.is_negative(), digits)
    }
}

impl Neg for &BigInt {
    type Output = BigInt;

    fn neg(self) -> BigInt {
        BigInt::from_parts(!self.is_negative(), self.digits().to_vec())
    }
}

impl Neg for BigInt {
    type Output = BigInt;

    fn neg(self) -> BigInt {
        -&self
    }
}

impl Shl<u32> for &BigInt {
    type Output = BigInt;

    fn shl(self, count: u32) -> BigInt {
        BigInt::from_parts(self.is_negative(), magnitude::shl(self.digits(), count))
    }
}

impl Shr<u32> for &BigInt {
    type Output = BigInt;

    /// Magnitude shift; the sign is kept unless the result is zero.
    fn shr(self, count: u32) -> BigInt {
        BigInt::from_parts(self.is_negative(), magnitude::shr(self.digits(), count))
    }
}

impl Shl<u32> for BigInt {
    type Output = BigInt;

    fn shl(self, count: u32) -> BigInt {
        &self << count
    }
}

impl Shr<u32> for BigInt {
    type Output = BigInt;

    fn shr(self, count: u32) -> BigInt {
        &self >> count
    }
}

impl ShlAssign<u32> for BigInt {
    fn shl_assign(&mut self, count: u32) {
        *self = &*self << count;
    }
}

impl ShrAssign<u32> for BigInt {
    fn shr_assign(&mut self, count: u32) {
        *self = &*self >> count;
    }
}

macro_rules! forward_binary_op {
    ($($op:ident :: $method:ident),* $(,)?) => {$(
        impl $op<BigInt> for BigInt {
            type Output = BigInt;

            fn $method(self, rhs: BigInt) -> BigInt {
                (&self).$method(&rhs)
            }
        }

        impl $op<&BigInt> for BigInt {
            type Output = BigInt;

            fn $method(self, rhs: &BigInt) -> BigInt {
                (&self).$method(rhs)
            }
        }

        impl $op<BigInt> for &BigInt {
            type Output = BigInt;

            fn $method(self, rhs: BigInt) -> BigInt {
                self.$method(&rhs)
            }
        }
    )*};
}

forward_binary_op!(
    Add::add,
    Sub::sub,
    Mul::mul,
    Div::div,
    Rem::rem,
    BitAnd::bitand,
    BitOr::bitor,
    BitXor::bitxor,
);

macro_rules! forward_assign_op {
    ($($op:ident :: $method:ident => $binary:ident),* $(,)?) => {$(
        impl $op<BigInt> for BigInt {
            fn $method(&mut self, rhs: BigInt) {
                *self = (&*self).$binary(&rhs);
            }
        }

        impl $op<&BigInt> for BigInt {
            fn $method(&mut self, rhs: &BigInt) {
                *self = (&*self).$binary(rhs);
            }
        }
    )*};
}

forward_assign_op!(
    AddAssign::add_assign => add,
    SubAssign::sub_assign => sub,
    MulAssign::mul_assign => mul,
    DivAssign::div_assign => div,
    RemAssign::rem_assign => rem,
    BitAndAssign::bitand_assign => bitand,
    BitOrAssign::bitor_assign => bitor,
    BitXorAssign::bitxor_assign => bitxor,
);

#[cfg(test)]
mod tests {
    use crate::BigInt;

    fn int(value: i64) -> BigInt {
        BigInt::from(value)
    }

    #[test]
    fn addition_dispatches_on_sign() {
        assert_eq!(int(7) + int(5), int(12));
        assert_eq!(int(7) + int(-5), int(2));
        assert_eq!(int(-7) + int(5), int(-2));
        assert_eq!(int(-7) + int(-5), int(-12));
        assert_eq!(int(7) + int(-7), BigInt::ZERO);
    }

    #[test]
    fn subtraction_dispatches_on_sign() {
        assert_eq!(int(7) - int(5), int(2));
        assert_eq!(int(5) - int(7), int(-2));
        assert_eq!(int(7) - int(-5), int(12));
        assert_eq!(int(-7) - int(5), int(-12));
        assert_eq!(int(-7) - int(-5), int(-2));
        assert_eq!(int(7) - int(7), BigInt::ZERO);
    }

    #[test]
    fn multiplication_signs_are_xor() {
        assert_eq!(int(6) * int(7), int(42));
        assert_eq!(int(-6) * int(7), int(-42));
        assert_eq!(int(6) * int(-7), int(-42));
        assert_eq!(int(-6) * int(-7), int(42));
        assert_eq!(int(-6) * BigInt::ZERO, BigInt::ZERO);
    }

    #[test]
    fn multiword_multiplication_carries() {
        let a = BigInt::from(u64::MAX);
        assert_eq!(
            (&a * &a).to_string(),
            "340282366920938463426481119284349108225"
        );
    }

    #[test]
    fn division_truncates_and_remainder_takes_dividend_sign() {
        assert_eq!(int(7) / int(2), int(3));
        assert_eq!(int(7) % int(2), int(1));
        assert_eq!(int(-7) / int(2), int(-3));
        assert_eq!(int(-7) % int(2), int(-1));
        assert_eq!(int(7) / int(-2), int(-3));
        assert_eq!(int(7) % int(-2), int(1));
        assert_eq!(int(-7) / int(-2), int(3));
        assert_eq!(int(-7) % int(-2), int(-1));
    }

    #[test]
    #[should_panic(expected = "division by zero")]
    fn division_operator_panics_on_zero() {
        let _ = int(1) / BigInt::ZERO;
    }

    #[test]
    fn shifts_move_whole_and_partial_digits() {
        let one = BigInt::from(1u32);
        assert_eq!((&one << 0), one);
        assert_eq!((&one << 33).to_string(), "8589934592");
        assert_eq!((&one << 33) >> 33, one);
        assert_eq!((int(-12) << 3), int(-96));
        assert_eq!((int(-96) >> 3), int(-12));
        assert_eq!((&one << 5) >> 6, BigInt::ZERO);
    }

    #[test]
    fn bitwise_ops_extend_or_truncate() {
        let wide = BigInt::from(0x0000_0001_0000_00ffu64);
        let narrow = BigInt::from(0x0fu32);
        assert_eq!(&wide & &narrow, BigInt::from(0x0fu32));
        assert_eq!(&wide | &narrow, wide);
        assert_eq!(&wide ^ &wide, BigInt::ZERO);
        assert_eq!(&wide ^ &narrow, BigInt::from(0x0000_0001_0000_00f0u64));
    }

    #[test]
    fn bitwise_sign_combination() {
        assert!((int(-12) & int(-10)).is_negative());
        assert!(!(int(-12) & int(10)).is_negative());
        assert!((int(-12) | int(10)).is_negative());
        assert!(!(int(-12) ^ int(-10)).is_negative());
    }

    #[test]
    fn assign_operators_forward() {
        let mut value = int(10);
        value += int(5);
        assert_eq!(value, int(15));
        value -= int(3);
        assert_eq!(value, int(12));
        value *= int(2);
        assert_eq!(value, int(24));
        value /= int(5);
        assert_eq!(value, int(4));
        value %= int(3);
        assert_eq!(value, int(1));
        value <<= 8;
        assert_eq!(value, int(256));
        value >>= 4;
        assert_eq!(value, int(16));
    }
}
