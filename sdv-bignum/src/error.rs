use derive_more::Display;

/// Failures from fallible arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum ArithmeticError {
    /// The divisor was zero.
    #[display("division by zero")]
    DivideByZero,
}

/// Failures from parsing a decimal literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum ParseBigIntError {
    /// No digits were present after the optional sign.
    #[display("cannot parse integer from empty string")]
    Empty,
    /// A character other than an ASCII digit was found.
    #[display("invalid digit found in string")]
    InvalidDigit,
}

#[cfg(feature = "std")]
impl std::error::Error for ArithmeticError {}

#[cfg(feature = "std")]
impl std::error::Error for ParseBigIntError {}
