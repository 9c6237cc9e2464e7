//! Arbitrary-precision signed integer arithmetic.
//!
//! [`BigInt`] is a sign-magnitude integer over 32-bit digits. It exists to
//! keep integer fidelity across textual and binary self-describing wire
//! formats: any integer too wide for `i64`/`u64` travels as decimal text or
//! base-256 bytes, and this crate turns those forms back into exact values.

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]

extern crate alloc;

mod bigint;
mod error;
mod fmt;
mod magnitude;
mod ops;

pub use bigint::BigInt;
pub use error::{
    ArithmeticError,
    ParseBigIntError,
};
