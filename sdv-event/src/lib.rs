//! Event atoms of a self-describing data stream.
//!
//! Decoders for JSON and JSON-adjacent binary formats surface their input as
//! a stream of semantic events: structural markers, scalars, and bulk typed
//! arrays. This crate defines the event records ([`Event`], [`OwnedEvent`]),
//! their semantic tags, the typed-array views, and the push [`Visitor`]
//! protocol decoders drive.
//!
//! Integer scalars that do not fit `i64`/`u64` travel as text or bytes
//! tagged [`SemanticTag::BigInt`]; [`Event::to_bigint`] restores them
//! exactly.

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]

extern crate alloc;

mod error;
mod event;
pub mod half;
mod tag;
mod typed_array;
mod visitor;

pub use error::ConvertError;
pub use event::{
    Event,
    EventKind,
    EventPayload,
    OwnedEvent,
    OwnedPayload,
};
pub use tag::SemanticTag;
pub use typed_array::{
    ElementKind,
    TypedArrayBuf,
    TypedArrayView,
    TypedScalar,
};
pub use visitor::{
    Context,
    Visitor,
};
