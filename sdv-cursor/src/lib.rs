//! Staged pull cursor over self-describing event streams.
//!
//! Wire decoders push events through the [`sdv_event::Visitor`] protocol.
//! This crate turns that push stream into a pull iterator: [`EventCursor`]
//! drives a [`Decoder`] one suspension at a time, surfacing one event per
//! [`Cursor::next`] call, with typed arrays and multi-dimensional headers
//! transparently expanded into per-element events. [`Filtered`] composes
//! acceptance predicates over any cursor, and [`ValueBuilder`] materializes
//! a pushed stream into a [`Value`] tree.
//!
//! The bridge is coroutine-free: a visitor method returning `false` tells
//! the decoder to stop, so the decoder's own stack is the suspension point,
//! and the next pull re-enters it.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

mod cursor;
mod decoder;
mod dom;
mod staged;

#[cfg(any(test, feature = "test-helpers"))]
pub mod testing;

pub use cursor::{
    forward_event,
    Cursor,
    EventCursor,
    Filtered,
};
pub use decoder::{
    DecodeError,
    Decoder,
};
pub use dom::{
    Value,
    ValueBuilder,
};
