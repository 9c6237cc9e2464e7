use alloc::{
    borrow::ToOwned,
    string::{
        String,
        ToString,
    },
    vec::Vec,
};

use base64::engine::general_purpose::{
    STANDARD,
    URL_SAFE_NO_PAD,
};
use base64::Engine;
use sdv_bignum::BigInt;

use crate::{
    half::f16_to_f64,
    ConvertError,
    SemanticTag,
};

/// Discriminant of an [`Event`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EventKind {
    /// Start of an object.
    BeginObject,
    /// End of an object.
    EndObject,
    /// Start of an array.
    BeginArray,
    /// End of an array.
    EndArray,
    /// An object member name.
    Key,
    /// A text scalar.
    String,
    /// A binary scalar.
    ByteString,
    /// The null scalar.
    Null,
    /// A boolean scalar.
    Bool,
    /// A signed 64-bit integer scalar.
    Int64,
    /// An unsigned 64-bit integer scalar.
    UInt64,
    /// A binary16 scalar, kept as raw bits.
    Half,
    /// A binary64 scalar.
    Double,
}

/// Payload of one event; the variant selects the [`EventKind`].
///
/// Begin events may announce a known container length; text and binary
/// payloads are borrowed views into storage owned by whoever produced the
/// event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EventPayload<'a> {
    /// Object start with an optional announced member count.
    BeginObject(Option<u64>),
    /// Object end.
    EndObject,
    /// Array start with an optional announced element count.
    BeginArray(Option<u64>),
    /// Array end.
    EndArray,
    /// Object member name.
    Key(&'a str),
    /// Borrowed text.
    String(&'a str),
    /// Borrowed bytes.
    ByteString(&'a [u8]),
    /// Null.
    Null,
    /// Boolean.
    Bool(bool),
    /// Signed integer.
    Int64(i64),
    /// Unsigned integer.
    UInt64(u64),
    /// Binary16 bits.
    Half(u16),
    /// Binary64 value.
    Double(f64),
}

/// One parse event: a structural marker or a scalar, with its semantic tag.
///
/// Events are immutable. View payloads borrow the producer's storage and are
/// valid only until the producer moves on; callers that must retain data
/// copy it out (or go through [`OwnedEvent`]).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Event<'a> {
    payload: EventPayload<'a>,
    tag: SemanticTag,
    ext_tag: u64,
}

impl<'a> Event<'a> {
    /// Event from a payload and tag.
    pub fn new(payload: EventPayload<'a>, tag: SemanticTag) -> Self {
        Event {
            payload,
            tag,
            ext_tag: 0,
        }
    }

    /// Event carrying a format-specific extension tag.
    pub fn with_ext_tag(payload: EventPayload<'a>, ext_tag: u64) -> Self {
        Event {
            payload,
            tag: SemanticTag::Ext,
            ext_tag,
        }
    }

    /// Object start.
    pub fn begin_object(length: Option<u64>, tag: SemanticTag) -> Self {
        Self::new(EventPayload::BeginObject(length), tag)
    }

    /// Object end.
    pub fn end_object() -> Self {
        Self::new(EventPayload::EndObject, SemanticTag::None)
    }

    /// Array start.
    pub fn begin_array(length: Option<u64>, tag: SemanticTag) -> Self {
        Self::new(EventPayload::BeginArray(length), tag)
    }

    /// Array end.
    pub fn end_array() -> Self {
        Self::new(EventPayload::EndArray, SemanticTag::None)
    }

    /// Object member name.
    pub fn key(name: &'a str) -> Self {
        Self::new(EventPayload::Key(name), SemanticTag::None)
    }

    /// Text scalar.
    pub fn string(value: &'a str, tag: SemanticTag) -> Self {
        Self::new(EventPayload::String(value), tag)
    }

    /// Binary scalar.
    pub fn byte_string(value: &'a [u8], tag: SemanticTag) -> Self {
        Self::new(EventPayload::ByteString(value), tag)
    }

    /// Binary scalar with an extension tag.
    pub fn ext_byte_string(value: &'a [u8], ext_tag: u64) -> Self {
        Self::with_ext_tag(EventPayload::ByteString(value), ext_tag)
    }

    /// Null scalar.
    pub fn null(tag: SemanticTag) -> Self {
        Self::new(EventPayload::Null, tag)
    }

    /// Boolean scalar.
    pub fn bool_value(value: bool, tag: SemanticTag) -> Self {
        Self::new(EventPayload::Bool(value), tag)
    }

    /// Signed integer scalar.
    pub fn int64(value: i64, tag: SemanticTag) -> Self {
        Self::new(EventPayload::Int64(value), tag)
    }

    /// Unsigned integer scalar.
    pub fn uint64(value: u64, tag: SemanticTag) -> Self {
        Self::new(EventPayload::UInt64(value), tag)
    }

    /// Binary16 scalar from raw bits.
    pub fn half(bits: u16, tag: SemanticTag) -> Self {
        Self::new(EventPayload::Half(bits), tag)
    }

    /// Binary64 scalar.
    pub fn double(value: f64, tag: SemanticTag) -> Self {
        Self::new(EventPayload::Double(value), tag)
    }

    /// The payload.
    pub fn payload(&self) -> EventPayload<'a> {
        self.payload
    }

    /// The event kind.
    pub fn kind(&self) -> EventKind {
        match self.payload {
            EventPayload::BeginObject(_) => EventKind::BeginObject,
            EventPayload::EndObject => EventKind::EndObject,
            EventPayload::BeginArray(_) => EventKind::BeginArray,
            EventPayload::EndArray => EventKind::EndArray,
            EventPayload::Key(_) => EventKind::Key,
            EventPayload::String(_) => EventKind::String,
            EventPayload::ByteString(_) => EventKind::ByteString,
            EventPayload::Null => EventKind::Null,
            EventPayload::Bool(_) => EventKind::Bool,
            EventPayload::Int64(_) => EventKind::Int64,
            EventPayload::UInt64(_) => EventKind::UInt64,
            EventPayload::Half(_) => EventKind::Half,
            EventPayload::Double(_) => EventKind::Double,
        }
    }

    /// The semantic tag.
    pub fn tag(&self) -> SemanticTag {
        self.tag
    }

    /// The extension tag; meaningful only when `tag()` is [`SemanticTag::Ext`].
    pub fn ext_tag(&self) -> u64 {
        self.ext_tag
    }

    /// Length of a view payload, or the announced container length (zero
    /// when unknown); zero for everything else.
    pub fn size(&self) -> usize {
        match self.payload {
            EventPayload::Key(s) | EventPayload::String(s) => s.len(),
            EventPayload::ByteString(b) => b.len(),
            EventPayload::BeginObject(length) | EventPayload::BeginArray(length) => {
                length.unwrap_or(0) as usize
            }
            _ => 0,
        }
    }

    /// `true` for `BeginObject` and `BeginArray`.
    pub fn is_container_begin(&self) -> bool {
        matches!(
            self.payload,
            EventPayload::BeginObject(_) | EventPayload::BeginArray(_)
        )
    }

    /// `true` for `EndObject` and `EndArray`.
    pub fn is_container_end(&self) -> bool {
        matches!(self.payload, EventPayload::EndObject | EventPayload::EndArray)
    }

    /// The boolean form of the event.
    ///
    /// Booleans convert directly; numeric scalars compare against zero.
    pub fn as_bool(&self) -> Result<bool, ConvertError> {
        match self.payload {
            EventPayload::Bool(v) => Ok(v),
            EventPayload::Int64(v) => Ok(v != 0),
            EventPayload::UInt64(v) => Ok(v != 0),
            EventPayload::Half(bits) => Ok(f16_to_f64(bits) != 0.0),
            EventPayload::Double(v) => Ok(v != 0.0),
            _ => Err(ConvertError::NotBool),
        }
    }

    /// The signed integer form of the event.
    ///
    /// Numeric sources always convert: integer scalars reinterpret
    /// two's-complement, floating scalars truncate toward zero; text parses
    /// as decimal.
    pub fn as_i64(&self) -> Result<i64, ConvertError> {
        match self.payload {
            EventPayload::Int64(v) => Ok(v),
            EventPayload::UInt64(v) => Ok(v as i64),
            EventPayload::Bool(v) => Ok(v as i64),
            EventPayload::Half(bits) => Ok(f16_to_f64(bits) as i64),
            EventPayload::Double(v) => Ok(v as i64),
            EventPayload::String(s) => s.parse().map_err(|_| ConvertError::NotInteger),
            _ => Err(ConvertError::NotInteger),
        }
    }

    /// The unsigned integer form of the event.
    ///
    /// Numeric sources always convert: integer scalars reinterpret
    /// two's-complement, floating scalars truncate toward zero; text parses
    /// as decimal.
    pub fn as_u64(&self) -> Result<u64, ConvertError> {
        match self.payload {
            EventPayload::UInt64(v) => Ok(v),
            EventPayload::Int64(v) => Ok(v as u64),
            EventPayload::Bool(v) => Ok(v as u64),
            EventPayload::Half(bits) => Ok(f16_to_f64(bits) as u64),
            EventPayload::Double(v) => Ok(v as u64),
            EventPayload::String(s) => s.parse().map_err(|_| ConvertError::NotInteger),
            _ => Err(ConvertError::NotInteger),
        }
    }

    /// The floating-point form of the event; binary16 widens losslessly.
    pub fn as_f64(&self) -> Result<f64, ConvertError> {
        match self.payload {
            EventPayload::Double(v) => Ok(v),
            EventPayload::Half(bits) => Ok(f16_to_f64(bits)),
            EventPayload::Int64(v) => Ok(v as f64),
            EventPayload::UInt64(v) => Ok(v as f64),
            EventPayload::String(s) => s.parse().map_err(|_| ConvertError::NotDouble),
            _ => Err(ConvertError::NotDouble),
        }
    }

    /// The borrowed text of a string or key event.
    pub fn as_str(&self) -> Result<&'a str, ConvertError> {
        match self.payload {
            EventPayload::Key(s) | EventPayload::String(s) => Ok(s),
            _ => Err(ConvertError::NotStringView),
        }
    }

    /// The borrowed bytes of a byte-string event.
    pub fn as_byte_view(&self) -> Result<&'a [u8], ConvertError> {
        match self.payload {
            EventPayload::ByteString(b) => Ok(b),
            _ => Err(ConvertError::NotByteStringView),
        }
    }

    /// The textual form of the event.
    ///
    /// Byte strings encode according to the tag (base16, base64, or
    /// base64url when untagged); numeric scalars format canonically.
    pub fn to_text(&self) -> Result<String, ConvertError> {
        match self.payload {
            EventPayload::Key(s) | EventPayload::String(s) => Ok(s.to_owned()),
            EventPayload::ByteString(b) => Ok(match self.tag {
                SemanticTag::Base16 => hex::encode(b),
                SemanticTag::Base64 => STANDARD.encode(b),
                _ => URL_SAFE_NO_PAD.encode(b),
            }),
            EventPayload::Null => Ok("null".to_owned()),
            EventPayload::Bool(v) => Ok(if v { "true" } else { "false" }.to_owned()),
            EventPayload::Int64(v) => Ok(v.to_string()),
            EventPayload::UInt64(v) => Ok(v.to_string()),
            EventPayload::Half(bits) => Ok(f16_to_f64(bits).to_string()),
            EventPayload::Double(v) => Ok(v.to_string()),
            _ => Err(ConvertError::NotString),
        }
    }

    /// The byte-string form of the event.
    ///
    /// Byte strings copy out; text decodes under the base16, base64, and
    /// base64url tags.
    pub fn to_bytes(&self) -> Result<Vec<u8>, ConvertError> {
        match self.payload {
            EventPayload::ByteString(b) => Ok(b.to_vec()),
            EventPayload::String(s) => match self.tag {
                SemanticTag::Base16 => hex::decode(s).map_err(|_| ConvertError::NotByteString),
                SemanticTag::Base64 => {
                    STANDARD.decode(s).map_err(|_| ConvertError::NotByteString)
                }
                SemanticTag::Base64Url => URL_SAFE_NO_PAD
                    .decode(s)
                    .map_err(|_| ConvertError::NotByteString),
                _ => Err(ConvertError::NotByteString),
            },
            _ => Err(ConvertError::NotByteString),
        }
    }

    /// The arbitrary-precision integer form of the event.
    ///
    /// Integer scalars convert exactly; text parses as decimal; bytes tagged
    /// [`SemanticTag::BigInt`] decode as a base-256 big-endian magnitude.
    pub fn to_bigint(&self) -> Result<BigInt, ConvertError> {
        match self.payload {
            EventPayload::Int64(v) => Ok(BigInt::from(v)),
            EventPayload::UInt64(v) => Ok(BigInt::from(v)),
            EventPayload::Bool(v) => Ok(BigInt::from(v)),
            EventPayload::String(s) => s.parse().map_err(|_| ConvertError::NotInteger),
            EventPayload::ByteString(b) if self.tag == SemanticTag::BigInt => {
                Ok(BigInt::from_be_bytes(false, b))
            }
            _ => Err(ConvertError::NotInteger),
        }
    }
}

/// Owned payload mirror of [`EventPayload`].
#[derive(Debug, Clone, PartialEq)]
pub enum OwnedPayload {
    /// Object start with an optional announced member count.
    BeginObject(Option<u64>),
    /// Object end.
    EndObject,
    /// Array start with an optional announced element count.
    BeginArray(Option<u64>),
    /// Array end.
    EndArray,
    /// Object member name.
    Key(String),
    /// Owned text.
    String(String),
    /// Owned bytes.
    ByteString(Vec<u8>),
    /// Null.
    Null,
    /// Boolean.
    Bool(bool),
    /// Signed integer.
    Int64(i64),
    /// Unsigned integer.
    UInt64(u64),
    /// Binary16 bits.
    Half(u16),
    /// Binary64 value.
    Double(f64),
}

/// An [`Event`] that owns its payload.
///
/// This is the storable form: cursors keep the last captured event here and
/// republish it as a borrowed [`Event`] until the next pull.
#[derive(Debug, Clone, PartialEq)]
pub struct OwnedEvent {
    payload: OwnedPayload,
    tag: SemanticTag,
    ext_tag: u64,
}

impl OwnedEvent {
    /// Event from a payload and tag.
    pub fn new(payload: OwnedPayload, tag: SemanticTag) -> Self {
        OwnedEvent {
            payload,
            tag,
            ext_tag: 0,
        }
    }

    /// Event carrying a format-specific extension tag.
    pub fn with_ext_tag(payload: OwnedPayload, ext_tag: u64) -> Self {
        OwnedEvent {
            payload,
            tag: SemanticTag::Ext,
            ext_tag,
        }
    }

    /// Object start.
    pub fn begin_object(length: Option<u64>, tag: SemanticTag) -> Self {
        Self::new(OwnedPayload::BeginObject(length), tag)
    }

    /// Object end.
    pub fn end_object() -> Self {
        Self::new(OwnedPayload::EndObject, SemanticTag::None)
    }

    /// Array start.
    pub fn begin_array(length: Option<u64>, tag: SemanticTag) -> Self {
        Self::new(OwnedPayload::BeginArray(length), tag)
    }

    /// Array end.
    pub fn end_array() -> Self {
        Self::new(OwnedPayload::EndArray, SemanticTag::None)
    }

    /// Object member name.
    pub fn key(name: impl Into<String>) -> Self {
        Self::new(OwnedPayload::Key(name.into()), SemanticTag::None)
    }

    /// Text scalar.
    pub fn string(value: impl Into<String>, tag: SemanticTag) -> Self {
        Self::new(OwnedPayload::String(value.into()), tag)
    }

    /// Binary scalar.
    pub fn byte_string(value: impl Into<Vec<u8>>, tag: SemanticTag) -> Self {
        Self::new(OwnedPayload::ByteString(value.into()), tag)
    }

    /// Binary scalar with an extension tag.
    pub fn ext_byte_string(value: impl Into<Vec<u8>>, ext_tag: u64) -> Self {
        Self::with_ext_tag(OwnedPayload::ByteString(value.into()), ext_tag)
    }

    /// Null scalar.
    pub fn null(tag: SemanticTag) -> Self {
        Self::new(OwnedPayload::Null, tag)
    }

    /// Boolean scalar.
    pub fn bool_value(value: bool, tag: SemanticTag) -> Self {
        Self::new(OwnedPayload::Bool(value), tag)
    }

    /// Signed integer scalar.
    pub fn int64(value: i64, tag: SemanticTag) -> Self {
        Self::new(OwnedPayload::Int64(value), tag)
    }

    /// Unsigned integer scalar.
    pub fn uint64(value: u64, tag: SemanticTag) -> Self {
        Self::new(OwnedPayload::UInt64(value), tag)
    }

    /// Binary16 scalar from raw bits.
    pub fn half(bits: u16, tag: SemanticTag) -> Self {
        Self::new(OwnedPayload::Half(bits), tag)
    }

    /// Binary64 scalar.
    pub fn double(value: f64, tag: SemanticTag) -> Self {
        Self::new(OwnedPayload::Double(value), tag)
    }

    /// Borrow as an [`Event`].
    pub fn as_event(&self) -> Event<'_> {
        let payload = match &self.payload {
            OwnedPayload::BeginObject(length) => EventPayload::BeginObject(*length),
            OwnedPayload::EndObject => EventPayload::EndObject,
            OwnedPayload::BeginArray(length) => EventPayload::BeginArray(*length),
            OwnedPayload::EndArray => EventPayload::EndArray,
            OwnedPayload::Key(s) => EventPayload::Key(s),
            OwnedPayload::String(s) => EventPayload::String(s),
            OwnedPayload::ByteString(b) => EventPayload::ByteString(b),
            OwnedPayload::Null => EventPayload::Null,
            OwnedPayload::Bool(v) => EventPayload::Bool(*v),
            OwnedPayload::Int64(v) => EventPayload::Int64(*v),
            OwnedPayload::UInt64(v) => EventPayload::UInt64(*v),
            OwnedPayload::Half(v) => EventPayload::Half(*v),
            OwnedPayload::Double(v) => EventPayload::Double(*v),
        };
        Event {
            payload,
            tag: self.tag,
            ext_tag: self.ext_tag,
        }
    }

    /// The event kind.
    pub fn kind(&self) -> EventKind {
        self.as_event().kind()
    }

    /// The semantic tag.
    pub fn tag(&self) -> SemanticTag {
        self.tag
    }

    /// The extension tag; meaningful only when `tag()` is [`SemanticTag::Ext`].
    pub fn ext_tag(&self) -> u64 {
        self.ext_tag
    }
}

impl From<Event<'_>> for OwnedEvent {
    fn from(event: Event<'_>) -> Self {
        let payload = match event.payload {
            EventPayload::BeginObject(length) => OwnedPayload::BeginObject(length),
            EventPayload::EndObject => OwnedPayload::EndObject,
            EventPayload::BeginArray(length) => OwnedPayload::BeginArray(length),
            EventPayload::EndArray => OwnedPayload::EndArray,
            EventPayload::Key(s) => OwnedPayload::Key(s.to_owned()),
            EventPayload::String(s) => OwnedPayload::String(s.to_owned()),
            EventPayload::ByteString(b) => OwnedPayload::ByteString(b.to_vec()),
            EventPayload::Null => OwnedPayload::Null,
            EventPayload::Bool(v) => OwnedPayload::Bool(v),
            EventPayload::Int64(v) => OwnedPayload::Int64(v),
            EventPayload::UInt64(v) => OwnedPayload::UInt64(v),
            EventPayload::Half(v) => OwnedPayload::Half(v),
            EventPayload::Double(v) => OwnedPayload::Double(v),
        };
        OwnedEvent {
            payload,
            tag: event.tag,
            ext_tag: event.ext_tag,
        }
    }
}

impl PartialEq<Event<'_>> for OwnedEvent {
    fn eq(&self, other: &Event<'_>) -> bool {
        self.as_event() == *other
    }
}

impl PartialEq<OwnedEvent> for Event<'_> {
    fn eq(&self, other: &OwnedEvent) -> bool {
        other.as_event() == *self
    }
}
