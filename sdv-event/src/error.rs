use derive_more::Display;

/// Failure of an event-to-value conversion.
///
/// Conversions are local to the accessor call: the event and any cursor that
/// produced it are unaffected, and the caller may try a different target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, strum::EnumIter)]
#[non_exhaustive]
pub enum ConvertError {
    /// The event has no textual form.
    #[display("event is not convertible to a string")]
    NotString,
    /// The event does not hold a borrowed string.
    #[display("event is not a string view")]
    NotStringView,
    /// The event has no byte-string form.
    #[display("event is not convertible to a byte string")]
    NotByteString,
    /// The event does not hold a borrowed byte string.
    #[display("event is not a byte string view")]
    NotByteStringView,
    /// The event has no integer form, or the value does not fit the target.
    #[display("event is not convertible to an integer")]
    NotInteger,
    /// The event has no floating-point form.
    #[display("event is not convertible to a double")]
    NotDouble,
    /// The event has no boolean form.
    #[display("event is not convertible to a bool")]
    NotBool,
    /// An array was expected at the current position.
    #[display("expected an array")]
    NotVector,
}

#[cfg(feature = "std")]
impl std::error::Error for ConvertError {}
