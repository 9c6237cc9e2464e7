use alloc::string::String;
use derive_more::Display;

use sdv_event::{
    Context,
    Visitor,
};

/// A push decoder that a cursor can drive one suspension at a time.
///
/// `drive` pushes events into the visitor until a visitor method returns
/// `false` (stop) or the input is exhausted. The decoder's own call stack is
/// the continuation: when a visitor stops it, the next `drive` call resumes
/// exactly where the previous one left off.
pub trait Decoder {
    /// Push events into `visitor` until it signals stop or input ends.
    fn drive(&mut self, visitor: &mut dyn Visitor) -> Result<(), DecodeError>;

    /// `true` once every event has been pushed.
    fn done(&self) -> bool;

    /// Provenance of the decoder's current input position.
    fn context(&self) -> Context;
}

/// A decoder-originated parse failure, surfaced unchanged through the
/// cursor. After one of these the stream is finished; the cursor stops
/// advancing.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
#[display("parse error at offset {position}: {message}")]
pub struct DecodeError {
    message: String,
    position: u64,
    line: u64,
    column: u64,
}

impl DecodeError {
    /// A parse error at the given source position.
    pub fn new(message: impl Into<String>, context: Context) -> Self {
        DecodeError {
            message: message.into(),
            position: context.position,
            line: context.line,
            column: context.column,
        }
    }

    /// The decoder's description of the failure.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Where in the input the failure happened.
    pub fn context(&self) -> Context {
        Context {
            position: self.position,
            line: self.line,
            column: self.column,
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for DecodeError {}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn errors_carry_their_provenance() {
        let error = DecodeError::new("unexpected byte", Context::at_position(17));
        assert_eq!(error.message(), "unexpected byte");
        assert_eq!(error.context().position, 17);
        assert_eq!(error.to_string(), "parse error at offset 17: unexpected byte");
    }
}
