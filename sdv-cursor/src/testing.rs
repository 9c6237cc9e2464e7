//! Scripted decoders and recording sinks for exercising cursors without a
//! wire format.

use alloc::{
    string::String,
    vec::Vec,
};

use sdv_event::{
    Context,
    OwnedEvent,
    SemanticTag,
    TypedArrayBuf,
    TypedArrayView,
    Visitor,
};

use crate::{
    forward_event,
    DecodeError,
    Decoder,
};

/// One step of a scripted push sequence.
#[derive(Debug, Clone, PartialEq)]
pub enum ScriptItem {
    /// Push the event through the matching visitor method.
    Event(OwnedEvent),
    /// Push a bulk typed array.
    TypedArray(TypedArrayBuf, SemanticTag),
    /// Push a multi-dimensional header.
    BeginMultiDim(Vec<u64>, SemanticTag),
    /// Close a multi-dimensional wrapper.
    EndMultiDim,
    /// Fail with a parse error.
    Error(String),
}

/// A decoder replaying a fixed script, honoring the stop signal: after a
/// visitor stops it, the next `drive` resumes at the following item.
#[derive(Debug)]
pub struct ScriptedDecoder {
    script: Vec<ScriptItem>,
    position: usize,
}

impl ScriptedDecoder {
    /// Decoder over an explicit script.
    pub fn new(script: Vec<ScriptItem>) -> Self {
        ScriptedDecoder {
            script,
            position: 0,
        }
    }

    /// Decoder pushing a plain sequence of events.
    pub fn from_events(events: Vec<OwnedEvent>) -> Self {
        Self::new(events.into_iter().map(ScriptItem::Event).collect())
    }
}

impl Decoder for ScriptedDecoder {
    fn drive(&mut self, visitor: &mut dyn Visitor) -> Result<(), DecodeError> {
        while self.position < self.script.len() {
            let ctx = Context::at_position(self.position as u64);
            let item = self.script[self.position].clone();
            self.position += 1;
            let keep_going = match &item {
                ScriptItem::Event(event) => forward_event(&event.as_event(), &ctx, visitor),
                ScriptItem::TypedArray(data, tag) => visitor.typed_array(data.view(), *tag, &ctx),
                ScriptItem::BeginMultiDim(shape, tag) => {
                    visitor.begin_multi_dim(shape, *tag, &ctx)
                }
                ScriptItem::EndMultiDim => visitor.end_multi_dim(&ctx),
                ScriptItem::Error(message) => {
                    self.position = self.script.len();
                    return Err(DecodeError::new(message.clone(), ctx));
                }
            };
            if !keep_going {
                return Ok(());
            }
        }
        visitor.flush();
        Ok(())
    }

    fn done(&self) -> bool {
        self.position >= self.script.len()
    }

    fn context(&self) -> Context {
        Context::at_position(self.position as u64)
    }
}

/// What a recording sink observed, bulk calls kept distinct from per-event
/// calls.
#[derive(Debug, Clone, PartialEq)]
pub enum Recorded {
    /// A per-event visitor call.
    Event(OwnedEvent),
    /// A bulk typed-array call.
    TypedArray(TypedArrayBuf, SemanticTag),
    /// A multi-dimensional header call.
    BeginMultiDim(Vec<u64>, SemanticTag),
    /// A multi-dimensional close call.
    EndMultiDim,
    /// A flush call.
    Flush,
}

/// Sink that records every visitor call and never stops the pusher.
#[derive(Debug, Default)]
pub struct RecordingVisitor {
    recorded: Vec<Recorded>,
}

impl RecordingVisitor {
    /// An empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything recorded so far.
    pub fn recorded(&self) -> &[Recorded] {
        &self.recorded
    }

    /// The recorded per-event calls, in order.
    pub fn events(&self) -> Vec<OwnedEvent> {
        self.recorded
            .iter()
            .filter_map(|item| match item {
                Recorded::Event(event) => Some(event.clone()),
                _ => None,
            })
            .collect()
    }

    fn push(&mut self, item: Recorded) -> bool {
        self.recorded.push(item);
        true
    }
}

impl Visitor for RecordingVisitor {
    fn begin_object(&mut self, length: Option<u64>, tag: SemanticTag, _ctx: &Context) -> bool {
        self.push(Recorded::Event(OwnedEvent::begin_object(length, tag)))
    }

    fn end_object(&mut self, _ctx: &Context) -> bool {
        self.push(Recorded::Event(OwnedEvent::end_object()))
    }

    fn begin_array(&mut self, length: Option<u64>, tag: SemanticTag, _ctx: &Context) -> bool {
        self.push(Recorded::Event(OwnedEvent::begin_array(length, tag)))
    }

    fn end_array(&mut self, _ctx: &Context) -> bool {
        self.push(Recorded::Event(OwnedEvent::end_array()))
    }

    fn key(&mut self, name: &str, _ctx: &Context) -> bool {
        self.push(Recorded::Event(OwnedEvent::key(name)))
    }

    fn null_value(&mut self, tag: SemanticTag, _ctx: &Context) -> bool {
        self.push(Recorded::Event(OwnedEvent::null(tag)))
    }

    fn bool_value(&mut self, value: bool, tag: SemanticTag, _ctx: &Context) -> bool {
        self.push(Recorded::Event(OwnedEvent::bool_value(value, tag)))
    }

    fn int64_value(&mut self, value: i64, tag: SemanticTag, _ctx: &Context) -> bool {
        self.push(Recorded::Event(OwnedEvent::int64(value, tag)))
    }

    fn uint64_value(&mut self, value: u64, tag: SemanticTag, _ctx: &Context) -> bool {
        self.push(Recorded::Event(OwnedEvent::uint64(value, tag)))
    }

    fn half_value(&mut self, bits: u16, tag: SemanticTag, _ctx: &Context) -> bool {
        self.push(Recorded::Event(OwnedEvent::half(bits, tag)))
    }

    fn double_value(&mut self, value: f64, tag: SemanticTag, _ctx: &Context) -> bool {
        self.push(Recorded::Event(OwnedEvent::double(value, tag)))
    }

    fn string_value(&mut self, value: &str, tag: SemanticTag, _ctx: &Context) -> bool {
        self.push(Recorded::Event(OwnedEvent::string(value, tag)))
    }

    fn byte_string_value(&mut self, value: &[u8], tag: SemanticTag, _ctx: &Context) -> bool {
        self.push(Recorded::Event(OwnedEvent::byte_string(value, tag)))
    }

    fn ext_byte_string_value(&mut self, value: &[u8], ext_tag: u64, _ctx: &Context) -> bool {
        self.push(Recorded::Event(OwnedEvent::ext_byte_string(value, ext_tag)))
    }

    fn typed_array(&mut self, view: TypedArrayView<'_>, tag: SemanticTag, _ctx: &Context) -> bool {
        self.push(Recorded::TypedArray(TypedArrayBuf::from(view), tag))
    }

    fn begin_multi_dim(&mut self, shape: &[u64], tag: SemanticTag, _ctx: &Context) -> bool {
        self.push(Recorded::BeginMultiDim(shape.to_vec(), tag))
    }

    fn end_multi_dim(&mut self, _ctx: &Context) -> bool {
        self.push(Recorded::EndMultiDim)
    }

    fn flush(&mut self) {
        self.recorded.push(Recorded::Flush);
    }
}
