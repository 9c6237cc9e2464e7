use alloc::boxed::Box;

use sdv_event::{
    Context,
    ConvertError,
    Event,
    EventKind,
    EventPayload,
    SemanticTag,
    Visitor,
};

use crate::{
    staged::{
        Predicate,
        StagedVisitor,
    },
    DecodeError,
    Decoder,
};

/// Replay one event as the matching visitor call; returns the visitor's
/// continuation flag.
pub fn forward_event(event: &Event<'_>, ctx: &Context, visitor: &mut dyn Visitor) -> bool {
    match event.payload() {
        EventPayload::BeginObject(length) => visitor.begin_object(length, event.tag(), ctx),
        EventPayload::EndObject => visitor.end_object(ctx),
        EventPayload::BeginArray(length) => visitor.begin_array(length, event.tag(), ctx),
        EventPayload::EndArray => visitor.end_array(ctx),
        EventPayload::Key(name) => visitor.key(name, ctx),
        EventPayload::String(value) => visitor.string_value(value, event.tag(), ctx),
        EventPayload::ByteString(value) if event.tag() == SemanticTag::Ext => {
            visitor.ext_byte_string_value(value, event.ext_tag(), ctx)
        }
        EventPayload::ByteString(value) => visitor.byte_string_value(value, event.tag(), ctx),
        EventPayload::Null => visitor.null_value(event.tag(), ctx),
        EventPayload::Bool(value) => visitor.bool_value(value, event.tag(), ctx),
        EventPayload::Int64(value) => visitor.int64_value(value, event.tag(), ctx),
        EventPayload::UInt64(value) => visitor.uint64_value(value, event.tag(), ctx),
        EventPayload::Half(bits) => visitor.half_value(bits, event.tag(), ctx),
        EventPayload::Double(value) => visitor.double_value(value, event.tag(), ctx),
    }
}

/// Pull interface over an event stream.
///
/// A cursor always holds one staged event; `next` advances to the following
/// one. Events borrowed from `current` are valid until the next `next` call.
pub trait Cursor {
    /// `true` once the stream is exhausted and no staged event remains.
    fn done(&self) -> bool;

    /// The staged event.
    ///
    /// # Panics
    ///
    /// May panic when `done()` is true; the stream holds no event then.
    fn current(&self) -> Event<'_>;

    /// Advance to the next event.
    ///
    /// A decoder failure is sticky: the same error is returned again on
    /// every later call and `done()` reports true.
    fn next(&mut self) -> Result<(), DecodeError>;

    /// Provenance of the staged event.
    fn context(&self) -> Context;

    /// Forward the staged event to `sink`; when it opens an object or
    /// array, forward the whole balanced subtree, leaving the cursor on the
    /// subtree's closing event.
    fn read_to(&mut self, sink: &mut dyn Visitor) -> Result<(), DecodeError> {
        if self.done() {
            return Ok(());
        }
        let mut depth: i64 = 0;
        loop {
            let ctx = self.context();
            let event = self.current();
            if event.is_container_begin() {
                depth += 1;
            } else if event.is_container_end() {
                depth -= 1;
            }
            forward_event(&event, &ctx, sink);
            if depth <= 0 {
                return Ok(());
            }
            self.next()?;
            if self.done() {
                return Ok(());
            }
        }
    }

    /// Check that the staged event can start a sequence of items: an array,
    /// or a byte string treated as a byte sequence.
    fn expect_array(&self) -> Result<(), ConvertError> {
        match self.current().kind() {
            EventKind::BeginArray | EventKind::ByteString => Ok(()),
            _ => Err(ConvertError::NotVector),
        }
    }

    /// Compose an acceptance predicate over this cursor.
    ///
    /// The view advances to the first accepted event on construction, and
    /// skips rejected events after every `next`. Views compose: filtering by
    /// `p` and then by `q` accepts exactly the events both accept.
    fn filtered<P>(self, predicate: P) -> Result<Filtered<Self, P>, DecodeError>
    where
        Self: Sized,
        P: FnMut(&Event<'_>, &Context) -> bool,
    {
        Filtered::new(self, predicate)
    }
}

/// Pull cursor over a push [`Decoder`].
///
/// The decoder is cooperatively suspended on every surfaced event: its push
/// into the capturing visitor returns the stop signal, unwinding its stack
/// back into [`next`](Cursor::next), and the following `next` re-enters it.
/// Compound pushes are replayed from captured state without re-entering the
/// decoder until their expansion drains.
pub struct EventCursor<D> {
    decoder: D,
    staged: StagedVisitor,
    errored: Option<DecodeError>,
    finished: bool,
}

impl<D: core::fmt::Debug> core::fmt::Debug for EventCursor<D> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("EventCursor")
            .field("decoder", &self.decoder)
            .field("errored", &self.errored)
            .field("finished", &self.finished)
            .finish()
    }
}

impl<D: Decoder> EventCursor<D> {
    /// Cursor surfacing every event, with the first event staged.
    pub fn new(decoder: D) -> Result<Self, DecodeError> {
        Self::build(decoder, None)
    }

    /// Cursor surfacing only events the predicate accepts.
    pub fn with_filter(
        decoder: D,
        predicate: impl FnMut(&Event<'_>, &Context) -> bool + 'static,
    ) -> Result<Self, DecodeError> {
        Self::build(decoder, Some(Box::new(predicate)))
    }

    fn build(decoder: D, predicate: Option<Predicate>) -> Result<Self, DecodeError> {
        let mut cursor = EventCursor {
            decoder,
            staged: StagedVisitor::new(predicate),
            errored: None,
            finished: false,
        };
        cursor.advance()?;
        Ok(cursor)
    }

    fn advance(&mut self) -> Result<(), DecodeError> {
        if let Some(error) = &self.errored {
            return Err(error.clone());
        }
        loop {
            if self.staged.in_expansion() {
                if self.staged.advance_expansion() {
                    return Ok(());
                }
                continue;
            }
            if self.decoder.done() {
                self.finished = true;
                return Ok(());
            }
            tracing::trace!(context = ?self.decoder.context(), "re-entering decoder");
            self.staged.reset_accepted();
            if let Err(error) = self.decoder.drive(&mut self.staged) {
                self.errored = Some(error.clone());
                self.finished = true;
                return Err(error);
            }
            if self.staged.accepted() {
                return Ok(());
            }
        }
    }
}

impl<D: Decoder> Cursor for EventCursor<D> {
    fn done(&self) -> bool {
        self.finished && !self.staged.in_expansion()
    }

    fn current(&self) -> Event<'_> {
        match self.staged.current() {
            Some(event) => event,
            None => panic!("cursor holds no event"),
        }
    }

    fn next(&mut self) -> Result<(), DecodeError> {
        self.advance()
    }

    fn context(&self) -> Context {
        self.staged.context()
    }

    fn read_to(&mut self, sink: &mut dyn Visitor) -> Result<(), DecodeError> {
        if self.done() {
            return Ok(());
        }
        let mut depth: i64 = 0;
        loop {
            depth += self.staged.dump(sink);
            if depth <= 0 {
                return Ok(());
            }
            self.advance()?;
            if self.done() {
                return Ok(());
            }
        }
    }
}

/// Filter view composing one predicate onto an existing cursor.
pub struct Filtered<C, P> {
    inner: C,
    predicate: P,
}

impl<C, P> Filtered<C, P>
where
    C: Cursor,
    P: FnMut(&Event<'_>, &Context) -> bool,
{
    fn new(inner: C, predicate: P) -> Result<Self, DecodeError> {
        let mut view = Filtered { inner, predicate };
        view.skip_rejected()?;
        Ok(view)
    }

    fn skip_rejected(&mut self) -> Result<(), DecodeError> {
        while !self.inner.done() {
            if (self.predicate)(&self.inner.current(), &self.inner.context()) {
                break;
            }
            self.inner.next()?;
        }
        Ok(())
    }

    /// Give the wrapped cursor back.
    pub fn into_inner(self) -> C {
        self.inner
    }
}

impl<C, P> Cursor for Filtered<C, P>
where
    C: Cursor,
    P: FnMut(&Event<'_>, &Context) -> bool,
{
    fn done(&self) -> bool {
        self.inner.done()
    }

    fn current(&self) -> Event<'_> {
        self.inner.current()
    }

    fn next(&mut self) -> Result<(), DecodeError> {
        self.inner.next()?;
        self.skip_rejected()
    }

    fn context(&self) -> Context {
        self.inner.context()
    }
}
