//! The capturing visitor behind the pull cursor.

use alloc::{
    boxed::Box,
    vec::Vec,
};

use sdv_event::{
    Context,
    Event,
    OwnedEvent,
    SemanticTag,
    TypedArrayBuf,
    TypedArrayView,
    TypedScalar,
    Visitor,
};

/// Acceptance predicate deciding which events the cursor surfaces.
pub type Predicate = Box<dyn FnMut(&Event<'_>, &Context) -> bool>;

/// Pending synthetic events for a compound call being replayed one event at
/// a time. At most one variant is ever active.
enum Expansion {
    Idle,
    TypedArray { data: TypedArrayBuf, index: usize },
    MultiDim { shape: Vec<u64> },
    Shape { shape: Vec<u64>, index: usize },
}

/// Visitor that captures each incoming push as an owned event, evaluates the
/// acceptance predicate, and answers with the stop signal so the pusher
/// suspends on every accepted event.
///
/// Compound pushes (typed arrays, multi-dimensional headers) are captured as
/// their opening event plus expansion state; the cursor pumps the remaining
/// synthetic events out through [`advance_expansion`](Self::advance_expansion)
/// without re-entering the pusher.
pub(crate) struct StagedVisitor {
    event: Option<OwnedEvent>,
    context: Context,
    accepted: bool,
    predicate: Option<Predicate>,
    expansion: Expansion,
}

impl StagedVisitor {
    pub(crate) fn new(predicate: Option<Predicate>) -> Self {
        StagedVisitor {
            event: None,
            context: Context::default(),
            accepted: false,
            predicate,
            expansion: Expansion::Idle,
        }
    }

    /// The last captured event, republished as a borrowed view.
    pub(crate) fn current(&self) -> Option<Event<'_>> {
        self.event.as_ref().map(OwnedEvent::as_event)
    }

    /// Provenance of the last captured event.
    pub(crate) fn context(&self) -> Context {
        self.context
    }

    /// Whether the last captured event passed the predicate.
    pub(crate) fn accepted(&self) -> bool {
        self.accepted
    }

    pub(crate) fn reset_accepted(&mut self) {
        self.accepted = false;
    }

    pub(crate) fn in_expansion(&self) -> bool {
        !matches!(self.expansion, Expansion::Idle)
    }

    /// Capture an event and evaluate the predicate; returns acceptance.
    fn stage(&mut self, event: OwnedEvent, ctx: &Context) -> bool {
        let accept = match &mut self.predicate {
            Some(predicate) => predicate(&event.as_event(), ctx),
            None => true,
        };
        self.event = Some(event);
        self.context = *ctx;
        self.accepted = accept;
        accept
    }

    /// Produce the next synthetic event of the active expansion; returns
    /// predicate acceptance. The expansion clears itself after its closing
    /// array event.
    pub(crate) fn advance_expansion(&mut self) -> bool {
        let ctx = self.context;
        match core::mem::replace(&mut self.expansion, Expansion::Idle) {
            Expansion::Idle => false,
            Expansion::TypedArray { data, index } => match data.scalar(index) {
                Some(scalar) => {
                    let event = match scalar {
                        TypedScalar::UInt64(v) => OwnedEvent::uint64(v, SemanticTag::None),
                        TypedScalar::Int64(v) => OwnedEvent::int64(v, SemanticTag::None),
                        TypedScalar::Half(v) => OwnedEvent::half(v, SemanticTag::None),
                        TypedScalar::Double(v) => OwnedEvent::double(v, SemanticTag::None),
                    };
                    self.expansion = Expansion::TypedArray {
                        data,
                        index: index + 1,
                    };
                    self.stage(event, &ctx)
                }
                None => self.stage(OwnedEvent::end_array(), &ctx),
            },
            Expansion::MultiDim { shape } => {
                let event = OwnedEvent::begin_array(Some(shape.len() as u64), SemanticTag::None);
                self.expansion = Expansion::Shape { shape, index: 0 };
                self.stage(event, &ctx)
            }
            Expansion::Shape { shape, index } => {
                if index < shape.len() {
                    let extent = shape[index];
                    self.expansion = Expansion::Shape {
                        shape,
                        index: index + 1,
                    };
                    self.stage(OwnedEvent::uint64(extent, SemanticTag::None), &ctx)
                } else {
                    self.stage(OwnedEvent::end_array(), &ctx)
                }
            }
        }
    }

    /// Forward the current event to `sink`, returning the container depth
    /// change the sink observed.
    ///
    /// A typed array whose expansion has not yet emitted an element is
    /// forwarded as one bulk `typed_array` call instead of element by
    /// element, and the captured event moves to the array's closing event;
    /// the net depth change is zero either way.
    pub(crate) fn dump(&mut self, sink: &mut dyn Visitor) -> i64 {
        let ctx = self.context;
        if matches!(self.expansion, Expansion::TypedArray { index: 0, .. }) {
            if let Expansion::TypedArray { data, .. } =
                core::mem::replace(&mut self.expansion, Expansion::Idle)
            {
                let tag = self
                    .event
                    .as_ref()
                    .map(OwnedEvent::tag)
                    .unwrap_or(SemanticTag::None);
                sink.typed_array(data.view(), tag, &ctx);
                self.event = Some(OwnedEvent::end_array());
            }
            return 0;
        }
        let Some(event) = &self.event else {
            return 0;
        };
        let event = event.as_event();
        crate::forward_event(&event, &ctx, sink);
        if event.is_container_begin() {
            1
        } else if event.is_container_end() {
            -1
        } else {
            0
        }
    }
}

impl Visitor for StagedVisitor {
    fn begin_object(&mut self, length: Option<u64>, tag: SemanticTag, ctx: &Context) -> bool {
        !self.stage(OwnedEvent::begin_object(length, tag), ctx)
    }

    fn end_object(&mut self, ctx: &Context) -> bool {
        !self.stage(OwnedEvent::end_object(), ctx)
    }

    fn begin_array(&mut self, length: Option<u64>, tag: SemanticTag, ctx: &Context) -> bool {
        !self.stage(OwnedEvent::begin_array(length, tag), ctx)
    }

    fn end_array(&mut self, ctx: &Context) -> bool {
        !self.stage(OwnedEvent::end_array(), ctx)
    }

    fn key(&mut self, name: &str, ctx: &Context) -> bool {
        !self.stage(OwnedEvent::key(name), ctx)
    }

    fn null_value(&mut self, tag: SemanticTag, ctx: &Context) -> bool {
        !self.stage(OwnedEvent::null(tag), ctx)
    }

    fn bool_value(&mut self, value: bool, tag: SemanticTag, ctx: &Context) -> bool {
        !self.stage(OwnedEvent::bool_value(value, tag), ctx)
    }

    fn int64_value(&mut self, value: i64, tag: SemanticTag, ctx: &Context) -> bool {
        !self.stage(OwnedEvent::int64(value, tag), ctx)
    }

    fn uint64_value(&mut self, value: u64, tag: SemanticTag, ctx: &Context) -> bool {
        !self.stage(OwnedEvent::uint64(value, tag), ctx)
    }

    fn half_value(&mut self, bits: u16, tag: SemanticTag, ctx: &Context) -> bool {
        !self.stage(OwnedEvent::half(bits, tag), ctx)
    }

    fn double_value(&mut self, value: f64, tag: SemanticTag, ctx: &Context) -> bool {
        !self.stage(OwnedEvent::double(value, tag), ctx)
    }

    fn string_value(&mut self, value: &str, tag: SemanticTag, ctx: &Context) -> bool {
        !self.stage(OwnedEvent::string(value, tag), ctx)
    }

    fn byte_string_value(&mut self, value: &[u8], tag: SemanticTag, ctx: &Context) -> bool {
        !self.stage(OwnedEvent::byte_string(value, tag), ctx)
    }

    fn ext_byte_string_value(&mut self, value: &[u8], ext_tag: u64, ctx: &Context) -> bool {
        !self.stage(OwnedEvent::ext_byte_string(value, ext_tag), ctx)
    }

    fn typed_array(&mut self, view: TypedArrayView<'_>, tag: SemanticTag, ctx: &Context) -> bool {
        let length = view.len() as u64;
        self.expansion = Expansion::TypedArray {
            data: TypedArrayBuf::from(view),
            index: 0,
        };
        self.stage(OwnedEvent::begin_array(Some(length), tag), ctx);
        // Suspend regardless of acceptance: the expansion must drain before
        // the pusher may continue.
        false
    }

    fn begin_multi_dim(&mut self, shape: &[u64], tag: SemanticTag, ctx: &Context) -> bool {
        self.expansion = Expansion::MultiDim {
            shape: shape.to_vec(),
        };
        self.stage(OwnedEvent::begin_array(Some(2), tag), ctx);
        false
    }

    fn end_multi_dim(&mut self, ctx: &Context) -> bool {
        !self.stage(OwnedEvent::end_array(), ctx)
    }

    fn flush(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn pump(visitor: &mut StagedVisitor) -> Vec<OwnedEvent> {
        let mut out = Vec::new();
        while visitor.in_expansion() {
            visitor.advance_expansion();
            out.push(OwnedEvent::from(visitor.current().unwrap()));
        }
        out
    }

    #[test]
    fn scalar_pushes_are_captured_and_stop_the_pusher() {
        let mut visitor = StagedVisitor::new(None);
        let ctx = Context::at_position(3);
        assert!(!visitor.uint64_value(9, SemanticTag::None, &ctx));
        assert!(visitor.accepted());
        assert_eq!(
            visitor.current().unwrap(),
            Event::uint64(9, SemanticTag::None)
        );
        assert_eq!(visitor.context(), ctx);
    }

    #[test]
    fn rejected_events_let_the_pusher_continue() {
        let mut visitor = StagedVisitor::new(Some(Box::new(
            |event: &Event<'_>, _: &Context| event.kind() != sdv_event::EventKind::Key,
        )));
        let ctx = Context::default();
        assert!(visitor.key("skip me", &ctx));
        assert!(!visitor.accepted());
        assert!(!visitor.uint64_value(1, SemanticTag::None, &ctx));
        assert!(visitor.accepted());
    }

    #[test]
    fn typed_array_expands_to_elements_and_end() {
        let mut visitor = StagedVisitor::new(None);
        let ctx = Context::default();
        assert!(!visitor.typed_array(TypedArrayView::U8(&[7, 8, 9]), SemanticTag::None, &ctx));
        assert_eq!(
            visitor.current().unwrap(),
            Event::begin_array(Some(3), SemanticTag::None)
        );
        assert_eq!(
            pump(&mut visitor),
            vec![
                OwnedEvent::uint64(7, SemanticTag::None),
                OwnedEvent::uint64(8, SemanticTag::None),
                OwnedEvent::uint64(9, SemanticTag::None),
                OwnedEvent::end_array(),
            ]
        );
    }

    #[test]
    fn multi_dim_expands_shape_then_clears() {
        let mut visitor = StagedVisitor::new(None);
        let ctx = Context::default();
        assert!(!visitor.begin_multi_dim(&[2, 3], SemanticTag::MultiDimRowMajor, &ctx));
        assert_eq!(
            visitor.current().unwrap(),
            Event::begin_array(Some(2), SemanticTag::MultiDimRowMajor)
        );
        assert_eq!(
            pump(&mut visitor),
            vec![
                OwnedEvent::begin_array(Some(2), SemanticTag::None),
                OwnedEvent::uint64(2, SemanticTag::None),
                OwnedEvent::uint64(3, SemanticTag::None),
                OwnedEvent::end_array(),
            ]
        );
        assert!(!visitor.end_multi_dim(&ctx));
        assert_eq!(visitor.current().unwrap(), Event::end_array());
    }

    #[test]
    fn fresh_typed_array_dumps_as_one_bulk_call() {
        use crate::testing::{
            Recorded,
            RecordingVisitor,
        };

        let mut visitor = StagedVisitor::new(None);
        let ctx = Context::default();
        visitor.typed_array(TypedArrayView::F64(&[1.0, 2.0]), SemanticTag::None, &ctx);

        let mut sink = RecordingVisitor::new();
        assert_eq!(visitor.dump(&mut sink), 0);
        assert_eq!(
            sink.recorded(),
            &[Recorded::TypedArray(
                TypedArrayBuf::F64(vec![1.0, 2.0]),
                SemanticTag::None
            )]
        );
        assert!(!visitor.in_expansion());
        assert_eq!(visitor.current().unwrap(), Event::end_array());
    }

    #[test]
    fn mid_stream_typed_array_dumps_element_by_element() {
        use crate::testing::{
            Recorded,
            RecordingVisitor,
        };

        let mut visitor = StagedVisitor::new(None);
        let ctx = Context::default();
        visitor.typed_array(TypedArrayView::U8(&[5, 6]), SemanticTag::None, &ctx);
        visitor.advance_expansion(); // now on element 0

        let mut sink = RecordingVisitor::new();
        assert_eq!(visitor.dump(&mut sink), 0);
        assert_eq!(
            sink.recorded(),
            &[Recorded::Event(OwnedEvent::uint64(5, SemanticTag::None))]
        );
        assert!(visitor.in_expansion());
    }
}
