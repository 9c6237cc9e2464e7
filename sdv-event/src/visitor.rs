use crate::{
    typed_array::{
        TypedArrayView,
        TypedScalar,
    },
    SemanticTag,
};

/// Byte, line, and column provenance of an event in the source.
///
/// Text decoders fill all three; binary decoders typically report only the
/// byte position and leave line and column zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Context {
    /// Byte offset of the event in the input.
    pub position: u64,
    /// One-based source line, or zero when the format has no lines.
    pub line: u64,
    /// One-based source column, or zero when the format has no lines.
    pub column: u64,
}

impl Context {
    /// Provenance with only a byte position.
    pub fn at_position(position: u64) -> Self {
        Context {
            position,
            line: 0,
            column: 0,
        }
    }
}

/// Push protocol a decoder drives, one call per event.
///
/// Every method returns a continuation flag: `true` asks the pusher to keep
/// going, `false` asks it to stop after the current event. The stop signal
/// is how pull layers suspend a decoder mid-stream; a plain consumer can
/// ignore the mechanism and always return `true`.
///
/// A conforming pusher emits a balanced tree of begin/end calls; between
/// `begin_object` and its `end_object`, calls alternate key, value.
///
/// The compound methods have expanding default implementations:
/// [`typed_array`](Visitor::typed_array) replays its span as a begin, one
/// scalar per element, and an end, and [`begin_multi_dim`](Visitor::begin_multi_dim)
/// replays its shape as a nested array, so only visitors that care about
/// bulk spans need to override them.
pub trait Visitor {
    /// Object start, with the member count when the format announces it.
    fn begin_object(&mut self, length: Option<u64>, tag: SemanticTag, ctx: &Context) -> bool;

    /// Object end.
    fn end_object(&mut self, ctx: &Context) -> bool;

    /// Array start, with the element count when the format announces it.
    fn begin_array(&mut self, length: Option<u64>, tag: SemanticTag, ctx: &Context) -> bool;

    /// Array end.
    fn end_array(&mut self, ctx: &Context) -> bool;

    /// Object member name.
    fn key(&mut self, name: &str, ctx: &Context) -> bool;

    /// Null scalar.
    fn null_value(&mut self, tag: SemanticTag, ctx: &Context) -> bool;

    /// Boolean scalar.
    fn bool_value(&mut self, value: bool, tag: SemanticTag, ctx: &Context) -> bool;

    /// Signed integer scalar.
    fn int64_value(&mut self, value: i64, tag: SemanticTag, ctx: &Context) -> bool;

    /// Unsigned integer scalar.
    fn uint64_value(&mut self, value: u64, tag: SemanticTag, ctx: &Context) -> bool;

    /// Binary16 scalar, as raw bits.
    fn half_value(&mut self, bits: u16, tag: SemanticTag, ctx: &Context) -> bool;

    /// Binary64 scalar.
    fn double_value(&mut self, value: f64, tag: SemanticTag, ctx: &Context) -> bool;

    /// Text scalar.
    fn string_value(&mut self, value: &str, tag: SemanticTag, ctx: &Context) -> bool;

    /// Binary scalar.
    fn byte_string_value(&mut self, value: &[u8], tag: SemanticTag, ctx: &Context) -> bool;

    /// Binary scalar carrying a format-specific extension tag.
    fn ext_byte_string_value(&mut self, value: &[u8], ext_tag: u64, ctx: &Context) -> bool {
        let _ = ext_tag;
        self.byte_string_value(value, SemanticTag::Ext, ctx)
    }

    /// Homogeneous array delivered as one contiguous span.
    fn typed_array(&mut self, view: TypedArrayView<'_>, tag: SemanticTag, ctx: &Context) -> bool {
        if !self.begin_array(Some(view.len() as u64), tag, ctx) {
            return false;
        }
        let mut index = 0;
        while let Some(scalar) = view.scalar(index) {
            let more = match scalar {
                TypedScalar::UInt64(v) => self.uint64_value(v, SemanticTag::None, ctx),
                TypedScalar::Int64(v) => self.int64_value(v, SemanticTag::None, ctx),
                TypedScalar::Half(v) => self.half_value(v, SemanticTag::None, ctx),
                TypedScalar::Double(v) => self.double_value(v, SemanticTag::None, ctx),
            };
            if !more {
                return false;
            }
            index += 1;
        }
        self.end_array(ctx)
    }

    /// Start of a multi-dimensional array: a length-2 wrapper holding the
    /// shape array and then the body array the pusher sends next.
    fn begin_multi_dim(&mut self, shape: &[u64], tag: SemanticTag, ctx: &Context) -> bool {
        if !self.begin_array(Some(2), tag, ctx) {
            return false;
        }
        if !self.begin_array(Some(shape.len() as u64), SemanticTag::None, ctx) {
            return false;
        }
        for &extent in shape {
            if !self.uint64_value(extent, SemanticTag::None, ctx) {
                return false;
            }
        }
        self.end_array(ctx)
    }

    /// End of a multi-dimensional array: closes the length-2 wrapper.
    fn end_multi_dim(&mut self, ctx: &Context) -> bool {
        self.end_array(ctx)
    }

    /// Signal that the pusher has delivered everything it buffered.
    fn flush(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    /// Counts calls, stopping after a configured number of events.
    struct CountingVisitor {
        seen: Vec<&'static str>,
        remaining: usize,
    }

    impl CountingVisitor {
        fn new(limit: usize) -> Self {
            CountingVisitor {
                seen: Vec::new(),
                remaining: limit,
            }
        }

        fn record(&mut self, label: &'static str) -> bool {
            self.seen.push(label);
            self.remaining -= 1;
            self.remaining > 0
        }
    }

    impl Visitor for CountingVisitor {
        fn begin_object(&mut self, _: Option<u64>, _: SemanticTag, _: &Context) -> bool {
            self.record("begin_object")
        }

        fn end_object(&mut self, _: &Context) -> bool {
            self.record("end_object")
        }

        fn begin_array(&mut self, _: Option<u64>, _: SemanticTag, _: &Context) -> bool {
            self.record("begin_array")
        }

        fn end_array(&mut self, _: &Context) -> bool {
            self.record("end_array")
        }

        fn key(&mut self, _: &str, _: &Context) -> bool {
            self.record("key")
        }

        fn null_value(&mut self, _: SemanticTag, _: &Context) -> bool {
            self.record("null")
        }

        fn bool_value(&mut self, _: bool, _: SemanticTag, _: &Context) -> bool {
            self.record("bool")
        }

        fn int64_value(&mut self, _: i64, _: SemanticTag, _: &Context) -> bool {
            self.record("int64")
        }

        fn uint64_value(&mut self, _: u64, _: SemanticTag, _: &Context) -> bool {
            self.record("uint64")
        }

        fn half_value(&mut self, _: u16, _: SemanticTag, _: &Context) -> bool {
            self.record("half")
        }

        fn double_value(&mut self, _: f64, _: SemanticTag, _: &Context) -> bool {
            self.record("double")
        }

        fn string_value(&mut self, _: &str, _: SemanticTag, _: &Context) -> bool {
            self.record("string")
        }

        fn byte_string_value(&mut self, _: &[u8], _: SemanticTag, _: &Context) -> bool {
            self.record("byte_string")
        }
    }

    #[test]
    fn default_typed_array_expands_per_element() {
        let ctx = Context::default();
        let mut visitor = CountingVisitor::new(usize::MAX);
        assert!(visitor.typed_array(TypedArrayView::U8(&[7, 8, 9]), SemanticTag::None, &ctx));
        assert_eq!(
            visitor.seen,
            ["begin_array", "uint64", "uint64", "uint64", "end_array"]
        );
    }

    #[test]
    fn default_typed_array_honors_the_stop_signal() {
        let ctx = Context::default();
        let mut visitor = CountingVisitor::new(2);
        assert!(!visitor.typed_array(TypedArrayView::I32(&[1, 2, 3]), SemanticTag::None, &ctx));
        assert_eq!(visitor.seen, ["begin_array", "int64"]);
    }

    #[test]
    fn default_multi_dim_replays_the_shape() {
        let ctx = Context::default();
        let mut visitor = CountingVisitor::new(usize::MAX);
        assert!(visitor.begin_multi_dim(&[2, 3], SemanticTag::MultiDimRowMajor, &ctx));
        assert!(visitor.end_multi_dim(&ctx));
        assert_eq!(
            visitor.seen,
            ["begin_array", "begin_array", "uint64", "uint64", "end_array", "end_array"]
        );
    }

    #[test]
    fn default_ext_byte_string_forwards_with_ext_tag() {
        let ctx = Context::default();
        let mut visitor = CountingVisitor::new(usize::MAX);
        assert!(visitor.ext_byte_string_value(&[1, 2], 99, &ctx));
        assert_eq!(visitor.seen, ["byte_string"]);
    }
}
