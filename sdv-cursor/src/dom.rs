//! Tree materialization: a visitor that builds a [`Value`] from the pushed
//! stream.

use alloc::{
    string::String,
    vec::Vec,
};

use sdv_bignum::BigInt;
use sdv_event::{
    half::f16_to_f64,
    Context,
    SemanticTag,
    Visitor,
};

/// A materialized tree value.
///
/// Integer scalars keep their signedness; integers wider than the machine
/// scalars arrive on the wire as tagged text or bytes and materialize as
/// [`Value::BigInt`], so no precision is lost.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Null.
    Null,
    /// Boolean.
    Bool(bool),
    /// Signed integer.
    Int(i64),
    /// Unsigned integer.
    UInt(u64),
    /// Arbitrary-precision integer.
    BigInt(BigInt),
    /// Binary64 floating point.
    Double(f64),
    /// Text.
    String(String),
    /// Bytes.
    Bytes(Vec<u8>),
    /// Array of values.
    Array(Vec<Value>),
    /// Object members in input order.
    Object(Vec<(String, Value)>),
}

impl Value {
    /// The elements when this is an array.
    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    /// The members when this is an object.
    pub fn as_object(&self) -> Option<&[(String, Value)]> {
        match self {
            Value::Object(members) => Some(members),
            _ => None,
        }
    }

    /// The first member with the given name, when this is an object.
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self {
            Value::Object(members) => members
                .iter()
                .find(|(name, _)| name == key)
                .map(|(_, value)| value),
            _ => None,
        }
    }
}

enum Frame {
    Array(Vec<Value>),
    Object {
        members: Vec<(String, Value)>,
        pending_key: Option<String>,
    },
}

/// Visitor that materializes the pushed stream into one [`Value`] tree.
///
/// Typed arrays and multi-dimensional headers arrive through the expanding
/// default visitor methods, so they materialize as plain arrays.
#[derive(Default)]
pub struct ValueBuilder {
    stack: Vec<Frame>,
    result: Option<Value>,
}

impl ValueBuilder {
    /// An empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// The finished tree, if a complete value was pushed.
    pub fn into_value(self) -> Option<Value> {
        self.result
    }

    fn push_value(&mut self, value: Value) {
        match self.stack.last_mut() {
            None => self.result = Some(value),
            Some(Frame::Array(items)) => items.push(value),
            Some(Frame::Object {
                members,
                pending_key,
            }) => {
                if let Some(key) = pending_key.take() {
                    members.push((key, value));
                }
            }
        }
    }
}

impl Visitor for ValueBuilder {
    fn begin_object(&mut self, _length: Option<u64>, _tag: SemanticTag, _ctx: &Context) -> bool {
        self.stack.push(Frame::Object {
            members: Vec::new(),
            pending_key: None,
        });
        true
    }

    fn end_object(&mut self, _ctx: &Context) -> bool {
        if let Some(Frame::Object { members, .. }) = self.stack.pop() {
            self.push_value(Value::Object(members));
        }
        true
    }

    fn begin_array(&mut self, _length: Option<u64>, _tag: SemanticTag, _ctx: &Context) -> bool {
        self.stack.push(Frame::Array(Vec::new()));
        true
    }

    fn end_array(&mut self, _ctx: &Context) -> bool {
        if let Some(Frame::Array(items)) = self.stack.pop() {
            self.push_value(Value::Array(items));
        }
        true
    }

    fn key(&mut self, name: &str, _ctx: &Context) -> bool {
        if let Some(Frame::Object { pending_key, .. }) = self.stack.last_mut() {
            *pending_key = Some(String::from(name));
        }
        true
    }

    fn null_value(&mut self, _tag: SemanticTag, _ctx: &Context) -> bool {
        self.push_value(Value::Null);
        true
    }

    fn bool_value(&mut self, value: bool, _tag: SemanticTag, _ctx: &Context) -> bool {
        self.push_value(Value::Bool(value));
        true
    }

    fn int64_value(&mut self, value: i64, _tag: SemanticTag, _ctx: &Context) -> bool {
        self.push_value(Value::Int(value));
        true
    }

    fn uint64_value(&mut self, value: u64, _tag: SemanticTag, _ctx: &Context) -> bool {
        self.push_value(Value::UInt(value));
        true
    }

    fn half_value(&mut self, bits: u16, _tag: SemanticTag, _ctx: &Context) -> bool {
        self.push_value(Value::Double(f16_to_f64(bits)));
        true
    }

    fn double_value(&mut self, value: f64, _tag: SemanticTag, _ctx: &Context) -> bool {
        self.push_value(Value::Double(value));
        true
    }

    fn string_value(&mut self, value: &str, tag: SemanticTag, _ctx: &Context) -> bool {
        let value = match tag {
            // Integer fidelity: oversized integers travel as tagged text.
            SemanticTag::BigInt => match value.parse::<BigInt>() {
                Ok(big) => Value::BigInt(big),
                Err(_) => Value::String(String::from(value)),
            },
            _ => Value::String(String::from(value)),
        };
        self.push_value(value);
        true
    }

    fn byte_string_value(&mut self, value: &[u8], tag: SemanticTag, _ctx: &Context) -> bool {
        let value = match tag {
            SemanticTag::BigInt => Value::BigInt(BigInt::from_be_bytes(false, value)),
            _ => Value::Bytes(value.to_vec()),
        };
        self.push_value(value);
        true
    }
}
