//! Views over homogeneous typed arrays.
//!
//! A typed array arrives as one visitor call carrying a contiguous span of
//! elements. [`TypedArrayView`] borrows that span; [`TypedArrayBuf`] is the
//! owned copy held by a cursor while it expands the span into per-element
//! events.

use alloc::vec::Vec;

/// Element type of a typed array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ElementKind {
    /// Unsigned 8-bit integers.
    U8,
    /// Unsigned 16-bit integers.
    U16,
    /// Unsigned 32-bit integers.
    U32,
    /// Unsigned 64-bit integers.
    U64,
    /// Signed 8-bit integers.
    I8,
    /// Signed 16-bit integers.
    I16,
    /// Signed 32-bit integers.
    I32,
    /// Signed 64-bit integers.
    I64,
    /// IEEE 754 binary16 bit patterns.
    F16,
    /// IEEE 754 binary32 values.
    F32,
    /// IEEE 754 binary64 values.
    F64,
}

/// One element widened to the scalar family its kind expands into.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TypedScalar {
    /// From the unsigned kinds.
    UInt64(u64),
    /// From the signed kinds.
    Int64(i64),
    /// From `F16`, still as raw bits.
    Half(u16),
    /// From `F32` and `F64`.
    Double(f64),
}

macro_rules! typed_array_storage {
    ($($(#[$attr:meta])* $variant:ident => $ty:ty),* $(,)?) => {
        /// Borrowed view over one contiguous homogeneous array.
        #[derive(Debug, Clone, Copy, PartialEq)]
        pub enum TypedArrayView<'a> {
            $(
                $(#[$attr])*
                $variant(&'a [$ty]),
            )*
        }

        /// Owned copy of a typed array.
        #[derive(Debug, Clone, PartialEq)]
        pub enum TypedArrayBuf {
            $(
                $(#[$attr])*
                $variant(Vec<$ty>),
            )*
        }

        impl<'a> TypedArrayView<'a> {
            /// The element type of the span.
            pub fn element_kind(&self) -> ElementKind {
                match self {
                    $(Self::$variant(_) => ElementKind::$variant,)*
                }
            }

            /// Number of elements.
            pub fn len(&self) -> usize {
                match self {
                    $(Self::$variant(s) => s.len(),)*
                }
            }
        }

        impl TypedArrayBuf {
            /// Borrow the owned elements back as a view.
            pub fn view(&self) -> TypedArrayView<'_> {
                match self {
                    $(Self::$variant(v) => TypedArrayView::$variant(v),)*
                }
            }
        }

        impl From<TypedArrayView<'_>> for TypedArrayBuf {
            fn from(view: TypedArrayView<'_>) -> Self {
                match view {
                    $(TypedArrayView::$variant(s) => Self::$variant(s.to_vec()),)*
                }
            }
        }
    };
}

typed_array_storage! {
    /// Unsigned 8-bit elements.
    U8 => u8,
    /// Unsigned 16-bit elements.
    U16 => u16,
    /// Unsigned 32-bit elements.
    U32 => u32,
    /// Unsigned 64-bit elements.
    U64 => u64,
    /// Signed 8-bit elements.
    I8 => i8,
    /// Signed 16-bit elements.
    I16 => i16,
    /// Signed 32-bit elements.
    I32 => i32,
    /// Signed 64-bit elements.
    I64 => i64,
    /// Binary16 bit patterns.
    F16 => u16,
    /// Binary32 elements.
    F32 => f32,
    /// Binary64 elements.
    F64 => f64,
}

impl<'a> TypedArrayView<'a> {
    /// `true` when the span has no elements.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The element at `index`, widened to its event scalar family.
    ///
    /// Unsigned kinds widen to `UInt64`, signed kinds to `Int64`, `F16`
    /// stays a bit pattern, and the binary floating kinds widen to `Double`.
    pub fn scalar(&self, index: usize) -> Option<TypedScalar> {
        match self {
            Self::U8(s) => s.get(index).map(|v| TypedScalar::UInt64(u64::from(*v))),
            Self::U16(s) => s.get(index).map(|v| TypedScalar::UInt64(u64::from(*v))),
            Self::U32(s) => s.get(index).map(|v| TypedScalar::UInt64(u64::from(*v))),
            Self::U64(s) => s.get(index).map(|v| TypedScalar::UInt64(*v)),
            Self::I8(s) => s.get(index).map(|v| TypedScalar::Int64(i64::from(*v))),
            Self::I16(s) => s.get(index).map(|v| TypedScalar::Int64(i64::from(*v))),
            Self::I32(s) => s.get(index).map(|v| TypedScalar::Int64(i64::from(*v))),
            Self::I64(s) => s.get(index).map(|v| TypedScalar::Int64(*v)),
            Self::F16(s) => s.get(index).map(|v| TypedScalar::Half(*v)),
            Self::F32(s) => s.get(index).map(|v| TypedScalar::Double(f64::from(*v))),
            Self::F64(s) => s.get(index).map(|v| TypedScalar::Double(*v)),
        }
    }
}

impl TypedArrayBuf {
    /// The element type of the buffer.
    pub fn element_kind(&self) -> ElementKind {
        self.view().element_kind()
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.view().len()
    }

    /// `true` when the buffer has no elements.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The element at `index`, widened to its event scalar family.
    pub fn scalar(&self, index: usize) -> Option<TypedScalar> {
        self.view().scalar(index)
    }
}
