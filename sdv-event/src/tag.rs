use core::fmt;

/// Semantic annotation attached to an event.
///
/// Tags distinguish encodings with identical syntax (a base64 text payload
/// from a plain string, an epoch offset from a plain number). They never
/// affect equality of the underlying value; they select conversions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
#[non_exhaustive]
pub enum SemanticTag {
    /// No semantic meaning beyond the event kind.
    None = 0x00,
    /// Arbitrary-precision integer carried as decimal text or base-256 bytes.
    BigInt = 0x01,
    /// Arbitrary-precision decimal carried as text.
    BigDecimal = 0x02,
    /// RFC 3339 date-time text.
    DateTime = 0x03,
    /// Numeric offset from the POSIX epoch.
    EpochTime = 0x04,
    /// Text holding base16-encoded bytes.
    Base16 = 0x05,
    /// Text holding base64-encoded bytes.
    Base64 = 0x06,
    /// Text holding base64url-encoded bytes.
    Base64Url = 0x07,
    /// Text holding a URI.
    Uri = 0x08,
    /// Multi-dimensional array in row-major element order.
    MultiDimRowMajor = 0x09,
    /// Multi-dimensional array in column-major element order.
    MultiDimColumnMajor = 0x0a,
    /// Format-specific extension; the event carries a numeric extension tag.
    Ext = 0x0b,
}

impl fmt::Display for SemanticTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

impl From<u8> for SemanticTag {
    /// Converts the `u8` into a `SemanticTag`, mapping unknown bytes to
    /// [`SemanticTag::None`].
    fn from(b: u8) -> Self {
        use SemanticTag::*;
        match b {
            0x01 => BigInt,
            0x02 => BigDecimal,
            0x03 => DateTime,
            0x04 => EpochTime,
            0x05 => Base16,
            0x06 => Base64,
            0x07 => Base64Url,
            0x08 => Uri,
            0x09 => MultiDimRowMajor,
            0x0a => MultiDimColumnMajor,
            0x0b => Ext,
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn tag_u8_round_trip() {
        for tag in SemanticTag::iter() {
            assert_eq!(SemanticTag::from(tag as u8), tag);
        }
        let last_known = SemanticTag::iter().last().unwrap() as u8;
        for b in last_known + 1..=u8::MAX {
            assert_eq!(SemanticTag::from(b), SemanticTag::None);
        }
    }
}
