use crate::codec::types::{ValueType, WidthClass};
use crate::internal::error::{Error, Result};
use bytes::{BufMut, BytesMut};
use tracing::trace;

/// The four length-prefixed value kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LengthKind {
    String,
    Binary,
    Array,
    Map,
}

impl LengthKind {
    /// The tag for this kind at the given width class.
    pub fn tag(self, width: WidthClass) -> ValueType {
        use LengthKind::*;
        use WidthClass::*;
        match (self, width) {
            (String, W8) => ValueType::String8,
            (String, W16) => ValueType::String16,
            (String, W32) => ValueType::String32,
            (Binary, W8) => ValueType::Binary8,
            (Binary, W16) => ValueType::Binary16,
            (Binary, W32) => ValueType::Binary32,
            (Array, W8) => ValueType::Array8,
            (Array, W16) => ValueType::Array16,
            (Array, W32) => ValueType::Array32,
            (Map, W8) => ValueType::Map8,
            (Map, W16) => ValueType::Map16,
            (Map, W32) => ValueType::Map32,
        }
    }
}

/// Counts travel as i32 in the widest class, so anything larger could not
/// be read back.
fn check_count(kind: LengthKind, count: usize) -> Result<()> {
    if count > i32::MAX as usize {
        return Err(Error::UnsupportedValue(format!(
            "{:?} length {} exceeds the 32-bit count limit",
            kind, count
        )));
    }
    Ok(())
}

/// Writes the tag and count prefix for a length-prefixed value.
pub fn write_header(buf: &mut BytesMut, kind: LengthKind, count: usize) -> Result<()> {
    check_count(kind, count)?;
    let width = WidthClass::for_count(count);
    let tag = kind.tag(width);
    trace!(?tag, count, "writing length prefix");
    buf.put_u8(tag as u8);
    match width {
        WidthClass::W8 => buf.put_u8(count as u8),
        WidthClass::W16 => buf.put_u16(count as u16),
        WidthClass::W32 => buf.put_u32(count as u32),
    }
    Ok(())
}

/// Size of the tag plus count prefix.
pub fn header_len(kind: LengthKind, count: usize) -> Result<usize> {
    check_count(kind, count)?;
    Ok(1 + WidthClass::for_count(count).prefix_len())
}

/// Strings are prefixed by their UTF-8 byte length, not their char count.
pub fn write_string(buf: &mut BytesMut, s: &str) -> Result<()> {
    write_header(buf, LengthKind::String, s.len())?;
    buf.put_slice(s.as_bytes());
    Ok(())
}

pub fn write_binary(buf: &mut BytesMut, data: &[u8]) -> Result<()> {
    write_header(buf, LengthKind::Binary, data.len())?;
    buf.put_slice(data);
    Ok(())
}
