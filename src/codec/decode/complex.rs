use crate::codec::cursor::Cursor;
use crate::codec::types::{Value, WidthClass};
use crate::internal::error::{Error, Result};
use bytes::Bytes;

/// Reads a length/count prefix of the given width.
///
/// The 32-bit class is signed on the wire; negative counts are rejected
/// instead of wrapping to huge unsigned values.
pub fn read_count(cursor: &mut Cursor<'_>, width: WidthClass) -> Result<usize> {
    match width {
        WidthClass::W8 => Ok(usize::from(cursor.read_byte()?)),
        WidthClass::W16 => Ok(usize::from(cursor.read_u16()?)),
        WidthClass::W32 => {
            let count = cursor.read_i32()?;
            usize::try_from(count).map_err(|_| Error::CountOverflow(count.into()))
        }
    }
}

pub fn read_string(cursor: &mut Cursor<'_>, width: WidthClass) -> Result<Value> {
    let len = read_count(cursor, width)?;
    let raw = cursor.read_exact(len)?;
    let s = std::str::from_utf8(raw)?;
    Ok(Value::String(s.to_owned()))
}

pub fn read_binary(cursor: &mut Cursor<'_>, width: WidthClass) -> Result<Value> {
    let len = read_count(cursor, width)?;
    let raw = cursor.read_exact(len)?;
    Ok(Value::Binary(Bytes::copy_from_slice(raw)))
}

/// Capacity to reserve for `count` items of at least `min_item_len` bytes
/// each; never more than the remaining input could hold.
pub fn capacity_hint(count: usize, remaining: usize, min_item_len: usize) -> usize {
    count.min(remaining / min_item_len.max(1))
}
