use crate::codec::types::{seconds_since_epoch, ValueType};
use crate::internal::error::{Error, Result};
use bytes::{BufMut, BytesMut};
use chrono::NaiveDateTime;

/// Largest finite 32-bit float; infinities and overflowing values saturate to it.
pub const FLOAT_CLAMP: f32 = f32::MAX;

pub fn write_none(buf: &mut BytesMut) {
    buf.put_u8(ValueType::None as u8);
}

pub fn write_bool(buf: &mut BytesMut, v: bool) {
    let tag = if v { ValueType::True } else { ValueType::False };
    buf.put_u8(tag as u8);
}

/// Picks the narrowest integer tag for `n` and writes it big-endian.
///
/// Non-negative numbers always use the unsigned tags and negative numbers the
/// signed ones, so every integer has exactly one encoding.
pub fn write_integer(buf: &mut BytesMut, n: i128) {
    let tag = integer_tag(n);
    buf.put_u8(tag as u8);
    match tag {
        ValueType::UInt8 => buf.put_u8(n as u8),
        ValueType::UInt16 => buf.put_u16(n as u16),
        ValueType::UInt32 => buf.put_u32(n as u32),
        ValueType::UInt64 => buf.put_u64(n as u64),
        ValueType::Int8 => buf.put_i8(n as i8),
        ValueType::Int16 => buf.put_i16(n as i16),
        ValueType::Int32 => buf.put_i32(n as i32),
        _ => buf.put_i64(n as i64),
    }
}

pub fn integer_tag(n: i128) -> ValueType {
    if n >= 0 {
        if n < 0x100 {
            ValueType::UInt8
        } else if n < 0x1_0000 {
            ValueType::UInt16
        } else if n < 0x1_0000_0000 {
            ValueType::UInt32
        } else {
            ValueType::UInt64
        }
    } else if n >= -0x80 {
        ValueType::Int8
    } else if n >= -0x8000 {
        ValueType::Int16
    } else if n >= -0x8000_0000 {
        ValueType::Int32
    } else {
        ValueType::Int64
    }
}

/// Encoded size of an integer, tag included.
pub fn integer_len(n: i128) -> usize {
    1 + match integer_tag(n) {
        ValueType::UInt8 | ValueType::Int8 => 1,
        ValueType::UInt16 | ValueType::Int16 => 2,
        ValueType::UInt32 | ValueType::Int32 => 4,
        _ => 8,
    }
}

/// Narrows to binary32, saturating anything that would become infinite.
pub fn narrow_float(v: f64) -> f32 {
    let narrowed = v as f32;
    if narrowed.is_infinite() {
        FLOAT_CLAMP.copysign(narrowed)
    } else {
        narrowed
    }
}

/// Floats are always written as 32-bit, whatever the input precision.
pub fn write_float(buf: &mut BytesMut, v: f64) {
    buf.put_u8(ValueType::Float32 as u8);
    buf.put_f32(narrow_float(v));
}

/// Whole seconds since the epoch, if they fit the 32-bit wire field.
pub fn datetime_seconds(dt: &NaiveDateTime) -> Result<i32> {
    let secs = seconds_since_epoch(dt);
    i32::try_from(secs).map_err(|_| {
        Error::UnsupportedValue(format!(
            "timestamp {} is {} seconds from the epoch, outside the 32-bit range",
            dt, secs
        ))
    })
}

pub fn write_datetime(buf: &mut BytesMut, dt: &NaiveDateTime) -> Result<()> {
    let secs = datetime_seconds(dt)?;
    buf.put_u8(ValueType::DateTime as u8);
    buf.put_i32(secs);
    Ok(())
}
