use crate::codec::cursor::Cursor;
use crate::codec::types::{from_epoch_seconds, Value};
use crate::internal::error::Result;

/// Decodes an Int8 payload.
pub fn read_i8(cursor: &mut Cursor<'_>) -> Result<Value> {
    Ok(Value::Int8(cursor.read_byte()? as i8))
}

/// Decodes a UInt8 payload.
pub fn read_u8(cursor: &mut Cursor<'_>) -> Result<Value> {
    Ok(Value::UInt8(cursor.read_byte()?))
}

pub fn read_i16(cursor: &mut Cursor<'_>) -> Result<Value> {
    Ok(Value::Int16(cursor.read_i16()?))
}

pub fn read_u16(cursor: &mut Cursor<'_>) -> Result<Value> {
    Ok(Value::UInt16(cursor.read_u16()?))
}

pub fn read_i32(cursor: &mut Cursor<'_>) -> Result<Value> {
    Ok(Value::Int32(cursor.read_i32()?))
}

pub fn read_u32(cursor: &mut Cursor<'_>) -> Result<Value> {
    Ok(Value::UInt32(cursor.read_u32()?))
}

pub fn read_i64(cursor: &mut Cursor<'_>) -> Result<Value> {
    Ok(Value::Int64(cursor.read_i64()?))
}

pub fn read_u64(cursor: &mut Cursor<'_>) -> Result<Value> {
    Ok(Value::UInt64(cursor.read_u64()?))
}

pub fn read_f32(cursor: &mut Cursor<'_>) -> Result<Value> {
    Ok(Value::Float32(cursor.read_f32()?))
}

/// Never produced by the encoder, but accepted on input.
pub fn read_f64(cursor: &mut Cursor<'_>) -> Result<Value> {
    Ok(Value::Float64(cursor.read_f64()?))
}

/// Decodes signed whole seconds relative to the local epoch.
pub fn read_datetime(cursor: &mut Cursor<'_>) -> Result<Value> {
    let secs = cursor.read_i32()?;
    Ok(Value::DateTime(from_epoch_seconds(secs)))
}
