// Encode module: Value -> tagged byte stream

pub mod basic;
pub mod complex;

use crate::codec::options::EncodeOptions;
use crate::codec::types::Value;
use crate::internal::error::{Error, Result};
use bytes::{Bytes, BytesMut};
use complex::LengthKind;
use tracing::debug;

/// Writes values in the narrowest wire form for each variant.
///
/// The encoder holds only its options, so one instance can be shared
/// across threads; every call owns its own output buffer.
#[derive(Debug, Clone, Copy, Default)]
pub struct Encoder {
    options: EncodeOptions,
}

impl Encoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: EncodeOptions) -> Self {
        Encoder { options }
    }

    /// Encodes `value` into a new buffer sized exactly to the output.
    pub fn encode(&self, value: &Value) -> Result<Bytes> {
        let len = self.encoded_len(value)?;
        let mut buf = BytesMut::with_capacity(len);
        self.write_value(value, &mut buf, 0)
            .inspect_err(|e| debug!(error = %e, "encode failed"))?;
        debug!(len = buf.len(), "encoded value");
        Ok(buf.freeze())
    }

    /// Appends the encoding of `value` to `buf`.
    ///
    /// On failure `buf` may hold a partial encoding; callers that reuse the
    /// buffer should truncate it back to its previous length.
    pub fn encode_into(&self, value: &Value, buf: &mut BytesMut) -> Result<()> {
        self.write_value(value, buf, 0)
            .inspect_err(|e| debug!(error = %e, "encode failed"))
    }

    /// Exact number of bytes `encode` would produce for `value`.
    pub fn encoded_len(&self, value: &Value) -> Result<usize> {
        self.value_len(value, 0)
    }

    fn enter(&self, depth: usize) -> Result<usize> {
        let depth = depth + 1;
        if depth > self.options.max_depth {
            return Err(Error::NestingTooDeep(self.options.max_depth));
        }
        Ok(depth)
    }

    fn write_value(&self, value: &Value, buf: &mut BytesMut, depth: usize) -> Result<()> {
        match value {
            Value::None => basic::write_none(buf),
            Value::Bool(b) => basic::write_bool(buf, *b),
            Value::Int8(v) => basic::write_integer(buf, i128::from(*v)),
            Value::UInt8(v) => basic::write_integer(buf, i128::from(*v)),
            Value::Int16(v) => basic::write_integer(buf, i128::from(*v)),
            Value::UInt16(v) => basic::write_integer(buf, i128::from(*v)),
            Value::Int32(v) => basic::write_integer(buf, i128::from(*v)),
            Value::UInt32(v) => basic::write_integer(buf, i128::from(*v)),
            Value::Int64(v) => basic::write_integer(buf, i128::from(*v)),
            Value::UInt64(v) => basic::write_integer(buf, i128::from(*v)),
            Value::Float32(v) => basic::write_float(buf, f64::from(*v)),
            Value::Float64(v) => basic::write_float(buf, *v),
            Value::String(s) => complex::write_string(buf, s)?,
            Value::Binary(b) => complex::write_binary(buf, b)?,
            Value::DateTime(dt) => basic::write_datetime(buf, dt)?,
            Value::Array(items) => {
                let depth = self.enter(depth)?;
                complex::write_header(buf, LengthKind::Array, items.len())?;
                for item in items {
                    self.write_value(item, buf, depth)?;
                }
            }
            Value::Map(pairs) => {
                let depth = self.enter(depth)?;
                complex::write_header(buf, LengthKind::Map, pairs.len())?;
                for (key, val) in pairs {
                    self.write_value(key, buf, depth)?;
                    self.write_value(val, buf, depth)?;
                }
            }
        }
        Ok(())
    }

    fn value_len(&self, value: &Value, depth: usize) -> Result<usize> {
        let len = match value {
            Value::None | Value::Bool(_) => 1,
            Value::Int8(v) => basic::integer_len(i128::from(*v)),
            Value::UInt8(v) => basic::integer_len(i128::from(*v)),
            Value::Int16(v) => basic::integer_len(i128::from(*v)),
            Value::UInt16(v) => basic::integer_len(i128::from(*v)),
            Value::Int32(v) => basic::integer_len(i128::from(*v)),
            Value::UInt32(v) => basic::integer_len(i128::from(*v)),
            Value::Int64(v) => basic::integer_len(i128::from(*v)),
            Value::UInt64(v) => basic::integer_len(i128::from(*v)),
            Value::Float32(_) | Value::Float64(_) => 5,
            Value::String(s) => complex::header_len(LengthKind::String, s.len())? + s.len(),
            Value::Binary(b) => complex::header_len(LengthKind::Binary, b.len())? + b.len(),
            Value::DateTime(dt) => {
                basic::datetime_seconds(dt)?;
                5
            }
            Value::Array(items) => {
                let depth = self.enter(depth)?;
                let mut len = complex::header_len(LengthKind::Array, items.len())?;
                for item in items {
                    len += self.value_len(item, depth)?;
                }
                len
            }
            Value::Map(pairs) => {
                let depth = self.enter(depth)?;
                let mut len = complex::header_len(LengthKind::Map, pairs.len())?;
                for (key, val) in pairs {
                    len += self.value_len(key, depth)? + self.value_len(val, depth)?;
                }
                len
            }
        };
        Ok(len)
    }
}

/// Encodes `value` with default options.
pub fn encode(value: &Value) -> Result<Bytes> {
    Encoder::new().encode(value)
}

/// Appends the encoding of `value` to `buf` with default options.
pub fn encode_into(value: &Value, buf: &mut BytesMut) -> Result<()> {
    Encoder::new().encode_into(value, buf)
}

/// Exact encoded size of `value` with default options.
pub fn encoded_len(value: &Value) -> Result<usize> {
    Encoder::new().encoded_len(value)
}
