// Decode module: tagged byte stream -> Value

pub mod basic;
pub mod complex;

use crate::codec::cursor::Cursor;
use crate::codec::options::DecodeOptions;
use crate::codec::types::{Value, ValueType, WidthClass};
use crate::internal::error::{Error, Result};
use tracing::{debug, trace};

/// Recursive-descent decoder driven entirely by tag bytes.
///
/// Each call builds its own [`Cursor`], so a decoder carries no state
/// between calls and can be shared freely.
#[derive(Debug, Clone, Copy, Default)]
pub struct Decoder {
    options: DecodeOptions,
}

impl Decoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: DecodeOptions) -> Self {
        Decoder { options }
    }

    /// Decodes the value at the start of `data`. Trailing bytes are ignored.
    pub fn decode(&self, data: &[u8]) -> Result<Value> {
        self.decode_at(data, 0).map(|(value, _)| value)
    }

    /// Decodes one value starting at `offset`.
    /// Returns the value and the offset just past it.
    pub fn decode_at(&self, data: &[u8], offset: usize) -> Result<(Value, usize)> {
        let mut cursor = Cursor::at(data, offset);
        let value = self
            .read_value(&mut cursor, 0)
            .inspect_err(|e| debug!(error = %e, offset, "decode failed"))?;
        let end = cursor.position();
        debug!(offset, consumed = end - offset, "decoded value");
        Ok((value, end))
    }

    fn enter(&self, depth: usize) -> Result<usize> {
        let depth = depth + 1;
        if depth > self.options.max_depth {
            return Err(Error::NestingTooDeep(self.options.max_depth));
        }
        Ok(depth)
    }

    /// Reads one tag byte and dispatches to the reader for exactly that tag.
    /// Length-prefixed tags take their prefix width from the tag itself.
    fn read_value(&self, cursor: &mut Cursor<'_>, depth: usize) -> Result<Value> {
        let tag = cursor.read_byte()?;
        let value_type = ValueType::from_byte(tag).ok_or(Error::UnknownTag(tag))?;

        if let Some(width) = value_type.width_class() {
            return match value_type {
                ValueType::String8 | ValueType::String16 | ValueType::String32 => {
                    complex::read_string(cursor, width)
                }
                ValueType::Binary8 | ValueType::Binary16 | ValueType::Binary32 => {
                    complex::read_binary(cursor, width)
                }
                ValueType::Array8 | ValueType::Array16 | ValueType::Array32 => {
                    self.read_array(cursor, width, depth)
                }
                ValueType::Map8 | ValueType::Map16 | ValueType::Map32 => {
                    self.read_map(cursor, width, depth)
                }
                _ => Err(Error::UnknownTag(tag)),
            };
        }

        let value = match value_type {
            ValueType::None => Value::None,
            ValueType::True => Value::Bool(true),
            ValueType::False => Value::Bool(false),

            ValueType::Int8 => basic::read_i8(cursor)?,
            ValueType::UInt8 => basic::read_u8(cursor)?,
            ValueType::Int16 => basic::read_i16(cursor)?,
            ValueType::UInt16 => basic::read_u16(cursor)?,
            ValueType::Int32 => basic::read_i32(cursor)?,
            ValueType::UInt32 => basic::read_u32(cursor)?,
            ValueType::Int64 => basic::read_i64(cursor)?,
            ValueType::UInt64 => basic::read_u64(cursor)?,

            ValueType::Float32 => basic::read_f32(cursor)?,
            ValueType::Float64 => basic::read_f64(cursor)?,

            ValueType::DateTime => basic::read_datetime(cursor)?,

            // Length-prefixed tags are handled above.
            _ => return Err(Error::UnknownTag(tag)),
        };
        Ok(value)
    }

    fn read_array(&self, cursor: &mut Cursor<'_>, width: WidthClass, depth: usize) -> Result<Value> {
        let depth = self.enter(depth)?;
        let count = complex::read_count(cursor, width)?;
        trace!(count, depth, "decoding array");

        let mut items = Vec::with_capacity(complex::capacity_hint(count, cursor.remaining(), 1));
        for _ in 0..count {
            items.push(self.read_value(cursor, depth)?);
        }
        Ok(Value::Array(items))
    }

    /// Pairs are kept in wire order, duplicates included.
    fn read_map(&self, cursor: &mut Cursor<'_>, width: WidthClass, depth: usize) -> Result<Value> {
        let depth = self.enter(depth)?;
        let count = complex::read_count(cursor, width)?;
        trace!(count, depth, "decoding map");

        let mut pairs = Vec::with_capacity(complex::capacity_hint(count, cursor.remaining(), 2));
        for _ in 0..count {
            let key = self.read_value(cursor, depth)?;
            let value = self.read_value(cursor, depth)?;
            pairs.push((key, value));
        }
        Ok(Value::Map(pairs))
    }
}

/// Decodes one value from the start of `data` with default options.
pub fn decode(data: &[u8]) -> Result<Value> {
    Decoder::new().decode(data)
}

/// Decodes one value starting at `offset` with default options.
pub fn decode_at(data: &[u8], offset: usize) -> Result<(Value, usize)> {
    Decoder::new().decode_at(data, offset)
}

/// Decodes one value from the start of `data` with the given options.
pub fn decode_with(data: &[u8], options: DecodeOptions) -> Result<Value> {
    Decoder::with_options(options).decode(data)
}
