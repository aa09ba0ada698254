use bytes::Bytes;
use chrono::{DateTime, Local, NaiveDateTime, Offset, TimeDelta, TimeZone};
use std::fmt;

/// A dynamically-typed value understood by the codec.
///
/// Integer variants all live in one numeric domain (`i64::MIN..=u64::MAX`);
/// the encoder ignores which variant was used and picks the narrowest wire
/// width for the number itself. Likewise `Float64` is always narrowed to a
/// 32-bit float on the wire. Equality follows the same rule: it compares
/// numbers, not widths.
#[derive(Debug, Clone)]
pub enum Value {
    None,
    Bool(bool),
    Int8(i8),
    UInt8(u8),
    Int16(i16),
    UInt16(u16),
    Int32(i32),
    UInt32(u32),
    Int64(i64),
    UInt64(u64),
    Float32(f32),
    Float64(f64),
    String(String),
    Binary(Bytes),
    /// Local wall-clock time, stored with whole-second precision.
    DateTime(NaiveDateTime),
    Array(Vec<Value>),
    /// Pairs in insertion order. Keys may repeat; the last one wins on lookup.
    Map(Vec<(Value, Value)>),
}

impl Value {
    /// Builds a `Binary` value.
    pub fn binary(data: impl Into<Bytes>) -> Self {
        Value::Binary(data.into())
    }

    /// Builds a `Map` value from pairs, keeping their order.
    pub fn map<K, V, I>(pairs: I) -> Self
    where
        K: Into<Value>,
        V: Into<Value>,
        I: IntoIterator<Item = (K, V)>,
    {
        Value::Map(pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }

    /// The mathematical value of an integer variant.
    pub(crate) fn integer(&self) -> Option<i128> {
        match *self {
            Value::Int8(v) => Some(v.into()),
            Value::UInt8(v) => Some(v.into()),
            Value::Int16(v) => Some(v.into()),
            Value::UInt16(v) => Some(v.into()),
            Value::Int32(v) => Some(v.into()),
            Value::UInt32(v) => Some(v.into()),
            Value::Int64(v) => Some(v.into()),
            Value::UInt64(v) => Some(v.into()),
            _ => None,
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Value::None)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match *self {
            Value::Bool(b) => Some(b),
            _ => None,
        }
    }

    /// Returns the integer if it fits in an `i64`, whatever its variant.
    pub fn as_i64(&self) -> Option<i64> {
        self.integer().and_then(|v| i64::try_from(v).ok())
    }

    /// Returns the integer if it fits in a `u64`, whatever its variant.
    pub fn as_u64(&self) -> Option<u64> {
        self.integer().and_then(|v| u64::try_from(v).ok())
    }

    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            Value::Float32(v) => Some(v.into()),
            Value::Float64(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&Bytes> {
        match self {
            Value::Binary(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_datetime(&self) -> Option<&NaiveDateTime> {
        match self {
            Value::DateTime(dt) => Some(dt),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&[(Value, Value)]> {
        match self {
            Value::Map(pairs) => Some(pairs),
            _ => None,
        }
    }

    /// Looks up `key` in a map. When the key repeats, the last pair wins.
    pub fn get(&self, key: &Value) -> Option<&Value> {
        self.as_map()?
            .iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    /// Map pairs with duplicate keys collapsed: each key keeps the position
    /// of its first occurrence and the value of its last.
    pub fn lookup_entries(&self) -> Vec<(&Value, &Value)> {
        let mut entries: Vec<(&Value, &Value)> = Vec::new();
        for (key, value) in self.as_map().unwrap_or_default() {
            match entries.iter().position(|(k, _)| *k == key) {
                Some(i) => entries[i].1 = value,
                None => entries.push((key, value)),
            }
        }
        entries
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::None, Value::None) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Binary(a), Value::Binary(b)) => a == b,
            (Value::DateTime(a), Value::DateTime(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => a == b,
            (Value::Map(a), Value::Map(b)) => a == b,
            _ => match (self.integer(), other.integer()) {
                (Some(a), Some(b)) => a == b,
                _ => match (self.as_f64(), other.as_f64()) {
                    (Some(a), Some(b)) => a == b,
                    _ => false,
                },
            },
        }
    }
}

macro_rules! impl_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Value::$variant(v)
                }
            }
        )*
    };
}

impl_from! {
    bool => Bool,
    i8 => Int8,
    u8 => UInt8,
    i16 => Int16,
    u16 => UInt16,
    i32 => Int32,
    u32 => UInt32,
    i64 => Int64,
    u64 => UInt64,
    f32 => Float32,
    f64 => Float64,
    String => String,
    Bytes => Binary,
    NaiveDateTime => DateTime,
    Vec<Value> => Array,
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_owned())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::None, Into::into)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::None => f.write_str("null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Float32(v) => write!(f, "{}", v),
            Value::Float64(v) => write!(f, "{}", v),
            Value::String(s) => write!(f, "{:?}", s),
            Value::Binary(b) => {
                f.write_str("0x")?;
                for byte in b.iter() {
                    write!(f, "{:02x}", byte)?;
                }
                Ok(())
            }
            Value::DateTime(dt) => write!(f, "@{}", dt.format("%Y-%m-%dT%H:%M:%S")),
            Value::Array(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                f.write_str("]")
            }
            Value::Map(pairs) => {
                f.write_str("{")?;
                for (i, (k, v)) in pairs.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}: {}", k, v)?;
                }
                f.write_str("}")
            }
            // Remaining variants are integers.
            other => match other.integer() {
                Some(n) => write!(f, "{}", n),
                None => Ok(()),
            },
        }
    }
}

/// Wire tag for each value layout.
#[repr(u8)]
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum ValueType {
    None = 0x01,
    True = 0x02,
    False = 0x03,

    Int8 = 0x10,
    UInt8 = 0x11,
    Int16 = 0x12,
    UInt16 = 0x13,
    Int32 = 0x14,
    UInt32 = 0x15,
    Int64 = 0x16,
    UInt64 = 0x17,

    Float32 = 0x20,
    Float64 = 0x21, // decode only

    String8 = 0x30,
    String16 = 0x31,
    String32 = 0x32,

    Binary8 = 0x33,
    Binary16 = 0x34,
    Binary32 = 0x35,

    DateTime = 0x40,

    Array8 = 0x50,
    Array16 = 0x51,
    Array32 = 0x52,

    Map8 = 0x60,
    Map16 = 0x61,
    Map32 = 0x62,
}

impl ValueType {
    /// Converts a tag byte into a ValueType.
    pub fn from_byte(byte: u8) -> Option<Self> {
        use ValueType::*;
        let ty = match byte {
            0x01 => None,
            0x02 => True,
            0x03 => False,
            0x10 => Int8,
            0x11 => UInt8,
            0x12 => Int16,
            0x13 => UInt16,
            0x14 => Int32,
            0x15 => UInt32,
            0x16 => Int64,
            0x17 => UInt64,
            0x20 => Float32,
            0x21 => Float64,
            0x30 => String8,
            0x31 => String16,
            0x32 => String32,
            0x33 => Binary8,
            0x34 => Binary16,
            0x35 => Binary32,
            0x40 => DateTime,
            0x50 => Array8,
            0x51 => Array16,
            0x52 => Array32,
            0x60 => Map8,
            0x61 => Map16,
            0x62 => Map32,
            _ => return Option::None,
        };
        Some(ty)
    }

    /// Width of the count prefix for length-prefixed tags.
    pub fn width_class(self) -> Option<WidthClass> {
        use ValueType::*;
        match self {
            String8 | Binary8 | Array8 | Map8 => Some(WidthClass::W8),
            String16 | Binary16 | Array16 | Map16 => Some(WidthClass::W16),
            String32 | Binary32 | Array32 | Map32 => Some(WidthClass::W32),
            _ => Option::None,
        }
    }
}

/// Width of a length/count prefix.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum WidthClass {
    W8,
    W16,
    W32,
}

impl WidthClass {
    /// The narrowest width class that can hold `count`.
    pub fn for_count(count: usize) -> Self {
        if count < 0x100 {
            WidthClass::W8
        } else if count < 0x10000 {
            WidthClass::W16
        } else {
            WidthClass::W32
        }
    }

    /// Size of the prefix in bytes.
    pub fn prefix_len(self) -> usize {
        match self {
            WidthClass::W8 => 1,
            WidthClass::W16 => 2,
            WidthClass::W32 => 4,
        }
    }
}

/// Whole seconds from the local epoch (1970-01-01 00:00:00) to `dt`,
/// rounded toward negative infinity. Both ends are resolved to instants in
/// the process's local time zone before subtracting.
pub fn seconds_since_epoch(dt: &NaiveDateTime) -> i64 {
    seconds_since_epoch_in(&Local, dt)
}

/// The local time `secs` seconds after the local epoch.
pub fn from_epoch_seconds(secs: i32) -> NaiveDateTime {
    from_epoch_seconds_in(&Local, secs)
}

/// [`seconds_since_epoch`] against an explicit time zone.
pub fn seconds_since_epoch_in<Tz: TimeZone>(tz: &Tz, dt: &NaiveDateTime) -> i64 {
    instant_of(tz, dt) - instant_of(tz, &local_epoch())
}

/// [`from_epoch_seconds`] against an explicit time zone.
pub fn from_epoch_seconds_in<Tz: TimeZone>(tz: &Tz, secs: i32) -> NaiveDateTime {
    let instant = instant_of(tz, &local_epoch()) + i64::from(secs);
    match DateTime::from_timestamp(instant, 0) {
        Some(utc) => tz.from_utc_datetime(&utc.naive_utc()).naive_local(),
        None => NaiveDateTime::MIN,
    }
}

fn local_epoch() -> NaiveDateTime {
    // 1970-01-01 00:00:00
    NaiveDateTime::default()
}

/// Unix seconds (floored) of the wall time `dt` in `tz`.
///
/// A repeated wall time resolves to its earlier instant. A wall time
/// skipped by a forward transition uses the offset in force a day before,
/// so it lands past the gap by the gap's length.
fn instant_of<Tz: TimeZone>(tz: &Tz, dt: &NaiveDateTime) -> i64 {
    let offset = tz
        .offset_from_local_datetime(dt)
        .earliest()
        .or_else(|| {
            dt.checked_sub_signed(TimeDelta::days(1))
                .and_then(|before| tz.offset_from_local_datetime(&before).earliest())
        })
        .map_or(0, |offset| offset.fix().local_minus_utc());
    dt.and_utc().timestamp() - i64::from(offset)
}
