//! tagpack: a self-describing tagged binary value codec.
//!
//! Every encoded value starts with a tag byte naming its type and payload
//! layout, so [`decode`] needs no schema:
//!
//! ```
//! use tagpack::{decode, encode, Value};
//!
//! let value = Value::map([
//!     (Value::from("a"), Value::from(1u8)),
//!     (Value::from("b"), Value::Array(vec![1u8.into(), 2u8.into(), 3u8.into()])),
//! ]);
//! let bytes = encode(&value).unwrap();
//! assert_eq!(decode(&bytes).unwrap(), value);
//! ```

pub mod codec;
pub mod internal;

pub use codec::decode::{decode, decode_at, decode_with, Decoder};
pub use codec::encode::{encode, encode_into, encoded_len, Encoder};
pub use codec::options::{DecodeOptions, EncodeOptions, DEFAULT_MAX_DEPTH};
pub use codec::types::{Value, ValueType, WidthClass};
pub use internal::error::{Error, Result};
