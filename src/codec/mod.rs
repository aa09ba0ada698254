// Codec module for the tagpack binary value format

pub mod cursor;
pub mod decode;
pub mod encode;
pub mod options;
pub mod types;
