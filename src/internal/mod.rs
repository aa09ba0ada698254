// Crate-internal building blocks shared by the codec

pub mod error;
