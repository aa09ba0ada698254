// Limits applied by the encoder and decoder.

/// Maximum container nesting accepted by default.
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Options for [`Encoder`](crate::codec::encode::Encoder).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodeOptions {
    /// Deepest array/map nesting the encoder will walk.
    pub max_depth: usize,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        EncodeOptions { max_depth: DEFAULT_MAX_DEPTH }
    }
}

impl EncodeOptions {
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

/// Options for [`Decoder`](crate::codec::decode::Decoder).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Deepest array/map nesting accepted from the input.
    pub max_depth: usize,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        DecodeOptions { max_depth: DEFAULT_MAX_DEPTH }
    }
}

impl DecodeOptions {
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}
