use thiserror::Error;

/// Errors surfaced by the tagpack CLI.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("codec error: {0}")]
    Codec(#[from] tagpack::Error),

    #[error("invalid JSON input: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid hex input: {0}")]
    Hex(#[from] hex::FromHexError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
