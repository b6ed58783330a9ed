//! Error types shared by the encryption core.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("ciphertext length {len} is not a positive multiple of 16 bytes")]
    InvalidCiphertext { len: usize },

    #[error("decrypted padding is malformed")]
    InvalidPadding,

    #[error("internal error: {0}")]
    Internal(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
