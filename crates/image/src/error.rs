//! Error types for the image crate.

use thiserror::Error;

/// Result type alias for image operations.
pub type Result<T> = std::result::Result<T, ImageError>;

/// Errors that can occur while detecting, peeking, or decoding images.
#[derive(Debug, Error)]
pub enum ImageError {
    /// Data matches no supported image format
    #[error("unknown image format")]
    UnknownFormat,

    /// `decode` called on an already decoded image
    #[error("image already decoded")]
    AlreadyDecoded,

    /// Decoded pixels or shape requested before `decode`
    #[error("image not decoded, call decode() first")]
    NotDecoded,

    /// Header too short or malformed
    #[error("invalid image header: {0}")]
    InvalidHeader(String),

    /// Full decode failed
    #[error("decode failed: {0}")]
    DecodeFailed(#[from] image::ImageError),
}
