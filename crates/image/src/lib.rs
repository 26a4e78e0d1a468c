//! Image-decoding front-end for Pixelpipe.
//!
//! This crate provides:
//! - Path-based classification of supported image files
//! - Format detection from magic bytes
//! - A lazily decoded, decode-once [`Image`] handle over borrowed bytes
//! - Header-only shape peeks and metadata extraction
//! - Per-format codecs behind a common trait

#![warn(missing_docs)]

mod classify;
mod detect;
mod error;
pub mod formats;
mod handle;
mod metadata;

pub use classify::{
    classify_path, has_supported_extension, supported_extensions_list, PathClass,
    KNOWN_EXTENSIONS, SKIP_PATHS,
};
pub use detect::{detect_format, ImageFormat};
pub use error::{ImageError, Result};
pub use formats::{codec_for, FormatCodec};
pub use handle::{Image, ImageColorType, Shape};
pub use metadata::{extract_metadata, ImageMetadata};
