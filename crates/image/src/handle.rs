//! Lazily decoded image handles.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::formats::codec_for;
use crate::{detect_format, ImageError, ImageFormat, Result};

/// Desired color interpretation of the decoded pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageColorType {
    /// Interleaved 8-bit RGB
    #[default]
    Rgb,
    /// Interleaved 8-bit BGR
    Bgr,
    /// Single-channel 8-bit luminance
    Gray,
}

impl ImageColorType {
    /// Number of channels in a decoded buffer of this color type.
    pub fn channels(&self) -> u32 {
        match self {
            ImageColorType::Rgb | ImageColorType::Bgr => 3,
            ImageColorType::Gray => 1,
        }
    }
}

/// Pixel geometry of an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shape {
    /// Rows of pixels
    pub height: u32,
    /// Columns of pixels
    pub width: u32,
    /// Interleaved channels per pixel
    pub channels: u32,
}

impl Shape {
    /// Construct a shape from height, width, and channel count.
    pub fn new(height: u32, width: u32, channels: u32) -> Self {
        Shape {
            height,
            width,
            channels,
        }
    }

    /// Total element count, which for 8-bit buffers is also the byte count.
    pub fn num_elements(&self) -> usize {
        self.height as usize * self.width as usize * self.channels as usize
    }

    /// Same geometry with the channel count replaced.
    pub(crate) fn with_channels(self, channels: u32) -> Self {
        Shape { channels, ..self }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}x{}", self.height, self.width, self.channels)
    }
}

/// Decode progress of an [`Image`]. The transition is one-way.
#[derive(Debug)]
enum DecodeState {
    Pending,
    Decoded { buffer: Arc<[u8]>, shape: Shape },
}

/// A lazily decoded image over a borrowed encoded buffer.
///
/// The handle never copies the encoded bytes; the backing buffer must stay
/// alive for as long as the handle does. `decode` runs at most once per
/// handle, and the decoded pixels are handed out as a shared `Arc<[u8]>` so
/// consumers can outlive the handle itself.
#[derive(Debug)]
pub struct Image<'a> {
    data: &'a [u8],
    format: ImageFormat,
    color_type: ImageColorType,
    state: DecodeState,
}

impl<'a> Image<'a> {
    /// Wrap an encoded buffer, detecting the format from its magic bytes.
    pub fn new(data: &'a [u8], color_type: ImageColorType) -> Result<Self> {
        let format = detect_format(data)?;
        Ok(Self::with_format(data, format, color_type))
    }

    /// Wrap an encoded buffer whose format is already known.
    pub fn with_format(data: &'a [u8], format: ImageFormat, color_type: ImageColorType) -> Self {
        Image {
            data,
            format,
            color_type,
            state: DecodeState::Pending,
        }
    }

    /// Decode the image through its format codec.
    ///
    /// Runs exactly once per handle; a second call is an error, not a
    /// silent re-decode. Codec failures propagate unchanged.
    pub fn decode(&mut self) -> Result<()> {
        if let DecodeState::Decoded { .. } = self.state {
            return Err(ImageError::AlreadyDecoded);
        }
        let (buffer, shape) = codec_for(self.format).decode(self.color_type, self.data)?;
        self.state = DecodeState::Decoded { buffer, shape };
        Ok(())
    }

    /// The decoded pixel buffer, shared without copying.
    pub fn pixels(&self) -> Result<Arc<[u8]>> {
        match &self.state {
            DecodeState::Decoded { buffer, .. } => Ok(Arc::clone(buffer)),
            DecodeState::Pending => Err(ImageError::NotDecoded),
        }
    }

    /// The shape recorded by [`Image::decode`].
    pub fn shape(&self) -> Result<Shape> {
        match &self.state {
            DecodeState::Decoded { shape, .. } => Ok(*shape),
            DecodeState::Pending => Err(ImageError::NotDecoded),
        }
    }

    /// Read the shape from the encoded header without decoding.
    ///
    /// Works in either state and never mutates the handle. Only the header
    /// has to be intact; the body may be truncated or corrupt. The channel
    /// count follows the requested color type, so the result equals what
    /// [`Image::shape`] reports after a decode of the same bytes.
    pub fn peek_shape(&self) -> Result<Shape> {
        let native = codec_for(self.format).peek_shape(self.data)?;
        Ok(native.with_channels(self.color_type.channels()))
    }

    /// Detected (or caller-supplied) encoded format.
    pub fn format(&self) -> ImageFormat {
        self.format
    }

    /// Requested output color interpretation.
    pub fn color_type(&self) -> ImageColorType {
        self.color_type
    }

    /// Whether `decode` has completed.
    pub fn is_decoded(&self) -> bool {
        matches!(self.state, DecodeState::Decoded { .. })
    }

    /// The borrowed encoded bytes.
    pub fn encoded(&self) -> &'a [u8] {
        self.data
    }
}
