//! GIF codec: logical screen descriptor parse plus full decode.

use std::sync::Arc;

use crate::formats::{decode_with, FormatCodec};
use crate::{ImageColorType, ImageError, Result, Shape};

pub(crate) struct GifCodec;

impl FormatCodec for GifCodec {
    fn peek_shape(&self, data: &[u8]) -> Result<Shape> {
        peek_gif_shape(data)
    }

    fn decode(&self, color_type: ImageColorType, data: &[u8]) -> Result<(Arc<[u8]>, Shape)> {
        decode_with(image::ImageFormat::Gif, color_type, data)
    }
}

/// 6-byte signature, then the logical screen descriptor. Palette entries
/// are RGB, so the native channel count is 3.
fn peek_gif_shape(data: &[u8]) -> Result<Shape> {
    if data.len() < 10 {
        return Err(ImageError::InvalidHeader(
            "GIF data shorter than the screen descriptor".into(),
        ));
    }

    let width = u16::from_le_bytes([data[6], data[7]]) as u32;
    let height = u16::from_le_bytes([data[8], data[9]]) as u32;

    Ok(Shape::new(height, width, 3))
}
