//! JPEG codec: start-of-frame header scan plus full decode.

use std::sync::Arc;

use crate::formats::{decode_with, FormatCodec};
use crate::{ImageColorType, ImageError, Result, Shape};

pub(crate) struct JpegCodec;

impl FormatCodec for JpegCodec {
    fn peek_shape(&self, data: &[u8]) -> Result<Shape> {
        peek_jpeg_shape(data)
    }

    fn decode(&self, color_type: ImageColorType, data: &[u8]) -> Result<(Arc<[u8]>, Shape)> {
        decode_with(image::ImageFormat::Jpeg, color_type, data)
    }
}

/// Walk the marker stream until a SOF segment; height, width, and component
/// count sit at fixed offsets inside it.
fn peek_jpeg_shape(data: &[u8]) -> Result<Shape> {
    // Skip SOI marker
    let mut i = 2;

    while i + 9 < data.len() {
        if data[i] != 0xFF {
            i += 1;
            continue;
        }

        let marker = data[i + 1];

        // SOF markers contain dimensions
        if matches!(marker, 0xC0..=0xC3 | 0xC5..=0xC7 | 0xC9..=0xCB | 0xCD..=0xCF) {
            let height = u16::from_be_bytes([data[i + 5], data[i + 6]]) as u32;
            let width = u16::from_be_bytes([data[i + 7], data[i + 8]]) as u32;
            let channels = data[i + 9] as u32;
            return Ok(Shape::new(height, width, channels));
        }

        // Standalone markers have no length field
        if marker == 0xD8 || marker == 0xD9 || (0xD0..=0xD7).contains(&marker) {
            i += 2;
        } else if i + 3 < data.len() {
            let length = u16::from_be_bytes([data[i + 2], data[i + 3]]) as usize;
            i += 2 + length;
        } else {
            break;
        }
    }

    Err(ImageError::InvalidHeader(
        "no JPEG frame header found".into(),
    ))
}
