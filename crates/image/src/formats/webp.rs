//! WebP codec. The RIFF container may carry a lossy `VP8 `, lossless
//! `VP8L`, or extended `VP8X` bitstream; each stores its dimensions
//! differently.

use std::sync::Arc;

use crate::formats::{decode_with, FormatCodec};
use crate::{ImageColorType, ImageError, Result, Shape};

pub(crate) struct WebPCodec;

impl FormatCodec for WebPCodec {
    fn peek_shape(&self, data: &[u8]) -> Result<Shape> {
        peek_webp_shape(data)
    }

    fn decode(&self, color_type: ImageColorType, data: &[u8]) -> Result<(Arc<[u8]>, Shape)> {
        decode_with(image::ImageFormat::WebP, color_type, data)
    }
}

fn peek_webp_shape(data: &[u8]) -> Result<Shape> {
    if data.len() < 30 {
        return Err(ImageError::InvalidHeader(
            "WebP data shorter than the bitstream header".into(),
        ));
    }

    match &data[12..16] {
        // Lossy: key frame start code, then 14-bit dimensions
        b"VP8 " => {
            if data[23] != 0x9D || data[24] != 0x01 || data[25] != 0x2A {
                return Err(ImageError::InvalidHeader(
                    "missing VP8 key frame start code".into(),
                ));
            }
            let width = (u16::from_le_bytes([data[26], data[27]]) & 0x3FFF) as u32;
            let height = (u16::from_le_bytes([data[28], data[29]]) & 0x3FFF) as u32;
            Ok(Shape::new(height, width, 3))
        }
        // Lossless: 14-bit minus-one dimensions and an alpha bit
        b"VP8L" => {
            if data[20] != 0x2F {
                return Err(ImageError::InvalidHeader("missing VP8L signature".into()));
            }
            let bits = u32::from_le_bytes([data[21], data[22], data[23], data[24]]);
            let width = (bits & 0x3FFF) + 1;
            let height = ((bits >> 14) & 0x3FFF) + 1;
            let channels = if (bits >> 28) & 1 == 1 { 4 } else { 3 };
            Ok(Shape::new(height, width, channels))
        }
        // Extended: 24-bit minus-one canvas size, alpha in the flags byte
        b"VP8X" => {
            let channels = if data[20] & 0x10 != 0 { 4 } else { 3 };
            let width = 1 + u32::from_le_bytes([data[24], data[25], data[26], 0]);
            let height = 1 + u32::from_le_bytes([data[27], data[28], data[29], 0]);
            Ok(Shape::new(height, width, channels))
        }
        _ => Err(ImageError::InvalidHeader("unknown WebP bitstream tag".into())),
    }
}
