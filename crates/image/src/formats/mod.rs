//! Per-format codecs behind a common two-operation trait.

mod bmp;
mod gif;
mod jpeg;
mod png;
mod webp;

use std::sync::Arc;

use image::{DynamicImage, GenericImageView};

use crate::{ImageColorType, ImageFormat, Result, Shape};

/// A format-specific decoder.
///
/// Implementations are stateless: both operations are pure functions of the
/// input bytes, treat the slice as the complete encoded payload, and must
/// not retain it beyond the call.
pub trait FormatCodec: Send + Sync {
    /// Parse only the header and return the geometry stored in the file,
    /// with the file's native channel count. Must not decode the body.
    fn peek_shape(&self, data: &[u8]) -> Result<Shape>;

    /// Decode the full payload and convert to `color_type`. The returned
    /// shape's channel count equals `color_type.channels()`.
    fn decode(&self, color_type: ImageColorType, data: &[u8]) -> Result<(Arc<[u8]>, Shape)>;
}

/// Codec for a detected format.
pub fn codec_for(format: ImageFormat) -> &'static dyn FormatCodec {
    match format {
        ImageFormat::Jpeg => &jpeg::JpegCodec,
        ImageFormat::Png => &png::PngCodec,
        ImageFormat::Gif => &gif::GifCodec,
        ImageFormat::WebP => &webp::WebPCodec,
        ImageFormat::Bmp => &bmp::BmpCodec,
    }
}

/// Shared decode tail: run the `image` crate with the format pinned, then
/// lay the pixels out per the requested color type.
pub(crate) fn decode_with(
    format: image::ImageFormat,
    color_type: ImageColorType,
    data: &[u8],
) -> Result<(Arc<[u8]>, Shape)> {
    let img = image::load_from_memory_with_format(data, format)?;
    Ok(convert(img, color_type))
}

fn convert(img: DynamicImage, color_type: ImageColorType) -> (Arc<[u8]>, Shape) {
    let (width, height) = img.dimensions();
    let shape = Shape::new(height, width, color_type.channels());
    let pixels: Vec<u8> = match color_type {
        ImageColorType::Rgb => img.into_rgb8().into_raw(),
        ImageColorType::Gray => img.into_luma8().into_raw(),
        ImageColorType::Bgr => {
            let mut raw = img.into_rgb8().into_raw();
            for px in raw.chunks_exact_mut(3) {
                px.swap(0, 2);
            }
            raw
        }
    };
    (pixels.into(), shape)
}
