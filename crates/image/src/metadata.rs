//! Image metadata extraction.

use serde::{Deserialize, Serialize};

use crate::formats::codec_for;
use crate::{detect_format, ImageFormat};

/// Header-level description of an encoded image.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageMetadata {
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// Channels stored in the file
    pub channels: u32,
    /// Detected format
    pub format: ImageFormat,
    /// Encoded size in bytes
    pub size_bytes: usize,
}

impl ImageMetadata {
    /// Calculate aspect ratio (width / height).
    pub fn aspect_ratio(&self) -> f64 {
        self.width as f64 / self.height as f64
    }

    /// Check if image is landscape orientation.
    pub fn is_landscape(&self) -> bool {
        self.width > self.height
    }

    /// Check if image is portrait orientation.
    pub fn is_portrait(&self) -> bool {
        self.height > self.width
    }

    /// Check if image is square.
    pub fn is_square(&self) -> bool {
        self.width == self.height
    }
}

/// Extract metadata from encoded image data.
///
/// Detects the format from magic bytes, then reads the geometry from the
/// header alone; the body is never decoded.
pub fn extract_metadata(data: &[u8]) -> Option<ImageMetadata> {
    let format = detect_format(data).ok()?;
    let shape = codec_for(format).peek_shape(data).ok()?;

    Some(ImageMetadata {
        width: shape.width,
        height: shape.height,
        channels: shape.channels,
        format,
        size_bytes: data.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, ImageOutputFormat, RgbImage};
    use std::io::Cursor;

    fn encoded_png(width: u32, height: u32) -> Vec<u8> {
        let img = DynamicImage::ImageRgb8(RgbImage::new(width, height));
        let mut buffer = Cursor::new(Vec::new());
        img.write_to(&mut buffer, ImageOutputFormat::Png).unwrap();
        buffer.into_inner()
    }

    #[test]
    fn extracts_from_encoded_png() {
        let data = encoded_png(16, 9);
        let meta = extract_metadata(&data).unwrap();
        assert_eq!(meta.width, 16);
        assert_eq!(meta.height, 9);
        assert_eq!(meta.channels, 3);
        assert_eq!(meta.format, ImageFormat::Png);
        assert_eq!(meta.size_bytes, data.len());
    }

    #[test]
    fn garbage_yields_none() {
        assert!(extract_metadata(&[0u8; 32]).is_none());
    }

    #[test]
    fn orientation_helpers() {
        let landscape = extract_metadata(&encoded_png(16, 9)).unwrap();
        let portrait = extract_metadata(&encoded_png(9, 16)).unwrap();
        let square = extract_metadata(&encoded_png(8, 8)).unwrap();

        assert!(landscape.is_landscape());
        assert!(!landscape.is_portrait());
        assert!((landscape.aspect_ratio() - 16.0 / 9.0).abs() < 0.01);

        assert!(portrait.is_portrait());
        assert!(!portrait.is_landscape());

        assert!(square.is_square());
    }

    #[test]
    fn serializes_to_json() {
        let meta = extract_metadata(&encoded_png(4, 3)).unwrap();
        let json = serde_json::to_string(&meta).unwrap();
        assert!(json.contains("\"format\":\"png\""));
        let back: ImageMetadata = serde_json::from_str(&json).unwrap();
        assert_eq!(back.width, meta.width);
        assert_eq!(back.height, meta.height);
    }
}
