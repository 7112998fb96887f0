//! Artwork image pipeline: decode, bound the dimensions, re-encode as WebP.

use std::io::Cursor;

use image::{DynamicImage, ImageFormat, imageops::FilterType};
use thiserror::Error;

/// Errors that can occur while processing an upload.
#[derive(Debug, Error)]
pub enum ImageError {
    /// The upload could not be decoded or re-encoded.
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
}

/// Re-encode an uploaded image as WebP, bounding its longest edge.
///
/// # Errors
///
/// Returns `ImageError` if the input cannot be decoded or the WebP encode
/// fails.
pub fn compress_to_webp(bytes: &[u8], max_dimension: u32) -> Result<Vec<u8>, ImageError> {
    let img = image::load_from_memory(bytes)?;

    let img = if img.width().max(img.height()) > max_dimension {
        img.resize(max_dimension, max_dimension, FilterType::Lanczos3)
    } else {
        img
    };

    // The WebP encoder takes RGB8/RGBA8 input.
    let img = DynamicImage::ImageRgba8(img.to_rgba8());

    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, ImageFormat::WebP)?;
    Ok(out.into_inner())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use image::RgbaImage;

    use super::*;

    fn png_fixture(width: u32, height: u32) -> Vec<u8> {
        let img = RgbaImage::from_pixel(width, height, image::Rgba([120, 80, 40, 255]));
        let mut out = Cursor::new(Vec::new());
        DynamicImage::ImageRgba8(img)
            .write_to(&mut out, ImageFormat::Png)
            .unwrap();
        out.into_inner()
    }

    #[test]
    fn test_output_is_webp() {
        let png = png_fixture(8, 8);
        let webp = compress_to_webp(&png, 1600).unwrap();
        assert_eq!(webp.get(0..4), Some(b"RIFF".as_slice()));
        assert_eq!(webp.get(8..12), Some(b"WEBP".as_slice()));
    }

    #[test]
    fn test_oversized_images_are_bounded() {
        let png = png_fixture(64, 32);
        let webp = compress_to_webp(&png, 16).unwrap();
        let decoded = image::load_from_memory(&webp).unwrap();
        assert!(decoded.width().max(decoded.height()) <= 16);
        // Aspect ratio is preserved.
        assert_eq!(decoded.width(), 16);
        assert_eq!(decoded.height(), 8);
    }

    #[test]
    fn test_small_images_keep_their_size() {
        let png = png_fixture(10, 6);
        let webp = compress_to_webp(&png, 1600).unwrap();
        let decoded = image::load_from_memory(&webp).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (10, 6));
    }

    #[test]
    fn test_garbage_input_is_rejected() {
        assert!(compress_to_webp(b"not an image", 1600).is_err());
    }
}
