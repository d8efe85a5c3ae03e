//! Image preview decoding.
//!
//! The upload hint is "image/*" but nothing is hard-validated: any file
//! can be selected, and decoding is best-effort. A file that fails to
//! decode simply has no preview; the lookup itself only needs the name.

use crate::error::{AppError, Result};
use image::DynamicImage;
use std::path::Path;

/// Decodes raw file bytes into a displayable image.
pub fn decode_preview(bytes: &[u8]) -> Result<DynamicImage> {
    image::load_from_memory(bytes)
        .map_err(|e| AppError::preview(format!("Failed to decode image: {}", e)))
}

/// Reads a file from disk and decodes it into a displayable image.
pub fn load_preview(path: impl AsRef<Path>) -> Result<DynamicImage> {
    let bytes = std::fs::read(path)?;
    decode_preview(&bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn garbage_bytes_fail_to_decode() {
        let result = decode_preview(b"definitely not an image");
        assert!(matches!(result, Err(AppError::Preview(_))));
    }

    #[test]
    fn png_bytes_decode() {
        // Encode a tiny image in-process rather than shipping a fixture.
        let img = DynamicImage::new_rgb8(4, 4);
        let mut bytes = Vec::new();
        img.write_to(
            &mut std::io::Cursor::new(&mut bytes),
            image::ImageFormat::Png,
        )
        .unwrap();

        let decoded = decode_preview(&bytes).unwrap();
        assert_eq!(decoded.width(), 4);
        assert_eq!(decoded.height(), 4);
    }
}
