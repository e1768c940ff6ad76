// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Page: one decoded raster unit of a document (an image file, or one
// rasterised PDF page), plus image encoding helpers for writing artifacts.

use std::path::Path;

use blackbar_core::error::{BlackbarError, Result};
use image::{DynamicImage, ImageFormat};
use tracing::{info, instrument};

/// A decoded raster image with its 1-based position in the document.
///
/// Pages are never mutated; the renderer produces a fresh image from one.
#[derive(Debug, Clone)]
pub struct Page {
    index: usize,
    image: DynamicImage,
}

impl Page {
    // -- Construction ---------------------------------------------------------

    /// Decode a single-page document from an image file.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let img = image::open(path.as_ref()).map_err(|err| {
            BlackbarError::ImageError(format!(
                "failed to open {}: {}",
                path.as_ref().display(),
                err
            ))
        })?;
        info!(width = img.width(), height = img.height(), "Image loaded");
        Ok(Self { index: 1, image: img })
    }

    /// Wrap an already-decoded `DynamicImage`.
    pub fn from_dynamic(index: usize, image: DynamicImage) -> Self {
        Self { index, image }
    }

    // -- Accessors ------------------------------------------------------------

    /// 1-based position within the document.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// `(width, height)` in pixels.
    pub fn dimensions(&self) -> (u32, u32) {
        (self.image.width(), self.image.height())
    }

    /// Borrow the underlying `DynamicImage`.
    pub fn as_dynamic(&self) -> &DynamicImage {
        &self.image
    }

    // -- Output ---------------------------------------------------------------

    /// Encode the page as PNG bytes.
    pub fn to_png_bytes(&self) -> Result<Vec<u8>> {
        encode_to_format(&self.image, ImageFormat::Png)
    }
}

/// Image format an artifact at `path` will be encoded in, judged by its
/// extension.
pub fn output_format(path: &Path) -> Result<ImageFormat> {
    let format = ImageFormat::from_path(path).map_err(|_| {
        BlackbarError::UnsupportedOutputFormat(path.display().to_string())
    })?;
    if !format.writing_enabled() {
        return Err(BlackbarError::UnsupportedOutputFormat(format!(
            "{} ({format:?} cannot be written)",
            path.display()
        )));
    }
    Ok(format)
}

/// Encode a `DynamicImage` into the specified format, returning the raw bytes.
pub fn encode_to_format(image: &DynamicImage, format: ImageFormat) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    let mut cursor = std::io::Cursor::new(&mut buffer);
    image.write_to(&mut cursor, format).map_err(|err| {
        BlackbarError::ImageError(format!("image encoding failed: {}", err))
    })?;
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    fn sample(width: u32, height: u32) -> DynamicImage {
        DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, Rgb([240, 240, 240])))
    }

    #[test]
    fn png_bytes_decode_back_to_same_size() {
        let page = Page::from_dynamic(1, sample(12, 7));
        let bytes = page.to_png_bytes().expect("encode");
        let decoded = image::load_from_memory(&bytes).expect("decode");
        assert_eq!((decoded.width(), decoded.height()), (12, 7));
    }

    #[test]
    fn open_non_image_file_is_image_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.png");
        std::fs::write(&path, b"definitely not an image").unwrap();
        let result = Page::open(&path);
        assert!(matches!(result, Err(BlackbarError::ImageError(_))));
    }

    #[test]
    fn open_missing_file_is_image_error() {
        let result = Page::open("/nonexistent/blackbar/photo.png");
        assert!(matches!(result, Err(BlackbarError::ImageError(_))));
    }

    #[test]
    fn output_format_follows_extension() {
        assert_eq!(output_format(Path::new("out.PNG")).unwrap(), ImageFormat::Png);
        assert_eq!(output_format(Path::new("out.jpg")).unwrap(), ImageFormat::Jpeg);
        assert_eq!(output_format(Path::new("out.bmp")).unwrap(), ImageFormat::Bmp);
    }

    #[test]
    fn output_format_rejects_unknown_extension() {
        let err = output_format(Path::new("out.docx")).unwrap_err();
        assert!(err.is_configuration());
        assert!(output_format(Path::new("no_extension")).is_err());
    }
}
