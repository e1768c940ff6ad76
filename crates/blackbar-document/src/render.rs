// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Redaction renderer: paints opaque blocks over a page and writes the result.
//
// Recognition carries no positions, so the only region ever requested today
// is the full frame. `render_regions` is the seam for span-level redaction
// once the recogniser can report bounding boxes.

use std::path::{Path, PathBuf};

use blackbar_core::error::{BlackbarError, Result};
use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use imageproc::drawing::draw_filled_rect_mut;
use imageproc::rect::Rect;
use tracing::{debug, info, instrument};

use crate::integrity;
use crate::page::{self, Page};

/// Axis-aligned pixel rectangle to obscure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Region {
    /// The whole of a `width` x `height` frame.
    pub fn full_frame(width: u32, height: u32) -> Self {
        Self {
            x: 0,
            y: 0,
            width,
            height,
        }
    }

    /// This region cut down to fit a `width` x `height` frame, or `None` if
    /// nothing of it is left.
    fn clip(&self, width: u32, height: u32) -> Option<Rect> {
        if self.x >= width || self.y >= height {
            return None;
        }
        let w = self.width.min(width - self.x);
        let h = self.height.min(height - self.y);
        if w == 0 || h == 0 {
            return None;
        }
        Some(Rect::at(self.x as i32, self.y as i32).of_size(w, h))
    }
}

/// Produces redacted images from pages.
#[derive(Debug, Clone, Copy)]
pub struct RedactionRenderer {
    fill: Rgb<u8>,
}

impl Default for RedactionRenderer {
    fn default() -> Self {
        Self { fill: Rgb([0, 0, 0]) }
    }
}

impl RedactionRenderer {
    /// Full-frame redaction: an opaque image the size of `page`.
    pub fn render(&self, page: &Page) -> DynamicImage {
        self.render_regions(page, &[Region::full_frame(page.width(), page.height())])
    }

    /// Redact only `regions` of `page`.
    ///
    /// Pixels outside every region are copied from the page; pixels inside
    /// are replaced by the fill colour. Regions hanging off the edge are
    /// clipped.
    #[instrument(skip_all, fields(index = page.index(), regions = regions.len()))]
    pub fn render_regions(&self, page: &Page, regions: &[Region]) -> DynamicImage {
        let (width, height) = page.dimensions();
        let full = regions
            .iter()
            .any(|r| *r == Region::full_frame(width, height));

        let mut canvas: RgbImage = if full {
            RgbImage::from_pixel(width, height, self.fill)
        } else {
            page.as_dynamic().to_rgb8()
        };

        if !full {
            for rect in regions.iter().filter_map(|r| r.clip(width, height)) {
                draw_filled_rect_mut(&mut canvas, rect, self.fill);
            }
        }

        debug!(width, height, full, "Page rendered");
        DynamicImage::ImageRgb8(canvas)
    }
}

/// A rendered artifact and where it goes.
#[derive(Debug, Clone)]
pub struct RedactedOutput {
    pub image: DynamicImage,
    pub path: PathBuf,
}

impl RedactedOutput {
    pub fn new(image: DynamicImage, path: impl Into<PathBuf>) -> Self {
        Self { image, path: path.into() }
    }

    /// Encode in the format the destination's extension names and write it,
    /// overwriting whatever is there. Returns the SHA-256 of the bytes written.
    #[instrument(skip(self), fields(path = %self.path.display()))]
    pub fn persist(&self) -> Result<String> {
        let format = page::output_format(&self.path)
            .map_err(|err| BlackbarError::Persist(err.to_string()))?;
        self.persist_as(format)
    }

    /// As [`persist`](Self::persist), with the format fixed by the caller.
    pub fn persist_as(&self, format: ImageFormat) -> Result<String> {
        let bytes = page::encode_to_format(&self.image, format)
            .map_err(|err| BlackbarError::Persist(err.to_string()))?;
        write_artifact(&self.path, &bytes)?;
        let hash = integrity::hash_bytes(&bytes);
        info!(bytes = bytes.len(), format = ?format, "Artifact written");
        Ok(hash)
    }
}

fn write_artifact(path: &Path, bytes: &[u8]) -> Result<()> {
    std::fs::write(path, bytes)
        .map_err(|err| BlackbarError::Persist(format!("{}: {}", path.display(), err)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn white_page(width: u32, height: u32) -> Page {
        Page::from_dynamic(
            1,
            DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, Rgb([255, 255, 255]))),
        )
    }

    fn region(x: u32, y: u32, width: u32, height: u32) -> Region {
        Region {
            x,
            y,
            width,
            height,
        }
    }

    #[test]
    fn full_frame_is_uniform_and_same_size() {
        let page = white_page(31, 17);
        let out = RedactionRenderer::default().render(&page).to_rgb8();
        assert_eq!(out.dimensions(), (31, 17));
        assert!(out.pixels().all(|p| *p == Rgb([0, 0, 0])));
    }

    #[test]
    fn partial_regions_keep_the_rest() {
        let page = white_page(10, 10);
        let region = region(2, 2, 3, 3);
        let out = RedactionRenderer::default()
            .render_regions(&page, &[region])
            .to_rgb8();
        assert_eq!(*out.get_pixel(3, 3), Rgb([0, 0, 0]));
        assert_eq!(*out.get_pixel(0, 0), Rgb([255, 255, 255]));
        assert_eq!(*out.get_pixel(5, 5), Rgb([255, 255, 255]));
    }

    #[test]
    fn out_of_bounds_regions_are_clipped() {
        let page = white_page(8, 8);
        let regions = [
            region(6, 6, 100, 100),
            region(50, 0, 5, 5),
        ];
        let out = RedactionRenderer::default()
            .render_regions(&page, &regions)
            .to_rgb8();
        assert_eq!(out.dimensions(), (8, 8));
        assert_eq!(*out.get_pixel(7, 7), Rgb([0, 0, 0]));
        assert_eq!(*out.get_pixel(5, 5), Rgb([255, 255, 255]));
    }

    #[test]
    fn persist_writes_decodable_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.png");
        let rendered = RedactionRenderer::default().render(&white_page(9, 5));
        let hash = RedactedOutput::new(rendered, &path).persist().unwrap();

        let written = std::fs::read(&path).unwrap();
        assert_eq!(hash, integrity::hash_bytes(&written));
        let decoded = image::load_from_memory(&written).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (9, 5));
    }

    #[test]
    fn persist_into_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("out.png");
        let rendered = RedactionRenderer::default().render(&white_page(2, 2));
        let err = RedactedOutput::new(rendered, path).persist().unwrap_err();
        assert!(matches!(err, BlackbarError::Persist(_)));
    }
}
