// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDFium backend. The upstream `Pdfium` handle is `!Send`, so the rasteriser
// holds no handle and binds the library per document; the OS caches the
// `dlopen`, so repeat binds are cheap.

use std::path::{Path, PathBuf};

use blackbar_core::error::{BlackbarError, Result};
use pdfium_render::prelude::*;
use tracing::{debug, info, instrument, warn};

use super::{PageSink, PdfRasterizer};
use crate::page::Page;

/// PDF user-space units per inch.
const POINTS_PER_INCH: f32 = 72.0;

/// Renders PDF pages with Google PDFium.
#[derive(Debug, Clone, Default)]
pub struct PdfiumRasterizer {
    /// Explicit library file; searched for when absent.
    library: Option<PathBuf>,
}

impl PdfiumRasterizer {
    /// Build a rasteriser and check the library can be bound.
    ///
    /// Search order: `library`, then `PDFIUM_DYNAMIC_LIB_PATH`, then next to
    /// the executable, then the system library path.
    ///
    /// # Errors
    ///
    /// Returns [`BlackbarError::RendererUnavailable`] when PDFium is missing.
    pub fn new(library: Option<PathBuf>) -> Result<Self> {
        let rasterizer = Self { library };
        rasterizer.bind()?;
        Ok(rasterizer)
    }

    fn bind(&self) -> Result<Pdfium> {
        let explicit = self
            .library
            .clone()
            .or_else(|| std::env::var_os("PDFIUM_DYNAMIC_LIB_PATH").map(PathBuf::from));

        if let Some(path) = explicit {
            debug!(path = %path.display(), "Binding PDFium from explicit path");
            let path_name: &str = &path.to_string_lossy();
            let bindings = Pdfium::bind_to_library(path_name).map_err(|err| {
                BlackbarError::RendererUnavailable(format!(
                    "failed to load PDFium from {}: {}",
                    path.display(),
                    err
                ))
            })?;
            return Ok(Pdfium::new(bindings));
        }

        if let Some(exe_dir) = std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf))
        {
            for dir in [exe_dir.clone(), exe_dir.join("lib")] {
                let dir_name: &str = &dir.to_string_lossy();
                let lib_path = Pdfium::pdfium_platform_library_name_at_path(dir_name);
                if let Ok(bindings) = Pdfium::bind_to_library(&lib_path) {
                    debug!(dir = %dir.display(), "Bound PDFium next to executable");
                    return Ok(Pdfium::new(bindings));
                }
            }
        }

        let bindings = Pdfium::bind_to_system_library().map_err(|err| {
            BlackbarError::RendererUnavailable(format!(
                "PDFium library not found; set PDFIUM_DYNAMIC_LIB_PATH or install PDFium: {err}"
            ))
        })?;
        Ok(Pdfium::new(bindings))
    }
}

/// Pixel size of a page rendered at `dpi`. Never below 1x1.
fn render_dimensions(width_points: f32, height_points: f32, dpi: u32) -> (i32, i32) {
    let scale = dpi as f32 / POINTS_PER_INCH;
    let w = (width_points * scale).round().max(1.0) as i32;
    let h = (height_points * scale).round().max(1.0) as i32;
    (w, h)
}

impl PdfRasterizer for PdfiumRasterizer {
    #[instrument(skip(self, sink), fields(path = %path.display()))]
    fn rasterize(&self, path: &Path, dpi: u32, sink: &mut PageSink<'_>) -> Result<usize> {
        let pdfium = self.bind()?;
        let document = pdfium.load_pdf_from_file(path, None).map_err(|err| {
            BlackbarError::PdfOpen(format!("{}: {}", path.display(), err))
        })?;

        let pages = document.pages();
        let count = pages.len() as usize;
        info!(pages = count, dpi, "Rasterising PDF");

        for (offset, page) in pages.iter().enumerate() {
            let index = offset + 1;
            let (width, height) =
                render_dimensions(page.width().value, page.height().value, dpi);
            let config = PdfRenderConfig::new()
                .set_target_width(width)
                .set_target_height(height);

            let load = page
                .render_with_config(&config)
                .map(|bitmap| Page::from_dynamic(index, bitmap.as_image()))
                .map_err(|err| BlackbarError::Rasterize(format!("page {index}: {err}")));

            match &load {
                Ok(rendered) => debug!(
                    index,
                    width = rendered.width(),
                    height = rendered.height(),
                    "Page rendered"
                ),
                Err(err) => warn!(index, %err, "Page could not be rendered"),
            }
            sink(index, load);
        }

        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn letter_page_at_150_dpi() {
        // 8.5 x 11 in.
        assert_eq!(render_dimensions(612.0, 792.0, 150), (1275, 1650));
    }

    #[test]
    fn a4_page_at_72_dpi_is_point_size() {
        assert_eq!(render_dimensions(595.0, 842.0, 72), (595, 842));
    }

    #[test]
    fn degenerate_page_is_at_least_one_pixel() {
        assert_eq!(render_dimensions(0.0, 0.2, 10), (1, 1));
    }
}
