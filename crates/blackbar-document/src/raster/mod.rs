// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF rasterisation: the renderer seen as a black box from PDF + DPI to
// page images, produced one at a time in document order.

pub mod pdfium;

use std::path::Path;

use blackbar_core::error::Result;

use crate::page::Page;

pub use self::pdfium::PdfiumRasterizer;

/// Outcome of rendering one page: the page, or why it could not be drawn.
pub type PageLoad = Result<Page>;

/// Sink for rendered pages: receives the 1-based index and the page.
pub type PageSink<'a> = dyn FnMut(usize, PageLoad) + 'a;

/// Turns a PDF into page images.
pub trait PdfRasterizer: Send + Sync {
    /// Render the pages of `path` at `dpi` in document order, handing each
    /// to `sink` before the next one is drawn. Returns the page count.
    ///
    /// At most one decoded page is held at a time. The outer error means the
    /// document itself is unusable; per-page errors go to `sink` so one
    /// unrenderable page does not hide its siblings.
    fn rasterize(&self, path: &Path, dpi: u32, sink: &mut PageSink<'_>) -> Result<usize>;
}
