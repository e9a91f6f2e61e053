//! Document encoder seam
//!
//! The PDF writer is a collaborator behind a trait, so the assembly engine
//! never touches a concrete backend. Backends are resolved once by name at
//! startup; resolution failure is fatal for the whole session rather than
//! surfacing per-assembly.

use std::sync::Arc;

use image::DynamicImage;
use printpdf::{
    Mm, Op, PdfDocument, PdfPage, PdfSaveOptions, Pt, RawImage, RawImageData, RawImageFormat,
    XObjectTransform,
};

use crate::constants::mm_to_pt;
use crate::types::{ComposeError, PlacementRect, Result};

/// Name of the default backend
pub const PRINTPDF_BACKEND: &str = "printpdf";

/// A decoded raster image ready for placement
pub struct DecodedImage {
    name: String,
    pixels: DynamicImage,
}

impl DecodedImage {
    pub fn new(name: impl Into<String>, pixels: DynamicImage) -> Self {
        Self {
            name: name.into(),
            pixels,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn width_px(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height_px(&self) -> u32 {
        self.pixels.height()
    }

    pub fn pixels(&self) -> &DynamicImage {
        &self.pixels
    }
}

/// Factory for document sinks
pub trait DocumentEncoder: std::fmt::Debug + Send + Sync {
    /// Backend name, used in log output
    fn name(&self) -> &'static str;

    /// Start a document with the given page geometry.
    ///
    /// The returned sink begins with one open page.
    fn begin(&self, title: &str, page_w_mm: f32, page_h_mm: f32) -> Box<dyn DocumentSink>;
}

/// An in-progress document
pub trait DocumentSink {
    /// Open a new page after the current one
    fn add_page(&mut self);

    /// Place an image on the current page.
    ///
    /// The rect is in millimeters with a top-left page origin.
    fn place_image(&mut self, image: &DecodedImage, rect: &PlacementRect) -> Result<()>;

    /// Close the document and return the encoded bytes
    fn finish(self: Box<Self>) -> Result<Vec<u8>>;
}

/// Resolve an encoder backend by name.
///
/// Backends are fixed at compile time; resolution exists so callers pick
/// one backend at startup and fail immediately if it is missing, instead
/// of discovering the absence mid-conversion.
pub fn resolve(name: &str) -> Result<Arc<dyn DocumentEncoder>> {
    match name {
        PRINTPDF_BACKEND => Ok(Arc::new(PrintPdfEncoder)),
        other => Err(ComposeError::EncoderUnavailable(other.to_string())),
    }
}

/// The default backend
pub fn default_encoder() -> Arc<dyn DocumentEncoder> {
    Arc::new(PrintPdfEncoder)
}

/// `printpdf` 0.8 backend.
///
/// printpdf 0.8 uses a data-oriented API: documents are built by
/// constructing `PdfPage` structs containing `Vec<Op>` operation lists,
/// then serialised via `PdfDocument::save()`.
#[derive(Debug)]
pub struct PrintPdfEncoder;

impl DocumentEncoder for PrintPdfEncoder {
    fn name(&self) -> &'static str {
        PRINTPDF_BACKEND
    }

    fn begin(&self, title: &str, page_w_mm: f32, page_h_mm: f32) -> Box<dyn DocumentSink> {
        Box::new(PrintPdfSink {
            doc: PdfDocument::new(title),
            page_w: Mm(page_w_mm),
            page_h: Mm(page_h_mm),
            pages: Vec::new(),
            current_ops: Vec::new(),
        })
    }
}

struct PrintPdfSink {
    doc: PdfDocument,
    page_w: Mm,
    page_h: Mm,
    pages: Vec<PdfPage>,
    current_ops: Vec<Op>,
}

impl PrintPdfSink {
    fn flush_page(&mut self) {
        let ops = std::mem::take(&mut self.current_ops);
        self.pages.push(PdfPage::new(self.page_w, self.page_h, ops));
    }
}

impl DocumentSink for PrintPdfSink {
    fn add_page(&mut self) {
        self.flush_page();
    }

    fn place_image(&mut self, image: &DecodedImage, rect: &PlacementRect) -> Result<()> {
        // printpdf wants raw pixel data; flatten to RGB8.
        let rgb = image.pixels().to_rgb8();
        let raw = RawImage {
            pixels: RawImageData::U8(rgb.into_raw()),
            width: image.width_px() as usize,
            height: image.height_px() as usize,
            data_format: RawImageFormat::RGB8,
            tag: Vec::new(),
        };
        let xobject_id = self.doc.add_image(&raw);

        // Placements use a top-left origin; PDF pages are bottom-left.
        let y_from_bottom_mm = self.page_h.0 - rect.y_mm - rect.height_mm;

        // At 72 dpi the xobject's native size is one point per pixel, so
        // the per-axis scale is target points over pixels.
        let scale_x = mm_to_pt(rect.width_mm) / image.width_px() as f32;
        let scale_y = mm_to_pt(rect.height_mm) / image.height_px() as f32;

        self.current_ops.push(Op::UseXobject {
            id: xobject_id,
            transform: XObjectTransform {
                translate_x: Some(Pt(mm_to_pt(rect.x_mm))),
                translate_y: Some(Pt(mm_to_pt(y_from_bottom_mm))),
                scale_x: Some(scale_x),
                scale_y: Some(scale_y),
                dpi: Some(72.0),
                rotate: None,
            },
        });

        Ok(())
    }

    fn finish(mut self: Box<Self>) -> Result<Vec<u8>> {
        self.flush_page();
        self.doc.pages = std::mem::take(&mut self.pages);

        let mut warnings = Vec::new();
        let bytes = self.doc.save(&PdfSaveOptions::default(), &mut warnings);
        if !warnings.is_empty() {
            log::warn!("encoder emitted {} warning(s)", warnings.len());
        }
        Ok(bytes)
    }
}
