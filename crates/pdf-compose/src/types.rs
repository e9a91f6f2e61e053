use std::path::Path;

use thiserror::Error;

use crate::constants::PNG_MEDIA_TYPE;

#[derive(Error, Debug)]
pub enum ComposeError {
    #[error("no PNG files among {0} candidate(s)")]
    NoValidFiles(usize),
    #[error("index {index} is out of range for a batch of {len} image(s)")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("image batch is empty")]
    EmptyBatch,
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
    #[error("failed to decode image '{name}': {source}")]
    ImageDecode {
        name: String,
        #[source]
        source: image::ImageError,
    },
    #[error("document encoder '{0}' is not available")]
    EncoderUnavailable(String),
    #[error("PDF error: {0}")]
    Pdf(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}

pub type Result<T> = std::result::Result<T, ComposeError>;

/// Page orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    /// Portrait: height > width (default for most paper sizes)
    #[default]
    Portrait,
    /// Landscape: width > height
    Landscape,
}

/// Standard paper sizes
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PaperSize {
    A3,
    A4,
    A5,
    Letter,
    Legal,
    Tabloid,
    Custom { width_mm: f32, height_mm: f32 },
}

impl PaperSize {
    /// Get base dimensions (always portrait: width < height for standard sizes)
    pub fn dimensions_mm(self) -> (f32, f32) {
        match self {
            PaperSize::A3 => (297.0, 420.0),
            PaperSize::A4 => (210.0, 297.0),
            PaperSize::A5 => (148.0, 210.0),
            PaperSize::Letter => (215.9, 279.4),
            PaperSize::Legal => (215.9, 355.6),
            PaperSize::Tabloid => (279.4, 431.8),
            PaperSize::Custom {
                width_mm,
                height_mm,
            } => (width_mm, height_mm),
        }
    }

    /// Get dimensions with orientation applied
    pub fn dimensions_with_orientation(self, orientation: Orientation) -> (f32, f32) {
        let (w, h) = self.dimensions_mm();
        match orientation {
            Orientation::Portrait => (w, h),
            Orientation::Landscape => (h, w),
        }
    }
}

/// Policy controlling how an image's scale and position are computed on
/// its page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FitMode {
    /// Scale uniformly to fit the printable area, centered on the page
    #[default]
    Fit,
    /// Stretch to cover the printable area exactly (aspect ratio not
    /// preserved)
    Fill,
    /// Keep physical size at 72 px/inch, clamped to the printable area
    Original,
}

impl FitMode {
    /// Parse a fit-mode name.
    ///
    /// Unknown names select `Fill` rather than failing; callers that want
    /// strict validation should match on the name themselves.
    pub fn from_name(name: &str) -> Self {
        match name {
            "fit" => FitMode::Fit,
            "fill" => FitMode::Fill,
            "original" => FitMode::Original,
            _ => FitMode::Fill,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            FitMode::Fit => "fit",
            FitMode::Fill => "fill",
            FitMode::Original => "original",
        }
    }
}

/// Computed placement of an image on its page, in millimeters.
///
/// Offsets are measured from the top-left corner of the page.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PlacementRect {
    /// X offset of the left edge
    pub x_mm: f32,
    /// Y offset of the top edge
    pub y_mm: f32,
    /// Width
    pub width_mm: f32,
    /// Height
    pub height_mm: f32,
}

impl PlacementRect {
    pub fn new(x_mm: f32, y_mm: f32, width_mm: f32, height_mm: f32) -> Self {
        Self {
            x_mm,
            y_mm,
            width_mm,
            height_mm,
        }
    }

    /// Right edge x coordinate
    pub fn right(&self) -> f32 {
        self.x_mm + self.width_mm
    }

    /// Bottom edge y coordinate
    pub fn bottom(&self) -> f32 {
        self.y_mm + self.height_mm
    }
}

/// A file offered to the batch manager, before media-type filtering
#[derive(Debug, Clone)]
pub struct CandidateFile {
    /// Display name, usually the original filename
    pub name: String,
    /// Declared media type, e.g. "image/png"
    pub media_type: String,
    /// Raw file contents
    pub bytes: Vec<u8>,
}

impl CandidateFile {
    pub fn new(name: impl Into<String>, media_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            media_type: media_type.into(),
            bytes,
        }
    }

    pub fn is_png(&self) -> bool {
        self.media_type == PNG_MEDIA_TYPE
    }
}

/// An accepted image queued for assembly.
///
/// Intrinsic pixel dimensions are resolved at assembly time, not here.
#[derive(Debug, Clone)]
pub struct PendingImage {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl PendingImage {
    pub fn size_bytes(&self) -> usize {
        self.bytes.len()
    }
}

/// Result of a successful assembly: the encoded document plus the geometry
/// actually used for each page.
#[derive(Debug, Clone)]
pub struct AssembledDocument {
    /// Serialized document, ready to persist
    pub bytes: Vec<u8>,
    /// One placement per page, in input order
    pub placements: Vec<PlacementRect>,
    /// Page width used for every page (mm)
    pub page_width_mm: f32,
    /// Page height used for every page (mm)
    pub page_height_mm: f32,
}

impl AssembledDocument {
    pub fn page_count(&self) -> usize {
        self.placements.len()
    }

    /// Write the serialized document to a file
    pub async fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        tokio::fs::write(path.as_ref(), &self.bytes).await?;
        Ok(())
    }
}
