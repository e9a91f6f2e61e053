//! Shared constants for image-to-PDF composition
//!
//! This module centralizes magic numbers and constants used throughout
//! the composition process.

// =============================================================================
// Unit Conversion
// =============================================================================

/// Points per millimeter (1 inch = 72 points, 1 inch = 25.4mm)
pub const POINTS_PER_MM: f32 = 72.0 / 25.4; // ≈ 2.83465

/// Millimeters per pixel at the fixed 72 px/inch placement density
pub const MM_PER_PX: f32 = 25.4 / 72.0; // ≈ 0.352778

/// Convert millimeters to points
#[inline]
pub fn mm_to_pt(mm: f32) -> f32 {
    mm * POINTS_PER_MM
}

/// Convert intrinsic pixels to millimeters at the fixed placement density
#[inline]
pub fn px_to_mm(px: f32) -> f32 {
    px * MM_PER_PX
}

// =============================================================================
// Page Layout
// =============================================================================

/// Fixed page margin on all sides (mm)
pub const PAGE_MARGIN_MM: f32 = 10.0;

// =============================================================================
// Batch Input
// =============================================================================

/// The only media type the batch manager accepts
pub const PNG_MEDIA_TYPE: &str = "image/png";

// =============================================================================
// Output
// =============================================================================

/// Output filename used when more than one image is queued
pub const MULTI_IMAGE_FILENAME: &str = "converted-images.pdf";

/// Document title embedded in the output metadata
pub const DOC_TITLE: &str = "Converted Images";
