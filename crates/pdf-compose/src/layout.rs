//! Image placement within pages
//!
//! This module handles calculating the final position of an image on its
//! page, accounting for:
//! - The fixed page margin (printable area)
//! - The active fit mode
//! - Unit conversion from intrinsic pixels to millimeters
//!
//! All geometry is in millimeters with a top-left page origin.

use crate::constants::{PAGE_MARGIN_MM, px_to_mm};
use crate::options::ComposeOptions;
use crate::types::{FitMode, PlacementRect};

/// Printable area of a page: dimensions minus the fixed margin on all sides
pub fn printable_area(page_w_mm: f32, page_h_mm: f32) -> (f32, f32) {
    (
        page_w_mm - 2.0 * PAGE_MARGIN_MM,
        page_h_mm - 2.0 * PAGE_MARGIN_MM,
    )
}

/// Calculate the placement of one image on one page.
///
/// - `Fit` scales uniformly so the image fits the printable area and
///   centers the result on the full page.
/// - `Fill` covers the printable area exactly, ignoring the intrinsic
///   aspect ratio.
/// - `Original` converts pixels to millimeters at 72 px/inch, clamps each
///   axis to the printable area, and centers on the full page.
pub fn place_image(
    img_w_px: u32,
    img_h_px: u32,
    page_w_mm: f32,
    page_h_mm: f32,
    fit: FitMode,
) -> PlacementRect {
    let (printable_w, printable_h) = printable_area(page_w_mm, page_h_mm);
    let img_w = img_w_px as f32;
    let img_h = img_h_px as f32;

    match fit {
        FitMode::Fit => {
            let scale_x = printable_w / img_w;
            let scale_y = printable_h / img_h;
            let scale = scale_x.min(scale_y);

            let width = img_w * scale;
            let height = img_h * scale;
            PlacementRect::new(
                (page_w_mm - width) / 2.0,
                (page_h_mm - height) / 2.0,
                width,
                height,
            )
        }
        FitMode::Fill => {
            PlacementRect::new(PAGE_MARGIN_MM, PAGE_MARGIN_MM, printable_w, printable_h)
        }
        FitMode::Original => {
            let width = px_to_mm(img_w).min(printable_w);
            let height = px_to_mm(img_h).min(printable_h);
            PlacementRect::new(
                (page_w_mm - width) / 2.0,
                (page_h_mm - height) / 2.0,
                width,
                height,
            )
        }
    }
}

/// Placements for a whole batch of decoded dimensions, in input order
pub fn plan(dimensions: &[(u32, u32)], options: &ComposeOptions) -> Vec<PlacementRect> {
    let (page_w, page_h) = options.page_dimensions_mm();
    dimensions
        .iter()
        .map(|&(w, h)| place_image(w, h, page_w, page_h, options.fit_mode))
        .collect()
}
