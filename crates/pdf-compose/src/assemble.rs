//! Layout and assembly of an image batch into a single document
//!
//! Images are decoded and placed strictly in input order, one page per
//! image, so peak memory stays around one decoded image at a time.

use std::path::Path;
use std::sync::Arc;

use crate::constants::DOC_TITLE;
use crate::encoder::{DecodedImage, DocumentEncoder};
use crate::layout;
use crate::options::ComposeOptions;
use crate::types::{AssembledDocument, ComposeError, PendingImage, PlacementRect, Result};

/// Decode an image payload, resolving its intrinsic pixel dimensions
fn decode_image(image: &PendingImage) -> Result<DecodedImage> {
    let pixels =
        image::load_from_memory(&image.bytes).map_err(|source| ComposeError::ImageDecode {
            name: image.name.clone(),
            source,
        })?;
    Ok(DecodedImage::new(image.name.clone(), pixels))
}

/// Assemble the batch into a single document, one image per page.
///
/// Any decode failure aborts the whole run; no partial document is
/// produced. Repeated calls with the same images and options yield the
/// same page count and placement geometry.
pub fn assemble_bytes(
    images: &[PendingImage],
    options: &ComposeOptions,
    encoder: &dyn DocumentEncoder,
) -> Result<AssembledDocument> {
    if images.is_empty() {
        return Err(ComposeError::EmptyBatch);
    }
    options.validate()?;

    let (page_w, page_h) = options.page_dimensions_mm();
    log::info!(
        "assembling {} image(s) onto {:?} {:?} pages ({} fit) via {}",
        images.len(),
        options.paper_size,
        options.orientation,
        options.fit_mode.name(),
        encoder.name()
    );

    let mut sink = encoder.begin(DOC_TITLE, page_w, page_h);
    let mut placements = Vec::with_capacity(images.len());

    for (index, image) in images.iter().enumerate() {
        // The sink starts with one open page; every later image gets a
        // fresh one.
        if index > 0 {
            sink.add_page();
        }

        let decoded = decode_image(image)?;
        let rect = layout::place_image(
            decoded.width_px(),
            decoded.height_px(),
            page_w,
            page_h,
            options.fit_mode,
        );
        log::debug!(
            "page {}: '{}' {}x{} px -> {:.2}x{:.2} mm at ({:.2}, {:.2})",
            index + 1,
            decoded.name(),
            decoded.width_px(),
            decoded.height_px(),
            rect.width_mm,
            rect.height_mm,
            rect.x_mm,
            rect.y_mm
        );
        sink.place_image(&decoded, &rect)?;
        placements.push(rect);
    }

    let bytes = sink.finish()?;
    Ok(AssembledDocument {
        bytes,
        placements,
        page_width_mm: page_w,
        page_height_mm: page_h,
    })
}

/// Assemble on the blocking pool; decoding and encoding are CPU-bound
pub async fn assemble(
    images: &[PendingImage],
    options: &ComposeOptions,
    encoder: Arc<dyn DocumentEncoder>,
) -> Result<AssembledDocument> {
    let images = images.to_vec();
    let options = *options;
    tokio::task::spawn_blocking(move || assemble_bytes(&images, &options, encoder.as_ref())).await?
}

/// Assemble and write the document to a file
pub async fn assemble_to_file(
    images: &[PendingImage],
    options: &ComposeOptions,
    encoder: Arc<dyn DocumentEncoder>,
    output_path: impl AsRef<Path>,
) -> Result<AssembledDocument> {
    let document = assemble(images, options, encoder).await?;
    tokio::fs::write(output_path.as_ref(), &document.bytes).await?;
    Ok(document)
}

/// Compute the placements a run would use without encoding a document.
///
/// Shares the assembly preconditions: an empty batch or invalid options
/// are rejected before any image is decoded.
pub async fn preview_layout(
    images: &[PendingImage],
    options: &ComposeOptions,
) -> Result<Vec<PlacementRect>> {
    if images.is_empty() {
        return Err(ComposeError::EmptyBatch);
    }
    options.validate()?;

    let images = images.to_vec();
    let options = *options;
    tokio::task::spawn_blocking(move || {
        let mut dimensions = Vec::with_capacity(images.len());
        for image in &images {
            let decoded = decode_image(image)?;
            dimensions.push((decoded.width_px(), decoded.height_px()));
        }
        Ok(layout::plan(&dimensions, &options))
    })
    .await?
}
