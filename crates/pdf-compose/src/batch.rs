//! Ordered image batch management
//!
//! The batch owns the images queued for one assembly run. It filters out
//! non-PNG candidates on entry and hands assembly an owned snapshot, so a
//! running conversion never sees later mutations.

use std::path::Path;

use crate::constants::MULTI_IMAGE_FILENAME;
use crate::types::{CandidateFile, ComposeError, PendingImage, Result};

/// Ordered collection of images queued for one assembly run
#[derive(Debug, Default)]
pub struct ImageBatch {
    images: Vec<PendingImage>,
}

impl ImageBatch {
    pub fn new() -> Self {
        Self { images: Vec::new() }
    }

    /// Append candidates, keeping only PNG entries.
    ///
    /// Returns the number of images accepted. Fails with
    /// [`ComposeError::NoValidFiles`] if none of the candidates is a PNG,
    /// leaving the batch unchanged.
    pub fn append(&mut self, candidates: Vec<CandidateFile>) -> Result<usize> {
        let offered = candidates.len();
        let accepted: Vec<PendingImage> = candidates
            .into_iter()
            .filter(|c| c.is_png())
            .map(|c| PendingImage {
                name: c.name,
                bytes: c.bytes,
            })
            .collect();

        if accepted.is_empty() {
            return Err(ComposeError::NoValidFiles(offered));
        }

        log::debug!("accepted {}/{} candidate file(s)", accepted.len(), offered);
        let count = accepted.len();
        self.images.extend(accepted);
        Ok(count)
    }

    /// Remove the image at `index`, shifting later images down.
    ///
    /// Fails with [`ComposeError::IndexOutOfRange`] if `index` is outside
    /// the current bounds; the batch is left unchanged.
    pub fn remove_at(&mut self, index: usize) -> Result<PendingImage> {
        if index >= self.images.len() {
            return Err(ComposeError::IndexOutOfRange {
                index,
                len: self.images.len(),
            });
        }
        Ok(self.images.remove(index))
    }

    /// Empty the batch, releasing all held payloads
    pub fn clear(&mut self) {
        self.images.clear();
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// The queued images in arrival order
    pub fn images(&self) -> &[PendingImage] {
        &self.images
    }

    /// Owned copy of the queue in arrival order.
    ///
    /// Later mutation of the batch does not affect the returned snapshot.
    pub fn snapshot(&self) -> Vec<PendingImage> {
        self.images.to_vec()
    }

    /// Output filename derived from the current queue
    pub fn suggested_filename(&self) -> String {
        suggested_filename(&self.images)
    }
}

/// Output filename for a batch: a single image keeps its name with a `.pdf`
/// extension; multi-image batches use a fixed generic name.
pub fn suggested_filename(images: &[PendingImage]) -> String {
    match images {
        [single] => Path::new(&single.name)
            .with_extension("pdf")
            .to_string_lossy()
            .into_owned(),
        _ => MULTI_IMAGE_FILENAME.to_string(),
    }
}

/// Human-readable byte size, e.g. "1.18 MB"
pub fn format_byte_size(bytes: usize) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];
    let exp = ((bytes as f64).ln() / 1024f64.ln()).floor() as usize;
    let exp = exp.min(UNITS.len() - 1);
    let value = bytes as f64 / 1024f64.powi(exp as i32);

    // Two decimals with trailing zeros trimmed: 1.50 -> 1.5, 2.00 -> 2
    let formatted = format!("{:.2}", value);
    let formatted = formatted.trim_end_matches('0').trim_end_matches('.');
    format!("{} {}", formatted, UNITS[exp])
}
