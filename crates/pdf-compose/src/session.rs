//! Per-batch conversion session
//!
//! Tracks the lifecycle a caller observes: images accumulate, one assembly
//! runs at a time, a failure keeps the batch for a retry, and reset starts
//! over. Methods take `&mut self`, so a second conversion cannot start
//! while one is in flight.

use std::sync::Arc;

use crate::assemble;
use crate::batch::ImageBatch;
use crate::encoder::DocumentEncoder;
use crate::options::ComposeOptions;
use crate::types::{AssembledDocument, CandidateFile, ComposeError, PendingImage, Result};

/// Lifecycle of a batch as observed by the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    /// No images queued
    #[default]
    Empty,
    /// Images queued, ready to convert once non-empty
    Accumulating,
    /// An assembly is running
    Assembling,
    /// The last assembly succeeded and its document is held
    Assembled,
}

pub struct ComposeSession {
    batch: ImageBatch,
    encoder: Arc<dyn DocumentEncoder>,
    state: SessionState,
    document: Option<AssembledDocument>,
}

impl ComposeSession {
    pub fn new(encoder: Arc<dyn DocumentEncoder>) -> Self {
        Self {
            batch: ImageBatch::new(),
            encoder,
            state: SessionState::Empty,
            document: None,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn batch(&self) -> &ImageBatch {
        &self.batch
    }

    /// The document from the last successful conversion, if any
    pub fn document(&self) -> Option<&AssembledDocument> {
        self.document.as_ref()
    }

    /// Output filename derived from the current queue
    pub fn suggested_filename(&self) -> String {
        self.batch.suggested_filename()
    }

    /// Queue candidate files, filtering out non-PNG entries.
    ///
    /// Returns the number of images accepted; fails with
    /// [`ComposeError::NoValidFiles`] without changing state if none are
    /// acceptable.
    pub fn add_files(&mut self, candidates: Vec<CandidateFile>) -> Result<usize> {
        let added = self.batch.append(candidates)?;
        self.state = SessionState::Accumulating;
        Ok(added)
    }

    /// Remove the queued image at `index`
    pub fn remove_file(&mut self, index: usize) -> Result<PendingImage> {
        let removed = self.batch.remove_at(index)?;
        if self.batch.is_empty() && self.state == SessionState::Accumulating {
            self.state = SessionState::Empty;
        }
        Ok(removed)
    }

    /// Run one assembly over the queued images.
    ///
    /// On failure the queue is untouched and the session returns to
    /// accumulating, so the caller can retry with the same images or
    /// different options.
    pub async fn convert(&mut self, options: &ComposeOptions) -> Result<&AssembledDocument> {
        if self.batch.is_empty() {
            return Err(ComposeError::EmptyBatch);
        }

        let images = self.batch.snapshot();
        self.state = SessionState::Assembling;

        match assemble::assemble(&images, options, Arc::clone(&self.encoder)).await {
            Ok(document) => {
                self.state = SessionState::Assembled;
                Ok(self.document.insert(document))
            }
            Err(err) => {
                log::warn!("conversion failed, batch preserved: {}", err);
                self.state = SessionState::Accumulating;
                Err(err)
            }
        }
    }

    /// Drop all images and any assembled document
    pub fn reset(&mut self) {
        self.batch.clear();
        self.document = None;
        self.state = SessionState::Empty;
    }
}
