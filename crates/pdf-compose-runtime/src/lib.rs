use std::path::PathBuf;

mod worker;

pub use worker::worker_task;

// Re-export types from the core crate
pub use pdf_compose::{
    CandidateFile, ComposeOptions, FitMode, Orientation, PaperSize, SessionState,
};

/// Commands sent from a front-end to the worker
#[derive(Debug)]
pub enum ComposeCommand {
    /// Offer candidate files to the batch; non-PNG entries are filtered
    AddFiles { files: Vec<CandidateFile> },
    /// Remove the queued image at `index`
    RemoveFile { index: usize },
    /// Assemble the current batch into a document
    Convert { options: ComposeOptions },
    /// Write the last assembled document to disk
    SaveDocument { output_path: PathBuf },
    /// Load page options from a JSON config file
    LoadConfig { path: PathBuf },
    /// Drop all queued images and any assembled document
    Reset,
}

/// Updates sent from the worker back to the front-end
#[derive(Debug, Clone)]
pub enum ComposeUpdate {
    FilesAdded {
        added: usize,
        total: usize,
    },
    FileRemoved {
        index: usize,
        remaining: usize,
    },
    Converted {
        page_count: usize,
        suggested_filename: String,
    },
    DocumentSaved {
        path: PathBuf,
    },
    ConfigLoaded {
        options: ComposeOptions,
    },
    WasReset,
    Error {
        message: String,
    },
}
