pub mod constants;
pub mod encoder;
pub mod layout;

mod assemble;
mod batch;
mod options;
mod session;
mod types;

pub use assemble::{assemble, assemble_bytes, assemble_to_file, preview_layout};
pub use batch::{ImageBatch, format_byte_size, suggested_filename};
pub use encoder::{DecodedImage, DocumentEncoder, DocumentSink, PrintPdfEncoder};
pub use options::ComposeOptions;
pub use session::{ComposeSession, SessionState};
pub use types::*;
