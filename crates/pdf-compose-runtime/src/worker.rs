use pdf_compose::{ComposeOptions, ComposeSession, encoder};
use tokio::sync::mpsc;

use crate::{ComposeCommand, ComposeUpdate};

/// Async worker task that owns one conversion session.
///
/// The encoder backend is resolved once up front; if it is missing the
/// worker reports the failure immediately and exits instead of failing on
/// every conversion.
pub async fn worker_task(
    encoder_name: &str,
    mut command_rx: mpsc::UnboundedReceiver<ComposeCommand>,
    update_tx: mpsc::UnboundedSender<ComposeUpdate>,
) {
    let encoder = match encoder::resolve(encoder_name) {
        Ok(encoder) => encoder,
        Err(e) => {
            let _ = update_tx.send(ComposeUpdate::Error {
                message: e.to_string(),
            });
            return;
        }
    };

    let mut session = ComposeSession::new(encoder);

    while let Some(cmd) = command_rx.recv().await {
        process_command(cmd, &mut session, &update_tx).await;
    }
}

async fn process_command(
    cmd: ComposeCommand,
    session: &mut ComposeSession,
    update_tx: &mpsc::UnboundedSender<ComposeUpdate>,
) {
    match cmd {
        ComposeCommand::AddFiles { files } => match session.add_files(files) {
            Ok(added) => {
                let _ = update_tx.send(ComposeUpdate::FilesAdded {
                    added,
                    total: session.batch().len(),
                });
            }
            Err(e) => send_error(update_tx, &e.to_string()),
        },
        ComposeCommand::RemoveFile { index } => match session.remove_file(index) {
            Ok(removed) => {
                log::debug!("removed '{}' from batch", removed.name);
                let _ = update_tx.send(ComposeUpdate::FileRemoved {
                    index,
                    remaining: session.batch().len(),
                });
            }
            Err(e) => send_error(update_tx, &e.to_string()),
        },
        ComposeCommand::Convert { options } => match session.convert(&options).await {
            Ok(document) => {
                let page_count = document.page_count();
                let _ = update_tx.send(ComposeUpdate::Converted {
                    page_count,
                    suggested_filename: session.suggested_filename(),
                });
            }
            Err(e) => send_error(update_tx, &e.to_string()),
        },
        ComposeCommand::SaveDocument { output_path } => match session.document() {
            Some(document) => match document.save(&output_path).await {
                Ok(()) => {
                    let _ = update_tx.send(ComposeUpdate::DocumentSaved { path: output_path });
                }
                Err(e) => send_error(update_tx, &e.to_string()),
            },
            None => send_error(update_tx, "no assembled document to save"),
        },
        ComposeCommand::LoadConfig { path } => match ComposeOptions::load(&path).await {
            Ok(options) => {
                let _ = update_tx.send(ComposeUpdate::ConfigLoaded { options });
            }
            Err(e) => send_error(update_tx, &e.to_string()),
        },
        ComposeCommand::Reset => {
            session.reset();
            let _ = update_tx.send(ComposeUpdate::WasReset);
        }
    }
}

fn send_error(update_tx: &mpsc::UnboundedSender<ComposeUpdate>, message: &str) {
    let _ = update_tx.send(ComposeUpdate::Error {
        message: message.to_string(),
    });
}
