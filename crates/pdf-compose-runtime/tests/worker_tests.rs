use image::{DynamicImage, RgbImage};
use pdf_compose_runtime::{
    CandidateFile, ComposeCommand, ComposeOptions, ComposeUpdate, worker_task,
};
use tokio::sync::mpsc;

fn png_candidate(name: &str, width: u32, height: u32) -> CandidateFile {
    let image =
        DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, image::Rgb([90, 90, 30])));
    let mut bytes = Vec::new();
    image
        .write_to(&mut std::io::Cursor::new(&mut bytes), image::ImageFormat::Png)
        .unwrap();
    CandidateFile::new(name, "image/png", bytes)
}

fn spawn_worker() -> (
    mpsc::UnboundedSender<ComposeCommand>,
    mpsc::UnboundedReceiver<ComposeUpdate>,
) {
    let (command_tx, command_rx) = mpsc::unbounded_channel();
    let (update_tx, update_rx) = mpsc::unbounded_channel();
    tokio::spawn(worker_task("printpdf", command_rx, update_tx));
    (command_tx, update_rx)
}

async fn recv(update_rx: &mut mpsc::UnboundedReceiver<ComposeUpdate>) -> ComposeUpdate {
    update_rx.recv().await.expect("worker hung up")
}

#[tokio::test]
async fn test_unknown_encoder_reports_error_and_exits() {
    let (_command_tx, command_rx) = mpsc::unbounded_channel::<ComposeCommand>();
    let (update_tx, mut update_rx) = mpsc::unbounded_channel();
    tokio::spawn(worker_task("quartz", command_rx, update_tx));

    match recv(&mut update_rx).await {
        ComposeUpdate::Error { message } => assert!(message.contains("quartz")),
        other => panic!("expected Error, got {:?}", other),
    }
    // The worker dropped its sender, so the channel closes.
    assert!(update_rx.recv().await.is_none());
}

#[tokio::test]
async fn test_add_convert_save_flow() {
    let (command_tx, mut update_rx) = spawn_worker();
    let dir = tempfile::tempdir().unwrap();
    let output_path = dir.path().join("out.pdf");

    command_tx
        .send(ComposeCommand::AddFiles {
            files: vec![
                png_candidate("a.png", 100, 80),
                png_candidate("b.png", 80, 100),
            ],
        })
        .unwrap();
    match recv(&mut update_rx).await {
        ComposeUpdate::FilesAdded { added, total } => {
            assert_eq!(added, 2);
            assert_eq!(total, 2);
        }
        other => panic!("expected FilesAdded, got {:?}", other),
    }

    command_tx
        .send(ComposeCommand::Convert {
            options: ComposeOptions::default(),
        })
        .unwrap();
    match recv(&mut update_rx).await {
        ComposeUpdate::Converted {
            page_count,
            suggested_filename,
        } => {
            assert_eq!(page_count, 2);
            assert_eq!(suggested_filename, "converted-images.pdf");
        }
        other => panic!("expected Converted, got {:?}", other),
    }

    command_tx
        .send(ComposeCommand::SaveDocument {
            output_path: output_path.clone(),
        })
        .unwrap();
    match recv(&mut update_rx).await {
        ComposeUpdate::DocumentSaved { path } => assert_eq!(path, output_path),
        other => panic!("expected DocumentSaved, got {:?}", other),
    }

    assert!(std::fs::read(&output_path).unwrap().starts_with(b"%PDF"));
}

#[tokio::test]
async fn test_errors_keep_worker_alive() {
    let (command_tx, mut update_rx) = spawn_worker();

    // Removing from an empty batch fails but must not kill the worker
    command_tx
        .send(ComposeCommand::RemoveFile { index: 3 })
        .unwrap();
    assert!(matches!(
        recv(&mut update_rx).await,
        ComposeUpdate::Error { .. }
    ));

    command_tx
        .send(ComposeCommand::AddFiles {
            files: vec![png_candidate("a.png", 64, 64)],
        })
        .unwrap();
    assert!(matches!(
        recv(&mut update_rx).await,
        ComposeUpdate::FilesAdded { added: 1, total: 1 }
    ));
}

#[tokio::test]
async fn test_save_without_document_reports_error() {
    let (command_tx, mut update_rx) = spawn_worker();

    command_tx
        .send(ComposeCommand::SaveDocument {
            output_path: "nowhere.pdf".into(),
        })
        .unwrap();

    match recv(&mut update_rx).await {
        ComposeUpdate::Error { message } => assert!(message.contains("no assembled document")),
        other => panic!("expected Error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_reset_acknowledged() {
    let (command_tx, mut update_rx) = spawn_worker();

    command_tx
        .send(ComposeCommand::AddFiles {
            files: vec![png_candidate("a.png", 32, 32)],
        })
        .unwrap();
    recv(&mut update_rx).await;

    command_tx.send(ComposeCommand::Reset).unwrap();
    assert!(matches!(recv(&mut update_rx).await, ComposeUpdate::WasReset));

    // After reset the batch is empty again, so converting is an error
    command_tx
        .send(ComposeCommand::Convert {
            options: ComposeOptions::default(),
        })
        .unwrap();
    assert!(matches!(
        recv(&mut update_rx).await,
        ComposeUpdate::Error { .. }
    ));
}

#[tokio::test]
async fn test_load_config_round_trip() {
    let (command_tx, mut update_rx) = spawn_worker();
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("options.json");

    let options = ComposeOptions {
        orientation: pdf_compose_runtime::Orientation::Landscape,
        ..Default::default()
    };
    options.save(&config_path).await.unwrap();

    command_tx
        .send(ComposeCommand::LoadConfig {
            path: config_path.clone(),
        })
        .unwrap();

    match recv(&mut update_rx).await {
        ComposeUpdate::ConfigLoaded { options: loaded } => assert_eq!(loaded, options),
        other => panic!("expected ConfigLoaded, got {:?}", other),
    }
}
