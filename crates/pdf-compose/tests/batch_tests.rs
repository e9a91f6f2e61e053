use pdf_compose::*;

fn candidate(name: &str, media_type: &str) -> CandidateFile {
    CandidateFile::new(name, media_type, vec![0u8; 16])
}

#[test]
fn test_append_filters_non_png() {
    let mut batch = ImageBatch::new();
    let added = batch
        .append(vec![
            candidate("a.png", "image/png"),
            candidate("b.jpg", "image/jpeg"),
            candidate("c.png", "image/png"),
        ])
        .unwrap();

    assert_eq!(added, 2);
    assert_eq!(batch.len(), 2);
    assert_eq!(batch.images()[0].name, "a.png");
    assert_eq!(batch.images()[1].name, "c.png");
}

#[test]
fn test_append_preserves_arrival_order_across_calls() {
    let mut batch = ImageBatch::new();
    batch.append(vec![candidate("1.png", "image/png")]).unwrap();
    batch
        .append(vec![
            candidate("2.png", "image/png"),
            candidate("3.png", "image/png"),
        ])
        .unwrap();

    let names: Vec<_> = batch.images().iter().map(|i| i.name.as_str()).collect();
    assert_eq!(names, ["1.png", "2.png", "3.png"]);
}

#[test]
fn test_append_all_non_png_leaves_batch_unchanged() {
    let mut batch = ImageBatch::new();
    batch.append(vec![candidate("a.png", "image/png")]).unwrap();

    let result = batch.append(vec![
        candidate("b.jpg", "image/jpeg"),
        candidate("c.gif", "image/gif"),
    ]);

    match result {
        Err(ComposeError::NoValidFiles(offered)) => assert_eq!(offered, 2),
        other => panic!("expected NoValidFiles, got {:?}", other),
    }
    assert_eq!(batch.len(), 1);
}

#[test]
fn test_remove_at_shifts_later_images() {
    let mut batch = ImageBatch::new();
    batch
        .append(vec![
            candidate("1.png", "image/png"),
            candidate("2.png", "image/png"),
            candidate("3.png", "image/png"),
        ])
        .unwrap();

    let removed = batch.remove_at(1).unwrap();
    assert_eq!(removed.name, "2.png");

    let names: Vec<_> = batch.images().iter().map(|i| i.name.as_str()).collect();
    assert_eq!(names, ["1.png", "3.png"]);
}

#[test]
fn test_remove_at_out_of_range() {
    let mut batch = ImageBatch::new();
    batch.append(vec![candidate("a.png", "image/png")]).unwrap();

    match batch.remove_at(1) {
        Err(ComposeError::IndexOutOfRange { index, len }) => {
            assert_eq!(index, 1);
            assert_eq!(len, 1);
        }
        other => panic!("expected IndexOutOfRange, got {:?}", other),
    }
    assert_eq!(batch.len(), 1);
}

#[test]
fn test_clear_empties_batch() {
    let mut batch = ImageBatch::new();
    batch.append(vec![candidate("a.png", "image/png")]).unwrap();
    assert!(!batch.is_empty());

    batch.clear();
    assert!(batch.is_empty());
    assert_eq!(batch.len(), 0);
}

#[test]
fn test_snapshot_is_not_a_live_view() {
    let mut batch = ImageBatch::new();
    batch
        .append(vec![
            candidate("a.png", "image/png"),
            candidate("b.png", "image/png"),
        ])
        .unwrap();

    let snapshot = batch.snapshot();
    batch.remove_at(0).unwrap();
    batch.clear();

    assert_eq!(snapshot.len(), 2);
    assert_eq!(snapshot[0].name, "a.png");
}

#[test]
fn test_suggested_filename_single_image() {
    let mut batch = ImageBatch::new();
    batch
        .append(vec![candidate("holiday photo.png", "image/png")])
        .unwrap();
    assert_eq!(batch.suggested_filename(), "holiday photo.pdf");
}

#[test]
fn test_suggested_filename_multiple_images() {
    let mut batch = ImageBatch::new();
    batch
        .append(vec![
            candidate("a.png", "image/png"),
            candidate("b.png", "image/png"),
        ])
        .unwrap();
    assert_eq!(batch.suggested_filename(), "converted-images.pdf");
}

#[test]
fn test_format_byte_size() {
    assert_eq!(format_byte_size(0), "0 Bytes");
    assert_eq!(format_byte_size(512), "512 Bytes");
    assert_eq!(format_byte_size(1024), "1 KB");
    assert_eq!(format_byte_size(1536), "1.5 KB");
    assert_eq!(format_byte_size(1_258_291), "1.2 MB");
    assert_eq!(format_byte_size(1024 * 1024 * 1024), "1 GB");
}
