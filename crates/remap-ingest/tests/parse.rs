//! Integration tests for upload parsing.

use std::fs;

use proptest::prelude::*;
use remap_ingest::{IngestError, UploadedFile, parse};
use tempfile::TempDir;

#[test]
fn reads_upload_from_disk() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("orders.csv");
    fs::write(&path, "id;amount\n1;9.50\n2;12\n").expect("write csv");

    let upload = UploadedFile::from_path(&path).expect("read upload");
    assert_eq!(upload.filename, "orders.csv");

    let table = upload.parse(";").expect("parse upload");
    assert_eq!(table.columns, vec!["id", "amount"]);
    assert_eq!(table.height(), 2);
}

#[test]
fn missing_file_is_reported() {
    let dir = TempDir::new().expect("temp dir");
    let err = UploadedFile::from_path(&dir.path().join("absent.csv")).unwrap_err();
    assert!(matches!(err, IngestError::FileNotFound { .. }));
    assert!(!err.is_content_error());
}

#[test]
fn extension_is_checked_before_content() {
    let err = parse(&[0xff, 0xfe], "notes.txt", ",").unwrap_err();
    assert!(matches!(err, IngestError::UnsupportedFormat { .. }));
}

fn separator() -> impl Strategy<Value = &'static str> {
    prop_oneof![
        Just(","),
        Just(";"),
        Just("\t"),
        Just("|"),
        Just("||"),
        Just("::"),
        Just("<->"),
    ]
}

proptest! {
    #[test]
    fn shape_matches_header_and_data_lines(
        sep in separator(),
        width in 1usize..6,
        height in 0usize..12,
        seed in proptest::collection::vec("[a-z0-9]{1,8}", 72),
    ) {
        let mut lines = Vec::with_capacity(height + 1);
        for row in 0..=height {
            let fields: Vec<&str> = (0..width)
                .map(|col| seed[(row * width + col) % seed.len()].as_str())
                .collect();
            lines.push(fields.join(sep));
        }
        let text = lines.join("\n");

        let table = parse(text.as_bytes(), "generated.csv", sep).expect("parse generated text");
        prop_assert_eq!(table.width(), width);
        prop_assert_eq!(table.height(), height);
    }

    #[test]
    fn non_delimited_extensions_are_unsupported(
        stem in "[a-z]{1,8}",
        ext in "(xlsx|json|parquet|xml|txt|csv\\.zip)",
    ) {
        let filename = format!("{stem}.{ext}");
        let err = parse(b"a,b\n1,2\n", &filename, ",").unwrap_err();
        let unsupported = matches!(err, IngestError::UnsupportedFormat { .. });
        prop_assert!(unsupported);
    }
}
