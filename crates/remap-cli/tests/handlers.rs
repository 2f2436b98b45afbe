//! Preview and generate interactions driven the way the front end drives them.

use remap_cli::handlers::{
    DEFAULT_SEPARATOR, GenerateRequest, GenerateResponse, INCOMPLETE_MAPPING_MESSAGE,
    PROCESSING_ERROR_MESSAGE, PreviewRequest, PreviewResponse, generate, new_mapping, preview,
    show_mapping,
};
use remap_config::RemapConfig;
use remap_ingest::UploadedFile;
use remap_model::{ColumnMapping, DEFAULT_OUTPUT_FILENAME};

const SEMICOLON_UPLOAD: &str = "data:text/csv;base64,Zm9vO2JhcgoxOzIKMzs0";

fn config() -> RemapConfig {
    RemapConfig::new(vec!["id".to_string(), "value".to_string()]).unwrap()
}

fn semicolon_upload() -> UploadedFile {
    UploadedFile::from_data_uri(SEMICOLON_UPLOAD, "upload.csv").unwrap()
}

fn generate_request(upload: UploadedFile, mapping: ColumnMapping) -> GenerateRequest {
    GenerateRequest {
        upload: Some(upload),
        separator: ";".to_string(),
        mapping,
    }
}

#[test]
fn preview_shows_head_and_offers_every_column() {
    let config = config();
    let request = PreviewRequest::new(Some(semicolon_upload()), ";");
    let PreviewResponse::Ready(preview) = preview(&config, &request) else {
        panic!("expected a preview");
    };
    assert_eq!(preview.filename, "upload.csv");
    assert_eq!(preview.columns, vec!["foo", "bar"]);
    assert_eq!(preview.rows, vec![vec!["1", "2"], vec!["3", "4"]]);
    assert_eq!(preview.total_rows, 2);
    assert_eq!(preview.slots.len(), 2);
    assert_eq!(preview.slots[0].canonical, "id");
    assert!(preview.slots.iter().all(|slot| slot.candidates == ["foo", "bar"]));
}

#[test]
fn preview_limits_rows() {
    let config = config();
    let body: String = (0..10).map(|i| format!("{i},{i}\n")).collect();
    let upload = UploadedFile::new("many.csv", format!("a,b\n{body}"));
    let request = PreviewRequest::new(Some(upload), DEFAULT_SEPARATOR);
    let PreviewResponse::Ready(preview) = preview(&config, &request) else {
        panic!("expected a preview");
    };
    assert_eq!(preview.rows.len(), 5);
    assert_eq!(preview.total_rows, 10);
}

#[test]
fn preview_of_unsupported_file_reports_processing_error() {
    let config = config();
    let upload = UploadedFile::new("notes.txt", "a,b\n1,2\n");
    let response = preview(&config, &PreviewRequest::new(Some(upload), DEFAULT_SEPARATOR));
    assert_eq!(
        response,
        PreviewResponse::Failed {
            message: PROCESSING_ERROR_MESSAGE.to_string()
        }
    );
}

#[test]
fn generate_regenerates_comma_separated_file() {
    let config = config();
    let mut mapping = new_mapping(&config);
    mapping.assign("id", "foo").unwrap();
    mapping.assign("value", "bar").unwrap();

    let GenerateResponse::Ready(artifact) =
        generate(&config, &generate_request(semicolon_upload(), mapping))
    else {
        panic!("expected a download");
    };
    assert_eq!(artifact.filename(), DEFAULT_OUTPUT_FILENAME);
    assert_eq!(artifact.document.as_str(), "id,value\n1,2\n3,4\n");
    assert_eq!(
        artifact.data_uri,
        "data:text/csv;base64,aWQsdmFsdWUKMSwyCjMsNAo="
    );
}

#[test]
fn generate_with_unmapped_column_lists_it() {
    let config = config();
    let mut mapping = new_mapping(&config);
    mapping.assign("id", "foo").unwrap();

    let response = generate(&config, &generate_request(semicolon_upload(), mapping));
    assert_eq!(
        response,
        GenerateResponse::Incomplete {
            message: INCOMPLETE_MAPPING_MESSAGE.to_string(),
            unmapped: vec!["value".to_string()],
        }
    );
}

#[test]
fn generate_with_unknown_source_column_fails() {
    let config = config();
    let mut mapping = new_mapping(&config);
    mapping.assign("id", "foo").unwrap();
    mapping.assign("value", "missing").unwrap();

    let response = generate(&config, &generate_request(semicolon_upload(), mapping));
    assert_eq!(
        response,
        GenerateResponse::Failed {
            message: PROCESSING_ERROR_MESSAGE.to_string()
        }
    );
}

#[test]
fn unreadable_upload_wins_over_incomplete_mapping() {
    let config = config();
    let upload = UploadedFile::new("report.xlsx", vec![0x50, 0x4b, 0x03, 0x04]);
    let response = generate(&config, &generate_request(upload, new_mapping(&config)));
    assert!(matches!(response, GenerateResponse::Failed { .. }));
}

#[test]
fn show_mapping_follows_configured_order() {
    let config = config();
    let mut mapping = ColumnMapping::unmapped(["value", "id"]);
    mapping.assign("value", "bar").unwrap();
    let summary = show_mapping(&config, &mapping);
    insta::assert_snapshot!(summary.to_string().trim_end(), @r"
    Mapped columns:
    - id: None
    - value: bar
    ");
}
