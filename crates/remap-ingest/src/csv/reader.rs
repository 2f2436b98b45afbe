//! Delimited-text parsing into a [`Table`].

use std::path::Path;

use csv::ReaderBuilder;
use tracing::debug;

use remap_model::{CellValue, Table};

use crate::error::{IngestError, ParseFailure, Result};

use super::header::normalize_headers;

/// File extensions accepted as delimited text (compared case-insensitively).
pub const DELIMITED_TEXT_EXTENSIONS: &[&str] = &["csv", "tsv"];

/// One record as read from the text, before it becomes a table row.
struct RawRecord {
    /// 1-based line the record starts on.
    line: u64,
    fields: Vec<String>,
}

/// Returns true if `filename` carries a delimited-text extension.
pub fn is_delimited_text(filename: &str) -> bool {
    Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            DELIMITED_TEXT_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
}

/// Parses uploaded bytes into a table.
///
/// The first non-blank record is the header; every later record is a data
/// row. A single ASCII separator is read with RFC 4180 quoting; any longer
/// separator splits each line on the literal string.
///
/// # Errors
///
/// - [`IngestError::UnsupportedFormat`] when `filename` is not `.csv`/`.tsv`
/// - [`IngestError::Parse`] when the bytes are not UTF-8, the separator is
///   empty, there is no header, or a row has more fields than the header
pub fn parse(raw: &[u8], filename: &str, separator: &str) -> Result<Table> {
    if !is_delimited_text(filename) {
        return Err(IngestError::UnsupportedFormat {
            filename: filename.to_string(),
        });
    }
    if separator.is_empty() {
        return Err(IngestError::parse(filename, ParseFailure::EmptySeparator));
    }

    let text = std::str::from_utf8(raw).map_err(|e| IngestError::parse(filename, e))?;
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    let records = match single_byte_delimiter(separator) {
        Some(delimiter) => read_quoted(text, delimiter),
        None => Ok(split_literal(text, separator)),
    }
    .map_err(|e| IngestError::parse(filename, e))?;

    let table = build_table(records).map_err(|e| IngestError::parse(filename, e))?;
    debug!(
        filename,
        separator,
        columns = table.width(),
        rows = table.height(),
        "parsed upload"
    );
    Ok(table)
}

fn single_byte_delimiter(separator: &str) -> Option<u8> {
    match separator.as_bytes() {
        [byte] if byte.is_ascii() => Some(*byte),
        _ => None,
    }
}

fn read_quoted(text: &str, delimiter: u8) -> std::result::Result<Vec<RawRecord>, ParseFailure> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter)
        .from_reader(text.as_bytes());
    let mut records = Vec::new();
    for record in reader.records() {
        let record = record?;
        records.push(RawRecord {
            line: record.position().map_or(0, csv::Position::line),
            fields: record.iter().map(str::to_string).collect(),
        });
    }
    Ok(records)
}

fn split_literal(text: &str, separator: &str) -> Vec<RawRecord> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.is_empty())
        .map(|(idx, line)| RawRecord {
            line: idx as u64 + 1,
            fields: line.split(separator).map(str::to_string).collect(),
        })
        .collect()
}

fn build_table(records: Vec<RawRecord>) -> std::result::Result<Table, ParseFailure> {
    let mut records = records.into_iter();
    let header = records.next().ok_or(ParseFailure::MissingHeader)?;
    let mut table = Table::new(normalize_headers(&header.fields));
    for record in records {
        if record.fields.len() > table.width() {
            return Err(ParseFailure::RaggedRow {
                line: record.line,
                expected: table.width(),
                found: record.fields.len(),
            });
        }
        table.push_row(
            record
                .fields
                .iter()
                .map(|field| CellValue::from_field(field))
                .collect(),
        );
    }
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(table: &Table) -> Vec<Vec<&str>> {
        table
            .rows
            .iter()
            .map(|row| row.iter().map(CellValue::as_str).collect())
            .collect()
    }

    #[test]
    fn test_parse_semicolon_separated() {
        let table = parse(b"foo;bar\n1;2\n3;4", "data.csv", ";").unwrap();
        assert_eq!(table.columns, vec!["foo", "bar"]);
        assert_eq!(texts(&table), vec![vec!["1", "2"], vec!["3", "4"]]);
    }

    #[test]
    fn test_parse_quoted_fields() {
        let table = parse(
            b"name,note\n\"Doe, Jane\",\"said \"\"hi\"\"\"\n",
            "people.csv",
            ",",
        )
        .unwrap();
        assert_eq!(texts(&table), vec![vec!["Doe, Jane", "said \"hi\""]]);
    }

    #[test]
    fn test_parse_multi_character_separator() {
        let table = parse(b"a||b||c\r\n1||2||3\r\n", "data.csv", "||").unwrap();
        assert_eq!(table.columns, vec!["a", "b", "c"]);
        assert_eq!(texts(&table), vec![vec!["1", "2", "3"]]);
    }

    #[test]
    fn test_parse_tab_separated() {
        let table = parse(b"a\tb\n1\t2\n", "data.TSV", "\t").unwrap();
        assert_eq!(table.columns, vec!["a", "b"]);
        assert_eq!(table.height(), 1);
    }

    #[test]
    fn test_parse_rejects_other_extensions() {
        for filename in ["data.xlsx", "data.csv.gz", "data", "csv"] {
            let err = parse(b"a,b\n1,2\n", filename, ",").unwrap_err();
            assert!(
                matches!(err, IngestError::UnsupportedFormat { .. }),
                "{filename} should be unsupported"
            );
        }
        assert!(is_delimited_text("DATA.CSV"));
    }

    #[test]
    fn test_parse_pads_short_rows() {
        let table = parse(b"a,b,c\n1,2\n", "data.csv", ",").unwrap();
        assert_eq!(
            table.rows[0],
            vec![
                CellValue::Text("1".into()),
                CellValue::Text("2".into()),
                CellValue::Missing
            ]
        );
    }

    #[test]
    fn test_parse_rejects_long_rows() {
        let err = parse(b"a,b\n1,2\n3,4,5\n", "data.csv", ",").unwrap_err();
        match err {
            IngestError::Parse {
                source:
                    ParseFailure::RaggedRow {
                        line,
                        expected,
                        found,
                    },
                ..
            } => {
                assert_eq!((line, expected, found), (3, 2, 3));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_parse_skips_blank_lines_and_bom() {
        let table = parse("\u{feff}a,b\n\n1,2\n\n".as_bytes(), "data.csv", ",").unwrap();
        assert_eq!(table.columns, vec!["a", "b"]);
        assert_eq!(table.height(), 1);
    }

    #[test]
    fn test_parse_keeps_quoted_empty_single_column_cell() {
        let table = parse(b"A\n1\n\"\"\n2\n", "data.csv", ",").unwrap();
        assert_eq!(table.columns, vec!["A"]);
        assert_eq!(texts(&table), vec![vec!["1"], vec![""], vec!["2"]]);
        assert!(table.rows[1][0].is_missing());
    }

    #[test]
    fn test_parse_keeps_empty_fields_as_missing() {
        let table = parse(b"a,b\n,\n", "data.csv", ",").unwrap();
        assert_eq!(table.height(), 1);
        assert!(table.rows[0].iter().all(CellValue::is_missing));
    }

    #[test]
    fn test_parse_header_only() {
        let table = parse(b"a,b\n", "data.csv", ",").unwrap();
        assert_eq!(table.width(), 2);
        assert_eq!(table.height(), 0);
    }

    #[test]
    fn test_parse_failures() {
        let utf8 = parse(&[0x61, 0xff, 0x0a], "data.csv", ",").unwrap_err();
        assert!(matches!(
            utf8,
            IngestError::Parse {
                source: ParseFailure::Utf8(_),
                ..
            }
        ));

        let empty = parse(b"", "data.csv", ",").unwrap_err();
        assert!(matches!(
            empty,
            IngestError::Parse {
                source: ParseFailure::MissingHeader,
                ..
            }
        ));

        let separator = parse(b"a,b\n", "data.csv", "").unwrap_err();
        assert!(matches!(
            separator,
            IngestError::Parse {
                source: ParseFailure::EmptySeparator,
                ..
            }
        ));
    }

    #[test]
    fn test_parse_renames_duplicate_headers() {
        let table = parse(b"x,x,\n1,2,3\n", "data.csv", ",").unwrap();
        assert_eq!(table.columns, vec!["x", "x.1", "Unnamed: 2"]);
    }
}
