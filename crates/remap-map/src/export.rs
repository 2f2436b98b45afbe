//! CSV regeneration from a parsed table and a complete mapping.

use csv::{Terminator, WriterBuilder};
use tracing::debug;

use remap_model::{CellValue, OutputDocument, Table};

use crate::error::{MappingError, Result};
use crate::plan::{CompleteMapping, RenamePlan};

/// Field separator of every generated document, whatever the upload used.
pub const OUTPUT_SEPARATOR: u8 = b',';

/// Writes the mapped columns of `table` as comma-separated text.
///
/// Only source columns named in the mapping survive, renamed to their
/// canonical names and ordered by the [`RenamePlan`]. The header row holds the
/// canonical names; there is no index column. A row shorter than the header
/// is written with empty fields for the cells it lacks.
///
/// # Errors
///
/// [`MappingError::ColumnNotFound`] when a selected source column is not one
/// of the table's columns.
pub fn export(table: &Table, mapping: &CompleteMapping) -> Result<OutputDocument> {
    let plan = RenamePlan::from_mapping(mapping);
    let mut selected: Vec<(usize, &str)> = Vec::with_capacity(plan.len());
    for step in plan.steps() {
        let idx = table
            .column_index(&step.source)
            .ok_or_else(|| MappingError::ColumnNotFound {
                column: step.source.clone(),
                canonical: step.canonical.clone(),
            })?;
        selected.push((idx, step.canonical.as_str()));
    }

    let mut writer = WriterBuilder::new()
        .delimiter(OUTPUT_SEPARATOR)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());
    writer.write_record(selected.iter().map(|(_, canonical)| *canonical))?;
    for row in &table.rows {
        writer.write_record(
            selected
                .iter()
                .map(|(idx, _)| row.get(*idx).map_or("", CellValue::as_str)),
        )?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| csv::Error::from(e.into_error()))?;
    let content = String::from_utf8(bytes)?;

    debug!(
        columns = selected.len(),
        dropped = table.width().saturating_sub(selected.len()),
        rows = table.height(),
        "generated csv"
    );
    Ok(OutputDocument::new(content))
}

#[cfg(test)]
mod tests {
    use remap_model::ColumnMapping;

    use super::*;
    use crate::plan::validate;

    fn table(columns: &[&str], rows: &[&[&str]]) -> Table {
        let mut table = Table::new(columns.iter().map(|c| (*c).to_string()).collect());
        for row in rows {
            table.push_row(row.iter().map(|v| CellValue::from_field(v)).collect());
        }
        table
    }

    fn complete(pairs: &[(&str, &str)]) -> CompleteMapping {
        let mut mapping = ColumnMapping::unmapped(pairs.iter().map(|(c, _)| *c));
        for (canonical, source) in pairs {
            mapping.assign(canonical, *source).unwrap();
        }
        validate(mapping).unwrap()
    }

    #[test]
    fn renames_and_selects_mapped_columns() {
        let table = table(&["foo", "bar"], &[&["1", "2"], &["3", "4"]]);
        let doc = export(&table, &complete(&[("id", "foo"), ("value", "bar")])).unwrap();
        assert_eq!(doc.as_str(), "id,value\n1,2\n3,4\n");
    }

    #[test]
    fn drops_unmapped_source_columns() {
        let table = table(&["X", "Y", "Z"], &[&["1", "2", "3"], &["4", "5", "6"]]);
        let doc = export(&table, &complete(&[("A", "X")])).unwrap();
        assert_eq!(doc.as_str(), "A\n1\n4\n");
    }

    #[test]
    fn collision_emits_single_column_named_after_last() {
        let table = table(&["X", "Y"], &[&["1", "a"], &["2", "b"]]);
        let doc = export(&table, &complete(&[("A", "X"), ("B", "X")])).unwrap();
        assert_eq!(doc.as_str(), "B\n1\n2\n");
    }

    #[test]
    fn follows_canonical_order_not_source_order() {
        let table = table(&["a", "b", "c"], &[&["1", "2", "3"]]);
        let doc = export(&table, &complete(&[("third", "c"), ("first", "a")])).unwrap();
        assert_eq!(doc.as_str(), "third,first\n3,1\n");
    }

    #[test]
    fn quotes_fields_that_need_it() {
        let table = table(&["name", "city"], &[&["Doe, Jane", "Paris"], &["", "Oslo"]]);
        let doc = export(&table, &complete(&[("who", "name"), ("where", "city")])).unwrap();
        assert_eq!(doc.as_str(), "who,where\n\"Doe, Jane\",Paris\n,Oslo\n");
    }

    #[test]
    fn canonical_name_matching_a_dropped_column_is_not_duplicated() {
        let table = table(&["A", "X"], &[&["old", "new"]]);
        let doc = export(&table, &complete(&[("A", "X")])).unwrap();
        assert_eq!(doc.as_str(), "A\nnew\n");
    }

    #[test]
    fn unknown_source_column_is_an_error() {
        let table = table(&["foo"], &[&["1"]]);
        let err = export(&table, &complete(&[("id", "missing")])).unwrap_err();
        assert!(matches!(
            err,
            MappingError::ColumnNotFound { ref column, ref canonical }
                if column == "missing" && canonical == "id"
        ));
    }

    #[test]
    fn short_rows_export_empty_fields() {
        let table: Table = serde_json::from_str(
            r#"{"columns":["X","Y"],"rows":[[{"kind":"Text","value":"1"}]]}"#,
        )
        .unwrap();
        let doc = export(&table, &complete(&[("A", "X"), ("B", "Y")])).unwrap();
        assert_eq!(doc.as_str(), "A,B\n1,\n");
    }

    #[test]
    fn header_only_table_exports_header() {
        let table = table(&["foo", "bar"], &[]);
        let doc = export(&table, &complete(&[("id", "foo")])).unwrap();
        assert_eq!(doc.as_str(), "id\n");
    }
}
