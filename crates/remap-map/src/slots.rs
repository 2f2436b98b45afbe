//! Per-column selection choices offered to the user.

use serde::Serialize;

use remap_model::Table;

/// One canonical column and every source column it may be mapped to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MappingSlot {
    pub canonical: String,
    /// Source columns in header order.
    pub candidates: Vec<String>,
}

impl MappingSlot {
    pub fn accepts(&self, source: &str) -> bool {
        self.candidates.iter().any(|candidate| candidate == source)
    }
}

/// Builds one slot per canonical column, in canonical order.
///
/// Every slot offers the full set of the table's columns; selecting a
/// source column in one slot never removes it from another.
pub fn build_mapping<S: AsRef<str>>(canonical_columns: &[S], table: &Table) -> Vec<MappingSlot> {
    canonical_columns
        .iter()
        .map(|canonical| MappingSlot {
            canonical: canonical.as_ref().to_string(),
            candidates: table.columns.clone(),
        })
        .collect()
}
