//! Canonical-to-source column mapping.
//!
//! A [`ColumnMapping`] always holds one entry per canonical column, in the
//! order the columns were configured. Entries start out unmapped and are
//! assigned individually; nothing stops two canonical columns from selecting
//! the same source column.

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};

/// One canonical column and the source column selected for it, if any.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingEntry {
    /// Configured target column name.
    pub canonical: String,
    /// Source column chosen from the uploaded file.
    pub source: Option<String>,
}

impl MappingEntry {
    pub fn is_mapped(&self) -> bool {
        self.source.is_some()
    }
}

/// Ordered list of canonical columns and their selected source columns.
///
/// Deserializing rejects a canonical column that appears more than once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "MappingPayload")]
pub struct ColumnMapping {
    entries: Vec<MappingEntry>,
}

/// Wire form of a [`ColumnMapping`] before its entries are checked.
#[derive(Deserialize)]
struct MappingPayload {
    entries: Vec<MappingEntry>,
}

impl TryFrom<MappingPayload> for ColumnMapping {
    type Error = ModelError;

    fn try_from(payload: MappingPayload) -> Result<Self> {
        for (idx, entry) in payload.entries.iter().enumerate() {
            if payload.entries[..idx]
                .iter()
                .any(|earlier| earlier.canonical == entry.canonical)
            {
                return Err(ModelError::DuplicateSelection {
                    column: entry.canonical.clone(),
                });
            }
        }
        Ok(Self {
            entries: payload.entries,
        })
    }
}

impl ColumnMapping {
    /// Creates a mapping with every canonical column unmapped.
    pub fn unmapped<I, S>(canonical_columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let entries = canonical_columns
            .into_iter()
            .map(|canonical| MappingEntry {
                canonical: canonical.into(),
                source: None,
            })
            .collect();
        Self { entries }
    }

    /// Creates a mapping from `(canonical, source)` selections given in
    /// canonical order.
    ///
    /// The selections must name every canonical column exactly once.
    pub fn from_selections<I, S>(canonical_columns: &[S], selections: I) -> Result<Self>
    where
        I: IntoIterator<Item = (String, Option<String>)>,
        S: AsRef<str>,
    {
        let mut mapping = Self::unmapped(canonical_columns.iter().map(|c| c.as_ref().to_string()));
        let mut seen = vec![false; mapping.entries.len()];
        for (canonical, source) in selections {
            let idx = mapping.position(&canonical)?;
            if seen[idx] {
                return Err(ModelError::DuplicateSelection { column: canonical });
            }
            seen[idx] = true;
            mapping.entries[idx].source = source;
        }
        if let Some(idx) = seen.iter().position(|s| !s) {
            return Err(ModelError::MissingSelection {
                column: mapping.entries[idx].canonical.clone(),
            });
        }
        Ok(mapping)
    }

    /// Selects `source` for `canonical`, replacing any earlier choice.
    pub fn assign(&mut self, canonical: &str, source: impl Into<String>) -> Result<()> {
        let idx = self.position(canonical)?;
        self.entries[idx].source = Some(source.into());
        Ok(())
    }

    /// Clears the selection for `canonical`.
    pub fn clear(&mut self, canonical: &str) -> Result<()> {
        let idx = self.position(canonical)?;
        self.entries[idx].source = None;
        Ok(())
    }

    pub fn get(&self, canonical: &str) -> Option<Option<&str>> {
        self.entries
            .iter()
            .find(|entry| entry.canonical == canonical)
            .map(|entry| entry.source.as_deref())
    }

    pub fn entries(&self) -> &[MappingEntry] {
        &self.entries
    }

    pub fn canonical_columns(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.canonical.as_str())
    }

    /// Canonical columns still waiting for a selection, in canonical order.
    pub fn unmapped_columns(&self) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|entry| !entry.is_mapped())
            .map(|entry| entry.canonical.as_str())
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.entries.iter().all(MappingEntry::is_mapped)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn position(&self, canonical: &str) -> Result<usize> {
        self.entries
            .iter()
            .position(|entry| entry.canonical == canonical)
            .ok_or_else(|| ModelError::UnknownCanonicalColumn {
                column: canonical.to_string(),
            })
    }
}
