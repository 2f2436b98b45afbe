//! Validated mappings and the rename plan derived from them.

use serde::Serialize;

use remap_model::{ColumnMapping, MappingEntry};

use crate::error::{MappingError, Result};

/// A [`ColumnMapping`] in which every canonical column has a source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompleteMapping {
    mapping: ColumnMapping,
}

impl CompleteMapping {
    pub fn as_mapping(&self) -> &ColumnMapping {
        &self.mapping
    }
}

/// Checks that every canonical column has a source column selected.
///
/// # Errors
///
/// [`MappingError::Incomplete`] lists the unmapped canonical columns in
/// canonical order; [`MappingError::NoColumns`] rejects an empty mapping.
pub fn validate(mapping: ColumnMapping) -> Result<CompleteMapping> {
    if mapping.is_empty() {
        return Err(MappingError::NoColumns);
    }
    let unmapped = mapping.unmapped_columns();
    if !unmapped.is_empty() {
        return Err(MappingError::Incomplete {
            unmapped: unmapped.into_iter().map(str::to_string).collect(),
        });
    }
    Ok(CompleteMapping { mapping })
}

/// One output column: the source it reads from and the name it is written as.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenameStep {
    pub source: String,
    pub canonical: String,
    /// Earlier canonical columns that selected the same source and lost to
    /// `canonical`.
    pub shadowed: Vec<String>,
}

/// Source-to-canonical rename table, in first-insertion order.
///
/// Built by walking the mapping in canonical order. When two canonical
/// columns select the same source, the later one replaces the name but the
/// step keeps the position where the source first appeared.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RenamePlan {
    steps: Vec<RenameStep>,
}

impl RenamePlan {
    /// Builds the plan from mapping entries, skipping unmapped ones.
    pub fn from_entries(entries: &[MappingEntry]) -> Self {
        let mut steps: Vec<RenameStep> = Vec::new();
        for entry in entries {
            let Some(source) = entry.source.as_deref() else {
                continue;
            };
            match steps.iter_mut().find(|step| step.source == source) {
                Some(step) => {
                    let previous = std::mem::replace(&mut step.canonical, entry.canonical.clone());
                    step.shadowed.push(previous);
                }
                None => steps.push(RenameStep {
                    source: source.to_string(),
                    canonical: entry.canonical.clone(),
                    shadowed: Vec::new(),
                }),
            }
        }
        Self { steps }
    }

    pub fn from_mapping(mapping: &CompleteMapping) -> Self {
        Self::from_entries(mapping.as_mapping().entries())
    }

    pub fn steps(&self) -> &[RenameStep] {
        &self.steps
    }

    /// Output column names in output order.
    pub fn output_columns(&self) -> Vec<&str> {
        self.steps.iter().map(|step| step.canonical.as_str()).collect()
    }

    /// Steps where more than one canonical column selected the same source.
    pub fn collisions(&self) -> impl Iterator<Item = &RenameStep> {
        self.steps.iter().filter(|step| !step.shadowed.is_empty())
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}
