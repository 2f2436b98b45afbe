//! Human-readable view of the current mapping.

use std::fmt;

use serde::Serialize;

use remap_model::ColumnMapping;

use crate::plan::RenamePlan;

/// One canonical column and what it is currently mapped to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MappingLine {
    pub canonical: String,
    pub source: Option<String>,
    /// Later canonical column that takes over this selection on export.
    pub shadowed_by: Option<String>,
}

/// Mapping state as shown next to the selection controls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MappingSummary {
    pub lines: Vec<MappingLine>,
    pub mapped: usize,
    pub unmapped: usize,
}

impl MappingSummary {
    pub fn from_mapping(mapping: &ColumnMapping) -> Self {
        let plan = RenamePlan::from_entries(mapping.entries());
        let lines: Vec<MappingLine> = mapping
            .entries()
            .iter()
            .map(|entry| {
                let shadowed_by = entry.source.as_deref().and_then(|source| {
                    plan.collisions()
                        .find(|step| {
                            step.source == source && step.shadowed.contains(&entry.canonical)
                        })
                        .map(|step| step.canonical.clone())
                });
                MappingLine {
                    canonical: entry.canonical.clone(),
                    source: entry.source.clone(),
                    shadowed_by,
                }
            })
            .collect();
        let mapped = lines.iter().filter(|line| line.source.is_some()).count();
        Self {
            unmapped: lines.len() - mapped,
            mapped,
            lines,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.unmapped == 0
    }
}

impl fmt::Display for MappingSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Mapped columns:")?;
        for line in &self.lines {
            let source = line.source.as_deref().unwrap_or("None");
            write!(f, "- {}: {source}", line.canonical)?;
            if let Some(winner) = &line.shadowed_by {
                write!(f, " (overridden by {winner})")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
