//! Column mapping and CSV regeneration.
//!
//! The flow for one "generate" interaction:
//!
//! 1. [`build_mapping`] offers every source column to every canonical column.
//! 2. The user fills a [`remap_model::ColumnMapping`].
//! 3. [`validate`] turns it into a [`CompleteMapping`] or reports the
//!    unmapped canonical columns.
//! 4. [`export`] renames, selects and re-serializes the table as
//!    comma-separated text.

#![deny(unsafe_code)]

pub mod error;
pub mod export;
pub mod plan;
pub mod slots;
pub mod summary;

pub use error::{MappingError, Result};
pub use export::{OUTPUT_SEPARATOR, export};
pub use plan::{CompleteMapping, RenamePlan, RenameStep, validate};
pub use slots::{MappingSlot, build_mapping};
pub use summary::{MappingLine, MappingSummary};
