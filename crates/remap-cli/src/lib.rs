//! Interaction handlers and logging for the CSV column remapper.

pub mod handlers;
pub mod logging;
