use serde::{Deserialize, Serialize};

static MISSING_CELL: CellValue = CellValue::Missing;

/// Number of rows shown in a preview when the caller does not ask for more.
pub const DEFAULT_PREVIEW_ROWS: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value")]
pub enum CellValue {
    Text(String),
    Missing,
}

impl CellValue {
    /// Builds a cell from a raw field; empty fields become `Missing`.
    pub fn from_field(raw: &str) -> Self {
        if raw.is_empty() {
            Self::Missing
        } else {
            Self::Text(raw.to_string())
        }
    }

    /// Text as written back to delimited output (`""` for missing).
    pub fn as_str(&self) -> &str {
        match self {
            Self::Text(value) => value,
            Self::Missing => "",
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }
}

/// Parsed upload: ordered header names and the data rows beneath them.
///
/// Every row holds exactly one cell per column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<CellValue>>,
}

impl Table {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Appends a row, padding short rows with missing cells.
    ///
    /// Cells beyond the column count are discarded; callers that need to reject
    /// ragged input check the width before pushing.
    pub fn push_row(&mut self, mut row: Vec<CellValue>) {
        row.resize(self.columns.len(), CellValue::Missing);
        self.rows.push(row);
    }

    pub fn width(&self) -> usize {
        self.columns.len()
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|column| column == name)
    }

    /// Values of one column in row order.
    ///
    /// Rows that stop short of the column read as [`CellValue::Missing`].
    pub fn column_values(&self, name: &str) -> Option<Vec<&CellValue>> {
        let idx = self.column_index(name)?;
        Some(
            self.rows
                .iter()
                .map(|row| row.get(idx).unwrap_or(&MISSING_CELL))
                .collect(),
        )
    }

    /// First `n` data rows.
    pub fn head(&self, n: usize) -> &[Vec<CellValue>] {
        &self.rows[..n.min(self.rows.len())]
    }
}
