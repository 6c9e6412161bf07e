//! In-memory statistics table.
//!
//! A FlowJo table export has one identifier column (sample names) followed by
//! one numeric column per gate statistic. Annotation adds the categorical
//! `Label` and `Group` columns.

use super::types::CellValue;
use crate::annotate::{GROUP_COLUMN, LABEL_COLUMN};
use crate::common::{Error, Result};

/// A named column of cells.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub cells: Vec<CellValue>,
}

impl Column {
    /// Create a column from a name and its cells.
    pub fn new(name: impl Into<String>, cells: Vec<CellValue>) -> Self {
        Self {
            name: name.into(),
            cells,
        }
    }

    /// Create a text column from string values.
    pub fn from_strings(name: impl Into<String>, values: Vec<String>) -> Self {
        Self::new(name, values.into_iter().map(CellValue::Text).collect())
    }

    /// True when every non-empty cell is a number and at least one is.
    pub fn is_numeric(&self) -> bool {
        let mut seen_number = false;
        for cell in &self.cells {
            match cell {
                CellValue::Number(_) => seen_number = true,
                CellValue::Empty => {},
                CellValue::Text(_) => return false,
            }
        }
        seen_number
    }

    /// Display text of each cell, used for categorical columns.
    pub fn text_values(&self) -> Vec<String> {
        self.cells.iter().map(|c| c.to_string()).collect()
    }
}

/// Column-oriented table with a shared row count.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    columns: Vec<Column>,
}

impl Table {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from a header and rows.
    ///
    /// Short rows are padded with empty cells. Rows wider than the header are
    /// rejected. Blank header names are replaced with `Unnamed: <index>`.
    pub fn from_rows(header: Vec<String>, rows: Vec<Vec<CellValue>>) -> Result<Self> {
        let mut columns: Vec<Column> = header
            .into_iter()
            .enumerate()
            .map(|(index, name)| {
                let name = if name.trim().is_empty() {
                    format!("Unnamed: {}", index)
                } else {
                    name
                };
                Column::new(name, Vec::with_capacity(rows.len()))
            })
            .collect();

        let width = columns.len();
        for (row_idx, row) in rows.into_iter().enumerate() {
            if row.len() > width {
                // Header is line 1
                return Err(Error::ParseError(format!(
                    "Expected {} fields in line {}, saw {}",
                    width,
                    row_idx + 2,
                    row.len()
                )));
            }
            let mut cells = row.into_iter();
            for column in columns.iter_mut() {
                column.cells.push(cells.next().unwrap_or(CellValue::Empty));
            }
        }

        Ok(Self { columns })
    }

    /// Build a table directly from columns of equal length.
    pub fn from_columns(columns: Vec<Column>) -> Result<Self> {
        let mut table = Self::new();
        for column in columns {
            let position = table.column_count();
            table.insert_column(position, column)?;
        }
        Ok(table)
    }

    /// Number of data rows.
    #[inline]
    pub fn row_count(&self) -> usize {
        self.columns.first().map(|c| c.cells.len()).unwrap_or(0)
    }

    #[inline]
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Look up a column by name.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Cell at a row and column index.
    pub fn cell(&self, row: usize, column: usize) -> Option<&CellValue> {
        self.columns.get(column).and_then(|c| c.cells.get(row))
    }

    /// Insert a column, clamping `position` to the current column count.
    pub fn insert_column(&mut self, position: usize, column: Column) -> Result<()> {
        if self.column(&column.name).is_some() {
            return Err(Error::DuplicateColumn(column.name));
        }
        if !self.columns.is_empty() && column.cells.len() != self.row_count() {
            return Err(Error::ColumnLength {
                name: column.name,
                expected: self.row_count(),
                got: column.cells.len(),
            });
        }
        let position = position.min(self.columns.len());
        self.columns.insert(position, column);
        Ok(())
    }

    /// Rename every column with `f`.
    pub fn rename_columns<F>(&mut self, mut f: F)
    where
        F: FnMut(&str) -> String,
    {
        for column in &mut self.columns {
            column.name = f(&column.name);
        }
    }

    /// Keep only the first `rows` rows.
    pub fn truncate_rows(&mut self, rows: usize) {
        for column in &mut self.columns {
            column.cells.truncate(rows);
        }
    }

    /// Drop the last `n` rows, or every row when there are fewer than `n`.
    pub fn drop_last_rows(&mut self, n: usize) {
        let keep = self.row_count().saturating_sub(n);
        self.truncate_rows(keep);
    }

    /// Numeric columns to chart, in table order.
    ///
    /// The first column identifies samples and the annotation columns are
    /// categorical, so none of them is charted.
    pub fn value_columns(&self) -> Vec<&Column> {
        self.columns
            .iter()
            .skip(1)
            .filter(|c| c.name != LABEL_COLUMN && c.name != GROUP_COLUMN)
            .filter(|c| {
                let numeric = c.is_numeric();
                if !numeric {
                    tracing::warn!(column = %c.name, "skipping non-numeric column");
                }
                numeric
            })
            .collect()
    }
}
