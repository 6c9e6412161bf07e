//! Per-category summaries and the group/label layout of a panel.

use crate::annotate::{GROUP_COLUMN, LABEL_COLUMN};
use crate::sheet::{Column, Table};

/// Mean and spread of one category's values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    pub n: usize,
    pub mean: f64,
    /// Population standard deviation
    pub sd: f64,
}

impl Summary {
    #[inline]
    pub fn lower(&self) -> f64 {
        self.mean - self.sd
    }

    #[inline]
    pub fn upper(&self) -> f64 {
        self.mean + self.sd
    }
}

/// Summarize the finite values, or `None` when there are none.
pub fn summarize(values: &[f64]) -> Option<Summary> {
    let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if finite.is_empty() {
        return None;
    }
    let n = finite.len();
    let mean = finite.iter().sum::<f64>() / n as f64;
    let variance = finite.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n as f64;
    Some(Summary {
        n,
        mean,
        sd: variance.sqrt(),
    })
}

/// The values of one (group, label) cell of a panel.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryCell {
    pub group: usize,
    pub label: usize,
    pub values: Vec<f64>,
}

/// Distinct groups and labels of a table, in order of first appearance.
///
/// A table without a `Group` column has a single unnamed group; one without
/// a `Label` column has a single unnamed label.
#[derive(Debug, Clone)]
pub struct CategoryLayout {
    groups: Vec<String>,
    labels: Vec<String>,
    /// (group, label) index of every row
    rows: Vec<(usize, usize)>,
    has_labels: bool,
    has_groups: bool,
}

/// Distinct values in order of appearance and the index of each row's value.
fn index_values(values: Vec<String>) -> (Vec<String>, Vec<usize>) {
    let mut distinct: Vec<String> = Vec::new();
    let indices = values
        .into_iter()
        .map(|value| match distinct.iter().position(|d| *d == value) {
            Some(i) => i,
            None => {
                distinct.push(value);
                distinct.len() - 1
            },
        })
        .collect();
    (distinct, indices)
}

impl CategoryLayout {
    pub fn from_table(table: &Table) -> Self {
        let rows = table.row_count();
        let categorical = |name: &str| -> (Vec<String>, Vec<usize>, bool) {
            match table.column(name) {
                Some(column) => {
                    let (distinct, indices) = index_values(column.text_values());
                    (distinct, indices, true)
                },
                None => (vec![String::new()], vec![0; rows], false),
            }
        };

        let (groups, group_rows, has_groups) = categorical(GROUP_COLUMN);
        let (labels, label_rows, has_labels) = categorical(LABEL_COLUMN);
        // An empty table still gets one slot so axes can be built
        let groups = if groups.is_empty() { vec![String::new()] } else { groups };
        let labels = if labels.is_empty() { vec![String::new()] } else { labels };

        Self {
            groups,
            labels,
            rows: group_rows.into_iter().zip(label_rows).collect(),
            has_labels,
            has_groups,
        }
    }

    pub fn groups(&self) -> &[String] {
        &self.groups
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// True when the table has a `Label` column.
    pub fn has_labels(&self) -> bool {
        self.has_labels
    }

    /// True when the table has a `Group` column.
    pub fn has_groups(&self) -> bool {
        self.has_groups
    }

    /// Width of one label's bar in x units.
    pub fn dodge_width(&self, bar_width: f64) -> f64 {
        bar_width / self.labels.len() as f64
    }

    /// Centre of the bar for `label` within `group`.
    pub fn dodge_center(&self, group: usize, label: usize, bar_width: f64) -> f64 {
        group as f64 - bar_width / 2.0 + self.dodge_width(bar_width) * (label as f64 + 0.5)
    }

    /// Split a column's numeric values by (group, label), group-major.
    ///
    /// Non-numeric and non-finite cells are left out.
    pub fn cells(&self, column: &Column) -> Vec<CategoryCell> {
        let mut cells: Vec<CategoryCell> = (0..self.groups.len())
            .flat_map(|group| {
                (0..self.labels.len()).map(move |label| CategoryCell {
                    group,
                    label,
                    values: Vec::new(),
                })
            })
            .collect();

        for (cell, &(group, label)) in column.cells.iter().zip(&self.rows) {
            if let Some(value) = cell.as_number()
                && value.is_finite()
            {
                cells[group * self.labels.len() + label].values.push(value);
            }
        }
        cells
    }
}

/// Y range covering every value, every mean ± SD and zero, padded by 5%.
pub fn value_range(cells: &[CategoryCell]) -> (f64, f64) {
    let mut low = 0.0f64;
    let mut high = 0.0f64;
    for cell in cells {
        for &v in &cell.values {
            low = low.min(v);
            high = high.max(v);
        }
        if let Some(summary) = summarize(&cell.values) {
            low = low.min(summary.lower());
            high = high.max(summary.upper());
        }
    }
    let span = high - low;
    if span <= f64::EPSILON {
        return (low, low + 1.0);
    }
    let pad = span * 0.05;
    (if low < 0.0 { low - pad } else { low }, high + pad)
}
