//! The end-to-end run: load, annotate, rename, chart, export.

use std::path::PathBuf;

use tracing::{debug, info};

use crate::annotate::{add_groups, add_labels};
use crate::chart::{ChartOptions, render_document};
use crate::common::Result;
use crate::gating::trim_column_names;
use crate::sheet::Table;
use crate::sheet::text::{TextConfig, load_table_with_config};
use crate::sheet::xlsx::write_table;

/// Settings for one run of the tool.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Tab-separated FlowJo table
    pub input: PathBuf,
    /// Chart document to write
    pub output: PathBuf,
    /// Gate path depth kept in column names
    pub gate_depth: Option<usize>,
    /// Labels tiled across the rows
    pub labels: Option<Vec<String>>,
    /// Groups repeated in contiguous blocks
    pub groups: Option<Vec<String>>,
    /// Spreadsheet export of the final table
    pub excel: Option<PathBuf>,
    pub text: TextConfig,
    pub chart: ChartOptions,
}

impl RunConfig {
    pub fn new(input: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
            gate_depth: None,
            labels: None,
            groups: None,
            excel: None,
            text: TextConfig::default(),
            chart: ChartOptions::default(),
        }
    }

    pub fn with_gate_depth(mut self, depth: usize) -> Self {
        self.gate_depth = Some(depth);
        self
    }

    /// Set the labels; an empty list means no labels.
    pub fn with_labels(mut self, labels: Vec<String>) -> Self {
        self.labels = (!labels.is_empty()).then_some(labels);
        self
    }

    /// Set the groups; an empty list means no groups.
    pub fn with_groups(mut self, groups: Vec<String>) -> Self {
        self.groups = (!groups.is_empty()).then_some(groups);
        self
    }

    pub fn with_excel(mut self, path: impl Into<PathBuf>) -> Self {
        self.excel = Some(path.into());
        self
    }
}

/// What a run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub rows: usize,
    pub columns: usize,
    pub pages: usize,
}

/// Annotate and rename a loaded table.
///
/// Annotation errors surface here, before anything is written.
pub fn prepare_table(mut table: Table, config: &RunConfig) -> Result<Table> {
    if let Some(labels) = config.labels.as_deref().filter(|l| !l.is_empty()) {
        add_labels(&mut table, labels)?;
    }
    if let Some(groups) = config.groups.as_deref().filter(|g| !g.is_empty()) {
        add_groups(&mut table, groups)?;
    }
    if let Some(depth) = config.gate_depth {
        trim_column_names(&mut table, depth)?;
    }
    Ok(table)
}

/// Run the whole tool.
pub fn run(config: &RunConfig) -> Result<RunSummary> {
    let table = load_table_with_config(&config.input, config.text.clone())?;
    info!(
        path = %config.input.display(),
        rows = table.row_count(),
        columns = table.column_count(),
        "loaded table"
    );

    let table = prepare_table(table, config)?;
    debug!(columns = ?table.column_names(), "final columns");

    let pages = render_document(&table, &config.output, &config.chart)?;

    if let Some(ref excel) = config.excel {
        write_table(&table, excel)?;
    }

    Ok(RunSummary {
        rows: table.row_count(),
        columns: table.column_count(),
        pages,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::Error;
    use crate::sheet::text::load_table_from_bytes;

    const TABLE: &[u8] = b"\tLymph/CD3+/CD4+ | Freq. of Parent\tLymph/CD3+/CD8+ | Freq. of Parent\n\
s1.fcs\t40\t20\n\
s2.fcs\t42\t22\n\
s3.fcs\t38\t25\n\
s4.fcs\t45\t18\n\
Mean\t41.25\t21.25\n\
SD\t2.5\t2.9\n";

    fn loaded() -> Table {
        load_table_from_bytes(TABLE, TextConfig::default()).unwrap()
    }

    #[test]
    fn test_prepare_table_order() {
        let config = RunConfig::new("in.txt", "out.pdf")
            .with_labels(vec!["ctrl".into(), "stim".into()])
            .with_groups(vec!["d0".into(), "d7".into()])
            .with_gate_depth(0);
        let table = prepare_table(loaded(), &config).unwrap();
        assert_eq!(
            table.column_names(),
            vec![
                "Unnamed: 0",
                "Label",
                "Group",
                "CD4+ | Freq. of Parent",
                "CD8+ | Freq. of Parent"
            ]
        );
        assert_eq!(table.row_count(), 4);
    }

    #[test]
    fn test_empty_annotations_are_absent() {
        let config = RunConfig::new("in.txt", "out.pdf")
            .with_labels(Vec::new())
            .with_groups(Vec::new());
        assert!(config.labels.is_none() && config.groups.is_none());
        let table = prepare_table(loaded(), &config).unwrap();
        assert_eq!(table.column_count(), 3);
    }

    #[test]
    fn test_uneven_labels_rejected() {
        let config = RunConfig::new("in.txt", "out.pdf")
            .with_labels(vec!["a".into(), "b".into(), "c".into()]);
        let err = prepare_table(loaded(), &config).unwrap_err();
        assert!(matches!(err, Error::UnevenAnnotation { count: 3, rows: 4, .. }));
    }
}
