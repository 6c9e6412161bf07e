//! fjstatplot - plot FlowJo gating statistics
//!
//! This library turns the statistics table exported by FlowJo's table
//! editor into a paginated PDF of bar and swarm charts, one panel per gate
//! statistic, optionally annotating the samples with labels and groups first.
//!
//! # Features
//!
//! - **Loading**: Mac OS Roman tab-separated tables, summary rows dropped
//! - **Annotation**: labels tiled across samples, groups in contiguous blocks
//! - **Gate paths**: column names trimmed to a chosen gate depth
//! - **Charts**: mean ± SD bars with a swarm of the samples, four per page
//! - **Export**: the final table as an XLSX workbook
//!
//! # Example
//!
//! ```no_run
//! use fjstatplot::pipeline::{RunConfig, run};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = RunConfig::new("stats.txt", "stats.pdf")
//!     .with_labels(vec!["ctrl".into(), "stim".into()])
//!     .with_groups(vec!["donor1".into(), "donor2".into()])
//!     .with_gate_depth(1)
//!     .with_excel("stats.xlsx");
//!
//! let summary = run(&config)?;
//! println!("{} pages", summary.pages);
//! # Ok(())
//! # }
//! ```
//!
//! # Example - Individual stages
//!
//! ```no_run
//! use fjstatplot::annotate::add_labels;
//! use fjstatplot::chart::{ChartOptions, render_document};
//! use fjstatplot::gating::trim_column_names;
//! use fjstatplot::sheet::text::load_table;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut table = load_table("stats.txt")?;
//! add_labels(&mut table, &["ctrl".to_string(), "stim".to_string()])?;
//! trim_column_names(&mut table, 0)?;
//! render_document(&table, "stats.pdf", &ChartOptions::default())?;
//! # Ok(())
//! # }
//! ```

pub mod annotate;
pub mod chart;
pub mod common;
pub mod gating;
pub mod logging;
pub mod pdf;
pub mod pipeline;
pub mod sheet;

pub use common::{Error, Result};
pub use sheet::{CellValue, Column, Table};
