//! Tabular data: the in-memory table, its TSV loader and XLSX export.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use fjstatplot::sheet::{text, xlsx};
//!
//! let table = text::load_table("stats.txt")?;
//! xlsx::write_table(&table, "stats.xlsx")?;
//! # Ok::<(), fjstatplot::common::Error>(())
//! ```

// Submodule declarations
pub mod table;
pub mod text;
pub mod types;
pub mod xlsx;

// Re-exports
pub use table::{Column, Table};
pub use types::CellValue;
