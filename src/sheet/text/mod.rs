//! Loading of FlowJo statistics tables.
//!
//! FlowJo's table editor exports tab-separated text in Mac OS Roman, with
//! one row per sample followed by two summary rows (Mean and SD). Loading
//! decodes the bytes, parses the rows and drops those summary rows.
//!
//! # Example
//!
//! ```rust,no_run
//! use fjstatplot::sheet::text::load_table;
//!
//! let table = load_table("stats.txt")?;
//! println!("{} samples, {} columns", table.row_count(), table.column_count());
//! # Ok::<(), fjstatplot::common::Error>(())
//! ```

pub mod config;
pub mod parser;

pub use config::TextConfig;
pub use parser::{TextParser, classify_field};

use std::io::{Cursor, Read};
use std::path::Path;

use crate::common::encoding::decode_table_bytes;
use crate::common::{Error, Result};
use crate::sheet::Table;

/// Load a table from a file with the default configuration.
pub fn load_table<P: AsRef<Path>>(path: P) -> Result<Table> {
    load_table_with_config(path, TextConfig::default())
}

/// Load a table from a file.
pub fn load_table_with_config<P: AsRef<Path>>(path: P, config: TextConfig) -> Result<Table> {
    let path = path.as_ref();
    let bytes = std::fs::read(path)?;
    tracing::debug!(path = %path.display(), bytes = bytes.len(), "read input table");
    load_table_from_bytes(&bytes, config)
}

/// Decode, parse and trim a table held in memory.
pub fn load_table_from_bytes(bytes: &[u8], config: TextConfig) -> Result<Table> {
    let text = decode_table_bytes(bytes);
    let mut cursor = Cursor::new(text.as_bytes());
    let summary_rows = config.summary_rows;
    let mut table = read_table(&mut cursor, config)?;

    let before = table.row_count();
    table.drop_last_rows(summary_rows);
    tracing::debug!(
        rows = table.row_count(),
        dropped = before - table.row_count(),
        columns = table.column_count(),
        "loaded table"
    );
    Ok(table)
}

/// Parse UTF-8 delimited text into a table, first row as header.
pub fn read_table<R: Read>(reader: &mut R, config: TextConfig) -> Result<Table> {
    let mut parser = TextParser::new(reader, config);

    let header = parser
        .parse_record()?
        .ok_or_else(|| Error::ParseError("No columns to parse from file".to_string()))?;

    let mut rows = Vec::new();
    while let Some(row) = parser.parse_row()? {
        rows.push(row);
    }

    Table::from_rows(header, rows)
}
