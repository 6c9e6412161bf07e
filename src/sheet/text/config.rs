//! Parsing configuration for delimited statistics tables

/// Configuration for parsing delimited text tables
#[derive(Debug, Clone)]
pub struct TextConfig {
    /// Field delimiter character
    pub delimiter: u8,
    /// Quote character for quoted fields
    pub quote: u8,
    /// Number of trailing summary rows to drop after loading
    pub summary_rows: usize,
    /// Buffer size for reading
    pub buffer_size: usize,
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            delimiter: b'\t',  // FlowJo exports are tab-separated
            quote: b'"',       // Standard quoting
            summary_rows: 2,   // Mean and SD rows
            buffer_size: 8192, // 8KB buffer
        }
    }
}

impl TextConfig {
    /// Create a new default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the field delimiter
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Set how many trailing summary rows are dropped
    pub fn with_summary_rows(mut self, rows: usize) -> Self {
        self.summary_rows = rows;
        self
    }

    /// Set buffer size
    pub fn with_buffer_size(mut self, size: usize) -> Self {
        self.buffer_size = size.max(1);
        self
    }
}
