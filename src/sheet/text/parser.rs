//! Streaming parser for delimited statistics tables

use std::io::Read;

use super::config::TextConfig;
use crate::common::Result;
use crate::sheet::CellValue;

/// Streaming parser for delimited text
pub struct TextParser<'a, R: Read> {
    reader: &'a mut R,
    config: TextConfig,
    buffer: Vec<u8>,
    buffer_pos: usize,
    buffer_len: usize,
}

impl<'a, R: Read> TextParser<'a, R> {
    /// Create a new text parser
    pub fn new(reader: &'a mut R, config: TextConfig) -> Self {
        let buffer_size = config.buffer_size.max(1);
        TextParser {
            reader,
            config,
            buffer: vec![0; buffer_size],
            buffer_pos: 0,
            buffer_len: 0,
        }
    }

    /// Next byte of input, refilling the buffer as needed
    fn next_byte(&mut self) -> Result<Option<u8>> {
        let byte = self.peek_byte()?;
        if byte.is_some() {
            self.buffer_pos += 1;
        }
        Ok(byte)
    }

    /// Look at the next byte without consuming it
    fn peek_byte(&mut self) -> Result<Option<u8>> {
        if self.buffer_pos >= self.buffer_len {
            self.buffer_len = self.reader.read(&mut self.buffer)?;
            self.buffer_pos = 0;
            if self.buffer_len == 0 {
                return Ok(None);
            }
        }
        Ok(Some(self.buffer[self.buffer_pos]))
    }

    /// Parse the next non-blank row from the input, typing each field
    pub fn parse_row(&mut self) -> Result<Option<Vec<CellValue>>> {
        Ok(self
            .parse_record()?
            .map(|fields| fields.iter().map(|field| classify_field(field)).collect()))
    }

    /// Parse the next non-blank row from the input as raw field text
    pub fn parse_record(&mut self) -> Result<Option<Vec<String>>> {
        loop {
            match self.parse_line()? {
                None => return Ok(None),
                // Blank line
                Some(fields) if fields.len() == 1 && fields[0].trim().is_empty() => continue,
                Some(fields) => return Ok(Some(fields)),
            }
        }
    }

    /// Parse one physical row, `None` at end of input
    fn parse_line(&mut self) -> Result<Option<Vec<String>>> {
        let mut fields = Vec::new();
        let mut current_field = Vec::new();
        let mut in_quotes = false;
        // Saw a quote inside a quoted field; the next byte decides whether it
        // was a doubled quote or the closing one
        let mut quote_pending = false;
        let mut consumed_any = false;

        loop {
            let Some(byte) = self.next_byte()? else {
                if !consumed_any {
                    return Ok(None);
                }
                finish_field(&mut current_field, &mut fields);
                return Ok(Some(fields));
            };
            consumed_any = true;

            if quote_pending {
                quote_pending = false;
                if byte == self.config.quote {
                    current_field.push(byte);
                    continue;
                }
                in_quotes = false;
            }

            match byte {
                quote if quote == self.config.quote => {
                    if in_quotes {
                        quote_pending = true;
                    } else {
                        in_quotes = true;
                    }
                },
                b'\n' if !in_quotes => {
                    finish_field(&mut current_field, &mut fields);
                    return Ok(Some(fields));
                },
                // Lone CR or CRLF
                b'\r' if !in_quotes => {
                    if self.peek_byte()? == Some(b'\n') {
                        self.buffer_pos += 1;
                    }
                    finish_field(&mut current_field, &mut fields);
                    return Ok(Some(fields));
                },
                delim if delim == self.config.delimiter && !in_quotes => {
                    finish_field(&mut current_field, &mut fields);
                },
                _ => current_field.push(byte),
            }
        }
    }
}

/// Finish parsing a field and add it to the fields vector
fn finish_field(current_field: &mut Vec<u8>, fields: &mut Vec<String>) {
    let field_bytes = std::mem::take(current_field);
    let field = match String::from_utf8(field_bytes) {
        Ok(s) => s,
        Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
    };
    fields.push(field);
}

/// Tokens read as a missing value rather than text.
const MISSING_TOKENS: &[&str] = &[
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Type a raw field: empty, numeric or text.
///
/// Blank fields and the usual spreadsheet missing-value tokens (`NA`,
/// `#N/A`, `NULL`, `NaN`, ...) are [`CellValue::Empty`].
pub fn classify_field(field: &str) -> CellValue {
    let trimmed = field.trim();
    if trimmed.is_empty() || MISSING_TOKENS.contains(&trimmed) {
        CellValue::Empty
    } else if let Ok(value) = fast_float2::parse::<f64, _>(trimmed) {
        CellValue::Number(value)
    } else {
        CellValue::Text(field.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn parse_all(input: &str, config: TextConfig) -> Vec<Vec<CellValue>> {
        let mut cursor = Cursor::new(input.as_bytes());
        let mut parser = TextParser::new(&mut cursor, config);
        let mut rows = Vec::new();
        while let Some(row) = parser.parse_row().unwrap() {
            rows.push(row);
        }
        rows
    }

    #[test]
    fn test_tsv_parsing() {
        let rows = parse_all("name\tfreq\ns1\t25.5\n", TextConfig::default());
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], vec![CellValue::from("name"), CellValue::from("freq")]);
        assert_eq!(rows[1], vec![CellValue::from("s1"), CellValue::Number(25.5)]);
    }

    #[test]
    fn test_quoted_fields() {
        let rows = parse_all(
            "\"Hello\tWorld\"\t\"Value with \"\"quotes\"\"\"\tNormal",
            TextConfig::default(),
        );
        assert_eq!(rows[0][0], CellValue::from("Hello\tWorld"));
        assert_eq!(rows[0][1], CellValue::from("Value with \"quotes\""));
        assert_eq!(rows[0][2], CellValue::from("Normal"));
    }

    #[test]
    fn test_doubled_quote_across_buffer_boundary() {
        // Buffer of one byte forces every lookahead across a refill
        let config = TextConfig::default().with_buffer_size(1);
        let rows = parse_all("\"a\"\"b\"\tc", config);
        assert_eq!(rows[0], vec![CellValue::from("a\"b"), CellValue::from("c")]);
    }

    #[test]
    fn test_crlf_and_blank_lines() {
        let rows = parse_all("a\tb\r\n\r\n1\t2\r\n", TextConfig::default());
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1], vec![CellValue::Number(1.0), CellValue::Number(2.0)]);
    }

    #[test]
    fn test_custom_delimiter() {
        let rows = parse_all("a,\"b,c\"\n1,2\n", TextConfig::default().with_delimiter(b','));
        assert_eq!(rows[0], vec![CellValue::from("a"), CellValue::from("b,c")]);
        assert_eq!(rows[1], vec![CellValue::Number(1.0), CellValue::Number(2.0)]);
    }

    #[test]
    fn test_empty_fields() {
        let rows = parse_all("a\t\tc", TextConfig::default());
        assert_eq!(
            rows[0],
            vec![CellValue::from("a"), CellValue::Empty, CellValue::from("c")]
        );
    }

    #[test]
    fn test_classify_field() {
        assert_eq!(classify_field("12"), CellValue::Number(12.0));
        assert_eq!(classify_field(" 1.5e2 "), CellValue::Number(150.0));
        assert_eq!(classify_field("CD4+"), CellValue::from("CD4+"));
        assert_eq!(classify_field("  "), CellValue::Empty);
        assert!(classify_field("inf").as_number().unwrap().is_infinite());
    }

    #[test]
    fn test_missing_value_tokens() {
        for token in ["NA", "N/A", "n/a", "NULL", "null", "None", "#N/A", "<NA>", "NaN", "-nan"] {
            assert_eq!(classify_field(token), CellValue::Empty, "{token}");
        }
        assert_eq!(classify_field("NAb"), CellValue::from("NAb"));
    }

    #[test]
    fn test_cr_only_line_endings() {
        let rows = parse_all("a\tb\r1\t2\r\r3\t4\r", TextConfig::default());
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[2], vec![CellValue::Number(3.0), CellValue::Number(4.0)]);
    }

    #[test]
    fn test_crlf_split_across_buffer_refill() {
        let config = TextConfig::default().with_buffer_size(1);
        let rows = parse_all("a\r\nb\r\n", config);
        assert_eq!(rows, vec![vec![CellValue::from("a")], vec![CellValue::from("b")]]);
    }

    #[test]
    fn test_parse_record_keeps_raw_text() {
        let mut cursor = Cursor::new("1e3\t1.50\tnan\n".as_bytes());
        let mut parser = TextParser::new(&mut cursor, TextConfig::default());
        let record = parser.parse_record().unwrap().unwrap();
        assert_eq!(record, vec!["1e3", "1.50", "nan"]);
    }
}
