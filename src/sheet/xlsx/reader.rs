//! Reader for the first worksheet of an XLSX workbook.
//!
//! Only what a round trip of an exported table needs: shared strings,
//! inline strings and numeric cells. Formulas are read as their cached
//! value and styles are ignored.
//!
//! Performance optimizations:
//! - Uses memchr for fast tag searching instead of a full XML parser

use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;

use memchr::memmem;
use zip::ZipArchive;

use super::strings::unescape_xml;
use crate::common::{Error, Result};
use crate::sheet::{CellValue, Table};
use crate::sheet::text::classify_field;

const SHARED_STRINGS_PART: &str = "xl/sharedStrings.xml";
const FIRST_SHEET_PART: &str = "xl/worksheets/sheet1.xml";

/// Read a table from the first worksheet of an XLSX file.
pub fn read_table<P: AsRef<Path>>(path: P) -> Result<Table> {
    let file = BufReader::new(File::open(path)?);
    read_table_from(file)
}

/// Read a table from an XLSX package; the first row is the header.
pub fn read_table_from<R: Read + Seek>(reader: R) -> Result<Table> {
    let mut archive = ZipArchive::new(reader)?;

    let shared_strings = match read_part(&mut archive, SHARED_STRINGS_PART) {
        Ok(xml) => parse_shared_strings(&xml),
        Err(Error::ZipError(_)) => Vec::new(),
        Err(e) => return Err(e),
    };
    let sheet = read_part(&mut archive, FIRST_SHEET_PART)?;
    let mut rows = parse_sheet_rows(&sheet, &shared_strings)?;

    if rows.is_empty() {
        return Ok(Table::new());
    }
    let header: Vec<String> = rows.remove(0).iter().map(CellValue::to_string).collect();
    let width = header.len();
    for row in &mut rows {
        row.truncate(width);
    }
    Table::from_rows(header, rows)
}

fn read_part<R: Read + Seek>(archive: &mut ZipArchive<R>, name: &str) -> Result<String> {
    let mut part = archive.by_name(name)?;
    let mut xml = String::new();
    part.read_to_string(&mut xml)?;
    Ok(xml)
}

/// Value of `name="..."` inside an element's start tag.
fn attribute<'a>(tag: &'a str, name: &str) -> Option<&'a str> {
    let needle = format!(" {}=\"", name);
    let start = tag.find(&needle)? + needle.len();
    let end = tag[start..].find('"')? + start;
    Some(&tag[start..end])
}

/// Text content of every `<t>` element in `xml`, concatenated.
fn text_runs(xml: &str) -> String {
    let bytes = xml.as_bytes();
    let mut out = String::new();
    let mut pos = 0;

    while let Some(found) = memmem::find(&bytes[pos..], b"<t") {
        let tag_start = pos + found;
        // Skip <tabColor>, <top> and friends
        let after = bytes.get(tag_start + 2).copied();
        let Some(tag_end) = memchr::memchr(b'>', &bytes[tag_start..]).map(|i| tag_start + i) else {
            break;
        };
        if !matches!(after, Some(b'>') | Some(b' ')) || bytes[tag_end - 1] == b'/' {
            pos = tag_end + 1;
            continue;
        }
        let Some(close) = memmem::find(&bytes[tag_end..], b"</t>").map(|i| tag_end + i) else {
            break;
        };
        out.push_str(&unescape_xml(&xml[tag_end + 1..close]));
        pos = close + 4;
    }

    out
}

/// Parse the `<si>` entries of a shared strings part.
fn parse_shared_strings(xml: &str) -> Vec<String> {
    let bytes = xml.as_bytes();
    let mut strings = Vec::new();
    let mut pos = 0;

    while let Some(si_start) = memmem::find(&bytes[pos..], b"<si>") {
        let si_start = pos + si_start;
        let Some(si_end) = memmem::find(&bytes[si_start..], b"</si>") else {
            break;
        };
        strings.push(text_runs(&xml[si_start..si_start + si_end]));
        pos = si_start + si_end + 5;
    }

    strings
}

/// Split an `A1`-style reference into zero-based (row, column).
fn parse_cell_ref(cell_ref: &str) -> Option<(usize, usize)> {
    let split = cell_ref.find(|c: char| c.is_ascii_digit())?;
    let (letters, digits) = cell_ref.split_at(split);
    if letters.is_empty() {
        return None;
    }
    let mut col = 0usize;
    for c in letters.chars() {
        if !c.is_ascii_uppercase() {
            return None;
        }
        col = col * 26 + (c as usize - 'A' as usize + 1);
    }
    let row: usize = digits.parse().ok()?;
    Some((row.checked_sub(1)?, col - 1))
}

/// Parse `<row>` elements into a dense grid of cell values.
fn parse_sheet_rows(xml: &str, shared_strings: &[String]) -> Result<Vec<Vec<CellValue>>> {
    let bytes = xml.as_bytes();
    let mut grid: Vec<Vec<CellValue>> = Vec::new();
    let mut pos = 0;

    while let Some(found) = memmem::find(&bytes[pos..], b"<c ") {
        let tag_start = pos + found;
        let tag_end = memchr::memchr(b'>', &bytes[tag_start..])
            .map(|i| tag_start + i)
            .ok_or_else(|| Error::ParseError("Unterminated cell element".to_string()))?;
        let tag = &xml[tag_start..tag_end];

        let cell_ref = attribute(tag, "r")
            .ok_or_else(|| Error::ParseError("Cell without reference".to_string()))?;
        let (row, col) = parse_cell_ref(cell_ref)
            .ok_or_else(|| Error::ParseError(format!("Invalid cell reference '{}'", cell_ref)))?;

        let (content, next) = if bytes[tag_end - 1] == b'/' {
            ("", tag_end + 1)
        } else {
            let close = memmem::find(&bytes[tag_end..], b"</c>")
                .map(|i| tag_end + i)
                .ok_or_else(|| Error::ParseError(format!("Unterminated cell {}", cell_ref)))?;
            (&xml[tag_end + 1..close], close + 4)
        };
        pos = next;

        let raw_value = content
            .find("<v>")
            .and_then(|start| {
                let start = start + 3;
                content[start..].find("</v>").map(|end| &content[start..start + end])
            })
            .map(unescape_xml);

        let value = match attribute(tag, "t") {
            Some("s") => {
                let index: usize = raw_value
                    .as_deref()
                    .and_then(|v| v.trim().parse().ok())
                    .ok_or_else(|| Error::ParseError(format!("Bad shared string index in {}", cell_ref)))?;
                let text = shared_strings.get(index).ok_or_else(|| {
                    Error::ParseError(format!("Shared string {} out of range", index))
                })?;
                CellValue::Text(text.clone())
            },
            Some("inlineStr") => CellValue::Text(text_runs(content)),
            Some("str") => raw_value.map(CellValue::Text).unwrap_or(CellValue::Empty),
            _ => raw_value
                .map(|v| classify_field(&v))
                .unwrap_or(CellValue::Empty),
        };

        if grid.len() <= row {
            grid.resize_with(row + 1, Vec::new);
        }
        let cells = &mut grid[row];
        if cells.len() <= col {
            cells.resize(col + 1, CellValue::Empty);
        }
        cells[col] = value;
    }

    // Rows without any stored cell still count
    let mut pos = 0;
    while let Some(found) = memmem::find(&bytes[pos..], b"<row ") {
        let tag_start = pos + found;
        let tag_end = memchr::memchr(b'>', &bytes[tag_start..])
            .map(|i| tag_start + i)
            .unwrap_or(bytes.len());
        let row = attribute(&xml[tag_start..tag_end], "r").and_then(|r| r.parse::<usize>().ok());
        if let Some(row) = row
            && grid.len() < row
        {
            grid.resize_with(row, Vec::new);
        }
        pos = tag_end;
    }

    Ok(grid)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_cell_ref() {
        assert_eq!(parse_cell_ref("A1"), Some((0, 0)));
        assert_eq!(parse_cell_ref("AB12"), Some((11, 27)));
        assert_eq!(parse_cell_ref("12"), None);
        assert_eq!(parse_cell_ref("A0"), None);
    }

    #[test]
    fn test_parse_shared_strings() {
        let xml = r#"<sst><si><t>Ctrl</t></si><si><r><t>CD4</t></r><r><t xml:space="preserve">+ T</t></r></si></sst>"#;
        assert_eq!(parse_shared_strings(xml), vec!["Ctrl", "CD4+ T"]);
    }

    #[test]
    fn test_parse_sheet_rows() {
        let xml = concat!(
            r#"<worksheet><sheetData>"#,
            r#"<row r="1"><c r="A1" t="s"><v>0</v></c><c r="C1" t="inlineStr"><is><t>x</t></is></c></row>"#,
            r#"<row r="2"><c r="A2"><v>2.5</v></c><c r="B2"/></row>"#,
            r#"</sheetData></worksheet>"#
        );
        let strings = vec!["id".to_string()];
        let rows = parse_sheet_rows(xml, &strings).unwrap();
        assert_eq!(
            rows[0],
            vec![CellValue::from("id"), CellValue::Empty, CellValue::from("x")]
        );
        assert_eq!(rows[1], vec![CellValue::Number(2.5), CellValue::Empty]);
    }
}
