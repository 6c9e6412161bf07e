//! Writer for single-sheet XLSX workbooks.

use std::fmt::Write as FmtWrite;
use std::fs::File;
use std::io::{BufWriter, Seek, Write};
use std::path::Path;

use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use super::strings::{SharedStrings, escape_xml};
use crate::common::Result;
use crate::sheet::{CellValue, Table};

/// Name of the only worksheet.
pub const SHEET_NAME: &str = "Sheet1";

const CONTENT_TYPES_XML: &str = concat!(
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
    r#"<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">"#,
    r#"<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>"#,
    r#"<Default Extension="xml" ContentType="application/xml"/>"#,
    r#"<Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/>"#,
    r#"<Override PartName="/xl/worksheets/sheet1.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/>"#,
    r#"<Override PartName="/xl/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.styles+xml"/>"#,
    r#"<Override PartName="/xl/sharedStrings.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sharedStrings+xml"/>"#,
    r#"</Types>"#
);

const ROOT_RELS_XML: &str = concat!(
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
    r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
    r#"<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/>"#,
    r#"</Relationships>"#
);

const WORKBOOK_RELS_XML: &str = concat!(
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
    r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
    r#"<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet1.xml"/>"#,
    r#"<Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/>"#,
    r#"<Relationship Id="rId3" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/sharedStrings" Target="sharedStrings.xml"/>"#,
    r#"</Relationships>"#
);

// Minimal stylesheet: one font, the two mandatory fills, one border, one
// cell format. Style index 1 is bold for the header row.
const STYLES_XML: &str = concat!(
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
    r#"<styleSheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">"#,
    r#"<fonts count="2"><font><sz val="11"/><name val="Calibri"/></font><font><b/><sz val="11"/><name val="Calibri"/></font></fonts>"#,
    r#"<fills count="2"><fill><patternFill patternType="none"/></fill><fill><patternFill patternType="gray125"/></fill></fills>"#,
    r#"<borders count="1"><border><left/><right/><top/><bottom/><diagonal/></border></borders>"#,
    r#"<cellStyleXfs count="1"><xf numFmtId="0" fontId="0" fillId="0" borderId="0"/></cellStyleXfs>"#,
    r#"<cellXfs count="2"><xf numFmtId="0" fontId="0" fillId="0" borderId="0" xfId="0"/><xf numFmtId="0" fontId="1" fillId="0" borderId="0" xfId="0" applyFont="1"/></cellXfs>"#,
    r#"<cellStyles count="1"><cellStyle name="Normal" xfId="0" builtinId="0"/></cellStyles>"#,
    r#"</styleSheet>"#
);

/// Convert column number to Excel column letters (e.g., 1 -> "A", 26 -> "Z", 27 -> "AA").
pub(crate) fn column_to_letters(col: u32) -> String {
    let mut letters = String::new();
    let mut col = col;

    while col > 0 {
        col -= 1;
        let letter = ((col % 26) as u8 + b'A') as char;
        letters.insert(0, letter);
        col /= 26;
    }

    letters
}

/// Generate workbook.xml content.
fn workbook_xml() -> String {
    format!(
        concat!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
            r#"<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" "#,
            r#"xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">"#,
            r#"<sheets><sheet name="{}" sheetId="1" r:id="rId1"/></sheets></workbook>"#
        ),
        escape_xml(SHEET_NAME)
    )
}

/// Write one cell to the sheet XML. Empty and non-finite cells are omitted.
fn write_cell(
    xml: &mut String,
    cell_ref: &str,
    value: &CellValue,
    shared_strings: &mut SharedStrings,
    style: Option<usize>,
) -> Result<()> {
    let style_attr = style.map(|s| format!(r#" s="{}""#, s)).unwrap_or_default();

    match value {
        CellValue::Empty => {},
        CellValue::Number(n) if !n.is_finite() => {},
        CellValue::Number(n) => {
            let mut buffer = ryu::Buffer::new();
            write!(
                xml,
                r#"<c r="{}"{}><v>{}</v></c>"#,
                cell_ref,
                style_attr,
                buffer.format_finite(*n)
            )?;
        },
        CellValue::Text(s) => {
            let index = shared_strings.add_string(s);
            write!(xml, r#"<c r="{}"{} t="s"><v>{}</v></c>"#, cell_ref, style_attr, index)?;
        },
    }

    Ok(())
}

/// Serialize the table as worksheet XML: header row, then one row per sample.
pub fn sheet_xml(table: &Table, shared_strings: &mut SharedStrings) -> Result<String> {
    let mut xml = String::with_capacity(4096);
    xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
    xml.push_str(r#"<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">"#);

    // NOTE: Excel uses 1-based row/column numbering in XML
    let columns = table.column_count() as u32;
    let rows = table.row_count() as u32 + 1;
    if columns > 0 {
        write!(xml, r#"<dimension ref="A1:{}{}"/>"#, column_to_letters(columns), rows)?;
    } else {
        xml.push_str(r#"<dimension ref="A1"/>"#);
    }
    xml.push_str(r#"<sheetViews><sheetView workbookViewId="0" tabSelected="1"><pane ySplit="1" topLeftCell="A2" activePane="bottomLeft" state="frozen"/></sheetView></sheetViews>"#);
    xml.push_str(r#"<sheetFormatPr defaultRowHeight="15"/>"#);

    xml.push_str("<sheetData>");
    if columns > 0 {
        xml.push_str(r#"<row r="1">"#);
        for (col_idx, column) in table.columns().iter().enumerate() {
            let cell_ref = format!("{}1", column_to_letters(col_idx as u32 + 1));
            write_cell(
                &mut xml,
                &cell_ref,
                &CellValue::Text(column.name.clone()),
                shared_strings,
                Some(1),
            )?;
        }
        xml.push_str("</row>");
    }

    for row_idx in 0..table.row_count() {
        let row_num = row_idx + 2;
        write!(xml, r#"<row r="{}">"#, row_num)?;
        for (col_idx, column) in table.columns().iter().enumerate() {
            let cell_ref = format!("{}{}", column_to_letters(col_idx as u32 + 1), row_num);
            write_cell(&mut xml, &cell_ref, &column.cells[row_idx], shared_strings, None)?;
        }
        xml.push_str("</row>");
    }
    xml.push_str("</sheetData>");
    xml.push_str("</worksheet>");

    Ok(xml)
}

/// Write the table as an XLSX package into `writer`.
pub fn write_table_to<W: Write + Seek>(table: &Table, writer: W) -> Result<W> {
    let mut shared_strings = SharedStrings::new();
    // Sheet first: it fills the shared strings table
    let sheet = sheet_xml(table, &mut shared_strings)?;
    let strings = shared_strings.to_xml()?;
    let workbook = workbook_xml();

    let mut zip = ZipWriter::new(writer);
    let options =
        SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);

    let parts: [(&str, &[u8]); 7] = [
        ("[Content_Types].xml", CONTENT_TYPES_XML.as_bytes()),
        ("_rels/.rels", ROOT_RELS_XML.as_bytes()),
        ("xl/workbook.xml", workbook.as_bytes()),
        ("xl/_rels/workbook.xml.rels", WORKBOOK_RELS_XML.as_bytes()),
        ("xl/styles.xml", STYLES_XML.as_bytes()),
        ("xl/sharedStrings.xml", strings.as_bytes()),
        ("xl/worksheets/sheet1.xml", sheet.as_bytes()),
    ];
    for (name, data) in parts {
        zip.start_file(name, options)?;
        zip.write_all(data)?;
    }

    Ok(zip.finish()?)
}

/// Write the table as an XLSX workbook at `path`.
///
/// The content is always Office Open XML; a path with another extension
/// (such as the legacy `.xls`) is written as-is with a warning.
pub fn write_table<P: AsRef<Path>>(table: &Table, path: P) -> Result<()> {
    let path = path.as_ref();
    let is_xlsx = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("xlsx"))
        .unwrap_or(false);
    if !is_xlsx {
        tracing::warn!(path = %path.display(), "writing XLSX content to a path without .xlsx extension");
    }

    let file = BufWriter::new(File::create(path)?);
    let mut file = write_table_to(table, file)?;
    file.flush()?;
    tracing::info!(
        path = %path.display(),
        rows = table.row_count(),
        columns = table.column_count(),
        "wrote spreadsheet"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sheet::Column;

    #[test]
    fn test_column_to_letters() {
        assert_eq!(column_to_letters(1), "A");
        assert_eq!(column_to_letters(26), "Z");
        assert_eq!(column_to_letters(27), "AA");
        assert_eq!(column_to_letters(703), "AAA");
    }

    #[test]
    fn test_sheet_xml_layout() {
        let table = Table::from_columns(vec![
            Column::from_strings("Sample", vec!["s1".into(), "s2".into()]),
            Column::new("CD4", vec![CellValue::Number(1.5), CellValue::Empty]),
        ])
        .unwrap();
        let mut strings = SharedStrings::new();
        let xml = sheet_xml(&table, &mut strings).unwrap();

        assert!(xml.contains(r#"<dimension ref="A1:B3"/>"#));
        assert!(xml.contains(r#"<c r="A1" s="1" t="s"><v>0</v></c>"#));
        assert!(xml.contains(r#"<c r="B2"><v>1.5</v></c>"#));
        assert!(!xml.contains(r#"r="B3""#));
        // Sample, CD4, s1, s2
        assert_eq!(strings.count(), 4);
    }
}
