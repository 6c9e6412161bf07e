//! XLSX export of the final table, and read-back of exported workbooks.

pub mod reader;
pub mod strings;
pub mod writer;

pub use reader::{read_table, read_table_from};
pub use strings::SharedStrings;
pub use writer::{SHEET_NAME, sheet_xml, write_table, write_table_to};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sheet::{CellValue, Column, Table};
    use std::io::Cursor;

    fn annotated() -> Table {
        Table::from_columns(vec![
            Column::from_strings("Unnamed: 0", vec!["s1".into(), "s2".into(), "s3".into()]),
            Column::from_strings("Label", vec!["A & B".into(), "<ctrl>".into(), "A & B".into()]),
            Column::new(
                "CD3+/CD4+ | Freq. of Parent",
                vec![CellValue::Number(12.25), CellValue::Empty, CellValue::Number(-3.0)],
            ),
        ])
        .unwrap()
    }

    #[test]
    fn test_export_reload_preserves_shape() {
        let table = annotated();
        let bytes = write_table_to(&table, Cursor::new(Vec::new())).unwrap().into_inner();
        let reloaded = read_table_from(Cursor::new(bytes)).unwrap();

        assert_eq!(reloaded.row_count(), table.row_count());
        assert_eq!(reloaded.column_count(), table.column_count());
        assert_eq!(reloaded, table);
    }

    #[test]
    fn test_export_reload_trailing_empty_cells() {
        let table = Table::from_columns(vec![
            Column::from_strings("id", vec!["a".into(), "b".into()]),
            Column::new("x", vec![CellValue::Empty, CellValue::Empty]),
        ])
        .unwrap();
        let bytes = write_table_to(&table, Cursor::new(Vec::new())).unwrap().into_inner();
        let reloaded = read_table_from(Cursor::new(bytes)).unwrap();
        assert_eq!(reloaded.row_count(), 2);
        assert_eq!(reloaded.column_count(), 2);
    }

    #[test]
    fn test_write_table_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("final.xls");
        write_table(&annotated(), &path).unwrap();

        let reloaded = read_table(&path).unwrap();
        assert_eq!(reloaded.column_names()[2], "CD3+/CD4+ | Freq. of Parent");
    }
}
