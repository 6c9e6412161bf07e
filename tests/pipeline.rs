use std::fs;

use fjstatplot::Error;
use fjstatplot::pipeline::{RunConfig, run};
use fjstatplot::sheet::xlsx;

/// Eight samples, two gate statistics and the Mean/SD rows, in Mac OS Roman.
fn flowjo_table() -> Vec<u8> {
    let mut bytes = Vec::new();
    bytes.extend_from_slice(
        b"\tLymphocytes/Single Cells/CD3+/CD4+ | Freq. of Parent (%)\tLymphocytes/Single Cells/CD3+/CD8+ | Freq. of Parent (%)\tLymphocytes/Single Cells/CD19+ | Median (\xB5m)\n",
    );
    let rows = [
        ("01.fcs", 61.2, 28.4, 7.1),
        ("02.fcs", 58.9, 30.1, 6.8),
        ("03.fcs", 63.5, 25.7, 7.4),
        ("04.fcs", 60.0, 27.9, 7.0),
        ("05.fcs", 55.3, 33.2, 6.2),
        ("06.fcs", 57.8, 31.0, 6.5),
        ("07.fcs", 54.1, 34.6, 6.0),
        ("08.fcs", 56.6, 32.3, 6.4),
    ];
    for (name, cd4, cd8, cd19) in rows {
        bytes.extend_from_slice(format!("{}\t{}\t{}\t{}\n", name, cd4, cd8, cd19).as_bytes());
    }
    bytes.extend_from_slice(b"Mean\t58.4\t30.4\t6.7\n");
    bytes.extend_from_slice(b"SD\t3.1\t2.9\t0.5\n");
    bytes
}

fn count(haystack: &[u8], needle: &[u8]) -> usize {
    haystack.windows(needle.len()).filter(|w| *w == needle).count()
}

#[test]
fn test_full_run_writes_chart_and_workbook() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("stats.txt");
    let output = dir.path().join("stats.pdf");
    let excel = dir.path().join("stats.xlsx");
    fs::write(&input, flowjo_table()).unwrap();

    let config = RunConfig::new(&input, &output)
        .with_labels(vec!["ctrl".into(), "stim".into()])
        .with_groups(vec!["donor1".into(), "donor2".into()])
        .with_gate_depth(1)
        .with_excel(&excel);
    let summary = run(&config).unwrap();

    assert_eq!(summary.rows, 8);
    assert_eq!(summary.columns, 6);
    assert_eq!(summary.pages, 1);

    let pdf = fs::read(&output).unwrap();
    assert!(pdf.starts_with(b"%PDF-1.4"));
    assert_eq!(count(&pdf, b"/Type /Page "), 1);

    let table = xlsx::read_table(&excel).unwrap();
    assert_eq!(table.row_count(), 8);
    assert_eq!(
        table.column_names(),
        vec![
            "Unnamed: 0",
            "Label",
            "Group",
            "CD3+/CD4+ | Freq. of Parent (%)",
            "CD3+/CD8+ | Freq. of Parent (%)",
            "Single Cells/CD19+ | Median (\u{b5}m)",
        ]
    );
    let labels: Vec<String> = table.column("Label").unwrap().text_values();
    assert_eq!(labels[..4], ["ctrl", "stim", "ctrl", "stim"]);
    let groups: Vec<String> = table.column("Group").unwrap().text_values();
    assert_eq!(groups[3..5], ["donor1", "donor2"]);
}

#[test]
fn test_uneven_groups_write_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("stats.txt");
    let output = dir.path().join("stats.pdf");
    let excel = dir.path().join("stats.xlsx");
    fs::write(&input, flowjo_table()).unwrap();

    let config = RunConfig::new(&input, &output)
        .with_groups(vec!["a".into(), "b".into(), "c".into()])
        .with_excel(&excel);
    let err = run(&config).unwrap_err();

    assert!(matches!(err, Error::UnevenAnnotation { count: 3, rows: 8, .. }));
    assert!(!output.exists());
    assert!(!excel.exists());
}

#[test]
fn test_pages_for_many_columns() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("wide.txt");
    let output = dir.path().join("wide.pdf");

    let mut text = String::from("Sample");
    for c in 0..9 {
        text.push_str(&format!("\tGate{}", c));
    }
    text.push('\n');
    for r in 0..6 {
        text.push_str(&format!("s{}", r));
        for c in 0..9 {
            text.push_str(&format!("\t{}", r * c));
        }
        text.push('\n');
    }
    fs::write(&input, text).unwrap();

    let summary = run(&RunConfig::new(&input, &output)).unwrap();
    // Two summary rows dropped, nine panels over three pages
    assert_eq!(summary.rows, 4);
    assert_eq!(summary.pages, 3);
    let pdf = fs::read(&output).unwrap();
    assert_eq!(count(&pdf, b"/Count 3 "), 1);
}

#[test]
fn test_missing_input() {
    let dir = tempfile::tempdir().unwrap();
    let config = RunConfig::new(dir.path().join("absent.txt"), dir.path().join("out.pdf"));
    assert!(matches!(run(&config), Err(Error::Io(_))));
}
