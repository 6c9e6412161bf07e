//! Gate path trimming for column names.
//!
//! FlowJo names each statistic column after the full gate path, e.g.
//! `Lymphocytes/Single Cells/Live/CD3+/CD4+ | Freq. of Parent`. Trimming at
//! depth `d` keeps the last `d + 1` path segments:
//!
//! | depth | result |
//! |---|---|
//! | 0 | `CD4+ \| Freq. of Parent` |
//! | 1 | `CD3+/CD4+ \| Freq. of Parent` |

use regex::Regex;

use crate::common::Result;
use crate::sheet::Table;

/// Build the pattern matching a `/` followed by the last `depth + 1` segments.
pub fn depth_pattern(depth: usize) -> Result<Regex> {
    let pattern = format!(r"/((?:[^/]+/){{{}}}[^/]+)$", depth);
    Ok(Regex::new(&pattern)?)
}

/// Trim one name with a pattern from [`depth_pattern`].
///
/// Names with too few segments for the pattern come back unchanged.
pub fn trim_gate_path(name: &str, pattern: &Regex) -> String {
    pattern
        .captures(name)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .unwrap_or_else(|| name.to_string())
}

/// Trim every column name of the table to `depth`.
pub fn trim_column_names(table: &mut Table, depth: usize) -> Result<()> {
    let pattern = depth_pattern(depth)?;
    let mut trimmed = 0usize;
    table.rename_columns(|name| {
        let new_name = trim_gate_path(name, &pattern);
        if new_name != name {
            trimmed += 1;
        }
        new_name
    });
    tracing::debug!(depth, trimmed, "trimmed gate paths");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sheet::{CellValue, Column};
    use proptest::prelude::*;

    const PATH: &str = "Lymphocytes/Single Cells/Live/CD3+/CD4+ | Freq. of Parent";

    #[test]
    fn test_depth_zero_keeps_leaf() {
        let pattern = depth_pattern(0).unwrap();
        assert_eq!(trim_gate_path(PATH, &pattern), "CD4+ | Freq. of Parent");
    }

    #[test]
    fn test_depth_one() {
        let pattern = depth_pattern(1).unwrap();
        assert_eq!(trim_gate_path(PATH, &pattern), "CD3+/CD4+ | Freq. of Parent");
    }

    #[test]
    fn test_short_paths_unchanged() {
        let pattern = depth_pattern(3).unwrap();
        assert_eq!(trim_gate_path("Live/CD3+", &pattern), "Live/CD3+");
        assert_eq!(trim_gate_path("Label", &pattern), "Label");
    }

    #[test]
    fn test_trim_column_names() {
        let mut table = Table::from_columns(vec![
            Column::from_strings("Unnamed: 0", vec!["s1".into()]),
            Column::new("Lymphocytes/CD3+ | Count", vec![CellValue::Number(10.0)]),
        ])
        .unwrap();
        trim_column_names(&mut table, 0).unwrap();
        assert_eq!(table.column_names(), vec!["Unnamed: 0", "CD3+ | Count"]);
    }

    proptest! {
        #[test]
        fn prop_keeps_last_segments(
            segments in prop::collection::vec("[A-Za-z0-9+ -]{1,6}", 1..8),
            depth in 0usize..6,
        ) {
            let name = segments.join("/");
            let pattern = depth_pattern(depth).unwrap();
            let trimmed = trim_gate_path(&name, &pattern);

            if segments.len() > depth + 1 {
                let expected = segments[segments.len() - depth - 1..].join("/");
                prop_assert_eq!(trimmed, expected);
            } else {
                prop_assert_eq!(trimmed, name);
            }
        }
    }
}
