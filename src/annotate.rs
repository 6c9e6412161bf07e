//! Sample annotation: labels tiled across rows, groups in contiguous blocks.
//!
//! FlowJo lists samples in acquisition order. When a plate is laid out as
//! repeated blocks of the same conditions, the labels repeat end to end and
//! the groups (donors, time points) cover one block each:
//!
//! ```text
//! sample  Label  Group
//! s1      ctrl   day0
//! s2      stim   day0
//! s3      ctrl   day7
//! s4      stim   day7
//! ```

use crate::common::{AnnotationKind, Error, Result};
use crate::sheet::{Column, Table};

/// Name of the label column.
pub const LABEL_COLUMN: &str = "Label";
/// Name of the group column.
pub const GROUP_COLUMN: &str = "Group";

/// Column positions, right after the sample identifier.
const LABEL_POSITION: usize = 1;
const GROUP_POSITION: usize = 2;

/// Number of repeats of `values` needed to cover `rows`.
fn repeat_count(kind: AnnotationKind, values: &[String], rows: usize) -> Result<usize> {
    if values.is_empty() {
        return Err(Error::EmptyAnnotation(kind));
    }
    if !rows.is_multiple_of(values.len()) {
        return Err(Error::UnevenAnnotation {
            kind,
            count: values.len(),
            rows,
        });
    }
    Ok(rows / values.len())
}

/// Repeat the whole label vector end to end until it covers `rows`.
///
/// ```
/// use fjstatplot::annotate::tile_labels;
///
/// let labels = vec!["ctrl".to_string(), "stim".to_string()];
/// assert_eq!(tile_labels(&labels, 4).unwrap(), ["ctrl", "stim", "ctrl", "stim"]);
/// ```
pub fn tile_labels(labels: &[String], rows: usize) -> Result<Vec<String>> {
    let repeats = repeat_count(AnnotationKind::Labels, labels, rows)?;
    Ok(labels.iter().cloned().cycle().take(repeats * labels.len()).collect())
}

/// Repeat each group value in a contiguous block until the blocks cover `rows`.
///
/// ```
/// use fjstatplot::annotate::repeat_groups;
///
/// let groups = vec!["day0".to_string(), "day7".to_string()];
/// assert_eq!(repeat_groups(&groups, 4).unwrap(), ["day0", "day0", "day7", "day7"]);
/// ```
pub fn repeat_groups(groups: &[String], rows: usize) -> Result<Vec<String>> {
    let repeats = repeat_count(AnnotationKind::Groups, groups, rows)?;
    Ok(groups
        .iter()
        .flat_map(|group| std::iter::repeat_n(group.clone(), repeats))
        .collect())
}

/// Insert the `Label` column after the sample identifier.
pub fn add_labels(table: &mut Table, labels: &[String]) -> Result<()> {
    let values = tile_labels(labels, table.row_count())?;
    table.insert_column(LABEL_POSITION, Column::from_strings(LABEL_COLUMN, values))?;
    tracing::debug!(labels = labels.len(), rows = table.row_count(), "added labels");
    Ok(())
}

/// Insert the `Group` column at the third position.
pub fn add_groups(table: &mut Table, groups: &[String]) -> Result<()> {
    let values = repeat_groups(groups, table.row_count())?;
    table.insert_column(GROUP_POSITION, Column::from_strings(GROUP_COLUMN, values))?;
    tracing::debug!(groups = groups.len(), rows = table.row_count(), "added groups");
    Ok(())
}
