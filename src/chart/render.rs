//! Drawing panels and assembling the chart document.

use std::path::Path;

use plotters::coord::Shift;
use plotters::prelude::*;
use tracing::{debug, info};

use super::config::ChartOptions;
use super::layout::{page_count, pages};
use super::palette::{BAR_EDGE, ERROR_BAR};
use super::stats::{CategoryLayout, summarize, value_range};
use super::swarm::swarm_offsets;
use crate::annotate::GROUP_COLUMN;
use crate::common::{Error, Result};
use crate::pdf::{PdfDocument, PdfPage};
use crate::sheet::{Column, Table};

/// Half the width of an error bar cap, in x units.
const CAP_HALF_WIDTH: f64 = 0.1;
/// Line width of bar outlines and error bars, in pixels.
const LINE_WIDTH: u32 = 2;

/// Draw one panel: mean bars with SD error bars and a swarm of the values.
///
/// Groups run along the x axis; within a group each label gets its own
/// dodged bar and dot colour.
pub fn render_chart<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    column: &Column,
    layout: &CategoryLayout,
    options: &ChartOptions,
) -> std::result::Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    let groups = layout.groups();
    let cells = layout.cells(column);
    let (y_low, y_high) = value_range(&cells);

    let mut chart = ChartBuilder::on(area)
        .caption(&column.name, ("sans-serif", 16))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(-0.5f64..(groups.len() as f64 - 0.5), y_low..y_high)?;

    // Key points fall on whole numbers, one per group
    let group_name = |x: &f64| {
        let nearest = x.round();
        if (x - nearest).abs() < 1e-6 && nearest >= 0.0 {
            groups.get(nearest as usize).cloned().unwrap_or_default()
        } else {
            String::new()
        }
    };
    let mut mesh = chart.configure_mesh();
    mesh.disable_x_mesh()
        .x_labels(groups.len())
        .x_label_formatter(&group_name)
        .y_desc(column.name.as_str())
        .label_style(("sans-serif", 12));
    if layout.has_groups() {
        mesh.x_desc(GROUP_COLUMN);
    }
    mesh.draw()?;

    let dodge = layout.dodge_width(options.bar_width);

    // Bars and error bars
    for cell in &cells {
        let Some(summary) = summarize(&cell.values) else {
            continue;
        };
        let center = layout.dodge_center(cell.group, cell.label, options.bar_width);
        let edge = BAR_EDGE.stroke_width(LINE_WIDTH);
        chart.draw_series(std::iter::once(Rectangle::new(
            [(center - dodge / 2.0, 0.0), (center + dodge / 2.0, summary.mean)],
            edge,
        )))?;

        let whisker = ERROR_BAR.stroke_width(LINE_WIDTH);
        let (lower, upper) = (summary.lower(), summary.upper());
        chart.draw_series([
            PathElement::new(vec![(center, lower), (center, upper)], whisker),
            PathElement::new(
                vec![(center - CAP_HALF_WIDTH, lower), (center + CAP_HALF_WIDTH, lower)],
                whisker,
            ),
            PathElement::new(
                vec![(center - CAP_HALF_WIDTH, upper), (center + CAP_HALF_WIDTH, upper)],
                whisker,
            ),
        ])?;
    }

    // Swarm placement works in pixels so dots keep their size on any scale
    let origin = chart.backend_coord(&(0.0, y_low));
    let unit = chart.backend_coord(&(1.0, y_low));
    let pixels_per_unit = ((unit.0 - origin.0) as f64).max(1.0);
    let diameter = options.point_diameter as f64;
    let radius = options.point_diameter.div_ceil(2);
    let max_offset = dodge * pixels_per_unit / 2.0;

    for (label_index, label) in layout.labels().iter().enumerate() {
        let color = options.color(label_index);
        let mut dots = Vec::new();
        for cell in cells.iter().filter(|c| c.label == label_index) {
            let center = layout.dodge_center(cell.group, cell.label, options.bar_width);
            let positions: Vec<f64> = cell
                .values
                .iter()
                .map(|&v| chart.backend_coord(&(center, v)).1 as f64)
                .collect();
            let offsets = swarm_offsets(&positions, diameter, max_offset);
            dots.extend(
                cell.values
                    .iter()
                    .zip(offsets)
                    .map(|(&v, offset)| (center + offset / pixels_per_unit, v)),
            );
        }

        let series = chart.draw_series(
            dots.into_iter()
                .map(|point| Circle::new(point, radius, color.filled())),
        )?;
        if layout.has_labels() {
            series
                .label(label.as_str())
                .legend(move |(x, y)| Circle::new((x + 6, y), 4, color.filled()));
        }
    }

    if layout.has_labels() {
        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK.mix(0.3))
            .label_font(("sans-serif", 11))
            .draw()?;
    }

    Ok(())
}

/// Lay out every chartable column on pages of `options.grid` panels.
pub fn build_document(table: &Table, options: &ChartOptions) -> Result<PdfDocument> {
    let columns = table.value_columns();
    if columns.is_empty() {
        return Err(Error::NothingToPlot);
    }
    let layout = CategoryLayout::from_table(table);
    let mut document = PdfDocument::new(options.page_points());
    debug!(
        columns = columns.len(),
        pages = page_count(columns.len(), options.plots_per_page()),
        "laying out charts"
    );

    for (index, page_columns) in pages(&columns, options.plots_per_page())
        .into_iter()
        .enumerate()
    {
        let root = PdfPage::new(&mut document, options.page_pixels()).into_drawing_area();
        root.fill(&WHITE)?;
        let panels = root.split_evenly(options.grid);
        for (panel, column) in panels.iter().zip(page_columns) {
            render_chart(panel, column, &layout, options)?;
        }
        root.present()?;
        debug!(page = index + 1, panels = page_columns.len(), "rendered page");
    }

    Ok(document)
}

/// Render the chart document for `table` and write it to `path`.
///
/// Returns the number of pages written.
pub fn render_document<P: AsRef<Path>>(
    table: &Table,
    path: P,
    options: &ChartOptions,
) -> Result<usize> {
    let path = path.as_ref();
    let mut document = build_document(table, options)?;
    if let Some(stem) = path.file_stem() {
        document.set_title(stem.to_string_lossy());
    }
    document.save(path)?;
    info!(path = %path.display(), pages = document.page_count(), "wrote chart document");
    Ok(document.page_count())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sheet::CellValue;

    fn count(haystack: &[u8], needle: &[u8]) -> usize {
        haystack.windows(needle.len()).filter(|w| *w == needle).count()
    }

    fn table_with_columns(n: usize) -> Table {
        let mut columns = vec![
            Column::from_strings("Sample", (0..4).map(|i| format!("s{}.fcs", i)).collect()),
            Column::from_strings("Label", vec!["ctrl".into(), "stim".into(), "ctrl".into(), "stim".into()]),
            Column::from_strings("Group", vec!["d0".into(), "d0".into(), "d7".into(), "d7".into()]),
        ];
        for c in 0..n {
            columns.push(Column::new(
                format!("CD{} | Freq. of Parent", c),
                (0..4).map(|r| CellValue::Number((r * (c + 1)) as f64)).collect(),
            ));
        }
        Table::from_columns(columns).unwrap()
    }

    #[test]
    fn test_pages_follow_column_count() {
        let options = ChartOptions::default();
        for (columns, expected) in [(1, 1), (4, 1), (5, 2), (9, 3)] {
            let document = build_document(&table_with_columns(columns), &options).unwrap();
            assert_eq!(document.page_count(), expected);
        }
    }

    #[test]
    fn test_document_declares_pages() {
        let document = build_document(&table_with_columns(6), &ChartOptions::default()).unwrap();
        let bytes = document.to_bytes().unwrap();
        assert_eq!(count(&bytes, b"/Type /Page "), 2);
        assert_eq!(count(&bytes, b"/Count 2 "), 1);
    }

    #[test]
    fn test_nothing_to_plot() {
        let table = Table::from_columns(vec![Column::from_strings(
            "Sample",
            vec!["a".into()],
        )])
        .unwrap();
        assert!(matches!(
            build_document(&table, &ChartOptions::default()),
            Err(Error::NothingToPlot)
        ));
    }

    #[test]
    fn test_single_factor_table_renders() {
        let table = Table::from_columns(vec![
            Column::from_strings("Sample", vec!["a".into(), "b".into(), "c".into()]),
            Column::new("CD4", vec![1.0.into(), 1.0.into(), CellValue::Empty]),
        ])
        .unwrap();
        let document = build_document(&table, &ChartOptions::default()).unwrap();
        assert_eq!(document.page_count(), 1);
    }

    #[test]
    fn test_render_document_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plots.pdf");
        let pages = render_document(&table_with_columns(3), &path, &ChartOptions::default()).unwrap();
        assert_eq!(pages, 1);
        let bytes = std::fs::read(&path).unwrap();
        assert!(bytes.starts_with(b"%PDF-"));
        assert_eq!(count(&bytes, b"/Title (plots)"), 1);
    }
}
