//! Rendering configuration.

use plotters::style::RGBColor;

use super::palette::DEEP;

/// Points (1/72 inch) per inch.
const POINTS_PER_INCH: f64 = 72.0;

/// Page and panel settings for the chart document.
///
/// The defaults lay out four panels on a landscape letter page.
#[derive(Debug, Clone)]
pub struct ChartOptions {
    /// Panel grid as (rows, columns)
    pub grid: (usize, usize),
    /// Page size in inches (width, height)
    pub page_inches: (f64, f64),
    /// Pixels per inch of the drawing surface
    pub dpi: u32,
    /// Swarm dot diameter in pixels
    pub point_diameter: u32,
    /// Fraction of a group slot covered by its bars
    pub bar_width: f64,
    /// Colours assigned to labels in order of appearance
    pub palette: Vec<RGBColor>,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            grid: (2, 2),
            page_inches: (11.0, 8.5),
            dpi: 100,
            point_diameter: 8,
            bar_width: 0.8,
            palette: DEEP.to_vec(),
        }
    }
}

impl ChartOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_grid(mut self, rows: usize, columns: usize) -> Self {
        self.grid = (rows.max(1), columns.max(1));
        self
    }

    pub fn with_page_inches(mut self, width: f64, height: f64) -> Self {
        self.page_inches = (width, height);
        self
    }

    pub fn with_dpi(mut self, dpi: u32) -> Self {
        self.dpi = dpi.max(1);
        self
    }

    pub fn with_point_diameter(mut self, diameter: u32) -> Self {
        self.point_diameter = diameter;
        self
    }

    pub fn with_bar_width(mut self, width: f64) -> Self {
        self.bar_width = width.clamp(0.05, 1.0);
        self
    }

    pub fn with_palette(mut self, palette: Vec<RGBColor>) -> Self {
        if !palette.is_empty() {
            self.palette = palette;
        }
        self
    }

    /// Panels drawn on each page.
    #[inline]
    pub fn plots_per_page(&self) -> usize {
        self.grid.0 * self.grid.1
    }

    /// Size of the drawing surface in pixels.
    pub fn page_pixels(&self) -> (u32, u32) {
        let (w, h) = self.page_inches;
        (
            (w * self.dpi as f64).round() as u32,
            (h * self.dpi as f64).round() as u32,
        )
    }

    /// Size of the PDF page in points.
    pub fn page_points(&self) -> (f64, f64) {
        let (w, h) = self.page_inches;
        (w * POINTS_PER_INCH, h * POINTS_PER_INCH)
    }

    /// Colour of the label at `index`, cycling through the palette.
    pub fn color(&self, index: usize) -> RGBColor {
        self.palette[index % self.palette.len()]
    }
}
