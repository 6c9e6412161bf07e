//! Plotters drawing backend that records a page of a [`PdfDocument`].

use std::fmt::Write;

use plotters_backend::text_anchor::{HPos, VPos};
use plotters_backend::{
    BackendColor, BackendCoord, BackendStyle, BackendTextStyle, DrawingBackend, DrawingErrorKind,
    FontStyle, FontTransform,
};

use super::PdfError;
use super::document::{FONT_BOLD, FONT_REGULAR, PdfDocument, number, pdf_string};
use super::metrics::{ASCENT, DESCENT, text_width};

/// Bezier control distance approximating a quarter circle.
const KAPPA: f64 = 0.552_284_75;

type DrawResult = Result<(), DrawingErrorKind<PdfError>>;

/// One page of a PDF document, drawn in pixel coordinates.
///
/// The page is appended to the document on [`present`](DrawingBackend::present)
/// or, if never presented, when it is dropped.
pub struct PdfPage<'a> {
    document: &'a mut PdfDocument,
    size: (u32, u32),
    operators: String,
    saved: bool,
}

impl<'a> PdfPage<'a> {
    /// Start a page whose drawing surface is `size` pixels.
    pub fn new(document: &'a mut PdfDocument, size: (u32, u32)) -> Self {
        Self {
            document,
            size,
            operators: String::new(),
            saved: false,
        }
    }

    /// Set fill or stroke colour and the alpha graphics state.
    fn set_color(&mut self, color: BackendColor, stroke: bool) -> Result<(), PdfError> {
        let (r, g, b) = color.rgb;
        let op = if stroke { "RG" } else { "rg" };
        writeln!(
            self.operators,
            "{} {} {} {}",
            number(r as f64 / 255.0),
            number(g as f64 / 255.0),
            number(b as f64 / 255.0),
            op
        )?;
        if let Some(state) = self.document.alpha_state(color.alpha) {
            writeln!(self.operators, "/{} gs", state)?;
        }
        Ok(())
    }

    fn set_stroke<S: BackendStyle>(&mut self, style: &S) -> Result<(), PdfError> {
        self.set_color(style.color(), true)?;
        writeln!(self.operators, "{} w 1 J 1 j", style.stroke_width().max(1))?;
        Ok(())
    }

    fn move_to(&mut self, (x, y): BackendCoord) -> Result<(), PdfError> {
        writeln!(self.operators, "{} {} m", x, y)?;
        Ok(())
    }

    fn line_to(&mut self, (x, y): BackendCoord) -> Result<(), PdfError> {
        writeln!(self.operators, "{} {} l", x, y)?;
        Ok(())
    }

    fn circle_path(&mut self, (cx, cy): BackendCoord, radius: f64) -> Result<(), PdfError> {
        let (cx, cy) = (cx as f64, cy as f64);
        let k = radius * KAPPA;
        let ops = &mut self.operators;
        writeln!(ops, "{} {} m", number(cx + radius), number(cy))?;
        for (c1, c2, end) in [
            ((radius, k), (k, radius), (0.0, radius)),
            ((-k, radius), (-radius, k), (-radius, 0.0)),
            ((-radius, -k), (-k, -radius), (0.0, -radius)),
            ((k, -radius), (radius, -k), (radius, 0.0)),
        ] {
            writeln!(
                ops,
                "{} {} {} {} {} {} c",
                number(cx + c1.0),
                number(cy + c1.1),
                number(cx + c2.0),
                number(cy + c2.1),
                number(cx + end.0),
                number(cy + end.1)
            )?;
        }
        ops.push_str("h\n");
        Ok(())
    }

    fn flush(&mut self) {
        if !self.saved {
            let operators = std::mem::take(&mut self.operators);
            self.document.push_page(self.size, operators);
            self.saved = true;
        }
    }
}

impl Drop for PdfPage<'_> {
    fn drop(&mut self) {
        self.flush();
    }
}

impl DrawingBackend for PdfPage<'_> {
    type ErrorType = PdfError;

    fn get_size(&self) -> (u32, u32) {
        self.size
    }

    fn ensure_prepared(&mut self) -> DrawResult {
        Ok(())
    }

    fn present(&mut self) -> DrawResult {
        self.flush();
        Ok(())
    }

    fn draw_pixel(&mut self, (x, y): BackendCoord, color: BackendColor) -> DrawResult {
        if color.alpha == 0.0 {
            return Ok(());
        }
        self.operators.push_str("q\n");
        self.set_color(color, false)?;
        writeln!(self.operators, "{} {} 1 1 re f\nQ", x, y).map_err(PdfError::from)?;
        Ok(())
    }

    fn draw_line<S: BackendStyle>(
        &mut self,
        from: BackendCoord,
        to: BackendCoord,
        style: &S,
    ) -> DrawResult {
        if style.color().alpha == 0.0 {
            return Ok(());
        }
        self.operators.push_str("q\n");
        self.set_stroke(style)?;
        self.move_to(from)?;
        self.line_to(to)?;
        self.operators.push_str("S\nQ\n");
        Ok(())
    }

    fn draw_rect<S: BackendStyle>(
        &mut self,
        upper_left: BackendCoord,
        bottom_right: BackendCoord,
        style: &S,
        fill: bool,
    ) -> DrawResult {
        if style.color().alpha == 0.0 {
            return Ok(());
        }
        self.operators.push_str("q\n");
        if fill {
            self.set_color(style.color(), false)?;
        } else {
            self.set_stroke(style)?;
        }
        writeln!(
            self.operators,
            "{} {} {} {} re {}\nQ",
            upper_left.0,
            upper_left.1,
            bottom_right.0 - upper_left.0,
            bottom_right.1 - upper_left.1,
            if fill { "f" } else { "S" }
        )
        .map_err(PdfError::from)?;
        Ok(())
    }

    fn draw_path<S: BackendStyle, I: IntoIterator<Item = BackendCoord>>(
        &mut self,
        path: I,
        style: &S,
    ) -> DrawResult {
        if style.color().alpha == 0.0 {
            return Ok(());
        }
        let mut points = path.into_iter();
        let Some(first) = points.next() else {
            return Ok(());
        };
        self.operators.push_str("q\n");
        self.set_stroke(style)?;
        self.move_to(first)?;
        for point in points {
            self.line_to(point)?;
        }
        self.operators.push_str("S\nQ\n");
        Ok(())
    }

    fn draw_circle<S: BackendStyle>(
        &mut self,
        center: BackendCoord,
        radius: u32,
        style: &S,
        fill: bool,
    ) -> DrawResult {
        if style.color().alpha == 0.0 {
            return Ok(());
        }
        self.operators.push_str("q\n");
        if fill {
            self.set_color(style.color(), false)?;
        } else {
            self.set_stroke(style)?;
        }
        self.circle_path(center, radius as f64)?;
        self.operators.push_str(if fill { "f\nQ\n" } else { "S\nQ\n" });
        Ok(())
    }

    fn fill_polygon<S: BackendStyle, I: IntoIterator<Item = BackendCoord>>(
        &mut self,
        vert: I,
        style: &S,
    ) -> DrawResult {
        if style.color().alpha == 0.0 {
            return Ok(());
        }
        let mut points = vert.into_iter();
        let Some(first) = points.next() else {
            return Ok(());
        };
        self.operators.push_str("q\n");
        self.set_color(style.color(), false)?;
        self.move_to(first)?;
        for point in points {
            self.line_to(point)?;
        }
        self.operators.push_str("h f\nQ\n");
        Ok(())
    }

    fn draw_text<TStyle: BackendTextStyle>(
        &mut self,
        text: &str,
        style: &TStyle,
        pos: BackendCoord,
    ) -> DrawResult {
        let color = style.color();
        if text.is_empty() || color.alpha == 0.0 {
            return Ok(());
        }

        let size = style.size();
        let width = text_width(text, size);
        let anchor = style.anchor();
        let along = match anchor.h_pos {
            HPos::Left => 0.0,
            HPos::Center => -width / 2.0,
            HPos::Right => -width,
        };
        // Offset of the baseline along the text's up direction
        let up = match anchor.v_pos {
            VPos::Top => -ASCENT * size,
            VPos::Center => -(ASCENT - DESCENT) * size / 2.0,
            VPos::Bottom => DESCENT * size,
        };

        // Clockwise rotation on a y-down surface
        let (cos, sin) = match style.transform() {
            FontTransform::None => (1.0, 0.0),
            FontTransform::Rotate90 => (0.0, 1.0),
            FontTransform::Rotate180 => (-1.0, 0.0),
            FontTransform::Rotate270 => (0.0, -1.0),
        };
        let (base_x, base_y) = (cos, sin);
        let (up_x, up_y) = (sin, -cos);
        let origin_x = pos.0 as f64 + along * base_x + up * up_x;
        let origin_y = pos.1 as f64 + along * base_y + up * up_y;

        let font = match style.style() {
            FontStyle::Bold => FONT_BOLD,
            _ => FONT_REGULAR,
        };

        self.operators.push_str("q\n");
        self.set_color(color, false)?;
        writeln!(
            self.operators,
            "BT /{} 1 Tf {} {} {} {} {} {} Tm {} Tj ET\nQ",
            font,
            number(base_x * size),
            number(base_y * size),
            number(up_x * size),
            number(up_y * size),
            number(origin_x),
            number(origin_y),
            pdf_string(text)
        )
        .map_err(PdfError::from)?;
        Ok(())
    }

    fn estimate_text_size<TStyle: BackendTextStyle>(
        &self,
        text: &str,
        style: &TStyle,
    ) -> Result<(u32, u32), DrawingErrorKind<Self::ErrorType>> {
        let size = style.size();
        let width = text_width(text, size).ceil() as u32;
        let height = ((ASCENT + DESCENT) * size).ceil() as u32;
        Ok(match style.transform() {
            FontTransform::Rotate90 | FontTransform::Rotate270 => (height, width),
            _ => (width, height),
        })
    }
}

impl From<PdfError> for DrawingErrorKind<PdfError> {
    fn from(error: PdfError) -> Self {
        DrawingErrorKind::DrawingError(error)
    }
}
