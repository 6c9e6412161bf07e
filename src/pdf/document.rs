//! PDF document assembly: objects, page tree, cross-reference table.

use std::collections::BTreeSet;
use std::fmt::Write as FmtWrite;
use std::io::Write;
use std::path::Path;

use flate2::Compression;
use flate2::write::ZlibEncoder;

use super::PdfError;
use crate::common::encoding::encode_win_ansi;

/// Object numbers of the fixed objects written before the pages.
const CATALOG_ID: usize = 1;
const PAGES_ID: usize = 2;
const FONT_REGULAR_ID: usize = 3;
const FONT_BOLD_ID: usize = 4;
const RESOURCES_ID: usize = 5;
const INFO_ID: usize = 6;
const FIRST_PAGE_ID: usize = 7;

/// Resource names of the two fonts.
pub(crate) const FONT_REGULAR: &str = "F1";
pub(crate) const FONT_BOLD: &str = "F2";

/// A recorded page: pixel size of the drawing and its operators.
#[derive(Debug)]
struct PageContent {
    pixels: (u32, u32),
    operators: String,
}

/// A multi-page PDF built in memory.
#[derive(Debug)]
pub struct PdfDocument {
    /// Page size in points (1/72 inch)
    page_size: (f64, f64),
    pages: Vec<PageContent>,
    /// Opacity levels in percent that need an ExtGState
    alphas: BTreeSet<u8>,
    title: Option<String>,
}

impl PdfDocument {
    /// Create an empty document whose pages measure `page_size` points.
    pub fn new(page_size: (f64, f64)) -> Self {
        Self {
            page_size,
            pages: Vec::new(),
            alphas: BTreeSet::new(),
            title: None,
        }
    }

    /// Set the document title shown by PDF readers.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = Some(title.into());
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn page_size(&self) -> (f64, f64) {
        self.page_size
    }

    /// Append a page drawn at `pixels` resolution; it is scaled to the page size.
    pub(crate) fn push_page(&mut self, pixels: (u32, u32), operators: String) {
        self.pages.push(PageContent { pixels, operators });
    }

    /// Resource name of the graphics state for `alpha`, or `None` when opaque.
    pub(crate) fn alpha_state(&mut self, alpha: f64) -> Option<String> {
        let percent = (alpha.clamp(0.0, 1.0) * 100.0).round() as u8;
        if percent >= 100 {
            return None;
        }
        self.alphas.insert(percent);
        Some(format!("GA{}", percent))
    }

    /// Serialize the document.
    pub fn to_bytes(&self) -> Result<Vec<u8>, PdfError> {
        let mut writer = ObjectWriter::new();

        let page_ids: Vec<usize> = (0..self.pages.len())
            .map(|i| FIRST_PAGE_ID + 2 * i)
            .collect();

        writer.object(
            CATALOG_ID,
            &format!("<< /Type /Catalog /Pages {} 0 R >>", PAGES_ID),
        );

        let mut kids = String::new();
        for id in &page_ids {
            write!(kids, "{} 0 R ", id)?;
        }
        writer.object(
            PAGES_ID,
            &format!(
                "<< /Type /Pages /Kids [{}] /Count {} >>",
                kids.trim_end(),
                page_ids.len()
            ),
        );

        writer.object(
            FONT_REGULAR_ID,
            "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica /Encoding /WinAnsiEncoding >>",
        );
        writer.object(
            FONT_BOLD_ID,
            "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica-Bold /Encoding /WinAnsiEncoding >>",
        );

        let mut states = String::new();
        for percent in &self.alphas {
            let alpha = *percent as f64 / 100.0;
            write!(
                states,
                "/GA{} << /Type /ExtGState /ca {:.2} /CA {:.2} >> ",
                percent, alpha, alpha
            )?;
        }
        writer.object(
            RESOURCES_ID,
            &format!(
                "<< /Font << /{} {} 0 R /{} {} 0 R >> /ExtGState << {}>> >>",
                FONT_REGULAR, FONT_REGULAR_ID, FONT_BOLD, FONT_BOLD_ID, states
            ),
        );

        let mut info = String::from("<< /Producer ");
        info.push_str(&pdf_string(concat!("fjstatplot ", env!("CARGO_PKG_VERSION"))));
        if let Some(ref title) = self.title {
            info.push_str(" /Title ");
            info.push_str(&pdf_string(title));
        }
        info.push_str(" >>");
        writer.object(INFO_ID, &info);

        let (width, height) = self.page_size;
        for (page, &page_id) in self.pages.iter().zip(&page_ids) {
            let content_id = page_id + 1;
            writer.object(
                page_id,
                &format!(
                    "<< /Type /Page /Parent {} 0 R /MediaBox [0 0 {} {}] /Resources {} 0 R /Contents {} 0 R >>",
                    PAGES_ID,
                    number(width),
                    number(height),
                    RESOURCES_ID,
                    content_id
                ),
            );

            // Map pixel coordinates (origin top-left, y down) onto the page
            let sx = width / page.pixels.0.max(1) as f64;
            let sy = height / page.pixels.1.max(1) as f64;
            let mut content = String::with_capacity(page.operators.len() + 64);
            writeln!(
                content,
                "q {} 0 0 {} 0 {} cm",
                number(sx),
                number(-sy),
                number(height)
            )?;
            content.push_str(&page.operators);
            content.push_str("Q\n");

            let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
            encoder.write_all(content.as_bytes())?;
            let compressed = encoder.finish()?;
            writer.stream(content_id, "/Filter /FlateDecode", &compressed);
        }

        Ok(writer.finish(CATALOG_ID, INFO_ID))
    }

    /// Write the document to `path`.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), PdfError> {
        let bytes = self.to_bytes()?;
        std::fs::write(path, bytes)?;
        Ok(())
    }
}

/// Format a coordinate with at most three decimals.
pub(crate) fn number(value: f64) -> String {
    let mut s = format!("{:.3}", value);
    if s.contains('.') {
        while s.ends_with('0') {
            s.pop();
        }
        if s.ends_with('.') {
            s.pop();
        }
    }
    if s == "-0" {
        s = "0".to_string();
    }
    s
}

/// Encode text as a PDF literal string in WinAnsiEncoding.
pub(crate) fn pdf_string(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('(');
    for byte in encode_win_ansi(text) {
        match byte {
            b'(' | b')' | b'\\' => {
                out.push('\\');
                out.push(byte as char);
            },
            0x20..=0x7E => out.push(byte as char),
            _ => {
                // Octal keeps the content stream ASCII
                let _ = write!(out, "\\{:03o}", byte);
            },
        }
    }
    out.push(')');
    out
}

/// Accumulates numbered objects and records their byte offsets.
struct ObjectWriter {
    buffer: Vec<u8>,
    offsets: Vec<(usize, usize)>,
}

impl ObjectWriter {
    fn new() -> Self {
        let mut buffer = Vec::with_capacity(16 * 1024);
        // Binary comment marks the file as binary for transfer tools
        buffer.extend_from_slice(b"%PDF-1.4\n%\xE2\xE3\xCF\xD3\n");
        Self {
            buffer,
            offsets: Vec::new(),
        }
    }

    fn object(&mut self, id: usize, body: &str) {
        self.offsets.push((id, self.buffer.len()));
        self.buffer
            .extend_from_slice(format!("{} 0 obj\n{}\nendobj\n", id, body).as_bytes());
    }

    fn stream(&mut self, id: usize, dictionary: &str, data: &[u8]) {
        self.offsets.push((id, self.buffer.len()));
        self.buffer.extend_from_slice(
            format!(
                "{} 0 obj\n<< /Length {} {} >>\nstream\n",
                id,
                data.len(),
                dictionary
            )
            .as_bytes(),
        );
        self.buffer.extend_from_slice(data);
        self.buffer.extend_from_slice(b"\nendstream\nendobj\n");
    }

    fn finish(mut self, root: usize, info: usize) -> Vec<u8> {
        self.offsets.sort_unstable();
        let size = self.offsets.last().map(|(id, _)| id + 1).unwrap_or(1);
        let mut table = vec![None; size];
        for (id, offset) in &self.offsets {
            table[*id] = Some(*offset);
        }

        let xref_offset = self.buffer.len();
        let mut xref = format!("xref\n0 {}\n0000000000 65535 f \n", size);
        for entry in table.iter().skip(1) {
            match entry {
                Some(offset) => xref.push_str(&format!("{:010} 00000 n \n", offset)),
                None => xref.push_str("0000000000 65535 f \n"),
            }
        }
        xref.push_str(&format!(
            "trailer\n<< /Size {} /Root {} 0 R /Info {} 0 R >>\nstartxref\n{}\n%%EOF\n",
            size, root, info, xref_offset
        ));
        self.buffer.extend_from_slice(xref.as_bytes());
        self.buffer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count(haystack: &[u8], needle: &[u8]) -> usize {
        haystack.windows(needle.len()).filter(|w| *w == needle).count()
    }

    #[test]
    fn test_number_formatting() {
        assert_eq!(number(1.0), "1");
        assert_eq!(number(0.72), "0.72");
        assert_eq!(number(-0.0001), "0");
        assert_eq!(number(612.5), "612.5");
    }

    #[test]
    fn test_pdf_string_escaping() {
        assert_eq!(pdf_string("CD4 (%)"), "(CD4 \\(%\\))");
        assert_eq!(pdf_string("a\\b"), "(a\\\\b)");
        assert_eq!(pdf_string("\u{b5}m"), "(\\265m)");
    }

    #[test]
    fn test_alpha_states() {
        let mut document = PdfDocument::new((792.0, 612.0));
        assert_eq!(document.alpha_state(1.0), None);
        assert_eq!(document.alpha_state(0.5).as_deref(), Some("GA50"));
        assert_eq!(document.alpha_state(0.5).as_deref(), Some("GA50"));
        assert_eq!(document.alphas.len(), 1);
    }

    #[test]
    fn test_document_structure() {
        let mut document = PdfDocument::new((792.0, 612.0));
        document.set_title("stats");
        document.push_page((1100, 850), "0 0 1 rg 0 0 10 10 re f\n".to_string());
        document.push_page((1100, 850), String::new());
        let bytes = document.to_bytes().unwrap();

        assert!(bytes.starts_with(b"%PDF-1.4"));
        assert!(bytes.ends_with(b"%%EOF\n"));
        assert_eq!(count(&bytes, b"/Type /Page "), 2);
        assert_eq!(count(&bytes, b"/Count 2"), 1);
        assert_eq!(count(&bytes, b"/FlateDecode"), 2);
        assert_eq!(count(&bytes, b"/Title (stats)"), 1);
    }

    #[test]
    fn test_xref_offsets_point_at_objects() {
        let mut document = PdfDocument::new((792.0, 612.0));
        document.push_page((100, 100), String::new());
        let bytes = document.to_bytes().unwrap();

        let marker = b"startxref\n";
        let at = bytes
            .windows(marker.len())
            .rposition(|w| w == marker)
            .unwrap()
            + marker.len();
        let tail = std::str::from_utf8(&bytes[at..]).unwrap();
        let xref_offset: usize = tail.lines().next().unwrap().parse().unwrap();
        assert!(bytes[xref_offset..].starts_with(b"xref"));

        // The table and trailer are plain ASCII
        let xref = std::str::from_utf8(&bytes[xref_offset..]).unwrap();
        let entries: Vec<&str> = xref.lines().skip(3).take(8).collect();
        for (i, entry) in entries.iter().enumerate() {
            let offset: usize = entry[..10].parse().unwrap();
            let expected = format!("{} 0 obj", i + 1);
            assert!(bytes[offset..].starts_with(expected.as_bytes()));
        }
    }
}
