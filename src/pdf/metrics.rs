//! Helvetica font metrics for text layout.

/// Advance widths of printable ASCII (0x20..=0x7E) in 1/1000 em, from the
/// Adobe Helvetica AFM.
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '../
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, // 0..9
    278, 278, 584, 584, 584, 556, 1015, // :..@
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, // A..M
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, // N..Z
    278, 278, 278, 469, 556, 333, // [..`
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, // a..m
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, // n..z
    334, 260, 334, 584, // {..~
];

/// Width used for characters outside printable ASCII.
const DEFAULT_WIDTH: u16 = 556;

/// Cap height and descender as fractions of the font size.
pub const ASCENT: f64 = 0.718;
pub const DESCENT: f64 = 0.207;

/// Advance width of one character in 1/1000 em.
#[inline]
pub fn char_width(c: char) -> u16 {
    match c as u32 {
        code @ 0x20..=0x7E => HELVETICA_WIDTHS[(code - 0x20) as usize],
        _ => DEFAULT_WIDTH,
    }
}

/// Width of `text` set at `size`, in the same unit as `size`.
pub fn text_width(text: &str, size: f64) -> f64 {
    let units: u32 = text.chars().map(|c| char_width(c) as u32).sum();
    units as f64 * size / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_alignment() {
        assert_eq!(char_width(' '), 278);
        assert_eq!(char_width('0'), 556);
        assert_eq!(char_width('@'), 1015);
        assert_eq!(char_width('A'), 667);
        assert_eq!(char_width('W'), 944);
        assert_eq!(char_width('a'), 556);
        assert_eq!(char_width('i'), 222);
        assert_eq!(char_width('~'), 584);
    }

    #[test]
    fn test_text_width() {
        assert!((text_width("ii", 10.0) - 4.44).abs() < 1e-9);
        assert_eq!(text_width("", 12.0), 0.0);
    }
}
