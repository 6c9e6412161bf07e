//! Label colours.

use plotters::style::RGBColor;

/// Ten muted hues, distinguishable in print.
pub const DEEP: [RGBColor; 10] = [
    RGBColor(0x4C, 0x72, 0xB0),
    RGBColor(0xDD, 0x84, 0x52),
    RGBColor(0x55, 0xA8, 0x68),
    RGBColor(0xC4, 0x4E, 0x52),
    RGBColor(0x81, 0x72, 0xB3),
    RGBColor(0x93, 0x78, 0x60),
    RGBColor(0xDA, 0x8B, 0xC3),
    RGBColor(0x8C, 0x8C, 0x8C),
    RGBColor(0xCC, 0xB9, 0x74),
    RGBColor(0x64, 0xB5, 0xCD),
];

/// Bar outline grey.
pub const BAR_EDGE: RGBColor = RGBColor(0x80, 0x80, 0x80);

/// Error bar grey.
pub const ERROR_BAR: RGBColor = RGBColor(0x33, 0x33, 0x33);
