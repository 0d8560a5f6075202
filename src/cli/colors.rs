//! Theme of the `cobalt` output.
//!
//! - COBALT_BLUE: sources, highlighted arguments, the banner
//! - ROW_GREY: the gutter in front of printed rows

use colored::Color;

pub(crate) const COBALT_BLUE: Color = Color::TrueColor {
    r: 61,
    g: 89,
    b: 171,
};

pub(crate) const ROW_GREY: Color = Color::TrueColor {
    r: 128,
    g: 128,
    b: 140,
};
