use colored::Color;

pub const PRIMARY: Color = Color::TrueColor { r: 120, g: 200, b: 255 };
pub const SEPARATOR: Color = Color::BrightBlack;
pub const TEXT_DEFAULT: Color = Color::White;

pub const OPEN: Color = Color::Green;
pub const CLOSED: Color = Color::Red;
pub const CAUSE: Color = Color::BrightBlack;
