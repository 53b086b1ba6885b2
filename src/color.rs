use derive_more::Display;

#[derive(Debug, Clone, PartialEq, Display)]
pub enum WebColor {
    #[display(fmt = "{}", _0)]
    RGB(RGBColor),
    #[display(fmt = "{}", _0)]
    Named(NamedColor),
}

impl Default for WebColor {
    fn default() -> Self {
        WebColor::Named(NamedColor::Black)
    }
}

impl From<RGBColor> for WebColor {
    fn from(color: RGBColor) -> Self {
        WebColor::RGB(color)
    }
}

impl From<NamedColor> for WebColor {
    fn from(color: NamedColor) -> Self {
        WebColor::Named(color)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display)]
#[display(fmt = "#{:02X}{:02X}{:02X}", red, green, blue)]
pub struct RGBColor {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl RGBColor {
    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Builds a gray with the same value in every channel.
    pub const fn gray(value: u8) -> Self {
        Self::new(value, value, value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum NamedColor {
    #[display(fmt = "white")]
    White,
    #[display(fmt = "black")]
    Black,
}

// Pattern palette
pub const MAIN_PIECE_FILL: RGBColor = RGBColor::new(0xE8, 0xF4, 0xF8);
pub const REINFORCEMENT_FILL: RGBColor = RGBColor::new(0xFF, 0xEB, 0x3B);
pub const OUTLINE: RGBColor = RGBColor::gray(0x33);
pub const DIMENSION_LINE: RGBColor = RGBColor::gray(0x66);
pub const CANVAS_BORDER: RGBColor = RGBColor::gray(0xCC);
