//! RGB colors and the pixel encodings understood by the controller

use embedded_graphics_core::pixelcolor::{Rgb565, Rgb888, RgbColor};

/// Color mode of the controller interface
/// Selected once with COLMOD during initialization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorMode {
    /// 12 bits per pixel (RGB 4-4-4), 4K colors
    Rgb444,
    /// 16 bits per pixel (RGB 5-6-5), 65K colors
    #[default]
    Rgb565,
    /// 18 bits per pixel (RGB 6-6-6), 262K colors
    Rgb666,
}

impl ColorMode {
    /// Value of the COLMOD data byte
    pub fn register_value(self) -> u8 {
        match self {
            ColorMode::Rgb444 => 0x03,
            ColorMode::Rgb565 => 0x05,
            ColorMode::Rgb666 => 0x06,
        }
    }

    /// Number of bits each pixel carries in this mode
    pub fn bits_per_pixel(self) -> u8 {
        match self {
            ColorMode::Rgb444 => 12,
            ColorMode::Rgb565 => 16,
            ColorMode::Rgb666 => 18,
        }
    }
}

/// A 24 bit RGB color
/// Converted into the panel encoding only when it is sent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color {
    /// red channel
    pub r: u8,
    /// green channel
    pub g: u8,
    /// blue channel
    pub b: u8,
}

impl Color {
    /// black
    pub const BLACK: Color = Color::new(0, 0, 0);
    /// white
    pub const WHITE: Color = Color::new(255, 255, 255);
    /// red
    pub const RED: Color = Color::new(255, 0, 0);
    /// green
    pub const GREEN: Color = Color::new(0, 255, 0);
    /// blue
    pub const BLUE: Color = Color::new(0, 0, 255);
    /// yellow
    pub const YELLOW: Color = Color::new(255, 255, 0);

    /// Creates a color from its 8 bit channels
    pub const fn new(r: u8, g: u8, b: u8) -> Color {
        Color { r, g, b }
    }

    /// Packs the color into 5 red, 6 green and 5 blue bits
    pub const fn to_rgb565(self) -> u16 {
        ((self.r as u16 & 0xF8) << 8) | ((self.g as u16 & 0xFC) << 3) | (self.b as u16 >> 3)
    }

    /// Unpacks a 5-6-5 value, the dropped low bits of every channel are zero
    pub const fn from_rgb565(packed: u16) -> Color {
        Color {
            r: ((packed >> 8) & 0xF8) as u8,
            g: ((packed >> 3) & 0xFC) as u8,
            b: ((packed << 3) & 0xF8) as u8,
        }
    }

    /// One byte per channel with the 6 significant bits left aligned,
    /// as the controller reads them in 18 bit mode
    pub const fn to_rgb666(self) -> [u8; 3] {
        [self.r & 0xFC, self.g & 0xFC, self.b & 0xFC]
    }

    /// Packs the color into 4 bits per channel: 0x0RGB
    pub const fn to_rgb444(self) -> u16 {
        ((self.r as u16 >> 4) << 8) | ((self.g as u16 >> 4) << 4) | (self.b as u16 >> 4)
    }
}

impl From<Rgb565> for Color {
    fn from(color: Rgb565) -> Self {
        Color::from_rgb565(
            ((color.r() as u16) << 11) | ((color.g() as u16) << 5) | color.b() as u16,
        )
    }
}

impl From<Rgb888> for Color {
    fn from(color: Rgb888) -> Self {
        Color::new(color.r(), color.g(), color.b())
    }
}

impl From<Color> for Rgb565 {
    fn from(color: Color) -> Self {
        Rgb565::new(color.r >> 3, color.g >> 2, color.b >> 3)
    }
}
