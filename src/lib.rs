#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]

//! SPFD54124B color lcd driver for the Nokia 1616 panel
//! The controller is written with 9 bit words over a spi peripheral or bit banged gpio lines.
//! Only writing is supported, the panel is never read back.

pub mod color;
pub mod command;
pub mod interface;
pub mod orientation;
mod register;
#[cfg(test)]
mod testing;

pub use crate::color::{Color, ColorMode};
pub use crate::orientation::Orientation;

use core::time::Duration;
use log::{debug, info, trace};

/// Panel width in pixel
pub const WIDTH: u16 = 130;
/// Panel height in pixel
pub const HEIGHT: u16 = 161;
/// Text rows for a 9 pixel high font
pub const TEXT_ROWS: u16 = HEIGHT / 9;
/// Text columns for a 6 pixel wide font
pub const TEXT_COLUMNS: u16 = WIDTH / 6;

// the visible area starts at column 2 and row 1 of the controller memory
const COLUMN_OFFSET: u32 = 2;
const ROW_OFFSET: u32 = 1;
// only the low address byte is used by the panel
const MAX_ADDRESS: u32 = 0xFF;

const SWRESET_DELAY: Duration = Duration::from_millis(200);
const SLPOUT_DELAY: Duration = Duration::from_millis(120);

/// Controller Error
#[derive(Debug, PartialEq, Eq)]
pub enum Error {
    /// controller interface error
    Interface(interface::Error),
    /// a window address exceeds the 8 bit address range of the panel
    CoordinateOutOfRange(u32),
    /// a window without pixels was requested
    EmptyWindow,
    /// pixels can not be streamed in this color mode
    UnsupportedColorMode(ColorMode),
    /// the rotation is not a multiple of 90 degrees below 360
    InvalidOrientation(u16),
    /// the orientation name could not be parsed
    InvalidOrientationName,
}
impl From<interface::Error> for Error {
    fn from(e: interface::Error) -> Self {
        Error::Interface(e)
    }
}

/// Display settings applied during initialization
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// foreground color, kept for the application
    pub foreground: Color,
    /// background color, the panel is cleared with it
    pub background: Color,
    /// interface pixel format, fixed for the lifetime of the driver
    pub color_mode: ColorMode,
    /// initial orientation
    pub orientation: Orientation,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            foreground: Color::WHITE,
            background: Color::BLACK,
            color_mode: ColorMode::Rgb565,
            orientation: Orientation::Deg0,
        }
    }
}

/// Display inversion control (NVCTR)
/// A set flag selects frame inversion, a cleared flag line inversion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InversionControl {
    /// normal full color mode
    pub normal: bool,
    /// idle mode
    pub idle: bool,
    /// full color partial mode
    pub partial: bool,
}

impl InversionControl {
    pub(crate) fn into_arg(self) -> u8 {
        let mut arg = 0;
        if self.normal {
            arg |= register::NVCTR_NLA;
        }
        if self.idle {
            arg |= register::NVCTR_NLB;
        }
        if self.partial {
            arg |= register::NVCTR_NLC;
        }
        arg
    }
}

/// Controller addresses of a window: (first column, last column, first row, last row)
/// Fails if the window is empty or does not fit into the 8 bit address range
pub fn window_bounds(x: u16, y: u16, w: u16, h: u16) -> Result<(u8, u8, u8, u8), Error> {
    if w == 0 || h == 0 {
        return Err(Error::EmptyWindow);
    }
    let (x, y, w, h) = (x as u32, y as u32, w as u32, h as u32);
    let bounds = [
        x + COLUMN_OFFSET,
        x + w + COLUMN_OFFSET - 1,
        y + ROW_OFFSET,
        y + h + ROW_OFFSET,
    ];
    if let Some(&address) = bounds.iter().find(|&&address| address > MAX_ADDRESS) {
        return Err(Error::CoordinateOutOfRange(address));
    }
    Ok((
        bounds[0] as u8,
        bounds[1] as u8,
        bounds[2] as u8,
        bounds[3] as u8,
    ))
}

/// SPFD54124B lcd driver
/// The controller can be connected with a spi peripheral or bit banged gpio lines
pub struct Spfd54124b<Spfd54124bInterface> {
    interface: Spfd54124bInterface,
    color_mode: ColorMode,
    orientation: Orientation,
    foreground: Color,
    background: Color,
}

impl<Spfd54124bInterface> Spfd54124b<Spfd54124bInterface>
where
    Spfd54124bInterface: interface::Spfd54124bInterface,
{
    /// Creates a new driver, resets and initializes the panel and clears it
    /// with the background color.
    /// The interface is dropped if the initialization fails
    pub fn new(interface: Spfd54124bInterface, config: Config) -> Result<Self, Error> {
        if config.color_mode == ColorMode::Rgb444 {
            return Err(Error::UnsupportedColorMode(config.color_mode));
        }

        let mut display = Spfd54124b {
            interface,
            color_mode: config.color_mode,
            orientation: config.orientation,
            foreground: config.foreground,
            background: config.background,
        };
        display.init()?;
        Ok(display)
    }

    fn init(&mut self) -> Result<(), Error> {
        info!(
            "initializing panel, color mode {:?} ({} bit per pixel)",
            self.color_mode,
            self.color_mode.bits_per_pixel()
        );
        self.interface.set_backlight(true)?;
        self.interface.reset()?;

        self.interface.write_command(command::SWRESET)?;
        self.interface.delay(SWRESET_DELAY)?;

        self.interface
            .write_command_with_args(command::COLMOD, &[self.color_mode.register_value()])?;

        // the controller needs time to leave sleep mode before it takes new commands
        self.interface.write_command(command::SLPOUT)?;
        self.interface.delay(SLPOUT_DELAY)?;

        self.interface.write_command(command::DISPON)?;

        self.set_orientation(self.orientation)?;
        self.clear(self.background)?;
        info!("panel ready");
        Ok(())
    }

    /// Gives back the interface
    pub fn release(self) -> Spfd54124bInterface {
        self.interface
    }

    // orientation ------------------------------------------------------------------------------

    /// Set the scan direction of the controller memory
    pub fn set_orientation(&mut self, orientation: Orientation) -> Result<(), Error> {
        debug!("orientation {} degrees", orientation.degrees());
        self.interface
            .write_command_with_args(command::MADCTR, &[orientation.madctr()])?;
        self.orientation = orientation;
        Ok(())
    }

    /// Active orientation
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    // window and pixel functions --------------------------------------------------------------

    /// Selects the area written by the following pixels and unlocks the memory write
    /// Every pixel data word until the next command ends up in this window
    pub fn set_window(&mut self, x: u16, y: u16, w: u16, h: u16) -> Result<(), Error> {
        let (x_start, x_end, y_start, y_end) = window_bounds(x, y, w, h)?;
        trace!("window columns {}..={} rows {}..={}", x_start, x_end, y_start, y_end);

        // addresses are 16 bit, the high byte is always zero on this panel
        self.interface
            .write_command_with_args(command::CASET, &[0, x_start, 0, x_end])?;
        self.interface
            .write_command_with_args(command::RASET, &[0, y_start, 0, y_end])?;
        self.interface.write_command(command::RAMWR)?;
        Ok(())
    }

    /// Sends one pixel into the current window
    pub fn send_pixel(&mut self, color: Color) -> Result<(), Error> {
        self.check_color_mode()?;
        self.write_pixel(color)
    }

    /// Sends a stream of pixels into the current window
    pub fn send_pixels<C>(&mut self, colors: C) -> Result<(), Error>
    where
        C: IntoIterator<Item = Color>,
    {
        self.check_color_mode()?;
        for color in colors {
            self.write_pixel(color)?;
        }
        Ok(())
    }

    /// Fills a rectangle with a single color
    pub fn fill_rect(
        &mut self,
        x: u16,
        y: u16,
        w: u16,
        h: u16,
        color: Color,
    ) -> Result<(), Error> {
        self.check_color_mode()?;
        self.set_window(x, y, w, h)?;
        for _ in 0..(w as u32 * h as u32) {
            self.write_pixel(color)?;
        }
        Ok(())
    }

    /// Sets a single pixel
    pub fn draw_pixel(&mut self, x: u16, y: u16, color: Color) -> Result<(), Error> {
        self.fill_rect(x, y, 1, 1, color)
    }

    /// Paints the whole panel with color
    pub fn clear(&mut self, color: Color) -> Result<(), Error> {
        self.fill_rect(0, 0, WIDTH, HEIGHT, color)
    }

    fn check_color_mode(&self) -> Result<(), Error> {
        match self.color_mode {
            ColorMode::Rgb565 | ColorMode::Rgb666 => Ok(()),
            ColorMode::Rgb444 => Err(Error::UnsupportedColorMode(self.color_mode)),
        }
    }

    fn write_pixel(&mut self, color: Color) -> Result<(), Error> {
        match self.color_mode {
            ColorMode::Rgb565 => {
                let [high, low] = color.to_rgb565().to_be_bytes();
                self.interface.write_data(high)?;
                self.interface.write_data(low)?;
            }
            ColorMode::Rgb666 => {
                for channel in color.to_rgb666() {
                    self.interface.write_data(channel)?;
                }
            }
            // two 12 bit pixels share three bytes, single pixels can not be sent
            ColorMode::Rgb444 => return Err(Error::UnsupportedColorMode(self.color_mode)),
        }
        Ok(())
    }

    /// Color mode selected during initialization
    pub fn color_mode(&self) -> ColorMode {
        self.color_mode
    }

    // misc ------------------------------------------------------------------------------------

    /// Switch the backlight led
    pub fn set_backlight(&mut self, on: bool) -> Result<(), Error> {
        self.interface.set_backlight(on)?;
        Ok(())
    }

    /// Selects line or frame inversion for the different display modes
    pub fn set_inversion_control(&mut self, inversion: InversionControl) -> Result<(), Error> {
        self.interface
            .write_command_with_args(command::NVCTR, &[inversion.into_arg()])?;
        Ok(())
    }

    /// Foreground color
    pub fn foreground(&self) -> Color {
        self.foreground
    }

    /// Changes the foreground color, nothing is redrawn
    pub fn set_foreground(&mut self, color: Color) {
        self.foreground = color;
    }

    /// Background color
    pub fn background(&self) -> Color {
        self.background
    }

    /// Changes the background color, nothing is redrawn
    pub fn set_background(&mut self, color: Color) {
        self.background = color;
    }
}

// --------------------------- embedded graphics support --------------------------------------

use embedded_graphics_core::{
    pixelcolor::Rgb565,
    prelude::*,
    primitives::{PointsIter, Rectangle},
};

impl<Spfd54124bInterface> DrawTarget for Spfd54124b<Spfd54124bInterface>
where
    Spfd54124bInterface: interface::Spfd54124bInterface,
{
    type Color = Rgb565;

    type Error = Error;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        let bounding_box = self.bounding_box();
        for Pixel(coord, color) in pixels.into_iter() {
            if bounding_box.contains(coord) {
                self.draw_pixel(coord.x as u16, coord.y as u16, color.into())?;
            }
        }
        Ok(())
    }

    fn fill_contiguous<I>(&mut self, area: &Rectangle, colors: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Self::Color>,
    {
        if area.is_zero_sized() {
            return Ok(());
        }
        // partially visible areas are drawn pixel by pixel
        if area.intersection(&self.bounding_box()) != *area {
            return self.draw_iter(
                area.points()
                    .zip(colors)
                    .map(|(pos, color)| Pixel(pos, color)),
            );
        }

        self.set_window(
            area.top_left.x as u16,
            area.top_left.y as u16,
            area.size.width as u16,
            area.size.height as u16,
        )?;
        let pixel_count = (area.size.width * area.size.height) as usize;
        self.send_pixels(colors.into_iter().take(pixel_count).map(Color::from))
    }

    fn fill_solid(&mut self, area: &Rectangle, color: Self::Color) -> Result<(), Self::Error> {
        let area = area.intersection(&self.bounding_box());
        if area.is_zero_sized() {
            return Ok(());
        }
        self.fill_rect(
            area.top_left.x as u16,
            area.top_left.y as u16,
            area.size.width as u16,
            area.size.height as u16,
            color.into(),
        )
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.fill_rect(0, 0, WIDTH, HEIGHT, color.into())
    }
}

impl<Spfd54124bInterface> OriginDimensions for Spfd54124b<Spfd54124bInterface>
where
    Spfd54124bInterface: interface::Spfd54124bInterface,
{
    fn size(&self) -> Size {
        if self.orientation.is_landscape() {
            Size::new(HEIGHT as u32, WIDTH as u32)
        } else {
            Size::new(WIDTH as u32, HEIGHT as u32)
        }
    }
}
