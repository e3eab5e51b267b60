//! Contains the controller interface
//!
//! The controller reads 9 bit words: bit 8 tells a command (0) from data (1),
//! the lower 8 bits carry the payload.

use embedded_hal::{delay::*, digital::OutputPin, spi::SpiDevice};

/// Word width the spi bus has to be configured for
pub const SPI_WORD_BITS: u8 = 9;
/// Maximum spi clock used with the panel
pub const SPI_MAX_SPEED_HZ: u32 = 12_000_000;

/// Hold time of the reset line, before and after release
const RESET_DELAY_MS: u32 = 200;

const DATA_BIT: u16 = 0x100;
const WORD_MASK: u16 = 0x1FF;

/// Interface Error
#[derive(Debug, PartialEq, Eq)]
pub enum Error {
    /// A error in the spi driver
    SpiError,
    /// A error in the gpio driver
    GPIOError,
}

/// Frames a byte as command word, bit 8 cleared
pub const fn frame_command(cmd: u8) -> u16 {
    cmd as u16
}

/// Frames a byte as data word, bit 8 set
pub const fn frame_data(data: u8) -> u16 {
    DATA_BIT | data as u16
}

/// Trait to describe the interface with the controller
/// The controller is connected either to a spi peripheral supporting 9 bit words
/// or to plain gpio lines which are toggled by software
pub trait Spfd54124bInterface {
    /// transmit the lower 9 bits of word
    fn send_word(&mut self, word: u16) -> Result<(), Error>;

    /// issue a command on the controller
    fn write_command(&mut self, cmd: u8) -> Result<(), Error> {
        self.send_word(frame_command(cmd))
    }

    /// write a data byte to the controller
    fn write_data(&mut self, data: u8) -> Result<(), Error> {
        self.send_word(frame_data(data))
    }

    /// issue a command with arguments on the controller
    fn write_command_with_args(&mut self, cmd: u8, args: &[u8]) -> Result<(), Error> {
        self.write_command(cmd)?;
        for arg in args {
            self.write_data(*arg)?;
        }
        Ok(())
    }

    /// hardware reset of the controller
    fn reset(&mut self) -> Result<(), Error>;

    /// switch the backlight led
    fn set_backlight(&mut self, on: bool) -> Result<(), Error>;

    /// wait
    fn delay(&mut self, duration: core::time::Duration) -> Result<(), Error>;
}

fn set_pin<P: OutputPin>(pin: &mut P, high: bool) -> Result<(), Error> {
    let res = if high { pin.set_high() } else { pin.set_low() };
    res.map_err(|_| Error::GPIOError)
}

/// Implements the controller interface for a spi peripheral with 9 bit words
/// The bus must be configured with SPI_WORD_BITS bits per word,
/// chip select is handled by the SpiDevice
pub struct Spfd54124bSpiInterface<SPI, RST, BL, DELAY> {
    spi: SPI,
    rst: RST,
    bl: BL,
    delay: DELAY,
}

impl<SPI, RST, BL, DELAY> Spfd54124bSpiInterface<SPI, RST, BL, DELAY>
where
    SPI: SpiDevice<u16>,
    RST: OutputPin,
    BL: OutputPin,
    DELAY: DelayNs,
{
    /// Create a new spi controller interface
    pub fn new(
        spi: SPI,
        rst: RST,
        bl: BL,
        delay: DELAY,
    ) -> Spfd54124bSpiInterface<SPI, RST, BL, DELAY> {
        Spfd54124bSpiInterface {
            spi,
            rst,
            bl,
            delay,
        }
    }

    /// Gives back the spi device, the reset and backlight pin and the delay
    pub fn release(self) -> (SPI, RST, BL, DELAY) {
        (self.spi, self.rst, self.bl, self.delay)
    }
}

impl<SPI, RST, BL, DELAY> Spfd54124bInterface for Spfd54124bSpiInterface<SPI, RST, BL, DELAY>
where
    SPI: SpiDevice<u16>,
    RST: OutputPin,
    BL: OutputPin,
    DELAY: DelayNs,
{
    fn send_word(&mut self, word: u16) -> Result<(), Error> {
        // only 9 bits are clocked out
        if self.spi.write(&[word & WORD_MASK]).is_err() {
            return Err(Error::SpiError);
        }
        Ok(())
    }

    // idle framing is done by the spi peripheral, only the reset line is driven
    fn reset(&mut self) -> Result<(), Error> {
        set_pin(&mut self.rst, false)?;
        self.delay.delay_ms(RESET_DELAY_MS);
        set_pin(&mut self.rst, true)?;
        self.delay.delay_ms(RESET_DELAY_MS);
        Ok(())
    }

    fn set_backlight(&mut self, on: bool) -> Result<(), Error> {
        set_pin(&mut self.bl, on)
    }

    fn delay(&mut self, duration: core::time::Duration) -> Result<(), Error> {
        self.delay.delay_us(duration.as_micros() as u32);
        Ok(())
    }
}

/// Implements the controller interface by toggling gpio lines
/// Works with any output pins, the bit rate depends only on how fast the pins toggle
pub struct Spfd54124bBitBangInterface<CS, SCK, MOSI, RST, BL, DELAY> {
    cs: CS,
    sck: SCK,
    mosi: MOSI,
    rst: RST,
    bl: BL,
    delay: DELAY,
}

impl<CS, SCK, MOSI, RST, BL, DELAY> Spfd54124bBitBangInterface<CS, SCK, MOSI, RST, BL, DELAY>
where
    CS: OutputPin,
    SCK: OutputPin,
    MOSI: OutputPin,
    RST: OutputPin,
    BL: OutputPin,
    DELAY: DelayNs,
{
    /// Create a new bit banged controller interface
    pub fn new(
        cs: CS,
        sck: SCK,
        mosi: MOSI,
        rst: RST,
        bl: BL,
        delay: DELAY,
    ) -> Spfd54124bBitBangInterface<CS, SCK, MOSI, RST, BL, DELAY> {
        Spfd54124bBitBangInterface {
            cs,
            sck,
            mosi,
            rst,
            bl,
            delay,
        }
    }

    /// Gives back all pins and the delay
    pub fn release(self) -> (CS, SCK, MOSI, RST, BL, DELAY) {
        (self.cs, self.sck, self.mosi, self.rst, self.bl, self.delay)
    }
}

impl<CS, SCK, MOSI, RST, BL, DELAY> Spfd54124bInterface
    for Spfd54124bBitBangInterface<CS, SCK, MOSI, RST, BL, DELAY>
where
    CS: OutputPin,
    SCK: OutputPin,
    MOSI: OutputPin,
    RST: OutputPin,
    BL: OutputPin,
    DELAY: DelayNs,
{
    fn send_word(&mut self, word: u16) -> Result<(), Error> {
        set_pin(&mut self.cs, false)?;
        // msb (command/data flag) first, the controller samples on the rising edge
        for bit in (0..SPI_WORD_BITS).rev() {
            set_pin(&mut self.mosi, word & (1 << bit) != 0)?;
            set_pin(&mut self.sck, false)?;
            set_pin(&mut self.sck, true)?;
        }
        set_pin(&mut self.cs, true)?;
        Ok(())
    }

    fn reset(&mut self) -> Result<(), Error> {
        set_pin(&mut self.cs, false)?;
        set_pin(&mut self.rst, false)?;
        self.delay.delay_ms(RESET_DELAY_MS);
        set_pin(&mut self.cs, true)?;
        set_pin(&mut self.rst, true)?;
        self.delay.delay_ms(RESET_DELAY_MS);
        // idle state of the lines between words
        set_pin(&mut self.mosi, false)?;
        set_pin(&mut self.sck, true)?;
        Ok(())
    }

    fn set_backlight(&mut self, on: bool) -> Result<(), Error> {
        set_pin(&mut self.bl, on)
    }

    fn delay(&mut self, duration: core::time::Duration) -> Result<(), Error> {
        self.delay.delay_us(duration.as_micros() as u32);
        Ok(())
    }
}
