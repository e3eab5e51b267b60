use embedded_hal::spi::{self, Error as _, Operation, SpiDevice};
use linux_embedded_hal::gpio_cdev::{Chip, LineRequestFlags};
use linux_embedded_hal::spidev::{SpiModeFlags, SpidevOptions};
use linux_embedded_hal::{CdevPin, Delay, SpidevDevice};
use std::error::Error;
use std::{thread, time::Duration};

use embedded_graphics::{
    pixelcolor::Rgb565,
    prelude::*,
    primitives::{PrimitiveStyle, Rectangle},
};
use spfd54124b::{
    interface::{
        Spfd54124bBitBangInterface, Spfd54124bInterface, Spfd54124bSpiInterface,
        SPI_MAX_SPEED_HZ, SPI_WORD_BITS,
    },
    Color, Config, Orientation, Spfd54124b,
};

/// Hardware SPI needs a controller that supports 9 bit words, otherwise the lines are bit banged.
/// Pass `--hwspi` to use /dev/spidev0.0
const HWSPI_FLAG: &str = "--hwspi";

/// spidev transfers words wider than 8 bit as two bytes in native order
struct NineBitSpidev(SpidevDevice);

impl spi::ErrorType for NineBitSpidev {
    type Error = spi::ErrorKind;
}

impl SpiDevice<u16> for NineBitSpidev {
    fn transaction(&mut self, operations: &mut [Operation<'_, u16>]) -> Result<(), Self::Error> {
        for op in operations {
            match op {
                Operation::Write(words) => {
                    let bytes: Vec<u8> = words.iter().flat_map(|w| w.to_ne_bytes()).collect();
                    self.0.write(&bytes).map_err(|e| e.kind())?;
                }
                _ => return Err(spi::ErrorKind::Other),
            }
        }
        Ok(())
    }
}

fn output_pin(chip: &mut Chip, line: u32, initial: u8) -> Result<CdevPin, Box<dyn Error>> {
    let handle = chip
        .get_line(line)?
        .request(LineRequestFlags::OUTPUT, initial, "spfd54124b")?;
    Ok(CdevPin::new(handle)?)
}

fn main() -> Result<(), Box<dyn Error>> {
    // Raspi SPI0.0 / bit banged lines
    // CS: 8
    // SCK: 11
    // MOSI: 10
    // RST: 17
    // BACKLIGHT: 18
    let mut chip = Chip::new("/dev/gpiochip0")?;
    let rst = output_pin(&mut chip, 17, 1)?;
    let bl = output_pin(&mut chip, 18, 0)?;

    if std::env::args().any(|arg| arg == HWSPI_FLAG) {
        let mut spi = SpidevDevice::open("/dev/spidev0.0")?;
        let spi_options = SpidevOptions::new()
            .bits_per_word(SPI_WORD_BITS)
            .max_speed_hz(SPI_MAX_SPEED_HZ)
            .mode(SpiModeFlags::SPI_MODE_0)
            .build();
        spi.configure(&spi_options)?;

        let interface = Spfd54124bSpiInterface::new(NineBitSpidev(spi), rst, bl, Delay);
        run(interface)
    } else {
        let cs = output_pin(&mut chip, 8, 1)?;
        let sck = output_pin(&mut chip, 11, 1)?;
        let mosi = output_pin(&mut chip, 10, 0)?;

        let interface = Spfd54124bBitBangInterface::new(cs, sck, mosi, rst, bl, Delay);
        run(interface)
    }
}

fn run<I: Spfd54124bInterface>(interface: I) -> Result<(), Box<dyn Error>> {
    let mut lcd = Spfd54124b::new(
        interface,
        Config {
            foreground: Color::WHITE,
            background: Color::BLACK,
            ..Default::default()
        },
    )
    .map_err(|e| format!("initialization failed: {e:?}"))?;
    println!("Initialized panel, color mode {:?}", lcd.color_mode());

    for (orientation, color) in [
        ("_90", Color::WHITE),
        ("_180", Color::YELLOW),
        ("_270", Color::RED),
        ("_0", Color::WHITE),
        ("_90", Color::RED),
    ] {
        let orientation: Orientation = orientation
            .parse()
            .map_err(|e| format!("bad orientation: {e:?}"))?;
        lcd.set_orientation(orientation)
            .and_then(|_| lcd.clear(color))
            .map_err(|e| format!("clear failed: {e:?}"))?;
        thread::sleep(Duration::from_millis(200));
    }

    // Draw a filled square in the center
    let center = lcd.bounding_box().center();
    Rectangle::with_center(center, Size::new(40, 40))
        .into_styled(PrimitiveStyle::with_fill(Rgb565::BLUE))
        .draw(&mut lcd)
        .map_err(|e| format!("draw failed: {e:?}"))?;

    let _interface = lcd.release();

    Ok(())
}
