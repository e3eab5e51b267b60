//! Test doubles for the hardware traits and the controller interface

use crate::interface::{self, Spfd54124bInterface};
use core::time::Duration;
use embedded_hal::{delay::DelayNs, digital, spi};
use std::{cell::RefCell, rc::Rc};

/// Gpio lines of the panel connector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Line {
    Cs,
    Sck,
    Mosi,
    Rst,
    Backlight,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BusEvent {
    Pin(Line, bool),
    SpiWord(u16),
    DelayUs(u64),
}

/// Shared, ordered record of everything the mocks see
#[derive(Debug, Clone, Default)]
pub struct EventLog(Rc<RefCell<Vec<BusEvent>>>);

impl EventLog {
    fn push(&self, event: BusEvent) {
        self.0.borrow_mut().push(event);
    }

    pub fn events(&self) -> Vec<BusEvent> {
        self.0.borrow().clone()
    }
}

pub struct MockPin {
    line: Line,
    log: EventLog,
    fail: bool,
}

impl MockPin {
    pub fn new(line: Line, log: &EventLog) -> Self {
        MockPin {
            line,
            log: log.clone(),
            fail: false,
        }
    }

    pub fn failing(line: Line, log: &EventLog) -> Self {
        MockPin {
            fail: true,
            ..MockPin::new(line, log)
        }
    }

    fn set(&mut self, high: bool) -> Result<(), digital::ErrorKind> {
        if self.fail {
            return Err(digital::ErrorKind::Other);
        }
        self.log.push(BusEvent::Pin(self.line, high));
        Ok(())
    }
}

impl digital::ErrorType for MockPin {
    type Error = digital::ErrorKind;
}

impl digital::OutputPin for MockPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.set(false)
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.set(true)
    }
}

/// Records written 9 bit words
pub struct MockSpi {
    log: EventLog,
    fail: bool,
}

impl MockSpi {
    pub fn new(log: &EventLog) -> Self {
        MockSpi {
            log: log.clone(),
            fail: false,
        }
    }

    pub fn failing(log: &EventLog) -> Self {
        MockSpi {
            log: log.clone(),
            fail: true,
        }
    }
}

impl spi::ErrorType for MockSpi {
    type Error = spi::ErrorKind;
}

impl spi::SpiDevice<u16> for MockSpi {
    fn transaction(
        &mut self,
        operations: &mut [spi::Operation<'_, u16>],
    ) -> Result<(), Self::Error> {
        if self.fail {
            return Err(spi::ErrorKind::Other);
        }
        for operation in operations.iter() {
            if let spi::Operation::Write(words) = operation {
                for word in words.iter() {
                    self.log.push(BusEvent::SpiWord(*word));
                }
            }
        }
        Ok(())
    }
}

/// Records every delay in microseconds
pub struct MockDelay {
    log: EventLog,
}

impl MockDelay {
    pub fn new(log: &EventLog) -> Self {
        MockDelay { log: log.clone() }
    }
}

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.log.push(BusEvent::DelayUs(ns as u64 / 1_000));
    }

    fn delay_us(&mut self, us: u32) {
        self.log.push(BusEvent::DelayUs(us as u64));
    }

    fn delay_ms(&mut self, ms: u32) {
        self.log.push(BusEvent::DelayUs(ms as u64 * 1_000));
    }
}

/// Reassembles the 9 bit words clocked out on the gpio lines
/// Bits are taken on the rising clock edge while chip select is low
pub fn decode_bit_bang(events: &[BusEvent]) -> Vec<u16> {
    let mut words = Vec::new();
    let mut selected = false;
    let mut mosi = false;
    let mut word = 0u16;
    let mut bits = 0;

    for event in events {
        match *event {
            BusEvent::Pin(Line::Cs, false) => {
                selected = true;
                word = 0;
                bits = 0;
            }
            BusEvent::Pin(Line::Cs, true) => {
                if selected && bits == 9 {
                    words.push(word);
                }
                selected = false;
            }
            BusEvent::Pin(Line::Mosi, level) => mosi = level,
            BusEvent::Pin(Line::Sck, true) if selected => {
                word = (word << 1) | mosi as u16;
                bits += 1;
            }
            _ => {}
        }
    }
    words
}

/// Controller interface recording the raw words instead of sending them
#[derive(Debug, Default)]
pub struct RecordingInterface {
    pub words: Vec<u16>,
    pub resets: usize,
    pub backlight: Option<bool>,
    pub delays: Vec<Duration>,
    /// fail every word after this many were sent
    pub fail_after: Option<usize>,
}

impl RecordingInterface {
    pub fn failing_after(words: usize) -> Self {
        RecordingInterface {
            fail_after: Some(words),
            ..Default::default()
        }
    }
}

impl Spfd54124bInterface for RecordingInterface {
    fn send_word(&mut self, word: u16) -> Result<(), interface::Error> {
        if self.fail_after.is_some_and(|limit| self.words.len() >= limit) {
            return Err(interface::Error::SpiError);
        }
        self.words.push(word);
        Ok(())
    }

    fn reset(&mut self) -> Result<(), interface::Error> {
        self.resets += 1;
        Ok(())
    }

    fn set_backlight(&mut self, on: bool) -> Result<(), interface::Error> {
        self.backlight = Some(on);
        Ok(())
    }

    fn delay(&mut self, duration: Duration) -> Result<(), interface::Error> {
        self.delays.push(duration);
        Ok(())
    }
}

pub fn cmd(byte: u8) -> u16 {
    interface::frame_command(byte)
}

pub fn data(byte: u8) -> u16 {
    interface::frame_data(byte)
}
